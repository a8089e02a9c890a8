//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into the depot's dense state tables via `id.0 as usize`,
//! but callers should prefer the `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to the type's MAX.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }
    };
}

typed_id! {
    /// Index of a gate in the depot's gate table.
    pub struct GateId(u16);
}

typed_id! {
    /// Index of a parking spot in the depot's spot table.
    pub struct SpotId(u16);
}

typed_id! {
    /// Index of a charger in the depot's charger table.
    pub struct ChargerId(u16);
}

typed_id! {
    /// Identity of a vehicle, assigned in arrival-schedule order.
    pub struct VehicleId(u32);
}

// ── Device ────────────────────────────────────────────────────────────────────

/// Closed set of physical devices the simulator models.
///
/// Sensor sampling, actuator commands, and fault detection all dispatch on
/// this explicit tag — there is no open-ended trait-object polymorphism for
/// device behavior.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Device {
    Gate(GateId),
    Spot(SpotId),
    Charger(ChargerId),
}

/// The kind of a [`Device`], without its index.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceKind {
    Gate,
    Spot,
    Charger,
}

impl Device {
    #[inline]
    pub fn kind(self) -> DeviceKind {
        match self {
            Device::Gate(_) => DeviceKind::Gate,
            Device::Spot(_) => DeviceKind::Spot,
            Device::Charger(_) => DeviceKind::Charger,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Gate(id) => write!(f, "gate_{}", id.0),
            Device::Spot(id) => write!(f, "spot_{}", id.0),
            Device::Charger(id) => write!(f, "charger_{}", id.0),
        }
    }
}
