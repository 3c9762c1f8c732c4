//! # Avatar Energy
//!
//! The avatar's energy meter, seen from the world only as a sink for
//! energy grants.

/// Energy cap.
pub const MAX_ENERGY: f32 = 100.0;

/// Receives energy from world objects.
pub trait EnergySink {
    /// Adds `amount`, clamped to the sink's limits.
    fn grant(&mut self, amount: f32);
}

/// Energy meter in `[0, MAX_ENERGY]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Energy {
    value: f32,
}

impl Default for Energy {
    fn default() -> Self {
        Self { value: MAX_ENERGY }
    }
}

impl Energy {
    /// A full meter.
    #[must_use]
    pub fn full() -> Self {
        Self::default()
    }

    /// A meter at `value`, clamped into range.
    #[must_use]
    pub fn at(value: f32) -> Self {
        Self {
            value: value.clamp(0.0, MAX_ENERGY),
        }
    }

    /// Current value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Removes `amount` if the meter holds at least that much.
    pub fn try_spend(&mut self, amount: f32) -> bool {
        if self.value < amount {
            return false;
        }
        self.value -= amount;
        true
    }
}

impl EnergySink for Energy {
    fn grant(&mut self, amount: f32) {
        self.value = (self.value + amount).clamp(0.0, MAX_ENERGY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_full() {
        assert_eq!(Energy::full().value(), MAX_ENERGY);
    }

    #[test]
    fn test_grant_caps() {
        let mut energy = Energy::at(95.0);
        energy.grant(10.0);
        assert_eq!(energy.value(), MAX_ENERGY);

        let mut low = Energy::at(20.0);
        low.grant(10.0);
        assert_eq!(low.value(), 30.0);
    }

    #[test]
    fn test_spend_requires_balance() {
        let mut energy = Energy::at(5.0);
        assert!(!energy.try_spend(10.0));
        assert_eq!(energy.value(), 5.0);
        assert!(energy.try_spend(5.0));
        assert_eq!(energy.value(), 0.0);
    }
}
