use serde::{Deserialize, Serialize};

/// Pay rules applied uniformly to every week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaySettings {
    #[serde(default = "default_threshold")]
    pub overtime_threshold_hours: f64,
    #[serde(default = "default_multiplier")]
    pub overtime_multiplier: f64,
    #[serde(default)]
    pub break_minutes: i64,
    #[serde(default)]
    pub rounding_minutes: i64,
}

pub fn default_threshold() -> f64 {
    40.0
}

pub fn default_multiplier() -> f64 {
    1.25
}

impl Default for PaySettings {
    fn default() -> Self {
        Self {
            overtime_threshold_hours: default_threshold(),
            overtime_multiplier: default_multiplier(),
            break_minutes: 0,
            rounding_minutes: 0,
        }
    }
}

impl PaySettings {
    pub fn new(overtime_threshold_hours: f64, overtime_multiplier: f64) -> Self {
        Self {
            overtime_threshold_hours,
            overtime_multiplier,
            ..Self::default()
        }
    }

    /// Reject negative or non-finite values. The allocator itself accepts
    /// anything, so settings read from files are checked here first.
    pub fn validate(&self) -> Result<(), String> {
        let floats = [
            ("overtime_threshold_hours", self.overtime_threshold_hours),
            ("overtime_multiplier", self.overtime_multiplier),
        ];
        for (key, v) in floats {
            if !v.is_finite() || v < 0.0 {
                return Err(format!("{} must not be negative (got {})", key, v));
            }
        }

        let ints = [
            ("break_minutes", self.break_minutes),
            ("rounding_minutes", self.rounding_minutes),
        ];
        for (key, v) in ints {
            if v < 0 {
                return Err(format!("{} must not be negative (got {})", key, v));
            }
        }

        Ok(())
    }
}
