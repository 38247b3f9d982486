//! Output level control with dB-based ducking
//!
//! The engine takes a linear gain per channel. Ducking attenuates both
//! channels by a configured amount in dB without touching playback status.

/// Convert a dB value to a linear gain multiplier
///
/// Formula: gain = 10^(dB / 20)
/// -   0 dB → 1.0 (unity)
/// - -20 dB → 0.1
/// - -60 dB → 0.001 (near silence)
pub fn db_to_gain(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}

/// Output level with a duck state
///
/// Holds the full gain, the gain while ducked, and whether ducking is active.
#[derive(Debug, Clone)]
pub struct OutputLevel {
    /// Linear gain at full volume
    full_gain: f32,

    /// Cached linear gain while ducked
    duck_gain: f32,

    /// Whether the output is currently attenuated
    ducked: bool,
}

impl OutputLevel {
    /// Create an output level
    ///
    /// # Arguments
    /// * `full_gain` - Linear gain at full volume, clamped to 0.0-1.0
    /// * `duck_attenuation_db` - Attenuation applied while ducked (negative dB)
    pub fn new(full_gain: f32, duck_attenuation_db: f32) -> Self {
        let full_gain = full_gain.clamp(0.0, 1.0);
        // Positive values would boost instead of duck
        let attenuation = duck_attenuation_db.min(0.0);

        Self {
            full_gain,
            duck_gain: full_gain * db_to_gain(attenuation),
            ducked: false,
        }
    }

    /// Enter the ducked state, returning the gain to apply
    pub fn duck(&mut self) -> f32 {
        self.ducked = true;
        self.duck_gain
    }

    /// Leave the ducked state, returning the gain to apply
    pub fn restore(&mut self) -> f32 {
        self.ducked = false;
        self.full_gain
    }

    pub fn is_ducked(&self) -> bool {
        self.ducked
    }

    /// Current linear gain
    pub fn gain(&self) -> f32 {
        if self.ducked {
            self.duck_gain
        } else {
            self.full_gain
        }
    }

    /// Current gain in dB
    ///
    /// Useful for debugging and display
    pub fn to_db(&self) -> f32 {
        let gain = self.gain();
        if gain <= 0.0 {
            -60.0
        } else {
            20.0 * gain.log10()
        }
    }
}

impl Default for OutputLevel {
    fn default() -> Self {
        Self::new(1.0, -20.0)
    }
}
