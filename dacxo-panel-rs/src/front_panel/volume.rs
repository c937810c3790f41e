use super::{DAC_LEVEL_MAX, MAX_VOLUME};

/// Volume step counter, bounded to `0..=max`.
///
/// Steps outside the range are ignored rather than clamped, so
/// [`up()`](Self::up) and [`down()`](Self::down) report whether anything
/// actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Volume {
    level: u8,
    max: u8,
}

impl Default for Volume {
    fn default() -> Self {
        Self::with_max(MAX_VOLUME)
    }
}

impl Volume {
    /// Create a silent volume counter with the given upper bound.
    ///
    /// A `max` of 0 is raised to 1 so the DAC mapping never divides by zero.
    pub fn with_max(max: u8) -> Self {
        Self {
            level: 0,
            max: max.max(1),
        }
    }

    /// Current step, `0..=max`.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Upper bound of the counter.
    pub fn max(&self) -> u8 {
        self.max
    }

    /// One step louder. Returns `false` if already at `max`.
    pub fn up(&mut self) -> bool {
        if self.level >= self.max {
            return false;
        }
        self.level += 1;
        true
    }

    /// One step quieter. Returns `false` if already silent.
    pub fn down(&mut self) -> bool {
        if self.level == 0 {
            return false;
        }
        self.level -= 1;
        true
    }

    /// Map the current step onto the DAC's `0..=64` attenuation scale.
    ///
    /// Step 0 stays 0 (silent) and `max` maps to 64 (0 dB).
    ///
    /// # Examples
    ///
    /// ```
    /// use dacxo::front_panel::Volume;
    ///
    /// let mut v = Volume::with_max(32);
    /// assert_eq!(v.dac_level(), 0);
    /// v.up();
    /// assert_eq!(v.dac_level(), 2);
    /// ```
    pub fn dac_level(&self) -> u8 {
        let scaled = u16::from(self.level) * u16::from(DAC_LEVEL_MAX) / u16::from(self.max);
        // level <= max, so scaled <= DAC_LEVEL_MAX.
        scaled as u8
    }
}
