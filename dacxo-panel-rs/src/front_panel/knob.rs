/// Direction of one rotary-knob detent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Turned right: volume up.
    Clockwise,
    /// Turned left: volume down.
    CounterClockwise,
}

impl Rotation {
    /// Decode a detent from the level of channel B, sampled on the falling
    /// edge of channel A.
    ///
    /// Both channels are active-low with pull-ups: B already low when A
    /// falls means B leads, which is a left turn.
    pub fn from_quadrature(b_is_low: bool) -> Self {
        if b_is_low {
            Rotation::CounterClockwise
        } else {
            Rotation::Clockwise
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn b_low_is_counter_clockwise() {
        assert_eq!(Rotation::from_quadrature(true), Rotation::CounterClockwise);
    }

    #[test]
    fn b_high_is_clockwise() {
        assert_eq!(Rotation::from_quadrature(false), Rotation::Clockwise);
    }
}
