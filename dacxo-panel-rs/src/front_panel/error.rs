/// Errors that can occur when decoding front-panel input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// A remote-control line had fewer than three fields or a repeat
    /// count that is not hexadecimal.
    MalformedRemoteLine,
}

impl core::fmt::Display for PanelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PanelError::MalformedRemoteLine => write!(f, "malformed remote-control line"),
        }
    }
}
