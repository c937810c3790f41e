//! Key decoding for lines emitted by the lirc daemon.
//!
//! Each key event arrives as one line of four whitespace-separated fields:
//!
//! ```text
//! 000000037ff07bef 00 KEY_VOLUMEUP Samsung_BN59
//! └── scancode ──┘ │  └── key ──┘  └─ remote ─┘
//!                  └ repeat count (hex, 00 on the first frame)
//! ```

use super::error::PanelError;

/// Remote-control keys the panel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteKey {
    VolumeUp,
    VolumeDown,
    /// Power toggle. Only reported on the first frame of a key press.
    Power,
}

/// Decode one lirc line into a [`RemoteKey`].
///
/// Volume keys auto-repeat: every frame is reported. The power key only
/// counts when its repeat count is zero, so holding it does not toggle the
/// amplifier on and off. Keys the panel does not use decode to `Ok(None)`.
///
/// # Errors
///
/// [`PanelError::MalformedRemoteLine`] if the line has fewer than three
/// fields or the repeat count is not hexadecimal.
///
/// # Examples
///
/// ```
/// use dacxo::front_panel::{parse_lirc_line, RemoteKey};
///
/// let key = parse_lirc_line("000000037ff07bef 00 KEY_POWER Samsung").unwrap();
/// assert_eq!(key, Some(RemoteKey::Power));
///
/// let held = parse_lirc_line("000000037ff07bef 03 KEY_POWER Samsung").unwrap();
/// assert_eq!(held, None);
/// ```
pub fn parse_lirc_line(line: &str) -> Result<Option<RemoteKey>, PanelError> {
    let mut fields = line.split_whitespace();
    let (_scancode, repeat, key) = match (fields.next(), fields.next(), fields.next()) {
        (Some(s), Some(r), Some(k)) => (s, r, k),
        _ => return Err(PanelError::MalformedRemoteLine),
    };

    if !repeat.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(PanelError::MalformedRemoteLine);
    }
    let repeat =
        u32::from_str_radix(repeat, 16).map_err(|_| PanelError::MalformedRemoteLine)?;

    let decoded = match key {
        "KEY_VOLUMEUP" | "KEY_UP" => Some(RemoteKey::VolumeUp),
        "KEY_VOLUMEDOWN" | "KEY_DOWN" => Some(RemoteKey::VolumeDown),
        "KEY_POWER" if repeat == 0 => Some(RemoteKey::Power),
        _ => None,
    };

    #[cfg(feature = "defmt")]
    defmt::debug!("lirc key {} repeat {} -> {}", key, repeat, decoded);

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_keys_and_aliases() {
        assert_eq!(
            parse_lirc_line("0000 00 KEY_VOLUMEUP rc"),
            Ok(Some(RemoteKey::VolumeUp))
        );
        assert_eq!(parse_lirc_line("0000 00 KEY_UP rc"), Ok(Some(RemoteKey::VolumeUp)));
        assert_eq!(
            parse_lirc_line("0000 00 KEY_VOLUMEDOWN rc"),
            Ok(Some(RemoteKey::VolumeDown))
        );
        assert_eq!(
            parse_lirc_line("0000 00 KEY_DOWN rc"),
            Ok(Some(RemoteKey::VolumeDown))
        );
    }

    #[test]
    fn volume_keys_repeat() {
        assert_eq!(
            parse_lirc_line("0000 1a KEY_VOLUMEUP rc"),
            Ok(Some(RemoteKey::VolumeUp))
        );
    }

    #[test]
    fn power_only_on_first_frame() {
        assert_eq!(parse_lirc_line("0000 00 KEY_POWER rc"), Ok(Some(RemoteKey::Power)));
        assert_eq!(parse_lirc_line("0000 01 KEY_POWER rc"), Ok(None));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            parse_lirc_line("  0000   00  KEY_POWER  rc\n"),
            Ok(Some(RemoteKey::Power))
        );
    }

    #[test]
    fn missing_remote_name_is_accepted() {
        assert_eq!(parse_lirc_line("0000 00 KEY_UP"), Ok(Some(RemoteKey::VolumeUp)));
    }

    #[test]
    fn unknown_key_is_none() {
        assert_eq!(parse_lirc_line("0000 00 KEY_MUTE rc"), Ok(None));
    }

    #[test]
    fn short_line_is_malformed() {
        assert_eq!(parse_lirc_line(""), Err(PanelError::MalformedRemoteLine));
        assert_eq!(
            parse_lirc_line("0000 00"),
            Err(PanelError::MalformedRemoteLine)
        );
    }

    #[test]
    fn bad_repeat_count_is_malformed() {
        assert_eq!(
            parse_lirc_line("0000 zz KEY_POWER rc"),
            Err(PanelError::MalformedRemoteLine)
        );
    }

    #[test]
    fn signed_repeat_count_is_malformed() {
        assert_eq!(
            parse_lirc_line("0000 +0 KEY_POWER rc"),
            Err(PanelError::MalformedRemoteLine)
        );
        assert_eq!(
            parse_lirc_line("0000 -1 KEY_VOLUMEUP rc"),
            Err(PanelError::MalformedRemoteLine)
        );
    }
}
