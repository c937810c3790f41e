//! Power and volume state of the amplifier front panel.
//!
//! The panel has three inputs: a rotary knob, the knob's push button, and
//! an infrared remote. All of them are reduced to a [`PanelEvent`] and fed
//! into [`FrontPanel::handle()`], which is the single owner of the power
//! and volume state.
//!
//! ```text
//!  knob A/B edges ──► Rotation ─┐
//!  push button ──► Press/Release/LongPress ─┼─► FrontPanel ─► StatusScreen ─► OLED
//!  lirc line ──► RemoteKey ─────┘              │
//!                                              └─► DacSetting ─► PCM1792A
//! ```
//!
//! # Change tracking
//!
//! The display consumer polls [`FrontPanel::screen()`] and diffs the
//! snapshot against the last rendered frame. The DAC consumer calls
//! [`FrontPanel::take_dac_update()`], which returns each new setting once.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation. The optional `defmt` feature enables structured
//! logging for embedded targets.

mod error;
mod knob;
mod panel;
mod remote;
mod volume;

pub use error::PanelError;
pub use knob::Rotation;
pub use panel::{DacSetting, FrontPanel, PanelEvent, PowerState, StatusScreen};
pub use remote::{parse_lirc_line, RemoteKey};
pub use volume::Volume;

/// Highest volume step reachable from the knob or the remote.
pub const MAX_VOLUME: u8 = 29;

/// Full-scale value of the DAC attenuation scale used by [`Volume::dac_level()`].
pub const DAC_LEVEL_MAX: u8 = 64;

/// How long the push button must stay down before the panel powers off.
pub const LONG_PRESS_MS: u64 = 1000;
