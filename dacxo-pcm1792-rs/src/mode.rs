//! The 24-bit mode word spread over registers 18–21.
//!
//! Single-bit options are plain flags. Four fields span several bits
//! (de-emphasis rate, audio format, attenuation rate, oversampling); their
//! named values overlap, so test them with [`Mode::field`] rather than
//! `contains`.

use core::fmt;

use bitflags::bitflags;

bitflags! {
    /// PCM1792A mode-control bits, least significant byte = register 18.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Mode: u32 {
        /// Soft mute, both channels.
        const MUTE = 0x00_0001;
        /// Digital de-emphasis enable.
        const DME = 0x00_0002;
        const DMF_48 = 0x00_0004;
        const DMF_44 = 0x00_0008;
        const DMF_32 = 0x00_000C;
        const FMT_20R = 0x00_0010;
        const FMT_24R = 0x00_0020;
        const FMT_24L = 0x00_0030;
        const FMT_16I = 0x00_0040;
        const FMT_24I = 0x00_0050;
        /// Attenuation load control. Registers 16/17 are ignored while clear.
        const ATLD = 0x00_0080;
        /// Infinite zero detect mute.
        const INZD = 0x00_0100;
        /// Slow roll-off filter.
        const FLT = 0x00_0200;
        /// DSD filter select.
        const DFMS = 0x00_0400;
        /// Analog output disable.
        const OPE = 0x00_1000;
        const ATS_LR2 = 0x00_2000;
        const ATS_LR4 = 0x00_4000;
        const ATS_LR8 = 0x00_6000;
        const OS_32 = 0x01_0000;
        const OS_128 = 0x02_0000;
        /// Mono mode outputs the right channel.
        const CHSL = 0x04_0000;
        const MONO = 0x08_0000;
        /// Digital filter bypass.
        const DFTH = 0x10_0000;
        /// DSD input.
        const DSD = 0x20_0000;
        /// System reset.
        const SRST = 0x40_0000;
        const RSV = 0x80_0000;
    }
}

/// De-emphasis sample rate field.
pub const DMF_MASK: u32 = 0x00_000C;
/// Audio interface format field.
pub const FMT_MASK: u32 = 0x00_0070;
/// Attenuation rate field.
pub const ATS_MASK: u32 = 0x00_6000;
/// Oversampling rate field.
pub const OS_MASK: u32 = 0x03_0000;

/// Multi-bit fields in display order: mask, name of the zero value, and
/// names of the non-zero values.
const FIELDS: [(u32, &str, &[(u32, &str)]); 4] = [
    (DMF_MASK, "DmfNo", &[(0x4, "Dmf48"), (0x8, "Dmf44"), (0xC, "Dmf32")]),
    (
        FMT_MASK,
        "Fmt16R",
        &[(0x10, "Fmt20R"), (0x20, "Fmt24R"), (0x30, "Fmt24L"), (0x40, "Fmt16I"), (0x50, "Fmt24I")],
    ),
    (ATS_MASK, "AtsLr1", &[(0x2000, "AtsLr2"), (0x4000, "AtsLr4"), (0x6000, "AtsLr8")]),
    (OS_MASK, "Os64", &[(0x1_0000, "Os32"), (0x2_0000, "Os128")]),
];

const SINGLE_BITS: [(Mode, &str); 13] = [
    (Mode::MUTE, "Mute"),
    (Mode::DME, "Dme"),
    (Mode::ATLD, "Atld"),
    (Mode::INZD, "Inzd"),
    (Mode::FLT, "Flt"),
    (Mode::DFMS, "Dfms"),
    (Mode::OPE, "Ope"),
    (Mode::CHSL, "Right"),
    (Mode::MONO, "Mono"),
    (Mode::DFTH, "Dfth"),
    (Mode::DSD, "Dsd"),
    (Mode::SRST, "Srst"),
    (Mode::RSV, "Rsv"),
];

impl Mode {
    /// Register contents after power-on reset: 24-bit I2S, attenuation
    /// registers ignored.
    pub const POWER_ON: Mode = Mode::FMT_24I;

    /// Bits of a multi-bit field, e.g. `mode.field(FMT_MASK) == Mode::FMT_24L.bits()`.
    pub const fn field(self, mask: u32) -> u32 {
        self.bits() & mask
    }

    /// Replace a multi-bit field with `value` (a named constant of that field,
    /// or [`Mode::empty`] for the field's zero value).
    pub fn with_field(self, mask: u32, value: Mode) -> Mode {
        Mode::from_bits_retain((self.bits() & !mask) | (value.bits() & mask))
    }

    /// The four bytes written to registers 18–21.
    pub const fn register_bytes(self) -> [u8; 4] {
        self.bits().to_le_bytes()
    }
}

/// Comma-separated option names, multi-bit fields first:
/// `Mode::POWER_ON` prints `DmfNo,Fmt24I,AtsLr1,Os64`.
impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;

        for (mask, zero_name, values) in FIELDS {
            let value = self.field(mask);
            if value == 0 {
                put(f, &mut first, zero_name)?;
            } else if let Some((_, name)) = values.iter().find(|(v, _)| *v == value) {
                put(f, &mut first, name)?;
            }
        }

        for (flag, name) in SINGLE_BITS {
            if self.contains(flag) {
                put(f, &mut first, name)?;
            }
        }
        Ok(())
    }
}

fn put(f: &mut fmt::Formatter, first: &mut bool, name: &str) -> fmt::Result {
    if !*first {
        f.write_str(",")?;
    }
    *first = false;
    f.write_str(name)
}

#[cfg(feature = "defmt")]
impl defmt::Format for Mode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Mode({=u32:#x})", self.bits());
    }
}
