//! Front-panel state for the DACXO amplifier.
//!
//! See [`front_panel`] for the knob, button and remote-key handling that
//! turns physical input into power and volume state.

#![no_std]

pub mod front_panel;
