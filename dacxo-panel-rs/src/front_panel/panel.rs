use super::knob::Rotation;
use super::remote::RemoteKey;
use super::volume::Volume;

/// Whether the amplifier is playing or in standby.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    On,
    #[default]
    Off,
}

/// One decoded input from the knob, its button, or the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelEvent {
    /// One knob detent.
    Turn(Rotation),
    /// Button went down.
    Press,
    /// Button came back up.
    Release,
    /// Button has been held for [`LONG_PRESS_MS`](super::LONG_PRESS_MS).
    LongPress,
    /// Key from the infrared remote.
    Remote(RemoteKey),
}

/// Everything the status display shows, captured at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusScreen {
    pub power: PowerState,
    /// Volume step, `0..=MAX_VOLUME`.
    pub volume: u8,
    /// Push button currently held down.
    pub button_held: bool,
}

/// Setting the DAC should be driven to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DacSetting {
    /// Attenuation on the `0..=64` scale (see [`Volume::dac_level()`]).
    pub level: u8,
    /// Output muted because the panel is in standby.
    pub muted: bool,
}

/// Power and volume state shared between the input tasks, the display
/// task and the DAC task.
///
/// # Behaviour
///
/// In standby only a button press or the remote's power key do anything;
/// both power the panel up. While on:
///
/// | Event            | Effect                                          |
/// |------------------|-------------------------------------------------|
/// | `Turn`           | cancels a pending long press, volume up / down  |
/// | `Press`          | button held, long press armed                   |
/// | `Release`        | button released, long press disarmed            |
/// | `LongPress`      | standby, if still armed                         |
/// | `Remote` volume  | volume up / down                                |
/// | `Remote(Power)`  | standby                                         |
///
/// Remote volume keys stay ignored in standby: the volume only moves
/// while the display shows it.
///
/// A new panel starts in standby; the firmware calls
/// [`power_on`](Self::power_on) once the DAC is up.
#[derive(Debug, Clone)]
pub struct FrontPanel {
    power: PowerState,
    volume: Volume,
    button_held: bool,
    long_press_armed: bool,
    changed_dac: bool,
}

impl Default for FrontPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontPanel {
    /// A panel in standby at volume 0 with the default volume range.
    pub fn new() -> Self {
        Self::with_volume(Volume::default())
    }

    /// A panel in standby using the given volume counter.
    pub fn with_volume(volume: Volume) -> Self {
        Self {
            power: PowerState::Off,
            volume,
            button_held: false,
            long_press_armed: false,
            changed_dac: false,
        }
    }

    pub fn power(&self) -> PowerState {
        self.power
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    /// Snapshot for the display task.
    pub fn screen(&self) -> StatusScreen {
        StatusScreen {
            power: self.power,
            volume: self.volume.level(),
            button_held: self.button_held,
        }
    }

    /// Apply one input event.
    ///
    /// Returns `true` if the event was acted on (the status screen or the
    /// DAC setting may have changed), `false` if it was ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use dacxo::front_panel::{FrontPanel, PanelEvent, PowerState, Rotation};
    ///
    /// let mut panel = FrontPanel::new();
    /// // Turning the knob in standby does nothing.
    /// assert!(!panel.handle(PanelEvent::Turn(Rotation::Clockwise)));
    ///
    /// panel.handle(PanelEvent::Press);
    /// assert_eq!(panel.power(), PowerState::On);
    ///
    /// panel.handle(PanelEvent::Turn(Rotation::Clockwise));
    /// assert_eq!(panel.screen().volume, 1);
    /// ```
    pub fn handle(&mut self, event: PanelEvent) -> bool {
        #[cfg(feature = "defmt")]
        defmt::debug!("panel event {} in {}", event, self.power);

        match self.power {
            PowerState::Off => match event {
                PanelEvent::Press | PanelEvent::Remote(RemoteKey::Power) => {
                    self.power_up();
                    true
                }
                _ => false,
            },
            PowerState::On => match event {
                PanelEvent::Turn(rotation) => {
                    self.long_press_armed = false;
                    self.step_volume(rotation)
                }
                PanelEvent::Press => {
                    self.button_held = true;
                    self.long_press_armed = true;
                    true
                }
                PanelEvent::Release => {
                    self.button_held = false;
                    self.long_press_armed = false;
                    true
                }
                PanelEvent::LongPress => {
                    if !self.long_press_armed {
                        return false;
                    }
                    self.power_down();
                    true
                }
                PanelEvent::Remote(RemoteKey::VolumeUp) => self.step_volume(Rotation::Clockwise),
                PanelEvent::Remote(RemoteKey::VolumeDown) => {
                    self.step_volume(Rotation::CounterClockwise)
                }
                PanelEvent::Remote(RemoteKey::Power) => {
                    self.power_down();
                    true
                }
            },
        }
    }

    /// Leave standby as at boot. Does nothing, and returns `false`, if the
    /// panel is already on.
    pub fn power_on(&mut self) -> bool {
        if self.power == PowerState::On {
            return false;
        }
        self.power_up();
        true
    }

    /// Return the DAC setting if it changed since the last call, clearing
    /// the change flag.
    pub fn take_dac_update(&mut self) -> Option<DacSetting> {
        if !self.changed_dac {
            return None;
        }
        self.changed_dac = false;
        Some(self.dac_setting())
    }

    /// The DAC setting matching the current state, without touching the
    /// change flag.
    pub fn dac_setting(&self) -> DacSetting {
        DacSetting {
            level: self.volume.dac_level(),
            muted: self.power == PowerState::Off,
        }
    }

    fn step_volume(&mut self, rotation: Rotation) -> bool {
        let changed = match rotation {
            Rotation::Clockwise => self.volume.up(),
            Rotation::CounterClockwise => self.volume.down(),
        };
        if changed {
            self.changed_dac = true;
        }
        changed
    }

    fn power_up(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!("power up, volume {}", self.volume.level());
        self.power = PowerState::On;
        self.button_held = false;
        self.long_press_armed = false;
        self.changed_dac = true;
    }

    fn power_down(&mut self) {
        #[cfg(feature = "defmt")]
        defmt::info!("standby");
        self.power = PowerState::Off;
        self.button_held = false;
        self.long_press_armed = false;
        self.changed_dac = true;
    }
}
