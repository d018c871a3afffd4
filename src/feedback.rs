//! Feedback adapter: transport state to display fields and key LEDs.
//!
//! LEDs are kept in a frame buffer that fades a little on every refresh, so
//! anything painted once (a pad hit, the tempo flash) glows and dies out
//! on its own. Refreshes are gated on wall time, independent of how often
//! the loop polls.

use core::fmt::Write;

use heapless::String;

use crate::colors::{self, Rgb8, colorwheel, fade, rgb};
use crate::config::{Config, NAME_LEN, NUM_LEDS};
use crate::input::{KeyLayout, KeyRole};
use crate::time::TimeInstant;
use crate::transport::TransportView;
use crate::types::{PadId, StepEvent};

/// Addressable LED strip, one LED per key.
pub trait LedStrip {
    /// Stages a color; nothing is visible until [`LedStrip::show`].
    fn set(&mut self, index: usize, color: Rgb8);

    /// Flushes staged colors to the hardware.
    fn show(&mut self);
}

/// Named text fields on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayField {
    Bpm,
    Pattern,
    Kit,
    Transport,
    EncoderMode,
    Info,
}

impl DisplayField {
    pub const ALL: [DisplayField; 6] = [
        DisplayField::Bpm,
        DisplayField::Pattern,
        DisplayField::Kit,
        DisplayField::Transport,
        DisplayField::EncoderMode,
        DisplayField::Info,
    ];
}

/// Display collaborator.
pub trait DisplaySink {
    fn set_field(&mut self, field: DisplayField, text: &str);
}

pub const PLAY_ON: Rgb8 = rgb(0x00FF00);
pub const PLAY_OFF: Rgb8 = rgb(0x114400);
pub const RECORD_ON: Rgb8 = rgb(0xFF0000);
pub const RECORD_HELD: Rgb8 = rgb(0x440044);
pub const RECORD_OFF: Rgb8 = rgb(0x441100);
pub const MUTE_HELD: Rgb8 = rgb(0x0044FF);
pub const MUTE_OFF: Rgb8 = rgb(0x001144);
pub const TAP_HELD: Rgb8 = rgb(0x333333);
/// Play key while edit-held: duplicate pattern.
pub const EDIT_DUPLICATE: Rgb8 = rgb(0xFFFF00);
/// Record key while edit-held: save.
pub const EDIT_SAVE: Rgb8 = rgb(0x00FFFF);
pub const PAD_MUTED: Rgb8 = rgb(0xFF0000);
pub const PAD_OPEN: Rgb8 = rgb(0x00FF00);
pub const PAD_ERASE: Rgb8 = rgb(0xFF00FF);
pub const PAD_STEP_HIT: Rgb8 = rgb(0x333333);
pub const BEAT_FLASH: Rgb8 = rgb(0x333333);
pub const FIRST_BEAT_FLASH: Rgb8 = rgb(0x3333FF);

/// Milliseconds per colorwheel position.
const WHEEL_MILLIS: u64 = 50;

/// Renders a [`TransportView`] onto an LED strip and a display.
///
/// # Type Parameters
/// * `I` - Time instant type
/// * `L` - LED strip
/// * `D` - Display sink
pub struct Feedback<I: TimeInstant, L: LedStrip, D: DisplaySink> {
    layout: KeyLayout,
    leds: L,
    display: D,
    frame: [Rgb8; NUM_LEDS],
    shown: [Option<String<NAME_LEN>>; 6],
    origin: I,
    last_render: Option<I>,
    interval_ms: u64,
    decay: u8,
    floor: u8,
}

impl<I: TimeInstant, L: LedStrip, D: DisplaySink> Feedback<I, L, D> {
    pub fn new(config: &Config, layout: KeyLayout, leds: L, display: D, now: I) -> Self {
        Self {
            layout,
            leds,
            display,
            frame: [colors::OFF; NUM_LEDS],
            shown: Default::default(),
            origin: now,
            last_render: None,
            interval_ms: config.led_interval_ms,
            decay: config.led_decay,
            floor: config.led_floor,
        }
    }

    /// Flashes the tempo indicator on the tap key for each beat, blue on
    /// the first step.
    pub fn on_step(&mut self, event: StepEvent, is_beat: bool) {
        let color = if event.position == 0 {
            FIRST_BEAT_FLASH
        } else if is_beat {
            BEAT_FLASH
        } else {
            return;
        };
        self.paint(KeyRole::Tap, color);
    }

    /// Refreshes display and LEDs if the LED interval has elapsed.
    ///
    /// Returns `true` when a frame was pushed.
    pub fn render(&mut self, view: &TransportView<'_>, now: I) -> bool {
        if let Some(last) = self.last_render {
            if now.millis_since(last) < self.interval_ms {
                return false;
            }
        }
        self.last_render = Some(now);

        self.update_display(view);
        self.paint_keys(view, now);

        for (index, color) in self.frame.iter_mut().enumerate() {
            *color = fade(*color, self.decay, self.floor);
            self.leds.set(index, *color);
        }
        self.leds.show();
        true
    }

    /// Current LED frame.
    pub fn frame(&self) -> &[Rgb8; NUM_LEDS] {
        &self.frame
    }

    /// Key layout shared with input routing.
    pub fn layout(&self) -> &KeyLayout {
        &self.layout
    }

    pub fn leds(&self) -> &L {
        &self.leds
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    fn update_display(&mut self, view: &TransportView<'_>) {
        let mut bpm: String<NAME_LEN> = String::new();
        let _ = write!(bpm, "{}", view.bpm);

        self.push_field(DisplayField::Bpm, &bpm);
        self.push_field(DisplayField::Pattern, view.pattern.name());
        self.push_field(DisplayField::Kit, view.kit.map_or("-", |kit| kit.name()));
        self.push_field(DisplayField::Transport, view.state.label());
        self.push_field(DisplayField::EncoderMode, view.state.encoder_mode.label());
        self.push_field(
            DisplayField::Info,
            view.state.info.map_or("", |info| info.label()),
        );
    }

    fn push_field(&mut self, field: DisplayField, text: &str) {
        let slot = &mut self.shown[field as usize];
        if slot.as_deref() == Some(text) {
            return;
        }
        *slot = String::try_from(text).ok();
        self.display.set_field(field, text);
    }

    fn paint_keys(&mut self, view: &TransportView<'_>, now: I) {
        let state = view.state;

        let play = if state.edit_held {
            EDIT_DUPLICATE
        } else if state.playing {
            PLAY_ON
        } else {
            PLAY_OFF
        };
        self.paint(KeyRole::Play, play);

        let record = if state.edit_held {
            EDIT_SAVE
        } else if state.recording {
            RECORD_ON
        } else if state.rec_held {
            RECORD_HELD
        } else {
            RECORD_OFF
        };
        self.paint(KeyRole::Record, record);

        self.paint(
            KeyRole::Mute,
            if state.mute_held { MUTE_HELD } else { MUTE_OFF },
        );
        if state.tap_held {
            self.paint(KeyRole::Tap, TAP_HELD);
        }

        let wheel = colorwheel((now.millis_since(self.origin) / WHEEL_MILLIS) as u8);
        for pad in PadId::all() {
            let color = if state.mute_held {
                if state.pads_muted.contains(pad) {
                    PAD_MUTED
                } else {
                    PAD_OPEN
                }
            } else if state.erase_armed() {
                PAD_ERASE
            } else if state.tap_held {
                if view.pattern.hit(pad, view.current_step) {
                    PAD_STEP_HIT
                } else {
                    continue;
                }
            } else if state.pads_lit.contains(pad) {
                wheel
            } else {
                // left to fade
                continue;
            };
            self.paint(KeyRole::Pad(pad), color);
        }
    }

    fn paint(&mut self, role: KeyRole, color: Rgb8) {
        if let Some(slot) = self.layout.key_for(role).and_then(|key| self.frame.get_mut(key)) {
            *slot = color;
        }
    }
}
