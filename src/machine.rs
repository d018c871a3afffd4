//! The cooperative event loop.

use crate::command::{KeyEvent, MidiMessage, RawEvent};
use crate::feedback::{DisplaySink, Feedback, LedStrip};
use crate::store::PatternStorage;
use crate::time::{TimeInstant, TimeSource};
use crate::transport::{Transport, VoicePlayer};
use crate::types::{Edge, StepEvent};

/// Raw hardware inputs. Every method must return immediately.
pub trait ControlSurface {
    /// Next decoded MIDI note message, if one is pending.
    fn poll_midi(&mut self) -> Option<MidiMessage>;

    /// Next key edge, if one is pending.
    fn poll_key(&mut self) -> Option<KeyEvent>;

    /// Next encoder button edge, if one is pending.
    fn poll_encoder_push(&mut self) -> Option<Edge>;

    /// Absolute encoder position in detents.
    fn encoder_position(&mut self) -> i32;
}

/// A complete drum machine driven by [`DrumMachine::poll`].
///
/// Each poll reads the clock once and then, in order: drains MIDI, advances
/// the step clock (playing the step if due), checks the encoder hold, handles
/// at most one key edge and one encoder push edge, applies the encoder
/// rotation since the last poll, and refreshes feedback when its interval
/// has elapsed. Nothing blocks.
///
/// Keys are routed through the feedback adapter's
/// [`KeyLayout`](crate::input::KeyLayout), so the LEDs always describe the
/// keys that were pressed.
pub struct DrumMachine<'t, I, T, C, V, S, L, D>
where
    I: TimeInstant,
    T: TimeSource<I>,
    C: ControlSurface,
    V: VoicePlayer,
    S: PatternStorage,
    L: LedStrip,
    D: DisplaySink,
{
    time: &'t T,
    controls: C,
    transport: Transport<I, V, S>,
    feedback: Feedback<I, L, D>,
    encoder_last: i32,
}

impl<'t, I, T, C, V, S, L, D> DrumMachine<'t, I, T, C, V, S, L, D>
where
    I: TimeInstant,
    T: TimeSource<I>,
    C: ControlSurface,
    V: VoicePlayer,
    S: PatternStorage,
    L: LedStrip,
    D: DisplaySink,
{
    pub fn new(
        time: &'t T,
        mut controls: C,
        transport: Transport<I, V, S>,
        feedback: Feedback<I, L, D>,
    ) -> Self {
        let encoder_last = controls.encoder_position();
        Self {
            time,
            controls,
            transport,
            feedback,
            encoder_last,
        }
    }

    /// Runs one loop iteration. Returns the step that fired, if any.
    pub fn poll(&mut self) -> Option<StepEvent> {
        let now = self.time.now();

        while let Some(msg) = self.controls.poll_midi() {
            self.dispatch(RawEvent::Midi(msg), now);
        }

        let step = self.transport.tick(now);
        if let Some(event) = step {
            let beat = self.transport.sequencer().is_beat(event);
            self.feedback.on_step(event, beat);
        }

        self.transport.check_hold(now);

        if let Some(key) = self.controls.poll_key() {
            self.dispatch(RawEvent::Key(key), now);
        }
        if let Some(edge) = self.controls.poll_encoder_push() {
            self.dispatch(RawEvent::EncoderPush(edge), now);
        }

        let position = self.controls.encoder_position();
        let delta = position.wrapping_sub(self.encoder_last);
        if delta != 0 {
            self.encoder_last = position;
            self.dispatch(RawEvent::EncoderTurn(delta), now);
        }

        self.feedback.render(&self.transport.view(), now);
        step
    }

    /// Polls forever.
    pub fn run(&mut self) -> ! {
        info!("drum machine running");
        loop {
            self.poll();
        }
    }

    pub fn transport(&self) -> &Transport<I, V, S> {
        &self.transport
    }

    pub fn feedback(&self) -> &Feedback<I, L, D> {
        &self.feedback
    }

    pub fn controls_mut(&mut self) -> &mut C {
        &mut self.controls
    }

    fn dispatch(&mut self, event: RawEvent, now: I) {
        if let Some(command) = self.feedback.layout().route(event) {
            self.transport.handle(command, now);
        }
    }
}
