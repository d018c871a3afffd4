//! Step clock with drift compensation.
//!
//! Provides [`StepSequencer`], which turns wall-clock instants into step
//! events. It is polled, never scheduled: every loop iteration calls
//! [`StepSequencer::advance`] with the current instant and gets back the step
//! that is due, if any. The sequencer does not play audio or touch LEDs.

use crate::config::{MAX_BPM, MIN_BPM};
use crate::time::TimeInstant;
use crate::types::StepEvent;

/// Length of one step in milliseconds, `round(60000 / bpm / steps_per_beat)`.
///
/// Both inputs are treated as at least 1 and the result is never zero.
pub fn step_duration_ms(bpm: u16, steps_per_beat: u16) -> u64 {
    let steps_per_minute = bpm.max(1) as u64 * steps_per_beat.max(1) as u64;
    ((60_000 + steps_per_minute / 2) / steps_per_minute).max(1)
}

/// Drift-compensated step clock.
///
/// `position` is the index of the next step to fire; `current_step` is the
/// one that fired last.
///
/// # Type Parameters
/// * `I` - Time instant type
#[derive(Debug, Clone, Copy)]
pub struct StepSequencer<I: TimeInstant> {
    bpm: u16,
    steps_per_beat: u16,
    step_millis: u64,
    last_step_time: I,
    /// Step `position` fires on the next poll regardless of elapsed time.
    due_now: bool,
    position: usize,
    num_steps: usize,
}

impl<I: TimeInstant> StepSequencer<I> {
    /// Creates a clock at `position` 0 whose first step is due one step
    /// duration after `now`.
    pub fn new(bpm: u16, steps_per_beat: u16, num_steps: usize, now: I) -> Self {
        let bpm = bpm.clamp(MIN_BPM, MAX_BPM);
        let steps_per_beat = steps_per_beat.max(1);
        Self {
            bpm,
            steps_per_beat,
            step_millis: step_duration_ms(bpm, steps_per_beat),
            last_step_time: now,
            due_now: false,
            position: 0,
            num_steps: num_steps.max(1),
        }
    }

    /// Reports the step that is due at `now`, if any.
    ///
    /// A poll that lands `late` milliseconds past the deadline moves the
    /// baseline to `now - late / 2`. Half the lateness is absorbed so a
    /// single slow iteration neither accumulates into drift nor jerks the
    /// following step.
    pub fn advance(&mut self, now: I) -> Option<StepEvent> {
        if self.due_now {
            self.due_now = false;
            self.last_step_time = now;
        } else {
            let diff = now.millis_since(self.last_step_time);
            if diff < self.step_millis {
                return None;
            }

            let late = diff - self.step_millis;
            self.last_step_time = now.back_by_millis(late / 2);
        }

        let event = StepEvent {
            position: self.position,
        };
        self.position = (self.position + 1) % self.num_steps;
        Some(event)
    }

    /// Restarts at step 0, due on the next poll rather than a full period
    /// from now.
    pub fn anchor(&mut self, now: I) {
        self.position = 0;
        self.last_step_time = now;
        self.due_now = true;
    }

    /// Sets the tempo, clamped to `MIN_BPM..=MAX_BPM`. Returns the tempo in
    /// effect.
    pub fn set_bpm(&mut self, bpm: u16) -> u16 {
        self.bpm = bpm.clamp(MIN_BPM, MAX_BPM);
        self.step_millis = step_duration_ms(self.bpm, self.steps_per_beat);
        self.bpm
    }

    /// Moves the tempo by `delta` beats per minute, clamped.
    pub fn adjust_bpm(&mut self, delta: i32) -> u16 {
        let bpm = (self.bpm as i32)
            .saturating_add(delta)
            .clamp(MIN_BPM as i32, MAX_BPM as i32);
        self.set_bpm(bpm as u16)
    }

    /// Changes the pattern length. The position wraps into the new range.
    pub fn set_num_steps(&mut self, num_steps: usize) {
        self.num_steps = num_steps.max(1);
        self.position %= self.num_steps;
    }

    pub fn bpm(&self) -> u16 {
        self.bpm
    }

    pub fn steps_per_beat(&self) -> u16 {
        self.steps_per_beat
    }

    /// Current step length in milliseconds.
    pub fn step_millis(&self) -> u64 {
        self.step_millis
    }

    /// Index of the next step to fire.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Index of the step that fired last.
    pub fn current_step(&self) -> usize {
        (self.position + self.num_steps - 1) % self.num_steps
    }

    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Nominal start of the current step.
    pub fn last_step_time(&self) -> I {
        self.last_step_time
    }

    /// Milliseconds since the current step's nominal start. A step that is
    /// due now counts as a full step elapsed.
    pub fn elapsed_in_step(&self, now: I) -> u64 {
        if self.due_now {
            return self.step_millis;
        }
        now.millis_since(self.last_step_time)
    }

    /// Whether `event` falls on a beat.
    pub fn is_beat(&self, event: StepEvent) -> bool {
        event.position % self.steps_per_beat as usize == 0
    }
}
