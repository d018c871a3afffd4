//! Live-input quantization onto the step grid.

use crate::config::NUM_PADS;
use crate::pattern::Pattern;
use crate::types::PadId;

/// Nearest-step quantization.
///
/// `elapsed` is measured from the nominal start of `current_step`. A hit
/// more than half a step (integer half) into the step belongs to the next
/// one; otherwise it stays on the current step. The result wraps at
/// `num_steps`.
pub fn quantize_step(current_step: usize, elapsed: u64, step_millis: u64, num_steps: usize) -> usize {
    let num_steps = num_steps.max(1);
    if elapsed > step_millis / 2 {
        (current_step + 1) % num_steps
    } else {
        current_step % num_steps
    }
}

/// Where a recorded hit landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RecordedHit {
    pub step: usize,
    /// The hit went to the step that has not fired yet.
    pub ahead: bool,
}

/// Writes quantized hits and guards against the step trigger replaying a
/// voice that a live hit already sounded.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pads_played: [bool; NUM_PADS],
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a hit for `pad` into `pattern`.
    ///
    /// When the hit lands on the upcoming step the pad is guarded so the
    /// next step trigger stays silent for it.
    pub fn record_hit(
        &mut self,
        pattern: &mut Pattern,
        pad: PadId,
        current_step: usize,
        elapsed: u64,
        step_millis: u64,
    ) -> RecordedHit {
        let step = quantize_step(current_step, elapsed, step_millis, pattern.num_steps());
        pattern.set_hit(pad, step, true);

        let ahead = step != current_step % pattern.num_steps().max(1);
        if ahead && pad.0 < NUM_PADS {
            self.pads_played[pad.0] = true;
        }
        RecordedHit { step, ahead }
    }

    /// Returns whether `pad` is guarded and clears the guard.
    pub fn take_played(&mut self, pad: PadId) -> bool {
        match self.pads_played.get_mut(pad.0) {
            Some(played) => core::mem::take(played),
            None => false,
        }
    }

    pub fn is_played(&self, pad: PadId) -> bool {
        self.pads_played.get(pad.0).copied().unwrap_or(false)
    }

    /// Drops every guard.
    pub fn clear(&mut self) {
        self.pads_played = [false; NUM_PADS];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_splits_at_half_step() {
        // 125 ms steps, half = 62
        assert_eq!(quantize_step(3, 61, 125, 16), 3);
        assert_eq!(quantize_step(3, 62, 125, 16), 3);
        assert_eq!(quantize_step(3, 63, 125, 16), 4);
    }

    #[test]
    fn quantize_wraps_to_first_step() {
        assert_eq!(quantize_step(15, 100, 125, 16), 0);
        assert_eq!(quantize_step(15, 10, 125, 16), 15);
    }

    #[test]
    fn guard_is_taken_once() {
        let mut pattern = Pattern::new("t", 16).unwrap();
        let mut recorder = Recorder::new();

        let hit = recorder.record_hit(&mut pattern, PadId(2), 3, 100, 125);
        assert_eq!(hit, RecordedHit { step: 4, ahead: true });
        assert!(pattern.hit(PadId(2), 4));
        assert!(recorder.take_played(PadId(2)));
        assert!(!recorder.take_played(PadId(2)));
    }

    #[test]
    fn hit_on_current_step_is_not_guarded() {
        let mut pattern = Pattern::new("t", 16).unwrap();
        let mut recorder = Recorder::new();

        let hit = recorder.record_hit(&mut pattern, PadId(1), 3, 20, 125);
        assert_eq!(hit, RecordedHit { step: 3, ahead: false });
        assert!(!recorder.is_played(PadId(1)));
    }
}
