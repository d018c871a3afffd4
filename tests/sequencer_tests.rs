//! Integration tests for the step clock

mod common;
use common::*;

use drum_sequencer::{StepEvent, StepSequencer, TimeSource, step_duration_ms};

/// Polls every `poll_ms` until `steps` steps fired and returns the time of
/// the last one.
fn run_steps(
    seq: &mut StepSequencer<TestInstant>,
    time: &MockTimeSource,
    poll_ms: u64,
    steps: usize,
) -> u64 {
    let mut fired = 0;
    let mut last = 0;
    while fired < steps {
        time.advance(poll_ms);
        if seq.advance(time.now()).is_some() {
            fired += 1;
            last = time.now().0;
        }
    }
    last
}

#[test]
fn scenario_step_length_and_first_step() {
    assert_eq!(step_duration_ms(120, 4), 125);

    let time = MockTimeSource::new();
    let mut seq = StepSequencer::new(120, 4, 16, time.now());
    seq.anchor(time.now());
    time.advance(125);
    assert_eq!(seq.advance(time.now()), Some(StepEvent { position: 0 }));
    assert_eq!(seq.position(), 1);
}

#[test]
fn drift_stays_bounded_with_coarse_polling() {
    let time = MockTimeSource::new();
    let start = time.now().0;
    let mut seq = StepSequencer::new(120, 4, 16, time.now());

    // 4 ms polls mean each step is seen up to 3 ms late
    let steps = 400;
    let last = run_steps(&mut seq, &time, 4, steps);
    let elapsed = last - start;

    let nominal = steps as u64 * 125;
    assert!(elapsed >= nominal, "ran fast: {} < {}", elapsed, nominal);
    assert!(
        elapsed <= nominal + steps as u64 * 2 + 3,
        "drifted: {} vs {}",
        elapsed,
        nominal
    );
}

#[test]
fn single_late_poll_does_not_shift_later_steps() {
    let time = MockTimeSource::new();
    let mut seq = StepSequencer::new(120, 4, 16, time.now());

    // one iteration stalls 40 ms past the deadline
    time.advance(165);
    assert!(seq.advance(time.now()).is_some());
    assert_eq!(seq.last_step_time().0, 1000 + 145);

    // the next step comes 125 ms after the corrected baseline
    time.set_time(TestInstant(1000 + 145 + 124));
    assert_eq!(seq.advance(time.now()), None);
    time.advance(1);
    assert_eq!(seq.advance(time.now()), Some(StepEvent { position: 1 }));
}

#[test]
fn clock_emits_every_step_in_order() {
    let time = MockTimeSource::new();
    let mut seq = StepSequencer::new(300, 8, 4, time.now());
    let step = seq.step_millis();
    assert_eq!(step, 25);

    let mut positions = Vec::new();
    for _ in 0..9 {
        time.advance(step);
        positions.push(seq.advance(time.now()).unwrap().position);
    }
    assert_eq!(positions, [0, 1, 2, 3, 0, 1, 2, 3, 0]);
}

#[test]
fn beats_fall_on_multiples_of_steps_per_beat() {
    let time = MockTimeSource::new();
    let seq = StepSequencer::new(120, 4, 16, time.now());
    assert!(seq.is_beat(StepEvent { position: 0 }));
    assert!(seq.is_beat(StepEvent { position: 8 }));
    assert!(!seq.is_beat(StepEvent { position: 6 }));
}
