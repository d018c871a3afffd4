//! Transport state machine.
//!
//! [`Transport`] owns the pattern store, step clock, recorder and the voice
//! and storage collaborators. It consumes [`Command`]s from the input router
//! and step events from its own clock, and exposes a read-only
//! [`TransportView`] for feedback.

use crate::command::Command;
use crate::config::Config;
use crate::kit::Kit;
use crate::pattern::Pattern;
use crate::recorder::Recorder;
use crate::sequencer::StepSequencer;
use crate::store::{PatternStorage, PatternStore};
use crate::time::TimeInstant;
use crate::types::{ConfigError, Edge, EncoderMode, PadId, PadSet, StepEvent};

/// Sample playback collaborator. One voice per pad.
pub trait VoicePlayer {
    /// Starts `sample` on the voice of `pad`, restarting it if it sounds.
    fn play(&mut self, pad: PadId, sample: &str);

    /// Silences the voice of `pad`.
    fn stop(&mut self, pad: PadId);

    /// Called when `kit` becomes current so samples can be loaded ahead of
    /// the first trigger.
    fn load_kit(&mut self, _kit: &Kit) {}
}

/// Short status messages for the info line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Info {
    /// Pattern set written to storage.
    Saved,
    /// Storage rejected the write.
    SaveFailed(ConfigError),
    /// Save requested too soon after the previous one.
    Wait,
    /// Current pattern duplicated.
    Duplicated,
    /// Pattern set is full.
    PatternsFull,
    /// No kit is available.
    NoKit,
}

impl Info {
    pub fn label(self) -> &'static str {
        match self {
            Info::Saved => "saved",
            Info::SaveFailed(_) => "save err",
            Info::Wait => "wait",
            Info::Duplicated => "dup",
            Info::PatternsFull => "full",
            Info::NoKit => "no kit",
        }
    }
}

/// Flags describing what the transport and the held keys are doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransportState {
    pub playing: bool,
    pub recording: bool,
    /// RECORD key is down.
    pub rec_held: bool,
    /// The current RECORD hold erased a track.
    pub rec_held_used: bool,
    pub mute_held: bool,
    pub tap_held: bool,
    /// Encoder push held past the hold threshold.
    pub edit_held: bool,
    pub pads_muted: PadSet,
    /// Pads currently sounding.
    pub pads_lit: PadSet,
    pub encoder_mode: EncoderMode,
    pub info: Option<Info>,
}

impl TransportState {
    /// `play`, `odub` (recording while playing), `stop`, or `reco` (armed
    /// while stopped).
    pub fn label(&self) -> &'static str {
        match (self.playing, self.recording) {
            (true, false) => "play",
            (true, true) => "odub",
            (false, false) => "stop",
            (false, true) => "reco",
        }
    }

    /// A pad press would erase its track.
    pub fn erase_armed(&self) -> bool {
        self.rec_held && !self.edit_held
    }
}

/// Borrowed snapshot for the feedback adapter.
#[derive(Debug, Clone, Copy)]
pub struct TransportView<'a> {
    pub state: &'a TransportState,
    pub pattern: &'a Pattern,
    pub kit: Option<&'a Kit>,
    pub bpm: u16,
    /// Step that fired last.
    pub current_step: usize,
}

/// Play/stop/record coordinator.
///
/// # Type Parameters
/// * `I` - Time instant type
/// * `V` - Voice player
/// * `S` - Pattern storage
pub struct Transport<I: TimeInstant, V: VoicePlayer, S: PatternStorage> {
    config: Config,
    store: PatternStore,
    sequencer: StepSequencer<I>,
    recorder: Recorder,
    state: TransportState,
    voices: V,
    storage: S,
    push_started: Option<I>,
    last_save: Option<I>,
}

impl<I: TimeInstant, V: VoicePlayer, S: PatternStorage> Transport<I, V, S> {
    /// Creates a stopped transport and preloads the first kit.
    pub fn new(config: Config, store: PatternStore, mut voices: V, storage: S, now: I) -> Self {
        let sequencer = StepSequencer::new(
            config.bpm,
            config.steps_per_beat,
            store.current_pattern().num_steps(),
            now,
        );

        match store.current_kit() {
            Some(kit) => voices.load_kit(kit),
            None => warn!("no drum kits, pads will stay silent"),
        }

        Self {
            config,
            store,
            sequencer,
            recorder: Recorder::new(),
            state: TransportState::default(),
            voices,
            storage,
            push_started: None,
            last_save: None,
        }
    }

    /// Applies one command.
    pub fn handle(&mut self, command: Command, now: I) {
        match command {
            Command::Play(Edge::Pressed) => {
                if self.state.edit_held {
                    self.duplicate_pattern();
                } else {
                    self.toggle_play(now);
                }
            }
            Command::Play(Edge::Released) => {}
            Command::Record(Edge::Pressed) => {
                if self.state.edit_held {
                    self.save(now);
                } else {
                    self.state.rec_held = true;
                    self.state.rec_held_used = false;
                }
            }
            Command::Record(Edge::Released) => {
                if self.state.rec_held {
                    self.state.rec_held = false;
                    if !self.state.rec_held_used {
                        self.state.recording = !self.state.recording;
                        info!("recording {}", self.state.recording);
                    }
                }
            }
            Command::Mute(edge) => self.state.mute_held = edge.is_pressed(),
            Command::Tap(edge) => self.state.tap_held = edge.is_pressed(),
            Command::Pad(pad, Edge::Pressed) => self.pad_pressed(pad, true, now),
            Command::Note(pad, Edge::Pressed) => self.pad_pressed(pad, false, now),
            Command::Pad(pad, Edge::Released) | Command::Note(pad, Edge::Released) => {
                self.state.pads_lit.remove(pad);
            }
            Command::EncoderPush(Edge::Pressed) => self.push_started = Some(now),
            Command::EncoderPush(Edge::Released) => self.push_released(now),
            Command::EncoderTurn(delta) => self.turn(delta),
        }
    }

    /// Advances the step clock and plays the step that is due.
    ///
    /// The clock runs while stopped; step playback only happens while
    /// playing.
    pub fn tick(&mut self, now: I) -> Option<StepEvent> {
        let event = self.sequencer.advance(now)?;
        if self.state.playing {
            self.trigger_step(event.position);
        }
        Some(event)
    }

    /// Enters edit-hold once the encoder push has been held long enough.
    pub fn check_hold(&mut self, now: I) {
        if self.state.edit_held {
            return;
        }
        if let Some(started) = self.push_started {
            if now.millis_since(started) >= self.config.hold_threshold_ms {
                self.state.edit_held = true;
                debug!("edit hold");
            }
        }
    }

    pub fn view(&self) -> TransportView<'_> {
        TransportView {
            state: &self.state,
            pattern: self.store.current_pattern(),
            kit: self.store.current_kit(),
            bpm: self.sequencer.bpm(),
            current_step: self.sequencer.current_step(),
        }
    }

    pub fn state(&self) -> &TransportState {
        &self.state
    }

    pub fn store(&self) -> &PatternStore {
        &self.store
    }

    pub fn sequencer(&self) -> &StepSequencer<I> {
        &self.sequencer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn voices(&self) -> &V {
        &self.voices
    }

    pub fn voices_mut(&mut self) -> &mut V {
        &mut self.voices
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn toggle_play(&mut self, now: I) {
        if self.state.playing {
            self.stop();
        } else {
            self.start(now);
        }
    }

    fn start(&mut self, now: I) {
        self.state.playing = true;
        self.sequencer.anchor(now);
        info!("play");
    }

    fn stop(&mut self) {
        self.state.playing = false;
        self.state.recording = false;
        for pad in PadId::all() {
            self.voices.stop(pad);
        }
        self.state.pads_lit.clear();
        self.recorder.clear();
        info!("stop");
    }

    fn pad_pressed(&mut self, pad: PadId, gestures: bool, now: I) {
        if gestures && self.state.mute_held {
            let muted = self.state.pads_muted.toggle(pad);
            debug!("pad {} muted {}", pad.0, muted);
            return;
        }
        if gestures && self.state.erase_armed() {
            self.store.current_pattern_mut().erase_track(pad);
            self.state.rec_held_used = true;
            debug!("pad {} erased", pad.0);
            return;
        }
        if self.state.pads_muted.contains(pad) {
            return;
        }

        if self.state.recording && !self.state.playing {
            self.start(now);
        }

        self.state.pads_lit.insert(pad);
        self.play_voice(pad);

        if self.state.recording {
            let hit = self.recorder.record_hit(
                self.store.current_pattern_mut(),
                pad,
                self.sequencer.current_step(),
                self.sequencer.elapsed_in_step(now),
                self.sequencer.step_millis(),
            );
            debug!("pad {} recorded at step {}", pad.0, hit.step);
        }
    }

    fn trigger_step(&mut self, step: usize) {
        let hits = self.store.current_pattern().hits_at(step);
        let mut lit = PadSet::EMPTY;
        for pad in PadId::all() {
            let guarded = self.recorder.take_played(pad);
            if !hits.contains(pad) || self.state.pads_muted.contains(pad) {
                continue;
            }
            lit.insert(pad);
            if !guarded {
                self.play_voice(pad);
            }
        }
        self.state.pads_lit = lit;
    }

    fn play_voice(&mut self, pad: PadId) {
        match self.store.current_kit().and_then(|kit| kit.sample(pad)) {
            Some(sample) => self.voices.play(pad, sample),
            None => warn!("no sample for pad {}", pad.0),
        }
    }

    fn push_released(&mut self, now: I) {
        let Some(started) = self.push_started.take() else {
            return;
        };
        if self.state.edit_held {
            self.state.edit_held = false;
            debug!("edit hold released");
        } else if now.millis_since(started) < self.config.hold_threshold_ms {
            self.state.encoder_mode = self.state.encoder_mode.next();
            debug!("encoder mode {=str}", self.state.encoder_mode.label());
        }
    }

    fn turn(&mut self, delta: i32) {
        match self.state.encoder_mode {
            EncoderMode::Pattern => {
                let index = self.store.select_pattern(delta);
                self.sequencer
                    .set_num_steps(self.store.current_pattern().num_steps());
                info!("pattern {}", index);
            }
            EncoderMode::Kit => {
                if self.store.kits().is_empty() {
                    warn!("no drum kits to select");
                    self.state.info = Some(Info::NoKit);
                    return;
                }
                let index = self.store.select_kit(delta);
                if let Some(kit) = self.store.current_kit() {
                    self.voices.load_kit(kit);
                }
                info!("kit {}", index);
            }
            EncoderMode::Bpm => {
                let bpm = self.sequencer.adjust_bpm(delta);
                debug!("bpm {}", bpm);
            }
        }
    }

    fn duplicate_pattern(&mut self) {
        match self.store.duplicate_current() {
            Ok(index) => {
                self.sequencer
                    .set_num_steps(self.store.current_pattern().num_steps());
                self.state.info = Some(Info::Duplicated);
                info!("pattern duplicated to {}", index);
            }
            Err(err) => {
                self.state.info = Some(Info::PatternsFull);
                warn!("duplicate failed: {}", err);
            }
        }
    }

    fn save(&mut self, now: I) {
        if let Some(last) = self.last_save {
            if now.millis_since(last) < self.config.save_interval_ms {
                self.state.info = Some(Info::Wait);
                return;
            }
        }
        self.last_save = Some(now);

        match self.storage.save(self.store.patterns()) {
            Ok(()) => {
                self.state.info = Some(Info::Saved);
                info!("saved {} patterns", self.store.patterns().len());
            }
            Err(err) => {
                self.state.info = Some(Info::SaveFailed(err));
                warn!("save failed: {}", err);
            }
        }
    }
}
