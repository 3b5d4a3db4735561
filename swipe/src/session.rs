//! Swipe gesture session.
//!
//! Owns the capture/decode lifecycle for one keyboard view:
//! `Idle -> PathCapturing -> Decoding -> Suggested -> Idle`. A new gesture
//! supersedes any in-flight one; results carry the generation they were
//! decoded for, and the caller drops results whose generation is stale
//! ("latest gesture wins"). The decode itself is stateless, so a superseded
//! decode can finish harmlessly on its worker thread.

use crate::decoder::SwipeDecoder;
use crate::layout::KeyboardLayout;
use crate::path::{PathNormalizer, RawSample, MIN_DECODE_POINTS};
use libpredict_core::{Config, Dictionary, WordSuggestion};
use std::sync::Arc;
use tracing::debug;

/// Lifecycle of one gesture within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    PathCapturing,
    Decoding,
    Suggested,
}

/// The outcome of one finished gesture.
#[derive(Debug, Clone)]
pub struct GestureResult {
    /// Which gesture this result belongs to; compare against
    /// [`SwipeSession::generation`] before delivering.
    pub generation: u64,
    pub suggestions: Vec<WordSuggestion>,
}

/// Capture-and-decode session over one dictionary and layout.
///
/// The dictionary and layout are shared immutably, so many sessions (one per
/// profile, or one per test) can coexist over the same loaded language.
pub struct SwipeSession {
    dict: Arc<Dictionary>,
    layout: Arc<KeyboardLayout>,
    normalizer: PathNormalizer,
    decoder: SwipeDecoder,
    limit: usize,
    state: SessionState,
    generation: u64,
    samples: Vec<RawSample>,
}

impl SwipeSession {
    pub fn new(dict: Arc<Dictionary>, layout: Arc<KeyboardLayout>, config: &Config) -> Self {
        Self {
            dict,
            layout,
            normalizer: PathNormalizer::new(config.downsample_step),
            decoder: SwipeDecoder::new(config),
            limit: config.suggestion_limit,
            state: SessionState::Idle,
            generation: 0,
            samples: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The generation of the most recent gesture; results from earlier
    /// generations are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a result belongs to the most recent gesture.
    pub fn is_current(&self, result: &GestureResult) -> bool {
        result.generation == self.generation
    }

    /// Start capturing a new gesture, superseding any previous one.
    pub fn begin_gesture(&mut self) -> u64 {
        self.generation += 1;
        self.samples.clear();
        self.state = SessionState::PathCapturing;
        debug!(generation = self.generation, "gesture started");
        self.generation
    }

    /// Append a raw touch sample; ignored unless a gesture is being captured.
    pub fn push_sample(&mut self, sample: RawSample) {
        if self.state == SessionState::PathCapturing {
            self.samples.push(sample);
        }
    }

    /// Finish the current gesture and decode it.
    ///
    /// Too-short paths produce an empty suggestion list, not an error.
    pub fn finish_gesture(&mut self) -> GestureResult {
        if self.state != SessionState::PathCapturing {
            return GestureResult {
                generation: self.generation,
                suggestions: Vec::new(),
            };
        }
        self.state = SessionState::Decoding;
        let path = self.normalizer.normalize(&self.samples, &self.layout);
        let suggestions = if path.len() < MIN_DECODE_POINTS {
            Vec::new()
        } else {
            self.decoder
                .decode(&self.dict, &self.layout, &path, self.limit)
        };
        self.samples.clear();
        self.state = SessionState::Suggested;
        debug!(
            generation = self.generation,
            suggestions = suggestions.len(),
            "gesture decoded"
        );
        GestureResult {
            generation: self.generation,
            suggestions,
        }
    }

    /// Abandon the current gesture and return to idle.
    pub fn cancel(&mut self) {
        self.samples.clear();
        self.state = SessionState::Idle;
    }

    /// Acknowledge delivery of the current suggestions and return to idle.
    pub fn acknowledge(&mut self) {
        if self.state == SessionState::Suggested {
            self.state = SessionState::Idle;
        }
    }
}
