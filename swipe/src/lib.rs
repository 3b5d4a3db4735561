//! libswipe
//!
//! Swipe-typing gesture decoding on top of `libpredict-core`.
//!
//! Typed input goes straight to the core crate's engine; this crate handles
//! the continuous-path side: keyboard layout geometry, raw-sample
//! normalization, the beam-search decoder that walks the dictionary trie in
//! lockstep with the path, and the gesture session state machine with
//! latest-gesture-wins delivery.
//!
//! Public API:
//! - `KeyboardLayout` - key-center geometry, JSON-loadable, built-in QWERTY
//! - `PathNormalizer` / `GesturePoint` - raw samples to decoder input
//! - `SwipeDecoder` - stateless beam-search path decoder
//! - `SwipeSession` - capture/decode lifecycle with stale-result handling

pub mod layout;
pub use layout::{qwerty, KeyPosition, KeyboardLayout};

pub mod path;
pub use path::{GesturePoint, PathNormalizer, RawSample, MIN_DECODE_POINTS};

pub mod decoder;
pub use decoder::SwipeDecoder;

pub mod session;
pub use session::{GestureResult, SessionState, SwipeSession};

pub use libpredict_core::{Config, Dictionary, WordSuggestion};
