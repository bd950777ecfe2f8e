//! # Deoxys Accessibility
//!
//! Client-side accessibility collaborators of the Deoxys chat backend,
//! expressed as plain data and explicit state machines:
//!
//! - [`prefs`]: display preferences with an explicit load/save boundary
//! - [`speech`]: speech-recognition session producing a stream of transcript events
//! - [`voice`]: text-to-speech voice selection
//! - [`brightness`]: camera-driven brightness heuristics

pub mod brightness;
pub mod error;
pub mod prefs;
pub mod speech;
pub mod voice;

// Re-exports
pub use brightness::{BrightnessController, BrightnessMode, FrameObservation};
pub use error::AccessError;
pub use prefs::{load_preferences, save_preferences, Preferences, Theme};
pub use speech::{
    RecognitionConfig, Recognizer, RecognizerEvent, SpeechHandle, SpeechSession, SpeechState,
    SpeechSupport, TranscriptEvent,
};
pub use voice::{prepare_utterance, select_voice, SpeakOptions, Utterance, Voice};

/// Result type alias for accessibility operations
pub type Result<T> = std::result::Result<T, AccessError>;
