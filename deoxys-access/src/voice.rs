//! Text-to-speech voice selection and utterance defaults.

/// Language used when the caller has no preference
pub const DEFAULT_LANG: &str = "en-US";

/// Name fragments of voices that read in a softer register
pub const PREFERRED_VOICE_HINTS: &[&str] = &[
    "Female",
    "Samantha",
    "Zira",
    "Amelia",
    "Jenny",
    "Aria",
    "Serena",
    "Natasha",
    "Google UK English Female",
];

/// A voice offered by the speech engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }

    fn is_hinted(&self) -> bool {
        PREFERRED_VOICE_HINTS.iter().any(|h| self.name.contains(h))
    }

    fn speaks(&self, lang_prefix: &str) -> bool {
        self.lang.to_lowercase().starts_with(lang_prefix)
    }
}

/// Pick a voice for `preferred_lang`.
///
/// Order: hinted voice in the preferred language, any hinted voice, any
/// English voice, the first voice. `None` only when `voices` is empty.
pub fn select_voice<'a>(voices: &'a [Voice], preferred_lang: Option<&str>) -> Option<&'a Voice> {
    let lang = preferred_lang
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LANG)
        .to_lowercase();

    voices
        .iter()
        .find(|v| v.speaks(&lang) && v.is_hinted())
        .or_else(|| voices.iter().find(|v| v.is_hinted()))
        .or_else(|| voices.iter().find(|v| v.speaks("en")))
        .or_else(|| voices.first())
}

/// Speech synthesis parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakOptions {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub lang: Option<String>,
}

impl Default for SpeakOptions {
    fn default() -> Self {
        Self {
            rate: 0.98,
            pitch: 1.12,
            volume: 1.0,
            lang: None,
        }
    }
}

/// A fully resolved utterance ready for the speech engine
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub voice: Option<Voice>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

/// Resolve voice and parameters for speaking `text`.
///
/// Returns `None` for blank text. Any utterance already playing should be
/// cancelled before this one is spoken.
pub fn prepare_utterance(text: &str, voices: &[Voice], options: &SpeakOptions) -> Option<Utterance> {
    if text.trim().is_empty() {
        return None;
    }
    Some(Utterance {
        text: text.to_string(),
        voice: select_voice(voices, options.lang.as_deref()).cloned(),
        rate: options.rate,
        pitch: options.pitch,
        volume: options.volume,
    })
}
