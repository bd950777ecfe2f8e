//! Offline text simplifier used when no provider answers.
//!
//! This is a formatting transform, not a summarizer: it collapses
//! whitespace, keeps the first few sentences and renders them as bullets.

use regex::Regex;
use std::sync::OnceLock;

/// Returned for empty or whitespace-only input
pub const NOTHING_TO_SIMPLIFY: &str = "No text to simplify.";

/// Maximum number of sentences kept
pub const MAX_SENTENCES: usize = 6;

const STRIPPED: &[char] = &[';', ':', '(', ')', ','];

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

fn sentence_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]\s+").expect("sentence pattern is valid"))
}

/// Split already-collapsed text after sentence-ending punctuation.
fn sentences(text: &str) -> impl Iterator<Item = &str> {
    let mut start = 0;
    let mut breaks = sentence_break().find_iter(text);
    std::iter::from_fn(move || {
        if start > text.len() {
            return None;
        }
        match breaks.next() {
            Some(m) => {
                // punctuation is a single ASCII byte
                let sentence = &text[start..m.start() + 1];
                start = m.end();
                Some(sentence)
            }
            None => {
                let rest = &text[start..];
                start = text.len() + 1;
                Some(rest)
            }
        }
    })
}

/// Render `input` as at most six bulleted sentences.
pub fn simplify(input: &str) -> String {
    let collapsed = whitespace().replace_all(input, " ");
    let text = collapsed.trim();
    if text.is_empty() {
        return NOTHING_TO_SIMPLIFY.to_string();
    }

    sentences(text)
        .take(MAX_SENTENCES)
        .map(|s| {
            let cleaned: String = s.chars().filter(|c| !STRIPPED.contains(c)).collect();
            format!("- {}", cleaned.trim())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
