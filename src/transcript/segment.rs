//! Transcript segmentation: words and sentence units.
//!
//! The upstream collaborators hand the engine either a raw transcript string
//! (proportional mode) or an aligned word list (timestamped mode). This module
//! owns the splitting rules shared by both.

/// One caption word, optionally carrying alignment timestamps.
///
/// The serde field names match the alignment collaborator's JSON shape
/// (`{ "word": ..., "start": ..., "end": ... }`), so aligned word lists
/// deserialize directly.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Word {
    #[serde(rename = "word")]
    pub text: String,
    #[serde(rename = "start", default, skip_serializing_if = "Option::is_none")]
    pub start_secs: Option<f64>,
    #[serde(rename = "end", default, skip_serializing_if = "Option::is_none")]
    pub end_secs: Option<f64>,
}

impl Word {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start_secs: None,
            end_secs: None,
        }
    }

    pub fn timed(text: impl Into<String>, start_secs: f64, end_secs: f64) -> Self {
        Self {
            text: text.into(),
            start_secs: Some(start_secs),
            end_secs: Some(end_secs),
        }
    }
}

/// A contiguous run of words ending at sentence-terminal punctuation (or the
/// final unterminated run). Derived once per transcript; the terminal
/// punctuation stays attached to its sentence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SentenceUnit {
    pub text: String,
    pub word_count: usize,
}

impl SentenceUnit {
    fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        Self {
            text: trimmed.to_string(),
            // An empty unit still counts one word so the allocator's
            // proportional share never collapses to zero.
            word_count: trimmed.split_whitespace().count().max(1),
        }
    }
}

fn is_sentence_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Split a transcript into sentence units.
///
/// A unit ends after a run of `.` / `!` / `?` (so "Really?!" stays one unit);
/// a trailing run without terminal punctuation becomes the final unit. An
/// empty or all-whitespace transcript degrades to a single synthetic unit so
/// downstream scheduling always has something to show.
pub fn split_sentences(transcript: &str) -> Vec<SentenceUnit> {
    let mut units = Vec::new();
    let mut current = String::new();
    let mut in_terminal_run = false;

    for c in transcript.chars() {
        if is_sentence_terminal(c) {
            current.push(c);
            in_terminal_run = true;
        } else {
            if in_terminal_run {
                if !current.trim().is_empty() {
                    units.push(SentenceUnit::from_text(&current));
                }
                current.clear();
                in_terminal_run = false;
            }
            current.push(c);
        }
    }
    if !current.trim().is_empty() {
        units.push(SentenceUnit::from_text(&current));
    }

    if units.is_empty() {
        units.push(SentenceUnit::from_text(transcript));
    }
    units
}

/// Split a sentence into display words on whitespace.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}
