//! Lexical difficulty estimation.
//!
//! Scores a chunk of text from three weighted signals: average word
//! length, vocabulary diversity, and sentence length. The lexical score is
//! then scaled by the reader's learned difficulty multiplier and clamped
//! back into [0, 1].

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Weight of average word length, normalized against 10 characters.
const WEIGHT_WORD_LENGTH: f64 = 0.45;
/// Weight of the distinct-word ratio.
const WEIGHT_UNIQUE_RATIO: f64 = 0.25;
/// Weight of words-per-sentence, normalized against 40 words.
const WEIGHT_SENTENCE_LENGTH: f64 = 0.30;

const WORD_LENGTH_NORM: f64 = 10.0;
const SENTENCE_LENGTH_NORM: f64 = 40.0;

static WORD_RE: OnceLock<Regex> = OnceLock::new();
static SENTENCE_RE: OnceLock<Regex> = OnceLock::new();

/// The reader's learned view of difficulty, derived from the preferences
/// document (`learning_style.difficulty_multiplier`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReaderProfile {
    pub difficulty_multiplier: f64,
}

impl Default for ReaderProfile {
    fn default() -> Self {
        Self {
            difficulty_multiplier: 1.0,
        }
    }
}

/// Estimate how hard a chunk of text is to read, in [0.0, 1.0].
///
/// Empty or whitespace-only text (or text with no tokenizable words)
/// scores 0.0. The result is rounded to 4 decimals.
pub fn estimate_difficulty(text_chunk: &str, profile: &ReaderProfile) -> f64 {
    if text_chunk.trim().is_empty() {
        return 0.0;
    }

    let word_re = WORD_RE.get_or_init(|| Regex::new(r"\w+").unwrap());
    let words: Vec<&str> = word_re
        .find_iter(text_chunk)
        .map(|m| m.as_str())
        .collect();
    if words.is_empty() {
        return 0.0;
    }

    let total_words = words.len() as f64;
    let avg_word_len = words
        .iter()
        .map(|w| w.chars().count())
        .sum::<usize>() as f64
        / total_words;

    let distinct: HashSet<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let unique_ratio = distinct.len() as f64 / total_words;

    let sentence_re = SENTENCE_RE.get_or_init(|| Regex::new(r"[.!?]+").unwrap());
    let sentences = sentence_re.find_iter(text_chunk).count().max(1);
    let words_per_sentence = total_words / sentences as f64;

    let lexical_score = (WEIGHT_WORD_LENGTH * (avg_word_len / WORD_LENGTH_NORM)
        + WEIGHT_UNIQUE_RATIO * unique_ratio
        + WEIGHT_SENTENCE_LENGTH * (words_per_sentence / SENTENCE_LENGTH_NORM))
        .min(1.0);

    let score = (lexical_score * profile.difficulty_multiplier).clamp(0.0, 1.0);
    (score * 10_000.0).round() / 10_000.0
}
