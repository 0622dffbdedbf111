//! Edit distance and word-wise closeness scoring.
//!
//! # Responsibility
//! - Compute case-insensitive Levenshtein distance between two strings.
//! - Score how far a multi-word keyword is from a multi-word text.
//!
//! # Invariants
//! - Both functions are total: empty inputs yield a defined score.
//! - `closeness == 0` whenever the folded text contains the folded keyword
//!   or every keyword word is contained in some text word.

use crate::search::policy::Aggregation;

/// Levenshtein distance after case folding.
///
/// Insertions, deletions and substitutions cost 1 each. Length is counted
/// in Unicode scalar values, so `edit_distance(s, "")` equals
/// `s.chars().count()`.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a = fold_chars(a);
    let b = fold_chars(b);
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, left) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, right) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(left != right);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Distance of `keyword` from `text` using max aggregation.
///
/// See [`closeness_with`].
pub fn closeness(text: &str, keyword: &str) -> usize {
    closeness_with(text, keyword, Aggregation::Max)
}

/// Distance of `keyword` from `text`.
///
/// Rules:
/// - `0` if the folded text contains the folded keyword verbatim.
/// - Otherwise each keyword word is scored by its smallest edit distance to
///   any text word, where containment inside a text word scores `0`.
/// - Word scores are combined with `aggregation`.
/// - An empty keyword scores `0`; against an empty text every keyword word
///   scores its own length.
pub fn closeness_with(text: &str, keyword: &str, aggregation: Aggregation) -> usize {
    let text = fold(text);
    let keyword = fold(keyword);
    let keyword_trimmed = keyword.trim();
    if keyword_trimmed.is_empty() || text.contains(keyword_trimmed) {
        return 0;
    }

    let text_words = text.split_whitespace().collect::<Vec<_>>();
    let word_scores = keyword_trimmed
        .split_whitespace()
        .map(|query| best_word_distance(query, &text_words));

    match aggregation {
        Aggregation::Max => word_scores.max().unwrap_or(0),
        Aggregation::Sum => word_scores.sum(),
    }
}

fn best_word_distance(query: &str, text_words: &[&str]) -> usize {
    text_words
        .iter()
        .map(|word| {
            if word.contains(query) {
                0
            } else {
                edit_distance(word, query)
            }
        })
        .min()
        .unwrap_or_else(|| query.chars().count())
}

/// Lowercases per scalar value so folded length equals input length.
fn fold_char(value: char) -> char {
    value.to_lowercase().next().unwrap_or(value)
}

fn fold_chars(value: &str) -> Vec<char> {
    value.chars().map(fold_char).collect()
}

pub(crate) fn fold(value: &str) -> String {
    value.chars().map(fold_char).collect()
}
