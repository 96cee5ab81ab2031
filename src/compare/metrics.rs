//! Similarity measures over canonical strings and shape vectors.
//!
//! Every measure returns a value in `[0, 1]` where 1 means identical, and
//! two empty inputs compare as identical. None of them bound input size;
//! edit distance and LCS are `O(n * m)`.

use std::collections::{HashMap, HashSet};

/// Separator used when flattening token sequences for [`compare_tree_edit_distance`]
pub const TOKEN_SEPARATOR: &str = ",";

/// Normalized edit-distance similarity of two canonical strings
pub fn compare_structures(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(&a, &b) as f64 / max_len as f64
}

/// Jaccard similarity over the token sets
pub fn compare_shape_vectors<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let set_a: HashSet<&str> = a.iter().map(AsRef::as_ref).collect();
    let set_b: HashSet<&str> = b.iter().map(AsRef::as_ref).collect();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 1.0;
    }
    set_a.intersection(&set_b).count() as f64 / union as f64
}

/// Longest-common-subsequence length over the longer sequence's length
pub fn compare_shape_lcs<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }

    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];
    for token_a in a {
        for (j, token_b) in b.iter().enumerate() {
            current[j + 1] = if token_a.as_ref() == token_b.as_ref() {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()] as f64 / max_len as f64
}

/// Cosine similarity of token-frequency vectors; 1 when either side is empty
pub fn compare_shape_cosine<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let freq_a = frequencies(a);
    let freq_b = frequencies(b);

    let mut dot = 0.0;
    let mut mag_a = 0.0;
    let mut mag_b = 0.0;
    for token in freq_a.keys().chain(freq_b.keys()).collect::<HashSet<_>>() {
        let x = freq_a.get(token).copied().unwrap_or(0) as f64;
        let y = freq_b.get(token).copied().unwrap_or(0) as f64;
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }

    if mag_a == 0.0 || mag_b == 0.0 {
        return 1.0;
    }
    dot / (mag_a.sqrt() * mag_b.sqrt())
}

/// Approximate tree-edit similarity.
///
/// This is not a tree edit distance: both token sequences are joined with
/// [`TOKEN_SEPARATOR`] and the character edit distance of the joined strings is
/// normalized by the longer *token* count, floored at 0.
pub fn compare_tree_edit_distance<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 1.0;
    }

    let joined_a: Vec<char> = join_tokens(a).chars().collect();
    let joined_b: Vec<char> = join_tokens(b).chars().collect();
    (1.0 - levenshtein(&joined_a, &joined_b) as f64 / max_len as f64).max(0.0)
}

/// Layout similarity with the default Jaccard measure
pub fn compare_layout_vectors<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    compare_shape_vectors(a, b)
}

/// Classic single-row Levenshtein distance, unit costs
pub fn levenshtein<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, item_long) in long.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, item_short) in short.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if item_long == item_short {
                diagonal
            } else {
                1 + diagonal.min(above).min(row[j])
            };
            diagonal = above;
        }
    }
    row[short.len()]
}

fn frequencies<S: AsRef<str>>(tokens: &[S]) -> HashMap<&str, usize> {
    let mut freq = HashMap::new();
    for token in tokens {
        *freq.entry(token.as_ref()).or_insert(0) += 1;
    }
    freq
}

fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(TOKEN_SEPARATOR)
}
