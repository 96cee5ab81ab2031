//! Heuristic resilience and structural scoring.
//!
//! Both scorers take the raw per-element tag list (not the run-length
//! compressed shape), average a set of penalties in `[0, 1]` and report
//! `max(0, 1 - mean)` with a three-level label. An empty structure scores 1.0.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Size at which the depth penalty saturates
pub const DEPTH_PENALTY_CAP: f64 = 100.0;
/// Run length at which the repetition penalty saturates
pub const REPETITION_PENALTY_CAP: f64 = 20.0;

const STRONG_THRESHOLD: f64 = 0.85;
const FRAGILE_THRESHOLD: f64 = 0.5;

/// Tags treated as semantically uninformative leaves
const GENERIC_TAGS: [&str; 2] = ["div", "span"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Strong,
    Moderate,
    Fragile,
}

impl Label {
    pub fn from_score(score: f64) -> Self {
        if score < FRAGILE_THRESHOLD {
            Label::Fragile
        } else if score < STRONG_THRESHOLD {
            Label::Moderate
        } else {
            Label::Strong
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Label::Strong => "✅",
            Label::Moderate => "⚠️",
            Label::Fragile => "❌",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Label::Strong => "Strong",
            Label::Moderate => "Moderate",
            Label::Fragile => "Fragile",
        };
        f.write_str(name)
    }
}

/// A score with its named penalties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub breakdown: IndexMap<String, f64>,
    pub label: Label,
    pub emoji: String,
}

impl ScoreBreakdown {
    fn from_penalties(breakdown: IndexMap<String, f64>, averaged: &[f64]) -> Self {
        let mean = if averaged.is_empty() {
            0.0
        } else {
            averaged.iter().sum::<f64>() / averaged.len() as f64
        };
        let score = (1.0 - mean).max(0.0);
        let label = Label::from_score(score);

        Self {
            score,
            breakdown,
            label,
            emoji: label.emoji().to_string(),
        }
    }

    /// Penalty by name, 0 when absent
    pub fn penalty(&self, name: &str) -> f64 {
        self.breakdown.get(name).copied().unwrap_or(0.0)
    }
}

/// Resilience of a fingerprint to minor edits.
///
/// When `layout` is supplied (even empty) the depth penalty is reported but
/// left out of the average in favour of the layout penalty.
pub fn compute_resilience_score<S: AsRef<str>>(tags: &[S], layout: Option<&[S]>) -> ScoreBreakdown {
    let tag_penalty = tag_penalty(tags);
    let depth_penalty = depth_penalty(tags);
    let layout_penalty = layout.map(layout_penalty).unwrap_or(0.0);

    let mut breakdown = IndexMap::new();
    breakdown.insert("tagPenalty".to_string(), tag_penalty);
    breakdown.insert("depthPenalty".to_string(), depth_penalty);
    breakdown.insert("layoutPenalty".to_string(), layout_penalty);

    let averaged = match layout {
        Some(_) => vec![tag_penalty, layout_penalty],
        None => vec![tag_penalty, depth_penalty, layout_penalty],
    };
    ScoreBreakdown::from_penalties(breakdown, &averaged)
}

/// Informativeness of markup: tag diversity, size, repetition and generic-tag ratio
pub fn compute_structural_score<S: AsRef<str>>(tags: &[S]) -> ScoreBreakdown {
    let tag_penalty = tag_penalty(tags);
    let depth_penalty = depth_penalty(tags);
    let repetition_penalty = repetition_penalty(tags);
    let leaf_penalty = leaf_penalty(tags);

    let mut breakdown = IndexMap::new();
    breakdown.insert("tagPenalty".to_string(), tag_penalty);
    breakdown.insert("depthPenalty".to_string(), depth_penalty);
    breakdown.insert("repetitionPenalty".to_string(), repetition_penalty);
    breakdown.insert("leafPenalty".to_string(), leaf_penalty);

    ScoreBreakdown::from_penalties(
        breakdown,
        &[tag_penalty, depth_penalty, repetition_penalty, leaf_penalty],
    )
}

fn tag_penalty<S: AsRef<str>>(tags: &[S]) -> f64 {
    if tags.is_empty() {
        return 0.0;
    }
    let distinct: HashSet<&str> = tags.iter().map(AsRef::as_ref).collect();
    1.0 - (distinct.len() as f64 / tags.len() as f64).min(1.0)
}

fn depth_penalty<S: AsRef<str>>(tags: &[S]) -> f64 {
    (tags.len() as f64 / DEPTH_PENALTY_CAP).min(1.0)
}

/// Diversity of the display half of `tag:display` entries
fn layout_penalty<S: AsRef<str>>(layout: &[S]) -> f64 {
    if layout.is_empty() {
        return 0.0;
    }
    let displays: HashSet<&str> = layout
        .iter()
        .map(|entry| {
            let entry = entry.as_ref();
            entry.split_once(':').map_or(entry, |(_, display)| display)
        })
        .collect();
    1.0 - (displays.len() as f64 / layout.len() as f64).min(1.0)
}

fn repetition_penalty<S: AsRef<str>>(tags: &[S]) -> f64 {
    let mut longest = 0usize;
    let mut run = 0usize;
    let mut previous: Option<&str> = None;
    for tag in tags.iter().map(AsRef::as_ref) {
        run = if previous == Some(tag) { run + 1 } else { 1 };
        longest = longest.max(run);
        previous = Some(tag);
    }
    (longest as f64 / REPETITION_PENALTY_CAP).min(1.0)
}

fn leaf_penalty<S: AsRef<str>>(tags: &[S]) -> f64 {
    if tags.is_empty() {
        return 0.0;
    }
    let generic = tags
        .iter()
        .map(AsRef::as_ref)
        .filter(|tag: &&str| GENERIC_TAGS.contains(tag))
        .count();
    generic as f64 / tags.len() as f64
}
