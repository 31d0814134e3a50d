//! The fixed cue vocabulary and its per-session presentation order.
//!
//! The vocabulary is read-only process-wide state: its label *set* never
//! changes at runtime, only the order in which a session presents it. Every
//! presentation uses a freshly shuffled [`PresentationOrder`] — reusing an
//! order across sessions would let an observer memorize positions instead of
//! cues.

use crate::label::CueLabel;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

/// Labels of the reference deployment.
pub const REFERENCE_LABELS: [&str; 4] = ["cat", "cow", "crow", "sheep"];

/// Minimum number of labels for the scheme to be meaningful.
pub const MIN_LABELS: usize = 2;

/// An ordered set of at least [`MIN_LABELS`] distinct, normalized cue labels.
///
/// Only [`Vocabulary::new`] can build one; configuration carries raw label
/// strings and validates them through it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vocabulary {
    labels: Vec<CueLabel>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VocabularyError {
    #[error("vocabulary needs at least {MIN_LABELS} labels, have {0}")]
    TooFew(usize),

    #[error("duplicate label after normalization: {0}")]
    Duplicate(String),

    #[error("label may not be empty")]
    EmptyLabel,

    #[error("label may not contain ',' (reserved by the credential format): {0}")]
    ReservedComma(String),
}

impl Vocabulary {
    /// Build a vocabulary, normalizing each label and checking the set
    /// invariants: size, distinctness, no empty labels, no commas (the
    /// credential plaintext joins labels with `,`).
    pub fn new<I, L>(labels: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = L>,
        L: Into<CueLabel>,
    {
        let labels: Vec<CueLabel> = labels.into_iter().map(Into::into).collect();
        if labels.len() < MIN_LABELS {
            return Err(VocabularyError::TooFew(labels.len()));
        }
        let mut seen = HashSet::new();
        for label in &labels {
            if label.is_empty() {
                return Err(VocabularyError::EmptyLabel);
            }
            if label.as_str().contains(',') {
                return Err(VocabularyError::ReservedComma(label.to_string()));
            }
            if !seen.insert(label.as_str().to_string()) {
                return Err(VocabularyError::Duplicate(label.to_string()));
            }
        }
        Ok(Self { labels })
    }

    /// Number of labels (N).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The labels in their canonical (configuration) order.
    pub fn labels(&self) -> &[CueLabel] {
        &self.labels
    }

    pub fn contains(&self, label: &CueLabel) -> bool {
        self.labels.contains(label)
    }

    /// A fresh uniform permutation of the vocabulary.
    ///
    /// Callers pass the RNG so tests can seed it; production paths use
    /// `rand::thread_rng()`.
    pub fn shuffled(&self, rng: &mut impl Rng) -> PresentationOrder {
        let mut order = self.labels.clone();
        order.shuffle(rng);
        PresentationOrder(order)
    }
}

impl Default for Vocabulary {
    /// The reference vocabulary: cat, cow, crow, sheep.
    fn default() -> Self {
        Self::new(REFERENCE_LABELS).expect("reference labels are valid")
    }
}

/// One session's presentation order — a permutation of the vocabulary.
///
/// Purely positional: the scheduler owns the active index and wraps it
/// modulo N before looking labels up here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresentationOrder(Vec<CueLabel>);

impl PresentationOrder {
    /// Label at a position. `index` must be in bounds; the scheduler wraps
    /// its active index before calling.
    pub fn label_at(&self, index: usize) -> &CueLabel {
        &self.0[index]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[CueLabel] {
        &self.0
    }
}
