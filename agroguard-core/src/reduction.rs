//! Result Reduction
//!
//! ## Overview
//!
//! The model returns one opaque score per class. This module reduces that
//! vector to a [`ClassificationResult`]: the winning class, its score and
//! the full vector, plus ranked and per-class views for display.
//!
//! ## Arg-max Tie-Break
//!
//! The winner is the **first** index holding the maximum. The scan runs left
//! to right and only replaces the current best on a strictly greater value:
//!
//! ```text
//! scores  [0.3, 0.5, 0.5, 0.1]
//! winner   index 1 (not 2)
//! ```
//!
//! NaN never compares greater, so a NaN score can only win from index 0 when
//! no later score beats it. This matches the behavior of the reference app.
//!
//! ## Scores vs Probabilities
//!
//! Scores are whatever the model's last layer emits. They sum to 1 only if
//! that layer is a softmax. [`ClassificationResult::probabilities`] applies
//! one for models that stop at logits.

use core::cmp::Ordering;
use core::fmt;

use heapless::Vec;

use crate::advice;
use crate::classes::{ClassTable, Label};
use crate::constants::classes::MAX_CLASSES;
use crate::errors::ReductionError;

/// Raw model scores, one per class
pub type ConfidenceVector = Vec<f32, MAX_CLASSES>;

/// Index of the first maximum, or `None` for an empty slice
pub fn arg_max(scores: &[f32]) -> Option<usize> {
    let (first, rest) = scores.split_first()?;

    let mut best_index = 0;
    let mut best_value = *first;
    for (offset, &value) in rest.iter().enumerate() {
        if value > best_value {
            best_value = value;
            best_index = offset + 1;
        }
    }

    Some(best_index)
}

/// Reduce raw scores to a classification result
///
/// If the winning index falls outside `classes`, the class name is the
/// `"Unknown"` sentinel rather than an error.
pub fn reduce(scores: &[f32], classes: &ClassTable) -> Result<ClassificationResult, ReductionError> {
    let index = arg_max(scores).ok_or(ReductionError::EmptyConfidences)?;
    let all_confidences = ConfidenceVector::from_slice(scores).map_err(|_| {
        ReductionError::TooManyConfidences {
            len: scores.len(),
            capacity: MAX_CLASSES,
        }
    })?;

    if scores.len() != classes.len() {
        log_warn!(
            "confidence vector has {} entries but class table has {}",
            scores.len(),
            classes.len()
        );
    }

    let mut class_name = Label::new();
    // Every name in the table fits a Label; the sentinel is short
    let _ = class_name.push_str(classes.name(index));

    Ok(ClassificationResult {
        class_index: index,
        class_name,
        confidence: scores[index],
        all_confidences,
        classes: classes.clone(),
    })
}

/// One entry of a ranked or per-class view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedClass<'a> {
    /// Position in the model output
    pub index: usize,
    /// Label, or `"Unknown"` if the table is shorter than the output
    pub name: &'a str,
    /// Raw score
    pub score: f32,
}

impl RankedClass<'_> {
    /// Score as a truncated whole percent
    pub fn percent(&self) -> i32 {
        (self.score * 100.0) as i32
    }
}

/// Outcome of a single classification
///
/// Immutable once constructed; created by [`reduce`].
#[derive(Clone, PartialEq)]
pub struct ClassificationResult {
    class_index: usize,
    class_name: Label,
    confidence: f32,
    all_confidences: ConfidenceVector,
    classes: ClassTable,
}

impl ClassificationResult {
    /// Winning class label (or `"Unknown"`)
    pub fn class_name(&self) -> &str {
        self.class_name.as_str()
    }

    /// Winning position in the output vector
    pub fn class_index(&self) -> usize {
        self.class_index
    }

    /// Score of the winning class
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Full score vector in model output order
    pub fn all_confidences(&self) -> &[f32] {
        &self.all_confidences
    }

    /// Winning score as a truncated whole percent
    pub fn percent(&self) -> i32 {
        (self.confidence * 100.0) as i32
    }

    /// True if the winner was found in the class table
    pub fn is_known(&self) -> bool {
        self.classes.get(self.class_index).is_some()
    }

    /// Scores paired with labels, in model output order
    pub fn breakdown(&self) -> impl Iterator<Item = RankedClass<'_>> + '_ {
        self.all_confidences
            .iter()
            .enumerate()
            .map(move |(index, &score)| RankedClass {
                index,
                name: self.classes.name(index),
                score,
            })
    }

    /// Classes ordered by descending score
    ///
    /// Equal scores keep table order. NaN scores sort last.
    pub fn ranked(&self) -> Vec<RankedClass<'_>, MAX_CLASSES> {
        let mut ranked: Vec<RankedClass<'_>, MAX_CLASSES> = self.breakdown().collect();
        ranked.sort_unstable_by(|a, b| {
            rank_key(b.score)
                .partial_cmp(&rank_key(a.score))
                .unwrap_or(Ordering::Equal)
                .then(a.index.cmp(&b.index))
        });
        ranked
    }

    /// Difference between the best and second-best score
    pub fn margin(&self) -> f32 {
        let ranked = self.ranked();
        match ranked.as_slice() {
            [first, second, ..] => first.score - second.score,
            _ => self.confidence,
        }
    }

    /// Softmax over the raw scores
    pub fn probabilities(&self) -> ConfidenceVector {
        softmax(&self.all_confidences)
    }

    /// Care recommendation for the winning class
    pub fn recommendation(&self) -> &'static str {
        advice::recommendation(self.class_name())
    }

    /// Multi-line report: headline, per-class scores, recommendation
    pub fn summary(&self) -> Summary<'_> {
        Summary { result: self }
    }
}

impl fmt::Debug for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassificationResult")
            .field("class_name", &self.class_name.as_str())
            .field("confidence", &self.confidence)
            .field("all_confidences", &self.all_confidences.as_slice())
            .finish()
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}%)", self.class_name(), self.percent())
    }
}

/// Display adapter returned by [`ClassificationResult::summary`]
pub struct Summary<'a> {
    result: &'a ClassificationResult,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.result)?;
        writeln!(f)?;
        writeln!(f, "Detailed analysis:")?;
        for entry in self.result.breakdown() {
            writeln!(f, "  {}: {}%", entry.name, entry.percent())?;
        }
        writeln!(f)?;
        write!(f, "{}", self.result.recommendation())
    }
}

fn rank_key(score: f32) -> f32 {
    if score.is_nan() { f32::NEG_INFINITY } else { score }
}

/// Numerically stable softmax
fn softmax(scores: &[f32]) -> ConfidenceVector {
    let mut out = ConfidenceVector::new();
    let max = scores
        .iter()
        .copied()
        .filter(|s| !s.is_nan())
        .fold(f32::NEG_INFINITY, f32::max);

    let mut sum = 0.0f32;
    for &score in scores {
        let e = libm::expf(score - max);
        sum += e;
        // Same length as the input, which already fit
        let _ = out.push(e);
    }

    if sum > 0.0 && sum.is_finite() {
        for p in out.iter_mut() {
            *p /= sum;
        }
    }
    out
}
