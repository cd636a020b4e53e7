//! Windowing queries over a document's sentences.

use crate::{AnnotationError, AnnotationResult, Sentence};

/// Answers "which sentence covers this offset?" and "which sentences fall in
/// this range?" over sorted, non-overlapping sentences.
///
/// All lookups are binary searches over the borrowed slice.
#[derive(Debug, Clone, Copy)]
pub struct SentenceIndex<'a> {
    sentences: &'a [Sentence],
}

impl<'a> SentenceIndex<'a> {
    /// Create an index over sentences that are already sorted and disjoint.
    pub fn new(sentences: &'a [Sentence]) -> Self {
        Self { sentences }
    }

    /// The sentence whose `[begin, end)` contains `offset`.
    pub fn sentence_containing(&self, offset: usize) -> AnnotationResult<&'a Sentence> {
        let idx = self.sentences.partition_point(|s| s.end() <= offset);
        match self.sentences.get(idx) {
            Some(sentence) if sentence.contains(offset) => Ok(sentence),
            _ => Err(AnnotationError::SentenceNotFound { offset }),
        }
    }

    /// The last sentence of a window of `window_size` sentences starting at
    /// `anchor`, or the document's last sentence if fewer remain.
    ///
    /// A window size of zero is treated as one.
    pub fn last_sentence_in_window(&self, anchor: &'a Sentence, window_size: usize) -> &'a Sentence {
        let last = anchor
            .ordinal
            .saturating_add(window_size.max(1) - 1)
            .min(self.sentences.len().saturating_sub(1));
        self.sentences.get(last).unwrap_or(anchor)
    }

    /// All sentences whose span intersects `[begin, end)`, in document order.
    pub fn sentences_in_range(&self, begin: usize, end: usize) -> &'a [Sentence] {
        let lo = self.sentences.partition_point(|s| s.end() <= begin);
        let hi = self.sentences.partition_point(|s| s.begin() < end);
        if lo < hi {
            &self.sentences[lo..hi]
        } else {
            &[]
        }
    }

    pub fn sentence_at(&self, ordinal: usize) -> Option<&'a Sentence> {
        self.sentences.get(ordinal)
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
