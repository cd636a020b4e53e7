//! Documents and their sentence segmentation.
//!
//! A [`Document`] is immutable text plus an ordered run of [`Sentence`]s.
//! Offsets are byte offsets into the text and every range is half-open.

use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::{AnnotationError, AnnotationResult, SentenceIndex};

/// A half-open offset range `[begin, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    /// Create a span, rejecting ranges that end before they begin.
    pub fn new(begin: usize, end: usize) -> AnnotationResult<Self> {
        if end < begin {
            return Err(AnnotationError::InvalidSpan { begin, end });
        }
        Ok(Self { begin, end })
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Returns true if `offset` lies in `[begin, end)`.
    pub fn contains(&self, offset: usize) -> bool {
        self.begin <= offset && offset < self.end
    }

    /// Returns true if the two half-open ranges share at least one offset.
    ///
    /// An empty span overlaps a range that contains its position.
    pub fn overlaps(&self, other: &Span) -> bool {
        if self.is_empty() {
            return other.contains(self.begin);
        }
        if other.is_empty() {
            return self.contains(other.begin);
        }
        self.begin < other.end && other.begin < self.end
    }

    /// Intersection with `other`, or `None` when they do not overlap.
    pub fn clip_to(&self, other: &Span) -> Option<Span> {
        if !self.overlaps(other) {
            return None;
        }
        let begin = self.begin.max(other.begin);
        let end = self.end.min(other.end).max(begin);
        Some(Span { begin, end })
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.begin, self.end)
    }
}

/// A sentence: a span plus its ordinal position in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sentence {
    /// 0-based position among the document's sentences
    pub ordinal: usize,
    pub span: Span,
}

impl Sentence {
    pub fn begin(&self) -> usize {
        self.span.begin
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.span.contains(offset)
    }
}

/// An immutable text with its sentence boundaries.
pub struct Document {
    text: String,
    sentences: Vec<Sentence>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("sentence_count", &self.sentences.len())
            .field("text_len", &self.text.len())
            .finish()
    }
}

impl Document {
    /// Create a document from text and explicit sentence spans.
    ///
    /// Sentences must be non-empty, sorted, non-overlapping and lie on
    /// char boundaries inside the text. Gaps between sentences are allowed.
    pub fn new(text: impl Into<String>, sentence_spans: Vec<Span>) -> AnnotationResult<Self> {
        let text = text.into();
        let mut sentences = Vec::with_capacity(sentence_spans.len());
        let mut previous_end = 0;

        for (index, span) in sentence_spans.into_iter().enumerate() {
            let invalid = |reason: &str| AnnotationError::InvalidSentences {
                index,
                span,
                reason: reason.to_string(),
            };

            if span.end < span.begin {
                return Err(invalid("end precedes begin"));
            }
            if span.is_empty() {
                return Err(invalid("empty sentence"));
            }
            if span.end > text.len() {
                return Err(invalid("extends past the end of the text"));
            }
            if !text.is_char_boundary(span.begin) || !text.is_char_boundary(span.end) {
                return Err(invalid("not on a character boundary"));
            }
            if index > 0 && span.begin < previous_end {
                return Err(invalid("overlaps or precedes the previous sentence"));
            }

            previous_end = span.end;
            sentences.push(Sentence {
                ordinal: index,
                span,
            });
        }

        Ok(Self { text, sentences })
    }

    /// Create a document by segmenting text at Unicode sentence boundaries.
    ///
    /// Trailing whitespace is left out of each sentence, so the whitespace
    /// between sentences becomes a gap that no sentence covers.
    pub fn from_text(text: &str) -> Self {
        let sentences = text
            .split_sentence_bound_indices()
            .filter_map(|(begin, piece)| {
                let trimmed = piece.trim_end();
                if trimmed.trim_start().is_empty() {
                    return None;
                }
                Some(Span {
                    begin,
                    end: begin + trimmed.len(),
                })
            })
            .enumerate()
            .map(|(ordinal, span)| Sentence { ordinal, span })
            .collect();

        Self {
            text: text.to_string(),
            sentences,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// The text under `span`, or `None` if the span is out of bounds.
    pub fn covered_text(&self, span: Span) -> Option<&str> {
        self.text.get(span.begin..span.end)
    }

    /// Windowing queries over this document's sentences.
    pub fn sentence_index(&self) -> SentenceIndex<'_> {
        SentenceIndex::new(&self.sentences)
    }
}
