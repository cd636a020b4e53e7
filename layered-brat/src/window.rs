//! Display window resolution.
//!
//! The editor shows a page of consecutive sentences. A [`WindowRequest`]
//! names the page by an offset inside its first sentence and a size in
//! sentences; [`DisplayWindow`] is the resolved page.

use layered_annotation::{Sentence, SentenceIndex, Span};

use crate::{Offsets, RenderError, RenderResult};

/// Which page of sentences to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRequest {
    /// Offset inside the first sentence of the page
    pub anchor_offset: usize,
    /// End offset of the first sentence, when the caller knows it
    pub anchor_end_offset: Option<usize>,
    /// Number of sentences on the page
    pub window_size: usize,
}

impl WindowRequest {
    pub fn new(anchor_offset: usize, window_size: usize) -> Self {
        Self {
            anchor_offset,
            anchor_end_offset: None,
            window_size,
        }
    }

    pub fn with_anchor_end(mut self, end: usize) -> Self {
        self.anchor_end_offset = Some(end);
        self
    }
}

/// A resolved page of sentences.
#[derive(Debug, Clone, Copy)]
pub struct DisplayWindow<'a> {
    pub first: &'a Sentence,
    pub last: &'a Sentence,
    /// All sentences from `first` through `last`
    pub visible: &'a [Sentence],
}

impl<'a> DisplayWindow<'a> {
    /// Resolve a request against a sentence index.
    ///
    /// Requests that cannot describe a page (zero sentences, an end offset
    /// outside the first sentence) are rejected before anything is looked
    /// up. An anchor offset that no sentence covers is
    /// [`RenderError::SentenceNotFound`].
    pub fn resolve(index: &SentenceIndex<'a>, request: &WindowRequest) -> RenderResult<Self> {
        if request.window_size == 0 {
            return Err(RenderError::InvalidWindow {
                reason: "window size must be at least one sentence".to_string(),
            });
        }
        if let Some(end) = request.anchor_end_offset {
            if end < request.anchor_offset {
                return Err(RenderError::InvalidWindow {
                    reason: format!(
                        "anchor end offset {} precedes anchor offset {}",
                        end, request.anchor_offset
                    ),
                });
            }
        }

        let first = index.sentence_containing(request.anchor_offset)?;
        if let Some(end) = request.anchor_end_offset {
            if end > first.end() {
                return Err(RenderError::InvalidWindow {
                    reason: format!(
                        "anchor end offset {} lies past the anchor sentence {}",
                        end, first.span
                    ),
                });
            }
        }

        let last = index.last_sentence_in_window(first, request.window_size);
        let visible = index.sentences_in_range(first.begin(), last.end());

        log::debug!(
            "display window: sentences {}..={} ({} visible), offsets {}",
            first.ordinal,
            last.ordinal,
            visible.len(),
            Span {
                begin: first.begin(),
                end: last.end()
            }
        );

        Ok(Self {
            first,
            last,
            visible,
        })
    }

    /// Document offset that window-relative offsets are measured from.
    pub fn anchor(&self) -> usize {
        self.first.begin()
    }

    /// Document range covered by the window.
    pub fn range(&self) -> Span {
        Span {
            begin: self.first.begin(),
            end: self.last.end(),
        }
    }

    /// `span` re-expressed relative to the window anchor.
    pub fn relative(&self, span: Span) -> Offsets {
        Offsets::new(
            span.begin.saturating_sub(self.anchor()),
            span.end.saturating_sub(self.anchor()),
        )
    }
}
