//! Splitting annotation spans into per-sentence display fragments.
//!
//! brat draws a span inside a single sentence row. An annotation that runs
//! across sentences is therefore drawn as one fragment per sentence it
//! touches, each clipped to its sentence:
//!
//! ```text
//! sentence 1:  The cat [sat.]
//!                      ╰────╯ fragment 1
//! sentence 2:  [It] slept well.
//!              ╰──╯ fragment 2
//! ```

use layered_annotation::{AnnotationId, Sentence, Span};

use crate::{Offsets, RenderError, RenderResult};

/// Fragments of `span`, relative to `anchor`.
///
/// `visible` must be a contiguous run of document sentences in document
/// order (the display window). The begin sentence is the first one holding
/// `span.begin` in `[begin, end)`; the end sentence is the first one holding
/// `span.end` in `[begin, end]`. If either is missing the annotation cannot be
/// placed and [`RenderError::SpanResolution`] is returned.
///
/// A span inside one sentence yields a single fragment with its own offsets,
/// as does an empty span on the boundary of two touching sentences.
/// Otherwise every sentence from the begin sentence through the end sentence
/// yields one fragment, in sentence order.
pub fn fragment_span(
    annotation: AnnotationId,
    span: Span,
    visible: &[Sentence],
    anchor: usize,
) -> RenderResult<Vec<Offsets>> {
    let mut begin_idx = None;
    let mut end_idx = None;

    for (idx, sentence) in visible.iter().enumerate() {
        if begin_idx.is_none() && sentence.begin() <= span.begin && span.begin < sentence.end() {
            begin_idx = Some(idx);
        }
        if end_idx.is_none() && sentence.begin() <= span.end && span.end <= sentence.end() {
            end_idx = Some(idx);
        }
        if begin_idx.is_some() && end_idx.is_some() {
            break;
        }
    }

    let rel = |offset: usize| offset.saturating_sub(anchor);

    let spanned = match (begin_idx, end_idx) {
        (Some(first), Some(last)) if first <= last => &visible[first..=last],
        // empty span where one sentence ends and the next begins
        (Some(_), Some(_)) => return Ok(vec![Offsets::new(rel(span.begin), rel(span.end))]),
        _ => return Err(RenderError::SpanResolution { annotation, span }),
    };

    if spanned.len() == 1 {
        return Ok(vec![Offsets::new(rel(span.begin), rel(span.end))]);
    }

    let fragments = spanned
        .iter()
        .map(|sentence| {
            if sentence.begin() <= span.begin && span.begin < sentence.end() {
                Offsets::new(rel(span.begin), rel(sentence.end()))
            } else if sentence.begin() <= span.end && span.end <= sentence.end() {
                Offsets::new(rel(sentence.begin()), rel(span.end))
            } else {
                Offsets::new(rel(sentence.begin()), rel(sentence.end()))
            }
        })
        .collect();
    Ok(fragments)
}
