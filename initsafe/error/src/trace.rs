use std::{fmt, rc::Rc};

use initsafe_common::Span;

/// The path of calls that led to the current evaluation
///
/// A trace is a persistent list, so pushing a frame is O(1) and
/// does not affect the traces of the callers.
#[derive(Clone, Default)]
pub struct Trace(Option<Rc<TraceFrame>>);

struct TraceFrame {
    span: Span,
    len: usize,
    parent: Option<Rc<TraceFrame>>,
}

impl Trace {
    pub fn empty() -> Self {
        Trace(None)
    }

    /// Returns a new trace which has `span` as its innermost frame
    ///
    /// Empty spans of synthesized nodes and a repetition of the innermost frame are not recorded.
    #[must_use]
    pub fn add(&self, span: Span) -> Self {
        if span.is_empty() || self.last() == Some(span) {
            return self.clone();
        }

        Trace(Some(Rc::new(TraceFrame {
            span,
            len: self.len() + 1,
            parent: self.0.clone(),
        })))
    }

    pub fn len(&self) -> usize {
        self.0.as_ref().map_or(0, |frame| frame.len)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// The innermost frame
    pub fn last(&self) -> Option<Span> {
        self.0.as_ref().map(|frame| frame.span)
    }

    /// Returns the frames, outermost first
    pub fn to_vec(&self) -> Vec<Span> {
        let mut spans = Vec::with_capacity(self.len());
        let mut current = self.0.as_deref();
        while let Some(frame) = current {
            spans.push(frame.span);
            current = frame.parent.as_deref();
        }
        spans.reverse();
        spans
    }
}

impl fmt::Debug for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_vec()).finish()
    }
}
