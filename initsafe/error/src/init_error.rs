#[cfg(debug_assertions)]
use std::panic::Location;
use std::{borrow::Cow, fmt};

use annotate_snippets::snippet::AnnotationType;
use initsafe_common::{CompileContext, Ident, Span};

use super::{
    snippet::{AnnotationOwned, SliceBuilder},
    utils::display_causes,
    AsAnnotationSnippet, SnippetOwned, Trace,
};

/// An initialization error found by the checker
///
/// Contains a more specific [`InitErrorKind`], the expression which triggered it
/// and the call trace that led to it.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct InitError {
    /// The specific error
    pub kind: InitErrorKind,
    pub span: Span,
    /// The call trace, outermost frame first
    pub trace: Vec<Span>,
    /// In debug mode stores the caller to provide additional
    /// debugging help
    #[cfg(debug_assertions)]
    caller: &'static Location<'static>,
}

impl InitError {
    #[cfg(not(debug_assertions))]
    pub fn new(kind: InitErrorKind, span: Span, trace: &Trace) -> Self {
        InitError {
            kind,
            span,
            trace: trace.to_vec(),
        }
    }

    #[cfg(debug_assertions)]
    #[track_caller]
    pub fn new(kind: InitErrorKind, span: Span, trace: &Trace) -> Self {
        InitError {
            kind,
            span,
            trace: trace.to_vec(),
            caller: Location::caller(),
        }
    }

    /// Returns the causes if this error is an unsafe promotion
    pub fn causes(&self) -> &[InitError] {
        match &self.kind {
            InitErrorKind::UnsafePromotion { causes, .. } => causes,
            _ => &[],
        }
    }
}

/// Specifies a specific error reason
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum InitErrorKind {
    /// A field was read through a reference of unknown initialization status
    AccessCold { field: Ident },
    /// A field was read before it was initialized
    AccessNonInit { field: Ident },
    /// A method or constructor was invoked through a reference of unknown initialization status
    CallCold { method: Ident },
    /// The target member has no known body and is not known to be safe
    CallUnknown { method: Ident },
    /// A value that must be fully initialized could not be proven so
    PromoteError { msg: String },
    /// Promoting a value found concrete errors, which are attached as causes
    UnsafePromotion { msg: String, causes: Vec<InitError> },
}

impl InitErrorKind {
    /// The label of the primary source annotation
    fn label(&self) -> Cow<'static, str> {
        match self {
            InitErrorKind::AccessCold { .. } => "The value has an unknown initialization status".into(),
            InitErrorKind::AccessNonInit { field } => {
                format!("'{field}' is not initialized at this point").into()
            }
            InitErrorKind::CallCold { .. } => "The receiver has an unknown initialization status".into(),
            InitErrorKind::CallUnknown { .. } => "No source code is available for this member".into(),
            InitErrorKind::PromoteError { .. } => "This value is not fully initialized".into(),
            InitErrorKind::UnsafePromotion { .. } => "Promoting this value failed".into(),
        }
    }
}

impl std::fmt::Display for InitErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            InitErrorKind::AccessCold { field } => write!(
                f,
                "Access field '{field}' on a value with an unknown initialization status"
            ),
            InitErrorKind::AccessNonInit { field } => {
                write!(f, "Access non-initialized field '{field}'")
            }
            InitErrorKind::CallCold { method } => write!(
                f,
                "Call method '{method}' on a value with an unknown initialization status"
            ),
            InitErrorKind::CallUnknown { method } => write!(
                f,
                "Calling the external method '{method}' may cause initialization errors"
            ),
            InitErrorKind::PromoteError { msg } => write!(f, "{msg}"),
            InitErrorKind::UnsafePromotion { msg, causes } => {
                write!(f, "{msg}")?;
                for cause in causes {
                    write!(f, " ({cause})")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl<'a> AsAnnotationSnippet<'a> for InitError {
    fn as_annotation_snippet(&self, ctx: &'a CompileContext) -> SnippetOwned<'a> {
        let mut slices = SliceBuilder::new(ctx);
        slices.annotate(self.span, AnnotationType::Error, self.kind.label().into_owned());

        let skip = ctx
            .config
            .trace_limit
            .map_or(0, |limit| self.trace.len().saturating_sub(limit));
        for span in self.trace.iter().skip(skip) {
            if *span != self.span {
                slices.annotate(*span, AnnotationType::Info, "Called from here".to_string());
            }
        }

        #[allow(unused_mut)]
        let mut footer = match &self.kind {
            InitErrorKind::UnsafePromotion { causes, .. } => vec![AnnotationOwned {
                annotation_type: AnnotationType::Note,
                id: None,
                label: Some(Cow::Owned(display_causes(causes))),
            }],
            _ => vec![],
        };

        #[cfg(debug_assertions)]
        footer.push(AnnotationOwned {
            annotation_type: AnnotationType::Info,
            id: None,
            label: Some(Cow::Owned(format!("Error thrown at {}", self.caller))),
        });

        SnippetOwned {
            annotation_type: AnnotationType::Error,
            id: Some("Init".into()),
            title: self.kind.to_string().into(),
            slices: slices.finish(),
            footer,
        }
    }
}

/// An inconsistency of the input trees, like a field selection on a closure.
///
/// These are never initialization errors of the checked program,
/// but hints that the front end produced an unexpected tree.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct InternalDiagnostic {
    pub msg: String,
    pub span: Span,
}

impl fmt::Display for InternalDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg)
    }
}

impl<'a> AsAnnotationSnippet<'a> for InternalDiagnostic {
    fn as_annotation_snippet(&self, ctx: &'a CompileContext) -> SnippetOwned<'a> {
        let mut slices = SliceBuilder::new(ctx);
        slices.annotate(self.span, AnnotationType::Warning, "While checking this".to_string());
        SnippetOwned {
            annotation_type: AnnotationType::Warning,
            id: Some("Internal".into()),
            title: self.msg.clone().into(),
            slices: slices.finish(),
            footer: vec![AnnotationOwned {
                annotation_type: AnnotationType::Note,
                id: None,
                label: Some("If you think this is a bug, please submit an issue at the github repository.".into()),
            }],
        }
    }
}
