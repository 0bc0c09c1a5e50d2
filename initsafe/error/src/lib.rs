//! Diagnostics of the initialization checker
//!
//! Analysis errors never abort the analysis, so there is no `Result` alias here:
//! every operation of the checker returns its value together with a list of [`InitError`]s.
use std::fmt;
use std::fmt::{Display, Formatter};

use annotate_snippets::display_list::DisplayList;
use initsafe_common::CompileContext;

pub use init_error::{InitError, InitErrorKind, InternalDiagnostic};
pub use snippet::{AnnotationOwned, SliceOwned, SnippetOwned, SourceAnnotationOwned};
pub use trace::Trace;

mod init_error;
mod snippet;
mod trace;
mod utils;

/// Used to determine whether the error messages should use console colors
/// Or be plain text
pub const COLORED: bool = cfg!(feature = "colored_errors");

/// The errors collected by one check
pub type Errors = Vec<InitError>;

pub trait AsAnnotationSnippet<'a> {
    fn as_annotation_snippet(&self, ctx: &'a CompileContext) -> SnippetOwned<'a>;

    fn to_string(&self, ctx: &'a CompileContext) -> String {
        let snippet = self.as_annotation_snippet(ctx);
        let display_list = DisplayList::from(snippet.as_snippet());
        display_list.to_string()
    }
}

/// Every error that was found when checking a class or a whole program
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub struct InitErrors(pub Vec<InitError>);

impl InitErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InitError> {
        self.0.iter()
    }

    /// Iterates over every error and, depth first, over the causes of unsafe promotions
    pub fn iter_flat(&self) -> impl Iterator<Item = &InitError> {
        let mut stack: Vec<&InitError> = self.0.iter().rev().collect();
        std::iter::from_fn(move || {
            let error = stack.pop()?;
            if let InitErrorKind::UnsafePromotion { causes, .. } = &error.kind {
                stack.extend(causes.iter().rev());
            }
            Some(error)
        })
    }

    pub fn format(&self, ctx: &CompileContext) -> String {
        self.0
            .iter()
            .map(|error| AsAnnotationSnippet::to_string(error, ctx))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl From<Vec<InitError>> for InitErrors {
    fn from(errors: Vec<InitError>) -> Self {
        InitErrors(errors)
    }
}

impl IntoIterator for InitErrors {
    type Item = InitError;
    type IntoIter = std::vec::IntoIter<InitError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for InitErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for error in &self.0 {
            writeln!(f, "{error}")?;
        }
        Ok(())
    }
}
