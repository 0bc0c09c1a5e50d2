use initsafe_error::{Errors, InitError};

use crate::value::Value;

/// The result of every operation of the interpreter
///
/// Errors never abort the analysis, so the value is always a best-effort approximation.
#[derive(Debug, Clone)]
#[must_use]
pub struct Outcome {
    pub value: Value,
    pub errors: Errors,
}

impl Outcome {
    pub fn new(value: Value) -> Self {
        Outcome {
            value,
            errors: Vec::new(),
        }
    }

    pub fn hot() -> Self {
        Outcome::new(Value::Hot)
    }

    pub fn with_errors(value: Value, errors: Errors) -> Self {
        Outcome { value, errors }
    }

    /// An optimistic `Hot` outcome which reports errors
    pub fn hot_with_errors(errors: Errors) -> Self {
        Outcome::with_errors(Value::Hot, errors)
    }

    /// Appends additional errors
    pub fn and_errors(mut self, errors: impl IntoIterator<Item = InitError>) -> Self {
        self.errors.extend(errors);
        self
    }

    /// Puts `errors` in front of the errors of this outcome
    pub fn after_errors(mut self, mut errors: Errors) -> Self {
        errors.append(&mut self.errors);
        self.errors = errors;
        self
    }

    /// Joins the values and concatenates the errors
    pub fn join(mut self, other: Outcome) -> Self {
        self.value = self.value.join(&other.value);
        self.errors.extend(other.errors);
        self
    }

    /// Joins every outcome, an empty iterator joins to `Hot`
    pub fn join_all(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        outcomes.into_iter().fold(Outcome::hot(), Outcome::join)
    }
}
