use smol_str::SmolStr;
use std::{
    convert::AsRef,
    fmt::Display,
    fmt::{self, Formatter},
};

/// The name of a class, member, parameter or local
///
/// Names are cloned into every diagnostic, so they are backed by a
/// `SmolStr` which is stack-allocated for the majority of practical values.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Ident(SmolStr);

impl Ident {
    /// Creates a new identifier
    pub fn new<T: AsRef<str>>(value: T) -> Self {
        Ident(SmolStr::new(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl<T> From<T> for Ident
where
    T: Into<SmolStr>,
{
    fn from(value: T) -> Self {
        Ident(value.into())
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<&str> for Ident {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<Ident> for &str {
    fn eq(&self, other: &Ident) -> bool {
        other == self
    }
}
