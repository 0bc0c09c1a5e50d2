//! The part of the type system the checker looks at
//!
//! Types are only used to find the receiver of an identifier
//! and the outer instance of a class.

use crate::{ClassId, SymbolId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// The type of a local or a parameter, which has no prefix
    NoPrefix,
    /// The type of a literal
    Constant,
    /// The type of `C.this`
    This(ClassId),
    /// The singleton type of a term, like `a.b.type`
    TermRef { prefix: Box<Type>, symbol: SymbolId },
    /// A reference to a parameter in a dependent method type
    TermParamRef,
}

impl Type {
    pub fn term_ref(prefix: Type, symbol: SymbolId) -> Self {
        Type::TermRef {
            prefix: Box::new(prefix),
            symbol,
        }
    }

    /// Returns the prefix if this is a term reference
    pub fn prefix(&self) -> Option<&Type> {
        match self {
            Type::TermRef { prefix, .. } => Some(prefix),
            _ => None,
        }
    }
}

/// A reference to a class together with the prefix it was selected from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub prefix: Type,
    pub class: ClassId,
}

impl TypeRef {
    /// Returns whether the class was referenced without qualification
    pub fn has_prefix(&self) -> bool {
        !matches!(self.prefix, Type::NoPrefix)
    }
}
