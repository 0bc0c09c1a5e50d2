//! Symbols and their flags

use std::{fmt, ops::BitOr};

use initsafe_common::{Ident, Span};

use crate::{ClassId, ExprId, SymbolId};

/// The flags that the front end attaches to a symbol
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct SymbolFlags(u16);

impl SymbolFlags {
    pub const EMPTY: SymbolFlags = SymbolFlags(0);
    /// A `def`, constructors are methods too
    pub const METHOD: SymbolFlags = SymbolFlags(1 << 0);
    pub const LAZY: SymbolFlags = SymbolFlags(1 << 1);
    /// A parameter of a method, constructor or closure
    pub const PARAM: SymbolFlags = SymbolFlags(1 << 2);
    /// A field which stores a class parameter
    pub const PARAM_ACCESSOR: SymbolFlags = SymbolFlags(1 << 3);
    /// An abstract member
    pub const DEFERRED: SymbolFlags = SymbolFlags(1 << 4);
    pub const PRIVATE: SymbolFlags = SymbolFlags(1 << 5);
    pub const PROTECTED: SymbolFlags = SymbolFlags(1 << 6);
    pub const CONSTRUCTOR: SymbolFlags = SymbolFlags(1 << 7);
    pub const PRIMARY_CONSTRUCTOR: SymbolFlags = SymbolFlags(1 << 8);
    /// A `var`
    pub const MUTABLE: SymbolFlags = SymbolFlags(1 << 9);

    /// Returns whether all flags of `other` are set
    pub fn contains(self, other: SymbolFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns whether any flag of `other` is set
    pub fn intersects(self, other: SymbolFlags) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for SymbolFlags {
    type Output = SymbolFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        SymbolFlags(self.0 | rhs.0)
    }
}

impl fmt::Debug for SymbolFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(SymbolFlags, &str); 10] = [
            (SymbolFlags::METHOD, "method"),
            (SymbolFlags::LAZY, "lazy"),
            (SymbolFlags::PARAM, "param"),
            (SymbolFlags::PARAM_ACCESSOR, "param-accessor"),
            (SymbolFlags::DEFERRED, "deferred"),
            (SymbolFlags::PRIVATE, "private"),
            (SymbolFlags::PROTECTED, "protected"),
            (SymbolFlags::CONSTRUCTOR, "constructor"),
            (SymbolFlags::PRIMARY_CONSTRUCTOR, "primary-constructor"),
            (SymbolFlags::MUTABLE, "mutable"),
        ];
        f.debug_set()
            .entries(
                NAMES
                    .iter()
                    .filter(|(flag, _)| self.contains(*flag))
                    .map(|(_, name)| name),
            )
            .finish()
    }
}

/// The owner of a symbol
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SymbolOwner {
    /// A member of a class
    Class(ClassId),
    /// A parameter or local definition of a method, constructor, closure or field initializer
    Symbol(SymbolId),
}

#[derive(Debug)]
pub struct Symbol {
    pub name: Ident,
    pub span: Span,
    pub owner: SymbolOwner,
    pub flags: SymbolFlags,
    /// The parameters if this symbol is a method or constructor
    pub params: Vec<SymbolId>,
    /// The initializer or the body. `None` if no source is available.
    pub body: Option<ExprId>,
}

impl Symbol {
    pub fn is(&self, flags: SymbolFlags) -> bool {
        self.flags.contains(flags)
    }

    pub fn is_one_of(&self, flags: SymbolFlags) -> bool {
        self.flags.intersects(flags)
    }

    pub fn is_method(&self) -> bool {
        self.is(SymbolFlags::METHOD)
    }

    pub fn is_constructor(&self) -> bool {
        self.is(SymbolFlags::CONSTRUCTOR)
    }

    pub fn is_primary_constructor(&self) -> bool {
        self.is(SymbolFlags::PRIMARY_CONSTRUCTOR)
    }

    pub fn has_source(&self) -> bool {
        self.body.is_some()
    }

    /// Returns whether this symbol is owned by a method or another term instead of a class
    pub fn is_local(&self) -> bool {
        matches!(self.owner, SymbolOwner::Symbol(_))
    }
}
