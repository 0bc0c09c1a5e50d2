//! Class metadata

use std::{fmt, ops::BitOr};

use initsafe_common::{Ident, Span};

use crate::{tree_nodes::Arg, types::TypeRef, ClassId, ExprId, SymbolId};

/// The flags that the front end attaches to a class symbol
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct ClassFlags(u8);

impl ClassFlags {
    pub const EMPTY: ClassFlags = ClassFlags(0);
    pub const TRAIT: ClassFlags = ClassFlags(1 << 0);
    pub const ABSTRACT: ClassFlags = ClassFlags(1 << 1);
    /// A singleton object
    pub const MODULE: ClassFlags = ClassFlags(1 << 2);
    pub const PACKAGE: ClassFlags = ClassFlags(1 << 3);
    /// An interface of a foreign language whose instances are opaque to the checker
    pub const JAVA_INTERFACE: ClassFlags = ClassFlags(1 << 4);
    /// `Any` and `Object`
    pub const ROOT: ClassFlags = ClassFlags(1 << 5);

    pub fn contains(self, other: ClassFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: ClassFlags) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for ClassFlags {
    type Output = ClassFlags;

    fn bitor(self, rhs: Self) -> Self::Output {
        ClassFlags(self.0 | rhs.0)
    }
}

impl fmt::Debug for ClassFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(ClassFlags, &str); 6] = [
            (ClassFlags::TRAIT, "trait"),
            (ClassFlags::ABSTRACT, "abstract"),
            (ClassFlags::MODULE, "module"),
            (ClassFlags::PACKAGE, "package"),
            (ClassFlags::JAVA_INTERFACE, "java-interface"),
            (ClassFlags::ROOT, "root"),
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

/// A class, trait, singleton object or package
#[derive(Debug)]
pub struct ClassInfo {
    pub name: Ident,
    pub span: Span,
    pub flags: ClassFlags,
    /// The lexically enclosing class. Only the root package has no owner.
    pub owner: Option<ClassId>,
    /// The declared parents, the super class first
    pub parents: Vec<ClassId>,
    /// The base classes in linearization order, starting with this class
    pub linearization: Vec<ClassId>,
    /// Fields, methods and constructors declared in this class
    pub decls: Vec<SymbolId>,
    /// Classes declared as members of this class
    pub member_classes: Vec<ClassId>,
    pub primary_constructor: Option<SymbolId>,
    /// The class definition. `None` if no source is available.
    pub template: Option<Template>,
}

impl ClassInfo {
    pub fn is(&self, flags: ClassFlags) -> bool {
        self.flags.contains(flags)
    }

    pub fn is_trait(&self) -> bool {
        self.is(ClassFlags::TRAIT)
    }

    pub fn has_source(&self) -> bool {
        self.template.is_some()
    }

    /// The explicit super class, if any
    pub fn super_class(&self) -> Option<ClassId> {
        self.parents.first().copied()
    }
}

/// The definition of a class: its parent constructor calls and its body
#[derive(Debug, Default)]
pub struct Template {
    pub parents: Vec<Parent>,
    /// The statements of the class body in declaration order
    pub body: Vec<ExprId>,
}

/// A parent in the `extends` clause, like `A(1)` in `class B extends A(1)`
#[derive(Debug)]
pub struct Parent {
    pub span: Span,
    pub tpe: TypeRef,
    /// The constructor which is called. `None` for parents without constructors.
    pub ctor: Option<SymbolId>,
    /// The explicitly given constructor arguments
    pub args: Vec<Arg>,
}
