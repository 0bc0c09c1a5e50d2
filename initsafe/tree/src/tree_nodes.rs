//! Defines every expression node the checker understands
//!
//! Nodes are stored in the arena of a [`Program`](crate::Program) and refer to each other by [`ExprId`].

use initsafe_common::Span;

use crate::{
    types::{Type, TypeRef},
    ClassId, ExprId, SymbolId,
};

#[derive(Debug)]
pub struct Expr {
    pub span: Span,
    pub kind: ExprKind,
}

/// An argument of a call or a constructor invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arg {
    pub expr: ExprId,
    /// By-name arguments are evaluated lazily by the callee
    pub by_name: bool,
}

impl Arg {
    pub fn new(expr: ExprId) -> Self {
        Arg {
            expr,
            by_name: false,
        }
    }

    pub fn by_name(expr: ExprId) -> Self {
        Arg {
            expr,
            by_name: true,
        }
    }
}

/// The method part of a call
#[derive(Debug)]
pub enum Callee {
    /// `super.method(...)` or `super[Trait].method(...)`
    Super {
        /// The class in which `super` is written
        this_class: ClassId,
        /// The static super type, the calls are dispatched starting from this class
        super_class: ClassId,
        method: SymbolId,
    },
    /// `qualifier.method(...)`
    Select { qualifier: ExprId, method: SymbolId },
    /// `method(...)`, either a local method or a member of an enclosing class
    ///
    /// The prefix is [`Type::NoPrefix`] for local methods.
    Ident { method: SymbolId, prefix: Type },
}

#[derive(Debug)]
pub enum ExprKind {
    /// The default initializer `_`
    Wildcard,
    /// A reference to a local, a parameter or a member
    ///
    /// The type tells the checker where the symbol was selected from.
    Ident { symbol: SymbolId, tpe: Type },
    /// Any literal value
    Literal,
    /// `C.this`
    This(ClassId),
    /// A field selection `qualifier.symbol`
    Select { qualifier: ExprId, symbol: SymbolId },
    Call { callee: Callee, args: Vec<Arg> },
    /// `new C(args)`
    New {
        tpe: TypeRef,
        ctor: SymbolId,
        args: Vec<Arg>,
    },
    /// The left hand side is either an identifier or a selection
    Assign { lhs: ExprId, rhs: ExprId },
    If {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },
    /// A pattern match, the cases are the bodies of the case clauses
    Match { scrutinee: ExprId, cases: Vec<ExprId> },
    While { cond: ExprId, body: ExprId },
    Try {
        block: ExprId,
        cases: Vec<ExprId>,
        finalizer: Option<ExprId>,
    },
    /// A sequence literal, like the arguments of a vararg parameter
    SeqLiteral(Vec<ExprId>),
    /// A function literal
    Closure { params: Vec<SymbolId>, body: ExprId },
    Block { stats: Vec<ExprId>, expr: ExprId },
    /// A type ascription `expr: T`
    ///
    /// `unchecked` is set if the type system marked this as an escape from the checker.
    Typed { expr: ExprId, unchecked: bool },
    /// An annotated expression `expr: @annotation`
    Annotated { expr: ExprId, unchecked: bool },
    Return(ExprId),
    /// A named argument `name = expr`
    NamedArg(ExprId),
    /// A local or member value definition, the initializer is the body of the symbol
    ValDef(SymbolId),
    /// A local or member method definition
    DefDef(SymbolId),
    /// A type definition, the class is set if this defines a class
    TypeDef { class: Option<ClassId> },
    /// The template of a class, this is the body of its primary constructor
    Template(ClassId),
}
