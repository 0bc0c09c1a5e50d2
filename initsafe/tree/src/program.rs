use itertools::Itertools;

use crate::{
    class::{ClassFlags, ClassInfo},
    symbol::{Symbol, SymbolFlags, SymbolOwner},
    tree_nodes::Expr,
    ClassId, ExprId, SymbolId,
};

/// A fully resolved program
///
/// Owns every class, symbol and expression node. Objects are never removed,
/// so ids stay valid for the lifetime of the program.
/// Use the [`ProgramBuilder`](crate::ProgramBuilder) to create a program.
#[derive(Debug)]
pub struct Program {
    pub(crate) classes: Vec<ClassInfo>,
    pub(crate) symbols: Vec<Symbol>,
    pub(crate) exprs: Vec<Expr>,
    pub(crate) root_package: ClassId,
    pub(crate) any_class: ClassId,
    pub(crate) object_class: ClassId,
}

impl Program {
    pub fn class(&self, id: ClassId) -> &ClassInfo {
        &self.classes[id.index()]
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Iterates over every class, including the builtin ones
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassInfo)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(index, class)| (ClassId::new(index), class))
    }

    pub fn root_package(&self) -> ClassId {
        self.root_package
    }

    pub fn any_class(&self) -> ClassId {
        self.any_class
    }

    pub fn object_class(&self) -> ClassId {
        self.object_class
    }

    /// Finds a class by its simple name
    pub fn find_class(&self, name: &str) -> Option<ClassId> {
        self.classes()
            .find(|(_, class)| class.name == name)
            .map(|(id, _)| id)
    }

    /// Finds a member declared directly in `class`
    pub fn find_decl(&self, class: ClassId, name: &str) -> Option<SymbolId> {
        self.class(class)
            .decls
            .iter()
            .copied()
            .find(|decl| self.symbol(*decl).name == name)
    }

    /// Returns the class which contains `symbol`, walking through local owners
    pub fn enclosing_class(&self, symbol: SymbolId) -> ClassId {
        let mut current = symbol;
        loop {
            match self.symbol(current).owner {
                SymbolOwner::Class(class) => return class,
                SymbolOwner::Symbol(owner) => current = owner,
            }
        }
    }

    /// Returns the class that lexically encloses `class`.
    /// The root package is its own enclosing class.
    pub fn lexically_enclosing_class(&self, class: ClassId) -> ClassId {
        self.class(class).owner.unwrap_or(self.root_package)
    }

    /// Returns whether `class` is `container` or nested inside it
    pub fn is_contained_in(&self, class: ClassId, container: ClassId) -> bool {
        let mut current = Some(class);
        while let Some(class) = current {
            if class == container {
                return true;
            }
            current = self.class(class).owner;
        }
        false
    }

    /// Returns whether the instance of `class` is statically known, which
    /// is the case for packages and singleton objects
    pub fn is_static_owner(&self, class: ClassId) -> bool {
        self.class(class)
            .flags
            .intersects(ClassFlags::PACKAGE | ClassFlags::MODULE)
    }

    pub fn is_package(&self, class: ClassId) -> bool {
        self.class(class).is(ClassFlags::PACKAGE)
    }

    /// Returns whether `class` is `Any` or `Object`
    pub fn is_root_class(&self, class: ClassId) -> bool {
        self.class(class).is(ClassFlags::ROOT)
    }

    /// Calls to the methods of the root classes are known to be safe,
    /// even though they have no source code.
    pub fn can_ignore_method_call(&self, method: SymbolId) -> bool {
        match self.symbol(method).owner {
            SymbolOwner::Class(class) => self.is_root_class(class),
            SymbolOwner::Symbol(_) => false,
        }
    }

    /// The fields which store the class parameters of `class`
    pub fn param_accessors(&self, class: ClassId) -> impl Iterator<Item = SymbolId> + '_ {
        self.class(class)
            .decls
            .iter()
            .copied()
            .filter(|decl| self.symbol(*decl).is(SymbolFlags::PARAM_ACCESSOR))
    }

    /// The fields declared in `class`, including the parameter accessors
    pub fn fields(&self, class: ClassId) -> impl Iterator<Item = SymbolId> + '_ {
        self.class(class)
            .decls
            .iter()
            .copied()
            .filter(|decl| !self.symbol(*decl).is_method())
    }

    /// Returns whether `symbol` is defined inside a method, a constructor or
    /// an initializer instead of directly in a class
    pub fn is_local(&self, symbol: SymbolId) -> bool {
        self.symbol(symbol).is_local()
    }

    /// Finds the member which overrides `symbol` in instances of `class`
    ///
    /// Private members and constructors can not be overridden.
    pub fn resolve(&self, class: ClassId, symbol: SymbolId) -> SymbolId {
        let sym = self.symbol(symbol);
        if sym.is_one_of(SymbolFlags::PRIVATE | SymbolFlags::CONSTRUCTOR) || sym.is_local() {
            return symbol;
        }

        self.find_overriding(self.class(class).linearization.iter().copied(), symbol)
            .unwrap_or(symbol)
    }

    /// Finds the implementation which `super.symbol` denotes in instances of `class`
    ///
    /// The search starts at `super_class` in the linearization of `class`.
    pub fn resolve_super(&self, class: ClassId, super_class: ClassId, symbol: SymbolId) -> SymbolId {
        let linearization = &self.class(class).linearization;
        let candidates = if linearization.contains(&super_class) {
            linearization
                .iter()
                .copied()
                .skip_while(|base| *base != super_class)
                .collect_vec()
        } else {
            self.class(super_class).linearization.clone()
        };
        self.find_overriding(candidates.into_iter(), symbol)
            .unwrap_or(symbol)
    }

    fn find_overriding(
        &self,
        mut bases: impl Iterator<Item = ClassId>,
        symbol: SymbolId,
    ) -> Option<SymbolId> {
        let name = &self.symbol(symbol).name;
        bases.find_map(|base| {
            self.class(base).decls.iter().copied().find(|decl| {
                let candidate = self.symbol(*decl);
                let overrides = &candidate.name == name
                    && !candidate.is_one_of(
                        SymbolFlags::DEFERRED | SymbolFlags::CONSTRUCTOR | SymbolFlags::PRIVATE,
                    );
                overrides || (*decl == symbol && !candidate.is(SymbolFlags::DEFERRED))
            })
        })
    }
}
