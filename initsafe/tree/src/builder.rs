use initsafe_common::{Ident, Span};
use rustc_hash::FxHashSet;

use crate::{
    class::{ClassFlags, ClassInfo, Parent, Template},
    symbol::{Symbol, SymbolFlags, SymbolOwner},
    tree_nodes::{Arg, Callee, Expr, ExprKind},
    types::{Type, TypeRef},
    ClassId, ExprId, Program, SymbolId,
};

/// Where a new class is defined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassOwner {
    /// A top-level class
    Package,
    /// A member class
    Class(ClassId),
    /// A class defined inside a method, constructor or initializer
    Local(SymbolId),
}

/// Constructs a [`Program`]
///
/// Member definitions are added to the class body in the order in which they are declared.
/// Initializers and method bodies reference symbols, so symbols are declared first and
/// their bodies are set afterwards with [`ProgramBuilder::set_body`].
///
/// Every class that does not explicitly extend a class extends `Object`.
#[derive(Debug)]
pub struct ProgramBuilder {
    program: Program,
    function_apply: SymbolId,
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

const ANY_METHODS: [&str; 9] = [
    "==",
    "!=",
    "equals",
    "hashCode",
    "toString",
    "getClass",
    "isInstanceOf",
    "asInstanceOf",
    "##",
];
const OBJECT_METHODS: [&str; 3] = ["eq", "ne", "synchronized"];

impl ProgramBuilder {
    pub fn new() -> Self {
        let mut builder = ProgramBuilder {
            program: Program {
                classes: Vec::new(),
                symbols: Vec::new(),
                exprs: Vec::new(),
                root_package: ClassId(0),
                any_class: ClassId(0),
                object_class: ClassId(0),
            },
            function_apply: SymbolId(0),
        };

        let root = builder.push_class("<root>", None, ClassFlags::PACKAGE);
        builder.program.root_package = root;

        let any = builder.push_class("Any", Some(root), ClassFlags::ROOT | ClassFlags::ABSTRACT);
        builder.program.any_class = any;
        for name in ANY_METHODS {
            builder.add_member(any, name, SymbolFlags::METHOD);
        }

        let object = builder.push_class("Object", Some(root), ClassFlags::ROOT);
        builder.program.object_class = object;
        builder.program.classes[object.index()].parents.push(any);
        let ctor = builder.add_member(
            object,
            "<init>",
            SymbolFlags::METHOD | SymbolFlags::CONSTRUCTOR | SymbolFlags::PRIMARY_CONSTRUCTOR,
        );
        builder.program.classes[object.index()].primary_constructor = Some(ctor);
        for name in OBJECT_METHODS {
            builder.add_member(object, name, SymbolFlags::METHOD);
        }

        let function = builder.push_class(
            "Function",
            Some(root),
            ClassFlags::TRAIT | ClassFlags::ABSTRACT,
        );
        builder.function_apply =
            builder.add_member(function, "apply", SymbolFlags::METHOD | SymbolFlags::DEFERRED);

        builder
    }

    /// The `apply` method of function values, calling it on a closure evaluates the closure
    pub fn function_apply(&self) -> SymbolId {
        self.function_apply
    }

    /// Read access to the program under construction
    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn object_class(&self) -> ClassId {
        self.program.object_class
    }

    pub fn any_class(&self) -> ClassId {
        self.program.any_class
    }

    pub fn root_package(&self) -> ClassId {
        self.program.root_package
    }

    fn push_class(&mut self, name: &str, owner: Option<ClassId>, flags: ClassFlags) -> ClassId {
        let id = ClassId::new(self.program.classes.len());
        self.program.classes.push(ClassInfo {
            name: Ident::new(name),
            span: Span::EMPTY,
            flags,
            owner,
            parents: Vec::new(),
            linearization: Vec::new(),
            decls: Vec::new(),
            member_classes: Vec::new(),
            primary_constructor: None,
            template: None,
        });
        id
    }

    fn push_symbol(&mut self, name: &str, owner: SymbolOwner, flags: SymbolFlags) -> SymbolId {
        let id = SymbolId::new(self.program.symbols.len());
        self.program.symbols.push(Symbol {
            name: Ident::new(name),
            span: Span::EMPTY,
            owner,
            flags,
            params: Vec::new(),
            body: None,
        });
        id
    }

    fn push_expr(&mut self, kind: ExprKind) -> ExprId {
        let id = ExprId::new(self.program.exprs.len());
        self.program.exprs.push(Expr {
            span: Span::EMPTY,
            kind,
        });
        id
    }

    /// Adds a class with the given flags
    ///
    /// If `has_source` is set, the class gets a template and a primary constructor
    /// whose body is that template.
    pub fn add_class_with_flags(
        &mut self,
        name: &str,
        owner: ClassOwner,
        flags: ClassFlags,
        has_source: bool,
    ) -> ClassId {
        let owner_class = match owner {
            ClassOwner::Package => self.program.root_package,
            ClassOwner::Class(class) => class,
            ClassOwner::Local(symbol) => self.program.enclosing_class(symbol),
        };
        let class = self.push_class(name, Some(owner_class), flags);

        if let ClassOwner::Class(owner) = owner {
            self.program.classes[owner.index()].member_classes.push(class);
            let type_def = self.type_def(Some(class));
            self.add_stat(owner, type_def);
        }

        if !flags.intersects(ClassFlags::JAVA_INTERFACE) {
            let ctor = self.add_member(
                class,
                "<init>",
                SymbolFlags::METHOD | SymbolFlags::CONSTRUCTOR | SymbolFlags::PRIMARY_CONSTRUCTOR,
            );
            self.program.classes[class.index()].primary_constructor = Some(ctor);
            if has_source {
                let template = self.push_expr(ExprKind::Template(class));
                self.program.symbols[ctor.index()].body = Some(template);
            }
        }

        if has_source {
            self.program.classes[class.index()].template = Some(Template::default());
        }

        class
    }

    pub fn add_class(&mut self, name: &str, owner: ClassOwner) -> ClassId {
        self.add_class_with_flags(name, owner, ClassFlags::EMPTY, true)
    }

    pub fn add_abstract_class(&mut self, name: &str, owner: ClassOwner) -> ClassId {
        self.add_class_with_flags(name, owner, ClassFlags::ABSTRACT, true)
    }

    pub fn add_trait(&mut self, name: &str, owner: ClassOwner) -> ClassId {
        self.add_class_with_flags(name, owner, ClassFlags::TRAIT | ClassFlags::ABSTRACT, true)
    }

    /// Adds a singleton object
    pub fn add_object(&mut self, name: &str, owner: ClassOwner) -> ClassId {
        self.add_class_with_flags(name, owner, ClassFlags::MODULE, true)
    }

    /// Adds a class from a library, for which no source code is available
    pub fn add_extern_class(&mut self, name: &str) -> ClassId {
        self.add_class_with_flags(name, ClassOwner::Package, ClassFlags::EMPTY, false)
    }

    /// Adds an interface of a foreign language
    pub fn add_java_interface(&mut self, name: &str) -> ClassId {
        self.add_class_with_flags(
            name,
            ClassOwner::Package,
            ClassFlags::JAVA_INTERFACE | ClassFlags::TRAIT | ClassFlags::ABSTRACT,
            false,
        )
    }

    pub fn set_class_span(&mut self, class: ClassId, span: Span) {
        self.program.classes[class.index()].span = span;
    }

    /// Lets `class` extend `parent`, which is referenced without prefix
    ///
    /// The first class (not trait) becomes the super class, the traits are mixed in
    /// in the order in which they are added.
    pub fn extend(&mut self, class: ClassId, parent: ClassId, args: &[Arg]) {
        self.extend_with_prefix(class, parent, Type::NoPrefix, args);
    }

    /// Like [`ProgramBuilder::extend`], but the parent is selected from `prefix`,
    /// like `outer.Inner`
    pub fn extend_with_prefix(&mut self, class: ClassId, parent: ClassId, prefix: Type, args: &[Arg]) {
        let ctor = self.program.class(parent).primary_constructor;
        let info = &mut self.program.classes[class.index()];
        info.parents.push(parent);
        if let Some(template) = &mut info.template {
            template.parents.push(Parent {
                span: Span::EMPTY,
                tpe: TypeRef {
                    prefix,
                    class: parent,
                },
                ctor,
                args: args.to_vec(),
            });
        }
    }

    /// Adds a member with arbitrary flags. Does not add a definition to the class body.
    pub fn add_member(&mut self, class: ClassId, name: &str, flags: SymbolFlags) -> SymbolId {
        let symbol = self.push_symbol(name, SymbolOwner::Class(class), flags);
        self.program.classes[class.index()].decls.push(symbol);
        symbol
    }

    /// Adds a parameter to a method, a constructor or a closure
    pub fn add_param(&mut self, owner: SymbolId, name: &str) -> SymbolId {
        let param = self.push_symbol(name, SymbolOwner::Symbol(owner), SymbolFlags::PARAM);
        self.program.symbols[owner.index()].params.push(param);
        param
    }

    fn add_params(&mut self, owner: SymbolId, params: &[&str]) {
        for param in params {
            self.add_param(owner, param);
        }
    }

    fn primary_constructor(&self, class: ClassId) -> SymbolId {
        self.program
            .class(class)
            .primary_constructor
            .expect("Class has no constructor")
    }

    /// Adds a class parameter `class C(name)`
    ///
    /// Returns the field which stores the parameter, this is what the class body refers to.
    pub fn add_class_param(&mut self, class: ClassId, name: &str) -> SymbolId {
        let ctor = self.primary_constructor(class);
        self.add_param(ctor, name);
        self.add_member(class, name, SymbolFlags::PARAM_ACCESSOR)
    }

    /// Adds a member and its definition in the class body
    fn add_defined_member(&mut self, class: ClassId, name: &str, flags: SymbolFlags) -> SymbolId {
        let symbol = self.add_member(class, name, flags);
        let def = if flags.contains(SymbolFlags::METHOD) {
            self.def_def(symbol)
        } else {
            self.val_def(symbol)
        };
        self.add_stat(class, def);
        symbol
    }

    /// Adds `val name = ...` to the body of `class`
    pub fn add_field(&mut self, class: ClassId, name: &str) -> SymbolId {
        self.add_defined_member(class, name, SymbolFlags::EMPTY)
    }

    /// Adds `var name = ...` to the body of `class`
    pub fn add_var(&mut self, class: ClassId, name: &str) -> SymbolId {
        self.add_defined_member(class, name, SymbolFlags::MUTABLE)
    }

    /// Adds `lazy val name = ...` to the body of `class`
    pub fn add_lazy_field(&mut self, class: ClassId, name: &str) -> SymbolId {
        self.add_defined_member(class, name, SymbolFlags::LAZY)
    }

    pub fn add_private_field(&mut self, class: ClassId, name: &str) -> SymbolId {
        self.add_defined_member(class, name, SymbolFlags::PRIVATE)
    }

    /// Adds an abstract `val name: T`
    pub fn add_abstract_field(&mut self, class: ClassId, name: &str) -> SymbolId {
        self.add_member(class, name, SymbolFlags::DEFERRED)
    }

    /// Adds `def name(params) = ...` to the body of `class`
    pub fn add_method(&mut self, class: ClassId, name: &str, params: &[&str]) -> SymbolId {
        self.add_method_with_flags(class, name, params, SymbolFlags::EMPTY)
    }

    pub fn add_method_with_flags(
        &mut self,
        class: ClassId,
        name: &str,
        params: &[&str],
        flags: SymbolFlags,
    ) -> SymbolId {
        let method = self.add_defined_member(class, name, flags | SymbolFlags::METHOD);
        self.add_params(method, params);
        method
    }

    /// Adds an abstract `def name(params): T`
    pub fn add_abstract_method(&mut self, class: ClassId, name: &str, params: &[&str]) -> SymbolId {
        let method = self.add_member(class, name, SymbolFlags::METHOD | SymbolFlags::DEFERRED);
        self.add_params(method, params);
        method
    }

    /// Adds an auxiliary constructor `def this(params) = ...`
    pub fn add_secondary_constructor(&mut self, class: ClassId, params: &[&str]) -> SymbolId {
        let ctor =
            self.add_defined_member(class, "<init>", SymbolFlags::METHOD | SymbolFlags::CONSTRUCTOR);
        self.add_params(ctor, params);
        ctor
    }

    pub fn constructor_params(&self, class: ClassId) -> Vec<SymbolId> {
        self.program.symbol(self.primary_constructor(class)).params.clone()
    }

    pub fn params(&self, method: SymbolId) -> Vec<SymbolId> {
        self.program.symbol(method).params.clone()
    }

    /// Declares a local value inside `owner`
    pub fn add_local_val(&mut self, owner: SymbolId, name: &str) -> SymbolId {
        self.push_symbol(name, SymbolOwner::Symbol(owner), SymbolFlags::EMPTY)
    }

    /// Declares a local method inside `owner`
    pub fn add_local_method(&mut self, owner: SymbolId, name: &str, params: &[&str]) -> SymbolId {
        let method = self.push_symbol(name, SymbolOwner::Symbol(owner), SymbolFlags::METHOD);
        self.add_params(method, params);
        method
    }

    /// Declares an anonymous function inside `owner`, use [`ProgramBuilder::closure`] to create its literal
    pub fn add_anonymous_function(&mut self, owner: SymbolOwner, params: &[&str]) -> SymbolId {
        let function = self.push_symbol("$anonfun", owner, SymbolFlags::METHOD);
        self.add_params(function, params);
        function
    }

    /// Sets the initializer of a value or the body of a method
    pub fn set_body(&mut self, symbol: SymbolId, body: ExprId) {
        self.program.symbols[symbol.index()].body = Some(body);
    }

    pub fn set_symbol_span(&mut self, symbol: SymbolId, span: Span) {
        self.program.symbols[symbol.index()].span = span;
    }

    /// Appends a statement to the body of `class`
    pub fn add_stat(&mut self, class: ClassId, stat: ExprId) {
        if let Some(template) = &mut self.program.classes[class.index()].template {
            template.body.push(stat);
        }
    }

    /// Sets the span of an expression and returns it
    pub fn spanned(&mut self, expr: ExprId, span: Span) -> ExprId {
        self.program.exprs[expr.index()].span = span;
        expr
    }

    pub fn wildcard(&mut self) -> ExprId {
        self.push_expr(ExprKind::Wildcard)
    }

    pub fn literal(&mut self) -> ExprId {
        self.push_expr(ExprKind::Literal)
    }

    pub fn this(&mut self, class: ClassId) -> ExprId {
        self.push_expr(ExprKind::This(class))
    }

    /// The type a plain reference to `symbol` has
    fn ident_type(&self, symbol: SymbolId) -> Type {
        match self.program.symbol(symbol).owner {
            SymbolOwner::Class(class) => Type::term_ref(Type::This(class), symbol),
            SymbolOwner::Symbol(_) => Type::term_ref(Type::NoPrefix, symbol),
        }
    }

    /// A plain reference to a local, a parameter or a member of an enclosing class
    pub fn ident(&mut self, symbol: SymbolId) -> ExprId {
        let tpe = self.ident_type(symbol);
        self.push_expr(ExprKind::Ident { symbol, tpe })
    }

    /// A reference to a member of `class.this`, which may be inherited
    pub fn this_ident(&mut self, class: ClassId, symbol: SymbolId) -> ExprId {
        self.ident_with_prefix(symbol, Type::This(class))
    }

    /// A reference to `symbol` whose type is `prefix.symbol.type`
    pub fn ident_with_prefix(&mut self, symbol: SymbolId, prefix: Type) -> ExprId {
        let tpe = Type::term_ref(prefix, symbol);
        self.push_expr(ExprKind::Ident { symbol, tpe })
    }

    pub fn select(&mut self, qualifier: ExprId, symbol: SymbolId) -> ExprId {
        self.push_expr(ExprKind::Select { qualifier, symbol })
    }

    /// `qualifier.method(args)`
    pub fn call(&mut self, qualifier: ExprId, method: SymbolId, args: &[Arg]) -> ExprId {
        self.push_expr(ExprKind::Call {
            callee: Callee::Select { qualifier, method },
            args: args.to_vec(),
        })
    }

    /// `method(args)` without qualifier
    pub fn call_ident(&mut self, method: SymbolId, args: &[Arg]) -> ExprId {
        let prefix = match self.program.symbol(method).owner {
            SymbolOwner::Class(class) => Type::This(class),
            SymbolOwner::Symbol(_) => Type::NoPrefix,
        };
        self.push_expr(ExprKind::Call {
            callee: Callee::Ident { method, prefix },
            args: args.to_vec(),
        })
    }

    /// `super[super_class].method(args)` written in `this_class`
    pub fn super_call(
        &mut self,
        this_class: ClassId,
        super_class: ClassId,
        method: SymbolId,
        args: &[Arg],
    ) -> ExprId {
        self.push_expr(ExprKind::Call {
            callee: Callee::Super {
                this_class,
                super_class,
                method,
            },
            args: args.to_vec(),
        })
    }

    /// `this(args)` inside an auxiliary constructor of `class`
    pub fn this_constructor_call(&mut self, class: ClassId, ctor: SymbolId, args: &[Arg]) -> ExprId {
        let this = self.this(class);
        self.call(this, ctor, args)
    }

    /// `new C(args)` calling the primary constructor
    pub fn new_instance(&mut self, class: ClassId, args: &[Arg]) -> ExprId {
        let ctor = self.primary_constructor(class);
        self.new_instance_with(
            TypeRef {
                prefix: Type::NoPrefix,
                class,
            },
            ctor,
            args,
        )
    }

    pub fn new_instance_with(&mut self, tpe: TypeRef, ctor: SymbolId, args: &[Arg]) -> ExprId {
        self.push_expr(ExprKind::New {
            tpe,
            ctor,
            args: args.to_vec(),
        })
    }

    pub fn assign(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.push_expr(ExprKind::Assign { lhs, rhs })
    }

    pub fn if_else(&mut self, cond: ExprId, then_branch: ExprId, else_branch: ExprId) -> ExprId {
        self.push_expr(ExprKind::If {
            cond,
            then_branch,
            else_branch,
        })
    }

    pub fn match_expr(&mut self, scrutinee: ExprId, cases: &[ExprId]) -> ExprId {
        self.push_expr(ExprKind::Match {
            scrutinee,
            cases: cases.to_vec(),
        })
    }

    pub fn while_loop(&mut self, cond: ExprId, body: ExprId) -> ExprId {
        self.push_expr(ExprKind::While { cond, body })
    }

    pub fn try_catch(&mut self, block: ExprId, cases: &[ExprId], finalizer: Option<ExprId>) -> ExprId {
        self.push_expr(ExprKind::Try {
            block,
            cases: cases.to_vec(),
            finalizer,
        })
    }

    pub fn seq_literal(&mut self, elems: &[ExprId]) -> ExprId {
        self.push_expr(ExprKind::SeqLiteral(elems.to_vec()))
    }

    /// A function literal for a function declared with [`ProgramBuilder::add_anonymous_function`]
    pub fn closure(&mut self, function: SymbolId, body: ExprId) -> ExprId {
        self.set_body(function, body);
        let params = self.program.symbol(function).params.clone();
        self.push_expr(ExprKind::Closure { params, body })
    }

    pub fn block(&mut self, stats: &[ExprId], expr: ExprId) -> ExprId {
        self.push_expr(ExprKind::Block {
            stats: stats.to_vec(),
            expr,
        })
    }

    pub fn typed(&mut self, expr: ExprId, unchecked: bool) -> ExprId {
        self.push_expr(ExprKind::Typed { expr, unchecked })
    }

    pub fn annotated(&mut self, expr: ExprId, unchecked: bool) -> ExprId {
        self.push_expr(ExprKind::Annotated { expr, unchecked })
    }

    pub fn return_expr(&mut self, expr: ExprId) -> ExprId {
        self.push_expr(ExprKind::Return(expr))
    }

    pub fn named_arg(&mut self, expr: ExprId) -> ExprId {
        self.push_expr(ExprKind::NamedArg(expr))
    }

    pub fn val_def(&mut self, symbol: SymbolId) -> ExprId {
        self.push_expr(ExprKind::ValDef(symbol))
    }

    pub fn def_def(&mut self, symbol: SymbolId) -> ExprId {
        self.push_expr(ExprKind::DefDef(symbol))
    }

    pub fn type_def(&mut self, class: Option<ClassId>) -> ExprId {
        self.push_expr(ExprKind::TypeDef { class })
    }

    /// Completes the program
    ///
    /// Classes without an explicit super class extend `Object` and
    /// the linearization of every class is computed.
    pub fn finish(mut self) -> Program {
        let object = self.program.object_class;
        let any = self.program.any_class;
        for index in 0..self.program.classes.len() {
            let class = ClassId::new(index);
            if class == object || class == any || self.program.is_package(class) {
                continue;
            }

            let has_super_class = self.program.classes[index]
                .parents
                .first()
                .is_some_and(|parent| !self.program.class(*parent).is_trait());
            if !has_super_class {
                let ctor = self.program.class(object).primary_constructor;
                let info = &mut self.program.classes[index];
                info.parents.insert(0, object);
                if let Some(template) = &mut info.template {
                    template.parents.insert(
                        0,
                        Parent {
                            span: Span::EMPTY,
                            tpe: TypeRef {
                                prefix: Type::NoPrefix,
                                class: object,
                            },
                            ctor,
                            args: Vec::new(),
                        },
                    );
                }
            }
        }

        let mut done = vec![false; self.program.classes.len()];
        let mut in_progress = FxHashSet::default();
        for index in 0..self.program.classes.len() {
            self.linearize(ClassId::new(index), &mut done, &mut in_progress);
        }

        self.program
    }

    /// Computes the linearization `C, L(Pn) +: ... +: L(P1)` where the elements of
    /// the right operand are kept and duplicates in the left operand are dropped
    fn linearize(&mut self, class: ClassId, done: &mut [bool], in_progress: &mut FxHashSet<ClassId>) {
        if done[class.index()] || !in_progress.insert(class) {
            return;
        }

        let parents = self.program.class(class).parents.clone();
        let mut acc: Vec<ClassId> = Vec::new();
        for parent in parents {
            self.linearize(parent, done, in_progress);
            let mut linearization: Vec<ClassId> = self
                .program
                .class(parent)
                .linearization
                .iter()
                .copied()
                .filter(|base| !acc.contains(base))
                .collect();
            linearization.append(&mut acc);
            acc = linearization;
        }
        acc.insert(0, class);

        self.program.classes[class.index()].linearization = acc;
        in_progress.remove(&class);
        done[class.index()] = true;
    }
}

#[cfg(test)]
mod tests {
    use crate::{symbol::SymbolFlags, tree_nodes::Arg, ClassOwner, ProgramBuilder};

    #[test]
    fn test_linearization() {
        let mut builder = ProgramBuilder::new();
        let a = builder.add_class("A", ClassOwner::Package);
        let t1 = builder.add_trait("T1", ClassOwner::Package);
        let t2 = builder.add_trait("T2", ClassOwner::Package);
        let c = builder.add_class("C", ClassOwner::Package);
        builder.extend(t2, t1, &[]);
        builder.extend(c, a, &[]);
        builder.extend(c, t1, &[]);
        builder.extend(c, t2, &[]);
        let object = builder.object_class();
        let any = builder.any_class();
        let program = builder.finish();

        assert_eq!(program.class(a).linearization, vec![a, object, any]);
        assert_eq!(program.class(t2).linearization, vec![t2, t1, object, any]);
        assert_eq!(program.class(c).linearization, vec![c, t2, t1, a, object, any]);
        assert_eq!(program.class(c).super_class(), Some(a));
    }

    #[test]
    fn test_implicit_object_parent() {
        let mut builder = ProgramBuilder::new();
        let t = builder.add_trait("T", ClassOwner::Package);
        let c = builder.add_class("C", ClassOwner::Package);
        builder.extend(c, t, &[]);
        let object = builder.object_class();
        let program = builder.finish();

        let template = program.class(c).template.as_ref().unwrap();
        assert_eq!(template.parents.len(), 2);
        assert_eq!(template.parents[0].tpe.class, object);
        assert_eq!(template.parents[1].tpe.class, t);
    }

    #[test]
    fn test_resolve_override() {
        let mut builder = ProgramBuilder::new();
        let a = builder.add_class("A", ClassOwner::Package);
        let b = builder.add_class("B", ClassOwner::Package);
        builder.extend(b, a, &[]);
        let abstract_f = builder.add_abstract_method(a, "f", &[]);
        let g = builder.add_method(a, "g", &[]);
        let private_h = builder.add_method_with_flags(a, "h", &[], SymbolFlags::PRIVATE);
        let f = builder.add_method(b, "f", &[]);
        let g2 = builder.add_method(b, "g", &[]);
        builder.add_method_with_flags(b, "h", &[], SymbolFlags::PRIVATE);
        let program = builder.finish();

        assert_eq!(program.resolve(b, abstract_f), f);
        assert_eq!(program.resolve(a, abstract_f), abstract_f);
        assert_eq!(program.resolve(b, g), g2);
        assert_eq!(program.resolve(a, g), g);
        assert_eq!(program.resolve(b, private_h), private_h);
        assert_eq!(program.resolve_super(b, a, g2), g);
    }

    #[test]
    fn test_enclosing_classes() {
        let mut builder = ProgramBuilder::new();
        let outer = builder.add_class("Outer", ClassOwner::Package);
        let inner = builder.add_class("Inner", ClassOwner::Class(outer));
        let method = builder.add_method(inner, "m", &["x"]);
        let local = builder.add_local_val(method, "y");
        let local_class = builder.add_class("Local", ClassOwner::Local(local));
        let ctor = builder.add_secondary_constructor(inner, &["a"]);
        let arg = builder.literal();
        let new = builder.new_instance(inner, &[Arg::new(arg)]);
        let root = builder.root_package();
        let program = builder.finish();

        assert_eq!(program.enclosing_class(local), inner);
        assert_eq!(program.lexically_enclosing_class(local_class), inner);
        assert_eq!(program.lexically_enclosing_class(outer), root);
        assert!(program.is_contained_in(local_class, outer));
        assert!(!program.is_contained_in(outer, inner));
        assert_eq!(program.class(outer).member_classes, vec![inner]);
        assert!(program.is_local(local));
        assert!(program.symbol(ctor).is_constructor());
        assert!(!program.symbol(ctor).is_primary_constructor());
        assert!(matches!(
            program.expr(new).kind,
            crate::tree_nodes::ExprKind::New { .. }
        ));
    }

    #[test]
    fn test_root_methods_can_be_ignored() {
        let builder = ProgramBuilder::new();
        let any = builder.any_class();
        let object = builder.object_class();
        let program = builder.finish();

        let equals = program.find_decl(any, "equals").unwrap();
        let eq = program.find_decl(object, "eq").unwrap();
        assert!(program.can_ignore_method_call(equals));
        assert!(program.can_ignore_method_call(eq));
        assert_eq!(program.class(object).linearization, vec![object, any]);
    }
}
