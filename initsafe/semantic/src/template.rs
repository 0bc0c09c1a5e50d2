//! Object construction
//!
//! Models the initialization order of a class: the class parameters, then the super class,
//! then the mixed in traits (base-most first) and finally the class body in declaration order.

use initsafe_common::Span;
use initsafe_error::Errors;
use initsafe_tree::{
    class::Parent,
    symbol::SymbolFlags,
    tree_nodes::ExprKind,
    types::{Type, TypeRef},
    ClassId, SymbolId,
};
use itertools::Itertools;

use crate::{
    interpreter::{ArgInfo, Interpreter},
    outcome::Outcome,
    value::{Addr, Value},
};

/// A constructor call of a parent, which runs after the outers of every parent are known
struct SuperCall {
    ctor: SymbolId,
    args: Vec<ArgInfo>,
    source: Span,
}

impl Interpreter<'_> {
    /// Runs the template of `class` on the object `this`
    pub(crate) fn init(&mut self, class: ClassId, this: Addr) -> Outcome {
        let program = self.program;
        let info = program.class(class);
        let Some(template) = &info.template else {
            return Outcome::new(this.into());
        };
        log::trace!("init '{}' on {this}", info.name);

        let mut errors = Vec::new();

        // The class parameters are bound in the environment of the primary constructor
        let params = info
            .primary_constructor
            .map(|ctor| program.symbol(ctor).params.as_slice())
            .unwrap_or_default();
        for accessor in program.param_accessors(class) {
            let name = &program.symbol(accessor).name;
            let value = params
                .iter()
                .find(|param| &program.symbol(**param).name == name)
                .and_then(|param| self.env.lookup(*param))
                .cloned()
                .unwrap_or(Value::Hot);
            self.heap.update_field(this, accessor, value);
        }

        if !info.is_trait() {
            if let Some(super_parent) = template.parents.first() {
                let mut super_calls = Vec::new();
                self.init_parent(this, class, super_parent, &mut super_calls, &mut errors);

                let super_class = super_parent.tpe.class;
                let mixins = info
                    .linearization
                    .iter()
                    .skip(1)
                    .take_while(|base| **base != super_class)
                    .copied()
                    .collect_vec();
                for mixin in mixins.into_iter().rev() {
                    if let Some(parent) = template.parents[1..]
                        .iter()
                        .find(|parent| parent.tpe.class == mixin)
                    {
                        self.init_parent(this, class, parent, &mut super_calls, &mut errors);
                    } else {
                        // Traits which require arguments are always listed explicitly
                        let tpe = TypeRef {
                            prefix: Type::NoPrefix,
                            class: mixin,
                        };
                        let ctor = program.class(mixin).primary_constructor;
                        self.super_call(
                            this,
                            class,
                            &tpe,
                            ctor,
                            Vec::new(),
                            super_parent.span,
                            &mut super_calls,
                            &mut errors,
                        );
                    }
                }

                for SuperCall { ctor, args, source } in super_calls {
                    let outcome = self.call_constructor(&this.into(), ctor, &args, source);
                    errors.extend(outcome.errors);
                }
            }
        }

        for stat in &template.body {
            match program.expr(*stat).kind {
                ExprKind::ValDef(field) if !program.symbol(field).is(SymbolFlags::LAZY) => {
                    let outcome = match program.symbol(field).body {
                        Some(rhs) => self.eval(rhs, this, class, true),
                        None => Outcome::hot(),
                    };
                    errors.extend(outcome.errors);
                    self.heap.update_field(this, field, outcome.value);
                }
                // Lazy values and methods are evaluated on first access
                ExprKind::ValDef(_) | ExprKind::DefDef(_) | ExprKind::TypeDef { .. } => {}
                _ => errors.extend(self.eval(*stat, this, class, false).errors),
            }
        }

        log::trace!("init '{}' on {this} done with {} errors", info.name, errors.len());
        Outcome::with_errors(this.into(), errors)
    }

    /// Evaluates the constructor arguments of a parent
    fn init_parent(
        &mut self,
        this: Addr,
        class: ClassId,
        parent: &Parent,
        super_calls: &mut Vec<SuperCall>,
        errors: &mut Errors,
    ) {
        let (arg_errors, args) = self.eval_args(&parent.args, this, class);
        errors.extend(arg_errors);
        self.super_call(this, class, &parent.tpe, parent.ctor, args, parent.span, super_calls, errors);
    }

    /// Records the outer of the parent and schedules its constructor
    #[allow(clippy::too_many_arguments)]
    fn super_call(
        &mut self,
        this: Addr,
        class: ClassId,
        tpe: &TypeRef,
        ctor: Option<SymbolId>,
        args: Vec<ArgInfo>,
        source: Span,
        super_calls: &mut Vec<SuperCall>,
        errors: &mut Errors,
    ) {
        let outer = self.outer_value(tpe, this, class, source);
        errors.extend(outer.errors);
        self.heap.update_outer(this, tpe.class, outer.value);

        if let Some(ctor) = ctor {
            if self.program.class(tpe.class).has_source() {
                super_calls.push(SuperCall { ctor, args, source });
            }
        }
    }
}
