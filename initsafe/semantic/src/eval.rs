//! The expression evaluator

use std::rc::Rc;

use initsafe_common::Span;
use initsafe_error::Errors;
use initsafe_tree::{
    tree_nodes::{Arg, Callee, ExprKind},
    types::Type,
    ClassId, ExprId, SymbolId,
};

use crate::{
    interpreter::{ArgInfo, Interpreter},
    outcome::Outcome,
    value::{Addr, FunValue, Value},
};

const ASSIGN_MSG: &str = "Only fully initialized values may be assigned";
const MATCH_MSG: &str = "The value to be matched needs to be fully initialized";
const RETURN_MSG: &str = "Only fully initialized values may be returned";
const SEQ_MSG: &str = "Only fully initialized values may be used as elements of a sequence";

impl Interpreter<'_> {
    /// Evaluates `expr` in code of `class`, where `this` is the value of `class.this`
    ///
    /// While the evaluation is in progress, reentrant evaluations of the same expression
    /// with the same receiver yield `Hot`. If `cacheable` is set, the result is remembered
    /// for the rest of the check, otherwise it is discarded. The expression is pushed onto
    /// the trace while its subexpressions are evaluated.
    pub fn eval(&mut self, expr: ExprId, this: Addr, class: ClassId, cacheable: bool) -> Outcome {
        if let Some(value) = self.cache.get(this, expr) {
            log_step!("eval {expr:?} on {this} = {value} (cached)");
            return Outcome::new(value.clone());
        }

        self.cache.insert(this, expr, Value::Hot);
        let span = self.program.expr(expr).span;
        let outcome = self.with_trace(span, |interpreter| interpreter.eval_uncached(expr, this, class));
        if cacheable {
            self.cache.insert(this, expr, outcome.value.clone());
        } else {
            self.cache.remove(this, expr);
        }

        log_step!(
            "eval {expr:?} on {this} = {} with {} errors",
            outcome.value,
            outcome.errors.len()
        );
        outcome
    }

    fn eval_uncached(&mut self, expr: ExprId, this: Addr, class: ClassId) -> Outcome {
        let program = self.program;
        let node = program.expr(expr);
        let span = node.span;

        match &node.kind {
            ExprKind::Wildcard | ExprKind::Literal | ExprKind::DefDef(_) | ExprKind::TypeDef { .. } => {
                Outcome::hot()
            }
            ExprKind::Ident { symbol, tpe } => {
                if program.symbol(*symbol).is_method() {
                    // A call of a method without parameter list
                    let prefix = tpe.prefix().cloned().unwrap_or(Type::NoPrefix);
                    self.call_ident(*symbol, &prefix, Vec::new(), this, class, span)
                } else {
                    self.eval_type(tpe, this, class, span)
                }
            }
            ExprKind::This(target) => self.eval_type(&Type::This(*target), this, class, span),
            ExprKind::Select { qualifier, symbol } => {
                let qualifier = self.eval(*qualifier, this, class, false);
                let outcome = if program.symbol(*symbol).is_method() {
                    self.call(&qualifier.value, *symbol, &[], None, span, true)
                } else {
                    self.select(&qualifier.value, *symbol, span, true)
                };
                outcome.after_errors(qualifier.errors)
            }
            ExprKind::Call { callee, args } => {
                let (errors, args) = self.eval_args(args, this, class);
                let outcome = match callee {
                    Callee::Super {
                        this_class,
                        super_class,
                        method,
                    } => {
                        let receiver = self.resolve_this(*this_class, &this.into(), class, span);
                        self.call(&receiver, *method, &args, Some(*super_class), span, true)
                    }
                    Callee::Select { qualifier, method } => {
                        let qualifier = self.eval(*qualifier, this, class, false);
                        let outcome = if program.symbol(*method).is_constructor() {
                            self.call_constructor(&qualifier.value, *method, &args, span)
                        } else {
                            self.call(&qualifier.value, *method, &args, None, span, true)
                        };
                        outcome.after_errors(qualifier.errors)
                    }
                    Callee::Ident { method, prefix } => self.call_ident(*method, prefix, args, this, class, span),
                };
                outcome.after_errors(errors)
            }
            ExprKind::New { tpe, ctor, args } => {
                let (errors, args) = self.eval_args(args, this, class);
                if !errors.is_empty() {
                    return Outcome::hot_with_errors(errors);
                }

                let outer = self.outer_value(tpe, this, class, span);
                let outcome = self.with_trace(span, |interpreter| {
                    interpreter.instantiate(&outer.value, tpe.class, *ctor, &args, span)
                });
                outcome.after_errors(outer.errors)
            }
            ExprKind::Assign { lhs, rhs } => {
                let mut errors = match &program.expr(*lhs).kind {
                    ExprKind::Select { qualifier, .. } => self.eval(*qualifier, this, class, false).errors,
                    _ => Vec::new(),
                };
                let value = self.eval(*rhs, this, class, false);
                let rhs_span = program.expr(*rhs).span;
                errors.extend(self.ensure_hot(value, ASSIGN_MSG, rhs_span).errors);
                Outcome::hot_with_errors(errors)
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond = self.eval(*cond, this, class, false);
                let then_branch = self.eval(*then_branch, this, class, false);
                let else_branch = self.eval(*else_branch, this, class, false);
                then_branch.join(else_branch).after_errors(cond.errors)
            }
            ExprKind::Match { scrutinee, cases } => {
                let scrutinee_span = program.expr(*scrutinee).span;
                let scrutinee = self.eval(*scrutinee, this, class, false);
                let scrutinee = self.ensure_hot(scrutinee, MATCH_MSG, scrutinee_span);
                self.eval_all(cases, this, class).after_errors(scrutinee.errors)
            }
            ExprKind::While { cond, body } => {
                let mut errors = self.eval(*cond, this, class, false).errors;
                errors.extend(self.eval(*body, this, class, false).errors);
                Outcome::hot_with_errors(errors)
            }
            ExprKind::Try {
                block,
                cases,
                finalizer,
            } => {
                let block = self.eval(*block, this, class, false);
                let mut outcome = block.join(self.eval_all(cases, this, class));
                if let Some(finalizer) = finalizer {
                    outcome.errors.extend(self.eval(*finalizer, this, class, false).errors);
                }
                outcome
            }
            ExprKind::SeqLiteral(elems) => {
                let mut errors = Vec::new();
                for elem in elems {
                    let outcome = self.eval(*elem, this, class, false);
                    errors.extend(self.ensure_hot(outcome, SEQ_MSG, program.expr(*elem).span).errors);
                }
                Outcome::hot_with_errors(errors)
            }
            ExprKind::Closure { params, body } => Outcome::new(self.closure(*body, params.clone(), this, class)),
            ExprKind::Block { stats, expr } => self.eval_block(stats, *expr, this, class),
            ExprKind::Typed { expr, unchecked } | ExprKind::Annotated { expr, unchecked } => {
                if *unchecked {
                    Outcome::hot()
                } else {
                    self.eval(*expr, this, class, false)
                }
            }
            ExprKind::Return(expr) => {
                let outcome = self.eval(*expr, this, class, false);
                let errors = self.ensure_hot(outcome, RETURN_MSG, program.expr(*expr).span).errors;
                Outcome::hot_with_errors(errors)
            }
            ExprKind::NamedArg(expr) => self.eval(*expr, this, class, false),
            ExprKind::ValDef(symbol) => match program.symbol(*symbol).body {
                Some(rhs) => self.eval(rhs, this, class, true),
                None => Outcome::hot(),
            },
            ExprKind::Template(template_class) => self.init(*template_class, this),
        }
    }

    /// Evaluates the statements of a block, local values are visible in the rest of the block
    fn eval_block(&mut self, stats: &[ExprId], expr: ExprId, this: Addr, class: ClassId) -> Outcome {
        let program = self.program;
        self.with_env(self.env.clone(), |interpreter| {
            let mut errors = Vec::new();
            for stat in stats {
                match program.expr(*stat).kind {
                    ExprKind::ValDef(symbol) if program.is_local(symbol) => {
                        let outcome = interpreter.eval(*stat, this, class, false);
                        interpreter.env = interpreter.env.extend([(symbol, outcome.value)]);
                        errors.extend(outcome.errors);
                    }
                    _ => errors.extend(interpreter.eval(*stat, this, class, false).errors),
                }
            }
            interpreter.eval(expr, this, class, false).after_errors(errors)
        })
    }

    /// Joins the values of every expression
    fn eval_all(&mut self, exprs: &[ExprId], this: Addr, class: ClassId) -> Outcome {
        let outcomes = exprs
            .iter()
            .map(|expr| self.eval(*expr, this, class, false))
            .collect::<Vec<_>>();
        Outcome::join_all(outcomes)
    }

    /// Calls a method which was referenced without qualifier
    fn call_ident(
        &mut self,
        method: SymbolId,
        prefix: &Type,
        args: Vec<ArgInfo>,
        this: Addr,
        class: ClassId,
        source: Span,
    ) -> Outcome {
        if let Type::NoPrefix = prefix {
            // Local methods are no members, so the receiver is the instance of the enclosing class
            let enclosing = self.program.enclosing_class(method);
            let receiver = self.resolve_this(enclosing, &this.into(), class, source);
            self.call(&receiver, method, &args, None, source, false)
        } else {
            let receiver = self.eval_type(prefix, this, class, source);
            self.call(&receiver.value, method, &args, None, source, true)
                .after_errors(receiver.errors)
        }
    }

    fn closure(&self, body: ExprId, params: Vec<SymbolId>, this: Addr, class: ClassId) -> Value {
        Value::Fun(Rc::new(FunValue {
            body,
            params,
            this,
            class,
            env: self.env.clone(),
        }))
    }

    /// Evaluates arguments, by-name arguments become closures
    pub(crate) fn eval_args(&mut self, args: &[Arg], this: Addr, class: ClassId) -> (Errors, Vec<ArgInfo>) {
        let mut errors = Vec::new();
        let mut infos = Vec::with_capacity(args.len());
        for arg in args {
            let value = if arg.by_name {
                self.closure(arg.expr, Vec::new(), this, class)
            } else {
                let outcome = self.eval(arg.expr, this, class, false);
                errors.extend(outcome.errors);
                outcome.value
            };
            infos.push(ArgInfo {
                value,
                source: self.program.expr(arg.expr).span,
                trace: self.trace.clone(),
            });
        }
        (errors, infos)
    }

    /// Evaluates the term a type refers to
    pub(crate) fn eval_type(&mut self, tpe: &Type, this: Addr, class: ClassId, source: Span) -> Outcome {
        let program = self.program;
        match tpe {
            Type::NoPrefix | Type::Constant | Type::TermParamRef => Outcome::hot(),
            Type::TermRef { prefix, symbol } => match **prefix {
                // A local or a parameter
                Type::NoPrefix => Outcome::new(self.env.lookup(*symbol).cloned().unwrap_or(Value::Hot)),
                _ => {
                    let receiver = self.eval_type(prefix, this, class, source);
                    self.select(&receiver.value, *symbol, source, true)
                        .after_errors(receiver.errors)
                }
            },
            Type::This(target) => {
                if program.is_static_owner(*target) && !program.is_contained_in(class, *target) {
                    // `O.this` outside of the object `O`
                    Outcome::hot()
                } else {
                    Outcome::new(self.resolve_this(*target, &this.into(), class, source))
                }
            }
        }
    }
}
