//! Method and constructor calls

use initsafe_common::Span;
use initsafe_error::{Errors, InitErrorKind};
use initsafe_tree::{ClassId, SymbolId};

use crate::{
    env::Env,
    interpreter::{ArgInfo, Interpreter},
    outcome::Outcome,
    value::{Addr, Value},
};

const ARGUMENT_MSG: &str = "Only fully initialized values may be used as arguments";

impl Interpreter<'_> {
    /// Calls `method` on `value`
    ///
    /// If `super_class` is set, the call is dispatched like `super[super_class].method`.
    /// If `need_resolve` is not set, `method` is called without virtual dispatch,
    /// which is used for local methods.
    pub fn call(
        &mut self,
        value: &Value,
        method: SymbolId,
        args: &[ArgInfo],
        super_class: Option<ClassId>,
        source: Span,
        need_resolve: bool,
    ) -> Outcome {
        log_step!("call '{}' on {value}", self.program.symbol(method).name);

        let outcome = match value {
            Value::Hot => Outcome::hot_with_errors(self.promote_args(args)),
            Value::Cold => {
                let error = self.error(
                    InitErrorKind::CallCold {
                        method: self.program.symbol(method).name.clone(),
                    },
                    source,
                );
                Outcome::hot_with_errors(vec![error]).and_errors(self.promote_args(args))
            }
            Value::ThisRef(class) => self.call_addr(
                Addr::ThisRef(*class),
                method,
                args,
                super_class,
                source,
                need_resolve,
            ),
            Value::Warm(warm) => self.call_addr(
                Addr::Warm(*warm),
                method,
                args,
                super_class,
                source,
                need_resolve,
            ),
            Value::Fun(fun) => {
                if self.program.symbol(method).name == "apply" {
                    let env = fun.env.extend(fun.params.iter().map(|param| (*param, Value::Hot)));
                    let outcome = self.with_trace(source, |this| {
                        this.with_env(env, |this| this.eval(fun.body, fun.this, fun.class, true))
                    });
                    outcome.and_errors(self.promote_args(args))
                } else {
                    // Only a reference to a method of the closure, like `f.tupled`
                    Outcome::new(value.clone())
                }
            }
            Value::RefSet(refs) => Outcome::join_all(
                refs.iter()
                    .map(|value| self.call(value, method, args, super_class, source, need_resolve))
                    .collect::<Vec<_>>(),
            ),
        };

        log_step!("call '{}' on {value} = {}", self.program.symbol(method).name, outcome.value);
        outcome
    }

    fn call_addr(
        &mut self,
        addr: Addr,
        method: SymbolId,
        args: &[ArgInfo],
        super_class: Option<ClassId>,
        source: Span,
        need_resolve: bool,
    ) -> Outcome {
        let program = self.program;
        let target = match super_class {
            _ if !need_resolve => method,
            Some(super_class) => program.resolve_super(addr.class(), super_class, method),
            None => program.resolve(addr.class(), method),
        };
        let symbol = program.symbol(target);

        if symbol.is_method() {
            if symbol.has_source() {
                self.with_trace(source, |this| this.invoke(addr, target, args))
            } else if program.can_ignore_method_call(target) {
                Outcome::hot()
            } else {
                self.call_unknown(target, source)
            }
        } else if let Some(value) = self.heap.field(addr, target) {
            // A call of a getter
            Outcome::new(value.clone())
        } else {
            self.select(&addr.into(), target, source, false)
        }
    }

    /// Calls a constructor on an object which was already allocated
    pub fn call_constructor(&mut self, value: &Value, ctor: SymbolId, args: &[ArgInfo], source: Span) -> Outcome {
        let program = self.program;
        let Some(addr) = value.as_addr() else {
            self.report_internal(
                format!(
                    "Unexpected constructor call of '{}' on {value}",
                    program.class(program.enclosing_class(ctor)).name
                ),
                source,
            );
            return Outcome::hot();
        };

        if program.symbol(ctor).has_source() {
            self.with_trace(source, |this| this.invoke(addr, ctor, args))
        } else if program.can_ignore_method_call(ctor) {
            Outcome::hot()
        } else {
            self.call_unknown(ctor, source)
        }
    }

    /// Evaluates the body of `target` with `addr` as receiver
    fn invoke(&mut self, addr: Addr, target: SymbolId, args: &[ArgInfo]) -> Outcome {
        let program = self.program;
        let symbol = program.symbol(target);
        let Some(body) = symbol.body else {
            return Outcome::hot();
        };
        let class = program.enclosing_class(target);
        let bind_widened = || {
            symbol
                .params
                .iter()
                .copied()
                .zip(args.iter().map(|arg| arg.value.widen()))
        };

        if symbol.is_primary_constructor() {
            let span = program.class(class).span;
            let outcome = self.with_env(Env::new(bind_widened()), |this| {
                this.with_trace(span, |this| this.eval(body, addr, class, true))
            });
            Outcome::with_errors(addr.into(), outcome.errors)
        } else if symbol.is_constructor() {
            self.with_env(Env::new(bind_widened()), |this| {
                this.eval(body, addr, class, true)
            })
        } else if symbol.is_local() {
            // Local methods see the locals of their enclosing method, their arguments are not promoted
            let env = self.env.extend(bind_widened());
            self.with_env(env, |this| this.eval(body, addr, class, true))
        } else {
            let env = Env::new(symbol.params.iter().map(|param| (*param, Value::Hot)));
            let outcome = self.with_env(env, |this| this.eval(body, addr, class, true));
            outcome.and_errors(self.promote_args(args))
        }
    }

    /// Promotes every argument, the callee may use them without restrictions
    pub(crate) fn promote_args(&mut self, args: &[ArgInfo]) -> Errors {
        let mut errors = Vec::new();
        for arg in args {
            errors.extend(self.promote_arg(arg));
        }
        errors
    }

    pub(crate) fn promote_arg(&mut self, arg: &ArgInfo) -> Errors {
        self.with_replaced_trace(arg.trace.clone(), |this| {
            this.promote(&arg.value, ARGUMENT_MSG, arg.source)
        })
    }
}
