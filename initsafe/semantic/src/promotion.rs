//! Promotion decides whether a value may be treated as `Hot`
//!
//! The extrinsic check only looks at the captured values and the heap. If it fails for
//! a warm object or a closure, the intrinsic check simulates every use of the value.

use initsafe_common::Span;
use initsafe_error::{Errors, InitError, InitErrorKind};
use initsafe_tree::symbol::SymbolFlags;

use crate::{
    interpreter::{ArgInfo, Interpreter},
    outcome::Outcome,
    value::{Addr, Value, Warm},
};

impl Interpreter<'_> {
    /// Checks that `value` is fully initialized
    pub fn promote(&mut self, value: &Value, msg: &str, source: Span) -> Errors {
        log_step!("promote {value}");

        match value {
            Value::Hot => Vec::new(),
            Value::Cold => vec![self.promote_error(msg, source)],
            Value::ThisRef(_) => {
                if self.promoted.contains(value) || self.can_promote_extrinsic(value) {
                    Vec::new()
                } else {
                    vec![self.promote_error(msg, source)]
                }
            }
            Value::Warm(warm) => {
                if self.promoted.contains(value) || self.can_promote_extrinsic(value) {
                    return Vec::new();
                }

                self.promoted.insert(value.clone());
                let errors = self.try_promote(*warm, msg, source);
                if !errors.is_empty() {
                    self.promoted.remove(value);
                }
                errors
            }
            Value::Fun(fun) => {
                if self.promoted.contains(value) || self.can_promote_extrinsic(value) {
                    return Vec::new();
                }

                // A closure which returns itself is assumed to be promotable while its body is checked
                self.promoted.insert(value.clone());
                let env = fun.env.extend(fun.params.iter().map(|param| (*param, Value::Hot)));
                let outcome = self.with_env(env, |this| this.eval(fun.body, fun.this, fun.class, false));
                let mut causes = outcome.errors;
                causes.extend(self.promote(&outcome.value, msg, source));
                if causes.is_empty() {
                    Vec::new()
                } else {
                    self.promoted.remove(value);
                    vec![self.unsafe_promotion(msg, source, causes)]
                }
            }
            Value::RefSet(refs) => refs
                .iter()
                .flat_map(|value| self.promote(value, msg, source))
                .collect(),
        }
    }

    /// Promotes the value of `outcome` and keeps it
    pub(crate) fn ensure_hot(&mut self, outcome: Outcome, msg: &str, source: Span) -> Outcome {
        let errors = self.promote(&outcome.value, msg, source);
        outcome.and_errors(errors)
    }

    /// Checks whether `value` can be promoted by only looking at the values it captured
    ///
    /// Successful checks are remembered in the promoted set.
    pub fn can_promote_extrinsic(&mut self, value: &Value) -> bool {
        let program = self.program;
        let promotable = match value {
            Value::Hot => return true,
            Value::Cold => return false,
            _ if self.promoted.contains(value) => return true,
            Value::Warm(warm) => {
                let key = self.heap.warm_key(*warm);
                let outer = key.outer.clone();
                key.args.iter().all(Value::is_hot) && self.can_promote_extrinsic(&outer)
            }
            Value::ThisRef(class) => {
                // Every field of a completely constructed object is initialized
                program.class(*class).linearization.iter().all(|base| {
                    !program.class(*base).has_source()
                        || program.fields(*base).all(|field| {
                            program
                                .symbol(field)
                                .is_one_of(SymbolFlags::LAZY | SymbolFlags::DEFERRED)
                                || self.heap.field(Addr::ThisRef(*class), field).is_some()
                        })
                })
            }
            Value::Fun(fun) => self.can_promote_extrinsic(&fun.this.into()),
            Value::RefSet(refs) => return refs.iter().all(|value| self.can_promote_extrinsic(value)),
        };

        if promotable {
            self.promoted.insert(value.clone());
        }
        promotable
    }

    /// Promotes a warm object by checking that every field and every method of it yields a `Hot` value
    fn try_promote(&mut self, warm: Warm, msg: &str, source: Span) -> Errors {
        let program = self.program;
        let linearization = &program.class(warm.class).linearization;
        log::debug!("Trying to promote {}", Value::Warm(warm));

        // Member classes could be instantiated with this object as outer, which is too expensive to check
        if linearization
            .iter()
            .any(|base| !program.class(*base).member_classes.is_empty())
        {
            return vec![self.promote_error(msg, source)];
        }

        let value = Value::Warm(warm);
        let members = linearization
            .iter()
            .filter(|base| program.class(**base).has_source())
            .flat_map(|base| program.class(*base).decls.iter().copied());
        let (methods, fields): (Vec<_>, Vec<_>) = members
            .filter(|member| {
                let symbol = program.symbol(*member);
                !symbol.is_one_of(SymbolFlags::DEFERRED | SymbolFlags::CONSTRUCTOR)
            })
            .partition(|member| program.symbol(*member).is_method());

        let mut causes = Vec::new();
        for field in fields {
            let symbol = program.symbol(field);
            if symbol.is_one_of(SymbolFlags::PRIVATE | SymbolFlags::PROTECTED)
                || !(symbol.has_source() || symbol.is(SymbolFlags::PARAM_ACCESSOR))
            {
                continue;
            }

            let outcome = self.with_trace(symbol.span, |this| {
                let outcome = this.select(&value, field, source, true);
                this.ensure_hot(outcome, msg, source)
            });
            causes.extend(outcome.errors);
        }

        for method in methods {
            let symbol = program.symbol(method);
            if !symbol.has_source() {
                continue;
            }

            let args = symbol
                .params
                .iter()
                .map(|_| ArgInfo {
                    value: Value::Hot,
                    source,
                    trace: self.trace.clone(),
                })
                .collect::<Vec<_>>();
            let outcome = self.with_trace(symbol.span, |this| {
                let outcome = this.call(&value, method, &args, None, source, true);
                this.ensure_hot(outcome, msg, source)
            });
            causes.extend(outcome.errors);
        }

        if causes.is_empty() {
            Vec::new()
        } else {
            vec![self.unsafe_promotion(msg, source, causes)]
        }
    }

    #[track_caller]
    fn promote_error(&self, msg: &str, source: Span) -> InitError {
        self.error(
            InitErrorKind::PromoteError {
                msg: msg.to_string(),
            },
            source,
        )
    }

    #[track_caller]
    fn unsafe_promotion(&self, msg: &str, source: Span, causes: Errors) -> InitError {
        self.error(
            InitErrorKind::UnsafePromotion {
                msg: msg.to_string(),
                causes,
            },
            source,
        )
    }
}
