//! Object creation

use initsafe_common::Span;
use initsafe_error::InitErrorKind;
use initsafe_tree::{ClassId, SymbolId};

use crate::{
    heap::{Objekt, WarmKey},
    interpreter::{ArgInfo, Interpreter},
    outcome::Outcome,
    value::{Addr, Value},
};

impl Interpreter<'_> {
    /// Creates an instance of `class` whose outer instance is `value`
    pub fn instantiate(
        &mut self,
        value: &Value,
        class: ClassId,
        ctor: SymbolId,
        args: &[ArgInfo],
        source: Span,
    ) -> Outcome {
        let program = self.program;
        log_step!("instantiate '{}' with outer {value}", program.class(class).name);

        match value {
            Value::Hot => {
                let mut errors = Vec::new();
                let mut checked_args = Vec::with_capacity(args.len());
                for arg in args {
                    let arg_errors = self.promote_arg(arg);
                    let value = if arg_errors.is_empty() {
                        Value::Hot
                    } else {
                        arg.value.widen()
                    };
                    errors.extend(arg_errors);
                    checked_args.push(ArgInfo {
                        value,
                        ..arg.clone()
                    });
                }

                if !errors.is_empty() && program.class(class).has_source() {
                    // Still check what the constructor does with the unsafe arguments
                    let outcome = self.instantiate_warm(Value::Hot, class, ctor, &checked_args, source);
                    errors.extend(outcome.errors);
                }
                Outcome::hot_with_errors(errors)
            }
            Value::Cold => {
                let error = self.error(
                    InitErrorKind::CallCold {
                        method: program.class(class).name.clone(),
                    },
                    source,
                );
                Outcome::hot_with_errors(vec![error])
            }
            Value::ThisRef(_) | Value::Warm(_) => {
                if !program.class(class).has_source() {
                    return Outcome::hot_with_errors(self.promote_args(args));
                }

                // Outers of outers are widened to keep the number of addresses finite
                let outer = match value {
                    Value::Warm(warm) if matches!(self.heap.warm_key(*warm).outer, Value::Warm(_)) => {
                        Value::Cold
                    }
                    _ => value.clone(),
                };
                let outcome = self.instantiate_warm(outer, class, ctor, args, source);
                if self.env.is_hot() {
                    outcome
                } else {
                    Outcome::with_errors(Value::Cold, outcome.errors)
                }
            }
            Value::Fun(_) => {
                self.report_internal(
                    format!(
                        "Unexpected instantiation of '{}' with a closure as outer",
                        program.class(class).name
                    ),
                    source,
                );
                Outcome::hot()
            }
            Value::RefSet(refs) => Outcome::join_all(
                refs.iter()
                    .map(|value| self.instantiate(value, class, ctor, args, source))
                    .collect::<Vec<_>>(),
            ),
        }
    }

    /// Allocates the warm object and runs its constructor
    fn instantiate_warm(
        &mut self,
        outer: Value,
        class: ClassId,
        ctor: SymbolId,
        args: &[ArgInfo],
        source: Span,
    ) -> Outcome {
        let widened_args = args
            .iter()
            .map(|arg| ArgInfo {
                value: arg.value.widen(),
                ..arg.clone()
            })
            .collect::<Vec<_>>();
        let warm = self.heap.intern_warm(WarmKey {
            class,
            outer: outer.clone(),
            ctor,
            args: widened_args.iter().map(|arg| arg.value.clone()).collect(),
        });

        let addr = Addr::Warm(warm);
        let value = Value::Warm(warm);
        if self.heap.contains(addr) {
            // Constructed before or still under construction
            return Outcome::new(value);
        }

        self.heap.write(addr, Objekt::new(class, [(class, outer)]));
        let outcome = self.call_constructor(&value, ctor, &widened_args, source);
        Outcome::with_errors(value, outcome.errors)
    }
}
