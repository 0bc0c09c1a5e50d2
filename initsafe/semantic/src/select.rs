//! Field access

use initsafe_common::Span;
use initsafe_error::InitErrorKind;
use initsafe_tree::{symbol::SymbolFlags, SymbolId};

use crate::{
    interpreter::Interpreter,
    outcome::Outcome,
    value::{Addr, Value},
};

impl Interpreter<'_> {
    /// Reads `field` from `value`
    ///
    /// If `need_resolve` is set, the field is resolved to the member which overrides it in the class of the receiver.
    pub fn select(&mut self, value: &Value, field: SymbolId, source: Span, need_resolve: bool) -> Outcome {
        log_step!("select '{}' on {value}", self.program.symbol(field).name);

        let outcome = match value {
            Value::Hot => Outcome::hot(),
            Value::Cold => {
                let error = self.error(
                    InitErrorKind::AccessCold {
                        field: self.program.symbol(field).name.clone(),
                    },
                    source,
                );
                Outcome::hot_with_errors(vec![error])
            }
            Value::ThisRef(class) => self.select_addr(Addr::ThisRef(*class), field, source, need_resolve),
            Value::Warm(warm) => self.select_addr(Addr::Warm(*warm), field, source, need_resolve),
            Value::Fun(_) => {
                self.report_internal(
                    format!(
                        "Unexpected selection of field '{}' on a closure",
                        self.program.symbol(field).name
                    ),
                    source,
                );
                Outcome::hot()
            }
            Value::RefSet(refs) => Outcome::join_all(
                refs.iter()
                    .map(|value| self.select(value, field, source, need_resolve))
                    .collect::<Vec<_>>(),
            ),
        };

        log_step!("select '{}' on {value} = {}", self.program.symbol(field).name, outcome.value);
        outcome
    }

    fn select_addr(&mut self, addr: Addr, field: SymbolId, source: Span, need_resolve: bool) -> Outcome {
        let program = self.program;
        let target = if need_resolve {
            program.resolve(addr.class(), field)
        } else {
            field
        };
        let symbol = program.symbol(target);
        let owner = program.enclosing_class(target);

        if symbol.is(SymbolFlags::LAZY) {
            return match symbol.body {
                Some(rhs) => self.with_trace(source, |this| this.eval(rhs, addr, owner, true)),
                None => self.call_unknown(target, source),
            };
        }

        if let Some(value) = self.heap.field(addr, target) {
            return Outcome::new(value.clone());
        }

        match addr {
            Addr::Warm(_) if symbol.is(SymbolFlags::PARAM_ACCESSOR) => {
                // Only possible for trait parameters, errors for them are reported
                // when checking the class under construction
                Outcome::hot()
            }
            Addr::Warm(_) => match symbol.body {
                Some(rhs) => self.with_trace(source, |this| this.eval(rhs, addr, owner, true)),
                None => self.call_unknown(target, source),
            },
            Addr::ThisRef(_) if !program.class(owner).has_source() => self.call_unknown(target, source),
            Addr::ThisRef(_) => {
                let error = self.with_trace(source, |this| {
                    this.error(
                        InitErrorKind::AccessNonInit {
                            field: symbol.name.clone(),
                        },
                        source,
                    )
                });
                Outcome::hot_with_errors(vec![error])
            }
        }
    }

    /// Reports a member without source code
    pub(crate) fn call_unknown(&mut self, target: SymbolId, source: Span) -> Outcome {
        let error = self.error(
            InitErrorKind::CallUnknown {
                method: self.program.symbol(target).name.clone(),
            },
            source,
        );
        Outcome::hot_with_errors(vec![error])
    }
}
