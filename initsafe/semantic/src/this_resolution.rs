//! Resolution of `C.this` and of the outer instances of new objects

use initsafe_common::Span;
use initsafe_tree::{class::ClassFlags, types::TypeRef, ClassId};

use crate::{
    interpreter::Interpreter,
    outcome::Outcome,
    value::{Addr, Value},
};

impl Interpreter<'_> {
    /// Finds the value of `target.this` in code of `class`, where `value` is the value of `class.this`
    pub fn resolve_this(&mut self, target: ClassId, value: &Value, class: ClassId, source: Span) -> Value {
        let program = self.program;
        if target == class {
            return value.clone();
        }
        if program.is_package(target) {
            return Value::Hot;
        }

        match value {
            Value::Hot => Value::Hot,
            Value::Cold => Value::Cold,
            Value::ThisRef(this_class) => {
                self.resolve_this_addr(target, Addr::ThisRef(*this_class), class, source)
            }
            Value::Warm(warm) => self.resolve_this_addr(target, Addr::Warm(*warm), class, source),
            Value::RefSet(refs) => Value::join_all(
                refs.iter()
                    .map(|value| self.resolve_this(target, value, class, source))
                    .collect::<Vec<_>>()
                    .iter(),
            ),
            Value::Fun(_) => {
                self.report_internal(
                    format!(
                        "Unexpected closure when resolving '{}.this' in '{}'",
                        program.class(target).name,
                        program.class(class).name
                    ),
                    source,
                );
                Value::Cold
            }
        }
    }

    fn resolve_this_addr(&mut self, target: ClassId, addr: Addr, class: ClassId, source: Span) -> Value {
        let program = self.program;
        match self.heap.outer(addr, class).cloned() {
            Some(outer) => {
                let outer_class = program.lexically_enclosing_class(class);
                self.resolve_this(target, &outer, outer_class, source)
            }
            None => {
                self.report_internal(
                    format!(
                        "The outer of '{}' is not initialized when resolving '{}.this' on {addr}",
                        program.class(class).name,
                        program.class(target).name
                    ),
                    source,
                );
                Value::Hot
            }
        }
    }

    /// Computes the outer instance of a new object of `tpe`, created in code of `class`
    pub fn outer_value(&mut self, tpe: &TypeRef, this: Addr, class: ClassId, source: Span) -> Outcome {
        let program = self.program;
        if !tpe.has_prefix() {
            let enclosing = program.lexically_enclosing_class(tpe.class);
            Outcome::new(self.resolve_this(enclosing, &this.into(), class, source))
        } else if program.class(tpe.class).is(ClassFlags::JAVA_INTERFACE) {
            Outcome::hot()
        } else {
            self.eval_type(&tpe.prefix, this, class, source)
        }
    }
}
