//! The entry points of the checker

use initsafe_common::Config;
use initsafe_error::{Errors, InitError, InternalDiagnostic};
use initsafe_tree::{class::ClassFlags, ClassId, Program};

use crate::{
    env::Env,
    heap::Objekt,
    interpreter::Interpreter,
    value::{Addr, Value},
};

/// Everything found by checking one class
#[derive(Debug, Default)]
pub struct CheckResult {
    pub errors: Vec<InitError>,
    pub diagnostics: Vec<InternalDiagnostic>,
}

/// Checks that constructing an instance of `class` is safe
///
/// Every check uses its own heap, cache and promoted set.
pub fn check_class(program: &Program, class: ClassId) -> CheckResult {
    let mut interpreter = Interpreter::new(program);
    let errors = interpreter.check(class);
    CheckResult {
        errors,
        diagnostics: interpreter.diagnostics,
    }
}

/// Returns whether `class` is an entry point for [`check_program`]
pub fn is_checked_class(program: &Program, class: ClassId, config: &Config) -> bool {
    let info = program.class(class);
    info.has_source()
        && !info
            .flags
            .intersects(ClassFlags::TRAIT | ClassFlags::PACKAGE | ClassFlags::ROOT)
        && (config.check_abstract_classes || !info.is(ClassFlags::ABSTRACT))
}

/// Checks every concrete class of the program independently
pub fn check_program(program: &Program, config: &Config) -> Vec<(ClassId, CheckResult)> {
    program
        .classes()
        .filter(|(class, _)| is_checked_class(program, *class, config))
        .map(|(class, _)| (class, check_class(program, class)))
        .collect()
}

impl Interpreter<'_> {
    /// Evaluates the template of `class` on its object under construction
    ///
    /// The interpreter should be fresh, the state of a previous check would leak into this one.
    pub fn check(&mut self, class: ClassId) -> Errors {
        let program = self.program;
        let info = program.class(class);
        let Some(ctor) = info.primary_constructor else {
            return Vec::new();
        };
        let ctor = program.symbol(ctor);
        let Some(template) = ctor.body else {
            return Vec::new();
        };
        log::debug!("Checking class '{}'", info.name);

        let addr = Addr::ThisRef(class);
        if !self.heap.contains(addr) {
            self.heap.write(addr, Objekt::new(class, [(class, Value::Hot)]));
        }

        let env = Env::new(ctor.params.iter().map(|param| (*param, Value::Hot)));
        let outcome = self.with_env(env, |interpreter| {
            interpreter.with_trace(info.span, |interpreter| interpreter.eval(template, addr, class, true))
        });

        log::debug!(
            "Checked class '{}': {} errors, {} cached values",
            info.name,
            outcome.errors.len(),
            self.cache.len()
        );
        outcome.errors
    }
}
