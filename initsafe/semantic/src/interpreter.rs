use std::mem;

use initsafe_common::Span;
use initsafe_error::{InitError, InitErrorKind, InternalDiagnostic, Trace};
use initsafe_tree::Program;

use crate::{cache::Cache, env::Env, heap::Heap, promoted::Promoted, value::Value};

/// An evaluated argument of a call
#[derive(Debug, Clone)]
pub struct ArgInfo {
    pub value: Value,
    /// The argument expression
    pub source: Span,
    /// The trace at the point where the argument was evaluated
    pub trace: Trace,
}

/// The state of one top-level check
///
/// Owns the heap, the cache and the promoted set, which must not be shared between
/// independent checks, and the current environment and trace. The operations
/// of the interpreter are spread over the modules of this crate.
#[derive(Debug)]
pub struct Interpreter<'p> {
    pub(crate) program: &'p Program,
    pub(crate) heap: Heap,
    pub(crate) cache: Cache,
    pub(crate) promoted: Promoted,
    pub(crate) env: Env,
    pub(crate) trace: Trace,
    pub(crate) diagnostics: Vec<InternalDiagnostic>,
}

impl<'p> Interpreter<'p> {
    pub fn new(program: &'p Program) -> Self {
        Interpreter {
            program,
            heap: Heap::default(),
            cache: Cache::default(),
            promoted: Promoted::default(),
            env: Env::empty(),
            trace: Trace::empty(),
            diagnostics: Vec::new(),
        }
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn promoted(&self) -> &Promoted {
        &self.promoted
    }

    pub fn diagnostics(&self) -> &[InternalDiagnostic] {
        &self.diagnostics
    }

    /// Runs `f` with `env` as the current environment
    pub(crate) fn with_env<T>(&mut self, env: Env, f: impl FnOnce(&mut Self) -> T) -> T {
        let old_env = mem::replace(&mut self.env, env);
        let result = f(self);
        self.env = old_env;
        result
    }

    /// Runs `f` with `source` pushed onto the trace
    pub(crate) fn with_trace<T>(&mut self, source: Span, f: impl FnOnce(&mut Self) -> T) -> T {
        let trace = self.trace.add(source);
        self.with_replaced_trace(trace, f)
    }

    pub(crate) fn with_replaced_trace<T>(
        &mut self,
        trace: Trace,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let old_trace = mem::replace(&mut self.trace, trace);
        let result = f(self);
        self.trace = old_trace;
        result
    }

    /// Creates an error at `source` with the current trace
    #[track_caller]
    pub(crate) fn error(&self, kind: InitErrorKind, source: Span) -> InitError {
        InitError::new(kind, source, &self.trace)
    }

    /// Reports an inconsistency of the input trees
    pub(crate) fn report_internal(&mut self, msg: String, source: Span) {
        log::warn!("{msg}");
        self.diagnostics.push(InternalDiagnostic { msg, span: source });
    }
}
