use std::cell::Cell;

use crate::{Code, CodeId, Config, InputFiles};

/// Stores the information shared by every check of one compilation unit
#[derive(Debug, Default)]
pub struct CompileContext {
    /// The current config which specifies how to check and report
    pub config: Config,
    /// The code files the trees were built from
    pub input_files: InputFiles,
    /// The number of top-level checks run so far
    checks_run: Cell<usize>,
}

impl CompileContext {
    pub fn add_input_file(&mut self, code: Code) -> CodeId {
        self.input_files.add_input(code)
    }

    /// Registers a new top-level check and returns its sequence number
    pub fn next_check_id(&self) -> usize {
        let old = self.checks_run.get();
        self.checks_run.set(old + 1);
        old
    }
}
