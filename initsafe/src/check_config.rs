use initsafe_common::{Code, CodeId, CompileContext};
use initsafe_error::{AsAnnotationSnippet, InitErrors, InternalDiagnostic};
use initsafe_semantic::{check_class, check_program, CheckResult};
use initsafe_tree::{ClassId, Program};

/// The errors and internal diagnostics of one or more checked classes
#[derive(Debug, Default)]
pub struct CheckOutput {
    pub errors: InitErrors,
    pub diagnostics: Vec<InternalDiagnostic>,
}

impl CheckOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn append(&mut self, result: CheckResult) {
        self.errors.0.extend(result.errors);
        self.diagnostics.extend(result.diagnostics);
    }

    /// Renders every error, followed by the internal diagnostics if they are enabled
    pub fn format(&self, ctx: &CompileContext) -> String {
        let mut parts = Vec::new();
        if !self.errors.is_empty() {
            parts.push(self.errors.format(ctx));
        }
        if ctx.config.report_internal {
            parts.extend(
                self.diagnostics
                    .iter()
                    .map(|diagnostic| AsAnnotationSnippet::to_string(diagnostic, ctx)),
            );
        }
        parts.join("\n\n")
    }
}

/// Owns a program and the context needed to check it and to report the results
#[derive(Debug)]
pub struct CheckConfig {
    pub compile_context: CompileContext,
    pub program: Program,
}

impl CheckConfig {
    pub fn new(program: Program) -> Self {
        CheckConfig {
            compile_context: CompileContext::default(),
            program,
        }
    }

    /// Registers the source code the program was built from, so that errors can point into it
    pub fn add_source(&mut self, source: &str, path: Option<&str>) -> CodeId {
        self.compile_context.add_input_file(Code {
            source: source.into(),
            path: path.map(Into::into),
        })
    }

    /// Checks the construction of `class`, regardless of the configuration
    pub fn check_class(&self, class: ClassId) -> CheckOutput {
        let check_id = self.compile_context.next_check_id();
        log::debug!(
            "Check #{check_id}: class '{}'",
            self.program.class(class).name
        );

        let mut output = CheckOutput::default();
        output.append(check_class(&self.program, class));
        output
    }

    /// Checks the class with the simple name `name`
    pub fn check_class_named(&self, name: &str) -> Option<CheckOutput> {
        self.program
            .find_class(name)
            .map(|class| self.check_class(class))
    }

    /// Checks every class which the configuration selects, each with a fresh interpreter
    pub fn check_program(&self) -> CheckOutput {
        let mut output = CheckOutput::default();
        for (class, result) in check_program(&self.program, &self.compile_context.config) {
            log::debug!(
                "Class '{}': {} errors",
                self.program.class(class).name,
                result.errors.len()
            );
            output.append(result);
        }
        output
    }
}
