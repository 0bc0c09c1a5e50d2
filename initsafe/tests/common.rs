use initsafe::{
    error::InitErrorKind,
    tree::{ClassId, ProgramBuilder},
    CheckConfig, CheckOutput,
};

/// Shows the steps of the checker with `RUST_LOG=trace`
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn check_class(builder: ProgramBuilder, class: ClassId) -> (CheckOutput, CheckConfig) {
    init_logger();
    let config = CheckConfig::new(builder.finish());
    (config.check_class(class), config)
}

pub fn check_program(builder: ProgramBuilder) -> (CheckOutput, CheckConfig) {
    init_logger();
    let config = CheckConfig::new(builder.finish());
    (config.check_program(), config)
}

pub fn error_kinds(output: &CheckOutput) -> Vec<InitErrorKind> {
    output.errors.iter().map(|error| error.kind.clone()).collect()
}
