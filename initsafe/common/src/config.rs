/// Specifies which classes get checked and how diagnostics are reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether abstract classes are checked as top-level entry points
    pub check_abstract_classes: bool,
    /// How many frames of the call trace are rendered per diagnostic.
    /// `None` renders the whole trace.
    pub trace_limit: Option<usize>,
    /// Whether internal inconsistencies of the input trees are reported as warnings
    pub report_internal: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            check_abstract_classes: true,
            trace_limit: Some(16),
            report_internal: true,
        }
    }
}
