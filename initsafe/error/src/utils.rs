use std::fmt::Display;

use itertools::Itertools;

/// Displays the nested causes of an unsafe promotion as a bullet list
pub fn display_causes<T: Display>(collection: &[T]) -> String {
    match collection {
        [] => "No concrete cause was found".to_string(),
        [single] => format!("Caused by: {single}"),
        many => format!(
            "Caused by:\n  * {}",
            many.iter().map(|val| format!("{val}")).join("\n  * ")
        ),
    }
}
