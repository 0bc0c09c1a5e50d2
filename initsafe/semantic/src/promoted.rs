use rustc_hash::FxHashSet;

use crate::value::Value;

/// The values which are already known to be promotable to `Hot`
///
/// Besides avoiding repeated work, this breaks cycles when an object
/// transitively needs itself to be promoted.
#[derive(Debug, Default)]
pub struct Promoted(FxHashSet<Value>);

impl Promoted {
    pub fn contains(&self, value: &Value) -> bool {
        self.0.contains(value)
    }

    pub fn insert(&mut self, value: Value) {
        self.0.insert(value);
    }

    pub fn remove(&mut self, value: &Value) {
        self.0.remove(value);
    }
}
