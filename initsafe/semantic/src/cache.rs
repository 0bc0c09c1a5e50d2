use initsafe_tree::ExprId;
use rustc_hash::FxHashMap;

use crate::value::{Addr, Value};

/// Remembers the value of an expression evaluated with a specific receiver
///
/// An entry is either a placeholder for an evaluation which is still in progress
/// or the final value of an evaluation which was marked as cacheable.
#[derive(Debug, Default)]
pub struct Cache(FxHashMap<(Addr, ExprId), Value>);

impl Cache {
    pub fn get(&self, this: Addr, expr: ExprId) -> Option<&Value> {
        self.0.get(&(this, expr))
    }

    pub fn insert(&mut self, this: Addr, expr: ExprId, value: Value) {
        self.0.insert((this, expr), value);
    }

    pub fn remove(&mut self, this: Addr, expr: ExprId) {
        self.0.remove(&(this, expr));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
