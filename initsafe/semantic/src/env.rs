use std::collections::BTreeMap;

use initsafe_tree::SymbolId;

use crate::value::Value;

/// The values of the parameters and locals of one method or constructor activation
///
/// Constructor and local method parameters are bound to widened values,
/// local values keep the value of their initializer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Env(BTreeMap<SymbolId, Value>);

impl Env {
    pub fn empty() -> Self {
        Env(BTreeMap::new())
    }

    pub fn new(bindings: impl IntoIterator<Item = (SymbolId, Value)>) -> Self {
        Env(bindings.into_iter().collect())
    }

    pub fn lookup(&self, symbol: SymbolId) -> Option<&Value> {
        self.0.get(&symbol)
    }

    /// Returns a new environment with additional bindings, which shadow the existing ones
    #[must_use]
    pub fn extend(&self, bindings: impl IntoIterator<Item = (SymbolId, Value)>) -> Self {
        let mut map = self.0.clone();
        map.extend(bindings);
        Env(map)
    }

    /// Returns whether every bound value is `Hot`
    pub fn is_hot(&self) -> bool {
        self.0.values().all(Value::is_hot)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
