//! The abstract heap
//!
//! Maps addresses to abstract objects. The heap is monotonic: Objects are never removed and
//! a field or an outer is written at most once. A missing entry means "not initialized yet".

use initsafe_common::FxIndexSet;
use initsafe_tree::{ClassId, SymbolId};
use rustc_hash::FxHashMap;

use crate::value::{Addr, Value, Warm, WarmId};

/// The identity of a warm object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WarmKey {
    pub class: ClassId,
    pub outer: Value,
    pub ctor: SymbolId,
    /// The widened constructor arguments
    pub args: Vec<Value>,
}

/// The state of one object
#[derive(Debug)]
pub struct Objekt {
    pub class: ClassId,
    fields: FxHashMap<SymbolId, Value>,
    /// The outer instance for each class in the linearization of `class`
    outers: FxHashMap<ClassId, Value>,
}

impl Objekt {
    pub fn new(class: ClassId, outers: impl IntoIterator<Item = (ClassId, Value)>) -> Self {
        Objekt {
            class,
            fields: FxHashMap::default(),
            outers: outers.into_iter().collect(),
        }
    }

    pub fn field(&self, field: SymbolId) -> Option<&Value> {
        self.fields.get(&field)
    }

    pub fn has_field(&self, field: SymbolId) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn outer(&self, class: ClassId) -> Option<&Value> {
        self.outers.get(&class)
    }
}

#[derive(Debug, Default)]
pub struct Heap {
    objects: FxHashMap<Addr, Objekt>,
    warm_keys: FxIndexSet<WarmKey>,
}

impl Heap {
    /// Returns the warm address for `key`. Equal keys always yield the same address.
    pub fn intern_warm(&mut self, key: WarmKey) -> Warm {
        let class = key.class;
        let (index, _) = self.warm_keys.insert_full(key);
        Warm {
            class,
            id: WarmId::new(index),
        }
    }

    pub fn warm_key(&self, warm: Warm) -> &WarmKey {
        &self.warm_keys[warm.id.index()]
    }

    pub fn contains(&self, addr: Addr) -> bool {
        self.objects.contains_key(&addr)
    }

    pub fn read(&self, addr: Addr) -> Option<&Objekt> {
        self.objects.get(&addr)
    }

    pub fn field(&self, addr: Addr, field: SymbolId) -> Option<&Value> {
        self.read(addr).and_then(|objekt| objekt.field(field))
    }

    pub fn outer(&self, addr: Addr, class: ClassId) -> Option<&Value> {
        self.read(addr).and_then(|objekt| objekt.outer(class))
    }

    /// Stores a new object, must only be called once per address
    pub fn write(&mut self, addr: Addr, objekt: Objekt) {
        let previous = self.objects.insert(addr, objekt);
        assert!(previous.is_none(), "Object {addr} was written twice");
    }

    fn objekt_mut(&mut self, addr: Addr) -> &mut Objekt {
        match self.objects.get_mut(&addr) {
            Some(objekt) => objekt,
            None => panic!("Object {addr} does not exist"),
        }
    }

    /// Initializes a field, which must not be initialized yet
    pub fn update_field(&mut self, addr: Addr, field: SymbolId, value: Value) {
        let previous = self.objekt_mut(addr).fields.insert(field, value);
        assert!(
            previous.is_none(),
            "Field {field:?} of object {addr} was initialized twice"
        );
    }

    /// Records the outer instance of `class`, which must not be recorded yet
    pub fn update_outer(&mut self, addr: Addr, class: ClassId, value: Value) {
        let previous = self.objekt_mut(addr).outers.insert(class, value);
        assert!(
            previous.is_none(),
            "Outer {class:?} of object {addr} was initialized twice"
        );
    }
}
