//! The abstract domain of the interpreter
//!
//! Values approximate the initialization state of the objects a reference may point to.
//! They form a lattice:
//!
//! ```text
//! Hot ⊑ Warm(C) ⊑ ThisRef(C) ⊑ Cold
//! V ⊑ RefSet(R)  if V ∈ R
//! R1 ⊑ R2        if R1 ⊆ R2
//! ```

use std::{fmt, rc::Rc};

use initsafe_tree::{ClassId, ExprId, SymbolId};
use itertools::Itertools;

use crate::env::Env;

/// The index of a warm object in the intern table of the [`Heap`](crate::heap::Heap)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WarmId(u32);

impl WarmId {
    pub(crate) fn new(index: usize) -> Self {
        WarmId(u32::try_from(index).expect("Too many warm objects"))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An object whose fields are resolvable on demand, but which was created while
/// other objects were still under construction.
///
/// Warm objects with the same class, outer, constructor and arguments are the same object,
/// the heap interns their keys. The class is stored inline so that the lattice operations
/// do not need the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Warm {
    pub class: ClassId,
    pub id: WarmId,
}

/// An address into the abstract heap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Addr {
    /// The object currently under construction
    ThisRef(ClassId),
    Warm(Warm),
}

impl Addr {
    pub fn class(self) -> ClassId {
        match self {
            Addr::ThisRef(class) => class,
            Addr::Warm(warm) => warm.class,
        }
    }
}

impl From<Addr> for Value {
    fn from(addr: Addr) -> Self {
        match addr {
            Addr::ThisRef(class) => Value::ThisRef(class),
            Addr::Warm(warm) => Value::Warm(warm),
        }
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Value::from(*self).fmt(f)
    }
}

/// A closure, which captured the receiver, the class and the environment it was created in
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunValue {
    pub body: ExprId,
    pub params: Vec<SymbolId>,
    pub this: Addr,
    pub class: ClassId,
    pub env: Env,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    /// A transitively initialized object
    Hot,
    /// An object with unknown initialization state
    Cold,
    /// The object under construction
    ThisRef(ClassId),
    Warm(Warm),
    Fun(Rc<FunValue>),
    /// One of several addresses or closures.
    ///
    /// Always contains at least two elements, which are sorted and unique.
    /// A `Warm` is never in the same set as the `ThisRef` of its class, because it is subsumed by it.
    RefSet(Vec<Value>),
}

impl Value {
    pub fn is_hot(&self) -> bool {
        matches!(self, Value::Hot)
    }

    /// Returns the address if this value is an object in the heap
    pub fn as_addr(&self) -> Option<Addr> {
        match self {
            Value::ThisRef(class) => Some(Addr::ThisRef(*class)),
            Value::Warm(warm) => Some(Addr::Warm(*warm)),
            _ => None,
        }
    }

    /// Computes the least upper bound of two values
    pub fn join(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Hot, value) | (value, Value::Hot) => value.clone(),
            (Value::Cold, _) | (_, Value::Cold) => Value::Cold,
            (a, b) if a == b => a.clone(),
            (Value::RefSet(refs), value) | (value, Value::RefSet(refs)) => {
                let mut all = refs.clone();
                match value {
                    Value::RefSet(others) => all.extend(others.iter().cloned()),
                    value => all.push(value.clone()),
                }
                Value::ref_set(all)
            }
            (a, b) => Value::ref_set(vec![a.clone(), b.clone()]),
        }
    }

    /// Joins every value, an empty iterator joins to `Hot`
    pub fn join_all<'a>(values: impl IntoIterator<Item = &'a Value>) -> Value {
        values
            .into_iter()
            .fold(Value::Hot, |acc, value| acc.join(value))
    }

    /// Collapses addresses and closures to `Cold`
    ///
    /// Used wherever a value is stored in a place where unbounded precision
    /// would break termination, like constructor arguments.
    pub fn widen(&self) -> Value {
        match self {
            Value::Hot => Value::Hot,
            Value::Cold | Value::ThisRef(_) | Value::Warm(_) | Value::Fun(_) => Value::Cold,
            Value::RefSet(refs) => Value::join_all(refs.iter().map(Value::widen).collect_vec().iter()),
        }
    }

    pub fn widen_all<'a>(values: impl IntoIterator<Item = &'a Value>) -> Vec<Value> {
        values.into_iter().map(Value::widen).collect()
    }

    /// Normalizes a list of addresses and closures into a value
    fn ref_set(mut refs: Vec<Value>) -> Value {
        refs.sort();
        refs.dedup();
        let this_refs = refs
            .iter()
            .filter_map(|value| match value {
                Value::ThisRef(class) => Some(*class),
                _ => None,
            })
            .collect_vec();
        refs.retain(|value| !matches!(value, Value::Warm(warm) if this_refs.contains(&warm.class)));

        if refs.len() == 1 {
            refs.pop().unwrap_or(Value::Hot)
        } else {
            Value::RefSet(refs)
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Hot => write!(f, "Hot"),
            Value::Cold => write!(f, "Cold"),
            Value::ThisRef(class) => write!(f, "ThisRef[{class:?}]"),
            Value::Warm(warm) => write!(f, "Warm[{:?}, warm#{}]", warm.class, warm.id.0),
            Value::Fun(fun) => write!(f, "Fun[{:?}, this = {}]", fun.body, fun.this),
            Value::RefSet(refs) => write!(f, "Set{{{}}}", refs.iter().join(", ")),
        }
    }
}
