//! Resolved tree model
//!
//! This is the representation the initialization checker consumes from the front end
//! of the host language: already resolved expression trees, symbols with flags
//! and class metadata including the linearization order.
//! The crate does not parse anything, programs are constructed with the [`ProgramBuilder`].

mod builder;
pub mod class;
mod program;
pub mod symbol;
pub mod tree_nodes;
pub mod types;

pub use builder::{ClassOwner, ProgramBuilder};
pub use program::Program;

use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub struct $name(pub(crate) u32);

        impl $name {
            pub(crate) fn new(index: usize) -> Self {
                $name(u32::try_from(index).expect("Too many items"))
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Identifies a class, trait, object or package
    ClassId,
    "class#"
);
id_type!(
    /// Identifies a field, method, constructor, parameter or local
    SymbolId,
    "sym#"
);
id_type!(
    /// Identifies an expression node
    ExprId,
    "expr#"
);
