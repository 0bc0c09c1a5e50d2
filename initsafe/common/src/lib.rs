//! Common items shared by the tree model, the semantic core and the diagnostics

mod ident;
pub use ident::Ident;

mod span;
pub use span::Span;

mod input_file;
pub use input_file::{Code, CodeId, CodeRef, InputFiles};

mod compile_context;
pub use compile_context::CompileContext;

mod config;
pub use config::Config;

use indexmap::IndexSet;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;

pub type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;
