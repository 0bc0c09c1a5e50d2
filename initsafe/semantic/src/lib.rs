//! The semantic core of the initialization checker
//!
//! An abstract interpreter which evaluates the constructor of a class with an abstract domain
//! of initialization states (see [`Value`]) and reports every place where an object under
//! construction is used in an unsafe way.
//!
//! The interpreter is single pass: cycles are broken by the evaluation cache, which returns
//! `Hot` for an expression whose evaluation is still in progress. The heap is monotonic,
//! so revisiting an object never loses information.

#[macro_use]
mod logger;

pub mod cache;
mod call;
mod checker;
pub mod env;
mod eval;
pub mod heap;
mod instantiate;
mod interpreter;
pub mod outcome;
mod promotion;
pub mod promoted;
mod select;
mod template;
mod this_resolution;
pub mod value;

pub use checker::{check_class, check_program, is_checked_class, CheckResult};
pub use interpreter::{ArgInfo, Interpreter};
pub use outcome::Outcome;
pub use value::{Addr, Value};
