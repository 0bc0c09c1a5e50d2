//! Initialization safety checker
//!
//! Proves, without running the program, that no object is used in an unsafe way while it is
//! still under construction: fields are not read before they are written and `this` does not
//! escape to code which could observe the missing fields.
//!
//! The checker consumes resolved trees from the [`tree`] crate, the abstract interpreter lives
//! in [`semantic`]. Use [`CheckConfig`] to check a program and render the errors.

pub use initsafe_common as common;
pub use initsafe_error as error;
pub use initsafe_semantic as semantic;
pub use initsafe_tree as tree;

mod check_config;
pub use check_config::{CheckConfig, CheckOutput};
