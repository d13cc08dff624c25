//! Per-user todo lists kept in a single JSON document.

pub mod domain;
pub mod store;

pub use domain::{Document, Task, User};
pub use store::TodoStore;
