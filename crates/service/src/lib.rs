//! Service layer for the todo API.
//! - `todo` holds the document model and the `TodoStore` operations.
//! - `storage` holds the persistence port and its file/in-memory backends.

pub mod errors;
pub mod storage;
pub mod todo;
