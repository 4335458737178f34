//! Flow Persistence Boundary
//!
//! The engine mirrors the flow document to a store opportunistically and
//! never blocks on save completion. Both operations are best-effort by
//! contract; callers are free to fire-and-forget.

pub mod api;
pub mod errors;
pub mod fs;

pub use api::{FlowStore, InMemoryFlowStore};
pub use errors::StoreError;
pub use fs::JsonFileStore;
