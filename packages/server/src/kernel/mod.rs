//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod stores;
pub mod traits;

pub use deps::ServerDeps;
pub use stores::{
    connect_store, MemoryStore, PostgresStore, SqliteStore, StoreError, StoreResult,
};
pub use traits::*;
