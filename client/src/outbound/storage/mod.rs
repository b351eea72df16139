//! File-backed adapter for the persisted session store.

mod file_store;

pub use file_store::FileSessionStorage;
