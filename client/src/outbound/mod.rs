//! Driven adapters: implementations of the domain ports against real
//! infrastructure (the remote HTTP API and the local filesystem).

pub mod api;
pub mod storage;
