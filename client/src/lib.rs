//! Complaints desk client.
//!
//! A command-line client for a complaints-tracking service, structured
//! hexagonally: pure domain services in [`domain`], driven adapters for the
//! remote HTTP API and the persisted session files in [`outbound`], and the
//! CLI driving adapter in [`inbound`].

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
