//! Driving adapters: entry points that invoke the domain services.

pub mod cli;
