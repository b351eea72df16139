//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the remote complaints API and the persisted session store). Each trait
//! exposes strongly typed errors so adapters map their failures into
//! predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod complaints_api;
mod session_storage;

#[cfg(test)]
pub use complaints_api::MockComplaintsApi;
pub use complaints_api::{ComplaintPayload, ComplaintsApi, ComplaintsApiError};
#[cfg(test)]
pub use session_storage::MockSessionStorage;
pub use session_storage::{
    InMemorySessionStorage, SessionKey, SessionStorage, SessionStorageError,
};
