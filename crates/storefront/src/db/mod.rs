//! Repositories over the key-value store.
//!
//! Every persisted record is wrapped in a schema-versioned envelope. A value
//! that fails to parse, or that carries a different schema version, is logged
//! and discarded on read - stale or corrupt persistence is recovered by
//! treating the key as empty, never by crashing the flow.
//!
//! ## Keys
//!
//! - `users` - the full account directory ([`users::UserDirectory`])
//! - `orders_<user_id>` - one order list per user ([`orders::OrderRepository`])
//! - `cart` / `user` - session state (owned by [`crate::session::Session`])

pub mod orders;
pub mod users;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kv::KeyValue;

/// Errors from repository operations.
///
/// Corruption never surfaces here: unreadable values are discarded on read.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A record could not be serialized for storage.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Schema-versioned wrapper around every persisted value.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    schema: u32,
    data: T,
}

/// Read a versioned record, recovering from corruption by discarding it.
///
/// Returns `None` when the key is absent, unparsable, or written with a
/// different schema version. In the latter two cases the key is deleted so
/// the bad value is not re-read forever.
pub(crate) fn read_record<T: DeserializeOwned>(
    store: &impl KeyValue,
    key: &str,
    schema: u32,
) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str::<Envelope<T>>(&raw) {
        Ok(envelope) if envelope.schema == schema => Some(envelope.data),
        Ok(envelope) => {
            tracing::warn!(
                key,
                found = envelope.schema,
                expected = schema,
                "discarding record with unexpected schema version"
            );
            store.remove(key);
            None
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unparsable record");
            store.remove(key);
            None
        }
    }
}

/// Write a versioned record.
pub(crate) fn write_record<T: Serialize>(
    store: &impl KeyValue,
    key: &str,
    schema: u32,
    data: &T,
) -> Result<(), RepositoryError> {
    let raw = serde_json::to_string(&Envelope { schema, data })?;
    store.set(key, &raw);
    Ok(())
}
