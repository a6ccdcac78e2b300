//! Store-facing primitives: value-type tags, the keyspace access trait and
//! the Redis-backed implementation.

use std::fmt;

use thiserror::Error;
use tracing::debug;

/// Errors surfaced by a keyspace store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connecting to the store failed or an established connection dropped.
    #[error("store connection failed: {0}")]
    Connection(String),
    /// The store rejected or failed an individual command.
    #[error("store command failed: {0}")]
    Command(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_connection_dropped() || err.is_timeout() {
            StoreError::Connection(err.to_string())
        } else {
            StoreError::Command(err.to_string())
        }
    }
}

/// Classification of a key's stored structure as reported by the store.
///
/// Tags outside the built-in set (module data types define their own) are
/// preserved verbatim in [`ValueType::Other`] so they still get their own
/// bucket and report section.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    List,
    Set,
    ZSet,
    Hash,
    Stream,
    Other(String),
}

impl ValueType {
    /// Parses a `TYPE` reply tag. Returns `None` for the store's `"none"`
    /// tag, which marks a key that no longer exists.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "none" => None,
            "string" => Some(Self::String),
            "list" => Some(Self::List),
            "set" => Some(Self::Set),
            "zset" => Some(Self::ZSet),
            "hash" => Some(Self::Hash),
            "stream" => Some(Self::Stream),
            other => Some(Self::Other(other.to_string())),
        }
    }

    /// The tag string as the store reports it.
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::List => "list",
            Self::Set => "set",
            Self::ZSet => "zset",
            Self::Hash => "hash",
            Self::Stream => "stream",
            Self::Other(tag) => tag,
        }
    }

    /// Position of this type in report display order. Unknown tags sort
    /// after the built-in types, alphabetically among themselves.
    pub(crate) fn display_rank(&self) -> usize {
        match self {
            Self::String => 0,
            Self::List => 1,
            Self::Set => 2,
            Self::ZSet => 3,
            Self::Hash => 4,
            Self::Stream => 5,
            Self::Other(_) => 6,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page of a cursor-driven keyspace enumeration.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanPage {
    /// Continuation token; zero means the pass is complete.
    pub cursor: u64,
    /// Key names returned for this page.
    pub keys: Vec<String>,
}

/// Read-only access to a running key-value store's keyspace.
///
/// The enumeration contract is the store's cursor guarantee: starting from
/// cursor zero and following returned cursors until zero comes back visits
/// every key that exists for the full duration of the pass at least once.
/// Keys deleted and re-created mid-pass may be missed.
pub trait KeyspaceStore {
    /// Fetches the next page of key names.
    fn scan_page(&mut self, cursor: u64, count_hint: usize) -> Result<ScanPage, StoreError>;

    /// Approximate resident memory for a key, `None` when the store cannot
    /// attribute any (typically a key that vanished mid-query).
    fn memory_usage(&mut self, key: &str) -> Result<Option<u64>, StoreError>;

    /// The key's value-type tag, `None` when the key no longer exists.
    fn value_type(&mut self, key: &str) -> Result<Option<ValueType>, StoreError>;
}

/// [`KeyspaceStore`] backed by a blocking Redis connection.
pub struct RedisStore {
    connection: redis::Connection,
}

impl RedisStore {
    /// Opens a blocking connection to `host:port`.
    pub fn connect(host: &str, port: u16) -> Result<Self, StoreError> {
        let url = format!("redis://{host}:{port}/");
        let client = redis::Client::open(url.as_str())
            .map_err(|err| StoreError::Connection(format!("{host}:{port}: {err}")))?;
        let connection = client
            .get_connection()
            .map_err(|err| StoreError::Connection(format!("{host}:{port}: {err}")))?;
        debug!(host, port, "connected to store");
        Ok(Self { connection })
    }
}

impl KeyspaceStore for RedisStore {
    fn scan_page(&mut self, cursor: u64, count_hint: usize) -> Result<ScanPage, StoreError> {
        let (cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("COUNT")
            .arg(count_hint)
            .query(&mut self.connection)?;
        Ok(ScanPage { cursor, keys })
    }

    fn memory_usage(&mut self, key: &str) -> Result<Option<u64>, StoreError> {
        let bytes: Option<u64> = redis::cmd("MEMORY")
            .arg("USAGE")
            .arg(key)
            .query(&mut self.connection)?;
        Ok(bytes)
    }

    fn value_type(&mut self, key: &str) -> Result<Option<ValueType>, StoreError> {
        let tag: String = redis::cmd("TYPE").arg(key).query(&mut self.connection)?;
        Ok(ValueType::from_tag(&tag))
    }
}

#[cfg(test)]
mod tests;
