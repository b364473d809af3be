//! Coordinator client contract.
//!
//! Share results are published with a single `put`; nothing in the share
//! flow reads them back. [`EtcdClient`] talks to etcd's v3 JSON gateway,
//! [`InMemoryCoordinator`] keeps entries in process.

mod etcd;
mod memory;

pub use etcd::{DEFAULT_ENDPOINT, EtcdClient};
pub use memory::InMemoryCoordinator;

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`Coordinator`] methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors produced by coordinator clients.
#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("coordinator error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("coordinator unavailable: {0}")]
    Unavailable(String),
}

/// Write access to the distributed key-value store.
///
/// Writes are last-write-wins; no revision checks are made.
pub trait Coordinator: Send + Sync {
    fn put<'a>(&'a self, key: &'a str, value: &'a str)
    -> BoxFuture<'a, Result<(), CoordinatorError>>;
}
