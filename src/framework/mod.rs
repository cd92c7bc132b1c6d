//! Actor-backed document store.
//!
//! This module provides the building blocks every catalog component sits on: a
//! single actor owning all collections, a cloneable client, and a synchronous
//! session API that jobs use inside a transaction.
//!
//! # Main Components
//!
//! - [`Document`] - Trait that stored kinds implement to be managed by the store
//! - [`StoreActor`] - The actor that owns the [`Database`] and runs jobs
//! - [`StoreClient`] - Cloneable handle with `transaction` and `read`
//! - [`Session`] - insert / find / update API used inside jobs
//! - [`Filter`] - Active-only document selection with an include-deleted opt-in
//! - [`StoreError`] - Framework error type
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning the actor.

pub mod actor;
pub mod client;
pub mod document;
pub mod error;
pub mod message;
pub mod mock;
pub mod query;
pub mod session;
pub mod store;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use document::{Document, Kind};
pub use error::StoreError;
pub use message::{Outcome, ReadJob, StoreRequest, TransactionJob};
pub use query::{Filter, FindOptions, Scope, Sort};
pub use session::Session;
pub use store::{Collection, Database};
