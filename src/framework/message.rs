//! # Store Messages
//!
//! Requests carried from [`StoreClient`](crate::framework::StoreClient) to
//! [`StoreActor`](crate::framework::StoreActor).
//!
//! # Job-Oriented Requests
//! Instead of one message variant per CRUD verb, a request carries a job: a boxed
//! closure the actor runs against a [`Session`]. The client builds the job around
//! the caller's closure and a typed oneshot responder, so the actor itself never
//! needs to know the result type.
//!
//! - **Transaction**: runs against a staged copy; the returned [`Outcome`] decides
//!   whether the copy replaces the live database.
//! - **Read**: runs against the live database and cannot write.

use crate::framework::session::Session;
use std::fmt;

pub type TransactionJob = Box<dyn FnOnce(&mut Session<'_>) -> Outcome + Send>;

pub type ReadJob = Box<dyn FnOnce(&Session<'_>) + Send>;

/// What the actor does with a transaction's staged writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Commit,
    Abort(String),
}

pub enum StoreRequest {
    Transaction {
        label: &'static str,
        job: TransactionJob,
    },
    Read {
        label: &'static str,
        job: ReadJob,
    },
}

impl StoreRequest {
    pub fn label(&self) -> &'static str {
        match self {
            StoreRequest::Transaction { label, .. } | StoreRequest::Read { label, .. } => label,
        }
    }
}

impl fmt::Debug for StoreRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreRequest::Transaction { label, .. } => {
                f.debug_struct("Transaction").field("label", label).finish()
            }
            StoreRequest::Read { label, .. } => {
                f.debug_struct("Read").field("label", label).finish()
            }
        }
    }
}
