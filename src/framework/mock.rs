//! # Mock Store & Testing Guide
//!
//! Two ways to test code that talks to the store without a real [`StoreActor`]:
//!
//! | Tool | State | Use Case |
//! |------|-------|----------|
//! | [`create_mock_client`] | None, you answer each request | Asserting which requests a client sends |
//! | [`MockStore`] | Seeded [`Database`] | Running real jobs while injecting store failures |
//!
//! ## Failure Injection
//!
//! ```rust
//! use food_catalog::framework::mock::MockStore;
//! use food_catalog::framework::{Database, Filter, StoreError};
//! use food_catalog::model::Food;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockStore::new(Database::new());
//!     mock.expect("count").drop_request();
//!
//!     let result = mock.client().count(Filter::<Food>::all()).await;
//!     assert_eq!(result, Err(StoreError::ActorDropped));
//!     mock.verify();
//! }
//! ```
//!
//! [`StoreActor`]: crate::framework::StoreActor

use crate::framework::actor::execute;
use crate::framework::client::StoreClient;
use crate::framework::message::{ReadJob, StoreRequest, TransactionJob};
use crate::framework::store::Database;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

const MOCK_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reply {
    Serve,
    Drop,
}

#[derive(Debug)]
struct Expectation {
    label: &'static str,
    reply: Reply,
}

type Shared<T> = Arc<Mutex<T>>;

/// A store double that runs real jobs against an in-memory [`Database`].
///
/// Requests are served in order. Scripted expectations are matched against the
/// request label; a mismatch panics the mock task, which callers observe as
/// `StoreError::ActorDropped`.
pub struct MockStore {
    client: StoreClient,
    expectations: Shared<VecDeque<Expectation>>,
    seen: Shared<Vec<&'static str>>,
    db: Shared<Database>,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockStore {
    pub fn new(db: Database) -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest>(100);
        let expectations: Shared<VecDeque<Expectation>> = Arc::default();
        let seen: Shared<Vec<&'static str>> = Arc::default();
        let db = Arc::new(Mutex::new(db));

        let (exps, log, state) = (expectations.clone(), seen.clone(), db.clone());
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let label = request.label();
                log.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(label);
                let expectation = exps
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();

                let reply = match expectation {
                    None => Reply::Serve,
                    Some(exp) if exp.label == label => exp.reply,
                    Some(exp) => panic!("Expected request {:?}, got {:?}", exp.label, label),
                };
                match reply {
                    Reply::Serve => {
                        let mut db = state.lock().unwrap_or_else(PoisonError::into_inner);
                        execute(&mut db, request);
                    }
                    Reply::Drop => debug!(label, "Dropping request"),
                }
            }
        });

        Self {
            client: StoreClient::new(sender, MOCK_TIMEOUT),
            expectations,
            seen,
            db,
            _handle: handle,
        }
    }

    pub fn client(&self) -> StoreClient {
        self.client.clone()
    }

    /// Expects the next request to carry `label`.
    pub fn expect(&self, label: &'static str) -> ExpectationBuilder {
        ExpectationBuilder {
            label,
            expectations: self.expectations.clone(),
        }
    }

    /// Labels of every request received so far, in arrival order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// A copy of the current database state.
    pub fn snapshot(&self) -> Database {
        self.db
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for a scripted request.
pub struct ExpectationBuilder {
    label: &'static str,
    expectations: Shared<VecDeque<Expectation>>,
}

impl ExpectationBuilder {
    /// Runs the request normally.
    pub fn serve(self) {
        self.push(Reply::Serve);
    }

    /// Discards the request unanswered, as a crashed store would.
    pub fn drop_request(self) {
        self.push(Reply::Drop);
    }

    fn push(self, reply: Reply) {
        self.expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Expectation {
                label: self.label,
                reply,
            });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver the test controls.
///
/// Nothing answers the requests unless the test does, so this is the tool for
/// asserting what a component sends and for simulating a stalled store.
pub fn create_mock_client(
    buffer_size: usize,
    timeout: Duration,
) -> (StoreClient, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender, timeout), receiver)
}

/// Helper to verify that the next message is a Transaction request
pub async fn expect_transaction(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(&'static str, TransactionJob)> {
    match receiver.recv().await {
        Some(StoreRequest::Transaction { label, job }) => Some((label, job)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Read request
pub async fn expect_read(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(&'static str, ReadJob)> {
    match receiver.recv().await {
        Some(StoreRequest::Read { label, job }) => Some((label, job)),
        _ => None,
    }
}
