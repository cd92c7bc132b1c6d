//! # Store Actor
//!
//! This module defines the `StoreActor`, the single owner of the catalog's
//! persisted state. It is the "Server" side of the actor model: requests arrive
//! on an mpsc channel and are processed one at a time.
//!
//! # Architecture Note
//! Because the actor runs one job to completion before receiving the next,
//! transactions are serializable without any `Mutex` or `RwLock`. Two requests that
//! touch the same Food can never interleave.
//!
//! ## Operations
//!
//! * **Transaction**:
//!     1. Clones the live database into a staged copy.
//!     2. Runs the job against a session over the copy.
//!     3. On `Outcome::Commit` swaps the copy in; on `Outcome::Abort` drops it.
//!
//! * **Read**:
//!     1. Runs the job against a session over the live database.

use crate::framework::client::StoreClient;
use crate::framework::message::{Outcome, StoreRequest};
use crate::framework::session::Session;
use crate::framework::store::Database;
use crate::lifecycle::StoreConfig;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    db: Database,
}

impl StoreActor {
    /// Creates an empty store and the client used to reach it.
    ///
    /// The actor does nothing until [`StoreActor::run`] is spawned.
    pub fn new(config: &StoreConfig) -> (Self, StoreClient) {
        Self::with_database(Database::new(), config)
    }

    /// Creates a store pre-loaded with `db`.
    pub fn with_database(db: Database, config: &StoreConfig) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(config.buffer_size);
        let actor = Self { receiver, db };
        let client = StoreClient::new(sender, config.request_timeout());
        (actor, client)
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self) {
        info!(
            foods = self.db.foods.len(),
            orders = self.db.orders.len(),
            "Store started"
        );

        while let Some(request) = self.receiver.recv().await {
            execute(&mut self.db, request);
        }

        info!(
            foods = self.db.foods.len(),
            toppings = self.db.toppings.len(),
            fillings = self.db.fillings.len(),
            orders = self.db.orders.len(),
            "Shutdown"
        );
    }
}

/// Applies one request to `db` with commit/abort semantics.
pub(crate) fn execute(db: &mut Database, request: StoreRequest) {
    match request {
        StoreRequest::Read { label, job } => {
            debug!(label, "Read");
            job(&Session::new(db));
        }
        StoreRequest::Transaction { label, job } => {
            debug!(label, "Begin");
            let mut staged = db.clone();
            let mut session = Session::new(&mut staged);
            let outcome = job(&mut session);
            let writes = session.writes();
            match outcome {
                Outcome::Commit => {
                    *db = staged;
                    info!(label, writes, "Committed");
                }
                Outcome::Abort(reason) => {
                    warn!(label, writes, %reason, "Aborted");
                }
            }
        }
    }
}
