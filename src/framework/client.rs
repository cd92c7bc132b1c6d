//! # Store Client
//!
//! The cloneable handle every component receives at construction. It wraps the
//! caller's closure into a job, ships it to the actor and waits for the typed reply.

use crate::framework::document::Document;
use crate::framework::error::StoreError;
use crate::framework::message::{Outcome, ReadJob, StoreRequest, TransactionJob};
use crate::framework::query::{Filter, FindOptions};
use crate::framework::session::Session;
use crate::model::UserId;
use std::fmt::Display;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// ## StoreClient
///
/// Holds only a sender and the request timeout, so cloning is inexpensive.
///
/// * **Transactions** – [`StoreClient::transaction`] commits when the closure
///   returns `Ok` and rolls back when it returns `Err`.
/// * **Timeouts** – every request, including the wait for channel capacity, is
///   bounded by the configured timeout. A timed-out caller closes its responder and
///   the actor aborts the transaction instead of committing it. A reply that was
///   already sent when the timeout fired is returned instead of `Timeout`.
#[derive(Clone, Debug)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
    timeout: Duration,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>, timeout: Duration) -> Self {
        Self { sender, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs `f` atomically. Every write it makes is kept only if it returns `Ok`.
    pub async fn transaction<R, E, F>(&self, label: &'static str, f: F) -> Result<R, E>
    where
        F: FnOnce(&mut Session<'_>) -> Result<R, E> + Send + 'static,
        R: Send + 'static,
        E: From<StoreError> + Display + Send + 'static,
    {
        let (respond_to, response) = oneshot::channel();
        let job: TransactionJob = Box::new(move |session: &mut Session<'_>| {
            match f(session) {
                // Commit only once the reply is in the caller's hands.
                Ok(value) => match respond_to.send(Ok(value)) {
                    Ok(()) => Outcome::Commit,
                    Err(_) => Outcome::Abort("caller went away".to_string()),
                },
                Err(e) => {
                    let reason = e.to_string();
                    let _ = respond_to.send(Err(e));
                    Outcome::Abort(reason)
                }
            }
        });
        self.dispatch(StoreRequest::Transaction { label, job }, response)
            .await
    }

    /// Runs `f` against the live database without the ability to write.
    pub async fn read<R, E, F>(&self, label: &'static str, f: F) -> Result<R, E>
    where
        F: FnOnce(&Session<'_>) -> Result<R, E> + Send + 'static,
        R: Send + 'static,
        E: From<StoreError> + Send + 'static,
    {
        let (respond_to, response) = oneshot::channel();
        let job: ReadJob = Box::new(move |session: &Session<'_>| {
            let _ = respond_to.send(f(session));
        });
        self.dispatch(StoreRequest::Read { label, job }, response)
            .await
    }

    async fn dispatch<R, E>(
        &self,
        request: StoreRequest,
        mut response: oneshot::Receiver<Result<R, E>>,
    ) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let exchange = async {
            self.sender
                .send(request)
                .await
                .map_err(|_| StoreError::ActorClosed)?;
            (&mut response)
                .await
                .map_err(|_| StoreError::ActorDropped)
        };
        let outcome = tokio::time::timeout(self.timeout, exchange).await;
        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(E::from(e)),
            Err(_) => {
                // Closing first means the actor either already replied, and has
                // committed, or will see the send fail and abort.
                response.close();
                match response.try_recv() {
                    Ok(result) => result,
                    Err(_) => Err(E::from(StoreError::Timeout(self.timeout))),
                }
            }
        }
    }

    pub async fn insert<T: Document>(
        &self,
        params: T::Create,
        created_by: Option<UserId>,
    ) -> Result<T, StoreError> {
        self.transaction("insert", move |session| {
            session.insert::<T>(params, created_by)
        })
        .await
    }

    pub async fn find_by_id<T: Document>(&self, id: T::Id) -> Result<T, StoreError> {
        self.read("find_by_id", move |session| session.find_by_id::<T>(&id))
            .await
    }

    pub async fn find_one<T: Document>(&self, filter: Filter<T>) -> Result<T, StoreError> {
        self.read("find_one", move |session| session.find_one(&filter))
            .await
    }

    pub async fn find_many<T: Document>(
        &self,
        filter: Filter<T>,
        options: FindOptions<T>,
    ) -> Result<Vec<T>, StoreError> {
        self.read("find_many", move |session| {
            Ok(session.find_many(&filter, &options))
        })
        .await
    }

    pub async fn count<T: Document>(&self, filter: Filter<T>) -> Result<usize, StoreError> {
        self.read("count", move |session| Ok(session.count(&filter)))
            .await
    }
}
