//! # Food Catalog
//!
//! > **Catalog relationships and order pricing on top of an actor-backed store.**
//!
//! Foods carry ordered lists of Toppings and Fillings. Orders price a selection
//! from that graph once, at creation, and keep the total as a snapshot. Every
//! entity is soft-deleted rather than removed, and deleting a Topping or Filling
//! cascades into every Food that lists it.
//!
//! ## Core Concepts
//!
//! ### One store, many clients
//! A single [`StoreActor`](framework::StoreActor) owns every collection and runs one
//! job at a time. Components receive a cloned [`StoreClient`](framework::StoreClient)
//! at construction; there is no global state.
//!
//! ### Transactions are closures
//! `StoreClient::transaction` ships a closure to the actor, which runs it against a
//! staged copy of the database. `Ok` swaps the copy in, `Err` throws it away. That
//! is the whole atomicity story: a cascade touching twenty Foods either lands
//! completely or not at all.
//!
//! ### Soft-delete is the default view
//! Every [`Filter`](framework::Filter) is active-only unless it opts in with
//! `include_deleted()`, so read paths cannot forget to hide deleted documents.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: Document storage, transactions, timeouts and test doubles.
//! - **Key items**: [`Document`](framework::Document), [`Session`](framework::Session).
//!
//! ### 2. The Rules ([`soft_delete`], [`association`], [`pricing`], [`listing`])
//! - **Role**: Session-level operations that compose inside one transaction.
//!
//! ### 3. The Interface ([`clients`])
//! - **Role**: Async, kind-specific clients built on the rules.
//! - **Key items**: [`FoodClient`](clients::FoodClient),
//!   [`ToppingClient`](clients::ToppingClient), [`OrderClient`](clients::OrderClient).
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! - **Role**: Spawns the store, wires the clients, loads config, shuts down.
//! - **Key items**: [`CatalogSystem`](lifecycle::CatalogSystem).
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod association;
pub mod clients;
pub mod error;
pub mod framework;
pub mod lifecycle;
pub mod listing;
pub mod model;
pub mod pricing;
pub mod soft_delete;

pub use error::CatalogError;
