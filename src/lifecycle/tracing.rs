//! # Observability & Tracing
//!
//! This module provides the tracing setup for the catalog.
//!
//! ## Overview
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter whose level
//! comes from `RUST_LOG`. Module paths are hidden (`with_target(false)`); events
//! carry structured fields such as `kind`, `label` and `id` instead.
//!
//! ## What Gets Traced
//!
//! - **Store lifecycle**: startup and shutdown with collection sizes
//! - **Transactions**: `Committed` (info) with the label and write count, `Aborted`
//!   (warn) with the reason
//! - **Client calls**: one span per call via `#[instrument]`, with a debug event on entry
//!
//! ## Usage Examples
//!
//! ```bash
//! # Commits and aborts only
//! RUST_LOG=info cargo run
//!
//! # Every insert/update inside each transaction
//! RUST_LOG=debug cargo run
//!
//! # Store internals only
//! RUST_LOG=food_catalog::framework=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! Creating the demo order with `RUST_LOG=info`:
//!
//! ```text
//! INFO Store started foods=0 orders=0
//! INFO Committed label="insert" writes=1
//! INFO Committed label="create_for_food" writes=2
//! INFO Committed label="create_order" writes=1
//! INFO order_processing:create_order: Order created order=order_1 total=34.00
//! ```
//!
//! A failing transaction shows up as a warning and leaves no writes behind:
//!
//! ```text
//! WARN Aborted label="create_order" writes=0 reason=Not found: Food not found: food_1
//! ```

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
