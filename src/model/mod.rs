//! Stored kinds and the value types they are built from.
//!
//! Every struct here implements [`Document`](crate::framework::Document) so the
//! store can manage it.

pub mod address;
pub mod audit;
pub mod food;
pub mod garnish;
pub mod ids;
pub mod money;
pub mod order;
pub mod user;

pub use address::*;
pub use audit::*;
pub use food::*;
pub use garnish::*;
pub use ids::*;
pub use money::*;
pub use order::*;
pub use user::*;
