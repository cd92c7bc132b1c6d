//! Kind-specific wrappers around [`StoreClient`](crate::framework::StoreClient).

pub mod address_client;
pub mod document_client;
pub mod food_client;
pub mod garnish_client;
pub mod order_client;
pub mod user_client;

pub use address_client::*;
pub use document_client::*;
pub use food_client::*;
pub use garnish_client::*;
pub use order_client::*;
pub use user_client::*;
