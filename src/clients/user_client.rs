use crate::clients::DocumentClient;
use crate::error::CatalogError;
use crate::framework::StoreClient;
use crate::model::{User, UserCreate};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the user records that ownership fields point at.
///
/// Registration rules and credentials live outside the catalog; this only seeds
/// and reads records.
#[derive(Clone, Debug)]
pub struct UserClient {
    store: StoreClient,
}

impl UserClient {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn create_user(&self, user: UserCreate) -> Result<User, CatalogError> {
        debug!("Sending request");
        if user.username.trim().is_empty() || user.email.trim().is_empty() {
            return Err(CatalogError::bad_request("username and email are required"));
        }
        Ok(self.store.insert(user, None).await?)
    }
}

#[async_trait]
impl DocumentClient<User> for UserClient {
    fn store(&self) -> &StoreClient {
        &self.store
    }
}
