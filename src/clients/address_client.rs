use crate::clients::DocumentClient;
use crate::error::CatalogError;
use crate::framework::{Filter, Session, StoreClient};
use crate::listing::{contains_ignore_case, paginate, ListQuery, Page};
use crate::model::{Actor, Address, AddressCreate, AddressId, AddressUpdate, User};
use crate::soft_delete;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Optional restrictions for [`AddressClient::list`]. All matches are
/// case-insensitive substrings; `search` looks at both city and country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSearch {
    pub city: Option<String>,
    pub country: Option<String>,
    pub search: Option<String>,
}

/// Client for delivery addresses.
///
/// Only an admin or the address's creator may update or delete it.
#[derive(Clone, Debug)]
pub struct AddressClient {
    store: StoreClient,
}

impl AddressClient {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// Stores the address and appends it to the acting user's address list.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        actor: Actor,
        params: AddressCreate,
    ) -> Result<Address, CatalogError> {
        debug!("Sending request");
        let missing = params.missing_fields();
        if !missing.is_empty() {
            return Err(CatalogError::bad_request(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
        self.store
            .transaction("create_address", move |session| {
                let address = session.insert::<Address>(params, Some(actor.id.clone()))?;
                let owners = session.update_many(&Filter::<User>::by_id(&actor.id), |user| {
                    user.addresses.push(address.id.clone())
                })?;
                if owners == 0 {
                    warn!(user = %actor.id, "Acting user has no stored record");
                }
                Ok::<_, CatalogError>(address)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        actor: Actor,
        id: AddressId,
        update: AddressUpdate,
    ) -> Result<Address, CatalogError> {
        debug!("Sending request");
        if update.is_empty() {
            return Err(CatalogError::bad_request(
                "at least one field is required to update an address",
            ));
        }
        self.store
            .transaction("update_address", move |session| {
                authorize(session, &actor, &id)?;
                Ok(session.update_one(&Filter::<Address>::by_id(&id), |address| {
                    address.apply(update);
                    address.audit.touch(Some(actor.id));
                })?)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        search: AddressSearch,
        query: ListQuery,
    ) -> Result<Page<Address>, CatalogError> {
        debug!("Sending request");
        self.store
            .read("list_addresses", move |session| {
                let AddressSearch {
                    city,
                    country,
                    search,
                } = search;
                let filter = Filter::<Address>::all()
                    .and(move |a: &Address| {
                        city.as_deref()
                            .map_or(true, |c| contains_ignore_case(&a.city, c))
                    })
                    .and(move |a: &Address| {
                        country
                            .as_deref()
                            .map_or(true, |c| contains_ignore_case(&a.country, c))
                    })
                    .and(move |a: &Address| {
                        search.as_deref().map_or(true, |s| {
                            contains_ignore_case(&a.city, s) || contains_ignore_case(&a.country, s)
                        })
                    });
                paginate(session, filter, &query)
            })
            .await
    }
}

#[async_trait]
impl DocumentClient<Address> for AddressClient {
    fn store(&self) -> &StoreClient {
        &self.store
    }

    /// Soft-deletes the address if `actor` is an admin or its creator.
    async fn delete(&self, id: AddressId, actor: Actor) -> Result<Address, CatalogError> {
        debug!(%id, "Sending request");
        self.store
            .transaction("delete_address", move |session| {
                authorize(session, &actor, &id)?;
                soft_delete::mark_deleted::<Address>(session, &id, &actor.id)
            })
            .await
    }
}

fn authorize(session: &Session<'_>, actor: &Actor, id: &AddressId) -> Result<(), CatalogError> {
    let address = session.find_by_id::<Address>(id)?;
    if !actor.may_modify(address.audit.created_by.as_ref()) {
        return Err(CatalogError::Unauthorized(format!(
            "{} may not modify address {id}",
            actor.id
        )));
    }
    Ok(())
}
