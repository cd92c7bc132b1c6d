use crate::clients::DocumentClient;
use crate::error::CatalogError;
use crate::framework::{Filter, StoreClient};
use crate::listing::{paginate, ListQuery, Page};
use crate::model::{Actor, LineItem, Order, OrderCreate, OrderStatus, UserId};
use crate::pricing::{self, Quote};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Optional restrictions for [`OrderClient::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub ordered_by: Option<UserId>,
}

/// Client for the order lifecycle.
///
/// An order's total is computed once, inside the transaction that inserts it, from
/// the prices current at that moment. Later price changes never reach it.
#[derive(Clone, Debug)]
pub struct OrderClient {
    store: StoreClient,
}

impl OrderClient {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    #[instrument(skip(self, items), fields(lines = items.len(), user = %actor.id))]
    pub async fn create_order(
        &self,
        items: Vec<LineItem>,
        actor: Actor,
    ) -> Result<Order, CatalogError> {
        debug!(?items, "create_order called");
        if items.is_empty() {
            return Err(CatalogError::bad_request(
                "an order needs at least one item",
            ));
        }
        let order = self
            .store
            .transaction("create_order", move |session| {
                let quote = pricing::quote(session, &items)?;
                let order = session.insert::<Order>(
                    OrderCreate {
                        ordered_by: actor.id.clone(),
                        items,
                        total_amount: quote.total,
                    },
                    Some(actor.id),
                )?;
                Ok::<_, CatalogError>(order)
            })
            .await?;
        info!(order = %order.id, total = %order.total_amount, "Order created");
        Ok(order)
    }

    /// Prices `items` without writing anything.
    #[instrument(skip(self, items), fields(lines = items.len()))]
    pub async fn quote(&self, items: Vec<LineItem>) -> Result<Quote, CatalogError> {
        debug!("Sending request");
        self.store
            .read("quote_order", move |session| pricing::quote(session, &items))
            .await
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: OrderFilter,
        query: ListQuery,
    ) -> Result<Page<Order>, CatalogError> {
        debug!("Sending request");
        self.store
            .read("list_orders", move |session| {
                let OrderFilter { status, ordered_by } = filter;
                let orders = Filter::<Order>::all()
                    .and(move |o: &Order| status.map_or(true, |s| o.status == s))
                    .and(move |o: &Order| {
                        ordered_by.as_ref().map_or(true, |u| &o.ordered_by == u)
                    });
                paginate(session, orders, &query)
            })
            .await
    }
}

#[async_trait]
impl DocumentClient<Order> for OrderClient {
    fn store(&self) -> &StoreClient {
        &self.store
    }
}
