//! Order workflow
//!
//! Lifecycle operations on top of [`OrderStore`]: create an order for a
//! customer, move it to a terminal state, and fetch orders by lifecycle
//! bucket. Transition legality lives here — the store itself stays
//! permissive.

use crate::db::repository::{RepoError, RepoResult};
use crate::store::OrderStore;
use shared::models::{CustomerRecord, Order, OrderCreate, OrderStatus, PizzaType};
use shared::util::now_millis;

/// Minutes until delivery, by pizza size
fn delivery_estimate_minutes(pizza_type: PizzaType) -> i64 {
    match pizza_type {
        PizzaType::Small => 25,
        PizzaType::Large => 45,
    }
}

/// Order lifecycle service
#[derive(Clone)]
pub struct OrderService {
    store: OrderStore,
}

impl OrderService {
    pub fn new(store: OrderStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &OrderStore {
        &self.store
    }

    /// Create an order in `Created` with an estimated delivery time,
    /// returning its store-assigned id.
    pub async fn create_order(
        &self,
        customer: impl Into<CustomerRecord>,
        pizza_type: PizzaType,
    ) -> RepoResult<i64> {
        let estimated = now_millis() + delivery_estimate_minutes(pizza_type) * 60 * 1000;
        let record = OrderCreate::new(customer, pizza_type).with_estimated_delivery_time(estimated);
        let id = self.store.save(&record.into()).await?;
        tracing::info!(order_id = id, %pizza_type, "Order created");
        Ok(id)
    }

    /// `Created → Delivered`, stamping the finish time.
    pub async fn deliver_order(&self, id: i64) -> RepoResult<Order> {
        self.finish_order(id, OrderStatus::Delivered).await
    }

    /// `Created → Cancelled`, stamping the finish time.
    pub async fn cancel_order(&self, id: i64) -> RepoResult<Order> {
        self.finish_order(id, OrderStatus::Cancelled).await
    }

    async fn finish_order(&self, id: i64, status: OrderStatus) -> RepoResult<Order> {
        let Some(mut order) = self.store.get(id).await? else {
            return Err(RepoError::NotFound(format!("Order {id} not found")));
        };
        if order.status != OrderStatus::Created {
            return Err(RepoError::Validation(format!(
                "Order {id} is {}, cannot transition to {status}",
                order.status
            )));
        }

        order.status = status;
        order.finish_time = Some(now_millis());
        self.store.save(&order.clone().into()).await?;
        tracing::info!(order_id = id, %status, "Order finished");
        Ok(order)
    }

    pub async fn fetch_unprocessed(&self) -> RepoResult<Vec<Order>> {
        self.store.find_by_status(OrderStatus::Created).await
    }

    pub async fn fetch_delivered(&self) -> RepoResult<Vec<Order>> {
        self.store.find_by_status(OrderStatus::Delivered).await
    }

    pub async fn fetch_cancelled(&self) -> RepoResult<Vec<Order>> {
        self.store.find_by_status(OrderStatus::Cancelled).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::CustomerCreate;

    async fn test_service() -> OrderService {
        let db = DbService::open_in_memory().await.unwrap();
        OrderService::new(OrderStore::new(db.pool))
    }

    fn jan_kowalski() -> CustomerCreate {
        CustomerCreate::new("Jan Kowalski", "jan@kowalski.pl", "Lodz, Piotrkowska 100")
    }

    #[tokio::test]
    async fn create_sets_estimate_and_no_finish_time() {
        let service = test_service().await;
        let before = now_millis();

        let id = service
            .create_order(jan_kowalski(), PizzaType::Small)
            .await
            .unwrap();

        let order = service.store().get(id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.finish_time, None);
        let estimate = order.estimated_delivery_time.unwrap();
        assert!(estimate >= before + 25 * 60 * 1000);
    }

    #[tokio::test]
    async fn deliver_moves_to_terminal_state() {
        let service = test_service().await;
        let id = service
            .create_order(jan_kowalski(), PizzaType::Large)
            .await
            .unwrap();

        let delivered = service.deliver_order(id).await.unwrap();
        assert_eq!(delivered.status, OrderStatus::Delivered);
        assert!(delivered.finish_time.is_some());

        assert!(service.fetch_unprocessed().await.unwrap().is_empty());
        assert_eq!(service.fetch_delivered().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn terminal_orders_accept_no_transition() {
        let service = test_service().await;
        let id = service
            .create_order(jan_kowalski(), PizzaType::Small)
            .await
            .unwrap();

        service.cancel_order(id).await.unwrap();
        let err = service.deliver_order(id).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn finishing_missing_order_is_not_found() {
        let service = test_service().await;
        let err = service.deliver_order(123).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
