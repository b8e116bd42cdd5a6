//! Order Store
//!
//! The persistence facade: upsert an order and its customer as one
//! logical unit, and read orders back with the customer joined in.

use crate::db::repository::{RepoResult, customer, order};
use shared::models::{Order, OrderRecord, OrderStatus};
use sqlx::SqlitePool;

/// Order store — all operations go through the shared pool
#[derive(Clone)]
pub struct OrderStore {
    pool: SqlitePool,
}

impl OrderStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Upsert the embedded customer, then the order, in one transaction.
    ///
    /// Returns the order's store-assigned id. Rolls back both writes on
    /// failure, so a failed order write never leaves an orphan customer
    /// row.
    pub async fn save(&self, record: &OrderRecord) -> RepoResult<i64> {
        let mut tx = self.pool.begin().await?;

        let customer_id = customer::upsert(&mut tx, &record.customer()).await?;
        let order_id = order::upsert(&mut tx, record, customer_id).await?;

        tx.commit().await?;
        tracing::debug!(order_id, customer_id, "Order saved");
        Ok(order_id)
    }

    /// Single order by id, customer joined. `None` is the normal
    /// no-such-id outcome, distinct from a store failure.
    pub async fn get(&self, id: i64) -> RepoResult<Option<Order>> {
        order::get(&self.pool, id).await
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        order::find_all(&self.pool).await
    }

    pub async fn find_by_status(&self, status: OrderStatus) -> RepoResult<Vec<Order>> {
        order::find_by_status(&self.pool, status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::{Customer, CustomerCreate, OrderCreate, PizzaType};

    async fn test_store() -> OrderStore {
        let db = DbService::open_in_memory().await.unwrap();
        OrderStore::new(db.pool)
    }

    fn john_smith() -> CustomerCreate {
        CustomerCreate::new("John Smith", "john@smith.com", "Lodz, Jaracza 74")
    }

    #[tokio::test]
    async fn save_assigns_order_and_customer_ids() {
        let store = test_store().await;

        let id = store
            .save(&OrderCreate::new(john_smith(), PizzaType::Large).into())
            .await
            .unwrap();
        assert!(id > 0);

        let order = store.get(id).await.unwrap().unwrap();
        assert!(order.customer.id > 0);
        assert_eq!(order.customer.name, "John Smith");
    }

    #[tokio::test]
    async fn save_again_with_id_updates_same_row() {
        let store = test_store().await;

        let id = store
            .save(&OrderCreate::new(john_smith(), PizzaType::Small).into())
            .await
            .unwrap();

        let mut order = store.get(id).await.unwrap().unwrap();
        order.status = OrderStatus::Delivered;
        order.finish_time = Some(shared::util::now_millis());
        let id_again = store.save(&order.into()).await.unwrap();

        assert_eq!(id_again, id);
        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_order_write_rolls_back_customer_write() {
        let store = test_store().await;

        let id = store
            .save(&OrderCreate::new(john_smith(), PizzaType::Small).into())
            .await
            .unwrap();
        let saved = store.get(id).await.unwrap().unwrap();

        // Customer update succeeds inside the transaction, then the order
        // update hits a missing id; neither write may survive.
        let ghost = Order {
            id: 777,
            customer: Customer {
                email: "changed@smith.com".to_string(),
                ..saved.customer.clone()
            },
            ..saved.clone()
        };
        let err = store.save(&OrderRecord::Saved(ghost)).await.unwrap_err();
        assert!(matches!(err, crate::db::repository::RepoError::NotFound(_)));

        let after = store.get(id).await.unwrap().unwrap();
        assert_eq!(after.customer.email, "john@smith.com");
    }

    #[tokio::test]
    async fn find_by_status_partitions() {
        let store = test_store().await;

        let created = store
            .save(&OrderCreate::new(john_smith(), PizzaType::Small).into())
            .await
            .unwrap();
        let delivered = store
            .save(&OrderCreate::new(john_smith(), PizzaType::Large).into())
            .await
            .unwrap();

        let mut order = store.get(delivered).await.unwrap().unwrap();
        order.status = OrderStatus::Delivered;
        order.finish_time = Some(shared::util::now_millis());
        store.save(&order.into()).await.unwrap();

        let unprocessed = store.find_by_status(OrderStatus::Created).await.unwrap();
        assert_eq!(unprocessed.len(), 1);
        assert_eq!(unprocessed[0].id, created);

        let done = store.find_by_status(OrderStatus::Delivered).await.unwrap();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, delivered);

        let all = store.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        let mut ids: Vec<i64> = all.iter().map(|o| o.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![created, delivered]);
    }
}
