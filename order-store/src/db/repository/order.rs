//! Order Repository
//!
//! Writer and reader for `order_t`. Reads always join the customer row;
//! every query method funnels through [`build_order`] so the join-column
//! contract is defined exactly once.

use super::{RepoError, RepoResult};
use shared::models::{Customer, Order, OrderRecord, OrderRow, OrderStatus};
use sqlx::{SqliteConnection, SqlitePool};

const INSERT_SQL: &str = "INSERT INTO order_t (customer_id, status, type, estimated_delivery_time, finish_time) VALUES (?, ?, ?, ?, ?) RETURNING id";
const UPDATE_SQL: &str = "UPDATE order_t SET customer_id = ?, status = ?, type = ?, estimated_delivery_time = ?, finish_time = ? WHERE id = ?";

const ORDER_WITH_CUSTOMER_SELECT: &str = "SELECT o.id AS order_id, o.customer_id, o.status, o.type AS pizza_type, o.estimated_delivery_time, o.finish_time, c.name, c.email, c.address FROM order_t o JOIN customer_t c ON o.customer_id = c.id";

/// Insert or update an order, returning its store-assigned id.
///
/// `customer_id` must already exist; the caller upserts the customer
/// first so the foreign key is always valid.
pub async fn upsert(
    conn: &mut SqliteConnection,
    record: &OrderRecord,
    customer_id: i64,
) -> RepoResult<i64> {
    match record.id() {
        None => {
            let id: i64 = sqlx::query_scalar(INSERT_SQL)
                .bind(customer_id)
                .bind(record.status().as_str())
                .bind(record.pizza_type().as_str())
                .bind(record.estimated_delivery_time())
                .bind(record.finish_time())
                .fetch_one(&mut *conn)
                .await?;
            Ok(id)
        }
        Some(order_id) => {
            let rows = sqlx::query(UPDATE_SQL)
                .bind(customer_id)
                .bind(record.status().as_str())
                .bind(record.pizza_type().as_str())
                .bind(record.estimated_delivery_time())
                .bind(record.finish_time())
                .bind(order_id)
                .execute(&mut *conn)
                .await?;
            if rows.rows_affected() == 0 {
                return Err(RepoError::NotFound(format!("Order {order_id} not found")));
            }
            Ok(order_id)
        }
    }
}

pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{} WHERE o.id = ?", ORDER_WITH_CUSTOMER_SELECT);
    let row = sqlx::query_as::<_, OrderRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(build_order).transpose()
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, OrderRow>(ORDER_WITH_CUSTOMER_SELECT)
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(build_order).collect()
}

pub async fn find_by_status(pool: &SqlitePool, status: OrderStatus) -> RepoResult<Vec<Order>> {
    let sql = format!("{} WHERE o.status = ?", ORDER_WITH_CUSTOMER_SELECT);
    let rows = sqlx::query_as::<_, OrderRow>(&sql)
        .bind(status.as_str())
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(build_order).collect()
}

/// Map one joined row to the domain entity.
///
/// Total over any row the defined queries produce; fails `MalformedRow`
/// only when a stored tag is not a known variant.
fn build_order(row: OrderRow) -> RepoResult<Order> {
    let status: OrderStatus = row.status.parse()?;
    let pizza_type = row.pizza_type.parse()?;
    Ok(Order {
        id: row.order_id,
        customer: Customer {
            id: row.customer_id,
            name: row.name,
            email: row.email,
            address: row.address,
        },
        pizza_type,
        status,
        estimated_delivery_time: row.estimated_delivery_time,
        finish_time: row.finish_time,
    })
}
