//! Customer Repository
//!
//! Writer half of the order/customer pair. Single-statement upsert: the
//! record variant picks INSERT or UPDATE, so a write is atomic at the
//! store level.

use super::{RepoError, RepoResult};
use shared::models::{Customer, CustomerRecord};
use sqlx::{SqliteConnection, SqlitePool};

const INSERT_SQL: &str =
    "INSERT INTO customer_t (name, email, address) VALUES (?, ?, ?) RETURNING id";
const UPDATE_SQL: &str = "UPDATE customer_t SET name = ?, email = ?, address = ? WHERE id = ?";

/// Insert or update a customer, returning its store-assigned id.
///
/// The input is not mutated; callers that want the assignment persisted in
/// their domain object attach the returned id themselves
/// (`CustomerCreate::into_saved`).
pub async fn upsert(conn: &mut SqliteConnection, record: &CustomerRecord) -> RepoResult<i64> {
    match record {
        CustomerRecord::New(data) => {
            let id: i64 = sqlx::query_scalar(INSERT_SQL)
                .bind(&data.name)
                .bind(&data.email)
                .bind(&data.address)
                .fetch_one(&mut *conn)
                .await?;
            Ok(id)
        }
        CustomerRecord::Saved(customer) => {
            let rows = sqlx::query(UPDATE_SQL)
                .bind(&customer.name)
                .bind(&customer.email)
                .bind(&customer.address)
                .bind(customer.id)
                .execute(&mut *conn)
                .await?;
            if rows.rows_affected() == 0 {
                return Err(RepoError::NotFound(format!(
                    "Customer {} not found",
                    customer.id
                )));
            }
            Ok(customer.id)
        }
    }
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let row = sqlx::query_as::<_, Customer>(
        "SELECT id, name, email, address FROM customer_t WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
