//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity (persisted row, id assigned by the store)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
}

/// Create customer payload (no id yet)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl CustomerCreate {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            address: address.into(),
        }
    }

    /// Attach the store-assigned id, producing the persisted entity.
    pub fn into_saved(self, id: i64) -> Customer {
        Customer {
            id,
            name: self.name,
            email: self.email,
            address: self.address,
        }
    }
}

/// Upsert input for the customer writer.
///
/// The variant, not a nullable id, decides whether the writer runs an
/// INSERT or an UPDATE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerRecord {
    New(CustomerCreate),
    Saved(Customer),
}

impl CustomerRecord {
    /// Store-assigned id, if this record has been persisted before.
    pub fn id(&self) -> Option<i64> {
        match self {
            CustomerRecord::New(_) => None,
            CustomerRecord::Saved(c) => Some(c.id),
        }
    }
}

impl From<CustomerCreate> for CustomerRecord {
    fn from(data: CustomerCreate) -> Self {
        CustomerRecord::New(data)
    }
}

impl From<Customer> for CustomerRecord {
    fn from(customer: Customer) -> Self {
        CustomerRecord::Saved(customer)
    }
}
