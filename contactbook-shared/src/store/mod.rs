//! Persistence ports.
//!
//! Services talk to storage only through these traits, so the same business
//! logic runs against PostgreSQL in production ([`postgres::PgStore`]) and an
//! in-process map in tests ([`memory::MemoryStore`]). Adapters translate their
//! native failures into [`StoreError`] so callers can react to constraint
//! violations without knowing which backend produced them.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::contact::{Contact, CreateContact, UpdateContact};
use crate::models::user::{CreateUser, User};

pub mod memory;
pub mod postgres;

/// Errors surfaced by store adapters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// A foreign key rejected the write
    #[error("foreign key constraint violated: {constraint}")]
    ForeignKeyViolation { constraint: String },

    /// Connectivity or any other backend failure
    #[error("database error: {message}")]
    Database { message: String },
}

impl StoreError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

/// Credential store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a user; a taken email yields [`StoreError::UniqueViolation`].
    async fn insert_user(&self, data: CreateUser) -> Result<User, StoreError>;

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// Contact store
///
/// None of these methods check ownership.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Persists a contact for `user_id`; an unknown user yields
    /// [`StoreError::ForeignKeyViolation`].
    async fn insert_contact(&self, user_id: i64, data: CreateContact)
        -> Result<Contact, StoreError>;

    /// All contacts of `user_id`, newest first
    async fn list_contacts_for_user(&self, user_id: i64) -> Result<Vec<Contact>, StoreError>;

    async fn find_contact(&self, id: i64) -> Result<Option<Contact>, StoreError>;

    /// Applies the provided fields; `None` when the row is gone.
    async fn update_contact(
        &self,
        id: i64,
        data: UpdateContact,
    ) -> Result<Option<Contact>, StoreError>;

    /// Returns whether a row was deleted.
    async fn delete_contact(&self, id: i64) -> Result<bool, StoreError>;
}

/// A complete backend: both tables plus a liveness probe
#[async_trait]
pub trait Store: UserStore + ContactStore {
    async fn ping(&self) -> Result<(), StoreError>;
}
