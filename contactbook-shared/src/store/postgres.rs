//! PostgreSQL store adapter.

use async_trait::async_trait;
use sqlx::{error::ErrorKind, PgPool};

use super::{ContactStore, Store, StoreError, UserStore};
use crate::db::pool;
use crate::models::contact::{Contact, CreateContact, UpdateContact};
use crate::models::user::{CreateUser, User};

/// Store backed by a sqlx connection pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            match db_err.kind() {
                ErrorKind::UniqueViolation => return StoreError::UniqueViolation { constraint },
                ErrorKind::ForeignKeyViolation => {
                    return StoreError::ForeignKeyViolation { constraint }
                }
                _ => {}
            }
        }

        StoreError::database(err.to_string())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, data: CreateUser) -> Result<User, StoreError> {
        Ok(User::create(&self.pool, data).await?)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }
}

#[async_trait]
impl ContactStore for PgStore {
    async fn insert_contact(
        &self,
        user_id: i64,
        data: CreateContact,
    ) -> Result<Contact, StoreError> {
        Ok(Contact::create(&self.pool, user_id, data).await?)
    }

    async fn list_contacts_for_user(&self, user_id: i64) -> Result<Vec<Contact>, StoreError> {
        Ok(Contact::list_by_user(&self.pool, user_id).await?)
    }

    async fn find_contact(&self, id: i64) -> Result<Option<Contact>, StoreError> {
        Ok(Contact::find_by_id(&self.pool, id).await?)
    }

    async fn update_contact(
        &self,
        id: i64,
        data: UpdateContact,
    ) -> Result<Option<Contact>, StoreError> {
        Ok(Contact::update(&self.pool, id, data).await?)
    }

    async fn delete_contact(&self, id: i64) -> Result<bool, StoreError> {
        Ok(Contact::delete(&self.pool, id).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(pool::health_check(&self.pool).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_map_to_database_variant() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::Database { .. }));

        let err: StoreError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, StoreError::Database { .. }));
    }
}
