//! In-memory store adapter.
//!
//! Mirrors the PostgreSQL schema closely enough to stand in for it: ids are
//! assigned sequentially, `users.email` is unique, contacts must reference an
//! existing user, and listings come back newest first. Used by the test
//! suites.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ContactStore, Store, StoreError, UserStore};
use crate::models::contact::{Contact, CreateContact, UpdateContact, USER_FOREIGN_KEY};
use crate::models::user::{CreateUser, User, EMAIL_UNIQUE_CONSTRAINT};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    contacts: BTreeMap<i64, Contact>,
    last_user_id: i64,
    last_contact_id: i64,
}

/// Store that keeps everything in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes a user together with their contacts, like the cascading
    /// foreign key does in PostgreSQL
    pub async fn remove_user(&self, id: i64) -> bool {
        let mut tables = self.tables.write().await;
        tables.contacts.retain(|_, contact| contact.user_id != id);
        tables.users.remove(&id).is_some()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, data: CreateUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|user| user.email == data.email) {
            return Err(StoreError::UniqueViolation {
                constraint: EMAIL_UNIQUE_CONSTRAINT.to_string(),
            });
        }

        tables.last_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: tables.last_user_id,
            email: data.email,
            password_hash: data.password_hash,
            name: data.name,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|user| user.email == email).cloned())
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn insert_contact(
        &self,
        user_id: i64,
        data: CreateContact,
    ) -> Result<Contact, StoreError> {
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::ForeignKeyViolation {
                constraint: USER_FOREIGN_KEY.to_string(),
            });
        }

        tables.last_contact_id += 1;
        let now = Utc::now();
        let contact = Contact {
            id: tables.last_contact_id,
            name: data.name,
            phone: data.phone,
            email: data.email,
            user_id,
            created_at: now,
            updated_at: now,
        };
        tables.contacts.insert(contact.id, contact.clone());

        Ok(contact)
    }

    async fn list_contacts_for_user(&self, user_id: i64) -> Result<Vec<Contact>, StoreError> {
        let tables = self.tables.read().await;

        let mut contacts: Vec<Contact> = tables
            .contacts
            .values()
            .filter(|contact| contact.user_id == user_id)
            .cloned()
            .collect();
        contacts.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        Ok(contacts)
    }

    async fn find_contact(&self, id: i64) -> Result<Option<Contact>, StoreError> {
        Ok(self.tables.read().await.contacts.get(&id).cloned())
    }

    async fn update_contact(
        &self,
        id: i64,
        data: UpdateContact,
    ) -> Result<Option<Contact>, StoreError> {
        let mut tables = self.tables.write().await;

        let Some(contact) = tables.contacts.get_mut(&id) else {
            return Ok(None);
        };
        data.apply_to(contact);
        contact.updated_at = Utc::now();

        Ok(Some(contact.clone()))
    }

    async fn delete_contact(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.tables.write().await.contacts.remove(&id).is_some())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
