/// Contact operations scoped to the calling user
///
/// Every single-contact operation goes through [`ContactService::ownership`]
/// first. Existence is checked before ownership, so another user's contact is
/// reported as `Forbidden` rather than `NotFound`.

use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use super::{ServiceError, ServiceResult};
use crate::models::contact::{Contact, CreateContact, UpdateContact};
use crate::store::ContactStore;

const NOT_FOUND: &str = "Contact not found";
const FORBIDDEN: &str = "You do not have access to this contact";

/// Outcome of looking a contact up on behalf of a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ownership {
    /// Exists and belongs to the caller
    Owned(Contact),
    /// Exists but belongs to someone else
    NotOwned,
    /// No contact with that id
    Missing,
}

impl Ownership {
    /// Classifies a lookup result for `caller_user_id`
    pub fn resolve(contact: Option<Contact>, caller_user_id: i64) -> Self {
        match contact {
            Some(contact) if contact.user_id == caller_user_id => Ownership::Owned(contact),
            Some(_) => Ownership::NotOwned,
            None => Ownership::Missing,
        }
    }

    /// Turns anything but `Owned` into the matching service error
    pub fn into_owned(self) -> ServiceResult<Contact> {
        match self {
            Ownership::Owned(contact) => Ok(contact),
            Ownership::NotOwned => Err(ServiceError::Forbidden(FORBIDDEN.to_string())),
            Ownership::Missing => Err(ServiceError::NotFound(NOT_FOUND.to_string())),
        }
    }
}

/// Contact component
#[derive(Clone)]
pub struct ContactService {
    contacts: Arc<dyn ContactStore>,
}

impl ContactService {
    pub fn new(contacts: Arc<dyn ContactStore>) -> Self {
        Self { contacts }
    }

    /// Creates a contact owned by the caller
    pub async fn create(&self, caller_user_id: i64, data: CreateContact) -> ServiceResult<Contact> {
        data.validate()?;

        let contact = self.contacts.insert_contact(caller_user_id, data).await?;

        info!(user_id = caller_user_id, contact_id = contact.id, "Contact created");
        Ok(contact)
    }

    /// The caller's contacts, newest first
    pub async fn list_all(&self, caller_user_id: i64) -> ServiceResult<Vec<Contact>> {
        Ok(self.contacts.list_contacts_for_user(caller_user_id).await?)
    }

    /// Looks up `id` and classifies it relative to the caller
    pub async fn ownership(&self, id: i64, caller_user_id: i64) -> ServiceResult<Ownership> {
        let contact = self.contacts.find_contact(id).await?;
        let ownership = Ownership::resolve(contact, caller_user_id);

        if ownership == Ownership::NotOwned {
            debug!(user_id = caller_user_id, contact_id = id, "Denied access to foreign contact");
        }

        Ok(ownership)
    }

    /// Fetches one of the caller's contacts
    ///
    /// # Errors
    ///
    /// `NotFound` if the id does not exist, `Forbidden` if it belongs to
    /// another user.
    pub async fn get_one(&self, id: i64, caller_user_id: i64) -> ServiceResult<Contact> {
        self.ownership(id, caller_user_id).await?.into_owned()
    }

    /// Applies a partial update to one of the caller's contacts
    ///
    /// Ownership is checked before the body is validated, so a stranger
    /// probing with a bad payload still gets `Forbidden`.
    pub async fn update(
        &self,
        id: i64,
        caller_user_id: i64,
        data: UpdateContact,
    ) -> ServiceResult<Contact> {
        self.get_one(id, caller_user_id).await?;
        data.validate()?;

        self.contacts
            .update_contact(id, data)
            .await?
            .ok_or_else(|| ServiceError::NotFound(NOT_FOUND.to_string()))
    }

    /// Deletes one of the caller's contacts
    pub async fn remove(&self, id: i64, caller_user_id: i64) -> ServiceResult<()> {
        self.get_one(id, caller_user_id).await?;

        if !self.contacts.delete_contact(id).await? {
            return Err(ServiceError::NotFound(NOT_FOUND.to_string()));
        }

        info!(user_id = caller_user_id, contact_id = id, "Contact deleted");
        Ok(())
    }
}
