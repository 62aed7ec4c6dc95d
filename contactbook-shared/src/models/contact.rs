/// Contact model and database operations
///
/// Contacts always belong to exactly one user. The queries here do not check
/// ownership; that is the contact service's job.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE contacts (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     phone VARCHAR(64) NOT NULL,
///     email VARCHAR(255),
///     user_id BIGINT NOT NULL REFERENCES users (id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::PgPool;
use validator::Validate;

/// Name of the foreign key from `contacts.user_id` to `users.id`
pub const USER_FOREIGN_KEY: &str = "contacts_user_id_fkey";

/// Contact record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,

    pub name: String,

    pub phone: String,

    /// Optional email, serialized as `null` when absent
    pub email: Option<String>,

    /// Owning user, immutable after creation
    pub user_id: i64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Input for creating a contact
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateContact {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 64, message = "Phone must be between 1 and 64 characters"))]
    pub phone: String,

    #[validate(
        email(message = "Please provide a valid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    #[serde(default)]
    pub email: Option<String>,
}

/// Partial update for a contact
///
/// An absent field leaves the stored value alone. `email` distinguishes
/// absent (`None`) from an explicit `null` (`Some(None)`), which clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateContact {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[serde(default)]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Phone must be between 1 and 64 characters"))]
    #[serde(default)]
    pub phone: Option<String>,

    #[validate(
        email(message = "Please provide a valid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    #[serde(default, deserialize_with = "present_or_null")]
    pub email: Option<Option<String>>,
}

/// Maps a present key to `Some`, so `null` becomes `Some(None)` while a
/// missing key falls back to the `None` default
fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl UpdateContact {
    /// Applies the provided fields onto `contact`, leaving the rest untouched
    pub fn apply_to(self, contact: &mut Contact) {
        if let Some(name) = self.name {
            contact.name = name;
        }
        if let Some(phone) = self.phone {
            contact.phone = phone;
        }
        if let Some(email) = self.email {
            contact.email = email;
        }
    }
}

impl Contact {
    /// Inserts a contact owned by `user_id`
    ///
    /// # Errors
    ///
    /// Fails with a foreign key violation when `user_id` does not exist.
    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        data: CreateContact,
    ) -> Result<Self, sqlx::Error> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (name, phone, email, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, phone, email, user_id, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.phone)
        .bind(data.email)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(contact)
    }

    /// Lists a user's contacts, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Self>, sqlx::Error> {
        let contacts = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, name, phone, email, user_id, created_at, updated_at
            FROM contacts
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(contacts)
    }

    /// Finds a contact by ID regardless of owner
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, name, phone, email, user_id, created_at, updated_at
            FROM contacts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(contact)
    }

    /// Writes the provided fields and bumps `updated_at`
    ///
    /// An explicit `null` email clears the column. Returns `None` if the row
    /// no longer exists.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UpdateContact,
    ) -> Result<Option<Self>, sqlx::Error> {
        let email_present = data.email.is_some();

        let contact = sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                email = CASE WHEN $5 THEN $4 ELSE email END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, phone, email, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.phone)
        .bind(data.email.flatten())
        .bind(email_present)
        .fetch_optional(pool)
        .await?;

        Ok(contact)
    }

    /// Deletes a contact by ID
    ///
    /// Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
