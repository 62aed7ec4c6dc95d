/// Database models for the contact book
///
/// Each model owns its SQL: the query methods take a `PgPool` and are what
/// the PostgreSQL store adapter delegates to.
///
/// # Models
///
/// - `user`: Registered accounts
/// - `contact`: Contact records owned by a user
///
/// # Example
///
/// ```no_run
/// use contactbook_shared::models::user::{User, CreateUser};
/// use contactbook_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     name: "John Doe".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod contact;
pub mod user;
