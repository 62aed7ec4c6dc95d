/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Bearer token issuing and validation
/// - [`context`]: Caller identity attached to authenticated requests
///
/// # Example
///
/// ```no_run
/// use contactbook_shared::auth::password::{hash_password, verify_password};
/// use contactbook_shared::auth::jwt::{create_token, validate_token, Claims};
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// let claims = Claims::new(42, "alice@example.com", Duration::hours(24));
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!")?;
/// let validated = validate_token(&token, "secret-key-at-least-32-bytes-long!")?;
/// assert_eq!(validated.user_id()?, 42);
/// # Ok(())
/// # }
/// ```

pub mod context;
pub mod jwt;
pub mod password;
