use anyhow::Result;
use uuid::Uuid;

use super::repository::{self, UserRow};
use crate::system::auth::password;

/// Create a user and return its id
pub async fn create(
    username: &str,
    plain_password: &str,
    full_name: Option<&str>,
    is_admin: bool,
) -> Result<String> {
    password::validate_password_strength(plain_password)?;
    let password_hash = password::hash_password(plain_password)?;
    let user_id = Uuid::new_v4().to_string();
    repository::create_with_password(&user_id, username, full_name, is_admin, &password_hash)
        .await?;
    Ok(user_id)
}

pub async fn get_by_id(id: &str) -> Result<Option<UserRow>> {
    repository::get_by_id(id).await
}

/// Verify user credentials (for login)
pub async fn verify_credentials(username: &str, plain_password: &str) -> Result<Option<UserRow>> {
    let user = match repository::get_by_username(username).await? {
        Some(u) => u,
        None => return Ok(None),
    };

    if !user.is_active {
        return Err(anyhow::anyhow!("User account is inactive"));
    }

    let password_hash = repository::get_password_hash(&user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Password hash not found"))?;

    if !password::verify_password(plain_password, &password_hash)? {
        return Ok(None);
    }

    let _ = repository::update_last_login(&user.id).await;

    Ok(Some(user))
}
