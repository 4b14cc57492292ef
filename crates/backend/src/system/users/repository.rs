use anyhow::Result;
use contracts::system::auth::UserInfo;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

use crate::shared::data::db::get_connection;

/// One row of sys_users without the password hash
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
}

impl From<&UserRow> for UserInfo {
    fn from(u: &UserRow) -> Self {
        UserInfo {
            id: u.id.clone(),
            username: u.username.clone(),
            full_name: u.full_name.clone(),
            is_admin: u.is_admin,
        }
    }
}

fn row_from_query(row: &sea_orm::QueryResult) -> Result<UserRow> {
    Ok(UserRow {
        id: row.try_get("", "id")?,
        username: row.try_get("", "username")?,
        full_name: row.try_get("", "full_name")?,
        is_active: row.try_get::<i32>("", "is_active")? != 0,
        is_admin: row.try_get::<i32>("", "is_admin")? != 0,
    })
}

pub async fn count_users() -> Result<u64> {
    let conn = get_connection();
    let result = conn
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) AS cnt FROM sys_users".to_string(),
        ))
        .await?;
    match result {
        Some(row) => Ok(row.try_get::<i64>("", "cnt")? as u64),
        None => Ok(0),
    }
}

pub async fn get_by_id(id: &str) -> Result<Option<UserRow>> {
    let conn = get_connection();
    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT id, username, full_name, is_active, is_admin FROM sys_users WHERE id = ?",
            [id.into()],
        ))
        .await?;
    result.as_ref().map(row_from_query).transpose()
}

pub async fn get_by_username(username: &str) -> Result<Option<UserRow>> {
    let conn = get_connection();
    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT id, username, full_name, is_active, is_admin FROM sys_users WHERE username = ?",
            [username.into()],
        ))
        .await?;
    result.as_ref().map(row_from_query).transpose()
}

pub async fn get_password_hash(user_id: &str) -> Result<Option<String>> {
    let conn = get_connection();
    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT password_hash FROM sys_users WHERE id = ?",
            [user_id.into()],
        ))
        .await?;
    match result {
        Some(row) => Ok(Some(row.try_get("", "password_hash")?)),
        None => Ok(None),
    }
}

pub async fn create_with_password(
    id: &str,
    username: &str,
    full_name: Option<&str>,
    is_admin: bool,
    password_hash: &str,
) -> Result<()> {
    let conn = get_connection();
    let now = chrono::Utc::now().to_rfc3339();
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sys_users (id, username, password_hash, full_name, is_active, is_admin, created_at, updated_at)
         VALUES (?, ?, ?, ?, 1, ?, ?, ?)",
        [
            id.into(),
            username.into(),
            password_hash.into(),
            full_name.map(|s| s.to_string()).into(),
            (is_admin as i32).into(),
            now.clone().into(),
            now.into(),
        ],
    ))
    .await?;
    Ok(())
}

pub async fn update_last_login(user_id: &str) -> Result<()> {
    let conn = get_connection();
    let now = chrono::Utc::now().to_rfc3339();
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_users SET last_login_at = ? WHERE id = ?",
        [now.into(), user_id.into()],
    ))
    .await?;
    Ok(())
}
