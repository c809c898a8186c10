use sqlx::SqlitePool;
use uuid::Uuid;

use crate::dto::account::RegisterRequest;
use crate::error::{Result, StorageError};
use crate::models::{Role, User};
use crate::repository::session::SessionRepository;
use crate::repository::user::UserRepository;

const PASSWORD_HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// Create a regular user account
pub async fn register(pool: &SqlitePool, req: &RegisterRequest) -> Result<User> {
    create_user(pool, &req.username, &req.password, Role::User).await
}

/// Check a username/password pair
pub async fn authenticate(pool: &SqlitePool, username: &str, password: &str) -> Result<User> {
    let user = {
        let mut conn = pool.acquire().await?;
        UserRepository::new(&mut conn)
            .find_by_username(username)
            .await?
            .ok_or(StorageError::InvalidCredentials)?
    };

    if !verify_password(&user, password).await? {
        tracing::warn!(username, "Failed login attempt");
        return Err(StorageError::InvalidCredentials);
    }

    Ok(user)
}

/// Authenticate and open a session, returning its bearer token
pub async fn login(pool: &SqlitePool, username: &str, password: &str) -> Result<(String, User)> {
    let user = authenticate(pool, username, password).await?;

    let token = Uuid::new_v4().simple().to_string();
    let mut conn = pool.acquire().await?;
    SessionRepository::new(&mut conn)
        .create(&token, user.user_id)
        .await?;

    tracing::info!(user_id = user.user_id, "User logged in");

    Ok((token, user))
}

/// User behind a bearer token
pub async fn resolve_session(pool: &SqlitePool, token: &str) -> Result<User> {
    let mut conn = pool.acquire().await?;
    SessionRepository::new(&mut conn)
        .find_user(token)
        .await?
        .ok_or(StorageError::InvalidCredentials)
}

pub async fn logout(pool: &SqlitePool, token: &str) -> Result<()> {
    let mut conn = pool.acquire().await?;
    if !SessionRepository::new(&mut conn).delete(token).await? {
        return Err(StorageError::NotFound);
    }
    Ok(())
}

/// Make sure an administrator account named `username` exists.
///
/// An existing regular account with that name is promoted; its password is
/// left unchanged.
pub async fn ensure_admin(pool: &SqlitePool, username: &str, password: &str) -> Result<User> {
    let mut conn = pool.acquire().await?;
    let existing = UserRepository::new(&mut conn)
        .find_by_username(username)
        .await?;

    match existing {
        Some(user) if user.is_admin() => Ok(user),
        Some(user) => {
            let mut repo = UserRepository::new(&mut conn);
            repo.set_role(user.user_id, Role::Admin).await?;
            tracing::info!(user_id = user.user_id, username, "Promoted existing user to admin");
            repo.find_by_id(user.user_id).await
        }
        None => {
            drop(conn);
            let user = create_user(pool, username, password, Role::Admin).await?;
            tracing::info!(user_id = user.user_id, username, "Created default admin account");
            Ok(user)
        }
    }
}

async fn create_user(pool: &SqlitePool, username: &str, password: &str, role: Role) -> Result<User> {
    let password_hash = hash_password(password).await?;

    let mut conn = pool.acquire().await?;
    let user = UserRepository::new(&mut conn)
        .create(username, &password_hash, role)
        .await
        .map_err(|err| {
            if err.is_unique_violation() {
                StorageError::ConstraintViolation(format!("username '{}' is already taken", username))
            } else {
                err
            }
        })?;

    tracing::info!(user_id = user.user_id, role = role.as_str(), "User registered");

    Ok(user)
}

/// bcrypt hash with an embedded random salt, computed off the async runtime
async fn hash_password(password: &str) -> Result<String> {
    let password = password.to_owned();
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, PASSWORD_HASH_COST));
    Ok(hash.await??)
}

async fn verify_password(user: &User, password: &str) -> Result<bool> {
    let password = password.to_owned();
    let hash = user.password_hash.clone();
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash));
    Ok(matches.await??)
}
