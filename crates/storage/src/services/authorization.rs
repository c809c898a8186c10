use crate::error::{Result, StorageError};
use crate::models::User;

/// Fail with [`StorageError::PermissionDenied`] unless `actor` is an administrator.
///
/// `operation` names the attempted action in the error and in the log line.
pub fn require_admin(actor: &User, operation: &str) -> Result<()> {
    if actor.is_admin() {
        return Ok(());
    }

    tracing::warn!(
        user_id = actor.user_id,
        username = %actor.username,
        operation,
        "Rejected non-admin action"
    );
    Err(StorageError::PermissionDenied(format!(
        "administrator role required to {}",
        operation
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn user(role: Role) -> User {
        User {
            user_id: 7,
            username: "someone".to_string(),
            password_hash: String::new(),
            role,
            created_at: chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn admin_passes() {
        assert!(require_admin(&user(Role::Admin), "review submissions").is_ok());
    }

    #[test]
    fn regular_user_is_denied() {
        let err = require_admin(&user(Role::User), "review submissions").unwrap_err();
        match err {
            StorageError::PermissionDenied(msg) => {
                assert_eq!(msg, "administrator role required to review submissions")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
