//! Role checks shared by every mutating service operation.

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::UserDetail;

/// The authenticated user a request acts on behalf of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: Uuid,
    pub email: String,
    pub is_admin: bool,
}

impl From<&UserDetail> for Caller {
    fn from(user: &UserDetail) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            is_admin: user.is_admin,
        }
    }
}

/// Succeeds when the caller is an admin or `owns` accepts them.
pub fn authorize<F>(caller: &Caller, owns: F) -> AppResult<()>
where
    F: FnOnce(&Caller) -> bool,
{
    if caller.is_admin || owns(caller) {
        Ok(())
    } else {
        Err(AppError::unauthorized("not authorized"))
    }
}

pub fn require_admin(caller: &Caller) -> AppResult<()> {
    authorize(caller, |_| false)
}

pub fn require_owner_or_admin(caller: &Caller, owner_id: Uuid) -> AppResult<()> {
    authorize(caller, |c| c.id == owner_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn caller(id: Uuid, is_admin: bool) -> Caller {
        Caller {
            id,
            email: "caller@gamedevs.com".to_string(),
            is_admin,
        }
    }

    fn uuid_strategy() -> impl Strategy<Value = Uuid> {
        any::<u128>().prop_map(Uuid::from_u128)
    }

    proptest! {
        #[test]
        fn non_admins_never_pass_admin_gate(id in uuid_strategy()) {
            let result = require_admin(&caller(id, false));
            let unauthorized = matches!(result, Err(AppError::Unauthorized { .. }));
            prop_assert!(unauthorized, "expected Unauthorized, got {:?}", result);
        }

        #[test]
        fn admins_pass_every_check(id in uuid_strategy(), owner in uuid_strategy()) {
            let admin = caller(id, true);
            prop_assert!(require_admin(&admin).is_ok());
            prop_assert!(require_owner_or_admin(&admin, owner).is_ok());
        }

        #[test]
        fn owner_check_matches_identity(id in uuid_strategy(), owner in uuid_strategy()) {
            let result = require_owner_or_admin(&caller(id, false), owner);
            prop_assert_eq!(result.is_ok(), id == owner);
        }
    }

    #[test]
    fn test_rejection_message() {
        match require_admin(&caller(Uuid::new_v4(), false)) {
            Err(AppError::Unauthorized { message }) => assert_eq!(message, "not authorized"),
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_predicate() {
        let c = caller(Uuid::new_v4(), false);
        assert!(authorize(&c, |c| c.email.ends_with("@gamedevs.com")).is_ok());
        assert!(authorize(&c, |_| false).is_err());
    }
}
