//! Ownership checks applied inline by handlers acting on a single resource.

use crate::types::{AuthError, Identity};
use tracing::debug;

/// Who besides the owner may act on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Only the identity whose id matches the resource owner.
    SelfOnly,
    /// The owner, or any administrator.
    SelfOrAdmin,
}

impl Ownership {
    /// Decides whether `identity` may act on a resource owned by `owner_id`.
    ///
    /// Evaluated on every request; the subject-id comparison always runs
    /// first so a customer acting on their own resource passes without any
    /// elevated role.
    pub fn check(self, identity: &Identity, owner_id: &str) -> Result<(), AuthError> {
        if identity.id == owner_id {
            return Ok(());
        }

        match self {
            Ownership::SelfOrAdmin if identity.is_admin() => Ok(()),
            _ => {
                debug!(
                    user_id = %identity.id,
                    owner_id,
                    policy = ?self,
                    "ownership check failed"
                );
                Err(AuthError::NotOwner)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use rstest::rstest;

    fn identity(id: &str, role: Role) -> Identity {
        Identity::new(id, "name", format!("{}@example.com", id), role)
    }

    #[rstest]
    #[case(Ownership::SelfOnly, "u1", Role::Customer, "u1", true)]
    #[case(Ownership::SelfOnly, "u1", Role::Customer, "u2", false)]
    #[case(Ownership::SelfOnly, "a1", Role::Admin, "u2", false)]
    #[case(Ownership::SelfOnly, "a1", Role::Admin, "a1", true)]
    #[case(Ownership::SelfOrAdmin, "u1", Role::Customer, "u1", true)]
    #[case(Ownership::SelfOrAdmin, "u1", Role::Customer, "u2", false)]
    #[case(Ownership::SelfOrAdmin, "a1", Role::Admin, "u2", true)]
    fn test_ownership_decisions(
        #[case] policy: Ownership,
        #[case] subject: &str,
        #[case] role: Role,
        #[case] owner: &str,
        #[case] allowed: bool,
    ) {
        let result = policy.check(&identity(subject, role), owner);
        assert_eq!(result.is_ok(), allowed);
        if !allowed {
            assert_eq!(result, Err(AuthError::NotOwner));
        }
    }
}
