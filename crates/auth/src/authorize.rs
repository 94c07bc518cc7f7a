//! Pure authorization decisions over a member's effective roles.
//!
//! Every check here is a synchronous, side-effect-free evaluation of
//! `Principal × requirement → decision`. Denials are returned as values,
//! never raised; nothing is logged or audited at this layer (an outer
//! observability layer may wrap calls to add that).

use thiserror::Error;

use fairway_core::MemberId;

use crate::{AdminRole, Principal};

/// A denied authorization decision.
///
/// Callers that translate a denial into a protocol response conventionally
/// use status 403 (Forbidden) with the `Display` message as the explanatory
/// payload, and must not downgrade it to a different status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// The member holds none of the roles that would permit the operation.
    ///
    /// The message enumerates every role that would have been sufficient.
    #[error("{}", missing_role_message(.required))]
    MissingRole { required: Vec<AdminRole> },

    /// The member is neither the owner of the target records nor an
    /// administrator.
    ///
    /// Deliberately names no roles: any administrative role suffices here,
    /// and the message must not reveal which roles exist or are held.
    #[error("access denied: you can only access your own records unless you have administrative privileges")]
    NotSelfOrAdmin,
}

fn missing_role_message(required: &[AdminRole]) -> String {
    match required {
        [role] => format!(
            "access denied: this operation requires the {} role",
            role.display_name()
        ),
        roles => {
            let names: Vec<&str> = roles.iter().map(AdminRole::display_name).collect();
            format!(
                "access denied: this operation requires one of the following roles: {}",
                names.join(", ")
            )
        }
    }
}

/// Decide whether `principal` holds **any** of the `required` roles.
///
/// OR semantics: one held role from the set is sufficient. Role inheritance
/// applies (the top-level role satisfies every requirement).
///
/// - No IO
/// - No panics in release builds
/// - No side effects
///
/// `required` must be non-empty. An empty requirement is a programming error
/// at the call site and trips a debug assertion rather than being read as
/// allow-all or deny-all.
pub fn check_roles(principal: &Principal, required: &[AdminRole]) -> Result<(), AuthzError> {
    debug_assert!(
        !required.is_empty(),
        "check_roles requires a non-empty role set"
    );

    let held = principal.effective_roles();
    if required.iter().any(|role| held.contains(role)) {
        Ok(())
    } else {
        Err(AuthzError::MissingRole {
            required: required.to_vec(),
        })
    }
}

/// Authorize access to records owned by one particular member.
///
/// Ordered, short-circuit: the owner themself is allowed first; otherwise any
/// administrative role (regardless of which) is allowed; otherwise denied.
///
/// `target_owner_id` is untrusted input (typically parsed out of a request
/// path) and is compared to the principal's identity by value only.
pub fn check_self_or_admin(
    principal: &Principal,
    target_owner_id: MemberId,
) -> Result<(), AuthzError> {
    if principal.member_id == target_owner_id {
        return Ok(());
    }

    if principal.is_admin() {
        return Ok(());
    }

    Err(AuthzError::NotSelfOrAdmin)
}

/// Operation-side authorization contract (checked at the dispatch boundary).
///
/// Implement this on commands/operations that require administrative roles.
/// The calling layer should enforce the requirement **before** dispatching,
/// keeping domain aggregates auth-agnostic.
pub trait RequiredRoles {
    /// Roles of which any one permits this operation.
    ///
    /// An empty slice means the operation is open to any authenticated
    /// member (such operations are usually ownership-guarded instead, via
    /// [`crate::guard::MemberGuard`]).
    fn required_roles(&self) -> &[AdminRole];
}

/// Check a principal against an operation's declared role requirement.
pub fn authorize_operation<O: RequiredRoles>(
    principal: &Principal,
    operation: &O,
) -> Result<(), AuthzError> {
    let required = operation.required_roles();
    if required.is_empty() {
        return Ok(());
    }
    check_roles(principal, required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn member_id(n: u128) -> MemberId {
        MemberId::from_uuid(uuid::Uuid::from_u128(n))
    }

    #[test]
    fn admin_satisfies_a_specialized_requirement() {
        let principal = Principal::new(member_id(1), Some(AdminRole::Admin));
        assert!(check_roles(&principal, &[AdminRole::Treasurer]).is_ok());
    }

    #[test]
    fn held_role_satisfies_a_multi_role_requirement() {
        let principal = Principal::new(member_id(1), Some(AdminRole::Treasurer));
        assert!(check_roles(&principal, &[AdminRole::Treasurer, AdminRole::Admin]).is_ok());
    }

    #[test]
    fn unrelated_role_is_denied_and_the_message_lists_what_would_suffice() {
        let principal = Principal::new(member_id(1), Some(AdminRole::CourseCoordinator));
        let err = check_roles(&principal, &[AdminRole::Treasurer, AdminRole::Admin]).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Treasurer"));
        assert!(message.contains("Admin"));
        assert!(!message.contains("Course Coordinator"));
    }

    #[test]
    fn single_role_denial_uses_the_singular_phrasing() {
        let principal = Principal::member(member_id(1));
        let err = check_roles(&principal, &[AdminRole::TournamentCoordinator]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "access denied: this operation requires the Tournament Coordinator role"
        );
    }

    #[test]
    fn ordinary_member_may_access_their_own_records() {
        let principal = Principal::member(member_id(7));
        assert!(check_self_or_admin(&principal, member_id(7)).is_ok());
    }

    #[test]
    fn ordinary_member_is_denied_access_to_another_members_records() {
        let principal = Principal::member(member_id(7));
        let err = check_self_or_admin(&principal, member_id(8)).unwrap_err();
        assert_eq!(err, AuthzError::NotSelfOrAdmin);
    }

    #[test]
    fn ownership_denial_names_no_roles() {
        let principal = Principal::member(member_id(7));
        let message = check_self_or_admin(&principal, member_id(8))
            .unwrap_err()
            .to_string();

        for role in AdminRole::ALL {
            assert!(!message.contains(role.display_name()));
        }
        assert!(message.contains("your own records"));
    }

    #[test]
    fn any_single_admin_role_overrides_ownership() {
        for role in [
            AdminRole::Treasurer,
            AdminRole::CourseCoordinator,
            AdminRole::TournamentCoordinator,
        ] {
            let principal = Principal::new(member_id(2), Some(role));
            assert!(check_self_or_admin(&principal, member_id(1)).is_ok());
        }
    }

    #[test]
    fn top_role_overrides_ownership() {
        let principal = Principal::new(member_id(2), Some(AdminRole::Admin));
        assert!(check_self_or_admin(&principal, member_id(1)).is_ok());
    }

    struct StubOperation {
        required: Vec<AdminRole>,
    }

    impl RequiredRoles for StubOperation {
        fn required_roles(&self) -> &[AdminRole] {
            &self.required
        }
    }

    #[test]
    fn operation_with_no_required_roles_is_open_to_any_member() {
        let principal = Principal::member(member_id(1));
        let op = StubOperation { required: vec![] };
        assert!(authorize_operation(&principal, &op).is_ok());
    }

    #[test]
    fn operation_requirement_is_enforced() {
        let principal = Principal::member(member_id(1));
        let op = StubOperation {
            required: vec![AdminRole::Admin],
        };
        assert!(authorize_operation(&principal, &op).is_err());
    }

    fn any_assigned_role() -> impl Strategy<Value = Option<AdminRole>> {
        prop_oneof![
            Just(None),
            proptest::sample::select(AdminRole::ALL.to_vec()).prop_map(Some),
        ]
    }

    fn non_empty_required() -> impl Strategy<Value = Vec<AdminRole>> {
        proptest::sample::subsequence(AdminRole::ALL.to_vec(), 1..=AdminRole::ALL.len())
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: growing the required set never turns an Allow into a Deny.
        #[test]
        fn allow_is_monotone_under_required_set_growth(
            assigned in any_assigned_role(),
            base in non_empty_required(),
            extra in proptest::sample::subsequence(AdminRole::ALL.to_vec(), 0..=AdminRole::ALL.len()),
        ) {
            let principal = Principal::new(MemberId::from_uuid(uuid::Uuid::from_u128(1)), assigned);

            let mut grown = base.clone();
            for role in extra {
                if !grown.contains(&role) {
                    grown.push(role);
                }
            }

            if check_roles(&principal, &base).is_ok() {
                prop_assert!(check_roles(&principal, &grown).is_ok());
            }
        }

        /// Property: decisions are deterministic — re-evaluation never differs.
        #[test]
        fn decisions_are_idempotent(
            assigned in any_assigned_role(),
            required in non_empty_required(),
            owner in any::<u128>(),
        ) {
            let principal = Principal::new(MemberId::from_uuid(uuid::Uuid::from_u128(0)), assigned);
            let owner = MemberId::from_uuid(uuid::Uuid::from_u128(owner));

            prop_assert_eq!(
                check_roles(&principal, &required),
                check_roles(&principal, &required)
            );
            prop_assert_eq!(
                check_self_or_admin(&principal, owner),
                check_self_or_admin(&principal, owner)
            );
        }

        /// Property: self-or-admin allows exactly when the principal owns the
        /// target or holds any role at all.
        #[test]
        fn self_or_admin_matches_its_definition(
            assigned in any_assigned_role(),
            principal_id in any::<u128>(),
            owner_id in any::<u128>(),
        ) {
            let principal =
                Principal::new(MemberId::from_uuid(uuid::Uuid::from_u128(principal_id)), assigned);
            let owner = MemberId::from_uuid(uuid::Uuid::from_u128(owner_id));

            let allowed = check_self_or_admin(&principal, owner).is_ok();
            let expected = principal_id == owner_id || !principal.effective_roles().is_empty();
            prop_assert_eq!(allowed, expected);
        }

        /// Property: the effective role set is the full catalog for the top
        /// role, a singleton for any other role, and empty otherwise.
        #[test]
        fn effective_roles_trichotomy(assigned in any_assigned_role()) {
            let principal = Principal::new(MemberId::from_uuid(uuid::Uuid::from_u128(3)), assigned);
            let roles = principal.effective_roles();

            match assigned {
                None => prop_assert!(roles.is_empty()),
                Some(role) if role == AdminRole::TOP => {
                    prop_assert_eq!(roles.len(), AdminRole::ALL.len())
                }
                Some(role) => {
                    prop_assert_eq!(roles.len(), 1);
                    prop_assert!(roles.contains(&role));
                }
            }
        }
    }
}
