//! Ready-made authorization guards for request-handling call sites.
//!
//! Handlers should not re-derive role sets inline. They pick a named guard
//! (or build one with [`RoleGuard::any_of`]) once, then evaluate it against
//! the authenticated principal per request. Both guard kinds share the same
//! external shape: given a [`Principal`], return a decision.

use fairway_core::MemberId;

use crate::{check_roles, check_self_or_admin, AdminRole, AuthzError, Principal};

/// A role requirement bound at construction, evaluated per principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGuard {
    required: Vec<AdminRole>,
}

impl RoleGuard {
    /// Guard allowing any of the given roles.
    ///
    /// `required` must be non-empty; see [`check_roles`].
    pub fn any_of(required: impl Into<Vec<AdminRole>>) -> Self {
        let required = required.into();
        debug_assert!(!required.is_empty(), "a role guard needs at least one role");
        Self { required }
    }

    /// League administrators only.
    pub fn admin() -> Self {
        Self::any_of([AdminRole::Admin])
    }

    /// Financial operations: Treasurer or Admin.
    pub fn financial() -> Self {
        Self::any_of([AdminRole::Treasurer, AdminRole::Admin])
    }

    /// Course management: Course Coordinator or Admin.
    pub fn courses() -> Self {
        Self::any_of([AdminRole::CourseCoordinator, AdminRole::Admin])
    }

    /// Tournament management: Tournament Coordinator or Admin.
    pub fn tournaments() -> Self {
        Self::any_of([AdminRole::TournamentCoordinator, AdminRole::Admin])
    }

    /// Any administrative role at all.
    pub fn any_admin() -> Self {
        Self::any_of(AdminRole::ALL)
    }

    /// The roles this guard accepts.
    pub fn required(&self) -> &[AdminRole] {
        &self.required
    }

    pub fn check(&self, principal: &Principal) -> Result<(), AuthzError> {
        check_roles(principal, &self.required)
    }
}

/// An ownership guard bound to the member whose records are being accessed.
///
/// The owner is usually known only once request parameters are parsed, so
/// the guard is built per request rather than per route.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MemberGuard {
    owner: MemberId,
}

impl MemberGuard {
    /// Guard the records owned by `owner`.
    pub fn of(owner: MemberId) -> Self {
        Self { owner }
    }

    /// Allow the owner themself or any administrator.
    pub fn check(&self, principal: &Principal) -> Result<(), AuthzError> {
        check_self_or_admin(principal, self.owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_id(n: u128) -> MemberId {
        MemberId::from_uuid(uuid::Uuid::from_u128(n))
    }

    #[test]
    fn named_guards_carry_the_expected_role_sets() {
        assert_eq!(RoleGuard::admin().required(), &[AdminRole::Admin]);
        assert_eq!(
            RoleGuard::financial().required(),
            &[AdminRole::Treasurer, AdminRole::Admin]
        );
        assert_eq!(
            RoleGuard::courses().required(),
            &[AdminRole::CourseCoordinator, AdminRole::Admin]
        );
        assert_eq!(
            RoleGuard::tournaments().required(),
            &[AdminRole::TournamentCoordinator, AdminRole::Admin]
        );
        assert_eq!(RoleGuard::any_admin().required(), &AdminRole::ALL);
    }

    #[test]
    fn admin_passes_the_financial_guard_through_inheritance() {
        let principal = Principal::new(member_id(1), Some(AdminRole::Admin));
        assert!(RoleGuard::financial().check(&principal).is_ok());
    }

    #[test]
    fn treasurer_passes_the_financial_guard_directly() {
        let principal = Principal::new(member_id(1), Some(AdminRole::Treasurer));
        assert!(RoleGuard::financial().check(&principal).is_ok());
    }

    #[test]
    fn course_coordinator_fails_the_financial_guard() {
        let principal = Principal::new(member_id(1), Some(AdminRole::CourseCoordinator));
        assert!(RoleGuard::financial().check(&principal).is_err());
    }

    #[test]
    fn any_admin_guard_accepts_each_role_and_rejects_ordinary_members() {
        let guard = RoleGuard::any_admin();
        for role in AdminRole::ALL {
            let principal = Principal::new(member_id(1), Some(role));
            assert!(guard.check(&principal).is_ok());
        }
        assert!(guard.check(&Principal::member(member_id(1))).is_err());
    }

    #[test]
    fn member_guard_admits_the_owner_without_a_role() {
        let owner = member_id(42);
        let principal = Principal::member(owner);
        assert!(MemberGuard::of(owner).check(&principal).is_ok());
    }

    #[test]
    fn member_guard_admits_an_administrator_for_someone_elses_records() {
        let principal = Principal::new(member_id(2), Some(AdminRole::Admin));
        assert!(MemberGuard::of(member_id(1)).check(&principal).is_ok());
    }

    #[test]
    fn member_guard_rejects_an_unrelated_ordinary_member() {
        let principal = Principal::member(member_id(2));
        let err = MemberGuard::of(member_id(1)).check(&principal).unwrap_err();
        assert_eq!(err, AuthzError::NotSelfOrAdmin);
    }

    #[test]
    fn guards_reuse_is_stateless() {
        let guard = RoleGuard::tournaments();
        let coordinator = Principal::new(member_id(1), Some(AdminRole::TournamentCoordinator));
        let treasurer = Principal::new(member_id(2), Some(AdminRole::Treasurer));

        assert!(guard.check(&coordinator).is_ok());
        assert!(guard.check(&treasurer).is_err());
        assert!(guard.check(&coordinator).is_ok());
    }
}
