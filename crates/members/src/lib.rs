//! `fairway-members` — league member domain.
//!
//! Member profiles, lifecycle (enrollment, status changes, role grants,
//! balance postings) and the golf-specific eligibility rules. The aggregate
//! is auth-agnostic: role requirements are declared on commands via
//! [`fairway_auth::RequiredRoles`] and enforced by the calling layer before
//! dispatch.

pub mod member;

pub use member::{
    AdjustBalance, AssignAdminRole, BalanceStanding, DeactivateMember, EnrollMember, Member,
    MemberCommand, MemberEvent, MemberStatus, MemberType, ReactivateMember, RevokeAdminRole,
    UpdateContactInfo, CREDIT_LIMIT_CENTS,
};
