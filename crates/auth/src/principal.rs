use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use fairway_core::MemberId;

use crate::AdminRole;

/// A fully resolved principal for authorization decisions.
///
/// Construction of this object is intentionally decoupled from storage and
/// transport: the authentication layer builds one per request from whatever
/// it verified (session, token, seeded fixture) and it stays immutable for
/// the lifetime of that request.
///
/// A member holds at most one administrative role; `None` is an ordinary
/// member with no administrative capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub member_id: MemberId,
    pub admin_role: Option<AdminRole>,
}

impl Principal {
    pub fn new(member_id: MemberId, admin_role: Option<AdminRole>) -> Self {
        Self {
            member_id,
            admin_role,
        }
    }

    /// An ordinary member with no administrative role.
    pub fn member(member_id: MemberId) -> Self {
        Self::new(member_id, None)
    }

    /// Build a principal from a raw role identifier as stored or transported.
    ///
    /// Identifiers outside the role catalog resolve to "no role": an upstream
    /// data defect can cost a member access, but can never grant it.
    pub fn from_claimed_role(member_id: MemberId, claimed_role: Option<&str>) -> Self {
        Self::new(member_id, claimed_role.and_then(AdminRole::parse))
    }

    /// Compute the set of roles this principal effectively holds.
    ///
    /// The top-level role expands to the entire catalog; any other role is
    /// held alone; no role yields the empty set. Recomputed on every check —
    /// pure, total, deterministic.
    pub fn effective_roles(&self) -> HashSet<AdminRole> {
        match self.admin_role {
            None => HashSet::new(),
            Some(role) if role == AdminRole::TOP => AdminRole::ALL.into_iter().collect(),
            Some(role) => HashSet::from([role]),
        }
    }

    /// Whether this principal holds any administrative role at all.
    pub fn is_admin(&self) -> bool {
        !self.effective_roles().is_empty()
    }
}
