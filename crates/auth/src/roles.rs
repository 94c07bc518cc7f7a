use core::str::FromStr;

use serde::{Deserialize, Serialize};

use fairway_core::DomainError;

/// Administrative role held by a league member.
///
/// The catalog is closed: these four roles exist, and nothing outside this
/// enum is ever treated as a role. [`AdminRole::Admin`] inherits every other
/// role; the remaining roles are mutually independent (holding one never
/// implies another).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// League administrator. Inherits all other roles.
    Admin,
    /// Financial operations (dues, balances, prize payouts).
    Treasurer,
    /// Course scheduling and venue management.
    CourseCoordinator,
    /// Tournament setup and scoring.
    TournamentCoordinator,
}

impl AdminRole {
    /// Every role in the catalog, in declaration order.
    pub const ALL: [AdminRole; 4] = [
        AdminRole::Admin,
        AdminRole::Treasurer,
        AdminRole::CourseCoordinator,
        AdminRole::TournamentCoordinator,
    ];

    /// The single role that inherits the entire catalog.
    pub const TOP: AdminRole = AdminRole::Admin;

    /// Stable identifier as stored and transported.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::Treasurer => "treasurer",
            AdminRole::CourseCoordinator => "course_coordinator",
            AdminRole::TournamentCoordinator => "tournament_coordinator",
        }
    }

    /// Human-readable name used in denial messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            AdminRole::Admin => "Admin",
            AdminRole::Treasurer => "Treasurer",
            AdminRole::CourseCoordinator => "Course Coordinator",
            AdminRole::TournamentCoordinator => "Tournament Coordinator",
        }
    }

    /// Membership test against the closed catalog.
    ///
    /// Returns `None` for any identifier that is not in the catalog; callers
    /// must treat that as "no role", never as a held role.
    pub fn parse(identifier: &str) -> Option<AdminRole> {
        match identifier {
            "admin" => Some(AdminRole::Admin),
            "treasurer" => Some(AdminRole::Treasurer),
            "course_coordinator" => Some(AdminRole::CourseCoordinator),
            "tournament_coordinator" => Some(AdminRole::TournamentCoordinator),
            _ => None,
        }
    }
}

impl core::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for AdminRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdminRole::parse(s)
            .ok_or_else(|| DomainError::validation(format!("unknown admin role: {s}")))
    }
}
