//! Member aggregate for league membership management.
//!
//! This module implements the member lifecycle with single-slot role grants
//! and the league's financial credit limit.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fairway_core::{Aggregate, AggregateRoot, DomainError, MemberId};

use fairway_auth::{AdminRole, Principal, RequiredRoles};

/// Lowest balance a member account may reach, in cents (−$500 credit limit).
pub const CREDIT_LIMIT_CENTS: i64 = -50_000;

/// Age from which a member may play the forward/senior tees.
const SENIOR_TEE_AGE: i32 = 75;

// ─────────────────────────────────────────────────────────────────────────────
// Member Status & Type
// ─────────────────────────────────────────────────────────────────────────────

/// Membership status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Member is in good standing and may transact.
    #[default]
    Active,
    /// Member has left or been deactivated; no participation.
    Inactive,
}

impl core::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MemberStatus::Active => write!(f, "Active"),
            MemberStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

/// Membership level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberType {
    /// New member awaiting full membership.
    #[default]
    Candidate,
    Full,
    Lifetime,
}

impl core::fmt::Display for MemberType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MemberType::Candidate => write!(f, "Candidate"),
            MemberType::Full => write!(f, "Full"),
            MemberType::Lifetime => write!(f, "Lifetime"),
        }
    }
}

/// Qualitative description of an account balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceStanding {
    /// Zero or positive balance.
    Credit,
    /// Down to −$100.
    MinorDebit,
    /// Down to −$300.
    SignificantDebit,
    /// Below −$300, approaching the credit limit.
    CriticalDebit,
}

// ─────────────────────────────────────────────────────────────────────────────
// Member Aggregate
// ─────────────────────────────────────────────────────────────────────────────

/// Member aggregate.
///
/// # Invariants
/// - A member holds at most one administrative role (single slot).
/// - Inactive members cannot be granted roles.
/// - The balance never falls below [`CREDIT_LIMIT_CENTS`].
#[derive(Debug, Clone)]
pub struct Member {
    pub id: MemberId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Golf Handicap and Information Network id, when the member has one.
    pub ghin_id: Option<String>,
    pub status: MemberStatus,
    pub member_type: MemberType,
    pub admin_role: Option<AdminRole>,
    /// Account balance in cents; negative means the member owes the league.
    pub balance_cents: i64,
    pub signup_date: NaiveDate,
    pub version: u64,
    pub enrolled: bool,
}

impl Member {
    pub fn empty(id: MemberId) -> Self {
        Self {
            id,
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            phone_number: None,
            date_of_birth: None,
            ghin_id: None,
            status: MemberStatus::Active,
            member_type: MemberType::Candidate,
            admin_role: None,
            balance_cents: 0,
            signup_date: NaiveDate::MIN,
            version: 0,
            enrolled: false,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == MemberStatus::Active
    }

    /// Whether the member may enter league play.
    pub fn can_participate(&self) -> bool {
        self.is_active()
            && matches!(self.member_type, MemberType::Full | MemberType::Lifetime)
    }

    /// Whether the member qualifies for the forward/senior tees on `as_of`.
    ///
    /// False when no date of birth is on file.
    pub fn is_senior_eligible(&self, as_of: NaiveDate) -> bool {
        let Some(dob) = self.date_of_birth else {
            return false;
        };

        let mut age = as_of.year() - dob.year();
        if (as_of.month(), as_of.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        age >= SENIOR_TEE_AGE
    }

    pub fn balance_standing(&self) -> BalanceStanding {
        if self.balance_cents >= 0 {
            BalanceStanding::Credit
        } else if self.balance_cents >= -10_000 {
            BalanceStanding::MinorDebit
        } else if self.balance_cents >= -30_000 {
            BalanceStanding::SignificantDebit
        } else {
            BalanceStanding::CriticalDebit
        }
    }

    /// The authorization principal for this member.
    ///
    /// This is what the authentication layer hands to `fairway-auth` once it
    /// has verified the member's identity for a request.
    pub fn principal(&self) -> Principal {
        Principal::new(self.id, self.admin_role)
    }

    fn ensure_enrolled(&self) -> Result<(), DomainError> {
        if !self.enrolled {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), DomainError> {
        if self.status == MemberStatus::Inactive {
            return Err(DomainError::invariant("member is inactive"));
        }
        Ok(())
    }
}

impl AggregateRoot for Member {
    type Id = MemberId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

/// Command to enroll a new member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollMember {
    pub member_id: MemberId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub member_type: MemberType,
    pub date_of_birth: Option<NaiveDate>,
    pub ghin_id: Option<String>,
    pub signup_date: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

/// Command to grant an administrative role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignAdminRole {
    pub member_id: MemberId,
    pub role: AdminRole,
    pub occurred_at: DateTime<Utc>,
}

/// Command to revoke the member's administrative role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeAdminRole {
    pub member_id: MemberId,
    pub occurred_at: DateTime<Utc>,
}

/// Command to deactivate a member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeactivateMember {
    pub member_id: MemberId,
    pub reason: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command to reactivate an inactive member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactivateMember {
    pub member_id: MemberId,
    pub occurred_at: DateTime<Utc>,
}

/// Command to post a signed balance adjustment (dues, fees, prizes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustBalance {
    pub member_id: MemberId,
    /// Signed amount in cents; positive credits the member.
    pub amount_cents: i64,
    pub reason: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command to update the member's contact details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateContactInfo {
    pub member_id: MemberId,
    pub phone_number: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// All member commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MemberCommand {
    Enroll(EnrollMember),
    AssignAdminRole(AssignAdminRole),
    RevokeAdminRole(RevokeAdminRole),
    Deactivate(DeactivateMember),
    Reactivate(ReactivateMember),
    AdjustBalance(AdjustBalance),
    UpdateContactInfo(UpdateContactInfo),
}

impl RequiredRoles for MemberCommand {
    fn required_roles(&self) -> &[AdminRole] {
        match self {
            MemberCommand::Enroll(_)
            | MemberCommand::AssignAdminRole(_)
            | MemberCommand::RevokeAdminRole(_)
            | MemberCommand::Deactivate(_)
            | MemberCommand::Reactivate(_) => &[AdminRole::Admin],
            MemberCommand::AdjustBalance(_) => &[AdminRole::Treasurer, AdminRole::Admin],
            // Ownership-guarded at the boundary (MemberGuard), not role-gated.
            MemberCommand::UpdateContactInfo(_) => &[],
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

/// Event emitted when a member is enrolled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberEnrolled {
    pub member_id: MemberId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub member_type: MemberType,
    pub date_of_birth: Option<NaiveDate>,
    pub ghin_id: Option<String>,
    pub signup_date: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}

/// Event emitted when an administrative role is granted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRoleAssigned {
    pub member_id: MemberId,
    pub role: AdminRole,
    pub occurred_at: DateTime<Utc>,
}

/// Event emitted when the administrative role is revoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRoleRevoked {
    pub member_id: MemberId,
    /// The role the member held until now.
    pub role: AdminRole,
    pub occurred_at: DateTime<Utc>,
}

/// Event emitted when a member is deactivated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDeactivated {
    pub member_id: MemberId,
    pub reason: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event emitted when a member is reactivated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberReactivated {
    pub member_id: MemberId,
    pub occurred_at: DateTime<Utc>,
}

/// Event emitted when a balance adjustment is posted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceAdjusted {
    pub member_id: MemberId,
    pub amount_cents: i64,
    pub balance_after_cents: i64,
    pub reason: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event emitted when contact details change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfoUpdated {
    pub member_id: MemberId,
    pub phone_number: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// All member events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MemberEvent {
    Enrolled(MemberEnrolled),
    AdminRoleAssigned(AdminRoleAssigned),
    AdminRoleRevoked(AdminRoleRevoked),
    Deactivated(MemberDeactivated),
    Reactivated(MemberReactivated),
    BalanceAdjusted(BalanceAdjusted),
    ContactInfoUpdated(ContactInfoUpdated),
}

impl MemberEvent {
    /// Stable event name/type identifier.
    pub fn event_type(&self) -> &'static str {
        match self {
            MemberEvent::Enrolled(_) => "members.member.enrolled",
            MemberEvent::AdminRoleAssigned(_) => "members.member.admin_role_assigned",
            MemberEvent::AdminRoleRevoked(_) => "members.member.admin_role_revoked",
            MemberEvent::Deactivated(_) => "members.member.deactivated",
            MemberEvent::Reactivated(_) => "members.member.reactivated",
            MemberEvent::BalanceAdjusted(_) => "members.member.balance_adjusted",
            MemberEvent::ContactInfoUpdated(_) => "members.member.contact_info_updated",
        }
    }

    /// When the event occurred (business time).
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            MemberEvent::Enrolled(e) => e.occurred_at,
            MemberEvent::AdminRoleAssigned(e) => e.occurred_at,
            MemberEvent::AdminRoleRevoked(e) => e.occurred_at,
            MemberEvent::Deactivated(e) => e.occurred_at,
            MemberEvent::Reactivated(e) => e.occurred_at,
            MemberEvent::BalanceAdjusted(e) => e.occurred_at,
            MemberEvent::ContactInfoUpdated(e) => e.occurred_at,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Aggregate Implementation
// ─────────────────────────────────────────────────────────────────────────────

impl Aggregate for Member {
    type Command = MemberCommand;
    type Event = MemberEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            MemberEvent::Enrolled(e) => self.apply_enrolled(e),
            MemberEvent::AdminRoleAssigned(e) => self.apply_role_assigned(e),
            MemberEvent::AdminRoleRevoked(e) => self.apply_role_revoked(e),
            MemberEvent::Deactivated(e) => self.apply_deactivated(e),
            MemberEvent::Reactivated(e) => self.apply_reactivated(e),
            MemberEvent::BalanceAdjusted(e) => self.apply_balance_adjusted(e),
            MemberEvent::ContactInfoUpdated(e) => self.apply_contact_info_updated(e),
        }
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            MemberCommand::Enroll(cmd) => self.handle_enroll(cmd),
            MemberCommand::AssignAdminRole(cmd) => self.handle_assign_role(cmd),
            MemberCommand::RevokeAdminRole(cmd) => self.handle_revoke_role(cmd),
            MemberCommand::Deactivate(cmd) => self.handle_deactivate(cmd),
            MemberCommand::Reactivate(cmd) => self.handle_reactivate(cmd),
            MemberCommand::AdjustBalance(cmd) => self.handle_adjust_balance(cmd),
            MemberCommand::UpdateContactInfo(cmd) => self.handle_update_contact_info(cmd),
        }
    }
}

impl Member {
    // ─────────────────────────────────────────────────────────────────────────
    // Command Handlers
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_enroll(&self, cmd: &EnrollMember) -> Result<Vec<MemberEvent>, DomainError> {
        if self.enrolled {
            return Err(DomainError::invariant("member already enrolled"));
        }

        if cmd.email.trim().is_empty() || !cmd.email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }

        if cmd.first_name.trim().is_empty() || cmd.last_name.trim().is_empty() {
            return Err(DomainError::validation("member name cannot be empty"));
        }

        Ok(vec![MemberEvent::Enrolled(MemberEnrolled {
            member_id: cmd.member_id,
            email: cmd.email.trim().to_lowercase(),
            first_name: cmd.first_name.trim().to_string(),
            last_name: cmd.last_name.trim().to_string(),
            member_type: cmd.member_type,
            date_of_birth: cmd.date_of_birth,
            ghin_id: cmd.ghin_id.clone(),
            signup_date: cmd.signup_date,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_assign_role(&self, cmd: &AssignAdminRole) -> Result<Vec<MemberEvent>, DomainError> {
        self.ensure_enrolled()?;
        self.ensure_active()?;

        // Single role slot; revoke first to change roles.
        if self.admin_role.is_some() {
            return Err(DomainError::invariant(
                "member already holds an administrative role",
            ));
        }

        Ok(vec![MemberEvent::AdminRoleAssigned(AdminRoleAssigned {
            member_id: cmd.member_id,
            role: cmd.role,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_revoke_role(&self, cmd: &RevokeAdminRole) -> Result<Vec<MemberEvent>, DomainError> {
        self.ensure_enrolled()?;

        let Some(role) = self.admin_role else {
            return Err(DomainError::invariant("no administrative role assigned"));
        };

        Ok(vec![MemberEvent::AdminRoleRevoked(AdminRoleRevoked {
            member_id: cmd.member_id,
            role,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deactivate(&self, cmd: &DeactivateMember) -> Result<Vec<MemberEvent>, DomainError> {
        self.ensure_enrolled()?;

        if self.status == MemberStatus::Inactive {
            return Err(DomainError::invariant("member already inactive"));
        }

        Ok(vec![MemberEvent::Deactivated(MemberDeactivated {
            member_id: cmd.member_id,
            reason: cmd.reason.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_reactivate(&self, cmd: &ReactivateMember) -> Result<Vec<MemberEvent>, DomainError> {
        self.ensure_enrolled()?;

        if self.status == MemberStatus::Active {
            return Err(DomainError::invariant("member already active"));
        }

        Ok(vec![MemberEvent::Reactivated(MemberReactivated {
            member_id: cmd.member_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_adjust_balance(&self, cmd: &AdjustBalance) -> Result<Vec<MemberEvent>, DomainError> {
        self.ensure_enrolled()?;

        if cmd.amount_cents == 0 {
            return Err(DomainError::validation("adjustment amount cannot be zero"));
        }

        let balance_after = self.balance_cents + cmd.amount_cents;
        if balance_after < CREDIT_LIMIT_CENTS {
            return Err(DomainError::invariant(
                "balance cannot fall below the credit limit",
            ));
        }

        Ok(vec![MemberEvent::BalanceAdjusted(BalanceAdjusted {
            member_id: cmd.member_id,
            amount_cents: cmd.amount_cents,
            balance_after_cents: balance_after,
            reason: cmd.reason.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update_contact_info(
        &self,
        cmd: &UpdateContactInfo,
    ) -> Result<Vec<MemberEvent>, DomainError> {
        self.ensure_enrolled()?;

        Ok(vec![MemberEvent::ContactInfoUpdated(ContactInfoUpdated {
            member_id: cmd.member_id,
            phone_number: cmd.phone_number.clone(),
            occurred_at: cmd.occurred_at,
        })])
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event Appliers
    // ─────────────────────────────────────────────────────────────────────────

    fn apply_enrolled(&mut self, e: &MemberEnrolled) {
        self.id = e.member_id;
        self.email = e.email.clone();
        self.first_name = e.first_name.clone();
        self.last_name = e.last_name.clone();
        self.member_type = e.member_type;
        self.date_of_birth = e.date_of_birth;
        self.ghin_id = e.ghin_id.clone();
        self.signup_date = e.signup_date;
        self.status = MemberStatus::Active;
        self.admin_role = None;
        self.balance_cents = 0;
        self.enrolled = true;
    }

    fn apply_role_assigned(&mut self, e: &AdminRoleAssigned) {
        self.admin_role = Some(e.role);
    }

    fn apply_role_revoked(&mut self, _e: &AdminRoleRevoked) {
        self.admin_role = None;
    }

    fn apply_deactivated(&mut self, _e: &MemberDeactivated) {
        self.status = MemberStatus::Inactive;
    }

    fn apply_reactivated(&mut self, _e: &MemberReactivated) {
        self.status = MemberStatus::Active;
    }

    fn apply_balance_adjusted(&mut self, e: &BalanceAdjusted) {
        self.balance_cents = e.balance_after_cents;
    }

    fn apply_contact_info_updated(&mut self, e: &ContactInfoUpdated) {
        self.phone_number = e.phone_number.clone();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
