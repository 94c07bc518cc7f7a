//! `fairway-auth` — pure authorization boundary for league operations.
//!
//! This crate is intentionally decoupled from HTTP and storage. An external
//! authentication layer establishes *who* a member is and hands over a
//! [`Principal`]; this crate decides *what they may do* and hands back the
//! decision as a plain value.

pub mod authorize;
pub mod guard;
pub mod principal;
pub mod roles;

pub use authorize::{authorize_operation, check_roles, check_self_or_admin, AuthzError, RequiredRoles};
pub use guard::{MemberGuard, RoleGuard};
pub use principal::Principal;
pub use roles::AdminRole;
