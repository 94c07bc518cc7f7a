//! Authorization audit events.

use fairway_auth::{AuthzError, Principal};

/// Record a denied authorization decision.
///
/// Called by the request-handling layer after a check returns a denial and
/// before it is translated into a protocol response. The decision itself is
/// unaffected; this only emits a structured warning.
pub fn denied(principal: &Principal, error: &AuthzError) {
    tracing::warn!(
        member_id = %principal.member_id,
        error = %error,
        "authorization denied"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairway_core::MemberId;

    #[test]
    fn recording_a_denial_does_not_disturb_the_decision() {
        let principal = Principal::member(MemberId::new());
        let error = AuthzError::NotSelfOrAdmin;

        denied(&principal, &error);

        // Still the same value afterwards; nothing was consumed or mutated.
        assert_eq!(error, AuthzError::NotSelfOrAdmin);
    }
}
