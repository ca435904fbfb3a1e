//! # Error Types — The Compliance Rejection Taxonomy
//!
//! Every failure in the stack is one of five rejection kinds, and every
//! rejection is atomic: the failing call leaves all component state exactly
//! as it found it. There is no partial failure, no retry semantics, and no
//! fatal/recoverable distinction beyond the call failing.
//!
//! ## Kinds
//!
//! - [`Authorization`](ComplianceError::Authorization) — the caller lacks
//!   the role the operation requires.
//! - [`Precondition`](ComplianceError::Precondition) — nil account, zero
//!   amount, missing registry membership, insufficient balance or
//!   allowance, frozen acting account, arithmetic overflow, or a
//!   collaborator that is not the one bound at construction.
//! - [`StateConflict`](ComplianceError::StateConflict) — a transition into
//!   the state the component is already in (double-add, double-freeze,
//!   double-pause, double-verify).
//! - [`ComplianceGate`](ComplianceError::ComplianceGate) — a privileged
//!   operation attempted before issuer verification (the owner override
//!   bypasses this, never the role check).
//! - [`Paused`](ComplianceError::Paused) — a mutation attempted while the
//!   relevant component is paused.

use thiserror::Error;

use crate::identity::AccountId;

/// Rejection raised by any component of the equity stack.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComplianceError {
    /// Caller lacks the required role for the operation.
    #[error("account {actor} is not authorized to {operation}")]
    Authorization {
        /// The account that attempted the call.
        actor: AccountId,
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// An argument or resource failed the operation's precondition.
    #[error("{operation} precondition failed: {reason}")]
    Precondition {
        /// The operation that was attempted.
        operation: &'static str,
        /// What the precondition check found.
        reason: String,
    },

    /// The operation would re-enter the state the component is already in.
    #[error("{operation} conflicts with current state: {detail}")]
    StateConflict {
        /// The operation that was attempted.
        operation: &'static str,
        /// The conflicting state.
        detail: String,
    },

    /// Privileged operation attempted before issuer verification.
    #[error("issuer verification required before {operation}")]
    ComplianceGate {
        /// The gated operation.
        operation: &'static str,
    },

    /// Mutation attempted while the component is paused.
    #[error("{component} is paused")]
    Paused {
        /// The paused component.
        component: &'static str,
    },
}

impl ComplianceError {
    /// Authorization rejection for `actor` attempting `operation`.
    pub fn unauthorized(actor: AccountId, operation: &'static str) -> Self {
        Self::Authorization { actor, operation }
    }

    /// Precondition rejection with a reason.
    pub fn precondition(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Precondition {
            operation,
            reason: reason.into(),
        }
    }

    /// State-conflict rejection with the conflicting state.
    pub fn state_conflict(operation: &'static str, detail: impl Into<String>) -> Self {
        Self::StateConflict {
            operation,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_message_names_actor_and_operation() {
        let actor = AccountId::new();
        let err = ComplianceError::unauthorized(actor, "mint_tokens");
        let message = err.to_string();
        assert!(message.contains(&actor.to_string()));
        assert!(message.contains("mint_tokens"));
    }

    #[test]
    fn test_precondition_message() {
        let err = ComplianceError::precondition("transfer", "recipient is the nil account");
        assert_eq!(
            err.to_string(),
            "transfer precondition failed: recipient is the nil account"
        );
    }

    #[test]
    fn test_state_conflict_message() {
        let err = ComplianceError::state_conflict("freeze", "account is already frozen");
        assert_eq!(
            err.to_string(),
            "freeze conflicts with current state: account is already frozen"
        );
    }

    #[test]
    fn test_gate_message() {
        let err = ComplianceError::ComplianceGate {
            operation: "burn_tokens",
        };
        assert_eq!(
            err.to_string(),
            "issuer verification required before burn_tokens"
        );
    }

    #[test]
    fn test_paused_message() {
        let err = ComplianceError::Paused {
            component: "share_ledger",
        };
        assert_eq!(err.to_string(), "share_ledger is paused");
    }
}
