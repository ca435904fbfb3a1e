//! # Pausable State Machine
//!
//! The emergency stop embedded by the share ledger, the investor registry,
//! and the token manager. Two states, two transitions:
//!
//! ```text
//! ACTIVE ──pause──▶ PAUSED ──unpause──▶ ACTIVE
//! ```
//!
//! Re-entering the current state is rejected, not ignored — a double pause
//! is a state conflict. The machine itself is pure state; the owner-only
//! rule on transitions lives in each embedding component, which knows who
//! its owner is.
//!
//! While paused, the embedding component rejects every mutation through the
//! [`ensure_active`](Pausable::ensure_active) guard; reads stay available.

use serde::{Deserialize, Serialize};

use crate::error::ComplianceError;
use crate::identity::AccountId;
use crate::temporal::Timestamp;

// ─── Pause State ─────────────────────────────────────────────────────

/// Operating state of a pausable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauseState {
    /// Mutations are accepted.
    Active,
    /// Mutations are rejected until unpaused.
    Paused,
}

impl PauseState {
    /// State name for display and error detail.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Paused => "PAUSED",
        }
    }
}

impl std::fmt::Display for PauseState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Pausable ────────────────────────────────────────────────────────

/// Pause flag with transition bookkeeping.
///
/// Records who paused and when; both are cleared on unpause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pausable {
    state: PauseState,
    paused_by: Option<AccountId>,
    paused_at: Option<Timestamp>,
}

impl Pausable {
    /// A new machine in the `Active` state.
    pub fn new() -> Self {
        Self {
            state: PauseState::Active,
            paused_by: None,
            paused_at: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> PauseState {
        self.state
    }

    /// Whether the component is paused.
    pub fn is_paused(&self) -> bool {
        self.state == PauseState::Paused
    }

    /// Who paused the component, while paused.
    pub fn paused_by(&self) -> Option<AccountId> {
        self.paused_by
    }

    /// When the component was paused, while paused.
    pub fn paused_at(&self) -> Option<Timestamp> {
        self.paused_at
    }

    /// ACTIVE → PAUSED.
    ///
    /// # Errors
    ///
    /// Returns a state conflict if `component` is already paused.
    pub fn pause(&mut self, component: &'static str, by: AccountId) -> Result<(), ComplianceError> {
        if self.state == PauseState::Paused {
            return Err(ComplianceError::state_conflict(
                "pause",
                format!("{component} is already paused"),
            ));
        }
        self.state = PauseState::Paused;
        self.paused_by = Some(by);
        self.paused_at = Some(Timestamp::now());
        Ok(())
    }

    /// PAUSED → ACTIVE.
    ///
    /// # Errors
    ///
    /// Returns a state conflict if `component` is not paused.
    pub fn unpause(&mut self, component: &'static str) -> Result<(), ComplianceError> {
        if self.state == PauseState::Active {
            return Err(ComplianceError::state_conflict(
                "unpause",
                format!("{component} is not paused"),
            ));
        }
        self.state = PauseState::Active;
        self.paused_by = None;
        self.paused_at = None;
        Ok(())
    }

    /// When-active guard: reject the calling mutation while paused.
    pub fn ensure_active(&self, component: &'static str) -> Result<(), ComplianceError> {
        match self.state {
            PauseState::Active => Ok(()),
            PauseState::Paused => Err(ComplianceError::Paused { component }),
        }
    }

    /// When-paused guard: the dual, for operations that require the stop.
    pub fn ensure_paused(&self, operation: &'static str) -> Result<(), ComplianceError> {
        match self.state {
            PauseState::Paused => Ok(()),
            PauseState::Active => Err(ComplianceError::state_conflict(
                operation,
                "component is not paused",
            )),
        }
    }
}

impl Default for Pausable {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
