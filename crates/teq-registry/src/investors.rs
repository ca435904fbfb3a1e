//! # Investor Registry
//!
//! The set of accounts cleared through KYC to hold the regulated share
//! token. Membership is a strict state machine, not a set union: adding an
//! account that is already registered is a conflict, as is removing one
//! that is not. The registry carries its own role tier (Owner or Admin may
//! change membership) and its own pause flag.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use teq_core::{AccountId, AuditEvent, AuditRecord, ComplianceError, Pausable};

use crate::roles::RoleRegistry;

const COMPONENT: &str = "investor_registry";

/// Approved-investor membership with owner/admin-gated changes.
///
/// The registry has its own account identity, bound into the token manager
/// at construction so operations can verify they were handed the right
/// registry instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestorRegistry {
    id: AccountId,
    roles: RoleRegistry,
    members: BTreeSet<AccountId>,
    pausable: Pausable,
    audit: Vec<AuditRecord>,
}

impl InvestorRegistry {
    /// Empty registry owned by `owner`.
    ///
    /// # Errors
    ///
    /// Rejects a nil owner.
    pub fn new(owner: AccountId) -> Result<Self, ComplianceError> {
        Ok(Self {
            id: AccountId::new(),
            roles: RoleRegistry::new(owner)?,
            members: BTreeSet::new(),
            pausable: Pausable::new(),
            audit: Vec::new(),
        })
    }

    // ── Views ────────────────────────────────────────────────────────

    /// The registry's own account identity.
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Whether `account` is an approved investor.
    pub fn is_investor(&self, account: AccountId) -> bool {
        self.members.contains(&account)
    }

    /// Number of approved investors.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Approved investors, in identity order.
    pub fn investors(&self) -> impl Iterator<Item = AccountId> + '_ {
        self.members.iter().copied()
    }

    /// Whether membership changes are currently suspended.
    pub fn is_paused(&self) -> bool {
        self.pausable.is_paused()
    }

    /// The registry's role tier.
    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    /// Ordered log of membership and pause mutations.
    pub fn audit_log(&self) -> &[AuditRecord] {
        &self.audit
    }

    // ── Membership ───────────────────────────────────────────────────

    /// Approve `account` as an investor. Owner-or-Admin-only.
    ///
    /// # Errors
    ///
    /// Authorization failure for other callers; pause failure while the
    /// registry is paused; precondition failure for a nil account; state
    /// conflict if already registered.
    pub fn add_investor(
        &mut self,
        caller: AccountId,
        account: AccountId,
    ) -> Result<(), ComplianceError> {
        self.require_owner_or_admin(caller, "add_investor")?;
        self.pausable.ensure_active(COMPONENT)?;
        if account.is_nil() {
            return Err(ComplianceError::precondition(
                "add_investor",
                "account is the nil account",
            ));
        }
        if self.members.contains(&account) {
            return Err(ComplianceError::state_conflict(
                "add_investor",
                "account is already registered",
            ));
        }
        self.members.insert(account);
        self.record(caller, AuditEvent::InvestorAdded { account });
        tracing::info!(account = %account, "investor registered");
        Ok(())
    }

    /// Remove `account` from the registry. Owner-or-Admin-only.
    pub fn remove_investor(
        &mut self,
        caller: AccountId,
        account: AccountId,
    ) -> Result<(), ComplianceError> {
        self.require_owner_or_admin(caller, "remove_investor")?;
        self.pausable.ensure_active(COMPONENT)?;
        if account.is_nil() {
            return Err(ComplianceError::precondition(
                "remove_investor",
                "account is the nil account",
            ));
        }
        if !self.members.remove(&account) {
            return Err(ComplianceError::state_conflict(
                "remove_investor",
                "account is not registered",
            ));
        }
        self.record(caller, AuditEvent::InvestorRemoved { account });
        tracing::info!(account = %account, "investor removed");
        Ok(())
    }

    // ── Pause ────────────────────────────────────────────────────────

    /// Suspend membership changes. Owner-only.
    pub fn pause(&mut self, caller: AccountId) -> Result<(), ComplianceError> {
        self.require_owner(caller, "pause")?;
        self.pausable.pause(COMPONENT, caller)?;
        self.record(caller, AuditEvent::Paused);
        tracing::warn!(by = %caller, "investor registry paused");
        Ok(())
    }

    /// Resume membership changes. Owner-only.
    pub fn unpause(&mut self, caller: AccountId) -> Result<(), ComplianceError> {
        self.require_owner(caller, "unpause")?;
        self.pausable.unpause(COMPONENT)?;
        self.record(caller, AuditEvent::Unpaused);
        tracing::info!(by = %caller, "investor registry unpaused");
        Ok(())
    }

    // ── Role administration ──────────────────────────────────────────

    /// Reassign the registry's Admin seat. Owner-only.
    pub fn change_admin(
        &mut self,
        caller: AccountId,
        new: AccountId,
    ) -> Result<(), ComplianceError> {
        self.roles.change_admin(caller, new)
    }

    /// Hand the registry to a new owner. Owner-only.
    pub fn transfer_ownership(
        &mut self,
        caller: AccountId,
        new: AccountId,
    ) -> Result<(), ComplianceError> {
        self.roles.transfer_ownership(caller, new)
    }

    // ── Internals ────────────────────────────────────────────────────

    fn require_owner(
        &self,
        caller: AccountId,
        operation: &'static str,
    ) -> Result<(), ComplianceError> {
        if !self.roles.is_owner(caller) {
            return Err(ComplianceError::unauthorized(caller, operation));
        }
        Ok(())
    }

    fn require_owner_or_admin(
        &self,
        caller: AccountId,
        operation: &'static str,
    ) -> Result<(), ComplianceError> {
        if !self.roles.is_owner(caller) && !self.roles.is_admin(caller) {
            return Err(ComplianceError::unauthorized(caller, operation));
        }
        Ok(())
    }

    fn record(&mut self, actor: AccountId, event: AuditEvent) {
        self.audit.push(AuditRecord::new(actor, event));
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
