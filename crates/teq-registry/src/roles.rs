//! # Role Hierarchy
//!
//! Layered authority for one component of the equity platform:
//!
//! ```text
//! Owner ────▶ reassigns Admin and Issuer, transfers ownership
//!   │
//!   ├─ Admin ────▶ appoints and removes Managers
//!   ├─ Managers ──▶ intermediate operators, cannot alter roles
//!   └─ Issuer ────▶ the verified business entity, no delegation power
//! ```
//!
//! Appointing managers is deliberately Admin's exclusive privilege — not
//! Owner's. Operational delegation is kept distinct from the Owner's
//! strategic control over who holds the Admin and Issuer seats.
//!
//! Admin and Issuer start unassigned. The predicates never match an
//! unassigned tier, so until the Owner appoints one, nothing gated on that
//! role is reachable.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use teq_core::{AccountId, AuditEvent, AuditRecord, ComplianceError};

// ─── Role ────────────────────────────────────────────────────────────

/// The closed set of privileged authority tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Strategic control: role assignment, verification, emergency stops.
    Owner,
    /// Operational authority: supply, distribution, delegation to managers.
    Admin,
    /// Intermediate operator appointed by the Admin.
    Manager,
    /// The compliance-verified business entity.
    Issuer,
}

impl Role {
    /// Role name used in serialized records and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Issuer => "issuer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Role Registry ───────────────────────────────────────────────────

/// Privileged identities for one component, with capability-checked
/// reassignment.
///
/// The Owner seat is filled at construction and only moves through
/// [`transfer_ownership`](RoleRegistry::transfer_ownership). Admin and
/// Issuer are `None` until appointed. Every mutation is audited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRegistry {
    owner: AccountId,
    admin: Option<AccountId>,
    issuer: Option<AccountId>,
    managers: BTreeSet<AccountId>,
    audit: Vec<AuditRecord>,
}

impl RoleRegistry {
    /// Registry with `owner` in the Owner seat and no Admin or Issuer.
    ///
    /// # Errors
    ///
    /// Rejects a nil owner.
    pub fn new(owner: AccountId) -> Result<Self, ComplianceError> {
        if owner.is_nil() {
            return Err(ComplianceError::precondition(
                "create_roles",
                "owner is the nil account",
            ));
        }
        Ok(Self {
            owner,
            admin: None,
            issuer: None,
            managers: BTreeSet::new(),
            audit: Vec::new(),
        })
    }

    /// Registry with the Admin seat seeded at deployment.
    pub fn with_admin(owner: AccountId, admin: AccountId) -> Result<Self, ComplianceError> {
        let mut roles = Self::new(owner)?;
        if admin.is_nil() {
            return Err(ComplianceError::precondition(
                "create_roles",
                "admin is the nil account",
            ));
        }
        roles.admin = Some(admin);
        Ok(roles)
    }

    /// Registry with the Issuer seat seeded at deployment.
    pub fn with_issuer(owner: AccountId, issuer: AccountId) -> Result<Self, ComplianceError> {
        let mut roles = Self::new(owner)?;
        if issuer.is_nil() {
            return Err(ComplianceError::precondition(
                "create_roles",
                "issuer is the nil account",
            ));
        }
        roles.issuer = Some(issuer);
        Ok(roles)
    }

    // ── Predicates ───────────────────────────────────────────────────

    /// Whether `account` holds the Owner seat.
    pub fn is_owner(&self, account: AccountId) -> bool {
        self.owner == account
    }

    /// Whether `account` holds the Admin seat.
    pub fn is_admin(&self, account: AccountId) -> bool {
        self.admin == Some(account)
    }

    /// Whether `account` is in the Manager set.
    pub fn is_manager(&self, account: AccountId) -> bool {
        self.managers.contains(&account)
    }

    /// Whether `account` holds the Issuer seat.
    pub fn is_issuer(&self, account: AccountId) -> bool {
        self.issuer == Some(account)
    }

    /// Whether `account` holds `role`.
    pub fn has_role(&self, account: AccountId, role: Role) -> bool {
        match role {
            Role::Owner => self.is_owner(account),
            Role::Admin => self.is_admin(account),
            Role::Manager => self.is_manager(account),
            Role::Issuer => self.is_issuer(account),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The Owner seat.
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// The Admin seat, if appointed.
    pub fn admin(&self) -> Option<AccountId> {
        self.admin
    }

    /// The Issuer seat, if appointed.
    pub fn issuer(&self) -> Option<AccountId> {
        self.issuer
    }

    /// The Manager set, in identity order.
    pub fn managers(&self) -> impl Iterator<Item = AccountId> + '_ {
        self.managers.iter().copied()
    }

    /// Number of appointed managers.
    pub fn manager_count(&self) -> usize {
        self.managers.len()
    }

    /// Ordered log of every role mutation.
    pub fn audit_log(&self) -> &[AuditRecord] {
        &self.audit
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Reassign the Admin seat. Owner-only.
    ///
    /// # Errors
    ///
    /// Authorization failure for non-owner callers; precondition failure
    /// for a nil `new`.
    pub fn change_admin(
        &mut self,
        caller: AccountId,
        new: AccountId,
    ) -> Result<(), ComplianceError> {
        self.require_owner(caller, "change_admin")?;
        if new.is_nil() {
            return Err(ComplianceError::precondition(
                "change_admin",
                "new admin is the nil account",
            ));
        }
        let previous = self.admin;
        self.admin = Some(new);
        self.record(caller, AuditEvent::AdminChanged { previous, new });
        tracing::info!(admin = %new, "admin seat reassigned");
        Ok(())
    }

    /// Reassign the Issuer seat. Owner-only.
    pub fn change_issuer(
        &mut self,
        caller: AccountId,
        new: AccountId,
    ) -> Result<(), ComplianceError> {
        self.require_owner(caller, "change_issuer")?;
        if new.is_nil() {
            return Err(ComplianceError::precondition(
                "change_issuer",
                "new issuer is the nil account",
            ));
        }
        let previous = self.issuer;
        self.issuer = Some(new);
        self.record(caller, AuditEvent::IssuerChanged { previous, new });
        tracing::info!(issuer = %new, "issuer seat reassigned");
        Ok(())
    }

    /// Appoint `account` to the Manager set. Admin-only.
    ///
    /// # Errors
    ///
    /// Authorization failure for every non-admin caller, the Owner
    /// included; precondition failure for a nil account; state conflict if
    /// already appointed.
    pub fn add_manager(
        &mut self,
        caller: AccountId,
        account: AccountId,
    ) -> Result<(), ComplianceError> {
        self.require_admin(caller, "add_manager")?;
        if account.is_nil() {
            return Err(ComplianceError::precondition(
                "add_manager",
                "account is the nil account",
            ));
        }
        if self.managers.contains(&account) {
            return Err(ComplianceError::state_conflict(
                "add_manager",
                "account is already a manager",
            ));
        }
        self.managers.insert(account);
        self.record(caller, AuditEvent::ManagerAdded { account });
        tracing::info!(account = %account, "manager appointed");
        Ok(())
    }

    /// Remove `account` from the Manager set. Admin-only.
    pub fn remove_manager(
        &mut self,
        caller: AccountId,
        account: AccountId,
    ) -> Result<(), ComplianceError> {
        self.require_admin(caller, "remove_manager")?;
        if account.is_nil() {
            return Err(ComplianceError::precondition(
                "remove_manager",
                "account is the nil account",
            ));
        }
        if !self.managers.remove(&account) {
            return Err(ComplianceError::state_conflict(
                "remove_manager",
                "account is not a manager",
            ));
        }
        self.record(caller, AuditEvent::ManagerRemoved { account });
        tracing::info!(account = %account, "manager removed");
        Ok(())
    }

    /// Hand the Owner seat to `new`. Owner-only.
    pub fn transfer_ownership(
        &mut self,
        caller: AccountId,
        new: AccountId,
    ) -> Result<(), ComplianceError> {
        self.require_owner(caller, "transfer_ownership")?;
        if new.is_nil() {
            return Err(ComplianceError::precondition(
                "transfer_ownership",
                "new owner is the nil account",
            ));
        }
        let previous = self.owner;
        self.owner = new;
        self.record(caller, AuditEvent::OwnershipTransferred { previous, new });
        tracing::info!(previous = %previous, new = %new, "ownership transferred");
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────────

    fn require_owner(
        &self,
        caller: AccountId,
        operation: &'static str,
    ) -> Result<(), ComplianceError> {
        if !self.is_owner(caller) {
            return Err(ComplianceError::unauthorized(caller, operation));
        }
        Ok(())
    }

    fn require_admin(
        &self,
        caller: AccountId,
        operation: &'static str,
    ) -> Result<(), ComplianceError> {
        if !self.is_admin(caller) {
            return Err(ComplianceError::unauthorized(caller, operation));
        }
        Ok(())
    }

    fn record(&mut self, actor: AccountId, event: AuditEvent) {
        self.audit.push(AuditRecord::new(actor, event));
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
