//! # Audit Records
//!
//! Every authorized mutation in the stack emits a structured audit record:
//! the acting account, the operation kind with the affected account(s) and
//! amount where applicable, and a UTC timestamp. Each component keeps its
//! own ordered log. The log is part of the component's contract — the
//! durable audit trail regulators read — not incidental logging.

use serde::{Deserialize, Serialize};

use crate::identity::{AccountId, Amount};
use crate::temporal::Timestamp;

/// The operation kinds a component can record.
///
/// One closed enumeration across the stack so that audit trails from the
/// ledger, the registry, the role hierarchy, and the manager share a single
/// vocabulary. Role and registry events carry the affected account; balance
/// events carry the accounts and the amount moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditEvent {
    /// Component ownership handed to a new account.
    OwnershipTransferred {
        previous: AccountId,
        new: AccountId,
    },
    /// Admin tier reassigned. `previous` is `None` while unassigned.
    AdminChanged {
        previous: Option<AccountId>,
        new: AccountId,
    },
    /// Issuer tier reassigned. `previous` is `None` while unassigned.
    IssuerChanged {
        previous: Option<AccountId>,
        new: AccountId,
    },
    /// Account appointed to the manager set.
    ManagerAdded { account: AccountId },
    /// Account removed from the manager set.
    ManagerRemoved { account: AccountId },
    /// Account approved into the investor registry.
    InvestorAdded { account: AccountId },
    /// Account removed from the investor registry.
    InvestorRemoved { account: AccountId },
    /// Component paused.
    Paused,
    /// Component unpaused.
    Unpaused,
    /// Supply created onto an account.
    Minted { to: AccountId, amount: Amount },
    /// Supply destroyed from an account.
    Burned { from: AccountId, amount: Amount },
    /// Balance moved between accounts.
    Transfer {
        from: AccountId,
        to: AccountId,
        value: Amount,
    },
    /// Allowance set for a spender.
    Approval {
        owner: AccountId,
        spender: AccountId,
        value: Amount,
    },
    /// Account's outbound capability frozen.
    Frozen { account: AccountId },
    /// Account's outbound capability restored.
    Unfrozen { account: AccountId },
    /// Entire balance force-moved for lost-access recovery.
    Reissued {
        from: AccountId,
        to: AccountId,
        value: Amount,
    },
    /// One-way issuer verification completed.
    IssuerVerified,
    /// Account exempted from auto-freeze on receipt.
    WhitelistAdded { account: AccountId },
    /// Auto-freeze exemption revoked.
    WhitelistRemoved { account: AccountId },
    /// Shares distributed from the manager reserve to an investor.
    TokensDistributed {
        beneficiary: AccountId,
        amount: Amount,
    },
    /// Investor purchase settled across both ledgers.
    TokensPurchased {
        purchaser: AccountId,
        value: Amount,
        amount: Amount,
    },
    /// Raised payment funds moved out of the manager.
    RaisedWithdrawn { wallet: AccountId, value: Amount },
    /// Shares moved to an address outside the investor registry.
    ExternalTransfer { account: AccountId, amount: Amount },
}

/// One entry in a component's audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// The account that performed the mutation.
    pub actor: AccountId,
    /// What happened.
    pub event: AuditEvent,
    /// When it happened.
    pub at: Timestamp,
}

impl AuditRecord {
    /// Record `event` as performed by `actor` now.
    pub fn new(actor: AccountId, event: AuditEvent) -> Self {
        Self {
            actor,
            event,
            at: Timestamp::now(),
        }
    }
}
