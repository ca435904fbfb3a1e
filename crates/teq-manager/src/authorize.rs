//! # Operation Authorization Tables
//!
//! Every privileged manager operation is named by a [`ManagerOp`] and
//! carries two static facts: the closed set of roles allowed to invoke
//! it, and whether it sits behind the issuer verification gate. Keeping
//! both as data on the enum means the authorization policy is auditable
//! in one place and testable without constructing any ledger state.
//!
//! The tables are deliberately asymmetric:
//!
//! - Supply and treasury moves (`MintTokens`, `BurnTokens`, `Withdraw`,
//!   `TransferToExternal`) belong to Admin and Issuer only — the Owner
//!   governs *who* holds those seats but cannot move value directly.
//! - Account-level compliance actions (`FreezeTokens`, `UnfreezeTokens`,
//!   whitelist toggles) extend to every privileged role including
//!   Managers.
//! - `BuyTokens` has an empty role table: eligibility is identity-based
//!   (registered investor), not role-based.

use serde::{Deserialize, Serialize};

use teq_core::{AccountId, ComplianceError};
use teq_registry::{Role, RoleRegistry};

/// A privileged operation on the token manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManagerOp {
    /// One-time issuer verification performed by the Owner.
    Verify,
    /// Mint shares onto the manager's reserve.
    MintTokens,
    /// Burn shares out of the manager's reserve.
    BurnTokens,
    /// Freeze a registered investor's outbound capability.
    FreezeTokens,
    /// Restore a registered investor's outbound capability.
    UnfreezeTokens,
    /// Force-move a holder's entire balance to a replacement account.
    ReissueTokens,
    /// Engage the share ledger's own kill-switch.
    PauseToken,
    /// Release the share ledger's kill-switch.
    UnpauseToken,
    /// Exempt an investor from auto-freeze on receipt.
    AddToWhitelist,
    /// Revoke an investor's auto-freeze exemption.
    RemoveFromWhitelist,
    /// Distribute shares from the reserve to an investor.
    TransferToBeneficiary,
    /// Investor-initiated purchase settled against the payment ledger.
    BuyTokens,
    /// Move raised payment funds out to an operator wallet.
    Withdraw,
    /// Distribute shares to an address outside the registry.
    TransferToExternal,
    /// Engage the manager-level kill-switch.
    Pause,
    /// Release the manager-level kill-switch.
    Unpause,
}

impl ManagerOp {
    /// Roles allowed to invoke the operation.
    ///
    /// An empty slice means no role grants access; the operation's own
    /// handler decides eligibility on other grounds.
    pub const fn authorized_roles(self) -> &'static [Role] {
        match self {
            Self::Verify | Self::Pause | Self::Unpause => &[Role::Owner],
            Self::MintTokens | Self::BurnTokens | Self::Withdraw | Self::TransferToExternal => {
                &[Role::Admin, Role::Issuer]
            }
            Self::FreezeTokens
            | Self::UnfreezeTokens
            | Self::AddToWhitelist
            | Self::RemoveFromWhitelist => {
                &[Role::Owner, Role::Admin, Role::Manager, Role::Issuer]
            }
            Self::ReissueTokens | Self::PauseToken | Self::UnpauseToken => {
                &[Role::Owner, Role::Admin, Role::Issuer]
            }
            Self::TransferToBeneficiary => &[Role::Admin, Role::Manager, Role::Issuer],
            Self::BuyTokens => &[],
        }
    }

    /// Whether the operation is inert until the issuer is verified.
    ///
    /// Verification itself, the whitelist toggles, and the manager-level
    /// pause controls stay available beforehand; everything else waits.
    pub const fn verification_gated(self) -> bool {
        !matches!(
            self,
            Self::Verify | Self::AddToWhitelist | Self::RemoveFromWhitelist | Self::Pause | Self::Unpause
        )
    }

    /// Whether the Owner role appears in the operation's actor set.
    ///
    /// Where it does, the Owner may act before verification; the gate
    /// never widens an actor set beyond its table.
    pub fn owner_authorized(self) -> bool {
        self.authorized_roles().contains(&Role::Owner)
    }

    /// Stable snake_case name used in errors and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Verify => "verify",
            Self::MintTokens => "mint_tokens",
            Self::BurnTokens => "burn_tokens",
            Self::FreezeTokens => "freeze_tokens",
            Self::UnfreezeTokens => "unfreeze_tokens",
            Self::ReissueTokens => "reissue_tokens",
            Self::PauseToken => "pause_token",
            Self::UnpauseToken => "unpause_token",
            Self::AddToWhitelist => "add_to_whitelist",
            Self::RemoveFromWhitelist => "remove_from_whitelist",
            Self::TransferToBeneficiary => "transfer_tokens_to_beneficiary",
            Self::BuyTokens => "buy_tokens",
            Self::Withdraw => "withdraw",
            Self::TransferToExternal => "transfer_tokens_to_external_address",
            Self::Pause => "pause",
            Self::Unpause => "unpause",
        }
    }
}

impl std::fmt::Display for ManagerOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether `caller` holds any role in `op`'s actor set.
pub fn is_authorized(op: ManagerOp, roles: &RoleRegistry, caller: AccountId) -> bool {
    op.authorized_roles()
        .iter()
        .any(|role| roles.has_role(caller, *role))
}

/// Reject `caller` with an authorization error unless a role in `op`'s
/// actor set covers it.
pub fn require_authorized(
    op: ManagerOp,
    roles: &RoleRegistry,
    caller: AccountId,
) -> Result<(), ComplianceError> {
    if !is_authorized(op, roles, caller) {
        return Err(ComplianceError::unauthorized(caller, op.name()));
    }
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────
