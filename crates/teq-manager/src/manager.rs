//! # Token Manager
//!
//! The coordinator owning a deployed share token's entire administrative
//! surface. Deployment hands it the share ledger's ownership, so every
//! privileged ledger call is made with the manager's own account and is
//! reachable only through the manager's checks.
//!
//! ## Collaborator wiring
//!
//! ```text
//!                      ┌──────────────┐
//!        verify, mint, │ TokenManager │ owns ┌─────────────┐
//!        freeze, buy … │  (role table │─────▶│ ShareLedger │
//!            ──────────▶   + gate +   │      └─────────────┘
//!                      │   whitelist) │ reads ┌──────────────────┐
//!                      │              │──────▶│ InvestorRegistry │
//!                      │              │       └──────────────────┘
//!                      │              │ moves ┌───────────────┐
//!                      │              │──────▶│ PaymentLedger │
//!                      └──────────────┘       └───────────────┘
//! ```
//!
//! The collaborators are owned by the host, not the manager; each
//! operation receives them as arguments and identity-checks them against
//! the ids captured at deployment. A mismatched collaborator is a
//! precondition failure, never silent misdirection.
//!
//! ## Auto-freeze on receipt
//!
//! Distribution and purchase credit a registered investor and then freeze
//! the recipient unless whitelisted. New holders start locked until the
//! operator deliberately clears them; an already-frozen recipient stays
//! frozen without error.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use teq_core::{
    AccountId, Amount, AuditEvent, AuditRecord, ComplianceError, Pausable, Timestamp,
};
use teq_ledger::{PaymentLedger, ShareLedger};
use teq_registry::{InvestorRegistry, RoleRegistry};

use crate::authorize::{self, ManagerOp};

const COMPONENT: &str = "token_manager";

/// Which privileged seat the deployment seeds beside the Owner.
///
/// An administered deployment delegates day-to-day operation to an Admin
/// (who can appoint Managers); an issuer-operated deployment seats the
/// Issuer directly. The unseeded seat starts empty and can be filled by
/// the Owner later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentProfile {
    Administered,
    IssuerOperated,
}

/// The privileged operator coordinating one share token deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenManager {
    id: AccountId,
    roles: RoleRegistry,
    token_id: AccountId,
    payment_id: AccountId,
    registry_id: AccountId,
    rate: Amount,
    verified: bool,
    verified_at: Option<Timestamp>,
    whitelist: BTreeSet<AccountId>,
    pausable: Pausable,
    audit: Vec<AuditRecord>,
}

impl TokenManager {
    /// Manager for the deployment described by the collaborator ids.
    ///
    /// `rate` is the payment units charged per share unit on purchase.
    /// The caller is expected to follow up with
    /// [`ShareLedger::transfer_ownership`] so the manager actually holds
    /// the ledger's privileged surface.
    ///
    /// # Errors
    ///
    /// Rejects nil collaborator ids, a share ledger doubling as the
    /// payment asset, and a zero rate.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner: AccountId,
        profile: DeploymentProfile,
        privileged: AccountId,
        token_id: AccountId,
        payment_id: AccountId,
        registry_id: AccountId,
        rate: Amount,
    ) -> Result<Self, ComplianceError> {
        if token_id.is_nil() {
            return Err(ComplianceError::precondition(
                "create_manager",
                "share ledger identity is nil",
            ));
        }
        if payment_id.is_nil() {
            return Err(ComplianceError::precondition(
                "create_manager",
                "payment ledger identity is nil",
            ));
        }
        if registry_id.is_nil() {
            return Err(ComplianceError::precondition(
                "create_manager",
                "investor registry identity is nil",
            ));
        }
        if token_id == payment_id {
            return Err(ComplianceError::precondition(
                "create_manager",
                "share ledger and payment ledger are the same asset",
            ));
        }
        if rate == 0 {
            return Err(ComplianceError::precondition(
                "create_manager",
                "rate must be positive",
            ));
        }
        let roles = match profile {
            DeploymentProfile::Administered => RoleRegistry::with_admin(owner, privileged)?,
            DeploymentProfile::IssuerOperated => RoleRegistry::with_issuer(owner, privileged)?,
        };
        Ok(Self {
            id: AccountId::new(),
            roles,
            token_id,
            payment_id,
            registry_id,
            rate,
            verified: false,
            verified_at: None,
            whitelist: BTreeSet::new(),
            pausable: Pausable::new(),
            audit: Vec::new(),
        })
    }

    // ── Views ────────────────────────────────────────────────────────

    /// The manager's own account, the share ledger's owner after wiring.
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Identity of the managed share ledger.
    pub fn token_id(&self) -> AccountId {
        self.token_id
    }

    /// Identity of the accepted payment asset.
    pub fn payment_id(&self) -> AccountId {
        self.payment_id
    }

    /// Identity of the investor registry consulted on compliance checks.
    pub fn registry_id(&self) -> AccountId {
        self.registry_id
    }

    /// Payment units charged per share unit.
    pub fn rate(&self) -> Amount {
        self.rate
    }

    /// Whether the one-time issuer verification has been performed.
    pub fn is_issuer_verified(&self) -> bool {
        self.verified
    }

    /// When verification happened, if it has.
    pub fn verified_at(&self) -> Option<Timestamp> {
        self.verified_at
    }

    /// Whether `account` is exempt from auto-freeze on receipt.
    pub fn is_whitelisted(&self, account: AccountId) -> bool {
        self.whitelist.contains(&account)
    }

    /// Whether `account` holds the Owner seat.
    pub fn is_owner(&self, account: AccountId) -> bool {
        self.roles.is_owner(account)
    }

    /// Whether `account` holds the Admin seat.
    pub fn is_admin(&self, account: AccountId) -> bool {
        self.roles.is_admin(account)
    }

    /// Whether `account` is in the Manager set.
    pub fn is_manager(&self, account: AccountId) -> bool {
        self.roles.is_manager(account)
    }

    /// Whether `account` holds the Issuer seat.
    pub fn is_issuer(&self, account: AccountId) -> bool {
        self.roles.is_issuer(account)
    }

    /// Whether the manager-level kill-switch is engaged.
    pub fn is_paused(&self) -> bool {
        self.pausable.is_paused()
    }

    /// The manager's role hierarchy.
    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    /// Ordered log of the manager's own mutations.
    pub fn audit_log(&self) -> &[AuditRecord] {
        &self.audit
    }

    // ── Verification ─────────────────────────────────────────────────

    /// One-time issuer verification. Owner-only; irreversible.
    ///
    /// # Errors
    ///
    /// State conflict on a second call.
    pub fn verify(&mut self, caller: AccountId) -> Result<(), ComplianceError> {
        self.authorize(ManagerOp::Verify, caller)?;
        self.pausable.ensure_active(COMPONENT)?;
        if self.verified {
            return Err(ComplianceError::state_conflict(
                "verify",
                "issuer is already verified",
            ));
        }
        self.verified = true;
        self.verified_at = Some(Timestamp::now());
        self.record(caller, AuditEvent::IssuerVerified);
        tracing::info!(by = %caller, "issuer verified");
        Ok(())
    }

    // ── Supply ───────────────────────────────────────────────────────

    /// Mint `amount` shares onto the manager's reserve.
    pub fn mint_tokens(
        &mut self,
        ledger: &mut ShareLedger,
        caller: AccountId,
        amount: Amount,
    ) -> Result<(), ComplianceError> {
        self.authorize(ManagerOp::MintTokens, caller)?;
        self.pausable.ensure_active(COMPONENT)?;
        self.ensure_share_ledger(ledger, ManagerOp::MintTokens)?;
        if amount == 0 {
            return Err(ComplianceError::precondition(
                "mint_tokens",
                "amount must be positive",
            ));
        }
        ledger.mint(self.id, self.id, amount)?;
        self.record(caller, AuditEvent::Minted { to: self.id, amount });
        tracing::info!(by = %caller, amount, "reserve minted");
        Ok(())
    }

    /// Burn `amount` shares out of the manager's reserve.
    pub fn burn_tokens(
        &mut self,
        ledger: &mut ShareLedger,
        caller: AccountId,
        amount: Amount,
    ) -> Result<(), ComplianceError> {
        self.authorize(ManagerOp::BurnTokens, caller)?;
        self.pausable.ensure_active(COMPONENT)?;
        self.ensure_share_ledger(ledger, ManagerOp::BurnTokens)?;
        if amount == 0 {
            return Err(ComplianceError::precondition(
                "burn_tokens",
                "amount must be positive",
            ));
        }
        ledger.burn(self.id, amount)?;
        self.record(
            caller,
            AuditEvent::Burned {
                from: self.id,
                amount,
            },
        );
        tracing::info!(by = %caller, amount, "reserve burned");
        Ok(())
    }

    // ── Account compliance ───────────────────────────────────────────

    /// Freeze a registered investor's outbound capability.
    pub fn freeze_tokens(
        &mut self,
        ledger: &mut ShareLedger,
        registry: &InvestorRegistry,
        caller: AccountId,
        account: AccountId,
    ) -> Result<(), ComplianceError> {
        self.authorize(ManagerOp::FreezeTokens, caller)?;
        self.pausable.ensure_active(COMPONENT)?;
        self.ensure_share_ledger(ledger, ManagerOp::FreezeTokens)?;
        self.ensure_registry(registry, ManagerOp::FreezeTokens)?;
        self.require_investor(registry, account, "freeze_tokens")?;
        ledger.freeze(self.id, account)?;
        self.record(caller, AuditEvent::Frozen { account });
        tracing::warn!(by = %caller, account = %account, "investor frozen");
        Ok(())
    }

    /// Restore a registered investor's outbound capability.
    pub fn unfreeze_tokens(
        &mut self,
        ledger: &mut ShareLedger,
        registry: &InvestorRegistry,
        caller: AccountId,
        account: AccountId,
    ) -> Result<(), ComplianceError> {
        self.authorize(ManagerOp::UnfreezeTokens, caller)?;
        self.pausable.ensure_active(COMPONENT)?;
        self.ensure_share_ledger(ledger, ManagerOp::UnfreezeTokens)?;
        self.ensure_registry(registry, ManagerOp::UnfreezeTokens)?;
        self.require_investor(registry, account, "unfreeze_tokens")?;
        ledger.unfreeze(self.id, account)?;
        self.record(caller, AuditEvent::Unfrozen { account });
        tracing::info!(by = %caller, account = %account, "investor unfrozen");
        Ok(())
    }

    /// Force-move `from`'s entire holding to `to`. Both must be
    /// registered investors; the source's freeze flag is bypassed.
    pub fn reissue_tokens(
        &mut self,
        ledger: &mut ShareLedger,
        registry: &InvestorRegistry,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
    ) -> Result<(), ComplianceError> {
        self.authorize(ManagerOp::ReissueTokens, caller)?;
        self.pausable.ensure_active(COMPONENT)?;
        self.ensure_share_ledger(ledger, ManagerOp::ReissueTokens)?;
        self.ensure_registry(registry, ManagerOp::ReissueTokens)?;
        self.require_investor(registry, from, "reissue_tokens")?;
        self.require_investor(registry, to, "reissue_tokens")?;
        let value = ledger.balance_of(from);
        ledger.reissue(self.id, from, to)?;
        self.record(caller, AuditEvent::Reissued { from, to, value });
        tracing::warn!(by = %caller, from = %from, to = %to, value, "holdings reissued");
        Ok(())
    }

    // ── Share ledger pause ───────────────────────────────────────────

    /// Engage the share ledger's own kill-switch.
    ///
    /// Deliberately not gated on the manager-level pause: halting the
    /// token must stay possible while the manager itself is halted.
    pub fn pause_token(
        &mut self,
        ledger: &mut ShareLedger,
        caller: AccountId,
    ) -> Result<(), ComplianceError> {
        self.authorize(ManagerOp::PauseToken, caller)?;
        self.ensure_share_ledger(ledger, ManagerOp::PauseToken)?;
        ledger.pause(self.id)?;
        tracing::warn!(by = %caller, "share ledger paused via manager");
        Ok(())
    }

    /// Release the share ledger's kill-switch.
    pub fn unpause_token(
        &mut self,
        ledger: &mut ShareLedger,
        caller: AccountId,
    ) -> Result<(), ComplianceError> {
        self.authorize(ManagerOp::UnpauseToken, caller)?;
        self.ensure_share_ledger(ledger, ManagerOp::UnpauseToken)?;
        ledger.unpause(self.id)?;
        tracing::info!(by = %caller, "share ledger unpaused via manager");
        Ok(())
    }

    // ── Whitelist ────────────────────────────────────────────────────

    /// Exempt a registered investor from auto-freeze on receipt.
    ///
    /// Available before verification: operators prepare the whitelist
    /// while the offering is still inert.
    pub fn add_to_whitelist(
        &mut self,
        registry: &InvestorRegistry,
        caller: AccountId,
        account: AccountId,
    ) -> Result<(), ComplianceError> {
        self.authorize(ManagerOp::AddToWhitelist, caller)?;
        self.pausable.ensure_active(COMPONENT)?;
        self.ensure_registry(registry, ManagerOp::AddToWhitelist)?;
        self.require_investor(registry, account, "add_to_whitelist")?;
        if !self.whitelist.insert(account) {
            return Err(ComplianceError::state_conflict(
                "add_to_whitelist",
                "account is already whitelisted",
            ));
        }
        self.record(caller, AuditEvent::WhitelistAdded { account });
        tracing::info!(by = %caller, account = %account, "account whitelisted");
        Ok(())
    }

    /// Revoke an auto-freeze exemption.
    pub fn remove_from_whitelist(
        &mut self,
        registry: &InvestorRegistry,
        caller: AccountId,
        account: AccountId,
    ) -> Result<(), ComplianceError> {
        self.authorize(ManagerOp::RemoveFromWhitelist, caller)?;
        self.pausable.ensure_active(COMPONENT)?;
        self.ensure_registry(registry, ManagerOp::RemoveFromWhitelist)?;
        self.require_investor(registry, account, "remove_from_whitelist")?;
        if !self.whitelist.remove(&account) {
            return Err(ComplianceError::state_conflict(
                "remove_from_whitelist",
                "account is not whitelisted",
            ));
        }
        self.record(caller, AuditEvent::WhitelistRemoved { account });
        tracing::info!(by = %caller, account = %account, "whitelist exemption revoked");
        Ok(())
    }

    // ── Distribution and purchase ────────────────────────────────────

    /// Distribute `amount` shares from the reserve to a registered
    /// investor, auto-freezing the recipient unless whitelisted.
    pub fn transfer_tokens_to_beneficiary(
        &mut self,
        ledger: &mut ShareLedger,
        registry: &InvestorRegistry,
        caller: AccountId,
        account: AccountId,
        amount: Amount,
    ) -> Result<(), ComplianceError> {
        self.authorize(ManagerOp::TransferToBeneficiary, caller)?;
        self.pausable.ensure_active(COMPONENT)?;
        self.ensure_share_ledger(ledger, ManagerOp::TransferToBeneficiary)?;
        self.ensure_registry(registry, ManagerOp::TransferToBeneficiary)?;
        if amount == 0 {
            return Err(ComplianceError::precondition(
                "transfer_tokens_to_beneficiary",
                "amount must be positive",
            ));
        }
        self.require_investor(registry, account, "transfer_tokens_to_beneficiary")?;
        ledger.transfer(self.id, account, amount)?;
        self.auto_freeze(ledger, account)?;
        self.record(
            caller,
            AuditEvent::TokensDistributed {
                beneficiary: account,
                amount,
            },
        );
        tracing::info!(by = %caller, beneficiary = %account, amount, "shares distributed");
        Ok(())
    }

    /// Investor-initiated purchase: pull `amount * rate` payment units
    /// from the caller, deliver `amount` shares from the reserve.
    ///
    /// Both legs settle or neither does. The payment pull happens first;
    /// if the share leg then fails, the pull is refunded and the share
    /// leg's error is returned. Preflight checks make that path
    /// unreachable in ordinary operation.
    ///
    /// Eligibility is identity-based: the caller must be a registered
    /// investor, and no role grants access. The verification gate applies
    /// to everyone, the Owner included.
    pub fn buy_tokens(
        &mut self,
        ledger: &mut ShareLedger,
        payment: &mut dyn PaymentLedger,
        registry: &InvestorRegistry,
        caller: AccountId,
        amount: Amount,
    ) -> Result<(), ComplianceError> {
        self.require_verified(ManagerOp::BuyTokens, caller)?;
        self.pausable.ensure_active(COMPONENT)?;
        self.ensure_share_ledger(ledger, ManagerOp::BuyTokens)?;
        self.ensure_payment_ledger(payment, ManagerOp::BuyTokens)?;
        self.ensure_registry(registry, ManagerOp::BuyTokens)?;
        if amount == 0 {
            return Err(ComplianceError::precondition(
                "buy_tokens",
                "amount must be positive",
            ));
        }
        if !registry.is_investor(caller) {
            return Err(ComplianceError::unauthorized(caller, "buy_tokens"));
        }
        let value = amount.checked_mul(self.rate).ok_or_else(|| {
            ComplianceError::precondition("buy_tokens", "purchase value overflows")
        })?;

        // Preflight both legs before moving anything.
        let allowed = payment.allowance(caller, self.id);
        if allowed < value {
            return Err(ComplianceError::precondition(
                "buy_tokens",
                format!("payment allowance {allowed} is less than {value}"),
            ));
        }
        let funds = payment.balance_of(caller);
        if funds < value {
            return Err(ComplianceError::precondition(
                "buy_tokens",
                format!("payment balance {funds} is less than {value}"),
            ));
        }
        let reserve = ledger.balance_of(self.id);
        if reserve < amount {
            return Err(ComplianceError::precondition(
                "buy_tokens",
                format!("share reserve {reserve} is less than {amount}"),
            ));
        }
        if ledger.is_paused() {
            return Err(ComplianceError::Paused {
                component: "share_ledger",
            });
        }

        payment.transfer_from(self.id, caller, self.id, value)?;
        if let Err(err) = ledger.transfer(self.id, caller, amount) {
            // The refund cannot fail: the pull above just credited us.
            payment.transfer(self.id, caller, value)?;
            return Err(err);
        }
        self.auto_freeze(ledger, caller)?;
        self.record(
            caller,
            AuditEvent::TokensPurchased {
                purchaser: caller,
                value,
                amount,
            },
        );
        tracing::info!(purchaser = %caller, value, amount, "purchase settled");
        Ok(())
    }

    // ── Treasury ─────────────────────────────────────────────────────

    /// Move `value` raised payment units out to an operator wallet.
    pub fn withdraw(
        &mut self,
        payment: &mut dyn PaymentLedger,
        caller: AccountId,
        wallet: AccountId,
        value: Amount,
    ) -> Result<(), ComplianceError> {
        self.authorize(ManagerOp::Withdraw, caller)?;
        self.pausable.ensure_active(COMPONENT)?;
        self.ensure_payment_ledger(payment, ManagerOp::Withdraw)?;
        if wallet.is_nil() {
            return Err(ComplianceError::precondition(
                "withdraw",
                "wallet is the nil account",
            ));
        }
        if value == 0 {
            return Err(ComplianceError::precondition(
                "withdraw",
                "value must be positive",
            ));
        }
        payment.transfer(self.id, wallet, value)?;
        self.record(caller, AuditEvent::RaisedWithdrawn { wallet, value });
        tracing::info!(by = %caller, wallet = %wallet, value, "raised funds withdrawn");
        Ok(())
    }

    /// Distribute shares to an address outside the investor registry.
    ///
    /// The escape hatch for off-platform settlement: no registry check
    /// and no auto-freeze on the recipient.
    pub fn transfer_tokens_to_external_address(
        &mut self,
        ledger: &mut ShareLedger,
        caller: AccountId,
        account: AccountId,
        amount: Amount,
    ) -> Result<(), ComplianceError> {
        self.authorize(ManagerOp::TransferToExternal, caller)?;
        self.pausable.ensure_active(COMPONENT)?;
        self.ensure_share_ledger(ledger, ManagerOp::TransferToExternal)?;
        if account.is_nil() {
            return Err(ComplianceError::precondition(
                "transfer_tokens_to_external_address",
                "recipient is the nil account",
            ));
        }
        if amount == 0 {
            return Err(ComplianceError::precondition(
                "transfer_tokens_to_external_address",
                "amount must be positive",
            ));
        }
        ledger.transfer(self.id, account, amount)?;
        self.record(caller, AuditEvent::ExternalTransfer { account, amount });
        tracing::warn!(by = %caller, account = %account, amount, "shares distributed outside the registry");
        Ok(())
    }

    /// Direct payment into the manager is never accepted; settlement goes
    /// through [`Self::buy_tokens`].
    pub fn receive_native(&self, from: AccountId, value: Amount) -> Result<(), ComplianceError> {
        tracing::warn!(from = %from, value, "direct payment rejected");
        Err(ComplianceError::precondition(
            "receive_native",
            "direct payment is not accepted; use buy_tokens",
        ))
    }

    // ── Manager pause ────────────────────────────────────────────────

    /// Engage the manager-level kill-switch. Owner-only and available
    /// before verification.
    pub fn pause(&mut self, caller: AccountId) -> Result<(), ComplianceError> {
        self.authorize(ManagerOp::Pause, caller)?;
        self.pausable.pause(COMPONENT, caller)?;
        self.record(caller, AuditEvent::Paused);
        tracing::warn!(by = %caller, "token manager paused");
        Ok(())
    }

    /// Release the manager-level kill-switch.
    pub fn unpause(&mut self, caller: AccountId) -> Result<(), ComplianceError> {
        self.authorize(ManagerOp::Unpause, caller)?;
        self.pausable.unpause(COMPONENT)?;
        self.record(caller, AuditEvent::Unpaused);
        tracing::info!(by = %caller, "token manager unpaused");
        Ok(())
    }

    // ── Role administration ──────────────────────────────────────────
    //
    // Delegated straight to the embedded role registry, which does its
    // own authorization and audit. Not subject to the verification gate
    // or either pause flag: governance must stay operable throughout.

    /// Reassign the Admin seat. Owner-only.
    pub fn change_admin(
        &mut self,
        caller: AccountId,
        new_admin: AccountId,
    ) -> Result<(), ComplianceError> {
        self.roles.change_admin(caller, new_admin)
    }

    /// Reassign the Issuer seat. Owner-only.
    pub fn change_issuer(
        &mut self,
        caller: AccountId,
        new_issuer: AccountId,
    ) -> Result<(), ComplianceError> {
        self.roles.change_issuer(caller, new_issuer)
    }

    /// Appoint an account to the Manager set. Admin-only.
    pub fn add_manager(
        &mut self,
        caller: AccountId,
        account: AccountId,
    ) -> Result<(), ComplianceError> {
        self.roles.add_manager(caller, account)
    }

    /// Remove an account from the Manager set. Admin-only.
    pub fn remove_manager(
        &mut self,
        caller: AccountId,
        account: AccountId,
    ) -> Result<(), ComplianceError> {
        self.roles.remove_manager(caller, account)
    }

    /// Hand the Owner seat to a new account.
    pub fn transfer_ownership(
        &mut self,
        caller: AccountId,
        new_owner: AccountId,
    ) -> Result<(), ComplianceError> {
        self.roles.transfer_ownership(caller, new_owner)
    }

    // ── Internals ────────────────────────────────────────────────────

    fn authorize(&self, op: ManagerOp, caller: AccountId) -> Result<(), ComplianceError> {
        authorize::require_authorized(op, &self.roles, caller)?;
        self.require_verified(op, caller)
    }

    fn require_verified(&self, op: ManagerOp, caller: AccountId) -> Result<(), ComplianceError> {
        if !op.verification_gated() || self.verified {
            return Ok(());
        }
        if op.owner_authorized() && self.roles.is_owner(caller) {
            return Ok(());
        }
        Err(ComplianceError::ComplianceGate {
            operation: op.name(),
        })
    }

    fn ensure_share_ledger(
        &self,
        ledger: &ShareLedger,
        op: ManagerOp,
    ) -> Result<(), ComplianceError> {
        if ledger.id() != self.token_id {
            return Err(ComplianceError::precondition(
                op.name(),
                "share ledger does not match the deployment wiring",
            ));
        }
        Ok(())
    }

    fn ensure_payment_ledger(
        &self,
        payment: &dyn PaymentLedger,
        op: ManagerOp,
    ) -> Result<(), ComplianceError> {
        if payment.id() != self.payment_id {
            return Err(ComplianceError::precondition(
                op.name(),
                "payment ledger does not match the deployment wiring",
            ));
        }
        Ok(())
    }

    fn ensure_registry(
        &self,
        registry: &InvestorRegistry,
        op: ManagerOp,
    ) -> Result<(), ComplianceError> {
        if registry.id() != self.registry_id {
            return Err(ComplianceError::precondition(
                op.name(),
                "investor registry does not match the deployment wiring",
            ));
        }
        Ok(())
    }

    fn require_investor(
        &self,
        registry: &InvestorRegistry,
        account: AccountId,
        operation: &'static str,
    ) -> Result<(), ComplianceError> {
        if !registry.is_investor(account) {
            return Err(ComplianceError::precondition(
                operation,
                format!("account {account} is not a registered investor"),
            ));
        }
        Ok(())
    }

    fn auto_freeze(
        &mut self,
        ledger: &mut ShareLedger,
        account: AccountId,
    ) -> Result<(), ComplianceError> {
        if !self.whitelist.contains(&account) && !ledger.is_frozen(account) {
            ledger.freeze(self.id, account)?;
            self.record(self.id, AuditEvent::Frozen { account });
            tracing::info!(account = %account, "recipient auto-frozen");
        }
        Ok(())
    }

    fn record(&mut self, actor: AccountId, event: AuditEvent) {
        self.audit.push(AuditRecord::new(actor, event));
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
