//! # Compliance Share Ledger
//!
//! The fungible ledger of regulated ownership units. Standard
//! transfer/approve semantics, extended with the restrictions a securities
//! issuer must enforce:
//!
//! - **Freeze** — a per-account flag that blocks the account's *outbound*
//!   capability: transfer, transferFrom of its funds, approve, and
//!   allowance changes. Inbound receipt is never blocked.
//! - **Pause** — a ledger-wide kill-switch; every mutation except the
//!   pause toggles themselves is rejected while paused.
//! - **Reissue** — owner-forced move of an account's entire balance,
//!   bypassing the freeze check on the source. The lost-access recovery
//!   path.
//!
//! Supply operations (mint, burn, freeze, reissue, pause) answer only to
//! the ledger's owner. After deployment wiring the owner is the token
//! manager's account, so every privileged call arrives through it.
//!
//! ## Conservation
//!
//! The sum of all balances equals `total_supply` after every operation,
//! successful or rejected. Mint is the only place supply can grow and it
//! checks for overflow, so balance credits elsewhere cannot overflow.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use teq_core::{AccountId, Amount, AuditEvent, AuditRecord, ComplianceError, Pausable};

const COMPONENT: &str = "share_ledger";

// ─── Metadata ────────────────────────────────────────────────────────

/// Descriptive metadata carried by the ledger.
///
/// Regulated equity conventionally uses zero decimals: one unit, one
/// share. The field is carried for the exposed surface, not interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Human-readable asset name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display decimals.
    pub decimals: u8,
}

// ─── Share Ledger ────────────────────────────────────────────────────

/// Transfer-restricted fungible ledger with owner-gated supply control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLedger {
    id: AccountId,
    owner: AccountId,
    metadata: TokenMetadata,
    total_supply: Amount,
    balances: BTreeMap<AccountId, Amount>,
    allowances: BTreeMap<AccountId, BTreeMap<AccountId, Amount>>,
    frozen: BTreeSet<AccountId>,
    pausable: Pausable,
    audit: Vec<AuditRecord>,
}

impl ShareLedger {
    /// Empty ledger owned by `owner`, with zero supply.
    ///
    /// # Errors
    ///
    /// Rejects a nil owner.
    pub fn new(owner: AccountId, metadata: TokenMetadata) -> Result<Self, ComplianceError> {
        if owner.is_nil() {
            return Err(ComplianceError::precondition(
                "create_ledger",
                "owner is the nil account",
            ));
        }
        Ok(Self {
            id: AccountId::new(),
            owner,
            metadata,
            total_supply: 0,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
            frozen: BTreeSet::new(),
            pausable: Pausable::new(),
            audit: Vec::new(),
        })
    }

    // ── Views ────────────────────────────────────────────────────────

    /// The ledger's own account identity.
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// The account holding the ledger's privileged surface.
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// Asset metadata.
    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    /// Units in circulation.
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Balance held by `account`.
    pub fn balance_of(&self, account: AccountId) -> Amount {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    /// Remaining allowance `spender` may move out of `owner`'s balance.
    pub fn allowance(&self, owner: AccountId, spender: AccountId) -> Amount {
        self.allowances
            .get(&owner)
            .and_then(|per_spender| per_spender.get(&spender))
            .copied()
            .unwrap_or(0)
    }

    /// Whether `account`'s outbound capability is frozen.
    pub fn is_frozen(&self, account: AccountId) -> bool {
        self.frozen.contains(&account)
    }

    /// Whether the ledger-wide kill-switch is engaged.
    pub fn is_paused(&self) -> bool {
        self.pausable.is_paused()
    }

    /// Ordered log of every mutation.
    pub fn audit_log(&self) -> &[AuditRecord] {
        &self.audit
    }

    // ── Standard transfer surface ────────────────────────────────────

    /// Move `value` from the caller to `to`.
    ///
    /// # Errors
    ///
    /// Pause failure while paused; precondition failure if the caller is
    /// frozen, `to` is nil, or the caller's balance is insufficient.
    pub fn transfer(
        &mut self,
        caller: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<(), ComplianceError> {
        self.pausable.ensure_active(COMPONENT)?;
        self.require_unfrozen(caller, "transfer")?;
        if to.is_nil() {
            return Err(ComplianceError::precondition(
                "transfer",
                "recipient is the nil account",
            ));
        }
        self.debit(caller, value, "transfer")?;
        self.credit(to, value);
        self.record(
            caller,
            AuditEvent::Transfer {
                from: caller,
                to,
                value,
            },
        );
        tracing::info!(from = %caller, to = %to, value, "shares transferred");
        Ok(())
    }

    /// Set `spender`'s allowance over the caller's balance to `value`.
    pub fn approve(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        value: Amount,
    ) -> Result<(), ComplianceError> {
        self.pausable.ensure_active(COMPONENT)?;
        self.require_unfrozen(caller, "approve")?;
        if spender.is_nil() {
            return Err(ComplianceError::precondition(
                "approve",
                "spender is the nil account",
            ));
        }
        self.set_allowance(caller, spender, value);
        self.record(
            caller,
            AuditEvent::Approval {
                owner: caller,
                spender,
                value,
            },
        );
        Ok(())
    }

    /// Raise `spender`'s allowance by `added`.
    pub fn increase_allowance(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        added: Amount,
    ) -> Result<(), ComplianceError> {
        self.pausable.ensure_active(COMPONENT)?;
        self.require_unfrozen(caller, "increase_allowance")?;
        if spender.is_nil() {
            return Err(ComplianceError::precondition(
                "increase_allowance",
                "spender is the nil account",
            ));
        }
        let current = self.allowance(caller, spender);
        let value = current.checked_add(added).ok_or_else(|| {
            ComplianceError::precondition("increase_allowance", "allowance overflow")
        })?;
        self.set_allowance(caller, spender, value);
        self.record(
            caller,
            AuditEvent::Approval {
                owner: caller,
                spender,
                value,
            },
        );
        Ok(())
    }

    /// Lower `spender`'s allowance by `subtracted`.
    pub fn decrease_allowance(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        subtracted: Amount,
    ) -> Result<(), ComplianceError> {
        self.pausable.ensure_active(COMPONENT)?;
        self.require_unfrozen(caller, "decrease_allowance")?;
        if spender.is_nil() {
            return Err(ComplianceError::precondition(
                "decrease_allowance",
                "spender is the nil account",
            ));
        }
        let current = self.allowance(caller, spender);
        if current < subtracted {
            return Err(ComplianceError::precondition(
                "decrease_allowance",
                format!("allowance {current} is less than {subtracted}"),
            ));
        }
        let value = current - subtracted;
        self.set_allowance(caller, spender, value);
        self.record(
            caller,
            AuditEvent::Approval {
                owner: caller,
                spender,
                value,
            },
        );
        Ok(())
    }

    /// Move `value` from `from` to `to` on the strength of the caller's
    /// allowance.
    ///
    /// Both the source holder and the acting spender must be unfrozen;
    /// the recipient's freeze state is irrelevant.
    pub fn transfer_from(
        &mut self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<(), ComplianceError> {
        self.pausable.ensure_active(COMPONENT)?;
        self.require_unfrozen(from, "transfer_from")?;
        self.require_unfrozen(caller, "transfer_from")?;
        if to.is_nil() {
            return Err(ComplianceError::precondition(
                "transfer_from",
                "recipient is the nil account",
            ));
        }
        let allowed = self.allowance(from, caller);
        if allowed < value {
            return Err(ComplianceError::precondition(
                "transfer_from",
                format!("allowance {allowed} is less than {value}"),
            ));
        }
        self.debit(from, value, "transfer_from")?;
        self.credit(to, value);
        self.set_allowance(from, caller, allowed - value);
        self.record(caller, AuditEvent::Transfer { from, to, value });
        tracing::info!(spender = %caller, from = %from, to = %to, value, "shares transferred via allowance");
        Ok(())
    }

    // ── Supply surface (owner-only) ──────────────────────────────────

    /// Create `amount` new units onto `to`.
    pub fn mint(
        &mut self,
        caller: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), ComplianceError> {
        self.require_owner(caller, "mint")?;
        self.pausable.ensure_active(COMPONENT)?;
        if to.is_nil() {
            return Err(ComplianceError::precondition(
                "mint",
                "recipient is the nil account",
            ));
        }
        self.total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or_else(|| ComplianceError::precondition("mint", "total supply overflow"))?;
        self.credit(to, amount);
        self.record(caller, AuditEvent::Minted { to, amount });
        tracing::info!(to = %to, amount, "shares minted");
        Ok(())
    }

    /// Destroy `amount` units from the caller's own balance.
    pub fn burn(&mut self, caller: AccountId, amount: Amount) -> Result<(), ComplianceError> {
        self.require_owner(caller, "burn")?;
        self.pausable.ensure_active(COMPONENT)?;
        self.debit(caller, amount, "burn")?;
        // The debit bounds amount by the caller's balance, which conservation
        // bounds by total_supply.
        self.total_supply -= amount;
        self.record(caller, AuditEvent::Burned { from: caller, amount });
        tracing::info!(from = %caller, amount, "shares burned");
        Ok(())
    }

    // ── Freeze surface (owner-only) ──────────────────────────────────

    /// Block `account`'s outbound capability.
    ///
    /// # Errors
    ///
    /// State conflict if already frozen.
    pub fn freeze(&mut self, caller: AccountId, account: AccountId) -> Result<(), ComplianceError> {
        self.require_owner(caller, "freeze")?;
        self.pausable.ensure_active(COMPONENT)?;
        if account.is_nil() {
            return Err(ComplianceError::precondition(
                "freeze",
                "account is the nil account",
            ));
        }
        if self.frozen.contains(&account) {
            return Err(ComplianceError::state_conflict(
                "freeze",
                "account is already frozen",
            ));
        }
        self.frozen.insert(account);
        self.record(caller, AuditEvent::Frozen { account });
        tracing::warn!(account = %account, "account frozen");
        Ok(())
    }

    /// Restore `account`'s outbound capability.
    pub fn unfreeze(
        &mut self,
        caller: AccountId,
        account: AccountId,
    ) -> Result<(), ComplianceError> {
        self.require_owner(caller, "unfreeze")?;
        self.pausable.ensure_active(COMPONENT)?;
        if account.is_nil() {
            return Err(ComplianceError::precondition(
                "unfreeze",
                "account is the nil account",
            ));
        }
        if !self.frozen.remove(&account) {
            return Err(ComplianceError::state_conflict(
                "unfreeze",
                "account is not frozen",
            ));
        }
        self.record(caller, AuditEvent::Unfrozen { account });
        tracing::info!(account = %account, "account unfrozen");
        Ok(())
    }

    /// Force-move `from`'s entire balance to `to`, bypassing the freeze
    /// check on `from`. The lost-access recovery path.
    ///
    /// A zero-balance source is legal; the reissue then moves nothing but
    /// is still audited.
    pub fn reissue(
        &mut self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
    ) -> Result<(), ComplianceError> {
        self.require_owner(caller, "reissue")?;
        self.pausable.ensure_active(COMPONENT)?;
        if to.is_nil() {
            return Err(ComplianceError::precondition(
                "reissue",
                "recipient is the nil account",
            ));
        }
        let value = self.balance_of(from);
        if value > 0 {
            self.balances.remove(&from);
            self.credit(to, value);
        }
        self.record(caller, AuditEvent::Reissued { from, to, value });
        tracing::warn!(from = %from, to = %to, value, "holdings reissued");
        Ok(())
    }

    // ── Pause surface (owner-only) ───────────────────────────────────

    /// Engage the ledger-wide kill-switch.
    pub fn pause(&mut self, caller: AccountId) -> Result<(), ComplianceError> {
        self.require_owner(caller, "pause")?;
        self.pausable.pause(COMPONENT, caller)?;
        self.record(caller, AuditEvent::Paused);
        tracing::warn!(by = %caller, "share ledger paused");
        Ok(())
    }

    /// Release the kill-switch.
    pub fn unpause(&mut self, caller: AccountId) -> Result<(), ComplianceError> {
        self.require_owner(caller, "unpause")?;
        self.pausable.unpause(COMPONENT)?;
        self.record(caller, AuditEvent::Unpaused);
        tracing::info!(by = %caller, "share ledger unpaused");
        Ok(())
    }

    // ── Ownership ────────────────────────────────────────────────────

    /// Hand the privileged surface to `new_owner`.
    ///
    /// Deployment wiring uses this to give the token manager exclusive
    /// control. Works while paused — ownership recovery is not subject to
    /// the kill-switch.
    pub fn transfer_ownership(
        &mut self,
        caller: AccountId,
        new_owner: AccountId,
    ) -> Result<(), ComplianceError> {
        self.require_owner(caller, "transfer_ownership")?;
        if new_owner.is_nil() {
            return Err(ComplianceError::precondition(
                "transfer_ownership",
                "new owner is the nil account",
            ));
        }
        let previous = self.owner;
        self.owner = new_owner;
        self.record(
            caller,
            AuditEvent::OwnershipTransferred {
                previous,
                new: new_owner,
            },
        );
        tracing::info!(previous = %previous, new = %new_owner, "ledger ownership transferred");
        Ok(())
    }

    // ── Internals ────────────────────────────────────────────────────

    fn require_owner(
        &self,
        caller: AccountId,
        operation: &'static str,
    ) -> Result<(), ComplianceError> {
        if caller != self.owner {
            return Err(ComplianceError::unauthorized(caller, operation));
        }
        Ok(())
    }

    fn require_unfrozen(
        &self,
        account: AccountId,
        operation: &'static str,
    ) -> Result<(), ComplianceError> {
        if self.frozen.contains(&account) {
            return Err(ComplianceError::precondition(
                operation,
                format!("account {account} is frozen"),
            ));
        }
        Ok(())
    }

    fn debit(
        &mut self,
        account: AccountId,
        value: Amount,
        operation: &'static str,
    ) -> Result<(), ComplianceError> {
        let balance = self.balance_of(account);
        if balance < value {
            return Err(ComplianceError::precondition(
                operation,
                format!("balance {balance} is less than {value}"),
            ));
        }
        if balance == value {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, balance - value);
        }
        Ok(())
    }

    fn credit(&mut self, account: AccountId, value: Amount) {
        if value == 0 {
            return;
        }
        let balance = self.balance_of(account);
        // Bounded by total_supply, which the mint path checks for overflow.
        self.balances.insert(account, balance + value);
    }

    fn set_allowance(&mut self, owner: AccountId, spender: AccountId, value: Amount) {
        if value == 0 {
            if let Some(per_spender) = self.allowances.get_mut(&owner) {
                per_spender.remove(&spender);
                if per_spender.is_empty() {
                    self.allowances.remove(&owner);
                }
            }
        } else {
            self.allowances.entry(owner).or_default().insert(spender, value);
        }
    }

    fn record(&mut self, actor: AccountId, event: AuditEvent) {
        self.audit.push(AuditRecord::new(actor, event));
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn test_metadata() -> TokenMetadata {
        TokenMetadata {
            name: "Vantage Equity".to_string(),
            symbol: "VNTG".to_string(),
            decimals: 0,
        }
    }

    fn make_ledger() -> (ShareLedger, AccountId) {
        let owner = AccountId::new();
        (ShareLedger::new(owner, test_metadata()).unwrap(), owner)
    }

    fn make_funded_holder(ledger: &mut ShareLedger, owner: AccountId, amount: Amount) -> AccountId {
        let holder = AccountId::new();
        ledger.mint(owner, holder, amount).unwrap();
        holder
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn test_new_ledger_is_empty() {
        let (ledger, owner) = make_ledger();
        assert_eq!(ledger.total_supply(), 0);
        assert_eq!(ledger.owner(), owner);
        assert_eq!(ledger.metadata().symbol, "VNTG");
        assert_eq!(ledger.metadata().decimals, 0);
        assert!(!ledger.is_paused());
    }

    #[test]
    fn test_nil_owner_rejected() {
        let err = ShareLedger::new(AccountId::nil(), test_metadata()).unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
    }

    // ── Mint ─────────────────────────────────────────────────────────

    #[test]
    fn test_mint_credits_and_raises_supply() {
        let (mut ledger, owner) = make_ledger();
        let holder = AccountId::new();
        ledger.mint(owner, holder, 500).unwrap();
        assert_eq!(ledger.balance_of(holder), 500);
        assert_eq!(ledger.total_supply(), 500);
    }

    #[test]
    fn test_mint_by_stranger_rejected() {
        let (mut ledger, _) = make_ledger();
        let err = ledger
            .mint(AccountId::new(), AccountId::new(), 10)
            .unwrap_err();
        assert!(matches!(err, ComplianceError::Authorization { .. }));
        assert_eq!(ledger.total_supply(), 0);
    }

    #[test]
    fn test_mint_to_nil_rejected() {
        let (mut ledger, owner) = make_ledger();
        let err = ledger.mint(owner, AccountId::nil(), 10).unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
    }

    #[test]
    fn test_mint_while_paused_leaves_supply_unchanged() {
        let (mut ledger, owner) = make_ledger();
        ledger.pause(owner).unwrap();
        let err = ledger.mint(owner, AccountId::new(), 10).unwrap_err();
        assert!(matches!(err, ComplianceError::Paused { .. }));
        assert_eq!(ledger.total_supply(), 0);
    }

    #[test]
    fn test_mint_supply_overflow_rejected() {
        let (mut ledger, owner) = make_ledger();
        let holder = AccountId::new();
        ledger.mint(owner, holder, Amount::MAX).unwrap();
        let err = ledger.mint(owner, holder, 1).unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
        assert_eq!(ledger.total_supply(), Amount::MAX);
    }

    // ── Burn ─────────────────────────────────────────────────────────

    #[test]
    fn test_burn_reduces_supply() {
        let (mut ledger, owner) = make_ledger();
        ledger.mint(owner, owner, 100).unwrap();
        ledger.burn(owner, 40).unwrap();
        assert_eq!(ledger.balance_of(owner), 60);
        assert_eq!(ledger.total_supply(), 60);
    }

    #[test]
    fn test_burn_more_than_balance_rejected() {
        let (mut ledger, owner) = make_ledger();
        ledger.mint(owner, owner, 10).unwrap();
        let err = ledger.burn(owner, 11).unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
        assert_eq!(ledger.total_supply(), 10);
    }

    #[test]
    fn test_burn_by_stranger_rejected() {
        let (mut ledger, owner) = make_ledger();
        ledger.mint(owner, owner, 10).unwrap();
        let err = ledger.burn(AccountId::new(), 5).unwrap_err();
        assert!(matches!(err, ComplianceError::Authorization { .. }));
    }

    // ── Transfer ─────────────────────────────────────────────────────

    #[test]
    fn test_transfer_moves_balance() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        let bob = AccountId::new();
        ledger.transfer(alice, bob, 30).unwrap();
        assert_eq!(ledger.balance_of(alice), 70);
        assert_eq!(ledger.balance_of(bob), 30);
    }

    #[test]
    fn test_transfer_insufficient_rejected() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 10);
        let err = ledger.transfer(alice, AccountId::new(), 11).unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
        assert_eq!(ledger.balance_of(alice), 10);
    }

    #[test]
    fn test_transfer_to_nil_rejected() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 10);
        let err = ledger.transfer(alice, AccountId::nil(), 1).unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
    }

    #[test]
    fn test_transfer_by_frozen_account_rejected() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        ledger.freeze(owner, alice).unwrap();
        let err = ledger.transfer(alice, AccountId::new(), 1).unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
        assert_eq!(ledger.balance_of(alice), 100);
    }

    #[test]
    fn test_transfer_to_frozen_account_succeeds() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        let bob = AccountId::new();
        ledger.freeze(owner, bob).unwrap();
        ledger.transfer(alice, bob, 25).unwrap();
        assert_eq!(ledger.balance_of(bob), 25);
        assert!(ledger.is_frozen(bob));
    }

    #[test]
    fn test_self_transfer_is_a_no_op() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 50);
        ledger.transfer(alice, alice, 20).unwrap();
        assert_eq!(ledger.balance_of(alice), 50);
        assert_eq!(ledger.total_supply(), 50);
    }

    // ── Approve / allowance ──────────────────────────────────────────

    #[test]
    fn test_approve_sets_allowance() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        let spender = AccountId::new();
        ledger.approve(alice, spender, 40).unwrap();
        assert_eq!(ledger.allowance(alice, spender), 40);
    }

    #[test]
    fn test_approve_overwrites() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        let spender = AccountId::new();
        ledger.approve(alice, spender, 40).unwrap();
        ledger.approve(alice, spender, 15).unwrap();
        assert_eq!(ledger.allowance(alice, spender), 15);
    }

    #[test]
    fn test_approve_by_frozen_account_rejected() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        ledger.freeze(owner, alice).unwrap();
        let err = ledger.approve(alice, AccountId::new(), 10).unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
    }

    #[test]
    fn test_approve_nil_spender_rejected() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        let err = ledger.approve(alice, AccountId::nil(), 10).unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
    }

    #[test]
    fn test_increase_allowance() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        let spender = AccountId::new();
        ledger.approve(alice, spender, 10).unwrap();
        ledger.increase_allowance(alice, spender, 5).unwrap();
        assert_eq!(ledger.allowance(alice, spender), 15);
    }

    #[test]
    fn test_increase_allowance_overflow_rejected() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        let spender = AccountId::new();
        ledger.approve(alice, spender, Amount::MAX).unwrap();
        let err = ledger.increase_allowance(alice, spender, 1).unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
        assert_eq!(ledger.allowance(alice, spender), Amount::MAX);
    }

    #[test]
    fn test_decrease_allowance() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        let spender = AccountId::new();
        ledger.approve(alice, spender, 10).unwrap();
        ledger.decrease_allowance(alice, spender, 4).unwrap();
        assert_eq!(ledger.allowance(alice, spender), 6);
    }

    #[test]
    fn test_decrease_allowance_below_zero_rejected() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        let spender = AccountId::new();
        ledger.approve(alice, spender, 3).unwrap();
        let err = ledger.decrease_allowance(alice, spender, 4).unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
        assert_eq!(ledger.allowance(alice, spender), 3);
    }

    #[test]
    fn test_allowance_changes_by_frozen_account_rejected() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        let spender = AccountId::new();
        ledger.approve(alice, spender, 10).unwrap();
        ledger.freeze(owner, alice).unwrap();
        assert!(ledger.increase_allowance(alice, spender, 1).is_err());
        assert!(ledger.decrease_allowance(alice, spender, 1).is_err());
        assert_eq!(ledger.allowance(alice, spender), 10);
    }

    // ── transfer_from ────────────────────────────────────────────────

    #[test]
    fn test_transfer_from_spends_allowance() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        let spender = AccountId::new();
        let bob = AccountId::new();
        ledger.approve(alice, spender, 40).unwrap();
        ledger.transfer_from(spender, alice, bob, 30).unwrap();
        assert_eq!(ledger.balance_of(alice), 70);
        assert_eq!(ledger.balance_of(bob), 30);
        assert_eq!(ledger.allowance(alice, spender), 10);
    }

    #[test]
    fn test_transfer_from_exceeding_allowance_rejected() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        let spender = AccountId::new();
        ledger.approve(alice, spender, 10).unwrap();
        let err = ledger
            .transfer_from(spender, alice, AccountId::new(), 11)
            .unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
        assert_eq!(ledger.balance_of(alice), 100);
    }

    #[test]
    fn test_transfer_from_frozen_source_rejected() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        let spender = AccountId::new();
        ledger.approve(alice, spender, 50).unwrap();
        ledger.freeze(owner, alice).unwrap();
        let err = ledger
            .transfer_from(spender, alice, AccountId::new(), 10)
            .unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
    }

    #[test]
    fn test_transfer_from_frozen_spender_rejected() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        let spender = AccountId::new();
        ledger.approve(alice, spender, 50).unwrap();
        ledger.freeze(owner, spender).unwrap();
        let err = ledger
            .transfer_from(spender, alice, AccountId::new(), 10)
            .unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
        assert_eq!(ledger.balance_of(alice), 100);
    }

    #[test]
    fn test_transfer_from_insufficient_balance_rejected() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 5);
        let spender = AccountId::new();
        ledger.approve(alice, spender, 50).unwrap();
        let err = ledger
            .transfer_from(spender, alice, AccountId::new(), 10)
            .unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
        assert_eq!(ledger.allowance(alice, spender), 50);
    }

    // ── Freeze ───────────────────────────────────────────────────────

    #[test]
    fn test_freeze_marks_account() {
        let (mut ledger, owner) = make_ledger();
        let alice = AccountId::new();
        ledger.freeze(owner, alice).unwrap();
        assert!(ledger.is_frozen(alice));
    }

    #[test]
    fn test_double_freeze_rejected_state_intact() {
        let (mut ledger, owner) = make_ledger();
        let alice = AccountId::new();
        ledger.freeze(owner, alice).unwrap();
        let err = ledger.freeze(owner, alice).unwrap_err();
        assert!(matches!(err, ComplianceError::StateConflict { .. }));
        assert!(ledger.is_frozen(alice));
    }

    #[test]
    fn test_unfreeze_restores_outbound() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        ledger.freeze(owner, alice).unwrap();
        ledger.unfreeze(owner, alice).unwrap();
        ledger.transfer(alice, AccountId::new(), 10).unwrap();
        assert_eq!(ledger.balance_of(alice), 90);
    }

    #[test]
    fn test_unfreeze_not_frozen_rejected() {
        let (mut ledger, owner) = make_ledger();
        let err = ledger.unfreeze(owner, AccountId::new()).unwrap_err();
        assert!(matches!(err, ComplianceError::StateConflict { .. }));
    }

    #[test]
    fn test_freeze_nil_rejected() {
        let (mut ledger, owner) = make_ledger();
        let err = ledger.freeze(owner, AccountId::nil()).unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
    }

    #[test]
    fn test_freeze_by_stranger_rejected() {
        let (mut ledger, _) = make_ledger();
        let err = ledger
            .freeze(AccountId::new(), AccountId::new())
            .unwrap_err();
        assert!(matches!(err, ComplianceError::Authorization { .. }));
    }

    // ── Reissue ──────────────────────────────────────────────────────

    #[test]
    fn test_reissue_moves_entire_balance() {
        let (mut ledger, owner) = make_ledger();
        let lost = make_funded_holder(&mut ledger, owner, 77);
        let recovered = AccountId::new();
        ledger.reissue(owner, lost, recovered).unwrap();
        assert_eq!(ledger.balance_of(lost), 0);
        assert_eq!(ledger.balance_of(recovered), 77);
    }

    #[test]
    fn test_reissue_bypasses_freeze() {
        let (mut ledger, owner) = make_ledger();
        let lost = make_funded_holder(&mut ledger, owner, 77);
        let recovered = AccountId::new();
        ledger.freeze(owner, lost).unwrap();
        ledger.reissue(owner, lost, recovered).unwrap();
        assert_eq!(ledger.balance_of(lost), 0);
        assert_eq!(ledger.balance_of(recovered), 77);
        // The freeze flag itself is untouched by recovery.
        assert!(ledger.is_frozen(lost));
    }

    #[test]
    fn test_reissue_zero_balance_succeeds() {
        let (mut ledger, owner) = make_ledger();
        let empty = AccountId::new();
        let recovered = AccountId::new();
        ledger.reissue(owner, empty, recovered).unwrap();
        assert_eq!(ledger.balance_of(recovered), 0);
        assert!(matches!(
            ledger.audit_log().last().unwrap().event,
            AuditEvent::Reissued { value: 0, .. }
        ));
    }

    #[test]
    fn test_reissue_to_nil_rejected() {
        let (mut ledger, owner) = make_ledger();
        let lost = make_funded_holder(&mut ledger, owner, 10);
        let err = ledger.reissue(owner, lost, AccountId::nil()).unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
        assert_eq!(ledger.balance_of(lost), 10);
    }

    #[test]
    fn test_reissue_by_stranger_rejected() {
        let (mut ledger, owner) = make_ledger();
        let lost = make_funded_holder(&mut ledger, owner, 10);
        let err = ledger
            .reissue(AccountId::new(), lost, AccountId::new())
            .unwrap_err();
        assert!(matches!(err, ComplianceError::Authorization { .. }));
    }

    #[test]
    fn test_reissue_preserves_supply() {
        let (mut ledger, owner) = make_ledger();
        let lost = make_funded_holder(&mut ledger, owner, 123);
        let recovered = AccountId::new();
        ledger.reissue(owner, lost, recovered).unwrap();
        assert_eq!(ledger.total_supply(), 123);
    }

    // ── Pause ────────────────────────────────────────────────────────

    #[test]
    fn test_pause_blocks_mutations() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        ledger.pause(owner).unwrap();
        assert!(ledger.transfer(alice, AccountId::new(), 1).is_err());
        assert!(ledger.approve(alice, AccountId::new(), 1).is_err());
        assert!(ledger.freeze(owner, alice).is_err());
        assert!(ledger.reissue(owner, alice, AccountId::new()).is_err());
        assert!(ledger.burn(owner, 1).is_err());
        assert_eq!(ledger.balance_of(alice), 100);
    }

    #[test]
    fn test_unpause_restores_mutations() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        ledger.pause(owner).unwrap();
        ledger.unpause(owner).unwrap();
        ledger.transfer(alice, AccountId::new(), 10).unwrap();
        assert_eq!(ledger.balance_of(alice), 90);
    }

    #[test]
    fn test_double_pause_rejected() {
        let (mut ledger, owner) = make_ledger();
        ledger.pause(owner).unwrap();
        let err = ledger.pause(owner).unwrap_err();
        assert!(matches!(err, ComplianceError::StateConflict { .. }));
        assert!(ledger.is_paused());
    }

    #[test]
    fn test_unpause_while_active_rejected() {
        let (mut ledger, owner) = make_ledger();
        let err = ledger.unpause(owner).unwrap_err();
        assert!(matches!(err, ComplianceError::StateConflict { .. }));
    }

    #[test]
    fn test_pause_by_stranger_rejected() {
        let (mut ledger, _) = make_ledger();
        let err = ledger.pause(AccountId::new()).unwrap_err();
        assert!(matches!(err, ComplianceError::Authorization { .. }));
    }

    #[test]
    fn test_reads_available_while_paused() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 100);
        ledger.pause(owner).unwrap();
        assert_eq!(ledger.balance_of(alice), 100);
        assert_eq!(ledger.total_supply(), 100);
        assert!(!ledger.is_frozen(alice));
    }

    // ── Ownership ────────────────────────────────────────────────────

    #[test]
    fn test_transfer_ownership_moves_privilege() {
        let (mut ledger, owner) = make_ledger();
        let manager = AccountId::new();
        ledger.transfer_ownership(owner, manager).unwrap();
        assert_eq!(ledger.owner(), manager);
        ledger.mint(manager, manager, 10).unwrap();
        let err = ledger.mint(owner, owner, 10).unwrap_err();
        assert!(matches!(err, ComplianceError::Authorization { .. }));
    }

    #[test]
    fn test_transfer_ownership_nil_rejected() {
        let (mut ledger, owner) = make_ledger();
        let err = ledger
            .transfer_ownership(owner, AccountId::nil())
            .unwrap_err();
        assert!(matches!(err, ComplianceError::Precondition { .. }));
        assert_eq!(ledger.owner(), owner);
    }

    // ── Audit / serde ────────────────────────────────────────────────

    #[test]
    fn test_audit_records_operations_in_order() {
        let (mut ledger, owner) = make_ledger();
        let alice = AccountId::new();
        ledger.mint(owner, alice, 100).unwrap();
        ledger.freeze(owner, alice).unwrap();
        ledger.unfreeze(owner, alice).unwrap();
        let events: Vec<&AuditEvent> = ledger.audit_log().iter().map(|r| &r.event).collect();
        assert_eq!(
            events,
            vec![
                &AuditEvent::Minted {
                    to: alice,
                    amount: 100
                },
                &AuditEvent::Frozen { account: alice },
                &AuditEvent::Unfrozen { account: alice },
            ]
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let (mut ledger, owner) = make_ledger();
        let alice = make_funded_holder(&mut ledger, owner, 42);
        ledger.freeze(owner, alice).unwrap();
        let json = serde_json::to_string(&ledger).unwrap();
        let parsed: ShareLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.balance_of(alice), 42);
        assert!(parsed.is_frozen(alice));
        assert_eq!(parsed.total_supply(), 42);
        assert_eq!(parsed.id(), ledger.id());
    }
}
