//! # Settlement Asset Port
//!
//! The purchase flow settles against whatever fungible asset the operator
//! accepts. [`PaymentLedger`] is the port the token manager drives:
//! balance and allowance reads plus the three moves settlement needs.
//! [`PaymentToken`] is the in-process implementation used in deployments
//! and tests.
//!
//! Deliberately unrestricted: no freeze, no pause, no roles. Compliance
//! lives on the share side; the payment asset only has to move value and
//! report it faithfully.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use teq_core::{AccountId, Amount, ComplianceError};

// ─── Port ────────────────────────────────────────────────────────────

/// Fungible asset the platform settles purchases in.
pub trait PaymentLedger {
    /// The asset's own account identity, used for deployment wiring checks.
    fn id(&self) -> AccountId;

    /// Balance held by `account`.
    fn balance_of(&self, account: AccountId) -> Amount;

    /// Remaining allowance `spender` may move out of `owner`'s balance.
    fn allowance(&self, owner: AccountId, spender: AccountId) -> Amount;

    /// Set `spender`'s allowance over the caller's balance.
    fn approve(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        value: Amount,
    ) -> Result<(), ComplianceError>;

    /// Move `value` from the caller to `to`.
    fn transfer(
        &mut self,
        caller: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<(), ComplianceError>;

    /// Move `value` from `from` to `to` on the caller's allowance.
    fn transfer_from(
        &mut self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<(), ComplianceError>;
}

// ─── In-process implementation ───────────────────────────────────────

/// Plain fungible ledger satisfying [`PaymentLedger`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentToken {
    id: AccountId,
    total_supply: Amount,
    balances: BTreeMap<AccountId, Amount>,
    allowances: BTreeMap<AccountId, BTreeMap<AccountId, Amount>>,
}

impl PaymentToken {
    /// Empty payment ledger with a fresh identity.
    pub fn new() -> Self {
        Self {
            id: AccountId::new(),
            total_supply: 0,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        }
    }

    /// Units in circulation.
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Fund `to` with freshly created units.
    ///
    /// The payment asset is external to the compliance perimeter, so
    /// funding carries no authorization. Deployments and tests use it to
    /// provision purchasers.
    pub fn mint(&mut self, to: AccountId, amount: Amount) -> Result<(), ComplianceError> {
        if to.is_nil() {
            return Err(ComplianceError::precondition(
                "payment_mint",
                "recipient is the nil account",
            ));
        }
        self.total_supply = self.total_supply.checked_add(amount).ok_or_else(|| {
            ComplianceError::precondition("payment_mint", "total supply overflow")
        })?;
        let balance = self.balance_of(to);
        self.balances.insert(to, balance + amount);
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
}

impl PaymentLedger for PaymentToken {
    fn id(&self) -> AccountId {
        self.id
    }

    fn balance_of(&self, account: AccountId) -> Amount {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: AccountId, spender: AccountId) -> Amount {
        self.allowances
            .get(&owner)
            .and_then(|per_spender| per_spender.get(&spender))
            .copied()
            .unwrap_or(0)
    }

    fn approve(
        &mut self,
        caller: AccountId,
        spender: AccountId,
        value: Amount,
    ) -> Result<(), ComplianceError> {
        if spender.is_nil() {
            return Err(ComplianceError::precondition(
                "payment_approve",
                "spender is the nil account",
            ));
        }
        self.set_allowance(caller, spender, value);
        Ok(())
    }

    fn transfer(
        &mut self,
        caller: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<(), ComplianceError> {
        if to.is_nil() {
            return Err(ComplianceError::precondition(
                "payment_transfer",
                "recipient is the nil account",
            ));
        }
        self.debit(caller, value, "payment_transfer")?;
        self.credit(to, value);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        caller: AccountId,
        from: AccountId,
        to: AccountId,
        value: Amount,
    ) -> Result<(), ComplianceError> {
        if to.is_nil() {
            return Err(ComplianceError::precondition(
                "payment_transfer_from",
                "recipient is the nil account",
            ));
        }
        let allowed = self.allowance(from, caller);
        if allowed < value {
            return Err(ComplianceError::precondition(
                "payment_transfer_from",
                format!("allowance {allowed} is less than {value}"),
            ));
        }
        self.debit(from, value, "payment_transfer_from")?;
        self.credit(to, value);
        self.set_allowance(from, caller, allowed - value);
        Ok(())
    }
}

impl Default for PaymentToken {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
