//! # Account Identity
//!
//! Defines `AccountId`, the opaque identity every entity in the stack is
//! addressed by — holders, operators, the token manager, and the ledgers
//! themselves all live in one identity namespace, because the platform
//! compares them against each other (the manager may not manage a share
//! ledger that is also the payment ledger).
//!
//! ## The Nil Identity
//!
//! `AccountId::nil()` is the null account. It is constructible so that
//! callers can express "unset", but no operation in the stack accepts it:
//! every mutation that takes an account argument rejects the nil identity
//! as a precondition failure, and role predicates never match it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token quantity, in indivisible units of the ledger's smallest denomination.
///
/// Regulated equity conventionally uses zero decimals, so one unit is one
/// share. Kept within `u64` so amounts survive JSON round-trips losslessly.
pub type Amount = u64;

/// Opaque account identity for holders, operators, and components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generate a new random account identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The nil identity — the null account no operation accepts.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Whether this is the nil identity.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AccountId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "acct:{}", self.0)
    }
}
