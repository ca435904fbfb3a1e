//! # teq-ledger — Share and Payment Ledgers
//!
//! Two ledgers meet in the equity stack:
//!
//! - [`ShareLedger`] is the regulated one: a fungible balance ledger whose
//!   outbound capability is restricted per-account by freeze state, gated
//!   globally by a pause flag, and whose supply operations answer only to
//!   the ledger's owner — the token manager, once setup hands ownership
//!   over. Forced reissue recovers lost holdings without breaking
//!   conservation of supply.
//! - [`PaymentLedger`] is the interface of the conventional fungible asset
//!   used as the counter-currency during purchases. The stack consumes it;
//!   [`PaymentToken`] is the in-memory reference implementation.

pub mod payment;
pub mod share;

pub use payment::{PaymentLedger, PaymentToken};
pub use share::{ShareLedger, TokenMetadata};
