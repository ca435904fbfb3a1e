//! # teq-core — Foundational Types for the Tokenized Equity Stack
//!
//! This crate is the bedrock of the Tokenized Equity Stack. It defines the
//! primitives every other crate in the workspace builds on: account
//! identities, token amounts, audit timestamps, the shared error taxonomy,
//! audit records, and the pausable state machine embedded by the ledger,
//! the investor registry, and the token manager.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrapper for account identity.** `AccountId` is an opaque,
//!    comparable, non-forgeable identity. The nil identity stands for the
//!    null account every precondition check rejects — no bare UUIDs, no
//!    magic sentinel strings.
//!
//! 2. **One error taxonomy.** `ComplianceError` has exactly five kinds —
//!    authorization, precondition, state conflict, compliance gate, paused.
//!    Every rejection anywhere in the stack is one of these, and every
//!    rejection leaves state unchanged.
//!
//! 3. **Audit records are part of the contract.** Every authorized mutation
//!    appends an `AuditRecord` carrying the acting account, the operation
//!    kind with affected accounts and amounts, and a UTC timestamp.
//!
//! 4. **Checked arithmetic.** `Amount` math overflows into a precondition
//!    error, never a panic.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `teq-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod audit;
pub mod error;
pub mod identity;
pub mod pause;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use audit::{AuditEvent, AuditRecord};
pub use error::ComplianceError;
pub use identity::{AccountId, Amount};
pub use pause::{Pausable, PauseState};
pub use temporal::Timestamp;
