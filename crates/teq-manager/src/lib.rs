//! # teq-manager — The Privileged Operator
//!
//! The [`TokenManager`] is the single account through which every
//! administrative action on a deployed share token flows. Deployment
//! wiring makes it the owner of the [`teq_ledger::ShareLedger`], so the
//! ledger's owner-only surface (mint, burn, freeze, reissue, pause) is
//! reachable only by passing the manager's own layered checks first:
//!
//! 1. **Role table** — [`ManagerOp`] maps each operation to the closed
//!    set of roles allowed to invoke it.
//! 2. **Verification gate** — most operations are inert until the Owner
//!    performs the one-time issuer verification. The Owner bypasses the
//!    gate wherever the Owner is already an authorized actor.
//! 3. **Manager pause** — the coordinator-level kill-switch, independent
//!    of the share ledger's own pause flag.
//!
//! Collaborating state (share ledger, payment ledger, investor registry)
//! is passed into each operation by the host and identity-checked against
//! the ids captured at deployment.

pub mod authorize;
pub mod manager;

pub use authorize::ManagerOp;
pub use manager::{DeploymentProfile, TokenManager};
