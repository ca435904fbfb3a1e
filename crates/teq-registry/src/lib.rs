//! # teq-registry — Roles and Investor Membership
//!
//! Two registries gate every privileged mutation in the equity stack:
//!
//! - [`RoleRegistry`] holds the privileged identities for one component —
//!   a single Owner, a single Admin, a Manager set, and a single Issuer —
//!   and enforces who may reassign whom. Components embed their own
//!   instance; there is no ambient global role state.
//! - [`InvestorRegistry`] is the set of accounts cleared to hold the
//!   regulated share token, with strict add/remove state-machine semantics
//!   and its own pause flag.
//!
//! Both keep an ordered audit log of every mutation.

pub mod investors;
pub mod roles;

pub use investors::InvestorRegistry;
pub use roles::{Role, RoleRegistry};
