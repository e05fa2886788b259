//! Proof-of-stake validation core.
//!
//! Two cooperating processes over an externally owned block-index graph:
//!
//! - [`processes::stake_modifier`]: evolves the 64-bit stake modifier along
//!   the chain and maintains its chained checksum against the hard
//!   checkpoints.
//! - [`processes::kernel`]: validates candidate coinstake transactions by
//!   hashing the staked output against a coin-age weighted difficulty target
//!   under a *future* stake modifier.
//!
//! Both are pure functions of their inputs plus the stores in [`model`];
//! callers drive validation block by block and own all persistence.

pub mod errors;
pub mod model;
pub mod processes;
