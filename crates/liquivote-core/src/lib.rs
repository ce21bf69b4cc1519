//! Liquivote Core - Liquid democracy election engine.
//!
//! This crate provides:
//! - Voter and alternative registration with direct picks
//! - Transitive vote delegation with cycle handling
//! - Iterative delegation-chain resolution
//! - Deterministic vote tallying

pub mod election;
pub mod error;
pub mod tally;

pub use election::{Election, Outcome};
pub use error::ElectionError;
pub use tally::Tally;
