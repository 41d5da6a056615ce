//! Cryptographic primitives for the commit-reveal scheme.

mod commitment;

pub use commitment::{CommitParseError, HandCommit, Secret};
