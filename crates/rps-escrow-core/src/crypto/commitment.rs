//! Hand commitment and reveal secret.

use crate::games::Hand;
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Secret mixed into a hand commitment
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// 32 random bytes, hex encoded
    pub fn random() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}


impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(<{} bytes>)", self.0.len())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CommitParseError {
    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("expected 32 bytes, got {0}")]
    Length(usize),
}

/// Commitment = SHA256(hand || secret)
///
/// Stored as opaque bytes: nothing checks that a commitment was produced by
/// [`HandCommit::compute`] until the hand is revealed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandCommit([u8; 32]);

impl HandCommit {
    /// The hand is a fixed one-byte prefix, so (hand, secret) pairs never collide
    /// by re-splitting the same bytes.
    pub fn compute(hand: Hand, secret: &Secret) -> Self {
        let mut hasher = Sha256::new();
        hasher.update([u8::from(hand)]);
        hasher.update(secret.as_str().as_bytes());
        Self(hasher.finalize().into())
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Verify that the given hand and secret produce this commitment
    pub fn verify(&self, hand: Hand, secret: &Secret) -> bool {
        *self == Self::compute(hand, secret)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for HandCommit {
    type Err = CommitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim_start_matches("0x"))?;
        let len = bytes.len();
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CommitParseError::Length(len))?;
        Ok(Self(bytes))
    }
}

impl Serialize for HandCommit {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.to_hex().serialize(s)
    }
}

impl<'de> Deserialize<'de> for HandCommit {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(d)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Debug for HandCommit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandCommit({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for HandCommit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commitment_verification() {
        let secret = Secret::new("secret");
        let commit = HandCommit::compute(Hand::Rock, &secret);

        assert!(commit.verify(Hand::Rock, &secret));
    }

    #[test]
    fn test_different_hands_different_commitments() {
        let secret = Secret::random();
        let rock = HandCommit::compute(Hand::Rock, &secret);
        let paper = HandCommit::compute(Hand::Paper, &secret);

        assert_ne!(rock, paper);
        assert!(!rock.verify(Hand::Paper, &secret));
    }

    #[test]
    fn test_wrong_secret_fails_verification() {
        let commit = HandCommit::compute(Hand::Scissors, &Secret::new("secret"));

        assert!(!commit.verify(Hand::Scissors, &Secret::new("Secret")));
        assert!(!commit.verify(Hand::Scissors, &Secret::new("")));
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = Secret::random();
        let b = Secret::random();

        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 64);
    }

    #[test]
    fn test_parse_hex_with_and_without_prefix() {
        let commit = HandCommit::compute(Hand::Paper, &Secret::new("s"));
        let hex = commit.to_hex();

        assert_eq!(hex.parse::<HandCommit>().unwrap(), commit);
        assert_eq!(format!("0x{hex}").parse::<HandCommit>().unwrap(), commit);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            "abcd".parse::<HandCommit>(),
            Err(CommitParseError::Length(2))
        );
        assert!(matches!(
            "zz".parse::<HandCommit>(),
            Err(CommitParseError::Hex(_))
        ));
    }

    #[test]
    fn test_secret_debug_hides_value() {
        let secret = Secret::new("hunter2");
        assert!(!format!("{:?}", secret).contains("hunter2"));
    }
}
