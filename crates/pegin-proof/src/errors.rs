use std::fmt;

use strata_pegin_types::{PeginVersion, UnknownPeginVersion};
use thiserror::Error;

/// Proof field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofField {
    TxId,
    EthAddress,
    AggregatePublicKey,
    BlockHeader(usize),
    RefL2BlockHash,
}

impl fmt::Display for ProofField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TxId => f.write_str("txId"),
            Self::EthAddress => f.write_str("ethAddress"),
            Self::AggregatePublicKey => f.write_str("aggregatePublicKey"),
            Self::BlockHeader(idx) => write!(f, "blockHeader[{idx}]"),
            Self::RefL2BlockHash => f.write_str("refL2BlockHash"),
        }
    }
}

/// Errors from the Bitcoin-style varint codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VarintError {
    #[error("negative value {0} is not a valid varint")]
    Negative(i128),

    #[error("value {0} is too large for a bitcoin-style varint")]
    TooLarge(i128),

    #[error("truncated varint: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("non-canonical varint encoding of {0}")]
    NonCanonical(u64),
}

/// Validation errors raised before any proof bytes are produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProofEncodeError {
    #[error("invalid {field} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        field: ProofField,
        expected: usize,
        actual: usize,
    },

    #[error("invalid {field} hex: {source}")]
    InvalidHex {
        field: ProofField,
        #[source]
        source: hex::FromHexError,
    },

    /// V1 proofs must carry an L2 block hash, V0 proofs must not.
    #[error("pegin {version:?} proof {}", ref_hash_requirement(*.has_ref_hash))]
    VersionMismatch {
        version: PeginVersion,
        has_ref_hash: bool,
    },
}

fn ref_hash_requirement(has_ref_hash: bool) -> &'static str {
    if has_ref_hash {
        "must not carry a refL2BlockHash"
    } else {
        "requires a refL2BlockHash"
    }
}

/// Errors parsing an encoded proof.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofDecodeError {
    #[error("truncated proof reading {what}: need {needed} bytes, have {available}")]
    Truncated {
        what: &'static str,
        needed: usize,
        available: usize,
    },

    #[error(transparent)]
    UnknownVersion(#[from] UnknownPeginVersion),

    #[error("header count: {0}")]
    HeaderCount(#[from] VarintError),
}
