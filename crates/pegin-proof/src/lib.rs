//! Canonical binary encoding of pegin proofs.
//!
//! A proof is laid out as follows, fixed-width integers little-endian:
//!
//! ```text
//! [4B version][32B txid, internal byte order][4B vout][20B eth address][33B aggregate pubkey]
//! [varint header count][80B headers, ascending height][merkle proof][raw tx]
//! [32B L2 block hash, V1 only]
//! ```
//!
//! The merkle proof and raw transaction regions are not length prefixed.

mod decoder;
mod encoder;
mod errors;
pub mod varint;

pub use decoder::{decode_proof, DecodedProof};
pub use encoder::{
    encode_proof, AGGREGATE_PUBKEY_LEN, BLOCK_HEADER_LEN, ETH_ADDRESS_LEN, L2_BLOCK_HASH_LEN,
    TX_ID_LEN,
};
pub use errors::{ProofDecodeError, ProofEncodeError, ProofField, VarintError};
