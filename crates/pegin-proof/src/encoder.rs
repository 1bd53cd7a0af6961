use strata_pegin_types::{strip_hex_prefix, PeginVersion, ProofComponents};

use crate::{varint::write_varint, ProofEncodeError, ProofField};

pub const TX_ID_LEN: usize = 32;
pub const ETH_ADDRESS_LEN: usize = 20;
pub const AGGREGATE_PUBKEY_LEN: usize = 33;
pub const BLOCK_HEADER_LEN: usize = 80;
pub const L2_BLOCK_HASH_LEN: usize = 32;

/// Length of the fixed prefix preceding the header count.
const FIXED_PREFIX_LEN: usize = 4 + TX_ID_LEN + 4 + ETH_ADDRESS_LEN + AGGREGATE_PUBKEY_LEN;

/// Fields of a [`ProofComponents`] after decoding and length checks.
struct ValidatedFields<'a> {
    tx_id: [u8; TX_ID_LEN],
    eth_address: [u8; ETH_ADDRESS_LEN],
    aggregate_public_key: [u8; AGGREGATE_PUBKEY_LEN],
    block_headers: &'a [Vec<u8>],
    ref_l2_block_hash: Option<[u8; L2_BLOCK_HASH_LEN]>,
}

/// Serializes `components` into the canonical proof layout.
///
/// Every field is validated up front, so an error never leaves a partially written proof behind.
pub fn encode_proof(components: &ProofComponents) -> Result<Vec<u8>, ProofEncodeError> {
    let fields = validate(components)?;

    let headers_len = fields.block_headers.len() * BLOCK_HEADER_LEN;
    let mut buf = Vec::with_capacity(
        FIXED_PREFIX_LEN
            + 9
            + headers_len
            + components.merkle_proof.len()
            + components.raw_tx.len()
            + L2_BLOCK_HASH_LEN,
    );

    buf.extend_from_slice(&components.version.as_u32().to_le_bytes());
    buf.extend_from_slice(&fields.tx_id);
    buf.extend_from_slice(&components.vout.to_le_bytes());
    buf.extend_from_slice(&fields.eth_address);
    buf.extend_from_slice(&fields.aggregate_public_key);

    write_varint(&mut buf, fields.block_headers.len() as u64);
    for header in fields.block_headers {
        buf.extend_from_slice(header);
    }

    buf.extend_from_slice(&components.merkle_proof);
    buf.extend_from_slice(&components.raw_tx);

    if let Some(ref_hash) = fields.ref_l2_block_hash {
        buf.extend_from_slice(&ref_hash);
    }

    Ok(buf)
}

fn validate(components: &ProofComponents) -> Result<ValidatedFields<'_>, ProofEncodeError> {
    // Display order is big-endian; the wire carries the internal little-endian order.
    let mut tx_id = decode_fixed::<TX_ID_LEN>(ProofField::TxId, &components.tx_id)?;
    tx_id.reverse();

    let eth_address = decode_fixed::<ETH_ADDRESS_LEN>(ProofField::EthAddress, &components.eth_address)?;
    let aggregate_public_key = decode_fixed::<AGGREGATE_PUBKEY_LEN>(
        ProofField::AggregatePublicKey,
        &components.aggregate_public_key,
    )?;

    for (idx, header) in components.block_headers.iter().enumerate() {
        if header.len() != BLOCK_HEADER_LEN {
            return Err(ProofEncodeError::InvalidLength {
                field: ProofField::BlockHeader(idx),
                expected: BLOCK_HEADER_LEN,
                actual: header.len(),
            });
        }
    }

    let ref_l2_block_hash = match (components.version, &components.ref_l2_block_hash) {
        (PeginVersion::V1, Some(hash)) => Some(decode_fixed::<L2_BLOCK_HASH_LEN>(
            ProofField::RefL2BlockHash,
            hash,
        )?),
        (PeginVersion::V0, None) => None,
        (version, ref_hash) => {
            return Err(ProofEncodeError::VersionMismatch {
                version,
                has_ref_hash: ref_hash.is_some(),
            })
        }
    };

    Ok(ValidatedFields {
        tx_id,
        eth_address,
        aggregate_public_key,
        block_headers: &components.block_headers,
        ref_l2_block_hash,
    })
}

fn decode_fixed<const N: usize>(field: ProofField, s: &str) -> Result<[u8; N], ProofEncodeError> {
    let bytes = hex::decode(strip_hex_prefix(s))
        .map_err(|source| ProofEncodeError::InvalidHex { field, source })?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| ProofEncodeError::InvalidLength {
            field,
            expected: N,
            actual,
        })
}
