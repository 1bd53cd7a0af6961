use strata_pegin_types::PeginVersion;

use crate::{
    varint::decode_varint, ProofDecodeError, AGGREGATE_PUBKEY_LEN, BLOCK_HEADER_LEN,
    ETH_ADDRESS_LEN, L2_BLOCK_HASH_LEN, TX_ID_LEN,
};

/// A parsed pegin proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedProof {
    pub version: PeginVersion,

    /// Transaction id in display (big-endian) hex.
    pub tx_id: String,

    pub vout: u32,
    pub eth_address: [u8; ETH_ADDRESS_LEN],
    pub aggregate_public_key: [u8; AGGREGATE_PUBKEY_LEN],
    pub block_headers: Vec<[u8; BLOCK_HEADER_LEN]>,

    /// Concatenated merkle proof and raw transaction.
    ///
    /// The layout carries no boundary between the two, so splitting them is left to a consumer
    /// that knows the merkle proof format.
    pub trailer: Vec<u8>,

    pub ref_l2_block_hash: Option<[u8; L2_BLOCK_HASH_LEN]>,
}

struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take(&mut self, what: &'static str, n: usize) -> Result<&'a [u8], ProofDecodeError> {
        if self.buf.len() < n {
            return Err(ProofDecodeError::Truncated {
                what,
                needed: n,
                available: self.buf.len(),
            });
        }
        let (head, rest) = self.buf.split_at(n);
        self.buf = rest;
        Ok(head)
    }

    fn take_array<const N: usize>(
        &mut self,
        what: &'static str,
    ) -> Result<[u8; N], ProofDecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(what, N)?);
        Ok(out)
    }

    fn take_u32_le(&mut self, what: &'static str) -> Result<u32, ProofDecodeError> {
        self.take_array::<4>(what).map(u32::from_le_bytes)
    }
}

/// Parses a proof produced by [`encode_proof`](crate::encode_proof).
pub fn decode_proof(proof: &[u8]) -> Result<DecodedProof, ProofDecodeError> {
    let mut r = Reader { buf: proof };

    let version = PeginVersion::try_from(r.take_u32_le("version")?)?;

    let mut tx_id = r.take_array::<TX_ID_LEN>("txId")?;
    tx_id.reverse();

    let vout = r.take_u32_le("vout")?;
    let eth_address = r.take_array::<ETH_ADDRESS_LEN>("ethAddress")?;
    let aggregate_public_key = r.take_array::<AGGREGATE_PUBKEY_LEN>("aggregatePublicKey")?;

    let (count, consumed) = decode_varint(r.buf)?;
    r.take("header count", consumed)?;

    let available = r.buf.len();
    let count = usize::try_from(count)
        .ok()
        .filter(|c| c.checked_mul(BLOCK_HEADER_LEN).is_some_and(|len| len <= available))
        .ok_or(ProofDecodeError::Truncated {
            what: "blockHeaders",
            needed: usize::try_from(count)
                .unwrap_or(usize::MAX)
                .saturating_mul(BLOCK_HEADER_LEN),
            available,
        })?;

    let block_headers = (0..count)
        .map(|_| r.take_array::<BLOCK_HEADER_LEN>("blockHeaders"))
        .collect::<Result<Vec<_>, _>>()?;

    let ref_l2_block_hash = match version {
        PeginVersion::V0 => None,
        PeginVersion::V1 => {
            let available = r.buf.len();
            let split = available
                .checked_sub(L2_BLOCK_HASH_LEN)
                .ok_or(ProofDecodeError::Truncated {
                    what: "refL2BlockHash",
                    needed: L2_BLOCK_HASH_LEN,
                    available,
                })?;
            let (rest, hash) = r.buf.split_at(split);
            r.buf = rest;
            let mut out = [0u8; L2_BLOCK_HASH_LEN];
            out.copy_from_slice(hash);
            Some(out)
        }
    };

    Ok(DecodedProof {
        version,
        tx_id: hex::encode(tx_id),
        vout,
        eth_address,
        aggregate_public_key,
        block_headers,
        trailer: r.buf.to_vec(),
        ref_l2_block_hash,
    })
}
