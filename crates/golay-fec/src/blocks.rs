//! Block codec adapters: chunk an arbitrary bit stream into 12-bit
//! messages, encode each independently, and reassemble on the far side.
//!
//! Padding added to fill the last block is recorded as metadata and never
//! travels through the channel; it is control information the transport
//! carries out of band. Blocks are independent trials: an uncorrectable
//! block never affects its neighbors.

use golay_core::{BitBuffer, CodecErr};

use crate::decoder::decode;
use crate::encoder::encode;
use crate::MESSAGE_BITS;

/// One message block's worth of stream bits
pub const BLOCK_BITS: usize = MESSAGE_BITS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEncodeOutput {
    /// One 23-bit codeword per 12-bit block, in stream order
    pub codewords: Vec<u32>,
    /// Zero bits appended to fill the last block (0..=11); side-channel
    /// metadata, not transmitted
    pub pad_bits: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockDecodeOutput {
    /// Recovered bit stream with padding stripped, bit-per-byte
    pub bits: Vec<u8>,
    /// Total corrected bit errors across all successfully decoded blocks
    pub corrected_errors: usize,
    /// Blocks whose errors exceeded the correction radius
    pub uncorrectable_blocks: usize,
}

/// Split a bit-per-byte stream into 12-bit blocks (zero-padded at the tail)
/// and encode each block independently. Within a block the first stream bit
/// is the most significant message bit, so block bit strings render in
/// stream order.
pub fn encode_blocks(bits: &[u8]) -> BlockEncodeOutput {
    let pad_bits = (BLOCK_BITS - bits.len() % BLOCK_BITS) % BLOCK_BITS;
    let num_blocks = (bits.len() + pad_bits) / BLOCK_BITS;

    let mut codewords = Vec::with_capacity(num_blocks);
    for block in 0..num_blocks {
        let base = block * BLOCK_BITS;
        let mut message = 0u16;
        for k in 0..BLOCK_BITS {
            let bit = if base + k < bits.len() { bits[base + k] } else { 0 };
            assert!(bit <= 1, "encode_blocks: invalid bit value `{}`", bit);
            message = message << 1 | bit as u16;
        }
        // a 12-bit chunk is always in range
        codewords.push(encode(message).unwrap());
    }

    tracing::debug!(
        "encode_blocks: {} bits -> {} codewords, {} pad bits",
        bits.len(),
        codewords.len(),
        pad_bits
    );

    BlockEncodeOutput { codewords, pad_bits }
}

/// Decode a sequence of received codewords back into the original bit
/// stream. Each block decodes independently; blocks beyond the correction
/// radius are counted, their best-effort bits kept, and decoding continues.
pub fn decode_blocks(codewords: &[u32], pad_bits: usize) -> Result<BlockDecodeOutput, CodecErr> {
    if pad_bits >= BLOCK_BITS || (codewords.is_empty() && pad_bits != 0) {
        return Err(CodecErr::InvalidPadding {
            pad_bits,
            blocks: codewords.len(),
        });
    }

    let mut bits = Vec::with_capacity(codewords.len() * BLOCK_BITS);
    let mut corrected_errors = 0;
    let mut uncorrectable_blocks = 0;

    for &received in codewords {
        let outcome = decode(received)?;
        if outcome.success {
            corrected_errors += outcome.error_positions.len();
        } else {
            uncorrectable_blocks += 1;
        }
        for k in (0..BLOCK_BITS).rev() {
            bits.push((outcome.message >> k & 1) as u8);
        }
    }

    bits.truncate(codewords.len() * BLOCK_BITS - pad_bits);

    tracing::debug!(
        "decode_blocks: {} codewords -> {} bits, {} corrected, {} uncorrectable",
        codewords.len(),
        bits.len(),
        corrected_errors,
        uncorrectable_blocks
    );

    Ok(BlockDecodeOutput {
        bits,
        corrected_errors,
        uncorrectable_blocks,
    })
}

/// Byte stream to bit-per-byte stream, MSB-first within each byte.
pub fn bits_of_bytes(data: &[u8]) -> Vec<u8> {
    BitBuffer::from_bytes(data).into_bitvec()
}

/// Bit-per-byte stream back to bytes. If the bit count is not a multiple
/// of 8, the last byte's tail bits are zero.
pub fn bytes_of_bits(bits: &[u8]) -> Vec<u8> {
    BitBuffer::from_bitarr(bits).into_bytes()
}
