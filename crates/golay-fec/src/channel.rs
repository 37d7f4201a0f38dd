use golay_core::CodecErr;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{CODEWORD_BITS, MAX_CODEWORD, gf2};

/// Outcome of one channel pass over a codeword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReport {
    /// Codeword with the flipped bits applied
    pub corrupted: u32,
    /// 0-indexed positions that were flipped, ascending
    pub positions: Vec<usize>,
    /// Number of flipped bits
    pub count: usize,
}

/// Binary symmetric channel: each transmitted bit is flipped independently
/// with probability p.
///
/// The channel owns one random stream for its whole lifetime. Draws are
/// only ever taken forward, never reset: re-seeding between transmissions
/// would correlate the error patterns of consecutive codewords and silently
/// void the independence the BSC model promises. Create one channel per
/// session and keep it.
pub struct BscChannel<R: Rng = StdRng> {
    rng: R,
}

impl BscChannel<StdRng> {
    /// Channel with an OS-seeded stream.
    pub fn new() -> Self {
        BscChannel {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Channel with a deterministic stream, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        BscChannel {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for BscChannel<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> BscChannel<R> {
    /// Channel over an injected random source.
    pub fn from_rng(rng: R) -> Self {
        BscChannel { rng }
    }

    /// Pass `codeword` through the channel at bit error rate `p`.
    pub fn transmit(&mut self, codeword: u32, p: f64) -> Result<ChannelReport, CodecErr> {
        if codeword > MAX_CODEWORD {
            return Err(CodecErr::InvalidCodeword { value: codeword });
        }
        // NaN fails the range check as well
        if !(0.0..=1.0).contains(&p) {
            return Err(CodecErr::InvalidArgument {
                field: "bit_error_rate",
                value: p,
            });
        }

        let mut corrupted = codeword;
        let mut positions = Vec::new();
        for bit in 0..CODEWORD_BITS {
            if self.rng.random::<f64>() < p {
                corrupted ^= 1 << bit;
                positions.push(bit);
            }
        }

        tracing::trace!(
            "transmit p={}: {} -> {} ({} flips at {:?})",
            p,
            gf2::bitstr(codeword, CODEWORD_BITS),
            gf2::bitstr(corrupted, CODEWORD_BITS),
            positions.len(),
            positions
        );

        Ok(ChannelReport {
            corrupted,
            count: positions.len(),
            positions,
        })
    }
}
