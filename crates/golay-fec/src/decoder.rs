use golay_core::CodecErr;

use crate::tables::B_ROWS;
use crate::{CODEWORD_BITS, EXTENDED_BITS, MAX_CODEWORD, MESSAGE_BITS, gf2};

/// Bit appended when extending a 23-bit word to the 24-bit code
const EXT_BIT: u32 = 1 << 23;

/// Result of decoding one received word.
///
/// `success == false` means no correctable (weight <= 3) error pattern
/// validated; `message` then carries the uncorrected low 12 bits of the
/// received word as a deterministic best effort. That is a reporting
/// outcome, not an error: only out-of-range inputs make [`decode`] fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOutcome {
    /// Recovered 12-bit message
    pub message: u16,
    /// Corrected 23-bit codeword, or the received word when unsuccessful
    pub codeword: u32,
    /// First syndrome s1 = w1 ^ w2*B of the extended word
    pub syndrome_s1: u16,
    /// Second syndrome s2 = s1*B
    pub syndrome_s2: u16,
    /// Accepted 24-bit error pattern (all-zero when unsuccessful)
    pub error_pattern: u32,
    /// Flipped positions within the 23 transmitted bits, ascending. The
    /// parity-extension bit's own correction is not message-relevant and
    /// is not listed here.
    pub error_positions: Vec<usize>,
    pub success: bool,
}

impl DecodeOutcome {
    pub fn syndrome_s1_weight(&self) -> u32 {
        gf2::weight(self.syndrome_s1 as u32)
    }

    pub fn syndrome_s2_weight(&self) -> u32 {
        gf2::weight(self.syndrome_s2 as u32)
    }

    /// s1 rendered MSB-first as 12 characters
    pub fn syndrome_s1_bits(&self) -> String {
        gf2::bitstr(self.syndrome_s1 as u32, MESSAGE_BITS)
    }

    /// s2 rendered MSB-first as 12 characters
    pub fn syndrome_s2_bits(&self) -> String {
        gf2::bitstr(self.syndrome_s2 as u32, MESSAGE_BITS)
    }

    /// Error pattern rendered MSB-first as 24 characters
    pub fn error_pattern_bits(&self) -> String {
        gf2::bitstr(self.error_pattern, EXTENDED_BITS)
    }
}

/// Extend a 23-bit word to 24 bits of odd overall weight.
///
/// Codewords of the extended code have even weight, so an odd-weight
/// extension sits at odd distance from every one of them. With at most 3
/// channel errors that distance is at most 3, which is what makes the
/// weight-limited pattern search below complete.
pub fn extend(word: u32) -> u32 {
    if gf2::weight(word) % 2 == 0 { word | EXT_BIT } else { word }
}

/// Syndrome of a 24-bit word against the weighting matrix:
/// s = w1 ^ w2*B with w1 = bits 0..=11 and w2 = bits 12..=23.
/// Zero exactly for codewords of the extended code.
pub fn syndrome(w24: u32) -> u16 {
    let w1 = w24 & 0xFFF;
    let w2 = (w24 >> 12) & 0xFFF;
    (w1 ^ gf2::mul_vec_mat(w2, &B_ROWS)) as u16
}

/// Generate the candidate error patterns in their fixed search order:
/// errors confined to the first half, one error in the second half, errors
/// confined to the second half, one error in the first half. At most 26
/// entries.
fn candidate_patterns(s1: u32, s2: u32) -> Vec<u32> {
    let mut candidates = Vec::with_capacity(26);

    if gf2::weight(s1) <= 3 {
        candidates.push(s1);
    }
    for (i, &row) in B_ROWS.iter().enumerate() {
        let half = s1 ^ row;
        if gf2::weight(half) <= 2 {
            candidates.push(half | 1 << (12 + i));
        }
    }
    if gf2::weight(s2) <= 3 {
        candidates.push(s2 << 12);
    }
    for (i, &row) in B_ROWS.iter().enumerate() {
        let half = s2 ^ row;
        if gf2::weight(half) <= 2 {
            candidates.push(1 << i | half << 12);
        }
    }

    candidates
}

/// Decode a received 23-bit word, correcting up to 3 bit errors.
///
/// The word is extended to odd weight, then the two syndromes key a scan
/// over the candidate error patterns. A small syndrome weight only makes a
/// candidate plausible; every candidate is validated by re-checking that
/// the corrected word's syndrome is exactly zero, and the first validated
/// candidate wins. Skipping that re-check would accept spurious low-weight
/// coincidences.
pub fn decode(received: u32) -> Result<DecodeOutcome, CodecErr> {
    if received > MAX_CODEWORD {
        return Err(CodecErr::InvalidCodeword { value: received });
    }

    let w24 = extend(received);
    let s1 = syndrome(w24) as u32;
    let s2 = gf2::mul_vec_mat(s1, &B_ROWS);

    tracing::trace!(
        "decode {}: s1={} s2={}",
        gf2::bitstr(received, CODEWORD_BITS),
        gf2::bitstr(s1, MESSAGE_BITS),
        gf2::bitstr(s2, MESSAGE_BITS)
    );

    let accepted = candidate_patterns(s1, s2)
        .into_iter()
        .find(|&u| syndrome(w24 ^ u) == 0);

    let outcome = match accepted {
        Some(pattern) => {
            let corrected = w24 ^ pattern;
            tracing::trace!(
                "corrected with pattern {} ({} real errors)",
                gf2::bitstr(pattern, EXTENDED_BITS),
                gf2::weight(pattern & MAX_CODEWORD)
            );
            DecodeOutcome {
                message: (corrected & 0xFFF) as u16,
                codeword: corrected & MAX_CODEWORD,
                syndrome_s1: s1 as u16,
                syndrome_s2: s2 as u16,
                error_pattern: pattern,
                error_positions: gf2::ones(pattern, CODEWORD_BITS),
                success: true,
            }
        }
        None => {
            tracing::debug!(
                "no weight-3 pattern validated for {}, returning uncorrected bits",
                gf2::bitstr(received, CODEWORD_BITS)
            );
            DecodeOutcome {
                message: (received & 0xFFF) as u16,
                codeword: received,
                syndrome_s1: s1 as u16,
                syndrome_s2: s2 as u16,
                error_pattern: 0,
                error_positions: Vec::new(),
                success: false,
            }
        }
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::gf2;
    use crate::tables::B_ROWS;

    /// Parity-complete extension [m | m*B] of a message: the even-weight
    /// codeword of the extended code.
    fn extended_codeword(m: u16) -> u32 {
        m as u32 | gf2::mul_vec_mat(m as u32, &B_ROWS) << 12
    }

    #[test]
    fn test_extension_always_odd_weight() {
        for w in [0u32, 1, 0b101, MAX_CODEWORD, 0x2A_AAAA] {
            assert_eq!(gf2::weight(extend(w)) % 2, 1, "word {:#x}", w);
        }
    }

    #[test]
    fn test_extended_codewords_have_zero_syndrome() {
        for m in 0..=crate::MAX_MESSAGE {
            assert_eq!(syndrome(extended_codeword(m)), 0, "message {}", m);
        }
    }

    #[test]
    fn test_extended_codewords_have_even_weight() {
        for m in 0..=crate::MAX_MESSAGE {
            assert_eq!(gf2::weight(extended_codeword(m)) % 2, 0, "message {}", m);
        }
    }

    #[test]
    fn test_zero_error_round_trip_all_messages() {
        for m in 0..=crate::MAX_MESSAGE {
            let c = encode(m).unwrap();
            let outcome = decode(c).unwrap();
            assert!(outcome.success, "message {}", m);
            assert_eq!(outcome.message, m);
            assert_eq!(outcome.codeword, c);
            // the parity bit may be corrected, the real positions never
            assert!(outcome.error_positions.is_empty(), "message {}", m);
        }
    }

    #[test]
    fn test_single_bit_errors() {
        for m in [0u16, 42, 365, 2730, 4095] {
            let c = encode(m).unwrap();
            for bit in 0..CODEWORD_BITS {
                let outcome = decode(c ^ 1 << bit).unwrap();
                assert!(outcome.success, "message {} bit {}", m, bit);
                assert_eq!(outcome.message, m);
                assert_eq!(outcome.codeword, c);
                assert_eq!(outcome.error_positions, vec![bit]);
            }
        }
    }

    #[test]
    fn test_exhaustive_weight_three_correction() {
        // every error pattern of weight 1, 2 and 3 over the 23 positions
        for m in [42u16, 2730, 4095] {
            let c = encode(m).unwrap();
            for i in 0..CODEWORD_BITS {
                check_corrects(m, c, 1 << i);
                for j in i + 1..CODEWORD_BITS {
                    check_corrects(m, c, 1 << i | 1 << j);
                    for k in j + 1..CODEWORD_BITS {
                        check_corrects(m, c, 1 << i | 1 << j | 1 << k);
                    }
                }
            }
        }
    }

    fn check_corrects(m: u16, c: u32, error: u32) {
        let outcome = decode(c ^ error).unwrap();
        assert!(outcome.success, "message {} error {:#x}", m, error);
        assert_eq!(outcome.message, m, "message {} error {:#x}", m, error);
        assert_eq!(
            outcome.error_positions,
            gf2::ones(error, CODEWORD_BITS),
            "error {:#x}",
            error
        );
    }

    #[test]
    fn test_four_errors_return_well_formed_outcome() {
        // beyond the correction radius the decoder may converge on a
        // different valid codeword or give up; it must never panic and the
        // outcome must stay internally consistent
        let error_sets: [&[usize]; 4] = [
            &[0, 1, 2, 3],
            &[5, 9, 14, 22],
            &[0, 7, 13, 19],
            &[2, 4, 17, 21],
        ];
        for m in [42u16, 1234, 4095] {
            let c = encode(m).unwrap();
            for set in error_sets {
                let error = set.iter().fold(0u32, |acc, &b| acc | 1 << b);
                let outcome = decode(c ^ error).unwrap();
                if outcome.success {
                    // the corrected word must be a real codeword
                    assert_eq!(encode(outcome.message).unwrap(), outcome.codeword);
                    assert_ne!(outcome.message, m, "4 errors cannot decode cleanly");
                } else {
                    assert_eq!(outcome.error_pattern, 0);
                    assert!(outcome.error_positions.is_empty());
                    assert_eq!(outcome.message, ((c ^ error) & 0xFFF) as u16);
                }
            }
        }
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(
            decode(MAX_CODEWORD + 1),
            Err(CodecErr::InvalidCodeword {
                value: MAX_CODEWORD + 1
            })
        );
    }

    #[test]
    fn test_diagnostics_render_msb_first() {
        let c = encode(42).unwrap();
        let outcome = decode(c ^ 1 << 7).unwrap();
        assert_eq!(outcome.syndrome_s1_bits().len(), 12);
        assert_eq!(outcome.syndrome_s2_bits().len(), 12);
        assert_eq!(outcome.error_pattern_bits().len(), 24);
        assert_eq!(outcome.syndrome_s1_weight(), gf2::weight(outcome.syndrome_s1 as u32));
        // bit 7 of the pattern is the 8th character from the right
        assert_eq!(outcome.error_pattern_bits().chars().rev().nth(7), Some('1'));
    }

    #[test]
    fn test_first_syndrome_matches_definition() {
        let c = encode(365).unwrap();
        let w24 = extend(c ^ 1 << 3);
        let w1 = w24 & 0xFFF;
        let w2 = (w24 >> 12) & 0xFFF;
        assert_eq!(
            syndrome(w24) as u32,
            w1 ^ gf2::mul_vec_mat(w2, &B_ROWS)
        );
        let outcome = decode(c ^ 1 << 3).unwrap();
        assert_eq!(outcome.syndrome_s1, syndrome(w24));
        assert_eq!(
            outcome.syndrome_s2 as u32,
            gf2::mul_vec_mat(outcome.syndrome_s1 as u32, &B_ROWS)
        );
    }
}
