use golay_core::CodecErr;

use crate::tables::GEN_ROWS;
use crate::{MAX_CODEWORD, MAX_MESSAGE};

/// Systematic encode of a 12-bit message into a 23-bit codeword.
///
/// The codeword is the XOR of the generator rows at the message's set bit
/// positions, i.e. c = m*G over GF(2). The low 12 bits of the result always
/// equal the message.
pub fn encode(message: u16) -> Result<u32, CodecErr> {
    if message > MAX_MESSAGE {
        return Err(CodecErr::InvalidMessage { value: message });
    }

    let mut codeword = 0u32;
    for (i, &row) in GEN_ROWS.iter().enumerate() {
        if (message >> i) & 1 == 1 {
            codeword ^= row;
        }
    }

    debug_assert!(codeword <= MAX_CODEWORD);
    Ok(codeword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gf2;
    use crate::tables::PARITY_ROWS;

    #[test]
    fn test_systematic_for_all_messages() {
        for m in 0..=MAX_MESSAGE {
            let c = encode(m).unwrap();
            assert_eq!((c & 0xFFF) as u16, m, "message {} not systematic", m);
            assert!(c <= MAX_CODEWORD);
        }
    }

    #[test]
    fn test_known_codeword() {
        // 42 sets bits 1, 3 and 5; parity = P[1] ^ P[3] ^ P[5] = 557,
        // so the codeword is 42 | 557 << 12 = 2281514
        assert_eq!(encode(42).unwrap(), 2_281_514);
        assert_eq!(
            gf2::mul_vec_mat(42, &PARITY_ROWS),
            PARITY_ROWS[1] ^ PARITY_ROWS[3] ^ PARITY_ROWS[5]
        );
        assert_eq!(gf2::mul_vec_mat(42, &PARITY_ROWS), 557);
    }

    #[test]
    fn test_edge_messages() {
        assert_eq!(encode(0).unwrap(), 0);
        let c = encode(MAX_MESSAGE).unwrap();
        assert_eq!((c & 0xFFF) as u16, MAX_MESSAGE);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(encode(4096), Err(CodecErr::InvalidMessage { value: 4096 }));
        assert_eq!(encode(u16::MAX), Err(CodecErr::InvalidMessage { value: u16::MAX }));
    }

    #[test]
    fn test_encoding_is_linear() {
        // c(a ^ b) == c(a) ^ c(b) for a linear code
        let pairs = [(42u16, 2730u16), (1, 4095), (365, 1234)];
        for (a, b) in pairs {
            let ca = encode(a).unwrap();
            let cb = encode(b).unwrap();
            assert_eq!(encode(a ^ b).unwrap(), ca ^ cb);
        }
    }
}
