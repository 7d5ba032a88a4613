//! Rotate obfuscation
//!
//! Byte `n` is rotated by an amount that starts at 1 and advances by 2
//! (mod 8) per byte: 1, 3, 5, 7, 1, 3, ...

/// Rotation amount applied to the byte at `index`
#[inline]
fn amount(index: usize) -> u32 {
    ((1 + 2 * index) % 8) as u32
}

/// Rotate every byte left by its position-derived amount
#[must_use]
pub fn encode(src: &[u8]) -> Vec<u8> {
    src.iter()
        .enumerate()
        .map(|(i, b)| b.rotate_left(amount(i)))
        .collect()
}

/// Rotate every byte right by its position-derived amount
#[must_use]
pub fn decode(src: &[u8]) -> Vec<u8> {
    src.iter()
        .enumerate()
        .map(|(i, b)| b.rotate_right(amount(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_sequence() {
        let amounts: Vec<u32> = (0..9).map(amount).collect();
        assert_eq!(amounts, [1, 3, 5, 7, 1, 3, 5, 7, 1]);
    }

    #[test]
    fn test_known_bytes() {
        let encoded = encode(&[0x01, 0x01, 0x01, 0x01, 0x81]);
        assert_eq!(encoded, [0x02, 0x08, 0x20, 0x80, 0x03]);
        assert_eq!(decode(&encoded), [0x01, 0x01, 0x01, 0x01, 0x81]);
    }

    #[test]
    fn test_roundtrip() {
        let src: Vec<u8> = (0..=255u8).collect();
        assert_eq!(decode(&encode(&src)), src);
        assert_eq!(encode(&decode(&src)), src);
    }

    #[test]
    fn test_encode_is_not_its_own_inverse() {
        let src: Vec<u8> = (0..=255u8).collect();
        let encoded = encode(&src);

        assert_ne!(encoded, src);
        assert_ne!(encode(&encoded), src);
    }

    #[test]
    fn test_empty() {
        assert!(encode(&[]).is_empty());
        assert!(decode(&[]).is_empty());
    }
}
