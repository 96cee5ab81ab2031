//! MurmurHash3, x86 32-bit variant.

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

/// Hash `data` with MurmurHash3 (x86, 32-bit) and the given seed
pub fn murmur3_32(data: &[u8], seed: u32) -> u32 {
    let mut hash = seed;

    let chunks = data.chunks_exact(4);
    let tail = chunks.remainder();
    for chunk in chunks {
        let k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        hash ^= scramble(k);
        hash = hash.rotate_left(13).wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    if !tail.is_empty() {
        let k = tail
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &byte)| acc ^ (u32::from(byte) << (8 * i)));
        hash ^= scramble(k);
    }

    hash ^= data.len() as u32;
    fmix(hash)
}

/// Hash a string's UTF-8 bytes with seed 0
pub fn murmur3_str(input: &str) -> u32 {
    murmur3_32(input.as_bytes(), 0)
}

fn scramble(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

fn fmix(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(murmur3_32(b"", 0), 0);
        assert_eq!(murmur3_32(b"", 1), 0x514e_28b7);
        assert_eq!(murmur3_str("hello"), 0x248b_fa47);
    }

    #[test]
    fn test_seed_changes_hash() {
        assert_ne!(murmur3_32(b"div", 0), murmur3_32(b"div", 42));
    }
}
