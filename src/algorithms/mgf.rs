//! Mask generation function common to both PSS and OAEP padding.

use digest::DynDigest;

/// MGF1 (RFC 8017 appendix B.2.1), XORed into `out`.
///
/// The mask for `out` is `hash(seed || be32(0)) || hash(seed || be32(1)) || …`
/// truncated to `out.len()`. XORing in place is how both codecs consume the
/// mask, so the mask itself is never materialized.
///
/// Panics if `out` is longer than `hash_len * 2^32`, in accordance with the
/// RFC's input limit.
pub(crate) fn mgf1_xor(out: &mut [u8], digest: &mut dyn DynDigest, seed: &[u8]) {
    const MAX_LEN: u64 = u32::MAX as u64 + 1;
    assert!(out.len() as u64 <= MAX_LEN);

    let mut counter: u32 = 0;
    for chunk in out.chunks_mut(digest.output_size()) {
        digest.update(seed);
        digest.update(&counter.to_be_bytes());
        let block = digest.finalize_reset();

        for (dst, mask) in chunk.iter_mut().zip(block.iter()) {
            *dst ^= mask;
        }
        counter = counter.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashAlgorithm;
    use hex_literal::hex;

    fn mgf1(seed: &[u8], len: usize, hash: HashAlgorithm) -> alloc::vec::Vec<u8> {
        let mut out = vec![0u8; len];
        mgf1_xor(&mut out, &mut *hash.new_digest(), seed);
        out
    }

    #[test]
    fn mgf1_sha1_vectors() {
        assert_eq!(mgf1(b"foo", 3, HashAlgorithm::Sha1), hex!("1ac907"));
        assert_eq!(mgf1(b"foo", 5, HashAlgorithm::Sha1), hex!("1ac9075cd4"));
        assert_eq!(mgf1(b"bar", 5, HashAlgorithm::Sha1), hex!("bc0c655e01"));
        assert_eq!(
            mgf1(b"bar", 50, HashAlgorithm::Sha1),
            hex!(
                "bc0c655e016bc2931d85a2e675181adcef7f581f76df2739da74faac41627be2"
                "f7f415c89e983fd0ce80ced9878641cb4876"
            )
        );
    }

    #[test]
    fn mgf1_sha256_vector() {
        assert_eq!(
            mgf1(b"bar", 50, HashAlgorithm::Sha256),
            hex!(
                "382576a7841021cc28fc4c0948753fb8312090cea942ea4c4e735d10dc724b15"
                "5f9f6069f289d61daca0cb814502ef04eae1"
            )
        );
    }

    #[test]
    fn mgf1_is_deterministic() {
        let a = mgf1(b"seed", 100, HashAlgorithm::Sha256);
        let b = mgf1(b"seed", 100, HashAlgorithm::Sha256);
        assert_eq!(a, b);
        // A longer mask is a prefix extension of a shorter one.
        let c = mgf1(b"seed", 64, HashAlgorithm::Sha256);
        assert_eq!(&a[..64], &c[..]);
    }
}
