//! PSS signature padding (RFC 8017 § 9.1), a.k.a. RSASSA-PSS.
//!
//! Encoding operates over `em_bits = key_bits - 1` bits, so for keys whose
//! bit length is not 1 mod 8 the leftmost bits of the first octet are masked
//! out, per RFC 8017 § 9.1.1 steps 10-11.

use alloc::vec::Vec;

use digest::DynDigest;
use subtle::{Choice, ConstantTimeEq};

use super::mgf::mgf1_xor;
use crate::errors::{Error, Result};

/// Encodes `m_hash` and `salt` into `EM = maskedDB || H || 0xBC` of length
/// `ceil(em_bits / 8)`.
///
/// `digest` computes `H` and must be the algorithm that produced `m_hash`;
/// `mgf_digest` drives MGF1. The salt length has already been resolved by the
/// caller and may be zero.
pub(crate) fn emsa_pss_encode(
    m_hash: &[u8],
    em_bits: usize,
    salt: &[u8],
    digest: &mut dyn DynDigest,
    mgf_digest: &mut dyn DynDigest,
) -> Result<Vec<u8>> {
    let h_len = digest.output_size();
    let s_len = salt.len();
    let em_len = em_bits.div_ceil(8);

    if m_hash.len() != h_len {
        return Err(Error::UnsupportedHash);
    }

    // Salt resolution already bounded s_len, but a fixed salt against a
    // barely-large-enough key can still fall over the em_bits edge.
    if em_len < h_len + s_len + 2 {
        return Err(Error::KeyTooSmall);
    }

    let mut em = vec![0u8; em_len];
    let (db, rest) = em.split_at_mut(em_len - h_len - 1);
    let h = &mut rest[..h_len];

    // H = Hash(0x00*8 || mHash || salt)
    digest.update(&[0u8; 8]);
    digest.update(m_hash);
    digest.update(salt);
    let hashed = digest.finalize_reset();
    h.copy_from_slice(&hashed);

    // DB = PS || 0x01 || salt
    db[em_len - s_len - h_len - 2] = 0x01;
    db[em_len - s_len - h_len - 1..].copy_from_slice(salt);

    // maskedDB = DB xor MGF1(H, emLen - hLen - 1), with the excess leading
    // bits of the first octet cleared.
    mgf1_xor(db, mgf_digest, h);
    db[0] &= 0xFF >> (8 * em_len - em_bits);

    em[em_len - 1] = 0xBC;

    Ok(em)
}

/// Verifies `em` against `m_hash` with the already-resolved salt length.
///
/// Structural defects and digest mismatches all produce the same
/// `Verification` error; the `H` comparison is constant-time.
pub(crate) fn emsa_pss_verify(
    m_hash: &[u8],
    em: &mut [u8],
    s_len: usize,
    digest: &mut dyn DynDigest,
    mgf_digest: &mut dyn DynDigest,
    key_bits: usize,
) -> Result<()> {
    let em_bits = key_bits - 1;
    let em_len = em_bits.div_ceil(8);
    let key_len = key_bits.div_ceil(8);
    let h_len = digest.output_size();

    if m_hash.len() != h_len || em.len() != key_len {
        return Err(Error::Verification);
    }

    // For non-byte-aligned keys the raw RSA output is one byte longer than
    // EM; that leading byte must be zero.
    if em[..key_len - em_len].iter().any(|&b| b != 0) {
        return Err(Error::Verification);
    }
    let em = &mut em[key_len - em_len..];

    if em_len < h_len + s_len + 2 {
        return Err(Error::Verification);
    }

    if em[em_len - 1] != 0xBC {
        return Err(Error::Verification);
    }

    let (db, rest) = em.split_at_mut(em_len - h_len - 1);
    let h = &mut rest[..h_len];

    // The bits beyond em_bits in the first octet must already be zero.
    if db[0] & (0xFF_u8.checked_shl(8 - (8 * em_len - em_bits) as u32).unwrap_or(0)) != 0 {
        return Err(Error::Verification);
    }

    mgf1_xor(db, mgf_digest, h);
    db[0] &= 0xFF >> (8 * em_len - em_bits);

    // DB = PS || 0x01 || salt with exactly em_len - h_len - s_len - 2 zero
    // padding bytes.
    let (zeroes, rest) = db.split_at(em_len - h_len - s_len - 2);
    let padding_good: Choice = zeroes
        .iter()
        .fold(Choice::from(1u8), |a, e| a & e.ct_eq(&0x00));
    let separator_good = rest[0].ct_eq(&0x01);
    let salt = &rest[1..];

    // H' = Hash(0x00*8 || mHash || salt)
    digest.update(&[0u8; 8]);
    digest.update(m_hash);
    digest.update(salt);
    let h0 = digest.finalize_reset();

    if (padding_good & separator_good & h0.ct_eq(h)).into() {
        Ok(())
    } else {
        Err(Error::Verification)
    }
}
