//! PKCS#1 v1.5 padding (RFC 8017 § 7.2 and § 8.2).
//!
//! Both sub-protocols share the block shape `0x00 || BT || PS || 0x00 || M`
//! over the full key size: block type `0x02` with non-zero random filler for
//! encryption, block type `0x01` with `0xFF` filler for signatures.

use alloc::vec::Vec;

use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroizing;

use crate::errors::{Error, Result};

/// Fills the provided slice with random values which are guaranteed to not
/// be zero, as required for the encryption filler string.
#[inline]
fn non_zero_random_bytes<R: CryptoRngCore + ?Sized>(rng: &mut R, data: &mut [u8]) {
    rng.fill_bytes(data);

    for el in data {
        while *el == 0u8 {
            rng.fill_bytes(core::slice::from_mut(el));
        }
    }
}

/// Builds an encryption block `0x00 || 0x02 || PS || 0x00 || msg` of length
/// `k`. The message must be no longer than `k - 11`.
pub(crate) fn pkcs1v15_encrypt_pad<R>(
    rng: &mut R,
    msg: &[u8],
    k: usize,
) -> Result<Zeroizing<Vec<u8>>>
where
    R: CryptoRngCore + ?Sized,
{
    if msg.len() + 11 > k {
        return Err(Error::MessageTooLong);
    }

    let mut em = Zeroizing::new(vec![0u8; k]);
    em[1] = 2;
    non_zero_random_bytes(rng, &mut em[2..k - msg.len() - 1]);
    em[k - msg.len()..].copy_from_slice(msg);
    Ok(em)
}

/// Recovers the message from an encryption block.
///
/// Every structural defect (wrong leading bytes, wrong block type, missing
/// separator, filler shorter than eight bytes) collapses into the one
/// `Decryption` error, and the block is scanned in full regardless of where
/// a defect sits. Distinguishing the causes is what a Bleichenbacher oracle
/// feeds on.
#[inline]
pub(crate) fn pkcs1v15_encrypt_unpad(em: &[u8], k: usize) -> Result<Vec<u8>> {
    if k < 11 || em.len() != k {
        return Err(Error::Decryption);
    }

    let first_byte_is_zero = em[0].ct_eq(&0u8);
    let second_byte_is_two = em[1].ct_eq(&2u8);

    // Scan for the 0x00 separator without branching on the data:
    //   looking_for_index: still looking for the separator
    //   index: offset of the first zero byte
    let mut looking_for_index = Choice::from(1u8);
    let mut index = 0u32;

    for (i, el) in em.iter().enumerate().skip(2) {
        let equals0 = el.ct_eq(&0u8);
        index.conditional_assign(&(i as u32), looking_for_index & equals0);
        looking_for_index &= !equals0;
    }

    // The filler string must be at least 8 bytes, so the separator may not
    // appear before index 10.
    let valid_ps = Choice::from((index >= 2 + 8) as u8);
    let valid = first_byte_is_zero & second_byte_is_two & !looking_for_index & valid_ps;
    index = u32::conditional_select(&0, &(index + 1), valid);

    if valid.unwrap_u8() != 1 {
        return Err(Error::Decryption);
    }

    Ok(em[index as usize..].to_vec())
}

/// Builds a signature block `0x00 || 0x01 || PS || 0x00 || T` of length `k`,
/// where `T` is the `DigestInfo` prefix followed by the digest.
#[inline]
pub(crate) fn pkcs1v15_sign_pad(prefix: &[u8], hashed: &[u8], k: usize) -> Result<Vec<u8>> {
    let hash_len = hashed.len();
    let t_len = prefix.len() + hash_len;
    if k < t_len + 11 {
        return Err(Error::MessageTooLong);
    }

    let mut em = vec![0xff; k];
    em[0] = 0;
    em[1] = 1;
    em[k - t_len - 1] = 0;
    em[k - t_len..k - hash_len].copy_from_slice(prefix);
    em[k - hash_len..].copy_from_slice(hashed);

    Ok(em)
}

/// Compares a recovered signature block against the expected padding of
/// `hashed`. Constant-time over the whole block; any mismatch is the single
/// `Verification` error.
#[inline]
pub(crate) fn pkcs1v15_sign_unpad(prefix: &[u8], hashed: &[u8], em: &[u8], k: usize) -> Result<()> {
    let hash_len = hashed.len();
    let t_len = prefix.len() + hash_len;
    if k < t_len + 11 || em.len() != k {
        return Err(Error::Verification);
    }

    let mut ok = em[0].ct_eq(&0u8);
    ok &= em[1].ct_eq(&1u8);
    ok &= em[k - hash_len..].ct_eq(hashed);
    ok &= em[k - t_len..k - hash_len].ct_eq(prefix);
    ok &= em[k - t_len - 1].ct_eq(&0u8);

    for el in em.iter().skip(2).take(k - t_len - 3) {
        ok &= el.ct_eq(&0xff);
    }

    if ok.unwrap_u8() != 1 {
        return Err(Error::Verification);
    }

    Ok(())
}
