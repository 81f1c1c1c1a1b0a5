//! Raw RSA primitive, wrapped as fixed-width block operations.
//!
//! This is the only place the big-integer collaborator is invoked. Both
//! operations take and return blocks of exactly the key size; the numeric
//! value of an input block must be strictly below the modulus.

use alloc::vec::Vec;

use num_bigint::BigUint;

use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Public-key operation: `block^e mod n`, left-padded to the key size.
pub(crate) fn encrypt_block<K: PublicKeyParts>(key: &K, block: &[u8]) -> Result<Vec<u8>> {
    let m = BigUint::from_bytes_be(block);
    if &m >= key.n() {
        return Err(Error::DataTooLarge);
    }

    let c = m.modpow(key.e(), key.n());
    left_pad(&c.to_bytes_be(), key.size())
}

/// Private-key operation: `block^d mod n` via the CRT, left-padded to the
/// key size.
///
/// With `m1 = c^dp mod p`, `m2 = c^dq mod q` and
/// `h = qinv * (m1 - m2) mod p`, the result is `m2 + h * q`. The subtraction
/// is kept non-negative by adding `p` before reducing, so everything stays in
/// unsigned arithmetic.
pub(crate) fn decrypt_block<K: PrivateKeyParts>(key: &K, block: &[u8]) -> Result<Vec<u8>> {
    let c = BigUint::from_bytes_be(block);
    if &c >= key.n() {
        return Err(Error::DataTooLarge);
    }

    let m1 = c.modpow(key.dp(), key.p());
    let m2 = c.modpow(key.dq(), key.q());

    let m2_mod_p = &m2 % key.p();
    let diff = (&m1 + key.p() - &m2_mod_p) % key.p();
    let h = (key.qinv() * diff) % key.p();
    let m = m2 + h * key.q();

    left_pad(&m.to_bytes_be(), key.size())
}

/// Returns a new vector of the given length with the input right-aligned and
/// zeros on the left.
#[inline]
pub(crate) fn left_pad(input: &[u8], padded_len: usize) -> Result<Vec<u8>> {
    if input.len() > padded_len {
        return Err(Error::DataTooLarge);
    }

    let mut out = vec![0u8; padded_len];
    out[padded_len - input.len()..].copy_from_slice(input);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::RsaPrivateKey;

    // Textbook key: p = 61, q = 53, n = 3233, e = 17, d = 2753.
    fn tiny_key() -> RsaPrivateKey {
        RsaPrivateKey::from_components(
            BigUint::from(3233u32),
            BigUint::from(17u32),
            BigUint::from(2753u32),
            BigUint::from(61u32),
            BigUint::from(53u32),
        )
        .unwrap()
    }

    #[test]
    fn raw_round_trip() {
        let key = tiny_key();
        for m in [0u8, 1, 42, 255] {
            let c = encrypt_block(&key.public_key(), &[0, m]).unwrap();
            assert_eq!(c.len(), 2);
            let out = decrypt_block(&key, &c).unwrap();
            assert_eq!(out, [0, m]);
        }
    }

    #[test]
    fn crt_matches_plain_exponentiation() {
        let key = tiny_key();
        for m in [2u32, 65, 1000, 3232] {
            let c = BigUint::from(m).modpow(key.e(), key.n());
            let via_crt = decrypt_block(&key, &left_pad(&c.to_bytes_be(), 2).unwrap()).unwrap();
            let plain = c.modpow(key.d(), key.n());
            assert_eq!(via_crt, left_pad(&plain.to_bytes_be(), 2).unwrap());
        }
    }

    #[test]
    fn block_value_must_be_below_modulus() {
        let key = tiny_key();
        // 0x0FFF = 4095 >= 3233
        assert_eq!(
            encrypt_block(&key.public_key(), &[0x0F, 0xFF]),
            Err(Error::DataTooLarge)
        );
        assert_eq!(decrypt_block(&key, &[0x0F, 0xFF]), Err(Error::DataTooLarge));
    }

    #[test]
    fn output_is_left_padded_to_key_size() {
        let key = tiny_key();
        // Whatever the numeric value of 5^17 mod 3233, the block length
        // must equal the key size.
        let c = encrypt_block(&key.public_key(), &[0, 5]).unwrap();
        assert_eq!(c.len(), key.public_key().size());
        let m = decrypt_block(&key, &c).unwrap();
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn left_pad_bounds() {
        assert_eq!(left_pad(&[1, 2], 4).unwrap(), [0, 0, 1, 2]);
        assert_eq!(left_pad(&[1, 2], 2).unwrap(), [1, 2]);
        assert!(left_pad(&[1, 2, 3], 2).is_err());
    }
}
