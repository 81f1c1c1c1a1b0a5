//! RSA key value types and the operations they grant.
//!
//! Keys are immutable after construction and freely shared across threads;
//! every signing or verification operation gets its own context borrowing
//! the key. The private key zeroizes its secret components on drop, and
//! [`RsaPrivateKey::public_key`] hands out an independent snapshot that stays
//! valid past that point.

use alloc::vec::Vec;
use core::fmt;

use num_bigint::{BigUint, ModInverse};
use num_traits::One;
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::algorithms::oaep::{oaep_decrypt, oaep_encrypt};
use crate::algorithms::pkcs1v15::{pkcs1v15_encrypt_pad, pkcs1v15_encrypt_unpad};
use crate::algorithms::rsa::{decrypt_block, encrypt_block};
use crate::context::{SignatureContext, VerificationContext};
use crate::errors::{Error, Result};
use crate::hash::HashAlgorithm;
use crate::padding::PaddingScheme;
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Represents the public part of an RSA key.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RsaPublicKey {
    n: BigUint,
    e: BigUint,
}

/// Represents a whole RSA key, public and private parts.
#[derive(Clone)]
pub struct RsaPrivateKey {
    public: RsaPublicKey,
    /// Private exponent.
    d: BigUint,
    /// First prime factor of the modulus.
    p: BigUint,
    /// Second prime factor of the modulus.
    q: BigUint,
    /// d mod (p - 1)
    dp: BigUint,
    /// d mod (q - 1)
    dq: BigUint,
    /// q⁻¹ mod p
    qinv: BigUint,
}

impl RsaPublicKey {
    /// Creates a public key from its numeric components.
    pub fn new(n: BigUint, e: BigUint) -> Self {
        RsaPublicKey { n, e }
    }

    /// Encrypts `msg` under `padding` ([`PaddingScheme::Pkcs1v15`] or one of
    /// the OAEP variants).
    ///
    /// The OAEP seed and the PKCS#1 v1.5 filler string are drawn from `rng`,
    /// which must be cryptographically secure.
    pub fn encrypt<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        padding: PaddingScheme,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        padding.validate_for_encryption()?;
        let k = self.size();

        let em = match &padding {
            PaddingScheme::Pkcs1v15 => pkcs1v15_encrypt_pad(rng, msg, k)?,
            PaddingScheme::Oaep { digest, mgf, .. } => oaep_encrypt(
                rng,
                msg,
                &mut *digest.new_digest(),
                &mut *mgf.hash().new_digest(),
                k,
            )?,
            PaddingScheme::Pss { .. } => return Err(Error::UnsupportedPadding),
        };

        encrypt_block(self, &em)
    }

    /// Creates a verification context for `signature`.
    ///
    /// Padding and key/digest compatibility are validated here, before any
    /// data is fed in.
    pub fn verifier(
        &self,
        signature: &[u8],
        padding: PaddingScheme,
        algorithm: HashAlgorithm,
    ) -> Result<VerificationContext<'_>> {
        VerificationContext::new(self, signature.to_vec(), padding, algorithm)
    }
}

impl RsaPrivateKey {
    /// Creates a private key from its numeric components.
    ///
    /// `p * q` must equal `n`; the CRT parameters `dp`, `dq` and `qinv` are
    /// derived here, so they are consistent by construction.
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        d: BigUint,
        p: BigUint,
        q: BigUint,
    ) -> Result<Self> {
        if &p * &q != n {
            return Err(Error::InvalidModulus);
        }

        let one = BigUint::one();
        let dp = &d % (&p - &one);
        let dq = &d % (&q - &one);
        let qinv = (&q)
            .mod_inverse(&p)
            .and_then(|i| i.to_biguint())
            .ok_or(Error::InvalidCoefficient)?;

        Ok(RsaPrivateKey {
            public: RsaPublicKey { n, e },
            d,
            p,
            q,
            dp,
            dq,
            qinv,
        })
    }

    /// Returns a snapshot of the public half of this key.
    ///
    /// The snapshot owns copies of the components, so it remains valid after
    /// the private key is dropped.
    pub fn public_key(&self) -> RsaPublicKey {
        self.public.clone()
    }

    /// Creates a signing context using `padding`
    /// ([`PaddingScheme::Pkcs1v15`] or one of the PSS variants) over data
    /// hashed with `algorithm`.
    ///
    /// Padding and key/digest compatibility are validated here, before any
    /// data is fed in.
    pub fn signer(
        &self,
        padding: PaddingScheme,
        algorithm: HashAlgorithm,
    ) -> Result<SignatureContext<'_>> {
        SignatureContext::new(self, padding, algorithm)
    }

    /// Decrypts `ciphertext` under `padding`.
    ///
    /// The ciphertext must be exactly the key size. Any failure after that
    /// (wrong key, corrupted block, malformed padding) is reported as the
    /// single [`Error::Decryption`].
    pub fn decrypt(&self, padding: PaddingScheme, ciphertext: &[u8]) -> Result<Vec<u8>> {
        padding.validate_for_encryption()?;
        let k = self.size();
        if ciphertext.len() != k {
            return Err(Error::Decryption);
        }

        let mut em =
            Zeroizing::new(decrypt_block(self, ciphertext).map_err(|_| Error::Decryption)?);

        match &padding {
            PaddingScheme::Pkcs1v15 => pkcs1v15_encrypt_unpad(&em, k),
            PaddingScheme::Oaep { digest, mgf, .. } => oaep_decrypt(
                &mut em,
                &mut *digest.new_digest(),
                &mut *mgf.hash().new_digest(),
                k,
            ),
            PaddingScheme::Pss { .. } => Err(Error::UnsupportedPadding),
        }
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.public.n
    }

    fn e(&self) -> &BigUint {
        &self.public.e
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn d(&self) -> &BigUint {
        &self.d
    }

    fn p(&self) -> &BigUint {
        &self.p
    }

    fn q(&self) -> &BigUint {
        &self.q
    }

    fn dp(&self) -> &BigUint {
        &self.dp
    }

    fn dq(&self) -> &BigUint {
        &self.dq
    }

    fn qinv(&self) -> &BigUint {
        &self.qinv
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(key: &RsaPrivateKey) -> Self {
        key.public_key()
    }
}

impl fmt::Debug for RsaPrivateKey {
    /// Secret components are not part of the debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn crt_parameters_are_derived() {
        let key = tiny_key();
        assert_eq!(key.dp(), &BigUint::from(53u32)); // 2753 mod 60
        assert_eq!(key.dq(), &BigUint::from(49u32)); // 2753 mod 52
        assert_eq!(key.qinv(), &BigUint::from(38u32)); // 53⁻¹ mod 61
    }

    #[test]
    fn mismatched_primes_are_rejected() {
        let res = RsaPrivateKey::from_components(
            BigUint::from(3233u32),
            BigUint::from(17u32),
            BigUint::from(2753u32),
            BigUint::from(61u32),
            BigUint::from(59u32),
        );
        assert_eq!(res.err(), Some(Error::InvalidModulus));
    }

    #[test]
    fn public_snapshot_outlives_private_key() {
        let key = tiny_key();
        let public = key.public_key();
        drop(key);
        assert_eq!(public.size_bits(), 12);
        assert_eq!(public.size(), 2);
    }

    #[test]
    fn public_key_construction_matches_snapshot() {
        let key = tiny_key();
        let from_parts = RsaPublicKey::new(BigUint::from(3233u32), BigUint::from(17u32));
        assert_eq!(from_parts, RsaPublicKey::from(&key));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let key = tiny_key();
        let out = format!("{key:?}");
        assert!(out.contains("3233"));
        assert!(!out.contains("2753"));
    }
}
