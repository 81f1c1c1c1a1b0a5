//! Incremental signing and verification contexts.
//!
//! A context is linear: it accepts `update` calls while active and exactly
//! one `finalize`, after which any further call fails with
//! [`Error::AlreadyFinalized`]. Each logical operation needs its own context;
//! many contexts may borrow the same key concurrently.

use alloc::boxed::Box;
use alloc::vec::Vec;

use digest::DynDigest;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::algorithms::pkcs1v15::{pkcs1v15_sign_pad, pkcs1v15_sign_unpad};
use crate::algorithms::pss::{emsa_pss_encode, emsa_pss_verify};
use crate::algorithms::rsa::{decrypt_block, encrypt_block};
use crate::errors::{Error, Result};
use crate::hash::HashAlgorithm;
use crate::key::{RsaPrivateKey, RsaPublicKey};
use crate::padding::{Mgf, PaddingScheme};
use crate::traits::PublicKeyParts;

/// Incremental signing over a borrowed private key.
///
/// Created by [`RsaPrivateKey::signer`]; single-use.
pub struct SignatureContext<'a> {
    key: &'a RsaPrivateKey,
    padding: PaddingScheme,
    algorithm: HashAlgorithm,
    hasher: Box<dyn DynDigest>,
    finalized: bool,
}

impl<'a> SignatureContext<'a> {
    pub(crate) fn new(
        key: &'a RsaPrivateKey,
        padding: PaddingScheme,
        algorithm: HashAlgorithm,
    ) -> Result<Self> {
        padding.validate_for_signature(key.size(), algorithm)?;

        Ok(SignatureContext {
            key,
            padding,
            algorithm,
            hasher: algorithm.new_digest(),
            finalized: false,
        })
    }

    /// Feeds `data` into the running digest.
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if self.finalized {
            return Err(Error::AlreadyFinalized);
        }
        self.hasher.update(data);
        Ok(())
    }

    /// Computes the signature over everything fed so far.
    ///
    /// `rng` supplies the PSS salt; PKCS#1 v1.5 signing is deterministic but
    /// takes the same interface. A second call fails with
    /// [`Error::AlreadyFinalized`].
    pub fn finalize<R: CryptoRngCore + ?Sized>(&mut self, rng: &mut R) -> Result<Vec<u8>> {
        if self.finalized {
            return Err(Error::AlreadyFinalized);
        }
        self.finalized = true;

        let m_hash = Zeroizing::new(self.hasher.finalize_reset().into_vec());
        let k = self.key.size();

        let em = match &self.padding {
            PaddingScheme::Pkcs1v15 => {
                pkcs1v15_sign_pad(self.algorithm.pkcs1v15_prefix(), &m_hash, k)?
            }
            PaddingScheme::Pss { mgf: Mgf::Mgf1(mgf_hash), salt_len } => {
                let bits = self.key.size_bits();
                let s_len = salt_len.resolve(bits, self.algorithm.digest_size())?;
                let mut salt = vec![0u8; s_len];
                rng.fill_bytes(&mut salt);
                emsa_pss_encode(
                    &m_hash,
                    bits - 1,
                    &salt,
                    &mut *self.hasher,
                    &mut *mgf_hash.new_digest(),
                )?
            }
            PaddingScheme::Oaep { .. } => return Err(Error::UnsupportedPadding),
        };

        decrypt_block(self.key, &em)
    }
}

/// Incremental verification over a borrowed public key.
///
/// Created by [`RsaPublicKey::verifier`] with the candidate signature;
/// single-use.
pub struct VerificationContext<'a> {
    key: &'a RsaPublicKey,
    signature: Vec<u8>,
    padding: PaddingScheme,
    algorithm: HashAlgorithm,
    hasher: Box<dyn DynDigest>,
    finalized: bool,
}

impl<'a> VerificationContext<'a> {
    pub(crate) fn new(
        key: &'a RsaPublicKey,
        signature: Vec<u8>,
        padding: PaddingScheme,
        algorithm: HashAlgorithm,
    ) -> Result<Self> {
        padding.validate_for_signature(key.size(), algorithm)?;

        Ok(VerificationContext {
            key,
            signature,
            padding,
            algorithm,
            hasher: algorithm.new_digest(),
            finalized: false,
        })
    }

    /// Feeds `data` into the running digest.
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if self.finalized {
            return Err(Error::AlreadyFinalized);
        }
        self.hasher.update(data);
        Ok(())
    }

    /// Verifies the signature against everything fed so far.
    ///
    /// Whatever went wrong (wrong key, corrupted signature, malformed
    /// padding, digest mismatch), the outcome is the single
    /// [`Error::Verification`]. A second call fails with
    /// [`Error::AlreadyFinalized`].
    pub fn finalize(&mut self) -> Result<()> {
        if self.finalized {
            return Err(Error::AlreadyFinalized);
        }
        self.finalized = true;

        let m_hash = self.hasher.finalize_reset().into_vec();
        let k = self.key.size();

        if self.signature.len() != k {
            return Err(Error::Verification);
        }

        // Raw public-key operation; a signature numerically out of range is
        // the same undifferentiated failure as any other defect.
        let mut em =
            encrypt_block(self.key, &self.signature).map_err(|_| Error::Verification)?;

        match &self.padding {
            PaddingScheme::Pkcs1v15 => {
                pkcs1v15_sign_unpad(self.algorithm.pkcs1v15_prefix(), &m_hash, &em, k)
            }
            PaddingScheme::Pss { mgf: Mgf::Mgf1(mgf_hash), salt_len } => {
                let bits = self.key.size_bits();
                let s_len = salt_len.resolve(bits, self.algorithm.digest_size())?;
                emsa_pss_verify(
                    &m_hash,
                    &mut em,
                    s_len,
                    &mut *self.hasher,
                    &mut *mgf_hash.new_digest(),
                    bits,
                )
            }
            PaddingScheme::Oaep { .. } => Err(Error::UnsupportedPadding),
        }
    }
}
