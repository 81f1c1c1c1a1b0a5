//! Padding scheme descriptors and their eager validation.
//!
//! A [`PaddingScheme`] is an immutable description of how a message is padded
//! before the RSA primitive runs. Whether a given scheme can be used at all
//! with a given key and digest is decided *here*, when a context or one-shot
//! operation is created, so callers learn about a mismatch before any data
//! has been hashed.

use alloc::string::String;

use crate::errors::{Error, Result};
use crate::hash::HashAlgorithm;

/// Mask generation functions. Only MGF1 (RFC 8017 appendix B.2.1) exists in
/// practice; the enum keeps the choice explicit in descriptors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Mgf {
    /// MGF1 over the given digest algorithm.
    Mgf1(HashAlgorithm),
}

impl Mgf {
    pub(crate) fn hash(&self) -> HashAlgorithm {
        match self {
            Mgf::Mgf1(hash) => *hash,
        }
    }
}

/// PSS salt length policy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SaltLength {
    /// Fixed salt length in bytes. Zero is permitted.
    Bytes(usize),
    /// The maximum salt length the key and digest sizes allow,
    /// `emLen - digest_size - 2`, resolved at finalize time.
    Max,
}

impl SaltLength {
    /// Resolves the policy against a key/digest pair.
    ///
    /// `emLen` is `ceil((key_bits - 1) / 8)` per RFC 3447, which for keys
    /// whose bit length is 1 mod 8 is one byte shorter than the key itself.
    pub(crate) fn resolve(&self, key_bits: usize, digest_size: usize) -> Result<usize> {
        let em_len = (key_bits - 1).div_ceil(8);
        let max = em_len
            .checked_sub(digest_size + 2)
            .ok_or(Error::KeyTooSmall)?;
        match self {
            SaltLength::Bytes(len) if *len > max => Err(Error::KeyTooSmall),
            SaltLength::Bytes(len) => Ok(*len),
            SaltLength::Max => Ok(max),
        }
    }
}

/// Available padding schemes.
///
/// Four combinations are valid: `Pkcs1v15` and `Oaep` for encryption,
/// `Pkcs1v15` and `Pss` for signatures. Using a scheme for the other
/// operation fails with [`Error::UnsupportedPadding`] at setup time.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum PaddingScheme {
    /// PKCS#1 v1.5 padding (block type 02 for encryption, 01 for signatures).
    Pkcs1v15,
    /// OAEP padding for encryption.
    Oaep {
        /// Digest used to hash the label.
        digest: HashAlgorithm,
        /// Mask generation function.
        mgf: Mgf,
        /// Optional label. Only `None` or the empty string are accepted.
        label: Option<String>,
    },
    /// PSS padding for signatures.
    Pss {
        /// Mask generation function.
        mgf: Mgf,
        /// Salt length policy.
        salt_len: SaltLength,
    },
}

impl PaddingScheme {
    /// PKCS#1 v1.5 padding.
    pub fn new_pkcs1v15() -> Self {
        PaddingScheme::Pkcs1v15
    }

    /// OAEP with the same digest for the label hash and MGF1.
    pub fn new_oaep(digest: HashAlgorithm) -> Self {
        PaddingScheme::Oaep {
            digest,
            mgf: Mgf::Mgf1(digest),
            label: None,
        }
    }

    /// OAEP with separate label and MGF1 digests.
    pub fn new_oaep_with_mgf_hash(digest: HashAlgorithm, mgf_hash: HashAlgorithm) -> Self {
        PaddingScheme::Oaep {
            digest,
            mgf: Mgf::Mgf1(mgf_hash),
            label: None,
        }
    }

    /// PSS with the maximum salt length the key and digest allow.
    pub fn new_pss(mgf_hash: HashAlgorithm) -> Self {
        PaddingScheme::Pss {
            mgf: Mgf::Mgf1(mgf_hash),
            salt_len: SaltLength::Max,
        }
    }

    /// PSS with a fixed salt length.
    pub fn new_pss_with_salt(mgf_hash: HashAlgorithm, salt_len: usize) -> Self {
        PaddingScheme::Pss {
            mgf: Mgf::Mgf1(mgf_hash),
            salt_len: SaltLength::Bytes(salt_len),
        }
    }

    /// Checks that `self` is usable for signing/verifying with the given key
    /// size and digest.
    ///
    /// The key must be able to hold the digest: `key_bytes - digest_size - 2`
    /// may not be negative. This runs at context creation, not finalize, so
    /// the mismatch surfaces before any hashing work.
    pub(crate) fn validate_for_signature(
        &self,
        key_bytes: usize,
        algorithm: HashAlgorithm,
    ) -> Result<()> {
        match self {
            PaddingScheme::Pkcs1v15 => {}
            PaddingScheme::Pss { mgf: Mgf::Mgf1(_), .. } => {}
            PaddingScheme::Oaep { .. } => return Err(Error::UnsupportedPadding),
        }

        if key_bytes < algorithm.digest_size() + 2 {
            return Err(Error::KeyTooSmall);
        }

        Ok(())
    }

    /// Checks that `self` is usable for encryption/decryption.
    pub(crate) fn validate_for_encryption(&self) -> Result<()> {
        match self {
            PaddingScheme::Pkcs1v15 => Ok(()),
            PaddingScheme::Oaep { mgf: Mgf::Mgf1(_), label, .. } => {
                // Label support is deliberately absent; an empty label is
                // the same as no label.
                if label.as_deref().is_some_and(|l| !l.is_empty()) {
                    return Err(Error::UnsupportedFeature);
                }
                Ok(())
            }
            PaddingScheme::Pss { .. } => Err(Error::UnsupportedPadding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_salt_length_2048() {
        assert_eq!(SaltLength::Max.resolve(2048, 32).unwrap(), 222);
        assert_eq!(SaltLength::Max.resolve(2048, 20).unwrap(), 234);
    }

    #[test]
    fn fixed_salt_bounded_by_max() {
        assert_eq!(SaltLength::Bytes(222).resolve(2048, 32).unwrap(), 222);
        assert_eq!(
            SaltLength::Bytes(223).resolve(2048, 32),
            Err(Error::KeyTooSmall)
        );
        assert_eq!(SaltLength::Bytes(0).resolve(2048, 32).unwrap(), 0);
    }

    #[test]
    fn salt_resolution_non_byte_aligned_key() {
        // 521-bit key: emLen = ceil(520 / 8) = 65.
        assert_eq!(SaltLength::Max.resolve(521, 20).unwrap(), 43);
        // A 521-bit key cannot hold SHA-512 at all.
        assert_eq!(SaltLength::Max.resolve(521, 64), Err(Error::KeyTooSmall));
    }

    #[test]
    fn oaep_rejected_for_signatures() {
        let padding = PaddingScheme::new_oaep(HashAlgorithm::Sha256);
        assert_eq!(
            padding.validate_for_signature(128, HashAlgorithm::Sha256),
            Err(Error::UnsupportedPadding)
        );
    }

    #[test]
    fn pss_rejected_for_encryption() {
        let padding = PaddingScheme::new_pss(HashAlgorithm::Sha256);
        assert_eq!(padding.validate_for_encryption(), Err(Error::UnsupportedPadding));
    }

    #[test]
    fn oaep_label_unsupported() {
        let padding = PaddingScheme::Oaep {
            digest: HashAlgorithm::Sha1,
            mgf: Mgf::Mgf1(HashAlgorithm::Sha1),
            label: Some("session-42".into()),
        };
        assert_eq!(padding.validate_for_encryption(), Err(Error::UnsupportedFeature));

        let empty = PaddingScheme::Oaep {
            digest: HashAlgorithm::Sha1,
            mgf: Mgf::Mgf1(HashAlgorithm::Sha1),
            label: Some(String::new()),
        };
        assert!(empty.validate_for_encryption().is_ok());
    }

    #[test]
    fn digest_must_fit_key() {
        // 16-byte key cannot hold a SHA-256 digest.
        let padding = PaddingScheme::new_pkcs1v15();
        assert_eq!(
            padding.validate_for_signature(16, HashAlgorithm::Sha256),
            Err(Error::KeyTooSmall)
        );
        // Exactly at the boundary: 22 - 20 - 2 == 0 is still valid.
        assert!(padding
            .validate_for_signature(22, HashAlgorithm::Sha1)
            .is_ok());
    }
}
