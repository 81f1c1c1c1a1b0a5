#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

//! RSA encryption and signatures with explicit padding state machines.
//!
//! This crate implements the four standard RSA padding combinations from
//! [RFC 8017]: PKCS#1 v1.5 and OAEP for encryption, PKCS#1 v1.5 and PSS for
//! signatures. The modular arithmetic is delegated to [`num_bigint`]
//! (`num-bigint-dig`), hashing to the [`digest`] ecosystem and randomness to
//! a caller-supplied [`rand_core::CryptoRngCore`]; what lives here are the
//! padding codecs, the MGF1 mask generation they share, and the one-shot
//! signing/verification contexts that drive them.
//!
//! Padding failures on the receiving side are reported uniformly: decryption
//! yields [`errors::Error::Decryption`] and verification
//! [`errors::Error::Verification`] no matter which internal check failed,
//! because distinguishable padding errors are exactly what Bleichenbacher
//! and padding-oracle attacks exploit.
//!
//! # Encryption
//!
//! ```
//! use rsapad::{BigUint, HashAlgorithm, PaddingScheme, RsaPrivateKey};
//!
//! # fn main() -> rsapad::errors::Result<()> {
//! let n = BigUint::parse_bytes(b"9353930466774385905609975137998169297361893554149986716853295022578535724979677252958524466350471210367835187480748268864277464700638583474144061408845077", 10).unwrap();
//! let e = BigUint::parse_bytes(b"65537", 10).unwrap();
//! let d = BigUint::parse_bytes(b"7266398431328116344057699379749222532279343923819063639497049039389899328538543087657733766554155839834519529439851673014800261285757759040931985506583861", 10).unwrap();
//! let p = BigUint::parse_bytes(b"98920366548084643601728869055592650835572950932266967461790948584315647051443", 10).unwrap();
//! let q = BigUint::parse_bytes(b"94560208308847015747498523884063394671606671904944666360068158221458669711639", 10).unwrap();
//!
//! let private_key = RsaPrivateKey::from_components(n, e, d, p, q)?;
//! let public_key = private_key.public_key();
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let data = b"hello world";
//! let padding = PaddingScheme::new_oaep(HashAlgorithm::Sha1);
//! let enc_data = public_key.encrypt(&mut rng, padding.clone(), &data[..])?;
//! assert_ne!(&data[..], &enc_data[..]);
//!
//! let dec_data = private_key.decrypt(padding, &enc_data)?;
//! assert_eq!(&data[..], &dec_data[..]);
//! # Ok(())
//! # }
//! ```
//!
//! # Signatures
//!
//! ```
//! use rsapad::{BigUint, HashAlgorithm, PaddingScheme, RsaPrivateKey};
//!
//! # fn main() -> rsapad::errors::Result<()> {
//! # let n = BigUint::parse_bytes(b"9353930466774385905609975137998169297361893554149986716853295022578535724979677252958524466350471210367835187480748268864277464700638583474144061408845077", 10).unwrap();
//! # let e = BigUint::parse_bytes(b"65537", 10).unwrap();
//! # let d = BigUint::parse_bytes(b"7266398431328116344057699379749222532279343923819063639497049039389899328538543087657733766554155839834519529439851673014800261285757759040931985506583861", 10).unwrap();
//! # let p = BigUint::parse_bytes(b"98920366548084643601728869055592650835572950932266967461790948584315647051443", 10).unwrap();
//! # let q = BigUint::parse_bytes(b"94560208308847015747498523884063394671606671904944666360068158221458669711639", 10).unwrap();
//! let private_key = RsaPrivateKey::from_components(n, e, d, p, q)?;
//! let mut rng = rand::thread_rng();
//!
//! let mut signer = private_key.signer(
//!     PaddingScheme::new_pss(HashAlgorithm::Sha256),
//!     HashAlgorithm::Sha256,
//! )?;
//! signer.update(b"message part one, ")?;
//! signer.update(b"part two")?;
//! let signature = signer.finalize(&mut rng)?;
//!
//! let public_key = private_key.public_key();
//! let mut verifier = public_key.verifier(
//!     &signature,
//!     PaddingScheme::new_pss(HashAlgorithm::Sha256),
//!     HashAlgorithm::Sha256,
//! )?;
//! verifier.update(b"message part one, ")?;
//! verifier.update(b"part two")?;
//! verifier.finalize()?;
//! # Ok(())
//! # }
//! ```
//!
//! [RFC 8017]: https://datatracker.ietf.org/doc/html/rfc8017

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use num_bigint::BigUint;
pub use rand_core;

mod algorithms;
pub mod context;
pub mod errors;
pub mod hash;
pub mod key;
pub mod padding;
pub mod traits;

pub use crate::{
    context::{SignatureContext, VerificationContext},
    errors::{Error, Result},
    hash::HashAlgorithm,
    key::{RsaPrivateKey, RsaPublicKey},
    padding::{Mgf, PaddingScheme, SaltLength},
};
