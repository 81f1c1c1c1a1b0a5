//! Component access for RSA keys.
//!
//! The padding codecs and the RSA primitive only need numeric components and
//! sizes, so they are written against these traits rather than the concrete
//! key types.

use num_bigint::BigUint;

/// Components of an RSA public key.
pub trait PublicKeyParts {
    /// Returns the modulus of the key.
    fn n(&self) -> &BigUint;

    /// Returns the public exponent of the key.
    fn e(&self) -> &BigUint;

    /// Returns the modulus size in bits.
    fn size_bits(&self) -> usize {
        self.n().bits()
    }

    /// Returns the modulus size in bytes. Raw signatures and ciphertexts for
    /// this key have exactly this size.
    fn size(&self) -> usize {
        self.size_bits().div_ceil(8)
    }
}

/// Components of an RSA private key.
pub trait PrivateKeyParts: PublicKeyParts {
    /// Returns the private exponent of the key.
    fn d(&self) -> &BigUint;

    /// Returns the first prime factor of the modulus.
    fn p(&self) -> &BigUint;

    /// Returns the second prime factor of the modulus.
    fn q(&self) -> &BigUint;

    /// Returns `d mod (p - 1)`.
    fn dp(&self) -> &BigUint;

    /// Returns `d mod (q - 1)`.
    fn dq(&self) -> &BigUint;

    /// Returns `q⁻¹ mod p`.
    fn qinv(&self) -> &BigUint;
}
