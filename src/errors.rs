//! Error types.

/// Alias for [`core::result::Result`] with the `rsapad` [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types.
///
/// The `Decryption` and `Verification` variants are deliberately
/// undifferentiated: every padding-validation failure on the receiving side
/// collapses into one of them, whichever sub-check tripped. Reporting the
/// sub-check would hand a padding oracle to the caller's peer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A context was reused after `finalize`.
    AlreadyFinalized,

    /// The numeric value of an input block is not below the modulus.
    DataTooLarge,

    /// Ciphertext could not be decrypted.
    Decryption,

    /// The CRT coefficient could not be derived from the supplied primes.
    InvalidCoefficient,

    /// The supplied primes do not multiply to the supplied modulus.
    InvalidModulus,

    /// The key cannot hold a digest (plus padding overhead) of the requested
    /// size.
    KeyTooSmall,

    /// Message is longer than the padding scheme permits for this key.
    MessageTooLong,

    /// The padding scheme requests a feature this implementation does not
    /// provide, e.g. a non-empty OAEP label.
    UnsupportedFeature,

    /// Digest algorithm is not supported for this operation.
    UnsupportedHash,

    /// Mask generation function is not supported; only MGF1 is.
    UnsupportedMgf,

    /// The padding scheme cannot be used for the requested operation.
    UnsupportedPadding,

    /// Signature did not verify.
    Verification,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::AlreadyFinalized => write!(f, "context has already been finalized"),
            Error::DataTooLarge => write!(f, "data too large for key size"),
            Error::Decryption => write!(f, "decryption error"),
            Error::InvalidCoefficient => write!(f, "invalid coefficient"),
            Error::InvalidModulus => write!(f, "invalid modulus"),
            Error::KeyTooSmall => write!(f, "key too small for digest size"),
            Error::MessageTooLong => write!(f, "message too long"),
            Error::UnsupportedFeature => write!(f, "unsupported feature"),
            Error::UnsupportedHash => write!(f, "unsupported hash algorithm"),
            Error::UnsupportedMgf => write!(f, "unsupported mask generation function"),
            Error::UnsupportedPadding => write!(f, "unsupported padding scheme"),
            Error::Verification => write!(f, "verification error"),
        }
    }
}

impl core::error::Error for Error {}
