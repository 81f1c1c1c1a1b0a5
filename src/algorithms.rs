//! Padding codecs and the raw RSA primitive.
//!
//! Everything in here operates on byte blocks of exactly the key size; the
//! public API in [`crate::key`] and [`crate::context`] is responsible for
//! choosing the right codec and for the undifferentiated error discipline.

pub(crate) mod mgf;
pub(crate) mod oaep;
pub(crate) mod pkcs1v15;
pub(crate) mod pss;
pub(crate) mod rsa;
