//! Error type shared by the cipher and the MAC constructions.
//!
//! Every operation either completes and returns its full output, or fails
//! with one of these values and produces nothing. None of them are
//! transient: retrying with the same inputs fails the same way.

use std::fmt;

/// Errors produced by the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The nonce does not have the length required by the cipher.
    InvalidNonceLength {
        /// Required nonce length in bytes.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// An output buffer does not match the length of its input.
    LengthMismatch {
        /// Length of the input.
        expected: usize,
        /// Length of the output buffer.
        actual: usize,
    },

    /// `update`, `finalize` or `verify` was called on a MAC that has
    /// already produced its tag.
    UseAfterFinalize,

    /// The computed tag does not match the expected one.
    AuthenticationFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidNonceLength { expected, actual } => {
                write!(f, "nonce must be {expected} bytes, got {actual}")
            }
            Error::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "output buffer must be {expected} bytes to match the input, got {actual}"
                )
            }
            Error::UseAfterFinalize => {
                write!(f, "MAC instance used after its tag was produced")
            }
            Error::AuthenticationFailed => write!(f, "authentication tag mismatch"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_nonce_length() {
        let err = Error::InvalidNonceLength {
            expected: 16,
            actual: 12,
        };
        assert_eq!(format!("{}", err), "nonce must be 16 bytes, got 12");
    }

    #[test]
    fn display_length_mismatch() {
        let err = Error::LengthMismatch {
            expected: 11,
            actual: 10,
        };
        assert_eq!(
            format!("{}", err),
            "output buffer must be 11 bytes to match the input, got 10"
        );
    }

    #[test]
    fn display_use_after_finalize() {
        assert_eq!(
            format!("{}", Error::UseAfterFinalize),
            "MAC instance used after its tag was produced"
        );
    }

    #[test]
    fn errors_compare_by_fields() {
        assert_eq!(
            Error::InvalidNonceLength {
                expected: 16,
                actual: 0
            },
            Error::InvalidNonceLength {
                expected: 16,
                actual: 0
            }
        );
        assert_ne!(
            Error::InvalidNonceLength {
                expected: 16,
                actual: 0
            },
            Error::InvalidNonceLength {
                expected: 16,
                actual: 1
            }
        );
        assert_ne!(Error::UseAfterFinalize, Error::AuthenticationFailed);
    }

    #[test]
    fn error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(Error::AuthenticationFailed);
        assert_eq!(err.to_string(), "authentication tag mismatch");
    }
}
