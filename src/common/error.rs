//! Error types for tallytree.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in tallytree.
///
/// The core index operations (insert, lookup, delete, range count) never
/// fail: a missing key is a normal `None`/`false`. Errors only come from
/// constructing inputs, driving the command shell, or validating structure.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the command shell's reader or writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A key was built from a byte string of the wrong width.
    #[error("Key must be {expected} bytes, got {actual}")]
    KeyLength { expected: usize, actual: usize },

    /// The configured order cannot hold a splittable node.
    #[error("Order {order} is below the minimum of {min}")]
    InvalidOrder { order: usize, min: usize },

    /// A shell line did not follow the command protocol.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// A structural invariant does not hold.
    ///
    /// This indicates a bug in the tree, never bad input.
    #[error("Corrupt tree: {0}")]
    Corrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::KeyLength {
            expected: 19,
            actual: 4,
        };
        assert_eq!(format!("{}", err), "Key must be 19 bytes, got 4");

        let err = Error::InvalidOrder { order: 2, min: 3 };
        assert_eq!(format!("{}", err), "Order 2 is below the minimum of 3");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: Error = io_err.into();

        match err {
            Error::Io(_) => {} // Success
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }
}
