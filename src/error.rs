//! The unwind/`Result` bridge for status codes.

use std::error::Error;
use std::fmt;

use crate::code::{Code, ErasedCode};
use crate::domain::{ErasableValue, StatusDomain};

/// An ordinary error value carrying a copy of a status code.
///
/// Two uses:
///
/// - the payload of [`raise`](crate::StatusCode::raise), for callers that
///   propagate by unwinding (catch with `std::panic::catch_unwind` and
///   downcast);
/// - a plain `Box<dyn Error>`-compatible error for `Result`-style
///   propagation, via [`Code::into_error`] or `From`.
///
/// `Display` renders the code's message, fetched on demand — constructing
/// the error does not allocate.
pub struct StatusError {
    code: ErasedCode,
}

impl StatusError {
    /// Wrap a code.
    #[inline]
    pub fn new(code: ErasedCode) -> Self {
        Self { code }
    }

    /// The carried code.
    #[inline]
    pub fn code(&self) -> ErasedCode {
        self.code
    }
}

impl<D> From<Code<D>> for StatusError
where
    D: StatusDomain,
    D::Value: ErasableValue,
{
    #[inline]
    fn from(code: Code<D>) -> Self {
        Self { code: code.into() }
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code.message())
    }
}

impl fmt::Debug for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusError")
            .field("code", &self.code)
            .field("message", &self.code.message())
            .finish()
    }
}

impl Error for StatusError {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::StatusCode;
    use crate::generic::{Errc, GenericCode};
    use crate::os::OsCode;
    use std::panic;

    #[test]
    fn raise_unwinds_with_the_code_as_payload() {
        let payload = panic::catch_unwind(|| {
            OsCode::new(libc::ENOENT as u32).raise();
        })
        .unwrap_err();

        let err = payload
            .downcast::<StatusError>()
            .expect("payload should be a StatusError");
        assert!(err.code().failure());
        assert_eq!(err.code().to_generic(), Errc::NoSuchEntity);
    }

    #[test]
    fn raise_through_the_erased_view() {
        let payload = panic::catch_unwind(|| {
            let code: &dyn StatusCode = &GenericCode::from(Errc::TimedOut);
            code.raise();
        })
        .unwrap_err();

        let err = payload.downcast::<StatusError>().unwrap();
        assert!(err.code().equivalent(&GenericCode::from(Errc::TimedOut)));
    }

    #[test]
    fn works_as_a_boxed_error() {
        let err: Box<dyn Error> = GenericCode::from(Errc::BrokenPipe).into_error().into();
        assert_eq!(err.to_string(), "broken pipe");
        assert!(err.source().is_none());
    }
}
