//! Conversions from foreign error types into status codes.
//!
//! [`IntoStatusCode`] is the crate's compile-time customization point: a
//! foreign type declares, through the associated `Domain`, exactly which
//! domain its conversion targets, and [`Code::from_source`] accepts it.
//! Resolution is entirely static; there is no registry and nothing happens
//! at run time beyond the conversion itself.

use std::io;

use crate::code::Code;
use crate::domain::StatusDomain;
use crate::generic::{Errc, GenericCode, GenericDomain};
use crate::os::{OsCode, OsDomain};

/// Types that convert into a status code of one specific domain.
///
/// Implement this for your own error types to make them constructible via
/// [`Code::from_source`]. The associated type pins the target domain, so
/// the conversion is unambiguous at the call site.
pub trait IntoStatusCode {
    /// The domain the conversion targets.
    type Domain: StatusDomain;

    /// Perform the conversion.
    fn into_status_code(self) -> Code<Self::Domain>;
}

impl IntoStatusCode for Errc {
    type Domain = GenericDomain;

    #[inline]
    fn into_status_code(self) -> GenericCode {
        GenericCode::new(self)
    }
}

impl IntoStatusCode for io::Error {
    type Domain = OsDomain;

    /// The raw OS word when the error carries one; otherwise the kind's
    /// conventional platform word.
    fn into_status_code(self) -> OsCode {
        match self.raw_os_error() {
            Some(raw) => OsCode::new(raw as u32),
            None => OsCode::new(kind_errno(self.kind()) as u32),
        }
    }
}

impl IntoStatusCode for io::ErrorKind {
    type Domain = GenericDomain;

    fn into_status_code(self) -> GenericCode {
        GenericCode::new(kind_errc(self))
    }
}

impl From<io::Error> for OsCode {
    #[inline]
    fn from(err: io::Error) -> Self {
        err.into_status_code()
    }
}

impl From<io::ErrorKind> for GenericCode {
    #[inline]
    fn from(kind: io::ErrorKind) -> Self {
        kind.into_status_code()
    }
}

/// `io::ErrorKind` → conventional platform word, for errors synthesized
/// without one.
fn kind_errno(kind: io::ErrorKind) -> i32 {
    match kind {
        io::ErrorKind::NotFound => libc::ENOENT,
        io::ErrorKind::PermissionDenied => libc::EACCES,
        io::ErrorKind::ConnectionRefused => libc::ECONNREFUSED,
        io::ErrorKind::ConnectionReset => libc::ECONNRESET,
        io::ErrorKind::ConnectionAborted => libc::ECONNABORTED,
        io::ErrorKind::NotConnected => libc::ENOTCONN,
        io::ErrorKind::AddrInUse => libc::EADDRINUSE,
        io::ErrorKind::AddrNotAvailable => libc::EADDRNOTAVAIL,
        io::ErrorKind::BrokenPipe => libc::EPIPE,
        io::ErrorKind::AlreadyExists => libc::EEXIST,
        io::ErrorKind::WouldBlock => libc::EAGAIN,
        io::ErrorKind::InvalidInput => libc::EINVAL,
        io::ErrorKind::InvalidData => libc::EINVAL,
        io::ErrorKind::TimedOut => libc::ETIMEDOUT,
        io::ErrorKind::Interrupted => libc::EINTR,
        io::ErrorKind::Unsupported => libc::EOPNOTSUPP,
        io::ErrorKind::OutOfMemory => libc::ENOMEM,
        _ => libc::EIO,
    }
}

/// `io::ErrorKind` → generic condition, for call sites that want the
/// portable set directly.
fn kind_errc(kind: io::ErrorKind) -> Errc {
    match kind {
        io::ErrorKind::NotFound => Errc::NoSuchEntity,
        io::ErrorKind::PermissionDenied => Errc::PermissionDenied,
        io::ErrorKind::ConnectionRefused => Errc::ConnectionRefused,
        io::ErrorKind::ConnectionReset => Errc::ConnectionReset,
        io::ErrorKind::ConnectionAborted => Errc::ConnectionAborted,
        io::ErrorKind::NotConnected => Errc::NotConnected,
        io::ErrorKind::AddrInUse => Errc::AddressInUse,
        io::ErrorKind::AddrNotAvailable => Errc::AddressNotAvailable,
        io::ErrorKind::BrokenPipe => Errc::BrokenPipe,
        io::ErrorKind::AlreadyExists => Errc::FileExists,
        io::ErrorKind::WouldBlock => Errc::TryAgain,
        io::ErrorKind::InvalidInput => Errc::InvalidArgument,
        io::ErrorKind::InvalidData => Errc::InvalidArgument,
        io::ErrorKind::TimedOut => Errc::TimedOut,
        io::ErrorKind::Interrupted => Errc::Interrupted,
        io::ErrorKind::Unsupported => Errc::NotSupported,
        io::ErrorKind::OutOfMemory => Errc::NotEnoughMemory,
        io::ErrorKind::UnexpectedEof | io::ErrorKind::WriteZero => Errc::IoError,
        _ => Errc::Unknown,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_with_a_raw_word_keeps_it() {
        let err = io::Error::from_raw_os_error(libc::EACCES);
        let code = OsCode::from(err);
        assert_eq!(*code.value(), libc::EACCES as u32);
        assert_eq!(code.to_generic(), Errc::PermissionDenied);
    }

    #[test]
    fn synthesized_io_error_falls_back_to_the_kind_word() {
        let err = io::Error::new(io::ErrorKind::TimedOut, "deadline elapsed");
        let code = Code::from_source(err);
        assert_eq!(*code.value(), libc::ETIMEDOUT as u32);
    }

    #[test]
    fn kinds_map_into_the_generic_set() {
        let code = GenericCode::from(io::ErrorKind::NotFound);
        assert_eq!(code.to_generic(), Errc::NoSuchEntity);

        let code = GenericCode::from(io::ErrorKind::Other);
        assert_eq!(code.to_generic(), Errc::Unknown);
        assert!(code.failure());
    }

    #[test]
    fn converted_codes_speak_the_equivalence_protocol() {
        let from_io: OsCode = io::Error::from_raw_os_error(libc::ENOENT).into();
        let generic = GenericCode::from(Errc::NoSuchEntity);
        assert!(from_io.equivalent(&generic));
        assert!(from_io.strictly_equivalent(&generic));
    }
}
