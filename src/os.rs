//! The OS-error domain: the host platform's raw error word.
//!
//! Values are the platform's own errno words exactly as a syscall wrapper
//! reports them (`errno`, `io::Error::raw_os_error()`): zero is success,
//! anything else is failure. Raw words are platform-specific numbers; the
//! private table below translates them into the canonical generic set,
//! which is what makes codes from this domain comparable against everyone
//! else's.

use crate::code::{Code, StatusCode};
use crate::domain::{DomainId, ErasableValue, StatusDomain};
use crate::generic::{Errc, GenericDomain};
use crate::message::MessageRef;
use crate::sys;

/// An OS status code: [`Code`] over the [`OsDomain`].
pub type OsCode = Code<OsDomain>;

impl OsCode {
    /// Capture the calling thread's most recent OS error word.
    pub fn last_os_error() -> Self {
        let raw = std::io::Error::last_os_error()
            .raw_os_error()
            .unwrap_or(0);
        Self::new(raw as u32)
    }
}

/// Translate a raw platform word into the generic set.
///
/// Written over the `libc` constants rather than bare numbers so the
/// mapping stays correct on platforms where the raw values differ from
/// the canonical ones. Unmapped words report [`Errc::Unknown`].
fn os_to_generic(raw: u32) -> Errc {
    if raw > i32::MAX as u32 {
        return Errc::Unknown;
    }
    match raw as i32 {
        0 => Errc::Success,
        libc::EPERM => Errc::OperationNotPermitted,
        libc::ENOENT => Errc::NoSuchEntity,
        libc::ESRCH => Errc::NoSuchProcess,
        libc::EINTR => Errc::Interrupted,
        libc::EIO => Errc::IoError,
        libc::ENXIO => Errc::NoSuchDeviceOrAddress,
        libc::E2BIG => Errc::ArgumentListTooLong,
        libc::EBADF => Errc::BadFileDescriptor,
        libc::ECHILD => Errc::NoChildProcess,
        libc::EAGAIN => Errc::TryAgain,
        libc::ENOMEM => Errc::NotEnoughMemory,
        libc::EACCES => Errc::PermissionDenied,
        libc::EFAULT => Errc::BadAddress,
        libc::EBUSY => Errc::DeviceBusy,
        libc::EEXIST => Errc::FileExists,
        libc::EXDEV => Errc::CrossDeviceLink,
        libc::ENODEV => Errc::NoSuchDevice,
        libc::ENOTDIR => Errc::NotADirectory,
        libc::EISDIR => Errc::IsADirectory,
        libc::EINVAL => Errc::InvalidArgument,
        libc::ENFILE => Errc::TooManyOpenFilesInSystem,
        libc::EMFILE => Errc::TooManyOpenFiles,
        libc::ENOTTY => Errc::InappropriateIoControl,
        libc::ETXTBSY => Errc::TextFileBusy,
        libc::EFBIG => Errc::FileTooLarge,
        libc::ENOSPC => Errc::NoSpaceLeft,
        libc::ESPIPE => Errc::IllegalSeek,
        libc::EROFS => Errc::ReadOnlyFilesystem,
        libc::EMLINK => Errc::TooManyLinks,
        libc::EPIPE => Errc::BrokenPipe,
        libc::EDOM => Errc::OutOfDomain,
        libc::ERANGE => Errc::ResultOutOfRange,
        libc::EDEADLK => Errc::DeadlockAvoided,
        libc::ENAMETOOLONG => Errc::NameTooLong,
        libc::ENOLCK => Errc::NoLockAvailable,
        libc::ENOSYS => Errc::NotImplemented,
        libc::ENOTEMPTY => Errc::DirectoryNotEmpty,
        libc::ELOOP => Errc::TooManySymlinkLevels,
        libc::EPROTO => Errc::ProtocolError,
        libc::EBADMSG => Errc::BadMessage,
        libc::EOVERFLOW => Errc::ValueOverflow,
        libc::EILSEQ => Errc::IllegalByteSequence,
        libc::ENOTSOCK => Errc::NotASocket,
        libc::EDESTADDRREQ => Errc::DestinationAddressRequired,
        libc::EMSGSIZE => Errc::MessageTooLong,
        libc::EPROTOTYPE => Errc::WrongProtocolType,
        libc::ENOPROTOOPT => Errc::ProtocolNotAvailable,
        libc::EPROTONOSUPPORT => Errc::ProtocolNotSupported,
        libc::EOPNOTSUPP => Errc::NotSupported,
        libc::EAFNOSUPPORT => Errc::AddressFamilyNotSupported,
        libc::EADDRINUSE => Errc::AddressInUse,
        libc::EADDRNOTAVAIL => Errc::AddressNotAvailable,
        libc::ENETDOWN => Errc::NetworkDown,
        libc::ENETUNREACH => Errc::NetworkUnreachable,
        libc::ENETRESET => Errc::NetworkReset,
        libc::ECONNABORTED => Errc::ConnectionAborted,
        libc::ECONNRESET => Errc::ConnectionReset,
        libc::ENOBUFS => Errc::NoBufferSpace,
        libc::EISCONN => Errc::AlreadyConnected,
        libc::ENOTCONN => Errc::NotConnected,
        libc::ETIMEDOUT => Errc::TimedOut,
        libc::ECONNREFUSED => Errc::ConnectionRefused,
        libc::EHOSTUNREACH => Errc::HostUnreachable,
        libc::EALREADY => Errc::AlreadyInProgress,
        libc::EINPROGRESS => Errc::InProgress,
        libc::ECANCELED => Errc::Canceled,
        libc::EOWNERDEAD => Errc::OwnerDead,
        libc::ENOTRECOVERABLE => Errc::NotRecoverable,
        _ => Errc::Unknown,
    }
}

// ============================================================================
// The domain
// ============================================================================

/// The OS-error domain singleton type. Value type `u32`, zero = success.
#[derive(Debug)]
pub struct OsDomain(());

impl OsDomain {
    /// Construct an instance; equality is identity-keyed, see
    /// [`GenericDomain::new`](crate::generic::GenericDomain::new).
    #[inline]
    pub const fn new() -> Self {
        Self(())
    }
}

impl Default for OsDomain {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide OS-error domain instance.
pub static OS_DOMAIN: OsDomain = OsDomain::new();

impl StatusDomain for OsDomain {
    type Value = u32;

    const ID: DomainId = DomainId::derived("polystatus os error domain v1");
    const NAME: &'static str = "os error domain";

    #[inline]
    fn get() -> &'static Self {
        &OS_DOMAIN
    }

    #[inline]
    fn is_failure(&self, value: &u32) -> bool {
        *value != 0
    }

    fn strictly_equivalent(&self, value: &u32, other: &dyn StatusCode) -> bool {
        let Some(d) = other.domain() else {
            return false;
        };
        if d.id() == Self::ID {
            return u32::from_bits(other.erased_bits()) == *value;
        }
        if d.id() == GenericDomain::ID {
            return Errc::from_bits(other.erased_bits()) == os_to_generic(*value);
        }
        false
    }

    #[inline]
    fn as_generic(&self, value: &u32) -> Errc {
        os_to_generic(*value)
    }

    #[inline]
    fn message(&self, value: &u32) -> MessageRef {
        sys::errno_message(*value as i32)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_the_only_success() {
        assert!(OsCode::new(0).success());
        assert!(OsCode::new(libc::EACCES as u32).failure());
        assert!(OsCode::new(u32::MAX).failure());
    }

    #[test]
    fn table_maps_known_words_to_the_generic_set() {
        assert_eq!(os_to_generic(0), Errc::Success);
        assert_eq!(os_to_generic(libc::ENOENT as u32), Errc::NoSuchEntity);
        assert_eq!(os_to_generic(libc::EACCES as u32), Errc::PermissionDenied);
        assert_eq!(os_to_generic(libc::ETIMEDOUT as u32), Errc::TimedOut);
    }

    #[test]
    fn unmapped_words_report_the_sentinel() {
        assert_eq!(os_to_generic(54321), Errc::Unknown);
        assert_eq!(os_to_generic(u32::MAX), Errc::Unknown);
        assert_eq!(OsCode::new(54321).to_generic(), Errc::Unknown);
    }

    #[test]
    fn strict_equivalence_within_the_domain_is_value_equality() {
        let a = OsCode::new(libc::EPIPE as u32);
        let b = OsCode::new(libc::EPIPE as u32);
        let c = OsCode::new(libc::EINTR as u32);
        assert!(a.strictly_equivalent(&b));
        assert!(b.strictly_equivalent(&a));
        assert!(!a.strictly_equivalent(&c));
    }

    #[test]
    fn strict_equivalence_reaches_the_generic_domain_one_way() {
        let os = OsCode::new(libc::ENOENT as u32);
        let generic = crate::generic::GenericCode::from(Errc::NoSuchEntity);

        // The OS domain knows the generic domain...
        assert!(os.strictly_equivalent(&generic));
        // ...the generic domain does not reciprocate.
        assert!(!generic.strictly_equivalent(&os));
        // General equivalence is symmetric regardless.
        assert!(os.equivalent(&generic));
        assert!(generic.equivalent(&os));
    }

    #[cfg(unix)]
    #[test]
    fn messages_come_from_the_platform_table() {
        let msg = OsCode::new(libc::EACCES as u32).message();
        assert!(msg.is_shared());
        assert!(!msg.is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn last_os_error_reads_the_thread_word() {
        // SAFETY: setting errno on the current thread.
        unsafe {
            *libc::__errno_location() = libc::EBADF;
        }
        let code = OsCode::last_os_error();
        assert_eq!(*code.value(), libc::EBADF as u32);
        assert_eq!(code.to_generic(), Errc::BadFileDescriptor);
    }
}
