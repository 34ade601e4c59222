//! The generic domain: the portable, closed, errno-like code set.
//!
//! [`Errc`] is the lingua franca every other domain maps into. Its values
//! are the canonical POSIX errno numbers — canonical, not platform-raw:
//! the host platform's own error words live in the OS domain
//! ([`crate::os`]) and are translated here through that domain's table.
//! Messages for this domain come from a static table and never allocate.

use crate::code::{Code, StatusCode};
use crate::domain::{DomainId, ErasableValue, StatusDomain};
use crate::message::MessageRef;
use std::fmt;

/// A generic status code: [`Code`] over the [`GenericDomain`].
pub type GenericCode = Code<GenericDomain>;

// ============================================================================
// The code set
// ============================================================================

/// The closed generic condition set.
///
/// Discriminants are the canonical POSIX errno numbers, with two
/// out-of-band members: [`Success`](Errc::Success) (zero) and
/// [`Unknown`](Errc::Unknown) (the −1 sentinel reported when a domain has
/// no mapping for a value). Values never equal to `Success` denote
/// failure.
#[repr(i32)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub enum Errc {
    /// The operation succeeded.
    #[default]
    Success = 0,
    /// No generic mapping exists. Never equivalent to anything.
    Unknown = -1,
    /// EPERM.
    OperationNotPermitted = 1,
    /// ENOENT.
    NoSuchEntity = 2,
    /// ESRCH.
    NoSuchProcess = 3,
    /// EINTR.
    Interrupted = 4,
    /// EIO.
    IoError = 5,
    /// ENXIO.
    NoSuchDeviceOrAddress = 6,
    /// E2BIG.
    ArgumentListTooLong = 7,
    /// EBADF.
    BadFileDescriptor = 9,
    /// ECHILD.
    NoChildProcess = 10,
    /// EAGAIN.
    TryAgain = 11,
    /// ENOMEM.
    NotEnoughMemory = 12,
    /// EACCES.
    PermissionDenied = 13,
    /// EFAULT.
    BadAddress = 14,
    /// EBUSY.
    DeviceBusy = 16,
    /// EEXIST.
    FileExists = 17,
    /// EXDEV.
    CrossDeviceLink = 18,
    /// ENODEV.
    NoSuchDevice = 19,
    /// ENOTDIR.
    NotADirectory = 20,
    /// EISDIR.
    IsADirectory = 21,
    /// EINVAL.
    InvalidArgument = 22,
    /// ENFILE.
    TooManyOpenFilesInSystem = 23,
    /// EMFILE.
    TooManyOpenFiles = 24,
    /// ENOTTY.
    InappropriateIoControl = 25,
    /// ETXTBSY.
    TextFileBusy = 26,
    /// EFBIG.
    FileTooLarge = 27,
    /// ENOSPC.
    NoSpaceLeft = 28,
    /// ESPIPE.
    IllegalSeek = 29,
    /// EROFS.
    ReadOnlyFilesystem = 30,
    /// EMLINK.
    TooManyLinks = 31,
    /// EPIPE.
    BrokenPipe = 32,
    /// EDOM.
    OutOfDomain = 33,
    /// ERANGE.
    ResultOutOfRange = 34,
    /// EDEADLK.
    DeadlockAvoided = 35,
    /// ENAMETOOLONG.
    NameTooLong = 36,
    /// ENOLCK.
    NoLockAvailable = 37,
    /// ENOSYS.
    NotImplemented = 38,
    /// ENOTEMPTY.
    DirectoryNotEmpty = 39,
    /// ELOOP.
    TooManySymlinkLevels = 40,
    /// EPROTO.
    ProtocolError = 71,
    /// EBADMSG.
    BadMessage = 74,
    /// EOVERFLOW.
    ValueOverflow = 75,
    /// EILSEQ.
    IllegalByteSequence = 84,
    /// ENOTSOCK.
    NotASocket = 88,
    /// EDESTADDRREQ.
    DestinationAddressRequired = 89,
    /// EMSGSIZE.
    MessageTooLong = 90,
    /// EPROTOTYPE.
    WrongProtocolType = 91,
    /// ENOPROTOOPT.
    ProtocolNotAvailable = 92,
    /// EPROTONOSUPPORT.
    ProtocolNotSupported = 93,
    /// EOPNOTSUPP.
    NotSupported = 95,
    /// EAFNOSUPPORT.
    AddressFamilyNotSupported = 97,
    /// EADDRINUSE.
    AddressInUse = 98,
    /// EADDRNOTAVAIL.
    AddressNotAvailable = 99,
    /// ENETDOWN.
    NetworkDown = 100,
    /// ENETUNREACH.
    NetworkUnreachable = 101,
    /// ENETRESET.
    NetworkReset = 102,
    /// ECONNABORTED.
    ConnectionAborted = 103,
    /// ECONNRESET.
    ConnectionReset = 104,
    /// ENOBUFS.
    NoBufferSpace = 105,
    /// EISCONN.
    AlreadyConnected = 106,
    /// ENOTCONN.
    NotConnected = 107,
    /// ETIMEDOUT.
    TimedOut = 110,
    /// ECONNREFUSED.
    ConnectionRefused = 111,
    /// EHOSTUNREACH.
    HostUnreachable = 113,
    /// EALREADY.
    AlreadyInProgress = 114,
    /// EINPROGRESS.
    InProgress = 115,
    /// ECANCELED.
    Canceled = 125,
    /// EOWNERDEAD.
    OwnerDead = 130,
    /// ENOTRECOVERABLE.
    NotRecoverable = 131,
}

impl Errc {
    /// Look up the member with this canonical number; [`Errc::Unknown`]
    /// for anything outside the closed set.
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Success,
            1 => Self::OperationNotPermitted,
            2 => Self::NoSuchEntity,
            3 => Self::NoSuchProcess,
            4 => Self::Interrupted,
            5 => Self::IoError,
            6 => Self::NoSuchDeviceOrAddress,
            7 => Self::ArgumentListTooLong,
            9 => Self::BadFileDescriptor,
            10 => Self::NoChildProcess,
            11 => Self::TryAgain,
            12 => Self::NotEnoughMemory,
            13 => Self::PermissionDenied,
            14 => Self::BadAddress,
            16 => Self::DeviceBusy,
            17 => Self::FileExists,
            18 => Self::CrossDeviceLink,
            19 => Self::NoSuchDevice,
            20 => Self::NotADirectory,
            21 => Self::IsADirectory,
            22 => Self::InvalidArgument,
            23 => Self::TooManyOpenFilesInSystem,
            24 => Self::TooManyOpenFiles,
            25 => Self::InappropriateIoControl,
            26 => Self::TextFileBusy,
            27 => Self::FileTooLarge,
            28 => Self::NoSpaceLeft,
            29 => Self::IllegalSeek,
            30 => Self::ReadOnlyFilesystem,
            31 => Self::TooManyLinks,
            32 => Self::BrokenPipe,
            33 => Self::OutOfDomain,
            34 => Self::ResultOutOfRange,
            35 => Self::DeadlockAvoided,
            36 => Self::NameTooLong,
            37 => Self::NoLockAvailable,
            38 => Self::NotImplemented,
            39 => Self::DirectoryNotEmpty,
            40 => Self::TooManySymlinkLevels,
            71 => Self::ProtocolError,
            74 => Self::BadMessage,
            75 => Self::ValueOverflow,
            84 => Self::IllegalByteSequence,
            88 => Self::NotASocket,
            89 => Self::DestinationAddressRequired,
            90 => Self::MessageTooLong,
            91 => Self::WrongProtocolType,
            92 => Self::ProtocolNotAvailable,
            93 => Self::ProtocolNotSupported,
            95 => Self::NotSupported,
            97 => Self::AddressFamilyNotSupported,
            98 => Self::AddressInUse,
            99 => Self::AddressNotAvailable,
            100 => Self::NetworkDown,
            101 => Self::NetworkUnreachable,
            102 => Self::NetworkReset,
            103 => Self::ConnectionAborted,
            104 => Self::ConnectionReset,
            105 => Self::NoBufferSpace,
            106 => Self::AlreadyConnected,
            107 => Self::NotConnected,
            110 => Self::TimedOut,
            111 => Self::ConnectionRefused,
            113 => Self::HostUnreachable,
            114 => Self::AlreadyInProgress,
            115 => Self::InProgress,
            125 => Self::Canceled,
            130 => Self::OwnerDead,
            131 => Self::NotRecoverable,
            _ => Self::Unknown,
        }
    }

    /// The canonical number.
    #[inline]
    pub const fn raw(self) -> i32 {
        self as i32
    }

    const fn text(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Unknown => "unknown",
            Self::OperationNotPermitted => "operation not permitted",
            Self::NoSuchEntity => "no such file or directory",
            Self::NoSuchProcess => "no such process",
            Self::Interrupted => "interrupted system call",
            Self::IoError => "input/output error",
            Self::NoSuchDeviceOrAddress => "no such device or address",
            Self::ArgumentListTooLong => "argument list too long",
            Self::BadFileDescriptor => "bad file descriptor",
            Self::NoChildProcess => "no child processes",
            Self::TryAgain => "resource temporarily unavailable",
            Self::NotEnoughMemory => "cannot allocate memory",
            Self::PermissionDenied => "permission denied",
            Self::BadAddress => "bad address",
            Self::DeviceBusy => "device or resource busy",
            Self::FileExists => "file exists",
            Self::CrossDeviceLink => "invalid cross-device link",
            Self::NoSuchDevice => "no such device",
            Self::NotADirectory => "not a directory",
            Self::IsADirectory => "is a directory",
            Self::InvalidArgument => "invalid argument",
            Self::TooManyOpenFilesInSystem => "too many open files in system",
            Self::TooManyOpenFiles => "too many open files",
            Self::InappropriateIoControl => "inappropriate ioctl for device",
            Self::TextFileBusy => "text file busy",
            Self::FileTooLarge => "file too large",
            Self::NoSpaceLeft => "no space left on device",
            Self::IllegalSeek => "illegal seek",
            Self::ReadOnlyFilesystem => "read-only file system",
            Self::TooManyLinks => "too many links",
            Self::BrokenPipe => "broken pipe",
            Self::OutOfDomain => "numerical argument out of domain",
            Self::ResultOutOfRange => "numerical result out of range",
            Self::DeadlockAvoided => "resource deadlock avoided",
            Self::NameTooLong => "file name too long",
            Self::NoLockAvailable => "no locks available",
            Self::NotImplemented => "function not implemented",
            Self::DirectoryNotEmpty => "directory not empty",
            Self::TooManySymlinkLevels => "too many levels of symbolic links",
            Self::ProtocolError => "protocol error",
            Self::BadMessage => "bad message",
            Self::ValueOverflow => "value too large for defined data type",
            Self::IllegalByteSequence => "invalid or incomplete multibyte or wide character",
            Self::NotASocket => "socket operation on non-socket",
            Self::DestinationAddressRequired => "destination address required",
            Self::MessageTooLong => "message too long",
            Self::WrongProtocolType => "protocol wrong type for socket",
            Self::ProtocolNotAvailable => "protocol not available",
            Self::ProtocolNotSupported => "protocol not supported",
            Self::NotSupported => "operation not supported",
            Self::AddressFamilyNotSupported => "address family not supported by protocol",
            Self::AddressInUse => "address already in use",
            Self::AddressNotAvailable => "cannot assign requested address",
            Self::NetworkDown => "network is down",
            Self::NetworkUnreachable => "network is unreachable",
            Self::NetworkReset => "network dropped connection on reset",
            Self::ConnectionAborted => "software caused connection abort",
            Self::ConnectionReset => "connection reset by peer",
            Self::NoBufferSpace => "no buffer space available",
            Self::AlreadyConnected => "transport endpoint is already connected",
            Self::NotConnected => "transport endpoint is not connected",
            Self::TimedOut => "connection timed out",
            Self::ConnectionRefused => "connection refused",
            Self::HostUnreachable => "no route to host",
            Self::AlreadyInProgress => "operation already in progress",
            Self::InProgress => "operation now in progress",
            Self::Canceled => "operation canceled",
            Self::OwnerDead => "owner died",
            Self::NotRecoverable => "state not recoverable",
        }
    }
}

impl fmt::Display for Errc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl ErasableValue for Errc {
    #[inline]
    fn to_bits(self) -> u64 {
        self.raw() as i64 as u64
    }

    #[inline]
    fn from_bits(bits: u64) -> Self {
        Self::from_raw(bits as i32)
    }
}

// ============================================================================
// The domain
// ============================================================================

/// The generic domain singleton type.
///
/// The sole domain every other domain must know how to map into. Its
/// `as_generic` is the identity; any non-`Success` value denotes failure.
#[derive(Debug)]
pub struct GenericDomain(());

impl GenericDomain {
    /// Construct an instance. All instances are the same domain: equality
    /// is keyed on [`StatusDomain::ID`], so duplicates across compiled
    /// units behave identically to [`GENERIC_DOMAIN`].
    #[inline]
    pub const fn new() -> Self {
        Self(())
    }
}

impl Default for GenericDomain {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide generic domain instance.
pub static GENERIC_DOMAIN: GenericDomain = GenericDomain::new();

impl StatusDomain for GenericDomain {
    type Value = Errc;

    const ID: DomainId = DomainId::derived("polystatus generic domain v1");
    const NAME: &'static str = "generic domain";

    #[inline]
    fn get() -> &'static Self {
        &GENERIC_DOMAIN
    }

    #[inline]
    fn is_failure(&self, value: &Errc) -> bool {
        *value != Errc::Success
    }

    fn strictly_equivalent(&self, value: &Errc, other: &dyn StatusCode) -> bool {
        // The generic domain knows only itself; everything else resolves
        // through general equivalence.
        match other.domain() {
            Some(d) if d.id() == Self::ID => Errc::from_bits(other.erased_bits()) == *value,
            _ => false,
        }
    }

    #[inline]
    fn as_generic(&self, value: &Errc) -> Errc {
        *value
    }

    #[inline]
    fn message(&self, value: &Errc) -> MessageRef {
        MessageRef::from_static(value.text())
    }
}

impl From<Errc> for GenericCode {
    #[inline]
    fn from(value: Errc) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_numbers_round_trip_through_the_closed_set() {
        for raw in [-1, 0, 1, 2, 13, 32, 110, 131] {
            assert_eq!(Errc::from_raw(raw).raw(), raw);
        }
        // Outside the set: collapses to the sentinel.
        assert_eq!(Errc::from_raw(9999), Errc::Unknown);
        assert_eq!(Errc::from_raw(8), Errc::Unknown);
    }

    #[test]
    fn success_is_the_only_non_failure() {
        assert!(GenericCode::from(Errc::Success).success());
        assert!(GenericCode::from(Errc::Unknown).failure());
        assert!(GenericCode::from(Errc::PermissionDenied).failure());
    }

    #[test]
    fn strict_equivalence_is_reflexive_within_the_domain() {
        for value in [Errc::Success, Errc::NoSuchEntity, Errc::TimedOut] {
            let a = GenericCode::from(value);
            let b = GenericCode::from(value);
            assert!(a.strictly_equivalent(&b));
            assert!(b.strictly_equivalent(&a));
        }
    }

    #[test]
    fn distinct_values_are_not_equivalent() {
        let a = GenericCode::from(Errc::NoSuchEntity);
        let b = GenericCode::from(Errc::PermissionDenied);
        assert!(!a.strictly_equivalent(&b));
        assert!(!a.equivalent(&b));
    }

    #[test]
    fn as_generic_is_the_identity() {
        let code = GenericCode::from(Errc::AddressInUse);
        assert_eq!(code.to_generic(), Errc::AddressInUse);
    }

    #[test]
    fn messages_are_static_text() {
        let msg = GenericCode::from(Errc::PermissionDenied).message();
        assert_eq!(msg, "permission denied");
        assert!(!msg.is_shared());
    }
}
