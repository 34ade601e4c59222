//! The kernel-error domain: the raw kernel status word.
//!
//! Raw syscall interfaces (and completion words surfaced by kernel queues)
//! report status as a signed word: non-negative is success, a negative
//! value is a failure carrying the condition in its magnitude. This is a
//! superset concept of the OS domain — the kernel also speaks internal
//! codes (`ERESTARTSYS` and friends) that are rewritten before userspace
//! ever sees an errno — so this domain carries two private tables, one
//! into the generic set and one into the OS domain's raw words.
//!
//! Its strict-equivalence rule is domain-aware of exactly those two
//! neighbors; against any other domain it declines and lets general
//! equivalence resolve through the generic set.

use crate::code::{Code, StatusCode};
use crate::domain::{DomainId, ErasableValue, StatusDomain};
use crate::generic::{Errc, GenericDomain};
use crate::message::MessageRef;
use crate::os::OsDomain;
use crate::sys;

/// A kernel status code: [`Code`] over the [`KernelDomain`].
pub type KernelCode = Code<KernelDomain>;

impl KernelCode {
    /// Wrap a raw syscall-style return value (`-errno` convention).
    ///
    /// Purely a readability alias for [`Code::new`] at call sites handling
    /// raw kernel returns.
    #[inline]
    pub fn from_ret(ret: i64) -> Self {
        Self::new(ret)
    }
}

// Kernel-internal restart codes. These never surface as userspace errno;
// the tables below give them their post-rewrite images.
const ERESTARTSYS: i32 = 512;
const ERESTARTNOINTR: i32 = 513;
const ERESTARTNOHAND: i32 = 514;
const ENOIOCTLCMD: i32 = 515;
const ERESTART_RESTARTBLOCK: i32 = 516;

/// The magnitude of a failing status word, if it fits the errno range.
fn errno_word(status: i64) -> Option<i32> {
    let e = status.wrapping_neg();
    (0 < e && e <= i32::MAX as i64).then_some(e as i32)
}

/// Kernel word → generic set.
fn kernel_to_generic(status: i64) -> Errc {
    if status >= 0 {
        return Errc::Success;
    }
    match errno_word(status) {
        Some(ERESTARTSYS | ERESTARTNOINTR | ERESTARTNOHAND | ERESTART_RESTARTBLOCK) => {
            Errc::Interrupted
        }
        Some(ENOIOCTLCMD) => Errc::InappropriateIoControl,
        Some(e) => errno_image(e),
        None => Errc::Unknown,
    }
}

/// Kernel word → OS-domain raw word. Unmapped words report the maximal
/// sentinel, which no real OS word ever equals.
fn kernel_to_os(status: i64) -> u32 {
    if status >= 0 {
        return 0;
    }
    match errno_word(status) {
        Some(ERESTARTSYS | ERESTARTNOINTR | ERESTARTNOHAND | ERESTART_RESTARTBLOCK) => {
            libc::EINTR as u32
        }
        Some(ENOIOCTLCMD) => libc::ENOTTY as u32,
        Some(e) if errno_image(e) != Errc::Unknown => e as u32,
        _ => u32::MAX,
    }
}

/// The errno portion of the kernel table: the conditions a raw kernel
/// interface actually hands back.
fn errno_image(e: i32) -> Errc {
    match e {
        libc::EPERM => Errc::OperationNotPermitted,
        libc::ENOENT => Errc::NoSuchEntity,
        libc::ESRCH => Errc::NoSuchProcess,
        libc::EINTR => Errc::Interrupted,
        libc::EIO => Errc::IoError,
        libc::ENXIO => Errc::NoSuchDeviceOrAddress,
        libc::EBADF => Errc::BadFileDescriptor,
        libc::ECHILD => Errc::NoChildProcess,
        libc::EAGAIN => Errc::TryAgain,
        libc::ENOMEM => Errc::NotEnoughMemory,
        libc::EACCES => Errc::PermissionDenied,
        libc::EFAULT => Errc::BadAddress,
        libc::EBUSY => Errc::DeviceBusy,
        libc::EEXIST => Errc::FileExists,
        libc::ENODEV => Errc::NoSuchDevice,
        libc::ENOTDIR => Errc::NotADirectory,
        libc::EISDIR => Errc::IsADirectory,
        libc::EINVAL => Errc::InvalidArgument,
        libc::ENFILE => Errc::TooManyOpenFilesInSystem,
        libc::EMFILE => Errc::TooManyOpenFiles,
        libc::ENOTTY => Errc::InappropriateIoControl,
        libc::EFBIG => Errc::FileTooLarge,
        libc::ENOSPC => Errc::NoSpaceLeft,
        libc::ESPIPE => Errc::IllegalSeek,
        libc::EROFS => Errc::ReadOnlyFilesystem,
        libc::EMLINK => Errc::TooManyLinks,
        libc::EPIPE => Errc::BrokenPipe,
        libc::EDEADLK => Errc::DeadlockAvoided,
        libc::ENAMETOOLONG => Errc::NameTooLong,
        libc::ENOSYS => Errc::NotImplemented,
        libc::ENOTEMPTY => Errc::DirectoryNotEmpty,
        libc::ELOOP => Errc::TooManySymlinkLevels,
        libc::EPROTO => Errc::ProtocolError,
        libc::EOVERFLOW => Errc::ValueOverflow,
        libc::ENOTSOCK => Errc::NotASocket,
        libc::EDESTADDRREQ => Errc::DestinationAddressRequired,
        libc::EMSGSIZE => Errc::MessageTooLong,
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
        _ => Errc::Unknown,
    }
}

// ============================================================================
// The domain
// ============================================================================

/// The kernel-error domain singleton type. Value type `i64`, non-negative
/// = success.
#[derive(Debug)]
pub struct KernelDomain(());

impl KernelDomain {
    /// Construct an instance; equality is identity-keyed, see
    /// [`GenericDomain::new`](crate::generic::GenericDomain::new).
    #[inline]
    pub const fn new() -> Self {
        Self(())
    }
}

impl Default for KernelDomain {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide kernel-error domain instance.
pub static KERNEL_DOMAIN: KernelDomain = KernelDomain::new();

impl StatusDomain for KernelDomain {
    type Value = i64;

    const ID: DomainId = DomainId::derived("polystatus kernel error domain v1");
    const NAME: &'static str = "kernel error domain";

    #[inline]
    fn get() -> &'static Self {
        &KERNEL_DOMAIN
    }

    #[inline]
    fn is_failure(&self, value: &i64) -> bool {
        *value < 0
    }

    fn strictly_equivalent(&self, value: &i64, other: &dyn StatusCode) -> bool {
        let Some(d) = other.domain() else {
            return false;
        };
        if d.id() == Self::ID {
            return i64::from_bits(other.erased_bits()) == *value;
        }
        if d.id() == GenericDomain::ID {
            return Errc::from_bits(other.erased_bits()) == kernel_to_generic(*value);
        }
        if d.id() == OsDomain::ID {
            return u32::from_bits(other.erased_bits()) == kernel_to_os(*value);
        }
        // Unknown neighbor: decline, general equivalence takes over.
        false
    }

    #[inline]
    fn as_generic(&self, value: &i64) -> Errc {
        kernel_to_generic(*value)
    }

    #[inline]
    fn message(&self, value: &i64) -> MessageRef {
        sys::kernel_message(kernel_to_os(*value))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generic::GenericCode;
    use crate::os::OsCode;

    #[test]
    fn non_negative_words_are_successes() {
        assert!(KernelCode::from_ret(0).success());
        assert!(KernelCode::from_ret(4096).success());
        assert!(KernelCode::from_ret(-(libc::EAGAIN as i64)).failure());
    }

    #[test]
    fn both_tables_agree_on_userspace_conditions() {
        let denied = -(libc::EACCES as i64);
        assert_eq!(kernel_to_generic(denied), Errc::PermissionDenied);
        assert_eq!(kernel_to_os(denied), libc::EACCES as u32);
    }

    #[test]
    fn restart_codes_map_to_their_rewrite_images() {
        let restart = -(ERESTARTSYS as i64);
        assert_eq!(kernel_to_generic(restart), Errc::Interrupted);
        assert_eq!(kernel_to_os(restart), libc::EINTR as u32);

        let ioctl = -(ENOIOCTLCMD as i64);
        assert_eq!(kernel_to_generic(ioctl), Errc::InappropriateIoControl);
        assert_eq!(kernel_to_os(ioctl), libc::ENOTTY as u32);
    }

    #[test]
    fn unmapped_words_report_both_sentinels() {
        let weird = -999_999i64;
        assert_eq!(kernel_to_generic(weird), Errc::Unknown);
        assert_eq!(kernel_to_os(weird), u32::MAX);
        assert_eq!(kernel_to_os(i64::MIN), u32::MAX);
        assert_eq!(kernel_to_generic(i64::MIN), Errc::Unknown);
    }

    #[test]
    fn strictly_equivalent_to_both_known_neighbors() {
        let kernel = KernelCode::from_ret(-(libc::EACCES as i64));
        let os = OsCode::new(libc::EACCES as u32);
        let generic = GenericCode::from(Errc::PermissionDenied);

        // The domain-aware strict path reaches both, no generic round-trip.
        assert!(kernel.strictly_equivalent(&os));
        assert!(kernel.strictly_equivalent(&generic));

        // And general equivalence agrees from every direction.
        assert!(os.equivalent(&kernel));
        assert!(generic.equivalent(&kernel));
        assert!(kernel.equivalent(&os));
        assert!(kernel.equivalent(&generic));
    }

    #[test]
    fn success_words_line_up_across_domains() {
        let kernel_ok = KernelCode::from_ret(17);
        let os_ok = OsCode::new(0);
        assert!(kernel_ok.strictly_equivalent(&os_ok));
        assert!(kernel_ok.equivalent(&GenericCode::from(Errc::Success)));
    }

    #[test]
    fn messages_render_through_the_kernel_entry_point() {
        let msg = KernelCode::from_ret(-(libc::ENOENT as i64)).message();
        assert!(!msg.is_empty());

        // Unmapped word: the fixed fallback, not garbage.
        let msg = KernelCode::from_ret(-999_999).message();
        assert_eq!(msg, "failed to get message from system");
    }
}
