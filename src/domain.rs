//! The error-domain capability contract.
//!
//! A *domain* is one source of failure codes: the portable generic set, the
//! host platform's error words, a kernel interface, a library's own codes.
//! Each domain is a process-wide immutable singleton that knows, for values
//! of its own type, what failure means, how to compare against codes from
//! other domains, how to map into the generic set, and how to render text.
//!
//! # Identity, not address
//!
//! Domains are compared by a fixed 64-bit identity, never by address. A
//! domain singleton duplicated across independently compiled units (static
//! linking, plugins) still compares equal, because the identity constant
//! travels with the type. See [`DomainId`].
//!
//! # Two layers
//!
//! The contract is split in two, reconciling compile-time specialization
//! with uniform dynamic storage:
//!
//! - [`StatusDomain`] is the typed contract. Its methods take the domain's
//!   own `Value` type and are statically dispatched — a call site that
//!   knows its domain pays no virtual-call cost.
//! - [`DynDomain`] is the object-safe surface used behind
//!   `&dyn` references when the domain is unknown at the call site. It is
//!   blanket-implemented for every `StatusDomain` whose value type can be
//!   carried as a 64-bit bit pattern (see [`ErasableValue`]); each method
//!   recovers the typed value from the erased code and forwards to the
//!   typed contract.
//!
//! Implementors write one `StatusDomain` impl and get the dynamic surface
//! for free.

use std::fmt;

use crate::code::{Code, StatusCode};
use crate::error::StatusError;
use crate::generic::Errc;
use crate::message::MessageRef;

// ============================================================================
// Domain identity
// ============================================================================

/// A fixed 64-bit identity unique to one error domain.
///
/// Chosen once at domain-definition time, typically by hashing the domain's
/// purpose string with [`DomainId::derived`]. Identity equality *is* domain
/// equality; addresses never participate.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainId(u64);

impl DomainId {
    /// Wrap a raw identity value.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Derive an identity from a purpose string (compile-time FNV-1a).
    ///
    /// Collisions are possible in principle; domains within one process are
    /// few enough that a 64-bit hash of a distinct purpose string is
    /// uniqueness in practice.
    pub const fn derived(purpose: &str) -> Self {
        let bytes = purpose.as_bytes();
        let mut hash = 0xcbf2_9ce4_8422_2325u64;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
            i += 1;
        }
        Self(hash)
    }

    /// The raw identity value.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DomainId({:#018x})", self.0)
    }
}

// ============================================================================
// Value types
// ============================================================================

/// Requirements on a domain's value type.
///
/// Values are plain data: copied by value along call chains, defaulted when
/// a code is empty, compared for same-domain equivalence.
pub trait StatusValue: Copy + Default + Eq + fmt::Debug + Send + Sync + 'static {}

impl<T> StatusValue for T where T: Copy + Default + Eq + fmt::Debug + Send + Sync + 'static {}

/// Value types that can be carried as a 64-bit erased bit pattern.
///
/// An implementation of this trait is the compile-time capacity predicate
/// for erasure: it exists exactly when the value is plain-copyable and its
/// width is at most 64 bits. `to_bits`/`from_bits` must round-trip
/// bit-exactly; signed types sign-extend so the pattern is self-describing.
pub trait ErasableValue: StatusValue {
    /// The value's bit pattern, widened to the erased storage width.
    fn to_bits(self) -> u64;

    /// Reinterpret an erased bit pattern as a value of this type.
    ///
    /// The caller is responsible for domain consistency: the pattern must
    /// have been produced by `to_bits` on a value of the same domain.
    fn from_bits(bits: u64) -> Self;
}

macro_rules! erasable_signed {
    ($($t:ty),*) => {$(
        impl ErasableValue for $t {
            #[inline]
            fn to_bits(self) -> u64 {
                self as i64 as u64
            }

            #[inline]
            fn from_bits(bits: u64) -> Self {
                bits as $t
            }
        }
    )*};
}

macro_rules! erasable_unsigned {
    ($($t:ty),*) => {$(
        impl ErasableValue for $t {
            #[inline]
            fn to_bits(self) -> u64 {
                self as u64
            }

            #[inline]
            fn from_bits(bits: u64) -> Self {
                bits as $t
            }
        }
    )*};
}

erasable_signed!(i8, i16, i32);
erasable_unsigned!(u8, u16, u32);

impl ErasableValue for i64 {
    #[inline]
    fn to_bits(self) -> u64 {
        self as u64
    }

    #[inline]
    fn from_bits(bits: u64) -> Self {
        bits as i64
    }
}

impl ErasableValue for u64 {
    #[inline]
    fn to_bits(self) -> u64 {
        self
    }

    #[inline]
    fn from_bits(bits: u64) -> Self {
        bits
    }
}

// ============================================================================
// The typed contract
// ============================================================================

/// The capability set every error domain implements once.
///
/// Implementations are stateless, immutable, process-lifetime singletons
/// reachable through [`get()`](StatusDomain::get). All methods are
/// non-throwing; the only way out of normal control flow is the explicit
/// [`raise`](StatusDomain::raise) opt-in.
pub trait StatusDomain: Send + Sync + 'static {
    /// The domain's value type.
    type Value: StatusValue;

    /// The domain's fixed identity.
    const ID: DomainId;

    /// The domain's display name.
    const NAME: &'static str;

    /// The process-wide singleton instance.
    fn get() -> &'static Self
    where
        Self: Sized;

    /// True iff `value` denotes failure under this domain's own rule.
    fn is_failure(&self, value: &Self::Value) -> bool;

    /// Decide whether `value` (known to belong to this domain) denotes the
    /// same condition as `other`, which may come from any domain.
    ///
    /// Must be reflexive and symmetric when `other` is in this domain.
    /// Cross-domain behavior is this domain's own business: return `false`
    /// for domains you do not know about and general equivalence will take
    /// over through the generic mapping.
    fn strictly_equivalent(&self, value: &Self::Value, other: &dyn StatusCode) -> bool;

    /// Best-effort lossy mapping into the generic set.
    ///
    /// Returns [`Errc::Unknown`] when no mapping exists; never fails.
    fn as_generic(&self, value: &Self::Value) -> Errc;

    /// Render human-readable text for `value`. Fail-safe: degrades to a
    /// fixed static string rather than reporting an error about an error.
    fn message(&self, value: &Self::Value) -> MessageRef;

    /// Begin unwinding with a [`StatusError`] carrying a copy of the code.
    ///
    /// The explicit opt-in for callers that prefer unwind-based
    /// propagation; nothing else in the crate unwinds.
    fn raise(&self, value: &Self::Value) -> !
    where
        Self: Sized,
        Self::Value: ErasableValue,
    {
        std::panic::panic_any(StatusError::from(Code::<Self>::new(*value)))
    }
}

// ============================================================================
// The object-safe surface
// ============================================================================

/// The dynamically-dispatched view of a domain.
///
/// This is what an erased status code stores and what dynamic call sites
/// reach a domain through. Never implemented by hand: every
/// [`StatusDomain`] with an erasable value type gets it via the blanket
/// impl below.
pub trait DynDomain: Send + Sync {
    /// The domain's fixed identity.
    fn id(&self) -> DomainId;

    /// The domain's display name.
    fn name(&self) -> MessageRef;

    /// [`StatusDomain::is_failure`] over an erased code.
    fn failure_of(&self, code: &dyn StatusCode) -> bool;

    /// [`StatusDomain::strictly_equivalent`] over erased codes.
    fn equivalent(&self, code: &dyn StatusCode, other: &dyn StatusCode) -> bool;

    /// [`StatusDomain::as_generic`] over an erased code.
    fn generic_of(&self, code: &dyn StatusCode) -> Errc;

    /// [`StatusDomain::message`] over an erased code.
    fn message_of(&self, code: &dyn StatusCode) -> MessageRef;

    /// [`StatusDomain::raise`] over an erased code.
    fn raise_of(&self, code: &dyn StatusCode) -> !;
}

/// Recover a typed value from an erased code belonging to domain `D`.
///
/// The debug assertion is the optional runtime check against the
/// originating domain; the bit reinterpretation itself is gated at compile
/// time by the `ErasableValue` bound.
fn recover<D>(code: &dyn StatusCode) -> D::Value
where
    D: StatusDomain,
    D::Value: ErasableValue,
{
    debug_assert!(
        code.domain().is_some_and(|d| d.id() == D::ID),
        "status code does not belong to the {} domain",
        D::NAME,
    );
    <D::Value as ErasableValue>::from_bits(code.erased_bits())
}

impl<D> DynDomain for D
where
    D: StatusDomain,
    D::Value: ErasableValue,
{
    #[inline]
    fn id(&self) -> DomainId {
        D::ID
    }

    #[inline]
    fn name(&self) -> MessageRef {
        MessageRef::from_static(D::NAME)
    }

    fn failure_of(&self, code: &dyn StatusCode) -> bool {
        self.is_failure(&recover::<D>(code))
    }

    fn equivalent(&self, code: &dyn StatusCode, other: &dyn StatusCode) -> bool {
        self.strictly_equivalent(&recover::<D>(code), other)
    }

    fn generic_of(&self, code: &dyn StatusCode) -> Errc {
        self.as_generic(&recover::<D>(code))
    }

    fn message_of(&self, code: &dyn StatusCode) -> MessageRef {
        self.message(&recover::<D>(code))
    }

    fn raise_of(&self, code: &dyn StatusCode) -> ! {
        self.raise(&recover::<D>(code))
    }
}

impl PartialEq for dyn DynDomain {
    /// Identity equality. Two instances with the same identity are the same
    /// domain regardless of where they live in memory.
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for dyn DynDomain {}

impl fmt::Debug for dyn DynDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.name(), self.id())
    }
}

// ============================================================================
// Tests
// ============================================================================
