//! The status-code value model: one read-only view, two owning variants.
//!
//! # The three shapes of a status code
//!
//! - **`&dyn StatusCode`** — the type-erased view. A non-owning, read-only
//!   reference any code can be observed through when its domain is unknown
//!   at the call site. The holder cannot copy, construct, or drop the
//!   referent through it.
//! - **[`Code<D>`]** — the typed workhorse. Owns a value of domain `D`'s
//!   declared value type plus the domain reference. `Copy`, two machine
//!   words, no heap state. Call sites that know `D` get fully
//!   statically-dispatched operations.
//! - **[`ErasedCode`]** — owns the domain reference and the value's 64-bit
//!   bit pattern, with the value's true type forgotten. Freely copyable and
//!   storable, which makes it the variant of choice for containers and
//!   stable-layout boundaries. Available only for domains whose value type
//!   is plain-copyable and at most 64 bits wide — a compile-time bound
//!   ([`ErasableValue`]), not a runtime fallback.
//!
//! # Emptiness
//!
//! A code with no domain attached is *empty*: a valid, inert state distinct
//! from both success and failure. Empty codes report `success() == false`
//! and `failure() == false`; call sites that care must check
//! [`empty()`](StatusCode::empty) first.
//!
//! # Equivalence
//!
//! Two tiers, per the protocol in [`equivalent`](StatusCode::equivalent):
//! a strict tier authored by the left operand's domain (fast, precise,
//! possibly non-transitive) and a general tier that additionally routes
//! both codes through the generic set, which caps cross-domain authoring
//! burden at one mapping per domain while staying symmetric.
//!
//! None of the operations here allocate; the only allocating path in the
//! crate is a domain fetching a system message.

use std::fmt;

use crate::domain::{DynDomain, ErasableValue, StatusDomain};
use crate::error::StatusError;
use crate::generic::Errc;
use crate::message::MessageRef;

/// Message text reported for empty codes. Never allocated.
pub(crate) const EMPTY_MESSAGE: &str = "(empty)";

// ============================================================================
// The type-erased view
// ============================================================================

/// The read-only observation surface every status code exposes.
///
/// Dynamically-typed code paths take `&dyn StatusCode` and get the full
/// operation set; statically-typed paths use the same-named inherent
/// methods on [`Code<D>`], which skip the virtual dispatch.
pub trait StatusCode {
    /// The attached domain, or `None` when the code is empty.
    fn domain(&self) -> Option<&'static dyn DynDomain>;

    /// The value's 64-bit bit pattern. Meaningless when empty.
    fn erased_bits(&self) -> u64;

    /// This code as a type-erased view.
    fn as_dyn(&self) -> &dyn StatusCode;

    /// True iff no domain is attached.
    #[inline]
    fn empty(&self) -> bool {
        self.domain().is_none()
    }

    /// True iff the code denotes success. Empty codes are *not* successes.
    fn success(&self) -> bool {
        match self.domain() {
            Some(d) => !d.failure_of(self.as_dyn()),
            None => false,
        }
    }

    /// True iff the code denotes failure. Empty codes are *not* failures.
    fn failure(&self) -> bool {
        match self.domain() {
            Some(d) => d.failure_of(self.as_dyn()),
            None => false,
        }
    }

    /// Human-readable text for the code, `"(empty)"` for empty codes.
    fn message(&self) -> MessageRef {
        match self.domain() {
            Some(d) => d.message_of(self.as_dyn()),
            None => MessageRef::from_static(EMPTY_MESSAGE),
        }
    }

    /// Best-effort mapping into the generic set; [`Errc::Unknown`] when the
    /// domain has no mapping for this value or the code is empty.
    fn to_generic(&self) -> Errc {
        match self.domain() {
            Some(d) => d.generic_of(self.as_dyn()),
            None => Errc::Unknown,
        }
    }

    /// Strict equivalence: this code's domain authors the rule.
    ///
    /// Two empty codes are strictly equivalent; an empty code never matches
    /// a non-empty one. Cross-domain results are whatever this code's
    /// domain declares, so the relation may be asymmetric and
    /// non-transitive — prefer [`equivalent`](Self::equivalent) unless the
    /// asymmetry is wanted.
    fn strictly_equivalent(&self, other: &dyn StatusCode) -> bool {
        strict_eq(self.as_dyn(), other)
    }

    /// General equivalence: symmetric and transitive through the generic
    /// set. The relation most call sites want.
    fn equivalent(&self, other: &dyn StatusCode) -> bool {
        general_eq(self.as_dyn(), other)
    }

    /// Begin unwinding with a [`StatusError`] carrying a copy of this code.
    ///
    /// # Panics
    ///
    /// Always — that is the point. Raising an empty code is a precondition
    /// violation and panics with a plain message instead.
    fn raise(&self) -> ! {
        match self.domain() {
            Some(d) => d.raise_of(self.as_dyn()),
            None => panic!("cannot raise an empty status code"),
        }
    }
}

// ============================================================================
// Equivalence protocol
// ============================================================================

/// Strict tier: the left operand's domain governs.
fn strict_eq(a: &dyn StatusCode, b: &dyn StatusCode) -> bool {
    match (a.domain(), b.domain()) {
        (Some(da), Some(_)) => da.equivalent(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// General tier: strict in either direction, then the generic lingua
/// franca. Consulting both domains' strict rules is what keeps the
/// relation symmetric even when only one side knows about the other.
fn general_eq(a: &dyn StatusCode, b: &dyn StatusCode) -> bool {
    match (a.domain(), b.domain()) {
        (Some(da), Some(db)) => {
            if da.equivalent(a, b) || db.equivalent(b, a) {
                return true;
            }
            let ga = da.generic_of(a);
            ga != Errc::Unknown && ga == db.generic_of(b)
        }
        (None, None) => true,
        _ => false,
    }
}

// ============================================================================
// The typed variant
// ============================================================================

/// A typed status code: a value of domain `D` plus the domain reference.
///
/// Two machine words, `Copy`, no heap state. Construct with
/// [`new`](Code::new) from a raw value, with [`from_source`](Code::from_source)
/// from any type implementing the conversion contract for `D`, or with
/// [`from_erased`](Code::from_erased) from an erased code of the same
/// domain. Default-constructed codes are empty.
///
/// The inherent methods mirror the [`StatusCode`] trait surface with
/// statically-dispatched implementations; they shadow the trait methods on
/// purpose.
pub struct Code<D: StatusDomain> {
    domain: Option<&'static D>,
    value: D::Value,
}

impl<D: StatusDomain> Code<D> {
    /// Explicit construction from a raw value of this domain.
    #[inline]
    pub fn new(value: D::Value) -> Self {
        Self {
            domain: Some(D::get()),
            value,
        }
    }

    /// Construction through the statically-resolved conversion contract.
    ///
    /// Accepts exactly the types whose [`IntoStatusCode`] implementation
    /// targets domain `D`; resolution happens at compile time.
    ///
    /// [`IntoStatusCode`]: crate::convert::IntoStatusCode
    #[inline]
    pub fn from_source<T>(source: T) -> Self
    where
        T: crate::convert::IntoStatusCode<Domain = D>,
    {
        source.into_status_code()
    }

    /// Reconstruct a typed code from an erased one.
    ///
    /// The storage-width and triviality preconditions are the
    /// `ErasableValue` bound; domain consistency is asserted in debug
    /// builds. An empty erased code yields an empty typed code.
    pub fn from_erased(erased: &ErasedCode) -> Self
    where
        D::Value: ErasableValue,
    {
        match erased.domain {
            None => Self::default(),
            Some(d) => {
                debug_assert!(
                    d.id() == D::ID,
                    "erased code belongs to the {} domain, not {}",
                    d.name(),
                    D::NAME,
                );
                Self {
                    domain: Some(D::get()),
                    value: <D::Value as ErasableValue>::from_bits(erased.value),
                }
            }
        }
    }

    /// True iff no domain is attached.
    #[inline]
    pub fn empty(&self) -> bool {
        self.domain.is_none()
    }

    /// The domain. Only meaningful for non-empty codes.
    ///
    /// # Panics
    ///
    /// Panics if the code is empty.
    #[inline]
    pub fn domain(&self) -> &'static D {
        self.domain.expect("empty status code has no domain")
    }

    /// The raw value. Only meaningful for non-empty codes.
    #[inline]
    pub fn value(&self) -> &D::Value {
        &self.value
    }

    /// True iff the code denotes success under `D`'s rule.
    #[inline]
    pub fn success(&self) -> bool {
        match self.domain {
            Some(d) => !d.is_failure(&self.value),
            None => false,
        }
    }

    /// True iff the code denotes failure under `D`'s rule.
    #[inline]
    pub fn failure(&self) -> bool {
        match self.domain {
            Some(d) => d.is_failure(&self.value),
            None => false,
        }
    }

    /// Human-readable text, `"(empty)"` for empty codes.
    pub fn message(&self) -> MessageRef {
        match self.domain {
            Some(d) => d.message(&self.value),
            None => MessageRef::from_static(EMPTY_MESSAGE),
        }
    }

    /// Best-effort mapping into the generic set.
    pub fn to_generic(&self) -> Errc {
        match self.domain {
            Some(d) => d.as_generic(&self.value),
            None => Errc::Unknown,
        }
    }

    /// Reset to empty.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Strict equivalence with `D` authoring the rule; see
    /// [`StatusCode::strictly_equivalent`].
    pub fn strictly_equivalent(&self, other: &dyn StatusCode) -> bool {
        match (self.domain, other.domain()) {
            (Some(d), Some(_)) => d.strictly_equivalent(&self.value, other),
            (None, None) => true,
            _ => false,
        }
    }

    /// General equivalence; see [`StatusCode::equivalent`].
    pub fn equivalent(&self, other: &dyn StatusCode) -> bool
    where
        D::Value: ErasableValue,
    {
        general_eq(self, other)
    }

    /// Begin unwinding with a [`StatusError`] carrying a copy of this code.
    ///
    /// # Panics
    ///
    /// Always; raising an empty code is a precondition violation.
    pub fn raise(&self) -> !
    where
        D::Value: ErasableValue,
    {
        match self.domain {
            Some(d) => d.raise(&self.value),
            None => panic!("cannot raise an empty status code"),
        }
    }

    /// Convert into an ordinary error value for `Result`-style propagation.
    pub fn into_error(self) -> StatusError
    where
        D::Value: ErasableValue,
    {
        StatusError::new(self.into())
    }
}

impl<D: StatusDomain> Clone for Code<D> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: StatusDomain> Copy for Code<D> {}

impl<D: StatusDomain> Default for Code<D> {
    /// The empty code.
    #[inline]
    fn default() -> Self {
        Self {
            domain: None,
            value: D::Value::default(),
        }
    }
}

impl<D> StatusCode for Code<D>
where
    D: StatusDomain,
    D::Value: ErasableValue,
{
    #[inline]
    fn domain(&self) -> Option<&'static dyn DynDomain> {
        self.domain.map(|d| d as &'static dyn DynDomain)
    }

    #[inline]
    fn erased_bits(&self) -> u64 {
        self.value.to_bits()
    }

    #[inline]
    fn as_dyn(&self) -> &dyn StatusCode {
        self
    }
}

impl<D: StatusDomain> fmt::Debug for Code<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.domain {
            Some(_) => write!(f, "Code({}: {:?})", D::NAME, self.value),
            None => f.write_str("Code(empty)"),
        }
    }
}

impl<D: StatusDomain> fmt::Display for Code<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

// ============================================================================
// The erased variant
// ============================================================================

/// An erased-but-owning status code: domain reference plus the value's bit
/// pattern, with the value's static type forgotten.
///
/// Unlike the `&dyn StatusCode` view this variant is freely copyable,
/// movable, and droppable, so it is the shape to store in containers or
/// pass across stable-layout boundaries. All operations dispatch through
/// the domain's dynamic surface.
#[derive(Clone, Copy, Default)]
pub struct ErasedCode {
    domain: Option<&'static dyn DynDomain>,
    value: u64,
}

impl ErasedCode {
    /// The erased 64-bit bit pattern.
    ///
    /// Round-trips exactly: erasing a typed code and reading the pattern
    /// back through [`Code::from_erased`] yields a bit-identical value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Human-readable text, `"(empty)"` for empty codes.
    pub fn message(&self) -> MessageRef {
        match self.domain {
            Some(d) => d.message_of(self),
            None => MessageRef::from_static(EMPTY_MESSAGE),
        }
    }
}

impl<D> From<Code<D>> for ErasedCode
where
    D: StatusDomain,
    D::Value: ErasableValue,
{
    /// Erase the value into its bit pattern. Compile-time checked: only
    /// domains with an erasable value type get this conversion.
    #[inline]
    fn from(code: Code<D>) -> Self {
        Self {
            domain: StatusCode::domain(&code),
            value: code.value.to_bits(),
        }
    }
}

impl StatusCode for ErasedCode {
    #[inline]
    fn domain(&self) -> Option<&'static dyn DynDomain> {
        self.domain
    }

    #[inline]
    fn erased_bits(&self) -> u64 {
        self.value
    }

    #[inline]
    fn as_dyn(&self) -> &dyn StatusCode {
        self
    }
}

impl fmt::Debug for ErasedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.domain {
            Some(d) => write!(f, "ErasedCode({}: {:#x})", d.name(), self.value),
            None => f.write_str("ErasedCode(empty)"),
        }
    }
}

impl fmt::Display for ErasedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generic::{Errc, GenericCode};
    use crate::kernel::KernelCode;
    use crate::os::OsCode;

    #[test]
    fn default_code_is_empty_and_inert() {
        let code = GenericCode::default();
        assert!(code.empty());
        assert!(!code.success());
        assert!(!code.failure());
        assert_eq!(code.message(), EMPTY_MESSAGE);
        assert_eq!(code.to_generic(), Errc::Unknown);
    }

    #[test]
    fn non_empty_code_is_exactly_success_or_failure() {
        let ok = GenericCode::from(Errc::Success);
        assert!(!ok.empty());
        assert!(ok.success() && !ok.failure());

        let bad = GenericCode::from(Errc::PermissionDenied);
        assert!(!bad.empty());
        assert!(bad.failure() && !bad.success());
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut code = OsCode::new(libc::EACCES as u32);
        assert!(code.failure());
        code.clear();
        assert!(code.empty());
        assert!(!code.failure());
    }

    #[test]
    fn two_empty_codes_are_equivalent_across_variants() {
        let a = GenericCode::default();
        let b = OsCode::default();
        assert!(a.strictly_equivalent(&b));
        assert!(a.equivalent(&b));
        assert!(ErasedCode::default().equivalent(&a));
    }

    #[test]
    fn empty_never_matches_non_empty() {
        let empty = GenericCode::default();
        let full = GenericCode::from(Errc::TimedOut);
        assert!(!empty.equivalent(&full));
        assert!(!full.equivalent(&empty));
        assert!(!empty.strictly_equivalent(&full));
        assert!(!full.strictly_equivalent(&empty));
    }

    #[test]
    fn erasure_round_trips_bit_identically() {
        let original = KernelCode::new(-(libc::EACCES as i64));
        let erased = ErasedCode::from(original);
        assert_eq!(erased.value(), (-(libc::EACCES as i64)) as u64);

        let recovered = KernelCode::from_erased(&erased);
        assert_eq!(recovered.value(), original.value());
        assert!(recovered.strictly_equivalent(&original));
    }

    #[test]
    fn erasing_an_empty_code_stays_empty() {
        let erased = ErasedCode::from(OsCode::default());
        assert!(erased.empty());
        let back = OsCode::from_erased(&erased);
        assert!(back.empty());
    }

    #[test]
    fn erased_code_dispatches_through_its_domain() {
        let erased = ErasedCode::from(OsCode::new(0));
        assert!(erased.success());

        let erased = ErasedCode::from(OsCode::new(libc::ENOENT as u32));
        assert!(erased.failure());
        assert_eq!(erased.to_generic(), Errc::NoSuchEntity);
    }

    #[test]
    fn view_layer_observes_any_variant() {
        let typed = GenericCode::from(Errc::BrokenPipe);
        let erased = ErasedCode::from(typed);

        let views: [&dyn StatusCode; 2] = [&typed, &erased];
        for view in views {
            assert!(view.failure());
            assert_eq!(view.to_generic(), Errc::BrokenPipe);
            assert!(view.equivalent(&typed));
        }
    }

    #[test]
    #[should_panic(expected = "empty status code")]
    fn raising_an_empty_code_is_a_precondition_violation() {
        GenericCode::default().raise();
    }

    #[test]
    fn debug_formatting_names_the_domain() {
        let code = GenericCode::from(Errc::FileExists);
        let text = format!("{code:?}");
        assert!(text.contains("generic"));

        assert_eq!(format!("{:?}", GenericCode::default()), "Code(empty)");
    }
}
