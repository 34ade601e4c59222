//! Shared message text handles with deterministic release.
//!
//! Every human-readable string this crate hands out travels as a
//! [`MessageRef`]: an immutable text handle with one of two ownership modes.
//!
//! - **Static**: the text lives in the binary (domain names, fixed fallback
//!   strings). Cloning and dropping are no-ops.
//! - **Shared**: the text was fetched at runtime (a rendered system message)
//!   and lives in a single shared allocation behind an atomic reference
//!   count. Cloning increments the count, dropping decrements it, and the
//!   holder that drops the count to zero releases the allocation.
//!
//! # Why not plain `String`
//!
//! Status codes are copied freely along call chains. A `String` message
//! would force an allocation per copy; a shared handle makes copies an
//! atomic increment, and the common case (static text) costs nothing at
//! all. The same reasoning drives `Arc<str>` elsewhere in this family of
//! crates: cheap cloning of immutable text under high fan-out.
//!
//! # Concurrency
//!
//! The reference count is the only mutable shared state in the crate.
//! `Arc` provides the standard refcount discipline: the increment on clone
//! happens before the copy is observable, and the final decrement-to-zero
//! release happens-before any reuse of the freed memory.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

enum Repr {
    /// Text embedded in the binary. Release is a no-op.
    Static(&'static str),
    /// Shared allocation, released when the last holder drops.
    Shared(Arc<str>),
}

/// An immutable, possibly shared text handle.
///
/// Obtained from [`message()`](crate::StatusCode::message) and
/// [`name()`](crate::DynDomain::name); rarely constructed directly.
/// Dereferences to `str`.
#[derive(Clone)]
pub struct MessageRef {
    repr: Repr,
}

impl MessageRef {
    /// Wrap text that lives for the whole program. Never allocates.
    #[inline]
    pub const fn from_static(text: &'static str) -> Self {
        Self {
            repr: Repr::Static(text),
        }
    }

    /// Take shared ownership of runtime-produced text.
    #[inline]
    pub fn shared(text: impl Into<Arc<str>>) -> Self {
        Self {
            repr: Repr::Shared(text.into()),
        }
    }

    /// The text itself.
    #[inline]
    pub fn as_str(&self) -> &str {
        match &self.repr {
            Repr::Static(s) => s,
            Repr::Shared(s) => s,
        }
    }

    /// True if this handle owns a share of a runtime allocation.
    #[inline]
    pub fn is_shared(&self) -> bool {
        matches!(self.repr, Repr::Shared(_))
    }
}

impl Clone for Repr {
    #[inline]
    fn clone(&self) -> Self {
        match self {
            Self::Static(s) => Self::Static(s),
            // Atomic increment; the allocation is shared, not copied.
            Self::Shared(s) => Self::Shared(Arc::clone(s)),
        }
    }
}

impl Deref for MessageRef {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for MessageRef {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for MessageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl PartialEq<str> for MessageRef {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for MessageRef {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Weak;

    #[test]
    fn static_text_is_not_shared() {
        let msg = MessageRef::from_static("permission denied");
        assert!(!msg.is_shared());
        assert_eq!(msg, "permission denied");

        let copy = msg.clone();
        assert!(!copy.is_shared());
        assert_eq!(copy.as_str(), msg.as_str());
    }

    #[test]
    fn clone_shares_the_allocation() {
        let msg = MessageRef::shared(String::from("rendered at runtime"));
        let copy = msg.clone();

        let (a, b) = match (&msg.repr, &copy.repr) {
            (Repr::Shared(a), Repr::Shared(b)) => (a, b),
            _ => panic!("expected shared handles"),
        };
        assert!(Arc::ptr_eq(a, b));
        assert_eq!(Arc::strong_count(a), 2);
    }

    #[test]
    fn release_happens_exactly_once_at_count_zero() {
        let weak: Weak<str>;
        {
            let original = MessageRef::shared(String::from("transient"));
            weak = match &original.repr {
                Repr::Shared(arc) => Arc::downgrade(arc),
                Repr::Static(_) => unreachable!(),
            };

            let copies: Vec<MessageRef> = (0..4).map(|_| original.clone()).collect();
            assert_eq!(weak.upgrade().map(|a| Arc::strong_count(&a)), Some(6));

            drop(copies);
            // Original still alive: the text must still be readable.
            assert_eq!(original.as_str(), "transient");
            assert!(weak.upgrade().is_some());
        }
        // Last holder gone: the allocation is released.
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn move_transfers_ownership_without_touching_the_count() {
        let msg = MessageRef::shared(String::from("moved"));
        let count_of = |m: &MessageRef| match &m.repr {
            Repr::Shared(arc) => Arc::strong_count(arc),
            Repr::Static(_) => unreachable!(),
        };
        assert_eq!(count_of(&msg), 1);

        let moved = msg;
        assert_eq!(count_of(&moved), 1);
    }

    #[test]
    fn display_and_deref_agree() {
        let msg = MessageRef::from_static("broken pipe");
        assert_eq!(format!("{msg}"), "broken pipe");
        assert_eq!(msg.len(), "broken pipe".len());
    }
}
