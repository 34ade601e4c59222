//! # Polystatus
//!
//! Domain-polymorphic status codes with allocation-minimal fast paths.
//!
//! One universal error enumeration does not survive contact with real
//! systems: the platform speaks raw error words, kernel interfaces speak
//! signed status words, libraries speak their own codes, and forcing them
//! all through one enum loses information at every boundary. This crate
//! keeps each source as its own *domain* — failure rule, messages, and
//! cross-domain comparison authored by the source itself — while codes
//! from any two domains can still be asked the one question that matters:
//! do you denote the same condition?
//!
//! ## Design Philosophy
//!
//! 1. **Domains are sovereign.** Each error source defines its own value
//!    type, success rule, message rendering, and equivalence knowledge.
//! 2. **No allocation on the common path.** A status code is two machine
//!    words, `Copy`, heap-free. Only fetching a system message allocates,
//!    and only when actually requested.
//! 3. **Static where known, dynamic where not.** Call sites that know the
//!    domain get fully monomorphized, virtual-call-free operations; call
//!    sites that do not observe any code through `&dyn StatusCode` or
//!    store it as an [`ErasedCode`].
//! 4. **Equivalence, not identity.** Cross-domain comparison is a declared
//!    best-effort relation routed through one generic code set, capping
//!    the authoring burden at one mapping per domain.
//! 5. **Errors about errors are forbidden.** Message rendering degrades to
//!    a fixed string rather than failing; `success`/`failure`/`equivalent`
//!    never unwind. Unwinding is a single explicit opt-in
//!    ([`StatusCode::raise`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use polystatus::{Errc, GenericCode, KernelCode};
//!
//! // A raw syscall-style return: a negative word carries the condition.
//! let denied = KernelCode::from_ret(-(libc::EACCES as i64));
//! assert!(denied.failure());
//!
//! // Compare against a portable generic condition from another domain.
//! let generic = GenericCode::from(Errc::PermissionDenied);
//! assert!(denied.strictly_equivalent(&generic)); // kernel knows generic
//! assert!(generic.equivalent(&denied)); // symmetric general relation
//! assert!(!generic.strictly_equivalent(&denied)); // generic knows only itself
//! ```
//!
//! ## Storing Codes of Unknown Domains
//!
//! ```rust
//! use polystatus::{ErasedCode, Errc, GenericCode, OsCode, StatusCode};
//!
//! let mixed: Vec<ErasedCode> = vec![
//!     GenericCode::from(Errc::TimedOut).into(),
//!     OsCode::new(0).into(),
//! ];
//! let failures = mixed.iter().filter(|code| code.failure()).count();
//! assert_eq!(failures, 1);
//! ```
//!
//! ## `Result`-Style and Unwind-Style Propagation
//!
//! ```rust
//! use polystatus::{OsCode, StatusError};
//!
//! fn read_config() -> Result<(), StatusError> {
//!     Err(OsCode::new(libc::ENOENT as u32).into_error())
//! }
//! assert!(read_config().is_err());
//! ```
//!
//! Callers that prefer unwinding call [`StatusCode::raise`] explicitly at
//! the boundary where they switch styles; the payload is the same
//! [`StatusError`].
//!
//! ## Defining a Domain
//!
//! Implement [`StatusDomain`] once for a singleton type: pick a
//! [`DomainId`] (hash of a purpose string), a value type, a failure rule,
//! a mapping into [`Errc`], and message rendering. The dynamic dispatch
//! surface, erasure into [`ErasedCode`], and the equivalence protocol come
//! for free.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod code;
pub mod convert;
pub mod domain;
pub mod error;
pub mod generic;
pub mod kernel;
pub mod message;
pub mod os;
mod sys;

pub use code::*;
pub use convert::*;
pub use domain::*;
pub use error::*;
pub use generic::*;
pub use kernel::*;
pub use message::*;
pub use os::*;
