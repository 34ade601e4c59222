//! Platform message rendering for raw status words.
//!
//! The one external call in the crate: turning a numeric code into the
//! platform's human-readable text. The contract is fail-safe — whatever
//! goes wrong (no message for the code, allocation pressure, a renderer
//! that keeps demanding more room), the caller gets either real text or
//! the fixed [`FALLBACK`] string. Describing a failure must never itself
//! produce a failure.

use smallvec::{SmallVec, smallvec};

use crate::message::MessageRef;

/// Returned when the platform cannot produce a message. Static: taking
/// the fallback path performs no allocation.
pub(crate) const FALLBACK: &str = "failed to get message from system";

/// First buffer size offered to a renderer.
const INITIAL_CAPACITY: usize = 128;

/// Renderers demanding more than this are treated as unavailable.
const MAX_CAPACITY: usize = 1 << 16;

/// One attempt by a renderer to fill the offered buffer.
pub(crate) enum Render {
    /// The message occupies the first `n` bytes of the buffer.
    Filled(usize),
    /// The buffer is too small; offer a bigger one.
    BufferTooSmall,
    /// No message exists for this code.
    Unavailable,
}

/// Drive a renderer to completion.
///
/// Grows the offered buffer geometrically (×1.25, as close as integer
/// arithmetic gets) on [`Render::BufferTooSmall`], up to [`MAX_CAPACITY`].
/// The result is transcoded as UTF-8 (lossily) and trailing line endings
/// are trimmed. Zero-length results count as failures.
pub(crate) fn render_with<F>(mut render: F) -> MessageRef
where
    F: FnMut(&mut [u8]) -> Render,
{
    let mut capacity = INITIAL_CAPACITY;
    while capacity <= MAX_CAPACITY {
        let mut buf: SmallVec<[u8; 256]> = smallvec![0; capacity];
        match render(&mut buf) {
            Render::Filled(len) => {
                let len = len.min(buf.len());
                let text = String::from_utf8_lossy(&buf[..len]);
                let text = text.trim_end_matches(['\r', '\n']);
                if text.is_empty() {
                    break;
                }
                return MessageRef::shared(text);
            }
            Render::BufferTooSmall => capacity += capacity / 4,
            Render::Unavailable => break,
        }
    }
    MessageRef::from_static(FALLBACK)
}

/// Render the platform's message for an errno-namespace word.
#[cfg(unix)]
pub(crate) fn errno_message(errno: i32) -> MessageRef {
    use std::io;

    render_with(|buf| {
        let rc = unsafe { libc::strerror_r(errno, buf.as_mut_ptr().cast::<libc::c_char>(), buf.len()) };
        match rc {
            0 => match buf.iter().position(|&b| b == 0) {
                Some(0) | None => Render::Unavailable,
                Some(len) => Render::Filled(len),
            },
            libc::ERANGE => Render::BufferTooSmall,
            // Some libcs report through errno with a -1 return instead.
            -1 if io::Error::last_os_error().raw_os_error() == Some(libc::ERANGE) => {
                Render::BufferTooSmall
            }
            _ => Render::Unavailable,
        }
    })
}

#[cfg(not(unix))]
pub(crate) fn errno_message(_errno: i32) -> MessageRef {
    MessageRef::from_static(FALLBACK)
}

/// Render a message for a kernel status word through its errno image.
///
/// The kernel side of the renderer seam: a separate entry point from
/// [`errno_message`] so the two domains query distinct sources, even
/// though on this platform both resolve in the errno namespace. The
/// `u32::MAX` sentinel (no errno image) short-circuits to the fallback.
pub(crate) fn kernel_message(errno_image: u32) -> MessageRef {
    if errno_image == u32::MAX {
        return MessageRef::from_static(FALLBACK);
    }
    errno_message(errno_image as i32)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_output_is_trimmed_and_shared() {
        let msg = render_with(|buf| {
            let text = b"permission denied\r\n";
            buf[..text.len()].copy_from_slice(text);
            Render::Filled(text.len())
        });
        assert_eq!(msg, "permission denied");
        assert!(msg.is_shared());
    }

    #[test]
    fn buffer_grows_geometrically_until_it_fits() {
        let mut offered = Vec::new();
        let msg = render_with(|buf| {
            offered.push(buf.len());
            if buf.len() < 400 {
                Render::BufferTooSmall
            } else {
                buf[..2].copy_from_slice(b"ok");
                Render::Filled(2)
            }
        });
        assert_eq!(msg, "ok");
        // 128 → 160 → 200 → 250 → 312 → 390 → 487
        assert!(offered.len() > 2);
        for pair in offered.windows(2) {
            assert_eq!(pair[1], pair[0] + pair[0] / 4);
        }
    }

    #[test]
    fn zero_length_result_falls_back_to_the_fixed_string() {
        let msg = render_with(|_| Render::Filled(0));
        assert_eq!(msg, FALLBACK);
        assert!(!msg.is_shared());
    }

    #[test]
    fn unavailable_falls_back_to_the_fixed_string() {
        let msg = render_with(|_| Render::Unavailable);
        assert_eq!(msg, FALLBACK);
        assert!(!msg.is_shared());
    }

    #[test]
    fn insatiable_renderer_falls_back_instead_of_spinning() {
        let mut calls = 0usize;
        let msg = render_with(|_| {
            calls += 1;
            Render::BufferTooSmall
        });
        assert_eq!(msg, FALLBACK);
        assert!(calls > 0 && calls < 64);
    }

    #[cfg(unix)]
    #[test]
    fn real_errno_words_render_real_text() {
        let msg = errno_message(libc::EACCES);
        assert!(!msg.is_empty());
        assert_ne!(msg.as_str(), FALLBACK);
        assert!(!msg.ends_with('\n'));
    }

    #[test]
    fn kernel_sentinel_never_reaches_the_platform() {
        assert_eq!(kernel_message(u32::MAX), FALLBACK);
    }
}
