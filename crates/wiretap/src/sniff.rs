//! Body sniffing: deciding whether captured bytes are safe to report as
//! text.
//!
//! The heuristic is deliberately cheap and bounded: it looks at a short
//! prefix of an already-buffered body and never touches the original
//! buffer. A failed decode is a classification signal, not an error: the
//! body is reported as binary and the exchange proceeds untouched.

use encoding_rs::{Encoding, UTF_8};
use mime::Mime;

/// Longest prefix inspected when sniffing.
const PEEK_BYTES: usize = 64;

/// Code points examined within the prefix.
const PEEK_CODE_POINTS: usize = 16;

/// Heuristic plaintext test for a captured body.
///
/// Only bodies whose media type has primary type `text` or subtype `json`
/// qualify at all; everything else (including an absent media type) is
/// binary without inspection. For candidates, up to 16 code points are
/// decoded from the first 64 bytes. A non-whitespace control character, or
/// a malformed/truncated sequence before enough code points were seen,
/// marks the body binary.
pub fn is_plaintext(media_type: Option<&Mime>, body: &[u8]) -> bool {
    let Some(media_type) = media_type else {
        return false;
    };
    if media_type.type_() != mime::TEXT && media_type.subtype() != mime::JSON {
        return false;
    }

    let prefix = &body[..body.len().min(PEEK_BYTES)];
    let (valid, complete) = match std::str::from_utf8(prefix) {
        Ok(text) => (text, true),
        Err(err) => {
            let valid = std::str::from_utf8(&prefix[..err.valid_up_to()]).unwrap_or_default();
            (valid, false)
        }
    };

    let mut decoded = 0;
    for ch in valid.chars().take(PEEK_CODE_POINTS) {
        if ch.is_control() && !ch.is_whitespace() {
            return false;
        }
        decoded += 1;
    }

    decoded == PEEK_CODE_POINTS || complete
}

/// Charset for decoding a body in full: the media type's declared charset
/// when recognized, UTF-8 otherwise.
pub fn charset(media_type: Option<&Mime>) -> &'static Encoding {
    media_type
        .and_then(|mt| mt.get_param(mime::CHARSET))
        .and_then(|cs| Encoding::for_label(cs.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode a full body with its declared charset, substituting replacement
/// characters for malformed sequences rather than failing.
pub fn decode_body(media_type: Option<&Mime>, body: &[u8]) -> String {
    let (text, _, _) = charset(media_type).decode(body);
    text.into_owned()
}
