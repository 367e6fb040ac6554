//! Structural validation of data URIs.
//!
//! Content parsing is the concern of downstream consumers; the import
//! pipeline only needs to decide whether an input is a plausible
//! ethscription payload at all.

use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Whether the given string has the shape of a data URI:
/// `data:[mediatype][;parameter=value...][;base64],payload`.
///
/// The mediatype, when present, must be a `type/subtype` pair. A `;base64`
/// marker additionally requires the payload to decode as base64.
pub fn is_valid_data_uri(uri: &str) -> bool {
    let Some(rest) = uri.strip_prefix("data:") else {
        return false;
    };

    let Some((header, payload)) = rest.split_once(',') else {
        return false;
    };

    let mut parts = header.split(';');

    // First segment is the mediatype, which may be empty.
    let mediatype = parts.next().unwrap_or_default();
    if !mediatype.is_empty() {
        match mediatype.split_once('/') {
            Some((kind, subtype)) if !kind.is_empty() && !subtype.is_empty() => {}
            _ => return false,
        }
    }

    let mut base64_marked = false;
    for part in parts {
        if base64_marked {
            // ";base64" is only valid as the final marker.
            return false;
        }
        if part == "base64" {
            base64_marked = true;
            continue;
        }
        match part.split_once('=') {
            Some((key, _)) if !key.is_empty() => {}
            _ => return false,
        }
    }

    if base64_marked && STANDARD.decode(payload).is_err() {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_payload_is_valid() {
        assert!(is_valid_data_uri("data:,test"));
        assert!(is_valid_data_uri("data:,"));
    }

    #[test]
    fn mediatype_and_parameters() {
        assert!(is_valid_data_uri("data:text/plain,hello"));
        assert!(is_valid_data_uri("data:text/plain;charset=utf-8,hello"));
        assert!(is_valid_data_uri("data:application/json,{\"a\":1}"));
    }

    #[test]
    fn base64_payload_must_decode() {
        assert!(is_valid_data_uri("data:image/png;base64,aGVsbG8="));
        assert!(is_valid_data_uri("data:;base64,aGVsbG8="));
        assert!(!is_valid_data_uri("data:image/png;base64,!!!"));
    }

    #[test]
    fn malformed_uris_are_rejected() {
        assert!(!is_valid_data_uri("test"));
        assert!(!is_valid_data_uri("data:"));
        assert!(!is_valid_data_uri("data:text/plain"));
        assert!(!is_valid_data_uri("data:xyz,payload"));
        assert!(!is_valid_data_uri("data:/plain,payload"));
        assert!(!is_valid_data_uri("data:text/plain;;base64x,payload"));
        assert!(!is_valid_data_uri("data:text/plain;base64;charset=utf-8,payload"));
    }
}
