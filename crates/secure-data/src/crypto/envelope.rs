//! Textual envelope: `base64(iv):base64(tag):base64(ciphertext)`.

use base64::{
    alphabet,
    engine::{
        general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD},
        DecodePaddingMode,
    },
    Engine as _,
};
use common::SecureDataError;

/// Separator between the three envelope segments.
pub const DELIMITER: char = ':';

/// Number of segments in a well-formed envelope.
pub const SEGMENT_COUNT: usize = 3;

/// Decoder that tolerates missing padding, as the writers of older stored
/// envelopes did. Non-zero trailing bits are rejected: each decoded byte
/// string has a single accepted spelling apart from its padding.
const DECODER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A parsed envelope.
///
/// Segment lengths are not checked here: an IV or tag of the wrong size is an
/// authentication failure, decided by the cipher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Raw initialisation vector bytes.
    pub iv: Vec<u8>,
    /// Raw GCM authentication tag bytes.
    pub tag: Vec<u8>,
    /// Raw ciphertext bytes (same length as the plaintext).
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Encode this value to its canonical string representation.
    pub fn encode(&self) -> String {
        format!(
            "{}{DELIMITER}{}{DELIMITER}{}",
            STANDARD.encode(&self.iv),
            STANDARD.encode(&self.tag),
            STANDARD.encode(&self.ciphertext),
        )
    }

    /// Parse an envelope string.
    ///
    /// # Errors
    ///
    /// Returns [`SecureDataError::Format`] unless `s` splits into exactly
    /// three segments of standard base64 characters, each holding at least
    /// one data character. A segment made of those characters that still
    /// fails to decode (misplaced padding, non-zero trailing bits) has been
    /// corrupted and returns [`SecureDataError::Authentication`].
    pub fn parse(s: &str) -> Result<Self, SecureDataError> {
        let parts: Vec<&str> = s.split(DELIMITER).collect();
        if parts.len() != SEGMENT_COUNT {
            return Err(SecureDataError::Format(format!(
                "expected {SEGMENT_COUNT} segments, got {}",
                parts.len()
            )));
        }
        Ok(Self {
            iv: decode_segment(parts[0], "iv")?,
            tag: decode_segment(parts[1], "tag")?,
            ciphertext: decode_segment(parts[2], "ciphertext")?,
        })
    }
}

fn decode_segment(segment: &str, name: &str) -> Result<Vec<u8>, SecureDataError> {
    if segment.is_empty() {
        return Err(SecureDataError::Format(format!("{name} segment is empty")));
    }
    let charset_ok = segment.bytes().all(|b| is_base64_data(b) || b == b'=');
    if !charset_ok || !segment.bytes().any(is_base64_data) {
        return Err(SecureDataError::Format(format!("{name} segment is not base64")));
    }
    DECODER
        .decode(segment)
        .map_err(|_| SecureDataError::Authentication)
}

fn is_base64_data(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'+' || b == b'/'
}

/// Returns `true` if `s` has the shape of an envelope: three non-empty
/// segments, each matching `[A-Za-z0-9+/]+=*`.
///
/// Only the shape is checked; a `true` result says nothing about whether the
/// envelope decrypts.
pub fn is_valid_envelope_format(s: &str) -> bool {
    let parts: Vec<&str> = s.split(DELIMITER).collect();
    parts.len() == SEGMENT_COUNT && parts.iter().all(|p| is_base64_segment(p))
}

fn is_base64_segment(segment: &str) -> bool {
    let body = segment.trim_end_matches('=');
    !body.is_empty() && body.bytes().all(is_base64_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Envelope {
        Envelope {
            iv: vec![1u8; 16],
            tag: vec![2u8; 16],
            ciphertext: b"hello".to_vec(),
        }
    }

    #[test]
    fn encode_uses_padded_standard_base64() {
        let s = sample().encode();
        assert_eq!(
            s,
            "AQEBAQEBAQEBAQEBAQEBAQ==:AgICAgICAgICAgICAgICAg==:aGVsbG8="
        );
        assert!(is_valid_envelope_format(&s));
    }

    #[test]
    fn parse_inverts_encode() {
        let env = sample();
        assert_eq!(Envelope::parse(&env.encode()).unwrap(), env);
    }

    #[test]
    fn parse_accepts_unpadded_segments() {
        let env = Envelope::parse("AQEBAQEBAQEBAQEBAQEBAQ:AgICAgICAgICAgICAgICAg:aGVsbG8").unwrap();
        assert_eq!(env, sample());
    }

    #[test]
    fn wrong_segment_counts_are_format_errors() {
        for s in ["abcd", "abcd:abcd", "abcd:abcd:abcd:abcd", "a:b:c:d:e"] {
            assert!(
                matches!(Envelope::parse(s), Err(SecureDataError::Format(_))),
                "{s} should be rejected"
            );
        }
    }

    #[test]
    fn empty_segment_is_format_error() {
        assert!(matches!(
            Envelope::parse("::"),
            Err(SecureDataError::Format(_))
        ));
        assert!(matches!(
            Envelope::parse("AQEB::aGVsbG8="),
            Err(SecureDataError::Format(_))
        ));
    }

    #[test]
    fn non_base64_segment_is_format_error() {
        assert!(matches!(
            Envelope::parse("AQEB:!!!!:aGVsbG8="),
            Err(SecureDataError::Format(_))
        ));
        // URL-safe alphabet is not accepted.
        assert!(matches!(
            Envelope::parse("AQEB:AgIC:aGV-bG8_"),
            Err(SecureDataError::Format(_))
        ));
    }

    #[test]
    fn padding_only_segment_is_format_error() {
        assert!(matches!(
            Envelope::parse("AQEB:====:aGVsbG8="),
            Err(SecureDataError::Format(_))
        ));
    }

    #[test]
    fn non_zero_trailing_bits_are_authentication_errors() {
        // `Q` and `R` differ only in bits that fall past the 16th tag byte.
        assert_eq!(
            Envelope::parse("AQEBAQEBAQEBAQEBAQEBAR==:AgICAgICAgICAgICAgICAg==:aGVsbG8=")
                .unwrap_err(),
            SecureDataError::Authentication
        );
        assert_eq!(
            Envelope::parse("AQEBAQEBAQEBAQEBAQEBAQ==:AgICAgICAgICAgICAgICAh==:aGVsbG8=")
                .unwrap_err(),
            SecureDataError::Authentication
        );
        assert_eq!(
            Envelope::parse("AQEBAQEBAQEBAQEBAQEBAQ==:AgICAgICAgICAgICAgICAg==:aGVsbG9=")
                .unwrap_err(),
            SecureDataError::Authentication
        );
    }

    #[test]
    fn misplaced_padding_is_authentication_error() {
        assert_eq!(
            Envelope::parse("AQEBAQEBAQEBAQEBAQEBAQ==:AgICAgICAgICAgICAgICAg=A:aGVsbG8=")
                .unwrap_err(),
            SecureDataError::Authentication
        );
    }

    #[test]
    fn format_check_rejects_bad_shapes() {
        assert!(!is_valid_envelope_format(""));
        assert!(!is_valid_envelope_format("abc"));
        assert!(!is_valid_envelope_format("abc:def"));
        assert!(!is_valid_envelope_format("abc::def"));
        assert!(!is_valid_envelope_format("abc:def:ghi:jkl"));
        assert!(!is_valid_envelope_format("abc:d-f:ghi"));
        assert!(!is_valid_envelope_format("abc:==:ghi"));
        assert!(!is_valid_envelope_format("abc:d=f:ghi"));
    }

    #[test]
    fn format_check_accepts_padding() {
        assert!(is_valid_envelope_format("abc=:de+/==:XYZ9"));
    }
}
