//! The shareable fragment encoding
//!
//! A configuration is serialized as compact JSON and percent-encoded so the
//! result is safe to paste anywhere a URL fragment would go. Decoding is
//! deliberately forgiving: recognized fields are merged onto the defaults
//! one at a time, so a corrupted or partial shared link still loads a
//! usable configuration.

use std::fmt;

use serde_json::Value;

use crate::config::Configuration;

/// Why a fragment could not be decoded at all.
///
/// Field-level junk never produces an error; these cover fragments that are
/// not even a percent-encoded JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` escape was truncated or not valid hex, or the decoded bytes
    /// were not UTF-8
    BadEscape,
    /// The decoded text was not parseable JSON
    Syntax(String),
    /// The decoded JSON was not an object
    NotAnObject,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::BadEscape => write!(f, "Invalid percent escape in fragment"),
            DecodeError::Syntax(message) => write!(f, "Fragment is not valid JSON: {}", message),
            DecodeError::NotAnObject => write!(f, "Fragment does not encode an object"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Encode a configuration as a percent-encoded JSON fragment.
///
/// Deterministic, and round-trips through [`decode`].
pub fn encode(config: &Configuration) -> String {
    // plain struct of enums and integers; serialization cannot fail
    let json = serde_json::to_string(config).expect("configuration serializes to JSON");
    percent_encode(&json)
}

/// Decode a fragment, merging recognized fields onto the defaults.
///
/// A field that is missing, mistyped, out of its enum, or non-positive
/// falls back to that field's default. Only a fragment that is not a
/// percent-encoded JSON object at all is an error.
pub fn decode(fragment: &str) -> Result<Configuration, DecodeError> {
    let text = percent_decode(fragment)?;
    let value: Value =
        serde_json::from_str(&text).map_err(|err| DecodeError::Syntax(err.to_string()))?;
    let fields = value.as_object().ok_or(DecodeError::NotAnObject)?;

    let mut config = Configuration::default();

    if let Some(initial) = fields.get("initial") {
        if let Ok(initial) = serde_json::from_value(initial.clone()) {
            config.initial = initial;
        }
    }

    if let Some(size) = fields.get("size").and_then(Value::as_u64) {
        if size >= 1 {
            config.size = size as usize;
        }
    }

    if let Some(budget) = fields.get("stepTimeBudgetMs").and_then(Value::as_u64) {
        if budget >= 1 {
            config.step_time_budget_ms = budget;
        }
    }

    if let Some(algorithm) = fields.get("algorithm") {
        if let Ok(algorithm) = serde_json::from_value(algorithm.clone()) {
            config.algorithm = algorithm;
        }
    }

    Ok(config)
}

/// Boundary helper: any decode failure collapses to the defaults.
pub fn decode_or_default(fragment: &str) -> Configuration {
    decode(fragment).unwrap_or_default()
}

fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                out.push('%');
                out.push(HEX[(byte >> 4) as usize] as char);
                out.push(HEX[(byte & 0x0f) as usize] as char);
            }
        }
    }

    out
}

const HEX: &[u8; 16] = b"0123456789ABCDEF";

fn percent_decode(input: &str) -> Result<String, DecodeError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3).ok_or(DecodeError::BadEscape)?;
            let hex = std::str::from_utf8(hex).map_err(|_| DecodeError::BadEscape)?;
            let value = u8::from_str_radix(hex, 16).map_err(|_| DecodeError::BadEscape)?;
            out.push(value);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(out).map_err(|_| DecodeError::BadEscape)
}
