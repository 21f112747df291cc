//! Canonical JSON and content-addressed message ids
//!
//! Signatures and receipts are computed over the JSON text of an object, so
//! the exact text matters. Canonical form is `JSON.stringify(value, null, 2)`:
//! two-space indent, keys in insertion order, and numbers printed the way
//! `Number.prototype.toString` prints them (`0.000001`, `1e+21`,
//! `123456789012345680000`). Floats are parsed with `float_roundtrip`, so a
//! received number prints back to the same text.

use std::{fmt, io, num::FpCategory};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use serde_json::{
    Map, Serializer, Value,
    ser::{Formatter, PrettyFormatter},
};

use crate::hash::hash;

/// JSON object with insertion-ordered keys.
pub type JsonObject = Map<String, Value>;

const MESSAGE_SIGIL: char = '%';
const MESSAGE_SUFFIX: &str = ".sha256";

/// Largest decimal exponent printed without exponent notation
const MAX_PLAIN_EXPONENT: i32 = 21;

/// Smallest decimal exponent printed without exponent notation
const MIN_PLAIN_EXPONENT: i32 = -6;

/// Render a value as canonical JSON text.
pub fn to_canonical_json(value: &Value) -> String {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, EcmaFormatter::default());

    let Ok(()) = value.serialize(&mut serializer) else {
        unreachable!("serializing a JSON value cannot fail");
    };
    let Ok(json) = String::from_utf8(out) else {
        unreachable!("serde_json emits UTF-8");
    };
    json
}

/// Two-space pretty printer with ECMAScript number formatting.
#[derive(Default)]
struct EcmaFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl Formatter for EcmaFormatter<'_> {
    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(ecma_number(value).as_bytes())
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }
}

/// `Number.prototype.toString` for a finite double.
///
/// Shortest round-trip digits, plain decimal for decimal exponents
/// `-6..=21`, exponent notation with an explicit sign otherwise.
fn ecma_number(value: f64) -> String {
    match value.classify() {
        FpCategory::Nan | FpCategory::Infinite => return "null".to_string(),
        FpCategory::Zero => return "0".to_string(),
        FpCategory::Normal | FpCategory::Subnormal => {},
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };

    // Shortest round-trip form, e.g. `1.2345e-7`
    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        unreachable!("exponent formatting always contains 'e'");
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        unreachable!("exponent formatting always ends in an integer");
    };

    let digits: String = mantissa.chars().filter(|&c| c != '.').collect();
    let k = digits.len() as i32;
    // Decimal point sits after `n` digits
    let n = exponent + 1;

    if k <= n && n <= MAX_PLAIN_EXPONENT {
        format!("{sign}{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= MAX_PLAIN_EXPONENT {
        let (int, frac) = digits.split_at(n as usize);
        format!("{sign}{int}.{frac}")
    } else if MIN_PLAIN_EXPONENT < n && n <= 0 {
        format!("{sign}0.{}{digits}", "0".repeat(n.unsigned_abs() as usize))
    } else {
        let exp_sign = if n - 1 < 0 { '-' } else { '+' };
        let exp = (n - 1).unsigned_abs();
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{sign}{lead}e{exp_sign}{exp}")
        } else {
            format!("{sign}{lead}.{rest}e{exp_sign}{exp}")
        }
    }
}

/// Content-addressed id of a message: `%<base64 sha256>.sha256`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Wire form of the id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the id of a message from its canonical JSON.
///
/// The hashed bytes use the legacy single-byte text encoding: every UTF-16
/// code unit is truncated to its low byte. ASCII text hashes exactly as its
/// UTF-8 form; other characters collide with their low-byte equivalents, which
/// existing ids already depend on.
pub fn message_id(message: &Value) -> MessageId {
    let json = to_canonical_json(message);
    let bytes: Vec<u8> = json.encode_utf16().map(|unit| unit as u8).collect();

    MessageId(format!("{MESSAGE_SIGIL}{}{MESSAGE_SUFFIX}", STANDARD.encode(hash(bytes))))
}
