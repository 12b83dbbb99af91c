use core::fmt::{self, Write};

use crate::hex::to_hex;
use crate::value::Value;

/// Renders the value in RFC 8949 diagnostic notation, e.g. `{"a": 1, h'0102': [true]}`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Unsigned(v) => write!(f, "{v}"),
            Self::Negative(n) => write!(f, "{}", -1 - i128::from(*n)),
            Self::Float(v) => write_float(f, *v),
            Self::Bytes(b) => write!(f, "h'{}'", to_hex(b)),
            Self::Text(s) => write_text(f, s),
            Self::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Self::Map(pairs) => {
                f.write_char('{')?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_char('}')
            }
            Self::Tag(tag, inner) => write!(f, "{tag}({inner})"),
        }
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        f.write_str("NaN")
    } else if v.is_infinite() {
        f.write_str(if v.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        })
    } else {
        // Debug keeps the fractional part (`1.0`), which separates floats from integers.
        write!(f, "{v:?}")
    }
}

fn write_text(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c.is_control() => write!(f, "\\u{:04x}", u32::from(c))?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}
