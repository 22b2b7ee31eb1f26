//! Lenient cell parsing for numeric columns.
//!
//! Spreadsheet exports format money as text: `" $32,370.00 "`,
//! `" $(4,533.75)"` for negatives and `" $-   "` for zero. The deserializers
//! here accept those alongside plain numbers so CSV, JSON and Parquet inputs
//! all land in the same `Record` fields.

use std::fmt;

use serde::de::{self, Deserializer, Unexpected, Visitor};

/// Parse a money cell. Returns `None` when the text is not a number.
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return None;
    }
    if cleaned == "-" {
        return Some(0.0);
    }
    if let Some(inner) = cleaned.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        return inner.parse::<f64>().ok().map(|v| -v);
    }
    cleaned.parse::<f64>().ok()
}

/// Parse an integer cell, tolerating surrounding whitespace.
pub fn parse_integer(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

// ---------------------------------------------------------------------------
// serde adapters
// ---------------------------------------------------------------------------

pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(AmountVisitor)
}

pub fn integer<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = deserializer.deserialize_any(IntegerVisitor)?;
    T::try_from(value).map_err(|_| {
        <D::Error as de::Error>::invalid_value(Unexpected::Signed(value), &"an integer in range")
    })
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or currency-formatted text")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        parse_amount(v).ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
    }
}

struct IntegerVisitor;

impl<'de> Visitor<'de> for IntegerVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        // Whole floats show up when a spreadsheet stores the year as 2014.0.
        if v.is_finite() && v.fract() == 0.0 {
            Ok(v as i64)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        parse_integer(v).ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
    }
}
