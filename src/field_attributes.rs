//! Lenient `deserialize_with` helpers for the mobile client's JSON bodies.
//!
//! Fields are stored the way they arrive: a number where text was expected is
//! kept as its decimal text, and a 0/1 where a flag was expected is a flag.
//! Use together with `#[serde(default)]` so absent fields stay `None`.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Text column: accepts a string, number or bool.
pub fn deserialize_option_string_from_scalar<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => None,
        Some(Scalar::Str(s)) => Some(s),
        Some(Scalar::Int(i)) => Some(i.to_string()),
        Some(Scalar::Float(f)) => Some(format!("{:?}", f)),
        Some(Scalar::Bool(b)) => Some(i32::from(b).to_string()),
    })
}

/// Notification flag: accepts a bool or a number, non-zero meaning set.
pub fn deserialize_option_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Bool(b)) => Ok(Some(b)),
        Some(Scalar::Int(i)) => Ok(Some(i != 0)),
        Some(Scalar::Float(f)) => Ok(Some(f != 0.0)),
        Some(Scalar::Str(s)) => match s.as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            other => Err(D::Error::custom(format!("{} is not a flag", other))),
        },
    }
}

/// Integer column: accepts an integer, an integer-valued float or a numeric string.
pub fn deserialize_option_integer<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Scalar>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Scalar::Int(i)) => i,
        Some(Scalar::Float(f)) if f.fract() == 0.0 => f as i64,
        Some(Scalar::Str(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| D::Error::custom(format!("{}: {}", s, e)))?,
        Some(Scalar::Float(f)) => {
            return Err(D::Error::custom(format!("{} is not a whole number", f)))
        }
        Some(Scalar::Bool(b)) => i64::from(b),
    };
    i32::try_from(value)
        .map(Some)
        .map_err(|_| D::Error::custom(format!("{} is out of range", value)))
}
