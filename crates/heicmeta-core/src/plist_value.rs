//! Closed value type for decoded property lists.
//!
//! Apple property lists can carry strings, numbers, booleans, dates, raw data,
//! arrays and dictionaries. [`PlistValue`] names each of these explicitly so
//! callers match on variants instead of probing a dynamic type.

use std::collections::BTreeMap;
use std::io::Cursor;
use std::time::SystemTime;

use serde::{Serialize, Serializer};

use crate::metadata::MetadataError;

/// String-keyed dictionary produced by a decode call.
pub type PlistDict = BTreeMap<String, PlistValue>;

/// A single property-list value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlistValue {
    String(String),
    /// Signed and unsigned 64-bit plist integers both fit.
    #[serde(serialize_with = "serialize_integer")]
    Integer(i128),
    Real(f64),
    Boolean(bool),
    #[serde(serialize_with = "serialize_date")]
    Date(SystemTime),
    Data(Vec<u8>),
    Array(Vec<PlistValue>),
    Dictionary(PlistDict),
}

impl PlistValue {
    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            PlistValue::String(_) => "string",
            PlistValue::Integer(_) => "integer",
            PlistValue::Real(_) => "real",
            PlistValue::Boolean(_) => "boolean",
            PlistValue::Date(_) => "date",
            PlistValue::Data(_) => "data",
            PlistValue::Array(_) => "array",
            PlistValue::Dictionary(_) => "dictionary",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i128> {
        match self {
            PlistValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Integer value, if it fits in an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer().and_then(|i| i64::try_from(i).ok())
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            PlistValue::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Any numeric value as `f64`.
    ///
    /// Apple writers are inconsistent about integer versus real encoding for
    /// whole numbers, so readers of numeric fields should prefer this.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PlistValue::Integer(i) => Some(*i as f64),
            PlistValue::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PlistValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<SystemTime> {
        match self {
            PlistValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            PlistValue::Data(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PlistValue]> {
        match self {
            PlistValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&PlistDict> {
        match self {
            PlistValue::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Convert from the `plist` crate's value type.
    pub fn from_plist(value: plist::Value) -> Result<Self, MetadataError> {
        Ok(match value {
            plist::Value::String(s) => PlistValue::String(s),
            plist::Value::Integer(i) => {
                let n = i
                    .as_signed()
                    .map(i128::from)
                    .or_else(|| i.as_unsigned().map(i128::from))
                    .ok_or_else(|| {
                        MetadataError::InvalidPropertyList(format!("integer out of range: {i:?}"))
                    })?;
                PlistValue::Integer(n)
            }
            plist::Value::Real(r) => PlistValue::Real(r),
            plist::Value::Boolean(b) => PlistValue::Boolean(b),
            plist::Value::Date(d) => PlistValue::Date(d.into()),
            plist::Value::Data(d) => PlistValue::Data(d),
            plist::Value::Uid(uid) => PlistValue::Integer(i128::from(uid.get())),
            plist::Value::Array(items) => PlistValue::Array(
                items
                    .into_iter()
                    .map(PlistValue::from_plist)
                    .collect::<Result<_, _>>()?,
            ),
            plist::Value::Dictionary(dict) => PlistValue::Dictionary(dict_from_plist(dict)?),
            other => {
                return Err(MetadataError::InvalidPropertyList(format!(
                    "unsupported value: {other:?}"
                )))
            }
        })
    }

    /// Convert into the `plist` crate's value type.
    ///
    /// Integers outside the 64-bit plist range are written as reals.
    pub fn to_plist(&self) -> plist::Value {
        match self {
            PlistValue::String(s) => plist::Value::String(s.clone()),
            PlistValue::Integer(i) => {
                if let Ok(n) = i64::try_from(*i) {
                    plist::Value::Integer(n.into())
                } else if let Ok(n) = u64::try_from(*i) {
                    plist::Value::Integer(n.into())
                } else {
                    plist::Value::Real(*i as f64)
                }
            }
            PlistValue::Real(r) => plist::Value::Real(*r),
            PlistValue::Boolean(b) => plist::Value::Boolean(*b),
            PlistValue::Date(d) => plist::Value::Date((*d).into()),
            PlistValue::Data(d) => plist::Value::Data(d.clone()),
            PlistValue::Array(items) => {
                plist::Value::Array(items.iter().map(PlistValue::to_plist).collect())
            }
            PlistValue::Dictionary(dict) => plist::Value::Dictionary(dict_to_plist(dict)),
        }
    }
}

impl From<&str> for PlistValue {
    fn from(value: &str) -> Self {
        PlistValue::String(value.to_string())
    }
}

impl From<String> for PlistValue {
    fn from(value: String) -> Self {
        PlistValue::String(value)
    }
}

impl From<i64> for PlistValue {
    fn from(value: i64) -> Self {
        PlistValue::Integer(i128::from(value))
    }
}

impl From<f64> for PlistValue {
    fn from(value: f64) -> Self {
        PlistValue::Real(value)
    }
}

impl From<bool> for PlistValue {
    fn from(value: bool) -> Self {
        PlistValue::Boolean(value)
    }
}

impl From<PlistDict> for PlistValue {
    fn from(value: PlistDict) -> Self {
        PlistValue::Dictionary(value)
    }
}

fn dict_from_plist(dict: plist::Dictionary) -> Result<PlistDict, MetadataError> {
    dict.into_iter()
        .map(|(k, v)| Ok((k, PlistValue::from_plist(v)?)))
        .collect()
}

fn dict_to_plist(dict: &PlistDict) -> plist::Dictionary {
    let mut out = plist::Dictionary::new();
    for (k, v) in dict {
        out.insert(k.clone(), v.to_plist());
    }
    out
}

fn serialize_integer<S: Serializer>(value: &i128, serializer: S) -> Result<S::Ok, S::Error> {
    match i64::try_from(*value) {
        Ok(n) => serializer.serialize_i64(n),
        Err(_) => serializer.serialize_u64(*value as u64),
    }
}

fn serialize_date<S: Serializer>(date: &SystemTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&plist::Date::from(*date).to_xml_format())
}

/// Parse a binary or XML property list whose top level is a dictionary.
pub fn parse_dictionary(bytes: &[u8]) -> Result<PlistDict, MetadataError> {
    let value = plist::Value::from_reader(Cursor::new(bytes))
        .map_err(|e| MetadataError::InvalidPropertyList(e.to_string()))?;
    match PlistValue::from_plist(value)? {
        PlistValue::Dictionary(dict) => Ok(dict),
        other => Err(MetadataError::InvalidPropertyList(format!(
            "top-level value is a {}, not a dictionary",
            other.type_name()
        ))),
    }
}

/// Serialize a dictionary as a binary property list.
pub fn write_binary(dict: &PlistDict) -> Result<Vec<u8>, MetadataError> {
    let mut buf = Vec::new();
    plist::Value::Dictionary(dict_to_plist(dict))
        .to_writer_binary(&mut buf)
        .map_err(|e| MetadataError::InvalidPropertyList(e.to_string()))?;
    Ok(buf)
}
