//! Three-state optional fields for partial JSON payloads
//!
//! Update endpoints distinguish "leave unchanged" (key absent) from "clear"
//! (`null`) and "set" (a value). `Option<T>` can only express two of those.
//!
//! ```rust
//! use baas_client::Field;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Patch {
//!     #[serde(skip_serializing_if = "Field::is_missing")]
//!     name: Field<String>,
//!     #[serde(skip_serializing_if = "Field::is_missing")]
//!     nickname: Field<String>,
//! }
//!
//! let patch = Patch { name: "Ops".to_string().into(), nickname: Field::Null };
//! assert_eq!(
//!     serde_json::to_string(&patch).unwrap(),
//!     r#"{"name":"Ops","nickname":null}"#
//! );
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A JSON field that may be absent, explicitly `null`, or set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field<T> {
    /// The key is not present
    Missing,
    /// The key is present with a `null` value
    Null,
    /// The key is present with a value
    Value(T),
}

impl<T> Field<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_present(&self) -> bool {
        !self.is_missing()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Collapse to an `Option`, losing the missing/null distinction
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Self::Missing => Field::Missing,
            Self::Null => Field::Null,
            Self::Value(v) => Field::Value(v),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Field<U> {
        match self {
            Self::Missing => Field::Missing,
            Self::Null => Field::Null,
            Self::Value(v) => Field::Value(f(v)),
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Only reached when the caller forgot `skip_serializing_if`
            Self::Missing | Self::Null => serializer.serialize_none(),
            Self::Value(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Into::into)
    }
}
