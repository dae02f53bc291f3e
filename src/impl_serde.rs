#![cfg_attr(docsrs, doc(cfg(feature = "serde")))]

//! Provides [`serde`] support for [`Value`], [`Table`] and [`Spanned`].
//!
//! Serialization writes table keys in sorted order. Deserialization accepts
//! strings, integers that fit an `i64`, booleans, sequences and maps; floats,
//! unit and other data are rejected.
//!
//! # Examples
//!
//! ```
//! let table = toml_tree::parse("[server]\nport = 8080\n")?;
//! let json = serde_json::to_string(&table).unwrap();
//! assert_eq!(json, r#"{"server":{"port":8080}}"#);
//! # Ok::<(), toml_tree::Error>(())
//! ```

use crate::{Spanned, Table, Value};
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use std::fmt;

impl<T> serde::Serialize for Spanned<T>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::String(s) => ser.serialize_str(s),
            Value::Integer(i) => ser.serialize_i64(*i),
            Value::Boolean(b) => ser.serialize_bool(*b),
            Value::Array(arr) => {
                let mut seq = ser.serialize_seq(Some(arr.len()))?;
                for ele in arr {
                    seq.serialize_element(ele)?;
                }
                seq.end()
            }
            Value::Table(tab) => tab.serialize(ser),
        }
    }
}

impl serde::Serialize for Table {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = ser.serialize_map(Some(self.len()))?;
        for key in self.sorted_keys() {
            if let Some(value) = self.get(key) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, integer, boolean, array or table")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        match i64::try_from(v) {
            Ok(i) => Ok(Value::Integer(i)),
            Err(_) => Err(E::invalid_value(de::Unexpected::Unsigned(v), &"an i64")),
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        TableVisitor.visit_map(map).map(Value::Table)
    }
}

impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct TableVisitor;

impl<'de> Visitor<'de> for TableVisitor {
    type Value = Table;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Table, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut table = Table::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            if table.contains_key(&key) {
                return Err(de::Error::custom(format_args!("duplicate key: `{key}`")));
            }
            table.insert(key, value);
        }
        Ok(table)
    }
}

impl<'de> serde::Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(TableVisitor)
    }
}

#[cfg(test)]
#[path = "./impl_serde_tests.rs"]
mod tests;
