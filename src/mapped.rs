//! Struct codec: typed entities to and from XML-RPC structs.
//!
//! Every entity declares one ordered table of `"wireKey" => field: Type as rule`
//! entries through [`xmlrpc_struct!`]. Decoding walks the table and leaves
//! absent keys at their default; encoding writes every key back, defaults
//! included, in table order.

use crate::error::Result;
use crate::xmlrpc::encoding::Struct;

/// The capability of being carried as an XML-RPC struct.
pub trait XmlRpcMapped: Sized + Default {
    const KIND: EntityKind;
    /// Wire keys, in encoding order.
    const FIELDS: &'static [&'static str];

    fn from_struct(members: &Struct) -> Result<Self>;
    fn to_struct(&self) -> Struct;
}

/// Every entity variant the codec knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Page,
    PageDefinition,
    Category,
    Author,
    User,
    Blog,
    MediaObject,
    Attachment,
    Ping,
    PostAndPageStatus,
    CustomField,
}

impl EntityKind {
    pub const ALL: [EntityKind; 11] = [
        EntityKind::Page,
        EntityKind::PageDefinition,
        EntityKind::Category,
        EntityKind::Author,
        EntityKind::User,
        EntityKind::Blog,
        EntityKind::MediaObject,
        EntityKind::Attachment,
        EntityKind::Ping,
        EntityKind::PostAndPageStatus,
        EntityKind::CustomField,
    ];
}

/// Defines an entity struct together with its wire field table.
macro_rules! xmlrpc_struct {
    (
        $(#[$meta:meta])*
        $kind:ident => pub struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $key:literal => $field:ident : $ty:ty as $rule:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $crate::mapped::XmlRpcMapped for $name {
            const KIND: $crate::mapped::EntityKind = $crate::mapped::EntityKind::$kind;
            const FIELDS: &'static [&'static str] = &[$($key),*];

            fn from_struct(
                members: &$crate::xmlrpc::encoding::Struct,
            ) -> $crate::error::Result<Self> {
                let mut entity = Self::default();
                $(
                    if let Some(value) = members.get($key) {
                        entity.$field = $crate::mapped::rule::$rule::decode($key, value)?;
                    }
                )*
                Ok(entity)
            }

            fn to_struct(&self) -> $crate::xmlrpc::encoding::Struct {
                let mut members = $crate::xmlrpc::encoding::Struct::new();
                $(
                    if let Some(value) = $crate::mapped::rule::$rule::encode(&self.$field) {
                        members.insert($key.to_string(), value);
                    }
                )*
                members
            }
        }
    };
}

/// Conversion rules a field table can name, one module per rule.
///
/// `decode` fails with `TypeMismatch` when the wire type is not the modelled one.
pub mod rule {
    use crate::error::{Error, Result};
    use crate::xmlrpc::encoding::Value;

    pub mod string {
        use super::*;

        pub fn decode(field: &str, value: &Value) -> Result<String> {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| Error::mismatch(field, "string", value.type_name()))
        }

        pub fn encode(field: &String) -> Option<Value> {
            Some(Value::String(field.clone()))
        }
    }

    pub mod int {
        use super::*;

        pub fn decode(field: &str, value: &Value) -> Result<i32> {
            value
                .as_i32()
                .ok_or_else(|| Error::mismatch(field, "int", value.type_name()))
        }

        pub fn encode(field: &i32) -> Option<Value> {
            Some(Value::Int(*field))
        }
    }

    pub mod double {
        use super::*;

        pub fn decode(field: &str, value: &Value) -> Result<f64> {
            value
                .as_f64()
                .ok_or_else(|| Error::mismatch(field, "double", value.type_name()))
        }
    }

    pub mod boolean {
        use super::*;

        pub fn decode(field: &str, value: &Value) -> Result<bool> {
            value
                .as_bool()
                .ok_or_else(|| Error::mismatch(field, "boolean", value.type_name()))
        }

        pub fn encode(field: &bool) -> Option<Value> {
            Some(Value::Boolean(*field))
        }
    }

    /// Optional date; the only rule that may leave its key out when encoding.
    pub mod date {
        use super::*;
        use time::PrimitiveDateTime;

        pub fn decode(field: &str, value: &Value) -> Result<Option<PrimitiveDateTime>> {
            value
                .as_datetime()
                .map(Some)
                .ok_or_else(|| Error::mismatch(field, "dateTime.iso8601", value.type_name()))
        }

        pub fn encode(field: &Option<PrimitiveDateTime>) -> Option<Value> {
            field.map(Value::DateTime)
        }
    }

    pub mod base64 {
        use super::*;

        pub fn decode(field: &str, value: &Value) -> Result<Vec<u8>> {
            value
                .as_bytes()
                .map(<[u8]>::to_vec)
                .ok_or_else(|| Error::mismatch(field, "base64", value.type_name()))
        }

        pub fn encode(field: &Vec<u8>) -> Option<Value> {
            Some(Value::Base64(field.clone()))
        }
    }

    /// Ids some servers send as ints and others as strings.
    pub mod id {
        use super::*;

        pub fn decode(field: &str, value: &Value) -> Result<String> {
            match *value {
                Value::String(ref s) => Ok(s.clone()),
                Value::Int(n) => Ok(n.to_string()),
                ref other => Err(Error::mismatch(field, "string or int", other.type_name())),
            }
        }
    }

    /// Array of bare strings.
    pub mod strings {
        use super::*;

        pub fn decode(field: &str, value: &Value) -> Result<Vec<String>> {
            crate::list::decode_strings(field, value)
        }

        pub fn encode(field: &[String]) -> Option<Value> {
            Some(Value::Array(field.iter().cloned().map(Value::String).collect()))
        }
    }

    /// Array of nested entities.
    pub mod entities {
        use super::*;
        use crate::mapped::XmlRpcMapped;

        pub fn decode<T: XmlRpcMapped>(field: &str, value: &Value) -> Result<Vec<T>> {
            crate::list::decode_entities(field, value)
        }

        pub fn encode<T: XmlRpcMapped>(field: &[T]) -> Option<Value> {
            Some(Value::Array(
                field.iter().map(|e| Value::Struct(e.to_struct())).collect(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::rule;
    use crate::error::Error;
    use crate::xmlrpc::encoding::Value;

    #[test]
    fn test_rules_reject_other_wire_types() {
        match rule::int::decode("page_id", &Value::from("12")) {
            Err(Error::TypeMismatch {
                field,
                expected,
                found,
            }) => {
                assert_eq!("page_id", field);
                assert_eq!("int", expected);
                assert_eq!("string", found);
            }
            other => panic!("expected type mismatch, got {:?}", other),
        }
        assert!(rule::string::decode("title", &Value::Int(1)).is_err());
        assert!(rule::boolean::decode("isAdmin", &Value::Int(1)).is_err());
        assert!(rule::date::decode("dateCreated", &Value::from("20200101T00:00:00")).is_err());
        assert!(rule::base64::decode("bits", &Value::from("aGk=")).is_err());
    }

    #[test]
    fn test_id_accepts_ints_and_strings() {
        assert_eq!("42", rule::id::decode("postid", &Value::Int(42)).unwrap());
        assert_eq!("42", rule::id::decode("postid", &Value::from("42")).unwrap());
        assert!(rule::id::decode("postid", &Value::Boolean(true)).is_err());
    }

    #[test]
    fn test_double_widens_ints() {
        assert_eq!(5.0, rule::double::decode("sum", &Value::Int(5)).unwrap());
    }

    #[test]
    fn test_unset_date_is_omitted() {
        assert_eq!(None, rule::date::encode(&None));
    }
}
