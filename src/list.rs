//! Decoding of XML-RPC arrays into typed sequences.
//!
//! Some operations answer with bare strings (`mt.supportedMethods`), others
//! with structs (`wp.getPages`). [`decode_list`] keeps both shapes apart per
//! element; the homogeneous variants reject the shape they do not expect.

use crate::entities::Entity;
use crate::error::{Error, Result};
use crate::mapped::{EntityKind, XmlRpcMapped};
use crate::xmlrpc::encoding::{Array, Struct, Value};

/// One element of a list that may mix bare strings and entities.
#[derive(Debug, Clone, PartialEq)]
pub enum Listed<T> {
    Text(String),
    Entity(T),
}

impl<T> Listed<T> {
    pub fn as_text(&self) -> Option<&str> {
        match *self {
            Listed::Text(ref s) => Some(s),
            Listed::Entity(_) => None,
        }
    }

    pub fn into_entity(self) -> Option<T> {
        match self {
            Listed::Entity(e) => Some(e),
            Listed::Text(_) => None,
        }
    }
}

fn elements<'a>(context: &str, value: &'a Value) -> Result<&'a Array> {
    value
        .as_array()
        .ok_or_else(|| Error::mismatch(context, "array", value.type_name()))
}

fn element_context(context: &str, idx: usize) -> String {
    format!("{}[{}]", context, idx)
}

/// Decodes each element on its own shape: strings stay strings, structs become `T`.
pub fn decode_list<T: XmlRpcMapped>(context: &str, value: &Value) -> Result<Vec<Listed<T>>> {
    decode_with(context, value, T::from_struct)
}

/// Same as [`decode_list`], picking the entity type at runtime.
pub fn decode_kind(kind: EntityKind, context: &str, value: &Value) -> Result<Vec<Listed<Entity>>> {
    decode_with(context, value, |members| kind.decode(members))
}

fn decode_with<T, F>(context: &str, value: &Value, mut decode: F) -> Result<Vec<Listed<T>>>
where
    F: FnMut(&Struct) -> Result<T>,
{
    let array = elements(context, value)?;
    let mut out = Vec::with_capacity(array.len());
    for (idx, element) in array.iter().enumerate() {
        match *element {
            Value::String(ref s) => out.push(Listed::Text(s.clone())),
            Value::Struct(ref members) => out.push(Listed::Entity(decode(members)?)),
            ref other => {
                return Err(Error::mismatch(
                    &element_context(context, idx),
                    "string or struct",
                    other.type_name(),
                ))
            }
        }
    }
    Ok(out)
}

/// A list made only of `T` structs.
pub fn decode_entities<T: XmlRpcMapped>(context: &str, value: &Value) -> Result<Vec<T>> {
    elements(context, value)?
        .iter()
        .enumerate()
        .map(|(idx, element)| match element.as_struct() {
            Some(members) => T::from_struct(members),
            None => Err(Error::mismatch(
                &element_context(context, idx),
                "struct",
                element.type_name(),
            )),
        })
        .collect()
}

/// A list made only of bare strings, order preserved.
pub fn decode_strings(context: &str, value: &Value) -> Result<Vec<String>> {
    elements(context, value)?
        .iter()
        .enumerate()
        .map(|(idx, element)| {
            element.as_str().map(str::to_string).ok_or_else(|| {
                Error::mismatch(&element_context(context, idx), "string", element.type_name())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Category, Ping};

    fn category(name: &str) -> Value {
        let mut members = Struct::new();
        members.insert("categoryName".to_string(), Value::from(name));
        Value::Struct(members)
    }

    #[test]
    fn test_mixed_list_decodes_each_element_on_its_own_shape() {
        let value = Value::Array(vec![
            Value::from("plain"),
            category("News"),
            Value::from("another"),
        ]);

        let listed = decode_list::<Category>("test", &value).unwrap();

        assert_eq!(3, listed.len());
        assert_eq!(Some("plain"), listed[0].as_text());
        assert_eq!(
            "News",
            listed[1].clone().into_entity().unwrap().category_name
        );
        assert_eq!(Some("another"), listed[2].as_text());
    }

    #[test]
    fn test_all_string_list_keeps_order() {
        let names = ["metaWeblog.getPost", "wp.getPages", "blogger.getUsersBlogs"];
        let value = Value::Array(names.iter().map(|n| Value::from(*n)).collect());

        assert_eq!(names.to_vec(), decode_strings("mt.supportedMethods", &value).unwrap());

        let listed = decode_list::<Ping>("mt.supportedMethods", &value).unwrap();
        let texts: Vec<&str> = listed.iter().filter_map(Listed::as_text).collect();
        assert_eq!(names.to_vec(), texts);
    }

    #[test]
    fn test_entity_list_is_homogeneous() {
        let value = Value::Array(vec![category("A"), category("B")]);
        let categories = decode_entities::<Category>("wp.getCategories", &value).unwrap();
        let names: Vec<&str> = categories.iter().map(|c| c.category_name.as_str()).collect();
        assert_eq!(vec!["A", "B"], names);

        let mixed = Value::Array(vec![category("A"), Value::from("B")]);
        match decode_entities::<Category>("wp.getCategories", &mixed) {
            Err(Error::TypeMismatch { field, .. }) => assert_eq!("wp.getCategories[1]", field),
            other => panic!("expected type mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_non_array_is_a_mismatch() {
        assert!(decode_strings("x", &Value::from("solo")).is_err());
        assert!(decode_entities::<Category>("x", &Value::Int(1)).is_err());
        assert!(decode_list::<Category>("x", &Value::Boolean(true)).is_err());
    }

    #[test]
    fn test_other_scalars_in_mixed_list_are_rejected() {
        let value = Value::Array(vec![Value::from("ok"), Value::Int(3)]);
        assert!(decode_list::<Category>("x", &value).is_err());
    }

    #[test]
    fn test_decode_kind_uses_dispatch_table() {
        let value = Value::Array(vec![category("News"), Value::from("raw")]);
        let listed = decode_kind(EntityKind::Category, "x", &value).unwrap();

        match listed[0] {
            Listed::Entity(Entity::Category(ref c)) => assert_eq!("News", c.category_name),
            ref other => panic!("unexpected {:?}", other),
        }
        assert_eq!(Some("raw"), listed[1].as_text());
    }

    #[test]
    fn test_empty_list() {
        assert!(decode_strings("x", &Value::Array(vec![])).unwrap().is_empty());
        assert!(decode_entities::<Category>("x", &Value::Array(vec![])).unwrap().is_empty());
    }
}
