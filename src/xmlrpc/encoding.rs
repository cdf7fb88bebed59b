// Copyright 2014-2015 Galen Clark Haynes
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Rust XML-RPC library

use std::fmt;
use std::io::Read;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use indexmap::IndexMap;
use time::macros::format_description;
use time::PrimitiveDateTime;
use xml::escape::escape_str_pcdata;
use xml::reader::{EventReader, ParserConfig, XmlEvent};

use crate::error::{Error, Result};

/// Represents an XML-RPC data value
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    Int(i32),
    Boolean(bool),
    String(String),
    Double(f64),
    DateTime(PrimitiveDateTime),
    Base64(Vec<u8>),
    Array(Array),
    Struct(Struct),
}

pub type Array = Vec<Value>;
/// Struct members keep the order they were received or inserted in.
pub type Struct = IndexMap<String, Value>;

/// What a `<methodResponse>` carried.
#[derive(Clone, PartialEq, Debug)]
pub enum Outcome {
    Params(Vec<Value>),
    Fault(Value),
}

impl Value {
    /// Name of the XML-RPC type, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match *self {
            Value::Int(_) => "int",
            Value::Boolean(_) => "boolean",
            Value::String(_) => "string",
            Value::Double(_) => "double",
            Value::DateTime(_) => "dateTime.iso8601",
            Value::Base64(_) => "base64",
            Value::Array(_) => "array",
            Value::Struct(_) => "struct",
        }
    }

    /// If the value is a Struct, returns the value associated with the provided key.
    pub fn find(&self, key: &str) -> Option<&Value> {
        self.as_struct().and_then(|members| members.get(key))
    }

    pub fn as_struct(&self) -> Option<&Struct> {
        match *self {
            Value::Struct(ref members) => Some(members),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match *self {
            Value::Array(ref values) => Some(values),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match *self {
            Value::String(ref s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    /// Doubles, and ints widened to doubles.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Value::Int(n) => Some(f64::from(n)),
            Value::Double(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Value::Boolean(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<PrimitiveDateTime> {
        match *self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match *self {
            Value::Base64(ref bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Appends the `<value>` element for this value to `out`.
    pub fn write_xml(&self, out: &mut String) {
        out.push_str("<value>");
        match *self {
            Value::Int(n) => out.push_str(&format!("<int>{}</int>", n)),
            Value::Boolean(b) => out.push_str(&format!("<boolean>{}</boolean>", b as u8)),
            Value::String(ref s) => {
                out.push_str("<string>");
                out.push_str(&escape_str_pcdata(s));
                out.push_str("</string>");
            }
            Value::Double(n) => out.push_str(&format!("<double>{}</double>", n)),
            Value::DateTime(dt) => {
                out.push_str("<dateTime.iso8601>");
                out.push_str(&format_datetime(dt));
                out.push_str("</dateTime.iso8601>");
            }
            Value::Base64(ref bytes) => {
                out.push_str("<base64>");
                out.push_str(&BASE64.encode(bytes));
                out.push_str("</base64>");
            }
            Value::Array(ref values) => {
                out.push_str("<array><data>");
                for value in values {
                    value.write_xml(out);
                }
                out.push_str("</data></array>");
            }
            Value::Struct(ref members) => {
                out.push_str("<struct>");
                for (name, value) in members {
                    out.push_str("<member><name>");
                    out.push_str(&escape_str_pcdata(name));
                    out.push_str("</name>");
                    value.write_xml(out);
                    out.push_str("</member>");
                }
                out.push_str("</struct>");
            }
        }
        out.push_str("</value>");
    }

    /// Parses a standalone `<value>` document.
    pub fn from_xml_str(s: &str) -> Result<Value> {
        let mut builder = Builder::new(s.as_bytes());
        builder.expect_start("value")?;
        builder.build_value()
    }
}

impl fmt::Display for Value {
    /// Encodes the value as its `<value>` element
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut out = String::new();
        self.write_xml(&mut out);
        f.write_str(&out)
    }
}

macro_rules! value_from {
    ($($t:ty => $variant:ident),+ $(,)?) => (
        $(impl From<$t> for Value {
            fn from(v: $t) -> Value { Value::$variant(v) }
        })+
    )
}

value_from! {
    i32 => Int,
    bool => Boolean,
    String => String,
    f64 => Double,
    PrimitiveDateTime => DateTime,
    Vec<u8> => Base64,
    Array => Array,
    Struct => Struct,
}

impl<'a> From<&'a str> for Value {
    fn from(v: &'a str) -> Value {
        Value::String(v.to_string())
    }
}

/// XML-RPC's ISO-8601 basic form, `YYYYMMDDTHH:MM:SS`.
pub fn format_datetime(dt: PrimitiveDateTime) -> String {
    let format = format_description!("[year][month][day]T[hour]:[minute]:[second]");
    // Formatting a PrimitiveDateTime with date and time components cannot fail
    // for years 0..=9999; anything else falls back to the Debug rendering.
    dt.format(&format).unwrap_or_else(|_| format!("{:?}", dt))
}

/// Accepts the basic form, the extended `YYYY-MM-DDTHH:MM:SS` form and a trailing `Z`.
pub fn parse_datetime(s: &str) -> Result<PrimitiveDateTime> {
    let basic = format_description!("[year][month][day]T[hour]:[minute]:[second]");
    let extended = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

    let text = s.trim();
    let text = text.strip_suffix('Z').unwrap_or(text);

    PrimitiveDateTime::parse(text, &basic)
        .or_else(|_| PrimitiveDateTime::parse(text, &extended))
        .map_err(|e| Error::malformed(format!("bad dateTime.iso8601 '{}': {}", s, e)))
}

/// Decodes a `<methodResponse>` document.
pub fn decode(s: &str) -> Result<Outcome> {
    let mut builder = Builder::new(s.as_bytes());
    builder.build_response()
}

struct Builder<R: Read> {
    parser: EventReader<R>,
}

impl<R: Read> Builder<R> {
    fn new(src: R) -> Builder<R> {
        let config = ParserConfig::new()
            .cdata_to_characters(true)
            .ignore_comments(true)
            .coalesce_characters(true);
        Builder {
            parser: config.create_reader(src),
        }
    }

    /// Next event that matters structurally, whitespace included.
    fn next_raw(&mut self) -> Result<XmlEvent> {
        loop {
            match self.parser.next()? {
                XmlEvent::StartDocument { .. }
                | XmlEvent::ProcessingInstruction { .. }
                | XmlEvent::Comment(_) => continue,
                XmlEvent::EndDocument => {
                    return Err(Error::malformed("unexpected end of document"))
                }
                event => return Ok(event),
            }
        }
    }

    /// Next start or end tag, skipping whitespace between elements.
    fn next_tag(&mut self) -> Result<XmlEvent> {
        loop {
            match self.next_raw()? {
                XmlEvent::Whitespace(_) => continue,
                event @ XmlEvent::StartElement { .. } | event @ XmlEvent::EndElement { .. } => {
                    return Ok(event)
                }
                event => return Err(unexpected(&event)),
            }
        }
    }

    fn expect_start(&mut self, tag: &str) -> Result<()> {
        match self.next_tag()? {
            XmlEvent::StartElement { ref name, .. } if name.local_name == tag => Ok(()),
            event => Err(unexpected(&event)),
        }
    }

    fn expect_end(&mut self, tag: &str) -> Result<()> {
        match self.next_tag()? {
            XmlEvent::EndElement { ref name } if name.local_name == tag => Ok(()),
            event => Err(unexpected(&event)),
        }
    }

    /// Collects character data up to the closing `tag`.
    fn read_text(&mut self, tag: &str) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.next_raw()? {
                XmlEvent::Characters(s) | XmlEvent::Whitespace(s) | XmlEvent::CData(s) => {
                    text.push_str(&s)
                }
                XmlEvent::EndElement { ref name } if name.local_name == tag => return Ok(text),
                event => return Err(unexpected(&event)),
            }
        }
    }

    fn build_response(&mut self) -> Result<Outcome> {
        self.expect_start("methodResponse")?;
        let outcome = match self.next_tag()? {
            XmlEvent::StartElement { ref name, .. } if name.local_name == "params" => {
                Outcome::Params(self.build_params_list()?)
            }
            XmlEvent::StartElement { ref name, .. } if name.local_name == "fault" => {
                self.expect_start("value")?;
                let fault = self.build_value()?;
                self.expect_end("fault")?;
                Outcome::Fault(fault)
            }
            event => return Err(unexpected(&event)),
        };
        self.expect_end("methodResponse")?;
        Ok(outcome)
    }

    fn build_params_list(&mut self) -> Result<Vec<Value>> {
        let mut params = Vec::new();
        loop {
            match self.next_tag()? {
                XmlEvent::StartElement { ref name, .. } if name.local_name == "param" => {
                    self.expect_start("value")?;
                    params.push(self.build_value()?);
                    self.expect_end("param")?;
                }
                XmlEvent::EndElement { ref name } if name.local_name == "params" => {
                    return Ok(params)
                }
                event => return Err(unexpected(&event)),
            }
        }
    }

    /// Builds the value whose `<value>` start tag was just consumed.
    fn build_value(&mut self) -> Result<Value> {
        let mut text = String::new();
        loop {
            match self.next_raw()? {
                XmlEvent::Characters(s) | XmlEvent::Whitespace(s) | XmlEvent::CData(s) => {
                    text.push_str(&s)
                }
                // Untyped values are strings.
                XmlEvent::EndElement { ref name } if name.local_name == "value" => {
                    return Ok(Value::String(text))
                }
                XmlEvent::StartElement { name, .. } => {
                    if !text.trim().is_empty() {
                        return Err(Error::malformed(format!(
                            "text '{}' before <{}>",
                            text.trim(),
                            name.local_name
                        )));
                    }
                    let value = self.build_typed(&name.local_name)?;
                    self.expect_end("value")?;
                    return Ok(value);
                }
                event => return Err(unexpected(&event)),
            }
        }
    }

    fn build_typed(&mut self, tag: &str) -> Result<Value> {
        match tag {
            "int" | "i4" => {
                let text = self.read_text(tag)?;
                text.trim()
                    .parse::<i32>()
                    .map(Value::Int)
                    .map_err(|_| Error::malformed(format!("bad <{}> '{}'", tag, text)))
            }
            "i8" => {
                let text = self.read_text(tag)?;
                text.trim()
                    .parse::<i64>()
                    .ok()
                    .and_then(|n| i32::try_from(n).ok())
                    .map(Value::Int)
                    .ok_or_else(|| Error::malformed(format!("<i8> '{}' out of range", text)))
            }
            "boolean" => match self.read_text(tag)?.trim() {
                "1" | "true" => Ok(Value::Boolean(true)),
                "0" | "false" => Ok(Value::Boolean(false)),
                other => Err(Error::malformed(format!("bad <boolean> '{}'", other))),
            },
            "string" => self.read_text(tag).map(Value::String),
            "double" => {
                let text = self.read_text(tag)?;
                text.trim()
                    .parse::<f64>()
                    .map(Value::Double)
                    .map_err(|_| Error::malformed(format!("bad <double> '{}'", text)))
            }
            "dateTime.iso8601" => {
                let text = self.read_text(tag)?;
                parse_datetime(&text).map(Value::DateTime)
            }
            "base64" => {
                let text = self.read_text(tag)?;
                let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                BASE64
                    .decode(compact.as_bytes())
                    .map(Value::Base64)
                    .map_err(|e| Error::malformed(format!("bad <base64>: {}", e)))
            }
            "array" => self.build_array(),
            "struct" => self.build_struct(),
            other => Err(Error::malformed(format!("unsupported value type <{}>", other))),
        }
    }

    fn build_array(&mut self) -> Result<Value> {
        self.expect_start("data")?;
        let mut values = Array::new();
        loop {
            match self.next_tag()? {
                XmlEvent::StartElement { ref name, .. } if name.local_name == "value" => {
                    values.push(self.build_value()?);
                }
                XmlEvent::EndElement { ref name } if name.local_name == "data" => break,
                event => return Err(unexpected(&event)),
            }
        }
        self.expect_end("array")?;
        Ok(Value::Array(values))
    }

    fn build_struct(&mut self) -> Result<Value> {
        let mut members = Struct::new();
        loop {
            match self.next_tag()? {
                XmlEvent::StartElement { ref name, .. } if name.local_name == "member" => {
                    self.expect_start("name")?;
                    let key = self.read_text("name")?;
                    self.expect_start("value")?;
                    let value = self.build_value()?;
                    self.expect_end("member")?;
                    members.insert(key, value);
                }
                XmlEvent::EndElement { ref name } if name.local_name == "struct" => {
                    return Ok(Value::Struct(members))
                }
                event => return Err(unexpected(&event)),
            }
        }
    }
}

fn unexpected(event: &XmlEvent) -> Error {
    match *event {
        XmlEvent::StartElement { ref name, .. } => {
            Error::malformed(format!("unexpected <{}>", name.local_name))
        }
        XmlEvent::EndElement { ref name } => {
            Error::malformed(format!("unexpected </{}>", name.local_name))
        }
        XmlEvent::Characters(ref s) => Error::malformed(format!("unexpected text '{}'", s)),
        ref other => Error::malformed(format!("unexpected {:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn xml_of(value: &Value) -> String {
        let mut out = String::new();
        value.write_xml(&mut out);
        out
    }

    #[test]
    fn test_encode_scalars() {
        assert_eq!("<value><int>42</int></value>", xml_of(&Value::Int(42)));
        assert_eq!("<value><boolean>1</boolean></value>", xml_of(&Value::Boolean(true)));
        assert_eq!("<value><double>4.2</double></value>", xml_of(&Value::Double(4.2)));
        assert_eq!(
            "<value><string>a &lt;b&gt; &amp; c</string></value>",
            xml_of(&Value::from("a <b> & c"))
        );
        assert_eq!(
            "<value><dateTime.iso8601>20150704T09:05:01</dateTime.iso8601></value>",
            xml_of(&Value::DateTime(datetime!(2015-07-04 09:05:01)))
        );
        assert_eq!(
            "<value><base64>aGVsbG8=</base64></value>",
            xml_of(&Value::Base64(b"hello".to_vec()))
        );
    }

    #[test]
    fn test_encode_struct_keeps_insertion_order() {
        let mut members = Struct::new();
        members.insert("zeta".to_string(), Value::Int(1));
        members.insert("alpha".to_string(), Value::Array(vec![]));

        assert_eq!(
            "<value><struct><member><name>zeta</name><value><int>1</int></value></member>\
             <member><name>alpha</name><value><array><data></data></array></value></member>\
             </struct></value>",
            xml_of(&Value::Struct(members))
        );
    }

    #[test]
    fn test_decode_every_scalar_type() {
        let body = "<?xml version=\"1.0\"?>
            <methodResponse><params><param><value><array><data>
              <value><int>7</int></value>
              <value><i4>-3</i4></value>
              <value><i8>12</i8></value>
              <value><boolean>0</boolean></value>
              <value><string> padded </string></value>
              <value>untyped</value>
              <value><double>2.5</double></value>
              <value><dateTime.iso8601>20080305T14:30:00</dateTime.iso8601></value>
              <value><base64>
                aGVs
                bG8=
              </base64></value>
              <value><string></string></value>
              <value></value>
            </data></array></value></param></params></methodResponse>";

        let outcome = decode(body).unwrap();
        let expected = Value::Array(vec![
            Value::Int(7),
            Value::Int(-3),
            Value::Int(12),
            Value::Boolean(false),
            Value::from(" padded "),
            Value::from("untyped"),
            Value::Double(2.5),
            Value::DateTime(datetime!(2008-03-05 14:30:00)),
            Value::Base64(b"hello".to_vec()),
            Value::from(""),
            Value::from(""),
        ]);
        assert_eq!(Outcome::Params(vec![expected]), outcome);
    }

    #[test]
    fn test_decode_nested_struct() {
        let body = "<methodResponse><params><param><value><struct>
              <member><name>key1</name><value><string>string_value</string></value></member>
              <member><name>key2</name><value><struct>
                <member><name>inner</name><value><array><data/></array></value></member>
              </struct></value></member>
              <member><name>key3</name><value><boolean>1</boolean></value></member>
            </struct></value></param></params></methodResponse>";

        let outcome = decode(body).unwrap();
        let value = match outcome {
            Outcome::Params(mut params) => params.remove(0),
            Outcome::Fault(_) => panic!("unexpected fault"),
        };

        assert_eq!(Some("string_value"), value.find("key1").and_then(Value::as_str));
        assert_eq!(
            Some(&Value::Array(vec![])),
            value.find("key2").and_then(|v| v.find("inner"))
        );
        assert_eq!(Some(true), value.find("key3").and_then(Value::as_bool));
        let keys: Vec<&String> = value.as_struct().unwrap().keys().collect();
        assert_eq!(vec!["key1", "key2", "key3"], keys);
    }

    #[test]
    fn test_decode_fault() {
        let body = "<methodResponse><fault><value><struct>
              <member><name>faultCode</name><value><int>403</int></value></member>
              <member><name>faultString</name><value><string>forbidden</string></value></member>
            </struct></value></fault></methodResponse>";

        match decode(body).unwrap() {
            Outcome::Fault(value) => {
                assert_eq!(Some(403), value.find("faultCode").and_then(Value::as_i32));
                assert_eq!(Some("forbidden"), value.find("faultString").and_then(Value::as_str));
            }
            other => panic!("expected fault, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("<html><body>502</body></html>").is_err());
        assert!(decode("<methodResponse><params><param><value><int>x</int></value></param></params></methodResponse>").is_err());
        assert!(decode("<methodResponse><params><param><value><nil/></value></param></params></methodResponse>").is_err());
        assert!(decode("<methodResponse><params>").is_err());
    }

    #[test]
    fn test_value_xml_round_trip() {
        let mut members = Struct::new();
        members.insert("title".to_string(), Value::from("Hello & welcome"));
        members.insert("bits".to_string(), Value::Base64(vec![0, 255, 16]));
        members.insert("when".to_string(), Value::DateTime(datetime!(1999-12-31 23:59:59)));
        members.insert(
            "list".to_string(),
            Value::Array(vec![Value::Int(1), Value::from("two"), Value::Boolean(true)]),
        );
        let value = Value::Struct(members);

        assert_eq!(value, Value::from_xml_str(&value.to_string()).unwrap());
    }

    #[test]
    fn test_parse_datetime_variants() {
        let expected = datetime!(2009-01-02 03:04:05);
        assert_eq!(expected, parse_datetime("20090102T03:04:05").unwrap());
        assert_eq!(expected, parse_datetime("20090102T03:04:05Z").unwrap());
        assert_eq!(expected, parse_datetime("2009-01-02T03:04:05").unwrap());
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn test_as_f64_widens_ints() {
        assert_eq!(Some(3.0), Value::Int(3).as_f64());
        assert_eq!(None, Value::from("3").as_f64());
    }
}
