// Copyright 2014-2015 Galen Clark Haynes
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Rust XML-RPC library

use secrecy::{ExposeSecret, SecretString};
use xml::escape::escape_str_pcdata;

use crate::error::{Error, Result};
use crate::xmlrpc::encoding::{self, Outcome, Struct, Value};

/// A `<methodCall>` waiting to be sent.
///
/// Arguments pushed with [`Request::secret`] or [`Request::masked`] are written
/// to the wire as-is but masked in [`Request::redacted_body`], which is what
/// ends up in the logs.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub params: Vec<Value>,
    secret_params: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Response {
    pub body: String,
}

impl Request {
    pub fn new(method: &str) -> Request {
        Request {
            method: method.to_string(),
            params: Vec::new(),
            secret_params: Vec::new(),
        }
    }

    pub fn argument<T: Into<Value>>(mut self, object: T) -> Request {
        self.params.push(object.into());
        self
    }

    pub fn secret(self, secret: &SecretString) -> Request {
        self.masked(secret.expose_secret())
    }

    /// A plain argument kept out of the logs, e.g. the username.
    pub fn masked<T: Into<Value>>(mut self, object: T) -> Request {
        self.secret_params.push(self.params.len());
        self.params.push(object.into());
        self
    }

    /// The full XML document sent on the wire.
    pub fn body(&self) -> String {
        self.render(false)
    }

    /// Same document with secret arguments replaced by `***`.
    pub fn redacted_body(&self) -> String {
        self.render(true)
    }

    fn render(&self, redact: bool) -> String {
        let mut body = format!(
            "<?xml version=\"1.0\"?><methodCall><methodName>{}</methodName><params>",
            escape_str_pcdata(&self.method)
        );
        for (idx, param) in self.params.iter().enumerate() {
            body.push_str("<param>");
            if redact && self.secret_params.contains(&idx) {
                Value::from("***").write_xml(&mut body);
            } else {
                param.write_xml(&mut body);
            }
            body.push_str("</param>");
        }
        body.push_str("</params></methodCall>");
        body
    }
}

impl Response {
    pub fn new(body: &str) -> Response {
        Response {
            body: body.to_string(),
        }
    }

    /// A successful response carrying `value`.
    pub fn from_value(value: &Value) -> Response {
        let mut body =
            String::from("<?xml version=\"1.0\"?><methodResponse><params><param>");
        value.write_xml(&mut body);
        body.push_str("</param></params></methodResponse>");
        Response { body }
    }

    /// A fault response, as a server would send it.
    pub fn fault(code: i32, message: &str) -> Response {
        let mut fault = Struct::new();
        fault.insert("faultCode".to_string(), Value::Int(code));
        fault.insert("faultString".to_string(), Value::from(message));

        let mut body = String::from("<?xml version=\"1.0\"?><methodResponse><fault>");
        Value::Struct(fault).write_xml(&mut body);
        body.push_str("</fault></methodResponse>");
        Response { body }
    }

    /// The single value this response carries, or the server's fault.
    pub fn result(&self) -> Result<Value> {
        match encoding::decode(&self.body)? {
            Outcome::Params(params) => params
                .into_iter()
                .next()
                .ok_or_else(|| Error::malformed("response carries no <param>")),
            Outcome::Fault(fault) => Err(fault_error(&fault)),
        }
    }
}

fn fault_error(fault: &Value) -> Error {
    let code = fault.find("faultCode").and_then(Value::as_i32);
    let message = fault.find("faultString").and_then(Value::as_str);
    match (code, message) {
        (Some(code), Some(message)) => Error::RemoteFault {
            code,
            message: message.to_string(),
        },
        _ => Error::malformed(format!("fault without faultCode/faultString: {}", fault)),
    }
}
