// Copyright 2014-2015 Galen Clark Haynes
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Rust XML-RPC library

//! XML-RPC value model, wire encoding and blocking transport.
//!
//! Basic documentation found on Wikipedia
//! http://en.wikipedia.org/wiki/XML-RPC
//!
//! Full specification of the XML-RPC protocol is found here:
//! http://xmlrpc.scripting.com/spec.html
//!
//! Additional errata and hints can be found here:
//! http://effbot.org/zone/xmlrpc-errata.htm

pub mod client;
pub mod encoding;
pub mod protocol;

#[cfg(test)]
pub(crate) mod mock;

pub use self::client::{Client, Transport};
pub use self::encoding::{Array, Struct, Value};
pub use self::protocol::{Request, Response};
