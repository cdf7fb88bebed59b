// Copyright 2014-2015 Galen Clark Haynes
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Rust XML-RPC library

use reqwest::blocking;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::xmlrpc::protocol::{Request, Response};

/// Anything that can carry one XML-RPC round trip.
///
/// Implementations block until the response body is available. Timeouts, TLS
/// and retries are theirs to handle.
pub trait Transport {
    fn remote_call(&self, request: &Request) -> Result<Response>;
}

/// Blocking HTTP transport bound to a single endpoint.
pub struct Client {
    url: Url,
    http: blocking::Client,
}

impl Client {
    pub fn new(config: &Config) -> Result<Client> {
        let http = blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;

        Ok(Client {
            url: config.endpoint.clone(),
            http,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Transport for Client {
    fn remote_call(&self, request: &Request) -> Result<Response> {
        debug!("Send XMLRPC request {} to: {}", request.method, self.url);
        trace!("XMLRPC body: {}", request.redacted_body());

        let response = self
            .http
            .post(self.url.clone())
            .header(CONTENT_TYPE, "text/xml")
            .body(request.body())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            debug!("XMLRPC request {} failed with HTTP {}", request.method, status);
            return Err(Error::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        trace!("Response body: {}", body);

        Ok(Response::new(&body))
    }
}
