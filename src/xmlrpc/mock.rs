//! Recording transport for tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::xmlrpc::client::Transport;
use crate::xmlrpc::encoding::Value;
use crate::xmlrpc::protocol::{Request, Response};

/// Requests seen by a [`MockTransport`], shared with the test that built it.
pub(crate) type Recorded = Rc<RefCell<Vec<Request>>>;

/// Answers each call with the next canned response and records the request.
pub(crate) struct MockTransport {
    requests: Recorded,
    responses: RefCell<VecDeque<Response>>,
}

impl MockTransport {
    pub(crate) fn new() -> (MockTransport, Recorded) {
        let requests = Recorded::default();
        let transport = MockTransport {
            requests: Rc::clone(&requests),
            responses: RefCell::new(VecDeque::new()),
        };
        (transport, requests)
    }

    pub(crate) fn respond(self, response: Response) -> MockTransport {
        self.responses.borrow_mut().push_back(response);
        self
    }

    pub(crate) fn respond_value<T: Into<Value>>(self, value: T) -> MockTransport {
        self.respond(Response::from_value(&value.into()))
    }
}

impl Transport for MockTransport {
    fn remote_call(&self, request: &Request) -> Result<Response> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::malformed(format!("no canned response for {}", request.method)))
    }
}
