//! Method-group dispatcher.
//!
//! One endpoint serves seven method groups. Every remote operation has one
//! method here; privileged ones start with the tenant placeholder and the
//! session credentials, laid out the way the server's signature expects.

use crate::config::Session;
use crate::error::Result;
use crate::xmlrpc::client::Transport;
use crate::xmlrpc::encoding::{Struct, Value};
use crate::xmlrpc::protocol::Request;

/// Blog id / app key argument. The server ignores it.
pub const TENANT_PLACEHOLDER: i32 = 0;

/// A namespace of remote methods sharing the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodGroup {
    prefix: &'static str,
}

impl MethodGroup {
    pub const fn new(prefix: &'static str) -> MethodGroup {
        MethodGroup { prefix }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Fully qualified method name, e.g. `wp.getPages`.
    pub fn method(&self, name: &str) -> String {
        format!("{}.{}", self.prefix, name)
    }
}

pub const BLOGGER: MethodGroup = MethodGroup::new("blogger");
pub const META_WEBLOG: MethodGroup = MethodGroup::new("metaWeblog");
pub const MOVABLE_TYPE: MethodGroup = MethodGroup::new("mt");
pub const PINGBACK: MethodGroup = MethodGroup::new("pingback");
pub const PINGBACK_EXTENSIONS: MethodGroup = MethodGroup::new("pingback.extensions");
pub const DEMO: MethodGroup = MethodGroup::new("demo");
pub const WORDPRESS: MethodGroup = MethodGroup::new("wp");

/// Issues remote calls and hands back the raw wire value.
pub struct Dispatcher {
    transport: Box<dyn Transport>,
    blogger: MethodGroup,
    meta_weblog: MethodGroup,
    mt: MethodGroup,
    pingback: MethodGroup,
    pingback_ext: MethodGroup,
    demo: MethodGroup,
    wp: MethodGroup,
}

impl Dispatcher {
    pub fn new(transport: Box<dyn Transport>) -> Dispatcher {
        Dispatcher {
            transport,
            blogger: BLOGGER,
            meta_weblog: META_WEBLOG,
            mt: MOVABLE_TYPE,
            pingback: PINGBACK,
            pingback_ext: PINGBACK_EXTENSIONS,
            demo: DEMO,
            wp: WORDPRESS,
        }
    }

    pub fn groups(&self) -> [MethodGroup; 7] {
        [
            self.blogger,
            self.meta_weblog,
            self.mt,
            self.pingback,
            self.pingback_ext,
            self.demo,
            self.wp,
        ]
    }

    fn request(&self, group: MethodGroup, name: &str) -> Request {
        Request::new(&group.method(name))
    }

    /// `[tenant, username, password]`, the prefix of most privileged calls.
    fn privileged(&self, group: MethodGroup, name: &str, session: &Session) -> Request {
        let credentials = session.credentials();
        self.request(group, name)
            .argument(TENANT_PLACEHOLDER)
            .masked(credentials.username())
            .secret(credentials.password())
    }

    /// Methods whose signature puts an id between the tenant and the credentials.
    fn privileged_with_id(
        &self,
        group: MethodGroup,
        name: &str,
        session: &Session,
        id: i32,
    ) -> Request {
        let credentials = session.credentials();
        self.request(group, name)
            .argument(TENANT_PLACEHOLDER)
            .argument(id)
            .masked(credentials.username())
            .secret(credentials.password())
    }

    /// `metaWeblog` post methods take no tenant at all.
    fn by_post_id(&self, group: MethodGroup, name: &str, session: &Session, id: i32) -> Request {
        let credentials = session.credentials();
        self.request(group, name)
            .argument(id)
            .masked(credentials.username())
            .secret(credentials.password())
    }

    fn call(&self, request: Request) -> Result<Value> {
        debug!("Calling {} with {} arguments", request.method, request.params.len());
        let response = self.transport.remote_call(&request)?;
        response.result()
    }

    // blogger

    pub fn blogger_delete_post(
        &self,
        session: &Session,
        post_id: i32,
        publish: &str,
    ) -> Result<Value> {
        trace!("blogger_delete_post - post_id: {:?} - publish: {:?}", post_id, publish);
        let request = self
            .privileged_with_id(self.blogger, "deletePost", session, post_id)
            .argument(publish);
        self.call(request)
    }

    pub fn blogger_get_template(&self, session: &Session, template: &str) -> Result<Value> {
        let request = self
            .privileged_with_id(self.blogger, "getTemplate", session, TENANT_PLACEHOLDER)
            .argument(template);
        self.call(request)
    }

    pub fn blogger_set_template(
        &self,
        session: &Session,
        content: &str,
        template: &str,
    ) -> Result<Value> {
        let request = self
            .privileged_with_id(self.blogger, "setTemplate", session, TENANT_PLACEHOLDER)
            .argument(content)
            .argument(template);
        self.call(request)
    }

    pub fn blogger_get_user_info(&self, session: &Session) -> Result<Value> {
        self.call(self.privileged(self.blogger, "getUserInfo", session))
    }

    pub fn blogger_get_users_blogs(&self, session: &Session) -> Result<Value> {
        self.call(self.privileged(self.blogger, "getUsersBlogs", session))
    }

    // metaWeblog

    pub fn meta_weblog_edit_post(
        &self,
        session: &Session,
        post_id: i32,
        post: Struct,
        publish: &str,
    ) -> Result<Value> {
        trace!("meta_weblog_edit_post - post_id: {:?} - publish: {:?}", post_id, publish);
        let request = self
            .by_post_id(self.meta_weblog, "editPost", session, post_id)
            .argument(post)
            .argument(publish);
        self.call(request)
    }

    pub fn meta_weblog_get_post(&self, session: &Session, post_id: i32) -> Result<Value> {
        self.call(self.by_post_id(self.meta_weblog, "getPost", session, post_id))
    }

    pub fn meta_weblog_get_recent_posts(&self, session: &Session, num_posts: i32) -> Result<Value> {
        let request = self
            .privileged(self.meta_weblog, "getRecentPosts", session)
            .argument(num_posts);
        self.call(request)
    }

    pub fn meta_weblog_new_media_object(&self, session: &Session, data: Struct) -> Result<Value> {
        let request = self
            .privileged(self.meta_weblog, "newMediaObject", session)
            .argument(data);
        self.call(request)
    }

    pub fn meta_weblog_new_post(
        &self,
        session: &Session,
        post: Struct,
        publish: bool,
    ) -> Result<Value> {
        let request = self
            .privileged(self.meta_weblog, "newPost", session)
            .argument(post)
            .argument(publish);
        self.call(request)
    }

    // mt

    pub fn mt_supported_methods(&self) -> Result<Value> {
        self.call(self.request(self.mt, "supportedMethods"))
    }

    pub fn mt_supported_text_filters(&self) -> Result<Value> {
        self.call(self.request(self.mt, "supportedTextFilters"))
    }

    pub fn mt_get_trackback_pings(&self, post_id: i32) -> Result<Value> {
        self.call(self.request(self.mt, "getTrackbackPings").argument(post_id))
    }

    // pingback

    pub fn pingback_ping(&self, source: &str, target: &str) -> Result<Value> {
        trace!("pingback_ping - source: {:?} - target: {:?}", source, target);
        let request = self
            .request(self.pingback, "ping")
            .argument(source)
            .argument(target);
        self.call(request)
    }

    pub fn pingback_get_pingbacks(&self, url: &str) -> Result<Value> {
        self.call(self.request(self.pingback_ext, "getPingbacks").argument(url))
    }

    // demo

    pub fn demo_add_two_numbers(&self, number1: f64, number2: f64) -> Result<Value> {
        let request = self
            .request(self.demo, "addTwoNumbers")
            .argument(number1)
            .argument(number2);
        self.call(request)
    }

    pub fn demo_say_hello(&self) -> Result<Value> {
        self.call(self.request(self.demo, "sayHello"))
    }

    // wp

    pub fn wp_delete_page(&self, session: &Session, page_id: i32, publish: &str) -> Result<Value> {
        trace!("wp_delete_page - page_id: {:?} - publish: {:?}", page_id, publish);
        let request = self
            .privileged(self.wp, "deletePage", session)
            .argument(page_id)
            .argument(publish);
        self.call(request)
    }

    pub fn wp_edit_page(
        &self,
        session: &Session,
        page_id: i32,
        page: Struct,
        publish: &str,
    ) -> Result<Value> {
        trace!("wp_edit_page - page_id: {:?} - publish: {:?}", page_id, publish);
        let request = self
            .privileged_with_id(self.wp, "editPage", session, page_id)
            .argument(page)
            .argument(publish);
        self.call(request)
    }

    pub fn wp_get_authors(&self, session: &Session) -> Result<Value> {
        self.call(self.privileged(self.wp, "getAuthors", session))
    }

    pub fn wp_get_categories(&self, session: &Session) -> Result<Value> {
        self.call(self.privileged(self.wp, "getCategories", session))
    }

    pub fn wp_get_page(&self, session: &Session, page_id: i32) -> Result<Value> {
        self.call(self.privileged_with_id(self.wp, "getPage", session, page_id))
    }

    pub fn wp_get_page_list(&self, session: &Session) -> Result<Value> {
        self.call(self.privileged(self.wp, "getPageList", session))
    }

    pub fn wp_get_pages(&self, session: &Session) -> Result<Value> {
        self.call(self.privileged(self.wp, "getPages", session))
    }

    pub fn wp_new_category(&self, session: &Session, category: Struct) -> Result<Value> {
        let request = self
            .privileged(self.wp, "newCategory", session)
            .argument(category);
        self.call(request)
    }

    pub fn wp_new_page(&self, session: &Session, page: Struct, publish: &str) -> Result<Value> {
        let request = self
            .privileged(self.wp, "newPage", session)
            .argument(page)
            .argument(publish);
        self.call(request)
    }

    /// Declared by the server, but its answer was never pinned down; the
    /// facade refuses the operation instead of calling this.
    pub fn wp_suggest_categories(
        &self,
        session: &Session,
        category: &str,
        max_results: i32,
    ) -> Result<Value> {
        let request = self
            .privileged(self.wp, "suggestCategories", session)
            .argument(category)
            .argument(max_results);
        self.call(request)
    }

    pub fn wp_get_post_status_list(&self, session: &Session) -> Result<Value> {
        self.call(self.privileged(self.wp, "getPostStatusList", session))
    }

    pub fn wp_get_page_status_list(&self, session: &Session) -> Result<Value> {
        self.call(self.privileged(self.wp, "getPageStatusList", session))
    }
}
