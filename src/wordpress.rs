//! The `Wordpress` facade: typed operations over the dispatcher.

use std::fs;
use std::path::Path;

use url::Url;

use crate::config::{Config, Credentials, Session};
use crate::dispatch::Dispatcher;
use crate::entities::{
    Attachment, Author, Blog, Category, MediaObject, Page, PageDefinition, Ping,
    PostAndPageStatus, User,
};
use crate::error::{Error, Result};
use crate::list;
use crate::mapped::{rule, XmlRpcMapped};
use crate::status;
use crate::xmlrpc::client::{Client, Transport};
use crate::xmlrpc::encoding::{Struct, Value};

/// A session against one blog.
///
/// Every method performs one blocking round trip. An instance holds mutable
/// session state and is neither `Send` nor `Sync`: use one per logical
/// session, or serialize access to it yourself.
pub struct Wordpress {
    session: Session,
    dispatcher: Dispatcher,
}

fn expect_struct<'a>(context: &str, value: &'a Value) -> Result<&'a Struct> {
    value
        .as_struct()
        .ok_or_else(|| Error::mismatch(context, "struct", value.type_name()))
}

fn decode_entity<T: XmlRpcMapped>(context: &str, value: &Value) -> Result<T> {
    T::from_struct(expect_struct(context, value)?)
}

impl Wordpress {
    /// `xml_rpc_url` is usually `<blog url>/xmlrpc.php`.
    pub fn new(username: &str, password: &str, xml_rpc_url: &str) -> Result<Wordpress> {
        Wordpress::with_config(username, password, Config::new(xml_rpc_url)?)
    }

    pub fn with_config(username: &str, password: &str, config: Config) -> Result<Wordpress> {
        let client = Client::new(&config)?;
        debug!("Using XML-RPC endpoint: {}", client.url());
        Ok(Wordpress::with_transport(username, password, Box::new(client)))
    }

    /// Uses `transport` instead of the built-in HTTP client.
    pub fn with_transport(
        username: &str,
        password: &str,
        transport: Box<dyn Transport>,
    ) -> Wordpress {
        Wordpress {
            session: Session::new(Credentials::new(username, password)),
            dispatcher: Dispatcher::new(transport),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        self.session.credentials()
    }

    /// Later calls use the new credentials.
    pub fn set_credentials(&mut self, username: &str, password: &str) {
        self.session.set_credentials(Credentials::new(username, password));
    }

    pub fn add_two_numbers(&self, number1: f64, number2: f64) -> Result<f64> {
        let value = self.dispatcher.demo_add_two_numbers(number1, number2)?;
        rule::double::decode("demo.addTwoNumbers", &value)
    }

    /// A very important message.
    pub fn say_hello(&self) -> Result<String> {
        let value = self.dispatcher.demo_say_hello()?;
        rule::string::decode("demo.sayHello", &value)
    }

    pub fn delete_page(&self, page_id: i32, publish: &str) -> Result<bool> {
        let value = self.dispatcher.wp_delete_page(&self.session, page_id, publish)?;
        rule::boolean::decode("wp.deletePage", &value)
    }

    pub fn delete_post(&self, post_id: i32, publish: &str) -> Result<bool> {
        let value = self
            .dispatcher
            .blogger_delete_post(&self.session, post_id, publish)?;
        rule::boolean::decode("blogger.deletePost", &value)
    }

    pub fn edit_page(&self, page_id: i32, page: &Page, publish: &str) -> Result<bool> {
        let value = self
            .dispatcher
            .wp_edit_page(&self.session, page_id, page.to_struct(), publish)?;
        rule::boolean::decode("wp.editPage", &value)
    }

    pub fn edit_post(&self, post_id: i32, page: &Page, publish: &str) -> Result<bool> {
        let value = self
            .dispatcher
            .meta_weblog_edit_post(&self.session, post_id, page.to_struct(), publish)?;
        rule::boolean::decode("metaWeblog.editPost", &value)
    }

    pub fn get_authors(&self) -> Result<Vec<Author>> {
        let value = self.dispatcher.wp_get_authors(&self.session)?;
        list::decode_entities("wp.getAuthors", &value)
    }

    pub fn get_categories(&self) -> Result<Vec<Category>> {
        let value = self.dispatcher.wp_get_categories(&self.session)?;
        list::decode_entities("wp.getCategories", &value)
    }

    pub fn get_page(&self, page_id: i32) -> Result<Page> {
        let value = self.dispatcher.wp_get_page(&self.session, page_id)?;
        decode_entity("wp.getPage", &value)
    }

    /// Pages in short form.
    pub fn get_page_list(&self) -> Result<Vec<PageDefinition>> {
        let value = self.dispatcher.wp_get_page_list(&self.session)?;
        list::decode_entities("wp.getPageList", &value)
    }

    /// Pages in full form.
    pub fn get_pages(&self) -> Result<Vec<Page>> {
        let value = self.dispatcher.wp_get_pages(&self.session)?;
        list::decode_entities("wp.getPages", &value)
    }

    pub fn get_trackback_pings(&self, post_id: i32) -> Result<Vec<Ping>> {
        let value = self.dispatcher.mt_get_trackback_pings(post_id)?;
        list::decode_entities("mt.getTrackbackPings", &value)
    }

    /// URLs of the pages pinging `url`.
    pub fn get_pingbacks(&self, url: &str) -> Result<Vec<Url>> {
        let value = self.dispatcher.pingback_get_pingbacks(url)?;
        list::decode_strings("pingback.extensions.getPingbacks", &value)?
            .iter()
            .map(|rec| {
                Url::parse(rec)
                    .map_err(|e| Error::malformed(format!("bad pingback URL '{}': {}", rec, e)))
            })
            .collect()
    }

    pub fn get_post(&self, post_id: i32) -> Result<Page> {
        let value = self.dispatcher.meta_weblog_get_post(&self.session, post_id)?;
        decode_entity("metaWeblog.getPost", &value)
    }

    pub fn get_recent_posts(&self, num_posts: i32) -> Result<Vec<Page>> {
        let value = self
            .dispatcher
            .meta_weblog_get_recent_posts(&self.session, num_posts)?;
        list::decode_entities("metaWeblog.getRecentPosts", &value)
    }

    pub fn get_template(&self) -> Result<String> {
        let value = self.dispatcher.blogger_get_template(&self.session, "")?;
        rule::string::decode("blogger.getTemplate", &value)
    }

    pub fn get_user_info(&self) -> Result<User> {
        let value = self.dispatcher.blogger_get_user_info(&self.session)?;
        decode_entity("blogger.getUserInfo", &value)
    }

    /// Blogs the user has; WordPress answers with exactly one.
    pub fn get_users_blogs(&self) -> Result<Vec<Blog>> {
        let value = self.dispatcher.blogger_get_users_blogs(&self.session)?;
        list::decode_entities("blogger.getUsersBlogs", &value)
    }

    /// Returns the new category id.
    pub fn new_category(&self, name: &str, slug: &str, parent_id: i32) -> Result<i32> {
        let mut category = Struct::new();
        category.insert("name".to_string(), Value::from(name));
        category.insert("slug".to_string(), Value::from(slug));
        category.insert("parent_id".to_string(), Value::Int(parent_id));

        let value = self.dispatcher.wp_new_category(&self.session, category)?;
        rule::int::decode("wp.newCategory", &value)
    }

    /// Uploads `file`. The whole file is read into memory first.
    pub fn new_media_object<P: AsRef<Path>>(
        &self,
        mime_type: &str,
        file: P,
        overwrite: bool,
    ) -> Result<MediaObject> {
        let path = file.as_ref();
        let bits = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!("Uploading {} ({} bytes, {})", name, bits.len(), mime_type);

        let attachment = Attachment {
            name,
            mime_type: mime_type.to_string(),
            bits,
            overwrite,
        };
        let value = self
            .dispatcher
            .meta_weblog_new_media_object(&self.session, attachment.to_struct())?;
        decode_entity("metaWeblog.newMediaObject", &value)
    }

    /// Returns the new page id.
    pub fn new_page(&self, page: &Page, publish: &str) -> Result<String> {
        let value = self
            .dispatcher
            .wp_new_page(&self.session, page.to_struct(), publish)?;
        rule::id::decode("wp.newPage", &value)
    }

    /// Returns the new post id.
    pub fn new_post(&self, page: &Page, publish: bool) -> Result<String> {
        let value = self
            .dispatcher
            .meta_weblog_new_post(&self.session, page.to_struct(), publish)?;
        rule::id::decode("metaWeblog.newPost", &value)
    }

    pub fn ping(&self, page_linked_from: &str, page_linked_to: &str) -> Result<String> {
        let value = self.dispatcher.pingback_ping(page_linked_from, page_linked_to)?;
        rule::string::decode("pingback.ping", &value)
    }

    pub fn set_template(&self, content: &str) -> Result<bool> {
        let value = self.dispatcher.blogger_set_template(&self.session, content, "")?;
        rule::boolean::decode("blogger.setTemplate", &value)
    }

    /// Always fails: the shape of `wp.suggestCategories` answers was never
    /// determined, so no call is made.
    pub fn suggest_categories(&self, category: &str, max_results: i32) -> Result<Vec<Category>> {
        trace!("suggest_categories - category: {:?} - max_results: {:?}", category, max_results);
        Err(Error::NotImplemented("wp.suggestCategories"))
    }

    pub fn supported_methods(&self) -> Result<Vec<String>> {
        let value = self.dispatcher.mt_supported_methods()?;
        list::decode_strings("mt.supportedMethods", &value)
    }

    pub fn supported_text_filters(&self) -> Result<Vec<String>> {
        let value = self.dispatcher.mt_supported_text_filters()?;
        list::decode_strings("mt.supportedTextFilters", &value)
    }

    pub fn get_post_status_list(&self) -> Result<Vec<PostAndPageStatus>> {
        let value = self.dispatcher.wp_get_post_status_list(&self.session)?;
        status::from_value("wp.getPostStatusList", &value)
    }

    pub fn get_page_status_list(&self) -> Result<Vec<PostAndPageStatus>> {
        let value = self.dispatcher.wp_get_page_status_list(&self.session)?;
        status::from_value("wp.getPageStatusList", &value)
    }
}
