//! Blog entities and their wire field tables.

use time::PrimitiveDateTime;

use crate::error::Result;
use crate::mapped::{EntityKind, XmlRpcMapped};
use crate::xmlrpc::encoding::Struct;

xmlrpc_struct! {
    /// A post or a page, in full.
    ///
    /// `metaWeblog` and `wp` share this shape: posts fill `postid`, pages fill
    /// `page_id` and the `wp_page_*` fields.
    Page => pub struct Page {
        "dateCreated" => date_created: Option<PrimitiveDateTime> as date,
        "userid" => userid: String as string,
        "page_id" => page_id: i32 as int,
        "page_status" => page_status: String as string,
        "description" => description: String as string,
        "title" => title: String as string,
        "link" => link: String as string,
        "permaLink" => perma_link: String as string,
        /// Category names, not ids.
        "categories" => categories: Vec<String> as strings,
        "excerpt" => excerpt: String as string,
        "text_more" => text_more: String as string,
        "mt_allow_comments" => mt_allow_comments: i32 as int,
        "mt_allow_pings" => mt_allow_pings: i32 as int,
        "wp_slug" => wp_slug: String as string,
        "wp_password" => wp_password: String as string,
        "wp_author" => wp_author: String as string,
        "wp_page_parent_id" => wp_page_parent_id: i32 as int,
        "wp_page_parent_title" => wp_page_parent_title: String as string,
        "wp_page_order" => wp_page_order: i32 as int,
        "wp_author_id" => wp_author_id: String as string,
        "wp_author_display_name" => wp_author_display_name: String as string,
        "postid" => postid: String as string,
        "mt_excerpt" => mt_excerpt: String as string,
        "mt_text_more" => mt_text_more: String as string,
        "mt_keywords" => mt_keywords: String as string,
        "custom_fields" => custom_fields: Vec<CustomField> as entities,
    }
}

xmlrpc_struct! {
    /// Short form returned by `wp.getPageList`.
    PageDefinition => pub struct PageDefinition {
        "page_id" => page_id: i32 as int,
        "page_title" => page_title: String as string,
        "page_parent_id" => page_parent_id: i32 as int,
        "dateCreated" => date_created: Option<PrimitiveDateTime> as date,
    }
}

xmlrpc_struct! {
    Category => pub struct Category {
        "categoryId" => category_id: String as string,
        "parentId" => parent_id: String as string,
        "description" => description: String as string,
        "categoryName" => category_name: String as string,
        "htmlUrl" => html_url: String as string,
        "rssUrl" => rss_url: String as string,
    }
}

xmlrpc_struct! {
    Author => pub struct Author {
        "user_id" => user_id: String as string,
        "user_login" => user_login: String as string,
        "display_name" => display_name: String as string,
        "user_email" => user_email: String as string,
        "meta_value" => meta_value: String as string,
    }
}

xmlrpc_struct! {
    /// The authenticated user, from `blogger.getUserInfo`.
    User => pub struct User {
        "nickname" => nickname: String as string,
        "userid" => userid: String as string,
        "url" => url: String as string,
        "lastname" => lastname: String as string,
        "firstname" => firstname: String as string,
        "email" => email: String as string,
    }
}

xmlrpc_struct! {
    Blog => pub struct Blog {
        "isAdmin" => is_admin: bool as boolean,
        "url" => url: String as string,
        "blogid" => blogid: String as string,
        "blogName" => blog_name: String as string,
        "xmlrpc" => xmlrpc: String as string,
    }
}

xmlrpc_struct! {
    /// Where an uploaded file ended up.
    MediaObject => pub struct MediaObject {
        "file" => file: String as string,
        "url" => url: String as string,
        "type" => mime_type: String as string,
    }
}

xmlrpc_struct! {
    /// A file on its way to `metaWeblog.newMediaObject`.
    Attachment => pub struct Attachment {
        "name" => name: String as string,
        "type" => mime_type: String as string,
        "bits" => bits: Vec<u8> as base64,
        "overwrite" => overwrite: bool as boolean,
    }
}

xmlrpc_struct! {
    /// A trackback ping.
    Ping => pub struct Ping {
        "pingTitle" => ping_title: String as string,
        "pingURL" => ping_url: String as string,
        "pingIP" => ping_ip: String as string,
    }
}

xmlrpc_struct! {
    PostAndPageStatus => pub struct PostAndPageStatus {
        "status" => status: String as string,
        "description" => description: String as string,
    }
}

xmlrpc_struct! {
    CustomField => pub struct CustomField {
        "id" => id: String as string,
        "key" => key: String as string,
        "value" => value: String as string,
    }
}

impl PostAndPageStatus {
    pub fn new(status: &str, description: &str) -> PostAndPageStatus {
        PostAndPageStatus {
            status: status.to_string(),
            description: description.to_string(),
        }
    }
}

/// Any entity, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Page(Page),
    PageDefinition(PageDefinition),
    Category(Category),
    Author(Author),
    User(User),
    Blog(Blog),
    MediaObject(MediaObject),
    Attachment(Attachment),
    Ping(Ping),
    PostAndPageStatus(PostAndPageStatus),
    CustomField(CustomField),
}

impl EntityKind {
    /// Decodes `members` as an entity of this kind.
    pub fn decode(self, members: &Struct) -> Result<Entity> {
        Ok(match self {
            EntityKind::Page => Entity::Page(Page::from_struct(members)?),
            EntityKind::PageDefinition => {
                Entity::PageDefinition(PageDefinition::from_struct(members)?)
            }
            EntityKind::Category => Entity::Category(Category::from_struct(members)?),
            EntityKind::Author => Entity::Author(Author::from_struct(members)?),
            EntityKind::User => Entity::User(User::from_struct(members)?),
            EntityKind::Blog => Entity::Blog(Blog::from_struct(members)?),
            EntityKind::MediaObject => Entity::MediaObject(MediaObject::from_struct(members)?),
            EntityKind::Attachment => Entity::Attachment(Attachment::from_struct(members)?),
            EntityKind::Ping => Entity::Ping(Ping::from_struct(members)?),
            EntityKind::PostAndPageStatus => {
                Entity::PostAndPageStatus(PostAndPageStatus::from_struct(members)?)
            }
            EntityKind::CustomField => Entity::CustomField(CustomField::from_struct(members)?),
        })
    }

    pub fn fields(self) -> &'static [&'static str] {
        match self {
            EntityKind::Page => Page::FIELDS,
            EntityKind::PageDefinition => PageDefinition::FIELDS,
            EntityKind::Category => Category::FIELDS,
            EntityKind::Author => Author::FIELDS,
            EntityKind::User => User::FIELDS,
            EntityKind::Blog => Blog::FIELDS,
            EntityKind::MediaObject => MediaObject::FIELDS,
            EntityKind::Attachment => Attachment::FIELDS,
            EntityKind::Ping => Ping::FIELDS,
            EntityKind::PostAndPageStatus => PostAndPageStatus::FIELDS,
            EntityKind::CustomField => CustomField::FIELDS,
        }
    }
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match *self {
            Entity::Page(_) => EntityKind::Page,
            Entity::PageDefinition(_) => EntityKind::PageDefinition,
            Entity::Category(_) => EntityKind::Category,
            Entity::Author(_) => EntityKind::Author,
            Entity::User(_) => EntityKind::User,
            Entity::Blog(_) => EntityKind::Blog,
            Entity::MediaObject(_) => EntityKind::MediaObject,
            Entity::Attachment(_) => EntityKind::Attachment,
            Entity::Ping(_) => EntityKind::Ping,
            Entity::PostAndPageStatus(_) => EntityKind::PostAndPageStatus,
            Entity::CustomField(_) => EntityKind::CustomField,
        }
    }

    pub fn to_struct(&self) -> Struct {
        match *self {
            Entity::Page(ref e) => e.to_struct(),
            Entity::PageDefinition(ref e) => e.to_struct(),
            Entity::Category(ref e) => e.to_struct(),
            Entity::Author(ref e) => e.to_struct(),
            Entity::User(ref e) => e.to_struct(),
            Entity::Blog(ref e) => e.to_struct(),
            Entity::MediaObject(ref e) => e.to_struct(),
            Entity::Attachment(ref e) => e.to_struct(),
            Entity::Ping(ref e) => e.to_struct(),
            Entity::PostAndPageStatus(ref e) => e.to_struct(),
            Entity::CustomField(ref e) => e.to_struct(),
        }
    }
}
