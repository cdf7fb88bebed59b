//! A client for WordPress-style blogs speaking XML-RPC.
//!
//! One endpoint (`xmlrpc.php`) serves the `blogger`, `metaWeblog`, `mt`,
//! `pingback`, `demo` and `wp` method groups. [`Wordpress`] hides the groups
//! behind typed operations:
//!
//! ```no_run
//! use wordpress_xmlrpc::Wordpress;
//!
//! let wp = Wordpress::new("admin", "secret", "http://blog.example.com/xmlrpc.php")?;
//! for page in wp.get_pages()? {
//!     println!("{}: {}", page.page_id, page.title);
//! }
//! # Ok::<(), wordpress_xmlrpc::Error>(())
//! ```

#[macro_use]
extern crate log;

pub mod config;
pub mod error;
#[macro_use]
pub mod mapped;
pub mod dispatch;
pub mod entities;
pub mod list;
pub mod status;
pub mod wordpress;
pub mod xmlrpc;

pub use config::{Config, Credentials, Session};
pub use entities::{
    Attachment, Author, Blog, Category, CustomField, Entity, MediaObject, Page, PageDefinition,
    Ping, PostAndPageStatus, User,
};
pub use error::{Error, Result};
pub use list::Listed;
pub use mapped::{EntityKind, XmlRpcMapped};
pub use wordpress::Wordpress;
pub use xmlrpc::{Transport, Value};
