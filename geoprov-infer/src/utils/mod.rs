//! Utility helpers shared by signal producers

pub mod url;

pub use self::url::{absolute_url, registered_domain, top_level_label, url_host, validate_target};
