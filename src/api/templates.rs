//! Static assets for the task manager UI, embedded at build time.

/// Main page.
pub const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Client script driving the page through the JSON API.
pub const APP_JS: &str = include_str!("../../static/app.js");
