pub mod shortener;

pub use shortener::{ShortenerService, short_url};
