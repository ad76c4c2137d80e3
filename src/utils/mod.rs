pub mod url_validator;

pub use url_validator::{UrlPolicy, validate_url};
