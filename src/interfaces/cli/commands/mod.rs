mod codec;
mod config_gen;
mod links;

pub use codec::{decode_code, encode_id};
pub use config_gen::config_generate;
pub use links::{resolve_code, shorten_url, show_info};
