//! Encode / decode commands

use crate::codec;
use crate::interfaces::cli::CliError;

pub fn encode_id(id: i64) -> Result<(), CliError> {
    println!("{}", codec::encode(id)?);
    Ok(())
}

pub fn decode_code(code: &str) -> Result<(), CliError> {
    println!("{}", codec::decode(code)?);
    Ok(())
}
