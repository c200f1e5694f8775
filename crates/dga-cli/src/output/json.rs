use dga_core::error::DgaError;
use serde::Serialize;

pub fn print<T: Serialize>(value: &T) -> Result<(), DgaError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
