//! `name=value` argument parsing.

use anyhow::{bail, Result};
use flix_sdk::InvocationRequest;
use serde_json::Value;

/// Parse one `name=value` pair.
///
/// The value is read as JSON when it parses (`true`, `[1,2]`), and as a
/// plain string otherwise (`0x01cf0e2f2f715450`). A bare number keeps its
/// literal text so fixed-point and big integer values reach the codec
/// unrounded.
pub fn parse_arg(raw: &str) -> Result<(String, Value)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("Invalid argument '{}': expected name=value", raw);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Invalid argument '{}': empty name", raw);
    }
    let value = match serde_json::from_str(value) {
        Ok(Value::Number(_)) => Value::String(value.trim().to_string()),
        Ok(parsed) => parsed,
        Err(_) => Value::String(value.to_string()),
    };
    Ok((name.to_string(), value))
}

/// Build a request from repeated `--arg` flags. Later flags win.
pub fn parse_request(raw: &[String]) -> Result<InvocationRequest> {
    let mut request = InvocationRequest::new();
    for arg in raw {
        let (name, value) = parse_arg(arg)?;
        request.insert(name, value);
    }
    Ok(request)
}
