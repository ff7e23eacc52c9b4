//! CI manifest scaffolding: make sure the project's CI runs `tdver check`.

use crate::error::Result;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

const SCRIPT_KEY: &str = "script";

/// Prepend `command` to the manifest's `script` entry unless it is already
/// there, creating the manifest if it is missing or empty.
///
/// A manifest that has content but no `script` key is left as it is.
pub fn ensure_validation_step(path: &Path, command: &str) -> Result<()> {
    let existing = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    let document: Value = if existing.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml::from_str(&existing)?
    };

    let updated = with_validation_step(document, command);
    fs::write(path, serde_yaml::to_string(&updated)?)?;
    debug!(path = %path.display(), "CI manifest updated");
    Ok(())
}

fn with_validation_step(document: Value, command: &str) -> Value {
    let mut mapping = match document {
        Value::Null => {
            let mut fresh = Mapping::new();
            fresh.insert(SCRIPT_KEY.into(), command.into());
            return Value::Mapping(fresh);
        }
        Value::Mapping(mapping) => mapping,
        other => return other,
    };

    if let Some(script) = mapping.get_mut(SCRIPT_KEY) {
        match script {
            Value::String(existing) if !existing.contains(command) => {
                let old = std::mem::take(existing);
                *script = Value::Sequence(vec![command.into(), Value::String(old)]);
            }
            Value::Sequence(steps) if !steps.iter().any(|s| s.as_str() == Some(command)) => {
                steps.insert(0, command.into());
            }
            _ => {}
        }
    }

    Value::Mapping(mapping)
}
