//! Input item loading
//!
//! Items are read as JSON from a file, or from stdin when the path is `-`.
//! A top-level array is a batch; a single object is a batch of one.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// Reads the input items from `path`
pub fn load_items(path: &Path) -> Result<Vec<Value>> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read items from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read items from {}", path.display()))?
    };

    parse_items(&raw)
}

/// Parses a JSON document into a batch of items
pub fn parse_items(raw: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(raw).context("Input is not valid JSON")?;

    match value {
        Value::Array(items) => Ok(items),
        Value::Object(_) => Ok(vec![value]),
        other => bail!("Expected a JSON array or object of items, got {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_array_is_a_batch() {
        let items = parse_items(r#"[{"connectionId": "a"}, {"connectionId": "b"}]"#).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["connectionId"], "b");
    }

    #[test]
    fn test_object_is_a_batch_of_one() {
        let items = parse_items(r#"{"connectionId": "a"}"#).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_rejects_scalars_and_garbage() {
        assert!(parse_items("42").is_err());
        assert!(parse_items("{not json").is_err());
    }

    #[test]
    fn test_load_items_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"connectionId": "conn_1"}}]"#).unwrap();

        let items = load_items(file.path()).unwrap();
        assert_eq!(items[0]["connectionId"], "conn_1");
    }

    #[test]
    fn test_load_items_missing_file() {
        let err = load_items(Path::new("/nonexistent/items.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/items.json"));
    }
}
