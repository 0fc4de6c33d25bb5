//! goctl plugin payload.
//!
//! goctl serializes its plugin context as JSON on the plugin's stdin. Only
//! the API file path and the output directory are used; the parsed `Api`
//! spec goctl also sends is ignored because the documents are re-scanned
//! from disk to pick up the raw struct tags.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PluginPayload {
    #[serde(rename = "ApiFilePath")]
    pub api_file_path: PathBuf,
    #[serde(rename = "Dir")]
    pub dir: PathBuf,
    #[serde(rename = "Style", default)]
    pub style: String,
}

impl PluginPayload {
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut raw = String::new();
        reader
            .read_to_string(&mut raw)
            .context("failed to read goctl plugin payload from stdin")?;
        if raw.trim().is_empty() {
            anyhow::bail!(
                "no goctl plugin payload on stdin; run through `goctl api plugin` or pass --api and --dir"
            );
        }
        serde_json::from_str(&raw).context("failed to decode goctl plugin payload")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_goctl_payload_and_ignores_api_spec() {
        let json = r#"{
            "Api": {"Info": {"Title": "demo"}, "Types": []},
            "ApiFilePath": "/work/user.api",
            "Style": "gozero",
            "Dir": "/work"
        }"#;
        let payload = PluginPayload::from_reader(json.as_bytes()).unwrap();
        assert_eq!(payload.api_file_path, PathBuf::from("/work/user.api"));
        assert_eq!(payload.dir, PathBuf::from("/work"));
        assert_eq!(payload.style, "gozero");
    }

    #[test]
    fn style_is_optional() {
        let json = r#"{"ApiFilePath": "a.api", "Dir": "."}"#;
        assert_eq!(PluginPayload::from_reader(json.as_bytes()).unwrap().style, "");
    }

    #[test]
    fn empty_stdin_explains_how_to_invoke() {
        let err = PluginPayload::from_reader("".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("--api and --dir"));
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let err = PluginPayload::from_reader("{\"Dir\": 3}".as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("plugin payload"));
    }
}
