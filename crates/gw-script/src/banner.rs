//! The packaged-script metadata banner (spec.md §4.8/§6: "a script carries a
//! leading line `//{...}`").

use crate::error::{ScriptError, ScriptResult};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScriptMetadata {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub plugins: Vec<String>,
    #[serde(default)]
    pub extra: Option<serde_json::Value>,
}

/// Strips the leading `//` and JSON-parses the rest of the first line.
///
/// Only the first line is inspected — everything after it is script body,
/// not metadata.
pub fn parse_banner(source: &str) -> ScriptResult<ScriptMetadata> {
    let first_line = source.lines().next().unwrap_or("");
    let Some(json) = first_line.strip_prefix("//") else {
        return Err(ScriptError::MissingBanner);
    };
    serde_json::from_str(json.trim()).map_err(ScriptError::InvalidBanner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_well_formed_banner() {
        let source = r#"//{"name":"demo","description":"a demo script","plugins":["core"]}
        rest of the script here"#;
        let meta = parse_banner(source).unwrap();
        assert_eq!(meta.name, "demo");
        assert_eq!(meta.description, "a demo script");
        assert_eq!(meta.plugins, vec!["core".to_string()]);
        assert!(meta.extra.is_none());
    }

    #[test]
    fn rejects_a_missing_marker() {
        let source = "{\"name\":\"demo\"}";
        assert!(matches!(parse_banner(source), Err(ScriptError::MissingBanner)));
    }

    #[test]
    fn rejects_malformed_json() {
        let source = "//not json";
        assert!(matches!(parse_banner(source), Err(ScriptError::InvalidBanner(_))));
    }

    #[test]
    fn only_the_first_line_is_parsed() {
        let source = "//{\"name\":\"demo\",\"description\":\"d\"}\n//{\"name\":\"ignored\"}";
        let meta = parse_banner(source).unwrap();
        assert_eq!(meta.name, "demo");
    }
}
