//! Forest definition files
//!
//! A forest file is TOML with one `[[node]]` table per root; each node may
//! nest its own `[[node.children]]` tables:
//!
//! ```toml
//! [[node]]
//! id = "settings"
//! title = "Settings"
//! icon = "gear"
//!
//!   [[node.children]]
//!   id = "network"
//!   title = "Network"
//!   subtitle = "Wi-Fi, VPN"
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::instrument;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::NodeSpec;

/// Raw node table as written in the file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    id: String,
    title: String,
    subtitle: Option<String>,
    #[serde(default)]
    icon: String,
    expanded: Option<bool>,
    #[serde(default)]
    children: Vec<RawNode>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawForest {
    #[serde(default)]
    node: Vec<RawNode>,
}

impl From<RawNode> for NodeSpec {
    fn from(raw: RawNode) -> Self {
        let mut spec = NodeSpec::new(raw.id, raw.title).icon(raw.icon);
        spec.data.subtitle = raw.subtitle;
        spec.expanded = raw.expanded;
        spec.children(raw.children.into_iter().map(NodeSpec::from))
    }
}

/// Parse forest file content into root specs.
///
/// `path` is only used for error messages.
#[instrument(level = "debug", skip(content))]
pub fn parse_forest(content: &str, path: &Path) -> ApplicationResult<Vec<NodeSpec>> {
    let raw: RawForest = toml::from_str(content).map_err(|e| ApplicationError::ForestFormat {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(raw.node.into_iter().map(NodeSpec::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_nodes() {
        let content = r#"
[[node]]
id = "a"
title = "A"
icon = "folder"
expanded = true

  [[node.children]]
  id = "b"
  title = "B"
  subtitle = "second line"

[[node]]
id = "e"
title = "E"
"#;
        let roots = parse_forest(content, Path::new("forest.toml")).unwrap();

        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0].data.icon, "folder");
        assert_eq!(roots[0].expanded, Some(true));
        assert_eq!(roots[0].children[0].data.subtitle.as_deref(), Some("second line"));
        assert_eq!(roots[1].data.icon, "");
        assert!(roots[1].children.is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        let content = r#"
[[node]]
id = "a"
title = "A"
colour = "red"
"#;
        let err = parse_forest(content, Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ApplicationError::ForestFormat { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_parse_empty_document_is_empty_forest() {
        let roots = parse_forest("", Path::new("empty.toml")).unwrap();
        assert!(roots.is_empty());
    }
}
