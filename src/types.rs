//! Tree model for parsed KeyValues manifests.
//!
//! A parsed document is a [`KeyValueNode`]: either a UTF-8 leaf string or an
//! object holding insertion-ordered `(key, child)` entries. Keys are unique
//! per level (a duplicate key overwrites the earlier value in place, keeping
//! its original position). Entries are backed by a `Vec` rather than a hash
//! map so that source order survives; inputs are small manifest files, so
//! linear lookup is fine.

use crate::error::{ConfigError, ConfigResult};

/// A node in a parsed KeyValues tree
#[derive(Debug, Clone, PartialEq)]
pub enum KeyValueNode {
    /// Leaf value
    Leaf(String),

    /// Interior node: ordered mapping from key to child
    Object(Vec<(String, KeyValueNode)>),
}

impl KeyValueNode {
    /// Create an empty object node
    pub fn empty_object() -> Self {
        KeyValueNode::Object(Vec::new())
    }

    /// Get the leaf string, if this node is a leaf
    pub fn as_str(&self) -> Option<&str> {
        match self {
            KeyValueNode::Leaf(value) => Some(value),
            KeyValueNode::Object(_) => None,
        }
    }

    /// Get the ordered entries, if this node is an object
    pub fn as_object(&self) -> Option<&[(String, KeyValueNode)]> {
        match self {
            KeyValueNode::Leaf(_) => None,
            KeyValueNode::Object(entries) => Some(entries),
        }
    }

    /// Look up a direct child by key
    pub fn get(&self, key: &str) -> Option<&KeyValueNode> {
        self.as_object()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, node)| node)
    }

    /// Walk a path of keys from this node
    ///
    /// ```rust
    /// use steamcfg::KeyValuesParser;
    ///
    /// let root = KeyValuesParser::parse_body("a\n{\n\tb\n\t{\n\t\tc\td\n\t}\n}").unwrap();
    /// assert_eq!(root.lookup(&["a", "b", "c"]).unwrap().as_str(), Some("d"));
    /// ```
    pub fn lookup(&self, path: &[&str]) -> Option<&KeyValueNode> {
        let mut node = self;
        for key in path {
            node = node.get(key)?;
        }
        Some(node)
    }

    /// Insert a child under this object node.
    ///
    /// A duplicate key overwrites the earlier child in place; its insertion
    /// position does not move.
    pub fn insert(&mut self, key: String, node: KeyValueNode) {
        if let KeyValueNode::Object(entries) = self {
            if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
                slot.1 = node;
            } else {
                entries.push((key, node));
            }
        }
    }

    fn require_leaf(&self, path: &[&str]) -> ConfigResult<&str> {
        self.lookup(path)
            .and_then(KeyValueNode::as_str)
            .ok_or_else(|| ConfigError::missing_field(path.join("/")))
    }
}

/// The identifying fields of an app manifest (`appmanifest_*.acf`)
#[derive(Debug, Clone, PartialEq)]
pub struct AppManifest {
    pub app_id: String,
    pub name: String,
}

impl AppManifest {
    /// Read the app identifier and display name out of a parsed manifest tree.
    pub fn from_root(root: &KeyValueNode) -> ConfigResult<AppManifest> {
        Ok(AppManifest {
            app_id: root.require_leaf(&["AppState", "appid"])?.to_string(),
            name: root.require_leaf(&["AppState", "name"])?.to_string(),
        })
    }
}

/// One entry of Steam's per-app compatibility tool mapping
#[derive(Debug, Clone, PartialEq)]
pub struct CompatToolMapping {
    pub app_id: String,
    pub tool: String,
}

/// Read the compatibility tool mapping table from a parsed `config.vdf` tree.
///
/// Entries without a `name` leaf are skipped. Fails with a missing-field
/// error when the table itself is absent.
pub fn compat_tool_mappings(root: &KeyValueNode) -> ConfigResult<Vec<CompatToolMapping>> {
    const TABLE: [&str; 5] = [
        "InstallConfigStore",
        "Software",
        "Valve",
        "Steam",
        "CompatToolMapping",
    ];

    let table = root
        .lookup(&TABLE)
        .and_then(KeyValueNode::as_object)
        .ok_or_else(|| ConfigError::missing_field(TABLE.join("/")))?;

    Ok(table
        .iter()
        .filter_map(|(app_id, node)| {
            let tool = node.get("name")?.as_str()?;
            Some(CompatToolMapping {
                app_id: app_id.clone(),
                tool: tool.to_string(),
            })
        })
        .collect())
}
