use crate::error::{ConfigError, ConfigResult};
use crate::types::KeyValueNode;
use pest::Parser;
use pest_derive::Parser;
use std::path::Path;

#[derive(Parser)]
#[grammar = "keyvalues.pest"]
pub struct KeyValuesParser;

impl KeyValuesParser {
    /// Parse a KeyValues (VDF/ACF) body into a nested ordered mapping.
    ///
    /// The root of the returned tree is always an object node; an input that
    /// contains only blank lines yields an empty one. An empty body is
    /// rejected, and malformed input (unbalanced braces, a key line with no
    /// value and no block) fails with a parse error carrying line/column
    /// information.
    ///
    /// ```rust
    /// use steamcfg::KeyValuesParser;
    ///
    /// let root = KeyValuesParser::parse_body("\"AppState\"\n{\n\t\"appid\"\t\"440\"\n}").unwrap();
    /// let appid = root.lookup(&["AppState", "appid"]).unwrap();
    /// assert_eq!(appid.as_str(), Some("440"));
    /// ```
    pub fn parse_body(body: &str) -> ConfigResult<KeyValueNode> {
        if body.is_empty() {
            return Err(ConfigError::invalid_input(
                "body must be a non-empty string",
            ));
        }

        let mut pairs = KeyValuesParser::parse(Rule::document, body)?;
        let document = pairs.next().expect("grammar yields a document node");

        let mut root = KeyValueNode::empty_object();
        Self::build_entries(document.into_inner(), &mut root);
        Ok(root)
    }

    /// Read a manifest file and parse its body.
    pub fn parse_file(path: impl AsRef<Path>) -> ConfigResult<KeyValueNode> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::io(path.display().to_string(), err.to_string()))?;
        Self::parse_body(&body)
    }

    fn build_entries(pairs: pest::iterators::Pairs<'_, Rule>, parent: &mut KeyValueNode) {
        for pair in pairs {
            match pair.as_rule() {
                Rule::block => {
                    let mut inner = pair.into_inner();
                    let name = strip_quotes(inner.next().unwrap().as_str());

                    let mut child = KeyValueNode::empty_object();
                    Self::build_entries(inner, &mut child);
                    parent.insert(name, child);
                }

                Rule::pair => {
                    let mut inner = pair.into_inner();
                    let key = strip_quotes(inner.next().unwrap().as_str());
                    let value = strip_quotes(inner.next().unwrap().as_str());
                    // Tokens past the second are ignored.
                    parent.insert(key, KeyValueNode::Leaf(value));
                }

                Rule::EOI => {}

                _ => {}
            }
        }
    }
}

/// Strip a structural double-quote wrapping from a token.
///
/// Quotes are never part of the logical value; a quoted empty string decodes
/// to the empty string.
fn strip_quotes(token: &str) -> String {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        token[1..token.len() - 1].to_string()
    } else {
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"appid\""), "appid");
        assert_eq!(strip_quotes("appid"), "appid");
        assert_eq!(strip_quotes("\"\""), "");
        assert_eq!(strip_quotes("\""), "\"");
    }

    #[test]
    fn test_value_line_repeating_open_key() {
        // "root" as a value line inside the "root" block must stay a pair.
        let root = KeyValuesParser::parse_body("root\n{\n\tname\troot\n}").unwrap();
        let name = root.lookup(&["root", "name"]).unwrap();
        assert_eq!(name.as_str(), Some("root"));
    }

    #[test]
    fn test_extra_tokens_ignored() {
        let root = KeyValuesParser::parse_body("k\tv\textra\tmore\n").unwrap();
        assert_eq!(root.get("k").unwrap().as_str(), Some("v"));
    }

    #[test]
    fn test_unbalanced_brace_fails() {
        assert!(KeyValuesParser::parse_body("root\n{\n\tk\tv\n").is_err());
        assert!(KeyValuesParser::parse_body("}\n").is_err());
    }
}
