//! Dotted item paths of the form `alias.key1.key2...`.

use super::ConfigError;

/// A parsed item path: the file alias followed by the keys to descend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPath<'a> {
    item: &'a str,
    alias: &'a str,
    keys: Vec<&'a str>,
}

impl<'a> ItemPath<'a> {
    /// Splits `item` on `.`.
    ///
    /// Fails with [`ConfigError::InvalidArgument`] when the item is empty or
    /// has fewer than two segments.
    pub fn parse(item: &'a str) -> Result<Self, ConfigError> {
        if item.is_empty() {
            return Err(ConfigError::InvalidArgument("the item is empty".into()));
        }

        let mut segments = item.split('.');
        let alias = segments.next().unwrap_or_default();
        let keys: Vec<&str> = segments.collect();
        if keys.is_empty() {
            return Err(ConfigError::InvalidArgument(format!(
                "the item '{item}' must have at least two fields separated by dot(.)"
            )));
        }

        Ok(Self { item, alias, keys })
    }

    /// The original, unsplit item string.
    pub fn item(&self) -> &'a str {
        self.item
    }

    /// Segment 0, naming the backing file.
    pub fn alias(&self) -> &'a str {
        self.alias
    }

    /// Segments 1..n.
    pub fn keys(&self) -> &[&'a str] {
        &self.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_alias_and_keys() {
        let path = ItemPath::parse("config.test.alfa").unwrap();
        assert_eq!(path.alias(), "config");
        assert_eq!(path.keys(), &["test", "alfa"]);
        assert_eq!(path.item(), "config.test.alfa");
    }

    #[test]
    fn test_parse_empty_item() {
        let result = ItemPath::parse("");
        assert!(matches!(result, Err(ConfigError::InvalidArgument(_))));
    }

    #[test]
    fn test_parse_single_segment() {
        let result = ItemPath::parse("config");
        assert!(matches!(result, Err(ConfigError::InvalidArgument(_))));
    }

    #[test]
    fn test_parse_keeps_empty_segments() {
        // "config." is two segments, the second one empty; descent reports it.
        let path = ItemPath::parse("config.").unwrap();
        assert_eq!(path.keys(), &[""]);
    }
}
