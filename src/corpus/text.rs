//! Text records.
use super::attributes::{AttributeValue, Attributes};
use crate::error::Error;

/// Name of the attribute mirroring [Text::token_count].
pub const TOKEN_COUNT: &str = "tokenCount";

/// Counts tokens the cheap way: one per space.
pub fn count_tokens(content: &str) -> usize {
    content.bytes().filter(|b| *b == b' ').count()
}

/// A row of the input table: content and metadata.
///
/// The token count is derived from the content and kept in sync by [Text::set_content].
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    content: String,
    attributes: Attributes,
    token_count: usize,
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl Text {
    pub fn new() -> Self {
        let mut attributes = Attributes::new();
        attributes.insert(TOKEN_COUNT, 0usize);
        Self {
            content: String::new(),
            attributes,
            token_count: 0,
        }
    }

    pub fn with_content<S: Into<String>>(content: S) -> Self {
        let mut text = Self::new();
        text.set_content(content);
        text
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Sets the content and updates the token count.
    pub fn set_content<S: Into<String>>(&mut self, content: S) {
        self.content = content.into();
        self.token_count = count_tokens(&self.content);
        self.attributes.insert(TOKEN_COUNT, self.token_count);
    }

    pub fn token_count(&self) -> usize {
        self.token_count
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Sets a metadata attribute.
    ///
    /// The token count attribute is derived and can't be set this way.
    pub fn set_attribute<K, V>(&mut self, key: K, value: V) -> Result<Option<AttributeValue>, Error>
    where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        let key = key.into();
        if key == TOKEN_COUNT {
            return Err(Error::Custom(format!(
                "{} is derived from the content and can't be set",
                TOKEN_COUNT
            )));
        }
        Ok(self.attributes.insert(key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_count_follows_content() {
        let mut t = Text::new();
        assert_eq!(t.token_count(), 0);
        assert_eq!(t.attribute(TOKEN_COUNT), Some(&AttributeValue::Integer(0)));

        t.set_content("a b c");
        assert_eq!(t.token_count(), 2);
        assert_eq!(t.attribute(TOKEN_COUNT), Some(&AttributeValue::Integer(2)));

        t.set_content("hallo welt");
        assert_eq!(t.token_count(), 1);

        t.set_content("");
        assert_eq!(t.token_count(), 0);
        assert!(t.is_empty());
    }

    #[test]
    fn only_spaces_count() {
        assert_eq!(count_tokens("a\tb\nc"), 0);
        assert_eq!(count_tokens("  "), 2);
        assert_eq!(count_tokens("über alles hinaus"), 2);
    }

    #[test]
    fn token_count_is_not_settable() {
        let mut t = Text::with_content("a b");
        assert!(t.set_attribute(TOKEN_COUNT, 12i64).is_err());
        assert_eq!(t.attribute(TOKEN_COUNT), Some(&AttributeValue::Integer(1)));
    }

    #[test]
    fn attributes_keep_order() {
        let mut t = Text::new();
        t.set_attribute("id", "1").unwrap();
        t.set_content("hallo welt");
        t.set_attribute("author", "anna").unwrap();

        let keys: Vec<&str> = t.attributes().iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![TOKEN_COUNT, "id", "author"]);
    }
}
