//! Corpus: texts and their aggregated token count.
use super::attributes::Attributes;
use super::text::Text;

/// An ordered collection of [Text] with corpus-level metadata.
///
/// The texts are only reachable through the methods below,
/// each of them keeping [Corpus::token_count] equal to the sum of the texts' token counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    name: String,
    attributes: Attributes,
    texts: Vec<Text>,
    token_count: usize,
}

impl Corpus {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            texts: Vec::new(),
            token_count: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn texts(&self) -> &[Text] {
        &self.texts
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Sum of the token counts of every text.
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    pub fn push(&mut self, text: Text) {
        self.token_count += text.token_count();
        self.texts.push(text);
    }

    /// Inserts a text at `idx`.
    ///
    /// # Panics
    /// Panics if `idx > len`.
    pub fn insert(&mut self, idx: usize, text: Text) {
        self.token_count += text.token_count();
        self.texts.insert(idx, text);
    }

    /// Removes and returns the text at `idx`, if there's one.
    pub fn remove(&mut self, idx: usize) -> Option<Text> {
        if idx >= self.texts.len() {
            return None;
        }
        let text = self.texts.remove(idx);
        self.token_count -= text.token_count();
        Some(text)
    }

    /// Replaces the text at `idx`, returning the previous one.
    ///
    /// Returns [None] and leaves the corpus untouched if `idx` is out of bounds.
    pub fn replace(&mut self, idx: usize, text: Text) -> Option<Text> {
        let slot = self.texts.get_mut(idx)?;
        self.token_count = self.token_count - slot.token_count() + text.token_count();
        Some(std::mem::replace(slot, text))
    }

    /// Runs `f` on the text at `idx`, then updates the token count.
    pub fn update<F, R>(&mut self, idx: usize, f: F) -> Option<R>
    where
        F: FnOnce(&mut Text) -> R,
    {
        let text = self.texts.get_mut(idx)?;
        let before = text.token_count();
        let ret = f(text);
        self.token_count = self.token_count - before + text.token_count();
        Some(ret)
    }

    /// Removes every text.
    pub fn clear(&mut self) {
        self.texts.clear();
        self.token_count = 0;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Text> {
        self.texts.iter()
    }
}

impl Extend<Text> for Corpus {
    fn extend<I: IntoIterator<Item = Text>>(&mut self, iter: I) {
        for text in iter {
            self.push(text);
        }
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Text;
    type IntoIter = std::slice::Iter<'a, Text>;

    fn into_iter(self) -> Self::IntoIter {
        self.texts.iter()
    }
}
