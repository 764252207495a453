use crate::lang::source_buffer::SourceLocation;
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
};

/// The information stored in the dictionary for each user defined word.
#[derive(Clone, PartialEq, Eq, PartialOrd, Hash, Debug)]
pub struct WordInfo {
    /// The location in the word file where the word was defined.
    pub location: SourceLocation,

    /// The name of the word, as it was first written.
    pub name: String,

    /// The text the word expands to.  This is split and evaluated again every time the word is
    /// used, so it may refer to words that are defined after it.
    pub meaning: String,
}

impl WordInfo {
    pub fn new(location: SourceLocation, name: String, meaning: String) -> WordInfo {
        WordInfo {
            location,
            name,
            meaning,
        }
    }
}

/// Dictionary lookups ignore ASCII case.
fn key_for(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// The dictionary of user defined words.  Words are kept in the order they were first defined,
/// and looked up by name without regard to case.  Redefining a word replaces its meaning but keeps
/// its place in the order.
#[derive(Default)]
pub struct Dictionary {
    words: Vec<WordInfo>,
    index: HashMap<String, usize>,
}

/// List the words, oldest first, with the names lined up.
impl Display for Dictionary {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let max_size = self
            .words
            .iter()
            .map(|word| word.name.len())
            .max()
            .unwrap_or(0);

        for word in self.words.iter() {
            writeln!(
                formatter,
                "{:width$}  {}",
                word.name,
                word.meaning,
                width = max_size
            )?;
        }

        Ok(())
    }
}

impl Dictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Dictionary {
        Dictionary {
            words: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Define a word.  If the name is already known its meaning is replaced in place and the old
    /// definition is handed back, otherwise the word is added to the end of the dictionary.
    pub fn define(&mut self, info: WordInfo) -> Option<WordInfo> {
        let key = key_for(&info.name);

        match self.index.get(&key) {
            Some(&position) => {
                let existing = &mut self.words[position];
                let previous = existing.clone();

                existing.meaning = info.meaning;
                existing.location = info.location;

                Some(previous)
            }

            None => {
                let _ = self.index.insert(key, self.words.len());
                self.words.push(info);

                None
            }
        }
    }

    /// Find a word by name, ignoring case.
    pub fn try_get(&self, name: &str) -> Option<&WordInfo> {
        self.index
            .get(&key_for(name))
            .map(|&position| &self.words[position])
    }

    /// Forget every word.
    pub fn clear(&mut self) {
        self.words.clear();
        self.index.clear();
    }

    /// Iterate over the words in the order they were first defined.
    pub fn iter(&self) -> impl Iterator<Item = &WordInfo> {
        self.words.iter()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(name: &str, meaning: &str) -> WordInfo {
        WordInfo::new(SourceLocation::new(), name.to_string(), meaning.to_string())
    }

    fn names(dictionary: &Dictionary) -> Vec<&str> {
        dictionary.iter().map(|word| word.name.as_str()).collect()
    }

    #[test]
    fn lookup_ignores_case() {
        let mut dictionary = Dictionary::new();

        assert!(dictionary.define(word("Double", "2 *")).is_none());

        assert_eq!(dictionary.try_get("double").unwrap().meaning, "2 *");
        assert_eq!(dictionary.try_get("DOUBLE").unwrap().name, "Double");
        assert!(dictionary.try_get("triple").is_none());
    }

    #[test]
    fn keeps_definition_order() {
        let mut dictionary = Dictionary::new();

        dictionary.define(word("c", "3"));
        dictionary.define(word("a", "1"));
        dictionary.define(word("b", "2"));

        assert_eq!(names(&dictionary), vec!["c", "a", "b"]);
    }

    #[test]
    fn redefinition_overwrites_in_place() {
        let mut dictionary = Dictionary::new();

        dictionary.define(word("a", "1"));
        dictionary.define(word("b", "2"));

        let previous = dictionary.define(word("A", "10"));

        assert_eq!(previous.unwrap().meaning, "1");
        assert_eq!(names(&dictionary), vec!["a", "b"]);
        assert_eq!(dictionary.try_get("a").unwrap().meaning, "10");
        assert_eq!(dictionary.len(), 2);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut dictionary = Dictionary::new();

        dictionary.define(word("a", "1"));
        dictionary.clear();

        assert!(dictionary.is_empty());
        assert!(dictionary.try_get("a").is_none());
    }

    #[test]
    fn listing_lines_up_names() {
        let mut dictionary = Dictionary::new();

        dictionary.define(word("pi", "3.14159"));
        dictionary.define(word("double", "2 *"));

        assert_eq!(dictionary.to_string(), "pi      3.14159\ndouble  2 *\n");
    }
}
