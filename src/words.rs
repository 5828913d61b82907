use include_dir::{include_dir, Dir};
use rand::Rng;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

static WORDS_DIR: Dir = include_dir!("src/words");

const BUILTIN_FILE: &str = "categories.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub words: Vec<String>,
}

/// Validated category table. Every category holds at least one word and
/// every word is non-empty lowercase ASCII letters.
#[derive(Debug, Clone, PartialEq)]
pub struct WordBank {
    categories: Vec<Category>,
}

impl WordBank {
    pub fn new(table: BTreeMap<String, Vec<String>>) -> ConfigResult<Self> {
        if table.is_empty() {
            return Err(ConfigError::EmptyCategories);
        }

        let mut categories = Vec::with_capacity(table.len());
        for (name, words) in table {
            if words.is_empty() {
                return Err(ConfigError::EmptyCategory(name));
            }
            if let Some(bad) = words
                .iter()
                .find(|w| w.is_empty() || !w.chars().all(|c| c.is_ascii_alphabetic()))
            {
                return Err(ConfigError::InvalidWord {
                    category: name.clone(),
                    word: bad.clone(),
                });
            }
            let words = words.iter().map(|w| w.to_ascii_lowercase()).collect();
            categories.push(Category { name, words });
        }

        Ok(Self { categories })
    }

    /// The table compiled into the binary.
    pub fn builtin() -> ConfigResult<Self> {
        let origin = PathBuf::from(BUILTIN_FILE);
        let file = WORDS_DIR.get_file(BUILTIN_FILE).ok_or_else(|| ConfigError::Io {
            path: origin.clone(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not embedded"),
        })?;
        let text = file.contents_utf8().unwrap_or_default();
        Self::from_json(text, &origin)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text, path)
    }

    /// Parses a JSON object mapping category names to word lists.
    pub fn from_json(text: &str, origin: &Path) -> ConfigResult<Self> {
        let table: BTreeMap<String, Vec<String>> =
            serde_json::from_str(text).map_err(|source| ConfigError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        Self::new(table)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Uniformly random category, then a uniformly random word from it.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> (&str, &str) {
        let category = &self.categories[rng.gen_range(0..self.categories.len())];
        let word = &category.words[rng.gen_range(0..category.words.len())];
        (&category.name, word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;
    use tempfile::tempdir;

    fn table(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(name, words)| {
                (
                    name.to_string(),
                    words.iter().map(|w| w.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn builtin_table_loads() {
        let bank = WordBank::builtin().unwrap();
        assert_eq!(bank.categories().len(), 7);
        let animals = bank.category("animals").unwrap();
        assert!(animals.words.contains(&"dolphin".to_string()));
        assert!(bank.categories().iter().all(|c| c.words.len() == 8));
    }

    #[test]
    fn words_are_lowercased() {
        let bank = WordBank::new(table(&[("pets", &["Cat", "DOG"])])).unwrap();
        assert_eq!(bank.category("pets").unwrap().words, vec!["cat", "dog"]);
    }

    #[test]
    fn rejects_empty_table() {
        assert_matches!(
            WordBank::new(BTreeMap::new()),
            Err(ConfigError::EmptyCategories)
        );
    }

    #[test]
    fn rejects_empty_category() {
        let err = WordBank::new(table(&[("pets", &["cat"]), ("void", &[])])).unwrap_err();
        assert_matches!(err, ConfigError::EmptyCategory(name) if name == "void");
    }

    #[test]
    fn rejects_non_alphabetic_words() {
        for bad in ["ice cream", "r2d2", "", "café"] {
            let err = WordBank::new(table(&[("food", &["pie", bad])])).unwrap_err();
            assert_matches!(err, ConfigError::InvalidWord { word, .. } if word == bad);
        }
    }

    #[test]
    fn choose_covers_every_category() {
        let bank = WordBank::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let seen: HashSet<String> = (0..500)
            .map(|_| bank.choose(&mut rng).0.to_string())
            .collect();
        assert_eq!(seen.len(), bank.categories().len());
    }

    #[test]
    fn chosen_word_belongs_to_chosen_category() {
        let bank = WordBank::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let (category, word) = bank.choose(&mut rng);
            assert!(bank
                .category(category)
                .unwrap()
                .words
                .iter()
                .any(|w| w == word));
        }
    }

    #[test]
    fn loads_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.json");
        fs::write(&path, r#"{ "birds": ["robin", "heron"] }"#).unwrap();
        let bank = WordBank::from_file(&path).unwrap();
        assert_eq!(bank.categories()[0].name, "birds");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let err = WordBank::from_file(dir.path().join("nope.json")).unwrap_err();
        assert_matches!(err, ConfigError::Io { .. });
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = WordBank::from_json("[1, 2]", Path::new("inline")).unwrap_err();
        assert_matches!(err, ConfigError::Parse { .. });
    }
}
