//! Word valence lexicon.
//!
//! Valences use the VADER scale: `-4.0` (most negative) to `4.0` (most
//! positive). The built-in table covers the general and news vocabulary the
//! curator sees most often; the full `vader_lexicon.txt` can replace it via
//! `sentiment.lexicon_path`.

use std::collections::HashMap;
use std::path::Path;

use crate::{Error, Result};

/// Built-in word valences in VADER format, one `token<TAB>mean` per line.
pub(crate) const BUILTIN_LEXICON: &str = include_str!("../../data/lexicon.tsv");

/// Lowercase word to valence map
#[derive(Debug, Clone)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Lexicon {
    /// The embedded lexicon
    pub fn builtin() -> Self {
        Self::from_vader_str(BUILTIN_LEXICON)
    }

    /// Parse VADER-format text: `token<TAB>mean<TAB>stddev<TAB>ratings`.
    ///
    /// Only the first two columns are used. Blank lines and lines that do
    /// not parse are skipped.
    pub fn from_vader_str(content: &str) -> Self {
        let mut valences = HashMap::new();
        let mut skipped = 0usize;

        for line in content.lines() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let mut columns = line.split('\t');
            let parsed = match (columns.next(), columns.next()) {
                (Some(token), Some(mean)) if !token.is_empty() => {
                    mean.trim().parse::<f64>().ok().map(|v| (token.to_lowercase(), v))
                }
                _ => None,
            };

            match parsed {
                Some((token, valence)) => {
                    valences.insert(token, valence);
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} malformed lexicon lines", skipped);
        }

        Self { valences }
    }

    /// Load a VADER-format lexicon file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read lexicon {}: {}", path.display(), e))
        })?;

        let lexicon = Self::from_vader_str(&content);
        if lexicon.is_empty() {
            return Err(Error::Config(format!(
                "Lexicon {} contains no entries",
                path.display()
            )));
        }

        tracing::info!("Loaded {} lexicon entries from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    /// Valence of a lowercase word
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.valences.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_is_within_scale() {
        for line in BUILTIN_LEXICON.lines() {
            let (word, valence) = line.split_once('\t').unwrap();
            let valence: f64 = valence.parse().unwrap();
            assert!((-4.0..=4.0).contains(&valence), "{word} out of range");
            assert_eq!(word, word.to_lowercase(), "{word} must be lowercase");
        }
    }

    #[test]
    fn test_builtin_parses_every_line_once() {
        let lexicon = Lexicon::builtin();
        assert_eq!(lexicon.len(), BUILTIN_LEXICON.lines().count());
    }

    #[test]
    fn test_builtin_covers_news_vocabulary() {
        let lexicon = Lexicon::builtin();
        for word in ["hopes", "deadly", "warns", "lead", "crisis", "recovery", "killed"] {
            assert!(lexicon.contains(word), "{word} missing");
        }
        assert!(lexicon.valence("hopes").unwrap() > 0.0);
        assert!(lexicon.valence("deadly").unwrap() < 0.0);
    }

    #[test]
    fn test_parse_vader_format() {
        let lexicon = Lexicon::from_vader_str(
            "good\t1.9\t0.9434\t[2, 1, 2]\nBAD\t-2.5\t0.67082\t[-3, -2]\n\nbroken line\n",
        );

        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.valence("good"), Some(1.9));
        assert_eq!(lexicon.valence("bad"), Some(-2.5));
        assert_eq!(lexicon.valence("broken line"), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "stellar\t3.0\t0.5\t[3, 3]").unwrap();

        let lexicon = Lexicon::load(file.path()).unwrap();
        assert_eq!(lexicon.valence("stellar"), Some(3.0));
        assert!(!lexicon.contains("good"));
    }

    #[test]
    fn test_load_missing_or_empty_file_is_config_error() {
        let err = Lexicon::load(Path::new("/nonexistent/vader_lexicon.txt")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let file = tempfile::NamedTempFile::new().unwrap();
        let err = Lexicon::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
