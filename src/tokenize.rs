//! Shared tokenization rule for vocabulary building and query embedding.
//!
//! Both sides must tokenize identically or query vectors stop lining up
//! with the indexed ones, so the rule lives in one place.

/// Split text into lowercase word tokens.
///
/// A token is a maximal run of word characters (letters, digits,
/// underscore); everything else is a separator and is discarded.
///
/// # Examples
///
/// ```
/// use tfidx::tokenize::tokenize;
///
/// assert_eq!(tokenize("The cat sat."), vec!["the", "cat", "sat"]);
/// assert_eq!(tokenize("foo_bar v2!"), vec!["foo_bar", "v2"]);
/// assert!(tokenize("...!?").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' {
            current.extend(c.to_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits_on_punctuation() {
        assert_eq!(
            tokenize("Where did THE cat go?"),
            vec!["where", "did", "the", "cat", "go"]
        );
    }

    #[test]
    fn underscore_and_digits_are_word_characters() {
        assert_eq!(tokenize("snake_case 42 a1b2"), vec![
            "snake_case",
            "42",
            "a1b2"
        ]);
    }

    #[test]
    fn empty_and_separator_only_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t\n--,,").is_empty());
    }

    #[test]
    fn unicode_letters_are_kept() {
        assert_eq!(tokenize("Café naïve"), vec!["café", "naïve"]);
    }

    #[test]
    fn duplicates_are_preserved() {
        assert_eq!(tokenize("the the the"), vec!["the", "the", "the"]);
    }
}
