//! Lossless tokenization for the diff engine.

use super::Granularity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Word,
    Space,
    Other,
}

fn classify(ch: char) -> CharClass {
    if ch.is_alphanumeric() {
        CharClass::Word
    } else if ch.is_whitespace() {
        CharClass::Space
    } else {
        CharClass::Other
    }
}

/// Split `text` into comparison tokens.
///
/// Concatenating the returned tokens always reproduces `text` exactly.
pub fn tokenize(text: &str, granularity: Granularity) -> Vec<&str> {
    match granularity {
        Granularity::Word => words(text),
        Granularity::Line => text.split_inclusive('\n').collect(),
        Granularity::Char => text
            .char_indices()
            .map(|(i, ch)| &text[i..i + ch.len_utf8()])
            .collect(),
    }
}

/// Word runs and whitespace runs are single tokens; every other char stands alone.
fn words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<CharClass> = None;

    for (i, ch) in text.char_indices() {
        let class = classify(ch);
        match current {
            Some(prev) if prev == class && class != CharClass::Other => {}
            Some(_) => {
                tokens.push(&text[start..i]);
                start = i;
                current = Some(class);
            }
            None => current = Some(class),
        }
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_words_split_on_boundaries() {
        let tokens = tokenize("The cat sat.", Granularity::Word);
        assert_eq!(tokens, vec!["The", " ", "cat", " ", "sat", "."]);
    }

    #[test]
    fn test_punctuation_chars_are_separate_tokens() {
        let tokens = tokenize("**bold**", Granularity::Word);
        assert_eq!(tokens, vec!["*", "*", "bold", "*", "*"]);
    }

    #[test]
    fn test_whitespace_runs_are_one_token() {
        let tokens = tokenize("a \n\n  b", Granularity::Word);
        assert_eq!(tokens, vec!["a", " \n\n  ", "b"]);
    }

    #[test]
    fn test_unicode_letters_stay_in_words() {
        let tokens = tokenize("Übergangsfrist für 2025!", Granularity::Word);
        assert_eq!(
            tokens,
            vec!["Übergangsfrist", " ", "für", " ", "2025", "!"]
        );
    }

    #[test]
    fn test_line_granularity_keeps_newlines() {
        let tokens = tokenize("one\ntwo\nthree", Granularity::Line);
        assert_eq!(tokens, vec!["one\n", "two\n", "three"]);
    }

    #[test]
    fn test_char_granularity_handles_multibyte() {
        let tokens = tokenize("aé", Granularity::Char);
        assert_eq!(tokens, vec!["a", "é"]);
    }

    #[test]
    fn test_empty_input_has_no_tokens() {
        assert!(tokenize("", Granularity::Word).is_empty());
        assert!(tokenize("", Granularity::Line).is_empty());
        assert!(tokenize("", Granularity::Char).is_empty());
    }

    proptest! {
        #[test]
        fn test_tokens_concatenate_to_source(text in "(\\PC|\n){0,64}") {
            for granularity in [Granularity::Word, Granularity::Line, Granularity::Char] {
                let joined: String = tokenize(&text, granularity).concat();
                prop_assert_eq!(&joined, &text);
            }
        }
    }
}
