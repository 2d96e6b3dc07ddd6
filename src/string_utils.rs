use unicode_segmentation::UnicodeSegmentation;

/// How each word is cased before being joined back together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCase {
    Lower,
    Upper,
    /// First letter uppercase, rest lowercase
    Capitalized,
    /// First word lowercase, the rest capitalized
    Camel,
}

impl WordCase {
    fn apply(&self, word: &str, index: usize) -> String {
        match self {
            WordCase::Lower => word.to_lowercase(),
            WordCase::Upper => word.to_uppercase(),
            WordCase::Capitalized => capitalize(word),
            WordCase::Camel if index == 0 => word.to_lowercase(),
            WordCase::Camel => capitalize(word),
        }
    }
}

/// Splits an identifier or phrase into words.
///
/// Boundaries are runs of non-alphanumeric characters, lowercase to
/// uppercase transitions (`helloWorld`) and letter/digit transitions
/// (`utf8` -> `utf`, `8`). Runs of capitals are not split, so `XMLParser`
/// stays a single word.
///
/// # Examples
///
/// ```
/// use textforge::string_utils::split_words;
///
/// assert_eq!(split_words("hello world_test"), vec!["hello", "world", "test"]);
/// assert_eq!(split_words("parseHTTPResponse2"), vec!["parse", "HTTPResponse", "2"]);
/// ```
pub fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for c in input.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev = None;
            continue;
        }
        if let Some(p) = prev {
            let boundary = (p.is_lowercase() && c.is_uppercase())
                || (p.is_alphabetic() && c.is_numeric())
                || (p.is_numeric() && c.is_alphabetic());
            if boundary && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
        prev = Some(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Splits `input` into words, cases each one and joins them with `separator`
pub fn join_words(input: &str, separator: &str, case: WordCase) -> String {
    split_words(input)
        .iter()
        .enumerate()
        .map(|(i, w)| case.apply(w, i))
        .collect::<Vec<String>>()
        .join(separator)
}

/// Uppercases the first character and lowercases the rest
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Uppercases the first character and leaves the rest untouched
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replaces each whitespace-delimited word through `f`, keeping the
/// original whitespace between words.
pub fn map_words<F>(input: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    input
        .split_word_bounds()
        .map(|segment| {
            if segment.chars().all(char::is_whitespace) {
                segment.to_string()
            } else {
                f(segment)
            }
        })
        .collect()
}

/// Reverses a string by grapheme cluster so combined characters and emoji
/// sequences survive intact.
pub fn reverse_graphemes(input: &str) -> String {
    input.graphemes(true).rev().collect()
}

/// Shortens `input` to at most `length` graphemes, `suffix` included.
///
/// # Examples
///
/// ```
/// use textforge::string_utils::truncate_graphemes;
///
/// assert_eq!(truncate_graphemes("Hello World", 8, "..."), "Hello...");
/// assert_eq!(truncate_graphemes("Hello", 8, "..."), "Hello");
/// ```
pub fn truncate_graphemes(input: &str, length: usize, suffix: &str) -> String {
    let graphemes: Vec<&str> = input.graphemes(true).collect();
    if graphemes.len() <= length {
        return input.to_string();
    }
    let suffix_len = suffix.graphemes(true).count();
    if suffix_len >= length {
        return graphemes[..length].concat();
    }
    let mut result = graphemes[..length - suffix_len].concat();
    result.push_str(suffix);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("hello world test"), vec!["hello", "world", "test"]);
        assert_eq!(split_words("helloWorld"), vec!["hello", "World"]);
        assert_eq!(split_words("HelloWorld"), vec!["Hello", "World"]);
        assert_eq!(split_words("XMLParser"), vec!["XMLParser"]);
        assert_eq!(split_words("version2Update"), vec!["version", "2", "Update"]);
        assert_eq!(split_words("--snake__case--"), vec!["snake", "case"]);
        assert_eq!(split_words("crème brûlée"), vec!["crème", "brûlée"]);
        assert!(split_words("!!! ???").is_empty());
    }

    #[test]
    fn test_join_words() {
        assert_eq!(join_words("hello world test", "", WordCase::Camel), "helloWorldTest");
        assert_eq!(join_words("hello world test", "_", WordCase::Upper), "HELLO_WORLD_TEST");
        assert_eq!(join_words("hello-world", "-", WordCase::Capitalized), "Hello-World");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hELLO"), "Hello");
        assert_eq!(capitalize_first("hELLO"), "HELLO");
        assert_eq!(capitalize("éa"), "Éa");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_map_words_keeps_whitespace() {
        let result = map_words("one  two\tthree", |w| w.to_uppercase());
        assert_eq!(result, "ONE  TWO\tTHREE");
    }

    #[test]
    fn test_reverse_graphemes() {
        assert_eq!(reverse_graphemes("abc"), "cba");
        assert_eq!(reverse_graphemes("e\u{0301}a"), "ae\u{0301}");
        assert_eq!(reverse_graphemes("🇪🇸🦀"), "🦀🇪🇸");
    }

    #[test]
    fn test_truncate_graphemes() {
        assert_eq!(truncate_graphemes("Hello World", 5, ""), "Hello");
        assert_eq!(truncate_graphemes("Hello World", 2, "..."), "He");
        assert_eq!(truncate_graphemes("🦀🦀🦀🦀", 3, "…"), "🦀🦀…");
    }
}
