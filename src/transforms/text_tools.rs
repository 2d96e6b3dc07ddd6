//! String and line utilities: cleanup, sorting, wrapping, extraction and
//! statistics.

use std::collections::{HashMap, HashSet};

use console::measure_text_width;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use regex::Regex;
use unicode_general_category::{get_general_category, GeneralCategory};

use super::{total, total_with};
use crate::method::{Category, TransformMethod};
use crate::options::Options;
use crate::string_utils::{capitalize, map_words, reverse_graphemes, truncate_graphemes};

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)\b(?:https?://|www\.)[^\s<>"']+"#).unwrap());
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\d+(?:\.\d+)?").unwrap());
static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]*(?:\r?\n)+[ \t]*").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

pub fn methods() -> Vec<TransformMethod> {
    vec![
        TransformMethod::new(
            "reverse-text",
            Category::TextTools,
            "Reverses the text, keeping combined characters and emoji intact",
            total(reverse_graphemes),
        ),
        TransformMethod::new(
            "reverse-words",
            Category::TextTools,
            "Reverses the order of the words on every line",
            total(reverse_words),
        ),
        TransformMethod::new(
            "remove-spaces",
            Category::TextTools,
            "Removes all spaces and tabs, keeping line breaks",
            total(remove_spaces),
        ),
        TransformMethod::new(
            "remove-extra-spaces",
            Category::TextTools,
            "Collapses repeated spaces and trims every line",
            total(remove_extra_spaces),
        ),
        TransformMethod::new(
            "remove-line-breaks",
            Category::TextTools,
            "Joins all lines into one",
            total(|input| LINE_BREAKS.replace_all(input.trim(), " ").into_owned()),
        ),
        TransformMethod::new(
            "add-dashes",
            Category::TextTools,
            "Replaces whitespace between words with dashes",
            total(|input| WHITESPACE_RUN.replace_all(input.trim(), "-").into_owned()),
        ),
        TransformMethod::new(
            "add-underscores",
            Category::TextTools,
            "Replaces whitespace between words with underscores",
            total(|input| WHITESPACE_RUN.replace_all(input.trim(), "_").into_owned()),
        ),
        TransformMethod::new(
            "remove-punctuation",
            Category::TextTools,
            "Removes punctuation characters in any script",
            total(remove_punctuation),
        ),
        TransformMethod::new(
            "remove-duplicate-lines",
            Category::TextTools,
            "Keeps the first occurrence of every line (case-insensitive)",
            total(remove_duplicate_lines),
        ),
        TransformMethod::new(
            "remove-duplicate-words",
            Category::TextTools,
            "Keeps the first occurrence of every word (case-insensitive)",
            total(remove_duplicate_words),
        ),
        TransformMethod::new(
            "sort-lines",
            Category::TextTools,
            "Sorts lines alphabetically (option order=asc|desc)",
            total_with(sort_lines),
        ),
        TransformMethod::new(
            "shuffle-lines",
            Category::TextTools,
            "Puts lines in random order",
            total(shuffle_lines),
        )
        .randomized(),
        TransformMethod::new(
            "shuffle-words",
            Category::TextTools,
            "Puts words in random order",
            total(shuffle_words),
        )
        .randomized(),
        TransformMethod::new(
            "trim-lines",
            Category::TextTools,
            "Strips leading and trailing whitespace from every line",
            total(|input| input.lines().map(str::trim).collect::<Vec<&str>>().join("\n")),
        ),
        TransformMethod::new(
            "number-lines",
            Category::TextTools,
            "Prefixes every line with its line number",
            total(number_lines),
        ),
        TransformMethod::new(
            "word-wrap",
            Category::TextTools,
            "Wraps lines at a maximum display width (option width, default 80)",
            total_with(|input, options| word_wrap(input, options.get_usize("width", 80))),
        ),
        TransformMethod::new(
            "truncate-text",
            Category::TextTools,
            "Shortens text to a maximum length (options length, default 100, and suffix)",
            total_with(|input, options| {
                truncate_graphemes(
                    input,
                    options.get_usize("length", 100),
                    options.get_str_or("suffix", "..."),
                )
            }),
        ),
        TransformMethod::new(
            "extract-urls",
            Category::TextTools,
            "Lists every URL found in the text, one per line",
            total(extract_urls),
        ),
        TransformMethod::new(
            "extract-emails",
            Category::TextTools,
            "Lists every email address found in the text, one per line",
            total(|input| extract(&EMAIL, input)),
        ),
        TransformMethod::new(
            "extract-numbers",
            Category::TextTools,
            "Lists every number found in the text, one per line",
            total(|input| extract(&NUMBER, input)),
        ),
        TransformMethod::new(
            "word-frequency",
            Category::TextTools,
            "Counts how often every word appears, most frequent first",
            total(word_frequency),
        ),
        TransformMethod::new(
            "word-count",
            Category::TextTools,
            "Counts the words in the text",
            total(|input| input.split_whitespace().count().to_string()),
        ),
        TransformMethod::new(
            "character-count",
            Category::TextTools,
            "Counts the characters in the text",
            total(|input| input.chars().count().to_string()),
        ),
        TransformMethod::new(
            "line-count",
            Category::TextTools,
            "Counts the lines in the text",
            total(|input| input.lines().count().to_string()),
        ),
        TransformMethod::new(
            "pig-latin",
            Category::TextTools,
            "Translates words to Pig Latin",
            total(|input| map_words(input, pig_latin_word)),
        ),
    ]
}

fn reverse_words(input: &str) -> String {
    input
        .lines()
        .map(|line| line.split_whitespace().rev().collect::<Vec<&str>>().join(" "))
        .collect::<Vec<String>>()
        .join("\n")
}

fn remove_spaces(input: &str) -> String {
    input
        .chars()
        .filter(|&c| !c.is_whitespace() || c == '\n')
        .collect()
}

fn remove_extra_spaces(input: &str) -> String {
    input
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<&str>>().join(" "))
        .collect::<Vec<String>>()
        .join("\n")
}

fn is_punctuation(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

fn remove_punctuation(input: &str) -> String {
    input.chars().filter(|&c| !is_punctuation(c)).collect()
}

fn remove_duplicate_lines(input: &str) -> String {
    let mut seen = HashSet::new();
    input
        .lines()
        .filter(|line| seen.insert(line.to_lowercase()))
        .collect::<Vec<&str>>()
        .join("\n")
}

fn remove_duplicate_words(input: &str) -> String {
    let mut seen = HashSet::new();
    input
        .split_whitespace()
        .filter(|word| seen.insert(word.to_lowercase()))
        .collect::<Vec<&str>>()
        .join(" ")
}

fn sort_lines(input: &str, options: &Options) -> String {
    let descending = options.get_str_or("order", "asc").eq_ignore_ascii_case("desc");
    let mut lines: Vec<(String, &str)> = input.lines().map(|l| (l.to_lowercase(), l)).collect();
    // Stable in both directions: ties keep their input order
    if descending {
        lines.sort_by(|a, b| b.0.cmp(&a.0));
    } else {
        lines.sort_by(|a, b| a.0.cmp(&b.0));
    }
    lines
        .into_iter()
        .map(|(_, line)| line)
        .collect::<Vec<&str>>()
        .join("\n")
}

fn shuffle_lines(input: &str) -> String {
    let mut lines: Vec<&str> = input.lines().collect();
    lines.shuffle(&mut rand::thread_rng());
    lines.join("\n")
}

fn shuffle_words(input: &str) -> String {
    let mut words: Vec<&str> = input.split_whitespace().collect();
    words.shuffle(&mut rand::thread_rng());
    words.join(" ")
}

fn number_lines(input: &str) -> String {
    let lines: Vec<&str> = input.lines().collect();
    let width = lines.len().to_string().len();
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>width$}. {}", i + 1, line, width = width))
        .collect::<Vec<String>>()
        .join("\n")
}

/// Greedy wrap of every line; words wider than `width` get a line of their own
fn word_wrap(input: &str, width: usize) -> String {
    let width = width.max(1);
    input
        .lines()
        .map(|line| {
            let mut wrapped: Vec<String> = Vec::new();
            let mut current = String::new();
            let mut current_width = 0;
            for word in line.split_whitespace() {
                let word_width = measure_text_width(word);
                if current.is_empty() {
                    current.push_str(word);
                    current_width = word_width;
                } else if current_width + 1 + word_width <= width {
                    current.push(' ');
                    current.push_str(word);
                    current_width += 1 + word_width;
                } else {
                    wrapped.push(std::mem::take(&mut current));
                    current.push_str(word);
                    current_width = word_width;
                }
            }
            wrapped.push(current);
            wrapped.join("\n")
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn extract(pattern: &Regex, input: &str) -> String {
    pattern
        .find_iter(input)
        .map(|m| m.as_str())
        .collect::<Vec<&str>>()
        .join("\n")
}

fn extract_urls(input: &str) -> String {
    URL.find_iter(input)
        .map(|m| m.as_str().trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '!' | '?' | ')')))
        .collect::<Vec<&str>>()
        .join("\n")
}

fn word_frequency(input: &str) -> String {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let words = input
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty());

    for (position, word) in words.enumerate() {
        counts
            .entry(word.to_lowercase())
            .or_insert((0, position))
            .0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked
        .into_iter()
        .map(|(word, (count, _))| format!("{}: {}", word, count))
        .collect::<Vec<String>>()
        .join("\n")
}

fn pig_latin_word(word: &str) -> String {
    if !word.chars().all(char::is_alphabetic) {
        return word.to_string();
    }
    let is_vowel = |c: char| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u');
    let split = word.find(is_vowel).unwrap_or(word.len());
    let translated = if split == 0 {
        format!("{}way", word)
    } else {
        format!("{}{}ay", &word[split..], &word[..split])
    };

    if word.chars().next().is_some_and(char::is_uppercase) {
        capitalize(&translated)
    } else {
        translated.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(name: &str, input: &str, options: &Options) -> String {
        let method = methods().into_iter().find(|m| m.name() == name).unwrap();
        method.run(input, options).unwrap()
    }

    #[test]
    fn test_reverse() {
        assert_eq!(reverse_words("one two three\nfour five"), "three two one\nfive four");
        let s = "héllo 🦀 world";
        assert_eq!(reverse_graphemes(s).chars().count(), s.chars().count());
    }

    #[test]
    fn test_spaces() {
        let s = "a b\tc\nd  e";
        let out = remove_spaces(s);
        assert_eq!(out, "abc\nde");
        assert_eq!(
            out.chars().count(),
            s.chars().filter(|c| !c.is_whitespace() || *c == '\n').count()
        );
        assert_eq!(remove_extra_spaces("  a   b \n c\t\td "), "a b\nc d");
        assert_eq!(run("remove-line-breaks", "one\n  two\r\nthree", &Options::new()), "one two three");
    }

    #[test]
    fn test_add_separators_keep_length() {
        let s = "hello big world";
        let dashed = run("add-dashes", s, &Options::new());
        assert_eq!(dashed, "hello-big-world");
        assert_eq!(dashed.len(), s.len());
        assert_eq!(run("add-underscores", " a  b ", &Options::new()), "a_b");
    }

    #[test]
    fn test_remove_punctuation() {
        assert_eq!(remove_punctuation("Hello, world! ¿Qué? «ok» 1+1=2"), "Hello world Qué ok 1+1=2");
    }

    #[test]
    fn test_deduplication_is_case_insensitive_and_stable() {
        assert_eq!(remove_duplicate_lines("Apple\nbanana\napple\nBanana\ncherry"), "Apple\nbanana\ncherry");
        assert_eq!(remove_duplicate_words("the The cat THE cat dog"), "the cat dog");
    }

    #[test]
    fn test_sort_lines() {
        let input = "banana\nApple\ncherry\napple";
        assert_eq!(sort_lines(input, &Options::new()), "Apple\napple\nbanana\ncherry");
        let desc = Options::new().with("order", "desc");
        assert_eq!(sort_lines(input, &desc), "cherry\nbanana\nApple\napple");
    }

    #[test]
    fn test_shuffles_keep_content() {
        let input = "a\nb\nc\nd";
        let mut lines: Vec<String> = shuffle_lines(input).lines().map(String::from).collect();
        lines.sort();
        assert_eq!(lines, vec!["a", "b", "c", "d"]);

        let mut words: Vec<String> = shuffle_words("x y z").split(' ').map(String::from).collect();
        words.sort();
        assert_eq!(words, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_number_lines() {
        let input = (1..=10).map(|i| format!("l{}", i)).collect::<Vec<String>>().join("\n");
        let numbered = number_lines(&input);
        assert!(numbered.starts_with(" 1. l1\n"));
        assert!(numbered.ends_with("10. l10"));
    }

    #[test]
    fn test_word_wrap() {
        assert_eq!(word_wrap("the quick brown fox jumps", 10), "the quick\nbrown fox\njumps");
        assert_eq!(word_wrap("tiny supercalifragilistic word", 5), "tiny\nsupercalifragilistic\nword");
        let options = Options::new().with("width", 3);
        assert_eq!(run("word-wrap", "ab cd", &options), "ab\ncd");
        // Wide characters take two columns
        assert_eq!(word_wrap("日本 語", 4), "日本\n語");
    }

    #[test]
    fn test_word_wrap_long_line() {
        // 50,000 two-column words on a single line
        let line = vec!["ab"; 50_000].join(" ");
        let wrapped = word_wrap(&line, 1_000);
        let lines: Vec<&str> = wrapped.lines().collect();
        // 333 words fill 998 columns per line
        assert_eq!(lines.len(), 151);
        assert!(lines.iter().all(|l| measure_text_width(l) <= 1_000));
        assert_eq!(measure_text_width(lines[0]), 998);
        assert_eq!(wrapped.replace('\n', " "), line);
    }

    #[test]
    fn test_truncate() {
        let long = "x".repeat(150);
        assert_eq!(run("truncate-text", &long, &Options::new()).chars().count(), 100);
        let options = Options::new().with("length", 8).with("suffix", "…");
        assert_eq!(run("truncate-text", "Hello World", &options), "Hello W…");
    }

    #[test]
    fn test_extractors() {
        let text = "Visit https://example.com/a?b=1, or www.rust-lang.org. Mail bob@mail.com or ann.lee@x.io; pay -3.5 or 42.";
        assert_eq!(extract_urls(text), "https://example.com/a?b=1\nwww.rust-lang.org");
        assert_eq!(extract(&EMAIL, text), "bob@mail.com\nann.lee@x.io");
        assert_eq!(extract(&NUMBER, text), "1\n-3.5\n42");
        assert_eq!(extract(&EMAIL, "nothing here"), "");
    }

    #[test]
    fn test_word_frequency_orders_by_count_then_first_seen() {
        let out = word_frequency("b a c a B d b");
        assert_eq!(out, "b: 3\na: 2\nc: 1\nd: 1");
        assert_eq!(word_frequency("It's it's"), "it's: 2");
    }

    #[test]
    fn test_counts() {
        let options = Options::new();
        assert_eq!(run("word-count", "one two  three\nfour", &options), "4");
        assert_eq!(run("character-count", "héllo 🦀", &options), "7");
        assert_eq!(run("line-count", "a\nb\nc", &options), "3");
    }

    #[test]
    fn test_pig_latin() {
        let options = Options::new();
        assert_eq!(run("pig-latin", "Hello apple string, 42", &options), "Ellohay appleway ingstray, 42");
        assert_eq!(pig_latin_word("rhythm"), "rhythmay");
    }
}
