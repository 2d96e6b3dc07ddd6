//! Case mapping tools.
//!
//! All of them walk code points, never bytes. The stateful ones
//! (alternating, random) only consume state on letters so punctuation and
//! spaces do not shift the pattern.

use rand::Rng;

use super::total;
use crate::method::{Category, TransformMethod};
use crate::string_utils::{capitalize, capitalize_first, map_words};

const EMOJIS: [&str; 12] = [
    "😀", "😂", "🔥", "✨", "🎉", "💯", "🚀", "😎", "🙌", "👀", "🌈", "🦀",
];

pub fn methods() -> Vec<TransformMethod> {
    vec![
        TransformMethod::new(
            "upper-case",
            Category::CaseConversion,
            "Converts every letter to UPPERCASE",
            total(upper_case),
        ),
        TransformMethod::new(
            "lower-case",
            Category::CaseConversion,
            "Converts every letter to lowercase",
            total(lower_case),
        ),
        TransformMethod::new(
            "title-case",
            Category::CaseConversion,
            "Capitalizes The First Letter Of Every Word",
            total(title_case),
        ),
        TransformMethod::new(
            "sentence-case",
            Category::CaseConversion,
            "Capitalizes the first letter of every sentence",
            total(sentence_case),
        ),
        TransformMethod::new(
            "capitalized-case",
            Category::CaseConversion,
            "Uppercases the first letter of every word, leaving the rest untouched",
            total(capitalized_case),
        ),
        TransformMethod::new(
            "alternating-case",
            Category::CaseConversion,
            "aLtErNaTeS the case of every letter",
            total(alternating_case),
        ),
        TransformMethod::new(
            "inverse-case",
            Category::CaseConversion,
            "Swaps uppercase and lowercase letters",
            total(inverse_case),
        ),
        TransformMethod::new(
            "random-case",
            Category::CaseConversion,
            "Randomly uppercases or lowercases every letter",
            total(random_case),
        )
        .randomized(),
        TransformMethod::new(
            "emoji-case",
            Category::CaseConversion,
            "Randomly cased letters with an emoji after every word",
            total(emoji_case),
        )
        .randomized(),
        TransformMethod::new(
            "first-letter-upper",
            Category::CaseConversion,
            "Uppercases only the first letter of the text",
            total(first_letter_upper),
        ),
    ]
}

fn upper_case(input: &str) -> String {
    input.to_uppercase()
}

fn lower_case(input: &str) -> String {
    input.to_lowercase()
}

fn title_case(input: &str) -> String {
    map_words(input, capitalize)
}

fn capitalized_case(input: &str) -> String {
    map_words(input, capitalize_first)
}

fn sentence_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut capitalize_next = true;

    for c in input.to_lowercase().chars() {
        if capitalize_next && c.is_alphabetic() {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
        if matches!(c, '.' | '!' | '?') {
            capitalize_next = true;
        }
    }

    // Standalone pronoun
    map_words(&result, |w| {
        if w == "i" {
            "I".to_string()
        } else {
            w.to_string()
        }
    })
}

fn alternating_case(input: &str) -> String {
    let mut upper = false;
    input
        .chars()
        .flat_map(|c| {
            let mapped: Vec<char> = if c.is_alphabetic() {
                let out = if upper {
                    c.to_uppercase().collect()
                } else {
                    c.to_lowercase().collect()
                };
                upper = !upper;
                out
            } else {
                vec![c]
            };
            mapped
        })
        .collect()
}

fn inverse_case(input: &str) -> String {
    input
        .chars()
        .flat_map(|c| -> Vec<char> {
            if c.is_uppercase() {
                c.to_lowercase().collect()
            } else if c.is_lowercase() {
                c.to_uppercase().collect()
            } else {
                vec![c]
            }
        })
        .collect()
}

fn random_case(input: &str) -> String {
    let mut rng = rand::thread_rng();
    input
        .chars()
        .flat_map(|c| -> Vec<char> {
            if !c.is_alphabetic() {
                vec![c]
            } else if rng.gen_bool(0.5) {
                c.to_uppercase().collect()
            } else {
                c.to_lowercase().collect()
            }
        })
        .collect()
}

fn emoji_case(input: &str) -> String {
    let mut rng = rand::thread_rng();
    map_words(&random_case(input), |w| {
        if w.chars().any(char::is_alphanumeric) {
            format!("{} {}", w, EMOJIS[rng.gen_range(0..EMOJIS.len())])
        } else {
            w.to_string()
        }
    })
}

fn first_letter_upper(input: &str) -> String {
    match input.find(|c: char| c.is_alphabetic()) {
        Some(pos) => format!("{}{}", &input[..pos], capitalize_first(&input[pos..])),
        None => input.to_string(),
    }
}
