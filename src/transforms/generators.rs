//! Text generators.
//!
//! A numeric input takes precedence over the option of the same purpose, so
//! `lorem-ipsum 3` and `lorem-ipsum -s paragraphs=3 x` both produce three
//! paragraphs. Any other input falls back to the option.

use rand::seq::SliceRandom;
use rand::Rng;

use super::total_with;
use crate::method::{Category, TransformMethod};
use crate::options::Options;

const LOREM_SENTENCES: [&str; 8] = [
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit.",
    "Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.",
    "Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.",
    "Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur.",
    "Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.",
    "Curabitur pretium tincidunt lacus, nulla gravida orci a odio.",
    "Nullam varius, turpis et commodo pharetra, est eros bibendum elit, nec luctus magna felis sollicitudin mauris.",
    "Integer in mauris eu nibh euismod gravida.",
];

const SENTENCES_PER_PARAGRAPH: usize = 5;
const MAX_PARAGRAPHS: usize = 50;

const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()-_=+[]{};:,.<>?";

const MIN_PASSWORD_LENGTH: usize = 4;
const MAX_PASSWORD_LENGTH: usize = 128;

pub fn methods() -> Vec<TransformMethod> {
    vec![
        TransformMethod::new(
            "lorem-ipsum",
            Category::Generators,
            "Generates placeholder paragraphs (numeric input or option paragraphs, default 1)",
            total_with(lorem_ipsum),
        ),
        TransformMethod::new(
            "random-password",
            Category::Generators,
            "Generates a random password (numeric input or option length, default 16)",
            total_with(random_password),
        )
        .randomized(),
    ]
}

/// Reads a count from a numeric input, else from `key`
fn requested(input: &str, options: &Options, key: &str, default: usize) -> usize {
    input
        .trim()
        .parse::<usize>()
        .unwrap_or_else(|_| options.get_usize(key, default))
}

fn lorem_ipsum(input: &str, options: &Options) -> String {
    let paragraphs = requested(input, options, "paragraphs", 1).clamp(1, MAX_PARAGRAPHS);
    (0..paragraphs)
        .map(|p| {
            (0..SENTENCES_PER_PARAGRAPH)
                .map(|s| LOREM_SENTENCES[(p * SENTENCES_PER_PARAGRAPH + s) % LOREM_SENTENCES.len()])
                .collect::<Vec<&str>>()
                .join(" ")
        })
        .collect::<Vec<String>>()
        .join("\n\n")
}

/// Draws at least one character of every class, then shuffles
fn random_password(input: &str, options: &Options) -> String {
    let length = requested(input, options, "length", 16)
        .clamp(MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH);
    let classes = [LOWER, UPPER, DIGITS, SYMBOLS];
    let all: Vec<u8> = classes.concat();
    let mut rng = rand::thread_rng();

    let mut password: Vec<u8> = classes
        .iter()
        .map(|class| class[rng.gen_range(0..class.len())])
        .collect();
    password.extend((classes.len()..length).map(|_| all[rng.gen_range(0..all.len())]));
    password.shuffle(&mut rng);

    password.into_iter().map(char::from).collect()
}
