//! Identifier-style conversions.
//!
//! Every tool here is a `(separator, word case)` pair fed to
//! [`join_words`], which shares the word splitting policy of
//! [`split_words`](crate::string_utils::split_words).

use super::total;
use crate::error::Result;
use crate::method::{Category, Transform, TransformMethod};
use crate::options::Options;
use crate::string_utils::{join_words, WordCase};

/// Separator and per-word case of each identifier style
const STYLES: &[(&str, &str, WordCase, &str)] = &[
    ("camel-case", "", WordCase::Camel, "Converts text to camelCase"),
    ("pascal-case", "", WordCase::Capitalized, "Converts text to PascalCase"),
    ("snake-case", "_", WordCase::Lower, "Converts text to snake_case"),
    ("kebab-case", "-", WordCase::Lower, "Converts text to kebab-case"),
    ("constant-case", "_", WordCase::Upper, "Converts text to CONSTANT_CASE"),
    ("dot-case", ".", WordCase::Lower, "Converts text to dot.case"),
    ("path-case", "/", WordCase::Lower, "Converts text to path/case"),
    ("train-case", "-", WordCase::Capitalized, "Converts text to Train-Case"),
    ("cobol-case", "-", WordCase::Upper, "Converts text to COBOL-CASE"),
    ("flat-case", "", WordCase::Lower, "Converts text to flatcase"),
];

fn joiner(separator: &'static str, case: WordCase) -> impl Transform {
    move |input: &str, _: &Options| -> Result<String> { Ok(join_words(input, separator, case)) }
}

pub fn methods() -> Vec<TransformMethod> {
    let mut methods: Vec<TransformMethod> = STYLES
        .iter()
        .map(|&(name, separator, case, description)| {
            TransformMethod::new(name, Category::Developer, description, joiner(separator, case))
        })
        .collect();

    methods.push(TransformMethod::new(
        "slugify",
        Category::Developer,
        "Builds a lowercase URL slug from the text",
        total(slugify),
    ));
    methods
}

/// Lowercase words joined by dashes, with accents folded for Latin letters
fn slugify(input: &str) -> String {
    let folded: String = input.chars().map(fold_accent).collect();
    join_words(&folded, "-", WordCase::Lower)
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' => 'O',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ý' | 'ÿ' => 'y',
        _ => c,
    }
}
