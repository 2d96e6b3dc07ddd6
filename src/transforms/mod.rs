//! The tool catalogue.
//!
//! Each submodule contributes the methods of one category through a
//! `methods()` function; [`register_all`] bulk-registers them together with
//! the default aliases. Tools sharing a shape are built from the same
//! combinator (word joiners, character maps) instead of one type per tool.

use crate::error::Result;
use crate::method::Transform;
use crate::options::Options;
use crate::registry::MethodRegistry;

pub mod case;
pub mod char_maps;
pub mod developer;
pub mod effects;
pub mod encoding;
pub mod formatting;
pub mod generators;
pub mod style;
pub mod text_tools;

/// Alternative names accepted by the dispatcher
const ALIASES: &[(&str, &str)] = &[
    ("uppercase", "upper-case"),
    ("lowercase", "lower-case"),
    ("titlecase", "title-case"),
    ("swap-case", "inverse-case"),
    ("spongebob-case", "alternating-case"),
    ("camelcase", "camel-case"),
    ("pascalcase", "pascal-case"),
    ("snake_case", "snake-case"),
    ("screaming-snake-case", "constant-case"),
    ("header-case", "train-case"),
    ("base64", "base64-encode"),
    ("rot-13", "rot13"),
    ("morse-code", "morse-encode"),
    ("prettify-json", "json-format"),
    ("upside-down", "upside-down-text"),
    ("zalgo", "zalgo-text"),
    ("aesthetic-text", "wide-text"),
    ("lorem", "lorem-ipsum"),
];

/// Registers every tool and the default aliases into `registry`.
///
/// # Errors
/// Fails if a name is registered twice or an alias targets an unknown tool.
pub fn register_all(registry: &mut MethodRegistry) -> Result<()> {
    registry.register_all(case::methods())?;
    registry.register_all(developer::methods())?;
    registry.register_all(style::methods())?;
    registry.register_all(encoding::methods())?;
    registry.register_all(formatting::methods())?;
    registry.register_all(effects::methods())?;
    registry.register_all(text_tools::methods())?;
    registry.register_all(generators::methods())?;

    ALIASES
        .iter()
        .try_for_each(|(alias, canonical)| registry.register_alias(alias, canonical))
}

/// Wraps a total string function as a method body
pub(crate) fn total(f: fn(&str) -> String) -> impl Transform {
    move |input: &str, _: &Options| -> Result<String> { Ok(f(input)) }
}

/// Wraps a total string function that reads options
pub(crate) fn total_with(f: fn(&str, &Options) -> String) -> impl Transform {
    move |input: &str, options: &Options| -> Result<String> { Ok(f(input, options)) }
}

/// Wraps a function that may reject badly formatted input
pub(crate) fn parse(f: fn(&str) -> Result<String>) -> impl Transform {
    move |input: &str, _: &Options| -> Result<String> { f(input) }
}
