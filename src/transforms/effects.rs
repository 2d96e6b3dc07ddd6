//! Decorative Unicode text effects.
//!
//! Alphabet swaps are driven by the [`CharMap`] tables; overlays append a
//! combining mark after every character.

use once_cell::sync::Lazy;
use rand::Rng;
use unicode_segmentation::UnicodeSegmentation;

use super::char_maps::{self, CharMap};
use super::{total, total_with};
use crate::constants::marks;
use crate::error::Result;
use crate::method::{Category, Transform, TransformMethod};
use crate::options::Options;
use crate::string_utils::reverse_graphemes;

const ZALGO_UP: &[char] = &[
    '\u{030D}', '\u{030E}', '\u{0304}', '\u{0305}', '\u{033F}', '\u{0311}', '\u{0306}',
    '\u{0310}', '\u{0352}', '\u{0357}', '\u{0351}', '\u{0307}', '\u{0308}', '\u{030A}',
    '\u{0342}', '\u{0343}', '\u{0344}', '\u{034A}', '\u{034B}', '\u{034C}', '\u{0303}',
    '\u{0302}', '\u{030C}', '\u{0350}', '\u{0300}', '\u{0301}', '\u{030B}', '\u{030F}',
];

const ZALGO_MIDDLE: &[char] = &[
    '\u{0315}', '\u{031B}', '\u{0340}', '\u{0341}', '\u{0358}', '\u{0321}', '\u{0322}',
    '\u{0327}', '\u{0328}', '\u{0334}', '\u{0335}', '\u{0336}', '\u{034F}', '\u{035C}',
    '\u{035D}', '\u{035E}', '\u{035F}', '\u{0360}', '\u{0362}', '\u{0338}', '\u{0337}',
];

const ZALGO_DOWN: &[char] = &[
    '\u{0316}', '\u{0317}', '\u{0318}', '\u{0319}', '\u{031C}', '\u{031D}', '\u{031E}',
    '\u{031F}', '\u{0320}', '\u{0324}', '\u{0325}', '\u{0326}', '\u{0329}', '\u{032A}',
    '\u{032B}', '\u{032C}', '\u{032D}', '\u{032E}', '\u{032F}', '\u{0330}', '\u{0331}',
    '\u{0332}', '\u{0333}', '\u{0339}', '\u{033A}', '\u{033B}', '\u{033C}', '\u{0345}',
    '\u{0347}', '\u{0348}', '\u{0349}', '\u{034D}', '\u{034E}', '\u{0353}', '\u{0354}',
    '\u{0355}', '\u{0356}', '\u{0359}', '\u{035A}', '\u{0323}',
];

/// Alphabet swap tools: name, table and description
static MAPPED: &[(&str, &Lazy<CharMap>, &str)] = &[
    ("bold-text", &char_maps::BOLD, "Converts letters and digits to 𝐛𝐨𝐥𝐝"),
    ("italic-text", &char_maps::ITALIC, "Converts letters to 𝑖𝑡𝑎𝑙𝑖𝑐"),
    ("bold-italic-text", &char_maps::BOLD_ITALIC, "Converts letters to 𝒃𝒐𝒍𝒅 𝒊𝒕𝒂𝒍𝒊𝒄"),
    ("script-text", &char_maps::SCRIPT, "Converts letters to 𝓈𝒸𝓇𝒾𝓅𝓉"),
    ("bold-script-text", &char_maps::BOLD_SCRIPT, "Converts letters to 𝓫𝓸𝓵𝓭 𝓼𝓬𝓻𝓲𝓹𝓽"),
    ("fraktur-text", &char_maps::FRAKTUR, "Converts letters to 𝔣𝔯𝔞𝔨𝔱𝔲𝔯"),
    ("bold-fraktur-text", &char_maps::BOLD_FRAKTUR, "Converts letters to 𝖇𝖔𝖑𝖉 𝖋𝖗𝖆𝖐𝖙𝖚𝖗"),
    ("double-struck-text", &char_maps::DOUBLE_STRUCK, "Converts letters and digits to 𝕕𝕠𝕦𝕓𝕝𝕖-𝕤𝕥𝕣𝕦𝕔𝕜"),
    ("sans-serif-text", &char_maps::SANS, "Converts letters and digits to 𝗌𝖺𝗇𝗌-𝗌𝖾𝗋𝗂𝖿"),
    ("sans-serif-bold-text", &char_maps::SANS_BOLD, "Converts letters and digits to 𝘀𝗮𝗻𝘀 𝗯𝗼𝗹𝗱"),
    ("monospace-text", &char_maps::MONOSPACE, "Converts letters and digits to 𝚖𝚘𝚗𝚘𝚜𝚙𝚊𝚌𝚎"),
    ("bubble-text", &char_maps::BUBBLE, "Circles letters and digits (ⓑⓤⓑⓑⓛⓔ)"),
    ("squared-text", &char_maps::SQUARED, "Boxes letters (🅂🅀🅄🄰🅁🄴🄳)"),
    ("full-width-text", &char_maps::FULL_WIDTH, "Converts ASCII to ｆｕｌｌ－ｗｉｄｔｈ forms"),
    ("small-caps", &char_maps::SMALL_CAPS, "Converts lowercase letters to sᴍᴀʟʟ ᴄᴀᴘs"),
    ("superscript", &char_maps::SUPERSCRIPT, "Raises characters that have a superscript form"),
    ("subscript", &char_maps::SUBSCRIPT, "Lowers characters that have a subscript form"),
];

/// Combining mark overlays: name, mark and description
const OVERLAYS: &[(&str, char, &str)] = &[
    ("strikethrough-text", marks::STRIKETHROUGH, "S̶t̶r̶i̶k̶e̶s̶ through every character"),
    ("underline-text", marks::UNDERLINE, "U̲n̲d̲e̲r̲l̲i̲n̲e̲s̲ every character"),
    ("double-underline-text", marks::DOUBLE_UNDERLINE, "D̳o̳u̳b̳l̳e̳ underlines every character"),
    ("slash-text", marks::SLASH, "S̸l̸a̸s̸h̸e̸s̸ through every character"),
];

fn mapped(table: &'static Lazy<CharMap>) -> impl Transform {
    move |input: &str, _: &Options| -> Result<String> { Ok(table.apply(input)) }
}

fn overlay(mark: char) -> impl Transform {
    move |input: &str, _: &Options| -> Result<String> { Ok(combine(input, mark)) }
}

pub fn methods() -> Vec<TransformMethod> {
    let mut methods: Vec<TransformMethod> = MAPPED
        .iter()
        .map(|&(name, table, description)| {
            TransformMethod::new(name, Category::TextEffects, description, mapped(table))
        })
        .collect();

    methods.extend(OVERLAYS.iter().map(|&(name, mark, description)| {
        TransformMethod::new(name, Category::TextEffects, description, overlay(mark))
    }));

    methods.extend([
        TransformMethod::new(
            "upside-down-text",
            Category::TextEffects,
            "Flips text upside down (ʇxǝʇ uʍop ǝpᴉsdn)",
            total(upside_down),
        ),
        TransformMethod::new(
            "mirror-text",
            Category::TextEffects,
            "Reverses text and mirrors brackets",
            total(mirror),
        ),
        TransformMethod::new(
            "wide-text",
            Category::TextEffects,
            "S p a c e s  out every character",
            total(wide),
        ),
        TransformMethod::new(
            "zalgo-text",
            Category::TextEffects,
            "Piles random combining marks on every character (option intensity=low|medium|high)",
            total_with(zalgo),
        )
        .randomized(),
    ]);
    methods
}

/// Appends `mark` after every character except line breaks and tabs
fn combine(input: &str, mark: char) -> String {
    let mut result = String::with_capacity(input.len() * 3);
    for c in input.chars() {
        result.push(c);
        if !matches!(c, '\n' | '\r' | '\t') {
            result.push(mark);
        }
    }
    result
}

fn upside_down(input: &str) -> String {
    reverse_graphemes(&char_maps::UPSIDE_DOWN.apply(input))
}

fn mirror(input: &str) -> String {
    char_maps::MIRROR.apply(&reverse_graphemes(input))
}

fn wide(input: &str) -> String {
    input.graphemes(true).collect::<Vec<&str>>().join(" ")
}

/// Marks added above, through and below each character per intensity
fn zalgo_marks(intensity: &str) -> usize {
    match intensity.to_lowercase().as_str() {
        "low" => 2,
        "high" => 10,
        _ => 5,
    }
}

fn zalgo(input: &str, options: &Options) -> String {
    let count = zalgo_marks(options.get_str_or("intensity", "medium"));
    let mut rng = rand::thread_rng();
    let pools = [ZALGO_UP, ZALGO_MIDDLE, ZALGO_DOWN];
    let mut result = String::with_capacity(input.len() * (count + 1));

    // `count` marks per character in total, each drawn from a random pool
    for c in input.chars() {
        result.push(c);
        if c.is_whitespace() {
            continue;
        }
        for _ in 0..count {
            let pool = pools[rng.gen_range(0..pools.len())];
            result.push(pool[rng.gen_range(0..pool.len())]);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_zalgo_mark(c: char) -> bool {
        ZALGO_UP.contains(&c) || ZALGO_MIDDLE.contains(&c) || ZALGO_DOWN.contains(&c)
    }

    #[test]
    fn test_catalogue_names() {
        let methods = methods();
        assert_eq!(methods.len(), MAPPED.len() + OVERLAYS.len() + 4);
        assert!(methods.iter().all(|m| m.category() == Category::TextEffects));
        assert!(methods.iter().any(|m| m.name() == "zalgo-text" && m.is_randomized()));
    }

    #[test]
    fn test_mapped_tool() {
        let bold = methods().into_iter().find(|m| m.name() == "bold-text").unwrap();
        assert_eq!(bold.run("Hi 1!", &Options::new()).unwrap(), "𝐇𝐢 𝟏!");
    }

    #[test]
    fn test_combine() {
        assert_eq!(combine("ab", marks::STRIKETHROUGH), "a\u{0336}b\u{0336}");
        assert_eq!(combine("a\nb", marks::UNDERLINE), "a\u{0332}\nb\u{0332}");
    }

    #[test]
    fn test_upside_down_and_mirror() {
        assert_eq!(upside_down("hello"), "ollǝɥ");
        assert_eq!(upside_down("(ok)!"), "¡(ʞo)");
        assert_eq!(mirror("(ab]"), "[ba)");
    }

    #[test]
    fn test_wide_text() {
        assert_eq!(wide("abc"), "a b c");
        assert_eq!(wide("e\u{0301}🦀"), "e\u{0301} 🦀");
    }

    #[test]
    fn test_zalgo_intensity() {
        for (intensity, per_char) in [("low", 2), ("medium", 5), ("high", 10), ("bogus", 5)] {
            let options = Options::new().with("intensity", intensity);
            let out = zalgo("ab c", &options);
            let marks = out.chars().filter(|&c| is_zalgo_mark(c)).count();
            // three non-whitespace characters
            assert_eq!(marks, per_char * 3, "intensity {}", intensity);
            let base: String = out.chars().filter(|&c| !is_zalgo_mark(c)).collect();
            assert_eq!(base, "ab c");
        }
    }

    #[test]
    fn test_zalgo_marks_per_character() {
        let zalgo_text = methods()
            .into_iter()
            .find(|m| m.name() == "zalgo-text")
            .unwrap();
        for (intensity, per_char) in [("low", 2), ("medium", 5), ("high", 10)] {
            let options = Options::new().with("intensity", intensity);
            for _ in 0..20 {
                let out = zalgo_text.run("a", &options).unwrap();
                assert_eq!(out.chars().count() - 1, per_char, "intensity {}", intensity);
                assert!(out.starts_with('a'));
            }
        }
    }
}
