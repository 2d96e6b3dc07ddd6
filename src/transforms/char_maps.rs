//! Code point substitution tables for the decorative text effects.
//!
//! Most fancy alphabets live in the Mathematical Alphanumeric Symbols
//! block, laid out as contiguous runs starting at a base code point. A few
//! letters were encoded earlier in Letterlike Symbols and leave holes in
//! those runs, listed here as exceptions.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// A one to one character substitution; unmapped characters pass through
#[derive(Debug, Clone, Default)]
pub struct CharMap {
    map: HashMap<char, char>,
}

impl CharMap {
    fn offsets(upper: u32, lower: u32, digits: Option<u32>, exceptions: &[(char, u32)]) -> Self {
        let mut map = HashMap::new();
        let mut shift = |from: std::ops::RangeInclusive<char>, base: u32| {
            for (i, c) in from.enumerate() {
                if let Some(target) = char::from_u32(base + i as u32) {
                    map.insert(c, target);
                }
            }
        };
        shift('A'..='Z', upper);
        shift('a'..='z', lower);
        if let Some(base) = digits {
            shift('0'..='9', base);
        }
        for &(c, code) in exceptions {
            if let Some(target) = char::from_u32(code) {
                map.insert(c, target);
            }
        }
        Self { map }
    }

    fn pairs(from: &str, to: &str) -> Self {
        Self {
            map: from.chars().zip(to.chars()).collect(),
        }
    }

    pub fn get(&self, c: char) -> Option<char> {
        self.map.get(&c).copied()
    }

    pub fn apply(&self, input: &str) -> String {
        input.chars().map(|c| self.get(c).unwrap_or(c)).collect()
    }
}

pub static BOLD: Lazy<CharMap> =
    Lazy::new(|| CharMap::offsets(0x1D400, 0x1D41A, Some(0x1D7CE), &[]));

pub static ITALIC: Lazy<CharMap> =
    Lazy::new(|| CharMap::offsets(0x1D434, 0x1D44E, None, &[('h', 0x210E)]));

pub static BOLD_ITALIC: Lazy<CharMap> =
    Lazy::new(|| CharMap::offsets(0x1D468, 0x1D482, None, &[]));

pub static SCRIPT: Lazy<CharMap> = Lazy::new(|| {
    CharMap::offsets(
        0x1D49C,
        0x1D4B6,
        None,
        &[
            ('B', 0x212C),
            ('E', 0x2130),
            ('F', 0x2131),
            ('H', 0x210B),
            ('I', 0x2110),
            ('L', 0x2112),
            ('M', 0x2133),
            ('R', 0x211B),
            ('e', 0x212F),
            ('g', 0x210A),
            ('o', 0x2134),
        ],
    )
});

pub static BOLD_SCRIPT: Lazy<CharMap> =
    Lazy::new(|| CharMap::offsets(0x1D4D0, 0x1D4EA, None, &[]));

pub static FRAKTUR: Lazy<CharMap> = Lazy::new(|| {
    CharMap::offsets(
        0x1D504,
        0x1D51E,
        None,
        &[
            ('C', 0x212D),
            ('H', 0x210C),
            ('I', 0x2111),
            ('R', 0x211C),
            ('Z', 0x2128),
        ],
    )
});

pub static BOLD_FRAKTUR: Lazy<CharMap> =
    Lazy::new(|| CharMap::offsets(0x1D56C, 0x1D586, None, &[]));

pub static DOUBLE_STRUCK: Lazy<CharMap> = Lazy::new(|| {
    CharMap::offsets(
        0x1D538,
        0x1D552,
        Some(0x1D7D8),
        &[
            ('C', 0x2102),
            ('H', 0x210D),
            ('N', 0x2115),
            ('P', 0x2119),
            ('Q', 0x211A),
            ('R', 0x211D),
            ('Z', 0x2124),
        ],
    )
});

pub static SANS: Lazy<CharMap> =
    Lazy::new(|| CharMap::offsets(0x1D5A0, 0x1D5BA, Some(0x1D7E2), &[]));

pub static SANS_BOLD: Lazy<CharMap> =
    Lazy::new(|| CharMap::offsets(0x1D5D4, 0x1D5EE, Some(0x1D7EC), &[]));

pub static MONOSPACE: Lazy<CharMap> =
    Lazy::new(|| CharMap::offsets(0x1D670, 0x1D68A, Some(0x1D7F6), &[]));

/// Circled letters and digits (Ⓐ ⓐ ①)
pub static BUBBLE: Lazy<CharMap> =
    Lazy::new(|| CharMap::offsets(0x24B6, 0x24D0, Some(0x245F), &[('0', 0x24EA)]));

/// Squared capitals; lowercase letters map to the same squares
pub static SQUARED: Lazy<CharMap> =
    Lazy::new(|| CharMap::offsets(0x1F130, 0x1F130, None, &[]));

pub static FULL_WIDTH: Lazy<CharMap> = Lazy::new(|| {
    let mut map: HashMap<char, char> = ('!'..='~')
        .filter_map(|c| char::from_u32(c as u32 + 0xFEE0).map(|w| (c, w)))
        .collect();
    map.insert(' ', '\u{3000}');
    CharMap { map }
});

pub static SMALL_CAPS: Lazy<CharMap> = Lazy::new(|| {
    CharMap::pairs(
        "abcdefghijklmnopqrstuvwxyz",
        "ᴀʙᴄᴅᴇꜰɢʜɪᴊᴋʟᴍɴᴏᴘǫʀsᴛᴜᴠᴡxʏᴢ",
    )
});

pub static SUPERSCRIPT: Lazy<CharMap> = Lazy::new(|| {
    CharMap::pairs(
        "0123456789+-=()abcdefghijklmnoprstuvwxyzABDEGHIJKLMNOPRTUVW",
        "⁰¹²³⁴⁵⁶⁷⁸⁹⁺⁻⁼⁽⁾ᵃᵇᶜᵈᵉᶠᵍʰⁱʲᵏˡᵐⁿᵒᵖʳˢᵗᵘᵛʷˣʸᶻᴬᴮᴰᴱᴳᴴᴵᴶᴷᴸᴹᴺᴼᴾᴿᵀᵁⱽᵂ",
    )
});

pub static SUBSCRIPT: Lazy<CharMap> = Lazy::new(|| {
    CharMap::pairs(
        "0123456789+-=()aehijklmnoprstuvx",
        "₀₁₂₃₄₅₆₇₈₉₊₋₌₍₎ₐₑₕᵢⱼₖₗₘₙₒₚᵣₛₜᵤᵥₓ",
    )
});

pub static UPSIDE_DOWN: Lazy<CharMap> = Lazy::new(|| {
    CharMap::pairs(
        "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789.,!?'\"()[]{}<>&_;",
        "ɐqɔpǝɟƃɥᴉɾʞlɯuodbɹsʇnʌʍxʎz∀ꓭƆꓷƎℲ⅁HIſꓘ˥WNOԀΌꓤS⊥∩ΛMX⅄Z0ƖᄅƐㄣϛ9ㄥ86˙'¡¿,„)(][}{><⅋‾؛",
    )
});

/// Characters that need a mirrored counterpart when text is reversed
pub static MIRROR: Lazy<CharMap> = Lazy::new(|| CharMap::pairs("()[]{}<>/\\", ")(][}{><\\/"));
