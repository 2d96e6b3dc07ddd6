//! Bidirectional encodings and classic ciphers.
//!
//! Decoders validate their input format and report a
//! [`Transformation`](crate::error::Error::Transformation) error naming the
//! expected format; encoders and ciphers are total.

use std::collections::HashMap;

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use once_cell::sync::Lazy;

use super::{parse, total, total_with};
use crate::error::{Error, Result};
use crate::method::{Category, TransformMethod};
use crate::options::Options;

const MORSE: &[(char, &str)] = &[
    ('A', ".-"), ('B', "-..."), ('C', "-.-."), ('D', "-.."), ('E', "."), ('F', "..-."),
    ('G', "--."), ('H', "...."), ('I', ".."), ('J', ".---"), ('K', "-.-"), ('L', ".-.."),
    ('M', "--"), ('N', "-."), ('O', "---"), ('P', ".--."), ('Q', "--.-"), ('R', ".-."),
    ('S', "..."), ('T', "-"), ('U', "..-"), ('V', "...-"), ('W', ".--"), ('X', "-..-"),
    ('Y', "-.--"), ('Z', "--.."), ('0', "-----"), ('1', ".----"), ('2', "..---"),
    ('3', "...--"), ('4', "....-"), ('5', "....."), ('6', "-...."), ('7', "--..."),
    ('8', "---.."), ('9', "----."), ('.', ".-.-.-"), (',', "--..--"), ('?', "..--.."),
    ('\'', ".----."), ('!', "-.-.--"), ('/', "-..-."), ('(', "-.--."), (')', "-.--.-"),
    ('&', ".-..."), (':', "---..."), (';', "-.-.-."), ('=', "-...-"), ('+', ".-.-."),
    ('-', "-....-"), ('_', "..--.-"), ('"', ".-..-."), ('$', "...-..-"), ('@', ".--.-."),
];

static MORSE_DECODE: Lazy<HashMap<&'static str, char>> =
    Lazy::new(|| MORSE.iter().map(|&(c, code)| (code, c)).collect());

const NATO: [&str; 26] = [
    "Alfa", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel", "India",
    "Juliett", "Kilo", "Lima", "Mike", "November", "Oscar", "Papa", "Quebec", "Romeo", "Sierra",
    "Tango", "Uniform", "Victor", "Whiskey", "X-ray", "Yankee", "Zulu",
];

const DIGIT_WORDS: [&str; 10] = [
    "Zero", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

pub fn methods() -> Vec<TransformMethod> {
    vec![
        TransformMethod::new(
            "base64-encode",
            Category::Encoding,
            "Encodes text as Base64 (option url_safe=true for the URL alphabet)",
            total_with(base64_encode),
        ),
        TransformMethod::new(
            "base64-decode",
            Category::Encoding,
            "Decodes Base64 back to text",
            base64_decode,
        )
        .fallible(),
        TransformMethod::new(
            "hex-encode",
            Category::Encoding,
            "Encodes the UTF-8 bytes of the text as hexadecimal",
            total(|input| hex::encode(input.as_bytes())),
        ),
        TransformMethod::new(
            "hex-decode",
            Category::Encoding,
            "Decodes hexadecimal bytes back to text",
            parse(hex_decode),
        )
        .fallible(),
        TransformMethod::new(
            "binary-encode",
            Category::Encoding,
            "Encodes the UTF-8 bytes of the text as 8-bit binary groups",
            total(binary_encode),
        ),
        TransformMethod::new(
            "binary-decode",
            Category::Encoding,
            "Decodes 8-bit binary groups back to text",
            parse(binary_decode),
        )
        .fallible(),
        TransformMethod::new(
            "url-encode",
            Category::Encoding,
            "Percent-encodes text for use in URLs",
            total(|input| urlencoding::encode(input).into_owned()),
        ),
        TransformMethod::new(
            "url-decode",
            Category::Encoding,
            "Decodes percent-encoded text",
            parse(url_decode),
        )
        .fallible(),
        TransformMethod::new(
            "html-encode",
            Category::Encoding,
            "Escapes HTML special characters as entities",
            total(|input| html_escape::encode_safe(input).into_owned()),
        ),
        TransformMethod::new(
            "html-decode",
            Category::Encoding,
            "Decodes HTML entities",
            total(|input| html_escape::decode_html_entities(input).into_owned()),
        ),
        TransformMethod::new(
            "unicode-escape",
            Category::Encoding,
            "Escapes every character as a \\uXXXX sequence",
            total(unicode_escape),
        ),
        TransformMethod::new(
            "unicode-unescape",
            Category::Encoding,
            "Decodes \\uXXXX and \\u{...} escape sequences",
            parse(unicode_unescape),
        )
        .fallible(),
        TransformMethod::new(
            "rot13",
            Category::Encoding,
            "Rotates letters by 13 places",
            total(|input| shift_letters(input, 13)),
        ),
        TransformMethod::new(
            "rot47",
            Category::Encoding,
            "Rotates printable ASCII characters by 47 places",
            total(rot47),
        ),
        TransformMethod::new(
            "caesar-cipher",
            Category::Encoding,
            "Shifts letters by a fixed amount (option shift, default 3)",
            total_with(|input, options| shift_letters(input, options.get_i64("shift", 3))),
        ),
        TransformMethod::new(
            "atbash",
            Category::Encoding,
            "Mirrors the alphabet (A becomes Z)",
            total(atbash),
        ),
        TransformMethod::new(
            "morse-encode",
            Category::Encoding,
            "Encodes text as Morse code",
            total(morse_encode),
        ),
        TransformMethod::new(
            "morse-decode",
            Category::Encoding,
            "Decodes Morse code back to text",
            parse(morse_decode),
        )
        .fallible(),
        TransformMethod::new(
            "ascii-codes",
            Category::Encoding,
            "Lists the decimal code point of every character",
            total(|input| {
                input
                    .chars()
                    .map(|c| (c as u32).to_string())
                    .collect::<Vec<String>>()
                    .join(" ")
            }),
        ),
        TransformMethod::new(
            "nato-phonetic",
            Category::Encoding,
            "Spells text with the NATO phonetic alphabet",
            total(nato_phonetic),
        ),
    ]
}

fn utf8(bytes: Vec<u8>, format: &str) -> Result<String> {
    String::from_utf8(bytes).map_err(|_| {
        Error::Transformation(format!("Decoded {} data is not valid UTF-8 text", format))
    })
}

fn base64_encode(input: &str, options: &Options) -> String {
    if options.get_bool("url_safe", false) {
        URL_SAFE.encode(input.as_bytes())
    } else {
        STANDARD.encode(input.as_bytes())
    }
}

fn base64_decode(input: &str, options: &Options) -> Result<String> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let engine = if options.get_bool("url_safe", false) {
        URL_SAFE
    } else {
        STANDARD
    };
    let bytes = engine.decode(compact.as_bytes()).map_err(|e| {
        Error::Transformation(format!(
            "Invalid Base64 input ({}): expected A-Z, a-z, 0-9, '+', '/' with '=' padding",
            e
        ))
    })?;
    utf8(bytes, "Base64")
}

fn hex_decode(input: &str) -> Result<String> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    if digits.len() % 2 != 0 {
        return Err(Error::Transformation(
            "Invalid hex input: expected an even number of hexadecimal digits".to_string(),
        ));
    }
    let bytes = hex::decode(digits).map_err(|_| {
        Error::Transformation(
            "Invalid hex input: expected only hexadecimal digits (0-9, a-f)".to_string(),
        )
    })?;
    utf8(bytes, "hex")
}

fn binary_encode(input: &str) -> String {
    input
        .bytes()
        .map(|b| format!("{:08b}", b))
        .collect::<Vec<String>>()
        .join(" ")
}

fn binary_decode(input: &str) -> Result<String> {
    let bits: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if bits.chars().any(|c| c != '0' && c != '1') {
        return Err(Error::Transformation(
            "Invalid binary input: expected only the digits 0 and 1".to_string(),
        ));
    }
    if bits.len() % 8 != 0 {
        return Err(Error::Transformation(
            "Invalid binary input: expected groups of 8 bits".to_string(),
        ));
    }
    let bytes = bits
        .as_bytes()
        .chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .fold(0u8, |acc, bit| (acc << 1) | (bit - b'0'))
        })
        .collect();
    utf8(bytes, "binary")
}

fn url_decode(input: &str) -> Result<String> {
    urlencoding::decode(input)
        .map(|s| s.into_owned())
        .map_err(|_| {
            Error::Transformation(
                "Invalid URL-encoded input: percent escapes must decode to UTF-8 text".to_string(),
            )
        })
}

fn unicode_escape(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            let code = c as u32;
            if code > 0xFFFF {
                format!("\\u{{{:X}}}", code)
            } else {
                format!("\\u{:04X}", code)
            }
        })
        .collect()
}

fn invalid_escape(position: usize) -> Error {
    Error::Transformation(format!(
        "Invalid Unicode escape at position {}: expected \\uXXXX or \\u{{...}}",
        position
    ))
}

fn unicode_unescape(input: &str) -> Result<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut result = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\\' || chars.get(i + 1) != Some(&'u') {
            result.push(chars[i]);
            i += 1;
            continue;
        }

        let start = i;
        let (code, next) = if chars.get(i + 2) == Some(&'{') {
            let close = chars[i + 3..]
                .iter()
                .position(|&c| c == '}')
                .ok_or_else(|| invalid_escape(start))?;
            let digits: String = chars[i + 3..i + 3 + close].iter().collect();
            let code = u32::from_str_radix(&digits, 16).map_err(|_| invalid_escape(start))?;
            (code, i + 4 + close)
        } else {
            (read_hex4(&chars, i + 2).ok_or_else(|| invalid_escape(start))?, i + 6)
        };
        i = next;

        let code = if (0xD800..0xDC00).contains(&code) {
            // High surrogate: must be followed by an escaped low surrogate
            let low = (chars.get(i) == Some(&'\\') && chars.get(i + 1) == Some(&'u'))
                .then(|| read_hex4(&chars, i + 2))
                .flatten()
                .filter(|low| (0xDC00..0xE000).contains(low))
                .ok_or_else(|| invalid_escape(start))?;
            i += 6;
            0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00)
        } else {
            code
        };

        result.push(char::from_u32(code).ok_or_else(|| invalid_escape(start))?);
    }
    Ok(result)
}

fn read_hex4(chars: &[char], from: usize) -> Option<u32> {
    let digits: String = chars.get(from..from + 4)?.iter().collect();
    u32::from_str_radix(&digits, 16).ok()
}

/// Shifts ASCII letters by `shift` places, wrapping around the alphabet
fn shift_letters(input: &str, shift: i64) -> String {
    let shift = shift.rem_euclid(26) as u8;
    input
        .chars()
        .map(|c| match c {
            'a'..='z' => ((c as u8 - b'a' + shift) % 26 + b'a') as char,
            'A'..='Z' => ((c as u8 - b'A' + shift) % 26 + b'A') as char,
            _ => c,
        })
        .collect()
}

fn rot47(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '!'..='~' => ((c as u8 - 33 + 47) % 94 + 33) as char,
            _ => c,
        })
        .collect()
}

fn atbash(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'a'..='z' => (b'z' - (c as u8 - b'a')) as char,
            'A'..='Z' => (b'Z' - (c as u8 - b'A')) as char,
            _ => c,
        })
        .collect()
}

fn morse_encode(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            word.chars()
                .map(|c| {
                    let upper = c.to_ascii_uppercase();
                    MORSE
                        .iter()
                        .find(|(m, _)| *m == upper)
                        .map(|(_, code)| code.to_string())
                        .unwrap_or_else(|| c.to_string())
                })
                .collect::<Vec<String>>()
                .join(" ")
        })
        .collect::<Vec<String>>()
        .join(" / ")
}

fn morse_decode(input: &str) -> Result<String> {
    input
        .split('/')
        .map(|word| {
            word.split_whitespace()
                .map(|code| {
                    if let Some(&c) = MORSE_DECODE.get(code) {
                        return Ok(c);
                    }
                    // characters without a Morse code are written as themselves
                    let mut chars = code.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) if !matches!(c, '.' | '-') => Ok(c),
                        _ => Err(Error::Transformation(format!(
                            "Invalid Morse code \"{}\": expected dots and dashes separated by spaces, words by '/'",
                            code
                        ))),
                    }
                })
                .collect::<Result<String>>()
        })
        .collect::<Result<Vec<String>>>()
        .map(|words| {
            words
                .into_iter()
                .filter(|w| !w.is_empty())
                .collect::<Vec<String>>()
                .join(" ")
        })
}

fn nato_phonetic(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            word.chars()
                .map(|c| match c {
                    'a'..='z' => NATO[(c as u8 - b'a') as usize].to_string(),
                    'A'..='Z' => NATO[(c as u8 - b'A') as usize].to_string(),
                    '0'..='9' => DIGIT_WORDS[(c as u8 - b'0') as usize].to_string(),
                    _ => c.to_string(),
                })
                .collect::<Vec<String>>()
                .join(" ")
        })
        .collect::<Vec<String>>()
        .join(" / ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRINTABLE: &str = "Hello, World! 0123 ~`@#$%^&*()_+-={}[]|\\:;\"'<>?,./";

    fn opts() -> Options {
        Options::new()
    }

    #[test]
    fn test_base64_round_trip() {
        let encoded = base64_encode(PRINTABLE, &opts());
        assert_eq!(base64_decode(&encoded, &opts()).unwrap(), PRINTABLE);
        assert_eq!(base64_encode("Hello", &opts()), "SGVsbG8=");

        let url_opts = Options::new().with("url_safe", true);
        let encoded = base64_encode("??>>", &url_opts);
        assert!(!encoded.contains('/') && !encoded.contains('+'));
        assert_eq!(base64_decode(&encoded, &url_opts).unwrap(), "??>>");
    }

    #[test]
    fn test_base64_rejects_invalid_input() {
        let err = base64_decode("not-valid-base64!", &opts()).unwrap_err();
        assert!(matches!(err, Error::Transformation(ref m) if m.contains("Invalid Base64")));
        // Valid Base64 that is not UTF-8 text
        assert!(base64_decode("/w==", &opts()).is_err());
    }

    #[test]
    fn test_hex() {
        assert_eq!(hex_decode(&hex::encode(PRINTABLE)).unwrap(), PRINTABLE);
        assert_eq!(hex_decode("0x48 65 6c 6c 6f").unwrap(), "Hello");
        assert!(matches!(
            hex_decode("abc"),
            Err(Error::Transformation(ref m)) if m.contains("even number")
        ));
        assert!(matches!(
            hex_decode("zz"),
            Err(Error::Transformation(ref m)) if m.contains("hexadecimal digits")
        ));
    }

    #[test]
    fn test_binary() {
        assert_eq!(binary_encode("Hi"), "01001000 01101001");
        assert_eq!(binary_decode(&binary_encode(PRINTABLE)).unwrap(), PRINTABLE);
        assert!(matches!(
            binary_decode("0100100"),
            Err(Error::Transformation(ref m)) if m.contains("groups of 8")
        ));
        assert!(binary_decode("0100 2000").is_err());
    }

    #[test]
    fn test_url_and_html() {
        let encoded = urlencoding::encode(PRINTABLE).into_owned();
        assert_eq!(url_decode(&encoded).unwrap(), PRINTABLE);
        assert_eq!(url_decode("a%20b").unwrap(), "a b");
        assert!(url_decode("%FF").is_err());

        let escaped = html_escape::encode_safe(PRINTABLE).into_owned();
        assert!(!escaped.contains('<'));
        assert_eq!(html_escape::decode_html_entities(&escaped), PRINTABLE);
    }

    #[test]
    fn test_unicode_escape() {
        assert_eq!(unicode_escape("A"), "\\u0041");
        assert_eq!(unicode_escape("🦀"), "\\u{1F980}");
        assert_eq!(unicode_unescape(&unicode_escape(PRINTABLE)).unwrap(), PRINTABLE);
        assert_eq!(unicode_unescape("x\\uD83E\\uDD80y").unwrap(), "x🦀y");
        assert_eq!(unicode_unescape("caf\\u00e9").unwrap(), "café");
        assert!(unicode_unescape("\\uZZZZ").is_err());
        assert!(unicode_unescape("\\uD83E alone").is_err());
        assert!(unicode_unescape("\\u{110000}").is_err());
    }

    #[test]
    fn test_rotations() {
        assert_eq!(shift_letters("Hello", 13), "Uryyb");
        assert_eq!(shift_letters(&shift_letters(PRINTABLE, 13), 13), PRINTABLE);
        assert_eq!(rot47(&rot47(PRINTABLE)), PRINTABLE);
        assert_eq!(shift_letters("abc xyz", 3), "def abc");
        assert_eq!(shift_letters("def", -3), "abc");
        assert_eq!(atbash(&atbash(PRINTABLE)), PRINTABLE);
        assert_eq!(atbash("Abc"), "Zyx");
    }

    #[test]
    fn test_morse() {
        assert_eq!(morse_encode("SOS help"), "... --- ... / .... . .-.. .--.");
        let text = "THE QUICK BROWN FOX 123 JUMPS!";
        assert_eq!(morse_decode(&morse_encode(text)).unwrap(), text);
        assert!(matches!(
            morse_decode("... ---x"),
            Err(Error::Transformation(ref m)) if m.contains("Morse")
        ));
        assert!(morse_decode(".-.-.-.-.-.-.-").is_err());
    }

    #[test]
    fn test_morse_round_trip_printable_ascii() {
        let printable: String = (' '..='~').collect();
        let decoded = morse_decode(&morse_encode(&printable)).unwrap();
        // Morse has no case and collapses surrounding whitespace
        assert_eq!(decoded, printable.trim().to_uppercase());

        for text in ["A#B", "50%", "x*y", "a [b] {c} <d> ~e^ `f` g|h\\i"] {
            let encoded = morse_encode(text);
            assert_eq!(morse_decode(&encoded).unwrap(), text.to_uppercase(), "{}", encoded);
        }
        assert_eq!(morse_encode("A#B"), ".- # -...");
    }

    #[test]
    fn test_nato() {
        assert_eq!(nato_phonetic("ab 1"), "Alfa Bravo / One");
    }
}
