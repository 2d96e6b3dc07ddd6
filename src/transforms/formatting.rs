//! Pretty printers and minifiers for structured text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::{parse, total};
use crate::error::{Error, Result};
use crate::method::{Category, TransformMethod};
use crate::options::Options;

static XML_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<!\[CDATA\[.*?\]\]>|<\?.*?\?>|<![^>]*>|</?[^<>]+>").unwrap()
});
static CSS_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static CSS_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static CSS_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*([{}:;,>])\s*").unwrap());
static HTML_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<(script|style)\b.*?</(script|style)\s*>").unwrap());
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").unwrap());
static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n\s*").unwrap());

const SQL_KEYWORDS: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "AS", "ASC", "BETWEEN", "BY", "CASE", "CREATE", "CROSS",
    "DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "END", "EXISTS", "FROM", "FULL", "GROUP",
    "HAVING", "IN", "INNER", "INSERT", "INTO", "IS", "JOIN", "LEFT", "LIKE", "LIMIT", "NOT",
    "NULL", "OFFSET", "ON", "OR", "ORDER", "OUTER", "RIGHT", "SELECT", "SET", "TABLE", "THEN",
    "UNION", "UPDATE", "VALUES", "WHEN", "WHERE", "WITH",
];

/// Keywords that open a new clause on their own line
const SQL_CLAUSES: &[&str] = &[
    "SELECT", "FROM", "WHERE", "GROUP", "ORDER", "HAVING", "LIMIT", "OFFSET", "JOIN", "LEFT",
    "RIGHT", "INNER", "FULL", "CROSS", "UNION", "INSERT", "VALUES", "UPDATE", "SET", "DELETE",
];

/// Modifiers that keep a following JOIN on the same line
const SQL_JOIN_MODIFIERS: &[&str] = &["LEFT", "RIGHT", "INNER", "FULL", "CROSS", "OUTER"];

pub fn methods() -> Vec<TransformMethod> {
    vec![
        TransformMethod::new(
            "json-format",
            Category::CodeFormatting,
            "Pretty prints JSON (option indent, default 2)",
            json_format,
        )
        .fallible(),
        TransformMethod::new(
            "json-minify",
            Category::CodeFormatting,
            "Removes all insignificant whitespace from JSON",
            parse(json_minify),
        )
        .fallible(),
        TransformMethod::new(
            "xml-format",
            Category::CodeFormatting,
            "Indents XML one element per line",
            xml_format,
        )
        .fallible(),
        TransformMethod::new(
            "sql-format",
            Category::CodeFormatting,
            "Uppercases SQL keywords and puts every clause on its own line",
            parse(sql_format),
        )
        .fallible(),
        TransformMethod::new(
            "css-minify",
            Category::CodeFormatting,
            "Strips comments and whitespace from CSS",
            total(css_minify),
        ),
        TransformMethod::new(
            "strip-html",
            Category::CodeFormatting,
            "Removes HTML tags, scripts and styles, keeping the text",
            total(strip_html),
        ),
    ]
}

fn invalid_json(e: serde_json::Error) -> Error {
    Error::Transformation(format!("Invalid JSON: {}", e))
}

fn json_format(input: &str, options: &Options) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(input).map_err(invalid_json)?;
    let indent = " ".repeat(options.get_usize("indent", 2));

    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(
        &mut buffer,
        PrettyFormatter::with_indent(indent.as_bytes()),
    );
    value.serialize(&mut serializer).map_err(invalid_json)?;
    String::from_utf8(buffer).map_err(|e| Error::Transformation(e.to_string()))
}

fn json_minify(input: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(input).map_err(invalid_json)?;
    serde_json::to_string(&value).map_err(invalid_json)
}

#[derive(Debug, PartialEq)]
enum XmlToken<'a> {
    Open(&'a str, &'a str),
    Close(&'a str, &'a str),
    /// Self-closing elements, comments, CDATA, prolog and doctype
    Leaf(&'a str),
    Text(&'a str),
}

fn malformed_xml(message: impl Into<String>) -> Error {
    Error::Transformation(format!("Invalid XML: {}", message.into()))
}

fn tag_name(tag: &str) -> &str {
    tag.trim_start_matches('<')
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .next()
        .unwrap_or_default()
}

fn push_text<'a>(text: &'a str, tokens: &mut Vec<XmlToken<'a>>) -> Result<()> {
    if text.contains('<') {
        return Err(malformed_xml("unterminated tag"));
    }
    let text = text.trim();
    if !text.is_empty() {
        tokens.push(XmlToken::Text(text));
    }
    Ok(())
}

fn tokenize_xml(input: &str) -> Result<Vec<XmlToken<'_>>> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for m in XML_TOKEN.find_iter(input) {
        push_text(&input[last..m.start()], &mut tokens)?;
        last = m.end();

        let raw = m.as_str();
        let token = if raw.starts_with("<!") || raw.starts_with("<?") || raw.ends_with("/>") {
            XmlToken::Leaf(raw)
        } else if raw.starts_with("</") {
            XmlToken::Close(tag_name(raw), raw)
        } else {
            XmlToken::Open(tag_name(raw), raw)
        };
        if let XmlToken::Open(name, _) | XmlToken::Close(name, _) = token {
            if name.is_empty() {
                return Err(malformed_xml(format!("malformed tag {}", raw)));
            }
        }
        tokens.push(token);
    }
    push_text(&input[last..], &mut tokens)?;
    Ok(tokens)
}

fn xml_format(input: &str, options: &Options) -> Result<String> {
    let tokens = tokenize_xml(input)?;
    let unit = " ".repeat(options.get_usize("indent", 2));
    let mut lines: Vec<String> = Vec::new();
    let mut stack: Vec<&str> = Vec::new();
    let mut has_element = false;
    let mut i = 0;

    while i < tokens.len() {
        let indent = unit.repeat(stack.len());
        match tokens[i] {
            XmlToken::Open(name, raw) => {
                has_element = true;
                // Elements holding only text (or nothing) stay on one line
                match (tokens.get(i + 1), tokens.get(i + 2)) {
                    (Some(XmlToken::Close(close, end)), _) if *close == name => {
                        lines.push(format!("{}{}{}", indent, raw, end));
                        i += 2;
                        continue;
                    }
                    (Some(XmlToken::Text(text)), Some(XmlToken::Close(close, end)))
                        if *close == name =>
                    {
                        lines.push(format!("{}{}{}{}", indent, raw, text, end));
                        i += 3;
                        continue;
                    }
                    _ => {
                        lines.push(format!("{}{}", indent, raw));
                        stack.push(name);
                    }
                }
            }
            XmlToken::Close(name, raw) => match stack.pop() {
                Some(open) if open == name => {
                    lines.push(format!("{}{}", unit.repeat(stack.len()), raw));
                }
                Some(open) => {
                    return Err(malformed_xml(format!(
                        "expected </{}> but found </{}>",
                        open, name
                    )))
                }
                None => return Err(malformed_xml(format!("unexpected closing tag </{}>", name))),
            },
            XmlToken::Leaf(raw) => {
                has_element |= raw.ends_with("/>") && !raw.starts_with("<?");
                lines.push(format!("{}{}", indent, raw));
            }
            XmlToken::Text(text) => {
                if stack.is_empty() {
                    return Err(malformed_xml("text outside of the root element"));
                }
                lines.push(format!("{}{}", indent, text));
            }
        }
        i += 1;
    }

    if let Some(open) = stack.pop() {
        return Err(malformed_xml(format!("unclosed element <{}>", open)));
    }
    if !has_element {
        return Err(malformed_xml("no root element found"));
    }
    Ok(lines.join("\n"))
}

#[derive(Debug, PartialEq)]
enum SqlToken {
    Word(String),
    Literal(String),
    Symbol(String),
}

fn tokenize_sql(input: &str) -> Result<Vec<SqlToken>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '\'' || c == '"' || c == '`' {
            chars.next();
            let mut literal = c.to_string();
            loop {
                match chars.next() {
                    Some(q) if q == c => {
                        literal.push(q);
                        // Doubled quote is an escaped quote
                        if chars.peek() == Some(&c) {
                            literal.push(c);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    Some(other) => literal.push(other),
                    None => {
                        return Err(Error::Transformation(
                            "Invalid SQL: unterminated string literal".to_string(),
                        ))
                    }
                }
            }
            tokens.push(SqlToken::Literal(literal));
        } else if c.is_alphanumeric() || c == '_' || c == '@' || c == '$' {
            let mut word = String::new();
            while let Some(&w) = chars.peek() {
                if w.is_alphanumeric() || w == '_' || w == '@' || w == '$' {
                    word.push(w);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(SqlToken::Word(word));
        } else if "<>=!".contains(c) {
            let mut op = String::new();
            while let Some(&o) = chars.peek() {
                if "<>=!".contains(o) {
                    op.push(o);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(SqlToken::Symbol(op));
        } else {
            chars.next();
            tokens.push(SqlToken::Symbol(c.to_string()));
        }
    }
    Ok(tokens)
}

fn sql_format(input: &str) -> Result<String> {
    let tokens = tokenize_sql(input)?;
    let mut out = String::new();
    let mut depth: usize = 0;
    let mut prev = String::new();

    for token in tokens {
        let (text, newline) = match token {
            SqlToken::Word(word) => {
                let upper = word.to_uppercase();
                if SQL_KEYWORDS.contains(&upper.as_str()) {
                    let clause = SQL_CLAUSES.contains(&upper.as_str())
                        && !(upper == "JOIN" && SQL_JOIN_MODIFIERS.contains(&prev.as_str()));
                    let newline = if clause {
                        Some(0)
                    } else if upper == "AND" || upper == "OR" {
                        Some(1)
                    } else {
                        None
                    };
                    (upper, newline)
                } else {
                    (word, None)
                }
            }
            SqlToken::Literal(literal) => (literal, None),
            SqlToken::Symbol(symbol) => {
                match symbol.as_str() {
                    "(" => depth += 1,
                    ")" => {
                        depth = depth.checked_sub(1).ok_or_else(|| {
                            Error::Transformation(
                                "Invalid SQL: unbalanced parentheses".to_string(),
                            )
                        })?
                    }
                    _ => {}
                }
                (symbol, None)
            }
        };

        match newline {
            Some(extra) if !out.is_empty() => {
                out.push('\n');
                out.push_str(&"  ".repeat(depth + extra));
            }
            _ => {
                let glued = out.is_empty()
                    || out.ends_with('(')
                    || out.ends_with('.')
                    || matches!(text.as_str(), "," | ")" | ";" | ".")
                    || (text == "(" && !SQL_KEYWORDS.contains(&prev.as_str()));
                if !glued {
                    out.push(' ');
                }
            }
        }
        out.push_str(&text);
        prev = text;
    }

    if depth != 0 {
        return Err(Error::Transformation(
            "Invalid SQL: unbalanced parentheses".to_string(),
        ));
    }
    Ok(out)
}

fn css_minify(input: &str) -> String {
    let without_comments = CSS_COMMENT.replace_all(input, "");
    let collapsed = CSS_SPACE.replace_all(&without_comments, " ");
    CSS_PUNCT
        .replace_all(&collapsed, "$1")
        .replace(";}", "}")
        .trim()
        .to_string()
}

fn strip_html(input: &str) -> String {
    let without_blocks = HTML_BLOCK.replace_all(input, "");
    let without_tags = HTML_TAG.replace_all(&without_blocks, "");
    let text = html_escape::decode_html_entities(&without_tags);
    BLANK_LINES.replace_all(text.trim(), "\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format() {
        let input = r#"{"name":"textforge","tags":["a","b"],"nested":{"x":1}}"#;
        let expected = "{\n  \"name\": \"textforge\",\n  \"tags\": [\n    \"a\",\n    \"b\"\n  ],\n  \"nested\": {\n    \"x\": 1\n  }\n}";
        assert_eq!(json_format(input, &Options::new()).unwrap(), expected);

        let four = json_format(r#"{"a":1}"#, &Options::new().with("indent", 4)).unwrap();
        assert_eq!(four, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn test_json_minify_and_errors() {
        assert_eq!(json_minify("{ \"a\" : [ 1, 2 ] }").unwrap(), r#"{"a":[1,2]}"#);
        let err = json_format("{not json}", &Options::new()).unwrap_err();
        assert!(matches!(err, Error::Transformation(ref m) if m.starts_with("Invalid JSON")));
        assert!(json_minify("").is_err());
    }

    #[test]
    fn test_xml_format() {
        let input = r#"<?xml version="1.0"?><root><item id="1">One</item><empty/><list><a></a></list></root>"#;
        let expected = [
            r#"<?xml version="1.0"?>"#,
            "<root>",
            r#"  <item id="1">One</item>"#,
            "  <empty/>",
            "  <list>",
            "    <a></a>",
            "  </list>",
            "</root>",
        ]
        .join("\n");
        assert_eq!(xml_format(input, &Options::new()).unwrap(), expected);
    }

    #[test]
    fn test_xml_keeps_comments_and_cdata() {
        let input = "<a><!-- note --><![CDATA[x < y]]></a>";
        let formatted = xml_format(input, &Options::new()).unwrap();
        assert_eq!(formatted, "<a>\n  <!-- note -->\n  <![CDATA[x < y]]>\n</a>");
    }

    #[test]
    fn test_xml_errors() {
        let check = |input: &str, fragment: &str| match xml_format(input, &Options::new()) {
            Err(Error::Transformation(m)) => assert!(m.contains(fragment), "{}", m),
            other => panic!("expected error for {}, got {:?}", input, other),
        };
        check("<a><b></a>", "expected </b>");
        check("<a>", "unclosed element <a>");
        check("</a>", "unexpected closing tag");
        check("just text", "text outside");
        check("<a>x <b</a>", "unterminated");
        check("<!-- only a comment -->", "no root element");
    }

    #[test]
    fn test_sql_format() {
        let input = "select id, name from users u left join orders o on u.id = o.user_id where active = 1 and (age > 18 or vip = 'y') order by name";
        let expected = [
            "SELECT id, name",
            "FROM users u",
            "LEFT JOIN orders o ON u.id = o.user_id",
            "WHERE active = 1",
            "  AND (age > 18",
            "    OR vip = 'y')",
            "ORDER BY name",
        ]
        .join("\n");
        assert_eq!(sql_format(input).unwrap(), expected);
    }

    #[test]
    fn test_sql_functions_and_literals() {
        assert_eq!(
            sql_format("select count(*) from t where n = 'it''s'").unwrap(),
            "SELECT count(*)\nFROM t\nWHERE n = 'it''s'"
        );
        assert!(matches!(
            sql_format("select 'open"),
            Err(Error::Transformation(ref m)) if m.contains("unterminated")
        ));
        assert!(sql_format("select (1").is_err());
        assert!(sql_format("select 1)").is_err());
    }

    #[test]
    fn test_css_minify() {
        let css = "/* header */\nbody {\n  color : red;\n  margin: 0 auto;\n}\n\na > b , c { x: 1 }";
        assert_eq!(css_minify(css), "body{color:red;margin:0 auto}a>b,c{x:1}");
    }

    #[test]
    fn test_strip_html() {
        let html = "<html><head><style>p{}</style><script>alert(1)</script></head>\
                    <body><p>Fish &amp; Chips</p><!-- hidden --></body></html>";
        assert_eq!(strip_html(html), "Fish & Chips");
        assert_eq!(strip_html("plain"), "plain");
    }
}
