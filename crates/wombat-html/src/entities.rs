//! Named and numeric character references.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html)
//!
//! The table covers the HTML 4 entity set plus the common HTML 5 additions.
//! Names flagged as legacy are also recognised without a trailing semicolon,
//! e.g. `&amp` and `&copy`.
//!
//! The same table drives escaping in the serializer: [`escape`] picks an
//! entity name for a character according to the [`EscapeMode`].

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::LazyLock;

use wombat_common::ParseErrorKind;

use crate::serializer::{Charset, EscapeMode, OutputSettings};

/// `(name, replacement, legacy)`. Names exclude the `&` and `;`.
///
/// Where several names map to one character, the first listed is the one
/// used when escaping.
const ENTITIES: &[(&str, &str, bool)] = &[
    // Markup-significant characters
    ("amp", "&", true),
    ("lt", "<", true),
    ("gt", ">", true),
    ("quot", "\"", true),
    ("apos", "'", false),
    ("AMP", "&", true),
    ("LT", "<", true),
    ("GT", ">", true),
    ("QUOT", "\"", true),
    // Latin-1 supplement
    ("nbsp", "\u{A0}", true),
    ("iexcl", "\u{A1}", true),
    ("cent", "\u{A2}", true),
    ("pound", "\u{A3}", true),
    ("curren", "\u{A4}", true),
    ("yen", "\u{A5}", true),
    ("brvbar", "\u{A6}", true),
    ("sect", "\u{A7}", true),
    ("uml", "\u{A8}", true),
    ("copy", "\u{A9}", true),
    ("ordf", "\u{AA}", true),
    ("laquo", "\u{AB}", true),
    ("not", "\u{AC}", true),
    ("shy", "\u{AD}", true),
    ("reg", "\u{AE}", true),
    ("macr", "\u{AF}", true),
    ("deg", "\u{B0}", true),
    ("plusmn", "\u{B1}", true),
    ("sup2", "\u{B2}", true),
    ("sup3", "\u{B3}", true),
    ("acute", "\u{B4}", true),
    ("micro", "\u{B5}", true),
    ("para", "\u{B6}", true),
    ("middot", "\u{B7}", true),
    ("cedil", "\u{B8}", true),
    ("sup1", "\u{B9}", true),
    ("ordm", "\u{BA}", true),
    ("raquo", "\u{BB}", true),
    ("frac14", "\u{BC}", true),
    ("frac12", "\u{BD}", true),
    ("frac34", "\u{BE}", true),
    ("iquest", "\u{BF}", true),
    ("Agrave", "\u{C0}", true),
    ("Aacute", "\u{C1}", true),
    ("Acirc", "\u{C2}", true),
    ("Atilde", "\u{C3}", true),
    ("Auml", "\u{C4}", true),
    ("Aring", "\u{C5}", true),
    ("AElig", "\u{C6}", true),
    ("Ccedil", "\u{C7}", true),
    ("Egrave", "\u{C8}", true),
    ("Eacute", "\u{C9}", true),
    ("Ecirc", "\u{CA}", true),
    ("Euml", "\u{CB}", true),
    ("Igrave", "\u{CC}", true),
    ("Iacute", "\u{CD}", true),
    ("Icirc", "\u{CE}", true),
    ("Iuml", "\u{CF}", true),
    ("ETH", "\u{D0}", true),
    ("Ntilde", "\u{D1}", true),
    ("Ograve", "\u{D2}", true),
    ("Oacute", "\u{D3}", true),
    ("Ocirc", "\u{D4}", true),
    ("Otilde", "\u{D5}", true),
    ("Ouml", "\u{D6}", true),
    ("times", "\u{D7}", true),
    ("Oslash", "\u{D8}", true),
    ("Ugrave", "\u{D9}", true),
    ("Uacute", "\u{DA}", true),
    ("Ucirc", "\u{DB}", true),
    ("Uuml", "\u{DC}", true),
    ("Yacute", "\u{DD}", true),
    ("THORN", "\u{DE}", true),
    ("szlig", "\u{DF}", true),
    ("agrave", "\u{E0}", true),
    ("aacute", "\u{E1}", true),
    ("acirc", "\u{E2}", true),
    ("atilde", "\u{E3}", true),
    ("auml", "\u{E4}", true),
    ("aring", "\u{E5}", true),
    ("aelig", "\u{E6}", true),
    ("ccedil", "\u{E7}", true),
    ("egrave", "\u{E8}", true),
    ("eacute", "\u{E9}", true),
    ("ecirc", "\u{EA}", true),
    ("euml", "\u{EB}", true),
    ("igrave", "\u{EC}", true),
    ("iacute", "\u{ED}", true),
    ("icirc", "\u{EE}", true),
    ("iuml", "\u{EF}", true),
    ("eth", "\u{F0}", true),
    ("ntilde", "\u{F1}", true),
    ("ograve", "\u{F2}", true),
    ("oacute", "\u{F3}", true),
    ("ocirc", "\u{F4}", true),
    ("otilde", "\u{F5}", true),
    ("ouml", "\u{F6}", true),
    ("divide", "\u{F7}", true),
    ("oslash", "\u{F8}", true),
    ("ugrave", "\u{F9}", true),
    ("uacute", "\u{FA}", true),
    ("ucirc", "\u{FB}", true),
    ("uuml", "\u{FC}", true),
    ("yacute", "\u{FD}", true),
    ("thorn", "\u{FE}", true),
    ("yuml", "\u{FF}", true),
    ("COPY", "\u{A9}", true),
    ("REG", "\u{AE}", true),
    // Latin Extended and spacing modifiers
    ("OElig", "\u{152}", false),
    ("oelig", "\u{153}", false),
    ("Scaron", "\u{160}", false),
    ("scaron", "\u{161}", false),
    ("Yuml", "\u{178}", false),
    ("fnof", "\u{192}", false),
    ("circ", "\u{2C6}", false),
    ("tilde", "\u{2DC}", false),
    // Greek
    ("Alpha", "\u{391}", false),
    ("Beta", "\u{392}", false),
    ("Gamma", "\u{393}", false),
    ("Delta", "\u{394}", false),
    ("Epsilon", "\u{395}", false),
    ("Zeta", "\u{396}", false),
    ("Eta", "\u{397}", false),
    ("Theta", "\u{398}", false),
    ("Iota", "\u{399}", false),
    ("Kappa", "\u{39A}", false),
    ("Lambda", "\u{39B}", false),
    ("Mu", "\u{39C}", false),
    ("Nu", "\u{39D}", false),
    ("Xi", "\u{39E}", false),
    ("Omicron", "\u{39F}", false),
    ("Pi", "\u{3A0}", false),
    ("Rho", "\u{3A1}", false),
    ("Sigma", "\u{3A3}", false),
    ("Tau", "\u{3A4}", false),
    ("Upsilon", "\u{3A5}", false),
    ("Phi", "\u{3A6}", false),
    ("Chi", "\u{3A7}", false),
    ("Psi", "\u{3A8}", false),
    ("Omega", "\u{3A9}", false),
    ("alpha", "\u{3B1}", false),
    ("beta", "\u{3B2}", false),
    ("gamma", "\u{3B3}", false),
    ("delta", "\u{3B4}", false),
    ("epsilon", "\u{3B5}", false),
    ("zeta", "\u{3B6}", false),
    ("eta", "\u{3B7}", false),
    ("theta", "\u{3B8}", false),
    ("iota", "\u{3B9}", false),
    ("kappa", "\u{3BA}", false),
    ("lambda", "\u{3BB}", false),
    ("mu", "\u{3BC}", false),
    ("nu", "\u{3BD}", false),
    ("xi", "\u{3BE}", false),
    ("omicron", "\u{3BF}", false),
    ("pi", "\u{3C0}", false),
    ("rho", "\u{3C1}", false),
    ("sigmaf", "\u{3C2}", false),
    ("sigma", "\u{3C3}", false),
    ("tau", "\u{3C4}", false),
    ("upsilon", "\u{3C5}", false),
    ("phi", "\u{3C6}", false),
    ("chi", "\u{3C7}", false),
    ("psi", "\u{3C8}", false),
    ("omega", "\u{3C9}", false),
    ("thetasym", "\u{3D1}", false),
    ("upsih", "\u{3D2}", false),
    ("piv", "\u{3D6}", false),
    // General punctuation
    ("ensp", "\u{2002}", false),
    ("emsp", "\u{2003}", false),
    ("thinsp", "\u{2009}", false),
    ("zwnj", "\u{200C}", false),
    ("zwj", "\u{200D}", false),
    ("lrm", "\u{200E}", false),
    ("rlm", "\u{200F}", false),
    ("hyphen", "\u{2010}", false),
    ("ndash", "\u{2013}", false),
    ("mdash", "\u{2014}", false),
    ("lsquo", "\u{2018}", false),
    ("rsquo", "\u{2019}", false),
    ("sbquo", "\u{201A}", false),
    ("ldquo", "\u{201C}", false),
    ("rdquo", "\u{201D}", false),
    ("bdquo", "\u{201E}", false),
    ("dagger", "\u{2020}", false),
    ("Dagger", "\u{2021}", false),
    ("bull", "\u{2022}", false),
    ("hellip", "\u{2026}", false),
    ("permil", "\u{2030}", false),
    ("prime", "\u{2032}", false),
    ("Prime", "\u{2033}", false),
    ("lsaquo", "\u{2039}", false),
    ("rsaquo", "\u{203A}", false),
    ("oline", "\u{203E}", false),
    ("frasl", "\u{2044}", false),
    ("euro", "\u{20AC}", false),
    // Letterlike symbols and arrows
    ("image", "\u{2111}", false),
    ("weierp", "\u{2118}", false),
    ("real", "\u{211C}", false),
    ("trade", "\u{2122}", false),
    ("alefsym", "\u{2135}", false),
    ("larr", "\u{2190}", false),
    ("uarr", "\u{2191}", false),
    ("rarr", "\u{2192}", false),
    ("darr", "\u{2193}", false),
    ("harr", "\u{2194}", false),
    ("crarr", "\u{21B5}", false),
    ("lArr", "\u{21D0}", false),
    ("uArr", "\u{21D1}", false),
    ("rArr", "\u{21D2}", false),
    ("dArr", "\u{21D3}", false),
    ("hArr", "\u{21D4}", false),
    // Mathematical operators
    ("forall", "\u{2200}", false),
    ("part", "\u{2202}", false),
    ("exist", "\u{2203}", false),
    ("empty", "\u{2205}", false),
    ("nabla", "\u{2207}", false),
    ("isin", "\u{2208}", false),
    ("notin", "\u{2209}", false),
    ("ni", "\u{220B}", false),
    ("prod", "\u{220F}", false),
    ("sum", "\u{2211}", false),
    ("minus", "\u{2212}", false),
    ("lowast", "\u{2217}", false),
    ("radic", "\u{221A}", false),
    ("prop", "\u{221D}", false),
    ("infin", "\u{221E}", false),
    ("ang", "\u{2220}", false),
    ("and", "\u{2227}", false),
    ("or", "\u{2228}", false),
    ("cap", "\u{2229}", false),
    ("cup", "\u{222A}", false),
    ("int", "\u{222B}", false),
    ("there4", "\u{2234}", false),
    ("sim", "\u{223C}", false),
    ("cong", "\u{2245}", false),
    ("asymp", "\u{2248}", false),
    ("ne", "\u{2260}", false),
    ("equiv", "\u{2261}", false),
    ("le", "\u{2264}", false),
    ("ge", "\u{2265}", false),
    ("sub", "\u{2282}", false),
    ("sup", "\u{2283}", false),
    ("nsub", "\u{2284}", false),
    ("sube", "\u{2286}", false),
    ("supe", "\u{2287}", false),
    ("oplus", "\u{2295}", false),
    ("otimes", "\u{2297}", false),
    ("perp", "\u{22A5}", false),
    ("sdot", "\u{22C5}", false),
    ("lceil", "\u{2308}", false),
    ("rceil", "\u{2309}", false),
    ("lfloor", "\u{230A}", false),
    ("rfloor", "\u{230B}", false),
    ("lang", "\u{27E8}", false),
    ("rang", "\u{27E9}", false),
    // Shapes
    ("loz", "\u{25CA}", false),
    ("starf", "\u{2605}", false),
    ("star", "\u{2606}", false),
    ("spades", "\u{2660}", false),
    ("clubs", "\u{2663}", false),
    ("hearts", "\u{2665}", false),
    ("diams", "\u{2666}", false),
    ("check", "\u{2713}", false),
    // ASCII punctuation names
    ("Tab", "\t", false),
    ("NewLine", "\n", false),
    ("excl", "!", false),
    ("num", "#", false),
    ("dollar", "$", false),
    ("percnt", "%", false),
    ("lpar", "(", false),
    ("rpar", ")", false),
    ("ast", "*", false),
    ("plus", "+", false),
    ("comma", ",", false),
    ("period", ".", false),
    ("sol", "/", false),
    ("colon", ":", false),
    ("semi", ";", false),
    ("equals", "=", false),
    ("quest", "?", false),
    ("commat", "@", false),
    ("lsqb", "[", false),
    ("bsol", "\\", false),
    ("rsqb", "]", false),
    ("lowbar", "_", false),
    ("grave", "`", false),
    ("lcub", "{", false),
    ("verbar", "|", false),
    ("rcub", "}", false),
    // Multi-codepoint
    ("fjlig", "fj", false),
];

/// Entity name -> (replacement, legacy).
static BY_NAME: LazyLock<HashMap<&'static str, (&'static str, bool)>> = LazyLock::new(|| {
    ENTITIES
        .iter()
        .map(|&(name, value, legacy)| (name, (value, legacy)))
        .collect()
});

/// Character -> preferred entity name, for single-character replacements.
static BY_CHAR: LazyLock<HashMap<char, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for &(name, value, _) in ENTITIES {
        let mut chars = value.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            let _ = map.entry(c).or_insert(name);
        }
    }
    map
});

/// Look up a named character reference.
///
/// `name` excludes the leading `&` and trailing `;`.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static str> {
    BY_NAME.get(name).map(|&(value, _)| value)
}

/// Returns true if the entity may appear without a trailing semicolon.
#[must_use]
pub fn is_legacy(name: &str) -> bool {
    BY_NAME.get(name).is_some_and(|&(_, legacy)| legacy)
}

/// The entity name used to escape `c`, if it has one.
#[must_use]
pub fn name_for(c: char) -> Option<&'static str> {
    BY_CHAR.get(&c).copied()
}

/// Check if any entity name starts with the given prefix.
#[must_use]
pub fn any_entity_has_prefix(prefix: &str) -> bool {
    ENTITIES.iter().any(|(name, _, _)| name.starts_with(prefix))
}

/// A named reference found at the start of some input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NamedMatch {
    /// Bytes of input matched, including the `;` if present.
    pub(crate) len: usize,
    pub(crate) value: &'static str,
    pub(crate) has_semicolon: bool,
}

/// Match a named character reference at the start of `input`, which begins
/// just after the `&`.
///
/// The whole name is read first: a run of letters followed by a run of ASCII
/// digits. The run is decoded only when it is a legacy name, or any known
/// name directly followed by `;`. A known prefix of a longer run does not
/// match, so `&notreal;` stays as written.
///
/// Inside an attribute value a name followed by an alphanumeric, `=`, `-` or
/// `_` is left alone, so query strings such as `?a=1&copy=2` survive.
pub(crate) fn match_named(input: &str, in_attribute: bool) -> Option<NamedMatch> {
    let letters = input
        .find(|c: char| !c.is_alphabetic())
        .unwrap_or(input.len());
    let digits = input[letters..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len() - letters);
    let run = letters + digits;
    if run == 0 {
        return None;
    }

    let name = &input[..run];
    let rest = &input[run..];
    let has_semicolon = rest.starts_with(';');
    let value = lookup(name).filter(|_| has_semicolon || is_legacy(name))?;

    if in_attribute
        && rest.starts_with(|c: char| c.is_alphanumeric() || matches!(c, '=' | '-' | '_'))
    {
        return None;
    }

    Some(NamedMatch {
        len: run + usize::from(has_semicolon),
        value,
        has_semicolon,
    })
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// Map a character reference code to the character it produces, along with
/// the parse error it raises, if any.
pub(crate) fn numeric_replacement(code: u32) -> (char, Option<ParseErrorKind>) {
    let error = Some(ParseErrorKind::InvalidNumericCharacterReference(code));

    // "If the number is 0x00, then this is a null-character-reference parse error.
    // Set the character reference code to 0xFFFD."
    // "If the number is greater than 0x10FFFF, then this is a
    // character-reference-outside-unicode-range parse error."
    // "If the number is a surrogate, then this is a surrogate-character-reference
    // parse error."
    if code == 0 || code > 0x0010_FFFF || (0xD800..=0xDFFF).contains(&code) {
        return ('\u{FFFD}', error);
    }

    // "If the number is a noncharacter, then this is a
    // noncharacter-character-reference parse error."
    let noncharacter = (0xFDD0..=0xFDEF).contains(&code) || (code & 0xFFFE) == 0xFFFE;

    // "If the number is 0x0D, or a control that's not ASCII whitespace, then this
    // is a control-character-reference parse error. If the number is one of the
    // numbers in the first column of the following table, then find the row with
    // that number in the first column, and set the character reference code to
    // the number in the second column."
    let control = code == 0x0D
        || (code < 0x20 && !matches!(code, 0x09 | 0x0A | 0x0C))
        || (0x7F..=0x9F).contains(&code);

    let replaced = c1_replacement(code).unwrap_or(code);
    let c = char::from_u32(replaced).unwrap_or('\u{FFFD}');
    (c, (noncharacter || control).then_some(error).flatten())
}

/// The Windows-1252 mapping for C1 control codes in character references.
const fn c1_replacement(code: u32) -> Option<u32> {
    let replacement = match code {
        0x80 => 0x20AC,
        0x82 => 0x201A,
        0x83 => 0x0192,
        0x84 => 0x201E,
        0x85 => 0x2026,
        0x86 => 0x2020,
        0x87 => 0x2021,
        0x88 => 0x02C6,
        0x89 => 0x2030,
        0x8A => 0x0160,
        0x8B => 0x2039,
        0x8C => 0x0152,
        0x8E => 0x017D,
        0x91 => 0x2018,
        0x92 => 0x2019,
        0x93 => 0x201C,
        0x94 => 0x201D,
        0x95 => 0x2022,
        0x96 => 0x2013,
        0x97 => 0x2014,
        0x98 => 0x02DC,
        0x99 => 0x2122,
        0x9A => 0x0161,
        0x9B => 0x203A,
        0x9C => 0x0153,
        0x9E => 0x017E,
        0x9F => 0x0178,
        _ => return None,
    };
    Some(replacement)
}

/// Decode the character references in `text` as they would be decoded in
/// document text.
#[must_use]
pub fn unescape(text: &str) -> String {
    unescape_impl(text, false)
}

/// Decode the character references in `text` as they would be decoded in an
/// attribute value, where a legacy name followed by `=` or an alphanumeric
/// is left alone.
#[must_use]
pub fn unescape_attribute(text: &str) -> String {
    unescape_impl(text, true)
}

fn unescape_impl(text: &str, in_attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match decode_reference(after, in_attribute) {
            Some((decoded, consumed)) => {
                out.push_str(&decoded);
                rest = &after[consumed..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode one reference at the start of `input` (just after the `&`).
/// Returns the replacement and the number of bytes consumed.
fn decode_reference(input: &str, in_attribute: bool) -> Option<(String, usize)> {
    if let Some(numeric) = input.strip_prefix('#') {
        let (radix, digits_start) = match numeric.chars().next() {
            Some('x' | 'X') => (16, 2),
            _ => (10, 1),
        };
        let digits = &input[digits_start..];
        let len = digits
            .find(|c: char| !c.is_digit(radix))
            .unwrap_or(digits.len());
        if len == 0 {
            return None;
        }
        let code = u32::from_str_radix(&digits[..len], radix).unwrap_or(u32::MAX);
        let mut consumed = digits_start + len;
        if input[consumed..].starts_with(';') {
            consumed += 1;
        }
        let (c, _) = numeric_replacement(code);
        return Some((c.to_string(), consumed));
    }

    let found = match_named(input, in_attribute)?;
    Some((found.value.to_string(), found.len))
}

/// Where escaped text will be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeContext {
    /// Element text content.
    Text,
    /// A double-quoted attribute value.
    Attribute,
}

/// Escape `text` for output with the given settings.
///
/// - text: `&`, `<` and `>` are escaped;
/// - attribute values: `&` and `"` are escaped;
/// - U+00A0 is written `&nbsp;`, or `&#xa0;` in [`EscapeMode::Xhtml`];
/// - [`EscapeMode::Extended`] writes every non-ASCII character that has an
///   entity name as that entity;
/// - with [`Charset::Ascii`], remaining non-ASCII characters are written as
///   named entities when [`EscapeMode::Base`] knows a legacy name, and as
///   decimal references otherwise.
#[must_use]
pub fn escape(text: &str, settings: &OutputSettings, context: EscapeContext) -> String {
    let mode = settings.escape_mode();
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' if context == EscapeContext::Text => out.push_str("&lt;"),
            '>' if context == EscapeContext::Text => out.push_str("&gt;"),
            '"' if context == EscapeContext::Attribute => out.push_str("&quot;"),
            '\u{A0}' => {
                if mode == EscapeMode::Xhtml {
                    out.push_str("&#xa0;");
                } else {
                    out.push_str("&nbsp;");
                }
            }
            c if c.is_ascii() => out.push(c),
            c => {
                let named = match mode {
                    EscapeMode::Extended => name_for(c),
                    EscapeMode::Base if settings.charset() == Charset::Ascii => {
                        name_for(c).filter(|name| is_legacy(name))
                    }
                    _ => None,
                };
                if let Some(name) = named {
                    out.push('&');
                    out.push_str(name);
                    out.push(';');
                } else if settings.charset() == Charset::Ascii {
                    let _ = write!(out, "&#{};", u32::from(c));
                } else {
                    out.push(c);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_legacy_flag() {
        assert_eq!(lookup("amp"), Some("&"));
        assert_eq!(lookup("hellip"), Some("\u{2026}"));
        assert!(is_legacy("copy"));
        assert!(!is_legacy("hellip"));
        assert_eq!(lookup("nosuch"), None);
    }

    #[test]
    fn test_match_named_reads_whole_name() {
        let found = match_named("notin;x", false).expect("notin; should match");
        assert_eq!(found.value, "\u{2209}");
        assert_eq!(found.len, 6);
        assert!(found.has_semicolon);

        // A legacy prefix of a longer name is not a match.
        assert_eq!(match_named("notit;", false), None);
        assert_eq!(match_named("copyright", false), None);
    }

    #[test]
    fn test_match_named_without_semicolon_needs_legacy_name() {
        let found = match_named("not x", false).expect("legacy not should match");
        assert_eq!(found.value, "\u{AC}");
        assert_eq!(found.len, 3);
        assert!(!found.has_semicolon);
        assert_eq!(match_named("hellip", false), None);
        assert_eq!(match_named("frac12;", false).map(|m| m.value), Some("\u{BD}"));
    }

    #[test]
    fn test_match_named_in_attribute() {
        assert_eq!(match_named("copy=2", true), None);
        assert_eq!(match_named("amp_x", true), None);
        assert_eq!(match_named("amp;x", true).map(|m| m.len), Some(4));
        assert_eq!(match_named("copy 2", true).map(|m| m.value), Some("\u{A9}"));
    }

    #[test]
    fn test_numeric_replacement_rules() {
        assert_eq!(numeric_replacement(0x41), ('A', None));
        assert_eq!(numeric_replacement(0x80).0, '\u{20AC}');
        assert!(numeric_replacement(0x80).1.is_some());
        assert_eq!(numeric_replacement(0).0, '\u{FFFD}');
        assert_eq!(numeric_replacement(0xD800).0, '\u{FFFD}');
        assert_eq!(numeric_replacement(0x0011_0000).0, '\u{FFFD}');
        assert_eq!(numeric_replacement(0x0A), ('\n', None));
    }

    #[test]
    fn test_unescape_text_and_attribute() {
        assert_eq!(unescape("a &amp; b &lt;c&gt; &#65;&#x42;"), "a & b <c> AB");
        assert_eq!(unescape("&copy 2024"), "\u{A9} 2024");
        assert_eq!(unescape("&bogus; &"), "&bogus; &");
        assert_eq!(unescape_attribute("?a=1&copy=2"), "?a=1&copy=2");
        assert_eq!(unescape_attribute("&amp;x"), "&x");
    }
}
