//! Element categories shared by the tree builder and the serializer.
//!
//! [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#elements-2)
//! and [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements).
//!
//! All names are ASCII-lowercase, as produced by the tokenizer.

/// [§ 13.1.2 Void elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "area, base, br, col, embed, hr, img, input, link, meta, source, track, wbr"
///
/// The obsolete `basefont`, `bgsound`, `frame`, `keygen` and `param` are
/// serialized without end tags too.
#[must_use]
pub fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "basefont"
            | "bgsound"
            | "br"
            | "col"
            | "embed"
            | "frame"
            | "hr"
            | "img"
            | "input"
            | "keygen"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Elements whose children are written without escaping.
///
/// [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments):
/// "If the parent of current node is a style, script, xmp, iframe, noembed,
/// noframes, or plaintext element, or if the parent of current node is a
/// noscript element and scripting is enabled for the node, then append the
/// value of current node's data IDL attribute literally."
///
/// Scripting is never enabled, so `noscript` is not on the list.
#[must_use]
pub fn is_raw_text(tag: &str) -> bool {
    matches!(
        tag,
        "script" | "style" | "xmp" | "iframe" | "noembed" | "noframes" | "plaintext"
    )
}

/// Elements whose whitespace survives pretty printing.
#[must_use]
pub fn preserves_whitespace(tag: &str) -> bool {
    matches!(tag, "pre" | "textarea" | "script" | "style" | "plaintext")
}

/// Elements the pretty printer starts on their own line.
#[must_use]
pub fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "html"
            | "head"
            | "body"
            | "frameset"
            | "script"
            | "noscript"
            | "style"
            | "meta"
            | "link"
            | "title"
            | "frame"
            | "noframes"
            | "section"
            | "nav"
            | "aside"
            | "hgroup"
            | "header"
            | "footer"
            | "p"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "ul"
            | "ol"
            | "pre"
            | "div"
            | "blockquote"
            | "hr"
            | "address"
            | "figure"
            | "figcaption"
            | "form"
            | "fieldset"
            | "ins"
            | "del"
            | "dl"
            | "dt"
            | "dd"
            | "li"
            | "table"
            | "caption"
            | "thead"
            | "tfoot"
            | "tbody"
            | "colgroup"
            | "col"
            | "tr"
            | "th"
            | "td"
            | "video"
            | "audio"
            | "canvas"
            | "details"
            | "menu"
            | "plaintext"
            | "template"
            | "article"
            | "main"
            | "search"
            | "svg"
            | "math"
            | "center"
            | "dir"
            | "applet"
            | "marquee"
            | "listing"
    )
}

/// Block elements whose content is laid out like inline content: their
/// children do not each get a line of their own.
#[must_use]
pub fn is_inline_container(tag: &str) -> bool {
    matches!(
        tag,
        "title"
            | "a"
            | "p"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "pre"
            | "address"
            | "li"
            | "th"
            | "td"
            | "script"
            | "style"
            | "ins"
            | "del"
            | "s"
            | "button"
    )
}

/// Tags the serializer and the tree builder know about. Unknown tags are
/// treated as block-level when they contain blocks.
#[must_use]
pub fn is_known(tag: &str) -> bool {
    is_block(tag)
        || is_void(tag)
        || is_formatting(tag)
        || matches!(
            tag,
            "abbr"
                | "acronym"
                | "bdi"
                | "bdo"
                | "button"
                | "cite"
                | "data"
                | "datalist"
                | "dfn"
                | "iframe"
                | "kbd"
                | "label"
                | "legend"
                | "map"
                | "mark"
                | "meter"
                | "noembed"
                | "object"
                | "optgroup"
                | "option"
                | "output"
                | "progress"
                | "q"
                | "rb"
                | "rp"
                | "rt"
                | "rtc"
                | "ruby"
                | "samp"
                | "select"
                | "span"
                | "sub"
                | "summary"
                | "sup"
                | "textarea"
                | "time"
                | "var"
                | "xmp"
        )
}

/// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#formatting)
///
/// "The elements in the formatting category are: a, b, big, code, em, font,
/// i, nobr, s, small, strike, strong, tt, u."
#[must_use]
pub fn is_formatting(tag: &str) -> bool {
    matches!(
        tag,
        "a" | "b"
            | "big"
            | "code"
            | "em"
            | "font"
            | "i"
            | "nobr"
            | "s"
            | "small"
            | "strike"
            | "strong"
            | "tt"
            | "u"
    )
}

/// [§ 13.2.4.2 Special](https://html.spec.whatwg.org/multipage/parsing.html#special)
///
/// "The following elements have varying levels of special parsing rules."
#[must_use]
pub fn is_special(tag: &str) -> bool {
    matches!(
        tag,
        "address"
            | "applet"
            | "area"
            | "article"
            | "aside"
            | "base"
            | "basefont"
            | "bgsound"
            | "blockquote"
            | "body"
            | "br"
            | "button"
            | "caption"
            | "center"
            | "col"
            | "colgroup"
            | "dd"
            | "details"
            | "dir"
            | "div"
            | "dl"
            | "dt"
            | "embed"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "frame"
            | "frameset"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "head"
            | "header"
            | "hgroup"
            | "hr"
            | "html"
            | "iframe"
            | "img"
            | "input"
            | "keygen"
            | "li"
            | "link"
            | "listing"
            | "main"
            | "marquee"
            | "menu"
            | "meta"
            | "nav"
            | "noembed"
            | "noframes"
            | "noscript"
            | "object"
            | "ol"
            | "p"
            | "param"
            | "plaintext"
            | "pre"
            | "script"
            | "search"
            | "section"
            | "select"
            | "source"
            | "style"
            | "summary"
            | "table"
            | "tbody"
            | "td"
            | "template"
            | "textarea"
            | "tfoot"
            | "th"
            | "thead"
            | "title"
            | "tr"
            | "track"
            | "ul"
            | "wbr"
            | "xmp"
    )
}

/// Attributes whose presence alone carries meaning.
///
/// [§ 2.3.2 Boolean attributes](https://html.spec.whatwg.org/multipage/common-microsyntaxes.html#boolean-attributes):
/// "If the attribute is present, its value must either be the empty string or
/// a value that is an ASCII case-insensitive match for the attribute's
/// canonical name."
#[must_use]
pub fn is_boolean_attribute(name: &str) -> bool {
    matches!(
        name,
        "allowfullscreen"
            | "async"
            | "autofocus"
            | "checked"
            | "compact"
            | "controls"
            | "declare"
            | "default"
            | "defer"
            | "disabled"
            | "formnovalidate"
            | "hidden"
            | "inert"
            | "ismap"
            | "itemscope"
            | "multiple"
            | "muted"
            | "nohref"
            | "noresize"
            | "noshade"
            | "novalidate"
            | "nowrap"
            | "open"
            | "readonly"
            | "required"
            | "reversed"
            | "seamless"
            | "selected"
            | "sortable"
            | "truespeed"
            | "typemustmatch"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_elements() {
        for tag in ["br", "img", "input", "meta", "wbr"] {
            assert!(is_void(tag), "{tag} should be void");
        }
        assert!(!is_void("p"));
        assert!(!is_void("script"));
    }

    #[test]
    fn test_formatting_elements_are_not_special() {
        for tag in ["a", "b", "i", "nobr", "u"] {
            assert!(is_formatting(tag));
            assert!(!is_special(tag));
        }
    }

    #[test]
    fn test_known_covers_inline_and_block() {
        assert!(is_known("span"));
        assert!(is_known("div"));
        assert!(!is_known("my-widget"));
    }
}
