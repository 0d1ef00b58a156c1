use core::fmt;

use wombat_dom::{Attribute, Attributes};

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "The output of the tokenization step is a series of zero or more of the following
/// tokens: DOCTYPE, start tag, end tag, comment, character, end-of-file."
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// "DOCTYPE tokens have a name, a public identifier, a system identifier,
    /// and a force-quirks flag."
    ///
    /// Missing identifiers are `None`, which is distinct from the empty string.
    Doctype {
        /// "a name"
        name: Option<String>,
        /// "a public identifier"
        public_identifier: Option<String>,
        /// "a system identifier"
        system_identifier: Option<String>,
        /// "a force-quirks flag"
        force_quirks: bool,
    },

    /// "Start and end tag tokens have a tag name, a self-closing flag, and a
    /// list of attributes, each of which has a name and a value."
    StartTag {
        /// "a tag name", ASCII-lowercased
        name: String,
        /// "a self-closing flag"
        self_closing: bool,
        /// "a list of attributes", duplicates already removed
        attributes: Attributes,
    },

    /// End tag token. Attributes on end tags are a parse error and are dropped.
    EndTag {
        /// "a tag name", ASCII-lowercased
        name: String,
    },

    /// "Comment and character tokens have data."
    Comment {
        /// "data"
        data: String,
    },

    /// A single character of text.
    Character {
        /// "data"
        data: char,
    },

    /// End-of-file token signals the end of input.
    EndOfFile,
}

impl Token {
    /// Create a character token with the given character.
    #[must_use]
    pub const fn new_character(c: char) -> Self {
        Self::Character { data: c }
    }

    /// Returns true if this is an end-of-file token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EndOfFile)
    }

    /// Returns true if this is a start tag with one of the given names.
    #[must_use]
    pub fn is_start_tag_named(&self, names: &[&str]) -> bool {
        matches!(self, Self::StartTag { name, .. } if names.contains(&name.as_str()))
    }

    /// Returns true if this is an end tag with one of the given names.
    #[must_use]
    pub fn is_end_tag_named(&self, names: &[&str]) -> bool {
        matches!(self, Self::EndTag { name } if names.contains(&name.as_str()))
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// Returns true for a character token holding tab, LF, FF, CR or space.
    #[must_use]
    pub const fn is_whitespace_character(&self) -> bool {
        matches!(
            self,
            Self::Character {
                data: '\t' | '\n' | '\x0C' | '\r' | ' '
            }
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                write!(f, "DOCTYPE")?;
                if let Some(n) = name {
                    write!(f, " {n}")?;
                }
                if let Some(pub_id) = public_identifier {
                    write!(f, " PUBLIC \"{pub_id}\"")?;
                }
                if let Some(sys_id) = system_identifier {
                    write!(f, " SYSTEM \"{sys_id}\"")?;
                }
                if *force_quirks {
                    write!(f, " (force-quirks)")?;
                }
                Ok(())
            }
            Self::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if *self_closing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
            Self::EndTag { name } => write!(f, "</{name}>"),
            Self::Comment { data } => write!(f, "<!--{data}-->"),
            Self::Character { data } => match data {
                '\n' => write!(f, "character \\n"),
                '\t' => write!(f, "character \\t"),
                ' ' => write!(f, "character SPACE"),
                c => write!(f, "character {c:?}"),
            },
            Self::EndOfFile => write!(f, "EOF"),
        }
    }
}

/// Whether the tag under construction is a start or an end tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TagKind {
    Start,
    End,
}

/// The tag token the tokenizer is currently building.
///
/// Kept separate from [`Token`] so that the state machine can append to
/// names and attributes without matching on token variants.
#[derive(Debug)]
pub(super) struct TagBuilder {
    pub(super) kind: TagKind,
    pub(super) name: String,
    pub(super) self_closing: bool,
    pub(super) attributes: Vec<Attribute>,
    /// The attribute whose name or value is still being read.
    pub(super) current_attribute: Option<Attribute>,
}

impl TagBuilder {
    /// "When a start or end tag token is created, its self-closing flag must be
    /// unset (its other state is that it be set), and its attributes list must
    /// be empty."
    pub(super) const fn new(kind: TagKind) -> Self {
        Self {
            kind,
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
            current_attribute: None,
        }
    }

    /// Move the attribute being read onto the tag.
    ///
    /// Returns the attribute name if it duplicates an earlier attribute; the
    /// duplicate is dropped and the earlier value wins.
    pub(super) fn finish_attribute(&mut self) -> Option<String> {
        let attr = self.current_attribute.take()?;
        if self.attributes.iter().any(|a| a.name == attr.name) {
            return Some(attr.name);
        }
        self.attributes.push(attr);
        None
    }

    /// Convert into the emitted token.
    pub(super) fn into_token(self) -> Token {
        match self.kind {
            TagKind::Start => Token::StartTag {
                name: self.name,
                self_closing: self.self_closing,
                attributes: self
                    .attributes
                    .into_iter()
                    .map(|a| (a.name, a.value))
                    .collect(),
            },
            TagKind::End => Token::EndTag { name: self.name },
        }
    }
}

/// The DOCTYPE token the tokenizer is currently building.
#[derive(Debug, Default)]
pub(super) struct DoctypeBuilder {
    pub(super) name: Option<String>,
    pub(super) public_identifier: Option<String>,
    pub(super) system_identifier: Option<String>,
    pub(super) force_quirks: bool,
}

impl DoctypeBuilder {
    pub(super) fn into_token(self) -> Token {
        Token::Doctype {
            name: self.name,
            public_identifier: self.public_identifier,
            system_identifier: self.system_identifier,
            force_quirks: self.force_quirks,
        }
    }
}
