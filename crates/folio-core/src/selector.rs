#![forbid(unsafe_code)]

//! Typed element selectors.
//!
//! The controller never builds raw selector strings. A [`Selector`] renders to
//! CSS for the browser host ([`Selector::to_css`]) and is matched structurally
//! by hosts without a selector engine.

use core::fmt;

/// A small, closed subset of CSS selectors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// `.class`
    Class(String),
    /// `#id`
    Id(String),
    /// `tag[attr]`
    TagWithAttr { tag: String, attr: String },
    /// `tag[attr^="prefix"]`
    AttrPrefix {
        tag: String,
        attr: String,
        prefix: String,
    },
    /// `.class[attr="value"]`
    ClassWithAttr {
        class: String,
        attr: String,
        value: String,
    },
    /// `ancestor descendant`
    Descendant(Box<Selector>, Box<Selector>),
}

impl Selector {
    #[must_use]
    pub fn class(name: &str) -> Self {
        Self::Class(name.to_owned())
    }

    #[must_use]
    pub fn id(id: &str) -> Self {
        Self::Id(id.to_owned())
    }

    #[must_use]
    pub fn tag_with_attr(tag: &str, attr: &str) -> Self {
        Self::TagWithAttr {
            tag: tag.to_owned(),
            attr: attr.to_owned(),
        }
    }

    #[must_use]
    pub fn attr_prefix(tag: &str, attr: &str, prefix: &str) -> Self {
        Self::AttrPrefix {
            tag: tag.to_owned(),
            attr: attr.to_owned(),
            prefix: prefix.to_owned(),
        }
    }

    #[must_use]
    pub fn class_with_attr(class: &str, attr: &str, value: &str) -> Self {
        Self::ClassWithAttr {
            class: class.to_owned(),
            attr: attr.to_owned(),
            value: value.to_owned(),
        }
    }

    #[must_use]
    pub fn descendant(ancestor: Selector, descendant: Selector) -> Self {
        Self::Descendant(Box::new(ancestor), Box::new(descendant))
    }

    /// Resolve an in-page `href` (`"#about"`) to the id selector it targets.
    ///
    /// Returns `None` for anything that is not a non-empty fragment.
    #[must_use]
    pub fn from_fragment(href: &str) -> Option<Self> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        Some(Self::id(id))
    }

    /// Render as a CSS selector string.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Class(name) => format!(".{name}"),
            Self::Id(id) => format!("#{}", escape_ident(id)),
            Self::TagWithAttr { tag, attr } => format!("{tag}[{attr}]"),
            Self::AttrPrefix { tag, attr, prefix } => {
                format!("{tag}[{attr}^=\"{}\"]", escape_string(prefix))
            }
            Self::ClassWithAttr { class, attr, value } => {
                format!(".{class}[{attr}=\"{}\"]", escape_string(value))
            }
            Self::Descendant(ancestor, descendant) => {
                format!("{} {}", ancestor.to_css(), descendant.to_css())
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Escape an identifier for use after `#`.
///
/// Only the characters that actually appear in fragment ids need handling;
/// anything outside `[A-Za-z0-9_-]` is backslash-escaped.
fn escape_ident(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    for (idx, ch) in ident.chars().enumerate() {
        let plain = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii();
        if plain && !(idx == 0 && ch.is_ascii_digit()) {
            out.push(ch);
        } else if ch.is_ascii_digit() {
            out.push_str(&format!("\\{:x} ", ch as u32));
        } else {
            out.push('\\');
            out.push(ch);
        }
    }
    out
}

fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
