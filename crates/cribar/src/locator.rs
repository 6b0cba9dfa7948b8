//! Element locators: pure descriptors resolved at query time.
//!
//! A [`Locator`] never caches elements. Every operation that consumes one
//! re-resolves it against the live page, so stale references cannot leak
//! between interactions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selector strategy for finding elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector
    Css(String),
    /// Exact text content match
    Text(String),
    /// Attribute name/value match
    Attribute {
        /// Attribute name
        name: String,
        /// Required attribute value
        value: String,
    },
    /// ARIA role match, optionally narrowed by accessible name
    Role {
        /// Role value (`button`, `option`, ...)
        role: String,
        /// Exact accessible name, when narrowing is needed
        name: Option<String>,
    },
}

impl Selector {
    /// Convert to a JavaScript query expression resolving the first match
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(css) => format!("document.querySelector({css:?})"),
            Self::Text(text) => format!(
                "Array.from(document.querySelectorAll('*')).find(el => el.textContent.trim() === {text:?})"
            ),
            Self::Attribute { name, value } => {
                let css = format!("[{name}={value:?}]");
                format!("document.querySelector({css:?})")
            }
            Self::Role { role, name: None } => {
                let css = format!("[role={role:?}]");
                format!("document.querySelector({css:?})")
            }
            Self::Role {
                role,
                name: Some(name),
            } => {
                let css = format!("[role={role:?}]");
                format!(
                    "Array.from(document.querySelectorAll({css:?})).find(el => (el.getAttribute('aria-label') || el.textContent || '').trim() === {name:?})"
                )
            }
        }
    }

    /// Convert to a JavaScript expression listing the text of all matches
    #[must_use]
    pub fn to_texts_query(&self) -> String {
        match self {
            Self::Css(css) => format!(
                "Array.from(document.querySelectorAll({css:?})).map(el => el.textContent.trim())"
            ),
            Self::Text(text) => format!(
                "Array.from(document.querySelectorAll('*')).filter(el => el.textContent.trim() === {text:?}).map(el => el.textContent.trim())"
            ),
            Self::Attribute { name, value } => {
                let css = format!("[{name}={value:?}]");
                format!(
                    "Array.from(document.querySelectorAll({css:?})).map(el => el.textContent.trim())"
                )
            }
            Self::Role { role, name: None } => {
                let css = format!("[role={role:?}]");
                format!(
                    "Array.from(document.querySelectorAll({css:?})).map(el => el.textContent.trim())"
                )
            }
            Self::Role {
                role,
                name: Some(name),
            } => {
                let css = format!("[role={role:?}]");
                format!(
                    "Array.from(document.querySelectorAll({css:?})).filter(el => (el.getAttribute('aria-label') || el.textContent || '').trim() === {name:?}).map(el => el.textContent.trim())"
                )
            }
        }
    }

    /// Convert to a JavaScript expression counting all matches
    #[must_use]
    pub fn to_count_query(&self) -> String {
        match self {
            Self::Css(css) => format!("document.querySelectorAll({css:?}).length"),
            Self::Text(text) => format!(
                "Array.from(document.querySelectorAll('*')).filter(el => el.textContent.trim() === {text:?}).length"
            ),
            Self::Attribute { name, value } => {
                let css = format!("[{name}={value:?}]");
                format!("document.querySelectorAll({css:?}).length")
            }
            Self::Role { role, name: None } => {
                let css = format!("[role={role:?}]");
                format!("document.querySelectorAll({css:?}).length")
            }
            Self::Role {
                role,
                name: Some(name),
            } => {
                let css = format!("[role={role:?}]");
                format!(
                    "Array.from(document.querySelectorAll({css:?})).filter(el => (el.getAttribute('aria-label') || el.textContent || '').trim() === {name:?}).length"
                )
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(css) => write!(f, "css={css}"),
            Self::Text(text) => write!(f, "text={text}"),
            Self::Attribute { name, value } => write!(f, "attr[{name}={value}]"),
            Self::Role { role, name: None } => write!(f, "role={role}"),
            Self::Role {
                role,
                name: Some(name),
            } => write!(f, "role={role}[name={name}]"),
        }
    }
}

/// A locator for finding elements on a page.
///
/// Immutable after construction; cloning is cheap and shares nothing with
/// the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    selector: Selector,
}

impl Locator {
    /// Create a locator from a selector
    #[must_use]
    pub const fn new(selector: Selector) -> Self {
        Self { selector }
    }

    /// Create a CSS locator
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(Selector::Css(selector.into()))
    }

    /// Create an exact-text locator
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Selector::Text(text.into()))
    }

    /// Create an attribute locator
    #[must_use]
    pub fn attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(Selector::Attribute {
            name: name.into(),
            value: value.into(),
        })
    }

    /// Create a role locator
    #[must_use]
    pub fn role(role: impl Into<String>) -> Self {
        Self::new(Selector::Role {
            role: role.into(),
            name: None,
        })
    }

    /// Create a role locator narrowed to an exact accessible name
    #[must_use]
    pub fn role_named(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Selector::Role {
            role: role.into(),
            name: Some(name.into()),
        })
    }

    /// The underlying selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Canonical description, used in queries, errors and mock bookkeeping
    #[must_use]
    pub fn description(&self) -> String {
        self.selector.to_string()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.selector.fmt(f)
    }
}
