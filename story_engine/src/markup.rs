//! Markdown-lite rendering for scene and response text.
//!
//! Only three constructs exist: `**strong**`, `*em*`, and line breaks.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
static EM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("valid regex"));

/// Output flavour for rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    #[default]
    Plain,
    Html,
}

impl Markup {
    pub fn render(&self, text: &str) -> String {
        match self {
            Markup::Plain => to_plain(text),
            Markup::Html => to_html(text),
        }
    }
}

/// Render markdown-lite as an HTML fragment.
pub fn to_html(text: &str) -> String {
    let strong = STRONG_RE.replace_all(text, "<strong>$1</strong>");
    let em = EM_RE.replace_all(&strong, "<em>$1</em>");
    em.replace('\n', "<br/>")
}

/// Strip markdown-lite emphasis, keeping line breaks.
pub fn to_plain(text: &str) -> String {
    let strong = STRONG_RE.replace_all(text, "$1");
    EM_RE.replace_all(&strong, "$1").into_owned()
}
