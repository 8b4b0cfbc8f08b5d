//! `<!NAME!>` markup expansion and formatting removal

use crate::ansi::{self, Color};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

lazy_static! {
    /// Any tag-shaped token, recognized or not
    static ref TAG: Regex = Regex::new(r"<!([A-Za-z_]+)!>").unwrap();

    /// CSI and character-set escape sequences
    pub(crate) static ref ESCAPE: Regex = Regex::new(r"\x1b[\[()][;?0-9]*[0-9A-Za-z]").unwrap();

    /// ^C, ^Z and DEL
    pub(crate) static ref CONTROL: Regex = Regex::new(r"[\x03\x1a\x7f]").unwrap();
}

pub(crate) const TAB_SPACES: &str = "    ";

/// Lookup table from markup tag names to ANSI sequences
#[derive(Debug, Clone)]
pub struct MarkupExpander {
    tags: HashMap<String, &'static str>,
}

impl MarkupExpander {
    pub fn new() -> Self {
        let mut tags = HashMap::new();
        tags.insert("CLOSE".to_string(), ansi::CLOSE);
        for color in Color::iter() {
            let name = color.name().to_ascii_uppercase();
            tags.insert(format!("BACKGROUND_{}", name), color.bg());
            tags.insert(name, color.fg());
        }
        tags.insert("BOLD".to_string(), ansi::BOLD);
        tags.insert("ITALIC".to_string(), ansi::ITALIC);
        tags.insert("UNDERLINE".to_string(), ansi::UNDERLINE);
        tags.insert("STRIKE".to_string(), ansi::STRIKE);
        tags.insert("REVERSE".to_string(), ansi::REVERSE);
        Self { tags }
    }

    /// ANSI sequence for a tag name, case-insensitive
    pub fn lookup(&self, name: &str) -> Option<&'static str> {
        self.tags.get(&name.to_ascii_uppercase()).copied()
    }

    /// Replace every recognized tag with its ANSI sequence.
    ///
    /// Unrecognized tags are left as they are.
    pub fn expand(&self, text: &str) -> String {
        TAG.replace_all(text, |caps: &Captures| match self.lookup(&caps[1]) {
            Some(code) => code.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
    }
}

impl Default for MarkupExpander {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove all markup tags, escape sequences and control bytes, and
/// expand tabs, leaving only the printable text.
pub fn strip_formatting(text: &str) -> String {
    let mut current = strip_once(text);
    // removing one token can splice the halves of another together
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> String {
    let text = TAG.replace_all(text, "");
    let text = text.replace('\t', TAB_SPACES);
    let text = ESCAPE.replace_all(&text, "");
    CONTROL.replace_all(&text, "").into_owned()
}
