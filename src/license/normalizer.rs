use anyhow::Result;
use regex::Regex;

/// Cleans up license text for display in a Settings footer.
///
/// Hard-wrapped paragraphs are rejoined into single lines, while blank lines
/// between paragraphs are kept.
pub struct Normalizer {
    soft_wrap: Regex,
}

impl Normalizer {
    pub fn new() -> Result<Self> {
        let soft_wrap = Regex::new(r"(\S)[ \t]*(?:\r\n|\n)[ \t]*(\S)")?;
        Ok(Self { soft_wrap })
    }

    pub fn normalize(&self, raw: &str) -> String {
        // Single pass: "   " becomes "  ", not " ".
        let text = raw.replace("  ", " ");

        // Also single pass: matches can't overlap, so "a\nb\nc" keeps its second break.
        self.soft_wrap.replace_all(&text, "${1} ${2}").into_owned()
    }
}
