use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use tracing::warn;

/// First markdown level-1 heading. `##` and deeper never match.
static H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+)$").expect("heading pattern is valid"));

/// Title and cleaned body derived from one raw prompt file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPrompt {
    pub title: String,
    pub content: String,
    pub front_matter: FrontMatter,
}

/// Known keys of a prompt file's front-matter block. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "optional_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "optional_text")]
    pub mode: Option<String>,
}

/// Derives a title and strips a leading front-matter block.
///
/// Never fails: without a heading the title comes from `fallback_name`, and
/// without a block anchored at the very start the content is returned as-is.
/// The heading line stays in the content.
pub fn extract_prompt(raw: &str, fallback_name: &str, suffix: &str) -> ExtractedPrompt {
    let title = first_heading(raw).unwrap_or_else(|| title_from_filename(fallback_name, suffix));

    let (front_matter, content) = match split_front_matter(raw) {
        Some((block, rest)) => (parse_front_matter(block, fallback_name), rest.to_string()),
        None => (FrontMatter::default(), raw.to_string()),
    };

    ExtractedPrompt {
        title,
        content,
        front_matter,
    }
}

fn first_heading(raw: &str) -> Option<String> {
    H1.captures_iter(raw)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .find(|t| !t.is_empty())
        .map(String::from)
}

/// `fix-bug-report.prompt.md` -> `Fix Bug Report`
pub fn title_from_filename(name: &str, suffix: &str) -> String {
    let stem = name.strip_suffix(suffix).unwrap_or(name).replace('-', " ");

    let mut title = String::with_capacity(stem.len());
    let mut in_word = false;
    for c in stem.chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && !in_word {
            title.extend(c.to_uppercase());
        } else {
            title.push(c);
        }
        in_word = is_word;
    }
    title
}

/// Splits `raw` into (block body, remainder) when it opens with a `---` line
/// and a later line is exactly `---`. Both delimiter lines are dropped.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let mut lines = raw.split_inclusive('\n');
    let opening = lines.next()?;
    if !is_delimiter(opening) {
        return None;
    }

    let body_start = opening.len();
    let mut offset = body_start;
    for line in lines {
        let line_end = offset + line.len();
        if is_delimiter(line) {
            return Some((&raw[body_start..offset], &raw[line_end..]));
        }
        offset = line_end;
    }
    None
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(|c| c == '\n' || c == '\r') == "---"
}

fn parse_front_matter(block: &str, file_name: &str) -> FrontMatter {
    if block.trim().is_empty() {
        return FrontMatter::default();
    }
    serde_yaml::from_str(block).unwrap_or_else(|e| {
        warn!("Ignoring malformed front-matter in {file_name}: {e}");
        FrontMatter::default()
    })
}

/// Accepts any scalar and keeps it as text; blank values become `None`.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    let text = match value {
        Some(serde_yaml::Value::String(s)) => Some(s),
        Some(serde_yaml::Value::Number(n)) => Some(n.to_string()),
        Some(serde_yaml::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    };
    Ok(text.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUFFIX: &str = ".prompt.md";

    #[test]
    fn test_front_matter_stripped_heading_kept() {
        let raw = "---\nmode: agent\n---\n# Title\nBody text";
        let out = extract_prompt(raw, "whatever.prompt.md", SUFFIX);
        assert_eq!(out.title, "Title");
        assert_eq!(out.content, "# Title\nBody text");
        assert_eq!(out.front_matter.mode.as_deref(), Some("agent"));
    }

    #[test]
    fn test_fallback_title_from_filename() {
        let raw = "No heading here.\n## Not level one";
        let out = extract_prompt(raw, "fix-bug-report.prompt.md", SUFFIX);
        assert_eq!(out.title, "Fix Bug Report");
        assert_eq!(out.content, raw);
    }

    #[test]
    fn test_delimiter_not_at_start_is_kept() {
        let raw = "# Guide\nIntro\n---\nmiddle\n---\nOutro";
        let out = extract_prompt(raw, "guide.prompt.md", SUFFIX);
        assert_eq!(out.content, raw);
        assert_eq!(out.front_matter, FrontMatter::default());
    }

    #[test]
    fn test_unclosed_front_matter_leaves_content() {
        let raw = "---\nmode: agent\n# Title\nBody";
        let out = extract_prompt(raw, "x.prompt.md", SUFFIX);
        assert_eq!(out.content, raw);
        assert_eq!(out.title, "Title");
    }

    #[test]
    fn test_only_first_block_removed() {
        let raw = "---\na: 1\n---\nBody\n---\nmore\n---\n";
        let out = extract_prompt(raw, "x.prompt.md", SUFFIX);
        assert_eq!(out.content, "Body\n---\nmore\n---\n");
    }

    #[test]
    fn test_crlf_front_matter() {
        let raw = "---\r\ndescription: 'Write docs'\r\n---\r\n# Docs\r\nBody";
        let out = extract_prompt(raw, "docs.prompt.md", SUFFIX);
        assert_eq!(out.title, "Docs");
        assert_eq!(out.content, "# Docs\r\nBody");
        assert_eq!(out.front_matter.description.as_deref(), Some("Write docs"));
    }

    #[test]
    fn test_delimiter_with_trailing_text_is_not_a_block() {
        let raw = "--- not a delimiter\nmode: agent\n---\nBody";
        let out = extract_prompt(raw, "x.prompt.md", SUFFIX);
        assert_eq!(out.content, raw);
    }

    #[test]
    fn test_malformed_front_matter_falls_back() {
        let raw = "---\ndescription: [unclosed\n---\n# T\nBody";
        let out = extract_prompt(raw, "x.prompt.md", SUFFIX);
        assert_eq!(out.front_matter, FrontMatter::default());
        assert_eq!(out.content, "# T\nBody");
    }

    #[test]
    fn test_blank_heading_skipped() {
        let raw = "#   \n# Real Title  \nBody";
        assert_eq!(extract_prompt(raw, "x.prompt.md", SUFFIX).title, "Real Title");
    }

    #[test]
    fn test_heading_requires_space() {
        let raw = "#hashtag\nBody";
        assert_eq!(
            extract_prompt(raw, "create-readme.prompt.md", SUFFIX).title,
            "Create Readme"
        );
    }

    #[test]
    fn test_empty_input() {
        let out = extract_prompt("", "empty.prompt.md", SUFFIX);
        assert_eq!(out.title, "Empty");
        assert_eq!(out.content, "");
    }

    #[test]
    fn test_title_from_filename_without_suffix() {
        assert_eq!(title_from_filename("my-notes.md", SUFFIX), "My Notes.Md");
        assert_eq!(
            title_from_filename("snake_case-name.prompt.md", SUFFIX),
            "Snake_case Name"
        );
    }
}
