//! Markdown rendering and the artifact-repair pipeline.
//!
//! The converter output is serviceable but noisy: icon fonts come through as
//! stray underscores and single-digit lines, inline SVG/data URIs leak into
//! image targets, and some link structures get mangled. `sanitize_markdown`
//! applies a fixed, ordered list of global rewrites that repairs all of the
//! known artifacts. The order is load-bearing; later rules assume earlier
//! ones already ran.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::extract::ExtractedPage;

/// 3+ newlines collapse to a paragraph break; applied early and re-applied
/// after line-removal rules open new gaps.
static BLANK_LINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("BLANK_LINES_RE should compile"));

/// `![alt](data:...)` keeps the caption, drops the embedded image.
static DATA_URI_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(data:[^)]+\)").expect("DATA_URI_IMAGE_RE should compile"));

/// `[](url)` gets visible text.
static EMPTY_LINK_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\]\(([^)]+)\)").expect("EMPTY_LINK_TEXT_RE should compile"));

/// `](</path>)` loses the angle brackets.
static ANGLE_PATH_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\(<(/[^>)]+)>\)").expect("ANGLE_PATH_LINK_RE should compile"));

/// Any data URI still standing after the image rewrite.
static DATA_URI_REMAINDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"data:image/[^;\s]+;base64,[^\s]+").expect("DATA_URI_REMAINDER_RE should compile")
});

/// Lines holding only a 1-3 digit run, orphaned icon/footnote numerals.
static NUMERIC_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[\s]*\d{1,3}[\s]*$").expect("NUMERIC_LINE_RE should compile"));

/// Lines holding only 1-3 non-word characters, orphaned icon glyphs. Broad
/// on purpose: a lone `*` separator line is an accepted casualty.
static SYMBOL_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[\s]*[^\w\s]{1,3}[\s]*$").expect("SYMBOL_LINE_RE should compile")
});

/// Inline icon-font artifacts rendered as short underscore runs.
static UNDERSCORE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\s]*_{1,3}[\s]*(?:\d+)?[\s]*").expect("UNDERSCORE_RUN_RE should compile")
});

/// Leftover 2+ underscore runs.
static MULTI_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_{2,}").expect("MULTI_UNDERSCORE_RE should compile"));

/// `[[text]<encoded noise>)](url)`, a mangled SVG-in-link artifact.
static NESTED_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\]]+)\][^\)]*\)\]\(([^)]+)\)").expect("NESTED_LINK_RE should compile")
});

/// A single `[link](...)` occurrence; duplicate collapsing walks these one
/// by one.
static LINK_OCCURRENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[link\]\(([^)]+)\)").expect("LINK_OCCURRENCE_RE should compile"));

/// Fragment-only links point within the page being converted; keep the text,
/// drop the link. The optional `!` capture spares image syntax.
static INTERNAL_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\[([^\]]*)\]\(#[^)]*\)").expect("INTERNAL_LINK_RE should compile")
});

/// Render the extracted region to Markdown.
///
/// Delegates structure to the converter; if that yields nothing usable the
/// region's plain text is returned instead, losing structure but never
/// failing. Fragment-only anchor links are dropped as a post-pass since the
/// converter has no switch for them.
pub async fn render_markdown(page: &ExtractedPage) -> String {
    let rendered = html2md::rewrite_html_streaming(&page.content_html, false).await;

    let markdown = if rendered.trim().is_empty() {
        page.content_text.clone()
    } else {
        rendered
    };

    drop_internal_links(&markdown)
}

/// Replace fragment-only anchor links with their text. Image syntax with a
/// fragment target (`![alt](#fig)`) is not an anchor and stays untouched.
fn drop_internal_links(markdown: &str) -> String {
    INTERNAL_LINK_RE
        .replace_all(markdown, |caps: &Captures| {
            if &caps[1] == "!" {
                caps[0].to_string()
            } else {
                caps[2].to_string()
            }
        })
        .into_owned()
}

/// Apply the fixed artifact-repair pipeline, in order, each rule global.
pub fn sanitize_markdown(markdown: &str) -> String {
    let mut md = BLANK_LINES_RE.replace_all(markdown, "\n\n").into_owned();
    md = DATA_URI_IMAGE_RE.replace_all(&md, "[${1}]").into_owned();
    md = EMPTY_LINK_TEXT_RE
        .replace_all(&md, "[link](${1})")
        .into_owned();
    md = ANGLE_PATH_LINK_RE.replace_all(&md, "](${1})").into_owned();
    md = DATA_URI_REMAINDER_RE
        .replace_all(&md, "[inline image]")
        .into_owned();
    md = md.replace("\\_", "_");
    md = NUMERIC_LINE_RE.replace_all(&md, "").into_owned();
    md = SYMBOL_LINE_RE.replace_all(&md, "").into_owned();
    md = UNDERSCORE_RUN_RE.replace_all(&md, " ").into_owned();
    md = MULTI_UNDERSCORE_RE.replace_all(&md, "").into_owned();
    md = NESTED_LINK_RE.replace_all(&md, "[${1}](${2})").into_owned();
    md = collapse_duplicate_links(&md);
    md = BLANK_LINES_RE.replace_all(&md, "\n\n").into_owned();
    md.trim().to_string()
}

/// Collapse an immediately-adjacent duplicate `[link](url)` pair into one
/// occurrence.
///
/// Walks the links one at a time so a mismatched neighbour never hides the
/// collapsible pair right after it; a collapsed link is consumed and cannot
/// pair again, so a run of three identical links leaves two.
fn collapse_duplicate_links(markdown: &str) -> String {
    let links: Vec<(std::ops::Range<usize>, &str)> = LINK_OCCURRENCE_RE
        .captures_iter(markdown)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let target = caps.get(1)?;
            Some((whole.range(), &markdown[target.range()]))
        })
        .collect();

    let mut out = String::with_capacity(markdown.len());
    let mut cursor = 0;
    let mut i = 0;
    while i < links.len() {
        let (range, target) = &links[i];
        out.push_str(&markdown[cursor..range.start]);
        out.push_str(&markdown[range.clone()]);
        cursor = range.end;

        if let Some((next_range, next_target)) = links.get(i + 1) {
            let gap = &markdown[range.end..next_range.start];
            if target == next_target && gap.chars().all(char::is_whitespace) {
                cursor = next_range.end;
                i += 1;
            }
        }
        i += 1;
    }
    out.push_str(&markdown[cursor..]);
    out
}

/// Prepend the title/URL/divider header. The header is not sanitized.
pub fn assemble_result(title: &str, url: &str, body: &str) -> String {
    format!("# {title}\n\n**URL**: {url}\n\n---\n\n{body}")
}
