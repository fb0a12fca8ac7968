//! Splitting message text into prose and fenced code.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)] // Literal pattern, checked by tests.
static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```([\w+#.-]*)[^\n]*\n(.*?)```").expect("fence pattern is valid")
});

/// A displayable piece of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Prose between code fences.
    Paragraph(String),
    /// Contents of a fenced code block.
    Code {
        /// Language tag from the opening fence, if any.
        lang: Option<String>,
        /// Code without the fences.
        code: String,
    },
}

impl Segment {
    /// Renders the segment back to Markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        match self {
            Self::Paragraph(text) => text.clone(),
            Self::Code { lang, code } => {
                format!("```{}\n{code}\n```", lang.as_deref().unwrap_or_default())
            }
        }
    }
}

/// Splits `text` on fenced code blocks.
///
/// Fences match non-greedily, so adjacent blocks stay separate. Prose is
/// trimmed and whitespace-only prose is dropped. An unterminated fence is
/// left in the surrounding prose.
#[must_use]
pub fn split_segments(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in FENCE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_paragraph(&mut segments, &text[last..whole.start()]);

        let lang = caps
            .get(1)
            .map(|m| m.as_str())
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        let code = caps.get(2).map_or("", |m| m.as_str());
        segments.push(Segment::Code {
            lang,
            code: code.trim_start_matches('\n').trim_end().to_string(),
        });
        last = whole.end();
    }

    push_paragraph(&mut segments, &text[last..]);
    segments
}

fn push_paragraph(segments: &mut Vec<Segment>, prose: &str) {
    let trimmed = prose.trim();
    if !trimmed.is_empty() {
        segments.push(Segment::Paragraph(trimmed.to_string()));
    }
}

/// Returns the contents of every code block in `text`, in order.
#[must_use]
pub fn code_blocks(text: &str) -> Vec<String> {
    split_segments(text)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Code { code, .. } => Some(code),
            Segment::Paragraph(_) => None,
        })
        .collect()
}
