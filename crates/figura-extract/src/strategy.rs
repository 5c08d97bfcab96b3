use std::sync::OnceLock;

use regex::Regex;

use crate::artifact::{ArtifactKind, Slots};

/// Inline markers a model sometimes emits instead of fences
pub const LOGIC_MARKER: &str = "// component.ts";
pub const MARKUP_MARKER: &str = "<!-- component.html -->";
pub const STYLESHEET_MARKER: &str = "/* component.scss */";

/// Substrings that make unstructured text look like markup
const MARKUP_HINTS: [&str; 2] = ["<div", "<mat-"];

/// One way of pulling sources out of a completion
///
/// Strategies are tried in [`Strategy::CHAIN`] order and the first one
/// that matches wins. A fence strategy matches when it finds at least one
/// block, even an empty one. The marker strategy needs some content after
/// a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Fences labelled `typescript`/`ts`, `html`, `scss`/`css`
    Tagged,
    /// Any fences, assigned logic, markup, stylesheet by position
    Positional,
    /// Text following the inline component markers
    Markers,
    /// Whole text classified by characteristic substrings
    Heuristic,
}

impl Strategy {
    pub const CHAIN: [Self; 4] = [Self::Tagged, Self::Positional, Self::Markers, Self::Heuristic];

    /// Run this strategy, returning `None` when it found nothing to work with
    pub fn apply(self, raw: &str) -> Option<Slots> {
        match self {
            Self::Tagged => tagged(raw),
            Self::Positional => positional(raw),
            Self::Markers => markers(raw),
            Self::Heuristic => heuristic(raw),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Tagged => "tagged",
            Self::Positional => "positional",
            Self::Markers => "markers",
            Self::Heuristic => "heuristic",
        }
    }
}

fn tagged(raw: &str) -> Option<Slots> {
    let mut slots = Slots::default();
    let mut matched = false;

    for kind in ArtifactKind::ORDER {
        if let Some(captures) = tagged_regex(kind).captures(raw) {
            slots.set(kind, captures[1].trim());
            matched = true;
        }
    }

    matched.then_some(slots)
}

fn positional(raw: &str) -> Option<Slots> {
    let mut slots = Slots::default();
    let mut matched = false;

    for (kind, captures) in ArtifactKind::ORDER.into_iter().zip(generic_fence_regex().captures_iter(raw)) {
        slots.set(kind, captures[1].trim());
        matched = true;
    }

    matched.then_some(slots)
}

fn markers(raw: &str) -> Option<Slots> {
    let found: Vec<_> = marker_regex().find_iter(raw).collect();
    if found.is_empty() {
        return None;
    }

    let mut slots = Slots::default();

    for (i, marker) in found.iter().enumerate() {
        let end = found.get(i + 1).map_or(raw.len(), regex::Match::start);
        let kind = match marker.as_str() {
            LOGIC_MARKER => ArtifactKind::Logic,
            MARKUP_MARKER => ArtifactKind::Markup,
            _ => ArtifactKind::Stylesheet,
        };
        // A repeated marker overwrites the earlier section
        slots.set(kind, raw[marker.end()..end].trim());
    }

    // Markers with nothing after them leave the text to the heuristic
    (!slots.is_empty()).then_some(slots)
}

fn heuristic(raw: &str) -> Option<Slots> {
    let without_preambles = preamble_regex().replace_all(raw, "");
    let cleaned = any_fence_regex().replace_all(&without_preambles, "");

    let kind = if cleaned.contains("import") && cleaned.contains("Component") {
        ArtifactKind::Logic
    } else if MARKUP_HINTS.iter().any(|hint| cleaned.contains(hint)) {
        ArtifactKind::Markup
    } else if cleaned.contains('{') && cleaned.contains(':') {
        ArtifactKind::Stylesheet
    } else {
        return None;
    };

    let mut slots = Slots::default();
    slots.set(kind, cleaned.trim());
    Some(slots)
}

fn tagged_regex(kind: ArtifactKind) -> &'static Regex {
    static LOGIC: OnceLock<Regex> = OnceLock::new();
    static MARKUP: OnceLock<Regex> = OnceLock::new();
    static STYLESHEET: OnceLock<Regex> = OnceLock::new();

    match kind {
        ArtifactKind::Logic => {
            LOGIC.get_or_init(|| Regex::new(r"(?s)```(?:typescript|ts)\r?\n(.*?)```").expect("valid logic fence regex"))
        }
        ArtifactKind::Markup => {
            MARKUP.get_or_init(|| Regex::new(r"(?s)```html\r?\n(.*?)```").expect("valid markup fence regex"))
        }
        ArtifactKind::Stylesheet => STYLESHEET
            .get_or_init(|| Regex::new(r"(?s)```(?:scss|css)\r?\n(.*?)```").expect("valid stylesheet fence regex")),
    }
}

/// Fence with an optional label of any kind
fn generic_fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```[^`\n]*\n(.*?)```").expect("valid generic fence regex"))
}

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = [LOGIC_MARKER, MARKUP_MARKER, STYLESHEET_MARKER]
            .map(regex::escape)
            .join("|");
        Regex::new(&pattern).expect("valid marker regex")
    })
}

/// Numbered headings such as "1. TypeScript component file ```"
fn preamble_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"1\.\s*TypeScript.*?```|2\.\s*HTML.*?```|3\.\s*CSS.*?```").expect("valid preamble regex")
    })
}

fn any_fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```.*?```").expect("valid fence regex"))
}
