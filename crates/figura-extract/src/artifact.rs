use serde::Serialize;

/// Separator placed between non-empty sources in [`ExtractedArtifact::formatted`]
pub const SECTION_SEPARATOR: &str = "\n\n";

/// Content recovered for each artifact kind
///
/// A slot with no content is an empty string, never absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slots {
    pub logic: String,
    pub markup: String,
    pub stylesheet: String,
}

impl Slots {
    pub fn set(&mut self, kind: ArtifactKind, content: impl Into<String>) {
        *self.slot_mut(kind) = content.into();
    }

    pub fn get(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Logic => &self.logic,
            ArtifactKind::Markup => &self.markup,
            ArtifactKind::Stylesheet => &self.stylesheet,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.logic.is_empty() && self.markup.is_empty() && self.stylesheet.is_empty()
    }

    fn slot_mut(&mut self, kind: ArtifactKind) -> &mut String {
        match kind {
            ArtifactKind::Logic => &mut self.logic,
            ArtifactKind::Markup => &mut self.markup,
            ArtifactKind::Stylesheet => &mut self.stylesheet,
        }
    }
}

/// The three generated component sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Component class (TypeScript)
    Logic,
    /// Template (HTML)
    Markup,
    /// Styles (SCSS/CSS)
    Stylesheet,
}

impl ArtifactKind {
    /// Fixed order used for positional assignment and for `formatted`
    pub const ORDER: [Self; 3] = [Self::Logic, Self::Markup, Self::Stylesheet];
}

/// Component sources split out of one model completion
///
/// Built once and not modified afterwards. Serialises with the field names
/// the HTTP API exposes (`ts_file`, `html_file`, `scss_file`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedArtifact {
    raw: String,
    formatted: String,
    #[serde(rename = "ts_file")]
    logic: String,
    #[serde(rename = "html_file")]
    markup: String,
    #[serde(rename = "scss_file")]
    stylesheet: String,
}

impl ExtractedArtifact {
    /// Assemble an artifact, deriving `formatted` from the slots
    pub fn new(raw: impl Into<String>, slots: Slots) -> Self {
        let formatted = ArtifactKind::ORDER
            .iter()
            .map(|kind| slots.get(*kind))
            .filter(|content| !content.is_empty())
            .collect::<Vec<_>>()
            .join(SECTION_SEPARATOR);

        Self {
            raw: raw.into(),
            formatted,
            logic: slots.logic,
            markup: slots.markup,
            stylesheet: slots.stylesheet,
        }
    }

    /// The completion text this artifact was extracted from
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Non-empty sources joined by a blank line, logic then markup then stylesheet
    pub fn formatted(&self) -> &str {
        &self.formatted
    }

    pub fn logic(&self) -> &str {
        &self.logic
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    pub fn get(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Logic => &self.logic,
            ArtifactKind::Markup => &self.markup,
            ArtifactKind::Stylesheet => &self.stylesheet,
        }
    }

    /// True when no source could be recovered
    pub fn is_empty(&self) -> bool {
        self.formatted.is_empty()
    }
}
