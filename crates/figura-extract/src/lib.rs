//! Splits a code-generation completion into component sources
//!
//! A model asked for three fenced blocks (TypeScript, HTML, SCSS) rarely
//! answers in exactly that shape. Extraction runs an ordered chain of
//! strategies and keeps the result of the first one that matches:
//!
//! 1. [`Strategy::Tagged`]: fences labelled for each kind, located independently
//! 2. [`Strategy::Positional`]: any fences, first/second/third by position
//! 3. [`Strategy::Markers`]: text after `// component.ts`-style markers
//! 4. [`Strategy::Heuristic`]: the whole cleaned text, classified by content
//!
//! Extraction is pure and deterministic.

#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

mod artifact;
mod strategy;

pub use artifact::{ArtifactKind, ExtractedArtifact, SECTION_SEPARATOR, Slots};
pub use strategy::{LOGIC_MARKER, MARKUP_MARKER, STYLESHEET_MARKER, Strategy};

/// Extract component sources from a raw completion
pub fn extract(raw: &str) -> ExtractedArtifact {
    extract_with_strategy(raw).0
}

/// Extract component sources and report which strategy produced them
///
/// The strategy is `None` when nothing in the chain matched; every slot is
/// then empty.
pub fn extract_with_strategy(raw: &str) -> (ExtractedArtifact, Option<Strategy>) {
    let found = Strategy::CHAIN
        .into_iter()
        .find_map(|strategy| strategy.apply(raw).map(|slots| (strategy, slots)));

    match found {
        Some((strategy, slots)) => {
            tracing::debug!(strategy = strategy.name(), "extracted component sources");
            (ExtractedArtifact::new(raw, slots), Some(strategy))
        }
        None => {
            tracing::debug!("no component sources found in completion");
            (ExtractedArtifact::new(raw, Slots::default()), None)
        }
    }
}
