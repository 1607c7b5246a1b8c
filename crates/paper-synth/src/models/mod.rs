//! Data models for references and generated papers.
//!
//! Crossref models use `#[serde(default)]` on every field and
//! `#[serde(rename_all = "kebab-case")]` to match API naming.

mod paper;
mod reference;

pub use paper::{GeneratedSection, Question, ResultPage, Section};
pub use reference::{
    Contributor, NO_JOURNAL, NO_TITLE, NO_URL, PartialDate, Reference, Work, WorksMessage,
    WorksResponse,
};
