//! Paper structure: sections, prompts and the rendered result.

use serde::Serialize;

use super::Reference;
use crate::error::{AppError, AppResult};

/// A chapter of the generated paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Abstract,
    Introduction,
    TheoreticalBackground,
    Development,
    Tests,
    AnswerToQuestion,
    Conclusions,
}

impl Section {
    /// All sections in paper order.
    pub const ALL: [Self; 7] = [
        Self::Abstract,
        Self::Introduction,
        Self::TheoreticalBackground,
        Self::Development,
        Self::Tests,
        Self::AnswerToQuestion,
        Self::Conclusions,
    ];

    /// Human-readable label, also used as the prompt prefix.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Abstract => "Abstract",
            Self::Introduction => "Introduction",
            Self::TheoreticalBackground => "Theoretical background",
            Self::Development => "Development",
            Self::Tests => "Tests",
            Self::AnswerToQuestion => "Answer to the research question",
            Self::Conclusions => "Conclusions",
        }
    }

    /// Stable identifier used for HTML anchors.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Abstract => "abstract",
            Self::Introduction => "introduction",
            Self::TheoreticalBackground => "theoretical-background",
            Self::Development => "development",
            Self::Tests => "tests",
            Self::AnswerToQuestion => "answer-to-question",
            Self::Conclusions => "conclusions",
        }
    }

    /// Build the prompt for this section: `"<Label>: <question>"`.
    #[must_use]
    pub fn prompt(self, question: &Question) -> String {
        format!("{}: {}", self.label(), question.as_str())
    }
}

/// A research question submitted through the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Question(String);

impl Question {
    /// Accept any non-empty submission. Whitespace-only input is kept as is.
    pub fn parse(raw: Option<String>) -> AppResult<Self> {
        match raw {
            Some(q) if !q.is_empty() => Ok(Self(q)),
            _ => Err(AppError::EmptyQuestion),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generated text for one section, with the prompt that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedSection {
    pub section: Section,
    pub prompt: String,
    pub text: String,
}

/// Everything shown on the result page. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultPage {
    pub question: Question,
    pub sections: Vec<GeneratedSection>,
    pub references: Vec<Reference>,
}

impl ResultPage {
    /// Look up the generated section for a chapter.
    #[must_use]
    pub fn section(&self, section: Section) -> Option<&GeneratedSection> {
        self.sections.iter().find(|s| s.section == section)
    }
}
