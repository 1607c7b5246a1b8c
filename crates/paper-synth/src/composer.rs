//! Paper composition: one generation per section, then one reference lookup.

use std::sync::Arc;

use crate::client::ReferenceSource;
use crate::config::{Config, paper};
use crate::error::{AppError, AppResult};
use crate::generator::TextGenerator;
use crate::models::{GeneratedSection, Question, ResultPage, Section};

/// Builds a [`ResultPage`] from a question using injected backends.
#[derive(Clone)]
pub struct PaperComposer {
    generator: Arc<dyn TextGenerator>,
    references: Arc<dyn ReferenceSource>,
    max_length: u32,
    reference_count: usize,
}

impl PaperComposer {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, references: Arc<dyn ReferenceSource>) -> Self {
        Self {
            generator,
            references,
            max_length: paper::MAX_LENGTH,
            reference_count: paper::REFERENCE_COUNT,
        }
    }

    /// Apply the length and reference limits from the configuration.
    #[must_use]
    pub fn with_limits(mut self, config: &Config) -> Self {
        self.max_length = config.max_length;
        self.reference_count = config.reference_count;
        self
    }

    /// Generate every section in order, then attach references.
    ///
    /// Calls are made one after another; the first generation failure aborts
    /// the paper.
    pub async fn compose(&self, question: Question) -> AppResult<ResultPage> {
        let mut sections = Vec::with_capacity(Section::ALL.len());

        for section in Section::ALL {
            let prompt = section.prompt(&question);
            let text = self
                .generator
                .generate(&prompt, self.max_length)
                .await
                .map_err(|e| AppError::generation(section.label(), e))?;

            tracing::debug!(section = section.label(), chars = text.len(), "Section generated");
            sections.push(GeneratedSection { section, prompt, text });
        }

        let references =
            self.references.fetch_references(question.as_str(), self.reference_count).await;

        tracing::info!(
            sections = sections.len(),
            references = references.len(),
            "Paper composed"
        );

        Ok(ResultPage { question, sections, references })
    }
}

impl std::fmt::Debug for PaperComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaperComposer")
            .field("max_length", &self.max_length)
            .field("reference_count", &self.reference_count)
            .finish_non_exhaustive()
    }
}
