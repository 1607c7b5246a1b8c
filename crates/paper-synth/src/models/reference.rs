//! Reference records and the Crossref `works` response schema.

use serde::{Deserialize, Serialize};

/// Placeholder used when a work has no title.
pub const NO_TITLE: &str = "No title available";

/// Placeholder used when a work has no container title.
pub const NO_JOURNAL: &str = "No journal or conference";

/// Placeholder used when a work has no URL.
pub const NO_URL: &str = "No URL available";

/// A citation attached to a generated paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Work title.
    pub title: String,

    /// Author family names joined with ", ".
    pub author: String,

    /// Publication year.
    pub year: Option<i32>,

    /// Journal or conference name.
    pub journal: String,

    /// Direct link to the work.
    pub link: String,
}

/// Envelope of a Crossref `/works` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorksResponse {
    /// Response payload.
    #[serde(default)]
    pub message: WorksMessage,
}

/// Payload of a Crossref `/works` response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WorksMessage {
    /// Matching works in relevance order.
    #[serde(default)]
    pub items: Vec<Work>,

    /// Total number of matches.
    #[serde(default)]
    pub total_results: Option<u64>,
}

/// A single Crossref work.
///
/// Only the fields needed to build a [`Reference`] are modelled; everything
/// else in the item is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Work {
    /// Titles (Crossref returns a list).
    #[serde(default)]
    pub title: Vec<String>,

    /// Contributors in listed order.
    #[serde(default)]
    pub author: Vec<Contributor>,

    /// Earliest publication date.
    #[serde(default)]
    pub published: Option<PartialDate>,

    /// Journal, proceedings or book titles.
    #[serde(default)]
    pub container_title: Vec<String>,

    /// Resolver URL.
    #[serde(default, rename = "URL")]
    pub url: Option<String>,
}

/// A Crossref contributor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Contributor {
    /// Family name.
    #[serde(default)]
    pub family: Option<String>,
}

/// Crossref partial date: `{"date-parts": [[year, month?, day?]]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialDate {
    /// Date components; components may be null.
    #[serde(default, rename = "date-parts")]
    pub date_parts: Vec<Vec<Option<i32>>>,
}

impl PartialDate {
    /// First component of the first date, if present.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.date_parts.first()?.first().copied().flatten()
    }
}

impl Work {
    /// Family names in listed order; missing names contribute an empty entry.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.author
            .iter()
            .map(|a| a.family.as_deref().unwrap_or(""))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Publication year, if the work carries one.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.published.as_ref()?.year()
    }
}

impl From<Work> for Reference {
    fn from(work: Work) -> Self {
        let author = work.author_names();
        let year = work.year();
        Self {
            title: work.title.into_iter().next().unwrap_or_else(|| NO_TITLE.to_string()),
            author,
            year,
            journal: work
                .container_title
                .into_iter()
                .next()
                .unwrap_or_else(|| NO_JOURNAL.to_string()),
            link: work.url.unwrap_or_else(|| NO_URL.to_string()),
        }
    }
}
