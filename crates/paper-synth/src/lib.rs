//! paper-synth
//!
//! A small web front-end that drafts an academic-style paper from a research
//! question. Seven fixed section prompts go through a pretrained language
//! model and the Crossref index supplies a reference list.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use paper_synth::{Config, CrossrefClient, PaperComposer, PaperServer};
//! use paper_synth::generator::CompletionGenerator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let generator = CompletionGenerator::connect(&config).await?;
//!     let references = CrossrefClient::new(&config)?;
//!
//!     let composer = PaperComposer::new(Arc::new(generator), Arc::new(references))
//!         .with_limits(&config);
//!     PaperServer::new(composer, config.debug).run_http(config.listen_addr()).await
//! }
//! ```

pub mod client;
pub mod composer;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;
pub mod server;

pub use client::{CrossrefClient, ReferenceSource};
pub use composer::PaperComposer;
pub use config::Config;
pub use error::{AppError, ClientError, GenerationError};
pub use generator::TextGenerator;
pub use server::PaperServer;
