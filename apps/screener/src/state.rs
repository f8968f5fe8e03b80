use std::sync::Arc;

use crate::analysis::ResumeAnalyzer;
use crate::config::Config;
use crate::extraction::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ResumeAnalyzer>,
    /// Pluggable file reader. Default: FileTextExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    pub config: Config,
}
