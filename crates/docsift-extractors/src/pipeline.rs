//! Extraction pipeline: sniff the type, pick a route, never fail.

use std::sync::Arc;

use crate::sniff::sniff_content_type;
use crate::text::PlainTextExtractor;
use crate::types::{ExtractedContent, SourceFile};
use crate::Extractor;

/// Signals a route predicate can inspect.
#[derive(Debug, Clone)]
pub struct RouteProbe {
    /// Sniffed content type; empty when unknown.
    pub content_type: String,
    /// Lower-cased filename.
    pub file_name: String,
}

impl RouteProbe {
    pub fn new(file: &SourceFile) -> Self {
        Self {
            content_type: sniff_content_type(file),
            file_name: file.lower_name(),
        }
    }

    pub fn has_extension(&self, ext: &str) -> bool {
        self.file_name.ends_with(ext)
    }
}

/// Predicate deciding whether a route handles a file.
pub type RoutePredicate = fn(&RouteProbe) -> bool;

/// One `(predicate, extractor)` entry in the routing table.
#[derive(Clone)]
pub struct Route {
    name: &'static str,
    predicate: RoutePredicate,
    extractor: Arc<dyn Extractor>,
}

impl Route {
    pub fn new(name: &'static str, predicate: RoutePredicate, extractor: Arc<dyn Extractor>) -> Self {
        Self {
            name,
            predicate,
            extractor,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn matches(&self, probe: &RouteProbe) -> bool {
        (self.predicate)(probe)
    }

    pub fn extractor(&self) -> &Arc<dyn Extractor> {
        &self.extractor
    }
}

/// Route name reported when no predicate matched.
pub const FALLBACK_ROUTE: &str = "fallback";

/// Pipeline evaluating routes in insertion order, first match wins.
///
/// Predicates overlap on purpose (a `text/` prefix route sits ahead of the
/// markdown and HTML routes), so order is part of the behavior.
pub struct ExtractionPipeline {
    routes: Vec<Route>,
    fallback: Arc<dyn Extractor>,
}

impl ExtractionPipeline {
    /// Create a pipeline with no routes; everything falls back to plain text.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            fallback: Arc::new(PlainTextExtractor::new()),
        }
    }

    /// Create pipeline with the standard routing table and default config.
    pub fn with_defaults() -> Self {
        crate::ExtractorFactory::pipeline(&crate::ExtractionConfig::default())
    }

    /// Append a route after the existing ones.
    pub fn add_route(
        mut self,
        name: &'static str,
        predicate: RoutePredicate,
        extractor: Arc<dyn Extractor>,
    ) -> Self {
        self.routes.push(Route::new(name, predicate, extractor));
        self
    }

    /// Replace the extractor used when no route matches.
    pub fn with_fallback(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.fallback = extractor;
        self
    }

    fn select(&self, probe: &RouteProbe) -> (&'static str, &Arc<dyn Extractor>) {
        self.routes
            .iter()
            .find(|route| route.matches(probe))
            .map(|route| (route.name, &route.extractor))
            .unwrap_or((FALLBACK_ROUTE, &self.fallback))
    }

    /// Name of the route that would handle `file`.
    pub fn route_for(&self, file: &SourceFile) -> &'static str {
        self.select(&RouteProbe::new(file)).0
    }

    /// Extract text from `file`.
    ///
    /// Never fails: an extractor error becomes an empty result carrying
    /// `"Extractor error: <message>"`.
    pub async fn extract(&self, file: &SourceFile, api_key: &str) -> ExtractedContent {
        let probe = RouteProbe::new(file);
        let (route, extractor) = self.select(&probe);

        tracing::debug!(
            file = %file.name,
            content_type = %probe.content_type,
            route,
            extractor = extractor.name(),
            bytes = file.len(),
            "Routing file"
        );

        match extractor.extract(file, api_key).await {
            Ok(result) => {
                if !result.is_success() {
                    tracing::warn!(
                        file = %file.name,
                        route,
                        warnings = ?result.warnings,
                        "Extraction completed with warnings"
                    );
                }
                result
            }
            Err(e) => {
                tracing::warn!(file = %file.name, route, error = %e, "Extractor failed");
                ExtractedContent::warning(format!("Extractor error: {}", e))
            }
        }
    }

    /// Route names in evaluation order (fallback excluded).
    pub fn route_names(&self) -> Vec<&'static str> {
        self.routes.iter().map(Route::name).collect()
    }

    /// Get the number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the pipeline has no registered routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}
