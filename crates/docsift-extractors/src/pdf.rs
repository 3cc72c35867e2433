//! PDF content extraction using lopdf.
//!
//! Only the first `max_pages` pages are processed; longer documents are
//! truncated with a warning rather than failed.

use std::collections::BTreeMap;

use async_trait::async_trait;
use lopdf::content::Content;
use lopdf::{Document, Encoding, Object, ObjectId};

use crate::config::DEFAULT_PDF_MAX_PAGES;
use crate::error::ExtractResult;
use crate::types::{ExtractedContent, ExtractorKind, SourceFile};
use crate::Extractor;

/// PDF content extractor using the lopdf parser.
///
/// Parsing is synchronous, so it runs inside `spawn_blocking`. Any parser
/// error propagates; there is no partial-page recovery.
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    max_pages: usize,
}

impl PdfExtractor {
    /// Create new PDF extractor with the default page ceiling.
    pub fn new() -> Self {
        Self {
            max_pages: DEFAULT_PDF_MAX_PAGES,
        }
    }

    /// Create PDF extractor with a custom page ceiling.
    pub fn with_max_pages(max_pages: usize) -> Self {
        Self {
            max_pages: max_pages.max(1),
        }
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    fn extract_sync(content: Vec<u8>, max_pages: usize) -> ExtractResult<ExtractedContent> {
        let doc = Document::load_mem(&content)?;

        // BTreeMap keyed by 1-based page number, so iteration is in page order.
        let pages = doc.get_pages();
        let total_pages = pages.len();

        let mut output = String::new();
        let mut extracted_pages = 0usize;

        for (page_number, page_id) in pages.iter().take(max_pages) {
            let text = page_text(&doc, *page_id)?;

            output.push_str(&format!("\n\n--- Page {} ---\n{}", page_number, text));
            extracted_pages += 1;
        }

        let mut result = ExtractedContent::text(output.trim())
            .with_meta("totalPages", total_pages)
            .with_meta("extractedPages", extracted_pages);

        if total_pages > max_pages {
            result = result.with_warning(format!("Truncated after {} pages", max_pages));
        }

        Ok(result)
    }
}

/// Text of one page: one item per text-showing operator, joined by single spaces.
fn page_text(doc: &Document, page_id: ObjectId) -> ExtractResult<String> {
    let encodings = doc
        .get_page_fonts(page_id)?
        .into_iter()
        .map(|(name, font)| font.get_font_encoding(doc).map(|encoding| (name, encoding)))
        .collect::<Result<BTreeMap<Vec<u8>, Encoding>, _>>()?;
    let content = Content::decode(&doc.get_page_content(page_id)?)?;

    let mut items: Vec<String> = Vec::new();
    let mut current: Option<&Encoding> = None;

    for operation in &content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                current = operation
                    .operands
                    .first()
                    .and_then(|name| name.as_name().ok())
                    .and_then(|name| encodings.get(name));
            }
            "Tj" | "TJ" | "'" | "\"" => {
                let Some(encoding) = current else {
                    tracing::trace!(operator = %operation.operator, "Text shown without a known font");
                    continue;
                };
                let mut raw = String::new();
                collect_strings(&mut raw, encoding, &operation.operands)?;
                let item = raw.split_whitespace().collect::<Vec<_>>().join(" ");
                if !item.is_empty() {
                    items.push(item);
                }
            }
            _ => {}
        }
    }

    Ok(items.join(" "))
}

fn collect_strings(out: &mut String, encoding: &Encoding, operands: &[Object]) -> ExtractResult<()> {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => out.push_str(&Document::decode_text(encoding, bytes)?),
            Object::Array(parts) => collect_strings(out, encoding, parts)?,
            // Large negative TJ kerning is a word gap.
            Object::Integer(gap) if *gap < -100 => out.push(' '),
            Object::Real(gap) if *gap < -100.0 => out.push(' '),
            _ => {}
        }
    }
    Ok(())
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for PdfExtractor {
    async fn extract(&self, file: &SourceFile, _api_key: &str) -> ExtractResult<ExtractedContent> {
        let content = file.bytes.clone();
        let max_pages = self.max_pages;

        let result =
            tokio::task::spawn_blocking(move || Self::extract_sync(content, max_pages)).await??;

        tracing::debug!(
            file = %file.name,
            total_pages = ?result.meta.get("totalPages"),
            chars = result.text.len(),
            "PDF extracted"
        );

        Ok(result)
    }

    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Pdf
    }

    fn name(&self) -> &str {
        "lopdf"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;

    #[test]
    fn test_pdf_extractor_creation() {
        let extractor = PdfExtractor::new();
        assert_eq!(extractor.name(), "lopdf");
        assert_eq!(extractor.max_pages(), 30);
        assert_eq!(PdfExtractor::with_max_pages(0).max_pages(), 1);
    }

    #[tokio::test]
    async fn test_pdf_extractor_empty_content() {
        let file = SourceFile::new("a.pdf", Vec::new());
        let result = PdfExtractor::new().extract(&file, "").await;
        assert!(matches!(result, Err(ExtractError::Pdf(_))));
    }
}
