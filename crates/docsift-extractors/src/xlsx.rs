//! XLSX extraction: every sheet rendered as CSV in workbook order.

use std::io::Cursor;

use async_trait::async_trait;
use calamine::{Data, Reader, Xlsx};

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ExtractedContent, ExtractorKind, SourceFile};
use crate::Extractor;

/// Spreadsheet extractor backed by calamine.
#[derive(Debug, Clone, Default)]
pub struct XlsxExtractor;

impl XlsxExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_sync(content: Vec<u8>) -> ExtractResult<ExtractedContent> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(content))
            .map_err(|e| ExtractError::Xlsx(format!("Failed to open workbook: {}", e)))?;

        let sheet_names = workbook.sheet_names();
        let mut sections: Vec<String> = Vec::with_capacity(sheet_names.len());

        for name in &sheet_names {
            let range = workbook
                .worksheet_range(name)
                .map_err(|e| ExtractError::Xlsx(format!("Failed to read sheet {}: {}", name, e)))?;

            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(Vec::new());
            for row in range.rows() {
                writer
                    .write_record(row.iter().map(cell_to_string))
                    .map_err(|e| ExtractError::Xlsx(e.to_string()))?;
            }
            let csv_bytes = writer
                .into_inner()
                .map_err(|e| ExtractError::Xlsx(e.to_string()))?;

            sections.push(format!(
                "--- Sheet: {} ---\n{}",
                name,
                String::from_utf8_lossy(&csv_bytes)
            ));
        }

        Ok(ExtractedContent::text(sections.join("\n"))
            .with_meta("sheets", serde_json::json!(sheet_names)))
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Extractor for XlsxExtractor {
    async fn extract(&self, file: &SourceFile, _api_key: &str) -> ExtractResult<ExtractedContent> {
        let content = file.bytes.clone();
        let result = tokio::task::spawn_blocking(move || Self::extract_sync(content)).await??;
        Ok(result)
    }

    fn kind(&self) -> ExtractorKind {
        ExtractorKind::Xlsx
    }

    fn name(&self) -> &str {
        "calamine"
    }
}
