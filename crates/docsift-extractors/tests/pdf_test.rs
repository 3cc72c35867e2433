//! PDF extraction tests against generated documents.

use docsift_extractors::{ExtractionConfig, ExtractorFactory, SourceFile};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Build a PDF with `page_count` pages, each reading "Page number N".
fn build_pdf(page_count: usize) -> Vec<u8> {
    let pages = (1..=page_count)
        .map(|n| {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(format!("Page number {}", n))]),
                Operation::new("ET", vec![]),
            ]
        })
        .collect();
    build_pdf_from(pages)
}

/// Build a PDF whose pages carry the given content operations, with font F1 available.
fn build_pdf_from(pages: Vec<Vec<Operation>>) -> Vec<u8> {
    let page_count = pages.len();
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(page_count);
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

fn pdf_file(page_count: usize) -> SourceFile {
    SourceFile::new("doc.pdf", build_pdf(page_count)).with_mime_type("application/pdf")
}

#[tokio::test]
async fn test_short_pdf_is_not_truncated() {
    let pipeline = ExtractorFactory::pipeline(&ExtractionConfig::default());
    let result = pipeline.extract(&pdf_file(3), "").await;

    assert!(result.is_success(), "unexpected warnings: {:?}", result.warnings);
    assert_eq!(result.meta["totalPages"], 3);
    assert_eq!(result.meta["extractedPages"], 3);
    assert!(result.text.starts_with("--- Page 1 ---"));
    assert!(result.text.contains("--- Page 3 ---"));
    assert!(result.text.contains("Page number 2"));

    let first = result.text.find("--- Page 1 ---").unwrap();
    let second = result.text.find("--- Page 2 ---").unwrap();
    let third = result.text.find("--- Page 3 ---").unwrap();
    assert!(first < second && second < third);
}

#[tokio::test]
async fn test_exactly_thirty_pages() {
    let pipeline = ExtractorFactory::pipeline(&ExtractionConfig::default());
    let result = pipeline.extract(&pdf_file(30), "").await;

    assert!(result.is_success());
    assert_eq!(result.meta["totalPages"], 30);
    assert_eq!(result.meta["extractedPages"], 30);
}

#[tokio::test]
async fn test_long_pdf_is_capped_at_thirty_pages() {
    let pipeline = ExtractorFactory::pipeline(&ExtractionConfig::default());
    let result = pipeline.extract(&pdf_file(33), "").await;

    assert_eq!(result.meta["totalPages"], 33);
    assert_eq!(result.meta["extractedPages"], 30);
    assert_eq!(result.warnings, vec!["Truncated after 30 pages"]);
    assert!(result.text.contains("--- Page 30 ---"));
    assert!(!result.text.contains("--- Page 31 ---"));
}

#[tokio::test]
async fn test_configured_page_ceiling() {
    let config = ExtractionConfig::default().with_pdf_max_pages(2);
    let pipeline = ExtractorFactory::pipeline(&config);
    let result = pipeline.extract(&pdf_file(4), "").await;

    assert_eq!(result.meta["extractedPages"], 2);
    assert_eq!(result.warnings, vec!["Truncated after 2 pages"]);
}

#[tokio::test]
async fn test_pdf_by_extension_without_declared_type() {
    let pipeline = ExtractorFactory::pipeline(&ExtractionConfig::default());
    let file = SourceFile::new("Scan.PDF", build_pdf(1));

    assert_eq!(pipeline.route_for(&file), "pdf");
    let result = pipeline.extract(&file, "").await;
    assert_eq!(result.meta["totalPages"], 1);
}

#[tokio::test]
async fn test_separate_text_items_are_space_joined() {
    let page = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new("Td", vec![72.into(), 700.into()]),
        Operation::new("Tj", vec![Object::string_literal("Hello")]),
        Operation::new("Td", vec![100.into(), 0.into()]),
        Operation::new("Tj", vec![Object::string_literal("World")]),
        Operation::new("ET", vec![]),
    ];
    let file = SourceFile::new("two-items.pdf", build_pdf_from(vec![page]));

    let pipeline = ExtractorFactory::pipeline(&ExtractionConfig::default());
    let result = pipeline.extract(&file, "").await;

    assert!(result.is_success(), "unexpected warnings: {:?}", result.warnings);
    assert_eq!(result.text, "--- Page 1 ---\nHello World");
}

#[tokio::test]
async fn test_kerned_array_keeps_word_gaps() {
    let page = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
        Operation::new(
            "TJ",
            vec![Object::Array(vec![
                Object::string_literal("Hel"),
                20.into(),
                Object::string_literal("lo"),
                (-250).into(),
                Object::string_literal("there"),
            ])],
        ),
        Operation::new("Tj", vec![Object::string_literal("  again  ")]),
        Operation::new("ET", vec![]),
    ];
    let file = SourceFile::new("kerned.pdf", build_pdf_from(vec![page]));

    let pipeline = ExtractorFactory::pipeline(&ExtractionConfig::default());
    let result = pipeline.extract(&file, "").await;

    assert_eq!(result.text, "--- Page 1 ---\nHello there again");
}
