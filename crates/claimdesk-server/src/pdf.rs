//! Page text from PDF uploads

use claimdesk_domain::traits::PageTextSource;
use thiserror::Error;

/// Text extraction failure
#[derive(Debug, Error)]
pub enum TextSourceError {
    /// The bytes are not a readable PDF
    #[error("Failed to parse PDF: {0}")]
    PdfParsing(String),
}

/// Reads the embedded text layer of a digital PDF, one string per page
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl PageTextSource for PdfTextSource {
    type Error = TextSourceError;

    fn page_texts(&self, document: &[u8]) -> Result<Vec<String>, Self::Error> {
        pdf_extract::extract_text_from_mem_by_pages(document)
            .map_err(|e| TextSourceError::PdfParsing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a PDF with one text line per page
    fn make_test_pdf(pages: &[&str]) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = format!("BT /F1 12 Tf 100 700 Td ({}) Tj ET", text);
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
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

    #[test]
    fn test_one_text_per_page_in_order() {
        let bytes = make_test_pdf(&["Tax Invoice City Care", "Discharge Summary Asha"]);
        let pages = PdfTextSource.page_texts(&bytes).unwrap();

        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains("Invoice"), "got {:?}", pages[0]);
        assert!(pages[1].contains("Discharge"), "got {:?}", pages[1]);
    }

    #[test]
    fn test_invalid_pdf_is_error() {
        let result = PdfTextSource.page_texts(b"not a pdf");
        assert!(matches!(result, Err(TextSourceError::PdfParsing(_))));
    }
}
