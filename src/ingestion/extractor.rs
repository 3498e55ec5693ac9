//! Text extraction from PDF and PPTX containers

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::types::FileType;

/// Extracted document with normalized text
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// File type
    pub file_type: FileType,
    /// Whitespace-normalized full text
    pub text: String,
    /// SHA-256 hash of the normalized text
    pub content_hash: String,
    /// Total pages or slides, when the container has them
    pub page_count: Option<u32>,
}

/// Extractor over the allowed container formats
pub struct DocumentExtractor;

impl DocumentExtractor {
    /// Extract normalized text from a file, selecting the variant by
    /// extension sniffing.
    pub fn extract(filename: &str, data: &[u8]) -> Result<ExtractedDocument> {
        let extension = filename.rsplit('.').next().unwrap_or("").to_lowercase();
        let file_type = FileType::from_extension(&extension);

        if !file_type.is_supported() {
            return Err(Error::UnsupportedFormat(extension));
        }

        match file_type {
            FileType::Pdf => Self::extract_pdf(filename, data),
            FileType::Pptx => Self::extract_pptx(filename, data),
            _ => Err(Error::UnsupportedFormat(extension)),
        }
    }

    /// Extract a PDF: page text in page order, whitespace-normalized
    fn extract_pdf(filename: &str, data: &[u8]) -> Result<ExtractedDocument> {
        let raw = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| Error::extraction(filename, e.to_string()))?;

        // pdf-extract returns the page texts already concatenated in page
        // order; pages without text contribute nothing, and the whitespace
        // pass collapses the joins to single spaces.
        let text = normalize_whitespace(&raw);

        let page_count = match lopdf::Document::load_mem(data) {
            Ok(doc) => Some(doc.get_pages().len() as u32),
            Err(_) => None,
        };

        Ok(ExtractedDocument {
            file_type: FileType::Pdf,
            content_hash: hash_content(&text),
            text,
            page_count,
        })
    }

    /// Extract a PPTX: per-shape text runs in slide order
    fn extract_pptx(filename: &str, data: &[u8]) -> Result<ExtractedDocument> {
        use std::io::Read;

        let cursor = std::io::Cursor::new(data);
        let mut archive = zip::ZipArchive::new(cursor)
            .map_err(|e| Error::extraction(filename, e.to_string()))?;

        // Slide entries are ppt/slides/slide1.xml, slide2.xml, ... ordered
        // by the number embedded in the name, not lexically.
        let mut slide_names: Vec<String> = archive
            .file_names()
            .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
            .map(|s| s.to_string())
            .collect();
        slide_names.sort_by_key(|name| {
            name.trim_start_matches("ppt/slides/slide")
                .trim_end_matches(".xml")
                .parse::<u32>()
                .unwrap_or(0)
        });

        let slide_count = slide_names.len() as u32;
        let mut parts = Vec::new();

        for slide_name in slide_names {
            let mut file = archive
                .by_name(&slide_name)
                .map_err(|e| Error::extraction(filename, e.to_string()))?;
            let mut xml = String::new();
            file.read_to_string(&mut xml)
                .map_err(|e| Error::extraction(filename, e.to_string()))?;

            let slide_text = extract_text_runs(&xml);
            if !slide_text.is_empty() {
                parts.push(slide_text);
            }
        }

        let text = normalize_whitespace(&parts.join(" "));

        Ok(ExtractedDocument {
            file_type: FileType::Pptx,
            content_hash: hash_content(&text),
            text,
            page_count: if slide_count > 0 {
                Some(slide_count)
            } else {
                None
            },
        })
    }
}

/// Pull the `<a:t>` text runs out of a slide's XML, joined by spaces
fn extract_text_runs(xml: &str) -> String {
    use quick_xml::events::Event;
    use quick_xml::Reader;

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut runs = Vec::new();
    let mut in_text_element = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text_element = true;
                }
            }
            Ok(Event::Text(e)) => {
                if in_text_element {
                    if let Ok(text) = e.unescape() {
                        let trimmed = text.trim();
                        if !trimmed.is_empty() {
                            runs.push(trimmed.to_string());
                        }
                    }
                }
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text_element = false;
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
    }

    runs.join(" ")
}

/// Collapse runs of whitespace (including newlines) to single spaces and
/// trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Hash content for document identity
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn slide_xml(texts: &[&str]) -> String {
        let shapes: String = texts
            .iter()
            .map(|t| format!("<p:sp><p:txBody><a:p><a:r><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp>", t))
            .collect();
        format!(
            "<p:sld xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" \
             xmlns:p=\"http://schemas.openxmlformats.org/presentationml/2006/main\">\
             <p:cSld><p:spTree>{}</p:spTree></p:cSld></p:sld>",
            shapes
        )
    }

    fn build_pptx(slides: &[Vec<&str>]) -> Vec<u8> {
        let mut buf = std::io::Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buf);
            let options = zip::write::SimpleFileOptions::default();
            for (i, texts) in slides.iter().enumerate() {
                writer
                    .start_file(format!("ppt/slides/slide{}.xml", i + 1), options)
                    .unwrap();
                writer.write_all(slide_xml(texts).as_bytes()).unwrap();
            }
            writer.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(
            normalize_whitespace("  hello\n\n  world\t again "),
            "hello world again"
        );
        assert_eq!(normalize_whitespace("\n \t"), "");
    }

    #[test]
    fn test_unsupported_extension() {
        let result = DocumentExtractor::extract("notes.docx", b"irrelevant");
        assert!(matches!(result, Err(Error::UnsupportedFormat(ext)) if ext == "docx"));
    }

    #[test]
    fn test_corrupt_pdf_is_extraction_error() {
        let result = DocumentExtractor::extract("broken.pdf", b"not a pdf at all");
        assert!(matches!(result, Err(Error::Extraction { .. })));
    }

    #[test]
    fn test_pptx_slides_in_order() {
        let data = build_pptx(&[
            vec!["First slide title", "with a body."],
            vec!["Second slide."],
        ]);
        let doc = DocumentExtractor::extract("deck.pptx", &data).unwrap();
        assert_eq!(doc.file_type, FileType::Pptx);
        assert_eq!(doc.page_count, Some(2));
        assert_eq!(doc.text, "First slide title with a body. Second slide.");
    }

    #[test]
    fn test_pptx_without_text_yields_empty_text() {
        let data = build_pptx(&[vec![]]);
        let doc = DocumentExtractor::extract("images_only.pptx", &data).unwrap();
        assert!(doc.text.is_empty());
    }

    #[test]
    fn test_corrupt_pptx_is_extraction_error() {
        let result = DocumentExtractor::extract("deck.pptx", b"not a zip archive");
        assert!(matches!(result, Err(Error::Extraction { .. })));
    }

    #[test]
    fn test_content_hash_is_stable() {
        assert_eq!(hash_content("abc"), hash_content("abc"));
        assert_ne!(hash_content("abc"), hash_content("abd"));
    }
}
