// Document Loader
// Plain-text extraction from uploaded files (txt/md, pdf, docx)

use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

use super::text_processor::normalize_punctuation;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("DOCX extraction failed: {0}")]
    Docx(String),
    #[error("File is not valid UTF-8: {0}")]
    Encoding(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Pdf,
    Docx,
}

impl DocumentKind {
    pub fn from_file_name(file_name: &str) -> Result<Self, DocumentError> {
        let ext = Path::new(file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "txt" | "md" | "markdown" | "text" => Ok(Self::PlainText),
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            _ => Err(DocumentError::UnsupportedType(if ext.is_empty() {
                file_name.to_string()
            } else {
                format!(".{}", ext)
            })),
        }
    }
}

fn xml_paragraph_end_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"</w:p>|<w:br\s*/>|<w:cr\s*/>").expect("docx paragraph regex"))
}

fn xml_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("xml tag regex"))
}

fn decode_plain_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8(bytes.to_vec()).map_err(|e| DocumentError::Encoding(e.to_string()))
}

fn extract_pdf(bytes: &[u8]) -> Result<String, DocumentError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| DocumentError::Pdf(e.to_string()))
}

fn docx_paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for rc in &run.children {
                match rc {
                    docx_rs::RunChild::Text(t) => text.push_str(&t.text),
                    docx_rs::RunChild::Tab(_) => text.push('\t'),
                    docx_rs::RunChild::Break(_) => text.push('\n'),
                    _ => {}
                }
            }
        }
    }
    text
}

fn extract_docx_structured(bytes: &[u8]) -> Result<String, DocumentError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| DocumentError::Docx(e.to_string()))?;
    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(p) => Some(docx_paragraph_text(p)),
            _ => None,
        })
        .collect();
    Ok(paragraphs.join("\n"))
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Read `word/document.xml` straight out of the archive and strip the markup.
fn extract_docx_raw(bytes: &[u8]) -> Result<String, DocumentError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| DocumentError::Docx(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| DocumentError::Docx(e.to_string()))?
        .read_to_string(&mut xml)
        .map_err(|e| DocumentError::Docx(e.to_string()))?;

    let xml = xml.replace("<w:tab/>", "\t");
    let with_breaks = xml_paragraph_end_re().replace_all(&xml, "\n");
    let stripped = xml_tag_re().replace_all(&with_breaks, "");
    Ok(unescape_xml(&stripped))
}

fn extract_docx(bytes: &[u8]) -> Result<String, DocumentError> {
    match extract_docx_structured(bytes) {
        Ok(text) if !text.trim().is_empty() => Ok(text),
        Ok(_) => extract_docx_raw(bytes),
        Err(e) => {
            warn!("[DOCUMENT] docx reader failed ({}), falling back to raw XML", e);
            extract_docx_raw(bytes)
        }
    }
}

/// Extract normalized plain text from a file, dispatching on its extension.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String, DocumentError> {
    let kind = DocumentKind::from_file_name(file_name)?;
    let raw = match kind {
        DocumentKind::PlainText => decode_plain_text(bytes)?,
        DocumentKind::Pdf => extract_pdf(bytes)?,
        DocumentKind::Docx => extract_docx(bytes)?,
    };
    let text = normalize_punctuation(&raw);
    debug!(
        "[DOCUMENT] {} ({:?}): {} bytes -> {} chars",
        file_name,
        kind,
        bytes.len(),
        text.chars().count()
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn raw_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(DocumentKind::from_file_name("a.TXT").unwrap(), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_file_name("notes.md").unwrap(), DocumentKind::PlainText);
        assert_eq!(DocumentKind::from_file_name("paper.pdf").unwrap(), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_file_name("x.docx").unwrap(), DocumentKind::Docx);
        assert!(matches!(
            DocumentKind::from_file_name("sheet.xlsx"),
            Err(DocumentError::UnsupportedType(ref e)) if e == ".xlsx"
        ));
        assert!(DocumentKind::from_file_name("README").is_err());
    }

    #[test]
    fn test_plain_text_is_normalized() {
        let bytes = "\u{FEFF}  \u{201c}Quoted\u{201d}  text.\r\nNext line.  ".as_bytes();
        assert_eq!(extract_text("a.txt", bytes).unwrap(), "\"Quoted\" text.\nNext line.");
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(matches!(
            extract_text("a.txt", &[0xff, 0xfe, 0x00]),
            Err(DocumentError::Encoding(_))
        ));
    }

    #[test]
    fn test_docx_raw_xml_fallback() {
        let xml = r#"<w:document><w:body><w:p><w:r><w:t>Tom &amp; Jerry (Smith, 2020).</w:t></w:r></w:p><w:p><w:r><w:t>Second</w:t><w:tab/><w:t>para.</w:t></w:r></w:p></w:body></w:document>"#;
        let text = extract_text("x.docx", &raw_docx(xml)).unwrap();
        assert_eq!(text, "Tom & Jerry (Smith, 2020).\nSecond para.");
    }

    #[test]
    fn test_docx_structured() {
        let mut buf = Cursor::new(Vec::new());
        docx_rs::Docx::new()
            .add_paragraph(docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text("Hello world.")))
            .add_paragraph(docx_rs::Paragraph::new().add_run(docx_rs::Run::new().add_text("It works.")))
            .build()
            .pack(&mut buf)
            .unwrap();
        let text = extract_text("doc.docx", buf.get_ref()).unwrap();
        assert_eq!(text, "Hello world.\nIt works.");
    }

    #[test]
    fn test_corrupt_docx() {
        assert!(matches!(
            extract_text("x.docx", b"not a zip"),
            Err(DocumentError::Docx(_))
        ));
    }
}
