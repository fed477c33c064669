//! Text extraction keyed by declared MIME type.
//!
//! The MIME type is derived from the original filename's extension, not from
//! file content. PDF goes through `pdf-extract`; docx is unpacked from the
//! zip container and `word/document.xml` is walked paragraph by paragraph.
//! Extraction that yields only whitespace is an error, never silent empty text.

use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::AppError;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TXT: &str = "text/plain";
pub const MIME_MD: &str = "text/markdown";

/// Maps a filename to its declared MIME type by extension.
/// Returns None for extensions this service does not extract.
pub fn mime_for_filename(file_name: &str) -> Option<&'static str> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|v| v.to_str())
        .map(|v| v.to_ascii_lowercase())?;

    match extension.as_str() {
        "pdf" => Some(MIME_PDF),
        "docx" => Some(MIME_DOCX),
        "txt" => Some(MIME_TXT),
        "md" => Some(MIME_MD),
        _ => None,
    }
}

/// Extracts plain text from the file at `path` according to `mime_type`.
pub async fn extract_text(path: &Path, mime_type: &str) -> Result<String, AppError> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::Extraction(format!("could not read upload: {e}")))?;

    let text = match mime_type {
        MIME_PDF => pdf_extract::extract_text_from_mem(&data)
            .map_err(|e| AppError::Extraction(format!("PDF extraction failed: {e}")))?,
        MIME_DOCX => extract_docx_text(&data)?,
        MIME_TXT | MIME_MD => String::from_utf8(data)
            .map_err(|_| AppError::Extraction("file is not valid UTF-8".to_string()))?,
        other => {
            return Err(AppError::Extraction(format!(
                "unsupported MIME type: {other}"
            )))
        }
    };

    if text.trim().is_empty() {
        return Err(AppError::Extraction(
            "no text content could be extracted".to_string(),
        ));
    }

    Ok(text)
}

/// Pulls paragraph text out of a docx container: unzip, then walk
/// `word/document.xml` accumulating text runs per `w:p` element.
fn extract_docx_text(data: &[u8]) -> Result<String, AppError> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| AppError::Extraction(format!("not a docx archive: {e}")))?;

    let mut document_file = archive
        .by_name("word/document.xml")
        .map_err(|e| AppError::Extraction(format!("docx is missing word/document.xml: {e}")))?;
    let mut xml = String::new();
    document_file
        .read_to_string(&mut xml)
        .map_err(|e| AppError::Extraction(format!("could not read docx document: {e}")))?;

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut paragraphs = Vec::new();
    let mut in_paragraph = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == b"w:p" {
                    in_paragraph = true;
                    current.clear();
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"w:p" {
                    if !current.trim().is_empty() {
                        paragraphs.push(current.trim().to_string());
                    }
                    current.clear();
                    in_paragraph = false;
                }
            }
            Ok(Event::Text(e)) => {
                if in_paragraph {
                    let value = e
                        .xml_content()
                        .map_err(|e| AppError::Extraction(format!("malformed docx XML: {e}")))?;
                    current.push_str(&value);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(AppError::Extraction(format!("malformed docx XML: {e}")));
            }
            _ => {}
        }

        buf.clear();
    }

    Ok(paragraphs.join("\n"))
}
