//! PDF text extraction for offer documents.
//!
//! Text is pulled page by page with `pdf-extract` and concatenated in page
//! order with no separator. A page with no extractable text contributes "".

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("The file at {} was not found.", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parser failure. Displays only the cause.
    #[error("{0}")]
    Extraction(String),
}

const PARSER_PANIC: &str = "the PDF parser could not read this document";

pub fn extract_text_from_path(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ExtractError::NotFound(path.to_path_buf())
        } else {
            ExtractError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    extract_text_from_bytes(&bytes)
}

pub fn extract_text_from_bytes(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = guarded(|| pdf_extract::extract_text_from_mem_by_pages(bytes))?;
    debug!(pages = pages.len(), "Extracted PDF text");
    Ok(join_pages(pages))
}

/// Runs a parse, turning both its error and a panic inside it into `Extraction`.
/// pdf-extract can panic on malformed documents.
fn guarded<F, E>(parse: F) -> Result<Vec<String>, ExtractError>
where
    F: FnOnce() -> Result<Vec<String>, E>,
    E: std::fmt::Display,
{
    panic::catch_unwind(AssertUnwindSafe(parse))
        .map_err(|_| ExtractError::Extraction(PARSER_PANIC.to_string()))?
        .map_err(|e| ExtractError::Extraction(e.to_string()))
}

/// Page texts in order, no separator.
fn join_pages<I>(pages: I) -> String
where
    I: IntoIterator<Item = String>,
{
    pages.into_iter().collect()
}

/// `None` when the extracted text has nothing but whitespace.
pub fn usable_text(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
pub(crate) mod test_pdf {
    /// Builds a minimal PDF with one page per entry, each showing its text in Helvetica.
    /// An empty entry yields a page with an empty content stream.
    pub fn with_pages(pages: &[&str]) -> Vec<u8> {
        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            {
                let kids: Vec<String> = (0..pages.len())
                    .map(|i| format!("{} 0 R", 4 + 2 * i))
                    .collect();
                format!(
                    "<< /Type /Pages /Kids [{}] /Count {} >>",
                    kids.join(" "),
                    pages.len()
                )
            },
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        ];

        for (i, text) in pages.iter().enumerate() {
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                5 + 2 * i
            ));
            let stream = if text.is_empty() {
                String::new()
            } else {
                format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET")
            };
            objects.push(format!(
                "<< /Length {} >>\nstream\n{stream}\nendstream",
                stream.len()
            ));
        }

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }

        let xref_at = out.len();
        out.extend_from_slice(
            format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes(),
        );
        for offset in offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        out
    }
}
