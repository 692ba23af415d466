use jobmatch_core::MatchError;

/// Extraction collaborator: document bytes in, concatenated page text out.
/// Corrupt, encrypted, or unsupported documents surface as
/// `MatchError::ExtractionFailure`.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, data: &[u8]) -> Result<String, MatchError>;
}

/// PDF extraction backed by `pdf-extract`, reading straight from the
/// request buffer. Uploads never touch disk.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, data: &[u8]) -> Result<String, MatchError> {
        pdf_extract::extract_text_from_mem(data)
            .map_err(|e| MatchError::ExtractionFailure(e.to_string()))
    }
}
