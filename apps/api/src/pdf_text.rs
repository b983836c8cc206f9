use crate::errors::AppError;

/// Extracts the concatenated text of all pages from a PDF byte buffer.
///
/// Failure modes are terminal for the enclosing request: an unreadable file
/// (corrupted, encrypted) and a file that yields no text at all are both
/// rejected with a human-readable detail string.
pub fn extract_text(data: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(data).map_err(|e| {
        AppError::UnprocessableEntity(format!(
            "Could not read the PDF file, it might be corrupted or encrypted: {e}"
        ))
    })?;

    if text.trim().is_empty() {
        return Err(AppError::UnprocessableEntity(
            "Could not extract text from PDF".to_string(),
        ));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_rejected_as_unreadable() {
        let result = extract_text(b"this is not a pdf");
        assert!(matches!(result, Err(AppError::UnprocessableEntity(_))));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(extract_text(&[]).is_err());
    }
}
