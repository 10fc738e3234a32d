//! Input checks that run before an operation is started

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ValidationError;

/// Extensions accepted for document summarization
pub const ALLOWED_EXTENSIONS: &[&str] = &["doc", "docx", "pdf"];

static YOUTUBE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\s]+)").expect("valid YouTube regex")
});

/// Check a link before summarizing it. Returns the trimmed link.
pub fn validate_youtube_link(link: &str) -> Result<&str, ValidationError> {
    let link = link.trim();
    if link.is_empty() {
        return Err(ValidationError::EmptyLink);
    }
    if !YOUTUBE_URL.is_match(link) {
        return Err(ValidationError::InvalidYoutubeUrl);
    }
    Ok(link)
}

/// Check that a file name carries an allowed extension (case-insensitive)
pub fn validate_document_name(file_name: &str) -> Result<(), ValidationError> {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .ok_or(ValidationError::UnsupportedFile)?;

    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedFile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_short_link_accepted() {
        assert_eq!(
            validate_youtube_link("https://youtu.be/abc123"),
            Ok("https://youtu.be/abc123")
        );
    }

    #[test]
    fn test_youtube_watch_link_accepted() {
        let link = "  https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42  ";
        assert_eq!(
            validate_youtube_link(link),
            Ok("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42")
        );
    }

    #[test]
    fn test_other_hosts_rejected() {
        assert_eq!(
            validate_youtube_link("https://vimeo.com/123"),
            Err(ValidationError::InvalidYoutubeUrl)
        );
        assert_eq!(
            validate_youtube_link("https://youtube.com/channel/xyz"),
            Err(ValidationError::InvalidYoutubeUrl)
        );
    }

    #[test]
    fn test_empty_link_rejected() {
        assert_eq!(validate_youtube_link("   "), Err(ValidationError::EmptyLink));
    }

    #[test]
    fn test_document_extensions() {
        assert!(validate_document_name("report.pdf").is_ok());
        assert!(validate_document_name("Notes.DOCX").is_ok());
        assert!(validate_document_name("old.doc").is_ok());
        assert_eq!(
            validate_document_name("report.txt"),
            Err(ValidationError::UnsupportedFile)
        );
        assert_eq!(
            validate_document_name("pdf"),
            Err(ValidationError::UnsupportedFile)
        );
        assert_eq!(
            validate_document_name("archive.pdf.zip"),
            Err(ValidationError::UnsupportedFile)
        );
    }
}
