//! Filing document value object

use crate::error::Result;
use serde::Serialize;
use std::path::Path;

/// One filing document: its filing-history fields plus the fetched content
///
/// Built once and never modified; equality compares every field, content
/// included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyDocument {
    category: String,
    date: String,
    description: String,
    status: String,
    pages: u32,
    transaction_id: String,
    #[serde(skip)]
    content: Vec<u8>,
}

impl CompanyDocument {
    pub fn new(
        category: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
        pages: u32,
        transaction_id: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            category: category.into(),
            date: date.into(),
            description: description.into(),
            status: status.into(),
            pages,
            transaction_id: transaction_id.into(),
            content: content.into(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// `paper_filed` or `electronic`
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn is_pdf(&self) -> bool {
        self.content.starts_with(b"%PDF")
    }

    /// `<date>_<transaction id>.pdf`
    pub fn file_name(&self) -> String {
        format!("{}_{}.pdf", self.date, self.transaction_id)
    }

    /// Write the content to `path`, replacing any existing file
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(content: &str) -> CompanyDocument {
        CompanyDocument::new(
            "confirmation-statement",
            "2023-01-06",
            "confirmation-statement-with-no-updates",
            "paper_filed",
            3,
            "MzM2NDcxNTAzMWFkaXF6a2N4",
            content,
        )
    }

    #[test]
    fn test_fields_are_kept_verbatim() {
        let doc = sample("content");

        assert_eq!(doc.category(), "confirmation-statement");
        assert_eq!(doc.date(), "2023-01-06");
        assert_eq!(doc.description(), "confirmation-statement-with-no-updates");
        assert_eq!(doc.status(), "paper_filed");
        assert_eq!(doc.pages(), 3);
        assert_eq!(doc.transaction_id(), "MzM2NDcxNTAzMWFkaXF6a2N4");
        assert_eq!(doc.content(), b"content");
        assert!(!doc.is_pdf());
    }

    #[test]
    fn test_equality_is_field_wise() {
        assert_eq!(sample("content"), sample("content"));
        assert_ne!(sample("content"), sample("other"));
    }

    #[test]
    fn test_file_name_and_save() {
        let doc = sample("%PDF-1.4 ...");
        assert!(doc.is_pdf());
        assert_eq!(doc.file_name(), "2023-01-06_MzM2NDcxNTAzMWFkaXF6a2N4.pdf");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(doc.file_name());
        doc.save_to(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4 ...");
    }

    #[test]
    fn test_serialize_skips_content() {
        let value = serde_json::to_value(sample("content")).unwrap();
        assert_eq!(value["pages"], 3);
        assert!(value.get("content").is_none());
    }
}
