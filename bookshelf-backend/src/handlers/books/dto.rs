use bookshelf_db::books::{BooksRow, NewBook};
use serde::{Deserialize, Serialize};

use crate::validation::ValidationIssue;

const MAX_TEXT_LEN: usize = 500;

/// Response DTO for one catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl From<BooksRow> for BookResponse {
    fn from(row: BooksRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            author: row.author,
            year: row.year,
        }
    }
}

/// Request body for inserts and full-row updates.
#[derive(Debug, Deserialize, Serialize)]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub year: i64,
}

impl BookPayload {
    pub fn validate(&self) -> Result<(), Vec<ValidationIssue>> {
        let mut issues: Vec<ValidationIssue> = Vec::new();
        for (name, value) in [("title", &self.title), ("author", &self.author)] {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                issues.push(ValidationIssue::new(
                    name,
                    "empty",
                    format!("{name} must not be empty"),
                ));
            } else if trimmed.chars().count() > MAX_TEXT_LEN {
                issues.push(ValidationIssue::new(
                    name,
                    "too_long",
                    format!("{name} must be <= {MAX_TEXT_LEN} chars"),
                ));
            }
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    pub fn as_new_book(&self) -> NewBook<'_> {
        NewBook {
            title: &self.title,
            author: &self.author,
            year: self.year,
        }
    }
}

/// One cached page of the catalog: the serialized list snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPage {
    pub page: usize,
    pub limit: usize,
    pub total: i64,
    pub books: Vec<BookResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_fields() {
        let payload = BookPayload {
            title: "   ".into(),
            author: "Clarice Lispector".into(),
            year: 1977,
        };
        let issues = payload.validate().unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "title");
    }

    #[test]
    fn accepts_a_normal_payload() {
        let payload = BookPayload {
            title: "A Hora da Estrela".into(),
            author: "Clarice Lispector".into(),
            year: 1977,
        };
        assert!(payload.validate().is_ok());
    }
}
