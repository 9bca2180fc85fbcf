use crate::model::{BookInput, MAX_PUBLISHED_YEAR, MIN_PUBLISHED_YEAR};
use serde::{Deserialize, Serialize};

/// Request body for `POST /books/` and `PUT /books/:id`.
///
/// `published_year` is read as `i64` so that out-of-range numbers reach
/// `validate` instead of failing deserialization. Unknown keys, `id` included,
/// are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub published_year: i64,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        FieldError {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind: kind.to_owned(),
        }
    }
}

impl BookPayload {
    pub fn validate(self) -> Result<BookInput, Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.published_year < MIN_PUBLISHED_YEAR {
            errors.push(FieldError::new(
                &["body", "published_year"],
                format!("Input should be greater than or equal to {MIN_PUBLISHED_YEAR}"),
                "greater_than_equal",
            ));
        }
        if self.published_year > MAX_PUBLISHED_YEAR {
            errors.push(FieldError::new(
                &["body", "published_year"],
                format!("Input should be less than or equal to {MAX_PUBLISHED_YEAR}"),
                "less_than_equal",
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(BookInput {
            title: self.title,
            author: self.author,
            // bounds checked above
            published_year: self.published_year as i32,
            summary: self.summary,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new_from_msg(msg: &str) -> Self {
        MessageResponse {
            message: msg.to_owned(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(year: i64) -> BookPayload {
        BookPayload {
            title: "T".to_string(),
            author: "A".to_string(),
            published_year: year,
            summary: None,
        }
    }

    #[test]
    fn year_bounds_are_inclusive() {
        assert_eq!(payload(0).validate().unwrap().published_year, 0);
        assert_eq!(payload(2100).validate().unwrap().published_year, 2100);
    }

    #[test]
    fn year_outside_bounds_is_rejected() {
        let errors = payload(-1).validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].loc, vec!["body", "published_year"]);
        assert_eq!(errors[0].kind, "greater_than_equal");

        let errors = payload(2101).validate().unwrap_err();
        assert_eq!(errors[0].kind, "less_than_equal");

        assert!(payload(i64::MAX).validate().is_err());
    }

    #[test]
    fn summary_defaults_to_none_and_id_is_ignored() {
        let body = r#"{"id": 7, "title": "T", "author": "A", "published_year": 2023}"#;
        let payload: BookPayload = serde_json::from_str(body).unwrap();
        let input = payload.validate().unwrap();
        assert_eq!(input.summary, None);
        assert_eq!(input.title, "T");
    }

    #[test]
    fn missing_required_field_fails_to_deserialize() {
        let body = r#"{"title": "T", "published_year": 2023}"#;
        assert!(serde_json::from_str::<BookPayload>(body).is_err());
    }
}
