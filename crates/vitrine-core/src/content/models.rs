use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// A certificate issued by the institute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    /// Backend identifier; may arrive as a JSON string or number
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub image: String,
}

impl Certificate {
    /// Identity key: backend id where present, else positional index
    pub fn identity(&self, index: usize) -> String {
        self.id.clone().unwrap_or_else(|| format!("#{}", index))
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Certificate")
    }
}

/// A course batch; only the latest entry is shown as the upcoming batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub start_date: String,
    pub duration: String,
}

impl Course {
    /// Start date normalized to YYYY-MM-DD
    ///
    /// The backend has served both RFC 3339 timestamps and plain dates;
    /// anything unparseable is passed through as-is.
    pub fn start_date_ymd(&self) -> String {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.start_date) {
            return dt.format("%Y-%m-%d").to_string();
        }
        if let Ok(date) = NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d") {
            return date.format("%Y-%m-%d").to_string();
        }
        self.start_date.clone()
    }
}

/// A training offering shown on the sliding strip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Training {
    #[serde(default)]
    pub icon: Option<String>,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

/// A placed student shown on the placement board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    pub name: String,
    pub role: String,
    pub company: String,
    pub package: String,
    pub image: String,
}

/// Footer contact details; only the latest entry is shown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

/// Accept a JSON string or number and normalize to a string
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_id_from_number() {
        let cert: Certificate = serde_json::from_str(r#"{"id": 42, "image": "/a.png"}"#).unwrap();
        assert_eq!(cert.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_certificate_id_from_string() {
        let cert: Certificate =
            serde_json::from_str(r#"{"id": "abc123", "image": "/a.png"}"#).unwrap();
        assert_eq!(cert.id.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_certificate_identity_positional_fallback() {
        let cert: Certificate = serde_json::from_str(r#"{"image": "/a.png"}"#).unwrap();
        assert_eq!(cert.identity(7), "#7");
    }

    #[test]
    fn test_course_date_rfc3339() {
        let course = Course {
            start_date: "2026-09-01T00:00:00.000Z".to_string(),
            duration: "3 months".to_string(),
        };
        assert_eq!(course.start_date_ymd(), "2026-09-01");
    }

    #[test]
    fn test_course_date_plain() {
        let course = Course {
            start_date: "2026-09-15".to_string(),
            duration: "6 weeks".to_string(),
        };
        assert_eq!(course.start_date_ymd(), "2026-09-15");
    }

    #[test]
    fn test_course_date_unparseable_passthrough() {
        let course = Course {
            start_date: "soon".to_string(),
            duration: "6 weeks".to_string(),
        };
        assert_eq!(course.start_date_ymd(), "soon");
    }
}
