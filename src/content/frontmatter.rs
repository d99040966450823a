//! Front-matter parsing

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date format used throughout the content store
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Metadata block at the head of every post file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrontMatter {
    pub title: String,

    /// Publication date in `DD.MM.YYYY` form
    pub date: String,

    /// Short description shown in listings and meta tags
    pub desc: String,

    /// Cover image reference, relative to the assets root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

impl FrontMatter {
    /// Parse front-matter from file content.
    /// Returns (front_matter, body).
    ///
    /// The metadata block is a YAML mapping fenced by a `---` line before and
    /// after it. Anything else — a missing delimiter, undecodable YAML, an
    /// unknown or missing field, a date that is not `DD.MM.YYYY` — is a parse
    /// error. Pure function over the input text.
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        let rest = content
            .strip_prefix("---")
            .ok_or_else(|| Error::Parse("missing opening --- delimiter".to_string()))?;
        let rest = rest.strip_prefix('\r').unwrap_or(rest);
        let rest = rest
            .strip_prefix('\n')
            .ok_or_else(|| Error::Parse("metadata must start on the line after ---".to_string()))?;

        let end = rest
            .find("\n---")
            .ok_or_else(|| Error::Parse("missing closing --- delimiter".to_string()))?;

        let meta = &rest[..end];
        let body = rest[end + 4..].trim_start_matches(['\n', '\r']);

        let fm: FrontMatter = serde_yaml::from_str(meta)
            .map_err(|e| Error::Parse(format!("invalid metadata block: {e}")))?;

        // Fail at parse time, not at sort time
        fm.parse_date()?;

        Ok((fm, body))
    }

    /// Publication date parsed from the `DD.MM.YYYY` field
    pub fn parse_date(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|_| Error::Parse(format!("date {:?} is not DD.MM.YYYY", self.date)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter() {
        let content = r#"---
title: Launching your first campaign
date: 15.06.2023
desc: What we learned shipping campaigns for a dozen clients.
cover: /assets/img/campaign.jpg
---

This is the body.
"#;

        let (fm, body) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Launching your first campaign");
        assert_eq!(fm.date, "15.06.2023");
        assert_eq!(fm.cover.as_deref(), Some("/assets/img/campaign.jpg"));
        assert!(body.starts_with("This is the body."));
    }

    #[test]
    fn test_cover_is_optional() {
        let content = "---\ntitle: No cover\ndate: 01.01.2024\ndesc: Plain post.\n---\nBody.";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.cover, None);
    }

    #[test]
    fn test_missing_closing_delimiter() {
        let content = "---\ntitle: Broken\ndate: 01.01.2024\ndesc: No end fence.\n";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, Error::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_missing_opening_delimiter() {
        let err = FrontMatter::parse("title: Nope\n").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_missing_required_field() {
        let content = "---\ntitle: Only a title\ndate: 01.01.2024\n---\nBody.";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let content =
            "---\ntitle: T\ndate: 01.01.2024\ndesc: D\nlayout: wide\n---\nBody.";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_bad_date_rejected() {
        let content = "---\ntitle: T\ndate: 2024-01-01\ndesc: D\n---\nBody.";
        let err = FrontMatter::parse(content).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_parse_date() {
        let fm = FrontMatter {
            title: "T".to_string(),
            date: "15.06.2023".to_string(),
            desc: "D".to_string(),
            cover: None,
        };
        let date = fm.parse_date().unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 6, 15).unwrap());
    }

    #[test]
    fn test_roundtrip_preserves_fields() {
        let fm = FrontMatter {
            title: "Round trip".to_string(),
            date: "01.01.2024".to_string(),
            desc: "All four fields survive.".to_string(),
            cover: Some("/assets/img/cover.png".to_string()),
        };

        let yaml = serde_yaml::to_string(&fm).unwrap();
        let content = format!("---\n{yaml}---\nBody.");
        let (parsed, _) = FrontMatter::parse(&content).unwrap();
        assert_eq!(parsed, fm);
    }
}
