//! Post models

use chrono::NaiveDate;
use serde::Serialize;

use crate::content::FrontMatter;
use crate::error::Result;

/// Listing entry for one post. Metadata only; the body is never rendered
/// for a summary.
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    /// Identifier derived from the filename
    pub slug: String,

    pub title: String,

    /// Parsed publication date, used for ordering only
    #[serde(skip)]
    pub published: NaiveDate,

    /// Original `DD.MM.YYYY` text, shown as-is
    pub date: String,

    pub desc: String,

    pub cover: Option<String>,

    /// Route to the detail page
    pub path: String,
}

impl PostSummary {
    /// Build a summary from a parsed metadata block
    pub fn from_frontmatter(slug: &str, fm: FrontMatter) -> Result<Self> {
        let published = fm.parse_date()?;
        Ok(Self {
            slug: slug.to_string(),
            title: fm.title,
            published,
            date: fm.date,
            desc: fm.desc,
            cover: fm.cover,
            path: format!("/blog/{slug}"),
        })
    }
}

/// A fully loaded post: summary fields plus rendered body HTML
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub summary: PostSummary,

    /// Rendered body HTML
    pub content: String,
}

/// Sort newest first; slug breaks ties so listings stay deterministic
pub fn sort_newest_first(posts: &mut [PostSummary]) {
    posts.sort_by(|a, b| {
        b.published
            .cmp(&a.published)
            .then_with(|| a.slug.cmp(&b.slug))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(slug: &str, date: &str) -> PostSummary {
        let fm = FrontMatter {
            title: format!("Post {slug}"),
            date: date.to_string(),
            desc: "desc".to_string(),
            cover: None,
        };
        PostSummary::from_frontmatter(slug, fm).unwrap()
    }

    #[test]
    fn test_detail_path() {
        let post = summary("first-post", "01.01.2024");
        assert_eq!(post.path, "/blog/first-post");
    }

    #[test]
    fn test_sort_newest_first() {
        let mut posts = vec![
            summary("older", "15.06.2023"),
            summary("newer", "01.01.2024"),
            summary("middle", "30.12.2023"),
        ];
        sort_newest_first(&mut posts);
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["newer", "middle", "older"]);
    }

    #[test]
    fn test_sort_ties_break_on_slug() {
        let mut posts = vec![
            summary("b-post", "01.01.2024"),
            summary("a-post", "01.01.2024"),
        ];
        sort_newest_first(&mut posts);
        assert_eq!(posts[0].slug, "a-post");
    }
}
