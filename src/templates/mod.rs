//! Embedded site templates using the Tera template engine
//!
//! All page templates are compiled into the binary; there is no theme
//! directory to deploy next to the executable.

use tera::{Context, Tera};

use crate::error::Result;

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all site templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Rendered markdown and helper-built meta tags are trusted HTML
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            ("partials/post_card.html", include_str!("site/partials/post_card.html")),
            ("partials/newsletter.html", include_str!("site/partials/newsletter.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{FrontMatter, PostSummary};

    fn base_context() -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteConfig::default());
        context.insert("meta_tags", "");
        context
    }

    fn summary(slug: &str) -> PostSummary {
        let fm = FrontMatter {
            title: format!("Post {slug}"),
            date: "01.01.2024".to_string(),
            desc: "A short description.".to_string(),
            cover: Some("/assets/img/cover.jpg".to_string()),
        };
        PostSummary::from_frontmatter(slug, fm).unwrap()
    }

    #[test]
    fn test_home_renders_posts_and_features() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert("posts", &vec![summary("alpha"), summary("beta")]);

        let html = renderer.render("home.html", &context).unwrap();
        assert!(html.contains("Post alpha"));
        assert!(html.contains("/blog/beta"));
        assert!(html.contains("Web Design"));
        assert!(html.contains(r#"action="/contact""#));
        assert!(html.contains(r#"action="/newsletter""#));
    }

    #[test]
    fn test_blog_lists_every_post() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert("posts", &vec![summary("one"), summary("two"), summary("three")]);

        let html = renderer.render("blog.html", &context).unwrap();
        for slug in ["one", "two", "three"] {
            assert!(html.contains(&format!("/blog/{slug}")));
        }
    }

    #[test]
    fn test_post_renders_content_and_date() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = base_context();
        context.insert(
            "post",
            &crate::content::PostDetail {
                summary: summary("alpha"),
                content: r#"<h2 id="getting-started">Getting Started</h2>"#.to_string(),
            },
        );

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains(r#"<h2 id="getting-started">"#));
        assert!(html.contains("01.01.2024"));
    }
}
