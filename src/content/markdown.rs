//! Markdown rendering with heading anchors and syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::error::Result;
use crate::helpers::html::escape;

const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Markdown renderer
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_theme(DEFAULT_THEME)
    }

    /// Create with a specific highlight theme
    pub fn with_theme(theme: &str) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
        }
    }

    /// Render markdown to HTML.
    ///
    /// Level 2-3 headings get an `id` attribute slugged from their own text,
    /// collected from the heading's inline events before the tag is emitted.
    /// Fenced code blocks go through syntect.
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut heading: Option<HeadingBuffer> = None;
        let mut code_lang: Option<String> = None;
        let mut code_buf = String::new();
        let mut in_code = false;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_buf.clear();
                    in_code = true;
                }
                Event::Text(text) if in_code => {
                    code_buf.push_str(&text);
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code = false;
                    let highlighted = self.highlight_code(&code_buf, code_lang.take().as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                }
                Event::Start(Tag::Heading { level, .. })
                    if matches!(level, HeadingLevel::H2 | HeadingLevel::H3) =>
                {
                    heading = Some(HeadingBuffer::new(level));
                }
                Event::End(TagEnd::Heading(_)) if heading.is_some() => {
                    let buffered = heading.take().unwrap();
                    events.push(Event::Html(CowStr::from(buffered.into_html())));
                }
                other => match heading.as_mut() {
                    Some(buffered) => buffered.push(other),
                    None => events.push(other),
                },
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .unwrap_or_else(|| {
                self.theme_set
                    .themes
                    .values()
                    .next()
                    .expect("No themes available")
            });

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) => highlighted,
            Err(_) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                lang,
                escape(code)
            ),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A heading being collected until its end tag arrives
struct HeadingBuffer<'a> {
    level: HeadingLevel,
    inner: Vec<Event<'a>>,
    text: String,
}

impl<'a> HeadingBuffer<'a> {
    fn new(level: HeadingLevel) -> Self {
        Self {
            level,
            inner: Vec::new(),
            text: String::new(),
        }
    }

    fn push(&mut self, event: Event<'a>) {
        match &event {
            Event::Text(text) | Event::Code(text) => self.text.push_str(text),
            _ => {}
        }
        self.inner.push(event);
    }

    fn into_html(self) -> String {
        let tag = level_tag(self.level);
        let anchor = slug::slugify(&self.text);
        let mut inner = String::new();
        html::push_html(&mut inner, self.inner.into_iter());
        format!(r#"<{tag} id="{anchor}">{inner}</{tag}>"#)
    }
}

fn level_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_h2_gets_slug_id() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Getting Started").unwrap();
        assert!(
            html.contains(r#"<h2 id="getting-started">Getting Started</h2>"#),
            "got: {html}"
        );
    }

    #[test]
    fn test_h3_slug_collapses_non_word_runs() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("### Ship & iterate!").unwrap();
        assert!(html.contains(r#"<h3 id="ship-iterate">"#), "got: {html}");
    }

    #[test]
    fn test_slug_comes_from_heading_text_not_markup() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Using *emphasis* here").unwrap();
        assert!(
            html.contains(r#"<h2 id="using-emphasis-here">Using <em>emphasis</em> here</h2>"#),
            "got: {html}"
        );
    }

    #[test]
    fn test_h1_keeps_no_id() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Top Title").unwrap();
        assert!(html.contains("<h1>Top Title</h1>"));
        assert!(!html.contains("<h1 id="));
    }

    #[test]
    fn test_lists_links_images() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("- one\n- [two](https://example.com)\n\n![alt text](/assets/img/x.png)")
            .unwrap();
        assert!(html.contains("<ul>"));
        assert!(html.contains(r#"<a href="https://example.com">two</a>"#));
        assert!(html.contains(r#"<img src="/assets/img/x.png" alt="alt text""#));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains("<pre"));
        assert!(html.contains("main"));
    }
}
