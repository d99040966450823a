//! Content store - reads and parses post files from disk per request

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::content::{sort_newest_first, FrontMatter, MarkdownRenderer, PostDetail, PostSummary};
use crate::error::{Error, Result};

/// Handle to the on-disk content directory.
///
/// Every call re-reads from disk; the store holds no cache. The directory is
/// treated as read-only at request time.
pub struct ContentStore {
    dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl ContentStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Slugs of every post file, sorted. An absent directory counts as empty.
    pub async fn slugs(&self) -> Result<Vec<String>> {
        let files = self.post_files().await?;
        Ok(files.iter().map(|p| file_slug(p)).collect())
    }

    /// Summaries of every post, newest first.
    ///
    /// Only the metadata block of each file is decoded. One malformed file
    /// fails the whole listing.
    pub async fn summaries(&self) -> Result<Vec<PostSummary>> {
        let mut posts = Vec::new();

        for path in self.post_files().await? {
            let raw = fs::read_to_string(&path).await?;
            let (fm, _body) = FrontMatter::parse(&raw).map_err(|e| locate(e, &path))?;
            let slug = file_slug(&path);
            let summary = PostSummary::from_frontmatter(&slug, fm).map_err(|e| locate(e, &path))?;
            posts.push(summary);
        }

        sort_newest_first(&mut posts);
        Ok(posts)
    }

    /// The `count` most recent summaries, for the landing page
    pub async fn latest(&self, count: usize) -> Result<Vec<PostSummary>> {
        let mut posts = self.summaries().await?;
        posts.truncate(count);
        Ok(posts)
    }

    /// Load one post by slug: metadata plus rendered body
    pub async fn load(&self, slug: &str) -> Result<PostDetail> {
        if slug.contains(['/', '\\']) || slug.contains("..") {
            return Err(Error::NotFound(slug.to_string()));
        }

        let path = self.dir.join(format!("{slug}.md"));
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(slug.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let (fm, body) = FrontMatter::parse(&raw).map_err(|e| locate(e, &path))?;
        let summary = PostSummary::from_frontmatter(slug, fm).map_err(|e| locate(e, &path))?;
        let content = self.renderer.render(body)?;

        Ok(PostDetail { summary, content })
    }

    /// Markdown post files in the store, sorted by path
    async fn post_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_file() && is_markdown_file(&path) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

/// Identifier is the filename minus the extension
fn file_slug(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Attach the offending file to a parse error before it propagates
fn locate(err: Error, path: &Path) -> Error {
    match err {
        Error::Parse(reason) => Error::Parse(format!("{}: {reason}", path.display())),
        other => other,
    }
}
