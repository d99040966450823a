//! HTML helper functions

/// Escape HTML special characters
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Truncate a string to a specified length
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s
            .chars()
            .take(length.saturating_sub(omission.len()))
            .collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}

/// Generate Open Graph meta tags
pub fn open_graph(
    title: &str,
    description: &str,
    url: &str,
    image: Option<&str>,
    site_name: &str,
) -> String {
    let mut tags = vec![
        r#"<meta property="og:type" content="website">"#.to_string(),
        format!(r#"<meta property="og:title" content="{}">"#, escape(title)),
        format!(r#"<meta property="og:url" content="{}">"#, url),
        format!(
            r#"<meta property="og:site_name" content="{}">"#,
            escape(site_name)
        ),
    ];

    if !description.is_empty() {
        tags.push(format!(
            r#"<meta property="og:description" content="{}">"#,
            escape(description)
        ));
    }

    if let Some(img) = image {
        tags.push(format!(r#"<meta property="og:image" content="{}">"#, img));
    }

    tags.join("\n")
}
