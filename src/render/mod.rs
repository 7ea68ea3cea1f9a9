//! HTML rendering.
//!
//! Templates are plain HTML files with `{{name}}` placeholders. Each page
//! template (`view`, `edit`) is filled from a [`Page`] and merged into the
//! shared layout's `{{content}}` slot. All template files are read once at
//! startup; the registry is immutable afterwards and shared read-only
//! across request tasks.

use crate::storage::Page;
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

const LAYOUT_FILE: &str = "layout.html";
const PAGE_TEMPLATES: &[&str] = &["view", "edit"];

/// Failure while rendering an already-loaded template.
#[derive(Debug)]
pub enum RenderError {
    UnknownTemplate(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTemplate(name) => write!(f, "unknown template: {name}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Immutable table of template pairs, keyed by page template name.
#[derive(Debug)]
pub struct TemplateRegistry {
    layout: String,
    pages: HashMap<String, String>,
}

impl TemplateRegistry {
    /// Read the layout and every page template from `dir`.
    ///
    /// Called once at startup; a missing or unreadable file is returned as
    /// an error so the process can refuse to start.
    pub fn load(dir: impl AsRef<Path>) -> io::Result<Self> {
        let dir = dir.as_ref();
        let layout = std::fs::read_to_string(dir.join(LAYOUT_FILE))?;

        let mut pages = HashMap::new();
        for name in PAGE_TEMPLATES {
            let content = std::fs::read_to_string(dir.join(format!("{name}.html")))?;
            pages.insert((*name).to_string(), content);
        }

        Ok(Self { layout, pages })
    }

    /// Build a registry from in-memory template strings.
    pub fn from_parts(layout: &str, pages: &[(&str, &str)]) -> Self {
        Self {
            layout: layout.to_string(),
            pages: pages
                .iter()
                .map(|(name, content)| ((*name).to_string(), (*content).to_string()))
                .collect(),
        }
    }

    /// Render the named page template inside the layout.
    pub fn render(&self, name: &str, page: &Page) -> Result<String, RenderError> {
        let page_template = self
            .pages
            .get(name)
            .ok_or_else(|| RenderError::UnknownTemplate(name.to_string()))?;

        let content = fill_placeholders(page_template, page);
        let html = fill_placeholders(&self.layout, page);

        // Content goes in last: `str::replace` does not rescan inserted
        // text, so placeholder-looking text in a page body stays literal.
        Ok(html.replace("{{content}}", &content))
    }
}

/// Substitute the page-derived placeholders in a template string.
///
/// The body is substituted last so that placeholder syntax inside it is
/// never expanded by a later replacement.
fn fill_placeholders(template: &str, page: &Page) -> String {
    let body = String::from_utf8_lossy(&page.body);
    template
        .replace("{{title}}", &escape_html(&page.title))
        .replace("{{menu}}", &render_menu(&page.menu))
        .replace("{{body}}", &escape_html(&body))
}

/// Build the page-listing markup, or an empty string when there is nothing
/// to list.
fn render_menu(titles: &[String]) -> String {
    if titles.is_empty() {
        return String::new();
    }

    let mut html = String::from("<ul class=\"menu\">\n");
    for title in titles {
        // Titles are validated to ASCII alphanumerics before they reach
        // the menu, but escape anyway.
        let title = escape_html(title);
        html.push_str(&format!("<li><a href=\"/view/{title}\">{title}</a></li>\n"));
    }
    html.push_str("</ul>");
    html
}

/// Escape text for embedding in HTML element content or attribute values.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_registry() -> TemplateRegistry {
        TemplateRegistry::from_parts(
            "<html><title>{{title}}</title>{{content}}</html>",
            &[
                ("view", "<h1>{{title}}</h1>{{menu}}<pre>{{body}}</pre>"),
                ("edit", "<form><textarea>{{body}}</textarea></form>"),
            ],
        )
    }

    #[test]
    fn test_render_fills_title_and_body() {
        let registry = test_registry();
        let page = Page::new("Home", b"hello".to_vec());

        let html = registry.render("view", &page).unwrap();
        assert!(html.contains("<title>Home</title>"));
        assert!(html.contains("<h1>Home</h1>"));
        assert!(html.contains("<pre>hello</pre>"));
    }

    #[test]
    fn test_render_escapes_body() {
        let registry = test_registry();
        let page = Page::new("Home", b"<script>alert('x')</script>".to_vec());

        let html = registry.render("view", &page).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn test_render_menu_markup() {
        let registry = test_registry();
        let mut page = Page::new("Home", Vec::new());
        page.menu = vec!["Alpha".to_string(), "Beta".to_string()];

        let html = registry.render("view", &page).unwrap();
        assert!(html.contains("<a href=\"/view/Alpha\">Alpha</a>"));
        assert!(html.contains("<a href=\"/view/Beta\">Beta</a>"));
    }

    #[test]
    fn test_render_empty_menu_is_blank() {
        let registry = test_registry();
        let page = Page::new("Home", Vec::new());

        let html = registry.render("view", &page).unwrap();
        assert!(!html.contains("<ul"));
    }

    #[test]
    fn test_body_placeholders_stay_literal() {
        let registry = test_registry();
        let page = Page::new("Home", b"see {{title}} and {{menu}}".to_vec());

        let html = registry.render("view", &page).unwrap();
        assert!(html.contains("see {{title}} and {{menu}}"));
    }

    #[test]
    fn test_unknown_template_errors() {
        let registry = test_registry();
        let page = Page::empty("Home");

        let err = registry.render("delete", &page).unwrap_err();
        assert!(err.to_string().contains("delete"));
    }

    #[test]
    fn test_load_missing_dir_fails() {
        assert!(TemplateRegistry::load("/nonexistent/flatwiki-templates").is_err());
    }
}
