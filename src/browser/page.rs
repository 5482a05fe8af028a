//! HTML rendering of link lists.

use crate::server::{HttpResponse, StatusCode};

const BODY_PLACEHOLDER: &str = "{body}";

const PAGE_TEMPLATE: &str = "<html>
<head>
    <title>Directory browser</title>
</head>
<body>
    {body}
</body>
</html>";

/// Escape text for use inside HTML content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Build an href from decoded path parts, percent-encoding every
/// `/`-separated segment so the server decodes it back to the same name.
///
/// `:` and `\` are kept literal, so drive roots keep their familiar
/// `/C:\/Users` shape.
pub fn href(parts: &[&str]) -> String {
    let mut href = String::new();
    for segment in parts.iter().flat_map(|part| part.split('/')) {
        href.push('/');
        href.push_str(
            &urlencoding::encode(segment)
                .replace("%3A", ":")
                .replace("%5C", "\\"),
        );
    }
    href
}

/// An unordered list of links, one per entry.
#[derive(Debug, Clone, Default)]
pub struct LinkList {
    items: Vec<String>,
}

impl LinkList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a link to `href` labelled `label`. Both are HTML-escaped;
    /// `href` is expected to be percent-encoded already (see [`href`]).
    pub fn push(&mut self, href: &str, label: &str) {
        self.items.push(format!(
            r#"<li><a href="{href}">{label}</a></li>"#,
            href = escape_html(href),
            label = escape_html(label),
        ));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The `<ul>` fragment.
    pub fn to_html(&self) -> String {
        format!("<ul>{}</ul>", self.items.concat())
    }

    /// Render the list as a full page.
    pub fn into_response(self) -> HttpResponse {
        render_page(&self.to_html())
    }
}

/// Wrap `fragment` in the page template and return it as an HTML response.
pub fn render_page(fragment: &str) -> HttpResponse {
    HttpResponse::new(StatusCode::Ok)
        .with_content_type("text/html; charset=utf-8")
        .with_body_string(PAGE_TEMPLATE.replacen(BODY_PLACEHOLDER, fragment, 1))
}
