use scraper::{Html, Selector};
use std::sync::LazyLock;

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid title selector"));
static META: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta").expect("valid meta selector"));
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid paragraph selector"));

/// The pieces of a page the extractor looks at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageParts {
    /// Text of the `<title>` element
    pub title: Option<String>,
    /// Non-empty `content` of `<meta name="description">`
    pub description: Option<String>,
    /// Text of every `<p>` element in document order, empty ones dropped
    pub paragraphs: Vec<String>,
}

impl PageParts {
    /// Body text: the meta description, or the paragraphs joined by single spaces
    pub fn body(&self) -> String {
        match &self.description {
            Some(description) => description.clone(),
            None => self.paragraphs.join(" "),
        }
    }

    /// Title and body as one string, `None` when both are empty
    pub fn into_content(self) -> Option<String> {
        let body = self.body();
        let title = self.title.unwrap_or_default();
        let content = format!("{} {}", title, body).trim().to_string();

        if content.is_empty() { None } else { Some(content) }
    }
}

/// Extracts title, meta description and paragraph text from an HTML document
pub fn parse_parts(html: &str) -> PageParts {
    // html5ever recovers from malformed markup, so this never fails
    let doc = Html::parse_document(html);

    let title = doc
        .select(&TITLE)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty());

    let description = doc
        .select(&META)
        .find(|el| {
            el.value()
                .attr("name")
                .is_some_and(|name| name.eq_ignore_ascii_case("description"))
        })
        .and_then(|el| el.value().attr("content"))
        .map(collapse_whitespace)
        .filter(|d| !d.is_empty());

    let paragraphs = doc
        .select(&PARAGRAPH)
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>();

    ::log::trace!(
        "HTML parser found title: {}, description: {}, {} paragraphs",
        title.is_some(),
        description.is_some(),
        paragraphs.len()
    );

    PageParts {
        title,
        description,
        paragraphs,
    }
}

/// Returns `"<title> <body>"` for a page, `None` when it carries no text
pub fn extract(html: &str) -> Option<String> {
    parse_parts(html).into_content()
}

/// Collapses runs of whitespace into single spaces and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
