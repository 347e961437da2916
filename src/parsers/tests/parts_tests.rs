use crate::parsers::html::{PageParts, collapse_whitespace, parse_parts};

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_parse_parts() {
        let html = r#"<html><head><title> Offender
            profiling </title><meta name="keywords" content="not this"></head>
            <body><p>One.</p><p></p><p>Two.</p></body></html>"#;

        let parts = parse_parts(html);
        assert_eq!(parts.title.as_deref(), Some("Offender profiling"));
        assert_eq!(parts.description, None);
        assert_eq!(parts.paragraphs, vec!["One.", "Two."]);
    }

    #[test]
    fn test_body_prefers_description() {
        let parts = PageParts {
            title: None,
            description: Some("desc".to_string()),
            paragraphs: vec!["para".to_string()],
        };
        assert_eq!(parts.body(), "desc");
    }

    #[test]
    fn test_into_content_empty() {
        assert_eq!(PageParts::default().into_content(), None);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
    }
}
