//! ReDoc viewer page.

use crate::swagger::html_escape;

/// ReDoc configuration and HTML generation.
///
/// Like [`SwaggerUi`](crate::SwaggerUi), the page fetches the document from
/// its URL rather than embedding it.
#[derive(Debug, Clone)]
pub struct ReDoc {
    spec_url: String,
    title: String,
    expand_responses: ExpandResponses,
    hide_download_button: bool,
    primary_color: String,
    redoc_version: String,
}

/// Response expansion configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpandResponses {
    /// Expand all responses.
    All,
    /// Expand only success responses.
    #[default]
    Success,
    /// Don't expand any responses.
    None,
}

impl ExpandResponses {
    fn as_attr(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Success => "200,201",
            Self::None => "",
        }
    }
}

impl ReDoc {
    /// Create a ReDoc page for the document served at `spec_url`.
    #[must_use]
    pub fn new(spec_url: impl Into<String>, api_title: &str) -> Self {
        Self {
            spec_url: spec_url.into(),
            title: format!("{api_title} - API Documentation"),
            expand_responses: ExpandResponses::Success,
            hide_download_button: false,
            primary_color: "#32329f".to_string(),
            redoc_version: "2.1.5".to_string(),
        }
    }

    /// Set the page title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the response expansion.
    #[must_use]
    pub fn expand_responses(mut self, expand: ExpandResponses) -> Self {
        self.expand_responses = expand;
        self
    }

    /// Hide the download button.
    #[must_use]
    pub fn hide_download_button(mut self, hide: bool) -> Self {
        self.hide_download_button = hide;
        self
    }

    /// Set the primary theme color.
    #[must_use]
    pub fn primary_color(mut self, color: impl Into<String>) -> Self {
        self.primary_color = color.into();
        self
    }

    /// Set the ReDoc version to use.
    #[must_use]
    pub fn redoc_version(mut self, version: impl Into<String>) -> Self {
        self.redoc_version = version.into();
        self
    }

    /// URL the page fetches the document from.
    #[must_use]
    pub fn spec_url(&self) -> &str {
        &self.spec_url
    }

    /// Generate the HTML page.
    #[must_use]
    pub fn html(&self) -> String {
        format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            margin: 0;
            padding: 0;
        }}
    </style>
</head>
<body>
    <redoc spec-url="{spec_url}" expand-responses="{expand_responses}"{hide_download}></redoc>
    <script src="https://cdn.redoc.ly/redoc/v{version}/bundles/redoc.standalone.js"></script>
    <script>
        document.querySelector('redoc').setAttribute('theme', JSON.stringify({{
            colors: {{ primary: {{ main: "{primary_color}" }} }}
        }}));
    </script>
</body>
</html>"##,
            title = html_escape(&self.title),
            spec_url = html_escape(&self.spec_url),
            expand_responses = self.expand_responses.as_attr(),
            hide_download = if self.hide_download_button {
                " hide-download-button"
            } else {
                ""
            },
            version = self.redoc_version,
            primary_color = html_escape(&self.primary_color),
        )
    }

    /// Generate the HTML as bytes for use in HTTP responses.
    #[must_use]
    pub fn html_bytes(&self) -> bytes::Bytes {
        bytes::Bytes::from(self.html())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redoc_html() {
        let html = ReDoc::new("/apidoc/openapi.json", "Orders").html();
        assert!(html.contains(r#"spec-url="/apidoc/openapi.json""#));
        assert!(html.contains("<title>Orders - API Documentation</title>"));
        assert!(html.contains(r#"expand-responses="200,201""#));
        assert!(!html.contains("hide-download-button"));
    }

    #[test]
    fn test_redoc_customization() {
        let redoc = ReDoc::new("/d/openapi.json", "T")
            .title("Reference")
            .expand_responses(ExpandResponses::All)
            .hide_download_button(true)
            .primary_color("#ff0000")
            .redoc_version("2.0.0");

        assert_eq!(redoc.spec_url(), "/d/openapi.json");
        let html = redoc.html();
        assert!(html.contains("<title>Reference</title>"));
        assert!(html.contains(r#"expand-responses="all""#));
        assert!(html.contains(" hide-download-button"));
        assert!(html.contains("#ff0000"));
        assert!(html.contains("redoc/v2.0.0/"));
    }

    #[test]
    fn test_expand_responses_attr() {
        assert_eq!(ExpandResponses::None.as_attr(), "");
        assert_eq!(ExpandResponses::default(), ExpandResponses::Success);
    }
}
