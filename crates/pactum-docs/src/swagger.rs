//! Swagger UI viewer page.
//!
//! The page loads Swagger UI from a CDN and fetches the document from the
//! engine's document URL, so it never goes stale relative to the cache.

/// Swagger UI configuration and HTML generation.
#[derive(Debug, Clone)]
pub struct SwaggerUi {
    /// URL the document is fetched from.
    spec_url: String,
    /// Title for the HTML page.
    title: String,
    /// Whether to use deep linking (URL updates with operations).
    deep_linking: bool,
    /// Default expansion depth for operations.
    doc_expansion: DocExpansion,
    /// Whether to display the request duration.
    display_request_duration: bool,
    /// Swagger UI version to use from CDN.
    swagger_version: String,
}

/// Document expansion level for Swagger UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocExpansion {
    /// Show all operations collapsed.
    None,
    /// Show only the list of operations.
    #[default]
    List,
    /// Expand all operations fully.
    Full,
}

impl DocExpansion {
    fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::List => "list",
            Self::Full => "full",
        }
    }
}

impl SwaggerUi {
    /// Create a Swagger UI page for the document served at `spec_url`.
    ///
    /// ```rust
    /// use pactum_docs::SwaggerUi;
    ///
    /// let page = SwaggerUi::new("/apidoc/openapi.json", "Orders API");
    /// assert!(page.html().contains("url: '/apidoc/openapi.json'"));
    /// ```
    #[must_use]
    pub fn new(spec_url: impl Into<String>, api_title: &str) -> Self {
        Self {
            spec_url: spec_url.into(),
            title: format!("{api_title} - Swagger UI"),
            deep_linking: true,
            doc_expansion: DocExpansion::List,
            display_request_duration: true,
            swagger_version: "5.18.2".to_string(),
        }
    }

    /// Set the page title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Enable or disable deep linking.
    #[must_use]
    pub fn deep_linking(mut self, enabled: bool) -> Self {
        self.deep_linking = enabled;
        self
    }

    /// Set the document expansion level.
    #[must_use]
    pub fn doc_expansion(mut self, expansion: DocExpansion) -> Self {
        self.doc_expansion = expansion;
        self
    }

    /// Enable or disable request duration display.
    #[must_use]
    pub fn display_request_duration(mut self, enabled: bool) -> Self {
        self.display_request_duration = enabled;
        self
    }

    /// Set the Swagger UI version to use.
    #[must_use]
    pub fn swagger_version(mut self, version: impl Into<String>) -> Self {
        self.swagger_version = version.into();
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
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui.css" />
    <style>
        html {{
            box-sizing: border-box;
            overflow-y: scroll;
        }}
        body {{
            margin: 0;
            background: #fafafa;
        }}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = function() {{
            window.ui = SwaggerUIBundle({{
                url: '{spec_url}',
                dom_id: '#swagger-ui',
                deepLinking: {deep_linking},
                docExpansion: '{doc_expansion}',
                displayRequestDuration: {display_duration},
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout"
            }});
        }};
    </script>
</body>
</html>"##,
            title = html_escape(&self.title),
            version = self.swagger_version,
            spec_url = html_escape(&self.spec_url),
            deep_linking = self.deep_linking,
            doc_expansion = self.doc_expansion.as_str(),
            display_duration = self.display_request_duration,
        )
    }

    /// Generate the HTML as bytes for use in HTTP responses.
    #[must_use]
    pub fn html_bytes(&self) -> bytes::Bytes {
        bytes::Bytes::from(self.html())
    }
}

/// Escapes text interpolated into a page.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let swagger = SwaggerUi::new("/apidoc/openapi.json", "Orders");
        assert_eq!(swagger.spec_url(), "/apidoc/openapi.json");
        assert_eq!(swagger.title, "Orders - Swagger UI");
        assert_eq!(swagger.doc_expansion, DocExpansion::List);
    }

    #[test]
    fn test_customization() {
        let swagger = SwaggerUi::new("/docs/openapi.json", "Orders")
            .title("Custom Title")
            .deep_linking(false)
            .doc_expansion(DocExpansion::Full)
            .display_request_duration(false)
            .swagger_version("5.0.0");

        let html = swagger.html();
        assert!(html.contains("<title>Custom Title</title>"));
        assert!(html.contains("deepLinking: false"));
        assert!(html.contains("docExpansion: 'full'"));
        assert!(html.contains("swagger-ui-dist@5.0.0"));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = SwaggerUi::new("/d/openapi.json", "<script>").html();
        assert!(html.contains("&lt;script&gt; - Swagger UI"));
        assert!(!html.contains("<script> - Swagger UI"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_html_bytes() {
        let bytes = SwaggerUi::new("/d/openapi.json", "T").html_bytes();
        assert!(bytes.starts_with(b"<!DOCTYPE html>"));
    }
}
