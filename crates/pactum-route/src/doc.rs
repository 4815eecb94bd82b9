//! Handler documentation and naming helpers.

/// Summary and description split from handler documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocText {
    /// First line.
    pub summary: Option<String>,
    /// Everything after the first line, trimmed. `None` when empty.
    pub description: Option<String>,
}

/// Splits documentation into summary (first line) and description (the rest).
///
/// Common indentation is removed from continuation lines first, so indented
/// doc strings read the same as flush ones.
///
/// # Example
///
/// ```rust
/// use pactum_route::parse_doc;
///
/// let doc = parse_doc(Some("List users.\n\n    Supports paging.\n"));
/// assert_eq!(doc.summary.as_deref(), Some("List users."));
/// assert_eq!(doc.description.as_deref(), Some("Supports paging."));
/// ```
#[must_use]
pub fn parse_doc(doc: Option<&str>) -> DocText {
    let Some(doc) = doc.map(dedent) else {
        return DocText::default();
    };
    let doc = doc.trim();
    if doc.is_empty() {
        return DocText::default();
    }

    match doc.split_once('\n') {
        None => DocText {
            summary: Some(doc.to_string()),
            description: None,
        },
        Some((first, rest)) => {
            let rest = rest.trim();
            DocText {
                summary: Some(first.trim_end().to_string()),
                description: (!rest.is_empty()).then(|| rest.to_string()),
            }
        }
    }
}

fn dedent(doc: &str) -> String {
    let mut lines = doc.lines();
    let first = lines.next().unwrap_or_default().trim();
    let rest: Vec<&str> = lines.collect();

    let indent = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out = String::from(first);
    for line in rest {
        out.push('\n');
        out.push_str(line.get(indent..).unwrap_or_else(|| line.trim_start()));
    }
    out
}

/// Derives an operation id by camel-casing a handler name.
///
/// Underscores are dropped and the character after each one is upper-cased;
/// the first character is lower-cased.
///
/// ```rust
/// use pactum_route::operation_id;
///
/// assert_eq!(operation_id("list_user_posts"), "listUserPosts");
/// assert_eq!(operation_id("Ping"), "ping");
/// ```
#[must_use]
pub fn operation_id(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;

    for ch in name.chars() {
        if ch == '_' && !upper_next {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }

    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => out,
    }
}
