//! Route template grammar.
//!
//! A template is a sequence of static text runs and variable markers:
//!
//! ```text
//! /users/<int(min=1):id>/files/<path:rest>
//! ^^^^^^^ static          ^^^^^^^ static
//!        ^^^^^^^^^^^^^^^^ converter "int", args "min=1", variable "id"
//! ```
//!
//! Markers without a converter use the `default` converter.

use std::collections::HashSet;
use std::sync::OnceLock;

use pactum_core::{ContractError, ContractResult};
use regex::Regex;
use smallvec::SmallVec;

/// Segments stored inline before spilling to the heap.
const INLINE_SEGMENTS: usize = 8;

/// Converter used for markers that do not name one.
pub const DEFAULT_CONVERTER: &str = "default";

fn rule_regex() -> &'static Regex {
    static RULE: OnceLock<Regex> = OnceLock::new();
    RULE.get_or_init(|| {
        Regex::new(
            r"^(?P<static>[^<]*)<(?:(?P<converter>[a-zA-Z_][a-zA-Z0-9_]*)(?:\((?P<args>.*?)\))?:)?(?P<variable>[a-zA-Z_][a-zA-Z0-9_]*)>",
        )
        .expect("valid regex")
    })
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text.
    Static(String),
    /// A variable marker.
    Variable {
        /// Converter name.
        converter: String,
        /// Raw converter argument text, without the parentheses.
        args: Option<String>,
        /// Variable name.
        name: String,
    },
}

/// A parsed route template.
///
/// # Example
///
/// ```rust
/// use pactum_route::RouteTemplate;
///
/// let template = RouteTemplate::parse("/users/<int:id>/posts/<slug>").unwrap();
/// assert_eq!(template.normalized(), "/users/{id}/posts/{slug}");
/// assert_eq!(template.variables().collect::<Vec<_>>(), vec!["id", "slug"]);
///
/// assert!(RouteTemplate::parse("/a/<x>/<x>").is_err());
/// assert!(RouteTemplate::parse("/a/<x").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTemplate {
    source: String,
    segments: SmallVec<[Segment; INLINE_SEGMENTS]>,
}

impl RouteTemplate {
    /// Parses a template left to right.
    ///
    /// Fails when a variable name is used twice or when text after the last
    /// marker still contains a marker delimiter.
    pub fn parse(template: &str) -> ContractResult<Self> {
        let mut segments = SmallVec::new();
        let mut used = HashSet::new();
        let mut pos = 0;

        while pos < template.len() {
            let Some(caps) = rule_regex().captures(&template[pos..]) else {
                break;
            };

            let literal = &caps["static"];
            if !literal.is_empty() {
                segments.push(Segment::Static(literal.to_string()));
            }

            let name = &caps["variable"];
            if !used.insert(name.to_string()) {
                return Err(ContractError::route_grammar(
                    template,
                    format!("variable name {name:?} used twice"),
                ));
            }

            segments.push(Segment::Variable {
                converter: caps
                    .name("converter")
                    .map_or(DEFAULT_CONVERTER, |m| m.as_str())
                    .to_string(),
                args: caps.name("args").map(|m| m.as_str().to_string()),
                name: name.to_string(),
            });

            pos += caps.get(0).map_or(0, |m| m.end());
        }

        if pos < template.len() {
            let remaining = &template[pos..];
            if remaining.contains('<') || remaining.contains('>') {
                return Err(ContractError::route_grammar(template, "malformed url rule"));
            }
            segments.push(Segment::Static(remaining.to_string()));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    /// Returns the original template text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns variable names in order of appearance.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Variable { name, .. } => Some(name.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Renders the template with `{name}` placeholders.
    #[must_use]
    pub fn normalized(&self) -> String {
        let mut path = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Static(text) => path.push_str(text),
                Segment::Variable { name, .. } => {
                    path.push('{');
                    path.push_str(name);
                    path.push('}');
                }
            }
        }
        path
    }
}
