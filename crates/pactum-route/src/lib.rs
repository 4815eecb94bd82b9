//! Route template introspection for Pactum.
//!
//! This crate turns the host's path templates into document paths and
//! parameter definitions, without matching any requests itself.
//!
//! # Features
//!
//! - **Template Grammar**: Static runs and `<converter(args):name>` markers
//! - **Converter Schemas**: Built-in converters map to structural schemas
//! - **Custom Converters**: Enumerated converter outputs become enum schemas
//! - **Doc Splitting**: Handler docs split into summary and description
//!
//! # Example
//!
//! ```rust
//! use pactum_route::parse_path;
//!
//! let parsed = parse_path("/users/<int:id>/posts/<any(draft, live):state>", &|_| None).unwrap();
//! assert_eq!(parsed.path, "/users/{id}/posts/{state}");
//! assert_eq!(parsed.parameters.len(), 2);
//! ```

mod args;
mod converter;
mod doc;
mod introspect;
mod template;

pub use args::ConverterArgs;
pub use converter::converter_schema;
pub use doc::{operation_id, parse_doc, DocText};
pub use introspect::{parse_path, ParsedPath};
pub use template::{RouteTemplate, Segment, DEFAULT_CONVERTER};
