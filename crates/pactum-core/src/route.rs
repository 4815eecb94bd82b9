//! Route table types consumed from the host framework.
//!
//! The engine never routes requests itself. It reads the host's route table to
//! build the interface document, and marks handlers it binds with an
//! [`EngineId`] so that several engines can share one table.

use std::collections::HashMap;
use std::fmt;

use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Identifies one engine instance.
///
/// Uses UUID v7, so ids also sort by creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineId(Uuid);

impl EngineId {
    /// Creates a fresh engine id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EngineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a parameter is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Path segment.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
}

/// A single documented operation parameter.
///
/// Serializes directly as an OpenAPI parameter object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the parameter must be present.
    pub required: bool,
    /// Structural schema.
    pub schema: Value,
    /// Description, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterSpec {
    /// Creates a required path parameter.
    pub fn path(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            location: ParameterLocation::Path,
            required: true,
            schema,
            description: None,
        }
    }
}

/// Declared output type of a host-defined path converter.
#[derive(Debug, Clone, PartialEq)]
pub enum ConverterType {
    /// The converter produces one of a fixed set of values.
    Enumeration(Vec<Value>),
    /// Anything else.
    Opaque,
}

/// One route in the host's route table.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// Path template, e.g. `/users/<int(min=1):id>`.
    pub template: String,
    /// Methods the route accepts.
    pub methods: Vec<Method>,
    /// Endpoint name; for bound handlers this is the binding name.
    pub endpoint: String,
    /// Engine that bound the handler, if any.
    pub owner: Option<EngineId>,
    /// Handler documentation text.
    pub doc: Option<String>,
}

impl RouteEntry {
    /// Creates an un-owned route.
    pub fn new(template: impl Into<String>, methods: Vec<Method>, endpoint: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            methods,
            endpoint: endpoint.into(),
            owner: None,
            doc: None,
        }
    }

    /// Marks the route as bound by an engine.
    #[must_use]
    pub fn owned_by(mut self, owner: EngineId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Attaches handler documentation.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// An enumerable route table provided by the host.
pub trait RouteTable: Send + Sync {
    /// Returns the routes in registration order.
    fn routes(&self) -> Vec<RouteEntry>;

    /// Looks up the declared output type of a custom converter.
    ///
    /// Returns `None` for converters the host does not know.
    fn custom_converter(&self, _name: &str) -> Option<ConverterType> {
        None
    }
}

/// A route table held in memory.
///
/// # Example
///
/// ```
/// use http::Method;
/// use pactum_core::{RouteEntry, RouteTable, StaticRouteTable};
///
/// let table = StaticRouteTable::new()
///     .route(RouteEntry::new("/ping", vec![Method::GET], "ping"));
/// assert_eq!(table.routes().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticRouteTable {
    routes: Vec<RouteEntry>,
    converters: HashMap<String, ConverterType>,
}

impl StaticRouteTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route.
    #[must_use]
    pub fn route(mut self, entry: RouteEntry) -> Self {
        self.routes.push(entry);
        self
    }

    /// Registers a custom converter.
    #[must_use]
    pub fn converter(mut self, name: impl Into<String>, output: ConverterType) -> Self {
        self.converters.insert(name.into(), output);
        self
    }
}

impl RouteTable for StaticRouteTable {
    fn routes(&self) -> Vec<RouteEntry> {
        self.routes.clone()
    }

    fn custom_converter(&self, name: &str) -> Option<ConverterType> {
        self.converters.get(name).cloned()
    }
}
