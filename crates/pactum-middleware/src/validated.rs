//! Per-request validated values.

use pactum_core::{Location, ValidatedValue};

use crate::types::Request;

/// The validated values for one request.
///
/// Inserted into the request's extensions before the handler runs, so each
/// request owns exactly one instance. Locations without a declared model
/// hold nothing.
///
/// # Example
///
/// ```
/// use bytes::Bytes;
/// use http_body_util::Full;
/// use pactum_middleware::{Request, ValidatedRequest};
///
/// #[derive(Debug, PartialEq)]
/// struct Page(u32);
///
/// let mut validated = ValidatedRequest::default();
/// validated.set_query(std::sync::Arc::new(Page(2)));
///
/// let mut request: Request = http::Request::new(Full::new(Bytes::new()));
/// request.extensions_mut().insert(validated);
///
/// let validated = ValidatedRequest::from_request(&request).unwrap();
/// assert_eq!(validated.query::<Page>(), Some(&Page(2)));
/// assert!(validated.body::<Page>().is_none());
/// ```
#[derive(Clone, Default)]
pub struct ValidatedRequest {
    query: Option<ValidatedValue>,
    body: Option<ValidatedValue>,
    headers: Option<ValidatedValue>,
    cookies: Option<ValidatedValue>,
}

impl ValidatedRequest {
    /// Returns the validated values attached to a request, if any.
    #[must_use]
    pub fn from_request(request: &Request) -> Option<&Self> {
        request.extensions().get::<Self>()
    }

    /// Stores the validated value for a location.
    pub fn set(&mut self, location: Location, value: ValidatedValue) {
        *self.slot_mut(location) = Some(value);
    }

    /// Sets the query value.
    pub fn set_query(&mut self, value: ValidatedValue) {
        self.set(Location::Query, value);
    }

    /// Returns the type-erased value for a location.
    #[must_use]
    pub fn get(&self, location: Location) -> Option<&ValidatedValue> {
        match location {
            Location::Query => self.query.as_ref(),
            Location::Body => self.body.as_ref(),
            Location::Headers => self.headers.as_ref(),
            Location::Cookies => self.cookies.as_ref(),
        }
    }

    fn slot_mut(&mut self, location: Location) -> &mut Option<ValidatedValue> {
        match location {
            Location::Query => &mut self.query,
            Location::Body => &mut self.body,
            Location::Headers => &mut self.headers,
            Location::Cookies => &mut self.cookies,
        }
    }

    fn typed<T: 'static>(&self, location: Location) -> Option<&T> {
        self.get(location).and_then(|value| value.downcast_ref::<T>())
    }

    /// The validated query model.
    #[must_use]
    pub fn query<T: 'static>(&self) -> Option<&T> {
        self.typed(Location::Query)
    }

    /// The validated body model.
    #[must_use]
    pub fn body<T: 'static>(&self) -> Option<&T> {
        self.typed(Location::Body)
    }

    /// The validated header model.
    #[must_use]
    pub fn headers<T: 'static>(&self) -> Option<&T> {
        self.typed(Location::Headers)
    }

    /// The validated cookie model.
    #[must_use]
    pub fn cookies<T: 'static>(&self) -> Option<&T> {
        self.typed(Location::Cookies)
    }
}

impl std::fmt::Debug for ValidatedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let present: Vec<&str> = Location::ALL
            .iter()
            .filter(|loc| self.get(**loc).is_some())
            .map(|loc| loc.as_str())
            .collect();
        f.debug_struct("ValidatedRequest")
            .field("locations", &present)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::sync::Arc;

    #[test]
    fn test_wrong_type_is_none() {
        let mut validated = ValidatedRequest::default();
        validated.set(Location::Cookies, Arc::new(json!({"pub": "k1"})));
        assert_eq!(validated.cookies::<Value>(), Some(&json!({"pub": "k1"})));
        assert!(validated.cookies::<String>().is_none());
    }

    #[test]
    fn test_debug_lists_locations() {
        let mut validated = ValidatedRequest::default();
        validated.set(Location::Body, Arc::new(1_u8));
        assert_eq!(format!("{validated:?}"), "ValidatedRequest { locations: [\"body\"] }");
    }
}
