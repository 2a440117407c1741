use crate::loc::SourceLocation;
use crate::resolver::ResolverError;
use crate::value::JsonValue;
use std::sync::Arc;

/// Message surfaced for resolver failures that carry no message of their
/// own.
pub(crate) const GENERIC_ERROR_MESSAGE: &str = "Server encountered an error.";

/// A single segment of a response path: either a response key or a list
/// index.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}
impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Field(key.to_string())
    }
}
impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// The location of a value within the response `data` tree.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct ResponsePath(Vec<PathSegment>);
impl ResponsePath {
    pub fn root() -> Self {
        Self(vec![])
    }

    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        self.0.as_slice()
    }
}
impl<T: Into<PathSegment>> FromIterator<T> for ResponsePath {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// An error surfaced to the client in the response's `errors` list.
///
/// See: https://spec.graphql.org/October2021/#sec-Errors
#[derive(Clone, Debug, serde::Serialize, thiserror::Error)]
#[error("{message}")]
pub struct GraphQLError {
    pub message: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<SourceLocation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<ResponsePath>,

    #[serde(skip)]
    pub original_error: Option<Arc<dyn std::error::Error + Send + Sync>>,
}
impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: None,
            original_error: None,
        }
    }

    pub fn with_locations(
        mut self,
        locations: impl IntoIterator<Item = SourceLocation>,
    ) -> Self {
        self.locations = locations.into_iter().collect();
        self
    }

    pub fn with_original_error(
        mut self,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        self.original_error = Some(Arc::new(err));
        self
    }

    pub fn with_path(mut self, path: ResponsePath) -> Self {
        self.path = Some(path);
        self
    }

    /// Unpacks a (possibly aggregate) resolver failure into one located error
    /// per inner failure.
    pub(crate) fn from_resolver_error(
        err: ResolverError,
        locations: &[SourceLocation],
        path: &ResponsePath,
    ) -> Vec<Self> {
        match err {
            ResolverError::Multiple(errs) =>
                errs.into_iter()
                    .flat_map(|err| Self::from_resolver_error(err, locations, path))
                    .collect(),

            err => {
                let message = err.to_string();
                let message =
                    if message.trim().is_empty() {
                        GENERIC_ERROR_MESSAGE.to_string()
                    } else {
                        message
                    };
                vec![
                    Self::new(message)
                        .with_locations(locations.iter().copied())
                        .with_path(path.clone())
                        .with_original_error(err),
                ]
            },
        }
    }
}
impl std::cmp::PartialEq for GraphQLError {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
            && self.locations == other.locations
            && self.path == other.path
    }
}

/// Converts each [GraphQLError] into the user-facing JSON object placed in the
/// response's `errors` list.
pub type ErrorCoercer = Arc<dyn Fn(&GraphQLError) -> JsonValue + Send + Sync>;

/// Produces `{message, locations?, path?}`.
pub fn default_error_coercer() -> ErrorCoercer {
    Arc::new(|err: &GraphQLError| {
        serde_json::to_value(err)
            .unwrap_or_else(|_| serde_json::json!({ "message": err.message }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_coercer_omits_empty_locations_and_path() {
        let coercer = default_error_coercer();
        assert_eq!(coercer(&GraphQLError::new("boom")), json!({"message": "boom"}));
    }

    #[test]
    fn default_coercer_renders_locations_and_mixed_path() {
        let coercer = default_error_coercer();
        let err = GraphQLError::new("boom")
            .with_locations([SourceLocation { line: 2, column: 5 }])
            .with_path(ResponsePath::root().child("items").child(1usize).child("name"));
        assert_eq!(coercer(&err), json!({
            "message": "boom",
            "locations": [{"line": 2, "column": 5}],
            "path": ["items", 1, "name"],
        }));
    }

    #[test]
    fn aggregate_resolver_errors_are_unpacked() {
        let path = ResponsePath::root().child("f");
        let locations = [SourceLocation { line: 1, column: 3 }];
        let errors = GraphQLError::from_resolver_error(
            ResolverError::Multiple(vec![
                ResolverError::message("first"),
                ResolverError::message(""),
            ]),
            &locations,
            &path,
        );
        assert_eq!(
            errors.iter().map(|e| e.message.as_str()).collect::<Vec<_>>(),
            vec!["first", GENERIC_ERROR_MESSAGE],
        );
        assert!(errors.iter().all(|e| e.path.as_ref() == Some(&path)));
        assert!(errors.iter().all(|e| e.locations == locations));
    }
}
