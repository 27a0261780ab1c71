//! Catalog paths
//!
//! Two spellings are accepted: plain absolute paths (`/production/customer_data`)
//! and IRIs (`gql://example.org/production/customer_data`). Both reduce to the
//! same segment list; an IRI keeps its scheme and authority as a base.

use super::CatalogError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CatalogPath {
    segments: Vec<String>,
    base_iri: Option<String>,
}

impl CatalogPath {
    /// The catalog root, `/`
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse an absolute path or IRI. A path without a leading `/` is taken
    /// relative to the root.
    pub fn parse(path: &str) -> Result<Self, CatalogError> {
        Self::root().resolve(path)
    }

    /// Resolve `path` against `self`. Absolute paths and IRIs ignore the base.
    pub fn resolve(&self, path: &str) -> Result<Self, CatalogError> {
        let (base_iri, rest, absolute) = match split_iri(path) {
            Some((base, rest)) => (Some(base.to_string()), rest, true),
            None => (self.base_iri.clone(), path, path.starts_with('/')),
        };

        let mut segments = if absolute { Vec::new() } else { self.segments.clone() };
        for segment in rest.split('/').filter(|s| !s.is_empty()) {
            if segment == "." || segment == ".." {
                return Err(CatalogError::InvalidPath(path.to_string()));
            }
            segments.push(segment.to_string());
        }

        Ok(CatalogPath { segments, base_iri })
    }

    /// Path of the child `name` under this path
    pub fn child(&self, name: &str) -> Self {
        let mut child = self.clone();
        child.segments.push(name.to_string());
        child
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_iri(&self) -> bool {
        self.base_iri.is_some()
    }

    pub fn base_iri(&self) -> Option<&str> {
        self.base_iri.as_deref()
    }

    /// Last segment, or `/` for the root
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("/")
    }

    /// The path without its base IRI, e.g. `/production/customer_data`
    pub fn to_path_string(&self) -> String {
        if self.segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", self.segments.join("/"))
        }
    }
}

impl fmt::Display for CatalogPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.base_iri {
            Some(base) => write!(f, "{}{}", base, self.to_path_string()),
            None => f.write_str(&self.to_path_string()),
        }
    }
}

/// Split `scheme:[//authority]` from the path component. Returns `None`
/// for strings that are not IRIs.
fn split_iri(s: &str) -> Option<(&str, &str)> {
    let colon = s.find(':')?;
    let scheme = &s[..colon];
    let valid_scheme = scheme
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return None;
    }

    let after_scheme = &s[colon + 1..];
    let base_len = match after_scheme.strip_prefix("//") {
        Some(authority) => colon + 3 + authority.find('/').unwrap_or(authority.len()),
        None => colon + 1,
    };
    Some((&s[..base_len], &s[base_len..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_paths() {
        let path = CatalogPath::parse("/production/customer_data").unwrap();
        assert_eq!(path.segments(), ["production", "customer_data"]);
        assert_eq!(path.name(), "customer_data");
        assert_eq!(path.to_string(), "/production/customer_data");
        assert!(!path.is_iri());

        assert_eq!(CatalogPath::parse("//production///").unwrap().segments(), ["production"]);
        assert!(CatalogPath::parse("/").unwrap().is_root());
        assert_eq!(CatalogPath::root().name(), "/");
    }

    #[test]
    fn test_iri_paths() {
        let path = CatalogPath::parse("gql://example.org/production/customer_data").unwrap();
        assert_eq!(path.base_iri(), Some("gql://example.org"));
        assert_eq!(path.to_path_string(), "/production/customer_data");
        assert_eq!(path.to_string(), "gql://example.org/production/customer_data");

        let urn = CatalogPath::parse("urn:production/hr").unwrap();
        assert_eq!(urn.base_iri(), Some("urn:"));
        assert_eq!(urn.segments(), ["production", "hr"]);
    }

    #[test]
    fn test_relative_resolution() {
        let base = CatalogPath::parse("/production").unwrap();
        assert_eq!(base.resolve("customer_data").unwrap().to_string(), "/production/customer_data");
        assert_eq!(base.resolve("/staging").unwrap().to_string(), "/staging");
        assert_eq!(base.child("hr").to_string(), "/production/hr");
    }

    #[test]
    fn test_dot_segments_rejected() {
        assert_eq!(
            CatalogPath::parse("/production/../secrets"),
            Err(CatalogError::InvalidPath("/production/../secrets".into()))
        );
        assert!(CatalogPath::parse("./a").is_err());
    }
}
