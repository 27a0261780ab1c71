//! Sessions
//!
//! A session ties a profile and language level to a catalog. Graph types
//! using LEX extensions are only accepted when the configuration enables
//! LEX.

pub mod config;

pub use config::{
    ConfigError, ConfigResult, LanguageLevel, LexCompatibility, ProfileConfiguration, SessionConfiguration,
};

use crate::catalog::{Catalog, CatalogError};
use crate::constraint::{ConstraintKind, GraphValidator, Violations};
use crate::graph::GraphStore;
use crate::schema::{GraphType, SchemaError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Graph type {graph_type} requires LEX: {reason}")]
    LexUnavailable { graph_type: String, reason: String },
}

pub type SessionResult<T> = Result<T, SessionError>;

pub struct Session {
    config: SessionConfiguration,
    catalog: Catalog,
}

impl Session {
    /// Open a session on an empty catalog rooted at `config.catalog_root`
    pub fn new(config: SessionConfiguration) -> SessionResult<Self> {
        let mut catalog = Catalog::new(config.catalog_root.clone());
        if let Some(path) = config.default_catalog_path.as_deref() {
            catalog.create_directory(path)?;
            catalog.set_current_path(path)?;
        }
        info!(
            "Opened session with profile {} ({:?}, LEX {:?}) on {}",
            config.profile.name,
            config.language_level,
            config.profile.lex_compatibility,
            catalog.location()
        );
        Ok(Session { config, catalog })
    }

    pub fn config(&self) -> &SessionConfiguration {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    /// Store a graph type in the schema `name` under `path`, creating both if needed
    pub fn register_graph_type(
        &mut self,
        path: &str,
        schema: &str,
        graph_type: GraphType,
    ) -> SessionResult<Arc<GraphType>> {
        self.check_language(&graph_type)?;
        let schema = self.catalog.create_gql_schema(path, schema)?;
        Ok(schema.add_graph_type(graph_type)?)
    }

    /// Create an empty graph of the named graph type
    pub fn create_graph(
        &mut self,
        path: &str,
        schema: &str,
        graph_type_name: &str,
        graph_name: &str,
    ) -> SessionResult<&mut GraphStore> {
        let schema = self.catalog.schema_mut(path, schema)?;
        if schema.graph_type(graph_type_name).is_none() {
            return Err(CatalogError::GraphTypeNotFound {
                schema: schema.path().to_string(),
                name: graph_type_name.to_string(),
            }
            .into());
        }

        schema.add_graph(GraphStore::new(graph_name).for_graph_type(graph_type_name))?;
        let schema_path = schema.path().to_string();
        schema.graph_mut(graph_name).ok_or_else(|| {
            CatalogError::GraphNotFound {
                schema: schema_path,
                name: graph_name.to_string(),
            }
            .into()
        })
    }

    /// Validate a stored graph against the graph type it was created for
    pub fn validate_graph(&self, path: &str, schema: &str, graph_name: &str) -> SessionResult<Violations> {
        let schema = self.catalog.schema(path, schema)?;
        let graph = schema.graph(graph_name).ok_or_else(|| CatalogError::GraphNotFound {
            schema: schema.path().to_string(),
            name: graph_name.to_string(),
        })?;

        let type_name = graph.graph_type_name().unwrap_or_default();
        let graph_type = schema
            .graph_type(type_name)
            .ok_or_else(|| CatalogError::GraphTypeNotFound {
                schema: schema.path().to_string(),
                name: type_name.to_string(),
            })?;

        Ok(GraphValidator::new(&graph_type).validate_graph(graph))
    }

    /// Remove a graph from its schema; its bound constraints are released
    pub fn drop_graph(&mut self, path: &str, schema: &str, graph_name: &str) -> SessionResult<GraphStore> {
        let graph = self.catalog.schema_mut(path, schema)?.drop_graph(graph_name)?;
        Ok(graph)
    }

    fn check_language(&self, graph_type: &GraphType) -> SessionResult<()> {
        if !graph_type.uses_lex_extensions() {
            return Ok(());
        }

        let reason = if !self.config.lex_enabled() {
            Some("the session does not enable LEX")
        } else if self.config.profile.lex_compatibility == LexCompatibility::Limited
            && graph_type
                .constraints()
                .iter()
                .any(|c| matches!(c.spec.kind(), ConstraintKind::Cardinality(_)))
        {
            Some("cardinality constraints are not supported by a limited LEX profile")
        } else {
            None
        };

        match reason {
            Some(reason) => {
                warn!("Rejected graph type {}: {}", graph_type.name(), reason);
                Err(SessionError::LexUnavailable {
                    graph_type: graph_type.name().to_string(),
                    reason: reason.to_string(),
                })
            }
            None => Ok(()),
        }
    }
}
