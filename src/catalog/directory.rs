//! Catalog tree: directories holding GQL-schemas

use super::path::CatalogPath;
use super::{CatalogError, CatalogResult};
use crate::graph::GraphStore;
use crate::schema::GraphType;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Container for the primary catalog objects: graph types and graphs
#[derive(Debug)]
pub struct GqlSchema {
    name: String,
    path: CatalogPath,
    graph_types: IndexMap<String, Arc<GraphType>>,
    graphs: IndexMap<String, GraphStore>,
}

impl GqlSchema {
    pub fn new(name: impl Into<String>, path: CatalogPath) -> Self {
        GqlSchema {
            name: name.into(),
            path,
            graph_types: IndexMap::new(),
            graphs: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &CatalogPath {
        &self.path
    }

    /// Register a graph type under its own name
    pub fn add_graph_type(&mut self, graph_type: GraphType) -> CatalogResult<Arc<GraphType>> {
        if self.graph_types.contains_key(graph_type.name()) {
            return Err(CatalogError::DuplicateGraphType {
                schema: self.path.to_string(),
                name: graph_type.name().to_string(),
            });
        }
        let graph_type = Arc::new(graph_type);
        info!("Registered graph type {} in {}", graph_type.name(), self.path);
        self.graph_types
            .insert(graph_type.name().to_string(), Arc::clone(&graph_type));
        Ok(graph_type)
    }

    pub fn graph_type(&self, name: &str) -> Option<Arc<GraphType>> {
        self.graph_types.get(name).cloned()
    }

    pub fn graph_types(&self) -> impl Iterator<Item = &Arc<GraphType>> {
        self.graph_types.values()
    }

    pub fn add_graph(&mut self, graph: GraphStore) -> CatalogResult<()> {
        if self.graphs.contains_key(graph.name()) {
            return Err(CatalogError::DuplicateGraph {
                schema: self.path.to_string(),
                name: graph.name().to_string(),
            });
        }
        info!("Added graph {} ({}) to {}", graph.name(), graph.id(), self.path);
        self.graphs.insert(graph.name().to_string(), graph);
        Ok(())
    }

    pub fn graph(&self, name: &str) -> Option<&GraphStore> {
        self.graphs.get(name)
    }

    pub fn graph_mut(&mut self, name: &str) -> Option<&mut GraphStore> {
        self.graphs.get_mut(name)
    }

    pub fn graphs(&self) -> impl Iterator<Item = &GraphStore> {
        self.graphs.values()
    }

    /// Remove a graph, discarding the constraint instances bound to it
    pub fn drop_graph(&mut self, name: &str) -> CatalogResult<GraphStore> {
        let graph = self
            .graphs
            .shift_remove(name)
            .ok_or_else(|| CatalogError::GraphNotFound {
                schema: self.path.to_string(),
                name: name.to_string(),
            })?;
        let released: usize = self.graph_types.values().map(|t| t.release_graph(graph.id())).sum();
        info!("Dropped graph {} from {} ({} bound constraint(s) released)", name, self.path, released);
        Ok(graph)
    }
}

/// Catalog directory
#[derive(Debug)]
pub struct Directory {
    path: CatalogPath,
    children: BTreeMap<String, Directory>,
    schemas: BTreeMap<String, GqlSchema>,
}

impl Directory {
    fn new(path: CatalogPath) -> Self {
        Directory {
            path,
            children: BTreeMap::new(),
            schemas: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.path.name()
    }

    pub fn path(&self) -> &CatalogPath {
        &self.path
    }

    pub fn child(&self, name: &str) -> Option<&Directory> {
        self.children.get(name)
    }

    pub fn children(&self) -> impl Iterator<Item = &Directory> {
        self.children.values()
    }

    pub fn schema(&self, name: &str) -> Option<&GqlSchema> {
        self.schemas.get(name)
    }

    pub fn schemas(&self) -> impl Iterator<Item = &GqlSchema> {
        self.schemas.values()
    }
}

/// Root catalog with hierarchical structure
#[derive(Debug)]
pub struct Catalog {
    location: String,
    root: Directory,
    current: CatalogPath,
}

impl Catalog {
    /// Empty catalog stored at `location` (e.g. `file:.`)
    pub fn new(location: impl Into<String>) -> Self {
        Catalog {
            location: location.into(),
            root: Directory::new(CatalogPath::root()),
            current: CatalogPath::root(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn root(&self) -> &Directory {
        &self.root
    }

    /// Base for relative paths
    pub fn current_path(&self) -> &CatalogPath {
        &self.current
    }

    pub fn set_current_path(&mut self, path: &str) -> CatalogResult<()> {
        let path = self.current.resolve(path)?;
        if self.lookup(&path).is_none() {
            return Err(CatalogError::DirectoryNotFound(path.to_string()));
        }
        self.current = path;
        Ok(())
    }

    /// Create a directory and any missing parents. Existing directories are returned as is.
    pub fn create_directory(&mut self, path: &str) -> CatalogResult<&mut Directory> {
        let path = self.current.resolve(path)?;
        let mut dir = &mut self.root;
        for segment in path.segments() {
            let child_path = dir.path.child(segment);
            dir = dir.children.entry(segment.clone()).or_insert_with(|| {
                info!("Created catalog directory {}", child_path);
                Directory::new(child_path)
            });
        }
        Ok(dir)
    }

    /// Create a GQL-schema in the directory at `path`, creating the directory if needed
    pub fn create_gql_schema(&mut self, path: &str, name: &str) -> CatalogResult<&mut GqlSchema> {
        let dir = self.create_directory(path)?;
        let schema_path = dir.path.child(name);
        Ok(dir.schemas.entry(name.to_string()).or_insert_with(|| {
            info!("Created GQL-schema {}", schema_path);
            GqlSchema::new(name, schema_path)
        }))
    }

    pub fn directory(&self, path: &str) -> CatalogResult<&Directory> {
        let path = self.current.resolve(path)?;
        self.lookup(&path)
            .ok_or_else(|| CatalogError::DirectoryNotFound(path.to_string()))
    }

    pub fn schema(&self, path: &str, name: &str) -> CatalogResult<&GqlSchema> {
        let dir = self.directory(path)?;
        dir.schema(name).ok_or_else(|| CatalogError::SchemaNotFound {
            path: dir.path().to_string(),
            name: name.to_string(),
        })
    }

    pub fn schema_mut(&mut self, path: &str, name: &str) -> CatalogResult<&mut GqlSchema> {
        let resolved = self.current.resolve(path)?;
        let mut dir = &mut self.root;
        for segment in resolved.segments() {
            dir = dir
                .children
                .get_mut(segment)
                .ok_or_else(|| CatalogError::DirectoryNotFound(resolved.to_string()))?;
        }
        dir.schemas
            .get_mut(name)
            .ok_or_else(|| CatalogError::SchemaNotFound {
                path: resolved.to_string(),
                name: name.to_string(),
            })
    }

    fn lookup(&self, path: &CatalogPath) -> Option<&Directory> {
        path.segments()
            .iter()
            .try_fold(&self.root, |dir, segment| dir.children.get(segment))
    }
}
