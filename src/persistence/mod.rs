//! Persistence layer for the graph store
//!
//! Stores a graph as an XML document:
//!
//! ```xml
//! <Graph Version="1.0.0">
//!   <Node Id="...">
//!     <Label>Person</Label>
//!     <Property Name="Name">Bob</Property>
//!   </Node>
//!   <Relation Id="..." Type="test" LeftNode="..." RightNode="...">
//!     <Property Name="since">2020</Property>
//!   </Relation>
//! </Graph>
//! ```
//!
//! Loading is two-phase: every node is registered first, then each relation
//! resolves its endpoint identifiers against the loaded nodes. An endpoint
//! that matches zero or several nodes aborts the load.

mod reader;
mod writer;

use crate::graph::{
    EntityId, GraphError, GraphStore, Node, NodeIndex, Relation,
};
use crate::traversal::{QueryError, Traversal};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Version written to and expected on the root element
pub const FORMAT_VERSION: &str = "1.0.0";

pub(crate) const ELEM_GRAPH: &str = "Graph";
pub(crate) const ELEM_NODE: &str = "Node";
pub(crate) const ELEM_RELATION: &str = "Relation";
pub(crate) const ELEM_LABEL: &str = "Label";
pub(crate) const ELEM_PROPERTY: &str = "Property";
pub(crate) const ATTR_VERSION: &str = "Version";
pub(crate) const ATTR_ID: &str = "Id";
pub(crate) const ATTR_TYPE: &str = "Type";
pub(crate) const ATTR_LEFT_NODE: &str = "LeftNode";
pub(crate) const ATTR_RIGHT_NODE: &str = "RightNode";
pub(crate) const ATTR_NAME: &str = "Name";

/// Codec errors
#[derive(Error, Debug)]
pub enum CodecError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed markup
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("Document has no root element")]
    MissingRoot,

    #[error("Unexpected root element <{0}>, expected <Graph>")]
    UnexpectedRoot(String),

    #[error("Document ended inside <{0}>")]
    UnexpectedEof(&'static str),

    #[error("Unsupported format version {0}")]
    UnsupportedVersion(String),

    #[error("<{element}> is missing required attribute {attribute}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("Invalid identifier {value:?}: {source}")]
    InvalidId {
        value: String,
        source: uuid::Error,
    },

    #[error("Duplicate property {0}")]
    DuplicateProperty(String),

    /// A relation endpoint did not resolve to exactly one node
    #[error("Relation {relation} references node {node}: {source}")]
    UnresolvedReference {
        relation: EntityId,
        node: EntityId,
        source: QueryError,
    },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Indentation used when writing documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    Tab,
    Space,
    None,
}

impl IndentStyle {
    fn as_byte(self) -> Option<u8> {
        match self {
            IndentStyle::Tab => Some(b'\t'),
            IndentStyle::Space => Some(b' '),
            IndentStyle::None => None,
        }
    }
}

/// Writer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub indent: IndentStyle,
    /// Indent characters per nesting level
    pub indent_width: usize,
    /// Emit `<?xml version="1.0" encoding="utf-8"?>`
    pub xml_declaration: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            indent: IndentStyle::Tab,
            indent_width: 1,
            xml_declaration: true,
        }
    }
}

/// Converts graph stores to and from XML documents
#[derive(Debug, Clone, Default)]
pub struct XmlCodec {
    config: CodecConfig,
}

impl XmlCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Serialize a store into a document string
    pub fn serialize(&self, store: &GraphStore) -> CodecResult<String> {
        let bytes = writer::write_document(store, Vec::new(), &self.config)?;
        String::from_utf8(bytes).map_err(|e| CodecError::Malformed(e.to_string()))
    }

    /// Serialize a store into any writer
    pub fn write<W: Write>(&self, store: &GraphStore, out: W) -> CodecResult<()> {
        let mut out = writer::write_document(store, out, &self.config)?;
        out.flush()?;
        Ok(())
    }

    /// Build a new store from a document string
    pub fn deserialize(&self, input: &str) -> CodecResult<GraphStore> {
        let document = reader::parse_document(input)?;
        check_version(&document.version)?;

        let mut store = GraphStore::new();

        // Phase 1: nodes
        for record in document.nodes {
            store.add_node(Node::new_with_properties(record.id, record.properties, record.labels));
        }

        // Phase 2: relations, resolved against the complete node set
        for record in document.relations {
            let source = resolve(&store, record.id, record.source)?;
            let target = resolve(&store, record.id, record.target)?;
            store.add_relationship(Relation::new_with_properties(
                record.id,
                record.relation_type,
                record.properties,
                source,
                target,
            ))?;
        }

        Ok(store)
    }

    /// Build a new store from any reader
    pub fn read<R: Read>(&self, mut input: R) -> CodecResult<GraphStore> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        self.deserialize(&text)
    }

    /// Write a store to a file, replacing any existing content
    pub fn save(&self, store: &GraphStore, path: impl AsRef<Path>) -> CodecResult<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write(store, BufWriter::new(file))?;
        info!(
            path = %path.display(),
            nodes = store.node_count(),
            relations = store.relation_count(),
            "graph saved"
        );
        Ok(())
    }

    /// Load a store from a file
    pub fn load(&self, path: impl AsRef<Path>) -> CodecResult<GraphStore> {
        let path = path.as_ref();
        let store = self.read(File::open(path)?)?;
        info!(
            path = %path.display(),
            nodes = store.node_count(),
            relations = store.relation_count(),
            "graph loaded"
        );
        Ok(store)
    }
}

fn check_version(version: &str) -> CodecResult<()> {
    match version.split('.').next() {
        Some("1") => Ok(()),
        _ => Err(CodecError::UnsupportedVersion(version.to_string())),
    }
}

fn resolve(store: &GraphStore, relation: EntityId, node: EntityId) -> CodecResult<NodeIndex> {
    store
        .all_nodes()
        .has_id(node)
        .single()
        .map(|found| found.index())
        .map_err(|source| CodecError::UnresolvedReference {
            relation,
            node,
            source,
        })
}

impl GraphStore {
    /// Serialize with the default codec configuration
    pub fn to_xml_string(&self) -> CodecResult<String> {
        XmlCodec::default().serialize(self)
    }

    pub fn from_xml_str(input: &str) -> CodecResult<GraphStore> {
        XmlCodec::default().deserialize(input)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> CodecResult<()> {
        XmlCodec::default().save(self, path)
    }

    pub fn load(path: impl AsRef<Path>) -> CodecResult<GraphStore> {
        XmlCodec::default().load(path)
    }
}
