//! Reader/Writer traits and format dispatch
//!
//! Readers turn a graph description file into a [`Graph`] seeded with its
//! initial layout. Writers persist a finished layout.

use std::path::Path;

use thiserror::Error;

use crate::edge_list_reader::EdgeListReader;
use crate::graph::{Graph, GraphError};
use crate::json_io::{JsonReader, JsonWriter};
use crate::svg_writer::SvgWriter;

/// Errors that can occur during reading or writing
#[derive(Error, Debug)]
pub enum IoError {
    /// The file format is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The file extension could not be determined
    #[error("could not determine file format from path: {0}")]
    UnknownExtension(String),

    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parsing error occurred
    #[error("parse error: {0}")]
    Parse(String),

    /// The description parsed but does not form a valid graph
    #[error("invalid graph: {0}")]
    Graph(#[from] GraphError),

    /// A rendering/writing error occurred
    #[error("write error: {0}")]
    Write(String),
}

/// Result type for reader/writer operations
pub type IoResult<T> = Result<T, IoError>;

/// A reader parses a graph description into a [`Graph`]
pub trait Reader {
    /// Parse the input file into a graph
    fn read(&self, input: &Path) -> IoResult<Graph>;

    /// File extensions this reader can handle (e.g., ["txt", "graph"])
    fn supported_extensions(&self) -> &[&str];

    /// Check if this reader can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// A writer outputs a laid-out graph to a specific format
pub trait Writer {
    /// Write the graph to the output path
    fn write(&self, graph: &Graph, output: &Path) -> IoResult<()>;

    /// Identifier for this output format (e.g., "svg", "json")
    fn format_id(&self) -> &str;
}

/// Registry of available readers and writers
pub struct FormatRegistry {
    readers: Vec<Box<dyn Reader>>,
    writers: Vec<Box<dyn Writer>>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
            writers: Vec::new(),
        }
    }

    /// Create a registry with all default readers and writers registered
    ///
    /// Currently registers:
    /// - Readers: `EdgeListReader` (txt, graph, edges), `JsonReader` (json)
    /// - Writers: `SvgWriter` (svg), `JsonWriter` (json)
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_reader(Box::new(EdgeListReader::new()));
        registry.register_reader(Box::new(JsonReader::new()));
        registry.register_writer(Box::new(SvgWriter::new()));
        registry.register_writer(Box::new(JsonWriter::new()));
        registry
    }

    /// Register a reader
    pub fn register_reader(&mut self, reader: Box<dyn Reader>) {
        self.readers.push(reader);
    }

    /// Register a writer
    pub fn register_writer(&mut self, writer: Box<dyn Writer>) {
        self.writers.push(writer);
    }

    /// Find a reader for the given file extension
    pub fn reader_for_extension(&self, ext: &str) -> Option<&dyn Reader> {
        self.readers
            .iter()
            .find(|r| r.supports_extension(ext))
            .map(|r| r.as_ref())
    }

    /// Find a writer by format ID
    pub fn writer_for_format(&self, format_id: &str) -> Option<&dyn Writer> {
        self.writers
            .iter()
            .find(|w| w.format_id().eq_ignore_ascii_case(format_id))
            .map(|w| w.as_ref())
    }

    /// Get file extension from a path
    pub fn extension_from_path(path: &Path) -> Option<&str> {
        path.extension().and_then(|e| e.to_str())
    }

    /// Find a reader for the given path based on its extension
    ///
    /// Files without an extension are read as edge lists, the format the
    /// sample graphs ship in.
    pub fn reader_for_path(&self, path: &Path) -> IoResult<&dyn Reader> {
        let ext = Self::extension_from_path(path).unwrap_or(EdgeListReader::DEFAULT_EXTENSION);

        self.reader_for_extension(ext)
            .ok_or_else(|| IoError::UnsupportedFormat(ext.to_string()))
    }

    /// Find a writer for the given output path based on its extension
    pub fn writer_for_path(&self, path: &Path) -> IoResult<&dyn Writer> {
        let ext = Self::extension_from_path(path)
            .ok_or_else(|| IoError::UnknownExtension(path.display().to_string()))?;

        self.writer_for_format(ext)
            .ok_or_else(|| IoError::UnsupportedFormat(ext.to_string()))
    }

    /// Read a graph, picking the reader from the path's extension
    pub fn read(&self, path: &Path) -> IoResult<Graph> {
        self.reader_for_path(path)?.read(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    // Mock reader for testing
    struct MockReader {
        extensions: Vec<&'static str>,
    }

    impl Reader for MockReader {
        fn read(&self, _input: &Path) -> IoResult<Graph> {
            Ok(Graph::new(2, vec![])?)
        }

        fn supported_extensions(&self) -> &[&str] {
            &self.extensions
        }
    }

    // Mock writer for testing
    struct MockWriter {
        format: &'static str,
    }

    impl Writer for MockWriter {
        fn write(&self, _graph: &Graph, _output: &Path) -> IoResult<()> {
            Ok(())
        }

        fn format_id(&self) -> &str {
            self.format
        }
    }

    #[test]
    fn reader_supports_extension_case_insensitive() {
        let reader = MockReader {
            extensions: vec!["txt", "graph"],
        };
        assert!(reader.supports_extension("txt"));
        assert!(reader.supports_extension("TXT"));
        assert!(reader.supports_extension("graph"));
        assert!(!reader.supports_extension("dot"));
    }

    #[test]
    fn registry_finds_writer_by_format() {
        let mut registry = FormatRegistry::new();
        registry.register_writer(Box::new(MockWriter { format: "svg" }));

        assert!(registry.writer_for_format("svg").is_some());
        assert!(registry.writer_for_format("SVG").is_some()); // case insensitive
        assert!(registry.writer_for_format("png").is_none());
    }

    #[test]
    fn registry_reader_for_path_extracts_extension() {
        let mut registry = FormatRegistry::new();
        registry.register_reader(Box::new(MockReader {
            extensions: vec!["txt"],
        }));

        let path = PathBuf::from("/some/path/graph.txt");
        assert!(registry.reader_for_path(&path).is_ok());

        let unknown_path = PathBuf::from("/some/path/graph.dot");
        assert!(matches!(
            registry.reader_for_path(&unknown_path),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn extensionless_input_reads_as_edge_list() {
        let registry = FormatRegistry::with_defaults();

        let reader = registry
            .reader_for_path(Path::new("samples/3grid"))
            .expect("Should fall back to edge list");
        assert!(reader.supports_extension("txt"));
    }

    #[test]
    fn writer_for_path_requires_extension() {
        let registry = FormatRegistry::with_defaults();

        assert!(registry.writer_for_path(Path::new("layout.svg")).is_ok());
        assert!(matches!(
            registry.writer_for_path(Path::new("layout")),
            Err(IoError::UnknownExtension(_))
        ));
        assert!(matches!(
            registry.writer_for_path(Path::new("layout.png")),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn io_error_display() {
        let err = IoError::UnsupportedFormat("dot".to_string());
        assert_eq!(err.to_string(), "unsupported format: dot");

        let err = IoError::Parse("line 2: expected two node indices".to_string());
        assert_eq!(err.to_string(), "parse error: line 2: expected two node indices");

        let err = IoError::from(GraphError::DegenerateGeometry {
            first: 0,
            second: 1,
        });
        assert_eq!(err.to_string(), "invalid graph: nodes 0 and 1 are coincident");
    }

    #[test]
    fn mock_reader_returns_graph() {
        let reader = MockReader {
            extensions: vec!["txt"],
        };
        let graph = reader.read(Path::new("test.txt")).unwrap();
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn with_defaults_registers_readers() {
        let registry = FormatRegistry::with_defaults();

        assert!(registry.reader_for_extension("txt").is_some());
        assert!(registry.reader_for_extension("graph").is_some());
        assert!(registry.reader_for_extension("json").is_some());
        assert!(registry.reader_for_extension("yaml").is_none());
    }

    #[test]
    fn with_defaults_registers_writers() {
        let registry = FormatRegistry::with_defaults();

        assert!(registry.writer_for_format("svg").is_some());
        assert!(registry.writer_for_format("JSON").is_some());
        assert!(registry.writer_for_format("html").is_none());
    }

    #[test]
    fn with_defaults_reads_fixture() {
        let registry = FormatRegistry::with_defaults();
        let graph = registry
            .read(Path::new("tests/fixtures/triangle.txt"))
            .expect("Should parse triangle fixture");

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }
}
