//! File I/O around the query core: loading parsed documents, resolving input
//! paths and writing rendered output.

pub mod reader;
pub mod resolver;
pub mod writer;

pub use reader::{DocumentReader, ReaderConfig};
pub use resolver::{FileResolver, ResolverConfig};
pub use writer::{OutputFormat, OutputTarget, OutputWriter, WriterConfig};
