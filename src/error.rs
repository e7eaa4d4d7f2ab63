use thiserror::Error;

use crate::symbols::SymbolId;

macro_rules! graph_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Graph {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Graph {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The compliance pass itself is total: findings are reported as warnings through the
/// [`crate::DiagnosticSink`] and never surface here. `Error` covers misuse of the graph
/// construction API, where a malformed symbol tree must be rejected before a pass can run.
///
/// # Examples
///
/// ```rust
/// use clscope::{Error, symbols::{GraphBuilder, TypeBuilder}};
///
/// let mut graph = GraphBuilder::new("demo");
/// match TypeBuilder::class("C").build(&mut graph) {
///     Ok(id) => println!("created {id}"),
///     Err(Error::Graph { message, file, line }) => {
///         eprintln!("invalid graph: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The symbol tree under construction is inconsistent.
    ///
    /// This error occurs when the builder API is asked to produce a graph that
    /// violates containment rules, such as attaching a member to a non-container
    /// symbol or declaring a delegate without an invoke signature. The error
    /// includes the source location where the inconsistency was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of the inconsistency
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Graph - {file}:{line}: {message}")]
    Graph {
        /// The message to be printed for the Graph error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// Failed to find symbol in `SymbolGraph`.
    ///
    /// This error occurs when looking up a symbol by id that does not exist in
    /// the finished graph, typically because the id was produced by a different
    /// builder instance.
    ///
    /// The associated [`SymbolId`] identifies which symbol was not found.
    #[error("Failed to find symbol in SymbolGraph - {0}")]
    SymbolNotFound(SymbolId),

    /// Generic error for miscellaneous failures.
    ///
    /// Used for errors that don't fit into other categories.
    #[error("{0}")]
    Error(String),
}
