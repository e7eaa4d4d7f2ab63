//! The immutable symbol graph consumed by the compliance pass.
//!
//! This module contains the data model the checker operates on: an arena of
//! symbol nodes addressed by stable integer ids, the recursive type-shape
//! description used for compliance classification, declared attributes with
//! already-resolved constant arguments, and the fluent builders a front end
//! uses to assemble a graph.
//!
//! # Key Components
//!
//! - [`SymbolGraph`] - Arena of [`Symbol`] nodes, immutable once built
//! - [`SymbolId`] - Stable index of a node within its graph
//! - [`TypeShape`] - Closed tagged variant describing a type reference
//! - [`AttributeSpec`] - A declared attribute with resolved constant arguments
//! - [`GraphBuilder`] / [`TypeBuilder`] - Fluent construction API
//!
//! # Examples
//!
//! ```rust
//! use clscope::symbols::{GraphBuilder, TypeBuilder, TypeShape, SpecialType};
//!
//! let mut graph = GraphBuilder::new("app");
//! graph.assembly_compliance(true);
//!
//! TypeBuilder::class("Customer")
//!     .public()
//!     .namespace("App.Models")
//!     .field("Name", TypeShape::Special(SpecialType::String))
//!     .method("Clear", |m| m.public())
//!     .build(&mut graph)?;
//!
//! let graph = graph.finish();
//! assert!(graph.len() > 3);
//! # Ok::<(), clscope::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! A finished [`SymbolGraph`] is fully immutable and therefore [`Send`] and
//! [`Sync`]; the checker shares one reference across all worker threads.

mod accessibility;
mod attributes;
mod builder;
mod graph;
mod symbol;
mod typeshape;

pub use accessibility::Accessibility;
pub use attributes::{AttributeClass, AttributeSpec, AttributeTarget, AttributeValue};
pub use builder::{FieldBuilder, GraphBuilder, MethodBuilder, ParamSpec, PropertyBuilder, TypeBuilder};
pub use graph::{SymbolGraph, SymbolId};
pub use symbol::{
    AccessorData, AccessorKind, MemberData, MemberFlags, ParameterData, RefKind, SourceSpan,
    Symbol, SymbolData, SymbolKind, TypeData, TypeParameterData,
};
pub use typeshape::{SpecialType, TypeShape};
