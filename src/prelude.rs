//! # clscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! from the clscope library. Import this module to get quick access to the
//! essential types for running a compliance pass.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for graph-construction operations
pub use crate::Error;

/// The result type used throughout clscope
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The compliance pass and its configuration
pub use crate::checker::{CancellationToken, CheckerConfig, ClsChecker, ComplianceState, PassOutcome};

// ================================================================================================
// Diagnostics
// ================================================================================================

/// Rule catalog, findings and the thread-safe sink
pub use crate::diagnostics::{ClsDiagnostic, ClsRule, DiagnosticSink};

// ================================================================================================
// Symbol Graph
// ================================================================================================

/// Graph storage and identity
pub use crate::symbols::{SymbolGraph, SymbolId};

/// Symbol model essentials
pub use crate::symbols::{
    Accessibility, AccessorKind, MemberFlags, RefKind, SourceSpan, Symbol, SymbolKind,
};

/// Type shapes
pub use crate::symbols::{SpecialType, TypeShape};

/// Attributes
pub use crate::symbols::{AttributeClass, AttributeSpec, AttributeTarget, AttributeValue};

/// Fluent graph construction
pub use crate::symbols::{
    FieldBuilder, GraphBuilder, MethodBuilder, ParamSpec, PropertyBuilder, TypeBuilder,
};
