//! The compliance pass.
//!
//! This module hosts the checker components, one per rule family, and the
//! driver that orchestrates them over a [`crate::symbols::SymbolGraph`].
//!
//! # Architecture
//!
//! The driver visits the symbol tree top-down (namespaces → types → members →
//! parameters/accessors), resolving each symbol's effective compliance state
//! before running any other component on it, then applies the per-kind
//! checks and appends findings to the externally-owned sink:
//!
//! 1. **Compliance resolution** - inherited tri-state state with per-symbol
//!    overrides, plus the attribute-placement diagnostics
//! 2. **Type classification** - recursive compliant/non-compliant
//!    classification of type shapes
//! 3. **Identifiers** - spelling and case-insensitive collision checks
//! 4. **Signatures** - return/parameter/field/constraint/vararg/volatile
//!    checks
//! 5. **Overloads** - cross-hierarchy overload-shape collisions
//! 6. **Hierarchy** - base type and inherited interface compliance
//! 7. **Attribute usage** - attribute constructor shapes and array-valued
//!    arguments
//! 8. **Consistency** - assembly vs module declarations, once per full pass
//!
//! # Key Components
//!
//! - [`ClsChecker`] - The pass entry points
//! - [`CheckerConfig`] - Component toggles and the parallelism switch
//! - [`CancellationToken`] - Cooperative cancellation between top-level
//!   symbols
//! - [`ComplianceState`] - The public tri-state compliance value
//!
//! # Thread Safety
//!
//! The pass only reads the graph. Shared mutable state is limited to the
//! publish-once memo caches and the append-only sink, so disjoint subtrees
//! of the graph are analyzed on separate worker threads without locks.

mod attrusage;
mod classify;
mod compliance;
mod config;
mod consistency;
mod context;
mod driver;
mod hierarchy;
mod identifier;
mod overload;
mod signature;

pub use compliance::ComplianceState;
pub use config::CheckerConfig;
pub use driver::{CancellationToken, ClsChecker, PassOutcome};

pub(crate) use attrusage::AttributeUsageValidator;
pub(crate) use classify::TypeClassifier;
pub(crate) use compliance::{check_attribute_placement, ComplianceResolver, Placement};
pub(crate) use consistency::ConsistencyValidator;
pub(crate) use context::CheckContext;
pub(crate) use hierarchy::HierarchyValidator;
pub(crate) use identifier::IdentifierValidator;
pub(crate) use overload::OverloadValidator;
pub(crate) use signature::SignatureValidator;
