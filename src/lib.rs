// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # clscope
//!
//! A diagnostic pass that walks a fully-bound .NET-style symbol graph and reports
//! Common Language Specification (CLS) interop violations as non-fatal warnings.
//! `clscope` consumes an already-resolved symbol tree (assembly → modules →
//! namespaces → types → members → parameters) and appends findings to a
//! thread-safe diagnostic sink; it never mutates the graph, never rejects a
//! program, and never needs to re-run after emission.
//!
//! ## Features
//!
//! - **Inherited compliance resolution** - Tri-state `CLSCompliant` state flows
//!   from the assembly down through modules, namespaces, types and members, with
//!   per-symbol overrides and a race-tolerant memo
//! - **Recursive type classification** - Arrays of arrays, multi-rank arrays,
//!   pointers and constructed generic instantiations are classified for
//!   compliance as closed tagged variants
//! - **Cross-hierarchy overload analysis** - Overload groups span base types and
//!   declared interfaces to surface ref/out-only, rank-only and unnamed-array
//!   collisions
//! - **Deterministic output** - Diagnostics sort stably by source position and
//!   declaration order regardless of thread scheduling
//! - **Embarrassingly parallel** - Top-level types fan out across worker threads
//!   with cooperative cancellation between symbols
//!
//! ## Quick Start
//!
//! Add `clscope` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! clscope = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust
//! use clscope::prelude::*;
//!
//! let mut graph = GraphBuilder::new("app");
//! graph.assembly_compliance(true);
//! TypeBuilder::class("Widget")
//!     .public()
//!     .method("Render", |m| m.public())
//!     .build(&mut graph)?;
//!
//! let graph = graph.finish();
//! let sink = DiagnosticSink::new();
//! ClsChecker::new(&graph, CheckerConfig::default()).check(&sink);
//!
//! for diagnostic in sink.into_sorted() {
//!     println!("{diagnostic}");
//! }
//! # Ok::<(), clscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `clscope` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`symbols`] - The immutable symbol graph, type shapes and fluent builders
//! - [`checker`] - The compliance pass itself, one component per rule family
//! - [`diagnostics`] - The rule catalog and the lock-free diagnostic sink
//! - [`Error`] and [`Result`] - Error handling for graph construction
//!
//! ### The Symbol Graph
//!
//! [`symbols::SymbolGraph`] is an arena of symbol nodes addressed by stable
//! integer ids. Each node stores a parent index, so deep container chains are
//! walked iteratively rather than through recursive virtual dispatch. The graph
//! is immutable once built; a front end constructs it through
//! [`symbols::GraphBuilder`] and hands it to the checker.
//!
//! ### The Pass
//!
//! [`checker::ClsChecker`] resolves each symbol's effective compliance state
//! before running any other component on it, then applies the identifier,
//! signature, overload, hierarchy and attribute-usage checks as applicable to
//! the symbol's kind. Assembly/module consistency runs once at the end of a
//! full pass. All findings are warnings: the pass is a pure, one-shot, read-only
//! analysis of a stable snapshot.
//!
//! ## Thread Safety
//!
//! Top-level types are mutually independent once compliance state is resolved,
//! so the driver distributes disjoint subtrees across worker threads. Shared
//! state is limited to publish-once memo caches and the append-only sink;
//! recomputing a memo entry on a race is harmless, torn writes are impossible.

#[macro_use]
mod error;

pub mod checker;
pub mod diagnostics;
pub mod prelude;
pub mod symbols;

pub use crate::checker::{CancellationToken, CheckerConfig, ClsChecker, PassOutcome};
pub use crate::diagnostics::{ClsDiagnostic, ClsRule, DiagnosticSink};
pub use crate::error::Error;

/// Specialized `Result` type for graph-construction operations.
pub type Result<T> = std::result::Result<T, Error>;
