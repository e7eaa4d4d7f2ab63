//! Pass orchestration.
//!
//! The driver owns the traversal: it resolves compliance state and the
//! placement diagnostics for every symbol it visits, gates the substantive
//! components on visibility and effective compliance, fans top-level types
//! out across worker threads, and runs the assembly/module consistency
//! checks once at the end of a full pass.
//!
//! # Control Flow
//!
//! 1. Attribute applications on the assembly and its modules (array-argument
//!    rule, full passes only)
//! 2. Namespaces, sequentially: spelling and case-collision checks over each
//!    namespace's types and child namespaces
//! 3. Top-level types, optionally in parallel: placement ladder, then the
//!    per-type and per-member components, recursing into nested types
//! 4. Assembly/module consistency, full passes only
//!
//! # Cancellation
//!
//! Cancellation is cooperative and checked between top-level symbols, never
//! mid-symbol: a cancelled run contributes no further findings and reports
//! [`PassOutcome::Cancelled`]. There are no retry semantics; re-running from
//! scratch is always safe because the pass is deterministic and read-only.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::checker::{
    check_attribute_placement, AttributeUsageValidator, CheckContext, CheckerConfig,
    ComplianceState, ConsistencyValidator, HierarchyValidator, IdentifierValidator, Placement,
    SignatureValidator, OverloadValidator,
};
use crate::diagnostics::DiagnosticSink;
use crate::symbols::{SymbolGraph, SymbolId, SymbolKind};

/// Result of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// The pass visited every selected symbol.
    Completed,
    /// The pass was abandoned cooperatively; the sink holds only findings
    /// for symbols that were fully visited.
    Cancelled,
}

/// Cooperative cancellation signal.
///
/// Cloning shares the signal. The driver polls it between top-level symbols
/// only, so a symbol's findings are always complete or absent.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// The compliance pass.
///
/// A checker borrows the graph for its lifetime; the memo caches it builds
/// are valid for exactly that graph. Running the same checker (or a fresh
/// one) over the same graph yields a set-identical, order-stable finding
/// list.
///
/// # Example
///
/// ```rust
/// use clscope::prelude::*;
///
/// let mut graph = GraphBuilder::new("app");
/// graph.assembly_compliance(true);
/// TypeBuilder::class("_Widget").build(&mut graph)?;
/// let graph = graph.finish();
///
/// let sink = DiagnosticSink::new();
/// let outcome = ClsChecker::new(&graph, CheckerConfig::default()).check(&sink);
/// assert_eq!(outcome, PassOutcome::Completed);
/// assert_eq!(sink.len(), 1);
/// # Ok::<(), clscope::Error>(())
/// ```
pub struct ClsChecker<'g> {
    ctx: CheckContext<'g>,
}

impl<'g> ClsChecker<'g> {
    /// Creates a checker over `graph` with the given configuration.
    #[must_use]
    pub fn new(graph: &'g SymbolGraph, config: CheckerConfig) -> Self {
        Self {
            ctx: CheckContext::new(graph, config),
        }
    }

    /// The resolved tri-state compliance of a symbol.
    ///
    /// Memoized and race-tolerant; repeated queries never recompute into a
    /// different value.
    #[must_use]
    pub fn effective_compliance(&self, id: SymbolId) -> ComplianceState {
        self.ctx.compliance.state(id)
    }

    /// Runs the full pass into `sink`.
    pub fn check(&self, sink: &DiagnosticSink) -> PassOutcome {
        self.run(sink, None, None)
    }

    /// Runs the full pass with cooperative cancellation.
    pub fn check_cancellable(
        &self,
        sink: &DiagnosticSink,
        token: &CancellationToken,
    ) -> PassOutcome {
        self.run(sink, Some(token), None)
    }

    /// Runs the pass restricted to findings located in one source unit.
    ///
    /// The assembly-level checks are skipped: they are attributed to the
    /// synthetic no-location position and belong to full passes only.
    pub fn check_source_unit(&self, sink: &DiagnosticSink, unit: u32) -> PassOutcome {
        let scratch = DiagnosticSink::new();
        let outcome = self.run(&scratch, None, Some(unit));
        for diagnostic in scratch.into_sorted() {
            if diagnostic.span.map_or(false, |span| span.unit == unit) {
                sink.push(diagnostic);
            }
        }
        outcome
    }

    fn run(
        &self,
        sink: &DiagnosticSink,
        token: Option<&CancellationToken>,
        unit: Option<u32>,
    ) -> PassOutcome {
        let ctx = &self.ctx;
        let graph = ctx.graph;
        let full = unit.is_none();
        let assembly_compliant = ctx
            .compliance
            .effective(SymbolGraph::ASSEMBLY)
            .is_true();

        if full && assembly_compliant && ctx.config.check_attribute_usage {
            AttributeUsageValidator::check_applications(ctx, SymbolGraph::ASSEMBLY, sink);
            for module in graph.modules() {
                AttributeUsageValidator::check_applications(ctx, module, sink);
            }
        }

        let (namespaces, top_types) = self.collect_roots();

        let cancelled = || token.map_or(false, CancellationToken::is_cancelled);

        for namespace in &namespaces {
            if cancelled() {
                return PassOutcome::Cancelled;
            }
            self.visit_namespace(*namespace, sink);
        }

        let selected: Vec<SymbolId> = top_types
            .into_iter()
            .filter(|id| {
                unit.map_or(true, |u| {
                    graph[*id].span.map_or(false, |span| span.unit == u)
                })
            })
            .collect();

        if ctx.config.parallel {
            selected.par_iter().for_each(|id| {
                if !cancelled() {
                    self.visit_type(*id, sink);
                }
            });
        } else {
            for id in selected {
                if cancelled() {
                    return PassOutcome::Cancelled;
                }
                self.visit_type(id, sink);
            }
        }
        if cancelled() {
            return PassOutcome::Cancelled;
        }

        if full && ctx.config.check_consistency {
            ConsistencyValidator::check(ctx, sink);
        }

        PassOutcome::Completed
    }

    /// Namespaces in preorder and the types declared directly in them.
    fn collect_roots(&self) -> (Vec<SymbolId>, Vec<SymbolId>) {
        let graph = self.ctx.graph;
        let mut namespaces = Vec::new();
        let mut top_types = Vec::new();

        for module in graph.modules() {
            let mut stack: Vec<SymbolId> = graph[module]
                .children
                .iter()
                .rev()
                .copied()
                .filter(|child| graph[*child].kind == SymbolKind::Namespace)
                .collect();

            while let Some(namespace) = stack.pop() {
                namespaces.push(namespace);
                let mut nested = Vec::new();
                for child in &graph[namespace].children {
                    let kind = graph[*child].kind;
                    if kind == SymbolKind::Namespace {
                        nested.push(*child);
                    } else if kind.is_type() {
                        top_types.push(*child);
                    }
                }
                nested.reverse();
                stack.extend(nested);
            }
        }

        (namespaces, top_types)
    }

    fn visit_namespace(&self, id: SymbolId, sink: &DiagnosticSink) {
        let ctx = &self.ctx;
        if !ctx.config.check_identifiers {
            return;
        }
        if !ctx.compliance.effective(id).is_true() {
            return;
        }
        IdentifierValidator::check_name(ctx, id, sink);
        IdentifierValidator::check_member_distinctness(ctx, id, sink);
    }

    fn visit_type(&self, id: SymbolId, sink: &DiagnosticSink) {
        let ctx = &self.ctx;
        let graph = ctx.graph;

        let placement = check_attribute_placement(ctx, id, sink);

        let assembly_compliant = ctx
            .compliance
            .effective(SymbolGraph::ASSEMBLY)
            .is_true();
        if assembly_compliant && ctx.config.check_attribute_usage {
            AttributeUsageValidator::check_applications(ctx, id, sink);
        }

        if placement == Placement::SkipChildren {
            return;
        }

        if ctx.is_checkable(id) {
            if ctx.config.check_identifiers {
                IdentifierValidator::check_name(ctx, id, sink);
                IdentifierValidator::check_member_distinctness(ctx, id, sink);
            }
            if ctx.config.check_signatures {
                SignatureValidator::check_type_parameters(ctx, id, sink);
            }
            if ctx.config.check_hierarchy {
                HierarchyValidator::check_type(ctx, id, sink);
            }
            if ctx.config.check_overloads {
                OverloadValidator::check_container(ctx, id, sink);
            }
            if ctx.config.check_attribute_usage
                && graph[id]
                    .type_data()
                    .map_or(false, |data| data.is_attribute_type)
            {
                AttributeUsageValidator::check_attribute_type(ctx, id, sink);
            }
        }

        for child in &graph[id].children {
            let kind = graph[*child].kind;
            if kind.is_type() {
                self.visit_type(*child, sink);
            } else if kind.is_member() {
                self.visit_member(*child, sink);
            }
        }
    }

    fn visit_member(&self, id: SymbolId, sink: &DiagnosticSink) {
        let ctx = &self.ctx;
        let graph = ctx.graph;

        let placement = check_attribute_placement(ctx, id, sink);

        let assembly_compliant = ctx
            .compliance
            .effective(SymbolGraph::ASSEMBLY)
            .is_true();
        if assembly_compliant && ctx.config.check_attribute_usage {
            AttributeUsageValidator::check_applications(ctx, id, sink);
            for child in &graph[id].children {
                AttributeUsageValidator::check_applications(ctx, *child, sink);
            }
        }

        if placement == Placement::SkipChildren {
            return;
        }

        for child in &graph[id].children {
            if graph[*child].kind == SymbolKind::Parameter {
                check_attribute_placement(ctx, *child, sink);
            }
        }

        if ctx.is_checkable(id) {
            if ctx.config.check_identifiers {
                IdentifierValidator::check_name(ctx, id, sink);
            }
            if ctx.config.check_signatures {
                SignatureValidator::check_member(ctx, id, sink);
            }
        } else if ctx.config.check_signatures {
            let member = &graph[id];
            let container_compliant = member
                .parent
                .map_or(false, |parent| ctx.compliance.effective(parent).is_true());
            if member.is_declared_non_compliant()
                && container_compliant
                && graph.is_visible_outside_assembly(id)
            {
                SignatureValidator::check_declared_non_compliant(ctx, id, sink);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{GraphBuilder, TypeBuilder};

    #[test]
    fn test_clean_compliant_assembly_has_no_findings() {
        let mut gb = GraphBuilder::new("clean");
        gb.assembly_compliance(true);
        TypeBuilder::class("C")
            .method("M", |m| m.compliant(true))
            .build(&mut gb)
            .unwrap();
        let graph = gb.finish();

        let sink = DiagnosticSink::new();
        let outcome = ClsChecker::new(&graph, CheckerConfig::sequential()).check(&sink);
        assert_eq!(outcome, PassOutcome::Completed);
        assert!(sink.is_empty(), "{:?}", sink.sorted());
    }

    #[test]
    fn test_pre_cancelled_token_reports_nothing() {
        let mut gb = GraphBuilder::new("cancel");
        gb.assembly_compliance(true);
        TypeBuilder::class("_Bad").build(&mut gb).unwrap();
        let graph = gb.finish();

        let token = CancellationToken::new();
        token.cancel();
        let sink = DiagnosticSink::new();
        let checker = ClsChecker::new(&graph, CheckerConfig::sequential());
        let outcome = checker.check_cancellable(&sink, &token);
        assert_eq!(outcome, PassOutcome::Cancelled);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_effective_compliance_projection() {
        let mut gb = GraphBuilder::new("proj");
        gb.assembly_compliance(true);
        let c = TypeBuilder::class("C").build(&mut gb).unwrap();
        let bad = TypeBuilder::class("Bad").compliant(false).build(&mut gb).unwrap();
        let graph = gb.finish();

        let checker = ClsChecker::new(&graph, CheckerConfig::default());
        assert_eq!(
            checker.effective_compliance(c),
            ComplianceState::CompliantTrue
        );
        assert_eq!(
            checker.effective_compliance(bad),
            ComplianceState::CompliantFalse
        );
    }
}
