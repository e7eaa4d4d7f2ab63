//! Shared execution context for the checker components.
//!
//! A [`CheckContext`] bundles what every component needs: the graph under
//! analysis, the pass configuration, the compliance resolver and the type
//! classifier. Contexts are created per pass and shared by reference across
//! worker threads; all contained state is read-only or publish-once.

use crate::checker::{CheckerConfig, ComplianceResolver, TypeClassifier};
use crate::diagnostics::{ClsDiagnostic, ClsRule, DiagnosticSink};
use crate::symbols::{SourceSpan, SymbolGraph, SymbolId, TypeShape};

/// Read-only state shared by every checker component during one pass.
pub(crate) struct CheckContext<'g> {
    /// The graph under analysis.
    pub graph: &'g SymbolGraph,
    /// Pass configuration.
    pub config: CheckerConfig,
    /// Memoized effective-compliance resolution.
    pub compliance: ComplianceResolver<'g>,
    /// Memoized type-shape classification.
    pub classifier: TypeClassifier<'g>,
}

impl<'g> CheckContext<'g> {
    pub(crate) fn new(graph: &'g SymbolGraph, config: CheckerConfig) -> Self {
        Self {
            graph,
            config,
            compliance: ComplianceResolver::new(graph),
            classifier: TypeClassifier::new(graph),
        }
    }

    /// Whether the substantive rule families apply to `id`: the symbol must
    /// be observable from outside the assembly and effectively compliant.
    pub(crate) fn is_checkable(&self, id: SymbolId) -> bool {
        self.compliance.effective(id).is_true() && self.graph.is_visible_outside_assembly(id)
    }

    /// Whether `shape` classifies as compliant.
    pub(crate) fn is_shape_compliant(&self, shape: &TypeShape) -> bool {
        self.classifier.is_compliant(&self.compliance, shape)
    }

    /// Reports `rule` against `symbol` at the symbol's own source range.
    pub(crate) fn report(
        &self,
        sink: &DiagnosticSink,
        rule: ClsRule,
        symbol: SymbolId,
        args: &[&str],
    ) {
        self.report_at(sink, rule, symbol, self.graph[symbol].span, args);
    }

    /// Reports `rule` against `symbol` at an explicit source range (or the
    /// synthetic no-location position when `span` is `None`).
    pub(crate) fn report_at(
        &self,
        sink: &DiagnosticSink,
        rule: ClsRule,
        symbol: SymbolId,
        span: Option<SourceSpan>,
        args: &[&str],
    ) {
        sink.push(ClsDiagnostic {
            rule,
            symbol,
            message: rule.message(args),
            span,
            decl_index: self.graph[symbol].decl_index,
        });
    }
}
