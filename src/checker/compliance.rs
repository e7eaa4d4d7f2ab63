//! Compliance attribute resolution.
//!
//! Computes, per symbol, the inherited tri-state compliance value, and
//! reports the attribute-placement diagnostics that depend only on where a
//! `CLSCompliant` declaration sits (unmarked assembly, invisible symbol,
//! `true` inside an explicit `false`, parameter/return targets).
//!
//! # Architecture
//!
//! Effective compliance is a walk up the parent index chain: a symbol's own
//! declaration wins, otherwise the container's effective state is inherited,
//! and an unmarked assembly resolves to unspecified. The walk is iterative
//! over arena indices (no recursion, no lock) and memoizes every index it
//! touches. The memo is a publish-once [`dashmap::DashMap`]: racing threads
//! may recompute the same value, which is harmless because the computation
//! is deterministic; torn writes are impossible.
//!
//! Module-level declarations deliberately do not participate in inheritance;
//! they are the subject of the consistency checks in
//! [`crate::checker::ConsistencyValidator`] instead.

use dashmap::DashMap;

use crate::checker::CheckContext;
use crate::diagnostics::{ClsRule, DiagnosticSink};
use crate::symbols::{AttributeTarget, SymbolGraph, SymbolId, SymbolKind};

/// The public tri-state compliance value of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplianceState {
    /// Neither the symbol nor any container declares compliance.
    Unspecified,
    /// The symbol is compliant, by declaration or inheritance.
    CompliantTrue,
    /// The symbol is non-compliant, by declaration or inheritance.
    CompliantFalse,
}

/// Internal five-valued compliance resolution.
///
/// Several rules distinguish a symbol's *own* declaration from an inherited
/// value, so the resolver keeps the distinction and projects onto
/// [`ComplianceState`] at the public boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EffectiveCompliance {
    /// The symbol declares `CLSCompliant(true)`.
    DeclaredTrue,
    /// The symbol declares `CLSCompliant(false)`.
    DeclaredFalse,
    /// A container's `true` flows down to the symbol.
    InheritedTrue,
    /// A container's `false` flows down to the symbol.
    InheritedFalse,
    /// No declaration anywhere on the container chain.
    Unspecified,
}

impl EffectiveCompliance {
    /// True when the resolved state is compliant.
    pub(crate) fn is_true(self) -> bool {
        matches!(
            self,
            EffectiveCompliance::DeclaredTrue | EffectiveCompliance::InheritedTrue
        )
    }

    /// True when the resolved state is non-compliant.
    pub(crate) fn is_false(self) -> bool {
        matches!(
            self,
            EffectiveCompliance::DeclaredFalse | EffectiveCompliance::InheritedFalse
        )
    }

    /// The value a child inherits from this state.
    pub(crate) fn as_inherited(self) -> Self {
        match self {
            EffectiveCompliance::DeclaredTrue | EffectiveCompliance::InheritedTrue => {
                EffectiveCompliance::InheritedTrue
            }
            EffectiveCompliance::DeclaredFalse | EffectiveCompliance::InheritedFalse => {
                EffectiveCompliance::InheritedFalse
            }
            EffectiveCompliance::Unspecified => EffectiveCompliance::Unspecified,
        }
    }

    /// Projection onto the public tri-state.
    pub(crate) fn state(self) -> ComplianceState {
        match self {
            EffectiveCompliance::DeclaredTrue | EffectiveCompliance::InheritedTrue => {
                ComplianceState::CompliantTrue
            }
            EffectiveCompliance::DeclaredFalse | EffectiveCompliance::InheritedFalse => {
                ComplianceState::CompliantFalse
            }
            EffectiveCompliance::Unspecified => ComplianceState::Unspecified,
        }
    }
}

/// Memoized effective-compliance resolution over one graph.
///
/// # Thread Safety
///
/// `effective` is idempotent and race-tolerant: concurrent queries for the
/// same symbol may both compute the value, and both publish the same result.
pub(crate) struct ComplianceResolver<'g> {
    graph: &'g SymbolGraph,
    memo: DashMap<SymbolId, EffectiveCompliance>,
}

impl<'g> ComplianceResolver<'g> {
    pub(crate) fn new(graph: &'g SymbolGraph) -> Self {
        Self {
            graph,
            memo: DashMap::new(),
        }
    }

    /// Resolves the effective compliance of `id`.
    ///
    /// Walks the parent chain with an explicit cursor, stopping at the first
    /// symbol with its own declaration or a memoized value, then publishes
    /// the result for every index on the walked path.
    pub(crate) fn effective(&self, id: SymbolId) -> EffectiveCompliance {
        if let Some(hit) = self.memo.get(&id) {
            return *hit;
        }

        let mut path = Vec::new();
        let mut cursor = Some(id);
        let mut inherited = EffectiveCompliance::Unspecified;

        while let Some(current) = cursor {
            if let Some(hit) = self.memo.get(&current) {
                inherited = hit.as_inherited();
                break;
            }
            let symbol = &self.graph[current];
            // Module-level declarations belong to the consistency checks,
            // not to inheritance.
            if symbol.kind != SymbolKind::Module {
                if let Some(value) = symbol.declared_compliance() {
                    let declared = if value {
                        EffectiveCompliance::DeclaredTrue
                    } else {
                        EffectiveCompliance::DeclaredFalse
                    };
                    self.memo.insert(current, declared);
                    inherited = declared.as_inherited();
                    break;
                }
            }
            path.push(current);
            cursor = symbol.parent;
        }

        for walked in path {
            self.memo.insert(walked, inherited);
        }

        self.memo.get(&id).map_or(inherited, |hit| *hit)
    }

    /// Public projection of [`ComplianceResolver::effective`].
    pub(crate) fn state(&self, id: SymbolId) -> ComplianceState {
        self.effective(id).state()
    }
}

/// Traversal directive produced by the placement check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    /// Keep visiting the symbol and its children.
    Continue,
    /// The symbol's children are exempt from compliance checking.
    SkipChildren,
}

/// Reports the attribute-placement diagnostics for one symbol.
///
/// The ladder evaluates once per symbol that declares `CLSCompliant`, first
/// match wins: an unmarked assembly trumps everything, then invisibility,
/// then `true` under an explicit `false`. Parameter and return targets are
/// meaningless independently of the ladder.
pub(crate) fn check_attribute_placement(
    ctx: &CheckContext<'_>,
    id: SymbolId,
    sink: &DiagnosticSink,
) -> Placement {
    let symbol = &ctx.graph[id];

    for attr in &symbol.attributes {
        if attr.cls_compliance().is_none() {
            continue;
        }
        match attr.target {
            AttributeTarget::Parameter => {
                ctx.report(sink, ClsRule::MeaninglessOnParam, id, &[]);
            }
            AttributeTarget::Return => {
                ctx.report(sink, ClsRule::MeaninglessOnReturn, id, &[]);
            }
            _ => {}
        }
    }

    if symbol.kind == SymbolKind::Parameter {
        // A default-targeted declaration on a parameter symbol is the same
        // mistake as an explicit `param:` target.
        if symbol.declared_compliance().is_some() {
            ctx.report(sink, ClsRule::MeaninglessOnParam, id, &[]);
        }
        return Placement::Continue;
    }

    if matches!(symbol.kind, SymbolKind::Assembly | SymbolKind::Module) {
        return Placement::Continue;
    }

    let Some(declared) = symbol.declared_compliance() else {
        return Placement::Continue;
    };

    let assembly_marked = ctx.graph.assembly().declared_compliance().is_some();
    if !assembly_marked {
        let rule = if declared {
            ClsRule::AssemblyNotCls
        } else {
            ClsRule::AssemblyNotCls2
        };
        let name = ctx.graph.qualified_name(id);
        ctx.report(sink, rule, id, &[&name]);
        return Placement::Continue;
    }

    if !ctx.graph.is_visible_outside_assembly(id) {
        let name = ctx.graph.qualified_name(id);
        ctx.report(sink, ClsRule::MeaninglessOnPrivateType, id, &[&name]);
        return Placement::SkipChildren;
    }

    if declared {
        // `true` directly under an explicit `false` is contradictory; a
        // `false` inherited from the assembly stays silent.
        for ancestor in ctx.graph.ancestors(id) {
            let container = &ctx.graph[ancestor];
            if container.kind == SymbolKind::Module {
                continue;
            }
            if let Some(value) = container.declared_compliance() {
                if !value && container.kind.is_type() {
                    let name = ctx.graph.qualified_name(id);
                    let container_name = ctx.graph.qualified_name(ancestor);
                    ctx.report(
                        sink,
                        ClsRule::IllegalTrueInFalse,
                        id,
                        &[&name, &container_name],
                    );
                }
                break;
            }
        }
    }

    Placement::Continue
}
