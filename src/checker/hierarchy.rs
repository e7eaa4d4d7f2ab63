//! Base type and inherited interface compliance.
//!
//! A compliant type must not derive from a non-compliant base, constructed
//! generic bases included. Interfaces additionally must not inherit
//! non-compliant interfaces; classes and structs that merely *implement* a
//! non-compliant interface are exempt, so the interface-list rule runs only
//! on interface symbols.

use crate::checker::CheckContext;
use crate::diagnostics::{ClsRule, DiagnosticSink};
use crate::symbols::{SymbolId, SymbolKind};

/// Base/interface validator.
pub(crate) struct HierarchyValidator;

impl HierarchyValidator {
    /// Checks the base shape and, for interfaces, the inherited interface
    /// list of one type.
    ///
    /// The caller gates on the type being visible and effectively compliant.
    pub(crate) fn check_type(ctx: &CheckContext<'_>, id: SymbolId, sink: &DiagnosticSink) {
        let symbol = &ctx.graph[id];
        let Some(data) = symbol.type_data() else {
            return;
        };

        if let Some(base) = &data.base {
            if !ctx.is_shape_compliant(base) {
                let name = ctx.graph.qualified_name(id);
                let base_name = base.display(ctx.graph);
                ctx.report(sink, ClsRule::BadBase, id, &[&name, &base_name]);
            }
        }

        if symbol.kind == SymbolKind::Interface {
            for inherited in &data.interfaces {
                if !ctx.is_shape_compliant(inherited) {
                    let name = ctx.graph.qualified_name(id);
                    let interface_name = inherited.display(ctx.graph);
                    ctx.report(sink, ClsRule::BadInterface, id, &[&name, &interface_name]);
                }
            }
        }
    }
}
