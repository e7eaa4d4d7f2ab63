//! Assembly vs module declaration consistency.
//!
//! Runs once after a full traversal, from assembly- and module-level
//! attributes only. A module-level `CLSCompliant` declaration is always
//! misplaced; one that disagrees with a present assembly declaration is
//! additionally contradictory (both findings may fire for one module). When
//! the assembly opts in and an *added* module carries no declaration at all,
//! the added module is flagged once.
//!
//! Findings attach to the module attribute's source range when available and
//! to the synthetic no-location position otherwise, so unit-restricted
//! queries never see them.

use crate::checker::CheckContext;
use crate::diagnostics::{ClsRule, DiagnosticSink};

/// Module/assembly consistency validator.
pub(crate) struct ConsistencyValidator;

impl ConsistencyValidator {
    /// Runs the consistency checks over all modules of the assembly.
    pub(crate) fn check(ctx: &CheckContext<'_>, sink: &DiagnosticSink) {
        let assembly_declared = ctx.graph.assembly().declared_compliance();

        for (index, module_id) in ctx.graph.modules().enumerate() {
            let module = &ctx.graph[module_id];
            let module_declared = module.declared_compliance();

            match module_declared {
                Some(value) => {
                    let span = module
                        .attributes
                        .iter()
                        .find(|attr| attr.cls_compliance().is_some())
                        .and_then(|attr| attr.span);
                    ctx.report_at(sink, ClsRule::NotOnModules, module_id, span, &[]);
                    if let Some(assembly_value) = assembly_declared {
                        if assembly_value != value {
                            ctx.report_at(sink, ClsRule::NotOnModules2, module_id, span, &[]);
                        }
                    }
                }
                None => {
                    let added = index > 0;
                    if added && assembly_declared == Some(true) {
                        ctx.report_at(sink, ClsRule::ModuleMissingCls, module_id, None, &[]);
                    }
                }
            }
        }
    }
}
