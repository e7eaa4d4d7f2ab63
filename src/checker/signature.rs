//! Member signature checks.
//!
//! Flags non-compliant types in returns, parameters, field/property/event
//! types and generic constraints, plus the vararg and volatile-field rules.
//! Two rules key on an explicit `[CLSCompliant(false)]` rather than on the
//! types a member uses: an explicitly non-compliant member of a compliant
//! interface, and an explicitly non-compliant abstract member.
//!
//! Findings for a delegate's synthesized invoke signature attach to the
//! delegate symbol itself.

use crate::checker::CheckContext;
use crate::diagnostics::{ClsRule, DiagnosticSink};
use crate::symbols::{MemberFlags, SymbolId, SymbolKind};

/// Return/parameter/field/constraint/vararg/volatile validator.
pub(crate) struct SignatureValidator;

impl SignatureValidator {
    /// Runs the type-based signature rules on one member.
    ///
    /// The caller gates on visibility and effective compliance.
    pub(crate) fn check_member(ctx: &CheckContext<'_>, id: SymbolId, sink: &DiagnosticSink) {
        let member = &ctx.graph[id];
        let target = Self::diagnostic_target(ctx, id);

        match member.kind {
            SymbolKind::Method => {
                if let Some(shape) = member.member_data().and_then(|d| d.shape.as_ref()) {
                    if !ctx.is_shape_compliant(shape) {
                        let name = ctx.graph.qualified_name(target);
                        ctx.report_at(
                            sink,
                            ClsRule::BadReturnType,
                            target,
                            ctx.graph[target].span,
                            &[&name],
                        );
                    }
                }
                Self::check_parameters(ctx, id, target, sink);
                if member.flags.contains(MemberFlags::VARARG) {
                    ctx.report_at(sink, ClsRule::NoVarArgs, target, ctx.graph[target].span, &[]);
                }
                Self::check_type_parameters(ctx, id, sink);
            }
            SymbolKind::Constructor => {
                Self::check_parameters(ctx, id, target, sink);
                if member.flags.contains(MemberFlags::VARARG) {
                    ctx.report(sink, ClsRule::NoVarArgs, id, &[]);
                }
            }
            SymbolKind::Field => {
                if let Some(shape) = member.member_data().and_then(|d| d.shape.as_ref()) {
                    if !ctx.is_shape_compliant(shape) {
                        let name = ctx.graph.qualified_name(id);
                        ctx.report(sink, ClsRule::BadFieldPropType, id, &[&name]);
                    }
                }
                if member.flags.contains(MemberFlags::VOLATILE) {
                    let name = ctx.graph.qualified_name(id);
                    ctx.report(sink, ClsRule::VolatileField, id, &[&name]);
                }
            }
            SymbolKind::Property | SymbolKind::Indexer | SymbolKind::Event => {
                if let Some(shape) = member.member_data().and_then(|d| d.shape.as_ref()) {
                    if !ctx.is_shape_compliant(shape) {
                        let name = ctx.graph.qualified_name(id);
                        ctx.report(sink, ClsRule::BadFieldPropType, id, &[&name]);
                    }
                }
                Self::check_parameters(ctx, id, id, sink);
            }
            _ => {}
        }
    }

    /// Flags generic constraints naming non-compliant types, once per type
    /// parameter with at least one offending constraint.
    pub(crate) fn check_type_parameters(
        ctx: &CheckContext<'_>,
        owner: SymbolId,
        sink: &DiagnosticSink,
    ) {
        for child in &ctx.graph[owner].children {
            let symbol = &ctx.graph[*child];
            if symbol.kind != SymbolKind::TypeParameter {
                continue;
            }
            let Some(data) = symbol.type_parameter_data() else {
                continue;
            };
            if let Some(bad) = data
                .constraints
                .iter()
                .find(|constraint| !ctx.is_shape_compliant(constraint))
            {
                let display = bad.display(ctx.graph);
                ctx.report_at(
                    sink,
                    ClsRule::BadTypeVar,
                    *child,
                    symbol.span.or(ctx.graph[owner].span),
                    &[&display],
                );
            }
        }
    }

    /// Runs the rules keyed on an explicit `[CLSCompliant(false)]`: such a
    /// member inside a compliant interface, or such a member being abstract.
    ///
    /// The caller gates: the member is visible and declares `false` while
    /// its container is effectively compliant.
    pub(crate) fn check_declared_non_compliant(
        ctx: &CheckContext<'_>,
        id: SymbolId,
        sink: &DiagnosticSink,
    ) {
        let member = &ctx.graph[id];
        let Some(parent) = member.parent else {
            return;
        };
        let name = ctx.graph.qualified_name(id);
        if ctx.graph[parent].kind == SymbolKind::Interface {
            ctx.report(sink, ClsRule::BadInterfaceMember, id, &[&name]);
        } else if member.flags.contains(MemberFlags::ABSTRACT) && member.kind.is_member() {
            ctx.report(sink, ClsRule::NoAbstractMembers, id, &[&name]);
        }
    }

    /// Reports each parameter whose type is non-compliant, with the rendered
    /// type as the message argument.
    fn check_parameters(
        ctx: &CheckContext<'_>,
        member: SymbolId,
        target: SymbolId,
        sink: &DiagnosticSink,
    ) {
        for child in &ctx.graph[member].children {
            let symbol = &ctx.graph[*child];
            let Some(data) = symbol.parameter_data() else {
                continue;
            };
            if !ctx.is_shape_compliant(&data.shape) {
                let display = data.shape.display(ctx.graph);
                ctx.report_at(
                    sink,
                    ClsRule::BadArgType,
                    *child,
                    symbol.span.or(ctx.graph[target].span),
                    &[&display],
                );
            }
        }
    }

    /// Findings on a delegate's synthesized invoke signature belong to the
    /// delegate symbol.
    fn diagnostic_target(ctx: &CheckContext<'_>, member: SymbolId) -> SymbolId {
        match ctx.graph[member].parent {
            Some(parent) if ctx.graph[parent].kind == SymbolKind::Delegate => parent,
            _ => member,
        }
    }
}
