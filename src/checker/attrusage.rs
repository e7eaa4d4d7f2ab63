//! Attribute-type and attribute-application checks.
//!
//! An externally-visible, compliant attribute type needs at least one
//! accessible constructor restricted to the interop attribute-argument
//! types; a type with no declared constructor has an implicit compliant
//! default. Separately, any attribute application that passes an array value
//! is flagged once per application site, on any target and regardless of the
//! target's visibility.

use crate::checker::CheckContext;
use crate::diagnostics::{ClsRule, DiagnosticSink};
use crate::symbols::{SymbolId, SymbolKind, TypeShape};

/// Attribute constructor-shape and array-argument validator.
pub(crate) struct AttributeUsageValidator;

impl AttributeUsageValidator {
    /// Checks an attribute type's constructor shapes.
    ///
    /// The caller gates on the type being visible, effectively compliant and
    /// marked as an attribute class.
    pub(crate) fn check_attribute_type(
        ctx: &CheckContext<'_>,
        id: SymbolId,
        sink: &DiagnosticSink,
    ) {
        let constructors: Vec<SymbolId> = ctx.graph[id]
            .children
            .iter()
            .copied()
            .filter(|child| ctx.graph[*child].kind == SymbolKind::Constructor)
            .collect();

        // No declared constructor means an implicit, compliant default one.
        if constructors.is_empty() {
            return;
        }

        let usable = constructors.iter().any(|ctor| {
            let symbol = &ctx.graph[*ctor];
            symbol.accessibility.is_externally_visible()
                && !symbol.is_declared_non_compliant()
                && symbol.children.iter().all(|param| {
                    ctx.graph[*param]
                        .parameter_data()
                        .map_or(true, |data| Self::is_attribute_argument_shape(ctx, &data.shape))
                })
        });

        if !usable {
            let name = ctx.graph.qualified_name(id);
            ctx.report(sink, ClsRule::BadAttributeType, id, &[&name]);
        }
    }

    /// Flags applications on `id` that pass an array value, once per
    /// application site.
    ///
    /// The caller gates on the assembly being effectively compliant; the
    /// target symbol's own visibility does not matter.
    pub(crate) fn check_applications(
        ctx: &CheckContext<'_>,
        id: SymbolId,
        sink: &DiagnosticSink,
    ) {
        let symbol = &ctx.graph[id];
        for attr in &symbol.attributes {
            if attr.has_array_argument() {
                ctx.report_at(
                    sink,
                    ClsRule::ArrayArgumentToAttribute,
                    id,
                    attr.span.or(symbol.span),
                    &[],
                );
            }
        }
    }

    /// The interop attribute-argument types: bool, char, the compliant
    /// fixed-width numerics, string, the runtime type handle, and compliant
    /// enums.
    fn is_attribute_argument_shape(ctx: &CheckContext<'_>, shape: &TypeShape) -> bool {
        match shape {
            TypeShape::Special(special) => special.is_attribute_argument_type(),
            TypeShape::Named { definition, args } => {
                args.is_empty()
                    && ctx
                        .graph
                        .get(*definition)
                        .map(|symbol| symbol.kind == SymbolKind::Enum)
                        .unwrap_or(false)
                    && !ctx.compliance.effective(*definition).is_false()
            }
            TypeShape::Unresolved => true,
            _ => false,
        }
    }
}
