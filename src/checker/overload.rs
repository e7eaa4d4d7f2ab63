//! Overload-shape collision checks.
//!
//! Builds one overload group per simple name, spanning the container's own
//! members, its base chain and its directly-declared interfaces, and flags
//! pairs whose normalized parameter shapes are too close to distinguish
//! under the interop rules: identical except for by-reference passing,
//! except for the outermost array rank, or except for structure inside an
//! array of arrays.
//!
//! # Pair classification
//!
//! Per parameter slot, the two shapes are compared structurally:
//!
//! - equal shapes contribute nothing;
//! - a by-reference mismatch contributes the *by-reference* dimension;
//! - two arrays with different outermost ranks contribute the *rank*
//!   dimension;
//! - any structural mismatch strictly inside an array of arrays (deeper rank
//!   change, nesting-depth change, differing element types) contributes the
//!   *unnamed-array* dimension;
//! - anything else makes the pair an ordinary overload and exempts it.
//!
//! A pair with any by-reference or rank difference reports
//! [`ClsRule::OverloadRefOut`]; otherwise an unnamed-array difference
//! reports [`ClsRule::OverloadUnnamed`]. The by-reference/rank dimension
//! deliberately wins mixed pairs. Pairs with no difference at all are the
//! same signature (an override, or an explicit interface implementation next
//! to an implicit one) and never collide. Shapes involving type-parameter or
//! dynamically-typed arrays are excluded from comparison entirely.
//!
//! Groups are transient per-container values, discarded after use.

use std::collections::{HashMap, HashSet};

use crate::checker::CheckContext;
use crate::diagnostics::{ClsRule, DiagnosticSink};
use crate::symbols::{SymbolId, SymbolKind, TypeShape};

/// Maximum base-chain length the group collector will follow.
const MAX_BASE_CHAIN: usize = 64;

/// Outcome of comparing one pair of parameter shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShapeDiff {
    /// Identical shapes.
    Same,
    /// Outermost array ranks differ.
    Rank,
    /// Structure differs inside an array of arrays.
    Unnamed,
    /// A genuine type difference; the pair is an ordinary overload.
    Incomparable,
}

/// One member participating in a container's overload groups.
struct GroupMember {
    id: SymbolId,
    /// Declared in the container under check.
    local: bool,
}

/// Cross-hierarchy overload-shape validator.
pub(crate) struct OverloadValidator;

impl OverloadValidator {
    /// Checks all overload groups of `container`.
    ///
    /// The caller gates on the container being visible and effectively
    /// compliant. Pairs wholly inherited from a base are reported when that
    /// base is visited; a reported pair always involves a local member.
    pub(crate) fn check_container(
        ctx: &CheckContext<'_>,
        container: SymbolId,
        sink: &DiagnosticSink,
    ) {
        let members = Self::collect(ctx, container);

        let mut groups: HashMap<(String, bool), Vec<&GroupMember>> = HashMap::new();
        for member in &members {
            let symbol = &ctx.graph[member.id];
            let key = (symbol.name.clone(), symbol.kind == SymbolKind::Indexer);
            groups.entry(key).or_default().push(member);
        }

        let mut reported: HashSet<(ClsRule, SymbolId)> = HashSet::new();
        for group in groups.values() {
            if group.len() < 2 {
                continue;
            }
            for (index, first) in group.iter().enumerate() {
                for second in &group[index + 1..] {
                    if !first.local && !second.local {
                        continue;
                    }
                    let Some(rule) = Self::classify_pair(ctx, first.id, second.id) else {
                        continue;
                    };
                    let target = Self::report_target(ctx, first, second);
                    if reported.insert((rule, target)) {
                        let display = ctx.graph.qualified_name(target);
                        ctx.report(sink, rule, target, &[&display]);
                    }
                }
            }
        }
    }

    /// The collision is reported on the most-derived member; for two local
    /// members, on the later-declared one.
    fn report_target(
        ctx: &CheckContext<'_>,
        first: &GroupMember,
        second: &GroupMember,
    ) -> SymbolId {
        match (first.local, second.local) {
            (true, false) => first.id,
            (false, true) => second.id,
            _ => {
                if ctx.graph[second.id].decl_index > ctx.graph[first.id].decl_index {
                    second.id
                } else {
                    first.id
                }
            }
        }
    }

    /// Collects the parameterized members participating in overload groups:
    /// methods, constructors and indexers that are externally visible and
    /// not individually opted out.
    fn collect(ctx: &CheckContext<'_>, container: SymbolId) -> Vec<GroupMember> {
        let mut members = Vec::new();
        Self::collect_from(ctx, container, true, &mut members);

        let mut visited = HashSet::new();
        let mut cursor = Self::base_definition(ctx, container);
        let mut hops = 0;
        while let Some(base) = cursor {
            if !visited.insert(base) || hops >= MAX_BASE_CHAIN {
                break;
            }
            hops += 1;
            Self::collect_from(ctx, base, false, &mut members);
            cursor = Self::base_definition(ctx, base);
        }

        if let Some(data) = ctx.graph[container].type_data() {
            for shape in &data.interfaces {
                if let TypeShape::Named { definition, .. } = shape {
                    if ctx.graph.get(*definition).is_some() {
                        Self::collect_from(ctx, *definition, false, &mut members);
                    }
                }
            }
        }

        members
    }

    fn collect_from(
        ctx: &CheckContext<'_>,
        type_id: SymbolId,
        local: bool,
        out: &mut Vec<GroupMember>,
    ) {
        for child in &ctx.graph[type_id].children {
            let symbol = &ctx.graph[*child];
            let relevant = match symbol.kind {
                SymbolKind::Method | SymbolKind::Indexer => true,
                // Constructors are not inherited; they only group locally.
                SymbolKind::Constructor => local,
                _ => false,
            };
            if !relevant
                || symbol.is_declared_non_compliant()
                || !ctx.graph.is_visible_outside_assembly(*child)
            {
                continue;
            }
            out.push(GroupMember { id: *child, local });
        }
    }

    fn base_definition(ctx: &CheckContext<'_>, type_id: SymbolId) -> Option<SymbolId> {
        match ctx.graph[type_id].type_data()?.base.as_ref()? {
            TypeShape::Named { definition, .. } => {
                ctx.graph.get(*definition).map(|_| *definition)
            }
            _ => None,
        }
    }

    /// Classifies one pair of members, returning the rule to report when
    /// their shapes are indistinguishable under the interop rules.
    fn classify_pair(ctx: &CheckContext<'_>, a: SymbolId, b: SymbolId) -> Option<ClsRule> {
        let slots_a = Self::comparison_slots(ctx, a);
        let slots_b = Self::comparison_slots(ctx, b);
        if slots_a.len() != slots_b.len() {
            return None;
        }

        let mut saw_by_ref = false;
        let mut saw_rank = false;
        let mut saw_unnamed = false;

        for ((ref_a, shape_a), (ref_b, shape_b)) in slots_a.iter().zip(&slots_b) {
            if ref_a != ref_b {
                saw_by_ref = true;
            }
            match Self::shape_difference(shape_a, shape_b, 0) {
                ShapeDiff::Same => {}
                ShapeDiff::Rank => saw_rank = true,
                ShapeDiff::Unnamed => saw_unnamed = true,
                ShapeDiff::Incomparable => return None,
            }
        }

        if saw_by_ref || saw_rank {
            Some(ClsRule::OverloadRefOut)
        } else if saw_unnamed {
            Some(ClsRule::OverloadUnnamed)
        } else {
            // Identical signatures never collide; ties degrade to overrides
            // or explicit-next-to-implicit implementations.
            None
        }
    }

    /// The compared slots of a member: its parameters, plus the return shape
    /// for conversion operators, which overload on it.
    fn comparison_slots(ctx: &CheckContext<'_>, member: SymbolId) -> Vec<(bool, TypeShape)> {
        let symbol = &ctx.graph[member];
        let mut slots: Vec<(bool, TypeShape)> = symbol
            .children
            .iter()
            .filter_map(|child| {
                let data = ctx.graph[*child].parameter_data()?;
                Some((data.ref_kind.is_by_ref(), data.shape.clone()))
            })
            .collect();

        if symbol.name == "op_Implicit" || symbol.name == "op_Explicit" {
            if let Some(shape) = symbol.member_data().and_then(|d| d.shape.clone()) {
                slots.push((false, shape));
            }
        }

        slots
    }

    /// Structural comparison of one slot pair. `depth` is zero for the
    /// parameter types themselves and grows inside nested arrays.
    fn shape_difference(a: &TypeShape, b: &TypeShape, depth: u32) -> ShapeDiff {
        if Self::excluded(a) || Self::excluded(b) {
            return ShapeDiff::Incomparable;
        }
        if a == b {
            return ShapeDiff::Same;
        }

        match (a, b) {
            (
                TypeShape::Array {
                    element: element_a,
                    rank: rank_a,
                },
                TypeShape::Array {
                    element: element_b,
                    rank: rank_b,
                },
            ) => {
                if rank_a != rank_b {
                    // A deeper rank change is structure inside an array of
                    // arrays.
                    if depth > 0 {
                        return ShapeDiff::Unnamed;
                    }
                    // The outermost rank is the rank dimension, and it wins
                    // the tie against any unnamed-array difference in the
                    // elements. Differing non-array elements still make this
                    // an ordinary overload.
                    return if **element_a == **element_b
                        || element_a.is_array()
                        || element_b.is_array()
                    {
                        ShapeDiff::Rank
                    } else {
                        ShapeDiff::Incomparable
                    };
                }
                match (element_a.is_array(), element_b.is_array()) {
                    (true, true) => Self::shape_difference(element_a, element_b, depth + 1),
                    (true, false) | (false, true) => ShapeDiff::Unnamed,
                    (false, false) => {
                        // Differing leaf element types: a real overload for a
                        // plain array, an unnamed-array difference once the
                        // leaves sit inside an array of arrays.
                        if depth == 0 {
                            ShapeDiff::Incomparable
                        } else {
                            ShapeDiff::Unnamed
                        }
                    }
                }
            }
            _ => ShapeDiff::Incomparable,
        }
    }

    /// Shapes excluded from comparison: unresolved references anywhere, and
    /// arrays whose structure involves a type parameter or `dynamic`.
    fn excluded(shape: &TypeShape) -> bool {
        match shape {
            TypeShape::Unresolved => true,
            TypeShape::Array { .. } => Self::involves_unspeakable(shape),
            _ => false,
        }
    }

    fn involves_unspeakable(shape: &TypeShape) -> bool {
        match shape {
            TypeShape::TypeParameterRef(_) | TypeShape::Dynamic | TypeShape::Unresolved => true,
            TypeShape::Array { element, .. } => Self::involves_unspeakable(element),
            TypeShape::Pointer(pointee) => Self::involves_unspeakable(pointee),
            TypeShape::Named { args, .. } => args.iter().any(Self::involves_unspeakable),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SpecialType;

    fn int() -> TypeShape {
        TypeShape::Special(SpecialType::I4)
    }

    fn long() -> TypeShape {
        TypeShape::Special(SpecialType::I8)
    }

    #[test]
    fn test_rank_difference_outermost_only() {
        // int[] vs int[,] - rank dimension.
        let diff = OverloadValidator::shape_difference(
            &TypeShape::array(int()),
            &TypeShape::array_of_rank(int(), 2),
            0,
        );
        assert_eq!(diff, ShapeDiff::Rank);

        // int[,][,] vs int[,][] - ranks differ one level down.
        let diff = OverloadValidator::shape_difference(
            &TypeShape::array_of_rank(TypeShape::array_of_rank(int(), 2), 2),
            &TypeShape::array_of_rank(TypeShape::array(int()), 2),
            0,
        );
        assert_eq!(diff, ShapeDiff::Unnamed);
    }

    #[test]
    fn test_rank_beats_unnamed_in_one_slot() {
        // int[,] vs int[][]: outer ranks differ, so the rank dimension wins
        // even though the elements differ too.
        let diff = OverloadValidator::shape_difference(
            &TypeShape::array_of_rank(int(), 2),
            &TypeShape::array(TypeShape::array(int())),
            0,
        );
        assert_eq!(diff, ShapeDiff::Rank);
    }

    #[test]
    fn test_leaf_difference_depth_sensitivity() {
        // long[] vs char[]: ordinary overload.
        let char_ = TypeShape::Special(SpecialType::Char);
        let diff = OverloadValidator::shape_difference(
            &TypeShape::array(long()),
            &TypeShape::array(char_.clone()),
            0,
        );
        assert_eq!(diff, ShapeDiff::Incomparable);

        // long[][] vs char[][]: unnamed-array difference.
        let diff = OverloadValidator::shape_difference(
            &TypeShape::array(TypeShape::array(long())),
            &TypeShape::array(TypeShape::array(char_)),
            0,
        );
        assert_eq!(diff, ShapeDiff::Unnamed);
    }

    #[test]
    fn test_nesting_depth_difference() {
        // int[][] vs int[]: unnamed.
        let diff = OverloadValidator::shape_difference(
            &TypeShape::array(TypeShape::array(int())),
            &TypeShape::array(int()),
            0,
        );
        assert_eq!(diff, ShapeDiff::Unnamed);

        // int[][][] vs int[][]: unnamed, one level further down.
        let diff = OverloadValidator::shape_difference(
            &TypeShape::array(TypeShape::array(TypeShape::array(int()))),
            &TypeShape::array(TypeShape::array(int())),
            0,
        );
        assert_eq!(diff, ShapeDiff::Unnamed);
    }

    #[test]
    fn test_non_array_differences_are_ordinary_overloads() {
        let diff = OverloadValidator::shape_difference(&int(), &long(), 0);
        assert_eq!(diff, ShapeDiff::Incomparable);

        let diff = OverloadValidator::shape_difference(&TypeShape::array(int()), &int(), 0);
        assert_eq!(diff, ShapeDiff::Incomparable);
    }

    #[test]
    fn test_rank_and_element_both_differing_is_ordinary() {
        // int[,] vs char[]: the rank dimension does not rescue a pair whose
        // leaf element types genuinely differ.
        let char_ = TypeShape::Special(SpecialType::Char);
        let diff = OverloadValidator::shape_difference(
            &TypeShape::array_of_rank(int(), 2),
            &TypeShape::array(char_),
            0,
        );
        assert_eq!(diff, ShapeDiff::Incomparable);
    }

    #[test]
    fn test_dynamic_arrays_excluded() {
        let diff = OverloadValidator::shape_difference(
            &TypeShape::array(TypeShape::Dynamic),
            &TypeShape::array_of_rank(TypeShape::Dynamic, 2),
            0,
        );
        assert_eq!(diff, ShapeDiff::Incomparable);
    }
}
