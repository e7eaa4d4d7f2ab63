//! Type compliance classification.
//!
//! `IsCompliant` over a [`TypeShape`] is a pure recursive function: built-in
//! element types carry a fixed verdict, pointers never comply, arrays
//! delegate to their element (rank is irrelevant here; it matters only to
//! the overload checks), and a named instantiation requires both a
//! not-explicitly-false definition and compliant type arguments. Built-in
//! container instantiations get no exemption: their type arguments are
//! inspected like any other instantiation's.
//!
//! Verdicts are memoized per distinct shape for the duration of a pass; the
//! memo is a publish-once map, so racing recomputation is harmless.

use dashmap::DashMap;

use crate::checker::ComplianceResolver;
use crate::symbols::{SymbolGraph, TypeShape};

/// Memoized shape classification over one graph.
pub(crate) struct TypeClassifier<'g> {
    graph: &'g SymbolGraph,
    memo: DashMap<TypeShape, bool>,
}

impl<'g> TypeClassifier<'g> {
    pub(crate) fn new(graph: &'g SymbolGraph) -> Self {
        Self {
            graph,
            memo: DashMap::new(),
        }
    }

    /// Whether `shape` names only interop-subset types.
    ///
    /// Unresolved references classify as compliant: the front end has
    /// already reported the binding failure and the pass must not
    /// double-report.
    pub(crate) fn is_compliant(
        &self,
        compliance: &ComplianceResolver<'g>,
        shape: &TypeShape,
    ) -> bool {
        if let Some(hit) = self.memo.get(shape) {
            return *hit;
        }

        let verdict = match shape {
            TypeShape::Special(special) => special.is_cls_compliant(),
            TypeShape::Pointer(_) | TypeShape::FunctionPointer => false,
            TypeShape::Array { element, .. } => self.is_compliant(compliance, element),
            TypeShape::TypeParameterRef(_) | TypeShape::Dynamic | TypeShape::Unresolved => true,
            TypeShape::Named { definition, args } => {
                !compliance.effective(*definition).is_false()
                    && args.iter().all(|arg| self.is_compliant(compliance, arg))
            }
        };

        self.memo.insert(shape.clone(), verdict);
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{GraphBuilder, SpecialType, TypeBuilder};

    fn setup() -> (SymbolGraph, crate::symbols::SymbolId, crate::symbols::SymbolId) {
        let mut gb = GraphBuilder::new("classify");
        gb.assembly_compliance(true);
        let good = TypeBuilder::class("Good").build(&mut gb).unwrap();
        let bad = TypeBuilder::class("Bad").compliant(false).build(&mut gb).unwrap();
        (gb.finish(), good, bad)
    }

    use crate::symbols::SymbolGraph;

    #[test]
    fn test_specials_and_pointers() {
        let (graph, _, _) = setup();
        let resolver = ComplianceResolver::new(&graph);
        let classifier = TypeClassifier::new(&graph);

        assert!(classifier.is_compliant(&resolver, &TypeShape::Special(SpecialType::I4)));
        assert!(!classifier.is_compliant(&resolver, &TypeShape::Special(SpecialType::U4)));
        assert!(!classifier.is_compliant(
            &resolver,
            &TypeShape::Pointer(Box::new(TypeShape::Special(SpecialType::I4)))
        ));
        assert!(!classifier.is_compliant(&resolver, &TypeShape::FunctionPointer));
        assert!(classifier.is_compliant(&resolver, &TypeShape::Dynamic));
        assert!(classifier.is_compliant(&resolver, &TypeShape::Unresolved));
    }

    #[test]
    fn test_array_rank_is_irrelevant() {
        let (graph, good, bad) = setup();
        let resolver = ComplianceResolver::new(&graph);
        let classifier = TypeClassifier::new(&graph);

        for rank in 1..=4 {
            let good_array = TypeShape::array_of_rank(TypeShape::named(good), rank);
            let bad_array = TypeShape::array_of_rank(TypeShape::named(bad), rank);
            assert!(classifier.is_compliant(&resolver, &good_array));
            assert!(!classifier.is_compliant(&resolver, &bad_array));
        }

        // Nested arrays delegate all the way down.
        let jagged = TypeShape::array(TypeShape::array(TypeShape::Special(SpecialType::U8)));
        assert!(!classifier.is_compliant(&resolver, &jagged));
    }

    #[test]
    fn test_generic_instantiation_inspects_arguments() {
        let (graph, good, bad) = setup();
        let resolver = ComplianceResolver::new(&graph);
        let classifier = TypeClassifier::new(&graph);

        let ok = TypeShape::generic(good, vec![TypeShape::Special(SpecialType::I4)]);
        assert!(classifier.is_compliant(&resolver, &ok));

        let bad_definition = TypeShape::generic(bad, vec![TypeShape::Special(SpecialType::I4)]);
        assert!(!classifier.is_compliant(&resolver, &bad_definition));

        let bad_argument = TypeShape::generic(good, vec![TypeShape::named(bad)]);
        assert!(!classifier.is_compliant(&resolver, &bad_argument));

        let nested_bad = TypeShape::generic(
            good,
            vec![TypeShape::generic(good, vec![TypeShape::Special(SpecialType::U2)])],
        );
        assert!(!classifier.is_compliant(&resolver, &nested_bad));
    }
}
