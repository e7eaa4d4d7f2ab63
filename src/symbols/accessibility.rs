//! Declared accessibility and assembly-external visibility.

use crate::symbols::{SymbolGraph, SymbolId, SymbolKind};

/// Declared accessibility of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accessibility {
    /// Visible only within the declaring type.
    Private,
    /// Visible within the declaring type's derived types inside the assembly.
    FamilyAndAssembly,
    /// Visible within the assembly.
    Assembly,
    /// Visible within derived types, including across assemblies.
    Family,
    /// Visible within the assembly or derived types.
    FamilyOrAssembly,
    /// Visible everywhere.
    #[default]
    Public,
}

impl Accessibility {
    /// Whether a symbol with this accessibility can be observed from another
    /// assembly, assuming its container can. `Family` and `FamilyOrAssembly`
    /// count as visible because external assemblies can derive from the
    /// container.
    #[must_use]
    pub fn is_externally_visible(self) -> bool {
        matches!(
            self,
            Accessibility::Public | Accessibility::Family | Accessibility::FamilyOrAssembly
        )
    }
}

impl SymbolGraph {
    /// Whether `id` can be observed from outside the assembly.
    ///
    /// A symbol is visible when it and every enclosing type are externally
    /// visible. Namespaces, modules and the assembly itself never restrict
    /// visibility; parameters and type parameters share their owner's.
    #[must_use]
    pub fn is_visible_outside_assembly(&self, id: SymbolId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let symbol = &self[current];
            match symbol.kind {
                SymbolKind::Assembly | SymbolKind::Module | SymbolKind::Namespace => {}
                SymbolKind::Parameter | SymbolKind::TypeParameter => {}
                _ => {
                    if !symbol.accessibility.is_externally_visible() {
                        return false;
                    }
                }
            }
            cursor = symbol.parent;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{GraphBuilder, TypeBuilder};

    #[test]
    fn test_externally_visible_levels() {
        assert!(Accessibility::Public.is_externally_visible());
        assert!(Accessibility::Family.is_externally_visible());
        assert!(Accessibility::FamilyOrAssembly.is_externally_visible());
        assert!(!Accessibility::Assembly.is_externally_visible());
        assert!(!Accessibility::FamilyAndAssembly.is_externally_visible());
        assert!(!Accessibility::Private.is_externally_visible());
    }

    #[test]
    fn test_visibility_follows_containers() {
        let mut graph = GraphBuilder::new("vis");
        TypeBuilder::class("Outer")
            .internal()
            .nested(TypeBuilder::class("Inner").public())
            .build(&mut graph)
            .unwrap();
        TypeBuilder::class("Open")
            .public()
            .nested(TypeBuilder::class("Hidden").internal())
            .build(&mut graph)
            .unwrap();
        let graph = graph.finish();

        let by_name = |name: &str| {
            graph
                .iter()
                .find(|(_, s)| s.name == name)
                .map(|(id, _)| id)
                .unwrap()
        };

        assert!(!graph.is_visible_outside_assembly(by_name("Inner")));
        assert!(graph.is_visible_outside_assembly(by_name("Open")));
        assert!(!graph.is_visible_outside_assembly(by_name("Hidden")));
    }
}
