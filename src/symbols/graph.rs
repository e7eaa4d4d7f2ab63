//! Arena storage for symbol graphs.
//!
//! Deep container inheritance (assembly → module → namespace → type → member)
//! is represented as a flat arena of nodes addressed by stable integer
//! indices, with each node storing a parent index. Compliance resolution and
//! every other walk over the containment chain is an iterative index chase,
//! which avoids both stack depth issues on deeply nested types and mutable
//! shared caches guarded by locks.
//!
//! # Key Components
//!
//! - [`SymbolId`] - Stable index of a node within its graph
//! - [`SymbolGraph`] - The finished, immutable arena
//!
//! # Thread Safety
//!
//! [`SymbolGraph`] is immutable after construction and shared by reference
//! across the checker's worker threads.

use std::fmt;
use std::ops::Index;

use crate::symbols::{RefKind, Symbol, SymbolKind};

/// Stable index of a symbol within its [`SymbolGraph`].
///
/// Ids are dense, start at zero and are assigned in declaration order by the
/// builder. The assembly root is always [`SymbolGraph::ASSEMBLY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub(crate) u32);

impl SymbolId {
    /// The arena slot this id addresses.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The finished, immutable symbol graph.
///
/// Built once by [`crate::symbols::GraphBuilder::finish`] and then only read.
/// All traversal state the checker needs (parent chains, children in
/// declaration order, declaration indices) lives in the nodes themselves.
#[derive(Debug)]
pub struct SymbolGraph {
    pub(crate) symbols: Vec<Symbol>,
}

impl SymbolGraph {
    /// Id of the assembly root; the builder always allocates it first.
    pub const ASSEMBLY: SymbolId = SymbolId(0);

    /// Looks up a symbol, returning `None` for ids from another graph.
    #[must_use]
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    /// Number of symbols in the graph (at least the assembly root and the
    /// primary module).
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false; a graph holds at least its assembly root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over all symbols in id (declaration) order.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(index, symbol)| (SymbolId(index as u32), symbol))
    }

    /// The assembly root symbol.
    #[must_use]
    pub fn assembly(&self) -> &Symbol {
        &self[Self::ASSEMBLY]
    }

    /// Module symbols in declaration order; the first is the primary module.
    pub fn modules(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.assembly()
            .children
            .iter()
            .copied()
            .filter(|id| self[*id].kind == SymbolKind::Module)
    }

    /// Iterates over the containment chain of `id`, starting at its parent.
    pub fn ancestors(&self, id: SymbolId) -> impl Iterator<Item = SymbolId> + '_ {
        let mut cursor = self[id].parent;
        std::iter::from_fn(move || {
            let current = cursor?;
            cursor = self[current].parent;
            Some(current)
        })
    }

    /// The nearest enclosing type definition of `id`, if any.
    #[must_use]
    pub fn containing_type(&self, id: SymbolId) -> Option<SymbolId> {
        self.ancestors(id).find(|a| self[*a].kind.is_type())
    }

    /// Fully-qualified source-level display name of a symbol.
    ///
    /// Namespaces and enclosing types are joined with `.`; the assembly,
    /// modules and the global namespace contribute nothing. Methods,
    /// constructors and indexers append their rendered parameter list,
    /// generic types their type-parameter list, and accessors display as
    /// `Owner.P.get`-style suffixes of their owner.
    #[must_use]
    pub fn qualified_name(&self, id: SymbolId) -> String {
        let symbol = &self[id];
        match symbol.kind {
            SymbolKind::Assembly | SymbolKind::Module => symbol.name.clone(),
            SymbolKind::Parameter | SymbolKind::TypeParameter => symbol.name.clone(),
            SymbolKind::Accessor => {
                let owner = symbol.parent.expect("accessor without owner");
                let suffix = symbol
                    .accessor_data()
                    .expect("accessor without payload")
                    .kind
                    .display_suffix();
                format!("{}.{}", self.qualified_name(owner), suffix)
            }
            _ => {
                let mut segments = Vec::new();
                segments.push(self.display_segment(id));
                for ancestor in self.ancestors(id) {
                    let a = &self[ancestor];
                    match a.kind {
                        SymbolKind::Assembly | SymbolKind::Module => break,
                        SymbolKind::Namespace if a.name.is_empty() => {}
                        _ => segments.push(self.display_segment(ancestor)),
                    }
                }
                segments.reverse();
                segments.join(".")
            }
        }
    }

    /// Renders one path segment: the symbol's simple name plus its generic
    /// arity or parameter list where the kind calls for it.
    fn display_segment(&self, id: SymbolId) -> String {
        let symbol = &self[id];
        match symbol.kind {
            SymbolKind::Method => {
                format!(
                    "{}{}({})",
                    symbol.name,
                    self.type_parameter_suffix(id),
                    self.parameter_list(id)
                )
            }
            SymbolKind::Constructor => {
                let type_name = symbol
                    .parent
                    .map_or_else(|| symbol.name.clone(), |p| self[p].name.clone());
                format!("{}({})", type_name, self.parameter_list(id))
            }
            SymbolKind::Indexer => format!("this[{}]", self.parameter_list(id)),
            kind if kind.is_type() => {
                format!("{}{}", symbol.name, self.type_parameter_suffix(id))
            }
            _ => symbol.name.clone(),
        }
    }

    /// `<T, U>` suffix for generic symbols, empty otherwise.
    fn type_parameter_suffix(&self, id: SymbolId) -> String {
        let names: Vec<&str> = self[id]
            .children
            .iter()
            .filter(|c| self[**c].kind == SymbolKind::TypeParameter)
            .map(|c| self[*c].name.as_str())
            .collect();
        if names.is_empty() {
            String::new()
        } else {
            format!("<{}>", names.join(", "))
        }
    }

    /// Comma-separated rendered parameter types of a parameterized member.
    fn parameter_list(&self, id: SymbolId) -> String {
        let rendered: Vec<String> = self[id]
            .children
            .iter()
            .filter_map(|c| {
                let child = &self[*c];
                let data = child.parameter_data()?;
                let prefix = match data.ref_kind {
                    RefKind::None => "",
                    RefKind::Ref => "ref ",
                    RefKind::Out => "out ",
                    RefKind::In => "in ",
                };
                Some(format!("{}{}", prefix, data.shape.display(self)))
            })
            .collect();
        rendered.join(", ")
    }
}

impl Index<SymbolId> for SymbolGraph {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }
}
