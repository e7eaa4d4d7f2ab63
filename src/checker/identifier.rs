//! Identifier spelling and case-collision checks.
//!
//! Two rule families live here. The spelling rule flags source-visible names
//! that begin with an underscore (parameters are exempt, overriding members
//! reuse their base's already-reported name). The collision rule compares
//! sibling names case-insensitively within one container, including names
//! inherited from base types, names contributed by directly-declared
//! interfaces, and the synthesized accessor names from the static
//! [`crate::symbols::AccessorKind`] table. Identical spellings never collide;
//! a collider individually declared `CLSCompliant(false)` suppresses its
//! pairs.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::checker::CheckContext;
use crate::diagnostics::{ClsRule, DiagnosticSink};
use crate::symbols::{MemberFlags, SymbolId, SymbolKind, TypeShape};

/// Maximum base-chain length the collision collector will follow; cycles in
/// base lists are front-end errors, this just keeps the walk finite.
const MAX_BASE_CHAIN: usize = 64;

/// One name participating in a container's collision table.
struct Candidate {
    id: SymbolId,
    /// Declared in the container under check, as opposed to inherited or
    /// contributed by an interface.
    local: bool,
}

/// Spelling and case-insensitive collision validator.
pub(crate) struct IdentifierValidator;

impl IdentifierValidator {
    /// Flags a leading underscore on a source-visible name.
    ///
    /// The caller gates on visibility and effective compliance. The reported
    /// message argument is the simple de-escaped name.
    pub(crate) fn check_name(ctx: &CheckContext<'_>, id: SymbolId, sink: &DiagnosticSink) {
        let symbol = &ctx.graph[id];
        match symbol.kind {
            SymbolKind::Namespace
            | SymbolKind::Class
            | SymbolKind::Struct
            | SymbolKind::Interface
            | SymbolKind::Enum
            | SymbolKind::Delegate
            | SymbolKind::Method
            | SymbolKind::Property
            | SymbolKind::Event
            | SymbolKind::Field => {}
            _ => return,
        }
        if symbol.flags.contains(MemberFlags::OVERRIDE) {
            return;
        }
        if symbol.name.starts_with('_') {
            ctx.report(sink, ClsRule::BadIdentifier, id, &[&symbol.name]);
        }
    }

    /// Reports case-only collisions among the members of `container`.
    ///
    /// The candidate set unions locally declared names with names inherited
    /// transitively from base types and names of directly-declared
    /// interfaces' members; findings are only raised against local symbols,
    /// so inherited-only collisions surface where they are declared.
    pub(crate) fn check_member_distinctness(
        ctx: &CheckContext<'_>,
        container: SymbolId,
        sink: &DiagnosticSink,
    ) {
        let candidates = Self::collect_candidates(ctx, container);

        let mut seen: HashMap<String, String> = HashMap::new();
        for candidate in candidates {
            let name = ctx.graph[candidate.id].name.clone();
            match seen.entry(name.to_lowercase()) {
                Entry::Vacant(slot) => {
                    slot.insert(name);
                }
                Entry::Occupied(slot) => {
                    // The first spelling stays canonical either way.
                    if *slot.get() != name && candidate.local {
                        let display = ctx.graph.qualified_name(candidate.id);
                        ctx.report(sink, ClsRule::BadIdentifierCase, candidate.id, &[&display]);
                    }
                }
            }
        }
    }

    /// Collects the collision candidates for `container`, inherited and
    /// interface names first so that local declarations report against them.
    fn collect_candidates(ctx: &CheckContext<'_>, container: SymbolId) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        if ctx.graph[container].kind == SymbolKind::Namespace {
            for child in &ctx.graph[container].children {
                let symbol = &ctx.graph[*child];
                let relevant = symbol.kind == SymbolKind::Namespace || symbol.kind.is_type();
                if relevant && Self::eligible(ctx, *child) {
                    candidates.push(Candidate {
                        id: *child,
                        local: true,
                    });
                }
            }
            return candidates;
        }

        // Base-chain members, base-most first is not required for
        // correctness: findings are only raised on local symbols.
        let mut visited = HashSet::new();
        let mut cursor = Self::base_definition(ctx, container);
        let mut hops = 0;
        while let Some(base) = cursor {
            if !visited.insert(base) || hops >= MAX_BASE_CHAIN {
                break;
            }
            hops += 1;
            Self::collect_members(ctx, base, false, &mut candidates);
            cursor = Self::base_definition(ctx, base);
        }

        // Members of directly-declared interfaces.
        if let Some(data) = ctx.graph[container].type_data() {
            for shape in &data.interfaces {
                if let TypeShape::Named { definition, .. } = shape {
                    if ctx.graph.get(*definition).is_some() {
                        Self::collect_members(ctx, *definition, false, &mut candidates);
                    }
                }
            }
        }

        Self::collect_members(ctx, container, true, &mut candidates);
        candidates
    }

    /// The base type's definition symbol, when it resolves to one.
    fn base_definition(ctx: &CheckContext<'_>, type_id: SymbolId) -> Option<SymbolId> {
        match ctx.graph[type_id].type_data()?.base.as_ref()? {
            TypeShape::Named { definition, .. } => {
                ctx.graph.get(*definition).map(|_| *definition)
            }
            _ => None,
        }
    }

    /// Appends a type's collision-relevant members: nested types, named
    /// members and the synthesized accessor names of properties and events.
    fn collect_members(
        ctx: &CheckContext<'_>,
        type_id: SymbolId,
        local: bool,
        out: &mut Vec<Candidate>,
    ) {
        for child in &ctx.graph[type_id].children {
            let symbol = &ctx.graph[*child];
            let relevant = symbol.kind.is_type()
                || matches!(
                    symbol.kind,
                    SymbolKind::Method
                        | SymbolKind::Property
                        | SymbolKind::Indexer
                        | SymbolKind::Event
                        | SymbolKind::Field
                );
            if !relevant || !Self::eligible(ctx, *child) {
                continue;
            }
            out.push(Candidate { id: *child, local });

            if matches!(
                symbol.kind,
                SymbolKind::Property | SymbolKind::Indexer | SymbolKind::Event
            ) {
                for accessor in &symbol.children {
                    if ctx.graph[*accessor].kind == SymbolKind::Accessor
                        && Self::eligible(ctx, *accessor)
                    {
                        out.push(Candidate {
                            id: *accessor,
                            local,
                        });
                    }
                }
            }
        }
    }

    /// Collision eligibility: externally visible and not individually
    /// opted out with `CLSCompliant(false)`.
    fn eligible(ctx: &CheckContext<'_>, id: SymbolId) -> bool {
        let symbol = &ctx.graph[id];
        if symbol.is_declared_non_compliant() {
            return false;
        }
        if symbol.kind == SymbolKind::Namespace {
            return true;
        }
        ctx.graph.is_visible_outside_assembly(id)
    }
}
