//! Shared helpers for the integration suites.

#![allow(dead_code)]

use clscope::prelude::*;

/// Runs a full sequential pass and returns the findings in deterministic
/// order.
pub fn check(graph: &SymbolGraph) -> Vec<ClsDiagnostic> {
    let sink = DiagnosticSink::new();
    let outcome = ClsChecker::new(graph, CheckerConfig::sequential()).check(&sink);
    assert_eq!(outcome, PassOutcome::Completed);
    sink.into_sorted()
}

/// Rule ids of a full pass, in deterministic order.
pub fn rules_of(graph: &SymbolGraph) -> Vec<ClsRule> {
    check(graph).into_iter().map(|d| d.rule).collect()
}

/// A builder whose assembly already declares `CLSCompliant(true)`.
pub fn compliant_assembly(name: &str) -> GraphBuilder {
    let mut gb = GraphBuilder::new(name);
    gb.assembly_compliance(true);
    gb
}

pub fn int() -> TypeShape {
    TypeShape::Special(SpecialType::I4)
}

pub fn long() -> TypeShape {
    TypeShape::Special(SpecialType::I8)
}

pub fn char_() -> TypeShape {
    TypeShape::Special(SpecialType::Char)
}

pub fn uint() -> TypeShape {
    TypeShape::Special(SpecialType::U4)
}

pub fn string() -> TypeShape {
    TypeShape::Special(SpecialType::String)
}

pub fn void() -> TypeShape {
    TypeShape::Special(SpecialType::Void)
}

/// Asserts the pass produced exactly the expected rules, in order.
pub fn assert_rules(graph: &SymbolGraph, expected: &[ClsRule]) {
    let found = check(graph);
    let rules: Vec<ClsRule> = found.iter().map(|d| d.rule).collect();
    assert_eq!(
        rules, expected,
        "unexpected findings: {:#?}",
        found.iter().map(ToString::to_string).collect::<Vec<_>>()
    );
}
