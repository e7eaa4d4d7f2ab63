//! Integration tests for compliance resolution and the attribute-placement
//! diagnostics.

mod common;

use clscope::prelude::*;
use common::*;

#[test]
fn clean_compliant_assembly_produces_nothing() {
    let mut gb = compliant_assembly("clean");
    TypeBuilder::class("C")
        .compliant(true)
        .method("M", |m| m.compliant(true))
        .build(&mut gb)
        .unwrap();
    assert_rules(&gb.finish(), &[]);
}

#[test]
fn unmarked_assembly_flags_every_true_declaration() {
    let mut gb = GraphBuilder::new("unmarked");
    TypeBuilder::class("C")
        .compliant(true)
        .method("M", |m| m.compliant(true))
        .build(&mut gb)
        .unwrap();
    assert_rules(
        &gb.finish(),
        &[ClsRule::AssemblyNotCls, ClsRule::AssemblyNotCls],
    );
}

#[test]
fn unmarked_assembly_reports_the_qualified_names() {
    let mut gb = GraphBuilder::new("unmarked");
    TypeBuilder::class("C")
        .namespace("N")
        .compliant(true)
        .method("M", |m| m.compliant(true).parameter("x", int()))
        .build(&mut gb)
        .unwrap();
    let found = check(&gb.finish());
    assert_eq!(found.len(), 2);
    assert!(found[0].message.contains("'N.C'"), "{}", found[0].message);
    assert!(found[1].message.contains("'N.C.M(int)'"), "{}", found[1].message);
}

#[test]
fn unmarked_assembly_false_declaration_is_merely_unneeded() {
    let mut gb = GraphBuilder::new("unmarked");
    TypeBuilder::class("C").compliant(false).build(&mut gb).unwrap();
    assert_rules(&gb.finish(), &[ClsRule::AssemblyNotCls2]);
}

#[test]
fn unmarked_assembly_wins_over_private_visibility() {
    // Even an invisible symbol gets the unmarked-assembly diagnostic, not
    // the meaningless-on-private one.
    let mut gb = GraphBuilder::new("unmarked");
    TypeBuilder::class("Outer")
        .nested(TypeBuilder::class("NC").private().compliant(true))
        .build(&mut gb)
        .unwrap();
    assert_rules(&gb.finish(), &[ClsRule::AssemblyNotCls]);
}

#[test]
fn attribute_on_invisible_symbols_is_meaningless() {
    let mut gb = compliant_assembly("vis");
    // Public type nested in an internal one is still invisible.
    TypeBuilder::class("Outer1")
        .internal()
        .nested(TypeBuilder::class("Inner1").compliant(true))
        .build(&mut gb)
        .unwrap();
    TypeBuilder::class("Outer2")
        .nested(TypeBuilder::class("Inner2").internal().compliant(true))
        .build(&mut gb)
        .unwrap();
    TypeBuilder::class("Levels")
        .field_with("F1", int(), |f| f.private().compliant(true))
        .field_with("F2", int(), |f| f.internal().compliant(true))
        .build(&mut gb)
        .unwrap();
    assert_rules(
        &gb.finish(),
        &[
            ClsRule::MeaninglessOnPrivateType,
            ClsRule::MeaninglessOnPrivateType,
            ClsRule::MeaninglessOnPrivateType,
            ClsRule::MeaninglessOnPrivateType,
        ],
    );
}

#[test]
fn protected_members_are_visible_and_stay_quiet() {
    let mut gb = compliant_assembly("vis");
    TypeBuilder::class("Levels")
        .field_with("F3", int(), |f| f.protected().compliant(true))
        .build(&mut gb)
        .unwrap();
    assert_rules(&gb.finish(), &[]);
}

#[test]
fn true_inside_explicit_false_is_contradictory() {
    let mut gb = compliant_assembly("contradiction");
    TypeBuilder::class("Kinds")
        .compliant(false)
        .method("M", |m| m.compliant(true))
        .field_with("F", int(), |f| f.compliant(true))
        .nested(TypeBuilder::class("NC").compliant(true))
        .build(&mut gb)
        .unwrap();
    assert_rules(
        &gb.finish(),
        &[
            ClsRule::IllegalTrueInFalse,
            ClsRule::IllegalTrueInFalse,
            ClsRule::IllegalTrueInFalse,
        ],
    );
}

#[test]
fn true_inside_assembly_false_stays_silent() {
    let mut gb = GraphBuilder::new("implicit");
    gb.assembly_compliance(false);
    TypeBuilder::class("Kinds")
        .method("M", |m| m.compliant(true))
        .build(&mut gb)
        .unwrap();
    assert_rules(&gb.finish(), &[]);
}

#[test]
fn alternating_nesting_reports_each_true_under_false() {
    let mut gb = compliant_assembly("alternating");
    TypeBuilder::class("A")
        .compliant(true)
        .nested(
            TypeBuilder::class("B").compliant(false).nested(
                TypeBuilder::class("C").compliant(true).nested(
                    TypeBuilder::class("D")
                        .compliant(false)
                        .nested(TypeBuilder::class("E").compliant(true)),
                ),
            ),
        )
        .build(&mut gb)
        .unwrap();

    let found = check(&gb.finish());
    let rules: Vec<ClsRule> = found.iter().map(|d| d.rule).collect();
    assert_eq!(
        rules,
        vec![ClsRule::IllegalTrueInFalse, ClsRule::IllegalTrueInFalse]
    );
    assert!(found[0].message.contains("'A.B.C'"));
    assert!(found[0].message.contains("'A.B'"));
    assert!(found[1].message.contains("'A.B.C.D.E'"));
    assert!(found[1].message.contains("'A.B.C.D'"));
}

#[test]
fn parameter_and_return_targets_are_meaningless() {
    let mut gb = compliant_assembly("targets");
    TypeBuilder::class("C")
        .method("M", |m| {
            m.parameter_spec(
                ParamSpec::new("x", int()).with_attribute(AttributeSpec::cls_compliant(true)),
            )
            .return_attribute(AttributeSpec::cls_compliant(true))
        })
        .build(&mut gb)
        .unwrap();
    assert_rules(
        &gb.finish(),
        &[ClsRule::MeaninglessOnReturn, ClsRule::MeaninglessOnParam],
    );
}

#[test]
fn private_underscore_type_with_attribute_only_gets_meaningless() {
    let mut gb = compliant_assembly("suppress");
    TypeBuilder::class("Outer")
        .nested(TypeBuilder::class("_C").private().compliant(true))
        .build(&mut gb)
        .unwrap();
    assert_rules(&gb.finish(), &[ClsRule::MeaninglessOnPrivateType]);
}

#[test]
fn private_underscore_type_without_attribute_is_ignored_entirely() {
    let mut gb = compliant_assembly("suppress");
    TypeBuilder::class("Outer")
        .nested(TypeBuilder::class("_C").private())
        .build(&mut gb)
        .unwrap();
    assert_rules(&gb.finish(), &[]);
}

#[test]
fn meaningless_on_private_stops_descending() {
    let mut gb = compliant_assembly("stop");
    TypeBuilder::class("Outer")
        .nested(
            TypeBuilder::class("Hidden")
                .private()
                .compliant(true)
                // Would be three findings if the subtree were visited.
                .method("_m", |m| m.compliant(true))
                .field_with("_f", uint(), |f| f.compliant(true)),
        )
        .build(&mut gb)
        .unwrap();
    assert_rules(&gb.finish(), &[ClsRule::MeaninglessOnPrivateType]);
}

#[test]
fn pass_is_idempotent() {
    let mut gb = compliant_assembly("idempotent");
    TypeBuilder::class("_A")
        .method("M1", |m| m.parameter("x", int()))
        .method("M1", |m| m.parameter_ref("x", int()))
        .field("F", uint())
        .build(&mut gb)
        .unwrap();
    let graph = gb.finish();

    let first: Vec<String> = check(&graph).iter().map(ToString::to_string).collect();
    let second: Vec<String> = check(&graph).iter().map(ToString::to_string).collect();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn parallel_and_sequential_passes_agree() {
    let mut gb = compliant_assembly("parallel");
    for index in 0..24 {
        TypeBuilder::class(&format!("_T{index}"))
            .span(0, index * 100, index * 100 + 10)
            .field(&format!("F{index}"), uint())
            .build(&mut gb)
            .unwrap();
    }
    let graph = gb.finish();

    let sequential: Vec<String> = check(&graph).iter().map(ToString::to_string).collect();

    let sink = DiagnosticSink::new();
    ClsChecker::new(&graph, CheckerConfig::default()).check(&sink);
    let parallel: Vec<String> = sink.into_sorted().iter().map(ToString::to_string).collect();

    assert_eq!(sequential, parallel);
}
