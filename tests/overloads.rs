//! Integration tests for the overload-shape collision checks.

mod common;

use clscope::prelude::*;
use common::*;

fn jagged(shape: TypeShape) -> TypeShape {
    TypeShape::array(TypeShape::array(shape))
}

#[test]
fn ref_only_difference_collides() {
    let mut gb = compliant_assembly("refout");
    TypeBuilder::class("Compliant")
        .method("M1", |m| m.parameter("x", int()))
        .method("M1", |m| m.parameter_ref("x", int()))
        .method("M2", |m| m.parameter_out("x", int()))
        .method("M2", |m| m.parameter("x", int()))
        .build(&mut gb)
        .unwrap();

    let found = check(&gb.finish());
    let rules: Vec<ClsRule> = found.iter().map(|d| d.rule).collect();
    assert_eq!(rules, vec![ClsRule::OverloadRefOut, ClsRule::OverloadRefOut]);
    // Reported on the later declaration of each pair.
    assert!(found[0].message.contains("'Compliant.M1(ref int)'"));
    assert!(found[1].message.contains("'Compliant.M2(int)'"));
}

#[test]
fn inaccessible_or_opted_out_overloads_do_not_collide() {
    let mut gb = compliant_assembly("gates");
    TypeBuilder::class("Compliant")
        .method("M3", |m| m.parameter_ref("x", int()))
        .method("M3", |m| m.private().parameter("x", int()))
        .method("M4", |m| m.parameter_ref("x", int()))
        .method("M4", |m| m.compliant(false).parameter("x", int()))
        .build(&mut gb)
        .unwrap();
    TypeBuilder::class("Internal")
        .internal()
        .method("M1", |m| m.parameter("x", int()))
        .method("M1", |m| m.parameter_ref("x", int()))
        .build(&mut gb)
        .unwrap();
    TypeBuilder::class("NonCompliant")
        .compliant(false)
        .method("M1", |m| m.parameter("x", int()))
        .method("M1", |m| m.parameter_ref("x", int()))
        .build(&mut gb)
        .unwrap();
    assert_rules(&gb.finish(), &[]);
}

#[test]
fn rank_only_difference_collides() {
    let mut gb = compliant_assembly("rank");
    TypeBuilder::class("Compliant")
        .method("M1", |m| m.parameter("x", TypeShape::array(int())))
        .method("M1", |m| m.parameter("x", TypeShape::array_of_rank(int(), 2)))
        .build(&mut gb)
        .unwrap();

    let found = check(&gb.finish());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].rule, ClsRule::OverloadRefOut);
    assert!(
        found[0].message.contains("'Compliant.M1(int[*,*])'"),
        "{}",
        found[0].message
    );
}

#[test]
fn unnamed_array_differences_collide() {
    let mut gb = compliant_assembly("unnamed");
    TypeBuilder::class("Compliant")
        // Leaf element differs inside an array of arrays.
        .method("M1", |m| m.parameter("x", jagged(long())))
        .method("M1", |m| m.parameter("x", jagged(char_())))
        // Nesting depth differs.
        .method("M2", |m| {
            m.parameter("x", TypeShape::array(jagged(int())))
        })
        .method("M2", |m| m.parameter("x", jagged(int())))
        .method("M3", |m| m.parameter("x", jagged(int())))
        .method("M3", |m| m.parameter("x", TypeShape::array(int())))
        .build(&mut gb)
        .unwrap();

    let found = check(&gb.finish());
    let rules: Vec<ClsRule> = found.iter().map(|d| d.rule).collect();
    assert_eq!(rules, vec![ClsRule::OverloadUnnamed; 3]);
    assert!(found[0].message.contains("'Compliant.M1(char[][])'"));
    assert!(found[1].message.contains("'Compliant.M2(int[][])'"));
    assert!(found[2].message.contains("'Compliant.M3(int[])'"));
}

#[test]
fn nested_rank_changes_are_unnamed_but_outer_rank_wins() {
    let rank2 = |inner| TypeShape::array_of_rank(inner, 2);
    let mut gb = compliant_assembly("nesting");
    TypeBuilder::class("Compliant")
        // int[,][,] vs int[][,]: outermost ranks differ.
        .method("M4", |m| m.parameter("x", rank2(rank2(int()))))
        .method("M4", |m| m.parameter("x", TypeShape::array(rank2(int()))))
        // int[,][,] vs int[,][]: ranks differ one level down.
        .method("M5", |m| m.parameter("x", rank2(rank2(int()))))
        .method("M5", |m| m.parameter("x", rank2(TypeShape::array(int()))))
        .build(&mut gb)
        .unwrap();

    let found = check(&gb.finish());
    let rules: Vec<ClsRule> = found.iter().map(|d| d.rule).collect();
    assert_eq!(rules, vec![ClsRule::OverloadRefOut, ClsRule::OverloadUnnamed]);
    assert!(found[0].message.contains("'Compliant.M4(int[][*,*])'"));
    assert!(found[1].message.contains("'Compliant.M5(int[*,*][])'"));
}

#[test]
fn rank_wins_the_tie_against_unnamed_in_a_single_parameter() {
    // int[,] vs int[][]: both the rank and the unnamed dimension are
    // plausible; the rank dimension wins and exactly one finding appears.
    let mut gb = compliant_assembly("tie");
    TypeBuilder::class("Compliant")
        .method("M1", |m| m.parameter("x", TypeShape::array_of_rank(int(), 2)))
        .method("M1", |m| m.parameter("x", jagged(int())))
        .build(&mut gb)
        .unwrap();

    let found = check(&gb.finish());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].rule, ClsRule::OverloadRefOut);
}

#[test]
fn by_ref_wins_mixed_pairs_across_parameters() {
    // One slot differs by unnamed arrays, another by ref: the
    // by-reference/rank dimension takes precedence for the pair.
    let mut gb = compliant_assembly("mixed");
    TypeBuilder::class("Compliant")
        .method("M1", |m| {
            m.parameter("x", jagged(long())).parameter_ref("y", int())
        })
        .method("M1", |m| {
            m.parameter("x", jagged(char_())).parameter("y", int())
        })
        .build(&mut gb)
        .unwrap();

    let found = check(&gb.finish());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].rule, ClsRule::OverloadRefOut);
}

#[test]
fn genuinely_different_signatures_do_not_collide() {
    let mut gb = compliant_assembly("distinct");
    TypeBuilder::class("Compliant")
        // Element type of a plain array is a real distinction.
        .method("M1", |m| m.parameter("x", TypeShape::array(long())))
        .method("M1", |m| m.parameter("x", TypeShape::array(char_())))
        // Arity difference.
        .method("M2", |m| m.parameter("x", int()))
        .method("M2", |m| m.parameter("x", int()).parameter("y", int()))
        // Ref difference is moot when another slot genuinely differs.
        .method("M3", |m| m.parameter_ref("x", int()))
        .method("M3", |m| m.parameter("x", long()))
        .build(&mut gb)
        .unwrap();
    assert_rules(&gb.finish(), &[]);
}

#[test]
fn constructors_and_conversions_participate() {
    let mut gb = compliant_assembly("special");
    let c = TypeBuilder::class("C")
        .constructor(|m| m.parameter("x", jagged(long())))
        .constructor(|m| m.parameter("x", jagged(char_())))
        .build(&mut gb)
        .unwrap();
    TypeBuilder::class("D")
        .method("op_Implicit", |m| {
            m.static_().returns(TypeShape::named(c)).parameter("x", jagged(long()))
        })
        .method("op_Implicit", |m| {
            m.static_().returns(TypeShape::named(c)).parameter("x", jagged(char_()))
        })
        .build(&mut gb)
        .unwrap();

    let found = check(&gb.finish());
    let rules: Vec<ClsRule> = found.iter().map(|d| d.rule).collect();
    assert_eq!(rules, vec![ClsRule::OverloadUnnamed, ClsRule::OverloadUnnamed]);
    assert!(found[0].message.contains("'C.C(char[][])'"));
    assert!(found[1].message.contains("'D.op_Implicit(char[][])'"));
}

#[test]
fn conversions_may_overload_on_return_type_alone() {
    let mut gb = compliant_assembly("conv");
    TypeBuilder::class("C")
        .method("op_Implicit", |m| m.static_().returns(int()).parameter("x", int()))
        .method("op_Implicit", |m| m.static_().returns(long()).parameter("x", int()))
        .build(&mut gb)
        .unwrap();
    // The return slot genuinely differs, so this is an ordinary overload.
    assert_rules(&gb.finish(), &[]);
}

#[test]
fn indexers_compare_only_against_indexers() {
    let mut gb = compliant_assembly("indexers");
    TypeBuilder::class("Compliant")
        .indexer(int(), |i| i.parameter("x", jagged(long())))
        .indexer(int(), |i| i.parameter("x", jagged(char_())))
        // Same parameter shape on a method: different member kind, no pair.
        .method("Item", |m| m.parameter("x", jagged(char_())))
        .build(&mut gb)
        .unwrap();

    let found = check(&gb.finish());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].rule, ClsRule::OverloadUnnamed);
    assert!(
        found[0].message.contains("'Compliant.this[char[][]]'"),
        "{}",
        found[0].message
    );
}

#[test]
fn collisions_span_the_base_chain_and_report_on_the_derived_member() {
    let mut gb = compliant_assembly("hierarchy");
    let base = TypeBuilder::class("Base")
        .method("M", |m| m.parameter("x", jagged(long())))
        .build(&mut gb)
        .unwrap();
    TypeBuilder::class("Derived")
        .base(TypeShape::named(base))
        .method("M", |m| m.parameter("x", jagged(char_())))
        .build(&mut gb)
        .unwrap();

    let found = check(&gb.finish());
    assert_eq!(found.len(), 1);
    assert!(found[0].message.contains("'Derived.M(char[][])'"));
}

#[test]
fn wholly_inherited_pairs_are_not_rereported_in_derived_types() {
    let mut gb = compliant_assembly("hierarchy");
    let base = TypeBuilder::class("Base")
        .method("M", |m| m.parameter("x", int()))
        .method("M", |m| m.parameter_ref("x", int()))
        .build(&mut gb)
        .unwrap();
    TypeBuilder::class("Derived")
        .base(TypeShape::named(base))
        .build(&mut gb)
        .unwrap();

    let found = check(&gb.finish());
    // Exactly one finding, at the base, not repeated for Derived.
    assert_eq!(found.len(), 1);
    assert!(found[0].message.contains("'Base.M(ref int)'"));
}

#[test]
fn interface_members_participate_in_groups() {
    let mut gb = compliant_assembly("iface");
    let contract = TypeBuilder::interface("IContract")
        .method("M", |m| m.parameter("x", int()))
        .build(&mut gb)
        .unwrap();
    TypeBuilder::class("Impl")
        .implements(TypeShape::named(contract))
        .method("M", |m| m.parameter_ref("x", int()))
        .build(&mut gb)
        .unwrap();

    let found = check(&gb.finish());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].rule, ClsRule::OverloadRefOut);
    assert!(found[0].message.contains("'Impl.M(ref int)'"));
}

#[test]
fn identical_signatures_never_collide() {
    // An explicit interface implementation next to an identical implicit
    // one degrades to "same signature" and raises nothing.
    let mut gb = compliant_assembly("explicit");
    let contract = TypeBuilder::interface("IContract")
        .method("M", |m| m.parameter("x", int()))
        .build(&mut gb)
        .unwrap();
    TypeBuilder::class("Impl")
        .implements(TypeShape::named(contract))
        .method("M", |m| m.parameter("x", int()))
        .method("M", |m| m.explicit_impl().parameter("x", int()))
        .build(&mut gb)
        .unwrap();
    assert_rules(&gb.finish(), &[]);
}

#[test]
fn type_parameter_and_dynamic_arrays_are_exempt() {
    let mut gb = compliant_assembly("exempt");
    let generic = TypeBuilder::class("Generic")
        .type_param("T")
        .build(&mut gb)
        .unwrap();
    let t = gb.find_type_parameter(generic, "T").unwrap();

    TypeBuilder::class("User")
        .method("M1", |m| {
            m.parameter("x", TypeShape::array(TypeShape::TypeParameterRef(t)))
        })
        .method("M1", |m| {
            m.parameter("x", TypeShape::array_of_rank(TypeShape::TypeParameterRef(t), 2))
        })
        .method("M2", |m| m.parameter("x", TypeShape::array(TypeShape::Dynamic)))
        .method("M2", |m| m.parameter_ref("x", TypeShape::array(TypeShape::Dynamic)))
        .build(&mut gb)
        .unwrap();
    assert_rules(&gb.finish(), &[]);
}
