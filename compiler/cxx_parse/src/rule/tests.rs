use cxx_peg::RuleId;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn ids_follow_declaration_order() {
    for (index, rule) in CxxRule::ALL.iter().enumerate() {
        assert_eq!(rule.id().index(), index);
        assert_eq!(CxxRule::from_id(rule.id()), Some(*rule));
    }
    assert_eq!(CxxRule::from_id(RuleId::from_raw(u32::MAX)), None);
}

#[test]
fn names_are_unique() {
    let mut names: Vec<_> = CxxRule::ALL.iter().map(|r| r.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), CxxRule::ALL.len());
}

#[test]
fn rules_are_node_types() {
    assert_eq!(
        NodeType::from(CxxRule::ClassSpecifier),
        NodeType::Rule(CxxRule::ClassSpecifier.id())
    );
}
