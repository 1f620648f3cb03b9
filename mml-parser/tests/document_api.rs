//! Document API contracts

use mml_parser::mml::ast::ROOT_ID;
use mml_parser::{Document, MmlError, NodeKind};
use proptest::prelude::*;
use rstest::rstest;

const NO_ATTRS: [(&str, &str); 0] = [];

const GENRES: &str = "Genres: <!-- %genre -->horror<!-- /%genre -->, \
                      <!-- %genre -->mystery<!-- /%genre --> and \
                      <!-- %genre -->romance<!-- /%genre -->.";

#[test]
fn test_update_content_on_container_fails() {
    let mut doc = Document::new();
    let container = doc.create_container(ROOT_ID, NO_ATTRS).unwrap();
    let err = doc.update_content(&container, "text").unwrap_err();
    assert!(matches!(err, MmlError::InvalidOperation(_)));
}

#[rstest]
#[case("plain")]
#[case("  padded and\nmulti line  ")]
#[case(GENRES)]
#[case("<!-- just a comment -->")]
fn test_create_node_reads_back_supplied_text(#[case] text: &str) {
    let mut doc = Document::new();
    let id = doc.create_node(text, ROOT_ID, NO_ATTRS).unwrap();
    assert_eq!(doc.read_content(&id).unwrap(), text);
    assert_eq!(doc.read_type(&id).unwrap(), NodeKind::Content);
}

#[test]
fn test_fragment_indexing() {
    let mut doc = Document::new();
    let id = doc.create_node(GENRES, ROOT_ID, NO_ATTRS).unwrap();

    let fragments = doc.get_fragments(&id, Some("genre")).unwrap();
    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments["genre"], vec!["horror", "mystery", "romance"]);

    doc.update_fragment(&id, "genre", 1, "X").unwrap();
    assert_eq!(
        doc.get_fragments(&id, Some("genre")).unwrap()["genre"],
        vec!["horror", "X", "romance"]
    );
    assert_eq!(
        doc.read_content(&id).unwrap(),
        "Genres: <!-- %genre -->horror<!-- /%genre -->, \
         <!-- %genre -->X<!-- /%genre --> and \
         <!-- %genre -->romance<!-- /%genre -->."
    );

    let err = doc.update_fragment(&id, "genre", 3, "Y").unwrap_err();
    assert!(err.is_invalid_operation());
}

#[test]
fn test_fragment_edits_survive_serialization() {
    let mut doc = Document::new();
    let id = doc.create_node(GENRES, ROOT_ID, NO_ATTRS).unwrap();
    doc.update_fragment(&id, "genre", 2, "drama").unwrap();

    let reparsed = Document::parse(&doc.serialize()).unwrap();
    assert_eq!(
        reparsed.get_fragments(&id, None).unwrap()["genre"],
        vec!["horror", "mystery", "drama"]
    );
}

#[test]
fn test_generate_fragment_markup_is_parsed_back() {
    let markup = Document::generate_fragment_markup("mood", "calm");
    assert_eq!(markup, "<!-- %mood -->calm<!-- /%mood -->");

    let mut doc = Document::new();
    let id = doc
        .create_node(&format!("It was {markup}."), ROOT_ID, NO_ATTRS)
        .unwrap();
    assert_eq!(doc.get_fragments(&id, None).unwrap()["mood"], vec!["calm"]);
}

#[test]
fn test_cycle_prevention_leaves_tree_unchanged() {
    let mut doc = Document::new();
    let a = doc.create_container(ROOT_ID, NO_ATTRS).unwrap();
    let mid = doc.create_container(&a, NO_ATTRS).unwrap();
    let b = doc.create_container(&mid, NO_ATTRS).unwrap();
    let before = doc.serialize();

    let err = doc.move_node(&a, &b, None).unwrap_err();
    assert!(err.is_invalid_operation());
    assert_eq!(doc.serialize(), before);
    assert_eq!(doc.read_parent(&b).unwrap(), Some(mid.as_str()));
}

#[test]
fn test_stale_ids_are_not_found() {
    let mut doc = Document::new();
    let id = doc.create_node("x", ROOT_ID, NO_ATTRS).unwrap();
    doc.delete_node(&id).unwrap();

    assert!(doc.read_content(&id).unwrap_err().is_not_found());
    assert!(doc.read_attributes(&id).unwrap_err().is_not_found());
    assert!(doc.read_parent(&id).unwrap_err().is_not_found());
    assert!(!doc.exists(&id));
}

#[test]
fn test_attribute_values_without_escaping_rule_fail_fast() {
    let mut doc = Document::new();
    for value in ["say \"hi\"", "a --> b", "two\nlines"] {
        let err = doc.update_attribute(ROOT_ID, "k", value).unwrap_err();
        assert!(err.is_invalid_operation(), "{value:?}");
    }
    for key in ["", "1abc", "has space", "id"] {
        let err = doc.update_attribute(ROOT_ID, key, "v").unwrap_err();
        assert!(err.is_invalid_operation(), "{key:?}");
    }
}

#[test]
fn test_parsed_arrow_value_is_kept_but_cannot_be_written() {
    let mut doc =
        Document::parse(r#"<!-- @c id="root" note="x-->y" --><!-- /@c -->"#).unwrap();
    assert_eq!(doc.read_attribute(ROOT_ID, "note").unwrap(), Some("x-->y"));

    let reparsed = Document::parse(&doc.serialize()).unwrap();
    assert_eq!(reparsed.read_attribute(ROOT_ID, "note").unwrap(), Some("x-->y"));

    let err = doc.update_attribute(ROOT_ID, "note", "a-->b").unwrap_err();
    assert!(err.is_invalid_operation());
    assert_eq!(doc.read_attribute(ROOT_ID, "note").unwrap(), Some("x-->y"));
}

#[test]
fn test_text_store_trims_content_and_drops_blank_nodes() {
    let mut doc = Document::new();
    let padded = doc.create_node("  padded  ", ROOT_ID, NO_ATTRS).unwrap();
    let blank = doc.create_node("", ROOT_ID, NO_ATTRS).unwrap();
    let slot = doc.create_node("", ROOT_ID, [("role", "slot")]).unwrap();
    assert_eq!(doc.read_content(&padded).unwrap(), "  padded  ");
    assert!(doc.exists(&blank));

    let reparsed = Document::parse(&doc.serialize()).unwrap();
    assert_eq!(reparsed.read_content(&padded).unwrap(), "padded");
    assert!(!reparsed.exists(&blank));
    assert_eq!(reparsed.read_content(&slot).unwrap(), "");
}

#[test]
fn test_sort_children_by_content() {
    let mut doc = Document::new();
    for word in ["pear", "apple", "fig"] {
        doc.create_node(word, ROOT_ID, NO_ATTRS).unwrap();
    }
    doc.sort_children(ROOT_ID, |node| node.text().unwrap_or_default())
        .unwrap();
    let texts: Vec<String> = doc
        .read_children(ROOT_ID)
        .unwrap()
        .iter()
        .map(|id| doc.read_content(id).unwrap())
        .collect();
    assert_eq!(texts, vec!["apple", "fig", "pear"]);
}

#[derive(Debug, Clone)]
enum Op {
    Container(usize),
    Node(usize),
    Delete(usize),
    Move(usize, usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<usize>().prop_map(Op::Container),
        any::<usize>().prop_map(Op::Node),
        any::<usize>().prop_map(Op::Delete),
        (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Move(a, b)),
    ]
}

proptest! {
    #[test]
    fn ids_stay_unique_under_random_edits(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut doc = Document::new();
        let mut ever_issued = std::collections::HashSet::new();

        for op in ops {
            let ids = doc.all_ids();
            let containers: Vec<&String> = ids
                .iter()
                .filter(|id| doc.get(id).is_some_and(|n| n.is_container()))
                .collect();
            let pick = |i: usize| ids[i % ids.len()].clone();
            let pick_container = |i: usize| containers[i % containers.len()].clone();

            let created = match op {
                Op::Container(i) => Some(doc.create_container(&pick_container(i), NO_ATTRS).unwrap()),
                Op::Node(i) => Some(doc.create_node("t", &pick_container(i), NO_ATTRS).unwrap()),
                Op::Delete(i) => {
                    let _ = doc.delete_node(&pick(i));
                    None
                }
                Op::Move(i, j) => {
                    let _ = doc.move_node(&pick(i), &pick_container(j), None);
                    None
                }
            };
            if let Some(id) = created {
                prop_assert!(ever_issued.insert(id), "id reused");
            }

            let live = doc.all_ids();
            let unique: std::collections::HashSet<_> = live.iter().collect();
            prop_assert_eq!(unique.len(), live.len());
            prop_assert_eq!(live.len(), doc.node_count());
        }
    }
}
