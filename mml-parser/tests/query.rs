//! Query engine scenarios

use mml_parser::mml::testing::assert_doc;
use mml_parser::{Document, Dom, NodeKind, Selection};

#[test]
fn test_bulk_set_attributes_scenario() {
    let mut dom = Dom::new();
    dom.set_document(
        r#"<!-- @c id="root" --><!-- @n id="n1" type="x" -->hello<!-- /@n --><!-- /@c -->"#,
    )
    .unwrap();

    dom.query_mut()
        .unwrap()
        .where_attrs([("type", "x")])
        .bulk_set_attributes([("status", "done")])
        .unwrap();

    let text = dom.get_document().unwrap();
    let doc = Document::parse(&text).unwrap();
    assert_doc(&doc).node("n1", |n| {
        n.attr_keys(&["type", "status"])
            .attr("type", "x")
            .attr("status", "done")
            .text("hello")
    });
}

#[test]
fn test_bulk_delete_counts_only_the_matched_container() {
    let mut dom = Dom::new();
    dom.set_document(concat!(
        r#"<!-- @c id="root" -->"#,
        r#"<!-- @c id="box" kind="box" -->"#,
        r#"<!-- @n id="c1" -->one<!-- /@n -->"#,
        r#"<!-- @n id="c2" -->two<!-- /@n -->"#,
        r#"<!-- /@c -->"#,
        r#"<!-- /@c -->"#,
    ))
    .unwrap();

    let removed = dom
        .query_mut()
        .unwrap()
        .where_attrs([("kind", "box")])
        .bulk_delete()
        .unwrap();
    assert_eq!(removed, 1);

    let doc = dom.document().unwrap();
    assert!(!doc.exists("c1"));
    assert!(!doc.exists("c2"));
    assert!(!doc.exists("box"));
}

#[test]
fn test_chained_filters_do_not_touch_earlier_queries() {
    let mut dom = Dom::new();
    dom.set_document(concat!(
        r#"<!-- @n id="a" type="x" -->a<!-- /@n -->"#,
        r#"<!-- @n id="b" type="x" -->b<!-- /@n -->"#,
        r#"<!-- @n id="c" type="y" -->c<!-- /@n -->"#,
    ))
    .unwrap();

    let base = dom.query().unwrap().where_type(NodeKind::Content);
    let xs = base.clone().where_attrs([("type", "x")]);
    let not_a = xs.clone().where_not(["a"]);

    assert_eq!(base.get_ids(), vec!["a", "b", "c"]);
    assert_eq!(xs.get_ids(), vec!["a", "b"]);
    assert_eq!(not_a.clone().where_attrs([("type", "x")]).get_ids(), vec!["b"]);
    assert_eq!(not_a.where_in("type", ["x", "y"]).get_ids(), vec!["b"]);
}

#[test]
fn test_bulk_operations_chain_on_one_match_set() {
    let mut dom = Dom::new();
    dom.set_document(concat!(
        r#"<!-- @c id="root" -->"#,
        r#"<!-- @c id="inbox" --><!-- /@c -->"#,
        r#"<!-- @c id="todo" -->"#,
        r#"<!-- @n id="t1" due="3" -->write<!-- /@n -->"#,
        r#"<!-- @n id="t2" due="1" -->read<!-- /@n -->"#,
        r#"<!-- /@c -->"#,
        r#"<!-- /@c -->"#,
    ))
    .unwrap();

    let mut query = dom.query_mut().unwrap().where_container("todo", false);
    query
        .bulk_set_content(|old, attrs| format!("[{}] {old}", attrs.get("due").unwrap_or("?")))
        .unwrap()
        .bulk_move("inbox")
        .unwrap()
        .sort_parents_children("due", false)
        .unwrap();
    assert_eq!(query.skipped(), 0);

    let doc = dom.document().unwrap();
    assert_doc(doc)
        .node("inbox", |c| c.child_ids(&["t2", "t1"]))
        .node("todo", |c| c.child_count(0))
        .node("t1", |n| n.text("[3] write"));
}

#[test]
fn test_fragment_filter_and_lambda() {
    let mut dom = Dom::new();
    dom.set_document(concat!(
        r#"<!-- @n id="a" -->x <!-- %genre -->noir<!-- /%genre --><!-- /@n -->"#,
        r#"<!-- @n id="b" -->plain<!-- /@n -->"#,
    ))
    .unwrap();

    let query = dom.query().unwrap();
    assert_eq!(query.clone().where_has_fragment("genre").get_ids(), vec!["a"]);
    assert_eq!(
        query
            .where_lambda(|id, _| id.len() == 1)
            .get_ids(),
        vec!["a", "b"]
    );
}
