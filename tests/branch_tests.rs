// tests/branch_tests.rs
use magictree::{Branch, Node, Scalar, TreeNode};

// ============================================================================
// Fixture
// ============================================================================

fn planets() -> Branch {
    let mut tree = Branch::new();

    tree.get_path("colors.red.mars.species.vertebrae.intelligent.1850-1899")
        .unwrap()
        .assign("discovered", "on a sunday")
        .assign("description", "quite likeable")
        .assign("isNice", true);

    tree.get_path("colors.red.mars.species.fishlike.intelligent.1850-1899")
        .unwrap()
        .assign("discovered", "by accident")
        .assign("description", "a bit smelly")
        .assign("isNice", false);

    tree.get_path("colors.blue.pluto.species")
        .unwrap()
        .set("insects", "gasfly");

    tree
}

const PLANETS: &str = r#"- colors
  |- red
  |  |- mars
  |  |  |- species
  |  |  |  |- vertebrae
  |  |  |  |  |- intelligent
  |  |  |  |  |  |- 1850-1899
  |  |  |  |  |  |  |- discovered: "on a sunday"
  |  |  |  |  |  |  |- description: "quite likeable"
  |  |  |  |  |  |  |- isNice: true
  |  |  |  |- fishlike
  |  |  |  |  |- intelligent
  |  |  |  |  |  |- 1850-1899
  |  |  |  |  |  |  |- discovered: "by accident"
  |  |  |  |  |  |  |- description: "a bit smelly"
  |  |  |  |  |  |  |- isNice: false
  |- blue
  |  |- pluto
  |  |  |- species
  |  |  |  |- insects: "gasfly"
"#;

// ============================================================================
// Construction and rendering
// ============================================================================

#[test]
fn test_render_to_ascii() {
    assert_eq!(planets().to_ascii(0), PLANETS);
}

#[test]
fn test_fluent_navigation_matches_path_navigation() {
    let mut tree = Branch::new();
    tree.get("colors")
        .unwrap()
        .get("red")
        .unwrap()
        .get("mars")
        .unwrap()
        .get("species")
        .unwrap()
        .get("vertebrae")
        .unwrap()
        .get("intelligent")
        .unwrap()
        .get("1850-1899")
        .unwrap()
        .assign("discovered", "on a sunday");

    assert!(tree.has("colors.red.mars.species.vertebrae.intelligent.1850-1899.discovered"));
    assert!(tree
        .to_string()
        .ends_with("  |  |  |  |  |  |  |- discovered: \"on a sunday\"\n"));
}

#[test]
fn test_auto_vivification_makes_path_exist() {
    let mut tree = Branch::new();
    tree.get_path(["x", "y", "z"]).unwrap();

    assert!(tree.has(["x"]));
    assert!(tree.has(["x", "y"]));
    assert!(tree.has(["x", "y", "z"]));
    assert!(tree.is_empty());
}

#[test]
fn test_reassignment_overwrites() {
    let mut tree = Branch::new();
    let things = tree.get("things").unwrap();
    things.assign("a", "first").assign("a", "second");

    assert_eq!(things.len(), 1);
    assert_eq!(
        things.get_child("a").and_then(Node::scalar),
        Some(&Scalar::from("second"))
    );
}

#[test]
fn test_leaf_replaced_by_branch_on_assignment() {
    let mut tree = Branch::new();
    tree.set("a", 1);

    let mut nested = indexmap::IndexMap::new();
    nested.insert("b".to_string(), magictree::Value::from(2));
    tree.set("a", nested);

    assert!(tree.has("a.b"));
}

// ============================================================================
// Removal
// ============================================================================

#[test]
fn test_remove_keys() {
    let mut tree = planets();
    tree.get("colors").unwrap().remove("red");

    let expected = r#"- colors
  |- blue
  |  |- pluto
  |  |  |- species
  |  |  |  |- insects: "gasfly"
"#;
    assert_eq!(tree.to_string(), expected);
}

// ============================================================================
// Filter
// ============================================================================

#[test]
fn test_filter_with_a_decider() {
    let mut tree = planets();
    tree.filter(|node| {
        node.find("isNice")
            .and_then(Node::scalar)
            .and_then(Scalar::as_bool)
            == Some(true)
    });

    let expected = r#"- colors
  |- red
  |  |- mars
  |  |  |- species
  |  |  |  |- vertebrae
  |  |  |  |  |- intelligent
  |  |  |  |- fishlike
  |  |  |  |  |- intelligent
  |  |  |  |  |  |- 1850-1899
  |  |  |  |  |  |  |- discovered: "by accident"
  |  |  |  |  |  |  |- description: "a bit smelly"
  |  |  |  |  |  |  |- isNice: false
  |- blue
  |  |- pluto
  |  |  |- species
  |  |  |  |- insects: "gasfly"
"#;
    assert_eq!(tree.to_string(), expected);
}

#[test]
fn test_filter_does_not_visit_removed_descendants() {
    let mut tree = planets();
    let mut seen = Vec::new();

    tree.filter(|node| {
        let is_red = node.has("mars");
        seen.push(node.to_ascii(0));
        is_red
    });

    assert!(!tree.has("colors.red"));
    // red's descendants never reach the decider
    assert!(!seen.iter().any(|s| s.starts_with("- species\n  |- vertebrae")));
    assert!(seen.iter().any(|s| s.starts_with("- species\n  |- insects")));
}

// ============================================================================
// Where
// ============================================================================

#[test]
fn test_execute_a_method_where_a_key_is_found() {
    let mut tree = planets();
    tree.where_key("1850-1899", |branch| {
        let discovered = branch
            .get_child("discovered")
            .and_then(Node::scalar)
            .map(|s| s.to_string())
            .unwrap_or_default();
        branch.set("discoverdMutated", format!("{}!", discovered));
    });

    let expected = r#"- colors
  |- red
  |  |- mars
  |  |  |- species
  |  |  |  |- vertebrae
  |  |  |  |  |- intelligent
  |  |  |  |  |  |- 1850-1899
  |  |  |  |  |  |  |- discovered: "on a sunday"
  |  |  |  |  |  |  |- description: "quite likeable"
  |  |  |  |  |  |  |- isNice: true
  |  |  |  |  |  |  |- discoverdMutated: "on a sunday!"
  |  |  |  |- fishlike
  |  |  |  |  |- intelligent
  |  |  |  |  |  |- 1850-1899
  |  |  |  |  |  |  |- discovered: "by accident"
  |  |  |  |  |  |  |- description: "a bit smelly"
  |  |  |  |  |  |  |- isNice: false
  |  |  |  |  |  |  |- discoverdMutated: "by accident!"
  |- blue
  |  |- pluto
  |  |  |- species
  |  |  |  |- insects: "gasfly"
"#;
    assert_eq!(tree.to_string(), expected);
}

#[test]
fn test_where_skips_leaves_with_matching_key() {
    let mut tree = Branch::new();
    tree.set("target", "leaf");
    tree.get("nested").unwrap().get("target").unwrap().set("x", 1);

    let mut visits = 0;
    tree.where_key("target", |_| visits += 1);
    assert_eq!(visits, 1);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_sortable_by_key() {
    let mut tree = Branch::new();
    tree.get("things")
        .unwrap()
        .assign("b", "second")
        .assign("c", "third")
        .assign("a", "first");

    tree.get("things")
        .unwrap()
        .sort_keys_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));

    let expected = r#"- things
  |- a: "first"
  |- b: "second"
  |- c: "third"
"#;
    assert_eq!(tree.to_string(), expected);
}

#[test]
fn test_sortable_by_value() {
    let mut tree = Branch::new();
    tree.get_path("things.id1").unwrap().set("myvalue", "beta");
    tree.get_path("things.id2").unwrap().set("myvalue", "alfa");
    tree.get_path("things.id3").unwrap().set("myvalue", "gamma");

    fn myvalue(node: &Node) -> Option<&str> {
        node.find("myvalue").and_then(Node::scalar).and_then(Scalar::as_str)
    }
    tree.get("things")
        .unwrap()
        .sort_values_by(|left, right| myvalue(left).cmp(&myvalue(right)));

    let expected = r#"- things
  |- id2
  |  |- myvalue: "alfa"
  |- id1
  |  |- myvalue: "beta"
  |- id3
  |  |- myvalue: "gamma"
"#;
    assert_eq!(tree.to_string(), expected);
}

#[test]
fn test_sort_is_not_recursive() {
    let mut tree = Branch::new();
    tree.get("b").unwrap().assign("z", 1).assign("y", 2);
    tree.set("a", 0);

    tree.sort_keys_by(|a, b| a.cmp(b));

    assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    let b = tree.get_child("b").and_then(Node::as_branch).unwrap();
    assert_eq!(b.keys().collect::<Vec<_>>(), vec!["z", "y"]);
}

// ============================================================================
// Size and emptiness
// ============================================================================

#[test]
fn test_count_of_branch_children() {
    let mut tree = Branch::new();
    tree.get("things")
        .unwrap()
        .assign("b", "second")
        .assign("c", "third")
        .assign("a", "first");

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.get("things").unwrap().len(), 3);
}

#[test]
fn test_confirm_or_deny_being_empty() {
    let empty = Branch::new();
    let leaf = Node::from_value(2);

    assert!(empty.is_empty());
    assert!(!leaf.is_empty());

    let mut non_empty = Branch::new();
    non_empty.get("branchA").unwrap().assign("something", 5);
    assert!(!non_empty.is_empty());
}

#[test]
fn test_emptiness_is_recursive() {
    let mut tree = Branch::new();
    tree.get_path("a.b.c").unwrap();
    tree.get_path("d").unwrap();
    assert!(tree.is_empty());

    tree.get_path("a.b").unwrap().set("flag", false);
    assert!(!tree.is_empty());

    let mut with_empty_string = Branch::new();
    with_empty_string.set("s", "");
    assert!(!with_empty_string.is_empty());
}

// ============================================================================
// Reading values
// ============================================================================

#[test]
fn test_getting_a_leaf_returns_its_value() {
    let mut branch = Branch::new();
    branch.assign("integer", 5);
    assert_eq!(branch.read("integer").as_scalar().and_then(Scalar::as_i64), Some(5));

    branch.assign("string", "MagicTree Rules");
    assert_eq!(
        branch.read("string").as_scalar().and_then(Scalar::as_str),
        Some("MagicTree Rules")
    );
}
