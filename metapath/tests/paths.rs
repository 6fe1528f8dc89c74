use metapath::{Error, Item, NodeKind};
use rstest::rstest;

mod common;

use common::{catalog, run_catalog, run_with_focus, strings};

fn catalog_strings(s: &str) -> Vec<String> {
    strings(&run_catalog(s).unwrap())
}

#[rstest]
#[case("/catalog/@id", &["c1"])]
#[case("/catalog/title", &["Catalog"])]
#[case("//control/@id", &["ac-1", "ac-2", "au-1"])]
#[case("//control[@class = 'policy']/title", &["Access Policy", "Audit Policy"])]
#[case("//group[2]/control/@id", &["au-1"])]
#[case("//control[1]/@id", &["ac-1", "au-1"])]
#[case("(//control)[last()]/@id", &["au-1"])]
#[case("(//control)[position() lt 3]/@id", &["ac-1", "ac-2"])]
#[case("/catalog/group/control[title = 'Account Management']/@id", &["ac-2"])]
#[case("//control[not(@class)]/@id", &["ac-2"])]
#[case("//control/title/string()", &["Access Policy", "Account Management", "Audit Policy"])]
#[case("//group ! @id", &["g1", "g2"])]
#[case("//title[. = 'Audit Policy']/ancestor::*/@id", &["c1", "g2", "au-1"])]
#[case("//title[. = 'Audit Policy']/ancestor::*[1]/@id", &["au-1"])]
#[case("//control[@id = 'ac-2']/preceding-sibling::control/@id", &["ac-1"])]
#[case("//control[@id = 'ac-1']/following-sibling::*/@id", &["ac-2"])]
#[case("//control[@id = 'ac-2']/following::control/@id", &["au-1"])]
#[case("//control[@id = 'ac-2']/preceding::control/@id", &["ac-1"])]
#[case("//control[@id = 'ac-2']/../@id", &["g1"])]
#[case("//control[@id = 'au-1']/parent::group/@id", &["g2"])]
#[case("/catalog/group[1]/descendant::title", &["Access Policy", "Account Management"])]
#[case("/catalog/group[1]/descendant-or-self::*/@id", &["g1", "ac-1", "ac-2"])]
#[case("/catalog/self::catalog/@id", &["c1"])]
#[case("/catalog/*/@id", &["g1", "g2"])]
#[case("/catalog/field()", &["Catalog"])]
#[case("//assembly(control)/@id", &["ac-1", "ac-2", "au-1"])]
#[case("//control/flag(class)", &["policy", "policy"])]
#[case("//control/@*[1]", &["ac-1", "ac-2", "au-1"])]
fn test_path(#[case] expression: &str, #[case] expected: &[&str]) {
    assert_eq!(catalog_strings(expression), expected);
}

#[test]
fn test_path_results_are_in_document_order_without_duplicates() {
    assert_eq!(
        catalog_strings("(//control | //group | //control)/@id"),
        ["g1", "ac-1", "ac-2", "g2", "au-1"]
    );
    assert_eq!(
        catalog_strings("//title/ancestor::group/@id"),
        ["g1", "g2"]
    );
}

#[test]
fn test_intersect_except() {
    assert_eq!(
        catalog_strings("(//control except //control[@class])/@id"),
        ["ac-2"]
    );
    assert_eq!(
        catalog_strings("(//control intersect //group[1]/control)/@id"),
        ["ac-1", "ac-2"]
    );
}

#[test]
fn test_node_comparison() {
    assert_eq!(
        catalog_strings("(//control)[1] is //control[@id = 'ac-1']"),
        ["true"]
    );
    assert_eq!(catalog_strings("(//control)[1] << (//control)[2]"), ["true"]);
    assert_eq!(catalog_strings("(//control)[1] >> (//control)[2]"), ["false"]);
    assert_eq!(catalog_strings("() is (//control)[1]").len(), 0);
}

#[test]
fn test_root() {
    let result = run_catalog("/").unwrap();
    let node = result.one().unwrap().to_node().unwrap();
    assert_eq!(node.node_kind(), NodeKind::Document);
    let result = run_catalog("root((//control)[1])").unwrap();
    let node = result.one().unwrap().to_node().unwrap();
    assert_eq!(node.node_kind(), NodeKind::Document);
}

#[test]
fn test_path_base_must_be_nodes() {
    assert_eq!(run_catalog("(1, 2)/title"), Err(Error::MPTY0019));
}

#[test]
fn test_mixed_path_result() {
    assert_eq!(
        run_catalog("/catalog/(title, 'x')"),
        Err(Error::MPTY0004)
    );
}

#[test]
fn test_root_on_non_node() {
    let focus: Item = metapath::Atomic::from("x").into();
    assert_eq!(run_with_focus("/", Some(focus)), Err(Error::MPTY0020));
}

#[test]
fn test_node_accessors() {
    assert_eq!(
        catalog_strings("path(//control[@id = 'au-1'])"),
        ["/catalog[1]/group[2]/control[1]"]
    );
    assert_eq!(
        catalog_strings("path(//control[@id = 'ac-2']/@id)"),
        ["/catalog[1]/group[1]/control[2]/@id"]
    );
    assert_eq!(
        catalog_strings("document-uri(/)"),
        ["http://example.com/catalog.json"]
    );
    assert_eq!(catalog_strings("name(/catalog)"), ["catalog"]);
    assert_eq!(catalog_strings("local-name((//control)[1]/@class)"), ["class"]);
    assert_eq!(catalog_strings("has-children(/catalog/group[1])"), ["true"]);
    assert_eq!(catalog_strings("has-children(/catalog/title)"), ["false"]);
    assert_eq!(catalog_strings("count(innermost(//group | //control))"), ["3"]);
    assert_eq!(catalog_strings("count(outermost(//group | //control))"), ["2"]);
}

#[test]
fn test_atomization() {
    assert_eq!(catalog_strings("data(//control/@id)"), ["ac-1", "ac-2", "au-1"]);
    assert_eq!(catalog_strings("//control/@id = 'ac-2'"), ["true"]);
    assert_eq!(run_catalog("data(/catalog)"), Err(Error::FOTY0012));
}

#[test]
fn test_focus_on_inner_node() {
    let document = catalog();
    let control = run_with_focus("(//control)[2]", Some(document.root().into()))
        .unwrap()
        .one()
        .unwrap();
    let result = run_with_focus("@id || ': ' || title", Some(control)).unwrap();
    assert_eq!(strings(&result), ["ac-2: Account Management"]);
}
