//! Architecture contract tests.

mod support;

use support::architecture::SourceTree;

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let offences = SourceTree::load("src/domain").mentions(&[
        "crate::adapter",
        "crate::infrastructure",
        "crate::application",
        "crate::port",
        "tokio::",
        "reqwest::",
        "diesel::",
    ]);

    assert!(
        offences.is_empty(),
        "found forbidden imports in domain layer: {offences:#?}"
    );
}

#[test]
fn application_depends_only_on_ports() {
    let offences = SourceTree::load("src/application").mentions(&[
        "crate::adapter",
        "crate::infrastructure",
        "reqwest::",
        "diesel::",
    ]);

    assert!(
        offences.is_empty(),
        "found adapter or infrastructure imports in application layer: {offences:#?}"
    );
}

#[test]
fn ports_do_not_reach_into_adapters() {
    let offences = SourceTree::load("src/port").mentions(&[
        "crate::adapter",
        "crate::infrastructure",
        "crate::application",
    ]);

    assert!(offences.is_empty(), "found outer layer imports in ports: {offences:#?}");
}

#[test]
fn mod_rs_is_export_only() {
    let offences = SourceTree::load("src").mod_file_bodies();
    assert!(
        offences.is_empty(),
        "found non-export content in mod.rs files: {offences:#?}"
    );
}

#[test]
fn source_tree_sees_nested_modules() {
    let tree = SourceTree::load("src");
    let hits = tree.mentions(&["pub trait PriceStore"]);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].file, "src/port/outbound/store.rs");
}
