//! End-to-end navigation tests over fixture documents
//!
//! Exercises locating and copying together the way a caller would: load a
//! document, ask which paths exist, then copy exactly those.

use std::path::PathBuf;

use jsonbranch_core::{NavigateConfig, NavigateError, PathLocator, TreeExtractor};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn catalog() -> Value {
    let content = std::fs::read_to_string(fixtures_dir().join("catalog.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

mod locate_then_copy {
    use super::*;
    use pretty_assertions::assert_eq;

    // Branches of different paths through the same array are appended, not
    // zipped together by position.
    #[test]
    fn copies_only_located_paths() {
        let source = catalog();
        let candidates = [
            "store.name",
            "store.address.geo",
            "books.title",
            "books.isbn",
            "books.title.first",
            "books.authors.born",
            "missing",
        ];

        let found = PathLocator::new(candidates)
            .find(source.as_object())
            .unwrap();
        assert_eq!(
            found,
            ["store.name", "store.address.geo", "books.title", "books.authors.born"]
        );

        let copy = TreeExtractor::new(found.iter().cloned())
            .copy(source.as_object())
            .unwrap();
        assert_eq!(
            copy,
            Some(json!({
                "store": {
                    "name": "Corner Books",
                    "address": { "geo": { "lat": 45.76, "lng": 4.83 } }
                },
                "books": [
                    { "title": "Dune" },
                    { "title": "Emma" },
                    { "title": "Good Omens" },
                    { "authors": [{ "born": 1920 }] },
                    { "authors": [{ "born": 1775 }] },
                    { "authors": [{ "born": 1948 }] }
                ]
            }))
        );
    }

    #[test]
    fn copy_of_located_paths_locates_the_same() {
        let source = catalog();
        let candidates = ["store.open", "books.tags", "books.price", "discontinued", "meta"];

        let found = PathLocator::new(candidates)
            .find(source.as_object())
            .unwrap();
        let copy = TreeExtractor::new(found.iter().cloned())
            .copy(source.as_object())
            .unwrap()
            .unwrap();

        let again = PathLocator::new(candidates).find(copy.as_object()).unwrap();
        assert_eq!(again, found);
    }
}

mod copy_scenarios {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    #[case::null_leaf(&["discontinued"], json!({ "discontinued": null }))]
    #[case::empty_object(&["meta"], json!({ "meta": {} }))]
    #[case::array_of_strings(
        &["books.tags"],
        json!({ "books": [{ "tags": ["sf", "classic"] }, { "tags": [] }] })
    )]
    #[case::sparse_nested_array(
        &["books.authors.born"],
        json!({ "books": [
            { "authors": [{ "born": 1920 }] },
            { "authors": [{ "born": 1775 }] },
            { "authors": [{ "born": 1948 }] }
        ] })
    )]
    #[case::overlapping_paths(
        &["store.address", "store.address.city"],
        json!({ "store": { "address": {
            "city": "Lyon",
            "zip": "69001",
            "geo": { "lat": 45.76, "lng": 4.83 }
        } } })
    )]
    fn test_copy(#[case] paths: &[&str], #[case] expected: Value) {
        let source = catalog();
        let copy = TreeExtractor::new(paths.iter().copied())
            .copy(source.as_object())
            .unwrap();
        assert_eq!(copy, Some(expected));
    }

    #[test]
    fn path_past_a_leaf_aborts_the_copy() {
        let source = catalog();
        let err = TreeExtractor::new(["store.name", "store.open.since"])
            .copy(source.as_object())
            .unwrap_err();

        match err {
            NavigateError::PathShorterThanSource { path, remaining } => {
                assert_eq!(path, "store.open.since");
                assert_eq!(remaining, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn source_is_not_modified() {
        let source = catalog();
        let before = source.clone();
        TreeExtractor::new(["books.authors.name", "store"])
            .copy(source.as_object())
            .unwrap();
        assert_eq!(source, before);
    }
}

mod configuration {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn slash_delimited_paths_from_config_file() {
        let config = NavigateConfig::from_file(fixtures_dir().join("catalog_slash.jsonc")).unwrap();
        let source = json!({ "v1.2": { "notes": "x", "build": 7 } });

        let found = PathLocator::new(["v1.2/build", "v1.2/missing"])
            .with_config(config.clone())
            .find(source.as_object())
            .unwrap();
        assert_eq!(found, ["v1.2/build"]);

        let copy = TreeExtractor::new(found)
            .with_config(config)
            .copy(source.as_object())
            .unwrap();
        assert_eq!(copy, Some(json!({ "v1.2": { "build": 7 } })));
    }
}
