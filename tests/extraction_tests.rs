//! End-to-end extraction scenarios driven through the public API.

use serde_json::{Map, Value, json};
use webmap::{Pointer, RuleIndex, WalkError};

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Collects every visit as a `(path, flattened values)` pair.
fn collect_visits(index: &RuleIndex, url: &str, doc: &Value) -> Vec<(String, Value)> {
    let mut visits = Vec::new();
    index
        .parse(url, doc, |path, ctx| {
            visits.push((path.to_string(), Value::Object(ctx.values())));
            Ok(())
        })
        .expect("walk failed");
    visits
}

#[test]
fn wiki_revisions_scenario() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    // A query-API response: one page with a title and a list of revisions,
    // each revision contributing its author on top of the page's scope.
    let index = RuleIndex::from_json(
        r#"{
            "https://wiki.example.org/w/api.php?action=query&prop=revisions": {
                "/query/pages": [{
                    "/title": "title",
                    "/revisions": [{ "/user": "user" }]
                }]
            }
        }"#,
    )?;

    let doc = json!({
        "query": {
            "pages": [{
                "title": "Main Page",
                "revisions": [
                    { "user": "alice", "minor": true },
                    { "user": "bob" },
                    { "user": "carol" }
                ]
            }]
        }
    });

    let visits = collect_visits(
        &index,
        "https://wiki.example.org/w/api.php?action=query&prop=revisions",
        &doc,
    );
    assert_eq!(
        visits,
        vec![
            (
                "/query/pages/0".to_string(),
                json!({ "title": "Main Page" })
            ),
            (
                "/query/pages/0/revisions/0".to_string(),
                json!({ "title": "Main Page", "user": "alice" })
            ),
            (
                "/query/pages/0/revisions/1".to_string(),
                json!({ "title": "Main Page", "user": "bob" })
            ),
            (
                "/query/pages/0/revisions/2".to_string(),
                json!({ "title": "Main Page", "user": "carol" })
            ),
        ]
    );
    Ok(())
}

#[test]
fn search_results_with_tag_fanout() -> TestResult {
    let index = RuleIndex::compile(&json!({
        "https://api.example.org/search": {
            "/q": {
                "/results": [{ "/id": "id", "/tags": ["t"] }],
            },
        },
    }))?;

    let doc = json!({ "q": { "results": [{ "id": 1, "tags": ["x", "y"] }] } });
    let visits = collect_visits(&index, "https://api.example.org/search", &doc);
    assert_eq!(
        visits,
        vec![
            ("/q/results/0".to_string(), json!({ "id": 1 })),
            (
                "/q/results/0/tags/0".to_string(),
                json!({ "id": 1, "t": "x" })
            ),
            (
                "/q/results/0/tags/1".to_string(),
                json!({ "id": 1, "t": "y" })
            ),
        ]
    );
    Ok(())
}

#[test]
fn best_effort_extraction_over_sparse_responses() -> TestResult {
    // The same rule set covers richer and poorer response shapes without
    // any defensive checks: absent branches are silently skipped.
    let index = RuleIndex::compile(&json!({
        "https://api.example.org/user": {
            "/login": "login",
            "/profile": { "/email": "email" },
        },
    }))?;

    let full = collect_visits(
        &index,
        "https://api.example.org/user",
        &json!({ "login": "ada", "profile": { "email": "ada@example.org" } }),
    );
    assert_eq!(full.len(), 2);

    let sparse = collect_visits(
        &index,
        "https://api.example.org/user",
        &json!({ "login": "ada" }),
    );
    assert_eq!(sparse, vec![("".to_string(), json!({ "login": "ada" }))]);

    let empty = collect_visits(&index, "https://api.example.org/user", &json!({}));
    assert!(empty.is_empty());
    Ok(())
}

#[test]
fn visitor_error_aborts_across_nesting_levels() -> TestResult {
    let index = RuleIndex::compile(&json!({
        "u": { "/pages": [{ "/t": "t", "/revs": [{ "/u": "u" }] }] },
    }))?;
    let doc = json!({
        "pages": [
            { "t": "a", "revs": [{ "u": "r1" }, { "u": "r2" }] },
            { "t": "b", "revs": [{ "u": "r3" }] },
        ]
    });

    let mut paths = Vec::new();
    let err = index
        .parse("u", &doc, |path, _| {
            paths.push(path.to_string());
            if paths.len() == 2 {
                return Err("enough".into());
            }
            Ok(())
        })
        .unwrap_err();

    // The failing visit was at the first revision; neither its sibling nor
    // the second page was visited.
    assert_eq!(paths, vec!["/pages/0", "/pages/0/revs/0"]);
    assert!(matches!(err, WalkError::Visitor { ptr, .. } if ptr == "/pages/0/revs/0"));
    Ok(())
}

#[test]
fn retained_paths_must_be_cloned() -> TestResult {
    // The pointer handed to the visitor is reused in place; cloning it is
    // the documented way to keep it.
    let index = RuleIndex::compile(&json!({ "u": [{ "/id": "id" }] }))?;
    let doc = json!([{ "id": 1 }, { "id": 2 }]);

    let mut kept: Vec<Pointer> = Vec::new();
    index.parse("u", &doc, |path, _| {
        kept.push(path.clone());
        Ok(())
    })?;
    assert_eq!(kept[0].to_string(), "/0");
    assert_eq!(kept[1].to_string(), "/1");
    Ok(())
}

#[test]
fn one_index_shared_across_threads() -> TestResult {
    let index = RuleIndex::compile(&json!({
        "u": { "/items": [{ "/v": "v" }] },
    }))?;
    let doc = json!({ "items": [{ "v": 1 }, { "v": 2 }, { "v": 3 }] });

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let mut values: Vec<Map<String, Value>> = Vec::new();
                index
                    .parse("u", &doc, |_, ctx| {
                        values.push(ctx.values());
                        Ok(())
                    })
                    .expect("walk failed");
                assert_eq!(values.len(), 3);
            });
        }
    });
    Ok(())
}

#[test]
fn rule_set_round_trips_through_serde() -> TestResult {
    let definition = json!({
        "https://api.example.org/a": { "/x": "x" },
        "https://api.example.org/items/{id}": { "/y": "y" },
    });
    let index: RuleIndex = serde_json::from_value(definition.clone())?;
    assert_eq!(serde_json::to_value(&index)?, definition);
    assert_eq!(index.roots(), ["https://api.example.org/a"]);
    assert_eq!(index.with_variables(&["id"]).len(), 1);
    Ok(())
}
