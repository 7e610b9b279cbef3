//! BDD step definitions for compiling alerts

use chrono::{TimeZone, Utc};
use cucumber::{given, then, when};
use serde_json::{Map, Value};

use elastic_alert::alert::{AlertContent, AlertSampleMessage};
use elastic_alert::config::EmptyHitsPolicy;
use elastic_alert::document::Document;
use elastic_alert::fetcher::DocumentFetcher;
use elastic_alert::{AlertCompiler, AlertError};

use crate::world::AlertWorld;

const INDEX: &str = "logs-2024";

/// Fetcher returning a fixed set of documents
struct StaticFetcher {
    documents: Vec<Document>,
}

#[async_trait::async_trait]
impl DocumentFetcher for StaticFetcher {
    async fn find_by_ids(
        &self,
        _index: &str,
        _ids: &[String],
    ) -> elastic_alert::Result<Vec<Document>> {
        Ok(self.documents.clone())
    }
}

/// Fetcher simulating an unreachable backend
struct UnavailableFetcher;

#[async_trait::async_trait]
impl DocumentFetcher for UnavailableFetcher {
    async fn find_by_ids(
        &self,
        _index: &str,
        _ids: &[String],
    ) -> elastic_alert::Result<Vec<Document>> {
        Err(AlertError::Retrieval("connection refused".to_string()))
    }
}

#[given(expr = "a rule {string} defined in {string}")]
fn a_rule(world: &mut AlertWorld, id: String, path: String) {
    world.rule.unique_id = id;
    world.rule.file_path = path;
}

#[given(expr = "the rule has label {string} set to {string}")]
fn rule_label(world: &mut AlertWorld, name: String, value: String) {
    world.rule.query.labels.insert(name, value);
}

#[given(expr = "the rule has annotation {string} with template {string}")]
fn rule_annotation(world: &mut AlertWorld, name: String, template: String) {
    world.rule.query.annotations.insert(name, template);
}

#[given(expr = "the rule matched ids {string} with {int} hits")]
fn rule_matched(world: &mut AlertWorld, ids: String, hits: u64) {
    world.matched.ids = ids.split(',').map(|id| id.trim().to_string()).collect();
    world.matched.hits = hits;
}

#[given(expr = "a matched document with field {string} set to {string}")]
fn matched_document(world: &mut AlertWorld, field: String, value: String) {
    let mut source = Map::new();
    source.insert(field, Value::String(value));
    world.documents.push(source);
}

#[given(expr = "the document also has field {string} set to {string}")]
fn document_field(world: &mut AlertWorld, field: String, value: String) {
    let source = world.documents.last_mut().expect("no matched document");
    source.insert(field, Value::String(value));
}

#[given(expr = "the document has a {int} character {string} field")]
fn document_long_field(world: &mut AlertWorld, length: usize, field: String) {
    let source = world.documents.last_mut().expect("no matched document");
    source.insert(field, Value::String("x".repeat(length)));
}

#[given("the search backend returns no documents")]
fn no_documents(world: &mut AlertWorld) {
    world.documents.clear();
}

#[given("the search backend is unavailable")]
fn backend_unavailable(world: &mut AlertWorld) {
    world.backend_down = true;
}

#[given("empty hits compile with empty fields")]
fn empty_fields_policy(world: &mut AlertWorld) {
    world.empty_hits = EmptyHitsPolicy::EmptyFields;
}

#[given("the alert has resolved")]
fn alert_resolved(world: &mut AlertWorld) {
    world.resolved = true;
}

#[when("the alert is compiled")]
async fn compile(world: &mut AlertWorld) {
    let starts_at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
    let ends_at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 15, 0).unwrap();

    let content = if world.resolved {
        AlertContent::resolved(&world.rule, &world.matched, starts_at, ends_at)
    } else {
        AlertContent::pending(&world.rule, &world.matched, starts_at)
    };
    let sample = AlertSampleMessage {
        es: None,
        index: INDEX.to_string(),
        ids: world.matched.ids.clone(),
    };
    let compiler = AlertCompiler::new(world.empty_hits);

    let result = if world.backend_down {
        compiler
            .compile(&content, "http://rules/errors", &sample, &UnavailableFetcher)
            .await
    } else {
        let fetcher = StaticFetcher {
            documents: world.hits(),
        };
        compiler
            .compile(&content, "http://rules/errors", &sample, &fetcher)
            .await
    };

    world.dedup_key = Some(content.dedup_key());
    world.result = Some(result);
}

#[then("compilation should succeed")]
fn compilation_succeeds(world: &mut AlertWorld) {
    let result = world.result.as_ref().expect("no result");
    result.as_ref().unwrap();
}

#[then("compilation should fail because no documents were found")]
fn compilation_fails_no_hits(world: &mut AlertWorld) {
    let result = world.result.as_ref().expect("no result");
    match result {
        Err(AlertError::NoHits { index }) => assert_eq!(index, INDEX),
        other => panic!("expected NoHits, got {other:?}"),
    }
}

#[then("compilation should fail with a retrieval error")]
fn compilation_fails_retrieval(world: &mut AlertWorld) {
    let result = world.result.as_ref().expect("no result");
    assert!(matches!(result, Err(AlertError::Retrieval(_))), "{result:?}");
}

#[then(expr = "the message id should be {string} with path {string}")]
fn message_identity(world: &mut AlertWorld, id: String, path: String) {
    let message = world
        .result
        .as_ref()
        .expect("no result")
        .as_ref()
        .expect("compilation failed");
    assert_eq!(message.unique_id, id);
    assert_eq!(message.path, path);
}

#[then(expr = "the dedup key should be the MD5 of {string}")]
fn dedup_key_is_md5(world: &mut AlertWorld, concatenated: String) {
    let key = world.dedup_key.as_ref().expect("no dedup key");
    assert_eq!(*key, format!("{:x}", md5::compute(concatenated)));
}
