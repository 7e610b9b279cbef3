//! BDD step definitions for payload contents

use cucumber::then;

use crate::world::AlertWorld;

#[then(expr = "the payload annotation {string} should be {string}")]
fn annotation_is(world: &mut AlertWorld, name: String, expected: String) {
    let element = world.payload_element();
    assert_eq!(element["annotations"][&name], expected.as_str());
}

#[then(expr = "the payload label {string} should be {string}")]
fn label_is(world: &mut AlertWorld, name: String, expected: String) {
    let element = world.payload_element();
    assert_eq!(element["labels"][&name], expected.as_str());
}

#[then(expr = "the payload labels should not include {string}")]
fn label_absent(world: &mut AlertWorld, name: String) {
    let element = world.payload_element();
    assert!(element["labels"].get(&name).is_none());
}

#[then(expr = "the payload label {string} should be {int} characters long")]
fn label_length(world: &mut AlertWorld, name: String, length: usize) {
    let element = world.payload_element();
    let value = element["labels"][&name].as_str().expect("label is a string");
    assert_eq!(value.chars().count(), length);
}

#[then(expr = "the payload should start at {string}")]
fn starts_at(world: &mut AlertWorld, expected: String) {
    let element = world.payload_element();
    assert_eq!(element["startsAt"], expected.as_str());
}

#[then(expr = "the payload should end at {string}")]
fn ends_at(world: &mut AlertWorld, expected: String) {
    let element = world.payload_element();
    assert_eq!(element["endsAt"], expected.as_str());
}

#[then("the payload should not have an end time")]
fn no_ends_at(world: &mut AlertWorld) {
    let element = world.payload_element();
    assert!(element.get("endsAt").is_none());
}
