//! Test fixtures and request bodies.

#![allow(dead_code)]

use serde_json::{json, Value};

/// Backs of the sample lesson, in id order.
pub const SAMPLE_BACKS: [&str; 6] = ["Paris", "180", "William Shakespeare", "Au", "7", "Jupiter"];

pub const SAMPLE_FIRST_FRONT: &str = "What is the capital of France?";

pub fn lesson_name(name: &str) -> Value {
    json!({ "name": name })
}

pub fn new_card(front: &str, back: &str) -> Value {
    json!({ "front": front, "back": back })
}

pub fn rating(quality: u8) -> Value {
    json!({ "quality": quality })
}

pub fn tile(index: usize) -> Value {
    json!({ "index": index })
}

pub fn choice(text: &str) -> Value {
    json!({ "choice": text })
}

pub fn typed(input: &str) -> Value {
    json!({ "input": input })
}

/// Backup file with one lesson holding `count` cards.
pub fn backup_file(lesson_id: &str, name: &str, count: usize) -> String {
    let cards: Vec<Value> = (1..=count)
        .map(|i| {
            json!({
                "id": i,
                "front": format!("Front {i}"),
                "back": format!("Back {i}"),
                "nextReview": 0,
                "interval": 1,
                "easeFactor": 2.5
            })
        })
        .collect();

    json!({
        "lessons": {
            lesson_id: { "name": name, "cards": cards }
        },
        "currentLessonId": lesson_id,
        "exportDate": "2024-01-01T00:00:00Z"
    })
    .to_string()
}
