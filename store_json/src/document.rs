//! On-disk document shape.
//!
//! The whole store is one JSON document, `users/<name>/<field>`, with the
//! field names `"AudioLogin"` (credential blob) and `"notes"` kept
//! wire-compatible with the original deployment's database tree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub users: BTreeMap<String, UserRecord>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "AudioLogin", default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,

    /// Note id to note text. Ids are decimal strings assigned by
    /// [`UserRecord::next_note_id`].
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub notes: BTreeMap<String, String>,
}

impl UserRecord {
    /// Next monotonic note id: one past the highest numeric id present.
    /// Non-numeric ids (hand-edited files) are skipped, never reused.
    pub fn next_note_id(&self) -> String {
        self.notes
            .keys()
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .map_or(0, |max| max + 1)
            .to_string()
    }

    /// Notes in insertion order. The map key sorts lexicographically, so
    /// order by parsed numeric id with non-numeric ids last.
    pub fn notes_in_order(&self) -> Vec<(String, String)> {
        let mut notes: Vec<(String, String)> = self
            .notes
            .iter()
            .map(|(id, text)| (id.clone(), text.clone()))
            .collect();
        notes.sort_by_key(|(id, _)| (id.parse::<u64>().map_err(|_| id.clone()), id.clone()));
        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_uses_original_field_names() {
        let mut doc = StoreDocument::default();
        let record = doc.users.entry("alice".to_string()).or_default();
        record.credential = Some("deadbeef".to_string());
        record.notes.insert("0".to_string(), "hello".to_string());

        let json: serde_json::Value = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["users"]["alice"]["AudioLogin"], "deadbeef");
        assert_eq!(json["users"]["alice"]["notes"]["0"], "hello");
    }

    #[test]
    fn empty_fields_are_omitted() {
        let mut doc = StoreDocument::default();
        doc.users.entry("bob".to_string()).or_default();

        let json = serde_json::to_string(&doc).unwrap();
        assert!(!json.contains("AudioLogin"));
        assert!(!json.contains("notes"));
    }

    #[test]
    fn next_note_id_is_monotonic() {
        let mut record = UserRecord::default();
        assert_eq!(record.next_note_id(), "0");

        record.notes.insert("0".to_string(), "a".to_string());
        record.notes.insert("1".to_string(), "b".to_string());
        assert_eq!(record.next_note_id(), "2");

        // A gap does not cause reuse of a freed id.
        record.notes.remove("0");
        assert_eq!(record.next_note_id(), "2");
    }

    #[test]
    fn notes_order_is_numeric_not_lexicographic() {
        let mut record = UserRecord::default();
        for id in ["2", "10", "1"] {
            record.notes.insert(id.to_string(), format!("note {id}"));
        }
        let order: Vec<String> = record
            .notes_in_order()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(order, ["1", "2", "10"]);
    }
}
