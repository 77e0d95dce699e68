//! Common types and data structures

use serde::Deserialize;
use std::fmt;
use uuid::Uuid;

/// Client-side identity of a card, stable across reorders
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CardId(Uuid);

impl CardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One displayable card
#[derive(Clone, Debug, PartialEq)]
pub struct CardRecord {
    pub id: CardId,
    pub kind: String,
    pub title: String,
    pub image_url: String,
}

/// Document shape of data.json
#[derive(Deserialize)]
pub struct DataFile {
    pub data: Vec<RawCard>,
}

/// Card entry as it appears in data.json (no identifier)
#[derive(Clone, Debug, Deserialize)]
pub struct RawCard {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Give every incoming card a fresh identifier, keeping source order.
pub fn assign_ids(raw: Vec<RawCard>) -> Vec<CardRecord> {
    raw.into_iter()
        .map(|card| CardRecord {
            id: CardId::new(),
            kind: card.kind,
            title: card.title,
            image_url: card.image_url,
        })
        .collect()
}

/// Image state of a single card
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageStatus {
    Loading,
    Ready,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn raw(title: &str) -> RawCard {
        RawCard {
            kind: "photo".into(),
            title: title.into(),
            image_url: format!("https://img.example/{}.png", title),
        }
    }

    #[test]
    fn test_assign_ids_keeps_order_and_is_unique() {
        let cards = assign_ids(vec![raw("a"), raw("b"), raw("c")]);
        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "c"]);

        let ids: HashSet<CardId> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_data_file_field_names() {
        let json = r#"{"data":[{"type":"bank-draft","title":"Bank Draft","imageUrl":"a.png"}]}"#;
        let file: DataFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.data.len(), 1);
        assert_eq!(file.data[0].kind, "bank-draft");
        assert_eq!(file.data[0].image_url, "a.png");
    }

    #[test]
    fn test_data_file_rejects_missing_field() {
        let json = r#"{"data":[{"type":"x","title":"no image"}]}"#;
        assert!(serde_json::from_str::<DataFile>(json).is_err());
    }
}
