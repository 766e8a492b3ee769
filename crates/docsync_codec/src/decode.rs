//! Payload-to-record decoding.

use crate::document::{Document, FieldMap};
use crate::error::DecodeError;
use crate::id::DocumentId;
use crate::identity;
use crate::sink::ReportSink;

/// Decodes one payload into a typed record under the given identity.
///
/// The identity is bound into the payload first, so the resulting record's
/// [`Document::id`] equals `id` even when the payload body carried a
/// different (stale) value under the identity key. Unknown extra fields are
/// ignored; a payload that is structurally incompatible with `T` fails with
/// [`DecodeError`].
pub fn decode_document<T: Document>(fields: FieldMap, id: &DocumentId) -> Result<T, DecodeError> {
    let decorated = identity::decorate(fields, id);
    serde_json::from_value(serde_json::Value::Object(decorated))
        .map_err(|source| DecodeError::new(id.clone(), source))
}

/// Decodes a batch of `(identity, payload)` pairs, dropping failures.
///
/// Each pair is decoded independently. A pair that fails is reported to
/// `sink` and omitted from the result; the batch itself never fails, so one
/// corrupt document cannot block a collection's worth of valid ones. Input
/// order is preserved among the survivors.
pub fn decode_documents<T, I>(pairs: I, sink: &dyn ReportSink) -> Vec<T>
where
    T: Document,
    I: IntoIterator<Item = (DocumentId, FieldMap)>,
{
    pairs
        .into_iter()
        .filter_map(|(id, fields)| match decode_document(fields, &id) {
            Ok(record) => Some(record),
            Err(error) => {
                sink.report(error);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Player {
        id: DocumentId,
        name: String,
        score: i64,
    }

    impl Document for Player {
        fn id(&self) -> &DocumentId {
            &self.id
        }
    }

    fn fields(value: serde_json::Value) -> FieldMap {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn decode_binds_identity() {
        let id = DocumentId::new("p1");
        let player: Player =
            decode_document(fields(json!({"name": "Ada", "score": 10})), &id).unwrap();

        assert_eq!(player.id, id);
        assert_eq!(player.name, "Ada");
        assert_eq!(player.score, 10);
    }

    #[test]
    fn external_identity_wins_over_payload_claim() {
        let id = DocumentId::new("real");
        let player: Player = decode_document(
            fields(json!({"id": "stale", "name": "Ada", "score": 1})),
            &id,
        )
        .unwrap();

        assert_eq!(player.id.as_str(), "real");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let id = DocumentId::new("p1");
        let player: Player = decode_document(
            fields(json!({"name": "Ada", "score": 3, "added_later": {"x": 1}})),
            &id,
        )
        .unwrap();

        assert_eq!(player.score, 3);
    }

    #[test]
    fn missing_field_fails() {
        let id = DocumentId::new("p1");
        let result: Result<Player, _> = decode_document(fields(json!({"name": "Ada"})), &id);

        let err = result.unwrap_err();
        assert_eq!(err.id, id);
    }

    #[test]
    fn type_mismatch_fails() {
        let id = DocumentId::new("p1");
        let result: Result<Player, _> =
            decode_document(fields(json!({"name": 42, "score": 1})), &id);

        assert!(result.is_err());
    }

    #[test]
    fn batch_drops_malformed_and_reports() {
        let sink = MemorySink::new();
        let pairs = vec![
            (
                DocumentId::new("a"),
                fields(json!({"name": "Ada", "score": 1})),
            ),
            (DocumentId::new("bad"), fields(json!({"name": "Bo"}))),
            (
                DocumentId::new("c"),
                fields(json!({"name": "Cy", "score": 3})),
            ),
        ];

        let players: Vec<Player> = decode_documents(pairs, &sink);

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].id.as_str(), "a");
        assert_eq!(players[1].id.as_str(), "c");

        let reported = sink.reported_ids();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].as_str(), "bad");
    }

    #[test]
    fn batch_of_valid_documents_reports_nothing() {
        let sink = MemorySink::new();
        let pairs = (0..4).map(|n| {
            (
                DocumentId::new(format!("p{n}")),
                fields(json!({"name": "x", "score": n})),
            )
        });

        let players: Vec<Player> = decode_documents(pairs, &sink);

        assert_eq!(players.len(), 4);
        assert!(sink.is_empty());
    }

    #[test]
    fn empty_batch_yields_empty_result() {
        let sink = MemorySink::new();
        let players: Vec<Player> = decode_documents(Vec::new(), &sink);

        assert!(players.is_empty());
        assert!(sink.is_empty());
    }
}
