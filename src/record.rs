//! A record is an opaque JSON object keyed by an integer `id` supplied by the client.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type RecordId = i64;

/// One item of the collection. Fields other than `id` are passed through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Integer `id` field, if present and representable as `i64`.
    pub fn id(&self) -> Option<RecordId> {
        self.0.get("id").and_then(Value::as_i64)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Record(fields)
    }
}

impl TryFrom<Value> for Record {
    type Error = AppError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(m) => Ok(Record(m)),
            _ => Err(AppError::BadRequest("body must be a JSON object".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_reads_integer_field_only() {
        let r = Record::try_from(json!({ "id": 3, "name": "a" })).unwrap();
        assert_eq!(r.id(), Some(3));

        let r = Record::try_from(json!({ "id": "3" })).unwrap();
        assert_eq!(r.id(), None);

        let r = Record::try_from(json!({ "id": 1.5 })).unwrap();
        assert_eq!(r.id(), None);

        let r = Record::try_from(json!({ "name": "no id" })).unwrap();
        assert_eq!(r.id(), None);
    }

    #[test]
    fn non_objects_are_rejected() {
        for v in [json!([1, 2]), json!("text"), json!(5), json!(null)] {
            assert!(matches!(Record::try_from(v), Err(AppError::BadRequest(_))));
        }
    }

    #[test]
    fn extra_fields_survive_serialization() {
        let input = json!({ "id": 9, "name": "n", "tags": ["x"], "nested": { "k": true } });
        let r = Record::try_from(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&r).unwrap(), input);
        assert_eq!(r.into_value(), input);
    }
}
