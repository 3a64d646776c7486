//! Conversion between request/response JSON and stored BSON documents.
//!
//! Incoming bodies follow MongoDB extended JSON, so `{"$oid": "..."}` is
//! stored as an ObjectId. Outgoing documents are rendered as plain JSON:
//! ObjectIds become hex strings and datetimes RFC 3339 strings.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::{ApiError, ApiResult};

pub type JsonObject = Map<String, Value>;

pub fn document_from_json(object: JsonObject) -> ApiResult<Document> {
    match Bson::try_from(Value::Object(object)) {
        Ok(Bson::Document(document)) => Ok(document),
        Ok(other) => Err(ApiError::BadRequest(format!(
            "expected a document, found {:?}",
            other.element_type()
        ))),
        Err(e) => Err(ApiError::BadRequest(format!("invalid document: {e}"))),
    }
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(datetime) => match datetime.try_to_rfc3339_string() {
            Ok(formatted) => Value::String(formatted),
            Err(_) => Value::from(datetime.timestamp_millis()),
        },
        Bson::Document(document) => document_to_json(document),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::String(text) => Value::String(text),
        Bson::Boolean(flag) => Value::Bool(flag),
        Bson::Int32(number) => Value::from(number),
        Bson::Int64(number) => Value::from(number),
        Bson::Double(number) => Number::from_f64(number).map_or(Value::Null, Value::Number),
        Bson::Null | Bson::Undefined => Value::Null,
        other => other.into_relaxed_extjson(),
    }
}

pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

pub fn documents_to_json(documents: Vec<Document>) -> Value {
    Value::Array(documents.into_iter().map(document_to_json).collect())
}

pub fn optional_document_to_json(document: Option<Document>) -> Value {
    document.map_or(Value::Null, document_to_json)
}

pub fn serialize_bson<S: Serializer>(value: &Bson, serializer: S) -> Result<S::Ok, S::Error> {
    bson_to_json(value.clone()).serialize(serializer)
}

pub fn serialize_optional_bson<S: Serializer>(
    value: &Option<Bson>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serialize_bson(value, serializer),
        None => serializer.serialize_none(),
    }
}

/// Parses a path or query identifier into the store's native id type.
pub fn parse_object_id(id: &str) -> ApiResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| ApiError::BadRequest(format!("invalid id: {id}")))
}
