use mongodb::bson::Document;

pub const STATUS_FIELD: &str = "status";
pub const STATUS_SOLD: &str = "sold";

pub fn is_sold(document: &Document) -> bool {
    matches!(document.get_str(STATUS_FIELD), Ok(STATUS_SOLD))
}
