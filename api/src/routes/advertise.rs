use rocket::serde::json::{Json, Value};
use rocket::State;

use crate::error::ApiResult;
use crate::models::document::{document_from_json, documents_to_json, JsonObject};
use crate::repository::advertise_repository::AdvertiseRepository;
use crate::repository::store::InsertOutcome;
use crate::services::auth_guard::SellerGuard;

#[post("/advertise", data = "<item>")]
pub async fn advertise_item(
    item: Json<JsonObject>,
    _seller: SellerGuard,
    adverts: &State<AdvertiseRepository>,
) -> ApiResult<Json<InsertOutcome>> {
    let item = document_from_json(item.into_inner())?;
    Ok(Json(adverts.add_item(item).await?))
}

#[get("/advertise")]
pub async fn get_advertised_items(adverts: &State<AdvertiseRepository>) -> ApiResult<Json<Value>> {
    Ok(Json(documents_to_json(adverts.find_unsold_items().await?)))
}
