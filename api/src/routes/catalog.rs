use rocket::serde::json::{Json, Value};
use rocket::State;

use crate::error::ApiResult;
use crate::models::document::documents_to_json;
use crate::repository::catalog_repository::CatalogRepository;

#[get("/")]
pub fn index() -> &'static str {
    "E-Buy server is running!"
}

#[get("/productCategories")]
pub async fn get_all_categories(catalog: &State<CatalogRepository>) -> ApiResult<Json<Value>> {
    let categories = catalog.get_all_categories().await?;
    Ok(Json(documents_to_json(categories)))
}

#[get("/newArrivalProducts")]
pub async fn get_new_arrivals(catalog: &State<CatalogRepository>) -> ApiResult<Json<Value>> {
    let products = catalog.get_new_arrivals().await?;
    Ok(Json(documents_to_json(products)))
}
