use rocket::serde::json::{Json, Value};
use rocket::State;

use crate::error::{ApiError, ApiResult};
use crate::models::document::{document_from_json, documents_to_json, parse_object_id, JsonObject};
use crate::repository::product_repository::ProductRepository;
use crate::repository::store::{DeleteOutcome, InsertOutcome, UpdateOutcome};
use crate::repository::user_repository::UserRepository;
use crate::services::auth_guard::{AdminGuard, Identity, SellerGuard};

fn required<'a>(name: &str, value: Option<&'a str>) -> ApiResult<&'a str> {
    value.ok_or_else(|| ApiError::BadRequest(format!("{name} is required")))
}

#[post("/products", data = "<new_product>")]
pub async fn add_product(
    new_product: Json<JsonObject>,
    _seller: SellerGuard,
    products: &State<ProductRepository>,
) -> ApiResult<Json<InsertOutcome>> {
    let product = document_from_json(new_product.into_inner())?;
    Ok(Json(products.add_product(product).await?))
}

/// Products matching `name`, sold ones left out.
#[get("/products/<name>")]
pub async fn get_products_by_name(
    name: &str,
    _identity: Identity,
    products: &State<ProductRepository>,
) -> ApiResult<Json<Value>> {
    let available = products.find_available_by_name(name).await?;
    Ok(Json(documents_to_json(available)))
}

#[get("/products?<email>")]
pub async fn get_seller_products(
    email: Option<&str>,
    _seller: SellerGuard,
    products: &State<ProductRepository>,
) -> ApiResult<Json<Value>> {
    let email = required("email", email)?;
    Ok(Json(documents_to_json(products.find_products_by_seller(email).await?)))
}

/// Marks a seller as verified, on the user record and on every product they list.
#[put("/products?<email>&<id>")]
pub async fn verify_seller(
    email: Option<&str>,
    id: Option<&str>,
    _admin: AdminGuard,
    users: &State<UserRepository>,
    products: &State<ProductRepository>,
) -> ApiResult<Json<UpdateOutcome>> {
    let email = required("email", email)?;
    let user_id = parse_object_id(required("id", id)?)?;

    let user = users.verify_seller(user_id).await?;
    tracing::debug!(%user_id, matched = user.matched_count, "seller user verified");

    Ok(Json(products.verify_seller_products(email).await?))
}

#[delete("/products/<id>")]
pub async fn delete_product(
    id: &str,
    _seller: SellerGuard,
    products: &State<ProductRepository>,
) -> ApiResult<Json<DeleteOutcome>> {
    let product_id = parse_object_id(id)?;
    Ok(Json(products.delete_product(product_id).await?))
}
