use rocket::serde::json::{json, Json, Value};
use rocket::State;

use crate::error::{ApiError, ApiResult};
use crate::models::document::{
    document_from_json, documents_to_json, optional_document_to_json, parse_object_id,
    JsonObject,
};
use crate::models::user::{has_role, Role};
use crate::repository::store::{DeleteOutcome, InsertOutcome};
use crate::repository::user_repository::UserRepository;
use crate::services::auth_guard::AdminGuard;

#[post("/users", data = "<new_user>")]
pub async fn create_user(
    new_user: Json<JsonObject>,
    users: &State<UserRepository>,
) -> ApiResult<Json<InsertOutcome>> {
    let user = document_from_json(new_user.into_inner())?;
    Ok(Json(users.create_user(user).await?))
}

#[get("/users/verify?<email>")]
pub async fn get_user_by_email(
    email: Option<&str>,
    users: &State<UserRepository>,
) -> ApiResult<Json<Value>> {
    let email = email.ok_or_else(|| ApiError::BadRequest("email is required".to_string()))?;
    let user = users.find_user_by_email(email).await?;
    Ok(Json(optional_document_to_json(user)))
}

#[get("/users/sellers/<email>")]
pub async fn is_seller(email: &str, users: &State<UserRepository>) -> ApiResult<Json<Value>> {
    let user = users.find_user_by_email(email).await?;
    Ok(Json(json!({ "isSeller": has_role(user.as_ref(), Role::Seller) })))
}

#[get("/users/admin/<email>")]
pub async fn is_admin(email: &str, users: &State<UserRepository>) -> ApiResult<Json<Value>> {
    let user = users.find_user_by_email(email).await?;
    Ok(Json(json!({ "isAdmin": has_role(user.as_ref(), Role::Admin) })))
}

#[get("/users/sellers?<user>")]
pub async fn get_sellers(
    user: Option<&str>,
    _admin: AdminGuard,
    users: &State<UserRepository>,
) -> ApiResult<Json<Value>> {
    let role = user.unwrap_or(Role::Seller.as_str());
    Ok(Json(documents_to_json(users.find_users_by_role(role).await?)))
}

#[get("/users/buyers?<user>")]
pub async fn get_buyers(
    user: Option<&str>,
    _admin: AdminGuard,
    users: &State<UserRepository>,
) -> ApiResult<Json<Value>> {
    let role = user.unwrap_or(Role::Buyer.as_str());
    Ok(Json(documents_to_json(users.find_users_by_role(role).await?)))
}

#[delete("/users/sellers/<id>")]
pub async fn delete_seller(
    id: &str,
    _admin: AdminGuard,
    users: &State<UserRepository>,
) -> ApiResult<Json<DeleteOutcome>> {
    let user_id = parse_object_id(id)?;
    Ok(Json(users.delete_user(user_id).await?))
}
