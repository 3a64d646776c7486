use rocket::http::Status;
use rocket::serde::json::{json, Json, Value};
use rocket::State;

use crate::error::ApiResult;
use crate::jwt::jwt_helper::TokenService;
use crate::repository::user_repository::UserRepository;

/// Issues an access token to registered users.
#[get("/jwt?<email>")]
pub async fn issue_token(
    email: Option<&str>,
    users: &State<UserRepository>,
    tokens: &State<TokenService>,
) -> ApiResult<(Status, Json<Value>)> {
    let denied = || (Status::Forbidden, Json(json!({ "accessToken": "" })));

    let Some(email) = email else {
        return Ok(denied());
    };
    if users.find_user_by_email(email).await?.is_none() {
        tracing::debug!(email, "token requested for unknown user");
        return Ok(denied());
    }

    let token = tokens.create_token(email)?;
    Ok((Status::Ok, Json(json!({ "accessToken": token }))))
}
