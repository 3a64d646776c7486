use rocket::serde::json::{Json, Value};
use rocket::State;

use crate::error::ApiResult;
use crate::models::document::{
    document_from_json, documents_to_json, optional_document_to_json, parse_object_id,
    JsonObject,
};
use crate::repository::advertise_repository::AdvertiseRepository;
use crate::repository::product_repository::ProductRepository;
use crate::repository::report_repository::ReportRepository;
use crate::repository::store::{DeleteOutcome, InsertOutcome};
use crate::services::auth_guard::{AdminGuard, Identity};

#[post("/reportedItems", data = "<report>")]
pub async fn report_item(
    report: Json<JsonObject>,
    _identity: Identity,
    reports: &State<ReportRepository>,
) -> ApiResult<Json<InsertOutcome>> {
    let report = document_from_json(report.into_inner())?;
    Ok(Json(reports.add_report(report).await?))
}

#[get("/reportedItems")]
pub async fn get_reported_items(
    _admin: AdminGuard,
    reports: &State<ReportRepository>,
) -> ApiResult<Json<Value>> {
    Ok(Json(documents_to_json(reports.get_all_reports().await?)))
}

#[get("/reportedItems/<id>")]
pub async fn get_reported_item(id: &str, reports: &State<ReportRepository>) -> ApiResult<Json<Value>> {
    Ok(Json(optional_document_to_json(reports.find_report(id).await?)))
}

/// Removes a reported product together with its advertisement and report.
#[delete("/reportedItems/<id>")]
pub async fn delete_reported_item(
    id: &str,
    _admin: AdminGuard,
    products: &State<ProductRepository>,
    adverts: &State<AdvertiseRepository>,
    reports: &State<ReportRepository>,
) -> ApiResult<Json<DeleteOutcome>> {
    let product_id = parse_object_id(id)?;

    let product = products.delete_product(product_id).await?;
    let advert = adverts.delete_item(id).await?;
    tracing::debug!(
        id,
        products_deleted = product.deleted_count,
        adverts_deleted = advert.deleted_count,
        "reported product removed"
    );

    Ok(Json(reports.delete_report(id).await?))
}
