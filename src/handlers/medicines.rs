//! `/api/inventory` handlers: the paginated medicine listing, medicine CRUD
//! and the rack/generic lookups. Response envelopes differ from the
//! `/api/products` family and are kept exactly as the frontend expects them.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    database::Database,
    error::InventoryError,
    ident,
    inventory::{catalog, query::MedicineFilter, reads, writer},
    models::{
        CreateProductRequest, CreateRackRequest, DataEnvelope, GenericDto, PageEnvelope,
        ProductResponse, UpdateProductRequest,
    },
};

#[derive(Debug, Default, Deserialize)]
pub struct MedicineListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub rack: Option<String>,
    pub sort: Option<String>,
}

// GET /api/inventory/medicines
pub async fn list_medicines(
    State(db): State<Database>,
    Query(params): Query<MedicineListParams>,
) -> Result<Json<PageEnvelope<ProductResponse>>, InventoryError> {
    let page = params.page.filter(|p| *p > 0).unwrap_or(1);
    let limit = params.limit.filter(|l| *l > 0).unwrap_or(20);

    let filter = MedicineFilter {
        search: params.search,
        status: params.status,
        rack: params.rack,
        sort: params.sort,
    };

    let envelope = reads::list_medicines(&db, page, limit, &filter).await?;
    Ok(Json(envelope))
}

// GET /api/inventory/medicines/:id
pub async fn get_medicine(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<DataEnvelope<ProductResponse>>, InventoryError> {
    let product_id = ident::decode_product_id(&id)?;
    let medicine = reads::fetch_product(&db, product_id).await?;
    Ok(Json(DataEnvelope { data: medicine }))
}

// POST /api/inventory/medicines
pub async fn create_medicine(
    State(db): State<Database>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), InventoryError> {
    let medicine = writer::create_product(&db, req).await?;
    Ok((StatusCode::CREATED, Json(medicine)))
}

// PUT /api/inventory/medicines/:id
pub async fn update_medicine(
    State(db): State<Database>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, InventoryError> {
    let medicine = writer::update_product(&db, &id, req).await?;
    Ok(Json(medicine))
}

// DELETE /api/inventory/medicines/:id
pub async fn delete_medicine(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<Value>, InventoryError> {
    writer::delete_product(&db, &id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Medicine deleted successfully",
    })))
}

// GET /api/inventory/racks
pub async fn get_racks(State(db): State<Database>) -> Result<Json<Value>, InventoryError> {
    let racks = catalog::get_racks(&db).await?;
    Ok(Json(json!({
        "success": true,
        "data": racks,
    })))
}

// POST /api/inventory/racks
pub async fn create_rack(
    State(db): State<Database>,
    Json(req): Json<CreateRackRequest>,
) -> Result<(StatusCode, Json<Value>), InventoryError> {
    let rack = catalog::create_rack(&db, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "data": rack,
        })),
    ))
}

// GET /api/inventory/generics
pub async fn get_generics(
    State(db): State<Database>,
) -> Result<Json<Vec<GenericDto>>, InventoryError> {
    let generics = catalog::get_generics(&db).await?;
    Ok(Json(generics))
}

// GET /api/inventory/racks/medicines
pub async fn get_rack_medicines(State(db): State<Database>) -> Result<Json<Value>, InventoryError> {
    let rack_medicines = catalog::get_rack_medicines(&db).await?;
    let total_racks = rack_medicines.len();
    Ok(Json(json!({
        "data": rack_medicines,
        "total_racks": total_racks,
    })))
}
