//! `/api/products` handlers. Every response is wrapped in the
//! `{success, data, error}` envelope.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    database::Database,
    error::ApiError,
    inventory::{reads, writer},
    models::{
        CreateProductRequest, DeleteProductResponse, ProductApiResponse, ProductResponse,
        UpdateProductRequest,
    },
};

// GET /api/products
pub async fn get_all_products(
    State(db): State<Database>,
) -> Result<Json<ProductApiResponse<Vec<ProductResponse>>>, ApiError> {
    let products = reads::all_products(&db).await?;
    Ok(Json(ProductApiResponse::ok(products)))
}

// GET /api/products/:id
pub async fn get_product(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<ProductApiResponse<ProductResponse>>, ApiError> {
    let product_id = crate::ident::decode_product_id(&id)?;
    let product = reads::fetch_product(&db, product_id).await?;
    Ok(Json(ProductApiResponse::ok(product)))
}

// POST /api/products
pub async fn add_product(
    State(db): State<Database>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductApiResponse<ProductResponse>>), ApiError> {
    let product = writer::create_product(&db, req).await?;
    Ok((StatusCode::CREATED, Json(ProductApiResponse::ok(product))))
}

// PUT /api/products/:id
pub async fn update_product(
    State(db): State<Database>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<ProductApiResponse<ProductResponse>>, ApiError> {
    let product = writer::update_product(&db, &id, req).await?;
    Ok(Json(ProductApiResponse::ok(product)))
}

// DELETE /api/products/:id
pub async fn remove_product(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<ProductApiResponse<DeleteProductResponse>>, ApiError> {
    let encoded = writer::delete_product(&db, &id).await?;
    Ok(Json(ProductApiResponse::ok(DeleteProductResponse {
        id: encoded,
        message: "Product deleted successfully".to_string(),
    })))
}
