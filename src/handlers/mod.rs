pub mod medicines;
pub mod products;
pub mod suppliers;

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::database::Database;

pub async fn health(State(db): State<Database>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").fetch_one(&db).await {
        Ok(_) => Json(json!({
            "status": "ok",
            "message": "Pharmacy Management System API is running",
            "data": {
                "database": "connected",
                "version": "1.0.0",
            },
        })),
        Err(e) => Json(json!({
            "status": "error",
            "message": "Database connection failed",
            "error": e.to_string(),
        })),
    }
}
