//! Rack and generic-name lookups that back the inventory pages.

use crate::database::Database;
use crate::error::ApiError;
use crate::models::{CreateRackRequest, GenericDto, RackDto, RackMedicineItem, RackWithMedicines};

pub async fn get_racks(db: &Database) -> Result<Vec<RackDto>, ApiError> {
    let rows = sqlx::query_as::<_, (i32, String, String)>(
        "SELECT id, rack_name, COALESCE(rack_location, 'no location') AS rack_location \
         FROM rack WHERE deleted = 0",
    )
    .fetch_all(db)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name, location)| RackDto { id, name, location })
        .collect())
}

pub async fn create_rack(db: &Database, req: CreateRackRequest) -> Result<RackDto, ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::Validation("Rack name is required".to_string()));
    }

    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO rack (rack_name, rack_location) VALUES ($1, $2) RETURNING id",
    )
    .bind(&req.name)
    .bind(&req.location)
    .fetch_one(db)
    .await?;

    Ok(RackDto {
        id,
        name: req.name,
        location: req.location,
    })
}

pub async fn get_generics(db: &Database) -> Result<Vec<GenericDto>, ApiError> {
    let rows = sqlx::query_as::<_, (i32, String)>(
        "SELECT id, generic_name FROM generic_name WHERE deleted = 0",
    )
    .fetch_all(db)
    .await?;

    Ok(rows.into_iter().map(|(id, name)| GenericDto { id, name }).collect())
}

/// Every rack with its live products, each rack numbering its medicines
/// from 1 again.
pub async fn get_rack_medicines(db: &Database) -> Result<Vec<RackWithMedicines>, ApiError> {
    let racks = get_racks(db).await?;

    let mut result = Vec::with_capacity(racks.len());
    for rack in racks {
        let rows = sqlx::query_as::<_, (i32, String, String, String, String, f64, i32)>(
            "SELECT p.id, \
             COALESCE(p.product_code, '') AS product_code, \
             p.product_name, \
             COALESCE(g.generic_name, '') AS generic_name, \
             COALESCE(p.strength, '') AS strength, \
             COALESCE(p.unit_price, 0)::float8 AS unit_price, \
             COALESCE(p.available_stock, 0) AS available_stock \
             FROM product p \
             LEFT JOIN generic_name g ON p.generic_fk_id = g.id \
             WHERE p.rack_fk_id = $1 AND p.deleted = 0 \
             ORDER BY p.product_name ASC",
        )
        .bind(rack.id)
        .fetch_all(db)
        .await?;

        let medicines: Vec<RackMedicineItem> = rows
            .into_iter()
            .enumerate()
            .map(
                |(i, (id, code, medicine_name, generic_name, strength, price, stock))| {
                    RackMedicineItem {
                        id,
                        srl_no: i as i32 + 1,
                        code,
                        medicine_name,
                        generic_name,
                        strength,
                        price,
                        stock,
                    }
                },
            )
            .collect();

        let total_medicines = medicines.len();
        result.push(RackWithMedicines {
            rack,
            medicines,
            total_medicines,
        });
    }

    Ok(result)
}
