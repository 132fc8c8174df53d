//! Transactional write path for products.
//!
//! Each operation is one transaction: dimension resolution, the fact row,
//! packaging tiers and the supplier link commit together or not at all.
//! Not Found and validation failures are raised before a transaction opens,
//! so they never leave partial writes behind.

use crate::database::Database;
use crate::error::ApiError;
use crate::ident;
use crate::models::{CreateProductRequest, ProductResponse, UpdateProductRequest};

use super::reads;
use super::resolver::{self, Dimension};

/// Default alert threshold for freshly created products.
const DEFAULT_STOCK_ALERT: i32 = 10;

/// Product code: first four characters of the name plus up to three of the
/// strength. "Napa" + "500mg" becomes "Napa500".
pub fn generate_product_code(name: &str, strength: &str) -> String {
    let mut code: String = name.chars().take(4).collect();
    code.extend(strength.chars().take(3));
    code
}

/// EAN-style barcode derived deterministically from name and strength, so
/// re-submitting the same product yields the same code.
pub fn generate_barcode(name: &str, strength: &str) -> String {
    let mut acc: u64 = 0;
    for b in name.bytes().chain(strength.bytes()) {
        acc = acc.wrapping_mul(31).wrapping_add(u64::from(b));
    }
    format!("890{:010}", acc % 10_000_000_000)
}

pub async fn create_product(
    db: &Database,
    req: CreateProductRequest,
) -> Result<ProductResponse, ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::Validation("Product name is required".to_string()));
    }

    let mut tx = db.begin().await?;

    let generic_id = resolver::resolve(&mut tx, Dimension::GenericName, &req.generic_name).await?;
    let rack_id = resolver::resolve_rack(&mut tx, &req.rack_no, &req.rack_location).await?;
    let type_id = resolver::resolve(&mut tx, Dimension::ProductType, &req.product_type).await?;
    let category_id = resolver::resolve(&mut tx, Dimension::Category, &req.category).await?;

    let barcode = generate_barcode(&req.name, &req.strength);
    let product_code = generate_product_code(&req.name, &req.strength);

    let product_id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO product (\
         product_name, product_description, barcode, product_code,\
         strength, manufacture, generic_fk_id, rack_fk_id,\
         product_type_fk_id, category_fk_id,\
         unit_price, unit_mrp, unit_cost_price, discount_percent,\
         available_stock, stock_alert, status, total_purchase, total_sold\
         ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, 'Active', 0, 0) \
         RETURNING id",
    )
    .bind(&req.name)
    .bind(&req.description)
    .bind(&barcode)
    .bind(&product_code)
    .bind(&req.strength)
    .bind(&req.manufacture)
    .bind(generic_id)
    .bind(rack_id)
    .bind(type_id)
    .bind(category_id)
    .bind(req.price)
    .bind(req.mrp)
    .bind(req.buying_price)
    .bind(req.discount)
    .bind(req.in_stock)
    .bind(DEFAULT_STOCK_ALERT)
    .fetch_one(&mut *tx)
    .await?;

    // Every product carries an implicit single-unit tier.
    sqlx::query(
        "INSERT INTO product_packaging (product_id, pack_type, units_per_pack, selling_price, mrp, cost_price) \
         VALUES ($1, 'unit', 1, $2, $3, $4)",
    )
    .bind(product_id)
    .bind(req.price)
    .bind(req.mrp)
    .bind(req.buying_price)
    .execute(&mut *tx)
    .await?;

    if req.pack_size.strip > 0 || req.pack_price.strip > 0.0 {
        sqlx::query(
            "INSERT INTO product_packaging (product_id, pack_type, units_per_pack, selling_price, mrp, cost_price) \
             VALUES ($1, 'strip', $2, $3, $3, $4)",
        )
        .bind(product_id)
        .bind(req.pack_size.strip)
        .bind(req.pack_price.strip)
        .bind(req.buying_price * f64::from(req.pack_size.strip))
        .execute(&mut *tx)
        .await?;
    }

    if req.pack_size.r#box > 0 || req.pack_price.r#box > 0.0 {
        sqlx::query(
            "INSERT INTO product_packaging (product_id, pack_type, units_per_pack, selling_price, mrp, cost_price) \
             VALUES ($1, 'box', $2, $3, $3, $4)",
        )
        .bind(product_id)
        .bind(req.pack_size.r#box)
        .bind(req.pack_price.r#box)
        .bind(req.buying_price * f64::from(req.pack_size.r#box))
        .execute(&mut *tx)
        .await?;
    }

    if let Some(supplier_id) =
        resolver::resolve_supplier(&mut tx, &req.supplier, &req.supplier_contact).await?
    {
        sqlx::query(
            "INSERT INTO product_supplier (product_id, supplier_id, is_primary, buying_price) \
             VALUES ($1, $2, TRUE, $3)",
        )
        .bind(product_id)
        .bind(supplier_id)
        .bind(req.buying_price)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    // Re-read through the projection so the response carries exactly what a
    // subsequent GET would return.
    reads::fetch_product(db, product_id).await
}

pub async fn update_product(
    db: &Database,
    id_str: &str,
    req: UpdateProductRequest,
) -> Result<ProductResponse, ApiError> {
    let id = ident::decode_product_id(id_str)?;
    ensure_live(db, id).await?;

    let mut tx = db.begin().await?;

    // One statement per touched field, mirroring the sparse PATCH payloads
    // the frontend sends.
    if let Some(name) = &req.name {
        sqlx::query("UPDATE product SET product_name = $1, updated_at = NOW() WHERE id = $2")
            .bind(name)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    if let Some(description) = &req.description {
        sqlx::query("UPDATE product SET product_description = $1, updated_at = NOW() WHERE id = $2")
            .bind(description)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    if let Some(strength) = &req.strength {
        sqlx::query("UPDATE product SET strength = $1, updated_at = NOW() WHERE id = $2")
            .bind(strength)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    if let Some(manufacture) = &req.manufacture {
        sqlx::query("UPDATE product SET manufacture = $1, updated_at = NOW() WHERE id = $2")
            .bind(manufacture)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    if let Some(price) = req.price {
        sqlx::query("UPDATE product SET unit_price = $1, updated_at = NOW() WHERE id = $2")
            .bind(price)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    if let Some(mrp) = req.mrp {
        sqlx::query("UPDATE product SET unit_mrp = $1, updated_at = NOW() WHERE id = $2")
            .bind(mrp)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    if let Some(discount) = req.discount {
        sqlx::query("UPDATE product SET discount_percent = $1, updated_at = NOW() WHERE id = $2")
            .bind(discount)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    if let Some(buying_price) = req.buying_price {
        sqlx::query("UPDATE product SET unit_cost_price = $1, updated_at = NOW() WHERE id = $2")
            .bind(buying_price)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    if let Some(in_stock) = req.in_stock {
        sqlx::query("UPDATE product SET available_stock = $1, updated_at = NOW() WHERE id = $2")
            .bind(in_stock)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }

    if let Some(generic) = req.generic_name.as_deref().filter(|s| !s.is_empty()) {
        if let Some(generic_id) = resolver::resolve(&mut tx, Dimension::GenericName, generic).await? {
            sqlx::query("UPDATE product SET generic_fk_id = $1, updated_at = NOW() WHERE id = $2")
                .bind(generic_id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
    }

    if let Some(rack_no) = req.rack_no.as_deref().filter(|s| !s.is_empty()) {
        let location = req.rack_location.as_deref().unwrap_or("");
        if let Some(rack_id) = resolver::resolve_rack(&mut tx, rack_no, location).await? {
            sqlx::query("UPDATE product SET rack_fk_id = $1, updated_at = NOW() WHERE id = $2")
                .bind(rack_id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
    }

    if let Some(product_type) = req.product_type.as_deref().filter(|s| !s.is_empty()) {
        if let Some(type_id) = resolver::resolve(&mut tx, Dimension::ProductType, product_type).await? {
            sqlx::query("UPDATE product SET product_type_fk_id = $1, updated_at = NOW() WHERE id = $2")
                .bind(type_id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
    }

    if let Some(category) = req.category.as_deref().filter(|s| !s.is_empty()) {
        if let Some(category_id) = resolver::resolve(&mut tx, Dimension::Category, category).await? {
            sqlx::query("UPDATE product SET category_fk_id = $1, updated_at = NOW() WHERE id = $2")
                .bind(category_id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
    }

    // Packaging is both-or-neither: touching either the sizes or the prices
    // rewrites the strip and box tiers together.
    if req.pack_size.is_some() || req.pack_price.is_some() {
        let size = req.pack_size.unwrap_or_default();
        let price = req.pack_price.unwrap_or_default();

        sqlx::query(
            "INSERT INTO product_packaging (product_id, pack_type, units_per_pack, selling_price, mrp, cost_price) \
             VALUES ($1, 'strip', $2, $3, $3, $3) \
             ON CONFLICT (product_id, pack_type) \
             DO UPDATE SET units_per_pack = $2, selling_price = $3, mrp = $3, updated_at = NOW()",
        )
        .bind(id)
        .bind(size.strip)
        .bind(price.strip)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO product_packaging (product_id, pack_type, units_per_pack, selling_price, mrp, cost_price) \
             VALUES ($1, 'box', $2, $3, $3, $3) \
             ON CONFLICT (product_id, pack_type) \
             DO UPDATE SET units_per_pack = $2, selling_price = $3, mrp = $3, updated_at = NOW()",
        )
        .bind(id)
        .bind(size.r#box)
        .bind(price.r#box)
        .execute(&mut *tx)
        .await?;
    }

    if let Some(supplier) = req.supplier.as_deref().filter(|s| !s.is_empty()) {
        let contact = req.supplier_contact.as_deref().unwrap_or("");
        if let Some(supplier_id) = resolver::resolve_supplier(&mut tx, supplier, contact).await? {
            sqlx::query(
                "INSERT INTO product_supplier (product_id, supplier_id, is_primary) \
                 VALUES ($1, $2, TRUE) \
                 ON CONFLICT (product_id, supplier_id) DO UPDATE SET is_primary = TRUE",
            )
            .bind(id)
            .bind(supplier_id)
            .execute(&mut *tx)
            .await?;

            // A product has at most one primary supplier at any time.
            sqlx::query(
                "UPDATE product_supplier SET is_primary = FALSE \
                 WHERE product_id = $1 AND supplier_id != $2",
            )
            .bind(id)
            .bind(supplier_id)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    reads::fetch_product(db, id).await
}

/// Soft delete: flips the flag and stamps the time. Satellites stay put and
/// the row is never physically removed.
pub async fn delete_product(db: &Database, id_str: &str) -> Result<String, ApiError> {
    let id = ident::decode_product_id(id_str)?;
    ensure_live(db, id).await?;

    sqlx::query("UPDATE product SET deleted = 1, deleted_at = NOW() WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(ident::encode_product_id(id))
}

async fn ensure_live(db: &Database, id: i32) -> Result<(), ApiError> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM product WHERE id = $1 AND deleted = 0)")
            .bind(id)
            .fetch_one(db)
            .await?;
    if !exists {
        return Err(ApiError::NotFound("product"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_code_truncates_name_and_strength() {
        assert_eq!(generate_product_code("Napa", "500mg"), "Napa500");
        assert_eq!(generate_product_code("Paracetamol", "500mg"), "Para500");
        assert_eq!(generate_product_code("Ace", "650"), "Ace650");
        assert_eq!(generate_product_code("Napa", ""), "Napa");
        assert_eq!(generate_product_code("Seclo", "20"), "Secl20");
    }

    #[test]
    fn barcode_is_deterministic_and_ean_shaped() {
        let a = generate_barcode("Napa", "500mg");
        let b = generate_barcode("Napa", "500mg");
        assert_eq!(a, b);
        assert_eq!(a.len(), 13);
        assert!(a.starts_with("890"));
        assert!(a.chars().all(|c| c.is_ascii_digit()));
        assert_ne!(generate_barcode("Napa", "500mg"), generate_barcode("Napa", "250mg"));
    }
}
