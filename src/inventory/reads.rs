//! Read-path execution: the paginated listing, the single-product lookup,
//! and the unpaginated catalog.
//!
//! The listing issues its satellite sub-queries outside any transaction, so
//! a product's packaging or supplier can be one write newer or older than
//! its fact row under concurrent traffic. That is accepted; only the fact
//! query itself is allowed to fail a request.

use chrono::NaiveDate;

use crate::database::Database;
use crate::error::ApiError;
use crate::models::{PageEnvelope, Pagination, ProductResponse};

use super::projection::{self, FullProductRow, MedicineRow, Satellites};
use super::query::{self, MedicineFilter};

const CATALOG_COLUMNS: &str = concat!(
    " p.id, p.product_name,",
    " COALESCE(p.image, '') AS image,",
    " COALESCE(p.product_description, '') AS description,",
    " COALESCE(p.barcode, '') AS barcode,",
    " COALESCE(p.product_code, '') AS product_code,",
    " COALESCE(p.strength, '') AS strength,",
    " COALESCE(p.manufacture, '') AS manufacture,",
    " COALESCE(g.generic_name, '') AS generic_name,",
    " COALESCE(p.unit_price, 0)::float8 AS price,",
    " COALESCE(p.unit_mrp, 0)::float8 AS mrp,",
    " COALESCE(p.discount_percent, 0)::float8 AS discount,",
    " COALESCE(p.vat_percent, 0)::float8 AS vat,",
    " COALESCE(r.rack_name, '') AS rack_name,",
    " COALESCE(r.rack_location, '') AS rack_location,",
    " p.rack_fk_id,",
    " COALESCE(p.total_purchase, 0) AS total_purchase,",
    " COALESCE(p.total_sold, 0) AS total_sold,",
    " COALESCE(p.available_stock, 0) AS in_stock,",
    " COALESCE(p.stock_alert, 0) AS stock_alert,",
    " COALESCE(c.category_name, '') AS category,",
    " COALESCE(pt.type_name, '') AS type_name,",
    " COALESCE(lb.batch_id, '') AS batch_id,",
    " lb.expiry_date,",
    " lb.purchase_date,",
    " COALESCE(ps.name, '') AS supplier_name,",
    " COALESCE(ps.contact, '') AS supplier_contact,",
    " COALESCE(p.unit_cost_price, 0)::float8 AS buying_price,",
    " COALESCE(pps.strip_units, 0) AS strip_units,",
    " COALESCE(pps.box_units, 0) AS box_units,",
    " COALESCE(ppp.strip_price, 0)::float8 AS strip_price,",
    " COALESCE(ppp.box_price, 0)::float8 AS box_price",
);

/// Catalog query over every live product, satellites folded in via CTEs.
/// When no supplier link is flagged primary the most recently linked one
/// wins, deterministically.
const ALL_PRODUCTS_SQL_CTES: &str = concat!(
    "WITH product_pack_sizes AS (",
    " SELECT product_id,",
    " MAX(CASE WHEN pack_type = 'strip' THEN units_per_pack ELSE 0 END) AS strip_units,",
    " MAX(CASE WHEN pack_type = 'box' THEN units_per_pack ELSE 0 END) AS box_units",
    " FROM product_packaging GROUP BY product_id",
    "), product_pack_prices AS (",
    " SELECT product_id,",
    " MAX(CASE WHEN pack_type = 'strip' THEN selling_price ELSE 0 END) AS strip_price,",
    " MAX(CASE WHEN pack_type = 'box' THEN selling_price ELSE 0 END) AS box_price",
    " FROM product_packaging GROUP BY product_id",
    "), latest_batch AS (",
    " SELECT DISTINCT ON (product_id) product_id, batch_id, expiry_date, purchase_date",
    " FROM product_batch ORDER BY product_id, created_at DESC",
    "), primary_supplier AS (",
    " SELECT DISTINCT ON (ps.product_id) ps.product_id, s.name, s.contact",
    " FROM product_supplier ps JOIN supplier s ON ps.supplier_id = s.id",
    " ORDER BY ps.product_id, ps.is_primary DESC, ps.created_at DESC",
    ")",
);

const ALL_PRODUCTS_SQL_JOINS: &str = concat!(
    " FROM product p",
    " LEFT JOIN generic_name g ON p.generic_fk_id = g.id",
    " LEFT JOIN rack r ON p.rack_fk_id = r.id",
    " LEFT JOIN category c ON p.category_fk_id = c.id",
    " LEFT JOIN product_type pt ON p.product_type_fk_id = pt.id",
    " LEFT JOIN product_pack_sizes pps ON p.id = pps.product_id",
    " LEFT JOIN product_pack_prices ppp ON p.id = ppp.product_id",
    " LEFT JOIN latest_batch lb ON p.id = lb.product_id",
    " LEFT JOIN primary_supplier ps ON p.id = ps.product_id",
);

/// Same projection for a single product; the CTEs pre-filter on $1 so the
/// satellite scans stay cheap.
const SINGLE_PRODUCT_SQL_CTES: &str = concat!(
    "WITH product_pack_sizes AS (",
    " SELECT product_id,",
    " MAX(CASE WHEN pack_type = 'strip' THEN units_per_pack ELSE 0 END) AS strip_units,",
    " MAX(CASE WHEN pack_type = 'box' THEN units_per_pack ELSE 0 END) AS box_units",
    " FROM product_packaging WHERE product_id = $1 GROUP BY product_id",
    "), product_pack_prices AS (",
    " SELECT product_id,",
    " MAX(CASE WHEN pack_type = 'strip' THEN selling_price ELSE 0 END) AS strip_price,",
    " MAX(CASE WHEN pack_type = 'box' THEN selling_price ELSE 0 END) AS box_price",
    " FROM product_packaging WHERE product_id = $1 GROUP BY product_id",
    "), latest_batch AS (",
    " SELECT batch_id, expiry_date, purchase_date FROM product_batch",
    " WHERE product_id = $1 ORDER BY created_at DESC LIMIT 1",
    "), primary_supplier AS (",
    " SELECT s.name, s.contact",
    " FROM product_supplier ps JOIN supplier s ON ps.supplier_id = s.id",
    " WHERE ps.product_id = $1",
    " ORDER BY ps.is_primary DESC, ps.created_at DESC LIMIT 1",
    ")",
);

const SINGLE_PRODUCT_SQL_JOINS: &str = concat!(
    " FROM product p",
    " LEFT JOIN generic_name g ON p.generic_fk_id = g.id",
    " LEFT JOIN rack r ON p.rack_fk_id = r.id",
    " LEFT JOIN category c ON p.category_fk_id = c.id",
    " LEFT JOIN product_type pt ON p.product_type_fk_id = pt.id",
    " LEFT JOIN product_pack_sizes pps ON p.id = pps.product_id",
    " LEFT JOIN product_pack_prices ppp ON p.id = ppp.product_id",
    " LEFT JOIN latest_batch lb ON TRUE",
    " LEFT JOIN primary_supplier ps ON TRUE",
);

/// Paginated medicine listing: count first, then the page, then one round
/// of satellite lookups per row.
pub async fn list_medicines(
    db: &Database,
    page: i64,
    limit: i64,
    filter: &MedicineFilter,
) -> Result<PageEnvelope<ProductResponse>, ApiError> {
    let offset = (page - 1) * limit;
    let stmts = query::build(filter);

    let mut count = sqlx::query_scalar::<_, i64>(&stmts.count_sql);
    for a in &stmts.text_args {
        count = count.bind(a);
    }
    let total_items = count.fetch_one(db).await?;

    let pagination = Pagination {
        current_page: page,
        total_pages: query::total_pages(total_items, limit),
        total_items,
        items_per_page: limit,
    };

    if total_items == 0 {
        return Ok(PageEnvelope {
            data: Vec::new(),
            pagination,
        });
    }

    let mut data = sqlx::query_as::<_, MedicineRow>(&stmts.data_sql);
    for a in &stmts.text_args {
        data = data.bind(a);
    }
    let rows = data.bind(limit).bind(offset).fetch_all(db).await?;

    let mut products = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let srl_no = offset + i as i64 + 1;
        let extra = fetch_satellites(db, row.id).await;
        products.push(ProductResponse::from_listing_row(row, srl_no, extra));
    }

    Ok(PageEnvelope {
        data: products,
        pagination,
    })
}

/// Satellite enrichment for a listing row. Failures here must not fail the
/// projection; the affected fields simply stay empty.
async fn fetch_satellites(db: &Database, product_id: i32) -> Satellites {
    let mut extra = Satellites::default();

    if let Ok(rows) = sqlx::query_as::<_, (String, i32, f64)>(
        "SELECT pack_type, units_per_pack, COALESCE(selling_price, 0)::float8 \
         FROM product_packaging WHERE product_id = $1",
    )
    .bind(product_id)
    .fetch_all(db)
    .await
    {
        for (pack_type, units, price) in rows {
            match pack_type.as_str() {
                "strip" => {
                    extra.pack_size.strip = units;
                    extra.pack_price.strip = price;
                }
                "box" => {
                    extra.pack_size.r#box = units;
                    extra.pack_price.r#box = price;
                }
                _ => {}
            }
        }
    }

    if let Ok(Some((name, contact))) = sqlx::query_as::<_, (String, String)>(
        "SELECT s.name, COALESCE(s.contact, '') \
         FROM product_supplier ps JOIN supplier s ON ps.supplier_id = s.id \
         WHERE ps.product_id = $1 \
         ORDER BY ps.is_primary DESC, ps.created_at DESC LIMIT 1",
    )
    .bind(product_id)
    .fetch_optional(db)
    .await
    {
        extra.supplier = name;
        extra.supplier_contact = contact;
    }

    if let Ok(Some((batch_id, expiry, purchase))) =
        sqlx::query_as::<_, (String, Option<NaiveDate>, Option<NaiveDate>)>(
            "SELECT COALESCE(batch_id, ''), expiry_date, purchase_date \
             FROM product_batch WHERE product_id = $1 \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(product_id)
        .fetch_optional(db)
        .await
    {
        extra.batch_id = batch_id;
        extra.expiry_date = projection::format_date(expiry);
        extra.purchase_date = projection::format_date(purchase);
    }

    extra
}

/// Single live product by surrogate id, fully projected.
pub async fn fetch_product(db: &Database, id: i32) -> Result<ProductResponse, ApiError> {
    let sql = format!(
        "{SINGLE_PRODUCT_SQL_CTES} SELECT{CATALOG_COLUMNS}{SINGLE_PRODUCT_SQL_JOINS} \
         WHERE p.id = $1 AND p.deleted = 0"
    );

    let row = sqlx::query_as::<_, FullProductRow>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or(ApiError::NotFound("product"))?;

    Ok(ProductResponse::from_full_row(row))
}

/// Every live product, ordered by name.
pub async fn all_products(db: &Database) -> Result<Vec<ProductResponse>, ApiError> {
    let sql = format!(
        "{ALL_PRODUCTS_SQL_CTES} SELECT{CATALOG_COLUMNS}{ALL_PRODUCTS_SQL_JOINS} \
         WHERE p.deleted = 0 ORDER BY p.product_name"
    );

    let rows = sqlx::query_as::<_, FullProductRow>(&sql).fetch_all(db).await?;

    Ok(rows.into_iter().map(ProductResponse::from_full_row).collect())
}
