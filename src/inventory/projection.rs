//! Maps raw joined rows into the external product shape and computes the
//! derived fields. Every endpoint that projects a product goes through one
//! of the two constructors here, so `stockStatus` and `profitMargin` can
//! never disagree between the listing and the single-item lookups.

use chrono::NaiveDate;
use sqlx::FromRow;

use crate::ident;
use crate::models::{PackPrice, PackSize, ProductResponse};

/// Row shape of the listing query (fact + dimension names, no satellites).
#[derive(Debug, FromRow)]
pub struct MedicineRow {
    pub id: i32,
    pub product_name: String,
    pub description: String,
    pub product_code: String,
    pub strength: String,
    pub manufacture: String,
    pub generic_name: String,
    pub price: f64,
    pub mrp: f64,
    pub buying_price: f64,
    pub discount: f64,
    pub vat: f64,
    pub rack_name: String,
    pub rack_location: String,
    pub rack_fk_id: Option<i32>,
    pub in_stock: i32,
    pub category: String,
    pub type_name: String,
    pub total_purchase: i32,
    pub total_sold: i32,
    pub barcode: String,
    pub stock_alert: i32,
}

/// Row shape of the catalog query, which folds the satellites in via CTEs.
#[derive(Debug, FromRow)]
pub struct FullProductRow {
    pub id: i32,
    pub product_name: String,
    pub image: String,
    pub description: String,
    pub barcode: String,
    pub product_code: String,
    pub strength: String,
    pub manufacture: String,
    pub generic_name: String,
    pub price: f64,
    pub mrp: f64,
    pub discount: f64,
    pub vat: f64,
    pub rack_name: String,
    pub rack_location: String,
    pub rack_fk_id: Option<i32>,
    pub total_purchase: i32,
    pub total_sold: i32,
    pub in_stock: i32,
    pub stock_alert: i32,
    pub category: String,
    pub type_name: String,
    pub batch_id: String,
    pub expiry_date: Option<NaiveDate>,
    pub purchase_date: Option<NaiveDate>,
    pub supplier_name: String,
    pub supplier_contact: String,
    pub buying_price: f64,
    pub strip_units: i32,
    pub box_units: i32,
    pub strip_price: f64,
    pub box_price: f64,
}

/// Satellite data fetched by the listing's per-row sub-queries. Lookup
/// failures leave the defaults in place; they never fail the projection.
#[derive(Debug, Default)]
pub struct Satellites {
    pub pack_size: PackSize,
    pub pack_price: PackPrice,
    pub supplier: String,
    pub supplier_contact: String,
    pub batch_id: String,
    pub expiry_date: String,
    pub purchase_date: String,
}

/// Batch dates travel as `YYYY-MM-DD` strings on the wire; a missing date
/// is the empty string, which the serializer then drops.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn stock_status(in_stock: i32, stock_alert: i32) -> &'static str {
    if in_stock <= 0 {
        "Out of Stock"
    } else if in_stock < stock_alert {
        "Low Stock"
    } else {
        "Normal"
    }
}

/// Percentage markup over the buying price, truncated (not rounded) to two
/// decimal places. The frontend compares these values bit for bit, so the
/// truncation policy must not change.
pub fn profit_margin(price: f64, buying_price: f64) -> f64 {
    if buying_price <= 0.0 {
        return 0.0;
    }
    let margin = ((price - buying_price) / buying_price) * 100.0;
    (margin * 100.0).trunc() / 100.0
}

impl ProductResponse {
    /// Listing variant: `srl_no` is the 1-based position within the query
    /// result (offset + index), restarting on every page.
    pub fn from_listing_row(row: MedicineRow, srl_no: i64, extra: Satellites) -> Self {
        ProductResponse {
            id: ident::encode_product_id(row.id),
            srl_no,
            name: row.product_name,
            image: String::new(),
            description: row.description,
            barcode: row.barcode,
            product_code: row.product_code,
            strength: row.strength,
            manufacture: row.manufacture,
            generic_name: row.generic_name,
            price: row.price,
            mrp: row.mrp,
            discount: row.discount,
            vat: row.vat,
            rack_no: row.rack_name,
            rack_location: row.rack_location,
            rack_fk_id: row.rack_fk_id.unwrap_or(0),
            total_purchase: row.total_purchase,
            total_sold: row.total_sold,
            in_stock: row.in_stock,
            stock_status: stock_status(row.in_stock, row.stock_alert).to_string(),
            category: row.category,
            expiry_date: extra.expiry_date,
            product_type: row.type_name,
            batch_id: extra.batch_id,
            supplier: extra.supplier,
            supplier_contact: extra.supplier_contact,
            purchase_date: extra.purchase_date,
            buying_price: row.buying_price,
            profit_margin: profit_margin(row.price, row.buying_price),
            stock_alert: row.stock_alert,
            pack_size: extra.pack_size,
            pack_price: extra.pack_price,
        }
    }

    /// Catalog variant: `srl_no` carries the raw surrogate key, which is
    /// what the all-products endpoint has always reported.
    pub fn from_full_row(row: FullProductRow) -> Self {
        ProductResponse {
            id: ident::encode_product_id(row.id),
            srl_no: i64::from(row.id),
            name: row.product_name,
            image: row.image,
            description: row.description,
            barcode: row.barcode,
            product_code: row.product_code,
            strength: row.strength,
            manufacture: row.manufacture,
            generic_name: row.generic_name,
            price: row.price,
            mrp: row.mrp,
            discount: row.discount,
            vat: row.vat,
            rack_no: row.rack_name,
            rack_location: row.rack_location,
            rack_fk_id: row.rack_fk_id.unwrap_or(0),
            total_purchase: row.total_purchase,
            total_sold: row.total_sold,
            in_stock: row.in_stock,
            stock_status: stock_status(row.in_stock, row.stock_alert).to_string(),
            category: row.category,
            expiry_date: format_date(row.expiry_date),
            product_type: row.type_name,
            batch_id: row.batch_id,
            supplier: row.supplier_name,
            supplier_contact: row.supplier_contact,
            purchase_date: format_date(row.purchase_date),
            buying_price: row.buying_price,
            profit_margin: profit_margin(row.price, row.buying_price),
            stock_alert: row.stock_alert,
            pack_size: PackSize {
                strip: row.strip_units,
                r#box: row.box_units,
            },
            pack_price: PackPrice {
                strip: row.strip_price,
                r#box: row.box_price,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_row(id: i32) -> MedicineRow {
        MedicineRow {
            id,
            product_name: "Napa".to_string(),
            description: String::new(),
            product_code: "Napa500".to_string(),
            strength: "500mg".to_string(),
            manufacture: String::new(),
            generic_name: "Paracetamol".to_string(),
            price: 10.0,
            mrp: 12.0,
            buying_price: 8.0,
            discount: 0.0,
            vat: 0.0,
            rack_name: String::new(),
            rack_location: String::new(),
            rack_fk_id: None,
            in_stock: 5,
            category: String::new(),
            type_name: String::new(),
            total_purchase: 0,
            total_sold: 0,
            barcode: String::new(),
            stock_alert: 10,
        }
    }

    #[test]
    fn stock_status_boundaries() {
        assert_eq!(stock_status(0, 10), "Out of Stock");
        assert_eq!(stock_status(-3, 10), "Out of Stock");
        assert_eq!(stock_status(1, 10), "Low Stock");
        assert_eq!(stock_status(9, 10), "Low Stock");
        assert_eq!(stock_status(10, 10), "Normal");
        assert_eq!(stock_status(500, 10), "Normal");
        // An alert threshold of zero can never mark live stock as low.
        assert_eq!(stock_status(1, 0), "Normal");
    }

    #[test]
    fn profit_margin_matches_the_truncation_formula() {
        assert_eq!(profit_margin(150.0, 100.0), 50.0);
        assert_eq!(profit_margin(133.0, 100.0), 33.0);
        assert_eq!(profit_margin(10.0, 8.0), 25.0);
        // 70/30 = 233.333..% truncates, never rounds up.
        assert_eq!(profit_margin(100.0, 30.0), 233.33);
    }

    #[test]
    fn profit_margin_is_zero_without_a_buying_price() {
        assert_eq!(profit_margin(150.0, 0.0), 0.0);
        assert_eq!(profit_margin(150.0, -5.0), 0.0);
    }

    #[test]
    fn missing_batch_dates_become_empty_strings() {
        assert_eq!(format_date(None), "");
        assert_eq!(format_date(NaiveDate::from_ymd_opt(2027, 1, 5)), "2027-01-05");
    }

    #[test]
    fn listing_serial_survives_deep_pagination() {
        let deep = i64::from(i32::MAX) + 10;
        let p = ProductResponse::from_listing_row(listing_row(1), deep, Satellites::default());
        assert_eq!(p.srl_no, deep);
    }

    #[test]
    fn listing_projection_derives_everything() {
        let p = ProductResponse::from_listing_row(listing_row(7), 3, Satellites::default());
        assert_eq!(p.id, "prod_007");
        assert_eq!(p.srl_no, 3);
        assert_eq!(p.stock_status, "Low Stock");
        assert_eq!(p.profit_margin, 25.0);
        assert_eq!(p.rack_fk_id, 0);
        assert_eq!(p.pack_size.strip, 0);
    }

    #[test]
    fn satellites_fill_the_optional_fields() {
        let extra = Satellites {
            pack_size: PackSize { strip: 10, r#box: 100 },
            pack_price: PackPrice { strip: 95.0, r#box: 900.0 },
            supplier: "Beximco".to_string(),
            supplier_contact: "01711".to_string(),
            batch_id: "B-12".to_string(),
            expiry_date: "2027-01-31".to_string(),
            purchase_date: "2026-01-31".to_string(),
        };
        let p = ProductResponse::from_listing_row(listing_row(1), 1, extra);
        assert_eq!(p.pack_size.strip, 10);
        assert_eq!(p.pack_price.r#box, 900.0);
        assert_eq!(p.supplier, "Beximco");
        assert_eq!(p.batch_id, "B-12");
    }

    #[test]
    fn catalog_projection_uses_the_surrogate_key_as_serial() {
        let row = FullProductRow {
            id: 42,
            product_name: "Seclo".to_string(),
            image: String::new(),
            description: String::new(),
            barcode: String::new(),
            product_code: "Secl20m".to_string(),
            strength: "20mg".to_string(),
            manufacture: String::new(),
            generic_name: "Omeprazole".to_string(),
            price: 7.0,
            mrp: 8.0,
            discount: 0.0,
            vat: 0.0,
            rack_name: "R1".to_string(),
            rack_location: "Front".to_string(),
            rack_fk_id: Some(2),
            total_purchase: 100,
            total_sold: 60,
            in_stock: 40,
            stock_alert: 10,
            category: "Tablet".to_string(),
            type_name: "Tablet".to_string(),
            batch_id: "B-1".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2027, 6, 30),
            purchase_date: NaiveDate::from_ymd_opt(2026, 5, 1),
            supplier_name: "Square".to_string(),
            supplier_contact: String::new(),
            buying_price: 5.0,
            strip_units: 10,
            box_units: 100,
            strip_price: 68.0,
            box_price: 650.0,
        };
        let p = ProductResponse::from_full_row(row);
        assert_eq!(p.id, "prod_042");
        assert_eq!(p.srl_no, 42);
        assert_eq!(p.expiry_date, "2027-06-30");
        assert_eq!(p.purchase_date, "2026-05-01");
        assert_eq!(p.stock_status, "Normal");
        assert_eq!(p.profit_margin, 40.0);
        assert_eq!(p.rack_fk_id, 2);
        assert_eq!(p.pack_size.r#box, 100);
        assert_eq!(p.pack_price.strip, 68.0);
    }
}
