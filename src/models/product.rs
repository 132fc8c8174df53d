use serde::{Deserialize, Serialize};

fn is_zero_i32(v: &i32) -> bool {
    *v == 0
}

fn is_zero_f64(v: &f64) -> bool {
    *v == 0.0
}

/// Units per pack for the strip/box pack tiers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PackSize {
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub strip: i32,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub r#box: i32,
}

/// Selling prices for the strip/box pack tiers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PackPrice {
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub strip: f64,
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub r#box: f64,
}

/// External product shape shared by every endpoint that projects a product.
///
/// `stockStatus` and `profitMargin` are derived, never stored; `id` is the
/// encoded `prod_NNN` form. Field omission mirrors the original wire format:
/// empty optional strings and zero rack ids are dropped from the JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub srl_no: i64,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub barcode: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub product_code: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub strength: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub manufacture: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub generic_name: String,
    pub price: f64,
    pub mrp: f64,
    pub discount: f64,
    pub vat: f64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rack_no: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rack_location: String,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub rack_fk_id: i32,
    pub total_purchase: i32,
    pub total_sold: i32,
    pub in_stock: i32,
    pub stock_status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub expiry_date: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub product_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub batch_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub supplier: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub supplier_contact: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub purchase_date: String,
    pub buying_price: f64,
    pub profit_margin: f64,
    pub stock_alert: i32,
    pub pack_size: PackSize,
    pub pack_price: PackPrice,
}

/// Request body for POST /api/products and POST /api/inventory/medicines.
/// Only `name` is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub strength: String,
    #[serde(default)]
    pub generic_name: String,
    #[serde(default)]
    pub manufacture: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub supplier_contact: String,
    #[serde(default)]
    pub rack_no: String,
    #[serde(default)]
    pub rack_location: String,
    #[serde(default)]
    pub in_stock: i32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub mrp: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub buying_price: f64,
    #[serde(default, rename = "type")]
    pub product_type: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub pack_size: PackSize,
    #[serde(default)]
    pub pack_price: PackPrice,
}

/// Request body for PUT /api/products/:id — absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub strength: Option<String>,
    pub generic_name: Option<String>,
    pub manufacture: Option<String>,
    pub supplier: Option<String>,
    pub supplier_contact: Option<String>,
    pub rack_no: Option<String>,
    pub rack_location: Option<String>,
    pub in_stock: Option<i32>,
    pub price: Option<f64>,
    pub mrp: Option<f64>,
    pub discount: Option<f64>,
    pub buying_price: Option<f64>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub category: Option<String>,
    pub pack_size: Option<PackSize>,
    pub pack_price: Option<PackPrice>,
}

#[derive(Debug, Serialize)]
pub struct DeleteProductResponse {
    pub id: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_distinguishes_absent_from_empty() {
        let req: UpdateProductRequest = serde_json::from_str(r#"{"price": 12.5}"#).unwrap();
        assert_eq!(req.price, Some(12.5));
        assert!(req.name.is_none());
        assert!(req.pack_size.is_none());

        let req: UpdateProductRequest =
            serde_json::from_str(r#"{"name": "", "packSize": {"strip": 10}}"#).unwrap();
        assert_eq!(req.name.as_deref(), Some(""));
        assert_eq!(req.pack_size.unwrap().strip, 10);
        assert_eq!(req.pack_size.unwrap().r#box, 0);
    }

    #[test]
    fn create_request_defaults_optional_fields() {
        let req: CreateProductRequest =
            serde_json::from_str(r#"{"name": "Napa", "price": 10, "buyingPrice": 8}"#).unwrap();
        assert_eq!(req.name, "Napa");
        assert_eq!(req.price, 10.0);
        assert_eq!(req.buying_price, 8.0);
        assert_eq!(req.in_stock, 0);
        assert!(req.generic_name.is_empty());
        assert_eq!(req.pack_size.strip, 0);
    }

    #[test]
    fn pack_tiers_use_the_box_key() {
        let size: PackSize = serde_json::from_str(r#"{"strip": 10, "box": 100}"#).unwrap();
        assert_eq!(size.strip, 10);
        assert_eq!(size.r#box, 100);

        let out = serde_json::to_value(size).unwrap();
        assert_eq!(out, serde_json::json!({"strip": 10, "box": 100}));
        // Zero tiers are omitted entirely.
        let empty = serde_json::to_value(PackSize::default()).unwrap();
        assert_eq!(empty, serde_json::json!({}));
    }
}
