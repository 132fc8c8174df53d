//! The closed set of response envelopes the frontend knows about.
//!
//! The endpoint families grew different wrappers over time and the shapes
//! are load-bearing: `/api/products` wraps everything in
//! `{success, data, error}`, the inventory listing returns
//! `{data, pagination}`, and single lookups return a bare `{data}`.

use serde::Serialize;

/// `{success, data, error}` wrapper used by the `/api/products` family.
#[derive(Debug, Serialize)]
pub struct ProductApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ProductApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// `{data, pagination}` wrapper used by paginated listings.
#[derive(Debug, Serialize)]
pub struct PageEnvelope<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Bare `{data}` wrapper used by single-item lookups.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T: Serialize> {
    pub data: T,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_envelope_shapes() {
        let ok = serde_json::to_value(ProductApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(ok, json!({"success": true, "data": [1, 2], "error": null}));

        let err = serde_json::to_value(ProductApiResponse::<()>::failure("boom".into())).unwrap();
        assert_eq!(err, json!({"success": false, "data": null, "error": "boom"}));
    }

    #[test]
    fn pagination_uses_camel_case() {
        let page = serde_json::to_value(Pagination {
            current_page: 2,
            total_pages: 5,
            total_items: 98,
            items_per_page: 20,
        })
        .unwrap();
        assert_eq!(
            page,
            json!({"currentPage": 2, "totalPages": 5, "totalItems": 98, "itemsPerPage": 20})
        );
    }
}
