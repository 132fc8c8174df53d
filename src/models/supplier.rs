use serde::{Deserialize, Serialize};

use super::envelope::Pagination;

/// External supplier shape; `id` is the encoded `SUP-NNN` form.
#[derive(Debug, Clone, Serialize)]
pub struct SupplierDto {
    pub id: String,
    pub name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSupplierRequest {
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSupplierRequest {
    pub name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SupplierListData {
    pub data: Vec<SupplierDto>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct SupplierListResponse {
    pub success: bool,
    pub data: SupplierListData,
}

#[derive(Debug, Serialize)]
pub struct SupplierCompaniesResponse {
    pub success: bool,
    pub data: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SingleSupplierResponse {
    pub success: bool,
    pub data: SupplierDto,
}

#[derive(Debug, Serialize)]
pub struct DeleteSupplierResponse {
    pub success: bool,
    pub message: String,
}
