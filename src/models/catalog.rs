use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct RackDto {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRackRequest {
    pub name: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenericDto {
    pub id: i32,
    pub name: String,
}

/// Trimmed product row for the per-rack medicine listing. The wire format
/// uses snake_case keys, unlike the product projection.
#[derive(Debug, Clone, Serialize)]
pub struct RackMedicineItem {
    pub id: i32,
    pub srl_no: i32,
    pub code: String,
    pub medicine_name: String,
    pub generic_name: String,
    pub strength: String,
    pub price: f64,
    pub stock: i32,
}

#[derive(Debug, Serialize)]
pub struct RackWithMedicines {
    pub rack: RackDto,
    pub medicines: Vec<RackMedicineItem>,
    pub total_medicines: usize,
}
