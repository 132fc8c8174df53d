//! `/api/suppliers` handlers. Supplier queries are simple enough that
//! the SQL lives here rather than in a dedicated storage module.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::FromRow;

use crate::{
    database::Database,
    error::ApiError,
    ident,
    inventory::query::total_pages,
    models::{
        CreateSupplierRequest, DeleteSupplierResponse, Pagination, SingleSupplierResponse,
        SupplierCompaniesResponse, SupplierDto, SupplierListData, SupplierListResponse,
        UpdateSupplierRequest,
    },
};

#[derive(Debug, Deserialize)]
pub struct SupplierListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, FromRow)]
struct SupplierRow {
    id: i32,
    name: String,
    company: Option<String>,
    contact: Option<String>,
    email: Option<String>,
    address: Option<String>,
    status: Option<String>,
}

impl SupplierRow {
    fn into_dto(self) -> SupplierDto {
        let status = match self.status {
            Some(s) if !s.is_empty() => s,
            _ => "Active".to_string(),
        };
        SupplierDto {
            id: ident::encode_supplier_id(self.id),
            name: self.name,
            company: self.company.unwrap_or_default(),
            phone: self.contact.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            status,
        }
    }
}

// GET /api/suppliers
pub async fn list_suppliers(
    State(db): State<Database>,
    Query(params): Query<SupplierListParams>,
) -> Result<Json<SupplierListResponse>, ApiError> {
    let page = params.page.filter(|p| *p > 0).unwrap_or(1);
    let limit = params.limit.filter(|l| *l > 0).unwrap_or(10);
    let offset = (page - 1) * limit;

    let mut data_sql = String::from(
        "SELECT id, name, company, contact, email, address, status \
         FROM supplier WHERE deleted = 0",
    );
    let mut count_sql = String::from("SELECT COUNT(*) FROM supplier WHERE deleted = 0");
    let mut text_args: Vec<String> = Vec::new();

    if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
        let n = text_args.len() + 1;
        let clause = format!(
            " AND (name ILIKE ${n} OR contact ILIKE ${n} OR email ILIKE ${n})"
        );
        data_sql.push_str(&clause);
        count_sql.push_str(&clause);
        text_args.push(format!("%{}%", search));
    }

    if let Some(company) = params.company.as_deref().filter(|c| !c.is_empty()) {
        let n = text_args.len() + 1;
        let clause = format!(" AND company ILIKE ${n}");
        data_sql.push_str(&clause);
        count_sql.push_str(&clause);
        text_args.push(format!("%{}%", company));
    }

    data_sql.push_str(&format!(
        " ORDER BY id ASC LIMIT ${} OFFSET ${}",
        text_args.len() + 1,
        text_args.len() + 2
    ));

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &text_args {
        count_query = count_query.bind(arg);
    }
    let total_items = count_query.fetch_one(&db).await?;

    let mut data_query = sqlx::query_as::<_, SupplierRow>(&data_sql);
    for arg in &text_args {
        data_query = data_query.bind(arg);
    }
    let rows = data_query.bind(limit).bind(offset).fetch_all(&db).await?;

    let suppliers: Vec<SupplierDto> = rows.into_iter().map(SupplierRow::into_dto).collect();

    Ok(Json(SupplierListResponse {
        success: true,
        data: SupplierListData {
            data: suppliers,
            pagination: Pagination {
                current_page: page,
                total_pages: total_pages(total_items, limit),
                total_items,
                items_per_page: limit,
            },
        },
    }))
}

// GET /api/suppliers/companies
pub async fn get_companies(
    State(db): State<Database>,
) -> Result<Json<SupplierCompaniesResponse>, ApiError> {
    let companies: Vec<String> = sqlx::query_scalar(
        "SELECT DISTINCT company FROM supplier \
         WHERE deleted = 0 AND company IS NOT NULL AND company != '' \
         ORDER BY company ASC",
    )
    .fetch_all(&db)
    .await?;

    Ok(Json(SupplierCompaniesResponse {
        success: true,
        data: companies,
    }))
}

// POST /api/suppliers
pub async fn add_supplier(
    State(db): State<Database>,
    Json(req): Json<CreateSupplierRequest>,
) -> Result<(StatusCode, Json<SingleSupplierResponse>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::Validation("supplier name is required".to_string()));
    }

    let id: i32 = sqlx::query_scalar(
        "INSERT INTO supplier (name, company, contact, email, address, status) \
         VALUES ($1, $2, $3, $4, $5, 'Active') \
         RETURNING id",
    )
    .bind(&req.name)
    .bind(&req.company)
    .bind(&req.phone)
    .bind(&req.email)
    .bind(&req.address)
    .fetch_one(&db)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SingleSupplierResponse {
            success: true,
            data: SupplierDto {
                id: ident::encode_supplier_id(id),
                name: req.name,
                company: req.company,
                phone: req.phone,
                email: req.email,
                address: req.address,
                status: "Active".to_string(),
            },
        }),
    ))
}

// PUT /api/suppliers/:id
pub async fn update_supplier(
    State(db): State<Database>,
    Path(id): Path<String>,
    Json(req): Json<UpdateSupplierRequest>,
) -> Result<Json<SingleSupplierResponse>, ApiError> {
    let supplier_id = ident::decode_supplier_id(&id)?;

    let existing = sqlx::query_as::<_, SupplierRow>(
        "SELECT id, name, company, contact, email, address, status \
         FROM supplier WHERE id = $1 AND deleted = 0",
    )
    .bind(supplier_id)
    .fetch_optional(&db)
    .await?
    .ok_or(ApiError::NotFound("supplier"))?;

    let current = existing.into_dto();
    let name = req.name.unwrap_or(current.name);
    let company = req.company.unwrap_or(current.company);
    let phone = req.phone.unwrap_or(current.phone);
    let email = req.email.unwrap_or(current.email);
    let address = req.address.unwrap_or(current.address);

    sqlx::query(
        "UPDATE supplier \
         SET name = $1, company = $2, contact = $3, email = $4, address = $5, updated_at = NOW() \
         WHERE id = $6",
    )
    .bind(&name)
    .bind(&company)
    .bind(&phone)
    .bind(&email)
    .bind(&address)
    .bind(supplier_id)
    .execute(&db)
    .await?;

    Ok(Json(SingleSupplierResponse {
        success: true,
        data: SupplierDto {
            id: ident::encode_supplier_id(supplier_id),
            name,
            company,
            phone,
            email,
            address,
            status: current.status,
        },
    }))
}

// DELETE /api/suppliers/:id
pub async fn delete_supplier(
    State(db): State<Database>,
    Path(id): Path<String>,
) -> Result<Json<DeleteSupplierResponse>, ApiError> {
    let supplier_id = ident::decode_supplier_id(&id)?;

    let result = sqlx::query("UPDATE supplier SET deleted = 1, deleted_at = NOW() WHERE id = $1")
        .bind(supplier_id)
        .execute(&db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("supplier"));
    }

    Ok(Json(DeleteSupplierResponse {
        success: true,
        message: "Supplier deleted successfully".to_string(),
    }))
}
