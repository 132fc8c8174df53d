pub mod catalog;
pub mod envelope;
pub mod product;
pub mod supplier;

// Re-export only the types we actually use
pub use catalog::{CreateRackRequest, GenericDto, RackDto, RackMedicineItem, RackWithMedicines};
pub use envelope::{DataEnvelope, PageEnvelope, Pagination, ProductApiResponse};
pub use product::{
    CreateProductRequest, DeleteProductResponse, PackPrice, PackSize, ProductResponse,
    UpdateProductRequest,
};
pub use supplier::{
    CreateSupplierRequest, DeleteSupplierResponse, SingleSupplierResponse, SupplierCompaniesResponse,
    SupplierDto, SupplierListData, SupplierListResponse, UpdateSupplierRequest,
};
