mod database;
mod error;
mod handlers;
mod ident;
mod inventory;
mod models;

use axum::{
    routing::{get, put},
    Router,
};
use dotenvy::dotenv;
use std::env;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use database::{create_database_pool, Database};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    env_logger::init();

    // Initialize database
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let db = create_database_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!()
        .run(&db)
        .await
        .expect("Failed to run migrations");

    println!("Database connection successful!");

    // Build the application router
    let app = create_router(db);

    // Get port from environment or use default
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let addr = format!("0.0.0.0:{}", port);

    println!("🚀 Pharmacy Management System API starting on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

fn create_router(db: Database) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(handlers::health))
        // Inventory routes (paginated listing + medicine CRUD)
        .route(
            "/api/inventory/medicines",
            get(handlers::medicines::list_medicines).post(handlers::medicines::create_medicine),
        )
        .route(
            "/api/inventory/medicines/:id",
            get(handlers::medicines::get_medicine)
                .put(handlers::medicines::update_medicine)
                .delete(handlers::medicines::delete_medicine),
        )
        .route(
            "/api/inventory/racks",
            get(handlers::medicines::get_racks).post(handlers::medicines::create_rack),
        )
        .route(
            "/api/inventory/racks/medicines",
            get(handlers::medicines::get_rack_medicines),
        )
        .route("/api/inventory/generics", get(handlers::medicines::get_generics))
        // Product routes (unpaginated catalog with the frontend response format)
        .route(
            "/api/products",
            get(handlers::products::get_all_products).post(handlers::products::add_product),
        )
        .route(
            "/api/products/:id",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::remove_product),
        )
        // Supplier routes
        .route(
            "/api/suppliers",
            get(handlers::suppliers::list_suppliers).post(handlers::suppliers::add_supplier),
        )
        .route(
            "/api/suppliers/companies",
            get(handlers::suppliers::get_companies),
        )
        .route(
            "/api/suppliers/:id",
            put(handlers::suppliers::update_supplier).delete(handlers::suppliers::delete_supplier),
        )
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(db)
}
