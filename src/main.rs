//src/main.rs

use axum::{
    Json, Router,
    routing::{delete, get, post},
};
use serde_json::json;
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let generic_routes = Router::new()
        .route("/create/generic", post(handlers::generics::create_generic))
        .route("/all", get(handlers::generics::get_all_generics))
        .route("/get-generic", get(handlers::generics::get_single_generic))
        .route("/delete/{id}", delete(handlers::generics::delete_generic));

    let company_routes = Router::new()
        .route("/create/company", post(handlers::companies::create_company))
        .route("/get-all", get(handlers::companies::get_all_companies))
        .route("/get-company", get(handlers::companies::get_single_company))
        .route("/delete/{id}", delete(handlers::companies::delete_company));

    let dosage_form_routes = Router::new()
        .route(
            "/create/dosage",
            post(handlers::dosage_forms::create_dosage_form),
        )
        .route("/get-all", get(handlers::dosage_forms::get_all_dosage_forms))
        .route(
            "/delete/{id}",
            delete(handlers::dosage_forms::delete_dosage_form),
        );

    let medicine_routes = Router::new()
        .route("/create/medicine", post(handlers::medicines::create_medicine))
        .route("/get-all", get(handlers::medicines::get_all_medicines))
        .route("/get-medicine", get(handlers::medicines::get_single_medicine))
        .route(
            "/delete-medicine/{id}",
            delete(handlers::medicines::delete_medicine),
        );

    let purchase_routes = Router::new()
        .route("/create/purchase", post(handlers::purchases::create_purchase))
        .route("/get-all", get(handlers::purchases::get_all_purchases));

    // Combina tudo no router principal
    let app = Router::new()
        .route(
            "/api/v1/health",
            get(|| async {
                Json(json!({ "success": true, "message": "Server is running" }))
            }),
        )
        .nest("/api/v1/generics", generic_routes)
        .nest("/api/v1/companies", company_routes)
        .nest("/api/v1/dosage-forms", dosage_form_routes)
        .nest("/api/v1/medicines", medicine_routes)
        .nest("/api/v1/purchases", purchase_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
