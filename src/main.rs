//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

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

    app_state
        .auth_service
        .ensure_default_admin()
        .await
        .expect("Falha ao verificar o usuário administrador inicial.");

    // Rotas públicas
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    // Perfil e gestão de usuários (protegidas)
    let user_routes = Router::new()
        .route(
            "/",
            get(handlers::auth::list_users).post(handlers::auth::create_user),
        )
        .route(
            "/{id}",
            axum::routing::put(handlers::auth::update_user).delete(handlers::auth::delete_user),
        );

    let member_routes = Router::new()
        .route(
            "/",
            get(handlers::members::list_members).post(handlers::members::create_member),
        )
        .route("/debtors", get(handlers::members::list_debtors))
        .route(
            "/{id}",
            get(handlers::members::get_member)
                .put(handlers::members::update_member)
                .delete(handlers::members::delete_member),
        )
        .route("/{id}/settle-debt", post(handlers::members::settle_debt));

    let finance_routes = Router::new()
        .route(
            "/accounts",
            get(handlers::finance::list_accounts).post(handlers::finance::create_account),
        )
        .route(
            "/accounts/{id}",
            axum::routing::put(handlers::finance::update_account)
                .delete(handlers::finance::delete_account),
        )
        .route(
            "/transactions",
            get(handlers::finance::list_transactions).post(handlers::finance::create_transaction),
        )
        .route(
            "/transactions/{id}",
            axum::routing::put(handlers::finance::update_transaction)
                .delete(handlers::finance::delete_transaction),
        )
        .route("/income-statement", get(handlers::finance::income_statement));

    let inventory_routes = Router::new()
        .route(
            "/items",
            get(handlers::inventory::list_items).post(handlers::inventory::create_item),
        )
        .route(
            "/items/{id}",
            axum::routing::put(handlers::inventory::update_item)
                .delete(handlers::inventory::delete_item),
        )
        .route("/low-stock", get(handlers::inventory::list_low_stock))
        .route("/dosing/suggest", post(handlers::inventory::suggest_dosage))
        .route("/dosing/apply", post(handlers::inventory::apply_dosage))
        .route(
            "/maintenance-logs",
            get(handlers::inventory::list_maintenance_logs),
        );

    let operations_routes = Router::new()
        .route(
            "/projects",
            get(handlers::operations::list_projects).post(handlers::operations::create_project),
        )
        .route(
            "/projects/{id}",
            axum::routing::put(handlers::operations::update_project)
                .delete(handlers::operations::delete_project),
        )
        .route(
            "/service-orders",
            get(handlers::operations::list_service_orders)
                .post(handlers::operations::create_service_order),
        )
        .route(
            "/service-orders/{id}",
            axum::routing::put(handlers::operations::update_service_order)
                .delete(handlers::operations::delete_service_order),
        )
        .route(
            "/purchase-orders",
            get(handlers::operations::list_purchase_orders)
                .post(handlers::operations::create_purchase_order),
        )
        .route(
            "/purchase-orders/{id}",
            axum::routing::put(handlers::operations::update_purchase_order)
                .delete(handlers::operations::delete_purchase_order),
        )
        .route("/payables", get(handlers::operations::list_payables))
        .route("/payables/pay", post(handlers::operations::pay_obligation));

    let people_routes = Router::new()
        .route(
            "/suppliers",
            get(handlers::people::list_suppliers).post(handlers::people::create_supplier),
        )
        .route(
            "/suppliers/{id}",
            axum::routing::put(handlers::people::update_supplier)
                .delete(handlers::people::delete_supplier),
        )
        .route(
            "/board",
            get(handlers::people::list_board_members).post(handlers::people::create_board_member),
        )
        .route(
            "/board/{id}",
            axum::routing::put(handlers::people::update_board_member)
                .delete(handlers::people::delete_board_member),
        )
        .route(
            "/employees",
            get(handlers::people::list_employees).post(handlers::people::create_employee),
        )
        .route(
            "/employees/{id}",
            axum::routing::put(handlers::people::update_employee)
                .delete(handlers::people::delete_employee),
        );

    let document_routes = Router::new()
        .route(
            "/receipt/{transaction_id}",
            get(handlers::documents::payment_receipt),
        )
        .route(
            "/income-statement",
            get(handlers::documents::income_statement_pdf),
        );

    // Tudo que não é login exige um token válido
    let protected_routes = Router::new()
        .route("/auth/me", get(handlers::auth::get_me))
        .nest("/users", user_routes)
        .nest("/members", member_routes)
        .nest("/finance", finance_routes)
        .nest("/inventory", inventory_routes)
        .nest("/operations", operations_routes)
        .nest("/people", people_routes)
        .nest("/documents", document_routes)
        .route("/payroll/estimate", post(handlers::payroll::estimate))
        .route("/dashboard/summary", get(handlers::dashboard::summary))
        .route("/assistant/report", post(handlers::assistant::generate_report))
        .route("/logs", get(handlers::logs::list_logs))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected_routes)
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
