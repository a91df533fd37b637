// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        DashboardRepository, FinanceRepository, InventoryRepository, LogRepository,
        MemberRepository, OperationsRepository, PeopleRepository, UserRepository,
    },
    services::{
        AssistantService, AuthService, DashboardService, DocumentService, FinanceService,
        InventoryService, MemberService, OperationsService, PeopleService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub member_service: MemberService,
    pub finance_service: FinanceService,
    pub inventory_service: InventoryService,
    pub operations_service: OperationsService,
    pub people_service: PeopleService,
    pub dashboard_service: DashboardService,
    pub document_service: DocumentService,
    pub assistant_service: AssistantService,
    pub log_repo: LogRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        // Opcional: sem ela o assistente responde 502
        let gemini_api_key = env::var("GEMINI_API_KEY").ok();

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let member_repo = MemberRepository::new(db_pool.clone());
        let finance_repo = FinanceRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let operations_repo = OperationsRepository::new(db_pool.clone());
        let people_repo = PeopleRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());
        let log_repo = LogRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo,
            log_repo.clone(),
            jwt_secret.clone(),
            db_pool.clone(),
        );
        let member_service = MemberService::new(
            member_repo.clone(),
            finance_repo.clone(),
            log_repo.clone(),
            db_pool.clone(),
        );
        let finance_service = FinanceService::new(
            finance_repo.clone(),
            member_repo.clone(),
            people_repo.clone(),
            log_repo.clone(),
            db_pool.clone(),
        );
        let inventory_service =
            InventoryService::new(inventory_repo.clone(), log_repo.clone(), db_pool.clone());
        let operations_service = OperationsService::new(
            operations_repo,
            finance_repo.clone(),
            log_repo.clone(),
            db_pool.clone(),
        );
        let people_service =
            PeopleService::new(people_repo, log_repo.clone(), db_pool.clone());
        let dashboard_service = DashboardService::new(
            dashboard_repo,
            member_service.clone(),
            operations_service.clone(),
            db_pool.clone(),
        );
        let document_service = DocumentService::new(
            finance_repo.clone(),
            member_repo.clone(),
            finance_service.clone(),
            db_pool.clone(),
        );
        let assistant_service = AssistantService::new(
            member_repo,
            finance_repo,
            inventory_repo,
            gemini_api_key,
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            member_service,
            finance_service,
            inventory_service,
            operations_service,
            people_service,
            dashboard_service,
            document_service,
            assistant_service,
            log_repo,
        })
    }
}
