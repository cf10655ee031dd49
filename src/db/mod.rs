use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::models::{
    Ipo, IpoApplication, IpoDraft, IpoPatch, ListFilter, NewApplication, NewUser, StatusCounts,
    User,
};

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn ipo_repo(&self) -> repositories::ipo::IpoRepository {
        repositories::ipo::IpoRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn application_repo(&self) -> repositories::application::ApplicationRepository {
        repositories::application::ApplicationRepository::new(self.conn.clone())
    }

    // IPO records

    pub async fn create_ipo(&self, draft: &IpoDraft) -> Result<Ipo> {
        self.ipo_repo().create(draft).await
    }

    pub async fn get_ipo(&self, id: &str) -> Result<Option<Ipo>> {
        self.ipo_repo().get(id).await
    }

    pub async fn update_ipo(&self, id: &str, patch: &IpoPatch) -> Result<Option<Ipo>> {
        self.ipo_repo().update(id, patch).await
    }

    pub async fn delete_ipo(&self, id: &str) -> Result<bool> {
        self.ipo_repo().delete(id).await
    }

    pub async fn list_ipos(&self, filter: &ListFilter) -> Result<Vec<Ipo>> {
        self.ipo_repo().list(filter).await
    }

    pub async fn search_ipos(&self, text: &str) -> Result<Vec<Ipo>> {
        self.ipo_repo().search(text).await
    }

    pub async fn ipo_status_counts(&self) -> Result<StatusCounts> {
        self.ipo_repo().count_by_status().await
    }

    // Users

    pub async fn create_user(&self, new_user: &NewUser, security: &SecurityConfig) -> Result<User> {
        self.user_repo().create(new_user, security).await
    }

    pub async fn get_user(&self, id: &str) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        self.user_repo().username_exists(username).await
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        self.user_repo().email_exists(email).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn update_user_password(
        &self,
        username: &str,
        new_password: &str,
        security: &SecurityConfig,
    ) -> Result<()> {
        self.user_repo()
            .update_password(username, new_password, security)
            .await
    }

    // IPO applications

    pub async fn create_application(&self, new: &NewApplication) -> Result<IpoApplication> {
        self.application_repo().create(new).await
    }

    pub async fn applications_for_user(&self, user_id: &str) -> Result<Vec<IpoApplication>> {
        self.application_repo().for_user(user_id).await
    }

    pub async fn applications_for_ipo(&self, ipo_id: &str) -> Result<Vec<IpoApplication>> {
        self.application_repo().for_ipo(ipo_id).await
    }
}
