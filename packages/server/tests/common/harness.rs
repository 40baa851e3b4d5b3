//! Test harness with testcontainers for integration testing.
//!
//! A single Postgres container is started on first use and shared across
//! all tests; migrations run once, each test gets a fresh pool and mock
//! provider/mailer instances.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use server_core::config::ListAddressConfig;
use server_core::kernel::{MockListProvider, MockMailer, ServerDeps};

/// Shared test infrastructure that persists across all tests.
struct SharedTestInfra {
    db_url: String,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // Respect RUST_LOG; try_init avoids panicking if already set up.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let pg_host = postgres.get_host().await?;
        let pg_port = postgres.get_host_port_ipv4(5432).await?;
        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            pg_host, pg_port
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("Failed to connect to Postgres for migrations")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to initialize shared test infrastructure")
            })
            .await
    }
}

/// Per-test context: a fresh pool plus mock provider and mailer.
pub struct TestHarness {
    pub db_pool: PgPool,
    pub provider: Arc<MockListProvider>,
    pub mailer: Arc<MockMailer>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }

    async fn teardown(self) {
        // Database pool is automatically dropped
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("Failed to connect to shared test database")?;

        Ok(Self {
            db_pool,
            provider: Arc::new(MockListProvider::new()),
            mailer: Arc::new(MockMailer::new()),
        })
    }

    /// ServerDeps wired to this harness's mock provider and mailer.
    pub fn deps(&self) -> ServerDeps {
        self.deps_with(self.provider.clone(), self.mailer.clone())
    }

    /// ServerDeps with explicitly supplied mocks (e.g. a failing mailer).
    pub fn deps_with(
        &self,
        provider: Arc<MockListProvider>,
        mailer: Arc<MockMailer>,
    ) -> ServerDeps {
        ServerDeps::new(
            self.db_pool.clone(),
            provider,
            mailer,
            ListAddressConfig::new("lists", "example.com"),
        )
    }
}
