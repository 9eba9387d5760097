//! Embedded PostgreSQL bootstrap for the Diesel adapter suites.
//!
//! Each suite gets a fresh migrated database inside a throwaway cluster.
//! `pg-embed-setup-unpriv` installs under `/var/tmp` by default; when
//! `PG_RUNTIME_DIR` or `PG_DATA_DIR` is unset both are pointed at unique
//! directories under the target directory for the duration of the bootstrap.
//!
//! Set `SKIP_TEST_CLUSTER=1` where the cluster cannot start; tests then log a
//! skip marker instead of failing.

use std::future::Future;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use contact_directory::domain::ports::UserRepository;
use contact_directory::domain::{User, UserId};
use contact_directory::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use pg_embedded_setup_unpriv::{TemporaryDatabase, TestCluster};
use tokio::runtime::Runtime;
use uuid::Uuid;

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

fn pg_embed_target_dir() -> PathBuf {
    if let Some(target_dir) = std::env::var_os("CARGO_TARGET_DIR") {
        return PathBuf::from(target_dir).join("pg-embed");
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("target")
        .join("pg-embed")
}

fn unique_dirs() -> Result<(PathBuf, PathBuf), std::io::Error> {
    let base = pg_embed_target_dir().join(format!(
        "bootstrap-{}-{}",
        std::process::id(),
        Uuid::new_v4()
    ));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");
    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;
    Ok((runtime_dir, data_dir))
}

/// Binary downloads fail intermittently when suites run in parallel.
fn is_transient(err: &str) -> bool {
    let lower = err.to_lowercase();
    [
        "error decoding response body",
        "connection reset",
        "connection refused",
        "timed out",
        "timeout",
        "temporarily unavailable",
        "dns error",
    ]
    .iter()
    .any(|pattern| lower.contains(pattern))
}

fn test_cluster() -> Result<TestCluster, String> {
    let _bootstrap = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let needs_override =
        std::env::var_os("PG_RUNTIME_DIR").is_none() || std::env::var_os("PG_DATA_DIR").is_none();
    let _env = if needs_override {
        let (runtime_dir, data_dir) = unique_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir.to_string_lossy().into_owned())),
            ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    for attempt in 0..=MAX_RETRIES {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt == MAX_RETRIES || !is_transient(&last_error) {
                    break;
                }
                std::thread::sleep(Duration::from_millis(RETRY_DELAY_MS << attempt));
            }
        }
    }
    Err(last_error)
}

/// Skip when `SKIP_TEST_CLUSTER` is truthy, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    let skip = std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);
    if skip {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// A migrated database plus the runtime used to drive async adapters.
///
/// Fields drop in order so the pool closes before the database and cluster.
pub struct DieselDatabase {
    runtime: Runtime,
    pool: DbPool,
    _database: TemporaryDatabase,
    _cluster: TestCluster,
}

impl DieselDatabase {
    /// Start a cluster, create a uniquely named database and migrate it.
    pub fn open(prefix: &str) -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = test_cluster()?;
        let name = format!("{prefix}_{}", Uuid::new_v4().simple());
        let database = cluster
            .temporary_database(name.as_str())
            .map_err(|err| format!("{err:?}"))?;
        let url = database.url().to_string();

        runtime
            .block_on(run_pending_migrations(&url))
            .map_err(|err| err.to_string())?;
        let pool = runtime
            .block_on(DbPool::new(PoolConfig::new(url).with_max_size(4)))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            runtime,
            pool,
            _database: database,
            _cluster: cluster,
        })
    }

    /// Pool shared by the repositories under test.
    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Drive `future` to completion on the suite runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Store an account that contacts can be attached to.
    pub fn seed_user(&self, username: &str) -> User {
        let user = User::new(UserId::random(), username, username, "hash");
        let users = DieselUserRepository::new(self.pool());
        self.block_on(users.insert(&user)).expect("seed user");
        user
    }
}
