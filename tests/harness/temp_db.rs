use std::path::{Path, PathBuf};

use cryptodip::adapter::outbound::sqlite::{create_pool, run_migrations, DbPool};
use tempfile::TempDir;

/// SQLite database file in a temporary directory, removed on drop.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(&format!("cryptodip-{name}-"))
            .tempdir()
            .expect("create temp dir");
        let path = dir.path().join("cryptodip.db");
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> String {
        self.path.display().to_string()
    }

    /// A fresh pool on the same file, as a restarted process would open.
    pub fn open_pool(&self) -> DbPool {
        let pool = create_pool(&self.url()).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");
        pool
    }
}
