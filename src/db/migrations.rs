use std::fs;
use std::path::Path;

use anyhow::Context;
use sqlx::postgres::PgPool;
use sqlx::Executor;

/// Run all `.sql` files under `migrations/` in filename order.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    let migrations_dir = "migrations";

    if !Path::new(migrations_dir).exists() {
        anyhow::bail!("migrations directory not found: {migrations_dir}");
    }

    let mut entries: Vec<_> = fs::read_dir(migrations_dir)?
        .filter_map(Result::ok)
        .filter(|e| {
            e.path()
                .extension()
                .map(|ext| ext == "sql")
                .unwrap_or(false)
        })
        .collect();

    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let filename = path.file_name().unwrap_or_default().to_string_lossy().into_owned();

        tracing::info!("running migration: {filename}");

        let sql = fs::read_to_string(&path)?;
        // Executing the raw text goes over the simple query protocol, so a
        // file may hold several statements.
        pool.execute(sql.as_str())
            .await
            .with_context(|| format!("migration {filename} failed"))?;
    }

    Ok(())
}
