use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use std::path::Path;

fn build_sqlite_url(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    format!("sqlite://{}{}?mode=rwc", prefix, normalized)
}

/// Tables in dependency order. Foreign keys mirror the PROTECT semantics of
/// the API: referenced suppliers and categories cannot be removed.
const SCHEMA: [(&str, &str); 3] = [
    (
        "a001_category",
        r#"
        CREATE TABLE a001_category (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE
        );
        "#,
    ),
    (
        "a002_supplier",
        r#"
        CREATE TABLE a002_supplier (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            phone TEXT NOT NULL,
            email TEXT NOT NULL,
            address TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    ),
    (
        "a003_product",
        r#"
        CREATE TABLE a003_product (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0,
            unit_price REAL NOT NULL,
            supplier_id INTEGER NOT NULL REFERENCES a002_supplier(id) ON DELETE RESTRICT,
            category_id INTEGER NOT NULL REFERENCES a001_category(id) ON DELETE RESTRICT,
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT
        );
        "#,
    ),
];

const INDEXES: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS idx_a003_product_active ON a003_product (active);",
    "CREATE INDEX IF NOT EXISTS idx_a003_product_category ON a003_product (category_id);",
];

async fn has_table(conn: &DatabaseConnection, table_name: &str) -> anyhow::Result<bool> {
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?",
            [table_name.into()],
        ))
        .await?;
    Ok(!rows.is_empty())
}

/// Creates whatever tables are missing. Safe to run on every start.
pub async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (table, ddl) in SCHEMA {
        if has_table(conn, table).await? {
            continue;
        }
        tracing::info!("Creating table {}", table);
        conn.execute_unprepared(ddl).await?;
    }
    for ddl in INDEXES {
        conn.execute_unprepared(ddl).await?;
    }
    Ok(())
}

pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(url.to_string());
    options.max_connections(max_connections).sqlx_logging(false);
    let conn = Database::connect(options).await?;
    conn.execute_unprepared("PRAGMA foreign_keys = ON;").await?;
    Ok(conn)
}

/// Opens (creating if needed) the database file and its schema.
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    let db_url = build_sqlite_url(&absolute_path);
    tracing::info!("Opening database {}", db_url);

    // One connection keeps SQLite writes serialized.
    let conn = connect(&db_url, 1).await?;
    bootstrap_schema(&conn).await?;
    Ok(conn)
}

/// Fresh in-memory database with the full schema.
#[cfg(test)]
pub async fn memory() -> DatabaseConnection {
    let conn = connect("sqlite::memory:", 1).await.unwrap();
    bootstrap_schema(&conn).await.unwrap();
    conn
}
