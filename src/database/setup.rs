use anyhow::{Context, Result};

use super::connection::DbConn;

/// Drop and recreate every table. All league data is lost.
pub fn reset_schema(conn: &mut DbConn) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    let tx = conn.transaction().context("Failed to open schema transaction")?;
    for (idx, statement) in statements.iter().enumerate() {
        tx.execute(statement, [])
            .with_context(|| format!("Failed to execute schema statement {}", idx + 1))?;
    }
    tx.commit().context("Failed to commit schema")?;

    log::info!("Database schema reset ({} statements)", statements.len());
    Ok(())
}

pub fn has_schema(conn: &mut DbConn) -> Result<bool> {
    let sql = "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'leagues'";
    let count: i64 = conn
        .query_row(sql, [], |row| row.get(0))
        .context("Failed to inspect database schema")?;
    Ok(count > 0)
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
