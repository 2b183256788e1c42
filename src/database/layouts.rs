use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::domain::{Course, Layout, LayoutId};

pub fn insert_course(conn: &mut DbConn, course: &Course) -> Result<()> {
    conn.execute(
        "INSERT INTO courses (id, name) VALUES (?1, ?2)",
        params![course.id, course.name],
    )
    .with_context(|| format!("Failed to insert course {}", course.id))?;

    for layout in &course.layouts {
        insert_layout(conn, course.id, layout)?;
    }
    Ok(())
}

fn insert_layout(conn: &mut DbConn, course_id: i64, layout: &Layout) -> Result<()> {
    conn.execute(
        "INSERT INTO layouts (id, course_id, name) VALUES (?1, ?2, ?3)",
        params![layout.id, course_id, layout.name],
    )
    .with_context(|| format!("Failed to insert layout {}", layout.id))?;

    let sql = "INSERT INTO holes (layout_id, number, par, length, notes) VALUES (?1, ?2, ?3, ?4, ?5)";
    for hole in &layout.holes {
        conn.execute(
            sql,
            params![layout.id, hole.number, hole.par, hole.length, hole.notes],
        )
        .with_context(|| format!("Failed to insert hole {} of layout {}", hole.number, layout.id))?;
    }
    Ok(())
}

/// Sum of hole pars; None when the layout does not exist
pub fn par(conn: &mut DbConn, layout_id: LayoutId) -> Result<Option<i32>> {
    let sql = "
        SELECT COALESCE(SUM(h.par), 0)
        FROM layouts l
        LEFT JOIN holes h ON h.layout_id = l.id
        WHERE l.id = ?1
        GROUP BY l.id
    ";

    conn.query_row(sql, params![layout_id], |row| row.get(0))
        .optional()
        .context("Failed to compute layout par")
}
