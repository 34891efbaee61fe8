use anyhow::Result;
use rusqlite::{Connection, OptionalExtension};

/// Key of the "tree view is visible" preference.
pub const TREE_VIEW_ENABLED: &str = "treeview.enabled";

// ── Database ─────────────────────────────────────────────────────────

/// Initialize the preferences table if it doesn't exist.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS preferences (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TRIGGER IF NOT EXISTS preferences_updated_at
        AFTER UPDATE ON preferences
        BEGIN
            UPDATE preferences SET updated_at = CURRENT_TIMESTAMP WHERE key = NEW.key;
        END;",
    )?;
    Ok(())
}

// ── Accessors ────────────────────────────────────────────────────────

/// Read a boolean preference. A missing key reads as `false`.
pub fn get_bool(conn: &Connection, key: &str) -> Result<bool> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM preferences WHERE key = ?1",
            rusqlite::params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value.as_deref() == Some("true"))
}

/// Write a boolean preference, inserting or replacing the value.
pub fn set_bool(conn: &Connection, key: &str, value: bool) -> Result<()> {
    let text = if value { "true" } else { "false" };
    conn.execute(
        "INSERT INTO preferences (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        rusqlite::params![key, text],
    )?;
    Ok(())
}

pub fn is_tree_view_enabled(conn: &Connection) -> Result<bool> {
    get_bool(conn, TREE_VIEW_ENABLED)
}

pub fn set_tree_view_enabled(conn: &Connection, enabled: bool) -> Result<()> {
    set_bool(conn, TREE_VIEW_ENABLED, enabled)
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_db;

    fn setup_db() -> Connection {
        let conn = open_memory_db().unwrap();
        init_db(&conn).unwrap();
        conn
    }

    #[test]
    fn test_missing_key_is_false() {
        let conn = setup_db();
        assert!(!is_tree_view_enabled(&conn).unwrap());
    }

    #[test]
    fn test_set_and_get() {
        let conn = setup_db();
        set_tree_view_enabled(&conn, true).unwrap();
        assert!(is_tree_view_enabled(&conn).unwrap());

        set_tree_view_enabled(&conn, false).unwrap();
        assert!(!is_tree_view_enabled(&conn).unwrap());

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM preferences", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_keys_are_independent() {
        let conn = setup_db();
        set_bool(&conn, "other", true).unwrap();
        assert!(get_bool(&conn, "other").unwrap());
        assert!(!is_tree_view_enabled(&conn).unwrap());
    }

    #[test]
    fn test_init_is_idempotent() {
        let conn = setup_db();
        set_tree_view_enabled(&conn, true).unwrap();
        init_db(&conn).unwrap();
        assert!(is_tree_view_enabled(&conn).unwrap());
    }
}
