use anyhow::{Context, Result};
use directories::ProjectDirs;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Returns the treeview project directories (XDG-compliant on Linux).
pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "treeview").context("Could not determine data directory")
}

/// Returns the default data directory, creating it if needed.
/// Location: `~/.local/share/treeview`
pub fn data_dir() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

/// Path of the preferences database inside a data directory.
pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("treeview.db")
}

/// Opens (or creates) the SQLite database inside `data_dir`.
/// Enables WAL mode for better concurrent read performance.
pub fn open_db(data_dir: &Path) -> Result<Connection> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    let path = db_path(data_dir);
    let conn = Connection::open(&path)
        .with_context(|| format!("Failed to open database at {}", path.display()))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;

    Ok(conn)
}

/// Open an in-memory database for testing.
pub fn open_memory_db() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    Ok(conn)
}
