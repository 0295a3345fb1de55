use rusqlite::{params, Connection};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct DbInit {
    pub path: PathBuf,
    pub connection: Connection,
}

/// File name used when no destination path is given on the command line.
pub const DB_FILE_NAME: &str = "demodb.db";

const USERS: &[(&str, &str)] = &[
    ("Alice", "alice@example.com"),
    ("Bob", "bob@example.com"),
    ("Charlie", "charlie@example.com"),
];

const POSTS: &[(i64, &str, &str, bool)] = &[
    (1, "Getting Started with SQL", "A beginner guide", true),
    (1, "Advanced Queries", "Deep dive into joins", true),
    (2, "Database Design", "Best practices for schemas", false),
];

const TAGS: &[(&str, &str)] = &[
    ("sql", "#3B82F6"),
    ("tutorial", "#10B981"),
    ("database", "#F59E0B"),
];

#[must_use]
pub fn default_db_path() -> PathBuf {
    env::temp_dir().join(DB_FILE_NAME)
}

/// Create a freshly seeded demo database, replacing whatever file is at
/// the destination.
///
/// Resolves `path` (falling back to [`default_db_path`]), removes any
/// pre-existing file there, then opens and seeds a new database. The
/// parent directory is never created; a missing one fails the run.
///
/// # Errors
/// Returns `DbError` if the old file cannot be removed or the new
/// database cannot be opened or seeded.
pub fn init_db(path: Option<PathBuf>) -> Result<DbInit, DbError> {
    let path = path.unwrap_or_else(default_db_path);
    remove_stale_db(&path)?;

    let mut connection = Connection::open(&path)?;
    seed_database(&mut connection)?;

    Ok(DbInit { path, connection })
}

fn remove_stale_db(path: &Path) -> Result<(), DbError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        // A first run has nothing to replace.
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Apply the demo schema and seed rows in a single transaction.
///
/// # Errors
/// Returns `DbError` if schema creation or inserts fail.
pub fn seed_database(conn: &mut Connection) -> Result<(), DbError> {
    let tx = conn.transaction()?;

    create_schema(&tx)?;
    insert_users(&tx)?;
    insert_posts(&tx)?;
    insert_tags(&tx)?;

    tx.commit()?;
    Ok(())
}

fn create_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(
        "
        CREATE TABLE users (
          id         INTEGER PRIMARY KEY,
          name       TEXT NOT NULL,
          email      TEXT UNIQUE,
          created_at TEXT DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE posts (
          id        INTEGER PRIMARY KEY,
          user_id   INTEGER REFERENCES users(id),
          title     TEXT NOT NULL,
          body      TEXT,
          published BOOLEAN DEFAULT 0
        );

        CREATE TABLE tags (
          id    INTEGER PRIMARY KEY,
          name  TEXT NOT NULL UNIQUE,
          color TEXT
        );
        ",
    )?;

    Ok(())
}

fn insert_users(conn: &Connection) -> Result<(), DbError> {
    let mut stmt = conn.prepare("INSERT INTO users (name, email) VALUES (?, ?)")?;
    for (name, email) in USERS {
        stmt.execute(params![name, email])?;
    }
    Ok(())
}

fn insert_posts(conn: &Connection) -> Result<(), DbError> {
    let mut stmt =
        conn.prepare("INSERT INTO posts (user_id, title, body, published) VALUES (?, ?, ?, ?)")?;
    for (user_id, title, body, published) in POSTS {
        stmt.execute(params![user_id, title, body, published])?;
    }
    Ok(())
}

fn insert_tags(conn: &Connection) -> Result<(), DbError> {
    let mut stmt = conn.prepare("INSERT INTO tags (name, color) VALUES (?, ?)")?;
    for (name, color) in TAGS {
        stmt.execute(params![name, color])?;
    }
    Ok(())
}

pub struct SeedSummary {
    pub users: i64,
    pub posts: i64,
    pub tags: i64,
}

/// Row counts per table, for logging after a successful seed.
///
/// # Errors
/// Returns `DbError` if a count query fails.
pub fn summarize(conn: &Connection) -> Result<SeedSummary, DbError> {
    let users: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    let posts: i64 = conn.query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))?;
    let tags: i64 = conn.query_row("SELECT COUNT(*) FROM tags", [], |row| row.get(0))?;

    Ok(SeedSummary { users, posts, tags })
}
