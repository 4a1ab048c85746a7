/*!
 * Database connection management.
 *
 * This module handles SQLite database connection creation, initialization,
 * and provides async-safe access patterns using tokio's spawn_blocking.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::models::DifficultyCount;
use super::schema;

/// Default database filename
const DEFAULT_DB_FILENAME: &str = "questions.db";

/// Default database directory name under user's data directory
const DEFAULT_DB_DIRNAME: &str = "quizbank";

/// Database connection wrapper with thread-safe access
#[derive(Clone)]
pub struct DatabaseConnection {
    /// Path to the database file
    db_path: PathBuf,
    /// Shared connection, one query at a time
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseConnection {
    /// Create a new database connection at the default location
    pub fn new_default() -> Result<Self> {
        let db_path = Self::default_database_path()?;
        Self::new(&db_path)
    }

    /// Open the question bank at the specified path
    ///
    /// An existing bank is opened read-only and never modified. A missing or
    /// empty file gets the schema created in it.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
            }
        }

        info!("Opening database at: {:?}", db_path);

        let conn = match Self::open_existing_bank(&db_path)? {
            Some(conn) => conn,
            None => {
                let conn = Connection::open(&db_path)
                    .with_context(|| format!("Failed to open database: {:?}", db_path))?;
                schema::initialize_schema(&conn)?;
                conn
            }
        };

        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Read-only connection to the bank at `db_path`, if the file holds one
    fn open_existing_bank(db_path: &Path) -> Result<Option<Connection>> {
        if !db_path.is_file() {
            return Ok(None);
        }

        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
                | OpenFlags::SQLITE_OPEN_URI,
        )
        .with_context(|| format!("Failed to open database read-only: {:?}", db_path))?;

        if !schema::bank_exists(&conn)? {
            return Ok(None);
        }

        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        debug!("Using existing question bank read-only");
        Ok(Some(conn))
    }

    /// Create an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        debug!("Creating in-memory database");

        let conn =
            Connection::open_in_memory().context("Failed to create in-memory database")?;

        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path: PathBuf::from(":memory:"),
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// Get the default database path
    pub fn default_database_path() -> Result<PathBuf> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;

        Ok(base_dir.join(DEFAULT_DB_DIRNAME).join(DEFAULT_DB_FILENAME))
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Execute a database operation with the connection
    ///
    /// This method acquires the mutex lock and executes the provided closure
    /// with access to the connection. For async contexts, use `execute_async`.
    pub fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.connection.lock();
        f(&conn)
    }

    /// Execute a database operation asynchronously using spawn_blocking
    ///
    /// This is the preferred method for async contexts as it prevents
    /// blocking the async runtime.
    pub async fn execute_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.connection.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock();
            f(&conn)
        })
        .await
        .context("Database task panicked")?
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DatabaseStats> {
        self.execute(|conn| {
            let question_count: i64 =
                conn.query_row("SELECT COUNT(*) FROM Question", [], |row| row.get(0))?;

            let option_count: i64 =
                conn.query_row("SELECT COUNT(*) FROM Option", [], |row| row.get(0))?;

            let answer_count: i64 =
                conn.query_row("SELECT COUNT(*) FROM Answer", [], |row| row.get(0))?;

            let mut stmt = conn.prepare(
                "SELECT Difficulty, COUNT(*) FROM Question GROUP BY Difficulty ORDER BY Difficulty",
            )?;
            let by_difficulty = stmt
                .query_map([], |row| {
                    Ok(DifficultyCount {
                        difficulty: row.get(0)?,
                        questions: row.get(1)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let file_size = if self.db_path.to_string_lossy() != ":memory:" {
                std::fs::metadata(&self.db_path)
                    .map(|m| m.len())
                    .unwrap_or(0)
            } else {
                0
            };

            Ok(DatabaseStats {
                question_count,
                option_count,
                answer_count,
                by_difficulty,
                file_size_bytes: file_size,
            })
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct DatabaseStats {
    /// Number of questions
    pub question_count: i64,
    /// Number of answer options
    pub option_count: i64,
    /// Number of recorded correct answers
    pub answer_count: i64,
    /// Question count per stored difficulty value
    pub by_difficulty: Vec<DifficultyCount>,
    /// Database file size in bytes
    pub file_size_bytes: u64,
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Questions: {}, Options: {}, Answers: {}, Size: {} KB",
            self.question_count,
            self.option_count,
            self.answer_count,
            self.file_size_bytes / 1024
        )?;
        for count in &self.by_difficulty {
            write!(f, ", {}: {}", count.difficulty, count.questions)?;
        }
        Ok(())
    }
}
