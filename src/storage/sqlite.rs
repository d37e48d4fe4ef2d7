//! SQLite store handle

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, LoadExtensionGuard};
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::{LogseqError, Result};
use crate::storage::schema::{self, Tokenizer};

/// How to open the store. Replaces a process-wide driver registration:
/// every handle carries its own extension settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub path: PathBuf,
    pub extension_path: PathBuf,
    pub load_extension: bool,
    pub tokenizer: Tokenizer,
}

impl StoreOptions {
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            path: config.path.clone(),
            extension_path: config.extension_path.clone(),
            load_extension: config.needs_extension(),
            tokenizer: config.effective_tokenizer(),
        }
    }

    /// Options for a plain store at `path` using built-in tokenizers only.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self::from_config(&StoreConfig {
            path: path.into(),
            load_extension: false,
            ..StoreConfig::default()
        })
    }
}

/// Owned connection to the page store.
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Store {
    /// Destroy any existing store at the configured path and create an
    /// empty schema in its place.
    pub fn reset(options: &StoreOptions) -> Result<Self> {
        // Fail before deleting anything if the tokenizer library is missing.
        if options.load_extension {
            load_extension(&Connection::open_in_memory()?, &options.extension_path)?;
        }
        remove_store_files(&options.path)?;

        if let Some(parent) = options.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Self::connect(options)?;
        schema::create(&conn, options.tokenizer)?;
        info!(
            path = %options.path.display(),
            tokenizer = %options.tokenizer,
            "created empty store"
        );

        Ok(Self {
            conn,
            path: Some(options.path.clone()),
        })
    }

    /// Open a store previously created by [`Store::reset`].
    pub fn open(options: &StoreOptions) -> Result<Self> {
        if !options.path.is_file() {
            return Err(LogseqError::StoreNotBuilt(options.path.clone()));
        }

        let conn = Self::connect(options)?;
        let version = schema::version(&conn)?;
        if version != schema::SCHEMA_VERSION {
            debug!(
                found = version,
                expected = schema::SCHEMA_VERSION,
                "store schema version mismatch"
            );
            return Err(LogseqError::StoreNotBuilt(options.path.clone()));
        }

        Ok(Self {
            conn,
            path: Some(options.path.clone()),
        })
    }

    /// In-memory store with a fresh schema.
    pub fn in_memory(tokenizer: Tokenizer) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::configure_pragmas(&conn)?;
        schema::create(&conn, tokenizer)?;
        Ok(Self { conn, path: None })
    }

    /// Get a reference to the connection
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    pub(crate) const fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Backing file, `None` for in-memory stores.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn connect(options: &StoreOptions) -> Result<Connection> {
        let conn = Connection::open(&options.path)?;
        Self::configure_pragmas(&conn)?;
        if options.load_extension {
            load_extension(&conn, &options.extension_path)?;
        }
        Ok(conn)
    }

    fn configure_pragmas(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA temp_store = MEMORY;
             PRAGMA foreign_keys = ON;",
        )?;
        Ok(())
    }
}

#[allow(unsafe_code)]
fn load_extension(conn: &Connection, path: &Path) -> Result<()> {
    debug!(extension = %path.display(), "loading sqlite extension");
    // SAFETY: extension loading stays enabled only while the guard lives, and
    // the library path comes from local configuration, not from page data.
    let loaded = unsafe {
        LoadExtensionGuard::new(conn).and_then(|_guard| conn.load_extension(path, None::<&str>))
    };
    loaded.map_err(|err| {
        LogseqError::Config(format!("load sqlite extension {}: {err}", path.display()))
    })
}

fn remove_store_files(path: &Path) -> Result<()> {
    for suffix in ["", "-wal", "-shm", "-journal"] {
        let mut candidate = OsString::from(path.as_os_str());
        candidate.push(suffix);
        let candidate = PathBuf::from(candidate);
        match std::fs::remove_file(&candidate) {
            Ok(()) => debug!(path = %candidate.display(), "removed previous store file"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
