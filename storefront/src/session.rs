// storefront/src/session.rs

//! Client-side session identity.
//!
//! A session id is a random UUID minted by the client the first time it needs
//! one and kept in durable client storage under [`SESSION_KEY`]. The server
//! never issues or checks these ids; any client may present any id.

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// Storage key shared with the browser page's `localStorage` entry.
pub const SESSION_KEY: &str = "cart_session_id";

#[derive(Debug, Error)]
pub enum SessionError {
  #[error("Session storage I/O error at {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Session storage at {path} is not valid JSON: {source}")]
  Format {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

/// String key/value storage that outlives the process, in the manner of `localStorage`.
pub trait SessionStorage: Send + Sync {
  fn get_item(&self, key: &str) -> Result<Option<String>, SessionError>;
  fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError>;
}

/// Returns this client's session id, creating and persisting one on first use.
///
/// With no storage available there is no session: the result is an empty
/// string and callers should skip any cart requests.
pub fn get_session_id(storage: Option<&dyn SessionStorage>) -> Result<String, SessionError> {
  let Some(storage) = storage else {
    debug!("No session storage available; running without a session.");
    return Ok(String::new());
  };

  if let Some(existing) = storage.get_item(SESSION_KEY)?.filter(|id| !id.is_empty()) {
    return Ok(existing);
  }

  let session_id = Uuid::new_v4().to_string();
  storage.set_item(SESSION_KEY, &session_id)?;
  info!(%session_id, "Created new cart session.");
  Ok(session_id)
}

/// Keeps items in a small JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
  path: PathBuf,
}

impl FileSessionStorage {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn io_err(&self, source: io::Error) -> SessionError {
    SessionError::Io {
      path: self.path.clone(),
      source,
    }
  }

  fn read_all(&self) -> Result<BTreeMap<String, String>, SessionError> {
    let raw = match fs::read_to_string(&self.path) {
      Ok(raw) => raw,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
      Err(e) => return Err(self.io_err(e)),
    };
    if raw.trim().is_empty() {
      return Ok(BTreeMap::new());
    }
    serde_json::from_str(&raw).map_err(|source| SessionError::Format {
      path: self.path.clone(),
      source,
    })
  }
}

impl SessionStorage for FileSessionStorage {
  fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
    Ok(self.read_all()?.remove(key))
  }

  fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
    let mut items = self.read_all()?;
    items.insert(key.to_string(), value.to_string());

    if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
    }
    let body = serde_json::to_string_pretty(&items).map_err(|source| SessionError::Format {
      path: self.path.clone(),
      source,
    })?;
    fs::write(&self.path, body).map_err(|e| self.io_err(e))
  }
}

/// Storage scoped to this value's lifetime.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
  items: Mutex<HashMap<String, String>>,
}

impl MemorySessionStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

impl SessionStorage for MemorySessionStorage {
  fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
    Ok(self.items.lock().get(key).cloned())
  }

  fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
    self.items.lock().insert(key.to_string(), value.to_string());
    Ok(())
  }
}
