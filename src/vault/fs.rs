//! Filesystem capability used by `VaultStore`.
//!
//! The store never touches `std::fs` directly; it goes through a
//! `VaultFs` so tests can run against `MemoryFs` and so the
//! replace-whole-file discipline lives in one place.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Read and atomically replace a single file.
pub trait VaultFs {
    /// Read the whole file, or `None` if it does not exist.
    fn read(&self, path: &Path) -> io::Result<Option<Vec<u8>>>;

    /// Replace the file's contents with `bytes`.
    ///
    /// Implementations must never leave a partially written file behind:
    /// after a failure the previous contents (or absence) are intact.
    fn replace(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

impl<T: VaultFs + ?Sized> VaultFs for &T {
    fn read(&self, path: &Path) -> io::Result<Option<Vec<u8>>> {
        (**self).read(path)
    }

    fn replace(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        (**self).replace(path, bytes)
    }
}

// ---------------------------------------------------------------------------
// OsFs
// ---------------------------------------------------------------------------

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl VaultFs for OsFs {
    fn read(&self, path: &Path) -> io::Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write to a temp file in the same directory, fsync, rename, then
    /// fsync the directory.
    ///
    /// The temp file shares the target's directory so the rename stays
    /// on one filesystem and is atomic.
    fn replace(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let tmp_path = temp_path_for(path);
        let result = write_synced(&tmp_path, bytes).and_then(|()| fs::rename(&tmp_path, path));

        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result?;

        sync_dir(parent)
    }
}

/// Flush the directory entry so the rename survives a crash.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

/// `.<file_name>.tmp` next to `path`.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!(".{name}.tmp"))
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    // Envelopes are useless without the passphrase, but there is still
    // no reason for anyone else to read them.
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

// ---------------------------------------------------------------------------
// MemoryFs
// ---------------------------------------------------------------------------

/// In-memory filesystem for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    fail_writes: Cell<bool>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file with raw contents.
    pub fn insert(&self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.borrow_mut().insert(path.into(), bytes.into());
    }

    /// Current contents of a file, if any.
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    /// Make every subsequent `replace` fail (simulates a full disk).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl VaultFs for MemoryFs {
    fn read(&self, path: &Path) -> io::Result<Option<Vec<u8>>> {
        Ok(self.contents(path))
    }

    fn replace(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if self.fail_writes.get() {
            return Err(io::Error::other("simulated write failure"));
        }
        self.insert(path, bytes);
        Ok(())
    }
}
