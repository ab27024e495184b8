use std::{
  io,
  path::{Path, PathBuf},
};

/// Work directory of one execution.
///
/// Call [`WorkDir::remove`] when the execution is over. If the handle is dropped
/// instead, e.g. when the execution is cancelled by a timeout, the directory is
/// removed on the blocking pool.
#[derive(Debug)]
pub struct WorkDir {
  path: PathBuf,
  removed: bool,
}

impl WorkDir {
  /// Create a new uniquely named directory under `root`.
  pub async fn create(root: &Path) -> io::Result<Self> {
    let path = root.join(uuid::Uuid::new_v4().to_string());
    tokio::fs::create_dir_all(&path).await?;
    Ok(Self {
      path,
      removed: false,
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Remove the directory and everything in it.
  pub async fn remove(mut self) -> io::Result<()> {
    self.removed = true;
    log::debug!("removing work dir {}", self.path.display());
    tokio::fs::remove_dir_all(&self.path).await
  }
}

fn remove_blocking(path: &Path) {
  if let Err(err) = std::fs::remove_dir_all(path) {
    log::warn!("failed to remove work dir {}: {}", path.display(), err);
  }
}

impl Drop for WorkDir {
  fn drop(&mut self) {
    if self.removed {
      return;
    }
    log::debug!("removing dropped work dir {}", self.path.display());
    let path = self.path.clone();
    match tokio::runtime::Handle::try_current() {
      Ok(handle) => {
        handle.spawn_blocking(move || remove_blocking(&path));
      }
      Err(_) => remove_blocking(&path),
    }
  }
}
