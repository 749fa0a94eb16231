use std::path::{Path, PathBuf};

/// Guard around a temporary audio file created for one request.
///
/// The file is removed when the guard is dropped, so deletion happens on
/// every exit path of the owning scope, including error propagation.
#[derive(Debug)]
pub struct TempAudioFile {
    path: PathBuf,
}

impl TempAudioFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempAudioFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove temporary audio file");
            }
        } else {
            tracing::trace!(path = %self.path.display(), "Removed temporary audio file");
        }
    }
}
