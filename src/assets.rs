//! Resolution of bundled image files.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Logo shown on the startup view.
pub const LOGO_IMAGE: &str = "Cyber-Smoke077.png";

/// Maps bundled image names to paths under an assets directory.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    dir: PathBuf,
}

impl AssetResolver {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Default assets directory.
    ///
    /// Returns ~/.local/share/anime-earth/images on Linux,
    /// or a platform-appropriate location on other systems.
    pub fn default_dir() -> Result<PathBuf, io::Error> {
        let data_dir = dirs::data_local_dir().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not find data directory")
        })?;
        Ok(data_dir.join("anime-earth").join("images"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute path of `name` inside the assets directory.
    ///
    /// The file is not required to exist; callers fall back to a placeholder
    /// when it does not.
    pub fn resolve_image(&self, name: &str) -> PathBuf {
        let path = self.dir.join(name);
        if path.is_absolute() {
            return path;
        }
        match env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path,
        }
    }

    pub fn image_exists(&self, name: &str) -> bool {
        self.resolve_image(name).is_file()
    }
}
