//! Image loading with a missing-vs-unreadable distinction.
//!
//! A missing artifact is a first-class, expected outcome for every panel on
//! the dashboard and is reported as `Ok(None)`, never as an error. Anything
//! else that stops an image from being displayed is an error the caller must
//! surface: unreadable bytes as [`LoadError::Decode`], permission and other
//! filesystem failures as [`LoadError::Io`].
//!
//! There is no caching. Callers probe at the moment of use, so the same path
//! may be found on one render and missing on the next if the filesystem
//! changed in between.

use image::DynamicImage;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unreadable image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Dimensions of a successfully probed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    pub width: u32,
    pub height: u32,
}

/// Read just enough of `path` to know it is a displayable image.
///
/// Decodes the header only; a file whose body is truncated can still probe
/// successfully. Use [`load`] for full validation.
pub fn probe(path: &Path) -> Result<Option<Probe>, LoadError> {
    match image::image_dimensions(path) {
        Ok((width, height)) => Ok(Some(Probe { width, height })),
        Err(err) => absent_or_error(path, err),
    }
}

/// Fully decode the image at `path`.
pub fn load(path: &Path) -> Result<Option<DynamicImage>, LoadError> {
    match image::open(path) {
        Ok(img) => Ok(Some(img)),
        Err(err) => absent_or_error(path, err),
    }
}

/// Map a decode failure into the loader taxonomy: a nonexistent file is
/// `Ok(None)`, everything else is an error.
fn absent_or_error<T>(path: &Path, err: image::ImageError) -> Result<Option<T>, LoadError> {
    match err {
        image::ImageError::IoError(io_err) => {
            if io_err.kind() == io::ErrorKind::NotFound {
                Ok(None)
            } else {
                Err(LoadError::Io {
                    path: path.to_path_buf(),
                    source: io_err,
                })
            }
        }
        other => Err(LoadError::Decode {
            path: path.to_path_buf(),
            source: other,
        }),
    }
}
