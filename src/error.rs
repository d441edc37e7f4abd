use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GradientError {
    #[error("could not open image {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("could not save image {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no generated image to save")]
    NoResult,
}
