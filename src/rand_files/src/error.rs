use std::path::PathBuf;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The configuration was rejected before any file was touched
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The file could not be created, or a write to it failed
    #[error("I/O error on {}: {}", path.display(), source)]
    Io {
        /// The file being written
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The secure random source could not supply bytes
    #[error("random source failed for {}: {}", path.display(), source)]
    RandomSource {
        /// The file being written
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// One or more files of a run failed
    #[error("{} of {} files failed: {}", failed.len(), total, join_errors(failed))]
    Failed { total: u32, failed: Vec<Error> },
}

impl Error {
    /// The file this error refers to, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Error::Io { path, .. } | Error::RandomSource { path, .. } => Some(path),
            _ => None,
        }
    }
}

fn join_errors(errs: &[Error]) -> String {
    errs.iter()
        .map(|err| err.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
