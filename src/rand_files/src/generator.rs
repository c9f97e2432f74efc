use futures::{stream, StreamExt};
use rand::{rngs::OsRng, TryCryptoRng, TryRngCore};
use std::{
    path::PathBuf,
    time::{Duration, Instant},
};
use tokio::io::AsyncWriteExt;

use crate::{config::MAX_CONCURRENCY, Error, GeneratorConfig};

/// Reported after every chunk written to a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Progress {
    pub index: u32,
    pub path: PathBuf,
    /// bytes written by the last chunk
    pub written: usize,
    /// bytes written to the file so far
    pub filled: u64,
    pub total: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    pub index: u32,
    pub path: PathBuf,
    pub size: u64,
    pub elapsed: Duration,
}

/// Per-file outcomes of a run, ordered by file index.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub files: Vec<(u32, Result<GeneratedFile, Error>)>,
}

impl GenerateReport {
    pub fn is_ok(&self) -> bool {
        self.files.iter().all(|(_, res)| res.is_ok())
    }

    pub fn generated(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.files.iter().filter_map(|(_, res)| res.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &Error> {
        self.files.iter().filter_map(|(_, res)| res.as_ref().err())
    }

    /// Returns the generated files, or [`Error::Failed`] carrying every failure.
    pub fn into_result(self) -> Result<Vec<GeneratedFile>, Error> {
        let total = self.files.len() as u32;
        let mut generated = Vec::with_capacity(self.files.len());
        let mut failed = Vec::new();
        for (_, res) in self.files {
            match res {
                Ok(file) => generated.push(file),
                Err(err) => failed.push(err),
            }
        }

        if failed.is_empty() {
            Ok(generated)
        } else {
            Err(Error::Failed { total, failed })
        }
    }
}

/// Writes files of secure random bytes as described by a [`GeneratorConfig`].
///
/// Every file gets its own clone of the random source `R`. The `TryCryptoRng`
/// bound keeps non-cryptographic generators out.
#[derive(Clone, Debug)]
pub struct Generator<R = OsRng> {
    config: GeneratorConfig,
    rng: R,
}

impl Generator<OsRng> {
    /// Creates a generator backed by the operating system's CSPRNG.
    pub fn new(config: GeneratorConfig) -> Result<Self, Error> {
        Self::with_rng(config, OsRng)
    }
}

impl<R> Generator<R>
where
    R: TryCryptoRng + Clone,
    R::Error: std::error::Error + Send + Sync + 'static,
{
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Result<Self, Error> {
        config.validate()?;
        Ok(Generator { config, rng })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn set_chunk_size(&mut self, chunk_size: usize) {
        if chunk_size > 0 {
            self.config.chunk_size = chunk_size;
        }
    }

    pub fn set_concurrency(&mut self, concurrency: u8) {
        if concurrency > 0 && concurrency <= MAX_CONCURRENCY {
            self.config.concurrency = concurrency;
        }
    }

    /// Creates (or truncates) the file for `index` and fills it with exactly
    /// `file_size_bytes` random bytes. The handle is closed when this returns,
    /// on success and on error.
    pub async fn generate_file<F>(&self, index: u32, progress: F) -> Result<GeneratedFile, Error>
    where
        F: Fn(&Progress),
    {
        let start = Instant::now();
        let path = self.config.file_path(index);
        let io_err = |source: std::io::Error| Error::Io {
            path: path.clone(),
            source,
        };

        let mut file = tokio::fs::File::create(&path).await.map_err(io_err)?;
        let mut rng = self.rng.clone();
        let total = self.config.file_size_bytes;
        let buf_len = usize::try_from(total)
            .unwrap_or(usize::MAX)
            .min(self.config.chunk_size);
        let mut buf = vec![0u8; buf_len];

        let mut filled = 0u64;
        while filled < total {
            let n = (total - filled).min(buf_len as u64) as usize;
            let chunk = &mut buf[..n];
            rng.try_fill_bytes(chunk)
                .map_err(|err| Error::RandomSource {
                    path: path.clone(),
                    source: err.into(),
                })?;
            file.write_all(chunk).await.map_err(io_err)?;
            filled += n as u64;
            progress(&Progress {
                index,
                path: path.clone(),
                written: n,
                filled,
                total,
            });
        }

        // tokio buffers the last write in a background task
        file.flush().await.map_err(io_err)?;
        drop(file);

        if total == 0 {
            progress(&Progress {
                index,
                path: path.clone(),
                written: 0,
                filled,
                total,
            });
        }

        Ok(GeneratedFile {
            index,
            path,
            size: filled,
            elapsed: start.elapsed(),
        })
    }

    /// Generates every file in `1..=file_count`, at most `concurrency` at a
    /// time. A failed file does not stop the others.
    pub async fn generate_files<F>(&self, progress: F) -> GenerateReport
    where
        F: Fn(&Progress),
    {
        let progress = &progress;
        let mut files: Vec<(u32, Result<GeneratedFile, Error>)> =
            stream::iter(1..=self.config.file_count)
                .map(|index| async move { (index, self.generate_file(index, progress).await) })
                .buffer_unordered(self.config.concurrency as usize)
                .collect()
                .await;

        files.sort_by_key(|(index, _)| *index);
        GenerateReport { files }
    }
}

/// Generates the files described by `config` from the OS random source.
pub async fn generate_files(config: &GeneratorConfig) -> Result<Vec<GeneratedFile>, Error> {
    let generator = Generator::new(config.clone())?;
    generator
        .generate_files(|_: &Progress| {})
        .await
        .into_result()
}
