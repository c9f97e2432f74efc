#![doc(html_root_url = "https://docs.rs/rand-files/latest")]
//! Generates files filled with cryptographically secure random bytes.
//!
//! With the default [`GeneratorConfig`] a run creates `file1.txt`,
//! `file2.txt` and `file3.txt` in the working directory, each holding exactly
//! 100 MiB drawn from the operating system's CSPRNG.
//!
//! ```no_run
//! # async fn run() -> Result<(), rand_files::Error> {
//! let files = rand_files::generate_files(&Default::default()).await?;
//! assert_eq!(files.len(), 3);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generator;

pub use config::*;
pub use error::*;
pub use generator::*;

pub fn format_error<T>(err: T) -> String
where
    T: std::fmt::Display,
{
    err.to_string()
}
