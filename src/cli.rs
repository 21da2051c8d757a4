//! CLI argument parsing using clap

use crate::algorithm::Algorithm;
use crate::config::{Config, OutputFormat};
use crate::error::{Result, SriError};
use clap::Parser;
use std::path::PathBuf;

/// Subresource Integrity for static assets
#[derive(Parser, Debug)]
#[command(name = "sri-static")]
#[command(version)]
#[command(about = "Compute Subresource Integrity digests for static assets", long_about = None)]
pub struct Cli {
    /// Logical static asset names (e.g. js/app.js)
    #[arg(value_name = "ASSET", required = true)]
    pub assets: Vec<String>,

    /// Static root directory (repeatable, searched in order)
    #[arg(short = 's', long = "static-dir", value_name = "DIR", required = true)]
    pub static_dirs: Vec<PathBuf>,

    /// Digest algorithm: sha256, sha384 or sha512
    #[arg(
        short = 'a',
        long = "algorithm",
        value_name = "ALG",
        env = "SRI_ALGORITHM",
        default_value = "sha256"
    )]
    pub algorithm: String,

    /// Public URL prefix used in tags
    #[arg(
        long = "static-url",
        value_name = "URL",
        env = "STATIC_URL",
        default_value = "/static/"
    )]
    pub static_url: String,

    /// Directory for the persistent digest cache
    #[arg(long = "cache-dir", value_name = "DIR", env = "SRI_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Clear the digest cache before hashing
    #[arg(long = "clear-cache")]
    pub clear_cache: bool,

    /// Print <script>/<link> tags instead of integrity values
    #[arg(long = "tags")]
    pub tags: bool,

    /// Omit integrity attributes from tags
    #[arg(long = "no-sri")]
    pub no_sri: bool,

    /// Output file for results (use "-" for stdout)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT", default_value = "-")]
    pub output: String,

    /// Output in JSON format
    #[arg(long = "json")]
    pub json: bool,

    /// Number of threads for parallel hashing
    #[arg(short = 'j', long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Parse command line arguments into a Config
    pub fn into_config(self) -> Result<Config> {
        let algorithm = Algorithm::parse(&self.algorithm)?;

        if self.no_sri && !self.tags {
            return Err(SriError::InvalidConfig(
                "--no-sri only applies together with --tags".to_string(),
            ));
        }

        let output_format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Console
        };

        let config = Config {
            algorithm,
            use_sri: !self.no_sri,
            static_dirs: self.static_dirs,
            static_url: self.static_url,
            cache_dir: self.cache_dir,
            clear_cache: self.clear_cache,
            emit_tags: self.tags,
            output_format,
            output_filename: self.output,
            num_threads: self.threads.unwrap_or_else(num_cpus::get),
            ..Config::default()
        };
        config.validate()?;
        Ok(config)
    }
}
