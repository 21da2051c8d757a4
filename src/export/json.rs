//! JSON exporter

use crate::config::Config;
use crate::error::{Result, SriError};
use crate::export::Exporter;
use crate::processor::{AssetReport, SriResult};
use serde::Serialize;
use std::io::Write;

/// JSON output exporter
pub struct JsonExporter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    algorithm: &'a str,
    assets: &'a [AssetReport],
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    assets: usize,
    failed: usize,
}

impl Exporter for JsonExporter {
    fn export(&self, result: &SriResult, config: &Config, writer: &mut dyn Write) -> Result<()> {
        let output = JsonOutput {
            algorithm: config.algorithm.as_str(),
            assets: &result.reports,
            summary: JsonSummary {
                assets: result.reports.len(),
                failed: result.failed(),
            },
        };

        let json =
            serde_json::to_string_pretty(&output).map_err(|e| SriError::Other(e.to_string()))?;
        writeln!(writer, "{}", json)?;

        Ok(())
    }
}
