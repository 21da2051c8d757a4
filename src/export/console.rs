//! Console (line-per-asset) exporter

use crate::config::Config;
use crate::error::Result;
use crate::export::Exporter;
use crate::processor::SriResult;
use std::io::Write;

/// Writes `<integrity>  <name>` per asset, or the rendered tag in tag mode.
/// Failed assets produce no line.
pub struct ConsoleExporter;

impl Exporter for ConsoleExporter {
    fn export(&self, result: &SriResult, config: &Config, writer: &mut dyn Write) -> Result<()> {
        for report in result.reports.iter().filter(|r| !r.is_failure()) {
            if config.emit_tags {
                if let Some(tag) = &report.tag {
                    writeln!(writer, "{}", tag)?;
                }
            } else if let Some(integrity) = &report.integrity {
                writeln!(writer, "{}  {}", integrity, report.name)?;
            }
        }
        Ok(())
    }
}
