use super::ExportResult;
use crate::evm::EvmMetrics;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// UTF-8 byte order mark; spreadsheet tools use it to detect the encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One task's row in an EVM report. Floats are written exactly as the
/// engine rounded them; no locale-specific formatting happens here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvmReportRow {
    pub task: String,
    pub pv: f64,
    pub ev: f64,
    pub ac: f64,
    pub sv: f64,
    pub cv: f64,
    pub spi: f64,
    pub cpi: f64,
    pub bac: f64,
    pub etc: f64,
    pub eac: f64,
    pub vac: f64,
}

impl EvmReportRow {
    pub fn new(task: impl Into<String>, metrics: EvmMetrics) -> Self {
        Self {
            task: task.into(),
            pv: metrics.pv,
            ev: metrics.ev,
            ac: metrics.ac,
            sv: metrics.sv,
            cv: metrics.cv,
            spi: metrics.spi,
            cpi: metrics.cpi,
            bac: metrics.bac,
            etc: metrics.etc,
            eac: metrics.eac,
            vac: metrics.vac,
        }
    }

    pub fn metrics(&self) -> EvmMetrics {
        EvmMetrics {
            pv: self.pv,
            ev: self.ev,
            ac: self.ac,
            sv: self.sv,
            cv: self.cv,
            spi: self.spi,
            cpi: self.cpi,
            bac: self.bac,
            etc: self.etc,
            eac: self.eac,
            vac: self.vac,
        }
    }
}

pub fn save_report_to_csv<P: AsRef<Path>>(rows: &[EvmReportRow], path: P) -> ExportResult<()> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;
    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    debug!(rows = rows.len(), "wrote EVM report csv");
    Ok(())
}

pub fn load_report_from_csv<P: AsRef<Path>>(path: P) -> ExportResult<Vec<EvmReportRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

pub fn save_report_to_json<P: AsRef<Path>>(rows: &[EvmReportRow], path: P) -> ExportResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, rows)?;
    debug!(rows = rows.len(), "wrote EVM report json");
    Ok(())
}

pub fn load_report_from_json<P: AsRef<Path>>(path: P) -> ExportResult<Vec<EvmReportRow>> {
    let file = File::open(path)?;
    let rows = serde_json::from_reader(file)?;
    Ok(rows)
}
