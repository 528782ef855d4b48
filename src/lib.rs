pub mod calendar;
pub mod evm;
pub mod export;
pub mod progress;
pub mod sanitize;

pub use calendar::BusinessCalendar;
pub use evm::{EvmEngine, EvmInput, EvmMetrics};
pub use export::{
    EvmReportRow, ExportError, ExportResult, XmlElement, load_report_from_csv,
    load_report_from_json, parse_xml, pretty_xml, save_report_to_csv, save_report_to_json,
    save_xml, xml_to_csv,
};
pub use progress::ProgressReporter;
pub use sanitize::{
    PATH_RULES, REDMINE_RULES, SanitizeOptions, SanitizeRules, TEAMS_RULES, TrailingRule, sanitize,
};
