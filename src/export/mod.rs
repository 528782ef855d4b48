use quick_xml::Error as XmlError;
use quick_xml::events::attributes::AttrError;
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ExportError {
    Serialization(SerdeJsonError),
    Csv(csv::Error),
    Io(io::Error),
    Xml(XmlError),
    InvalidData(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Serialization(err) => write!(f, "serialization error: {err}"),
            ExportError::Csv(err) => write!(f, "csv error: {err}"),
            ExportError::Io(err) => write!(f, "io error: {err}"),
            ExportError::Xml(err) => write!(f, "xml error: {err}"),
            ExportError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<SerdeJsonError> for ExportError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<io::Error> for ExportError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<XmlError> for ExportError {
    fn from(value: XmlError) -> Self {
        Self::Xml(value)
    }
}

impl From<AttrError> for ExportError {
    fn from(value: AttrError) -> Self {
        Self::Xml(XmlError::InvalidAttr(value))
    }
}

pub type ExportResult<T> = Result<T, ExportError>;

pub mod report;
pub mod xml;

pub use report::{
    EvmReportRow, load_report_from_csv, load_report_from_json, save_report_to_csv,
    save_report_to_json,
};
pub use xml::{XmlElement, parse_xml, pretty_xml, save_xml, xml_to_csv};
