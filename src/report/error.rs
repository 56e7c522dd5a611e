//! Report errors

use thiserror::Error;

/// Errors raised while serializing a report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("XML write failed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Report is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
