pub mod commands;
pub mod format;
pub mod materialize;
pub mod share;

pub use format::{to_delimited_text, to_html_table};
pub use materialize::{finalize_pdf_report, write_text_report, ReportError};
pub use share::{share_target, ShareError};
