pub mod formatting;

pub use formatting::{render_json_report, render_report, ReportOptions};
