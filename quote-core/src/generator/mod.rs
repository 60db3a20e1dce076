//! Report generator module.

mod report;

pub use report::{format_amount, render_report, Report};
