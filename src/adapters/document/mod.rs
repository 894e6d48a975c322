//! Document adapters - input loading and report output.

mod input_loader;
mod report_writer;

pub use input_loader::{InputLoadError, YamlInputLoader};
pub use report_writer::{ReportError, ReportWriter};
