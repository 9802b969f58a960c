//! JSON formatter for analysis reports.

use rgc_core::AnalysisReport;

pub struct JsonFormatter;

pub fn print_json(report: &AnalysisReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing report: {}", e),
    }
}
