//! Test utilities for the tabular reader backends
//!
//! Shared fixtures used by the reader tests and by the pipeline tests in
//! the incident parser module.

pub mod xlsx_fixture;


/// Raw-export CSV with a quoted multi-line comment
pub fn create_raw_export_csv() -> String {
    "\"Issue key\",\"Custom field (Issue Links)\",\"Labels\",\"Comment\"\n\
     \"TSC-1\",\"Payments\",\"Bug\",\"25/Feb/26 10:06 AM;111:uuid;first line\n\
     26/Feb/26 10:07 AM;222:uuid;second line\"\n"
        .to_string()
}

/// Preprocessed CSV with `count` data rows
pub fn create_preprocessed_csv(count: usize) -> String {
    let mut csv = String::from("\"Issue Key\",\"Custom Field (Issue Links)\",\"Label\",\"Comment\"\n");
    for i in 1..=count {
        csv.push_str(&format!("\"TSC-{i}\",\"Link{i}\",\"L{i}\",\"c{i}\"\n"));
    }
    csv
}
