//! CLI output formatting utilities.

use crate::store::{Doctor, Patient};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a patient row.
    pub fn patient_row(patient: &Patient) {
        println!(
            "  {} {} ({}, born {}, {} / {})",
            style("*").cyan(),
            style(&patient.name).bold(),
            style(&patient.record_number).dim(),
            patient.birth_date,
            patient.status,
            patient.department
        );
    }

    /// Print a doctor row.
    pub fn doctor_row(doctor: &Doctor) {
        println!(
            "  {} {} ({}, {}) - {}",
            style("*").cyan(),
            style(&doctor.name).bold(),
            style(&doctor.id).dim(),
            doctor.specialty,
            doctor.schedule
        );
    }

    /// Print a one-line tool-call trace.
    pub fn tool_trace(name: &str, arguments: &serde_json::Value) {
        println!("  {}", style(format!("[{}] {}", name, arguments)).dim());
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}
