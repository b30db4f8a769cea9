//! Output module for the path narrative and the run log
//!
//! This module handles:
//! - Rendering the per-hop narrative (sentence plus destination URL)
//! - Writing the run log that enumerates every admitted page

use crate::explain::HopReport;
use crate::url::PageId;
use std::io::Write;
use std::path::Path;

/// Renders the path narrative
///
/// For each hop: a numbered divider, the extracted sentence, and the
/// absolute URL of the hop's destination. A hop whose explanation failed is
/// reported in place without suppressing the other hops.
pub fn render_narrative(reports: &[HopReport]) -> String {
    let mut out = String::new();

    for report in reports {
        out.push_str(&format!("{} ------------------------\n", report.hop));
        match &report.outcome {
            Ok(sentence) => {
                out.push_str(&sentence.text);
                out.push('\n');
                out.push_str(sentence.target_url.as_str());
                out.push('\n');
            }
            Err(e) => {
                out.push_str(&format!(
                    "link found but explanatory sentence unavailable for hop {}: {}\n",
                    report.hop, e
                ));
            }
        }
        out.push('\n');
    }

    out
}

/// Prints the path narrative to stdout
pub fn print_narrative(reports: &[HopReport]) {
    print!("{}", render_narrative(reports));
}

/// Renders the run log: every admitted page, enumerated in admission order
pub fn render_run_log(visited: &[PageId]) -> String {
    let mut out = String::new();
    for (index, page) in visited.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", index + 1, page));
    }
    out
}

/// Writes the run log to the given path
pub fn write_run_log(path: &Path, visited: &[PageId]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(render_run_log(visited).as_bytes())?;
    Ok(())
}
