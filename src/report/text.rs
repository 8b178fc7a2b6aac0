//! Plain-text listings

use chrono::{DateTime, Utc};

use super::{truncate_chars, ReportLimits};
use crate::harvest::{AggregateReport, FetchResult, ResultOutcome};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TRUNCATION_MARKER: &str = "\n\n[... content truncated ...]\n";
const NO_IMAGES_MARKER: &str = "(no images)";

fn heavy_rule() -> String {
    "=".repeat(80)
}

/// Combined listing of every site, failures included
pub fn render_all_content(report: &AggregateReport, limits: &ReportLimits) -> String {
    let rule = heavy_rule();
    let mut out = String::new();

    out.push_str("🚀 Harvest results\n");
    out.push_str(&format!("Query: {}\n", report.query()));
    out.push_str(&format!(
        "Run at: {}\n",
        report.generated_at().format(TIMESTAMP_FORMAT)
    ));
    out.push_str(&format!("Sites: {}\n", report.total_sites()));
    out.push_str(&format!("{}\n\n", rule));
    out.push_str(&format!(
        "Succeeded: {} / Failed: {}\n",
        report.success_count(),
        report.failure_count()
    ));
    out.push_str(&format!("{}\n\n", rule));

    for (i, result) in report.results().iter().enumerate() {
        out.push_str(&format!("\n{}\n", rule));
        out.push_str(&format!("Site {}: {}\n", i + 1, result.url()));
        out.push_str(&format!(
            "Captured at: {}\n",
            result.captured_at().format(TIMESTAMP_FORMAT)
        ));
        out.push_str(&format!("Images: {}\n", result.image_count()));
        out.push_str(&format!("{}\n\n", "-".repeat(80)));

        match result.outcome() {
            ResultOutcome::Extracted { page, .. } => {
                let (kept, truncated) = truncate_chars(&page.text, limits.max_report_chars);
                out.push_str(kept);
                if truncated {
                    out.push_str(TRUNCATION_MARKER);
                }
            }
            ResultOutcome::Failed { kind, message } => {
                out.push_str(&format!("⚠️ {}: {}\n", kind, message));
            }
        }
        out.push_str("\n\n");
    }

    out
}

/// Full text of one successful site, `None` for failures
pub fn render_site(result: &FetchResult) -> Option<String> {
    let page = result.page()?;
    Some(format!(
        "URL: {}\nCaptured at: {}\n{}\n\n{}",
        result.url(),
        result.captured_at().format(TIMESTAMP_FORMAT),
        heavy_rule(),
        page.text
    ))
}

/// Numbered image URLs per site with a trailing total
pub fn render_image_listing(report: &AggregateReport) -> String {
    let mut out = String::new();
    out.push_str("🖼️ Image URLs\n");
    out.push_str(&format!("Query: {}\n", report.query()));
    out.push_str(&format!("{}\n\n", heavy_rule()));

    for (i, result) in report.results().iter().enumerate() {
        out.push_str(&format!("\nSite {}: {}\n", i + 1, result.url()));
        out.push_str(&format!("Images: {}\n", result.image_count()));
        out.push_str(&format!("{}\n", "-".repeat(40)));

        match result.page() {
            Some(page) if !page.images.is_empty() => {
                for (j, image) in page.images.iter().enumerate() {
                    out.push_str(&format!("{}. {}\n", j + 1, image));
                }
            }
            _ => {
                out.push_str(NO_IMAGES_MARKER);
                out.push('\n');
            }
        }
        out.push('\n');
    }

    out.push_str(&format!("\nTotal images: {}\n", report.total_images()));
    out
}

/// Run timestamp as used in output directory names
pub fn directory_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}
