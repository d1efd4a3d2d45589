//! Text exposition format rendering.
//!
//! Produces the line-oriented format scraped by Prometheus:
//!
//! ```text
//! metric_name{label1="value1",label2="value2"} 42
//! ```
//!
//! All rendering is deterministic: the same set of samples renders to the
//! same bytes regardless of the order they were recorded in.

use std::fmt::Write;

use crate::definition::{LabelSet, Sample};
use crate::registry::Registry;

/// Content type served for exposition output.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Render one sample as a single line (without trailing newline).
pub fn format_sample(name: &str, labels: &LabelSet, value: f64) -> String {
    format!("{}{} {}", name, format_labels(labels), format_value(value))
}

/// Render a label set, including braces. Empty sets render as nothing.
pub fn format_labels(labels: &LabelSet) -> String {
    if labels.is_empty() {
        return String::new();
    }

    let parts: Vec<String> = labels
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
        .collect();

    format!("{{{}}}", parts.join(","))
}

/// Escape special characters in label values.
pub fn escape_label_value(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

/// Format a floating point value in its natural decimal form.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        }
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Render samples as lexicographically sorted lines, preceded by `preamble`.
///
/// Preamble lines are emitted verbatim and in order (they are expected to be
/// `#` comments). The result has no trailing newline.
pub fn render_flat<'a>(
    preamble: &[&str],
    samples: impl IntoIterator<Item = &'a Sample>,
) -> String {
    let mut lines: Vec<String> = samples
        .into_iter()
        .map(|s| format_sample(&s.metric_name, &s.labels, s.value))
        .collect();
    lines.sort();

    preamble
        .iter()
        .map(|l| (*l).to_string())
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render every family of `registry` with `# HELP` / `# TYPE` headers.
///
/// Families appear in name order and each family's sample lines are sorted.
pub fn render_families(registry: &Registry) -> String {
    let mut output = String::with_capacity(registry.sample_count() * 100);

    for family in registry.families() {
        if family.samples.is_empty() {
            continue;
        }

        writeln!(output, "# HELP {} {}", family.name, family.help()).ok();
        writeln!(output, "# TYPE {} gauge", family.name).ok();

        let mut lines: Vec<String> = family
            .samples
            .iter()
            .map(|s| format_sample(&family.name, &s.labels, s.value))
            .collect();
        lines.sort();

        for line in lines {
            writeln!(output, "{}", line).ok();
        }
    }

    output
}
