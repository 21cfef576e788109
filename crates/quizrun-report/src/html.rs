//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use quizrun_core::model::ResultTier;
use quizrun_core::report::QuizReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn tier_color(tier: ResultTier) -> &'static str {
    match tier {
        ResultTier::Top => "#22c55e",
        ResultTier::Mid => "#eab308",
        ResultTier::Low => "#ef4444",
    }
}

/// Generate an HTML page from a quiz report.
pub fn generate_html(report: &QuizReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizrun result: {}</title>\n",
        html_escape(&report.title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.title)));
    html.push_str(&format!(
        "<p class=\"meta\">{} questions | {}</p>\n",
        report.result.total,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Result
    html.push_str("<section class=\"result\">\n");
    html.push_str(&score_circle(report.result.percentage, tier_color(report.tier)));
    html.push_str(&format!(
        "<p class=\"score\">{}/{} correct</p>\n<p class=\"message tier-{}\">{}</p>\n",
        report.result.score,
        report.result.total,
        report.tier,
        html_escape(&report.message)
    ));
    html.push_str("</section>\n");

    // Review
    html.push_str("<section class=\"review\">\n");
    html.push_str("<h2>Review</h2>\n");
    for item in &report.items {
        let (class, badge) = if item.is_correct {
            ("correct-item", "Correct")
        } else {
            ("wrong-item", "Wrong")
        };
        html.push_str(&format!("<div class=\"review-item {class}\">\n"));
        html.push_str(&format!(
            "<p class=\"review-q\">Q{}: {} <span class=\"badge\">{badge}</span></p>\n",
            item.number,
            html_escape(&item.prompt)
        ));
        html.push_str(&format!(
            "<p class=\"review-detail\"><strong>Your answer:</strong> {}</p>\n",
            html_escape(&item.selected)
        ));
        if let Some(answer) = &item.correct_answer {
            html.push_str(&format!(
                "<p class=\"review-detail answer\"><strong>Correct answer:</strong> {}</p>\n",
                html_escape(answer)
            ));
        }
        if !item.explanation.is_empty() {
            html.push_str(&format!(
                "<p class=\"review-detail explanation\"><strong>Explanation:</strong> {}</p>\n",
                html_escape(&item.explanation)
            ));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &QuizReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

/// SVG ring filled to `percentage`.
fn score_circle(percentage: u32, color: &str) -> String {
    let radius = 54.0_f64;
    let circumference = 2.0 * std::f64::consts::PI * radius;
    let filled = circumference * f64::from(percentage.min(100)) / 100.0;

    format!(
        "<svg class=\"score-circle\" width=\"140\" height=\"140\" viewBox=\"0 0 140 140\" xmlns=\"http://www.w3.org/2000/svg\">\n\
         \x20 <circle cx=\"70\" cy=\"70\" r=\"{radius}\" fill=\"none\" stroke=\"var(--border)\" stroke-width=\"12\"/>\n\
         \x20 <circle cx=\"70\" cy=\"70\" r=\"{radius}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"12\" \
         stroke-dasharray=\"{filled:.2} {circumference:.2}\" transform=\"rotate(-90 70 70)\"/>\n\
         \x20 <text x=\"70\" y=\"70\" font-size=\"28\" fill=\"currentColor\" text-anchor=\"middle\" dominant-baseline=\"middle\">{percentage}%</text>\n\
         </svg>\n"
    )
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --success: #15803d; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; --success: #4ade80; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0 auto; max-width: 48rem; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.result { text-align: center; }
.score { font-size: 1.25rem; margin: 0.5rem 0; }
.message { font-size: 1.5rem; font-weight: bold; }
.review-item { border: 1px solid var(--border); border-radius: 8px; padding: 0.75rem 1rem; margin: 0.75rem 0; }
.correct-item { background: var(--pass); }
.wrong-item { background: var(--fail); }
.review-q { font-weight: bold; }
.badge { font-size: 0.75rem; padding: 0.1rem 0.5rem; border-radius: 999px; border: 1px solid currentColor; margin-left: 0.5rem; }
.review-detail { margin: 0.25rem 0; }
.answer { color: var(--success); }
.explanation { font-size: 0.85rem; color: #6b7280; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;
