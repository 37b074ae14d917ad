//! Server-rendered HTML for the web form
//!
//! One page: the input form, the diagnosis table and summary when a
//! report is present, and the list of known keywords. All dynamic text
//! is escaped before it reaches the page.

use crate::orchestrator::TriageReport;
use crate::triage::KnowledgeBase;

const STYLE: &str = "<style>\n\
    body { font-family: sans-serif; max-width: 52rem; margin: 2rem auto; padding: 0 1rem; }\n\
    textarea { width: 100%; font-size: 1rem; }\n\
    table { border-collapse: collapse; margin-top: 1rem; }\n\
    th, td { border: 1px solid #999; padding: 0.4rem 0.6rem; text-align: left; }\n\
    .summary { background: #f4f4f4; padding: 1rem; }\n\
    .keywords { color: #555; }\n\
    </style>\n";

/// Render the page, optionally with a finished report
pub fn render_index(knowledge: &KnowledgeBase, report: Option<&TriageReport>) -> String {
    let keywords = knowledge.keywords().collect::<Vec<_>>().join(", ");

    let mut page = String::with_capacity(4096);
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<title>Symptom Checker</title>\n");
    page.push_str(STYLE);
    page.push_str("</head>\n<body>\n<h1>Symptom Checker</h1>\n");

    page.push_str("<form method=\"post\" action=\"/predict\">\n");
    page.push_str(
        "<textarea name=\"symptoms\" rows=\"4\" \
         placeholder=\"Describe your symptoms, e.g. fever and headache\"></textarea>\n",
    );
    page.push_str("<button type=\"submit\">Check Symptoms</button>\n</form>\n");

    if let Some(report) = report {
        render_report(&mut page, report);
    }

    page.push_str("<h2>Known symptoms</h2>\n");
    page.push_str(&format!(
        "<p class=\"keywords\">{}</p>\n",
        escape_html(&keywords)
    ));
    page.push_str("</body>\n</html>\n");

    page
}

fn render_report(page: &mut String, report: &TriageReport) {
    page.push_str("<h2>Results</h2>\n<table>\n");
    page.push_str("<tr><th>Symptom</th><th>Diagnosis</th><th>Advice</th><th>Severity</th></tr>\n");
    for result in &report.results {
        page.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&result.symptom),
            escape_html(&result.diagnosis),
            escape_html(&result.advice),
            result.severity
        ));
    }
    page.push_str("</table>\n");

    page.push_str("<h2>Summary</h2>\n");
    page.push_str(&format!(
        "<p class=\"summary\">{}</p>\n",
        escape_html(&report.summary)
    ));

    page.push_str("<form method=\"post\" action=\"/download_pdf\">\n");
    page.push_str(&format!(
        "<input type=\"hidden\" name=\"summary\" value=\"{}\">\n",
        escape_html(&report.summary)
    ));
    page.push_str("<button type=\"submit\">Download PDF</button>\n</form>\n");
}

/// Escape text for both element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_report(summary: &str) -> TriageReport {
        TriageReport {
            request_id: Uuid::new_v4(),
            results: KnowledgeBase::builtin().diagnose("fever"),
            summary: summary.to_string(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>&"quote"&'tick'</b>"#),
            "&lt;b&gt;&amp;&quot;quote&quot;&amp;&#39;tick&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_empty_page_has_form_and_keywords() {
        let page = render_index(&KnowledgeBase::builtin(), None);

        assert!(page.contains("action=\"/predict\""));
        assert!(page.contains("name=\"symptoms\""));
        assert!(page.contains("fever"));
        assert!(page.contains("cold feet"));
        assert!(!page.contains("<h2>Summary</h2>"));
    }

    #[test]
    fn test_report_page_shows_results_and_summary() {
        let report = sample_report("Monitor your temperature and rest.");
        let page = render_index(&KnowledgeBase::builtin(), Some(&report));

        assert!(page.contains("<h2>Results</h2>"));
        assert!(page.contains("<td>fever</td>"));
        assert!(page.contains("<td>Moderate</td>"));
        assert!(page.contains("Monitor your temperature and rest."));
        assert!(page.contains("action=\"/download_pdf\""));
        assert!(page.contains("name=\"summary\""));
    }

    #[test]
    fn test_summary_is_escaped_everywhere() {
        let report = sample_report("rest & <script>alert(1)</script>");
        let page = render_index(&KnowledgeBase::builtin(), Some(&report));

        assert!(!page.contains("<script>"));
        assert!(page.contains("rest &amp; &lt;script&gt;"));
    }
}
