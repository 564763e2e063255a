use axum::response::Html;
use hunter_detector::{ScanSummary, ScoreResult};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const RESULT_SLOT: &str = "{{result}}";

/// What the shared page shows above the input forms.
#[derive(Debug, Clone)]
pub enum ScanView {
    Empty,
    Manual(ScoreResult),
    File {
        file_name: Option<String>,
        summary: ScanSummary,
    },
    Url {
        url: String,
        summary: ScanSummary,
    },
    Error(String),
}

pub fn render(view: &ScanView) -> Html<String> {
    Html(INDEX_TEMPLATE.replace(RESULT_SLOT, &result_fragment(view)))
}

fn result_fragment(view: &ScanView) -> String {
    match view {
        ScanView::Empty => String::new(),
        ScanView::Manual(result) => format!(
            "<section class=\"result result-{action}\" id=\"manual-result\">\
             <h2>Manual scan</h2>\
             <p>Action: <strong>{action}</strong></p>\
             <p>Probability: {prob:.2}%</p>\
             </section>",
            action = result.action.as_str(),
            prob = result.probability,
        ),
        ScanView::File { file_name, summary } => summary_fragment(
            "file-result",
            &format!(
                "File scan: {}",
                escape_html(file_name.as_deref().unwrap_or("upload"))
            ),
            summary,
        ),
        ScanView::Url { url, summary } => {
            summary_fragment("url-result", &format!("URL scan: {}", escape_html(url)), summary)
        }
        ScanView::Error(message) => format!(
            "<section class=\"error\" id=\"scan-error\"><p>{}</p></section>",
            escape_html(message)
        ),
    }
}

fn summary_fragment(id: &str, title: &str, summary: &ScanSummary) -> String {
    format!(
        "<section class=\"result result-{action}\" id=\"{id}\">\
         <h2>{title}</h2>\
         <p>Rows: {rows}</p>\
         <p>First row action: <strong>{action}</strong></p>\
         <p>First row probability: {prob:.2}%</p>\
         </section>",
        action = summary.first_action.as_str(),
        rows = summary.rows,
        prob = summary.first_prob,
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
