//! HTML pages: the question form, the generated paper and the error page.
//!
//! All user and backend supplied text is HTML-escaped.

use crate::models::{Reference, ResultPage};

const STYLE: &str = r#"<style>
body { font-family: Georgia, "Times New Roman", serif; background: #f5f5f5; margin: 0; color: #222; }
main { background: #fff; max-width: 820px; margin: 32px auto; padding: 32px 48px; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.1); }
h1 { font-size: 26px; margin: 0 0 8px; }
h2 { font-size: 19px; margin: 28px 0 8px; border-bottom: 1px solid #ddd; padding-bottom: 4px; }
.subtitle { color: #666; font-size: 14px; margin: 0 0 24px; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; }
.text { white-space: pre-wrap; line-height: 1.55; }
.error { background: #fee; border: 1px solid #c00; color: #c00; padding: 10px; border-radius: 4px; margin-bottom: 16px; }
.detail { font-family: monospace; font-size: 13px; white-space: pre-wrap; color: #555; }
label { display: block; font-size: 14px; font-weight: 500; margin-bottom: 6px; }
textarea { width: 100%; min-height: 90px; padding: 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 15px; box-sizing: border-box; }
button { padding: 10px 24px; background: #4a90d9; color: #fff; border: none; border-radius: 4px; font-size: 14px; cursor: pointer; margin-top: 16px; }
button:hover { background: #357abd; }
ol.references li { margin-bottom: 10px; }
</style>"#;

/// Render the question form, optionally with a validation message.
pub fn render_form(error_message: Option<&str>) -> String {
    let error_html = error_message
        .map(|msg| format!(r#"<div class="error">{}</div>"#, html_escape(msg)))
        .unwrap_or_default();

    layout(
        "Research Paper Generator",
        &format!(
            r#"<h1>Research Paper Generator</h1>
<p class="subtitle">Enter a research question to draft a paper with references.</p>
{error_html}
<form method="POST" action="/">
<label for="question">Research question</label>
<textarea id="question" name="question" placeholder="e.g. How does quantum entanglement affect secure communication?" required autofocus></textarea>
<button type="submit">Generate paper</button>
</form>"#
        ),
    )
}

/// Render a generated paper.
pub fn render_result(page: &ResultPage) -> String {
    let mut body = format!(
        "<h1>{}</h1>\n<p class=\"subtitle\"><a href=\"/\">Ask another question</a></p>\n",
        html_escape(page.question.as_str())
    );

    for generated in &page.sections {
        body.push_str(&format!(
            "<section id=\"{}\">\n<h2>{}</h2>\n<div class=\"text\">{}</div>\n</section>\n",
            generated.section.slug(),
            html_escape(generated.section.label()),
            html_escape(&generated.text),
        ));
    }

    body.push_str("<section id=\"references\">\n<h2>References</h2>\n");
    if page.references.is_empty() {
        body.push_str("<p>No references found.</p>\n");
    } else {
        body.push_str("<ol class=\"references\">\n");
        for reference in &page.references {
            body.push_str(&render_reference(reference));
        }
        body.push_str("</ol>\n");
    }
    body.push_str("</section>");

    layout(&format!("{} - Research Paper", page.question), &body)
}

/// Render an error page. `detail` is only passed in debug mode.
pub fn render_error(message: &str, detail: Option<&str>) -> String {
    let detail_html = detail
        .map(|d| format!("<p class=\"detail\">{}</p>\n", html_escape(d)))
        .unwrap_or_default();

    layout(
        "Error - Research Paper Generator",
        &format!(
            "<h1>Something went wrong</h1>\n<div class=\"error\">{}</div>\n{detail_html}<p><a href=\"/\">Back to the form</a></p>",
            html_escape(message)
        ),
    )
}

fn render_reference(reference: &Reference) -> String {
    let year = reference.year.map(|y| y.to_string()).unwrap_or_else(|| "n.d.".to_string());

    // Placeholders are not URLs and are shown as plain text.
    let link = if reference.link.starts_with("http://") || reference.link.starts_with("https://") {
        format!(r#"<a href="{0}">{0}</a>"#, html_escape(&reference.link))
    } else {
        html_escape(&reference.link)
    };

    format!(
        "<li class=\"reference\"><strong>{}</strong><br>{} ({}). <em>{}</em>. {}</li>\n",
        html_escape(&reference.title),
        html_escape(&reference.author),
        year,
        html_escape(&reference.journal),
        link,
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title>
{STYLE}
</head>
<body>
<main>
{body}
</main>
</body>
</html>"#,
        title = html_escape(title),
    )
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeneratedSection, Question, Section};

    fn sample_page(references: Vec<Reference>) -> ResultPage {
        let question = Question::parse(Some("Why <b>?".to_string())).unwrap();
        let sections = Section::ALL
            .iter()
            .map(|&section| GeneratedSection {
                section,
                prompt: section.prompt(&question),
                text: format!("text for {}", section.slug()),
            })
            .collect();
        ResultPage { question, sections, references }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<script>alert("xss")</script>"#),
            "&lt;script&gt;alert(&quot;xss&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_render_form_without_error() {
        let html = render_form(None);
        assert!(html.contains(r#"name="question""#));
        assert!(html.contains(r#"method="POST""#));
        assert!(!html.contains(r#"class="error""#));
    }

    #[test]
    fn test_render_form_with_error() {
        let html = render_form(Some("Please enter a research question."));
        assert!(html.contains("Please enter a research question."));
        assert!(html.contains(r#"class="error""#));
    }

    #[test]
    fn test_render_result_escapes_question() {
        let html = render_result(&sample_page(vec![]));
        assert!(html.contains("Why &lt;b&gt;?"));
        assert!(!html.contains("Why <b>?"));
        assert!(html.contains("No references found."));
        for section in Section::ALL {
            assert!(html.contains(section.label()));
        }
    }

    #[test]
    fn test_render_reference_placeholder_link_is_plain_text() {
        let html = render_reference(&Reference {
            title: "T".to_string(),
            author: String::new(),
            year: None,
            journal: "J".to_string(),
            link: "No URL available".to_string(),
        });
        assert!(html.contains("No URL available"));
        assert!(!html.contains("<a href"));
        assert!(html.contains("(n.d.)"));
    }

    #[test]
    fn test_render_error_detail_only_when_given() {
        assert!(!render_error("failed", None).contains(r#"class="detail""#));
        assert!(render_error("failed", Some("backend 500")).contains("backend 500"));
    }
}
