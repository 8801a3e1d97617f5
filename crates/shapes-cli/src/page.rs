//! HTML for the two pages of the web front end.

const STYLE: &str = "body{font-family:sans-serif;max-width:40em;margin:2em auto}\
.response{margin-top:1em;padding:1em;background:#f4f4f4}";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Escape each line and join with `<br>`.
pub fn response_html(response: &str) -> String {
    response
        .lines()
        .map(escape_html)
        .collect::<Vec<_>>()
        .join("<br>")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n\
         <body>\n{body}\n</body>\n</html>\n"
    )
}

pub fn home() -> String {
    layout(
        "Shape Formulas",
        "<h1>Shape Formulas</h1>\n\
         <p>Ask for the area or perimeter of a circle, rectangle, square or triangle.</p>\n\
         <p><a href=\"/shapes\">Look up a formula</a></p>",
    )
}

/// Query form, plus the previous query and its answer when there is one.
pub fn shapes(result: Option<(&str, &str)>) -> String {
    let mut body = String::from(
        "<h1>Shape Formulas</h1>\n\
         <form method=\"post\" action=\"/shapes\">\n\
         <label for=\"concept\">Concept</label>\n\
         <input type=\"text\" id=\"concept\" name=\"concept\" placeholder=\"area of circle\">\n\
         <button type=\"submit\">Search</button>\n\
         </form>",
    );
    if let Some((concept, response)) = result {
        body.push_str(&format!(
            "\n<h2>{}</h2>\n<div class=\"response\">{}</div>",
            escape_html(concept),
            response_html(response)
        ));
    }
    body.push_str("\n<p><a href=\"/\">Home</a></p>");
    layout("Shape Formulas", &body)
}
