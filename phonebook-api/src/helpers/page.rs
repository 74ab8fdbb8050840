//! Server-side rendering of the phonebook page.

use shared_types::Contact;

pub struct PageView<'a> {
    pub contacts: &'a [Contact],
    pub filter: &'a str,
    /// Blocking notification, shown after a rejected submission
    pub notice: Option<&'a str>,
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Ids are opaque, so they get percent-encoded before landing in a URL path.
fn encode_path_segment(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::new();

    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Phonebook</title>\n<style>\n\
         body { font-family: sans-serif; }\n\
         section { max-width: 480px; margin: 0 auto; padding: 16px; }\n\
         .notice { border: 1px solid #c33; background: #fee; padding: 8px; }\n\
         ul { padding-left: 0; list-style: none; }\n\
         li { display: flex; justify-content: space-between; padding: 4px 0; }\n\
         </style>\n</head>\n<body>\n<section>\n<h1>Phonebook</h1>\n",
    );

    if let Some(notice) = view.notice {
        html.push_str(&format!(
            "<div class=\"notice\" role=\"alert\">{}</div>\n",
            escape_html(notice)
        ));
    }

    // Inputs always render empty: the form resets after every submission
    html.push_str(
        "<form method=\"post\" action=\"/contacts\">\n\
         <label>Name <input type=\"text\" name=\"name\" value=\"\" required></label>\n\
         <label>Number <input type=\"tel\" name=\"number\" value=\"\" required></label>\n\
         <button type=\"submit\">Add contact</button>\n</form>\n",
    );

    html.push_str("<h2>Contacts</h2>\n<ul>\n");
    for contact in view.contacts {
        html.push_str(&format!(
            "<li><span>{}: {}</span>\
             <form method=\"post\" action=\"/contacts/{}/delete\">\
             <button type=\"submit\">Delete</button></form></li>\n",
            escape_html(&contact.name),
            escape_html(&contact.number),
            escape_html(&encode_path_segment(&contact.id)),
        ));
    }
    html.push_str("</ul>\n");

    html.push_str(&format!(
        "<form method=\"post\" action=\"/filter\">\n\
         <label>Find contacts by name <input type=\"text\" name=\"filter\" value=\"{}\"></label>\n\
         <button type=\"submit\">Filter</button>\n</form>\n",
        escape_html(view.filter)
    ));

    html.push_str("</section>\n</body>\n</html>\n");
    html
}
