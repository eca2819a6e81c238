//! How a bot reply is displayed. The stored text is never modified.

use pulldown_cmark::{html, Event, Options, Parser};

const IMAGE_EXTENSIONS: [&str; 5] = [".jpeg", ".jpg", ".gif", ".png", ".webp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    /// Show as an `<img>` pointing at this URL.
    Image(String),
    /// Pre-rendered, escaped HTML.
    Html(String),
}

/// A reply counts as an image only when it is a single http(s) URL token
/// ending in a known image extension.
pub fn is_image_url(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        return false;
    }
    if !(text.starts_with("http://") || text.starts_with("https://")) {
        return false;
    }
    let lower = text.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

pub fn markdown_to_html(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    // Raw HTML from the model is shown as text.
    let events = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut output = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut output, events);
    output
}

pub fn render_bot_message(text: &str) -> MessageBody {
    if is_image_url(text) {
        MessageBody::Image(text.trim().to_string())
    } else {
        MessageBody::Html(markdown_to_html(text))
    }
}
