use pulldown_cmark::{html, Event, Options, Parser};

fn gfm_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION
}

/// Render a raw Markdown string to sanitized HTML.
///
/// Supports GitHub Flavored Markdown (GFM) features: tables, footnotes,
/// strikethrough, task lists, and smart punctuation. The output is run
/// through ammonia, so script injection in content files cannot reach the
/// rendered page.
pub fn render_markdown(raw: &str) -> String {
    let parser = Parser::new_ext(raw, gfm_options());
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    ammonia::clean(&html_output)
}

/// Strip markdown syntax, keeping only the text content.
///
/// Used for search index bodies and previews.
pub fn plain_text(raw: &str) -> String {
    let parser = Parser::new_ext(raw, gfm_options());
    let mut text = String::new();

    for event in parser {
        match event {
            Event::Text(t) | Event::Code(t) => {
                if !text.is_empty() && !text.ends_with(' ') {
                    text.push(' ');
                }
                text.push_str(&t);
            }
            Event::SoftBreak | Event::HardBreak => {
                text.push(' ');
            }
            _ => {}
        }
    }

    text
}
