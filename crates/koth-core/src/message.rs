//! Chat markup helpers
//!
//! Templates use `&` color codes (`&a`, `&l`, ...) and `%placeholder%` tokens.
//! `MessageBuilder` fills the placeholders and translates the color codes to
//! the section sign the client understands.

/// Section sign used by the client for formatting codes
pub const COLOR_CHAR: char = '\u{00A7}';

/// Alternate color code character used in config templates
pub const ALT_COLOR_CHAR: char = '&';

const FORMAT_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

/// Translate `alt` color codes into section-sign codes.
///
/// Only an `alt` directly followed by a valid format code is translated; any
/// other occurrence is kept verbatim.
pub fn translate_color_codes(alt: char, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == alt && FORMAT_CODES.contains(next) => {
                out.push(COLOR_CHAR);
                out.push(next.to_ascii_lowercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }

    out
}

/// Builds a chat message from a template
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    template: String,
    replacements: Vec<(&'static str, String)>,
}

impl MessageBuilder {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            replacements: Vec::new(),
        }
    }

    /// Builder: fill `%loot%`
    pub fn loot(self, name: &str) -> Self {
        self.replace("%loot%", name)
    }

    fn replace(mut self, token: &'static str, value: &str) -> Self {
        self.replacements.push((token, value.to_string()));
        self
    }

    /// Translate color codes first, then fill placeholders, so values are
    /// inserted verbatim.
    pub fn build(&self) -> String {
        let mut message = translate_color_codes(ALT_COLOR_CHAR, &self.template);
        for (token, value) in &self.replacements {
            message = message.replace(token, value);
        }
        message
    }
}
