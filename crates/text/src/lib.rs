use once_cell::sync::Lazy;
use regex::Regex;

/// The character that introduces a formatting code once a message has been colorized.
pub const SECTION_SIGN: char = '§';

static CODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("[&§][0-9a-fA-Fk-oK-OrR]").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCode {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    Obfuscated,
    Bold,
    Strikethrough,
    Underline,
    Italic,
    Reset,
}

impl ColorCode {
    pub const ALL: [ColorCode; 22] = [
        ColorCode::Black,
        ColorCode::DarkBlue,
        ColorCode::DarkGreen,
        ColorCode::DarkAqua,
        ColorCode::DarkRed,
        ColorCode::DarkPurple,
        ColorCode::Gold,
        ColorCode::Gray,
        ColorCode::DarkGray,
        ColorCode::Blue,
        ColorCode::Green,
        ColorCode::Aqua,
        ColorCode::Red,
        ColorCode::LightPurple,
        ColorCode::Yellow,
        ColorCode::White,
        ColorCode::Obfuscated,
        ColorCode::Bold,
        ColorCode::Strikethrough,
        ColorCode::Underline,
        ColorCode::Italic,
        ColorCode::Reset,
    ];

    pub fn parse(code: char) -> Option<ColorCode> {
        Some(match code.to_ascii_lowercase() {
            '0' => ColorCode::Black,
            '1' => ColorCode::DarkBlue,
            '2' => ColorCode::DarkGreen,
            '3' => ColorCode::DarkAqua,
            '4' => ColorCode::DarkRed,
            '5' => ColorCode::DarkPurple,
            '6' => ColorCode::Gold,
            '7' => ColorCode::Gray,
            '8' => ColorCode::DarkGray,
            '9' => ColorCode::Blue,
            'a' => ColorCode::Green,
            'b' => ColorCode::Aqua,
            'c' => ColorCode::Red,
            'd' => ColorCode::LightPurple,
            'e' => ColorCode::Yellow,
            'f' => ColorCode::White,
            'k' => ColorCode::Obfuscated,
            'l' => ColorCode::Bold,
            'm' => ColorCode::Strikethrough,
            'n' => ColorCode::Underline,
            'o' => ColorCode::Italic,
            'r' => ColorCode::Reset,
            _ => return None,
        })
    }

    pub fn code(self) -> char {
        match self {
            ColorCode::Black => '0',
            ColorCode::DarkBlue => '1',
            ColorCode::DarkGreen => '2',
            ColorCode::DarkAqua => '3',
            ColorCode::DarkRed => '4',
            ColorCode::DarkPurple => '5',
            ColorCode::Gold => '6',
            ColorCode::Gray => '7',
            ColorCode::DarkGray => '8',
            ColorCode::Blue => '9',
            ColorCode::Green => 'a',
            ColorCode::Aqua => 'b',
            ColorCode::Red => 'c',
            ColorCode::LightPurple => 'd',
            ColorCode::Yellow => 'e',
            ColorCode::White => 'f',
            ColorCode::Obfuscated => 'k',
            ColorCode::Bold => 'l',
            ColorCode::Strikethrough => 'm',
            ColorCode::Underline => 'n',
            ColorCode::Italic => 'o',
            ColorCode::Reset => 'r',
        }
    }

    /// The identifier players type for this code, e.g. `dark_aqua`.
    pub fn name(self) -> &'static str {
        match self {
            ColorCode::Black => "black",
            ColorCode::DarkBlue => "dark_blue",
            ColorCode::DarkGreen => "dark_green",
            ColorCode::DarkAqua => "dark_aqua",
            ColorCode::DarkRed => "dark_red",
            ColorCode::DarkPurple => "dark_purple",
            ColorCode::Gold => "gold",
            ColorCode::Gray => "gray",
            ColorCode::DarkGray => "dark_gray",
            ColorCode::Blue => "blue",
            ColorCode::Green => "green",
            ColorCode::Aqua => "aqua",
            ColorCode::Red => "red",
            ColorCode::LightPurple => "light_purple",
            ColorCode::Yellow => "yellow",
            ColorCode::White => "white",
            ColorCode::Obfuscated => "obfuscated",
            ColorCode::Bold => "bold",
            ColorCode::Strikethrough => "strikethrough",
            ColorCode::Underline => "underline",
            ColorCode::Italic => "italic",
            ColorCode::Reset => "reset",
        }
    }

    pub fn is_formatting(self) -> bool {
        use ColorCode::*;
        matches!(
            self,
            Obfuscated | Bold | Strikethrough | Underline | Italic | Reset
        )
    }
}

/// Replaces `alt_char` followed by a valid code with the section sign, leaving
/// every other occurrence of `alt_char` untouched.
pub fn translate_alternate_color_codes(alt_char: char, message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    let mut chars = message.chars().peekable();
    while let Some(c) = chars.next() {
        if c == alt_char {
            if let Some(&next) = chars.peek() {
                if ColorCode::parse(next).is_some() {
                    out.push(SECTION_SIGN);
                    out.push(next.to_ascii_lowercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Removes both `&` and section sign codes.
pub fn strip_color_codes(message: &str) -> String {
    CODE_REGEX.replace_all(message, "").into_owned()
}

/// A run of text that shares one color and set of decorations.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub underlined: bool,
    pub strikethrough: bool,
    pub obfuscated: bool,
    pub color: Option<ColorCode>,
}

impl TextSpan {
    pub fn is_text_only(&self) -> bool {
        !self.bold
            && !self.italic
            && !self.underlined
            && !self.strikethrough
            && !self.obfuscated
            && self.color.is_none()
    }

    /// Splits a colorized message into spans. Accepts both `&` and section sign codes.
    pub fn from_legacy_text(message: &str) -> Vec<TextSpan> {
        let mut spans = Vec::new();
        let mut cur: TextSpan = Default::default();

        let mut chars = message.chars();
        while let Some(c) = chars.next() {
            if c == '&' || c == SECTION_SIGN {
                if let Some(code) = chars.next() {
                    if let Some(color) = ColorCode::parse(code) {
                        let make_new = !cur.text.is_empty();
                        if color.is_formatting() && make_new {
                            spans.push(cur.clone());
                            cur.text.clear();
                        }
                        match color {
                            ColorCode::Bold => cur.bold = true,
                            ColorCode::Italic => cur.italic = true,
                            ColorCode::Underline => cur.underlined = true,
                            ColorCode::Strikethrough => cur.strikethrough = true,
                            ColorCode::Obfuscated => cur.obfuscated = true,
                            ColorCode::Reset => {
                                if make_new {
                                    spans.push(std::mem::take(&mut cur));
                                } else {
                                    cur = Default::default();
                                }
                            }
                            _ => {
                                if make_new {
                                    spans.push(std::mem::take(&mut cur));
                                }
                                cur = TextSpan {
                                    color: Some(color),
                                    ..Default::default()
                                };
                            }
                        }
                        continue;
                    }
                    cur.text.push(c);
                    cur.text.push(code);
                    continue;
                }
            }
            cur.text.push(c);
        }
        if !cur.text.is_empty() {
            spans.push(cur);
        }
        spans
    }
}
