//! Meme image URL construction.
//!
//! memegen renders an image for any path of the form
//! `/images/<template>/<line>/<line>....<ext>`, so building a meme is purely a matter of encoding
//! each text line into a path segment. Nothing here touches the network.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::form_urlencoded;

use crate::config::DEFAULT_API_BASE;

/// Segment memegen interprets as a line with no text.
pub const EMPTY_SEGMENT: &str = "_";

/// Escapes applied to non-blank lines, in order. Underscores are doubled first so the
/// space-to-underscore rule cannot be confused with a literal underscore.
const ESCAPES: [(&str, &str); 11] = [
    ("_", "__"),
    (" ", "_"),
    ("?", "~q"),
    ("%", "~p"),
    ("#", "~h"),
    ("/", "~s"),
    ("\\", "~b"),
    ("<", "~l"),
    (">", "~g"),
    ("\"", "''"),
    ("\n", "~n"),
];

/// Output formats memegen can render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageExtension {
    /// Portable Network Graphics.
    #[default]
    Png,
    /// JPEG.
    Jpg,
    /// Animated GIF.
    Gif,
    /// WebP.
    Webp,
}

/// Raised when a string does not name a supported image extension.
#[derive(Debug, Error)]
#[error("unsupported image extension `{0}` (expected one of png, jpg, gif, webp)")]
pub struct UnknownExtension(String);

impl ImageExtension {
    /// Every supported extension, in advertised order.
    pub const ALL: [Self; 4] = [Self::Png, Self::Jpg, Self::Gif, Self::Webp];

    /// File extension without the leading dot.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }
}

impl fmt::Display for ImageExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageExtension {
    type Err = UnknownExtension;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|extension| extension.as_str() == s)
            .ok_or_else(|| UnknownExtension(s.to_string()))
    }
}

/// Everything needed to render one meme image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemeRequest {
    /// Template identifier.
    pub template_id: String,
    /// Text lines, top to bottom.
    pub lines: Vec<String>,
    /// Optional template style variant.
    pub style: Option<String>,
    /// Optional font override.
    pub font: Option<String>,
    /// Output image format.
    pub extension: ImageExtension,
}

/// Encode one line of meme text into a URL path segment.
///
/// Blank lines become [`EMPTY_SEGMENT`]; otherwise the memegen escape rules are applied in a
/// fixed order.
pub fn encode_text(text: &str) -> String {
    if text.chars().all(is_blank) {
        return EMPTY_SEGMENT.to_string();
    }

    ESCAPES
        .into_iter()
        .fold(text.to_string(), |encoded, (from, to)| encoded.replace(from, to))
}

/// Whitespace, counting the byte order mark that `char::is_whitespace` leaves out.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Builds meme image URLs against a memegen deployment.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base_url: String,
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl UrlBuilder {
    /// Create a builder rooted at `base_url` (for example `https://api.memegen.link`).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL the builder prefixes onto every image path.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Produce the image URL for `request`.
    ///
    /// `style` and `font` are appended as query parameters, in that order, only when non-empty.
    pub fn build(&self, request: &MemeRequest) -> String {
        let mut url = format!("{}/images/{}", self.base_url, request.template_id);

        if !request.lines.is_empty() {
            let segments: Vec<String> = request
                .lines
                .iter()
                .map(|line| encode_text(line))
                .collect();
            url.push('/');
            url.push_str(&segments.join("/"));
        }

        url.push('.');
        url.push_str(request.extension.as_str());

        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut has_query = false;
        for (key, value) in [("style", &request.style), ("font", &request.font)] {
            if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
                query.append_pair(key, value);
                has_query = true;
            }
        }
        if has_query {
            url.push('?');
            url.push_str(&query.finish());
        }

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(template_id: &str, lines: &[&str]) -> MemeRequest {
        MemeRequest {
            template_id: template_id.into(),
            lines: lines.iter().map(|line| line.to_string()).collect(),
            ..MemeRequest::default()
        }
    }

    #[test]
    fn blank_lines_use_placeholder() {
        assert_eq!(encode_text(""), "_");
        assert_eq!(encode_text("   "), "_");
        assert_eq!(encode_text("\n\t"), "_");
        assert_eq!(encode_text("\u{feff}"), "_");
        assert_eq!(encode_text(" \u{feff}\u{a0} "), "_");
        assert_eq!(encode_text("\u{feff}hi"), "\u{feff}hi");
    }

    #[test]
    fn underscores_are_doubled_before_spaces_become_underscores() {
        assert_eq!(encode_text("a_b"), "a__b");
        assert_eq!(encode_text("a_ b"), "a___b");
        assert_eq!(encode_text("Coding in TS"), "Coding_in_TS");
    }

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(encode_text("why?"), "why~q");
        assert_eq!(encode_text("100%"), "100~p");
        assert_eq!(encode_text("#1"), "~h1");
        assert_eq!(encode_text("a/b\\c"), "a~sb~bc");
        assert_eq!(encode_text("<tag>"), "~ltag~g");
        assert_eq!(encode_text("say \"hi\""), "say_''hi''");
        assert_eq!(encode_text("top\nbottom"), "top~nbottom");
    }

    #[test]
    fn escape_sequences_are_not_re_escaped() {
        assert_eq!(encode_text("~q"), "~q");
        assert_eq!(encode_text("?%"), "~q~p");
    }

    #[test]
    fn encoded_text_contains_no_reserved_characters() {
        let samples = [
            "What if I told you?",
            "100% <real> #memes",
            "path/to\\file",
            "\"quoted\"\nnext line",
            "snake_case and spaces",
        ];
        for sample in samples {
            let encoded = encode_text(sample);
            for reserved in [' ', '?', '%', '#', '/', '\\', '<', '>', '"', '\n'] {
                assert!(
                    !encoded.contains(reserved),
                    "{sample:?} encoded to {encoded:?} still contains {reserved:?}"
                );
            }
            assert_eq!(encoded, encode_text(sample));
        }
    }

    #[test]
    fn builds_top_and_bottom_url() {
        let url = UrlBuilder::default().build(&request("drake", &["Coding in TS", "Coding in C"]));
        assert_eq!(
            url,
            "https://api.memegen.link/images/drake/Coding_in_TS/Coding_in_C.png"
        );
    }

    #[test]
    fn omits_text_path_without_lines() {
        let url = UrlBuilder::default().build(&request("fry", &[]));
        assert_eq!(url, "https://api.memegen.link/images/fry.png");
    }

    #[test]
    fn appends_style_then_font_query() {
        let builder = UrlBuilder::new("http://localhost:5000/");
        let mut meme = request("ds", &["", "two words"]);
        meme.extension = ImageExtension::Webp;
        meme.font = Some("comic sans".into());
        meme.style = Some("maga&more".into());

        assert_eq!(
            builder.build(&meme),
            "http://localhost:5000/images/ds/_/two_words.webp?style=maga%26more&font=comic+sans"
        );

        meme.style = Some(String::new());
        assert_eq!(
            builder.build(&meme),
            "http://localhost:5000/images/ds/_/two_words.webp?font=comic+sans"
        );
    }

    #[test]
    fn extension_parses_and_displays() {
        assert_eq!("gif".parse::<ImageExtension>().ok(), Some(ImageExtension::Gif));
        assert!("bmp".parse::<ImageExtension>().is_err());
        assert_eq!(ImageExtension::default().to_string(), "png");
    }
}
