//! Download naming helpers
//!
//! Servers are inconsistent about `Content-Disposition`: the filename
//! parameter may be quoted or bare, and sometimes the header is missing
//! entirely. These helpers extract what is there and sanitize the
//! metadata-derived fallback used when it is not.

use std::fmt;

/// Audio formats the content service can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioFormat {
    #[default]
    Mp3,
    Wav,
    Flac,
}

impl AudioFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Flac => "flac",
        }
    }

    /// MIME type of the payload.
    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Flac => "audio/flac",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Extract the filename parameter from a `Content-Disposition` value.
///
/// Supports both the quoted form (`filename="a b.mp3"`) and the bare form
/// (`filename=track.mp3`); surrounding whitespace and stray quotes are
/// stripped from the result.
pub fn content_disposition_filename(header: &str) -> Option<String> {
    let start = header.find("filename=")? + "filename=".len();
    let rest = &header[start..];

    let raw = if let Some(quoted) = rest.strip_prefix('"') {
        quoted.split('"').next()?
    } else {
        rest.split(';').next()?
    };

    let name = raw.trim().trim_matches(|c| c == '"' || c == '\'');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Replace filesystem-hostile characters with underscores.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_filename() {
        assert_eq!(
            content_disposition_filename(r#"attachment; filename="First Light.mp3""#),
            Some("First Light.mp3".to_string())
        );
    }

    #[test]
    fn test_unquoted_filename() {
        assert_eq!(
            content_disposition_filename("attachment; filename=track.mp3"),
            Some("track.mp3".to_string())
        );
        assert_eq!(
            content_disposition_filename("attachment; filename=track.mp3; size=100"),
            Some("track.mp3".to_string())
        );
    }

    #[test]
    fn test_missing_filename() {
        assert_eq!(content_disposition_filename("attachment"), None);
        assert_eq!(content_disposition_filename("inline; filename="), None);
    }

    #[test]
    fn test_stray_quotes_and_whitespace_are_stripped() {
        assert_eq!(
            content_disposition_filename("attachment; filename= 'demo.flac' "),
            Some("demo.flac".to_string())
        );
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("a/b\\c:d*e?f\"g<h>i|j"), "a_b_c_d_e_f_g_h_i_j");
        assert_eq!(sanitize_filename("Plain Name"), "Plain Name");
    }

    #[test]
    fn test_audio_format_metadata() {
        assert_eq!(AudioFormat::Mp3.mime_type(), "audio/mpeg");
        assert_eq!(AudioFormat::Wav.extension(), "wav");
        assert_eq!(AudioFormat::Flac.to_string(), "flac");
        assert_eq!(AudioFormat::default(), AudioFormat::Mp3);
    }
}
