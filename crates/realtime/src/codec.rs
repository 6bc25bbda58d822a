//! Codec preference selection.
//!
//! The preferred codec is fixed for the lifetime of one browser
//! session: it is read once from the page URL's `codec` query
//! parameter and never renegotiated mid-call. Narrow-band codecs
//! (`pcmu`, `pcma`) exist to simulate how the voice agent sounds over
//! a PSTN/SIP phone call.

use serde::{Deserialize, Serialize};
use url::Url;

/// Audio codec requested for the peer connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Wide-band default.
    Opus,
    /// G.711 u-law, 8 kHz.
    Pcmu,
    /// G.711 a-law, 8 kHz.
    Pcma,
}

/// Audio sample format for the realtime session, derived from the codec.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    Pcm16,
    #[serde(rename = "g711_ulaw")]
    G711Ulaw,
    #[serde(rename = "g711_alaw")]
    G711Alaw,
}

impl Codec {
    /// Parses a codec name as it appears in the query parameter.
    /// Unrecognized names fall back to the wide-band default.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "pcmu" => Codec::Pcmu,
            "pcma" => Codec::Pcma,
            _ => Codec::Opus,
        }
    }

    /// Reads the `codec` query parameter from a page URL. A missing
    /// parameter or an unparseable URL yields the default.
    pub fn from_page_url(page_url: &str) -> Self {
        let Ok(url) = Url::parse(page_url) else {
            return Codec::Opus;
        };
        url.query_pairs()
            .find(|(k, _)| k == "codec")
            .map(|(_, v)| Codec::parse(&v))
            .unwrap_or(Codec::Opus)
    }

    /// The SDP-level codec name used when reordering peer-connection
    /// codec preferences before the offer/answer exchange.
    pub fn name(&self) -> &'static str {
        match self {
            Codec::Opus => "opus",
            Codec::Pcmu => "pcmu",
            Codec::Pcma => "pcma",
        }
    }

    /// Sample format the realtime session must use for this codec,
    /// applied identically to input and output audio.
    pub fn audio_format(&self) -> AudioFormat {
        match self {
            Codec::Opus => AudioFormat::Pcm16,
            Codec::Pcmu => AudioFormat::G711Ulaw,
            Codec::Pcma => AudioFormat::G711Alaw,
        }
    }
}

impl Default for Codec {
    fn default() -> Self {
        Codec::Opus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_wide_band() {
        assert_eq!(Codec::default(), Codec::Opus);
        assert_eq!(Codec::Opus.audio_format(), AudioFormat::Pcm16);
    }

    #[test]
    fn test_query_parameter_selects_narrow_band() {
        let codec = Codec::from_page_url("https://demo.local/app?codec=pcmu");
        assert_eq!(codec, Codec::Pcmu);
        assert_eq!(codec.audio_format(), AudioFormat::G711Ulaw);
    }

    #[test]
    fn test_no_query_parameter_yields_default() {
        assert_eq!(Codec::from_page_url("https://demo.local/app"), Codec::Opus);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Codec::parse("PCMA"), Codec::Pcma);
        assert_eq!(Codec::parse("Opus"), Codec::Opus);
    }

    #[test]
    fn test_unknown_codec_falls_back_to_default() {
        assert_eq!(Codec::parse("g722"), Codec::Opus);
        assert_eq!(
            Codec::from_page_url("https://demo.local/app?codec=g722"),
            Codec::Opus
        );
    }

    #[test]
    fn test_unparseable_url_yields_default() {
        assert_eq!(Codec::from_page_url("not a url"), Codec::Opus);
    }

    #[test]
    fn test_audio_format_wire_names() {
        assert_eq!(
            serde_json::to_string(&AudioFormat::Pcm16).unwrap(),
            "\"pcm16\""
        );
        assert_eq!(
            serde_json::to_string(&AudioFormat::G711Ulaw).unwrap(),
            "\"g711_ulaw\""
        );
        assert_eq!(
            serde_json::to_string(&AudioFormat::G711Alaw).unwrap(),
            "\"g711_alaw\""
        );
    }
}
