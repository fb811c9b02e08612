use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// How far into the document to look for a `<meta charset>` declaration.
const META_SNIFF_LIMIT: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
    /// Malformed sequences were replaced with U+FFFD.
    pub had_replacements: bool,
}

/// Decode raw bytes into UTF-8 using: BOM -> Content-Type charset -> meta charset -> chardetng fallback.
///
/// Never fails: malformed input is decoded lossily and flagged in the result.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> DecodedHtml {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    let declared = content_type
        .and_then(extract_charset)
        .or_else(|| sniff_meta_charset(bytes));
    if let Some(enc) = declared.and_then(|label| Encoding::for_label(label.as_bytes())) {
        return decode_with(bytes, enc);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim_matches([' ', '"', '\''].as_ref()).to_string())
    })
}

/// Finds `charset=...` in the document head, covering both
/// `<meta charset="x">` and the `http-equiv` form.
fn sniff_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LIMIT)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let meta = head.find("<meta")?;
    let rest = &head[meta..];
    rest.match_indices("charset").find_map(|(at, key)| {
        let value = rest[at + key.len()..].trim_start().strip_prefix('=')?;
        let label: String = value
            .trim_start()
            .trim_start_matches(['"', '\''])
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
            .collect();
        (!label.is_empty()).then_some(label)
    })
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> DecodedHtml {
    let (text, actual, had_errors) = enc.decode(bytes);
    DecodedHtml {
        html: text.into_owned(),
        encoding_label: actual.name().to_string(),
        had_replacements: had_errors,
    }
}
