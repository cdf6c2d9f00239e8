use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use listing_logging::harvest_debug;
use scraper::Html;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("page is not decodable as {encoding}")]
    Undecodable { encoding: String },
}

/// Page text after charset handling, plus the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPage {
    pub text: String,
    pub encoding_label: String,
}

/// Decodes and parses a fetched page into a document tree.
///
/// HTML parsing never fails: malformed markup yields a partial tree. Only
/// bytes that no candidate encoding can decode are rejected.
pub fn parse_page(bytes: &[u8], content_type: Option<&str>) -> Result<Html, ParseError> {
    let decoded = decode_page(bytes, content_type)?;
    Ok(Html::parse_document(&decoded.text))
}

/// Decode order: BOM, then the Content-Type charset, then byte sniffing.
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> Result<DecodedPage, ParseError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(charset_of) {
        if let Some(declared) = Encoding::for_label(label.as_bytes()) {
            match decode_with(bytes, declared) {
                Ok(page) => return Ok(page),
                Err(err) => harvest_debug!("{err}; falling back to detection"),
            }
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_of(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim_matches(&[' ', '"', '\''][..]).to_string())
    })
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> Result<DecodedPage, ParseError> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(ParseError::Undecodable {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(DecodedPage {
        text: text.into_owned(),
        encoding_label: encoding.name().to_string(),
    })
}
