//! XML documents as they move through the stage.
//!
//! The stage never needs a DOM: `add` forwards the input bytes to the
//! store unchanged, `clear` ignores the input, and `graph-query` only
//! reads the flat text content of the document. Documents are kept as
//! serialized bytes, checked for well-formedness on the way in.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// An owned, well-formed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    bytes: Vec<u8>,
}

impl XmlDocument {
    /// Takes ownership of `bytes`, checking that they are well-formed
    /// XML.
    pub fn parse(bytes: Vec<u8>) -> Result<Self, quick_xml::Error> {
        let mut reader = Reader::from_reader(bytes.as_slice());
        let mut buf = Vec::new();
        loop {
            if matches!(reader.read_event_into(&mut buf)?, Event::Eof) {
                break;
            }
            buf.clear();
        }
        Ok(Self { bytes })
    }

    pub fn from_str(text: &str) -> Result<Self, quick_xml::Error> {
        Self::parse(text.as_bytes().to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Concatenated text content of the document, markup stripped and
    /// entities unescaped. This is how a `graph-query` document
    /// carries its SPARQL text: flat text under the root element, with
    /// no structure expected.
    pub fn root_text(&self) -> Result<String, quick_xml::Error> {
        let mut reader = Reader::from_reader(self.bytes.as_slice());
        let mut buf = Vec::new();
        let mut text = String::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Text(e) => text.push_str(&e.unescape()?),
                Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e.into_inner())),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(text)
    }
}

/// The `<response><success/></response>` document answered by `add`
/// and `clear`.
pub fn success_response() -> XmlDocument {
    XmlDocument {
        bytes: format!("{XML_DECL}<response><success/></response>").into_bytes(),
    }
}

/// The `<response><error>message</error></response>` document answered
/// for every non-fatal failure.
pub fn error_response(message: &str) -> XmlDocument {
    let escaped = escape(message);
    XmlDocument {
        bytes: format!("{XML_DECL}<response><error>{escaped}</error></response>").into_bytes(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_well_formed_xml() {
        assert!(XmlDocument::from_str("<a><b>text</b></a>").is_ok());
    }

    #[test]
    fn test_parse_rejects_malformed_xml() {
        assert!(XmlDocument::from_str("<a><b></a>").is_err());
        assert!(XmlDocument::from_str("<broken").is_err());
    }

    #[test]
    fn test_root_text_flattens_markup() {
        let doc = XmlDocument::from_str("<query>CONSTRUCT { ?s ?p ?o }<nested> WHERE</nested> { ?s ?p ?o }</query>")
            .unwrap();
        assert_eq!(
            doc.root_text().unwrap(),
            "CONSTRUCT { ?s ?p ?o } WHERE { ?s ?p ?o }"
        );
    }

    #[test]
    fn test_root_text_unescapes_entities_and_cdata() {
        let doc =
            XmlDocument::from_str("<q>a &lt; b<![CDATA[ && c > d]]></q>").unwrap();
        assert_eq!(doc.root_text().unwrap(), "a < b && c > d");
    }

    #[test]
    fn test_success_response_shape() {
        let doc = success_response();
        assert_eq!(
            String::from_utf8(doc.into_bytes()).unwrap(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><response><success/></response>"
        );
    }

    #[test]
    fn test_error_response_escapes_the_message() {
        let doc = error_response("status <500> & more");
        let text = String::from_utf8(doc.into_bytes()).unwrap();
        assert_eq!(
            text,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <response><error>status &lt;500&gt; &amp; more</error></response>"
        );
    }

    #[test]
    fn test_responses_are_well_formed() {
        assert!(XmlDocument::parse(success_response().into_bytes()).is_ok());
        assert!(XmlDocument::parse(error_response("boom").into_bytes()).is_ok());
    }
}
