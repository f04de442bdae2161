// XML → loosely-typed tree
//
// Element names lose their namespace prefix. An element's attributes land
// under "$" and its text under "_", except for plain leaves which become
// bare strings. Repeated sibling elements become an array.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};

use crate::error::Error;

const BODY_PREVIEW: usize = 200;

struct Frame {
    name: String,
    attrs: Map<String, Value>,
    children: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>, xml: &str) -> Result<Self, Error> {
        let mut attrs = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| parse_error(e.to_string(), xml))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|e| parse_error(e.to_string(), xml))?;
            attrs.insert(key, Value::String(value.into_owned()));
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            attrs,
            children: Map::new(),
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        if self.attrs.is_empty() && self.children.is_empty() {
            return (self.name, Value::String(self.text));
        }
        let mut node = Map::new();
        if !self.attrs.is_empty() {
            node.insert("$".into(), Value::Object(self.attrs));
        }
        node.extend(self.children);
        if !self.text.is_empty() {
            node.insert("_".into(), Value::String(self.text));
        }
        (self.name, Value::Object(node))
    }

    fn push_child(&mut self, name: String, value: Value) {
        match self.children.get_mut(&name) {
            Some(Value::Array(siblings)) => siblings.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.children.insert(name, value);
            }
        }
    }
}

pub(crate) fn parse_error(message: impl Into<String>, xml: &str) -> Error {
    Error::Parse {
        message: message.into(),
        body: xml.chars().take(BODY_PREVIEW).collect(),
    }
}

/// Parse an XML document into `(root local name, root value)`.
pub fn parse_document(xml: &str) -> Result<(String, Value), Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    let mut finish = |frame: Frame, stack: &mut Vec<Frame>| -> Result<(), Error> {
        let (name, value) = frame.close();
        match stack.last_mut() {
            Some(parent) => parent.push_child(name, value),
            None if root.is_none() => root = Some((name, value)),
            None => return Err(parse_error("multiple root elements", xml)),
        }
        Ok(())
    };

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(Frame::open(&start, xml)?),
            Ok(Event::Empty(start)) => finish(Frame::open(&start, xml)?, &mut stack)?,
            Ok(Event::End(_)) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| parse_error("unexpected closing tag", xml))?;
                finish(frame, &mut stack)?;
            }
            Ok(Event::Text(text)) => {
                if let Some(frame) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| parse_error(e.to_string(), xml))?;
                    frame.text.push_str(&text);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(parse_error(
                    format!("at byte {}: {e}", reader.error_position()),
                    xml,
                ));
            }
        }
    }

    if !stack.is_empty() {
        return Err(parse_error("unexpected end of document", xml));
    }
    root.ok_or_else(|| parse_error("no root element", xml))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn prefixes_are_stripped() {
        let (root, tree) =
            parse_document(r#"<soapenv:Envelope xmlns:soapenv="urn:x"><soapenv:Body><ns1:a>1</ns1:a></soapenv:Body></soapenv:Envelope>"#)
                .expect("parses");
        assert_eq!(root, "Envelope");
        assert_eq!(tree["Body"], json!({ "a": "1" }));
        assert_eq!(tree["$"], json!({ "xmlns:soapenv": "urn:x" }));
    }

    #[test]
    fn attributes_and_text_are_kept_apart() {
        let (_, tree) =
            parse_document(r#"<r><Name type="xsd:string">SEP1</Name><Empty/><Blank></Blank></r>"#)
                .expect("parses");
        assert_eq!(
            tree,
            json!({
                "Name": { "$": { "type": "xsd:string" }, "_": "SEP1" },
                "Empty": "",
                "Blank": "",
            })
        );
    }

    #[test]
    fn repeated_siblings_become_an_array() {
        let (_, tree) =
            parse_document("<r><item>a</item><item>b</item><item>c</item><one>x</one></r>")
                .expect("parses");
        assert_eq!(tree["item"], json!(["a", "b", "c"]));
        assert_eq!(tree["one"], json!("x"));
    }

    #[test]
    fn entities_are_unescaped() {
        let (_, tree) = parse_document("<r><s>&lt;StateInfo/&gt;</s></r>").expect("parses");
        assert_eq!(tree["s"], json!("<StateInfo/>"));
    }

    #[test]
    fn malformed_documents_are_rejected() {
        for xml in ["", "not xml at all", "<a><b></a>", "<a><b>", "<a/><b/>"] {
            let err = parse_document(xml).expect_err(xml);
            assert!(matches!(err, Error::Parse { .. }), "{xml:?} gave {err:?}");
        }
    }
}
