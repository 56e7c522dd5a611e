//! Report tree serialization
//!
//! Pretty-prints with two-space indentation. Empty elements keep an explicit
//! closing tag and every CDATA payload sits on its own line.

use std::borrow::Cow;

use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::Writer;

use super::error::ReportError;
use super::tree::{XmlElement, XmlNode};

const INDENT: &str = "  ";

/// Serialize a report tree into an XML document
pub fn to_xml(root: &XmlElement) -> Result<String, ReportError> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root, 0)?;
    writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &XmlElement,
    depth: usize,
) -> Result<(), ReportError> {
    newline(writer, depth)?;

    let mut start = BytesStart::new(element.name());
    for (key, value) in element.attributes() {
        start.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Owned(escape_attr(value).into_bytes()),
        });
    }
    writer.write_event(Event::Start(start))?;

    if element.children().is_empty() {
        writer.write_event(Event::End(BytesEnd::new(element.name())))?;
        return Ok(());
    }

    for child in element.children() {
        match child {
            XmlNode::Element(child) => write_element(writer, child, depth + 1)?,
            XmlNode::CData(text) => {
                newline(writer, depth + 1)?;
                write_cdata(writer, text)?;
            }
        }
    }

    newline(writer, depth)?;
    writer.write_event(Event::End(BytesEnd::new(element.name())))?;
    Ok(())
}

/// Escape an attribute value. Whitespace other than plain spaces becomes a
/// character reference so parsers do not normalize it away.
fn escape_attr(value: &str) -> String {
    escape(value)
        .replace('\n', "&#xA;")
        .replace('\r', "&#xD;")
        .replace('\t', "&#x9;")
}

/// Write `text` as CDATA, splitting it into adjacent sections wherever it
/// contains the `]]>` terminator.
fn write_cdata(writer: &mut Writer<Vec<u8>>, text: &str) -> Result<(), ReportError> {
    let mut rest = text;
    while let Some(pos) = rest.find("]]>") {
        let (head, tail) = rest.split_at(pos + 2);
        writer.write_event(Event::CData(BytesCData::new(head)))?;
        rest = tail;
    }
    writer.write_event(Event::CData(BytesCData::new(rest)))?;
    Ok(())
}

fn newline(writer: &mut Writer<Vec<u8>>, depth: usize) -> Result<(), ReportError> {
    let ws = format!("\n{}", INDENT.repeat(depth));
    writer.write_event(Event::Text(BytesText::from_escaped(ws)))?;
    Ok(())
}
