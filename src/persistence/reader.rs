//! XML document reader
//!
//! Parses a document into plain records without touching a store. Building
//! the store from the records happens afterwards, so a malformed document
//! never yields a partially populated graph.

use super::{
    CodecError, CodecResult, ATTR_ID, ATTR_LEFT_NODE, ATTR_NAME, ATTR_RIGHT_NODE, ATTR_TYPE,
    ATTR_VERSION, ELEM_GRAPH, ELEM_LABEL, ELEM_NODE, ELEM_PROPERTY, ELEM_RELATION,
};
use crate::graph::{EntityId, PropertyMap};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use tracing::warn;

#[derive(Debug, Default)]
pub(super) struct Document {
    pub version: String,
    pub nodes: Vec<NodeRecord>,
    pub relations: Vec<RelationRecord>,
}

#[derive(Debug)]
pub(super) struct NodeRecord {
    pub id: EntityId,
    pub labels: Vec<String>,
    pub properties: PropertyMap,
}

#[derive(Debug)]
pub(super) struct RelationRecord {
    pub id: EntityId,
    pub relation_type: String,
    pub source: EntityId,
    pub target: EntityId,
    pub properties: PropertyMap,
}

#[derive(Default)]
struct Children {
    labels: Vec<String>,
    properties: PropertyMap,
}

pub(super) fn parse_document(input: &str) -> CodecResult<Document> {
    let mut reader = Reader::from_str(input);

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let mut document = open_root(&e)?;
                parse_graph(&mut reader, &mut document)?;
                return Ok(document);
            }
            Event::Empty(e) => return open_root(&e),
            Event::Eof => return Err(CodecError::MissingRoot),
            _ => {}
        }
    }
}

fn open_root(e: &BytesStart<'_>) -> CodecResult<Document> {
    if e.name().as_ref() != ELEM_GRAPH.as_bytes() {
        return Err(CodecError::UnexpectedRoot(element_name(e)));
    }
    Ok(Document {
        version: required_attr(e, ELEM_GRAPH, ATTR_VERSION)?,
        ..Document::default()
    })
}

fn parse_graph(reader: &mut Reader<&[u8]>, document: &mut Document) -> CodecResult<()> {
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"Node" => {
                    let id = required_id(&e, ELEM_NODE, ATTR_ID)?;
                    let children = parse_children(reader, ELEM_NODE, true)?;
                    document.nodes.push(NodeRecord {
                        id,
                        labels: children.labels,
                        properties: children.properties,
                    });
                }
                b"Relation" => {
                    let mut record = relation_header(&e)?;
                    record.properties = parse_children(reader, ELEM_RELATION, false)?.properties;
                    document.relations.push(record);
                }
                _ => skip_element(reader, &e)?,
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"Node" => document.nodes.push(NodeRecord {
                    id: required_id(&e, ELEM_NODE, ATTR_ID)?,
                    labels: Vec::new(),
                    properties: PropertyMap::new(),
                }),
                b"Relation" => document.relations.push(relation_header(&e)?),
                _ => warn!(element = %element_name(&e), "ignoring unknown element"),
            },
            Event::End(_) => return Ok(()),
            Event::Eof => return Err(CodecError::UnexpectedEof(ELEM_GRAPH)),
            _ => {}
        }
    }
}

fn relation_header(e: &BytesStart<'_>) -> CodecResult<RelationRecord> {
    Ok(RelationRecord {
        id: required_id(e, ELEM_RELATION, ATTR_ID)?,
        relation_type: required_attr(e, ELEM_RELATION, ATTR_TYPE)?,
        source: required_id(e, ELEM_RELATION, ATTR_LEFT_NODE)?,
        target: required_id(e, ELEM_RELATION, ATTR_RIGHT_NODE)?,
        properties: PropertyMap::new(),
    })
}

/// Read the label and property children of a record up to its end tag
fn parse_children(
    reader: &mut Reader<&[u8]>,
    parent: &'static str,
    accept_labels: bool,
) -> CodecResult<Children> {
    let mut children = Children::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"Label" if accept_labels => {
                    children.labels.push(read_text(reader, ELEM_LABEL)?);
                }
                b"Property" => {
                    let name = required_attr(&e, ELEM_PROPERTY, ATTR_NAME)?;
                    let value = read_text(reader, ELEM_PROPERTY)?;
                    insert_property(&mut children.properties, name, value)?;
                }
                _ => skip_element(reader, &e)?,
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"Label" if accept_labels => children.labels.push(String::new()),
                b"Property" => {
                    let name = required_attr(&e, ELEM_PROPERTY, ATTR_NAME)?;
                    insert_property(&mut children.properties, name, String::new())?;
                }
                _ => warn!(element = %element_name(&e), parent, "ignoring unknown element"),
            },
            Event::End(_) => return Ok(children),
            Event::Eof => return Err(CodecError::UnexpectedEof(parent)),
            _ => {}
        }
    }
}

fn insert_property(properties: &mut PropertyMap, name: String, value: String) -> CodecResult<()> {
    if properties.contains_key(&name) {
        return Err(CodecError::DuplicateProperty(name));
    }
    properties.insert(name, value);
    Ok(())
}

/// Collect the text content of a leaf element up to its end tag
fn read_text(reader: &mut Reader<&[u8]>, element: &'static str) -> CodecResult<String> {
    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => {
                let raw = std::str::from_utf8(&e)
                    .map_err(|err| CodecError::Malformed(format!("<{}>: {}", element, err)))?;
                text.push_str(raw);
            }
            Event::End(_) => return Ok(text),
            Event::Start(_) | Event::Empty(_) => {
                return Err(CodecError::Malformed(format!(
                    "<{}> must contain only text",
                    element
                )))
            }
            Event::Eof => return Err(CodecError::UnexpectedEof(element)),
            _ => {}
        }
    }
}

fn skip_element(reader: &mut Reader<&[u8]>, e: &BytesStart<'_>) -> CodecResult<()> {
    let name = e.name().as_ref().to_vec();
    warn!(element = %element_name(e), "ignoring unknown element");
    reader.read_to_end(QName(&name))?;
    Ok(())
}

fn required_attr(
    e: &BytesStart<'_>,
    element: &'static str,
    attribute: &'static str,
) -> CodecResult<String> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == attribute.as_bytes() {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Err(CodecError::MissingAttribute { element, attribute })
}

fn required_id(
    e: &BytesStart<'_>,
    element: &'static str,
    attribute: &'static str,
) -> CodecResult<EntityId> {
    let value = required_attr(e, element, attribute)?;
    EntityId::parse_str(&value).map_err(|source| CodecError::InvalidId { value, source })
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records() {
        let input = r#"<?xml version="1.0" encoding="utf-8"?>
<Graph Version="1.0.0">
	<Node Id="00000000-0000-0000-0000-000000000001">
		<Label>Person</Label>
		<Property Name="Name">Bob</Property>
	</Node>
	<Node Id="00000000-0000-0000-0000-000000000002"/>
	<Relation Id="00000000-0000-0000-0000-000000000003" Type="test" LeftNode="00000000-0000-0000-0000-000000000001" RightNode="00000000-0000-0000-0000-000000000002">
		<Property Name="since">2020</Property>
	</Relation>
</Graph>"#;

        let doc = parse_document(input).unwrap();
        assert_eq!(doc.version, "1.0.0");
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.nodes[0].labels, vec!["Person"]);
        assert_eq!(doc.nodes[0].properties.get("Name").map(String::as_str), Some("Bob"));
        assert!(doc.nodes[1].labels.is_empty());
        assert_eq!(doc.relations.len(), 1);
        assert_eq!(doc.relations[0].relation_type, "test");
        assert_eq!(doc.relations[0].source, doc.nodes[0].id);
        assert_eq!(doc.relations[0].target, doc.nodes[1].id);
        assert_eq!(
            doc.relations[0].properties.get("since").map(String::as_str),
            Some("2020")
        );
    }

    #[test]
    fn test_text_is_unescaped_and_not_trimmed() {
        let input = r#"<Graph Version="1.0.0"><Node Id="00000000-0000-0000-0000-000000000001"><Property Name="a&amp;b"> x &lt; y </Property><Label/></Node></Graph>"#;

        let doc = parse_document(input).unwrap();
        let node = &doc.nodes[0];
        assert_eq!(node.properties.get("a&b").map(String::as_str), Some(" x < y "));
        assert_eq!(node.labels, vec![""]);
    }

    #[test]
    fn test_unknown_elements_are_skipped() {
        let input = r#"<Graph Version="1.0.0"><Meta><Deep>stuff</Deep></Meta><Node Id="00000000-0000-0000-0000-000000000001"><Extra/><Label>A</Label></Node></Graph>"#;

        let doc = parse_document(input).unwrap();
        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.nodes[0].labels, vec!["A"]);
    }

    #[test]
    fn test_missing_attribute() {
        let input = r#"<Graph Version="1.0.0"><Relation Id="00000000-0000-0000-0000-000000000001" Type="t" LeftNode="00000000-0000-0000-0000-000000000001"/></Graph>"#;

        match parse_document(input) {
            Err(CodecError::MissingAttribute { element, attribute }) => {
                assert_eq!(element, "Relation");
                assert_eq!(attribute, "RightNode");
            }
            other => panic!("expected missing attribute, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_property_is_rejected() {
        let input = r#"<Graph Version="1.0.0"><Node Id="00000000-0000-0000-0000-000000000001"><Property Name="k">1</Property><Property Name="k">2</Property></Node></Graph>"#;

        assert!(matches!(
            parse_document(input),
            Err(CodecError::DuplicateProperty(name)) if name == "k"
        ));
    }

    #[test]
    fn test_wrong_root_and_empty_input() {
        assert!(matches!(
            parse_document("<Tree Version=\"1.0.0\"/>"),
            Err(CodecError::UnexpectedRoot(name)) if name == "Tree"
        ));
        assert!(matches!(parse_document(""), Err(CodecError::MissingRoot)));
    }

    #[test]
    fn test_truncated_document() {
        let input = r#"<Graph Version="1.0.0"><Node Id="00000000-0000-0000-0000-000000000001"><Label>A</Label>"#;
        assert!(matches!(
            parse_document(input),
            Err(CodecError::UnexpectedEof(_)) | Err(CodecError::Xml(_))
        ));
    }
}
