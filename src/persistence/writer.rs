//! XML document writer
//!
//! Emits nodes, then relations, each in store order, with labels and
//! properties in insertion order. Identical stores always produce identical
//! bytes.

use super::{
    CodecConfig, CodecResult, ATTR_ID, ATTR_LEFT_NODE, ATTR_NAME, ATTR_RIGHT_NODE, ATTR_TYPE,
    ATTR_VERSION, ELEM_GRAPH, ELEM_LABEL, ELEM_NODE, ELEM_PROPERTY, ELEM_RELATION, FORMAT_VERSION,
};
use crate::graph::{GraphStore, PropertyMap};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

pub(super) fn write_document<W: Write>(
    store: &GraphStore,
    out: W,
    config: &CodecConfig,
) -> CodecResult<W> {
    let mut writer = match config.indent.as_byte() {
        Some(indent) if config.indent_width > 0 => {
            Writer::new_with_indent(out, indent, config.indent_width)
        }
        _ => Writer::new(out),
    };

    if config.xml_declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    }

    let mut root = BytesStart::new(ELEM_GRAPH);
    root.push_attribute((ATTR_VERSION, FORMAT_VERSION));
    writer.write_event(Event::Start(root))?;

    for node in store.all_nodes() {
        let id = node.id.to_string();
        let mut start = BytesStart::new(ELEM_NODE);
        start.push_attribute((ATTR_ID, id.as_str()));

        if node.labels.is_empty() && node.properties.is_empty() {
            writer.write_event(Event::Empty(start))?;
            continue;
        }

        writer.write_event(Event::Start(start))?;
        for label in &node.labels {
            write_text_element(&mut writer, BytesStart::new(ELEM_LABEL), label.as_str())?;
        }
        write_properties(&mut writer, &node.properties)?;
        writer.write_event(Event::End(BytesEnd::new(ELEM_NODE)))?;
    }

    for relation in store.all_relations() {
        let id = relation.id.to_string();
        let left = relation.source().id.to_string();
        let right = relation.target().id.to_string();
        let mut start = BytesStart::new(ELEM_RELATION);
        start.push_attribute((ATTR_ID, id.as_str()));
        start.push_attribute((ATTR_TYPE, relation.relation_type().as_str()));
        start.push_attribute((ATTR_LEFT_NODE, left.as_str()));
        start.push_attribute((ATTR_RIGHT_NODE, right.as_str()));

        if relation.properties.is_empty() {
            writer.write_event(Event::Empty(start))?;
            continue;
        }

        writer.write_event(Event::Start(start))?;
        write_properties(&mut writer, &relation.properties)?;
        writer.write_event(Event::End(BytesEnd::new(ELEM_RELATION)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ELEM_GRAPH)))?;
    Ok(writer.into_inner())
}

fn write_properties<W: Write>(writer: &mut Writer<W>, properties: &PropertyMap) -> CodecResult<()> {
    for (name, value) in properties {
        let mut start = BytesStart::new(ELEM_PROPERTY);
        start.push_attribute((ATTR_NAME, name.as_str()));
        write_text_element(writer, start, value)?;
    }
    Ok(())
}

/// Empty text is written as an empty element; an indenting writer would
/// otherwise put whitespace between the start and end tags.
fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    start: BytesStart<'_>,
    text: &str,
) -> CodecResult<()> {
    if text.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(end))?;
    Ok(())
}
