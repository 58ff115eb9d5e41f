//! Conversion from `roxmltree` documents into the markup tree.

use super::{Element, Node, CASTSVG_NS, SVG_NS, XLINK_NS, XML_NS};
use crate::error::{RenderError, Result};

/// Parse a document into an owned [`Element`] tree.
///
/// Known namespaces are mapped to canonical prefixes (none for SVG, `xlink`,
/// `xml` and `castsvg`) whatever prefix the source used. Comments and
/// processing instructions are dropped.
pub fn parse_document(text: &str) -> Result<Element> {
    let doc = roxmltree::Document::parse(text)
        .map_err(|e| RenderError::template(format!("invalid template: {}", e)))?;
    Ok(convert(doc.root_element(), None))
}

fn canonical_prefix<'a>(node: roxmltree::Node<'a, '_>, uri: &'a str) -> Option<&'a str> {
    match uri {
        SVG_NS => None,
        XLINK_NS => Some("xlink"),
        XML_NS => Some("xml"),
        CASTSVG_NS => Some("castsvg"),
        other => node.lookup_prefix(other),
    }
}

fn qualified(prefix: Option<&str>, local: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, local),
        None => local.to_string(),
    }
}

fn convert(node: roxmltree::Node<'_, '_>, parent: Option<roxmltree::Node<'_, '_>>) -> Element {
    let tag = node.tag_name();
    let prefix = tag.namespace().and_then(|uri| canonical_prefix(node, uri));
    let mut element = Element::new(qualified(prefix, tag.name()));

    // Namespace declarations first, only where they enter scope.
    for ns in node.namespaces() {
        let inherited = parent.is_some_and(|p| {
            p.namespaces()
                .any(|pns| pns.name() == ns.name() && pns.uri() == ns.uri())
        });
        if inherited || ns.uri() == XML_NS {
            continue;
        }
        match ns.name() {
            None => element.set_attr("xmlns", ns.uri()),
            Some(_) => {
                let name = canonical_prefix(node, ns.uri()).or(ns.name());
                element.set_attr(qualified(Some("xmlns"), name.unwrap_or_default()), ns.uri());
            }
        }
    }

    for attr in node.attributes() {
        let prefix = attr.namespace().and_then(|uri| canonical_prefix(node, uri));
        element.set_attr(qualified(prefix, attr.name()), attr.value());
    }

    for child in node.children() {
        if child.is_element() {
            element.push(Node::Element(convert(child, Some(node))));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                element.push(Node::Text(text.to_string()));
            }
        }
    }

    element
}
