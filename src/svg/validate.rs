//! Conformance check of finished documents against an SVG 1.1 grammar.
//!
//! The grammar lives in `data/svg11.toml` and covers element names, allowed
//! and required attributes, content models, character data, and id
//! uniqueness. Validation stops at the first violation.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use super::{SVG_NS, XLINK_NS, XML_NS};
use crate::error::{RenderError, Result};

const SVG11_GRAMMAR: &str = include_str!("../../data/svg11.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct ElementRule {
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub required: Vec<String>,
    pub content: String,
    #[serde(default)]
    pub presentation: bool,
    #[serde(default)]
    pub text: bool,
}

/// Element and attribute grammar.
#[derive(Debug, Clone, Deserialize)]
pub struct Grammar {
    pub core_attributes: Vec<String>,
    pub presentation_attributes: Vec<String>,
    pub content_models: BTreeMap<String, Vec<String>>,
    pub elements: BTreeMap<String, ElementRule>,
}

impl Grammar {
    /// The bundled SVG 1.1 grammar.
    pub fn svg11() -> Result<Self> {
        Self::from_toml(SVG11_GRAMMAR)
    }

    pub fn from_toml(source: &str) -> Result<Self> {
        let grammar: Grammar = toml::from_str(source)
            .map_err(|e| RenderError::validation(format!("invalid grammar: {}", e)))?;

        for (name, rule) in &grammar.elements {
            if !grammar.content_models.contains_key(&rule.content) {
                return Err(RenderError::validation(format!(
                    "invalid grammar: element \"{}\" uses unknown content model \"{}\"",
                    name, rule.content
                )));
            }
        }

        Ok(grammar)
    }

    fn allows_attribute(&self, rule: &ElementRule, name: &str) -> bool {
        let name = name.to_string();
        self.core_attributes.contains(&name)
            || (rule.presentation && self.presentation_attributes.contains(&name))
            || rule.attributes.contains(&name)
    }

    fn allows_child(&self, rule: &ElementRule, child: &str) -> bool {
        self.content_models
            .get(&rule.content)
            .is_some_and(|model| model.iter().any(|allowed| allowed == child))
    }

    /// Check `document` and report the first violation.
    pub fn validate(&self, document: &str) -> Result<()> {
        let mut options = roxmltree::ParsingOptions::default();
        options.allow_dtd = true;
        let doc = roxmltree::Document::parse_with_options(document, options)
            .map_err(|e| RenderError::validation(format!("malformed document: {}", e)))?;

        let root = doc.root_element();
        if root.tag_name().name() != "svg" || root.tag_name().namespace() != Some(SVG_NS) {
            return Err(RenderError::validation(format!(
                "root element must be <svg> in the {} namespace",
                SVG_NS
            )));
        }

        let mut checker = Checker {
            grammar: self,
            doc: &doc,
            ids: HashSet::new(),
            references: Vec::new(),
        };
        checker.check(root)?;
        checker.check_references()
    }
}

struct Checker<'g, 'd, 'input> {
    grammar: &'g Grammar,
    doc: &'d roxmltree::Document<'input>,
    ids: HashSet<String>,
    references: Vec<(String, roxmltree::Node<'d, 'input>)>,
}

impl<'d, 'input> Checker<'_, 'd, 'input> {
    fn error(&self, node: roxmltree::Node<'_, '_>, msg: String) -> RenderError {
        let pos = self.doc.text_pos_at(node.range().start);
        RenderError::validation(format!("line {}: {}", pos.row, msg))
    }

    fn check(&mut self, node: roxmltree::Node<'d, 'input>) -> Result<()> {
        let name = node.tag_name().name();
        if node.tag_name().namespace() != Some(SVG_NS) {
            return Err(self.error(
                node,
                format!("element <{}> is not in the SVG namespace", name),
            ));
        }

        let grammar = self.grammar;
        let rule = grammar
            .elements
            .get(name)
            .ok_or_else(|| self.error(node, format!("element <{}> is not declared", name)))?;

        for attr in node.attributes() {
            let qualified = match attr.namespace() {
                None => attr.name().to_string(),
                Some(XLINK_NS) => format!("xlink:{}", attr.name()),
                Some(XML_NS) => format!("xml:{}", attr.name()),
                Some(other) => {
                    return Err(self.error(
                        node,
                        format!(
                            "attribute \"{}\" of <{}> is in foreign namespace {}",
                            attr.name(),
                            name,
                            other
                        ),
                    ))
                }
            };

            if !grammar.allows_attribute(rule, &qualified) {
                return Err(self.error(
                    node,
                    format!("attribute \"{}\" is not allowed on <{}>", qualified, name),
                ));
            }

            if qualified == "id" && !self.ids.insert(attr.value().to_string()) {
                return Err(self.error(
                    node,
                    format!("duplicate id \"{}\"", attr.value()),
                ));
            }

            if qualified == "xlink:href" {
                if let Some(target) = attr.value().strip_prefix('#') {
                    self.references.push((target.to_string(), node));
                }
            }
        }

        for required in &rule.required {
            let present = node.attributes().any(|attr| {
                let qualified = match attr.namespace() {
                    Some(XLINK_NS) => format!("xlink:{}", attr.name()),
                    _ => attr.name().to_string(),
                };
                &qualified == required
            });
            if !present {
                return Err(self.error(
                    node,
                    format!("<{}> requires attribute \"{}\"", name, required),
                ));
            }
        }

        for child in node.children() {
            if child.is_element() {
                let child_name = child.tag_name().name();
                // Undeclared children are reported by the recursive check
                let declared = grammar.elements.contains_key(child_name);
                if declared && !grammar.allows_child(rule, child_name) {
                    return Err(self.error(
                        child,
                        format!("element <{}> is not allowed inside <{}>", child_name, name),
                    ));
                }
                self.check(child)?;
            } else if child.is_text() {
                let has_content = child.text().is_some_and(|t| !t.trim().is_empty());
                if has_content && !rule.text {
                    return Err(self.error(
                        child,
                        format!("character data is not allowed inside <{}>", name),
                    ));
                }
            }
        }

        Ok(())
    }

    fn check_references(&self) -> Result<()> {
        for (target, node) in &self.references {
            if !self.ids.contains(target) {
                return Err(self.error(
                    *node,
                    format!("reference to undefined id \"{}\"", target),
                ));
            }
        }
        Ok(())
    }
}

/// Validate `document` against the bundled SVG 1.1 grammar.
pub fn validate_svg(document: &str) -> Result<()> {
    Grammar::svg11()?.validate(document)
}
