//! Loosely-typed XML tree with single-vs-repeated normalization.
//!
//! ONIX repeatable elements arrive as one node when they occur once and as a
//! list when they repeat. The tree stores both shapes and [`Value::seq`]
//! resolves the ambiguity at one boundary: an absent name yields an empty
//! slice, a single occurrence a one-element slice, repeats every occurrence
//! in document order.

use indexmap::map::Entry;
use indexmap::IndexMap;
use quick_xml::events::Event;
use quick_xml::Reader;

/// A parsed node. A text-only leaf collapses to `Text` — an empty element
/// stays present as empty text, so codes carried in empty leaves are not
/// silently dropped. Anything with attributes or child elements is an
/// `Element`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Element(Element),
}

impl Value {
    /// Text content: the leaf text itself, or an element's direct character
    /// data.
    pub fn text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            Value::Element(e) => e.text(),
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Value::Element(e) => Some(e),
            Value::Text(_) => None,
        }
    }

    /// First occurrence of a named child. Absence at any level of a chained
    /// path stays `None`, never a panic; leaves have no children.
    pub fn child(&self, name: &str) -> Option<&Value> {
        self.as_element().and_then(|e| e.child(name))
    }

    /// Every occurrence of a named child; leaves yield an empty slice.
    pub fn seq(&self, name: &str) -> &[Value] {
        match self {
            Value::Element(e) => e.seq(name),
            Value::Text(_) => &[],
        }
    }
}

/// An element: attributes, named children in document order, and any
/// character data mixed between child elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    attrs: IndexMap<String, String>,
    children: IndexMap<String, Slot>,
    text: Option<String>,
}

/// A name seen once holds a single node; a name seen repeatedly holds all
/// occurrences.
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    One(Value),
    Many(Vec<Value>),
}

impl Element {
    /// First occurrence of a named child.
    pub fn child(&self, name: &str) -> Option<&Value> {
        match self.children.get(name)? {
            Slot::One(v) => Some(v),
            Slot::Many(vs) => vs.first(),
        }
    }

    /// Every occurrence of a named child, in document order. Total: an
    /// absent name yields an empty slice.
    pub fn seq(&self, name: &str) -> &[Value] {
        match self.children.get(name) {
            None => &[],
            Some(Slot::One(v)) => std::slice::from_ref(v),
            Some(Slot::Many(vs)) => vs.as_slice(),
        }
    }

    /// Attribute value, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Character data carried directly by this element.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn insert(&mut self, name: String, value: Value) {
        match self.children.entry(name) {
            Entry::Vacant(e) => {
                e.insert(Slot::One(value));
            }
            Entry::Occupied(mut e) => {
                let slot = e.get_mut();
                if let Slot::Many(vs) = slot {
                    vs.push(value);
                } else if let Slot::One(first) = std::mem::replace(slot, Slot::Many(Vec::new())) {
                    *slot = Slot::Many(vec![first, value]);
                }
            }
        }
    }

    fn append_text(&mut self, text: &str) {
        match &mut self.text {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(text);
            }
            None => self.text = Some(text.to_owned()),
        }
    }
}

/// Parse a whole XML document into a synthetic root element whose children
/// are the document's top-level elements.
pub fn parse_document(xml: &str) -> Result<Element, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut root = Element::default();
    let mut stack: Vec<(String, Element)> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                let mut element = Element::default();
                for attr in e.attributes() {
                    let attr = attr?;
                    let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
                    element.attrs.insert(key, attr.unescape_value()?.into_owned());
                }
                stack.push((name, element));
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                let mut element = Element::default();
                for attr in e.attributes() {
                    let attr = attr?;
                    let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
                    element.attrs.insert(key, attr.unescape_value()?.into_owned());
                }
                attach(&mut root, &mut stack, name, finish(element));
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                if text.is_empty() {
                    continue;
                }
                if let Some((_, parent)) = stack.last_mut() {
                    parent.append_text(&text);
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                if let Some((_, parent)) = stack.last_mut() {
                    parent.append_text(&text);
                }
            }
            Event::End(_) => {
                if let Some((name, element)) = stack.pop() {
                    attach(&mut root, &mut stack, name, finish(element));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some((name, _)) = stack.pop() {
        return Err(quick_xml::Error::IllFormed(
            quick_xml::errors::IllFormedError::MissingEndTag(name),
        ));
    }

    Ok(root)
}

/// A completed element with no attributes and no children collapses to its
/// text, keeping empty leaves present as empty text.
fn finish(element: Element) -> Value {
    if element.attrs.is_empty() && element.children.is_empty() {
        Value::Text(element.text.unwrap_or_default())
    } else {
        Value::Element(element)
    }
}

fn attach(root: &mut Element, stack: &mut [(String, Element)], name: String, value: Value) {
    match stack.last_mut() {
        Some((_, parent)) => parent.insert(name, value),
        None => root.insert(name, value),
    }
}
