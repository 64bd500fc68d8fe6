//! HTML stripping for ONIX description fields.
//!
//! Summary payloads may carry markup paragraphs. Stripping is a collaborator
//! interface so hosts can substitute their own renderer; the default walks
//! well-formed fragments as XML and falls back to tag removal with entity
//! decoding when the fragment is not well-formed.

use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Renders an HTML-ish fragment as plain text.
pub trait HtmlStrip {
    fn strip(&self, fragment: &str) -> String;
}

/// Default stripper.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupStripper;

impl HtmlStrip for MarkupStripper {
    fn strip(&self, fragment: &str) -> String {
        match strip_events(fragment) {
            Some(text) => text,
            None => strip_fallback(fragment),
        }
    }
}

/// Collect character data from a well-formed fragment. `None` means the
/// fragment did not parse and the caller should fall back.
fn strip_events(fragment: &str) -> Option<String> {
    let mut reader = Reader::from_str(fragment);
    let mut out = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Text(e)) => out.push_str(&e.unescape().ok()?),
            Ok(Event::CData(e)) => out.push_str(&String::from_utf8_lossy(&e)),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    Some(out.trim().to_owned())
}

fn strip_fallback(fragment: &str) -> String {
    let text = TAG.replace_all(fragment, "");
    decode_entities(&text).trim().to_owned()
}

// `&amp;` last, so `&amp;lt;` decodes to the literal `&lt;`.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
