//! Page source parsing.
//!
//! HTML goes through `tl`; Markdown is rendered to HTML with
//! `pulldown-cmark` first (raw HTML such as `<include>` passes through
//! untouched) and then takes the same path.

use std::borrow::Cow;

use pulldown_cmark::{Options, Parser, html};

use super::{Element, Node};

/// Parse an HTML fragment into nodes.
///
/// Comments and whitespace-only text are dropped, tag names are
/// lower-cased and entities in text and attribute values are decoded.
/// Input that `tl` rejects is kept as a single text node.
pub fn parse_html(source: &str) -> Vec<Node> {
    let Ok(dom) = tl::parse(source, tl::ParserOptions::default()) else {
        return vec![Node::Text(source.to_string())];
    };

    let parser = dom.parser();
    dom.children()
        .iter()
        .filter_map(|handle| convert(*handle, parser))
        .collect()
}

/// Render Markdown and parse the result.
///
/// Heading attributes (`## Title {#custom-id}`) become real `id`s.
pub fn parse_markdown(source: &str) -> Vec<Node> {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_HEADING_ATTRIBUTES;

    let mut rendered = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut rendered, Parser::new_ext(source, options));
    parse_html(&rendered)
}

/// Convert a tl node handle to our tree
fn convert(handle: tl::NodeHandle, parser: &tl::Parser) -> Option<Node> {
    match handle.get(parser)? {
        tl::Node::Tag(tag) => {
            let mut elem = Element::new(tag.name().as_utf8_str().to_lowercase());

            for (key, value) in tag.attributes().iter() {
                let value = value.map(|v| decode_entities(&v).into_owned());
                elem.attrs
                    .push((key.to_ascii_lowercase(), value.unwrap_or_default()));
            }

            elem.children = tag
                .children()
                .top()
                .iter()
                .filter_map(|child| convert(*child, parser))
                .collect();

            Some(Node::Element(elem))
        }
        tl::Node::Raw(bytes) => {
            let text = bytes.as_utf8_str();
            if text.trim().is_empty() {
                None
            } else {
                Some(Node::Text(decode_entities(&text).into_owned()))
            }
        }
        tl::Node::Comment(_) => None,
    }
}

/// Decode named and numeric character references.
///
/// Unknown or malformed references are kept verbatim.
fn decode_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];

        // Entities are short; anything longer is literal text
        let decoded = tail[1..]
            .find(';')
            .filter(|&end| end > 0 && end <= 10)
            .and_then(|end| decode_entity(&tail[1..=end]).map(|c| (c, end + 2)));

        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00A0}'),
        _ => {
            let num = entity.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
