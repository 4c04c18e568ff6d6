//! # Markup Fragments
//!
//! A small HTML-fragment parser for markup lines. Produces a generic node
//! tree (text vs element with tag + attributes + children) that the renderer
//! walks to reconstruct structure while streaming text content.
//!
//! Lenient by design: an unclosed tag closes at end of input, a stray closing
//! tag is ignored, and a `<` that never finds its `>` is treated as text.
//! Document content is authored, not adversarial.

/// One node of a parsed markup fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    Text(String),
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<MarkupNode>,
    },
}

/// Tags that never hold children.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "wbr"];

/// Parse a markup line into a list of sibling nodes.
pub fn parse_fragment(input: &str) -> Vec<MarkupNode> {
    Parser {
        chars: input.char_indices().peekable(),
        input,
    }
    .parse_children(None)
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    input: &'a str,
}

impl<'a> Parser<'a> {
    /// Parse siblings until end of input or the closing tag for `parent`.
    fn parse_children(&mut self, parent: Option<&str>) -> Vec<MarkupNode> {
        let mut nodes = Vec::new();
        let mut text = String::new();

        while let Some(&(pos, c)) = self.chars.peek() {
            if c != '<' {
                self.chars.next();
                text.push(c);
                continue;
            }

            // A '<' only opens a tag when a name or '/' follows and a '>'
            // exists somewhere after it. Otherwise it is literal text.
            let rest = &self.input[pos..];
            if !looks_like_tag(rest) {
                self.chars.next();
                text.push(c);
                continue;
            }

            if !text.is_empty() {
                nodes.push(MarkupNode::Text(std::mem::take(&mut text)));
            }

            if rest.starts_with("</") {
                let closed = self.consume_closing_tag();
                match (parent, closed) {
                    // Our own close tag: done with this level.
                    (Some(p), Some(ref name)) if name.eq_ignore_ascii_case(p) => return nodes,
                    // Mismatched or orphan close tag: drop it and continue.
                    _ => continue,
                }
            }

            if let Some(node) = self.consume_element() {
                nodes.push(node);
            }
        }

        if !text.is_empty() {
            nodes.push(MarkupNode::Text(text));
        }
        nodes
    }

    /// Consume `</name>` and return the name.
    fn consume_closing_tag(&mut self) -> Option<String> {
        self.chars.next(); // <
        self.chars.next(); // /
        let mut name = String::new();
        for (_, c) in self.chars.by_ref() {
            if c == '>' {
                return Some(name.trim().to_string());
            }
            name.push(c);
        }
        None
    }

    /// Consume `<tag attr="v" ...>` plus children up to the matching close.
    fn consume_element(&mut self) -> Option<MarkupNode> {
        self.chars.next(); // <

        let mut head = String::new();
        let mut self_closing = false;
        for (_, c) in self.chars.by_ref() {
            match c {
                '>' => break,
                '/' => self_closing = true,
                _ => {
                    // A '/' not directly before '>' belongs to an attribute value
                    if self_closing {
                        head.push('/');
                        self_closing = false;
                    }
                    head.push(c);
                }
            }
        }

        let (tag, attrs) = parse_tag_head(&head);
        if tag.is_empty() {
            return None;
        }

        let children = if self_closing || VOID_TAGS.contains(&tag.as_str()) {
            Vec::new()
        } else {
            self.parse_children(Some(&tag))
        };

        Some(MarkupNode::Element { tag, attrs, children })
    }
}

fn looks_like_tag(rest: &str) -> bool {
    let mut it = rest.chars();
    it.next(); // '<'
    let valid_start = matches!(it.next(), Some(c) if c.is_ascii_alphabetic() || c == '/');
    valid_start && rest.contains('>')
}

/// Split `span class="red" id=x` into the tag name and attribute pairs.
/// Bare attributes get an empty value.
fn parse_tag_head(head: &str) -> (String, Vec<(String, String)>) {
    let head = head.trim();
    let (tag, rest) = match head.find(char::is_whitespace) {
        Some(i) => (&head[..i], &head[i..]),
        None => (head, ""),
    };

    let mut attrs = Vec::new();
    let mut chars = rest.chars().peekable();
    while chars.peek().is_some() {
        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
        let mut name = String::new();
        while matches!(chars.peek(), Some(&c) if c != '=' && c != '"' && c != '\'' && !c.is_whitespace())
        {
            name.push(chars.next().unwrap_or_default());
        }
        if name.is_empty() {
            break;
        }
        let mut value = String::new();
        if matches!(chars.peek(), Some('=')) {
            chars.next();
            match chars.peek() {
                Some(&q @ ('"' | '\'')) => {
                    chars.next();
                    while matches!(chars.peek(), Some(&c) if c != q) {
                        value.push(chars.next().unwrap_or_default());
                    }
                    chars.next(); // closing quote
                }
                _ => {
                    while matches!(chars.peek(), Some(&c) if !c.is_whitespace()) {
                        value.push(chars.next().unwrap_or_default());
                    }
                }
            }
        }
        attrs.push((name.to_ascii_lowercase(), value));
    }

    (tag.to_ascii_lowercase(), attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> MarkupNode {
        MarkupNode::Text(s.to_string())
    }

    #[test]
    fn plain_text_is_one_node() {
        assert_eq!(parse_fragment("hello world"), vec![text("hello world")]);
    }

    #[test]
    fn element_with_class_attribute() {
        let nodes = parse_fragment("before <span class=\"red\">hot</span> after");
        assert_eq!(
            nodes,
            vec![
                text("before "),
                MarkupNode::Element {
                    tag: "span".to_string(),
                    attrs: vec![("class".to_string(), "red".to_string())],
                    children: vec![text("hot")],
                },
                text(" after"),
            ]
        );
    }

    #[test]
    fn nested_elements_keep_structure() {
        let nodes = parse_fragment("<b>bold <i>both</i></b>");
        let MarkupNode::Element { tag, children, .. } = &nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(tag, "b");
        assert_eq!(children.len(), 2);
        assert!(matches!(&children[1], MarkupNode::Element { tag, .. } if tag == "i"));
    }

    #[test]
    fn void_and_self_closing_tags_have_no_children() {
        let nodes = parse_fragment("a<br>b<span/>c");
        assert_eq!(nodes.len(), 5);
        assert!(
            matches!(&nodes[1], MarkupNode::Element { tag, children, .. } if tag == "br" && children.is_empty())
        );
        assert!(
            matches!(&nodes[3], MarkupNode::Element { tag, children, .. } if tag == "span" && children.is_empty())
        );
    }

    #[test]
    fn stray_angle_bracket_is_text() {
        assert_eq!(
            parse_fragment("2 < 3 and 5 > 4"),
            vec![text("2 < 3 and 5 > 4")]
        );
    }

    #[test]
    fn unclosed_element_closes_at_end_of_input() {
        let nodes = parse_fragment("<span class='x'>tail");
        assert_eq!(
            nodes,
            vec![MarkupNode::Element {
                tag: "span".to_string(),
                attrs: vec![("class".to_string(), "x".to_string())],
                children: vec![text("tail")],
            }]
        );
    }

    #[test]
    fn orphan_closing_tag_is_dropped() {
        assert_eq!(parse_fragment("a</b>c"), vec![text("a"), text("c")]);
    }

    #[test]
    fn bare_attribute_gets_empty_value() {
        let nodes = parse_fragment("<span hidden>x</span>");
        let MarkupNode::Element { attrs, .. } = &nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(attrs, &vec![("hidden".to_string(), String::new())]);
    }
}
