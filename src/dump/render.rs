//! Text, ANSI and HTML rendering of captured [`Node`] trees.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::node::Node;

const INDENT: &str = "   ";

/// Output format for a dump. The captured data is the same for every target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderTarget {
    /// Plain text.
    #[default]
    Text,
    /// Text with ANSI colour escapes, for interactive terminals.
    Ansi,
    /// Escaped HTML inside a `<pre class="panel-dump">` block, for panels.
    Html,
}

#[derive(Debug, Clone, Copy)]
enum Token {
    Null,
    Bool,
    Number,
    Str,
    Label,
    Key,
    Meta,
}

impl Token {
    fn ansi(self) -> &'static str {
        match self {
            Token::Null | Token::Bool => "1;33",
            Token::Number => "1;32",
            Token::Str => "36",
            Token::Label => "1;31",
            Token::Key => "37",
            Token::Meta => "90",
        }
    }

    fn class(self) -> &'static str {
        match self {
            Token::Null => "null",
            Token::Bool => "bool",
            Token::Number => "number",
            Token::Str => "string",
            Token::Label => "label",
            Token::Key => "key",
            Token::Meta => "meta",
        }
    }
}

/// Render a captured node for the given target.
pub fn render(node: &Node, target: RenderTarget) -> String {
    let mut painter = Painter {
        target,
        out: String::new(),
    };
    if target == RenderTarget::Html {
        painter.out.push_str("<pre class=\"panel-dump\">");
    }
    painter.node(node, 0);
    if target == RenderTarget::Html {
        painter.out.push_str("</pre>");
    }
    painter.out
}

struct Painter {
    target: RenderTarget,
    out: String,
}

impl Painter {
    fn node(&mut self, node: &Node, indent: usize) {
        match node {
            Node::Null => self.paint(Token::Null, "null"),
            Node::Bool(value) => self.paint(Token::Bool, if *value { "true" } else { "false" }),
            Node::Int(value) => self.paint(Token::Number, &value.to_string()),
            Node::Float(value) => self.paint(Token::Number, &format!("{value:?}")),
            Node::Str { value, length } => {
                let value = escape_str(value);
                if node.is_truncated() {
                    self.paint(Token::Str, &format!("\"{value}…\""));
                    self.plain(" ");
                    self.paint(Token::Meta, &format!("({length})"));
                } else {
                    self.paint(Token::Str, &format!("\"{value}\""));
                }
            }
            Node::Seq {
                label,
                len,
                items,
                collapsed,
            } => {
                self.header(label, *len, *collapsed);
                if *collapsed {
                    return;
                }
                for (index, item) in items.iter().enumerate() {
                    self.newline(indent + 1);
                    self.paint(Token::Key, &index.to_string());
                    self.plain(" => ");
                    self.node(item, indent + 1);
                }
                self.omitted(node.omitted(), indent + 1);
            }
            Node::Map {
                label,
                len,
                entries,
                collapsed,
            } => {
                self.header(label, *len, *collapsed);
                if *collapsed {
                    return;
                }
                for (key, value) in entries {
                    self.newline(indent + 1);
                    self.node(key, indent + 1);
                    self.plain(" => ");
                    self.node(value, indent + 1);
                }
                self.omitted(node.omitted(), indent + 1);
            }
            Node::Object {
                class,
                fields,
                omitted,
                collapsed,
            } => {
                self.paint(Token::Label, class);
                if *collapsed {
                    self.plain(" ");
                    self.paint(Token::Meta, "{ … }");
                    return;
                }
                for (name, value) in fields {
                    self.newline(indent + 1);
                    self.paint(Token::Key, name);
                    self.plain(": ");
                    self.node(value, indent + 1);
                }
                self.omitted(*omitted, indent + 1);
            }
            Node::Recursion => self.paint(Token::Meta, "*RECURSION*"),
            Node::Unavailable(reason) => self.paint(Token::Meta, &format!("<{reason}>")),
        }
    }

    fn header(&mut self, label: &str, len: usize, collapsed: bool) {
        self.paint(Token::Label, label);
        self.plain(" ");
        self.paint(Token::Meta, &format!("({len})"));
        if collapsed && len > 0 {
            self.plain(" ");
            self.paint(Token::Meta, "…");
        }
    }

    fn omitted(&mut self, count: usize, indent: usize) {
        if count > 0 {
            self.newline(indent);
            self.paint(Token::Meta, &format!("… ({count} more)"));
        }
    }

    fn newline(&mut self, indent: usize) {
        self.out.push('\n');
        for _ in 0..indent {
            self.out.push_str(INDENT);
        }
    }

    fn plain(&mut self, text: &str) {
        match self.target {
            RenderTarget::Html => escape_html(text, &mut self.out),
            RenderTarget::Text | RenderTarget::Ansi => self.out.push_str(text),
        }
    }

    fn paint(&mut self, token: Token, text: &str) {
        match self.target {
            RenderTarget::Text => self.out.push_str(text),
            RenderTarget::Ansi => {
                let _ = write!(self.out, "\x1b[{}m{}\x1b[0m", token.ansi(), text);
            }
            RenderTarget::Html => {
                let _ = write!(self.out, "<span class=\"panel-dump-{}\">", token.class());
                escape_html(text, &mut self.out);
                self.out.push_str("</span>");
            }
        }
    }
}

/// Escape quotes, backslashes and control characters so every rendered
/// string stays on one line and cannot drive a terminal.
///
/// Applied to the captured, already length-cut value, so an escape sequence
/// is never split and `(len)` keeps counting original characters.
fn escape_str(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:04x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

fn escape_html(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_replaces_markup_characters() {
        let mut out = String::new();
        escape_html("<a href='x'>&\"</a>", &mut out);
        assert_eq!(out, "&lt;a href=&#039;x&#039;&gt;&amp;&quot;&lt;/a&gt;");
    }

    #[test]
    fn escape_str_quotes_and_controls() {
        assert_eq!(escape_str("a\"b\\c"), "a\\\"b\\\\c");
        assert_eq!(escape_str("1\n2\r3\t4"), "1\\n2\\r3\\t4");
        assert_eq!(escape_str("\u{1b}[2J\u{7f}"), "\\x1b[2J\\x7f");
        assert_eq!(escape_str("\u{85}"), "\\u{0085}");
        assert_eq!(escape_str("äöü"), "äöü");
    }

    #[test]
    fn plain_text_uses_three_space_indent() {
        let node = Node::Seq {
            label: "Vec".to_string(),
            len: 1,
            items: vec![Node::Int(7)],
            collapsed: false,
        };
        assert_eq!(render(&node, RenderTarget::Text), "Vec (1)\n   0 => 7");
    }
}
