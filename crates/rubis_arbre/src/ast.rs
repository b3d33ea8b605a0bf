//! HAML template tree node types.
//!
//! The tree is produced by an external parser and consumed read-only by
//! the extraction engine. Nodes own their children; `line` numbers are
//! 1-indexed and monotonically consistent with document order, but not
//! necessarily contiguous (constructs skipped at parse time, such as
//! comments, simply never appear here).

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// One node of the parsed template tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// 1-indexed source line this node starts on (0 only for the root).
    pub line: u32,
    pub kind: NodeKind,
    /// Ordered child nodes, owned by this node.
    pub children: Vec<Node>,
}

/// Node kind discriminant plus kind-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Document root; contributes no output itself.
    Root,
    /// Literal markup text.
    PlainText { text: String },
    /// An element tag, e.g. `%span.cls{ a: 1 }= value`.
    Tag {
        tag_name: CompactString,
        /// Trailing inline code (`= value`), possibly empty.
        script: String,
        /// Verbatim dynamic attribute expressions, in appearance order,
        /// as computed by [`crate::attributes::locate`] at parse time.
        dynamic_attribute_sources: Vec<String>,
    },
    /// An output script line (`= expr`).
    Script { text: String },
    /// A non-output script line (`- stmt`).
    SilentScript { text: String },
    /// A filter block (`:ruby`, `:javascript`, ...) with its raw,
    /// newline-joined content.
    Filter {
        filter_type: CompactString,
        text: String,
    },
}

impl Node {
    pub fn root(children: Vec<Node>) -> Self {
        Self {
            line: 1,
            kind: NodeKind::Root,
            children,
        }
    }

    pub fn plain(line: u32, text: impl Into<String>) -> Self {
        Self {
            line,
            kind: NodeKind::PlainText { text: text.into() },
            children: Vec::new(),
        }
    }

    pub fn tag(line: u32, tag_name: impl Into<CompactString>) -> Self {
        Self {
            line,
            kind: NodeKind::Tag {
                tag_name: tag_name.into(),
                script: String::new(),
                dynamic_attribute_sources: Vec::new(),
            },
            children: Vec::new(),
        }
    }

    pub fn script(line: u32, text: impl Into<String>) -> Self {
        Self {
            line,
            kind: NodeKind::Script { text: text.into() },
            children: Vec::new(),
        }
    }

    pub fn silent_script(line: u32, text: impl Into<String>) -> Self {
        Self {
            line,
            kind: NodeKind::SilentScript { text: text.into() },
            children: Vec::new(),
        }
    }

    pub fn filter(
        line: u32,
        filter_type: impl Into<CompactString>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            line,
            kind: NodeKind::Filter {
                filter_type: filter_type.into(),
                text: text.into(),
            },
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Attach inline script to a tag node. No effect on other kinds.
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        if let NodeKind::Tag { script: slot, .. } = &mut self.kind {
            *slot = script.into();
        }
        self
    }

    /// Attach located dynamic attribute sources to a tag node.
    /// No effect on other kinds.
    pub fn with_attribute_sources(mut self, sources: Vec<String>) -> Self {
        if let NodeKind::Tag {
            dynamic_attribute_sources,
            ..
        } = &mut self.kind
        {
            *dynamic_attribute_sources = sources;
        }
        self
    }
}

impl NodeKind {
    /// Kind name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::PlainText { .. } => "plain",
            NodeKind::Tag { .. } => "tag",
            NodeKind::Script { .. } => "script",
            NodeKind::SilentScript { .. } => "silent_script",
            NodeKind::Filter { .. } => "filter",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_produce_expected_kinds() {
        let tag = Node::tag(3, "span")
            .with_script("link_to 'Out', out_path")
            .with_attribute_sources(vec!["{ a: 1 }".to_string()]);

        assert_eq!(tag.line, 3);
        match tag.kind {
            NodeKind::Tag {
                ref tag_name,
                ref script,
                ref dynamic_attribute_sources,
            } => {
                assert_eq!(tag_name.as_str(), "span");
                assert_eq!(script, "link_to 'Out', out_path");
                assert_eq!(dynamic_attribute_sources, &["{ a: 1 }".to_string()]);
            }
            ref other => panic!("expected tag, got {}", other.name()),
        }
    }

    #[test]
    fn with_script_ignores_non_tag_kinds() {
        let plain = Node::plain(1, "hello").with_script("ignored");
        assert_eq!(
            plain.kind,
            NodeKind::PlainText {
                text: "hello".to_string()
            }
        );
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(NodeKind::Root.name(), "root");
        assert_eq!(Node::filter(1, "ruby", "x = 1").kind.name(), "filter");
        assert_eq!(Node::silent_script(1, "if x").kind.name(), "silent_script");
    }
}
