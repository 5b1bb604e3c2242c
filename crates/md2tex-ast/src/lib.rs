//! Markdown document tree shared by the frontend and the LaTeX backend.

mod error;
mod walk;

pub use error::{ConversionError, ConversionResult};
pub use walk::{walk, Phase, Visit, WalkStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Self { kind, children }
    }

    pub fn document(children: Vec<Node>) -> Self {
        Self::with_children(NodeKind::Document, children)
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::with_children(NodeKind::Paragraph, children)
    }

    pub fn text(segment: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(Text::new(segment)))
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Every construct the converter knows about, including the ones it refuses
/// to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    // blocks
    Document,
    Heading {
        level: u8,
    },
    Paragraph,
    Blockquote,
    /// Indented code block; `lines` keep their trailing newline.
    CodeBlock {
        lines: Vec<String>,
    },
    FencedCodeBlock {
        info: Option<String>,
        lines: Vec<String>,
    },
    HtmlBlock {
        literal: String,
    },
    List {
        ordered: bool,
    },
    ListItem,
    /// Paragraph-like block without trailing spacing, used inside tight lists.
    TextBlock,
    ThematicBreak,

    // inlines
    AutoLink {
        url: String,
        label: String,
        link_type: AutoLinkType,
    },
    CodeSpan,
    Emphasis {
        level: u8,
    },
    Image {
        destination: String,
        title: String,
    },
    Link {
        destination: String,
        title: String,
    },
    RawHtml {
        literal: String,
    },
    String {
        value: String,
    },
    Text(Text),
}

impl NodeKind {
    /// Stable kind name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Heading { .. } => "Heading",
            NodeKind::Paragraph => "Paragraph",
            NodeKind::Blockquote => "Blockquote",
            NodeKind::CodeBlock { .. } => "CodeBlock",
            NodeKind::FencedCodeBlock { .. } => "FencedCodeBlock",
            NodeKind::HtmlBlock { .. } => "HTMLBlock",
            NodeKind::List { .. } => "List",
            NodeKind::ListItem => "ListItem",
            NodeKind::TextBlock => "TextBlock",
            NodeKind::ThematicBreak => "ThematicBreak",
            NodeKind::AutoLink { .. } => "AutoLink",
            NodeKind::CodeSpan => "CodeSpan",
            NodeKind::Emphasis { .. } => "Emphasis",
            NodeKind::Image { .. } => "Image",
            NodeKind::Link { .. } => "Link",
            NodeKind::RawHtml { .. } => "RawHTML",
            NodeKind::String { .. } => "String",
            NodeKind::Text(_) => "Text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    pub segment: String,
    pub soft_line_break: bool,
    pub hard_line_break: bool,
}

impl Text {
    pub fn new(segment: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            soft_line_break: false,
            hard_line_break: false,
        }
    }

    pub fn with_soft_break(mut self) -> Self {
        self.soft_line_break = true;
        self
    }

    pub fn with_hard_break(mut self) -> Self {
        self.hard_line_break = true;
        self
    }

    pub fn has_line_break(&self) -> bool {
        self.soft_line_break || self.hard_line_break
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoLinkType {
    Url,
    Email,
}
