//! Markdown tree to LaTeX backend.
//!
//! The renderer walks an [`md2tex_ast::Node`] tree once, emitting fixed
//! LaTeX markup per node kind. Text segments are escaped unless they carry a
//! shortcode directive.

mod block;
mod escape;
mod inline;
pub mod shortcode;

use md2tex_ast::{
    walk, ConversionError, ConversionResult, Node, NodeKind, Phase, Text, Visit, WalkStatus,
};
use tracing::{debug, warn};

pub use block::heading_command;
pub use escape::{escape_latex, is_latex_safe};
pub use inline::emphasis_command;
pub use shortcode::{
    ShortcodeError, ShortcodeEvent, ShortcodeExpansion, ShortcodeFn, ShortcodeOutcome,
    ShortcodeRegistry,
};

/// Shortcode that renders what a rejected construct would have meant.
fn replacement_hint(kind: &NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::Image { .. } => Some("use {% graphic <path> %} instead"),
        NodeKind::ThematicBreak => Some("use {% raw \\hrule %} instead"),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct LatexRenderOptions {
    /// Interpret `{% … %}` directives in text; when off, all text is escaped.
    pub expand_shortcodes: bool,
}

impl Default for LatexRenderOptions {
    fn default() -> Self {
        Self {
            expand_shortcodes: true,
        }
    }
}

/// Rendered LaTeX plus every directive met along the way.
#[derive(Debug, Clone, Default)]
pub struct RenderOutput {
    pub content: String,
    pub shortcodes: Vec<ShortcodeEvent>,
}

#[derive(Debug, Clone)]
pub struct LatexRenderer {
    options: LatexRenderOptions,
    shortcodes: ShortcodeRegistry,
}

impl LatexRenderer {
    /// Renderer with the built-in shortcodes.
    pub fn new(options: LatexRenderOptions) -> Self {
        Self::with_shortcodes(options, ShortcodeRegistry::builtin())
    }

    pub fn with_shortcodes(options: LatexRenderOptions, shortcodes: ShortcodeRegistry) -> Self {
        Self {
            options,
            shortcodes,
        }
    }

    pub fn options(&self) -> &LatexRenderOptions {
        &self.options
    }

    pub fn shortcodes(&self) -> &ShortcodeRegistry {
        &self.shortcodes
    }

    pub fn render(&self, doc: &Node) -> ConversionResult<String> {
        self.render_with_events(doc).map(|output| output.content)
    }

    /// Render `doc`; any unsupported construct fails the whole call.
    pub fn render_with_events(&self, doc: &Node) -> ConversionResult<RenderOutput> {
        let mut state = RenderState {
            renderer: self,
            out: String::new(),
            events: Vec::new(),
        };
        walk(doc, &mut |visit, phase| state.visit(visit, phase))?;

        let content = state.out.trim().to_string();
        debug!(
            bytes = content.len(),
            shortcodes = state.events.len(),
            "rendered LaTeX"
        );
        Ok(RenderOutput {
            content,
            shortcodes: state.events,
        })
    }
}

impl Default for LatexRenderer {
    fn default() -> Self {
        Self::new(LatexRenderOptions::default())
    }
}

/// Render with the built-in shortcodes.
pub fn render_document(doc: &Node, options: LatexRenderOptions) -> ConversionResult<String> {
    LatexRenderer::new(options).render(doc)
}

struct RenderState<'r> {
    renderer: &'r LatexRenderer,
    out: String,
    events: Vec<ShortcodeEvent>,
}

impl RenderState<'_> {
    fn visit(&mut self, visit: Visit<'_>, phase: Phase) -> ConversionResult<WalkStatus> {
        match &visit.node.kind {
            NodeKind::Document => Ok(WalkStatus::Continue),
            NodeKind::Heading { level } => block::heading(&mut self.out, *level, phase),
            NodeKind::Paragraph => block::paragraph(&mut self.out, phase),
            NodeKind::Blockquote => block::blockquote(&mut self.out, phase),
            NodeKind::CodeBlock { lines } | NodeKind::FencedCodeBlock { lines, .. } => {
                block::code_block(&mut self.out, lines, phase)
            }
            NodeKind::List { ordered } => block::list(&mut self.out, *ordered, visit.parent, phase),
            NodeKind::ListItem => block::list_item(&mut self.out, phase),
            NodeKind::TextBlock => block::text_block(&mut self.out, visit, phase),
            NodeKind::AutoLink {
                url,
                label,
                link_type,
            } => inline::auto_link(&mut self.out, url, label, *link_type, phase),
            NodeKind::CodeSpan => inline::code_span(&mut self.out, phase),
            NodeKind::Emphasis { level } => inline::emphasis(&mut self.out, *level, phase),
            NodeKind::Link { destination, .. } => inline::link(&mut self.out, destination, phase),
            NodeKind::Text(text) => self.text(text, phase),
            NodeKind::ThematicBreak
            | NodeKind::HtmlBlock { .. }
            | NodeKind::Image { .. }
            | NodeKind::RawHtml { .. }
            | NodeKind::String { .. } => {
                let kind = visit.node.kind.name();
                warn!(kind, "unsupported construct, aborting conversion");
                Err(match replacement_hint(&visit.node.kind) {
                    Some(hint) => ConversionError::unsupported_with_suggestion(kind, hint),
                    None => ConversionError::unsupported(kind),
                })
            }
        }
    }

    fn text(&mut self, text: &Text, phase: Phase) -> ConversionResult<WalkStatus> {
        if phase == Phase::Leaving {
            return Ok(WalkStatus::Continue);
        }
        if self.renderer.options.expand_shortcodes {
            let expansion = self.renderer.shortcodes.expand(&text.segment);
            self.out.push_str(&expansion.output);
            self.events.extend(expansion.event);
        } else {
            self.out.push_str(&escape_latex(&text.segment));
        }
        inline::line_break(&mut self.out, text);
        Ok(WalkStatus::Continue)
    }
}
