//! Block-level handlers.

use md2tex_ast::{ConversionError, ConversionResult, Node, NodeKind, Phase, Visit, WalkStatus};

/// Sectioning commands indexed by heading level; level 0 is unused.
const HEADING_COMMANDS: [&str; 7] = [
    "",
    "section*",
    "subsection*",
    "subsubsection*",
    "paragraph*",
    "subparagraph*",
    "textbf",
];

pub fn heading_command(level: u8) -> ConversionResult<&'static str> {
    match HEADING_COMMANDS.get(level as usize) {
        Some(command) if level > 0 => Ok(*command),
        _ => Err(ConversionError::internal(format!(
            "heading level {} outside 1..=6",
            level
        ))),
    }
}

pub(crate) fn heading(out: &mut String, level: u8, phase: Phase) -> ConversionResult<WalkStatus> {
    let command = heading_command(level)?;
    match phase {
        Phase::Entering => {
            out.push('\\');
            out.push_str(command);
            out.push('{');
        }
        Phase::Leaving => out.push_str("}\n\n"),
    }
    Ok(WalkStatus::Continue)
}

pub(crate) fn paragraph(out: &mut String, phase: Phase) -> ConversionResult<WalkStatus> {
    if phase == Phase::Leaving {
        out.push_str("\n\n");
    }
    Ok(WalkStatus::Continue)
}

pub(crate) fn blockquote(out: &mut String, phase: Phase) -> ConversionResult<WalkStatus> {
    match phase {
        Phase::Entering => out.push_str("\\begin{framed}\n\\begin{quote}\n"),
        Phase::Leaving => out.push_str("\\end{quote}\n\\end{framed}\n\n"),
    }
    Ok(WalkStatus::Continue)
}

/// Code lines are copied verbatim, without escaping.
pub(crate) fn code_block(
    out: &mut String,
    lines: &[String],
    phase: Phase,
) -> ConversionResult<WalkStatus> {
    match phase {
        Phase::Entering => {
            out.push_str("\\begin{lstlisting}\n");
            for line in lines {
                out.push_str(line);
            }
        }
        Phase::Leaving => out.push_str("\\end{lstlisting}\n\n"),
    }
    Ok(WalkStatus::Continue)
}

pub(crate) fn list(
    out: &mut String,
    ordered: bool,
    parent: Option<&Node>,
    phase: Phase,
) -> ConversionResult<WalkStatus> {
    let env = if ordered { "enumerate" } else { "itemize" };
    match phase {
        Phase::Entering => {
            out.push_str("\\begin{");
            out.push_str(env);
            out.push_str("}\n");
        }
        Phase::Leaving => {
            out.push_str("\\end{");
            out.push_str(env);
            out.push('}');
            // nested lists are followed by their item's newline instead
            if matches!(parent.map(|p| &p.kind), Some(NodeKind::Document)) {
                out.push_str("\n\n");
            }
        }
    }
    Ok(WalkStatus::Continue)
}

pub(crate) fn list_item(out: &mut String, phase: Phase) -> ConversionResult<WalkStatus> {
    match phase {
        Phase::Entering => out.push_str("\\item "),
        Phase::Leaving => out.push('\n'),
    }
    Ok(WalkStatus::Continue)
}

pub(crate) fn text_block(
    out: &mut String,
    visit: Visit<'_>,
    phase: Phase,
) -> ConversionResult<WalkStatus> {
    if phase == Phase::Leaving && visit.has_next_sibling && !visit.node.is_leaf() {
        out.push('\n');
    }
    Ok(WalkStatus::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_levels_map_to_commands() {
        let expected = [
            (1, "section*"),
            (2, "subsection*"),
            (3, "subsubsection*"),
            (4, "paragraph*"),
            (5, "subparagraph*"),
            (6, "textbf"),
        ];
        for (level, command) in expected {
            assert_eq!(heading_command(level).unwrap(), command);
        }
    }

    #[test]
    fn heading_level_out_of_range() {
        assert!(heading_command(0).is_err());
        assert!(heading_command(7).is_err());
    }

    #[test]
    fn list_spacing_depends_on_parent() {
        let root = Node::document(Vec::new());
        let item = Node::new(NodeKind::ListItem);

        let mut top = String::new();
        list(&mut top, true, Some(&root), Phase::Leaving).unwrap();
        assert_eq!(top, "\\end{enumerate}\n\n");

        let mut nested = String::new();
        list(&mut nested, false, Some(&item), Phase::Leaving).unwrap();
        assert_eq!(nested, "\\end{itemize}");
    }
}
