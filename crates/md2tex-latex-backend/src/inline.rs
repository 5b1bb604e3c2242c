//! Inline handlers.

use md2tex_ast::{AutoLinkType, ConversionError, ConversionResult, Phase, Text, WalkStatus};

pub(crate) fn auto_link(
    out: &mut String,
    url: &str,
    label: &str,
    link_type: AutoLinkType,
    phase: Phase,
) -> ConversionResult<WalkStatus> {
    if phase == Phase::Entering {
        out.push_str("\\href{");
        if link_type == AutoLinkType::Email {
            out.push_str("mailto:");
        }
        out.push_str(url);
        out.push_str("}{");
        out.push_str(label);
        out.push('}');
    }
    Ok(WalkStatus::SkipChildren)
}

pub(crate) fn code_span(out: &mut String, phase: Phase) -> ConversionResult<WalkStatus> {
    wrap(out, "texttt", phase);
    Ok(WalkStatus::Continue)
}

pub fn emphasis_command(level: u8) -> ConversionResult<&'static str> {
    match level {
        1 => Ok("textit"),
        2 => Ok("textbf"),
        _ => Err(ConversionError::internal(format!(
            "emphasis level {} outside 1..=2",
            level
        ))),
    }
}

pub(crate) fn emphasis(out: &mut String, level: u8, phase: Phase) -> ConversionResult<WalkStatus> {
    wrap(out, emphasis_command(level)?, phase);
    Ok(WalkStatus::Continue)
}

pub(crate) fn link(out: &mut String, destination: &str, phase: Phase) -> ConversionResult<WalkStatus> {
    match phase {
        Phase::Entering => {
            out.push_str("\\href{");
            out.push_str(destination);
            out.push_str("}{");
        }
        Phase::Leaving => out.push('}'),
    }
    Ok(WalkStatus::Continue)
}

/// Trailing break of a text segment: `\\` for hard breaks, a space for soft ones.
pub(crate) fn line_break(out: &mut String, text: &Text) {
    if text.hard_line_break {
        out.push_str("\\\\\n");
    } else if text.soft_line_break {
        out.push(' ');
    }
}

fn wrap(out: &mut String, command: &str, phase: Phase) {
    match phase {
        Phase::Entering => {
            out.push('\\');
            out.push_str(command);
            out.push('{');
        }
        Phase::Leaving => out.push('}'),
    }
}
