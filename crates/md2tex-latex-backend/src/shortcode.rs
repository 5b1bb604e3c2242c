//! Inline `{% name args… %}` directives.
//!
//! A text segment containing a directive is replaced as a whole by the
//! directive's expansion. Neither unknown nor failing directives abort a
//! conversion:
//!
//! - an unknown directive leaves its segment untouched and unescaped;
//! - a failing one becomes `% Shortcode "name" error: message` followed by a
//!   newline, so markup emitted after it on the same line is not commented
//!   out.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use fxhash::FxHashMap;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace, warn};

use crate::escape::{escape_latex, is_latex_safe};

lazy_static! {
    static ref SHORTCODE_PATTERN: Regex = Regex::new(r"\{% (.*?) %\}").unwrap();
}

/// Expansion function. `args[0]` is the directive name.
pub type ShortcodeFn = dyn Fn(&[String]) -> Result<String, ShortcodeError> + Send + Sync;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcodeError {
    MissingArgument { position: usize, name: String },
    UnexpectedArguments { expected: usize, found: usize },
    Failed(String),
}

impl fmt::Display for ShortcodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortcodeError::MissingArgument { position, name } => {
                write!(f, "missing argument {} ({})", position, name)
            }
            ShortcodeError::UnexpectedArguments { expected, found } => {
                write!(f, "expected {} argument(s), found {}", expected, found)
            }
            ShortcodeError::Failed(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ShortcodeError {}

impl ShortcodeError {
    pub fn failed(message: impl Into<String>) -> Self {
        ShortcodeError::Failed(message.into())
    }
}

/// What happened to a directive found in a text segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcodeOutcome {
    Expanded,
    Failed(String),
    PassedThrough,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcodeEvent {
    pub name: String,
    /// The matched `{% … %}` text.
    pub directive: String,
    pub outcome: ShortcodeOutcome,
}

#[derive(Debug)]
pub struct ShortcodeExpansion<'s> {
    pub output: Cow<'s, str>,
    pub event: Option<ShortcodeEvent>,
}

/// Named expansion functions, fixed once a renderer owns them.
#[derive(Clone, Default)]
pub struct ShortcodeRegistry {
    handlers: FxHashMap<String, Arc<ShortcodeFn>>,
}

impl fmt::Debug for ShortcodeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcodeRegistry")
            .field("names", &self.names())
            .finish()
    }
}

impl ShortcodeRegistry {
    /// Registry without any directives.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `graphic`, `part`, `raw` and `vspace`.
    pub fn builtin() -> Self {
        Self::new()
            .with("graphic", graphic)
            .with("part", part)
            .with("raw", raw)
            .with("vspace", vspace)
    }

    /// Add or replace a directive.
    pub fn register<F>(&mut self, name: impl Into<String>, func: F)
    where
        F: Fn(&[String]) -> Result<String, ShortcodeError> + Send + Sync + 'static,
    {
        self.handlers.insert(name.into(), Arc::new(func));
    }

    pub fn with<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[String]) -> Result<String, ShortcodeError> + Send + Sync + 'static,
    {
        self.register(name, func);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ShortcodeFn> {
        self.handlers.get(name).map(|f| f.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered directive names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Render one raw text segment.
    pub fn expand<'s>(&self, segment: &'s str) -> ShortcodeExpansion<'s> {
        let Some(caps) = SHORTCODE_PATTERN.captures(segment) else {
            let output = if is_latex_safe(segment) {
                Cow::Borrowed(segment)
            } else {
                Cow::Owned(escape_latex(segment))
            };
            return ShortcodeExpansion {
                output,
                event: None,
            };
        };

        let directive = caps[0].to_string();
        let args: Vec<String> = caps[1].split_whitespace().map(String::from).collect();
        let name = args.first().cloned().unwrap_or_default();

        let Some(func) = self.get(&name) else {
            debug!(directive = %directive, "unknown shortcode, passing segment through");
            return ShortcodeExpansion {
                output: Cow::Borrowed(segment),
                event: Some(ShortcodeEvent {
                    name,
                    directive,
                    outcome: ShortcodeOutcome::PassedThrough,
                }),
            };
        };

        match func(args.as_slice()) {
            Ok(replacement) => {
                trace!(shortcode = %name, "expanded shortcode");
                ShortcodeExpansion {
                    output: Cow::Owned(replacement),
                    event: Some(ShortcodeEvent {
                        name,
                        directive,
                        outcome: ShortcodeOutcome::Expanded,
                    }),
                }
            }
            Err(err) => {
                warn!(shortcode = %name, error = %err, "shortcode expansion failed");
                ShortcodeExpansion {
                    output: Cow::Owned(format!("% Shortcode {:?} error: {}\n", name, err)),
                    event: Some(ShortcodeEvent {
                        name,
                        directive,
                        outcome: ShortcodeOutcome::Failed(err.to_string()),
                    }),
                }
            }
        }
    }
}

/// The only argument after the directive name.
pub fn single_argument<'a>(args: &'a [String], name: &str) -> Result<&'a str, ShortcodeError> {
    let value = args.get(1).ok_or_else(|| ShortcodeError::MissingArgument {
        position: 1,
        name: name.to_string(),
    })?;
    if args.len() > 2 {
        return Err(ShortcodeError::UnexpectedArguments {
            expected: 1,
            found: args.len() - 1,
        });
    }
    Ok(value)
}

/// All arguments after the directive name joined by single spaces; at least
/// one is required.
pub fn joined_arguments(args: &[String], name: &str) -> Result<String, ShortcodeError> {
    if args.len() < 2 {
        return Err(ShortcodeError::MissingArgument {
            position: 1,
            name: name.to_string(),
        });
    }
    Ok(args[1..].join(" "))
}

fn graphic(args: &[String]) -> Result<String, ShortcodeError> {
    let path = single_argument(args, "path")?;
    Ok(format!("\\includegraphics{{{}}}", path))
}

fn part(args: &[String]) -> Result<String, ShortcodeError> {
    let title = joined_arguments(args, "title")?;
    Ok(format!("\\part{{{}}}", title))
}

fn raw(args: &[String]) -> Result<String, ShortcodeError> {
    joined_arguments(args, "latex")
}

fn vspace(args: &[String]) -> Result<String, ShortcodeError> {
    let distance = single_argument(args, "distance")?;
    Ok(format!("\\vspace{{{}}}", distance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn expand(segment: &str) -> (String, Option<ShortcodeEvent>) {
        let expansion = ShortcodeRegistry::builtin().expand(segment);
        (expansion.output.into_owned(), expansion.event)
    }

    #[test]
    fn plain_text_is_escaped() {
        let (out, event) = expand("100% sure_thing");
        assert_eq!(out, "100\\% sure\\_thing");
        assert!(event.is_none());
    }

    #[test]
    fn safe_text_is_borrowed() {
        let registry = ShortcodeRegistry::builtin();
        let expansion = registry.expand("nothing to escape");
        assert!(matches!(expansion.output, Cow::Borrowed("nothing to escape")));
        assert!(matches!(registry.expand("a&b").output, Cow::Owned(_)));
    }

    #[test]
    fn graphic_expands() {
        let (out, event) = expand("{% graphic logo.png %}");
        assert_eq!(out, "\\includegraphics{logo.png}");
        let event = event.unwrap();
        assert_eq!(event.name, "graphic");
        assert_eq!(event.outcome, ShortcodeOutcome::Expanded);
    }

    #[test]
    fn vspace_expands() {
        assert_eq!(expand("{% vspace 1cm %}").0, "\\vspace{1cm}");
    }

    #[test]
    fn part_and_raw_join_arguments() {
        assert_eq!(expand("{% part The   Beginning %}").0, "\\part{The Beginning}");
        assert_eq!(expand("{% raw \\newpage %}").0, "\\newpage");
    }

    #[test]
    fn expansion_replaces_the_whole_segment() {
        let (out, _) = expand("see {% graphic a.png %} here");
        assert_eq!(out, "\\includegraphics{a.png}");
    }

    #[test]
    fn unknown_directive_passes_through_unescaped() {
        let (out, event) = expand("{% unknown foo %}");
        assert_eq!(out, "{% unknown foo %}");
        let event = event.unwrap();
        assert_eq!(event.name, "unknown");
        assert_eq!(event.outcome, ShortcodeOutcome::PassedThrough);
    }

    #[test]
    fn empty_directive_passes_through() {
        let (out, event) = expand("{%  %} & more");
        assert_eq!(out, "{%  %} & more");
        assert_eq!(event.unwrap().outcome, ShortcodeOutcome::PassedThrough);
    }

    #[test]
    fn missing_argument_becomes_comment() {
        let (out, event) = expand("{% graphic %}");
        assert_eq!(
            out,
            "% Shortcode \"graphic\" error: missing argument 1 (path)\n"
        );
        assert!(matches!(
            event.unwrap().outcome,
            ShortcodeOutcome::Failed(ref msg) if msg.contains("missing argument")
        ));
    }

    #[test]
    fn surplus_arguments_are_reported() {
        let (out, _) = expand("{% vspace 1cm 2cm %}");
        assert!(out.starts_with("% Shortcode \"vspace\" error: expected 1 argument(s), found 2"));
    }

    #[test]
    fn custom_directive() {
        let registry = ShortcodeRegistry::new().with("upper", |args: &[String]| {
            Ok(joined_arguments(args, "text")?.to_uppercase())
        });
        assert_eq!(registry.expand("{% upper hi there %}").output, "HI THERE");
        assert!(!registry.contains("graphic"));
    }

    #[test]
    fn custom_directive_failure() {
        let registry = ShortcodeRegistry::new()
            .with("fail", |_: &[String]| Err(ShortcodeError::failed("boom")));
        assert_eq!(
            registry.expand("{% fail %}").output,
            "% Shortcode \"fail\" error: boom\n"
        );
    }

    #[test]
    fn builtin_names_are_sorted() {
        let registry = ShortcodeRegistry::builtin();
        assert_eq!(registry.names(), vec!["graphic", "part", "raw", "vspace"]);
        assert_eq!(registry.len(), 4);
        assert!(!registry.is_empty());
    }
}
