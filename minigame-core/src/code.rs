//! Textual encoding of zone content (the code view).
//!
//! A zone renders as two tiles: a declaration (`const options = ['EN','HU'];`)
//! and a call (`toggle(options);`). Parsing is permissive: text that does not
//! carry a recognized marker token parses to "nothing installed".

use serde::{Deserialize, Serialize};

use crate::zone::{Language, Operation, OptionSet, Pair, ThemeSymbol, ZoneContent};

/// Prefix shared by every non-empty declaration.
pub const DECLARATION_PREFIX: &str = "const options = ";

/// Rendered tiles of one zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeText {
    /// Option set declaration, empty when none is installed.
    pub declaration: String,
    /// Operation call, empty when none is attached.
    pub call: String,
}

impl CodeText {
    /// Create from raw tile text; surrounding whitespace is dropped.
    #[must_use]
    pub fn new(declaration: &str, call: &str) -> Self {
        Self {
            declaration: declaration.trim().to_string(),
            call: call.trim().to_string(),
        }
    }
}

/// Render a zone's content as code tiles.
#[must_use]
pub fn render(zone: &ZoneContent) -> CodeText {
    let declaration = render_declaration(zone.options);
    let call = render_call(zone.operation, !declaration.is_empty());
    CodeText { declaration, call }
}

/// Render an option set declaration. The neutral kind has no textual form.
#[must_use]
pub fn render_declaration(options: Option<OptionSet>) -> String {
    match options.and_then(OptionSet::labels) {
        Some([front, back]) => format!("{DECLARATION_PREFIX}['{front}','{back}'];"),
        None => String::new(),
    }
}

/// Render an operation call. Without a declaration the call has no argument.
#[must_use]
pub fn render_call(operation: Option<Operation>, has_declaration: bool) -> String {
    match (operation, has_declaration) {
        (Some(Operation::Toggle), true) => "toggle(options);".to_string(),
        (Some(Operation::Toggle), false) => "langToggle();".to_string(),
        (Some(Operation::Rotate), true) => "rotate(options);".to_string(),
        (Some(Operation::Rotate), false) => "rotate();".to_string(),
        (None, _) => String::new(),
    }
}

/// Parse both tiles. The rotated flag is not part of the text.
#[must_use]
pub fn parse(text: &CodeText) -> ZoneContent {
    ZoneContent::new(parse_declaration(&text.declaration), parse_call(&text.call))
}

/// Whether the declaration names a language pair.
#[must_use]
pub fn declares_languages(text: &str) -> bool {
    [Language::En, Language::Hu]
        .iter()
        .any(|lang| text.contains(&quoted(lang.label())))
}

/// Whether the declaration names a theme pair.
#[must_use]
pub fn declares_themes(text: &str) -> bool {
    [ThemeSymbol::Sun, ThemeSymbol::Moon]
        .iter()
        .any(|symbol| text.contains(&quoted(symbol.glyph())))
}

/// Parse a declaration into an option set.
///
/// The pair order is taken from the quoted literals when they form a valid
/// pair; otherwise the default order is used.
#[must_use]
pub fn parse_declaration(text: &str) -> Option<OptionSet> {
    let text = text.trim();
    let literals = quoted_literals(text);

    if declares_languages(text) {
        let pair = match literals.as_slice() {
            [a, b] => match (Language::from_label(a), Language::from_label(b)) {
                (Some(front), Some(back)) if front != back => Pair::new(front, back),
                _ => Pair::LANGUAGES,
            },
            _ => Pair::LANGUAGES,
        };
        return Some(OptionSet::Language(pair));
    }

    if declares_themes(text) {
        let pair = match literals.as_slice() {
            [a, b] => match (ThemeSymbol::from_glyph(a), ThemeSymbol::from_glyph(b)) {
                (Some(front), Some(back)) if front != back => Pair::new(front, back),
                _ => Pair::THEMES,
            },
            _ => Pair::THEMES,
        };
        return Some(OptionSet::Theme(pair));
    }

    None
}

/// Parse a call into an operation.
#[must_use]
pub fn parse_call(text: &str) -> Option<Operation> {
    let text = text.trim();
    // `langToggle();` carries the marker too.
    if text.to_ascii_lowercase().contains("toggle") {
        Some(Operation::Toggle)
    } else if text.contains("rotate") {
        Some(Operation::Rotate)
    } else {
        None
    }
}

fn quoted(literal: &str) -> String {
    format!("'{literal}'")
}

/// Contents of every `'...'` literal, in order.
fn quoted_literals(text: &str) -> Vec<&str> {
    text.split('\'')
        .skip(1)
        .step_by(2)
        .filter(|literal| !literal.is_empty())
        .collect()
}
