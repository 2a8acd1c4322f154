use kartei_lib::cards::{CardFaces, Side};
use kartei_lib::sheets::TaggedRow;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

pub fn paint(text: &str, style: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", style, text, Color::RESET)
    } else {
        text.to_string()
    }
}

fn learned_marker(learned: bool, use_color: bool) -> String {
    if learned {
        paint("[x]", Color::GREEN, use_color)
    } else {
        "[ ]".to_string()
    }
}

/// One line per card for `list`: `[x] 0-3    Hund → dog`
pub fn render_card_line(card: &TaggedRow, faces: &CardFaces<'_>, learned: bool, use_color: bool) -> String {
    format!(
        "{} {:<7} {} \u{2192} {}",
        learned_marker(learned, use_color),
        paint(card.id().as_str(), Color::GRAY, use_color),
        paint(faces.front, Color::BOLD, use_color),
        faces.back
    )
}

/// Both faces of a card for `show`, with the sentence on its side
pub fn render_card(card: &TaggedRow, faces: &CardFaces<'_>, learned: bool, use_color: bool) -> String {
    let mut lines = vec![format!(
        "{} {}",
        paint(card.id().as_str(), Color::GRAY, use_color),
        learned_marker(learned, use_color)
    )];

    for (label, side, text) in [("Front", Side::Front, faces.front), ("Back", Side::Back, faces.back)] {
        lines.push(String::new());
        lines.push(format!("{}: {}", paint(label, Color::CYAN, use_color), paint(text, Color::BOLD, use_color)));
        if let Some(sentence) = faces.sentence_on(side) {
            for line in wrap_lines(sentence, "  ", 80) {
                lines.push(paint(&line, Color::ITALIC, use_color));
            }
        }
    }

    lines.join("\n")
}

/// Simple word-wrapping for terminal output
pub fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.chars().count());

    for line in text.lines() {
        if line.chars().count() <= effective_width {
            lines.push(format!("{}{}", prefix, line));
            continue;
        }

        let mut current_line = String::new();
        for word in line.split_whitespace() {
            if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_line.chars().count() + 1 + word.chars().count() <= effective_width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                lines.push(format!("{}{}", prefix, current_line));
                current_line = word.to_string();
            }
        }
        if !current_line.is_empty() {
            lines.push(format!("{}{}", prefix, current_line));
        }
    }

    lines
}
