//! Formatting of extracted keybindings into aligned text sections.

use crate::extract::{BindingKind, Keybind};

pub const SECTION_BUILTIN: &str = "Openbox Actions";
pub const SECTION_USER: &str = "User Commands";

/// Padding appended to each field width so columns never touch.
const FIELD_MARGIN: usize = 2;

/// Modifier tokens expanded by `--modify`, applied in this order. The
/// trailing dash keeps a second pass from re-expanding already-expanded
/// names ("Win" must never become "Winin").
const MODIFIER_EXPANSIONS: [(&str, &str); 4] = [
    ("W-", "Win-"),
    ("A-", "Alt-"),
    ("C-", "Ctl-"),
    ("S-", "Sht-"),
];

/// Which record categories participate in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    All,
    Builtin,
    User,
}

/// Formatting options, mapped one-to-one from the command-line flags.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub scope: Scope,
    pub key_symbol: String,
    pub pair_symbol: String,
    pub expand_modifiers: bool,
    pub shorten_paths: bool,
    pub two_column: bool,
    pub blank_lines: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scope: Scope::All,
            key_symbol: "\u{2022}".to_string(),
            pair_symbol: "\u{2502}".to_string(),
            expand_modifiers: false,
            shorten_paths: false,
            two_column: false,
            blank_lines: false,
        }
    }
}

/// One rendered category: a header plus its formatted rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub rows: Vec<String>,
}

/// Expand single-letter modifier tokens in a key combo.
pub fn expand_modifiers(combo: &str) -> String {
    let mut out = combo.to_string();
    for (token, full) in MODIFIER_EXPANSIONS {
        out = out.replace(token, full);
    }
    out
}

/// Abbreviate a command path: everything up to and including the final
/// separator collapses to an up-one-level marker. Text without a
/// separator passes through unchanged.
pub fn shorten_path(action: &str) -> String {
    match action.rfind('/') {
        Some(idx) => format!("../{}", &action[idx + 1..]),
        None => action.to_string(),
    }
}

/// Render the selected groups into sections, builtin first under `All`.
pub fn render(binds: &[Keybind], opts: &RenderOptions) -> Vec<Section> {
    let builtin: Vec<&Keybind> = binds
        .iter()
        .filter(|b| b.kind == BindingKind::Builtin)
        .collect();
    let user: Vec<&Keybind> = binds
        .iter()
        .filter(|b| b.kind == BindingKind::Command)
        .collect();

    match opts.scope {
        Scope::All => vec![
            render_group(SECTION_BUILTIN, &builtin, opts),
            render_group(SECTION_USER, &user, opts),
        ],
        Scope::Builtin => vec![render_group(SECTION_BUILTIN, &builtin, opts)],
        Scope::User => vec![render_group(SECTION_USER, &user, opts)],
    }
}

fn render_group(title: &'static str, binds: &[&Keybind], opts: &RenderOptions) -> Section {
    let cells: Vec<(String, String)> = binds
        .iter()
        .map(|b| {
            let combo = if opts.expand_modifiers {
                expand_modifiers(&b.combo)
            } else {
                b.combo.clone()
            };
            let action = if opts.shorten_paths {
                shorten_path(&b.action)
            } else {
                b.action.clone()
            };
            (combo, action)
        })
        .collect();

    // Group-wide widths: both halves of a paired row share them, so the
    // columns stay aligned in either layout. An empty group gets zero
    // widths and no rows.
    let combo_width = cells
        .iter()
        .map(|(c, _)| c.chars().count())
        .max()
        .map(|w| w + FIELD_MARGIN)
        .unwrap_or(0);
    let action_width = cells
        .iter()
        .map(|(_, a)| a.chars().count())
        .max()
        .map(|w| w + FIELD_MARGIN)
        .unwrap_or(0);

    let rows = if opts.two_column {
        // First half takes the extra record on odd counts.
        let mid = cells.len().div_ceil(2);
        let (left, right) = cells.split_at(mid);
        left.iter()
            .enumerate()
            .map(|(i, lhs)| {
                let mut row = cell(&opts.key_symbol, lhs, combo_width, action_width);
                if let Some(rhs) = right.get(i) {
                    row.push_str(&cell(&opts.pair_symbol, rhs, combo_width, action_width));
                }
                row.trim_end().to_string()
            })
            .collect()
    } else {
        cells
            .iter()
            .map(|c| {
                cell(&opts.key_symbol, c, combo_width, action_width)
                    .trim_end()
                    .to_string()
            })
            .collect()
    };

    Section { title, rows }
}

fn cell(prefix: &str, (combo, action): &(String, String), cw: usize, aw: usize) -> String {
    format!("{} {:<cw$}{:<aw$}", prefix, combo, action)
}

/// Concatenate sections into the text delivered to stdout or the viewer.
///
/// Sections are separated by one blank line; only the `All` scope renders
/// more than one section, so single-scope output carries no separator.
pub fn display_text(sections: &[Section], opts: &RenderOptions) -> String {
    let mut out = String::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(section.title);
        out.push('\n');
        for row in &section.rows {
            out.push_str(row);
            out.push('\n');
            if opts.blank_lines {
                out.push('\n');
            }
        }
    }
    out
}
