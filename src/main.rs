use clap::Parser;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use obkeys::config;
use obkeys::extract;
use obkeys::render::{self, RenderOptions, Scope};
use obkeys::sinks::{self, CategoryFile};
use std::io;

/// Display Openbox keyboard shortcuts from rc.xml
#[derive(Parser)]
#[command(name = "obkeys")]
#[command(version, about = "Display Openbox keyboard shortcuts")]
struct Cli {
    /// Show only Openbox builtin actions
    #[arg(long)]
    ob: bool,

    /// Show only user-defined commands
    #[arg(long)]
    user: bool,

    /// Marker placed before each key combo
    #[arg(long, default_value = "\u{2022}")]
    symbol: String,

    /// Separator placed before the paired column
    #[arg(long, default_value = "\u{2502}")]
    symbol2: String,

    /// Render the list side by side in two columns
    #[arg(long)]
    columns: bool,

    /// Shorten command paths to their final segment
    #[arg(long)]
    shorten: bool,

    /// Expand modifier letters (W-Win, A-Alt, C-Ctl, S-Sht)
    #[arg(long)]
    modify: bool,

    /// Show the list in a zenity dialog instead of the terminal
    #[arg(long)]
    gui: bool,

    /// Write the output files only, with no terminal or GUI display
    #[arg(long)]
    txt: bool,

    /// Insert a blank line after every row
    #[arg(long)]
    newline: bool,
}

impl Cli {
    fn scope(&self) -> Scope {
        match (self.ob, self.user) {
            (true, false) => Scope::Builtin,
            (false, true) => Scope::User,
            _ => Scope::All,
        }
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            scope: self.scope(),
            key_symbol: self.symbol.clone(),
            pair_symbol: self.symbol2.clone(),
            expand_modifiers: self.modify,
            shorten_paths: self.shorten,
            two_column: self.columns,
            blank_lines: self.newline,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let Some(rc_path) = config::rc_path() else {
        print_colored_message("Could not determine home directory\n", Color::Red);
        std::process::exit(1);
    };

    let binds = match extract::load_keybinds(&rc_path) {
        Ok(binds) => binds,
        Err(e) => {
            print_colored_message(&format!("{}\n", e), Color::Red);
            std::process::exit(1);
        }
    };

    let opts = cli.render_options();
    let sections = render::render(&binds, &opts);

    persist_sections(&sections, opts.scope);

    if cli.txt {
        return;
    }

    let text = render::display_text(&sections, &opts);
    if cli.gui {
        if let Err(e) = sinks::show_in_viewer(&text) {
            print_colored_message(&format!("{}\n", e), Color::Red);
            std::process::exit(1);
        }
    } else {
        print!("{}", text);
    }
}

/// Write every rendered row to the scope's category file. Write failures
/// are surfaced as warnings; the display output still happens.
fn persist_sections(sections: &[render::Section], scope: Scope) {
    let Some(path) = config::output_path(scope) else {
        print_colored_message(
            "Warning: could not determine home directory, skipping output file\n",
            Color::DarkYellow,
        );
        return;
    };

    let file = CategoryFile::new(path, config::output_header(scope));
    if let Err(e) = file.begin() {
        print_colored_message(&format!("Warning: {}\n", e), Color::DarkYellow);
        return;
    }

    for section in sections {
        for row in &section.rows {
            if let Err(e) = file.append_row(row) {
                print_colored_message(&format!("Warning: {}\n", e), Color::DarkYellow);
                return;
            }
        }
    }
}

fn print_colored_message(message: &str, color: Color) {
    let mut stderr = io::stderr();
    execute!(
        stderr,
        SetForegroundColor(color),
        Print(message),
        ResetColor
    )
    .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_all_flags() {
        let cli = Cli::parse_from([
            "obkeys", "--ob", "--columns", "--shorten", "--modify", "--txt", "--newline",
            "--symbol", "*", "--symbol2", "|",
        ]);
        assert!(cli.ob);
        assert!(cli.columns);
        assert!(cli.shorten);
        assert!(cli.modify);
        assert!(cli.txt);
        assert!(cli.newline);
        assert_eq!(cli.symbol, "*");
        assert_eq!(cli.symbol2, "|");
    }

    #[test]
    fn scope_follows_category_flags() {
        assert_eq!(Cli::parse_from(["obkeys"]).scope(), Scope::All);
        assert_eq!(Cli::parse_from(["obkeys", "--ob"]).scope(), Scope::Builtin);
        assert_eq!(Cli::parse_from(["obkeys", "--user"]).scope(), Scope::User);
        // Both filters together select everything.
        assert_eq!(
            Cli::parse_from(["obkeys", "--ob", "--user"]).scope(),
            Scope::All
        );
    }

    #[test]
    fn symbols_default_to_glyphs() {
        let cli = Cli::parse_from(["obkeys"]);
        assert_eq!(cli.symbol, "\u{2022}");
        assert_eq!(cli.symbol2, "\u{2502}");
    }
}
