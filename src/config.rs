//! Locations of the Openbox configuration and the persisted output files.

use std::path::PathBuf;

use crate::render::Scope;

/// Schema version the extractor accepts. Openbox stamps its rc.xml with
/// this namespace; a document carrying anything else is rejected.
pub const RC_NAMESPACE: &str = "http://openbox.org/3.4/rc";

/// Path to the Openbox configuration file.
pub fn rc_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join("openbox").join("rc.xml"))
}

/// Persisted output file for a scope. One fixed, home-relative file per
/// category.
pub fn output_path(scope: Scope) -> Option<PathBuf> {
    let name = match scope {
        Scope::All => ".obkeys-all.txt",
        Scope::Builtin => ".obkeys-ob.txt",
        Scope::User => ".obkeys-user.txt",
    };
    dirs::home_dir().map(|p| p.join(name))
}

/// Header line written at the top of a scope's output file on each run.
pub fn output_header(scope: Scope) -> &'static str {
    match scope {
        Scope::All => "All Keybindings",
        Scope::Builtin => crate::render::SECTION_BUILTIN,
        Scope::User => crate::render::SECTION_USER,
    }
}
