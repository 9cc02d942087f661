use std::fmt::Write;
use std::path::Path;

use colored::Colorize;

use crate::deck::SlideStore;
use crate::toc::TocIndex;

pub fn run(deck: Option<&Path>) -> anyhow::Result<()> {
    let store = SlideStore::load_or_builtin(deck)?;
    print!("{}", render(&store));
    Ok(())
}

/// The grouped table of contents as terminal text.
fn render(store: &SlideStore) -> String {
    let toc = TocIndex::build(store.slides());
    let mut out = String::new();
    let _ = writeln!(out, "{}", store.title().bold());
    for section in toc.sections() {
        let _ = writeln!(out, "\n{}", section.name.cyan().bold());
        for entry in &section.entries {
            let number = format!("{:>3}", entry.slide_index + 1);
            let _ = writeln!(out, "  {}  {}", number.dimmed(), entry.title);
        }
    }
    out
}
