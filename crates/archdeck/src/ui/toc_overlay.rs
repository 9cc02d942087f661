use eframe::egui::{self, RichText};

use crate::keymap::SHORTCUTS;
use crate::theme::Theme;
use crate::toc::{TocEntry, TocIndex};

/// What the presenter did with the contents overlay this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum TocOutcome {
    Open,
    Close,
    Select(TocEntry),
}

/// Modal list of slides grouped by section, with the shortcut legend below.
pub fn show(ctx: &egui::Context, toc: &TocIndex, theme: &Theme, current: usize) -> TocOutcome {
    let current_section = toc.section_of(current).map(|s| s.name.as_str());
    let mut selected = None;

    let modal = egui::Modal::new(egui::Id::new("toc_overlay")).show(ctx, |ui| {
        ui.set_width(560.0);
        ui.heading(RichText::new("Contents").color(theme.heading_color));
        ui.add_space(8.0);

        egui::ScrollArea::vertical()
            .max_height(480.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                for section in toc.sections() {
                    let is_current = current_section == Some(section.name.as_str());
                    let color = if is_current { theme.accent } else { theme.muted };
                    ui.add_space(6.0);
                    ui.label(RichText::new(&section.name).strong().color(color));

                    for entry in &section.entries {
                        let text = format!("{:>3}  {}", entry.slide_index + 1, entry.title);
                        let label = ui.selectable_label(
                            entry.slide_index == current,
                            RichText::new(text).color(theme.foreground),
                        );
                        if label.clicked() {
                            selected = Some(entry.clone());
                        }
                    }
                }
            });

        ui.separator();
        egui::Grid::new("toc_shortcuts")
            .num_columns(2)
            .spacing([24.0, 2.0])
            .show(ui, |ui| {
                for (keys, what) in SHORTCUTS {
                    ui.label(RichText::new(*keys).monospace().color(theme.accent));
                    ui.label(RichText::new(*what).color(theme.muted));
                    ui.end_row();
                }
            });
    });

    match selected {
        Some(entry) => TocOutcome::Select(entry),
        None if modal.should_close() => TocOutcome::Close,
        None => TocOutcome::Open,
    }
}
