use eframe::egui::{self, Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use super::format::format_count;
use crate::data::aggregate::{SortColumn, SortDirection, page_bounds};
use crate::data::model::{CompanyRecord, Metric};
use crate::data::normalize::MAX_RATING;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 22.0;

/// Grid columns in display order.
const COLUMNS: [SortColumn; 6] = [
    SortColumn::Name,
    SortColumn::Metric(Metric::Rating),
    SortColumn::Metric(Metric::Reviews),
    SortColumn::Metric(Metric::Salaries),
    SortColumn::Metric(Metric::Interviews),
    SortColumn::Metric(Metric::Jobs),
];

fn header_label(column: SortColumn) -> &'static str {
    match column {
        SortColumn::Name => "Company",
        SortColumn::Metric(m) => m.label(),
    }
}

// ---------------------------------------------------------------------------
// Full company database (sortable, paginated)
// ---------------------------------------------------------------------------

pub fn company_table(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Full Company Database");

    let Some(ds) = state.dataset.clone() else {
        return;
    };
    let total = state.grid_order.len();
    let (start, end) = page_bounds(total, state.page, state.page_size);
    let rows = &state.grid_order[start..end];
    let sort = state.grid_sort;

    let mut clicked: Option<SortColumn> = None;

    TableBuilder::new(ui)
        .id_salt("company_table")
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::remainder().at_least(180.0).clip(true))
        .column(Column::initial(140.0).at_least(100.0))
        .columns(Column::initial(110.0).at_least(80.0), 4)
        .header(ROW_HEIGHT, |mut header| {
            for column in COLUMNS {
                header.col(|ui: &mut Ui| {
                    let mut text = header_label(column).to_string();
                    if sort.column == column {
                        text.push_str(match sort.direction {
                            SortDirection::Ascending => " ⏶",
                            SortDirection::Descending => " ⏷",
                        });
                    }
                    if ui.button(RichText::new(text).strong()).clicked() {
                        clicked = Some(column);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let rec: &CompanyRecord = &ds.records[rows[row.index()]];
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.name);
                });
                row.col(|ui: &mut Ui| {
                    ui.add(
                        egui::ProgressBar::new((rec.rating / MAX_RATING) as f32)
                            .text(format!("{:.1}", rec.rating)),
                    );
                });
                for metric in Metric::COUNTS {
                    row.col(|ui: &mut Ui| {
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
                            ui.label(format_count(rec.metric(metric)));
                        });
                    });
                }
            });
        });

    if let Some(column) = clicked {
        state.sort_by(column);
    }

    // ---- Pagination ----
    ui.horizontal(|ui: &mut Ui| {
        let pages = state.page_count();
        if ui
            .add_enabled(state.page > 0, egui::Button::new("◀ Prev"))
            .clicked()
        {
            state.prev_page();
        }
        ui.label(format!("Page {} of {pages}", state.page + 1));
        if ui
            .add_enabled(state.page + 1 < pages, egui::Button::new("Next ▶"))
            .clicked()
        {
            state.next_page();
        }
        ui.separator();
        if total > 0 {
            ui.label(format!("Rows {}–{} of {total}", start + 1, end));
        } else {
            ui.label("No companies match the filters");
        }
    });
}
