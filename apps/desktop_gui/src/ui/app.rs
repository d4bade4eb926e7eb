use std::{collections::BTreeMap, time::Duration};

use client_core::{
    controller::FormFieldView, render::CompareTable, Action, CardAction, ClickTarget,
    CompanyCard, CompareView, DetailsView, ListView, ModalKind, View, ViewModel,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{domain::CompanyId, schema::FieldKind};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};

const COMPARE_IDLE_HINT: &str = "Select companies on the list and press Compare.";

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    view: ViewModel,
    /// Local edit buffer; replaced whenever the controller bumps the form revision.
    form_buffer: BTreeMap<&'static str, String>,
    form_revision: Option<u64>,
    /// Checkbox states sent to the controller but not yet seen in a render.
    pending_selection: BTreeMap<CompanyId, bool>,
    status: String,
    server_url: String,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        initial: ViewModel,
        server_url: String,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            form_buffer: form_buffer_from(&initial.form.fields),
            form_revision: Some(initial.form.revision),
            pending_selection: BTreeMap::new(),
            view: initial,
            status: "Ready".to_string(),
            server_url,
        };
        // The list view is active at startup; entering it fetches the records.
        app.send(Action::Navigate(View::List));
        app
    }

    fn send(&mut self, action: Action) {
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Dispatch(action),
            &mut self.status,
        );
    }

    fn send_all(&mut self, actions: Vec<Action>) {
        for action in actions {
            self.send(action);
        }
    }

    fn apply_view(&mut self, view: ViewModel) {
        if self.form_revision != Some(view.form.revision) {
            self.form_buffer = form_buffer_from(&view.form.fields);
            self.form_revision = Some(view.form.revision);
        }
        reconcile_selection(&mut self.pending_selection, &view.list);
        self.view = view;
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Render(view) => self.apply_view(*view),
                UiEvent::Info(message) => self.status = message,
                UiEvent::Fatal(message) => {
                    tracing::error!("{message}");
                    self.status = message;
                }
            }
        }
    }

    fn show_nav(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Company information");
                ui.separator();
                for view in View::ALL {
                    let active = self.view.active_view == view;
                    if ui.selectable_label(active, view.label()).clicked() {
                        actions.push(Action::Navigate(view));
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(&self.server_url);
                    ui.separator();
                    ui.label(&self.status);
                });
            });
        });
        self.send_all(actions);
    }

    fn show_list(&mut self, ui: &mut egui::Ui) {
        let mut actions = Vec::new();
        ui.horizontal(|ui| {
            ui.heading("Registered companies");
            if ui.button("Compare selected").clicked() {
                actions.push(Action::Compare);
            }
        });
        ui.separator();

        let pending = &mut self.pending_selection;
        match &self.view.list {
            ListView::NotLoaded => {}
            ListView::Loading { message } | ListView::Empty { message } => {
                ui.label(*message);
            }
            ListView::Cards(cards) => {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    for card in cards {
                        egui::Frame::group(ui.style()).show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.horizontal(|ui| {
                                let mut checked = displayed_selection(pending, card);
                                if ui.checkbox(&mut checked, "").changed() {
                                    actions.push(record_selection(pending, card, checked));
                                }
                                let name = ui.add(
                                    egui::Label::new(egui::RichText::new(&card.name).strong())
                                        .sense(egui::Sense::click()),
                                );
                                if name.clicked() {
                                    actions.push(card.action(CardAction::ShowDetails));
                                }
                                ui.label(format!("Founded: {}", card.founded));
                                ui.label(format!("Employees: {}", card.employees));
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.button("Delete").clicked() {
                                            actions.push(card.action(CardAction::Delete));
                                        }
                                        if ui.button("Edit").clicked() {
                                            actions.push(card.action(CardAction::Edit));
                                        }
                                        if ui.button("Details").clicked() {
                                            actions.push(card.action(CardAction::ShowDetails));
                                        }
                                    },
                                );
                            });
                        });
                    }
                });
            }
        }
        self.send_all(actions);
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        let mut actions = Vec::new();
        let form = &self.view.form;
        let buffer = &mut self.form_buffer;

        ui.heading(form.title);
        ui.separator();
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("company_form")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    for field in &form.fields {
                        if field.required {
                            ui.label(format!("{} *", field.label));
                        } else {
                            ui.label(field.label);
                        }
                        let value = buffer.entry(field.key).or_default();
                        let edit = match field.kind {
                            FieldKind::MultiLine => egui::TextEdit::multiline(value)
                                .desired_rows(3)
                                .desired_width(360.0),
                            FieldKind::Date => egui::TextEdit::singleline(value)
                                .hint_text("YYYY-MM-DD")
                                .desired_width(360.0),
                            FieldKind::Number => egui::TextEdit::singleline(value)
                                .hint_text("0")
                                .desired_width(360.0),
                            FieldKind::Text => {
                                egui::TextEdit::singleline(value).desired_width(360.0)
                            }
                        };
                        if ui.add(edit).changed() {
                            actions.push(Action::SetField {
                                key: field.key.to_string(),
                                value: value.clone(),
                            });
                        }
                        ui.end_row();
                    }
                });

            ui.add_space(8.0);
            let ready = required_fields_filled(&form.fields, buffer);
            let submit = ui.add_enabled(ready, egui::Button::new(form.submit_label));
            if submit.clicked() {
                actions.push(Action::Submit);
            }
            if !ready {
                ui.weak("Fields marked * are required.");
            }
        });
        self.send_all(actions);
    }

    fn show_compare(&self, ui: &mut egui::Ui) {
        ui.heading("Comparison");
        ui.separator();
        match &self.view.compare {
            CompareView::Idle => {
                ui.label(COMPARE_IDLE_HINT);
            }
            CompareView::Empty { message } => {
                ui.label(*message);
            }
            CompareView::Table(table) => compare_grid(ui, table),
        }
    }

    fn show_modals(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();

        if let Some(details) = &self.view.details {
            let modal = egui::Modal::new(egui::Id::new("details_modal"))
                .show(ctx, |ui| details_body(ui, details));
            actions.extend(modal_actions(
                ModalKind::Details,
                modal.inner,
                modal.backdrop_response.clicked(),
                modal.should_close(),
            ));
        }

        if let Some(prompt) = &self.view.confirm {
            let modal = egui::Modal::new(egui::Id::new("confirm_delete_modal")).show(ctx, |ui| {
                ui.set_width(320.0);
                ui.label(prompt.message);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Delete").clicked() {
                        Some(Action::ConfirmDelete)
                    } else if ui.button("Cancel").clicked() {
                        Some(Action::CancelDelete)
                    } else {
                        None
                    }
                })
                .inner
            });
            match modal.inner {
                Some(action) => actions.push(action),
                None if modal.should_close() => actions.push(Action::CancelDelete),
                None => {}
            }
        }

        // Drawn last so it stacks above the details dialog.
        if let Some(alert) = &self.view.alert {
            let modal = egui::Modal::new(egui::Id::new("alert_modal")).show(ctx, |ui| {
                ui.set_width(320.0);
                ui.label(alert.as_str());
                ui.add_space(8.0);
                ui.button("Close").clicked()
            });
            actions.extend(modal_actions(
                ModalKind::Alert,
                modal.inner,
                modal.backdrop_response.clicked(),
                modal.should_close(),
            ));
        }

        self.send_all(actions);
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.show_nav(ctx);
        egui::CentralPanel::default().show(ctx, |ui| match self.view.active_view {
            View::List => self.show_list(ui),
            View::Register => self.show_form(ui),
            View::Compare => self.show_compare(ui),
        });
        self.show_modals(ctx);
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

fn details_body(ui: &mut egui::Ui, details: &DetailsView) -> bool {
    ui.set_max_width(520.0);
    ui.heading(&details.title);
    ui.separator();
    egui::ScrollArea::vertical().max_height(420.0).show(ui, |ui| {
        egui::Grid::new("details_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                for entry in &details.entries {
                    ui.strong(entry.label);
                    ui.label(&entry.value);
                    ui.end_row();
                }
            });
    });
    ui.add_space(8.0);
    ui.button("Close").clicked()
}

fn compare_grid(ui: &mut egui::Ui, table: &CompareTable) {
    egui::ScrollArea::both().show(ui, |ui| {
        egui::Grid::new("compare_grid")
            .num_columns(table.header.len())
            .striped(true)
            .show(ui, |ui| {
                for heading in &table.header {
                    ui.strong(heading);
                }
                ui.end_row();
                for row in &table.rows {
                    ui.strong(row.label);
                    for cell in &row.cells {
                        ui.label(cell);
                    }
                    ui.end_row();
                }
            });
    });
}

/// Close button and Escape close the dialog; backdrop clicks go through the
/// controller's click routing so content clicks never dismiss it.
fn modal_actions(
    kind: ModalKind,
    close_clicked: bool,
    backdrop_clicked: bool,
    should_close: bool,
) -> Option<Action> {
    if close_clicked {
        Some(Action::CloseModal(kind))
    } else if backdrop_clicked {
        Some(Action::ModalClicked {
            kind,
            target: ClickTarget::Backdrop,
        })
    } else if should_close {
        Some(Action::CloseModal(kind))
    } else {
        None
    }
}

fn displayed_selection(pending: &BTreeMap<CompanyId, bool>, card: &CompanyCard) -> bool {
    pending.get(&card.id).copied().unwrap_or(card.selected)
}

/// The checkbox's new state is sent as-is, so clicks that land before the
/// next render still alternate.
fn record_selection(
    pending: &mut BTreeMap<CompanyId, bool>,
    card: &CompanyCard,
    checked: bool,
) -> Action {
    pending.insert(card.id.clone(), checked);
    Action::SetSelected {
        id: card.id.clone(),
        selected: checked,
    }
}

/// Drops pending states the render now agrees with, and any for cards that
/// are no longer shown.
fn reconcile_selection(pending: &mut BTreeMap<CompanyId, bool>, list: &ListView) {
    let cards = list.cards();
    pending.retain(|id, selected| {
        cards
            .iter()
            .any(|card| &card.id == id && card.selected != *selected)
    });
}

fn form_buffer_from(fields: &[FormFieldView]) -> BTreeMap<&'static str, String> {
    fields
        .iter()
        .map(|field| (field.key, field.value.clone()))
        .collect()
}

fn required_fields_filled(
    fields: &[FormFieldView],
    buffer: &BTreeMap<&'static str, String>,
) -> bool {
    fields
        .iter()
        .filter(|field| field.required)
        .all(|field| buffer.get(field.key).is_some_and(|v| !v.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{Controller, DateStyle};
    use crossbeam_channel::bounded;

    fn app() -> (DesktopGuiApp, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = bounded(16);
        let (_ui_tx, ui_rx) = bounded(16);
        let initial = Controller::new(DateStyle::default()).view();
        let app = DesktopGuiApp::new(cmd_tx, ui_rx, initial, "http://127.0.0.1:5000".into());
        (app, cmd_rx)
    }

    #[test]
    fn startup_requests_the_list_view() {
        let (_app, cmd_rx) = app();
        assert_eq!(
            cmd_rx.try_recv().expect("startup command"),
            BackendCommand::Dispatch(Action::Navigate(View::List))
        );
    }

    #[test]
    fn submit_requires_company_name() {
        let (mut app, _cmd_rx) = app();
        assert!(!required_fields_filled(&app.view.form.fields, &app.form_buffer));

        app.form_buffer.insert("companyName", "  ".into());
        assert!(!required_fields_filled(&app.view.form.fields, &app.form_buffer));

        app.form_buffer.insert("companyName", "Acme".into());
        assert!(required_fields_filled(&app.view.form.fields, &app.form_buffer));
    }

    #[test]
    fn buffer_resyncs_only_when_form_revision_changes() {
        let (mut app, _cmd_rx) = app();
        let mut controller = Controller::new(DateStyle::default());
        app.form_buffer.insert("companyName", "typing".into());

        app.apply_view(controller.view());
        assert_eq!(app.form_buffer["companyName"], "typing");

        controller.handle(Action::SetField {
            key: "companyName".into(),
            value: "Acme".into(),
        });
        controller.handle(Action::Navigate(View::Register));
        app.apply_view(controller.view());
        assert_eq!(app.form_buffer["companyName"], "");
    }

    fn card(id: &str, selected: bool) -> CompanyCard {
        CompanyCard {
            id: CompanyId::new(id),
            name: "Acme".into(),
            founded: "Unknown".into(),
            employees: "Unknown".into(),
            selected,
        }
    }

    #[test]
    fn rapid_checkbox_clicks_alternate_before_render() {
        let mut pending = BTreeMap::new();
        let stale = card("1", false);

        assert!(!displayed_selection(&pending, &stale));
        assert_eq!(
            record_selection(&mut pending, &stale, true),
            Action::SetSelected {
                id: CompanyId::new("1"),
                selected: true,
            }
        );

        // Second click against the same stale snapshot unchecks.
        assert!(displayed_selection(&pending, &stale));
        assert_eq!(
            record_selection(&mut pending, &stale, false),
            Action::SetSelected {
                id: CompanyId::new("1"),
                selected: false,
            }
        );

        // Render of the first click: the second is still in flight.
        reconcile_selection(&mut pending, &ListView::Cards(vec![card("1", true)]));
        assert!(!displayed_selection(&pending, &card("1", true)));

        reconcile_selection(&mut pending, &ListView::Cards(vec![card("1", false)]));
        assert!(pending.is_empty());
    }

    #[test]
    fn pending_selection_is_dropped_when_cards_are_rebuilt() {
        let mut pending = BTreeMap::new();
        record_selection(&mut pending, &card("1", false), true);
        reconcile_selection(
            &mut pending,
            &ListView::Loading {
                message: "Loading...",
            },
        );
        assert!(pending.is_empty());
    }

    #[test]
    fn backdrop_click_is_routed_and_close_wins() {
        assert_eq!(
            modal_actions(ModalKind::Details, false, true, true),
            Some(Action::ModalClicked {
                kind: ModalKind::Details,
                target: ClickTarget::Backdrop,
            })
        );
        assert_eq!(
            modal_actions(ModalKind::Alert, true, false, false),
            Some(Action::CloseModal(ModalKind::Alert))
        );
        assert_eq!(
            modal_actions(ModalKind::Alert, false, false, true),
            Some(Action::CloseModal(ModalKind::Alert))
        );
        assert_eq!(modal_actions(ModalKind::Alert, false, false, false), None);
    }
}
