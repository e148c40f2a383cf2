// Main application layout
// Handles window layout, panels, menu bar, and overall UI structure

use crate::state::{AgentId, AgentModel, AppState, EditMode};
use crate::state::agent::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, TEMPERATURE_RANGE};
use crate::ui::components::*;
use eframe::egui;

/// Action picked in the sidebar, applied after the list is drawn
enum SidebarAction {
    Select(AgentId),
    Delete(AgentId),
}

/// Render the main application layout
/// Includes menu bar, sidebar, main content area, and status line
pub fn render_app_layout(ctx: &egui::Context, state: &mut AppState) {
    render_menu_bar(ctx, state);
    render_status_line(ctx, state);

    if state.ui_state.sidebar_visible {
        render_sidebar(ctx, state);
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        let has_selection = state.store.selected_agent().is_some();
        if has_selection {
            render_agent_header(ui, state);
            ui.separator();
            match state.session.mode() {
                EditMode::Editing => render_edit_form(ui, state),
                EditMode::Viewing => render_chat(ui, state),
            }
        } else {
            empty_state(
                ui,
                "🤖",
                "Bir ajan seçin veya oluşturun",
                "Sol taraftan bir ajan seçin veya yeni bir ajan oluşturun",
            );
        }
    });
}

/// Render the top menu bar
fn render_menu_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New Agent").clicked() {
                    state.create_agent();
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                let mut dark_mode = ctx.style().visuals.dark_mode;
                if ui.checkbox(&mut dark_mode, "Dark Mode").changed() {
                    let visuals = if dark_mode {
                        egui::Visuals::dark()
                    } else {
                        egui::Visuals::light()
                    };
                    ctx.set_visuals(visuals);
                }
                ui.checkbox(&mut state.ui_state.sidebar_visible, "Sidebar");
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new("AI Agents Platform").strong());
            });
        });
    });
}

/// Render the bottom status line when there is something to report
fn render_status_line(ctx: &egui::Context, state: &mut AppState) {
    let Some(status) = state.ui_state.status_line.clone() else {
        return;
    };
    egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.colored_label(egui::Color32::from_rgb(220, 60, 60), status);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✖").clicked() {
                    state.ui_state.status_line = None;
                }
            });
        });
    });
}

/// Render the left sidebar with agent list
fn render_sidebar(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::left("agent_sidebar")
        .resizable(true)
        .default_width(260.0)
        .min_width(180.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading("Ajanlarım");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button(ui, "+").on_hover_text("Yeni ajan").clicked() {
                        state.create_agent();
                    }
                });
            });
            ui.add_space(4.0);
            ui.separator();

            // Collect rows first to avoid borrowing the store while mutating it
            let rows: Vec<(AgentId, String, String)> = state
                .store
                .agents()
                .iter()
                .map(|a| (a.id.clone(), a.name.clone(), a.description.clone()))
                .collect();
            let selected_id = state.store.selected_agent_id().cloned();
            let mut action = None;

            egui::ScrollArea::vertical()
                .id_source("agent_list_scroll")
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    for (id, name, description) in rows {
                        let is_selected = selected_id.as_ref() == Some(&id);
                        let mut frame = egui::Frame::none()
                            .rounding(egui::Rounding::same(6.0))
                            .inner_margin(egui::Margin::same(8.0));
                        if is_selected {
                            frame = frame.fill(ui.visuals().selection.bg_fill);
                        }

                        frame.show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    if ui.selectable_label(is_selected, egui::RichText::new(&name).strong()).clicked() {
                                        action = Some(SidebarAction::Select(id.clone()));
                                    }
                                    ui.label(egui::RichText::new(&description).weak().small());
                                });
                                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                                    if delete_button(ui).clicked() {
                                        action = Some(SidebarAction::Delete(id.clone()));
                                    }
                                });
                            });
                        });
                        ui.add_space(4.0);
                    }
                });

            match action {
                Some(SidebarAction::Select(id)) => {
                    state.select_agent(&id);
                }
                Some(SidebarAction::Delete(id)) => {
                    state.delete_agent(&id);
                }
                None => {}
            }
        });
}

/// Render the selected agent's name, description and the edit toggle
fn render_agent_header(ui: &mut egui::Ui, state: &mut AppState) {
    let Some(agent) = state.store.selected_agent() else {
        return;
    };
    let (name, description) = (agent.name.clone(), agent.description.clone());
    let mode = state.session.mode();

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.heading(egui::RichText::new(name).size(20.0));
            ui.label(egui::RichText::new(description).weak());
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if primary_button(ui, edit_toggle_label(mode)).clicked() {
                state.toggle_edit();
            }
            if state.has_unsaved_changes() {
                ui.label(egui::RichText::new("Kaydedilmemiş değişiklikler").italics().weak());
            }
        });
    });
    ui.add_space(8.0);
}

/// Render the edit form bound to the draft
fn render_edit_form(ui: &mut egui::Ui, state: &mut AppState) {
    let mut save_clicked = false;

    egui::ScrollArea::vertical()
        .id_source("edit_form_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            let Some(draft) = state.draft_mut() else {
                return;
            };
            ui.set_max_width(720.0);
            ui.add_space(12.0);

            ui.label(egui::RichText::new("Ajan Adı").strong());
            let mut name = draft.name.clone().unwrap_or_default();
            if ui.add(egui::TextEdit::singleline(&mut name).desired_width(f32::INFINITY)).changed() {
                draft.name = Some(name);
            }
            ui.add_space(12.0);

            ui.label(egui::RichText::new("Açıklama").strong());
            let mut description = draft.description.clone().unwrap_or_default();
            if ui
                .add(egui::TextEdit::singleline(&mut description).desired_width(f32::INFINITY))
                .changed()
            {
                draft.description = Some(description);
            }
            ui.add_space(12.0);

            ui.label(egui::RichText::new("System Prompt").strong());
            let mut prompt = draft.prompt.clone().unwrap_or_default();
            if ui
                .add(
                    egui::TextEdit::multiline(&mut prompt)
                        .desired_rows(6)
                        .desired_width(f32::INFINITY),
                )
                .changed()
            {
                draft.prompt = Some(prompt);
            }
            ui.add_space(12.0);

            ui.columns(2, |columns| {
                columns[0].label(egui::RichText::new("Model").strong());
                let mut model = draft.model.unwrap_or_default();
                let mut model_changed = false;
                egui::ComboBox::from_id_source("model_select")
                    .selected_text(model.display_name())
                    .show_ui(&mut columns[0], |ui| {
                        for option in AgentModel::ALL {
                            model_changed |= ui
                                .selectable_value(&mut model, option, option.display_name())
                                .on_hover_text(option.as_str())
                                .changed();
                        }
                    });
                if model_changed {
                    draft.model = Some(model);
                }

                let mut temperature = draft.temperature.unwrap_or(DEFAULT_TEMPERATURE);
                columns[1].label(egui::RichText::new(format!("Temperature: {:.1}", temperature)).strong());
                if columns[1]
                    .add(egui::Slider::new(&mut temperature, TEMPERATURE_RANGE).step_by(0.1))
                    .changed()
                {
                    draft.temperature = Some(temperature);
                }
            });
            ui.add_space(12.0);

            ui.label(egui::RichText::new("Max Tokens").strong());
            let mut max_tokens = draft.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
            if ui.add(egui::DragValue::new(&mut max_tokens).speed(10)).changed() {
                draft.max_tokens = Some(max_tokens);
            }
            ui.add_space(20.0);

            save_clicked = save_button(ui).clicked();
        });

    if save_clicked {
        if let Err(e) = state.save_draft() {
            state.ui_state.status_line = Some(e.to_string());
        }
    }
}

/// Render the transcript and the message input
fn render_chat(ui: &mut egui::Ui, state: &mut AppState) {
    let agent_name = state
        .store
        .selected_agent()
        .map(|a| a.name.clone())
        .unwrap_or_default();

    egui::TopBottomPanel::bottom("chat_input")
        .show_separator_line(true)
        .show_inside(ui, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let input = ui.add(
                    egui::TextEdit::singleline(&mut state.session.input)
                        .hint_text("Mesajınızı yazın...")
                        .desired_width(ui.available_width() - 110.0),
                );
                let enter = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if primary_button(ui, "▶ Gönder").clicked() || enter {
                    state.send_message();
                    input.request_focus();
                }
            });
            ui.add_space(8.0);
        });

    egui::ScrollArea::vertical()
        .id_source("transcript_scroll")
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            let transcript = state.session.transcript();
            if transcript.is_empty() {
                empty_state(
                    ui,
                    "💬",
                    "Ajanınızla konuşmaya başlayın",
                    &format!(
                        "Aşağıdaki mesaj kutusuna yazarak {} ile etkileşime geçebilirsiniz.",
                        agent_name
                    ),
                );
            } else {
                ui.add_space(8.0);
                for message in transcript {
                    message_bubble(ui, message);
                    ui.add_space(6.0);
                }
            }
        });
}
