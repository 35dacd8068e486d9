use eframe::egui;

use super::show_empty_state;
use crate::gui::state::{AppState, ThumbnailState};
use crate::photo::{dates, DateChoice, Photo, Scroll};

const NAV_HEIGHT: f32 = 32.0;
/// Space under each image for the date choice and entry
const DATE_INPUT_HEIGHT: f32 = 64.0;
const FILE_LABEL_HEIGHT: f32 = 24.0;
const DATE_ENTRY_WIDTH: f32 = 160.0;

const NAV_BUTTONS: [(&str, Scroll); 6] = [
    ("|<", Scroll::First),
    ("<<", Scroll::PrevPage),
    ("<", Scroll::Prev),
    (">", Scroll::Next),
    (">>", Scroll::NextPage),
    (">|", Scroll::Last),
];

/// Frame changes requested from the choice tab
#[derive(Default)]
pub struct ChoiceAction {
    pub scroll: Option<Scroll>,
    pub add_column: bool,
    pub remove_column: bool,
}

/// Choice tab: a frame of photo columns with date choice controls
pub fn choice_panel(ui: &mut egui::Ui, state: &mut AppState) -> ChoiceAction {
    let mut action = ChoiceAction::default();
    let busy = state.is_busy();

    let Some(list) = state.photos.as_mut() else {
        show_empty_state(ui, "No folder opened");
        return action;
    };

    // Column toolbar
    ui.horizontal(|ui| {
        if ui
            .add_enabled(
                !busy && list.viewport.can_remove_column(),
                egui::Button::new(" − "),
            )
            .on_hover_text("Fewer columns")
            .clicked()
        {
            action.remove_column = true;
        }
        if ui
            .add_enabled(
                !busy && list.viewport.can_add_column(),
                egui::Button::new(" + "),
            )
            .on_hover_text("More columns")
            .clicked()
        {
            action.add_column = true;
        }

        if !list.is_empty() {
            let range = list.viewport.range();
            ui.label(format!(
                "{}-{} of {}",
                range.start + 1,
                range.end,
                list.len()
            ));
        }
    });

    ui.separator();

    if list.is_empty() {
        show_empty_state(ui, "No JPEG photos in this folder");
        return action;
    }

    let range = list.viewport.range();
    let frame_height = (ui.available_height() - NAV_HEIGHT).max(120.0);
    let frame_size = egui::vec2(ui.available_width(), frame_height);
    let thumbnails = &state.runtime.thumbnails;

    ui.allocate_ui(frame_size, |ui| {
        ui.columns(range.len(), |columns| {
            for (ui, index) in columns.iter_mut().zip(range.clone()) {
                // Edits made during a save would be lost on the rescan
                ui.add_enabled_ui(!busy, |ui| {
                    photo_column(
                        ui,
                        &mut list.photos[index],
                        thumbnails.get(&index),
                        frame_height,
                    );
                });
            }
        });
    });

    // Navigation buttons
    ui.add_enabled_ui(!busy, |ui| {
        ui.columns(NAV_BUTTONS.len(), |columns| {
            for (ui, (label, step)) in columns.iter_mut().zip(NAV_BUTTONS) {
                let enabled = match step {
                    Scroll::First | Scroll::PrevPage | Scroll::Prev => {
                        list.viewport.can_scroll_back()
                    }
                    Scroll::Next | Scroll::NextPage | Scroll::Last => {
                        list.viewport.can_scroll_forward()
                    }
                };
                let button = egui::Button::new(label);
                let size = egui::vec2(ui.available_width(), NAV_HEIGHT - 8.0);
                if ui.add_enabled(enabled, button.min_size(size)).clicked() {
                    action.scroll = Some(step);
                }
            }
        });
    });

    action
}

/// One frame column: file name, clickable image and date input
fn photo_column(
    ui: &mut egui::Ui,
    photo: &mut Photo,
    thumbnail: Option<&ThumbnailState>,
    height: f32,
) {
    ui.vertical_centered(|ui| {
        ui.add_sized(
            [ui.available_width(), FILE_LABEL_HEIGHT],
            egui::Label::new(egui::RichText::new(photo.file_name()).strong()).truncate(),
        );

        let image_height = (height - FILE_LABEL_HEIGHT - DATE_INPUT_HEIGHT).max(40.0);
        let image_size = egui::vec2(ui.available_width(), image_height);

        let response = match thumbnail {
            Some(ThumbnailState::Loaded { texture, .. }) => {
                let tint = if photo.drop {
                    egui::Color32::from_white_alpha(128)
                } else {
                    egui::Color32::WHITE
                };
                let image = egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture))
                    .max_size(image_size)
                    .tint(tint)
                    .sense(egui::Sense::click());
                ui.add_sized(image_size, image)
            }
            Some(ThumbnailState::Failed) => {
                let (rect, response) = ui.allocate_exact_size(image_size, egui::Sense::click());
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Can't load image",
                    egui::FontId::default(),
                    egui::Color32::from_gray(120),
                );
                response
            }
            Some(ThumbnailState::Loading) | None => {
                let (rect, response) = ui.allocate_exact_size(image_size, egui::Sense::click());
                ui.put(
                    egui::Rect::from_center_size(rect.center(), egui::vec2(24.0, 24.0)),
                    egui::Spinner::new(),
                );
                response
            }
        };

        if photo.drop {
            ui.painter().text(
                response.rect.center(),
                egui::Align2::CENTER_CENTER,
                "DROPPED",
                egui::FontId::proportional(28.0),
                egui::Color32::from_rgb(255, 100, 100),
            );
        }

        if response.on_hover_text("Click to drop or keep").clicked() {
            photo.toggle_drop();
        }

        date_input(ui, photo);
    });
}

/// Radio group selecting the authoritative date, plus the date entry
fn date_input(ui: &mut egui::Ui, photo: &mut Photo) {
    ui.horizontal(|ui| {
        for choice in DateChoice::ALL {
            if ui.radio(photo.choice() == choice, choice.label()).clicked() {
                photo.set_choice(choice);
            }
        }
    });

    if photo.choice() == DateChoice::Manual {
        let valid = dates::is_valid_date(photo.chosen_date());
        let mut edit = egui::TextEdit::singleline(photo.manual_date_mut())
            .hint_text("YYYY:MM:DD HH:MM:SS")
            .desired_width(DATE_ENTRY_WIDTH);
        if !valid {
            edit = edit.text_color(egui::Color32::from_rgb(255, 100, 100));
        }
        ui.add(edit)
            .on_hover_text("Date written to the photo on save");
    } else {
        let mut shown = photo.chosen_date().to_string();
        ui.add(
            egui::TextEdit::singleline(&mut shown)
                .desired_width(DATE_ENTRY_WIDTH)
                .interactive(false),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoadedSettings;
    use crate::gui::state::{Operation, Status};
    use crate::photo::PhotoList;

    fn state_with_one_photo(dir: &std::path::Path) -> AppState {
        image::RgbImage::new(8, 8)
            .save(dir.join("a.jpg"))
            .unwrap();
        let settings = LoadedSettings {
            settings: Default::default(),
            path: None,
        };
        AppState::new(settings, Some(PhotoList::open(dir).unwrap()))
    }

    /// Press and release the pointer over the middle of the photo frame
    fn click_photo(state: &mut AppState) {
        let ctx = egui::Context::default();
        let screen = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0));
        let pos = egui::pos2(400.0, 250.0);
        let button = |pressed| egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        };

        for events in [vec![egui::Event::PointerMoved(pos)], vec![button(true)], vec![button(false)]] {
            let input = egui::RawInput {
                screen_rect: Some(screen),
                events,
                ..Default::default()
            };
            let _ = ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    choice_panel(ui, state);
                });
            });
        }
    }

    #[test]
    fn test_click_toggles_drop() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with_one_photo(dir.path());

        click_photo(&mut state);

        assert!(state.photos.as_ref().unwrap().photos[0].drop);
    }

    #[test]
    fn test_photo_locked_while_saving() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with_one_photo(dir.path());
        state.runtime.status = Status::working(Operation::Saving);

        click_photo(&mut state);

        assert!(!state.photos.as_ref().unwrap().photos[0].drop);
    }
}
