use super::upload_screen::{ChosenImage, Msg, UploadScreen};
use super::utils::first_file;
use crate::{api, Route};
use gloo_file::File as GlooFile;
use shared::upload::Submission;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;
use yew_router::prelude::*;

pub fn handle_file_chosen(screen: &mut UploadScreen, file: GlooFile) -> bool {
    let name = file.name();
    match screen.state.select_file(ChosenImage::new(file)) {
        Ok(()) => log::info!("Selected image {}", name),
        Err(err) => log::warn!("Skipping {}: {}", name, err),
    }
    true
}

pub fn handle_submit(screen: &mut UploadScreen, ctx: &Context<UploadScreen>) -> bool {
    match screen.state.submit() {
        Some(submission) => {
            send_prediction_request(ctx, submission);
            true
        }
        None => false,
    }
}

pub fn send_prediction_request(ctx: &Context<UploadScreen>, submission: Submission<ChosenImage>) {
    spawn_local({
        let link = ctx.link().clone();

        async move {
            let outcome = api::predict(&submission.payload).await;
            link.send_message(Msg::PredictionSettled(submission.tag, outcome));
        }
    });
}

pub fn handle_drop(screen: &mut UploadScreen, ctx: &Context<UploadScreen>, event: DragEvent) -> bool {
    event.prevent_default();
    screen.is_dragging = false;

    if let Some(file) = event.data_transfer().and_then(|dt| dt.files()).as_ref().and_then(first_file) {
        ctx.link().send_message(Msg::FileChosen(file));
    }

    true
}

/// Pasted files are treated like chosen ones; pasted text is left alone so the
/// URL field keeps working.
pub fn handle_paste(ctx: &Context<UploadScreen>, event: ClipboardEvent) -> bool {
    let file_list = event.clipboard_data().and_then(|dt| dt.files());
    if let Some(file) = file_list.as_ref().and_then(first_file) {
        event.prevent_default();
        ctx.link().send_message(Msg::FileChosen(file));
    }
    false
}

pub fn handle_open_chat(ctx: &Context<UploadScreen>) -> bool {
    match ctx.link().navigator() {
        Some(navigator) => navigator.push(&Route::Chat),
        None => log::error!("No router available for navigation"),
    }
    false
}
