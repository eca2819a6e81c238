use super::handlers;
use super::header::{render_footer, render_navbar};
use super::preview_area::render_preview_area;
use super::results::render_results;
use super::upload_section::render_upload_section;
use super::utils::render_error_message;
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::upload::{ImageFile, InputMethod, UploadState};
use shared::{FetchError, PredictResponse, RequestTag};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

/// A file picked on the device together with its preview URL.
///
/// The object URL is revoked once the last clone is dropped.
#[derive(Clone)]
pub struct ChosenImage {
    pub file: GlooFile,
    pub preview: ObjectUrl,
}

impl ChosenImage {
    pub fn new(file: GlooFile) -> Self {
        let preview = ObjectUrl::from(file.clone());
        Self { file, preview }
    }
}

impl ImageFile for ChosenImage {
    fn mime_type(&self) -> String {
        self.file.raw_mime_type()
    }

    fn size(&self) -> u64 {
        self.file.size()
    }

    fn preview_src(&self) -> String {
        self.preview.to_string()
    }
}

pub enum Msg {
    // Input
    MethodSelected(InputMethod),
    FileChosen(GlooFile),
    UrlChanged(String),

    // Classification
    Submit,
    PredictionSettled(RequestTag, Result<PredictResponse, FetchError>),
    Clear,

    // UI states
    SetDragging(bool),
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
    OpenChat,
}

pub struct UploadScreen {
    pub state: UploadState<ChosenImage>,
    pub is_dragging: bool,
    _paste_listener: Option<EventListener>,
}

impl Component for UploadScreen {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        let paste_listener = web_sys::window().map(|window| {
            EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            })
        });

        Self {
            state: UploadState::default(),
            is_dragging: false,
            _paste_listener: paste_listener,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::MethodSelected(method) => {
                self.state.select_method(method);
                true
            }
            Msg::FileChosen(file) => handlers::handle_file_chosen(self, file),
            Msg::UrlChanged(url) => {
                self.state.set_url(url);
                true
            }

            Msg::Submit => handlers::handle_submit(self, ctx),
            Msg::PredictionSettled(tag, outcome) => self.state.resolve(tag, outcome),
            Msg::Clear => {
                self.state.clear();
                true
            }

            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(ctx, event),
            Msg::OpenChat => handlers::handle_open_chat(ctx),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let error = self.state.validation_error().map(|err| err.to_string());

        html! {
            <div class="d-flex flex-column min-vh-100">
                { render_navbar() }

                <main class="container mt-5 flex-grow-1">
                    <div class="card shadow-lg p-4">
                        <h2 class="text-center mb-4 text-success">{"🍃 Upload Potato Leaf Image"}</h2>
                        { render_upload_section(self, ctx) }
                        { render_error_message(error.as_deref()) }
                        { render_preview_area(self, ctx) }
                        { render_results(self, ctx) }
                    </div>
                </main>

                { render_footer() }
            </div>
        }
    }
}
