use super::chat_box::render_chat_box;
use super::chat_input::render_chat_input;
use super::header::{render_footer, render_navbar};
use crate::{api, export, Route};
use shared::chat::{ChatTranscript, OutgoingMessage};
use shared::{FetchError, RequestTag};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

pub enum Msg {
    DraftChanged(String),
    Send,
    ReplySettled(RequestTag, Result<String, FetchError>),
    Clear,
    Export,
    GoHome,
}

pub struct ChatScreen {
    pub transcript: ChatTranscript,
    pub chat_box: NodeRef,
}

impl Component for ChatScreen {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            transcript: ChatTranscript::default(),
            chat_box: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::DraftChanged(text) => {
                self.transcript.set_draft(text);
                true
            }
            Msg::Send => match self.transcript.send() {
                Some(outgoing) => {
                    send_chat_request(ctx, outgoing);
                    true
                }
                None => false,
            },
            Msg::ReplySettled(tag, outcome) => self.transcript.resolve(tag, outcome),
            Msg::Clear => {
                self.transcript.clear();
                true
            }
            Msg::Export => {
                if self.transcript.can_export() {
                    if let Err(err) = export::export_transcript(self.transcript.exchanges()) {
                        log::error!("Transcript export failed: {}", err);
                    }
                }
                false
            }
            Msg::GoHome => {
                match ctx.link().navigator() {
                    Some(navigator) => navigator.push(&Route::Upload),
                    None => log::error!("No router available for navigation"),
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="d-flex flex-column min-vh-100 bg-white">
                { render_navbar() }

                <main class="container my-5 flex-grow-1 d-flex justify-content-center align-items-center">
                    <div class="card w-100 shadow-lg border-0 rounded-4 chat-card">
                        <div class="card-body p-4 d-flex flex-column">
                            <h3 class="text-center mb-4 chat-title">{"🍃 Potato Leaf Disease Chatbot"}</h3>
                            { render_chat_box(self) }
                            { render_chat_input(self, ctx) }
                            <button
                                class="btn btn-outline-success rounded-pill mt-3"
                                onclick={ctx.link().callback(|_| Msg::GoHome)}
                            >
                                {"Back to Home"}
                            </button>
                        </div>
                    </div>
                </main>

                { render_footer() }
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        // Keep the newest exchange in view.
        if let Some(chat_box) = self.chat_box.cast::<web_sys::Element>() {
            chat_box.set_scroll_top(chat_box.scroll_height());
        }
    }
}

fn send_chat_request(ctx: &Context<ChatScreen>, outgoing: OutgoingMessage) {
    spawn_local({
        let link = ctx.link().clone();

        async move {
            let outcome = api::chat(outgoing.text).await;
            link.send_message(Msg::ReplySettled(outgoing.tag, outcome));
        }
    });
}
