use super::chat_screen::{ChatScreen, Msg};
use web_sys::HtmlInputElement;
use yew::prelude::*;

pub fn render_chat_input(screen: &ChatScreen, ctx: &Context<ChatScreen>) -> Html {
    let link = ctx.link();
    let transcript = &screen.transcript;
    let loading = transcript.is_loading();

    let handle_input = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::DraftChanged(input.value())
    });
    let handle_key = link.batch_callback(|e: KeyboardEvent| (e.key() == "Enter").then_some(Msg::Send));

    html! {
        <div class="d-flex gap-2 flex-wrap">
            <div class="input-group flex-grow-1">
                <input
                    type="text"
                    class="form-control rounded-start-pill border-success"
                    placeholder="Ask me about potato leaf diseases..."
                    value={transcript.draft().to_string()}
                    oninput={handle_input}
                    onkeypress={handle_key}
                    disabled={loading}
                />
                <button
                    class="btn btn-success rounded-end-pill px-4"
                    onclick={link.callback(|_| Msg::Send)}
                    disabled={!transcript.can_send()}
                >
                    if loading {
                        <span><i class="fas fa-circle-notch fa-spin me-1"></i>{" Sending..."}</span>
                    } else {
                        {"Send"}
                    }
                </button>
            </div>

            <div class="d-flex flex-wrap gap-2 mt-2 w-100 justify-content-between">
                <button
                    class="btn btn-outline-danger rounded-pill flex-grow-1"
                    onclick={link.callback(|_| Msg::Clear)}
                    disabled={loading}
                >
                    {"Clear Chat"}
                </button>
                <button
                    class="btn btn-outline-primary rounded-pill flex-grow-1"
                    onclick={link.callback(|_| Msg::Export)}
                    disabled={!transcript.can_export()}
                >
                    {"Download Chat as PDF"}
                </button>
            </div>
        </div>
    }
}
