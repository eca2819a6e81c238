use super::upload_screen::{Msg, UploadScreen};
use yew::prelude::*;

pub fn render_results(screen: &UploadScreen, ctx: &Context<UploadScreen>) -> Html {
    let state = &screen.state;

    html! {
        <>
            if !state.prediction().is_empty() {
                <div class="alert alert-info mt-4 results-container">
                    <h5>{"Prediction:"}</h5>
                    <p><strong>{ state.prediction().to_string() }</strong></p>
                </div>
            }
            if !state.info().is_empty() {
                <div class="alert alert-light border mt-3 detailed-results">
                    <h5 class="text-success mb-3">{"Detailed Information"}</h5>
                    <div class="info-text">{ state.info().to_string() }</div>
                    <button
                        class="btn btn-primary mt-3"
                        onclick={ctx.link().callback(|_| Msg::OpenChat)}
                    >
                        {"Chat with the Bot"}
                    </button>
                </div>
            }
        </>
    }
}
