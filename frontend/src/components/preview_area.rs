use super::upload_screen::{Msg, UploadScreen};
use super::utils::debounce;
use yew::prelude::*;

pub fn render_preview_area(screen: &UploadScreen, ctx: &Context<UploadScreen>) -> Html {
    let link = ctx.link().clone();
    let state = &screen.state;

    html! {
        <div id="preview-container">
            { render_selected_image_preview(screen) }
            <div class="button-container text-center">
                <button
                    class="btn btn-success btn-lg analyze-btn"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Submit)
                    })}
                    disabled={!state.can_submit()}
                >
                    { render_predict_button_content(screen) }
                </button>
                <button
                    id="clear-btn"
                    class="btn btn-danger btn-lg ms-2"
                    onclick={link.callback(|_| Msg::Clear)}
                >
                    <i class="fa-solid fa-trash"></i>{" Clear"}
                </button>
            </div>
        </div>
    }
}

fn render_selected_image_preview(screen: &UploadScreen) -> Html {
    match screen.state.preview_source() {
        Some(src) => html! {
            <div class="text-center mb-3">
                <img id="actual-image-preview" class="img-thumbnail" src={src} alt="Preview" />
            </div>
        },
        None => html! {},
    }
}

fn render_predict_button_content(screen: &UploadScreen) -> Html {
    if screen.state.is_loading() {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Predicting..."}</> }
    } else {
        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Predict"}</> }
    }
}
