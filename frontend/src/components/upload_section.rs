use super::upload_screen::{Msg, UploadScreen};
use super::utils::{debounce, first_file};
use shared::upload::{InputMethod, ACCEPTED_MIME_TYPES};
use std::str::FromStr;
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

pub fn render_upload_section(screen: &UploadScreen, ctx: &Context<UploadScreen>) -> Html {
    html! {
        <div class="upload-section">
            { render_method_selector(screen, ctx) }
            {
                match screen.state.method() {
                    InputMethod::Device => render_file_input_area(screen, ctx),
                    InputMethod::Url => render_url_input(screen, ctx),
                }
            }
        </div>
    }
}

fn render_method_selector(screen: &UploadScreen, ctx: &Context<UploadScreen>) -> Html {
    let current = screen.state.method();
    let handle_change = ctx.link().batch_callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        InputMethod::from_str(&select.value()).ok().map(Msg::MethodSelected)
    });

    html! {
        <div class="mb-4">
            <label class="form-label" for="upload-method">{"Choose upload method:"}</label>
            <select id="upload-method" class="form-select" onchange={handle_change}>
                { for InputMethod::iter().map(|method| html! {
                    <option value={method.as_ref().to_string()} selected={method == current}>
                        { method.label() }
                    </option>
                })}
            </select>
        </div>
    }
}

fn render_url_input(screen: &UploadScreen, ctx: &Context<UploadScreen>) -> Html {
    let handle_input = ctx.link().callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::UrlChanged(input.value())
    });

    html! {
        <input
            type="text"
            class="form-control mb-4"
            placeholder="Enter image URL"
            value={screen.state.image_url().to_string()}
            oninput={handle_input}
        />
    }
}

fn render_file_input_area(screen: &UploadScreen, ctx: &Context<UploadScreen>) -> Html {
    let link = ctx.link();
    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().as_ref().and_then(first_file);

        input.set_value("");
        file.map(Msg::FileChosen)
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let trigger_file_input = Callback::from(|_| {
        let input = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id("file-input"));
        if let Some(html_input) = input.and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok()) {
            html_input.click();
        }
    });

    html! {
        <>
            <input
                type="file"
                id="file-input"
                accept={ACCEPTED_MIME_TYPES.join(",")}
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", "mb-4", screen.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, {
                    let trigger_file_input = trigger_file_input.clone();
                    move || trigger_file_input.emit(())
                })}
            >
                <div class="upload-placeholder">
                    <i class="fa-solid fa-cloud-arrow-up"></i>
                    <p>{"Drag & drop a leaf image here, paste, or click"}</p>
                    <p class="file-types">{"Supported formats: JPG, PNG (max 5MB)"}</p>
                </div>
            </div>
        </>
    }
}
