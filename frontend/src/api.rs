use crate::components::upload_screen::ChosenImage;
use crate::config;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::upload::UploadPayload;
use shared::{ChatRequest, ChatResponse, FetchError, PredictResponse, FILE_FIELD, URL_FIELD};
use wasm_bindgen::JsValue;
use web_sys::FormData;

fn js_error(value: JsValue) -> FetchError {
    FetchError::Transport(format!("{:?}", value))
}

fn transport_error(err: gloo_net::Error) -> FetchError {
    FetchError::Transport(err.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;
    shared::decode_response(status, &body)
}

/// Posts the image (or its URL) to the classifier as multipart form data.
pub async fn predict(payload: &UploadPayload<ChosenImage>) -> Result<PredictResponse, FetchError> {
    let form_data = FormData::new().map_err(js_error)?;
    match payload {
        UploadPayload::File(image) => {
            form_data.append_with_blob_and_filename(FILE_FIELD, image.file.as_ref(), &image.file.name())
        }
        UploadPayload::Url(url) => form_data.append_with_str(URL_FIELD, url),
    }
    .map_err(js_error)?;

    let response = Request::post(config::predict_url())
        .body(form_data)
        .map_err(transport_error)?
        .send()
        .await
        .map_err(transport_error)?;

    decode::<PredictResponse>(response).await
}

pub async fn chat(message: String) -> Result<String, FetchError> {
    let response = Request::post(config::chat_url())
        .json(&ChatRequest { message })
        .map_err(transport_error)?
        .send()
        .await
        .map_err(transport_error)?;

    decode::<ChatResponse>(response).await.map(|body| body.response)
}
