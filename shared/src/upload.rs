//! State machine behind the upload screen.
//!
//! The screen owns exactly one [`UploadState`]. Every user action and every
//! network outcome is a method call on it; none of them perform I/O. The
//! caller performs the request described by [`UploadState::submit`] and feeds
//! the outcome back through [`UploadState::resolve`].

use crate::error::{FetchError, ValidationError};
use crate::request::{Generation, RequestTag};
use crate::PredictResponse;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

pub const ACCEPTED_MIME_TYPES: [&str; 2] = ["image/jpeg", "image/png"];
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
pub const PREDICTION_FAILURE: &str = "Something went wrong while fetching prediction details.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum InputMethod {
    #[default]
    Device,
    Url,
}

impl InputMethod {
    pub fn label(self) -> &'static str {
        match self {
            InputMethod::Device => "Upload from Device",
            InputMethod::Url => "Upload from URL",
        }
    }
}

/// A locally chosen image as seen by the state machine.
pub trait ImageFile: Clone {
    fn mime_type(&self) -> String;
    fn size(&self) -> u64;
    /// Displayable reference for the preview, e.g. an object URL.
    fn preview_src(&self) -> String;
}

pub fn validate(mime_type: &str, size: u64) -> Result<(), ValidationError> {
    if !ACCEPTED_MIME_TYPES.contains(&mime_type) {
        return Err(ValidationError::UnsupportedType(mime_type.to_string()));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge { size, limit: MAX_UPLOAD_BYTES });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadPayload<F> {
    File(F),
    Url(String),
}

/// Request the caller must issue after a successful `submit`.
#[derive(Debug, Clone)]
pub struct Submission<F> {
    pub tag: RequestTag,
    pub payload: UploadPayload<F>,
}

#[derive(Debug, Clone)]
pub struct UploadState<F> {
    method: InputMethod,
    selected_file: Option<F>,
    image_url: String,
    prediction: String,
    info: String,
    is_loading: bool,
    validation_error: Option<ValidationError>,
    generation: Generation,
}

impl<F> Default for UploadState<F> {
    fn default() -> Self {
        Self {
            method: InputMethod::default(),
            selected_file: None,
            image_url: String::new(),
            prediction: String::new(),
            info: String::new(),
            is_loading: false,
            validation_error: None,
            generation: Generation::default(),
        }
    }
}

impl<F: ImageFile> UploadState<F> {
    pub fn method(&self) -> InputMethod {
        self.method
    }

    pub fn selected_file(&self) -> Option<&F> {
        self.selected_file.as_ref()
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn prediction(&self) -> &str {
        &self.prediction
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn validation_error(&self) -> Option<&ValidationError> {
        self.validation_error.as_ref()
    }

    pub fn preview_source(&self) -> Option<String> {
        match (&self.selected_file, self.method) {
            (Some(file), _) => Some(file.preview_src()),
            (None, InputMethod::Url) if !self.image_url.is_empty() => Some(self.image_url.clone()),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading && (self.selected_file.is_some() || !self.image_url.is_empty())
    }

    /// Switches input method and wipes everything derived from the old one.
    pub fn select_method(&mut self, method: InputMethod) {
        log::debug!("Upload method changed to {}", method);
        self.method = method;
        self.reset_fields();
    }

    /// Validates and stores a local image. A rejected file leaves the current
    /// selection and preview untouched. An accepted one orphans any request
    /// made for the previous image.
    pub fn select_file(&mut self, file: F) -> Result<(), ValidationError> {
        if let Err(err) = validate(&file.mime_type(), file.size()) {
            log::warn!("Rejected image ({}, {} bytes): {}", file.mime_type(), file.size(), err);
            self.validation_error = Some(err.clone());
            return Err(err);
        }

        if self.method != InputMethod::Device {
            self.select_method(InputMethod::Device);
        }

        self.validation_error = None;
        self.selected_file = Some(file);
        self.discard_result();
        Ok(())
    }

    /// Stores the raw URL text; well-formedness is left to the server.
    pub fn set_url(&mut self, text: impl Into<String>) {
        if self.method != InputMethod::Url {
            log::debug!("Ignoring URL input while in {} mode", self.method);
            return;
        }
        let text = text.into();
        if text != self.image_url {
            self.image_url = text;
            self.discard_result();
        }
    }

    /// Starts a classification request, or returns `None` when there is
    /// nothing to send or a request is already in flight.
    pub fn submit(&mut self) -> Option<Submission<F>> {
        if self.is_loading {
            return None;
        }

        let payload = match (&self.selected_file, self.image_url.is_empty()) {
            (Some(file), _) => UploadPayload::File(file.clone()),
            (None, false) => UploadPayload::Url(self.image_url.clone()),
            (None, true) => return None,
        };

        self.is_loading = true;
        let tag = self.generation.begin();
        log::info!("Submitting image for classification {}", tag);
        Some(Submission { tag, payload })
    }

    /// Applies the outcome of a request. Returns false when the response was
    /// stale and dropped.
    pub fn resolve(&mut self, tag: RequestTag, outcome: Result<PredictResponse, FetchError>) -> bool {
        if !self.generation.settle(tag) {
            log::debug!("Dropping stale prediction response {}", tag);
            return false;
        }

        self.is_loading = false;
        match outcome {
            Ok(body) => {
                log::info!("Prediction {} resolved: {}", tag, body.prediction);
                self.prediction = body.prediction;
                self.info = body.info;
            }
            Err(err) => {
                log::error!("Prediction {} failed: {}", tag, err);
                self.info = PREDICTION_FAILURE.to_string();
            }
        }
        true
    }

    /// Resets every field except the input method. An in-flight request is
    /// orphaned and its response ignored.
    pub fn clear(&mut self) {
        self.reset_fields();
    }

    fn reset_fields(&mut self) {
        self.selected_file = None;
        self.image_url.clear();
        self.validation_error = None;
        self.discard_result();
    }

    /// Drops the shown result and whatever request is still in flight.
    fn discard_result(&mut self) {
        self.prediction.clear();
        self.info.clear();
        if self.is_loading {
            log::debug!("Abandoning in-flight prediction");
        }
        self.is_loading = false;
        self.generation.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[derive(Debug, Clone, PartialEq)]
    struct FakeFile {
        mime: &'static str,
        size: u64,
    }

    impl ImageFile for FakeFile {
        fn mime_type(&self) -> String {
            self.mime.to_string()
        }

        fn size(&self) -> u64 {
            self.size
        }

        fn preview_src(&self) -> String {
            format!("blob:{}", self.size)
        }
    }

    fn jpeg(size: u64) -> FakeFile {
        FakeFile { mime: "image/jpeg", size }
    }

    fn loaded_state() -> UploadState<FakeFile> {
        let mut state = UploadState::default();
        state.select_file(jpeg(1024)).unwrap();
        let submission = state.submit().unwrap();
        state.resolve(
            submission.tag,
            Ok(PredictResponse { prediction: "Healthy".into(), info: "No disease".into() }),
        );
        state
    }

    #[test]
    fn rejects_unsupported_mime_types() {
        let mut state = UploadState::<FakeFile>::default();
        for mime in ["image/gif", "image/webp", "application/pdf", ""] {
            let err = state.select_file(FakeFile { mime, size: 10 }).unwrap_err();
            assert!(matches!(err, ValidationError::UnsupportedType(_)));
            assert!(state.selected_file().is_none());
            assert!(state.validation_error().is_some());
            assert!(state.submit().is_none());
        }
    }

    #[test]
    fn rejects_oversized_files_of_valid_type() {
        let mut state = UploadState::<FakeFile>::default();
        let err = state
            .select_file(FakeFile { mime: "image/png", size: MAX_UPLOAD_BYTES + 1 })
            .unwrap_err();

        assert_eq!(err, ValidationError::TooLarge { size: MAX_UPLOAD_BYTES + 1, limit: MAX_UPLOAD_BYTES });
        assert!(state.selected_file().is_none());
        assert!(state.preview_source().is_none());
    }

    #[test]
    fn file_at_exact_ceiling_is_accepted() {
        let mut state = UploadState::<FakeFile>::default();
        assert!(state.select_file(jpeg(MAX_UPLOAD_BYTES)).is_ok());
    }

    #[test]
    fn rejection_keeps_previous_selection() {
        let mut state = UploadState::<FakeFile>::default();
        state.select_file(jpeg(100)).unwrap();
        state.select_file(FakeFile { mime: "image/bmp", size: 100 }).unwrap_err();

        assert_eq!(state.selected_file(), Some(&jpeg(100)));
        assert_eq!(state.preview_source().as_deref(), Some("blob:100"));
    }

    #[test]
    fn new_file_clears_previous_result() {
        let mut state = loaded_state();
        assert_eq!(state.prediction(), "Healthy");

        state.select_file(jpeg(2048)).unwrap();
        assert_eq!(state.prediction(), "");
        assert_eq!(state.info(), "");
        assert!(state.validation_error().is_none());
    }

    #[test]
    fn switching_method_clears_everything() {
        for target in [InputMethod::Url, InputMethod::Device] {
            let mut state = loaded_state();
            state.select_file(FakeFile { mime: "text/plain", size: 1 }).unwrap_err();
            state.select_method(target);

            assert_eq!(state.method(), target);
            assert!(state.selected_file().is_none());
            assert_eq!(state.image_url(), "");
            assert!(state.preview_source().is_none());
            assert_eq!(state.prediction(), "");
            assert_eq!(state.info(), "");
            assert!(state.validation_error().is_none());
        }
    }

    #[test]
    fn url_becomes_preview_without_validation() {
        let mut state = UploadState::<FakeFile>::default();
        state.select_method(InputMethod::Url);
        state.set_url("not a url");

        assert_eq!(state.preview_source().as_deref(), Some("not a url"));
        match state.submit().map(|s| s.payload) {
            Some(UploadPayload::Url(url)) => assert_eq!(url, "not a url"),
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn url_input_ignored_in_device_mode() {
        let mut state = UploadState::<FakeFile>::default();
        state.set_url("https://example.com/leaf.jpg");
        assert_eq!(state.image_url(), "");
    }

    #[test]
    fn file_chosen_in_url_mode_replaces_url() {
        let mut state = UploadState::<FakeFile>::default();
        state.select_method(InputMethod::Url);
        state.set_url("https://example.com/leaf.jpg");
        state.select_file(jpeg(10)).unwrap();

        assert_eq!(state.method(), InputMethod::Device);
        assert_eq!(state.image_url(), "");
        assert!(state.selected_file().is_some());
    }

    #[test]
    fn submit_without_input_is_noop() {
        let mut state = UploadState::<FakeFile>::default();
        assert!(state.submit().is_none());
        assert!(!state.is_loading());
        assert!(!state.can_submit());
    }

    #[test]
    fn submit_is_not_reentrant() {
        let mut state = UploadState::<FakeFile>::default();
        state.select_file(jpeg(10)).unwrap();

        assert!(state.submit().is_some());
        assert!(state.is_loading());
        assert!(state.submit().is_none());
    }

    #[test]
    fn failure_sets_fixed_info_and_keeps_prediction() {
        let mut state = loaded_state();
        state.select_method(InputMethod::Url);
        state.set_url("https://example.com/leaf.png");
        let before = state.prediction().to_string();

        let submission = state.submit().unwrap();
        assert!(state.resolve(submission.tag, Err(FetchError::Transport("offline".into()))));

        assert_eq!(state.info(), PREDICTION_FAILURE);
        assert_eq!(state.prediction(), before);
        assert!(!state.is_loading());
    }

    #[test]
    fn response_after_clear_is_dropped() {
        let mut state = UploadState::<FakeFile>::default();
        state.select_file(jpeg(10)).unwrap();
        let submission = state.submit().unwrap();
        state.clear();

        let applied = state.resolve(
            submission.tag,
            Ok(PredictResponse { prediction: "Early Blight".into(), info: "late".into() }),
        );

        assert!(!applied);
        assert_eq!(state.prediction(), "");
        assert!(!state.is_loading());
    }

    #[test]
    fn new_file_mid_flight_unlocks_submit() {
        let mut state = UploadState::<FakeFile>::default();
        state.select_file(jpeg(10)).unwrap();
        let stale = state.submit().unwrap();
        state.select_file(jpeg(20)).unwrap();

        assert!(!state.is_loading());
        assert!(state.can_submit());
        let fresh = state.submit().unwrap();
        assert_ne!(stale.tag, fresh.tag);
        assert_eq!(fresh.payload, UploadPayload::File(jpeg(20)));
    }

    #[test]
    fn unchanged_url_keeps_request_alive() {
        let mut state = UploadState::<FakeFile>::default();
        state.select_method(InputMethod::Url);
        state.set_url("https://example.com/a.png");
        let submission = state.submit().unwrap();
        state.set_url("https://example.com/a.png");

        assert!(state.is_loading());
        assert!(state.resolve(
            submission.tag,
            Ok(PredictResponse { prediction: "Healthy".into(), info: String::new() }),
        ));
    }

    #[test]
    fn clear_keeps_method() {
        let mut state = UploadState::<FakeFile>::default();
        state.select_method(InputMethod::Url);
        state.set_url("https://example.com/a.png");
        state.clear();

        assert_eq!(state.method(), InputMethod::Url);
        assert_eq!(state.image_url(), "");
    }

    #[test]
    fn method_round_trips_through_select_values() {
        assert_eq!(InputMethod::Device.as_ref(), "device");
        assert_eq!(InputMethod::from_str("url").unwrap(), InputMethod::Url);
        assert!(InputMethod::from_str("camera").is_err());
    }
}
