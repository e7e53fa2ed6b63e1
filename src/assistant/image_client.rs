use crate::{
    assistant::Dispatcher,
    error::Result,
    models::{ApiOutcome, Feature, ImageAsset, ImageMcqRequest, ImageRequest},
};

/// Features that take a normalized photo of a page or problem.
#[derive(Clone)]
pub struct ImageClient {
    dispatcher: Dispatcher,
}

impl ImageClient {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Success fields: `extracted_text`, `summary`.
    pub async fn image_to_notes(&self, image: ImageAsset) -> Result<ApiOutcome> {
        self.dispatcher
            .send(Feature::ImageToNotes, &ImageRequest::new(image))
            .await
    }

    pub async fn image_to_mcq(&self, image: ImageAsset, count: u32) -> Result<ApiOutcome> {
        self.dispatcher
            .send(Feature::ImageToMcq, &ImageMcqRequest::new(image, count))
            .await
    }

    /// Success field: `cq`.
    pub async fn image_to_cq(&self, image: ImageAsset) -> Result<ApiOutcome> {
        self.dispatcher
            .send(Feature::ImageToCq, &ImageRequest::new(image))
            .await
    }

    pub async fn image_to_answer(&self, image: ImageAsset) -> Result<ApiOutcome> {
        self.dispatcher
            .send(Feature::ImageToAnswer, &ImageRequest::new(image))
            .await
    }

    /// Success field: `solution`.
    pub async fn image_to_math(&self, image: ImageAsset) -> Result<ApiOutcome> {
        self.dispatcher
            .send(Feature::ImageToMath, &ImageRequest::new(image))
            .await
    }
}
