use std::env;
use std::sync::Arc;

use studyai::models::{EssayRequest, StudyTipsRequest, TranslationRequest};
use studyai::{
    ApiOutcome, ClientConfig, Feature, FileDevice, ImageAcquisition, StudyClient, StudyError,
};

fn report(feature: Feature, result: Result<ApiOutcome, StudyError>) {
    match result {
        Ok(ApiOutcome::Failure { message, .. }) => {
            log::warn!("⚠️  {} reported an error: {}", feature, message)
        }
        Ok(outcome) => match outcome.display_text(feature) {
            Some(text) => log::info!("✅ {}:\n{}", feature, text),
            None => log::warn!(
                "⚠️  {} succeeded without any of {:?}",
                feature,
                feature.result_fields()
            ),
        },
        Err(e) => log::error!("❌ {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    studyai::logger::init_with_config(studyai::logger::LoggerConfig::from_env())?;
    if !dotenv_loaded {
        log::debug!("No .env file found, using process environment");
    }

    let config = ClientConfig::from_env();
    log::info!("🔄 Using study-assistant API at {}", config.base_url);
    let client = StudyClient::new(config)?;

    report(
        Feature::Essay,
        client
            .text()
            .essay(EssayRequest {
                topic: "Photosynthesis".to_string(),
                word_count: 150,
            })
            .await,
    );

    report(Feature::Chat, client.text().say("Give me one tip for learning algebra").await);

    report(
        Feature::Translation,
        client
            .text()
            .translate(TranslationRequest {
                text: "Knowledge is power".to_string(),
                from_lang: "english".to_string(),
                to_lang: "bangla".to_string(),
            })
            .await,
    );

    report(
        Feature::StudyTips,
        client
            .text()
            .study_tips(StudyTipsRequest {
                subject: "Physics".to_string(),
                topic: "Newton's laws".to_string(),
            })
            .await,
    );

    if let Some(path) = env::args().nth(1) {
        log::info!("🖼️  Reading image from {}", path);
        let acquisition = ImageAcquisition::new(Arc::new(FileDevice::new(path)));
        match acquisition.pick_image().await? {
            Some(image) => report(Feature::ImageToNotes, client.image().image_to_notes(image).await),
            None => log::warn!("No image selected"),
        }
    }

    Ok(())
}
