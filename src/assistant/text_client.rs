use crate::{
    assistant::Dispatcher,
    error::Result,
    models::{
        ApiOutcome, ChapterRequest, ChatRequest, EssayRequest, Feature, FlashcardsRequest,
        HomeworkRequest, MathProblemRequest, McqRequest, RoutineRequest, StudyTipsRequest,
        SummaryRequest, TextAnswerRequest, TextRequest, TranslationRequest,
    },
};

/// Features driven by typed-in text.
#[derive(Clone)]
pub struct TextClient {
    dispatcher: Dispatcher,
}

impl TextClient {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Summarizes pasted text or a video URL. Success field: `summary`.
    pub async fn summary(&self, request: SummaryRequest) -> Result<ApiOutcome> {
        self.dispatcher.send(Feature::Summary, &request).await
    }

    /// Success field: `mcqs`.
    pub async fn mcqs(&self, request: McqRequest) -> Result<ApiOutcome> {
        self.dispatcher.send(Feature::Mcq, &request).await
    }

    /// Success field: `mcqs`.
    pub async fn chapter_to_mcq(&self, request: ChapterRequest) -> Result<ApiOutcome> {
        self.dispatcher.send(Feature::ChapterToMcq, &request).await
    }

    /// Creative questions for a chapter. Success field: `cqs`.
    pub async fn chapter_to_cq(&self, request: ChapterRequest) -> Result<ApiOutcome> {
        self.dispatcher.send(Feature::ChapterToCq, &request).await
    }

    /// Success field: `routine`.
    pub async fn routine(&self, request: RoutineRequest) -> Result<ApiOutcome> {
        self.dispatcher.send(Feature::Routine, &request).await
    }

    pub async fn word_meaning(&self, request: TextRequest) -> Result<ApiOutcome> {
        self.dispatcher.send(Feature::WordMeaning, &request).await
    }

    pub async fn text_to_answer(&self, request: TextAnswerRequest) -> Result<ApiOutcome> {
        self.dispatcher.send(Feature::TextToAnswer, &request).await
    }

    /// Success field: `solution`.
    pub async fn solve_math(&self, request: MathProblemRequest) -> Result<ApiOutcome> {
        self.dispatcher.send(Feature::MathSolver, &request).await
    }

    /// Success field: `response`.
    pub async fn chat(&self, request: ChatRequest) -> Result<ApiOutcome> {
        self.dispatcher.send(Feature::Chat, &request).await
    }

    /// Chat as the configured user.
    pub async fn say(&self, message: impl Into<String>) -> Result<ApiOutcome> {
        let request = ChatRequest {
            message: message.into(),
            user_id: self.dispatcher.config().user_id.clone(),
        };
        self.chat(request).await
    }

    /// Success field: `essay`.
    pub async fn essay(&self, request: EssayRequest) -> Result<ApiOutcome> {
        self.dispatcher.send(Feature::Essay, &request).await
    }

    pub async fn grammar_check(&self, request: TextRequest) -> Result<ApiOutcome> {
        self.dispatcher.send(Feature::Grammar, &request).await
    }

    /// Success field: `translated_text`.
    pub async fn translate(&self, request: TranslationRequest) -> Result<ApiOutcome> {
        self.dispatcher.send(Feature::Translation, &request).await
    }

    pub async fn flashcards(&self, request: FlashcardsRequest) -> Result<ApiOutcome> {
        self.dispatcher.send(Feature::Flashcards, &request).await
    }

    pub async fn homework_help(&self, request: HomeworkRequest) -> Result<ApiOutcome> {
        self.dispatcher.send(Feature::HomeworkHelp, &request).await
    }

    /// Success field: `study_tips`.
    pub async fn study_tips(&self, request: StudyTipsRequest) -> Result<ApiOutcome> {
        self.dispatcher.send(Feature::StudyTips, &request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::assistant::transport::testing::{MockTransport, Scripted};
    use crate::assistant::StudyClient;
    use crate::config::ClientConfig;
    use crate::error::StudyError;
    use crate::models::*;
    use serde_json::json;
    use std::sync::Arc;

    fn client(mock: &Arc<MockTransport>) -> StudyClient {
        StudyClient::with_transport(
            ClientConfig::new().with_base_url("http://stub.local"),
            mock.clone(),
        )
        .unwrap()
    }

    fn essay_request() -> EssayRequest {
        EssayRequest {
            topic: "Photosynthesis".into(),
            word_count: 300,
        }
    }

    #[tokio::test]
    async fn essay_success_exposes_essay() {
        let mock = Arc::new(MockTransport::replying(json!({ "essay": "Plants turn light into sugar." })));
        let outcome = client(&mock).text().essay(essay_request()).await.unwrap();

        assert!(outcome.is_success());
        assert_eq!(
            outcome.text("essay").as_deref(),
            Some("Plants turn light into sugar.")
        );
        assert_eq!(
            mock.calls()[0],
            (
                "http://stub.local/essay".to_string(),
                json!({ "topic": "Photosynthesis", "word_count": 300 })
            )
        );
    }

    #[tokio::test]
    async fn essay_application_error_has_no_essay() {
        let mock = Arc::new(MockTransport::replying(json!({ "error": "topic too short" })));
        let outcome = client(&mock).text().essay(essay_request()).await.unwrap();

        assert_eq!(outcome.error_message(), Some("topic too short"));
        assert!(outcome.field("essay").is_none());
        assert!(outcome.display_text(Feature::Essay).is_none());
    }

    #[tokio::test]
    async fn summary_transport_error_is_prefixed() {
        let mock = Arc::new(MockTransport::failing("dns error: no such host"));
        let err = client(&mock)
            .text()
            .summary(SummaryRequest {
                text: "Long text".into(),
                video_url: String::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StudyError::Transport { .. }));
        assert_eq!(err.to_string(), "Failed to get summary: dns error: no such host");
    }

    #[tokio::test]
    async fn sequential_chats_are_independent() {
        let mock = Arc::new(MockTransport::new(vec![
            Scripted::Reply(json!({ "response": "Hello!" })),
            Scripted::Reply(json!({ "response": "Hello again!" })),
        ]));
        let client = client(&mock);
        let request = ChatRequest {
            message: "Hi".into(),
            user_id: "u1".into(),
        };

        let first = client.text().chat(request.clone()).await.unwrap();
        let second = client.text().chat(request).await.unwrap();

        assert_eq!(first.text("response").as_deref(), Some("Hello!"));
        assert_eq!(second.text("response").as_deref(), Some("Hello again!"));

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
        assert_eq!(calls[0].1, json!({ "message": "Hi", "user_id": "u1" }));
    }

    #[tokio::test]
    async fn say_uses_configured_user() {
        let mock = Arc::new(MockTransport::replying(json!({ "response": "ok" })));
        let client = StudyClient::with_transport(
            ClientConfig::new().with_user_id("student-42"),
            mock.clone(),
        )
        .unwrap();

        client.text().say("What is osmosis?").await.unwrap();
        assert_eq!(mock.calls()[0].1["user_id"], "student-42");
    }

    #[tokio::test]
    async fn typed_requests_hit_their_paths() {
        let mock = Arc::new(MockTransport::new(
            (0..14).map(|_| Scripted::Reply(json!({}))).collect(),
        ));
        let client = client(&mock);
        let text = client.text();
        let chapter = ChapterRequest {
            class_level: "10".into(),
            subject: "Chemistry".into(),
            chapter: "Acids".into(),
            count: 5,
        };

        text.mcqs(McqRequest {
            chapter: "Acids".into(),
            count: 5,
            difficulty: Difficulty::Easy,
        })
        .await
        .unwrap();
        text.chapter_to_mcq(chapter.clone()).await.unwrap();
        text.chapter_to_cq(chapter).await.unwrap();
        text.routine(RoutineRequest {
            subjects: "Math, Physics".into(),
            hours: 4,
            days: 7,
        })
        .await
        .unwrap();
        text.word_meaning(TextRequest { text: "ephemeral".into() })
            .await
            .unwrap();
        text.text_to_answer(TextAnswerRequest {
            question: "Who wrote it?".into(),
            context: None,
        })
        .await
        .unwrap();
        text.solve_math(MathProblemRequest { problem: "2x + 3 = 7".into() })
            .await
            .unwrap();
        text.grammar_check(TextRequest { text: "he go home".into() })
            .await
            .unwrap();
        text.translate(TranslationRequest {
            text: "Good morning".into(),
            from_lang: "english".into(),
            to_lang: "bangla".into(),
        })
        .await
        .unwrap();
        text.flashcards(FlashcardsRequest {
            subject: "Biology".into(),
            topic: "Cells".into(),
            count: 10,
        })
        .await
        .unwrap();
        text.homework_help(HomeworkRequest {
            question: "Balance H2 + O2".into(),
            subject: Some("Chemistry".into()),
        })
        .await
        .unwrap();
        text.study_tips(StudyTipsRequest {
            subject: "History".into(),
            topic: String::new(),
        })
        .await
        .unwrap();

        let paths: Vec<String> = mock.calls().into_iter().map(|(url, _)| url).collect();
        assert_eq!(
            paths,
            [
                "/mcq",
                "/chapter-to-mcq",
                "/chapter-to-cq",
                "/routine",
                "/text-to-word-meaning",
                "/text-to-answer",
                "/math-solver",
                "/grammar-check",
                "/translate",
                "/flashcards",
                "/homework-help",
                "/study-tips",
            ]
            .iter()
            .map(|p| format!("http://stub.local{}", p))
            .collect::<Vec<_>>()
        );
        assert_eq!(mock.calls()[2].1["class"], "10");
    }
}
