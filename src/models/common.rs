use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Every endpoint the study-assistant API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Summary,
    Mcq,
    ChapterToMcq,
    ChapterToCq,
    ImageToNotes,
    ImageToMcq,
    ImageToCq,
    ImageToAnswer,
    ImageToMath,
    Routine,
    WordMeaning,
    TextToAnswer,
    MathSolver,
    Chat,
    Essay,
    Grammar,
    Translation,
    Flashcards,
    HomeworkHelp,
    StudyTips,
}

impl Feature {
    pub const ALL: [Feature; 20] = [
        Feature::Summary,
        Feature::Mcq,
        Feature::ChapterToMcq,
        Feature::ChapterToCq,
        Feature::ImageToNotes,
        Feature::ImageToMcq,
        Feature::ImageToCq,
        Feature::ImageToAnswer,
        Feature::ImageToMath,
        Feature::Routine,
        Feature::WordMeaning,
        Feature::TextToAnswer,
        Feature::MathSolver,
        Feature::Chat,
        Feature::Essay,
        Feature::Grammar,
        Feature::Translation,
        Feature::Flashcards,
        Feature::HomeworkHelp,
        Feature::StudyTips,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Feature::Summary => "/summary",
            Feature::Mcq => "/mcq",
            Feature::ChapterToMcq => "/chapter-to-mcq",
            Feature::ChapterToCq => "/chapter-to-cq",
            Feature::ImageToNotes => "/image-to-notes",
            Feature::ImageToMcq => "/image-to-mcq",
            Feature::ImageToCq => "/image-to-cq",
            Feature::ImageToAnswer => "/image-to-answer",
            Feature::ImageToMath => "/image-to-math-solver",
            Feature::Routine => "/routine",
            Feature::WordMeaning => "/text-to-word-meaning",
            Feature::TextToAnswer => "/text-to-answer",
            Feature::MathSolver => "/math-solver",
            Feature::Chat => "/chat",
            Feature::Essay => "/essay",
            Feature::Grammar => "/grammar-check",
            Feature::Translation => "/translate",
            Feature::Flashcards => "/flashcards",
            Feature::HomeworkHelp => "/homework-help",
            Feature::StudyTips => "/study-tips",
        }
    }

    /// Prefix put in front of transport failures for this feature.
    pub fn failure_context(&self) -> &'static str {
        match self {
            Feature::Summary => "Failed to get summary",
            Feature::Mcq => "Failed to get MCQs",
            Feature::ChapterToMcq => "Failed to get chapter MCQs",
            Feature::ChapterToCq => "Failed to get chapter CQs",
            Feature::ImageToNotes
            | Feature::ImageToMcq
            | Feature::ImageToCq
            | Feature::ImageToAnswer
            | Feature::ImageToMath => "Failed to process image",
            Feature::Routine => "Failed to get routine",
            Feature::WordMeaning => "Failed to get word meanings",
            Feature::TextToAnswer => "Failed to get answer",
            Feature::MathSolver => "Failed to solve math problem",
            Feature::Chat => "Failed to chat",
            Feature::Essay => "Failed to generate essay",
            Feature::Grammar => "Failed to check grammar",
            Feature::Translation => "Failed to translate",
            Feature::Flashcards => "Failed to generate flashcards",
            Feature::HomeworkHelp => "Failed to get homework help",
            Feature::StudyTips => "Failed to get study tips",
        }
    }

    /// Response fields carrying the content of a successful reply, in
    /// display order.
    pub fn result_fields(&self) -> &'static [&'static str] {
        match self {
            Feature::Summary => &["summary"],
            Feature::Mcq | Feature::ChapterToMcq | Feature::ImageToMcq => &["mcqs"],
            Feature::ChapterToCq => &["cqs"],
            Feature::ImageToNotes => &["extracted_text", "summary"],
            Feature::ImageToCq => &["cq"],
            Feature::ImageToAnswer | Feature::TextToAnswer | Feature::HomeworkHelp => &["answer"],
            Feature::ImageToMath | Feature::MathSolver => &["solution"],
            Feature::Routine => &["routine"],
            Feature::WordMeaning => &["meanings"],
            Feature::Chat => &["response"],
            Feature::Essay => &["essay"],
            Feature::Grammar => &["corrected_text"],
            Feature::Translation => &["translated_text"],
            Feature::Flashcards => &["flashcards"],
            Feature::StudyTips => &["study_tips"],
        }
    }

    pub fn is_image_feature(&self) -> bool {
        matches!(
            self,
            Feature::ImageToNotes
                | Feature::ImageToMcq
                | Feature::ImageToCq
                | Feature::ImageToAnswer
                | Feature::ImageToMath
        )
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path().trim_start_matches('/'))
    }
}

/// A parsed response body, kept exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseBody(Value);

impl ResponseBody {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    /// Renders a field for display: strings as-is, anything else as
    /// pretty-printed JSON.
    pub fn text(&self, name: &str) -> Option<String> {
        self.field(name).map(render_value)
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Outcome of a call whose transport succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome {
    Success(ResponseBody),
    /// The server reported an application error in the body.
    Failure { message: String, body: ResponseBody },
}

impl ApiOutcome {
    /// Classifies a response body. An `error` field that is present and
    /// non-null marks a failure whatever the HTTP status was.
    pub fn decode(value: Value) -> Self {
        let message = value.get("error").filter(|e| !e.is_null()).map(render_value);
        let body = ResponseBody::new(value);
        match message {
            Some(message) => ApiOutcome::Failure { message, body },
            None => ApiOutcome::Success(body),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success(_))
    }

    pub fn body(&self) -> &ResponseBody {
        match self {
            ApiOutcome::Success(body) => body,
            ApiOutcome::Failure { body, .. } => body,
        }
    }

    pub fn into_body(self) -> ResponseBody {
        match self {
            ApiOutcome::Success(body) => body,
            ApiOutcome::Failure { body, .. } => body,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ApiOutcome::Success(_) => None,
            ApiOutcome::Failure { message, .. } => Some(message),
        }
    }

    /// Success field lookup; always `None` for a failure.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            ApiOutcome::Success(body) => body.field(name),
            ApiOutcome::Failure { .. } => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<String> {
        match self {
            ApiOutcome::Success(body) => body.text(name),
            ApiOutcome::Failure { .. } => None,
        }
    }

    /// The content a screen would show for `feature`: its result fields
    /// that are present, joined by blank lines.
    pub fn display_text(&self, feature: Feature) -> Option<String> {
        let parts: Vec<String> = feature
            .result_fields()
            .iter()
            .filter_map(|name| self.text(name))
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }
}
