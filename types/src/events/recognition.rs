/// A single transcription candidate produced by the speech recognizer.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RecognitionHypothesis {
    /// The transcribed text
    recognition: String,

    /// Recognizer confidence in the range 0.0..=1.0, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    confidence: Option<f32>,
}

impl RecognitionHypothesis {
    pub fn new(recognition: &str) -> Self {
        Self {
            recognition: recognition.to_string(),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn recognition(&self) -> &str {
        &self.recognition
    }

    pub fn confidence(&self) -> Option<f32> {
        self.confidence
    }
}

/// Speech recognizer lifecycle notifications.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum RecognitionEvent {
    #[serde(rename = "ready_for_speech")]
    ReadyForSpeech,
    #[serde(rename = "beginning_of_speech")]
    BeginningOfSpeech,
    #[serde(rename = "end_of_speech")]
    EndOfSpeech,
    #[serde(rename = "partial_results")]
    PartialResults {
        hypotheses: Vec<RecognitionHypothesis>,
    },
    /// Input level in dB
    #[serde(rename = "rms_changed")]
    RmsChanged {
        level: f32,
    },
    #[serde(rename = "speech_timeout")]
    SpeechTimeout,
    #[serde(rename = "empty_result")]
    EmptyResult,
    #[serde(rename = "error")]
    Error {
        reason: String,
    },
    /// Final hypotheses, best first.
    #[serde(rename = "results")]
    Results {
        hypotheses: Vec<RecognitionHypothesis>,
    },
}

impl RecognitionEvent {
    pub fn results(hypotheses: Vec<RecognitionHypothesis>) -> Self {
        RecognitionEvent::Results { hypotheses }
    }

    pub fn error(reason: &str) -> Self {
        RecognitionEvent::Error {
            reason: reason.to_string(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RecognitionEvent::ReadyForSpeech => "ready_for_speech",
            RecognitionEvent::BeginningOfSpeech => "beginning_of_speech",
            RecognitionEvent::EndOfSpeech => "end_of_speech",
            RecognitionEvent::PartialResults { .. } => "partial_results",
            RecognitionEvent::RmsChanged { .. } => "rms_changed",
            RecognitionEvent::SpeechTimeout => "speech_timeout",
            RecognitionEvent::EmptyResult => "empty_result",
            RecognitionEvent::Error { .. } => "error",
            RecognitionEvent::Results { .. } => "results",
        }
    }

    /// True for the events that end a recognition turn.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RecognitionEvent::Results { .. }
                | RecognitionEvent::EmptyResult
                | RecognitionEvent::SpeechTimeout
                | RecognitionEvent::Error { .. }
        )
    }

    /// The best hypothesis of a final result, if any.
    pub fn best_recognition(&self) -> Option<&str> {
        match self {
            RecognitionEvent::Results { hypotheses } => {
                hypotheses.first().map(RecognitionHypothesis::recognition)
            }
            _ => None,
        }
    }
}
