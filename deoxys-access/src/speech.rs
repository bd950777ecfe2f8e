//! Speech-recognition session.
//!
//! A session moves `Idle -> Listening -> Idle`. While listening, the engine
//! produces results or an error; either way the session ends up idle again.
//! Callers consume one lazy stream of [`TranscriptEvent`]s and may stop the
//! session at any time through its [`SpeechHandle`].

use crate::error::AccessError;
use async_trait::async_trait;
use futures::Stream;
use tokio::sync::watch;

/// Recognition settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionConfig {
    pub lang: String,
    pub interim_results: bool,
    pub continuous: bool,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            lang: "en-US".to_string(),
            interim_results: true,
            continuous: false,
        }
    }
}

/// Environment capabilities that gate speech input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechSupport {
    pub secure_context: bool,
    pub api_available: bool,
}

impl SpeechSupport {
    /// Fail unless speech input can run here
    pub fn check(&self) -> Result<(), AccessError> {
        if !self.secure_context {
            return Err(AccessError::unsupported(
                "speech input requires a secure context (https or localhost)",
            ));
        }
        if !self.api_available {
            return Err(AccessError::unsupported(
                "speech recognition is not available in this browser",
            ));
        }
        Ok(())
    }
}

/// Raw engine event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizerEvent {
    /// Result list; entries from `result_index` on are new or revised
    Result {
        result_index: usize,
        results: Vec<String>,
    },
    Error(String),
    End,
}

/// Speech engine backend
#[async_trait]
pub trait Recognizer: Send + 'static {
    /// Begin capturing audio
    async fn start(&mut self, config: &RecognitionConfig) -> Result<(), AccessError>;

    /// Next engine event, `None` once the engine is gone
    async fn next_event(&mut self) -> Option<RecognizerEvent>;

    /// Ask the engine to stop; it answers with [`RecognizerEvent::End`]
    async fn stop(&mut self);
}

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechState {
    Idle,
    Listening,
}

/// Event delivered to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    Started,
    Transcript(String),
    Error(String),
    Ended,
}

/// Handle used to observe and stop a running session
#[derive(Debug)]
pub struct SpeechHandle {
    stop_tx: watch::Sender<bool>,
    state_rx: watch::Receiver<SpeechState>,
}

impl SpeechHandle {
    /// Request the session to stop. Safe to call repeatedly.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    /// Current session state
    pub fn state(&self) -> SpeechState {
        *self.state_rx.borrow()
    }
}

/// A speech-recognition session over a [`Recognizer`]
pub struct SpeechSession<R> {
    recognizer: R,
    config: RecognitionConfig,
}

enum Step {
    Stop,
    Event(Option<RecognizerEvent>),
}

impl<R: Recognizer> SpeechSession<R> {
    /// Create a session, refusing environments that cannot run speech input
    pub fn new(
        recognizer: R,
        config: RecognitionConfig,
        support: SpeechSupport,
    ) -> Result<Self, AccessError> {
        support.check()?;
        Ok(Self { recognizer, config })
    }

    /// Start listening.
    ///
    /// Nothing happens until the returned stream is polled. The stream always
    /// finishes with [`TranscriptEvent::Ended`].
    pub fn start(self) -> (SpeechHandle, impl Stream<Item = TranscriptEvent> + Send) {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let (state_tx, state_rx) = watch::channel(SpeechState::Idle);
        let Self {
            mut recognizer,
            config,
        } = self;

        let events = async_stream::stream! {
            if let Err(e) = recognizer.start(&config).await {
                yield TranscriptEvent::Error(e.to_string());
                yield TranscriptEvent::Ended;
                return;
            }
            let _ = state_tx.send(SpeechState::Listening);
            yield TranscriptEvent::Started;

            let mut stopping = false;
            loop {
                let step = tokio::select! {
                    // Any change is a stop request; a dropped handle counts too.
                    _ = stop_rx.changed(), if !stopping => Step::Stop,
                    event = recognizer.next_event() => Step::Event(event),
                };

                match step {
                    Step::Stop => {
                        stopping = true;
                        recognizer.stop().await;
                    }
                    Step::Event(Some(RecognizerEvent::Result { result_index, results })) => {
                        let text: String = results.iter().skip(result_index).map(String::as_str).collect();
                        yield TranscriptEvent::Transcript(text);
                    }
                    Step::Event(Some(RecognizerEvent::Error(e))) => {
                        tracing::debug!("speech recognition error: {}", e);
                        yield TranscriptEvent::Error(e);
                        break;
                    }
                    Step::Event(Some(RecognizerEvent::End)) | Step::Event(None) => break,
                }
            }

            let _ = state_tx.send(SpeechState::Idle);
            yield TranscriptEvent::Ended;
        };

        (SpeechHandle { stop_tx, state_rx }, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::collections::VecDeque;
    use std::sync::Arc;
    use tokio::sync::Notify;

    struct ScriptedRecognizer {
        script: VecDeque<RecognizerEvent>,
        fail_start: bool,
        stopped: Arc<Notify>,
    }

    impl ScriptedRecognizer {
        fn new(script: Vec<RecognizerEvent>) -> Self {
            Self {
                script: script.into(),
                fail_start: false,
                stopped: Arc::new(Notify::new()),
            }
        }
    }

    #[async_trait]
    impl Recognizer for ScriptedRecognizer {
        async fn start(&mut self, _config: &RecognitionConfig) -> Result<(), AccessError> {
            if self.fail_start {
                return Err(AccessError::recognition("not-allowed"));
            }
            Ok(())
        }

        async fn next_event(&mut self) -> Option<RecognizerEvent> {
            if let Some(event) = self.script.pop_front() {
                return Some(event);
            }
            // Keep listening until stopped.
            self.stopped.notified().await;
            Some(RecognizerEvent::End)
        }

        async fn stop(&mut self) {
            self.stopped.notify_one();
        }
    }

    const SUPPORTED: SpeechSupport = SpeechSupport {
        secure_context: true,
        api_available: true,
    };

    #[test]
    fn test_support_gate() {
        let insecure = SpeechSupport {
            secure_context: false,
            api_available: true,
        };
        assert!(matches!(insecure.check(), Err(AccessError::Unsupported(_))));
        let missing = SpeechSupport {
            secure_context: true,
            api_available: false,
        };
        assert!(missing.check().is_err());
        assert!(SUPPORTED.check().is_ok());

        let recognizer = ScriptedRecognizer::new(vec![]);
        assert!(SpeechSession::new(recognizer, RecognitionConfig::default(), insecure).is_err());
    }

    #[tokio::test]
    async fn test_results_then_end() {
        let recognizer = ScriptedRecognizer::new(vec![
            RecognizerEvent::Result {
                result_index: 0,
                results: vec!["hello".into()],
            },
            RecognizerEvent::Result {
                result_index: 0,
                results: vec!["hello".into(), " world".into()],
            },
            RecognizerEvent::End,
        ]);
        let session =
            SpeechSession::new(recognizer, RecognitionConfig::default(), SUPPORTED).unwrap();
        let (handle, events) = session.start();
        assert_eq!(handle.state(), SpeechState::Idle);

        let events: Vec<_> = events.collect().await;
        assert_eq!(
            events,
            vec![
                TranscriptEvent::Started,
                TranscriptEvent::Transcript("hello".into()),
                TranscriptEvent::Transcript("hello world".into()),
                TranscriptEvent::Ended,
            ]
        );
        assert_eq!(handle.state(), SpeechState::Idle);
    }

    #[tokio::test]
    async fn test_error_returns_to_idle() {
        let recognizer = ScriptedRecognizer::new(vec![RecognizerEvent::Error("no-speech".into())]);
        let session =
            SpeechSession::new(recognizer, RecognitionConfig::default(), SUPPORTED).unwrap();
        let (_handle, events) = session.start();

        let events: Vec<_> = events.collect().await;
        assert_eq!(
            events,
            vec![
                TranscriptEvent::Started,
                TranscriptEvent::Error("no-speech".into()),
                TranscriptEvent::Ended,
            ]
        );
    }

    #[tokio::test]
    async fn test_start_failure() {
        let mut recognizer = ScriptedRecognizer::new(vec![]);
        recognizer.fail_start = true;
        let session =
            SpeechSession::new(recognizer, RecognitionConfig::default(), SUPPORTED).unwrap();
        let (_handle, events) = session.start();

        let events: Vec<_> = events.collect().await;
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], TranscriptEvent::Error(_)));
        assert_eq!(events[1], TranscriptEvent::Ended);
    }

    #[tokio::test]
    async fn test_stop_ends_listening() {
        let recognizer = ScriptedRecognizer::new(vec![RecognizerEvent::Result {
            result_index: 0,
            results: vec!["partial".into()],
        }]);
        let session =
            SpeechSession::new(recognizer, RecognitionConfig::default(), SUPPORTED).unwrap();
        let (handle, events) = session.start();
        let mut events = Box::pin(events);

        assert_eq!(events.next().await, Some(TranscriptEvent::Started));
        assert_eq!(handle.state(), SpeechState::Listening);
        assert_eq!(
            events.next().await,
            Some(TranscriptEvent::Transcript("partial".into()))
        );

        handle.stop();
        assert_eq!(events.next().await, Some(TranscriptEvent::Ended));
        assert_eq!(events.next().await, None);
        assert_eq!(handle.state(), SpeechState::Idle);
    }
}
