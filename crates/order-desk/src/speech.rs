//! # Voice Input
//!
//! Dictation into a text field. A recognition session is bound to one field at a time; starting
//! on another field stops the running session first. When the platform has no recognizer the
//! user gets a notice instead.

use crate::notice::Notice;
use tracing::debug;

pub const UNSUPPORTED_NOTICE: &str = "お使いのブラウザは音声認識に対応していません。";

/// Recognition language.
pub const LANG: &str = "ja-JP";

/// Receives the final transcript of a session.
pub type ResultCallback = Box<dyn FnMut(String) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechStart {
    Started,
    Unsupported,
}

/// A speech recognizer.
pub trait SpeechToText: Send {
    /// Starts listening for `field_id`. A session already running is stopped first.
    fn start(&mut self, field_id: &str, on_result: ResultCallback) -> SpeechStart;

    fn stop(&mut self);

    /// The field the running session belongs to.
    fn listening_field(&self) -> Option<&str>;
}

/// The recognizer of a platform without speech support.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedSpeech;

impl SpeechToText for UnsupportedSpeech {
    fn start(&mut self, _field_id: &str, _on_result: ResultCallback) -> SpeechStart {
        SpeechStart::Unsupported
    }

    fn stop(&mut self) {}

    fn listening_field(&self) -> Option<&str> {
        None
    }
}

/// Recognizer fed by hand. Each call to [`hear`](Self::hear) is one utterance; like a
/// non-continuous recognizer, the session ends after delivering it.
#[derive(Default)]
pub struct ScriptedSpeech {
    session: Option<(String, ResultCallback)>,
}

impl ScriptedSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `transcript` to the running session and ends it. Returns `false` when nothing
    /// was listening.
    pub fn hear(&mut self, transcript: &str) -> bool {
        match self.session.take() {
            Some((field_id, mut on_result)) => {
                debug!(%field_id, lang = LANG, "Recognized");
                on_result(transcript.to_string());
                true
            }
            None => false,
        }
    }
}

impl SpeechToText for ScriptedSpeech {
    fn start(&mut self, field_id: &str, on_result: ResultCallback) -> SpeechStart {
        self.stop();
        self.session = Some((field_id.to_string(), on_result));
        SpeechStart::Started
    }

    fn stop(&mut self) {
        self.session = None;
    }

    fn listening_field(&self) -> Option<&str> {
        self.session.as_ref().map(|(field_id, _)| field_id.as_str())
    }
}

/// Voice input as the order form uses it.
pub struct Dictation<S> {
    recognizer: S,
}

impl<S: SpeechToText> Dictation<S> {
    pub fn new(recognizer: S) -> Self {
        Self { recognizer }
    }

    /// Starts dictating into `field_id`. Returns the notice to show when speech is unsupported.
    pub fn start(
        &mut self,
        field_id: &str,
        on_result: impl FnMut(String) + Send + 'static,
    ) -> Option<Notice> {
        match self.recognizer.start(field_id, Box::new(on_result)) {
            SpeechStart::Started => None,
            SpeechStart::Unsupported => Some(Notice::error(UNSUPPORTED_NOTICE)),
        }
    }

    pub fn stop(&mut self) {
        self.recognizer.stop();
    }

    pub fn is_listening(&self, field_id: &str) -> bool {
        self.recognizer.listening_field() == Some(field_id)
    }

    pub fn recognizer_mut(&mut self) -> &mut S {
        &mut self.recognizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn sink() -> (Arc<Mutex<Vec<String>>>, impl FnMut(String) + Send + 'static) {
        let heard = Arc::new(Mutex::new(Vec::new()));
        let writer = Arc::clone(&heard);
        (heard, move |text| writer.lock().unwrap().push(text))
    }

    #[test]
    fn test_unsupported_platform_yields_notice() {
        let mut dictation = Dictation::new(UnsupportedSpeech);
        let (_, on_result) = sink();
        let notice = dictation.start("free-0", on_result).unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.message, UNSUPPORTED_NOTICE);
        assert!(!dictation.is_listening("free-0"));
    }

    #[test]
    fn test_session_delivers_once_then_ends() {
        let mut dictation = Dictation::new(ScriptedSpeech::new());
        let (heard, on_result) = sink();

        assert!(dictation.start("free-0", on_result).is_none());
        assert!(dictation.is_listening("free-0"));

        assert!(dictation.recognizer_mut().hear("黒霧島 一升瓶"));
        assert!(!dictation.is_listening("free-0"));
        assert!(!dictation.recognizer_mut().hear("ignored"));
        assert_eq!(*heard.lock().unwrap(), vec!["黒霧島 一升瓶".to_string()]);
    }

    #[test]
    fn test_starting_another_field_stops_the_first() {
        let mut dictation = Dictation::new(ScriptedSpeech::new());
        let (first, first_cb) = sink();
        let (second, second_cb) = sink();

        dictation.start("free-0", first_cb);
        dictation.start("free-1", second_cb);
        assert!(!dictation.is_listening("free-0"));
        assert!(dictation.is_listening("free-1"));

        dictation.recognizer_mut().hear("生ビール");
        assert!(first.lock().unwrap().is_empty());
        assert_eq!(*second.lock().unwrap(), vec!["生ビール".to_string()]);

        dictation.start("free-2", |_| {});
        dictation.stop();
        assert!(!dictation.is_listening("free-2"));
    }
}
