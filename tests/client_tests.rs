//! Integration tests for the client flows against a recording stub backend.

mod support;

use ai_summarizer::chat::{CHAT_FAILURE_MESSAGE, ChatSession, Speaker};
use ai_summarizer::history::HistoryViewer;
use ai_summarizer::settings::ProviderSettings;
use ai_summarizer::storage::{KeyValueStore, MemoryStore, SUMMARIZED_CONTEXT_KEY, THEME_KEY};
use ai_summarizer::summarize::{
    DEFAULT_PROMPT, MISSING_CREDENTIALS_ALERT, SummarizeForm, UPLOAD_FAILED,
};
use ai_summarizer::theme::ThemeController;
use ai_summarizer::types::{HistoryEntry, Provider, Role, ThemeMode, UploadFile, VisitorId};
use ai_summarizer::visitor::{VisitorIdentity, announce_visit};
use support::StubApi;

fn filled_settings() -> ProviderSettings {
    ProviderSettings {
        provider: Provider::OpenAi,
        api_url: "https://api.openai.com/v1".into(),
        api_key: "sk-very-secret".into(),
        model: "gpt-4o-mini".into(),
        temperature: "0.5".into(),
        api_version: String::new(),
    }
}

fn visitor() -> VisitorId {
    VisitorId::new("visitor-1")
}

mod visitor_tests {
    use super::*;

    #[test]
    fn test_first_profile_gets_stable_id() {
        let mut identity = VisitorIdentity::new(MemoryStore::new());

        let first = identity.get_or_create().expect("create visitor");
        let second = identity.get_or_create().expect("reuse visitor");

        assert_eq!(first.id, second.id);
        assert!(first.first_visit);
        assert!(!second.first_visit);
    }

    #[test]
    fn test_id_persists_across_sessions() {
        let store = MemoryStore::new();
        let first = VisitorIdentity::new(store.clone())
            .get_or_create()
            .expect("create visitor");
        let later = VisitorIdentity::new(store)
            .get_or_create()
            .expect("load visitor");

        assert_eq!(first.id, later.id);
        assert!(!later.first_visit);
    }

    #[tokio::test]
    async fn test_announce_visit_calls_backend() {
        let api = StubApi::default();
        announce_visit(&api, &visitor()).await;
        assert_eq!(api.calls(), vec!["visit"]);
    }

    #[tokio::test]
    async fn test_announce_visit_failure_is_silent() {
        let api = StubApi::failing(400, Some("Missing X-Visitor-ID header"));
        announce_visit(&api, &visitor()).await;
        assert_eq!(api.call_count(), 1);
    }
}

mod chat_tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_turn_appends_question_then_answer() {
        let api = StubApi::answering("Paris");
        let mut session = ChatSession::new();

        let sent = session
            .send_message(&api, "Capital of France?", &filled_settings(), Some(&visitor()))
            .await;

        assert!(sent);
        let speakers: Vec<Speaker> = session.transcript().iter().map(|e| e.speaker).collect();
        assert_eq!(speakers, vec![Speaker::You, Speaker::Ai]);
        assert_eq!(session.transcript()[1].text, "Paris");
        assert_eq!(session.history().len(), 2);

        let requests = api.chat_requests.lock().unwrap();
        assert_eq!(requests[0].message, "Capital of France?");
        assert_eq!(requests[0].visitor_id, "visitor-1");
        assert_eq!(requests[0].temperature, 0.5);
        assert_eq!(requests[0].provider, Provider::OpenAi);
    }

    #[tokio::test]
    async fn test_history_sent_with_follow_up() {
        let api = StubApi::answering("ok");
        let mut session = ChatSession::new();
        let settings = filled_settings();

        session.send_message(&api, "first", &settings, None).await;
        session.send_message(&api, "second", &settings, None).await;

        let requests = api.chat_requests.lock().unwrap();
        let roles: Vec<Role> = requests[1].history.iter().map(|m| m.role.clone()).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(requests[1].history[2].content, "second");
        assert!(requests[1].history.iter().all(|m| !m.content.trim().is_empty()));
    }

    #[tokio::test]
    async fn test_failed_turn_shows_generic_error() {
        let api = StubApi::failing(500, Some("Failed to get response from AI."));
        let mut session = ChatSession::new();

        session
            .send_message(&api, "hello", &filled_settings(), None)
            .await;

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].speaker, Speaker::You);
        assert_eq!(transcript[1].speaker, Speaker::Error);
        assert_eq!(transcript[1].text, CHAT_FAILURE_MESSAGE);
        assert!(session.history().is_empty());
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_question_makes_no_call() {
        let api = StubApi::answering("unused");
        let mut session = ChatSession::new();

        let sent = session
            .send_message(&api, " \n\t ", &filled_settings(), None)
            .await;

        assert!(!sent);
        assert!(session.transcript().is_empty());
        assert_eq!(api.call_count(), 0);
    }
}

mod summarize_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_credentials_make_zero_calls() {
        let api = StubApi::default();
        let store = MemoryStore::new();

        for blank in ["api_url", "api_key", "model"] {
            let mut settings = filled_settings();
            match blank {
                "api_url" => settings.api_url.clear(),
                "api_key" => settings.api_key = "   ".into(),
                _ => settings.model.clear(),
            }
            let mut form = SummarizeForm::new();
            form.text = "Some text to summarize".into();

            let sent = form.summarize(&api, &store, &settings, &visitor()).await;

            assert!(!sent, "{blank} empty should block");
            assert_eq!(form.alert(), Some(MISSING_CREDENTIALS_ALERT));
            assert!(!form.is_summarizing());
        }
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_server_detail_surfaces_and_trigger_reenabled() {
        let api = StubApi::failing(500, Some("bad key"));
        let store = MemoryStore::new();
        let mut form = SummarizeForm::new();
        form.text = "Some text".into();

        let sent = form
            .summarize(&api, &store, &filled_settings(), &visitor())
            .await;

        assert!(sent);
        assert!(form.alert().unwrap_or_default().contains("bad key"));
        assert!(!form.is_summarizing());
        assert_eq!(form.summarize_label(), "Summarize Text");
        assert_eq!(form.summary(), None);
        assert_eq!(store.get(SUMMARIZED_CONTEXT_KEY), None);
    }

    #[tokio::test]
    async fn test_success_displays_inline_and_sends_visitor() {
        let api = StubApi {
            summary: "Short version.".into(),
            ..StubApi::default()
        };
        let store = MemoryStore::new();
        let mut form = SummarizeForm::new();
        form.text = "A long article".into();

        form.summarize(&api, &store, &filled_settings(), &visitor())
            .await;

        assert_eq!(form.summary(), Some("Short version."));
        assert!(form.take_history_reload());
        let requests = api.summarize_requests.lock().unwrap();
        let (request, sent_visitor) = &requests[0];
        assert_eq!(sent_visitor, &visitor());
        assert_eq!(request.prompt, DEFAULT_PROMPT);
        assert_eq!(request.temperature, Some(0.5));
    }

    #[tokio::test]
    async fn test_api_key_never_reaches_storage() {
        let api = StubApi {
            answer: Some("fine".into()),
            summary: "summary".into(),
            ..StubApi::default()
        };
        let store = MemoryStore::new();
        let settings = filled_settings();

        let mut identity = VisitorIdentity::new(store.clone());
        let id = identity.get_or_create().unwrap().id;
        let mut form = SummarizeForm::new();
        form.text = "text".into();
        form.summarize(&api, &store, &settings, &id).await;
        let mut session = ChatSession::from_store(&store);
        session.send_message(&api, "q", &settings, Some(&id)).await;

        assert!(
            store
                .values()
                .iter()
                .all(|value| !value.contains("sk-very-secret"))
        );
    }

    #[tokio::test]
    async fn test_upload_replaces_text() {
        let api = StubApi {
            extracted_text: "Extracted from pdf".into(),
            ..StubApi::default()
        };
        let mut form = SummarizeForm::new();
        form.text = "old".into();
        form.select_file(Some(UploadFile::new("report.pdf", vec![1, 2, 3])));

        assert!(form.upload(&api).await);

        assert_eq!(form.text, "Extracted from pdf");
        assert!(!form.is_uploading());
        let uploads = api.uploads.lock().unwrap();
        assert_eq!(uploads[0].content_type(), "application/pdf");
    }

    #[tokio::test]
    async fn test_upload_failure_alerts_and_restores() {
        let api = StubApi::failing(500, None);
        let mut form = SummarizeForm::new();
        form.text = "keep me".into();
        form.select_file(Some(UploadFile::new("notes.txt", b"hi".to_vec())));

        form.upload(&api).await;

        assert_eq!(form.alert(), Some(UPLOAD_FAILED));
        assert_eq!(form.text, "keep me");
        assert_eq!(form.upload_label(), "Upload");
    }
}

mod history_tests {
    use super::*;

    fn sample_entry() -> HistoryEntry {
        serde_json::from_str::<ai_summarizer::types::HistoryReply>(
            r#"{"history":[{"created_at":"2024-01-01T00:00:00Z","model":"gpt-x","summary_text":"hello"}]}"#,
        )
        .unwrap()
        .history
        .remove(0)
    }

    #[tokio::test]
    async fn test_renders_single_entry() {
        let api = StubApi {
            history: vec![sample_entry()],
            ..StubApi::default()
        };
        let mut viewer = HistoryViewer::new(Some(10));

        viewer.load(&api, Some(&visitor())).await;

        assert_eq!(viewer.cards().len(), 1);
        let card = &viewer.cards()[0];
        assert!(card.model_line.contains("gpt-x"));
        assert!(card.summary.contains("hello"));
        assert!(!card.timestamp.is_empty());
        let queries = api.history_queries.lock().unwrap();
        assert_eq!(queries[0], (Some(visitor()), Some(10)));
    }

    #[tokio::test]
    async fn test_reload_rebuilds_instead_of_appending() {
        let api = StubApi {
            history: vec![sample_entry()],
            ..StubApi::default()
        };
        let mut viewer = HistoryViewer::new(None);

        viewer.load(&api, None).await;
        viewer.load(&api, None).await;

        assert_eq!(viewer.cards().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_displayed_cards() {
        let ok = StubApi {
            history: vec![sample_entry()],
            ..StubApi::default()
        };
        let mut viewer = HistoryViewer::new(None);
        assert!(viewer.load(&ok, Some(&visitor())).await);

        let down = StubApi::failing(503, None);
        let rebuilt = viewer.load(&down, Some(&visitor())).await;

        assert!(!rebuilt);
        assert_eq!(down.calls(), vec!["history"]);
        assert_eq!(viewer.cards().len(), 1);
        assert!(viewer.cards()[0].summary.contains("hello"));
    }

    #[tokio::test]
    async fn test_first_load_failure_leaves_list_empty() {
        let api = StubApi::failing(503, None);
        let mut viewer = HistoryViewer::new(None);

        assert!(!viewer.load(&api, None).await);
        assert!(viewer.is_empty());
    }
}

mod theme_tests {
    use super::*;

    #[test]
    fn test_double_toggle_restores_class_and_storage() {
        let store = MemoryStore::new();
        let mut controller = ThemeController::load(store.clone());
        let original_class = controller.body_class();
        let original_stored = store.get(THEME_KEY);

        assert_eq!(controller.toggle(), ThemeMode::Dark);
        assert_eq!(store.get(THEME_KEY), Some("dark".into()));
        controller.toggle();

        assert_eq!(controller.body_class(), original_class);
        assert_eq!(store.get(THEME_KEY), original_stored);
    }

    #[test]
    fn test_saved_theme_applied_on_load() {
        let store = MemoryStore::with_entries([(THEME_KEY, "dark")]);
        let controller = ThemeController::load(store);
        assert_eq!(controller.body_class(), "dark");
    }
}
