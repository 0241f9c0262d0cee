use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use mispriced::application::Scanner;
use mispriced::domain::{Book, Event, ScanRules, TokenId};
use mispriced::error::Error;
use mispriced::port::outbound::exchange::{BookSource, EventSource};
use mispriced::port::outbound::llm::Llm;

/// Catalog served from memory.
pub struct FakeEvents {
    events: Vec<Event>,
    calls: AtomicUsize,
}

impl FakeEvents {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventSource for FakeEvents {
    async fn fetch_events(&self, limit: usize) -> Vec<Event> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.events.iter().take(limit).cloned().collect()
    }

    fn exchange_name(&self) -> &'static str {
        "Fake"
    }
}

/// Order books served from memory, recording every request.
pub struct FakeBooks {
    books: HashMap<TokenId, Book>,
    requests: Mutex<Vec<Vec<TokenId>>>,
}

impl FakeBooks {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: books
                .into_iter()
                .map(|book| (book.token_id().clone(), book))
                .collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Vec<TokenId>> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl BookSource for FakeBooks {
    async fn fetch_books(&self, token_ids: &[TokenId]) -> HashMap<TokenId, Book> {
        self.requests.lock().push(token_ids.to_vec());
        token_ids
            .iter()
            .filter_map(|id| self.books.get(id).map(|book| (id.clone(), book.clone())))
            .collect()
    }

    fn exchange_name(&self) -> &'static str {
        "Fake"
    }
}

pub struct Harness {
    pub scanner: Arc<Scanner>,
    pub events: Arc<FakeEvents>,
    pub books: Arc<FakeBooks>,
}

pub fn harness(events: Vec<Event>, books: Vec<Book>) -> Harness {
    let events = Arc::new(FakeEvents::new(events));
    let books = Arc::new(FakeBooks::new(books));
    let scanner = Arc::new(Scanner::new(
        events.clone(),
        books.clone(),
        ScanRules::default(),
        400,
    ));
    Harness {
        scanner,
        events,
        books,
    }
}

/// Completion backend that answers with a fixed text and counts calls.
pub struct FakeLlm {
    answer: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl Llm for FakeLlm {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn complete(&self, prompt: &str) -> mispriced::error::Result<String> {
        self.prompts.lock().push(prompt.to_string());
        self.answer
            .clone()
            .ok_or_else(|| Error::Llm("backend unavailable".to_string()))
    }
}
