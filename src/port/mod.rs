//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │       Application        │
//!                 │  extract → rank → scan   │
//!                 └──────────────────────────┘
//!                    │          │          │
//!                    ▼          ▼          ▼
//!             ┌──────────┐ ┌──────────┐ ┌─────────┐
//!             │  Event   │ │   Book   │ │   LLM   │
//!             │  Source  │ │  Source  │ │ Adapter │
//!             └──────────┘ └──────────┘ └─────────┘
//! ```
//!
//! - [`outbound::exchange`]: [`EventSource`](outbound::exchange::EventSource)
//!   and [`BookSource`](outbound::exchange::BookSource) for market data
//! - [`outbound::llm`]: [`Llm`](outbound::llm::Llm) text completion for audits

pub mod outbound;
