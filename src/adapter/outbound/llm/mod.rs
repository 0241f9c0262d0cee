//! LLM adapter modules.
//!
//! Provides the OpenAI implementation of the
//! [`Llm`](crate::port::outbound::llm::Llm) trait used by the forensic audit.

pub mod client;
pub mod openai;
