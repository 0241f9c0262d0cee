//! LLM client test doubles.
