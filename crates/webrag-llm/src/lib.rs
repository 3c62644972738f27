//! Prompt assembly and the hosted chat-completion call for the query stage.

mod groq;
mod prompt;

pub use groq::{request_answer, AnswerOutcome, GroqClient, API_KEY_VAR};
pub use prompt::{build_prompt, render_context, NOT_FOUND_MESSAGE};
