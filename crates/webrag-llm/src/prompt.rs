//! Prompt assembly from retrieved chunks.

use webrag_core::types::RetrievalHit;

/// Canned reply the model is instructed to give when the context is thin.
pub const NOT_FOUND_MESSAGE: &str =
    "I could not find this information in the provided sources.";

/// Renders the retrieved chunks as labelled context blocks.
pub fn render_context(hits: &[RetrievalHit]) -> String {
    hits.iter()
        .map(|hit| format!("Source ({}): {}", hit.chunk.source, hit.chunk.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Builds the full instruction prompt: answer strictly from the supplied
/// context, fall back to [`NOT_FOUND_MESSAGE`], cite sources in brackets.
pub fn build_prompt(question: &str, subject: &str, hits: &[RetrievalHit]) -> String {
    let context = render_context(hits);
    format!(
        "You are an assistant answering questions about {subject}.\n\
         Use ONLY the information inside the \"Context\". Do NOT add your own knowledge.\n\
         If the answer is not found, say: \"{NOT_FOUND_MESSAGE}\"\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         Question: {question}\n\
         \n\
         Answer concisely and mention the source in brackets, e.g., [Source]."
    )
}
