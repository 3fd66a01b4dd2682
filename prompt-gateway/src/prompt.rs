//! Instructional prompt wrapped around every user question.

/// Builds the provider prompt for `question` framed in `context`.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        "In the context of {context}, please explain the following clearly and concisely. \
         Give examples when appropriate:\n\n{question}"
    )
}
