/// Grading prompt asking for a `{"is_correct": 0|1, "similarity": 0..1}` verdict.
pub(crate) fn build_prompt(sampled: &str, expected: &str) -> String {
    format!(
        "Assess how semantically equivalent the chatbot answer is to the expected answer.\n\
         Chatbot answer: {}\n\
         Expected answer: {}\n\
         Criteria: relevance (the answer carries the same meaning) and coherence (clear and logical).\n\
         Emoji (for example ❌), decorative symbols and minor phrasing differences do not affect semantic equivalence.\n\
         Return a JSON object with exactly two fields:\n\
         {{\n\
         \x20   \"is_correct\": 1 if the answers are equivalent, 0 if not,\n\
         \x20   \"similarity\": a number from 0 to 1 reflecting the degree of similarity\n\
         }}",
        sampled, expected
    )
}
