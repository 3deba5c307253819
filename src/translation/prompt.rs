/// Separator placed between the prompt template and the source text.
pub const PROMPT_SEPARATOR: &str = "\n\n";

/// Builds the outbound prompt: the template, a blank line, then the source text.
///
/// Nothing is escaped or truncated.
pub fn build_prompt(prompt_template: &str, source_text: &str) -> String {
    let mut prompt =
        String::with_capacity(prompt_template.len() + PROMPT_SEPARATOR.len() + source_text.len());
    prompt.push_str(prompt_template);
    prompt.push_str(PROMPT_SEPARATOR);
    prompt.push_str(source_text);
    prompt
}
