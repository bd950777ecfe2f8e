//! System instructions and prompt assembly.

use crate::types::ChatRequest;

/// Instruction for the conversational assistant
pub const DYSLEXIA_SYSTEM_PROMPT: &str = "
You are a dyslexia-friendly assistant.
Always respond with:
- Short sentences (10-15 words).
- I help Dyslexic readers.
- Clear structure.
- Bullet points for lists.
- Extra spacing between ideas.
- No complex punctuation.
- Avoid jargon.
- Summary first. Details after.
";

/// Instruction for the text simplifier
pub const SIMPLIFY_SYSTEM_PROMPT: &str = "
You simplify text for dyslexic readers.
Rewrite the input to be:
- I help Dyslexic readers.
- Simple words.
- Bullet points when helpful.
- Keep meaning.
Output only the simplified text.
";

/// Used when a conversational request carries no messages
pub const DEFAULT_GREETING: &str = "USER: Hello!";

/// Flatten a chat request into a single plain-text prompt.
pub fn build_prompt(req: &ChatRequest) -> String {
    if req.simplify_mode {
        return format!(
            "{}\n\nSimplify this:\n\n{}",
            SIMPLIFY_SYSTEM_PROMPT,
            req.simplify_input()
        );
    }

    let conversation = if req.messages.is_empty() {
        DEFAULT_GREETING.to_string()
    } else {
        req.messages
            .iter()
            .map(|m| format!("{}: {}", m.role.as_tag(), m.content))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!("{}\n\n{}", DYSLEXIA_SYSTEM_PROMPT, conversation)
}
