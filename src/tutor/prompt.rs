pub const SYSTEM_INSTRUCTION_TEMPLATE: &str = "You are a friendly and patient language tutor for {language}. \
     Your goal is to help me practice my conversational skills. \
     Keep your responses concise and natural, as if in a real conversation. \
     If I make a mistake, gently correct it and briefly explain why. \
     Encourage me to continue the conversation. \
     Start by greeting me in {language}.";

/// Message sent right after a session opens so the tutor speaks first.
pub const GREETING_PROBE: &str = "Hello!";

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_system_instruction(language: &str) -> String {
    // {language} is a placeholder for string replacement, not a format argument
    SYSTEM_INSTRUCTION_TEMPLATE.replace("{language}", language)
}
