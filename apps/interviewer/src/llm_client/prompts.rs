// Shared prompt fragments.
// The gateway defines its own task prompts in gateway/prompts.rs; this file holds
// the cross-cutting pieces they are assembled from.

/// Appended to every system prompt whose response is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Persona shared by every interviewer-facing prompt.
pub const INTERVIEWER_PERSONA: &str = "You are a professional, experienced Excel trainer \
    and senior analyst conducting a mock Excel proficiency assessment. \
    Use precise Excel terminology and name specific functions and features.";

/// Builds a system prompt that enforces JSON-only output on top of a task description.
pub fn json_system(task: &str) -> String {
    format!("{INTERVIEWER_PERSONA}\n\n{task}\n\n{JSON_ONLY_INSTRUCTION}")
}

/// Builds a free-text system prompt on top of a task description.
pub fn prose_system(task: &str) -> String {
    format!("{INTERVIEWER_PERSONA}\n\n{task}")
}
