pub mod quiz_prompt;

pub const DEFAULT_TOPIC: &str = "General Knowledge";
