pub mod openai {
    pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
    pub const API_BASE: &str = "https://api.openai.com";
    pub const CHAT_COMPLETIONS_ENDPOINT: &str = "/v1/chat/completions";
    pub const API_KEY_ENV_VARS: &[&str] = &["OPEN_AI_KEY"];
    pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
}

pub mod gemini {
    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
    pub const API_BASE: &str = "https://generativelanguage.googleapis.com";
    pub const MODELS_PATH: &str = "/v1beta/models";
    pub const GENERATE_CONTENT_ACTION: &str = ":generateContent";
    pub const API_KEY_HEADER: &str = "x-goog-api-key";
    pub const API_KEY_ENV_VARS: &[&str] = &["GOOGLE_API_KEY", "GEMINI_API_KEY"];
}
