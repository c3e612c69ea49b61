pub mod mistral {
    pub const DEFAULT_MODEL: &str = "mistral-small-latest";
    pub const DEFAULT_EMBEDDING_MODEL: &str = "mistral-embed";
    pub const API_BASE: &str = "https://api.mistral.ai";
    pub const CHAT_COMPLETIONS_ENDPOINT: &str = "/v1/chat/completions";
    pub const EMBEDDINGS_ENDPOINT: &str = "/v1/embeddings";
    pub const API_KEY_ENV_VAR: &str = "MISTRAL_API_KEY";
    pub const BASE_URL_ENV_VAR: &str = "MISTRAL_API_BASE_URL";
}
