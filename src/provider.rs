mod constants;
pub mod mistral;

pub use constants::mistral as defaults;
pub use mistral::{MistralClient, MistralConfig};
