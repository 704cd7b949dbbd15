// Configuration module
// Public interface for configuration loading

mod loader;
mod settings;

pub use loader::{load_config, load_config_from};
pub use settings::{Config, GenerationConfig, ShellConfig, SpeechConfig};
