// Server configuration from environment variables
use std::env;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    pub addr: String,
    /// Interpreter binary used to run submissions
    pub python_bin: String,
    /// Path to the questions registry file
    pub questions_file: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            addr: env::var("GRADEBOX_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            python_bin: env::var("GRADEBOX_PYTHON").unwrap_or_else(|_| "python3".to_string()),
            questions_file: env::var("GRADEBOX_QUESTIONS_FILE")
                .unwrap_or_else(|_| "config/questions.json".to_string()),
        }
    }
}
