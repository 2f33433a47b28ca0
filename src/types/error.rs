use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("duplicate rule variable name '{name}'")]
    DuplicateVariable { name: String },

    #[error("rule variable bound to '{data_element}' has an empty name")]
    EmptyVariableName { data_element: String },
}
