/// runtime configuration for the controller process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// namespace whose templates and revisions this process reconciles
    pub namespace: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            namespace: "default".to_owned(),
        }
    }
}
