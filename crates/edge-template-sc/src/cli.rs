//!
//! # CLI for the edge template controller
//!
//! Parameters are overwritten in the following sequence:
//!     1) default values
//!     2) cli parameters
//!
use clap::Parser;

use crate::config::ControllerConfig;

/// cli options
#[derive(Debug, Parser)]
#[command(name = "edge-template-sc", about = "Edge Template Controller")]
pub struct ControllerOpt {
    /// namespace to watch for templates and revisions
    #[arg(short = 'n', long = "namespace", value_name = "namespace")]
    namespace: Option<String>,
}

impl ControllerOpt {
    pub fn process(self) -> ControllerConfig {
        let mut config = ControllerConfig::default();
        if let Some(namespace) = self.namespace {
            config.namespace = namespace;
        }
        config
    }
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use super::ControllerOpt;

    #[test]
    fn test_namespace_override() {
        let opt = ControllerOpt::parse_from(["edge-template-sc", "-n", "edge-system"]);
        assert_eq!(opt.process().namespace, "edge-system");

        let opt = ControllerOpt::parse_from(["edge-template-sc"]);
        assert_eq!(opt.process().namespace, "default");
    }
}
