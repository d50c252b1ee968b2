use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "modelprep";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Port the inference server listens on.
pub const PORT: u16 = 8080;

/// Directory holding the trained NER + text-categorisation pipeline,
/// relative to the working directory the server is launched from.
pub const DEFAULT_MODEL_DIR: &str = "./construction/training/ner_and_textcat";

/// Get the pipeline model directory
pub fn model_dir() -> PathBuf {
    PathBuf::from(DEFAULT_MODEL_DIR)
}

/// Listening address: all interfaces on the fixed port.
pub fn bind_addr() -> SocketAddr {
    SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), PORT)
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "modelprep_lib=info,modelprep=info"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_uses_fixed_port_on_all_interfaces() {
        let addr = bind_addr();
        assert_eq!(addr.port(), 8080);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn model_dir_ends_with_pipeline_name() {
        assert!(model_dir().ends_with("ner_and_textcat"));
    }

    #[test]
    fn app_name_is_modelprep() {
        assert_eq!(APP_NAME, "modelprep");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
