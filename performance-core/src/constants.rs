//! Central Configuration Constants
//!
//! Single source of truth for artifact locations and app identity.

/// Default ONNX model location
pub const DEFAULT_MODEL_PATH: &str = "models/model.onnx";

/// Default StandardScaler sidecar location
pub const DEFAULT_SCALER_PATH: &str = "models/scaler.json";

/// Default layout metadata sidecar location
pub const DEFAULT_METADATA_PATH: &str = "models/model.json";

/// Library version
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Student Performance Engine";
