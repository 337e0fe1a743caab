//! Shared data types

use serde_json::{Map, Value};

/// Parameter map assembled from validated tool arguments and sent to the API
pub type Params = Map<String, Value>;
