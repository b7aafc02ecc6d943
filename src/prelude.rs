pub use tracing::{debug, error, info, instrument, warn};

pub use crate::error::{Error, Result};
