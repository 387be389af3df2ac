//! Service container for dependency injection
//!
//! Wires up the conversion service with settings and an input source.

use std::sync::Arc;

use crate::application::ConversionService;
use crate::config::Settings;
use crate::infrastructure::traits::{InputSource, RealInputSource};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Where batch and file input is read from
    pub input: Arc<dyn InputSource>,

    pub conversion: ConversionService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealInputSource))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, input: Arc<dyn InputSource>) -> Self {
        let settings = Arc::new(settings);
        let conversion = ConversionService::new(Arc::clone(&settings));

        Self {
            settings,
            input,
            conversion,
        }
    }
}
