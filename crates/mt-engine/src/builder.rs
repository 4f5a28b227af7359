//! Fluent builder for constructing an [`Engine`].

use std::sync::Arc;

use mt_anim::AnimationDriver;
use mt_core::{EngineConfig, Frame};
use mt_samples::{RawRecord, SampleStore};
use mt_timeline::{OffsetRange, TimelineIndex};

use crate::{CancelToken, DataSource, Engine, EngineResult, NoopObserver};

/// Fluent builder for [`Engine`].
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                              |
/// |-----------------|--------------------------------------|
/// | `.source(s)`    | None: only explicit loads and posts  |
/// | `.records(v)`   | Start with no samples                |
/// | `.cancel(t)`    | A fresh [`CancelToken`]              |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(config)
///     .source(JsonFileSource::new("tracks.json"))
///     .build()?;
/// ```
pub struct EngineBuilder {
    config:  EngineConfig,
    source:  Option<Box<dyn DataSource + Send>>,
    records: Option<Vec<RawRecord>>,
    cancel:  Option<CancelToken>,
}

impl EngineBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            source:  None,
            records: None,
            cancel:  None,
        }
    }

    /// The source [`Engine::refresh`] and periodic refresh fetch from.
    pub fn source<S: DataSource + Send + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Records to load before the first frame.
    pub fn records(mut self, records: Vec<RawRecord>) -> Self {
        self.records = Some(records);
        self
    }

    /// Share an existing stop flag with the engine.
    pub fn cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Validate the configuration and return a ready-to-run [`Engine`].
    pub fn build(self) -> EngineResult<Engine> {
        self.config.validate()?;
        let range = OffsetRange::from_config(&self.config)?;

        let mut engine = Engine {
            range,
            store:   SampleStore::new(),
            index:   TimelineIndex::empty(),
            driver:  AnimationDriver::from_config(&self.config),
            source:  self.source,
            frame:   Frame::ZERO,
            offset:  None,
            mailbox: Arc::default(),
            cancel:  self.cancel.unwrap_or_default(),
            config:  self.config,
        };

        if let Some(records) = self.records {
            engine.load(&records, &mut NoopObserver);
        }
        Ok(engine)
    }
}
