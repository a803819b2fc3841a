use std::sync::Arc;

use crate::core::{Config, Driver};
use crate::factory::Dice;
use crate::subscribers::Subscribe;

/// Builder for constructing a [`Driver`] with optional parts.
pub struct DriverBuilder {
    cfg: Config,
    subscribers: Vec<Arc<dyn Subscribe>>,
    dice: Option<Box<dyn Dice>>,
}

impl DriverBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            dice: None,
        }
    }

    /// Sets event subscribers, replacing any added before.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Adds one event subscriber.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Injects the random source, overriding [`Config::seed`].
    pub fn with_dice(mut self, dice: impl Dice) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    /// Builds the driver. Does not need a running tokio runtime.
    pub fn build(self) -> Driver {
        let dice = self.dice.unwrap_or_else(|| self.cfg.dice());
        Driver {
            cfg: self.cfg,
            subscribers: self.subscribers,
            dice,
        }
    }
}
