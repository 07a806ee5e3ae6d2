//! Registry of the screens the display cycles through

use crate::screens::{
    render_date_time, render_load, render_network, render_storage, render_temperature, RenderFn,
};
use anyhow::{anyhow, Result};
use oled_sens_types::{RefreshConfig, ScreenId};
use std::time::Duration;

/// A screen descriptor. Immutable once registered.
#[derive(Debug, Clone, Copy)]
pub struct Screen {
    pub id: ScreenId,
    pub title: &'static str,
    /// Minimum age of the frame before the controller redraws it on a tick
    pub refresh_interval: Duration,
    pub render: RenderFn,
}

impl Screen {
    /// Standard descriptor for `id`, with its interval taken from `refresh`
    pub fn standard(id: ScreenId, refresh: &RefreshConfig) -> Self {
        let (title, render): (&'static str, RenderFn) = match id {
            ScreenId::Network => ("Network:", render_network),
            ScreenId::Storage => ("Storage:", render_storage),
            ScreenId::SystemLoad => ("System:", render_load),
            ScreenId::Temperature => ("CPU Temp:", render_temperature),
            ScreenId::DateTime => ("Date & Time:", render_date_time),
        };
        Self {
            id,
            title,
            refresh_interval: refresh.interval_for(id.refresh_tier()),
            render,
        }
    }
}

/// Ordered, fixed-size list of screens
///
/// Built once at startup. Indices handed out by [`ScreenRegistry::next`] are
/// always valid, so the controller never has to handle a missing screen.
#[derive(Debug, Clone)]
pub struct ScreenRegistry {
    screens: Vec<Screen>,
}

impl ScreenRegistry {
    /// Create a registry from an explicit screen list
    pub fn new(screens: Vec<Screen>) -> Result<Self> {
        if screens.is_empty() {
            return Err(anyhow!("A screen registry needs at least one screen"));
        }
        if let Some(screen) = screens.iter().find(|s| s.refresh_interval.is_zero()) {
            return Err(anyhow!("Screen {} has a zero refresh interval", screen.id));
        }
        Ok(Self { screens })
    }

    /// Network, Storage, SystemLoad, Temperature, DateTime
    pub fn standard(refresh: &RefreshConfig) -> Self {
        Self {
            screens: ScreenId::ALL
                .iter()
                .map(|id| Screen::standard(*id, refresh))
                .collect(),
        }
    }

    /// Get the screen at `index`, wrapping indices past the end
    pub fn get(&self, index: usize) -> &Screen {
        debug_assert!(index < self.screens.len());
        &self.screens[index % self.screens.len()]
    }

    pub fn count(&self) -> usize {
        self.screens.len()
    }

    /// Index of the screen after `index`, wrapping to 0
    pub fn next(&self, index: usize) -> usize {
        (index + 1) % self.screens.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Screen> {
        self.screens.iter()
    }
}
