//! Info provider registry
//!
//! Each provider turns environment variables or a small set of system
//! files into render items. A missing data source means no output,
//! never a failed run.

pub mod desktop;
pub mod memory;
pub mod packages;
pub mod palette;
pub mod system;

use crate::config::{OverrideEntry, Settings};
use crate::data::{OsRelease, Uname};
use crate::render::{InfoLine, RenderItem};
use crate::term::{Emitter, Palette};
use crate::utils::command;
use std::collections::HashMap;

/// Identifiers rendered when PF_INFO is unset
pub const DEFAULT_SELECTION: [&str; 7] =
    ["title", "os", "host", "kernel", "uptime", "pkgs", "memory"];

/// Facts gathered once and shared by every provider invocation
pub struct Context<'a> {
    pub os_release: Option<OsRelease>,
    pub uname: Option<Uname>,
    pub emitter: &'a Emitter,
    pub palette: &'a Palette,
    pub settings: &'a Settings,
}

/// A single displayable fact
pub trait Provider {
    /// Labels this provider can emit, reserved in the label column
    fn labels(&self) -> Vec<&str>;
    /// Gather data and produce render items; empty when unavailable
    fn produce(&self, ctx: &Context) -> Vec<RenderItem>;
}

/// Identifier → provider mapping, seeded with the built-in set
pub struct Registry {
    entries: HashMap<String, Box<dyn Provider>>,
}

impl Registry {
    pub fn with_builtins() -> Self {
        let mut entries: HashMap<String, Box<dyn Provider>> = HashMap::new();
        entries.insert("title".to_string(), Box::new(system::Title));
        entries.insert("os".to_string(), Box::new(system::Os));
        entries.insert("host".to_string(), Box::new(system::Host));
        entries.insert("kernel".to_string(), Box::new(system::Kernel));
        entries.insert("uptime".to_string(), Box::new(system::Uptime));
        entries.insert("shell".to_string(), Box::new(system::Shell));
        entries.insert("editor".to_string(), Box::new(system::Editor));
        entries.insert("pkgs".to_string(), Box::new(packages::Packages));
        entries.insert("memory".to_string(), Box::new(memory::Memory));
        entries.insert("wm".to_string(), Box::new(desktop::WindowManager));
        entries.insert("de".to_string(), Box::new(desktop::DesktopEnvironment));
        entries.insert("palette".to_string(), Box::new(palette::PaletteRow));
        Registry { entries }
    }

    /// Extend or replace entries; runs before the set is finalized
    pub fn apply_overrides(&mut self, overrides: &[OverrideEntry]) {
        for entry in overrides {
            self.entries
                .insert(entry.id.clone(), Box::new(Custom::from_entry(entry)));
        }
    }

    /// Resolve a selection in order
    ///
    /// Unknown identifiers are skipped silently; duplicates render twice.
    pub fn select<'s>(&self, ids: impl IntoIterator<Item = &'s str>) -> Vec<&dyn Provider> {
        ids.into_iter()
            .filter_map(|id| self.entries.get(id).map(|boxed| boxed.as_ref()))
            .collect()
    }
}

/// Provider defined by an override table entry
struct Custom {
    label: String,
    payload: Payload,
    suppress_separator: bool,
    label_slot: Option<usize>,
}

enum Payload {
    Text(String),
    Command(String),
}

impl Custom {
    fn from_entry(entry: &OverrideEntry) -> Self {
        let payload = match &entry.run {
            Some(run) => Payload::Command(run.clone()),
            None => Payload::Text(entry.text.clone().unwrap_or_default()),
        };
        Custom {
            label: entry.label.clone().unwrap_or_else(|| entry.id.clone()),
            payload,
            suppress_separator: entry.suppress_separator,
            label_slot: entry
                .label_color
                .filter(|slot| (1..=8).contains(slot))
                .map(|slot| slot as usize),
        }
    }
}

impl Provider for Custom {
    fn labels(&self) -> Vec<&str> {
        vec![self.label.as_str()]
    }

    fn produce(&self, _ctx: &Context) -> Vec<RenderItem> {
        let value = match &self.payload {
            Payload::Text(text) => text.clone(),
            Payload::Command(cmd) => command::run_shell(cmd).unwrap_or_default(),
        };
        if value.is_empty() {
            return Vec::new();
        }
        let mut line = InfoLine::new(&self.label, value);
        line.suppress_separator = self.suppress_separator;
        line.label_slot = self.label_slot;
        vec![RenderItem::Line(line)]
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;

    pub struct Fixture {
        pub emitter: Emitter,
        pub palette: Palette,
        pub settings: Settings,
    }

    impl Fixture {
        pub fn plain() -> Self {
            let emitter = Emitter::for_terminal("xterm", Some(false), false);
            let palette = Palette::resolve(&emitter, &Default::default());
            Fixture {
                emitter,
                palette,
                settings: Settings::default(),
            }
        }

        pub fn context(&self) -> Context<'_> {
            Context {
                os_release: None,
                uname: None,
                emitter: &self.emitter,
                palette: &self.palette,
                settings: &self.settings,
            }
        }
    }
}
