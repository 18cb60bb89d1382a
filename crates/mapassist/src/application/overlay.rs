//! The overlay the bootstrap launches.
//!
//! Rendering lives outside this crate.  What is here is the contract
//! ([`Overlay`]), the key-binding logic every overlay shares
//! ([`KeyBindings`], [`OverlayState`]), and [`HeadlessOverlay`], which runs
//! that logic without drawing anything.
//!
//! # Key handling (for beginners)
//!
//! ```text
//! InputHook ──KeyEvent──► KeyBindings::action ──OverlayAction──► OverlayState::apply
//! ```
//!
//! Only key presses count; releases are ignored.  A smaller zoom level shows
//! less of the map, so "zoom in" lowers it.
//!
//! [`HeadlessOverlay`] runs until the hook closes its event channel.  With
//! the Windows hook that happens on Ctrl-C or when the console closes.

use std::sync::mpsc::Sender;

use mapassist_core::{MapAssistConfig, MapConfig};
use tracing::{debug, info, warn};

use crate::infrastructure::input_hook::{vk_for_char, InputHook, KeyEvent};

/// Zoom change per key press.
pub const ZOOM_STEP: f32 = 0.25;
/// Closest allowed zoom level.
pub const MIN_ZOOM: f32 = 0.25;
/// Farthest allowed zoom level.
pub const MAX_ZOOM: f32 = 4.0;

/// Something that shows the map once the configuration is ready.
pub trait Overlay {
    /// Runs until the overlay is closed.  Takes ownership of the hook and
    /// the configuration.
    fn run(
        self: Box<Self>,
        hook: Box<dyn InputHook>,
        config: MapAssistConfig,
    ) -> anyhow::Result<()>;
}

/// What a key press asks the overlay to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    ToggleVisibility,
    ZoomIn,
    ZoomOut,
}

/// Configured keys as Virtual Key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub toggle: Option<u8>,
    pub zoom_in: Option<u8>,
    pub zoom_out: Option<u8>,
}

impl KeyBindings {
    /// Maps the configured key characters; characters with no key code are
    /// logged and left unbound.
    pub fn from_config(map: &MapConfig) -> Self {
        let bind = |name: &str, c: char| {
            let vk = vk_for_char(c);
            if vk.is_none() {
                warn!(binding = name, key = ?c, "key has no virtual key code; binding disabled");
            }
            vk
        };
        Self {
            toggle: bind("toggle", map.toggle_key),
            zoom_in: bind("zoom in", map.zoom_in_key),
            zoom_out: bind("zoom out", map.zoom_out_key),
        }
    }

    /// The action bound to `event`, if it is a press of a bound key.
    ///
    /// When two bindings share a key, toggle wins over zoom in, which wins
    /// over zoom out.
    pub fn action(&self, event: &KeyEvent) -> Option<OverlayAction> {
        if !event.is_down() {
            return None;
        }
        let vk = Some(event.vk_code());
        if vk == self.toggle {
            Some(OverlayAction::ToggleVisibility)
        } else if vk == self.zoom_in {
            Some(OverlayAction::ZoomIn)
        } else if vk == self.zoom_out {
            Some(OverlayAction::ZoomOut)
        } else {
            None
        }
    }
}

/// Mutable display state driven by key presses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayState {
    pub visible: bool,
    pub zoom_level: f32,
}

impl OverlayState {
    /// Initial state: visible unless the overlay follows the in-game map,
    /// at the configured zoom level.
    pub fn new(map: &MapConfig) -> Self {
        Self {
            visible: !map.toggle_via_in_game_map,
            zoom_level: map.zoom_level.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    pub fn apply(&mut self, action: OverlayAction) {
        match action {
            OverlayAction::ToggleVisibility => self.visible = !self.visible,
            OverlayAction::ZoomIn => {
                self.zoom_level = (self.zoom_level - ZOOM_STEP).max(MIN_ZOOM);
            }
            OverlayAction::ZoomOut => {
                self.zoom_level = (self.zoom_level + ZOOM_STEP).min(MAX_ZOOM);
            }
        }
    }
}

/// Overlay without a window: logs the configuration, then applies key
/// bindings until the hook's channel closes.
#[derive(Debug, Default)]
pub struct HeadlessOverlay {
    state_sink: Option<Sender<OverlayState>>,
}

impl HeadlessOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends the state after every applied action to `sink`.
    pub fn with_state_sink(sink: Sender<OverlayState>) -> Self {
        Self {
            state_sink: Some(sink),
        }
    }
}

impl Overlay for HeadlessOverlay {
    fn run(
        self: Box<Self>,
        hook: Box<dyn InputHook>,
        config: MapAssistConfig,
    ) -> anyhow::Result<()> {
        log_summary(&config);

        let bindings = KeyBindings::from_config(&config.map);
        let mut state = OverlayState::new(&config.map);

        let events = match hook.start() {
            Ok(rx) => rx,
            Err(e) => {
                warn!("keyboard hook unavailable, key bindings disabled: {e}");
                return Ok(());
            }
        };
        info!("overlay running; waiting for key presses");

        for event in events.iter() {
            let Some(action) = bindings.action(&event) else {
                continue;
            };
            state.apply(action);
            info!(
                ?action,
                visible = state.visible,
                zoom = state.zoom_level,
                "overlay state changed"
            );
            if let Some(sink) = &self.state_sink {
                // A dropped receiver only means nobody is watching any more.
                let _ = sink.send(state);
            }
        }

        hook.stop();
        debug!("key channel closed; overlay stopped");
        Ok(())
    }
}

fn log_summary(config: &MapAssistConfig) {
    let map = &config.map;
    info!(
        endpoint = %config.api.endpoint,
        position = %map.position,
        size = map.size,
        opacity = map.opacity,
        rotate = map.rotate,
        update_ms = map.update_time,
        "map overlay configured"
    );
    info!(
        prefetch = map.prefetch_areas.len(),
        hidden = map.hidden_areas.len(),
        warn_npcs = map.warn_immune_npcs.len(),
        colored_tiles = config.map_colors.cache().colored().len(),
        "area and NPC lists loaded"
    );
    for (category, style) in config.rendering.categories() {
        debug!(
            category,
            icon = style.can_draw_icon(),
            line = style.can_draw_line(),
            label = style.can_draw_label(),
            "point-of-interest style"
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
