//! Application state and event handling.
//!
//! The app owns the current selections (root, scale, tuning), the display
//! toggles, and the cached position grids. Every parameter change throws
//! the cached scale and grids away and recomputes them; the grids have no
//! identity beyond the current render.

use crate::audio::engine::DEFAULT_NOTE_DURATION;
use crate::audio::AudioEngine;
use crate::board::{fretboard_positions, keyboard_positions, FretPosition, KeyPosition};
use crate::tables::{ScaleDef, Tables};
use crate::theory::{Pitch, PitchClass, Scale, Tuning, NOTE_NAMES};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

/// How long a status message stays visible.
const STATUS_DURATION: Duration = Duration::from_secs(3);

/// Smallest and largest selectable fret count.
pub const MIN_FRETS: u32 = 12;
pub const MAX_FRETS: u32 = 24;

/// Width of one fret cell in the fretboard grid, in columns.
pub const FRET_CELL_WIDTH: u16 = 4;

/// Width of the open-string column (marker plus nut), in columns.
pub const OPEN_COLUMN_WIDTH: u16 = 5;

/// Width of one piano key, in columns.
pub const KEY_CELL_WIDTH: u16 = 3;

/// The currently focused UI panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPanel {
    /// Fretboard grid in the main area.
    Fretboard,
    /// Piano keyboard below it.
    Keyboard,
}

/// Layout regions for mouse hit testing.
/// Stores the screen coordinates of each UI panel, updated during render.
#[derive(Debug, Clone, Default)]
pub struct LayoutRegions {
    /// The header bar with the current selections.
    pub header: Rect,
    /// The fretboard panel (including borders).
    pub fretboard: Rect,
    /// The fretboard grid rows (one row per string, no ruler or borders).
    pub fretboard_grid: Rect,
    /// The piano panel (including borders).
    pub keyboard: Rect,
    /// The piano key columns (no borders).
    pub keyboard_keys: Rect,
    /// The footer with key hints and status.
    pub footer: Rect,
}

impl LayoutRegions {
    /// Determines which panel contains the given screen coordinates.
    pub fn panel_at(&self, x: u16, y: u16) -> Option<FocusedPanel> {
        if self.contains(self.fretboard, x, y) {
            Some(FocusedPanel::Fretboard)
        } else if self.contains(self.keyboard, x, y) {
            Some(FocusedPanel::Keyboard)
        } else {
            None
        }
    }

    fn contains(&self, rect: Rect, x: u16, y: u16) -> bool {
        x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
    }

    /// Maps screen coordinates to a (string row, fret) cell, if they land
    /// on the fretboard grid. Column 0..OPEN_COLUMN_WIDTH is fret 0; each
    /// following FRET_CELL_WIDTH columns is one fret.
    pub fn fret_cell_at(&self, x: u16, y: u16) -> Option<(usize, u32)> {
        if !self.contains(self.fretboard_grid, x, y) {
            return None;
        }
        let col = x - self.fretboard_grid.x;
        let string = (y - self.fretboard_grid.y) as usize;
        let fret = if col < OPEN_COLUMN_WIDTH {
            0
        } else {
            1 + (col - OPEN_COLUMN_WIDTH) as u32 / FRET_CELL_WIDTH as u32
        };
        Some((string, fret))
    }

    /// Maps screen coordinates to a piano key index, if they land on the
    /// key columns.
    pub fn key_at(&self, x: u16, y: u16) -> Option<usize> {
        if !self.contains(self.keyboard_keys, x, y) {
            return None;
        }
        Some(((x - self.keyboard_keys.x) / KEY_CELL_WIDTH) as usize)
    }
}

/// Main application state.
pub struct App {
    /// The merged tuning/scale tables (built-in plus user file).
    pub tables: Tables,

    /// Index into NOTE_NAMES for the selected root.
    pub root_index: usize,
    /// Index into `tables.scales`.
    pub scale_index: usize,
    /// Index into `tables.tunings`.
    pub tuning_index: usize,
    /// Highest fret shown, 0 = open string included implicitly.
    pub max_fret: u32,

    /// Show non-scale notes on the fretboard (dimmed).
    pub show_all_notes: bool,
    /// Show note names on markers instead of scale degrees.
    pub show_note_names: bool,
    /// Suppress audio without dropping the engine.
    pub muted: bool,

    pub focused_panel: FocusedPanel,
    /// Fretboard cursor as (display string row, fret).
    pub fret_cursor: (usize, u32),
    /// Piano cursor as a key index.
    pub key_cursor: usize,

    /// Cached scale, invalidated by root/scale changes.
    scale: Scale,
    /// Cached fretboard enumeration, invalidated by any parameter change.
    fret_grid: Vec<FretPosition>,
    /// Cached keyboard enumeration, invalidated by root/scale changes.
    key_grid: Vec<KeyPosition>,

    /// None when no output device could be opened; the app runs silent.
    pub audio: Option<AudioEngine>,

    /// Transient status message and the time it was set.
    status: Option<(String, Instant)>,

    /// Layout regions for mouse hit testing, updated during render.
    pub layout: LayoutRegions,

    /// Whether the help overlay is visible.
    pub show_help: bool,
    pub help_scroll: u16,
}

impl App {
    pub fn new(tables: Tables, audio: Option<AudioEngine>) -> Self {
        let mut app = Self {
            tables,
            root_index: 0,
            scale_index: 0,
            tuning_index: 0,
            max_fret: MAX_FRETS,
            show_all_notes: false,
            show_note_names: false,
            muted: false,
            focused_panel: FocusedPanel::Fretboard,
            fret_cursor: (0, 0),
            key_cursor: 0,
            scale: Scale::new(PitchClass::from_index(0), &[0]),
            fret_grid: Vec::new(),
            key_grid: Vec::new(),
            audio,
            status: None,
            layout: LayoutRegions::default(),
            show_help: false,
            help_scroll: 0,
        };
        app.refresh();
        app
    }

    // --- selection accessors ---

    pub fn root(&self) -> PitchClass {
        PitchClass::from_index(self.root_index as u8)
    }

    pub fn scale_def(&self) -> &ScaleDef {
        &self.tables.scales[self.scale_index]
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tables.tunings[self.tuning_index]
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn fret_grid(&self) -> &[FretPosition] {
        &self.fret_grid
    }

    pub fn key_grid(&self) -> &[KeyPosition] {
        &self.key_grid
    }

    /// The fretboard cell at a (display string row, fret), if in range.
    pub fn position_at(&self, string: usize, fret: u32) -> Option<&FretPosition> {
        if string >= self.tuning().string_count() || fret > self.max_fret {
            return None;
        }
        self.fret_grid
            .get(string * (self.max_fret as usize + 1) + fret as usize)
    }

    // --- parameter changes ---

    /// Recomputes the caches after the selection indices were set
    /// directly (e.g. from CLI flags).
    pub fn apply_selection(&mut self) {
        self.refresh();
    }

    /// Recomputes the cached scale and both position grids from the
    /// current selections. Called after every parameter change.
    fn refresh(&mut self) {
        self.scale = Scale::new(self.root(), &self.scale_def().intervals);
        self.fret_grid = fretboard_positions(self.tuning(), &self.scale, self.max_fret);
        self.key_grid = keyboard_positions(&self.scale);
        self.fret_cursor.0 = self.fret_cursor.0.min(self.tuning().string_count() - 1);
        self.fret_cursor.1 = self.fret_cursor.1.min(self.max_fret);
        self.key_cursor = self.key_cursor.min(self.key_grid.len() - 1);
        tracing::debug!(
            root = self.root().name(),
            scale = %self.scale_def().name,
            tuning = %self.tuning().name,
            "recomputed grids"
        );
    }

    pub fn cycle_root(&mut self, step: i32) {
        self.root_index = wrap_index(self.root_index, step, NOTE_NAMES.len());
        self.refresh();
        self.set_status(format!("Root: {}", self.root().name()));
    }

    pub fn cycle_scale(&mut self, step: i32) {
        self.scale_index = wrap_index(self.scale_index, step, self.tables.scales.len());
        self.refresh();
        self.set_status(format!("Scale: {}", self.scale_def().name));
    }

    pub fn cycle_tuning(&mut self, step: i32) {
        self.tuning_index = wrap_index(self.tuning_index, step, self.tables.tunings.len());
        self.refresh();
        self.set_status(format!("Tuning: {}", self.tuning().name));
    }

    pub fn adjust_frets(&mut self, delta: i32) {
        let frets = (self.max_fret as i32 + delta).clamp(MIN_FRETS as i32, MAX_FRETS as i32);
        if frets as u32 != self.max_fret {
            self.max_fret = frets as u32;
            self.refresh();
            self.set_status(format!("Frets: {}", self.max_fret));
        }
    }

    pub fn toggle_show_all_notes(&mut self) {
        self.show_all_notes = !self.show_all_notes;
        self.set_status(if self.show_all_notes {
            "Showing all notes"
        } else {
            "Showing scale notes only"
        });
    }

    pub fn toggle_show_note_names(&mut self) {
        self.show_note_names = !self.show_note_names;
        self.set_status(if self.show_note_names {
            "Showing note names"
        } else {
            "Showing scale degrees"
        });
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.set_status(if self.muted { "Muted" } else { "Unmuted" });
    }

    // --- cursor and playback ---

    /// Moves the cursor within the focused panel. `dx` is frets/keys,
    /// `dy` is string rows (positive = down the screen).
    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        match self.focused_panel {
            FocusedPanel::Fretboard => {
                let strings = self.tuning().string_count() as i32;
                let s = (self.fret_cursor.0 as i32 + dy).clamp(0, strings - 1);
                let f = (self.fret_cursor.1 as i32 + dx).clamp(0, self.max_fret as i32);
                self.fret_cursor = (s as usize, f as u32);
            }
            FocusedPanel::Keyboard => {
                let max = self.key_grid.len() as i32 - 1;
                self.key_cursor = (self.key_cursor as i32 + dx).clamp(0, max) as usize;
            }
        }
    }

    /// The pitch under the cursor of the focused panel.
    pub fn cursor_pitch(&self) -> Option<Pitch> {
        match self.focused_panel {
            FocusedPanel::Fretboard => self
                .position_at(self.fret_cursor.0, self.fret_cursor.1)
                .map(|p| p.pitch),
            FocusedPanel::Keyboard => self.key_grid.get(self.key_cursor).map(|k| k.pitch),
        }
    }

    /// Plays the note under the cursor.
    pub fn play_cursor(&mut self) {
        if let Some(pitch) = self.cursor_pitch() {
            self.play(pitch);
        }
    }

    fn play(&mut self, pitch: Pitch) {
        if self.muted {
            return;
        }
        match &self.audio {
            Some(engine) => {
                engine.play(pitch, DEFAULT_NOTE_DURATION);
                self.set_status(format!("{pitch}"));
            }
            None => self.set_status(format!("{pitch} (no audio device)")),
        }
    }

    /// Handles a left click: focuses the clicked panel and, when the
    /// click lands on a grid cell, moves the cursor there and plays it.
    pub fn handle_mouse_click(&mut self, x: u16, y: u16) {
        if let Some(panel) = self.layout.panel_at(x, y) {
            self.focused_panel = panel;
        }
        if let Some((string, fret)) = self.layout.fret_cell_at(x, y) {
            if self.position_at(string, fret).is_some() {
                self.fret_cursor = (string, fret);
                self.play_cursor();
            }
        } else if let Some(index) = self.layout.key_at(x, y) {
            if index < self.key_grid.len() {
                self.key_cursor = index;
                self.play_cursor();
            }
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focused_panel = match self.focused_panel {
            FocusedPanel::Fretboard => FocusedPanel::Keyboard,
            FocusedPanel::Keyboard => FocusedPanel::Fretboard,
        };
    }

    // --- status line ---

    pub fn set_status<S: Into<String>>(&mut self, message: S) {
        self.status = Some((message.into(), Instant::now()));
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_ref().map(|(s, _)| s.as_str())
    }

    /// Drops the status message once it has been shown long enough.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, set_at)) = &self.status {
            if set_at.elapsed() > STATUS_DURATION {
                self.status = None;
            }
        }
    }

    pub fn update_layout(&mut self, layout: LayoutRegions) {
        self.layout = layout;
    }
}

/// Steps an index forward or backward with wraparound.
fn wrap_index(index: usize, step: i32, len: usize) -> usize {
    (index as i32 + step).rem_euclid(len as i32) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Tables::builtin(), None)
    }

    #[test]
    fn test_initial_state() {
        let app = app();
        assert_eq!(app.root().name(), "C");
        assert_eq!(app.scale_def().name, "Major");
        assert_eq!(app.tuning().name, "Standard");
        assert_eq!(app.fret_grid().len(), 6 * 25);
        assert_eq!(app.key_grid().len(), 24);
    }

    #[test]
    fn test_cycle_root_wraps() {
        let mut app = app();
        app.cycle_root(-1);
        assert_eq!(app.root().name(), "B");
        app.cycle_root(1);
        assert_eq!(app.root().name(), "C");
        app.cycle_root(13);
        assert_eq!(app.root().name(), "C#");
    }

    #[test]
    fn test_cycle_recomputes_grids() {
        let mut app = app();
        let before = app.fret_grid().to_vec();
        app.cycle_root(2); // D major
        assert_ne!(app.fret_grid(), &before[..]);
        // Low E string, fret 10 is D: root of D major
        let pos = app.position_at(5, 10).unwrap();
        assert_eq!(pos.pitch.to_string(), "D3");
        assert!(pos.is_root);
        assert_eq!(pos.degree, Some(1));
    }

    #[test]
    fn test_adjust_frets_clamps() {
        let mut app = app();
        app.adjust_frets(-100);
        assert_eq!(app.max_fret, MIN_FRETS);
        assert_eq!(app.fret_grid().len(), 6 * 13);
        app.adjust_frets(100);
        assert_eq!(app.max_fret, MAX_FRETS);
    }

    #[test]
    fn test_cursor_clamped_after_fret_change() {
        let mut app = app();
        app.fret_cursor = (5, 24);
        app.adjust_frets(-12);
        assert_eq!(app.fret_cursor.1, 12);
    }

    #[test]
    fn test_move_cursor_bounds() {
        let mut app = app();
        app.move_cursor(-5, -5);
        assert_eq!(app.fret_cursor, (0, 0));
        app.move_cursor(100, 100);
        assert_eq!(app.fret_cursor, (5, 24));

        app.cycle_focus();
        assert_eq!(app.focused_panel, FocusedPanel::Keyboard);
        app.move_cursor(-3, 0);
        assert_eq!(app.key_cursor, 0);
        app.move_cursor(100, 0);
        assert_eq!(app.key_cursor, 23);
    }

    #[test]
    fn test_cursor_pitch() {
        let mut app = app();
        // Display row 0 is the high E string
        app.fret_cursor = (0, 0);
        assert_eq!(app.cursor_pitch().unwrap().to_string(), "E4");
        app.fret_cursor = (5, 5);
        assert_eq!(app.cursor_pitch().unwrap().to_string(), "A2");
    }

    #[test]
    fn test_play_without_audio_sets_status() {
        let mut app = app();
        app.play_cursor();
        assert!(app.status().unwrap().contains("no audio device"));
    }

    #[test]
    fn test_mute_suppresses_status() {
        let mut app = app();
        app.toggle_mute();
        app.status = None;
        app.play_cursor();
        assert!(app.status().is_none());
    }

    #[test]
    fn test_fret_cell_hit_testing() {
        let mut app = app();
        app.layout.fretboard = Rect::new(0, 2, 110, 10);
        app.layout.fretboard_grid = Rect::new(2, 4, 105, 6);
        // Open column
        assert_eq!(app.layout.fret_cell_at(3, 4), Some((0, 0)));
        // First fret cell starts after the open column
        assert_eq!(
            app.layout.fret_cell_at(2 + OPEN_COLUMN_WIDTH, 5),
            Some((1, 1))
        );
        // Outside the grid
        assert_eq!(app.layout.fret_cell_at(0, 0), None);
    }

    #[test]
    fn test_tuning_with_different_string_count_clamps_cursor() {
        let mut tables = Tables::builtin();
        tables.tunings.push(
            crate::theory::Tuning::from_labels("Bass", &["E1", "A1", "D2", "G2"]).unwrap(),
        );
        let mut app = App::new(tables, None);
        app.fret_cursor = (5, 0);
        let bass = app.tables.tunings.len() - 1;
        app.tuning_index = bass;
        app.apply_selection();
        assert_eq!(app.tuning().name, "Bass");
        assert_eq!(app.fret_cursor.0, 3);
        assert_eq!(app.fret_grid().len(), 4 * 25);
    }
}
