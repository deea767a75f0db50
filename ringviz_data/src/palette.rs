// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable per-category colour assignment.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use peniko::Color;

/// The default series colours, handed out in order of first use.
pub const DEFAULT_COLORS: [Color; 10] = [
    Color::from_rgb8(0x01, 0xB8, 0xAA),
    Color::from_rgb8(0x37, 0x46, 0x49),
    Color::from_rgb8(0xFD, 0x62, 0x5E),
    Color::from_rgb8(0xF2, 0xC8, 0x0F),
    Color::from_rgb8(0x5F, 0x6B, 0x6D),
    Color::from_rgb8(0x8A, 0xD4, 0xEB),
    Color::from_rgb8(0xFE, 0x96, 0x66),
    Color::from_rgb8(0xA6, 0x69, 0x99),
    Color::from_rgb8(0x35, 0x99, 0xB8),
    Color::from_rgb8(0xDF, 0xBF, 0xBF),
];

/// Assigns colours to category keys.
///
/// A key keeps its colour for as long as it stays in the data, so the same category gets the
/// same colour across updates. [`ColorPalette::retain`] forgets keys that left; a key that comes
/// back later gets the next colour in the cycle. Overrides take precedence over assigned colours
/// and are never forgotten.
#[derive(Clone, Debug)]
pub struct ColorPalette {
    colors: Vec<Color>,
    assigned: HashMap<String, Color>,
    overrides: HashMap<String, Color>,
    next: usize,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::new(DEFAULT_COLORS.to_vec())
    }
}

impl ColorPalette {
    /// Creates a palette cycling through `colors`.
    ///
    /// An empty list falls back to [`DEFAULT_COLORS`].
    pub fn new(colors: Vec<Color>) -> Self {
        let colors = if colors.is_empty() {
            DEFAULT_COLORS.to_vec()
        } else {
            colors
        };
        Self {
            colors,
            assigned: HashMap::new(),
            overrides: HashMap::new(),
            next: 0,
        }
    }

    /// Pins the colour of `key`.
    pub fn with_override(mut self, key: impl Into<String>, color: Color) -> Self {
        self.set_override(key, color);
        self
    }

    /// Pins the colour of `key` in place.
    pub fn set_override(&mut self, key: impl Into<String>, color: Color) {
        self.overrides.insert(key.into(), color);
    }

    /// Returns the colour for `key`, assigning the next palette colour on first use.
    pub fn color(&mut self, key: &str) -> Color {
        if let Some(color) = self.overrides.get(key) {
            return *color;
        }
        if let Some(color) = self.assigned.get(key) {
            return *color;
        }
        let color = self.colors[self.next % self.colors.len()];
        self.next += 1;
        self.assigned.insert(key.into(), color);
        color
    }

    /// Forgets assigned colours of keys for which `keep` returns `false`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.assigned.retain(|key, _| keep(key));
    }

    /// Number of keys that received an assigned colour.
    pub fn assigned_len(&self) -> usize {
        self.assigned.len()
    }
}
