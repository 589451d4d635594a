// ─────────────────────────────────────────────────────────────────────
// Corelat — Layout
// License: MIT
// ─────────────────────────────────────────────────────────────────────
//! JSON layout document schema.
//!
//! A layout is `{width, height, grid}` where `grid` is a row-major 2D
//! array and each entry is either a bare type-name string or an object
//! `{fa_type, enrichment?, life?}`. Unknown type names fail fast at
//! load time; the loader never guesses a default.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Closed set of assembly kinds occupying grid positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssemblyKind {
    Fuel,
    Moderator,
    ControlRod,
    Blank,
}

impl AssemblyKind {
    /// Stable index used by kind-pair lookup tables.
    pub fn index(self) -> usize {
        match self {
            AssemblyKind::Fuel => 0,
            AssemblyKind::Moderator => 1,
            AssemblyKind::ControlRod => 2,
            AssemblyKind::Blank => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AssemblyKind::Fuel => "Fuel",
            AssemblyKind::Moderator => "Moderator",
            AssemblyKind::ControlRod => "ControlRod",
            AssemblyKind::Blank => "Blank",
        }
    }
}

impl FromStr for AssemblyKind {
    type Err = CoreError;

    /// Accepts the canonical names plus the snake_case spellings found
    /// in hand-written layout files.
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "Fuel" | "fuel" => Ok(AssemblyKind::Fuel),
            "Moderator" | "moderator" => Ok(AssemblyKind::Moderator),
            "ControlRod" | "control_rod" | "control" => Ok(AssemblyKind::ControlRod),
            "Blank" | "blank" | "empty" => Ok(AssemblyKind::Blank),
            other => Err(CoreError::UnknownAssemblyType {
                name: other.to_string(),
            }),
        }
    }
}

/// One grid entry: either `"Fuel"` or `{"fa_type": "Fuel", "enrichment": 0.03}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellSpec {
    Name(String),
    Detailed(CellDetail),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellDetail {
    pub fa_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life: Option<f64>,
}

impl CellSpec {
    pub fn kind(&self) -> CoreResult<AssemblyKind> {
        match self {
            CellSpec::Name(name) => name.parse(),
            CellSpec::Detailed(detail) => detail.fa_type.parse(),
        }
    }

    pub fn enrichment(&self) -> Option<f64> {
        match self {
            CellSpec::Name(_) => None,
            CellSpec::Detailed(detail) => detail.enrichment,
        }
    }

    pub fn life(&self) -> Option<f64> {
        match self {
            CellSpec::Name(_) => None,
            CellSpec::Detailed(detail) => detail.life,
        }
    }
}

/// A complete row-major layout document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub width: usize,
    pub height: usize,
    pub grid: Vec<Vec<CellSpec>>,
}

impl LayoutSpec {
    /// Load and validate a layout from a JSON file.
    pub fn from_file(path: &str) -> CoreResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let layout: Self = serde_json::from_str(&contents)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Check declared dimensions against the grid shape and resolve
    /// every type name, failing on the first unknown one.
    pub fn validate(&self) -> CoreResult<()> {
        let found_h = self.grid.len();
        let found_w = self.grid.first().map_or(0, |row| row.len());
        if found_h != self.height || self.grid.iter().any(|row| row.len() != self.width) {
            return Err(CoreError::LayoutShape {
                expected_w: self.width,
                expected_h: self.height,
                found_w,
                found_h,
            });
        }
        for row in &self.grid {
            for cell in row {
                cell.kind()?;
            }
        }
        Ok(())
    }
}
