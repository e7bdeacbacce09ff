use crate::catalog::{BeadId, GemType};
use crate::configurator::PatternConfig;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

/// Gem diameter used for the body of every preset design.
pub const MAIN_SIZE_MM: u32 = 10;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Repeating material, no focal.
    #[default]
    Classic,
    /// One focal cluster.
    Solitaire,
    /// Three evenly spaced focal clusters.
    Triad,
    /// One dense run of matching gems.
    Array,
}

impl Style {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Solitaire => "Solitaire",
            Self::Triad => "Triad",
            Self::Array => "Array",
        }
    }

    pub fn focal_options(&self) -> &'static [FocalOption] {
        match self {
            Self::Classic => &[],
            Self::Solitaire => SOLITAIRE_OPTIONS,
            Self::Triad => TRIAD_OPTIONS,
            Self::Array => ARRAY_OPTIONS,
        }
    }

    pub fn find_focal(&self, id: &str) -> Option<&'static FocalOption> {
        self.focal_options()
            .iter()
            .find(|o| o.id.eq_ignore_ascii_case(id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocalOption {
    pub id: &'static str,
    pub label: &'static str,
    pub beads: &'static [&'static str],
}

impl FocalOption {
    pub fn bead_ids(&self) -> Vec<BeadId> {
        self.beads.iter().map(|&b| BeadId::from(b)).collect()
    }
}

const SOLITAIRE_OPTIONS: &[FocalOption] = &[
    FocalOption {
        id: "lava-cube-10",
        label: "Lava Stone",
        beads: &["spacer-10x2", "lava-cube-10", "spacer-10x2"],
    },
    FocalOption {
        id: "cube-black-logo-10",
        label: "Black Metal Signature",
        beads: &["spacer-10x2", "cube-black-logo-10", "spacer-10x2"],
    },
    FocalOption {
        id: "cube-stainless-logo-10",
        label: "Stainless Steel Signature",
        beads: &["spacer-10x2", "cube-stainless-logo-10", "spacer-10x2"],
    },
    FocalOption {
        id: "cube-dullsteel-logo-10",
        label: "Matte Steel Signature",
        beads: &["spacer-10x2", "cube-dullsteel-logo-10", "spacer-10x2"],
    },
    FocalOption {
        id: "cube-brass-logo-10",
        label: "Brass Signature",
        beads: &["spacer-10x2", "cube-brass-logo-10", "spacer-10x2"],
    },
];

const TRIAD_OPTIONS: &[FocalOption] = &[
    FocalOption {
        id: "lava-cube-8",
        label: "Lava Stone",
        beads: &["spacer-8x2", "lava-cube-8", "spacer-8x2"],
    },
    FocalOption {
        id: "carved-10",
        label: "Carved Obsidian",
        beads: &["spacer-8x2", "carved-10", "spacer-8x2"],
    },
    FocalOption {
        id: "tigereye-10",
        label: "Tiger Eye",
        beads: &["spacer-8x2", "tigereye-10", "spacer-8x2"],
    },
    FocalOption {
        id: "bronzite-10",
        label: "Bronzite",
        beads: &["spacer-8x2", "bronzite-10", "spacer-8x2"],
    },
    FocalOption {
        id: "malachite-10",
        label: "Malachite",
        beads: &["spacer-8x2", "malachite-10", "spacer-8x2"],
    },
    FocalOption {
        id: "mapstone-10",
        label: "Map Stone",
        beads: &["spacer-8x2", "mapstone-10", "spacer-8x2"],
    },
];

macro_rules! array_option {
    ($id:literal, $label:literal) => {
        FocalOption {
            id: $id,
            label: $label,
            beads: &["spacer-8x2", $id, $id, $id, $id, $id, "spacer-8x2"],
        }
    };
}

const ARRAY_OPTIONS: &[FocalOption] = &[
    array_option!("bronzite-10", "Bronzite"),
    array_option!("onyx-10", "Onyx"),
    array_option!("larvikite-10", "Larvikite"),
    array_option!("malachite-10", "Malachite"),
    array_option!("mapstone-10", "Map Stone"),
    array_option!("quartz-10", "Quartz"),
    array_option!("rubyinzoisite-10", "Ruby in Zoisite"),
    array_option!("tigereye-10", "Tiger Eye"),
    array_option!("whitejade-10", "White Jade"),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSize {
    pub mm: f64,
    pub label: &'static str,
}

pub const TARGET_SIZES: [TargetSize; 9] = [
    TargetSize { mm: 165.1, label: "6.5\"" },
    TargetSize { mm: 171.45, label: "6.75\"" },
    TargetSize { mm: 177.8, label: "7\"" },
    TargetSize { mm: 184.15, label: "7.25\"" },
    TargetSize { mm: 190.5, label: "7.5\"" },
    TargetSize { mm: 196.85, label: "7.75\"" },
    TargetSize { mm: 203.2, label: "8\"" },
    TargetSize { mm: 209.55, label: "8.25\"" },
    TargetSize { mm: 215.9, label: "8.5\"" },
];

/// Finds a standard size by its inch label, with or without the trailing `"`.
pub fn find_target_size(label: &str) -> Option<TargetSize> {
    let wanted = label.trim().trim_end_matches('"');
    TARGET_SIZES
        .iter()
        .find(|t| t.label.trim_end_matches('"') == wanted)
        .copied()
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PresetError {
    #[error("Unknown {style} focal '{id}'")]
    UnknownFocal { style: Style, id: String },
}

/// The choices a customer makes, before they are turned into a pattern.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Design {
    pub style: Style,
    pub target_mm: f64,
    pub primary: GemType,
    pub secondary: Option<GemType>,
    pub spacers: bool,
    /// Focal option id. The style's first option is used when unset.
    pub focal: Option<String>,
}

impl Default for Design {
    fn default() -> Self {
        Self {
            style: Style::Classic,
            target_mm: TARGET_SIZES[2].mm,
            primary: GemType::Onyx,
            secondary: None,
            spacers: false,
            focal: None,
        }
    }
}

impl Design {
    pub fn focal_option(&self) -> Result<Option<&'static FocalOption>, PresetError> {
        match (&self.focal, self.style.focal_options().first()) {
            (_, None) => {
                if let Some(id) = &self.focal {
                    log::warn!("{} style has no focal, ignoring '{}'", self.style, id);
                }
                Ok(None)
            }
            (None, Some(first)) => Ok(Some(first)),
            (Some(id), Some(_)) => self
                .style
                .find_focal(id)
                .map(Some)
                .ok_or_else(|| PresetError::UnknownFocal {
                    style: self.style,
                    id: id.clone(),
                }),
        }
    }

    pub fn pattern(&self) -> Result<PatternConfig, PresetError> {
        let focal = self
            .focal_option()?
            .map(FocalOption::bead_ids)
            .unwrap_or_default();
        let secondary = match self.style {
            Style::Array => None,
            _ => self.secondary,
        };

        Ok(PatternConfig {
            target_circumference_mm: self.target_mm,
            primary: self.primary,
            main_size_mm: MAIN_SIZE_MM,
            secondary,
            use_spacers: self.spacers,
            spacer: None,
            triple_focal: self.style == Style::Triad,
            focal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::configurator::configure;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_focal_bead_is_in_catalog() {
        let catalog = Catalog::standard();
        for style in Style::iter() {
            for option in style.focal_options() {
                for id in option.bead_ids() {
                    assert!(catalog.get(&id).is_some(), "{} missing", id);
                }
            }
        }
    }

    #[test]
    fn test_array_options_are_dense() {
        for option in Style::Array.focal_options() {
            assert_eq!(option.beads.len(), 7);
            assert!(option.beads[1..6].iter().all(|&b| b == option.id));
        }
    }

    #[test]
    fn test_target_sizes() {
        assert_eq!(find_target_size("7").unwrap().mm, 177.8);
        assert_eq!(find_target_size("8.25\"").unwrap().mm, 209.55);
        assert!(find_target_size("9").is_none());
        for size in TARGET_SIZES {
            let inches: f64 = size.label.trim_end_matches('"').parse().unwrap();
            assert!((inches * 25.4 - size.mm).abs() < 1e-9);
        }
    }

    #[test]
    fn test_classic_design_has_no_focal() {
        let design = Design {
            focal: Some("lava-cube-10".to_string()),
            ..Default::default()
        };
        let pattern = design.pattern().unwrap();
        assert!(pattern.focal.is_empty());
        assert!(!pattern.triple_focal);
        assert_eq!(pattern.main_size_mm, MAIN_SIZE_MM);
    }

    #[test]
    fn test_triad_design_defaults_to_first_option() {
        let design = Design {
            style: Style::Triad,
            target_mm: 180.0,
            secondary: Some(GemType::RubyInZoisite),
            spacers: true,
            ..Default::default()
        };
        let pattern = design.pattern().unwrap();
        assert!(pattern.triple_focal);
        assert_eq!(pattern.focal, TRIAD_OPTIONS[0].bead_ids());
        assert_eq!(pattern.secondary, Some(GemType::RubyInZoisite));

        let seq = configure(&pattern, Catalog::standard()).unwrap();
        assert_eq!(seq.len(), 36);
    }

    #[test]
    fn test_array_design_drops_secondary() {
        let design = Design {
            style: Style::Array,
            secondary: Some(GemType::Quartz),
            focal: Some("WhiteJade-10".to_string()),
            ..Default::default()
        };
        let pattern = design.pattern().unwrap();
        assert_eq!(pattern.secondary, None);
        assert_eq!(pattern.focal[1].as_str(), "whitejade-10");
        assert!(!pattern.triple_focal);
    }

    #[test]
    fn test_unknown_focal_is_an_error() {
        let design = Design {
            style: Style::Solitaire,
            focal: Some("moonstone".to_string()),
            ..Default::default()
        };
        assert_eq!(
            design.pattern().unwrap_err(),
            PresetError::UnknownFocal {
                style: Style::Solitaire,
                id: "moonstone".to_string()
            }
        );
    }

    #[test]
    fn test_design_deserialization() {
        let json = r#"{"style": "Triad", "primary": "malachite", "spacers": true, "focal": "carved-10"}"#;
        let design: Design = serde_json::from_str(json).unwrap();
        assert_eq!(design.style, Style::Triad);
        assert_eq!(design.primary, GemType::Malachite);
        assert_eq!(design.target_mm, 177.8);
        assert_eq!(design.focal.as_deref(), Some("carved-10"));
    }
}
