use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgb;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::collections::HashMap;
use std::sync::OnceLock;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

pub const GEM_SIZES_MM: [u32; 4] = [6, 8, 10, 12];
pub const SPACER_DIAMETERS_MM: [u32; 4] = [6, 7, 8, 10];
pub const SPACER_THICKNESS_MM: f64 = 2.0;
pub const DEFAULT_SPACER: &str = "spacer-7x2";

const SPACER_PRICE: f64 = 0.45;
const CARVED_PRICE: f64 = 3.0;
const LOGO_CUBE_PRICE: f64 = 5.0;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct BeadId(String);

crate::impl_id_newtype!(BeadId);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Unknown bead id '{0}'")]
    UnknownBead(BeadId),
    #[error("Bead id '{0}' is defined more than once")]
    DuplicateBead(BeadId),
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum GemType {
    Onyx,
    Malachite,
    Bronzite,
    WhiteJade,
    MapStone,
    TigerEye,
    RubyInZoisite,
    Larvikite,
    Quartz,
    Carved,
}

impl GemType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Onyx => "Onyx",
            Self::Malachite => "Malachite",
            Self::Bronzite => "Bronzite",
            Self::WhiteJade => "White Jade",
            Self::MapStone => "Map Stone",
            Self::TigerEye => "Tiger Eye",
            Self::RubyInZoisite => "Ruby in Zoisite",
            Self::Larvikite => "Larvikite",
            Self::Quartz => "Quartz",
            Self::Carved => "Carved",
        }
    }

    pub fn color(&self) -> Srgb<u8> {
        let (r, g, b) = match self {
            Self::Onyx => (0x0a, 0x0a, 0x0a),
            Self::Malachite => (0x17, 0x6b, 0x49),
            Self::Bronzite => (0x5c, 0x46, 0x31),
            Self::WhiteJade => (0xeb, 0xeb, 0xeb),
            Self::MapStone => (0xbe, 0xbe, 0xbe),
            Self::TigerEye => (0x70, 0x43, 0x22),
            Self::RubyInZoisite => (0x3c, 0x75, 0x45),
            Self::Larvikite => (0x58, 0x58, 0x58),
            Self::Quartz => (0x64, 0x62, 0x5f),
            Self::Carved => (0x2b, 0x2b, 0x2b),
        };
        Srgb::new(r, g, b)
    }

    /// Price of one gem of this material at the given diameter.
    pub fn price(&self, size_mm: u32) -> f64 {
        let tier = match size_mm {
            0..=6 => 0,
            7..=8 => 1,
            9..=10 => 2,
            _ => 3,
        };
        match self {
            Self::Carved => CARVED_PRICE,
            Self::Onyx => [0.6, 0.8, 1.0, 1.2][tier],
            _ => [0.9, 1.2, 1.5, 1.8][tier],
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, DeserializeFromStr, EnumString, EnumIter,
    StrumDisplay,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MetalKind {
    Brass,
    Black,
    Stainless,
    DullSteel,
}

impl MetalKind {
    pub fn base_color(&self) -> Srgb<u8> {
        match self {
            Self::Brass => Srgb::new(0x39, 0x32, 0x28),
            Self::Black => Srgb::new(0x22, 0x22, 0x22),
            Self::Stainless => Srgb::new(0xd9, 0xdb, 0xde),
            Self::DullSteel => Srgb::new(0x8a, 0x8d, 0x90),
        }
    }

    pub fn logo_color(&self) -> Srgb<u8> {
        match self {
            Self::Brass => Srgb::new(0xd4, 0xaf, 0x37),
            Self::Black => Srgb::new(0xd7, 0xbd, 0x6a),
            Self::Stainless => Srgb::new(0x4a, 0x2f, 0x1a),
            Self::DullSteel => Srgb::new(0x00, 0x00, 0x00),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Brass => "Antiqued Brass",
            Self::Black => "Black Matte Metal",
            Self::Stainless => "Stainless Steel",
            Self::DullSteel => "Dull Steel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CubeFinish {
    Lava,
    Metal(MetalKind),
}

/// Physical shape of a bead. Each kind carries only the dimensions that apply to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BeadKind {
    Round { diameter_mm: f64, material: GemType },
    Spacer { diameter_mm: f64, thickness_mm: f64 },
    Cube { edge_mm: f64, finish: CubeFinish },
}

impl BeadKind {
    /// Width the bead occupies along the cord.
    pub fn along_loop_mm(&self) -> f64 {
        match *self {
            Self::Round { diameter_mm, .. } => diameter_mm,
            Self::Spacer { thickness_mm, .. } => thickness_mm,
            Self::Cube { edge_mm, .. } => edge_mm,
        }
    }

    pub fn primary_dimension_mm(&self) -> f64 {
        match *self {
            Self::Round { diameter_mm, .. } | Self::Spacer { diameter_mm, .. } => diameter_mm,
            Self::Cube { edge_mm, .. } => edge_mm,
        }
    }

    pub fn is_flat(&self) -> bool {
        !matches!(self, Self::Round { .. })
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self, Self::Spacer { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeadSpec {
    pub id: BeadId,
    pub label: String,
    pub kind: BeadKind,
    pub price: f64,
    pub color: Option<Srgb<u8>>,
}

impl BeadSpec {
    pub fn gem(material: GemType, size_mm: u32) -> Self {
        Self {
            id: gem_id(material, size_mm),
            label: material.label().to_string(),
            kind: BeadKind::Round {
                diameter_mm: size_mm as f64,
                material,
            },
            price: material.price(size_mm),
            color: Some(material.color()),
        }
    }

    pub fn spacer(diameter_mm: u32) -> Self {
        Self {
            id: spacer_id(diameter_mm),
            label: format!("Spacer {}", diameter_mm),
            kind: BeadKind::Spacer {
                diameter_mm: diameter_mm as f64,
                thickness_mm: SPACER_THICKNESS_MM,
            },
            price: SPACER_PRICE,
            color: Some(Srgb::new(0xd4, 0xaf, 0x37)),
        }
    }

    pub fn lava_cube(edge_mm: u32) -> Self {
        Self {
            id: BeadId::new(format!("lava-cube-{}", edge_mm)),
            label: format!("Lava Stone Cube {}mm", edge_mm),
            kind: BeadKind::Cube {
                edge_mm: edge_mm as f64,
                finish: CubeFinish::Lava,
            },
            price: 0.2 * edge_mm as f64,
            color: None,
        }
    }

    pub fn logo_cube(metal: MetalKind) -> Self {
        Self {
            id: BeadId::new(format!("cube-{}-logo-10", metal)),
            label: format!("{} Cube w/ Logo 10mm", metal.label()),
            kind: BeadKind::Cube {
                edge_mm: 10.0,
                finish: CubeFinish::Metal(metal),
            },
            price: LOGO_CUBE_PRICE,
            color: Some(metal.base_color()),
        }
    }
}

pub fn gem_id(material: GemType, size_mm: u32) -> BeadId {
    BeadId::new(format!("{}-{}", material, size_mm))
}

pub fn spacer_id(diameter_mm: u32) -> BeadId {
    BeadId::new(format!("spacer-{}x2", diameter_mm))
}

/// Read-only mapping from bead id to its physical attributes.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    beads: Vec<BeadSpec>,
    index: HashMap<BeadId, usize>,
}

static STANDARD: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    pub fn from_specs(specs: impl IntoIterator<Item = BeadSpec>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for spec in specs {
            if catalog.index.contains_key(&spec.id) {
                return Err(CatalogError::DuplicateBead(spec.id));
            }
            catalog.index.insert(spec.id.clone(), catalog.beads.len());
            catalog.beads.push(spec);
        }
        Ok(catalog)
    }

    /// The built-in product catalog, built on first use.
    pub fn standard() -> &'static Catalog {
        STANDARD.get_or_init(|| {
            let beads = standard_specs();
            let index = beads
                .iter()
                .enumerate()
                .map(|(i, b)| (b.id.clone(), i))
                .collect();
            Catalog { beads, index }
        })
    }

    pub fn get(&self, id: &BeadId) -> Option<&BeadSpec> {
        self.index.get(id).map(|&i| &self.beads[i])
    }

    pub fn lookup(&self, id: &BeadId) -> Result<&BeadSpec, CatalogError> {
        self.get(id)
            .ok_or_else(|| CatalogError::UnknownBead(id.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BeadSpec> {
        self.beads.iter()
    }

    pub fn len(&self) -> usize {
        self.beads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beads.is_empty()
    }
}

fn standard_specs() -> Vec<BeadSpec> {
    let gems = GemType::iter()
        .flat_map(|material| GEM_SIZES_MM.map(|size| BeadSpec::gem(material, size)));
    let spacers = SPACER_DIAMETERS_MM.map(BeadSpec::spacer);
    let cubes = [BeadSpec::lava_cube(10), BeadSpec::lava_cube(8)]
        .into_iter()
        .chain(MetalKind::iter().map(BeadSpec::logo_cube));

    gems.chain(spacers).chain(cubes).collect()
}
