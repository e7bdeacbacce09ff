mod macros;

pub mod catalog;
pub mod configurator;
pub mod jitter;
pub mod layout;
pub mod presets;
pub mod price;
pub mod width;

pub use catalog::{BeadId, BeadKind, BeadSpec, Catalog, CatalogError, GemType};
pub use configurator::{BeadSequence, PatternConfig, configure};
pub use jitter::{JitterTable, SlotJitter};
pub use layout::{SlotPlacement, layout};
pub use presets::{Design, PresetError, Style};
pub use price::total_price;
pub use width::{circumference_of, total_width, width_of};
