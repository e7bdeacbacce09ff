use crate::config::OutputFormat;
use derive_more::{Display, From, Into};
use palette::Srgb;
use serde::Serialize;
use std::io::{self, Write};
use strand::catalog::{BeadKind, CubeFinish};
use strand::presets::{FocalOption, Style, TARGET_SIZES};
use strand::width::mm_to_inches;
use strand::{
    BeadId, BeadSequence, Catalog, CatalogError, JitterTable, circumference_of, total_price,
};
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Display, From, Into)]
#[display("{_0:.1}mm")]
#[serde(transparent)]
pub struct Millimetres(f64);

pub trait Report: Serialize {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()>;
}

pub fn print<R: Report>(report: &R, format: OutputFormat) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, report)?;
            writeln!(out)?;
        }
        OutputFormat::Text => report.write_text(&mut out)?,
    }
    Ok(())
}

fn hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Consecutive equal ids collapsed into (id, count).
pub fn collapse_runs(sequence: &[BeadId]) -> Vec<(&BeadId, usize)> {
    let mut runs: Vec<(&BeadId, usize)> = Vec::new();
    for id in sequence {
        match runs.last_mut() {
            Some((last, n)) if *last == id => *n += 1,
            _ => runs.push((id, 1)),
        }
    }
    runs
}

#[derive(Debug, Serialize)]
pub struct DesignReport {
    pub style: Style,
    pub beads: usize,
    pub circumference: Millimetres,
    pub inches: f64,
    pub price: u64,
    pub sequence: BeadSequence,
}

impl DesignReport {
    pub fn build(
        style: Style,
        sequence: BeadSequence,
        catalog: &Catalog,
    ) -> Result<Self, CatalogError> {
        let circumference = circumference_of(catalog, &sequence)?;
        Ok(Self {
            style,
            beads: sequence.len(),
            circumference: circumference.into(),
            inches: mm_to_inches(circumference),
            price: total_price(catalog, &sequence)?,
            sequence,
        })
    }
}

impl Report for DesignReport {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}, {} beads", self.style.label(), self.beads)?;
        writeln!(
            out,
            "Circumference: {} ({:.2}\")",
            self.circumference, self.inches
        )?;
        writeln!(out, "Price: {}", self.price)?;
        for (id, count) in collapse_runs(&self.sequence) {
            match count {
                1 => writeln!(out, "  {}", id)?,
                n => writeln!(out, "  {} x{}", id, n)?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct PlacementRow {
    pub index: usize,
    pub bead: BeadId,
    pub position: [f64; 3],
    /// Quaternion as x, y, z, w.
    pub rotation: [f64; 4],
    pub flat: bool,
    pub color: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LayoutReport {
    pub circumference: Millimetres,
    pub seed: u64,
    pub slots: Vec<PlacementRow>,
}

impl LayoutReport {
    /// Lays out `sequence` and layers the seeded jitter on top.
    pub fn build(
        sequence: &[BeadId],
        catalog: &Catalog,
        seed: u64,
    ) -> Result<Self, CatalogError> {
        let circumference = circumference_of(catalog, sequence)?;
        let placements = strand::layout(sequence, circumference, catalog)?;

        let mut jitter = JitterTable::new(seed);
        jitter.sync(sequence, catalog)?;

        let slots = jitter
            .apply(&placements)
            .into_iter()
            .map(|p| -> Result<PlacementRow, CatalogError> {
                let tinted = catalog
                    .lookup(&p.bead)?
                    .color
                    .map(|c| hex(jitter.get(p.index).tint(c).into_format()));
                Ok(PlacementRow {
                    index: p.index,
                    position: p.position.to_array(),
                    rotation: p.rotation().to_array(),
                    flat: p.flat,
                    color: tinted,
                    bead: p.bead,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            circumference: circumference.into(),
            seed,
            slots,
        })
    }
}

impl Report for LayoutReport {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Ring: {}, seed {}", self.circumference, self.seed)?;
        for slot in &self.slots {
            let [x, y, z] = slot.position;
            writeln!(
                out,
                "{:>4} {:<24} {:>8.2} {:>8.2} {:>8.2} {}{}",
                slot.index,
                slot.bead,
                x,
                y,
                z,
                if slot.flat { "flat" } else { "round" },
                slot.color
                    .as_deref()
                    .map(|c| format!(" {}", c))
                    .unwrap_or_default()
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogRow {
    pub id: BeadId,
    pub label: String,
    pub kind: &'static str,
    pub width: Millimetres,
    pub price: f64,
    pub color: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogReport {
    pub beads: Vec<CatalogRow>,
}

fn kind_name(kind: &BeadKind) -> &'static str {
    match kind {
        BeadKind::Round { .. } => "round",
        BeadKind::Spacer { .. } => "spacer",
        BeadKind::Cube {
            finish: CubeFinish::Lava,
            ..
        } => "lava cube",
        BeadKind::Cube {
            finish: CubeFinish::Metal(_),
            ..
        } => "metal cube",
    }
}

impl CatalogReport {
    pub fn build(catalog: &Catalog) -> Self {
        let beads = catalog
            .iter()
            .map(|spec| CatalogRow {
                id: spec.id.clone(),
                label: spec.label.clone(),
                kind: kind_name(&spec.kind),
                width: spec.kind.along_loop_mm().into(),
                price: spec.price,
                color: spec.color.map(hex),
            })
            .collect();
        Self { beads }
    }
}

impl Report for CatalogReport {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        for row in &self.beads {
            writeln!(
                out,
                "{:<24} {:<28} {:<10} {:>7} {:>6.2}",
                row.id, row.label, row.kind, row.width, row.price
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct FocalRow {
    pub style: Style,
    pub id: &'static str,
    pub label: &'static str,
    pub beads: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct FocalReport {
    pub focals: Vec<FocalRow>,
}

impl FocalReport {
    pub fn build() -> Self {
        let focals = Style::iter()
            .flat_map(|style| {
                style
                    .focal_options()
                    .iter()
                    .map(move |o: &FocalOption| FocalRow {
                        style,
                        id: o.id,
                        label: o.label,
                        beads: o.beads,
                    })
            })
            .collect();
        Self { focals }
    }
}

impl Report for FocalReport {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        for row in &self.focals {
            writeln!(
                out,
                "{:<10} {:<24} {:<26} {}",
                row.style,
                row.id,
                row.label,
                row.beads.join(" ")
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct SizeRow {
    pub label: &'static str,
    pub mm: f64,
}

#[derive(Debug, Serialize)]
pub struct SizesReport {
    pub sizes: Vec<SizeRow>,
}

impl SizesReport {
    pub fn build() -> Self {
        let sizes = TARGET_SIZES
            .iter()
            .map(|t| SizeRow {
                label: t.label,
                mm: t.mm,
            })
            .collect();
        Self { sizes }
    }
}

impl Report for SizesReport {
    fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
        for size in &self.sizes {
            writeln!(out, "{:<6} {}", size.label, Millimetres::from(size.mm))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<BeadId> {
        list.iter().map(|&s| BeadId::from(s)).collect()
    }

    #[test]
    fn test_collapse_runs() {
        let seq = ids(&["onyx-10", "onyx-10", "spacer-7x2", "onyx-10"]);
        let runs: Vec<_> = collapse_runs(&seq)
            .into_iter()
            .map(|(id, n)| (id.as_str(), n))
            .collect();
        assert_eq!(runs, vec![("onyx-10", 2), ("spacer-7x2", 1), ("onyx-10", 1)]);
        assert!(collapse_runs(&[]).is_empty());
    }

    #[test]
    fn test_design_report_text() {
        let catalog = Catalog::standard();
        let seq: BeadSequence = ids(&["onyx-10"; 18]).into();
        let report = DesignReport::build(Style::Classic, seq, catalog).unwrap();
        assert_eq!(report.price, 29);

        let mut buf = Vec::new();
        report.write_text(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Classic, 18 beads\n"));
        assert!(text.contains("Circumference: 180.0mm (7.09\")"));
        assert!(text.contains("  onyx-10 x18\n"));
    }

    #[test]
    fn test_layout_report_is_seeded() {
        let catalog = Catalog::standard();
        let seq = ids(&["quartz-10", "spacer-7x2", "lava-cube-10", "quartz-10"]);
        let a = LayoutReport::build(&seq, catalog, 5).unwrap();
        let b = LayoutReport::build(&seq, catalog, 5).unwrap();
        assert_eq!(a.slots.len(), 4);
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
        // lava cubes carry no display color
        assert!(a.slots[2].color.is_none());
        assert!(a.slots[0].color.is_some());
        // floor applies to a short strand
        assert_eq!(a.circumference, Millimetres::from(120.0));
    }

    #[test]
    fn test_catalog_and_sizes_reports() {
        let catalog = CatalogReport::build(Catalog::standard());
        assert_eq!(catalog.beads.len(), Catalog::standard().len());
        let brass = catalog
            .beads
            .iter()
            .find(|r| r.id.as_str() == "cube-brass-logo-10")
            .unwrap();
        assert_eq!(brass.kind, "metal cube");
        assert_eq!(brass.color.as_deref(), Some("#393228"));

        let sizes = SizesReport::build();
        assert_eq!(sizes.sizes.len(), 9);
        assert_eq!(sizes.sizes[0].label, "6.5\"");
    }

    #[test]
    fn test_millimetres_display() {
        assert_eq!(Millimetres::from(177.8).to_string(), "177.8mm");
        assert_eq!(Millimetres::from(120.0).to_string(), "120.0mm");
    }
}
