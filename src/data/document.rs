use {
    crate::{
        artifacts::{Artifact, ArtifactId, ArtifactKind},
        config::{PERSISTENCE, Price},
        coords::{ChartScaling, CoordinateConverter},
        domain::{PriceBar, ScenePos, SceneRect},
    },
    anyhow::{Context, Result, bail},
    chrono::FixedOffset,
    serde::{Deserialize, Serialize},
    std::{
        fs::{self, File},
        io::{BufReader, BufWriter, Write},
        path::Path,
    },
};

/// Everything that makes up one chart: price data, scaling, timezone and artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDocument {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Offset the chart displays timestamps in, seconds east of UTC.
    #[serde(default)]
    pub utc_offset_secs: i32,
    #[serde(default)]
    pub scaling: ChartScaling,
    #[serde(default)]
    pub price_bars: Vec<PriceBar>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl Default for ChartDocument {
    fn default() -> Self {
        Self::new(PERSISTENCE.document.default_name)
    }
}

impl ChartDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: PERSISTENCE.document.version,
            name: name.into(),
            description: String::new(),
            utc_offset_secs: 0,
            scaling: ChartScaling::default(),
            price_bars: Vec::new(),
            artifacts: Vec::new(),
        }
    }

    pub fn utc_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_secs)
            .with_context(|| format!("Invalid UTC offset: {} seconds", self.utc_offset_secs))
    }

    pub fn converter(&self) -> Result<CoordinateConverter> {
        CoordinateConverter::new(self.scaling.clone(), self.utc_offset()?)
            .with_context(|| format!("Chart '{}' has an unusable scaling", self.name))
    }

    // --- Artifacts ---

    pub fn add_artifact(&mut self, artifact: impl Into<Artifact>) -> ArtifactId {
        let artifact = artifact.into();
        let id = artifact.id();
        log::debug!("Adding {} artifact {} to '{}'", artifact.kind(), id, self.name);
        self.artifacts.push(artifact);
        id
    }

    pub fn remove_artifact(&mut self, id: ArtifactId) -> Option<Artifact> {
        let idx = self.artifacts.iter().position(|a| a.id() == id)?;
        let removed = self.artifacts.remove(idx);
        log::debug!("Removed {} artifact {} from '{}'", removed.kind(), id, self.name);
        Some(removed)
    }

    pub fn artifact(&self, id: ArtifactId) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.id() == id)
    }

    pub fn artifact_mut(&mut self, id: ArtifactId) -> Option<&mut Artifact> {
        self.artifacts.iter_mut().find(|a| a.id() == id)
    }

    pub fn artifacts_of_kind(&self, kind: ArtifactKind) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter().filter(move |a| a.kind() == kind)
    }

    pub fn translate_artifact(&mut self, id: ArtifactId, dx: f64, dy: f64) -> Result<()> {
        match self.artifact_mut(id) {
            Some(artifact) => {
                artifact.translate(dx, dy);
                Ok(())
            }
            None => bail!("No artifact {} in chart '{}'", id, self.name),
        }
    }

    // --- Price data ---

    /// Keeps bars sorted by open time. Bars with a high below their low are dropped.
    pub fn set_price_bars(&mut self, mut bars: Vec<PriceBar>) {
        let before = bars.len();
        bars.retain(|b| b.high_price >= b.low_price);
        if bars.len() < before {
            log::warn!("Dropped {} bar(s) with high below low", before - bars.len());
        }
        bars.sort_by_key(|b| b.timestamp_ms);
        self.price_bars = bars;
    }

    /// Scene rect spanning every bar's open time and high/low, `None` without bars.
    pub fn data_scene_rect(&self, conv: &CoordinateConverter) -> Result<Option<SceneRect>> {
        let mut points = Vec::with_capacity(self.price_bars.len() * 2);
        for bar in &self.price_bars {
            let x = conv.timestamp_ms_to_scene_x(bar.timestamp_ms);
            points.push(ScenePos::new(x, conv.price_to_scene_y(bar.high_price)?));
            points.push(ScenePos::new(x, conv.price_to_scene_y(bar.low_price)?));
        }
        Ok(SceneRect::bounding(points))
    }

    /// Highest high and lowest low of the price data.
    pub fn price_extent(&self) -> Option<(Price, Price)> {
        let lo = self.price_bars.iter().map(|b| b.low_price).reduce(|a, b| if b < a { b } else { a })?;
        let hi = self.price_bars.iter().map(|b| b.high_price).reduce(|a, b| if b > a { b } else { a })?;
        Some((lo, hi))
    }

    // --- Persistence ---

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = create_file_with_parents(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .with_context(|| format!("Failed to serialize chart to: {}", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to write chart to: {}", path.display()))?;

        log::info!(
            "Saved chart '{}' ({} bars, {} artifacts) to {}",
            self.name,
            self.price_bars.len(),
            self.artifacts.len(),
            path.display()
        );
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open chart: {}", path.display()))?;
        let reader = BufReader::new(file);
        let doc: ChartDocument = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse chart: {}", path.display()))?;

        if doc.version != PERSISTENCE.document.version {
            bail!(
                "Chart version mismatch: file v{} vs required v{}",
                doc.version,
                PERSISTENCE.document.version
            );
        }
        doc.converter()?;

        log::info!(
            "Loaded chart '{}' ({} bars, {} artifacts) from {}",
            doc.name,
            doc.price_bars.len(),
            doc.artifacts.len(),
            path.display()
        );
        Ok(doc)
    }
}

// Create a new file and any missing parent directories.
fn create_file_with_parents(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    File::create(path).with_context(|| format!("Failed to create file: {}", path.display()))
}
