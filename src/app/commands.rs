use {
    super::demo::demo_document,
    crate::{
        PresetArg,
        artifacts::{ModalScaleArtifact, ModalScaleAxis},
        config::{CHART, Price, PriceLike, PriceScaleMode, document_filename},
        coords::{CoordinateConverter, Viewport},
        data::ChartDocument,
        domain::{ScalePreset, ScenePos},
        report,
        utils::format_datetime,
    },
    anyhow::{Context, Result},
    chrono::DateTime,
    std::path::{Path, PathBuf},
};

pub(crate) fn convert(conv: &CoordinateConverter, x: f64, y: f64) -> Result<()> {
    let (when, price) = conv.scene_pos_to_domain(ScenePos::new(x, y))?;
    println!("time:  {}", format_datetime(&when));
    println!("price: {}", price.value());
    Ok(())
}

pub(crate) fn to_scene(conv: &CoordinateConverter, datetime: &str, price: f64) -> Result<()> {
    let dt = DateTime::parse_from_rfc3339(datetime)
        .with_context(|| format!("Not an RFC 3339 timestamp: {datetime}"))?;
    let pos = conv.domain_to_scene_pos(&dt, Price::new(price))?;
    println!("x: {}", pos.x);
    println!("y: {}", pos.y);
    Ok(())
}

pub(crate) struct ModalScaleArgs {
    pub start: ScenePos,
    pub end: ScenePos,
    pub preset: PresetArg,
    pub axis: ModalScaleAxis,
    pub rotate: i32,
    pub reverse: bool,
}

pub(crate) fn modal_scale(conv: &CoordinateConverter, args: ModalScaleArgs) -> Result<()> {
    let preset: ScalePreset = args.preset.into();
    let mut scale = ModalScaleArtifact::from_preset(args.start, args.end, preset).with_axis(args.axis);
    if args.reverse {
        scale.reverse();
    }
    scale.rotate(args.rotate);

    let root = scale.root().map(|r| r.to_string()).unwrap_or_default();
    println!("{preset} on {} axis, root {root}", scale.axis);
    println!("{}", report::ratio_table(&scale.ratio_labels(conv)?));
    Ok(())
}

pub(crate) fn inspect(conv_override: Option<&CoordinateConverter>, path: &Path) -> Result<()> {
    let doc = ChartDocument::load(path)?;
    let conv = match conv_override {
        Some(c) => c.clone(),
        None => doc.converter()?,
    };

    println!("{} ({})", doc.name, conv.scaling());
    if !doc.description.is_empty() {
        println!("{}", doc.description);
    }
    println!("{} bars, {} artifacts", doc.price_bars.len(), doc.artifacts.len());

    if let Some(rect) = doc.data_scene_rect(&conv)? {
        let (w, h) = CHART.default_view_size;
        let mut viewport = Viewport::from_scaling(conv.scaling(), w, h);
        viewport.fit_to(rect);
        let visible = viewport.visible_rect();
        let (from, _) = conv.scene_pos_to_domain(ScenePos::new(visible.left, visible.top))?;
        let (to, _) = conv.scene_pos_to_domain(ScenePos::new(visible.right, visible.bottom))?;
        println!(
            "fitted view {}x{}: {} .. {} (zoom {:.4})",
            w,
            h,
            format_datetime(&from),
            format_datetime(&to),
            viewport.zoom
        );
    }

    println!("{}", report::artifact_table(&doc));
    for artifact in &doc.artifacts {
        match report::artifact_details(artifact, &doc, &conv) {
            Ok(text) => println!("\n{text}"),
            Err(e) => log::warn!("Skipping details for {}: {:#}", artifact.id(), e),
        }
    }
    Ok(())
}

pub(crate) fn demo(path: &Path, log_scale: bool, utc_offset_secs: i32) -> Result<()> {
    let path = if path.is_dir() {
        path.join(document_filename("demo"))
    } else {
        PathBuf::from(path)
    };

    let mode = if log_scale {
        PriceScaleMode::Logarithmic
    } else {
        PriceScaleMode::Linear
    };
    let mut doc = demo_document("demo", mode)?;
    doc.utc_offset_secs = utc_offset_secs;
    doc.save(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
