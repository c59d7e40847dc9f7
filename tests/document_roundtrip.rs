use {
    cycle_charter::{
        Artifact, ChartDocument, PriceScaleMode,
        app::demo_document,
        artifacts::ArtifactKind,
        config::{PERSISTENCE, PriceLike, document_filename},
        coords::Viewport,
        domain::ScenePos,
    },
    std::{fs, path::PathBuf},
    uuid::Uuid,
};

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("cycle-charter-test-{}", Uuid::new_v4()))
}

#[test]
fn test_save_load_preserves_document() {
    let dir = scratch_dir();
    let path = dir.join("nested").join(document_filename("roundtrip"));

    let doc = demo_document("roundtrip", PriceScaleMode::Logarithmic).unwrap();
    doc.save(&path).unwrap();
    let loaded = ChartDocument::load(&path).unwrap();
    assert_eq!(loaded, doc);

    // Derived geometry is identical once reloaded
    let conv = loaded.converter().unwrap();
    for (a, b) in doc.artifacts.iter().zip(&loaded.artifacts) {
        if let (Artifact::ModalScale(a), Artifact::ModalScale(b)) = (a, b) {
            assert_eq!(a.ratio_labels(&conv).unwrap(), b.ratio_labels(&conv).unwrap());
        }
    }

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_load_rejects_other_versions() {
    let dir = scratch_dir();
    let path = dir.join(document_filename("old"));

    let mut doc = ChartDocument::new("old");
    doc.version = PERSISTENCE.document.version + 1;
    doc.save(&path).unwrap();
    let err = ChartDocument::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("version"));

    assert!(ChartDocument::load(&dir.join("missing.chart.json")).is_err());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_offset_changes_display_not_geometry() {
    let mut doc = demo_document("tz", PriceScaleMode::Linear).unwrap();
    let id = doc.artifacts_of_kind(ArtifactKind::Text).next().unwrap().id();
    let before = doc.artifact(id).unwrap().anchors();
    let utc_time = match doc.artifact(id).unwrap() {
        Artifact::Text(t) => t.timestamp(&doc.converter().unwrap()).unwrap(),
        _ => unreachable!(),
    };

    doc.utc_offset_secs = 9 * 3600;
    let conv = doc.converter().unwrap();
    let Artifact::Text(text) = doc.artifact(id).unwrap() else {
        unreachable!()
    };
    let local_time = text.timestamp(&conv).unwrap();

    assert_eq!(doc.artifact(id).unwrap().anchors(), before);
    assert_eq!(local_time, utc_time);
    assert_eq!(local_time.offset().local_minus_utc(), 9 * 3600);
}

#[test]
fn test_viewport_fits_document_data() {
    let doc = demo_document("fit", PriceScaleMode::Linear).unwrap();
    let conv = doc.converter().unwrap();
    let rect = doc.data_scene_rect(&conv).unwrap().unwrap();

    let mut viewport = Viewport::from_scaling(conv.scaling(), 800.0, 600.0);
    viewport.fit_to(rect);
    let visible = viewport.visible_rect();
    assert!(visible.left <= rect.left && visible.right >= rect.right);
    assert!(visible.top <= rect.top && visible.bottom >= rect.bottom);

    // Every bar high is on screen
    for bar in &doc.price_bars {
        let pos = conv.bar_point_to_scene_pos(bar.timestamp_ms, bar.high_price).unwrap();
        assert!(viewport.is_in_view(viewport.scene_to_view(pos)));
    }

    let (_, price) = conv.scene_pos_to_domain(ScenePos::new(rect.left, rect.top)).unwrap();
    assert_eq!(price.value(), doc.price_extent().unwrap().1.value());
}
