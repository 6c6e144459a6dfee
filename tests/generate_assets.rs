use std::path::Path;

use favgen::{Batch, BatchConfig, BatchState, FavgenError};

const FAVICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="128" height="128">
  <rect width="128" height="128" rx="24" fill="#0f1729"/>
  <circle cx="64" cy="64" r="36" fill="#d97757"/>
</svg>"##;

const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="128" height="128">
  <g transform="translate(64,64)">
    <circle r="40" fill="none" stroke="#d97757" stroke-width="6"/>
    <path d="M-20 0 L20 0 M0 -20 L0 20" stroke="#d97757" stroke-width="6"/>
  </g>
</svg>"##;

const LOGO_WITHOUT_GROUP: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="128" height="128">
  <circle cx="64" cy="64" r="40" fill="#d97757"/>
</svg>"##;

const EXPECTED_OUTPUTS: [(&str, u32, u32); 4] = [
    ("favicon-16x16.png", 16, 16),
    ("favicon-32x32.png", 32, 32),
    ("apple-touch-icon.png", 180, 180),
    ("og.png", 1200, 630),
];

fn config(assets: &Path, out: &Path) -> BatchConfig {
    BatchConfig {
        assets_dir: assets.to_path_buf(),
        out_dir: out.to_path_buf(),
        title: "Example".to_string(),
        url: "example.com".to_string(),
    }
}

fn write_templates(dir: &Path, logo: &str) {
    std::fs::write(dir.join("favicon.svg"), FAVICON_SVG).unwrap();
    std::fs::write(dir.join("logo.svg"), logo).unwrap();
}

#[test]
fn full_batch_produces_all_four_assets() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    write_templates(dir.path(), LOGO_SVG);

    let mut batch = Batch::new(config(dir.path(), &out));
    let summary = batch.run().unwrap();

    assert_eq!(batch.state(), BatchState::Completed);
    assert_eq!(summary.written.len(), EXPECTED_OUTPUTS.len());

    for (name, w, h) in EXPECTED_OUTPUTS {
        let path = out.join(name);
        assert!(path.exists(), "missing output {name}");
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (w, h), "{name}");
    }
}

#[test]
fn missing_icon_template_fails_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    std::fs::write(dir.path().join("logo.svg"), LOGO_SVG).unwrap();

    let mut batch = Batch::new(config(dir.path(), &out));
    let err = batch.run().unwrap_err();

    assert!(matches!(err, FavgenError::SourceNotFound(_)));
    assert_eq!(batch.state(), BatchState::Failed);
    assert!(!out.exists(), "no output may be written on failure");
}

#[test]
fn logo_without_group_still_produces_the_preview() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    write_templates(dir.path(), LOGO_WITHOUT_GROUP);

    let mut batch = Batch::new(config(dir.path(), &out));
    batch.run().unwrap();

    let decoded = image::open(out.join("og.png")).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1200, 630));
}

#[test]
fn degraded_preview_differs_from_full_preview() {
    let dir_full = tempfile::tempdir().unwrap();
    let out_full = dir_full.path().join("out");
    write_templates(dir_full.path(), LOGO_SVG);
    Batch::new(config(dir_full.path(), &out_full)).run().unwrap();

    let dir_bare = tempfile::tempdir().unwrap();
    let out_bare = dir_bare.path().join("out");
    write_templates(dir_bare.path(), LOGO_WITHOUT_GROUP);
    Batch::new(config(dir_bare.path(), &out_bare)).run().unwrap();

    let full = std::fs::read(out_full.join("og.png")).unwrap();
    let bare = std::fs::read(out_bare.join("og.png")).unwrap();
    assert_ne!(full, bare, "embedded artwork must affect the preview pixels");
}

#[test]
fn reruns_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    write_templates(dir.path(), LOGO_SVG);

    Batch::new(config(dir.path(), &out)).run().unwrap();
    let first: Vec<Vec<u8>> = EXPECTED_OUTPUTS
        .iter()
        .map(|(name, _, _)| std::fs::read(out.join(name)).unwrap())
        .collect();

    Batch::new(config(dir.path(), &out)).run().unwrap();
    for (i, (name, _, _)) in EXPECTED_OUTPUTS.iter().enumerate() {
        let second = std::fs::read(out.join(name)).unwrap();
        assert_eq!(first[i], second, "{name} changed between identical runs");
    }
}
