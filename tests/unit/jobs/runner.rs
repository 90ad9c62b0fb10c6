use super::*;
use crate::{
    foundation::core::Rgba8,
    jobs::png::{decode_image, write_png},
    raster::surface::Surface,
    recipes::banner::Theme,
};

fn temp_root(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ogbanner-runner-{tag}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn small_banner(file: &str, theme: Theme) -> Job {
    Job::Banner {
        file: file.to_string(),
        width: 120,
        height: 63,
        theme,
        copy: None,
    }
}

#[test]
fn runs_jobs_in_manifest_order() {
    let root = temp_root("order");
    let manifest = Manifest {
        out_dir: PathBuf::from("out"),
        font: None,
        seed: 3,
        threads: Some(2),
        jobs: vec![
            small_banner("b.png", Theme::Light),
            small_banner("nested/a.png", Theme::Dark),
            Job::Earth {
                file: "earth.png".to_string(),
                width: Some(300),
                height: Some(240),
                copy: None,
            },
        ],
    };

    let written = run_manifest(&manifest, &root).unwrap();
    let names: Vec<PathBuf> = written.iter().map(|w| w.path.clone()).collect();
    assert_eq!(
        names,
        [
            root.join("out/b.png"),
            root.join("out/nested/a.png"),
            root.join("out/earth.png"),
        ]
    );
    for w in &written {
        assert_eq!(std::fs::metadata(&w.path).unwrap().len(), w.bytes);
    }
    assert_eq!((written[2].width, written[2].height), (300, 240));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn translucent_job_writes_every_variant() {
    let root = temp_root("translucent");
    let src = Surface::filled(64, 40, Rgba8::new(30, 180, 120, 255)).unwrap();
    write_png(&root.join("art/dragon.png"), &src).unwrap();

    let manifest = Manifest {
        out_dir: PathBuf::from("public"),
        font: None,
        seed: 0,
        threads: None,
        jobs: vec![Job::Translucent {
            source: PathBuf::from("art/dragon.png"),
            stem: None,
        }],
    };
    let written = run_manifest(&manifest, &root).unwrap();
    assert_eq!(written.len(), 5);
    assert_eq!(
        written[3].path,
        root.join("public/dragon-translucent-fade.png")
    );
    assert_eq!((written[4].width, written[4].height), (1200, 630));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn translucent_only_run_skips_fonts_and_keeps_straight_color() {
    let root = temp_root("translucent-stem");
    let src = image::RgbaImage::from_pixel(20, 10, image::Rgba([200, 100, 50, 10]));
    write_rgba_png(&root.join("faint.png"), &src).unwrap();

    let manifest = Manifest {
        out_dir: PathBuf::from("out"),
        font: Some(PathBuf::from("fonts/not-there.ttf")),
        seed: 0,
        threads: Some(1),
        jobs: vec![Job::Translucent {
            source: PathBuf::from("faint.png"),
            stem: Some("og".to_string()),
        }],
    };
    let written = run_manifest(&manifest, &root).unwrap();
    assert_eq!(written[0].path, root.join("out/og-translucent-70.png"));

    let bytes = std::fs::read(&written[0].path).unwrap();
    let img = decode_image(&bytes).unwrap();
    assert_eq!(img.get_pixel(3, 3).0, [200, 100, 50, 7]);
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn missing_source_fails_the_run() {
    let root = temp_root("missing");
    let manifest = Manifest {
        out_dir: PathBuf::from("public"),
        font: None,
        seed: 0,
        threads: None,
        jobs: vec![Job::Translucent {
            source: PathBuf::from("nope.png"),
            stem: None,
        }],
    };
    assert!(matches!(
        run_manifest(&manifest, &root),
        Err(BannerError::Other(_))
    ));
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn invalid_manifest_is_rejected_before_rendering() {
    let root = temp_root("invalid");
    let manifest = Manifest {
        threads: Some(0),
        ..Manifest::site_default()
    };
    assert!(matches!(
        run_manifest(&manifest, &root),
        Err(BannerError::Validation(_))
    ));
    assert!(!root.join("public").exists());
    let _ = std::fs::remove_dir_all(&root);
}

#[test]
fn written_file_display_matches_cli_line() {
    let w = WrittenFile {
        path: PathBuf::from("public/og.png"),
        width: 1200,
        height: 630,
        bytes: 42,
    };
    assert_eq!(w.to_string(), "public/og.png (1200x630, 42 bytes)");
}
