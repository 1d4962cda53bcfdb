//! Integration tests for extension resolution on the real filesystem.

use std::fs;

use packscan::resolve::{resolve_extensions, ResolveOptions};
use packscan::ImageExt;

#[test]
fn test_scenario_only_png_present() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir_all(&images).unwrap();
    fs::write(images.join("image2.png"), b"\x89PNG\r\n\x1a\n").unwrap();

    let options = ResolveOptions::new().with_images_dir(&images).with_count(3);
    let report = resolve_extensions(&options);

    assert_eq!(
        packscan::to_json(&report.map, packscan::JsonFormat::Compact).unwrap(),
        r#"{"image2":"png"}"#
    );
    let warnings = report.warnings();
    assert_eq!(warnings.len(), 2);
    assert!(warnings[0].contains("image1.jpg") && warnings[0].contains("image1.png"));
    assert!(warnings[1].contains("image3.jpg") && warnings[1].contains("image3.png"));
}

#[test]
fn test_every_entry_names_an_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir_all(&images).unwrap();
    for n in 1..=20u32 {
        match n % 4 {
            0 => {}
            1 => fs::write(images.join(format!("image{}.jpg", n)), b"j").unwrap(),
            2 => fs::write(images.join(format!("image{}.png", n)), b"p").unwrap(),
            _ => {
                fs::write(images.join(format!("image{}.jpg", n)), b"j").unwrap();
                fs::write(images.join(format!("image{}.png", n)), b"p").unwrap();
            }
        }
    }

    let options = ResolveOptions::new().with_images_dir(&images).with_count(20);
    let report = resolve_extensions(&options);

    assert_eq!(report.found() + report.missing.len(), 20);
    for (id, ext) in report.map.iter() {
        assert!(images.join(id.file_name(ext)).is_file(), "{} {}", id, ext);
        if id.number().unwrap() % 4 == 3 {
            assert_eq!(ext, ImageExt::Jpg);
        }
    }
    assert!(report.missing.iter().all(|m| m.id.number().unwrap() % 4 == 0));
}

#[test]
fn test_directory_named_like_image_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir_all(images.join("image1.jpg")).unwrap();
    fs::write(images.join("image1.png"), b"p").unwrap();

    let options = ResolveOptions::new().with_images_dir(&images).with_count(1);
    let report = resolve_extensions(&options);
    assert_eq!(report.map.get("image1"), Some(ImageExt::Png));
}

#[test]
fn test_verify_content_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir_all(&images).unwrap();
    // A PNG saved with a .jpg name
    fs::write(images.join("image1.jpg"), b"\x89PNG\r\n\x1a\nrest").unwrap();

    let plain = resolve_extensions(&ResolveOptions::new().with_images_dir(&images).with_count(1));
    assert_eq!(plain.map.get("image1"), Some(ImageExt::Jpg));

    let verified = resolve_extensions(
        &ResolveOptions::new()
            .with_images_dir(&images)
            .with_count(1)
            .with_verify_content(true),
    );
    assert!(verified.map.is_empty());
    assert_eq!(verified.missing.len(), 1);
}
