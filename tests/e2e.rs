//! End-to-end integration tests for reddit2pptx.
//!
//! The offline tests exercise the full compose path — probe, placement,
//! package, persist — against synthetic images and need no network. The
//! live tests hit the real Reddit API and are gated behind the
//! `E2E_ENABLED` environment variable plus the usual credential variables,
//! so they do not run in CI unless explicitly requested.
//!
//! Run the live tests with:
//!   E2E_ENABLED=1 client_id=... client_secret=... user_agent=... \
//!     cargo test --test e2e -- --nocapture

use bytes::Bytes;
use reddit2pptx::pipeline::layout::{compute_placement, probe, PICTURE_LEFT, PICTURE_TOP};
use reddit2pptx::pptx::Deck;
use reddit2pptx::{generate, GenerationConfig, RedditCredentials, Reddit2PptxError};
use std::io::{Cursor, Read};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Skip this test unless E2E_ENABLED and the credential variables are set.
macro_rules! e2e_skip_unless_ready {
    () => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
        match RedditCredentials::from_env() {
            Ok(c) => c,
            Err(_) => {
                println!("SKIP — set client_id, client_secret, user_agent to run e2e tests");
                return;
            }
        }
    }};
}

fn encoded_png(w: u32, h: u32) -> Bytes {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([200, 60, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("encode test PNG");
    Bytes::from(buf)
}

fn encoded_jpeg(w: u32, h: u32) -> Bytes {
    let img = image::RgbImage::from_pixel(w, h, image::Rgb([30, 60, 200]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .expect("encode test JPEG");
    Bytes::from(buf)
}

/// Compose a deck from (title, image) pairs the way the generator does:
/// probe each image, compute its placement, resolve the extents.
fn compose(title: &str, description: &str, items: &[(&str, Bytes)]) -> Deck {
    let mut deck = Deck::new(title, description);
    for (slide_title, image) in items {
        let probed = probe(image).expect("probe test image");
        let placement = compute_placement(probed.width, probed.height);
        let (cx, cy) = placement.resolve(probed.width, probed.height);
        deck.push_picture(
            *slide_title,
            image.clone(),
            probed.format,
            PICTURE_LEFT,
            PICTURE_TOP,
            cx,
            cy,
        );
    }
    deck
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("open package");
    let mut file = archive.by_name(name).unwrap_or_else(|_| panic!("missing part {name}"));
    let mut contents = String::new();
    file.read_to_string(&mut contents).expect("read part");
    contents
}

fn has_part(bytes: &[u8], name: &str) -> bool {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("open package");
    let found = archive.by_name(name).is_ok();
    found
}

// ── Offline compose tests ────────────────────────────────────────────────────

#[test]
fn composed_deck_is_a_valid_package_with_ordered_slides() {
    let deck = compose(
        "Oldest to newest",
        "three synthetic posts",
        &[
            ("oldest post", encoded_png(400, 300)),
            ("middle post", encoded_jpeg(300, 400)),
            ("newest post", encoded_png(640, 480)),
        ],
    );
    assert_eq!(deck.slide_count(), 4);

    let bytes = deck.to_bytes().expect("serialize deck");
    assert_eq!(&bytes[..2], b"PK");

    // Title slide first, then pictures in insertion order.
    let slide1 = read_part(&bytes, "ppt/slides/slide1.xml");
    assert!(slide1.contains("<a:t>Oldest to newest</a:t>"));
    assert!(slide1.contains("<a:t>three synthetic posts</a:t>"));
    assert!(read_part(&bytes, "ppt/slides/slide2.xml").contains("<a:t>oldest post</a:t>"));
    assert!(read_part(&bytes, "ppt/slides/slide3.xml").contains("<a:t>middle post</a:t>"));
    assert!(read_part(&bytes, "ppt/slides/slide4.xml").contains("<a:t>newest post</a:t>"));

    // Media carries the right extensions; JPEG posts stay JPEG.
    let slide3_rels = read_part(&bytes, "ppt/slides/_rels/slide3.xml.rels");
    assert!(slide3_rels.contains("../media/image2.jpg"));
    assert!(has_part(&bytes, "ppt/media/image1.png"));
    assert!(has_part(&bytes, "ppt/media/image2.jpg"));
    assert!(has_part(&bytes, "ppt/media/image3.png"));
}

#[test]
fn picture_geometry_lands_in_the_slide_xml() {
    // 640×480 is taller than the 10:6 box ratio, so height pins at 6″ and
    // width follows the 4:3 aspect: 6″ × 4/3 = 8″ = 7_315_200 EMU.
    let deck = compose("Geometry", "", &[("p", encoded_png(640, 480))]);
    let bytes = deck.to_bytes().expect("serialize deck");
    let slide2 = read_part(&bytes, "ppt/slides/slide2.xml");
    assert!(slide2.contains(r#"<a:off x="0" y="1371600"/>"#));
    assert!(slide2.contains(r#"<a:ext cx="7315200" cy="5486400"/>"#));
    assert!(slide2.contains(r#"sz="2000""#));
}

#[test]
fn saved_deck_replaces_existing_file_atomically() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("deck.pptx");
    std::fs::write(&path, b"stale contents").expect("seed stale file");

    let deck = compose("Overwrite", "", &[("p", encoded_png(100, 100))]);
    deck.save(&path).expect("save deck");

    let bytes = std::fs::read(&path).expect("read deck");
    assert_eq!(&bytes[..2], b"PK");
    // No temp file left behind.
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .expect("list dir")
        .map(|e| e.expect("entry").file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("deck.pptx")]);
}

#[test]
fn failed_save_leaves_no_output_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("no-such-dir");
    let path = missing.join("deck.pptx");

    let deck = compose("Doomed", "", &[("p", encoded_png(100, 100))]);
    let err = deck.save(&path).expect_err("save into missing dir");
    assert!(matches!(err, Reddit2PptxError::DeckWriteFailed { .. }));
    assert!(!missing.exists());
}

#[test]
fn non_image_bytes_abort_composition() {
    let err = probe(b"<html>served an error page</html>").expect_err("probe html");
    assert!(matches!(err, Reddit2PptxError::UnsupportedImage { .. }));
}

// ── Live Reddit tests (gated) ────────────────────────────────────────────────

#[tokio::test]
async fn live_generate_writes_a_deck() {
    let credentials = e2e_skip_unless_ready!();

    let dir = tempfile::tempdir().expect("tempdir");
    let config = GenerationConfig::builder()
        .credentials(credentials)
        .title("e2e-earthporn")
        .output_dir(dir.path())
        .build()
        .expect("build config");

    let output = generate("earthporn", 5, &config)
        .await
        .expect("live generation");

    assert!(output.path.exists());
    assert_eq!(output.path, dir.path().join("e2e-earthporn.pptx"));
    assert!(output.stats.slide_count >= 1);
    assert_eq!(
        output.stats.slide_count,
        output.stats.images_downloaded + 1
    );
    println!(
        "✓ {} slides, {} bytes downloaded",
        output.stats.slide_count, output.stats.bytes_downloaded
    );
}

#[tokio::test]
async fn live_unknown_subreddit_maps_to_not_found() {
    let credentials = e2e_skip_unless_ready!();

    let dir = tempfile::tempdir().expect("tempdir");
    let config = GenerationConfig::builder()
        .credentials(credentials)
        .output_dir(dir.path())
        .build()
        .expect("build config");

    let err = generate("this_subreddit_definitely_does_not_exist_xyz", 5, &config)
        .await
        .expect_err("listing a missing subreddit");
    assert!(matches!(err, Reddit2PptxError::SubredditNotFound { .. }));
    // All-or-nothing: the failed run wrote nothing.
    assert_eq!(std::fs::read_dir(dir.path()).expect("list dir").count(), 0);
}

#[tokio::test]
async fn live_bad_credentials_fail_authentication() {
    let _ = e2e_skip_unless_ready!();

    let config = GenerationConfig::builder()
        .credentials(RedditCredentials::new("bogus", "bogus", "reddit2pptx-e2e/0.1"))
        .build()
        .expect("build config");

    let err = generate("earthporn", 5, &config)
        .await
        .expect_err("bogus credentials");
    assert!(matches!(err, Reddit2PptxError::AuthenticationFailed { .. }));
}
