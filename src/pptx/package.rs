//! OPC package assembly: serialize a [`Deck`](super::Deck) into an
//! in-memory zip archive.
//!
//! The whole archive is built in a `Cursor<Vec<u8>>` before anything
//! touches the filesystem, which is what makes the caller's
//! write-then-rename persist atomic.

use crate::error::Reddit2PptxError;
use crate::pptx::slide::{escape_xml, picture_slide_xml, relationships_xml, title_slide_xml};
use crate::pptx::template::{
    layout_xml, SlideLayoutKind, APP_PROPS_XML, SLIDE_MASTER_XML, THEME_XML, XML_DECL,
};
use crate::pptx::Deck;
use std::fmt::Write as _;
use std::io::{Cursor, Write as _};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_APP_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// Serialize the deck into .pptx bytes.
///
/// # Errors
/// [`Reddit2PptxError::DeckBuildFailed`] if zip serialization fails.
pub(crate) fn deck_to_bytes(deck: &Deck) -> Result<Vec<u8>, Reddit2PptxError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut add = |name: &str, contents: &[u8]| -> Result<(), Reddit2PptxError> {
        zip.start_file(name, options).map_err(build_error)?;
        zip.write_all(contents)
            .map_err(|e| build_error(zip::result::ZipError::Io(e)))?;
        Ok(())
    };

    add("[Content_Types].xml", content_types_xml(deck).as_bytes())?;
    add(
        "_rels/.rels",
        relationships_xml(&[
            ("rId1", REL_OFFICE_DOCUMENT, "ppt/presentation.xml"),
            ("rId2", REL_CORE_PROPS, "docProps/core.xml"),
            ("rId3", REL_APP_PROPS, "docProps/app.xml"),
        ])
        .as_bytes(),
    )?;
    add("docProps/core.xml", core_props_xml(&deck.title).as_bytes())?;
    add("docProps/app.xml", APP_PROPS_XML.as_bytes())?;

    add("ppt/presentation.xml", presentation_xml(deck).as_bytes())?;
    add(
        "ppt/_rels/presentation.xml.rels",
        presentation_rels_xml(deck).as_bytes(),
    )?;

    add("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER_XML.as_bytes())?;
    add(
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        relationships_xml(&[
            ("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
            ("rId2", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout2.xml"),
            ("rId3", REL_THEME, "../theme/theme1.xml"),
        ])
        .as_bytes(),
    )?;

    let master_rels =
        relationships_xml(&[("rId1", REL_SLIDE_MASTER, "../slideMasters/slideMaster1.xml")]);
    for kind in [SlideLayoutKind::Title, SlideLayoutKind::TitleOnly] {
        add(kind.part_name(), layout_xml(kind)?.as_bytes())?;
        let rels_name = rels_part_name(kind.part_name());
        add(&rels_name, master_rels.as_bytes())?;
    }

    add("ppt/theme/theme1.xml", THEME_XML.as_bytes())?;

    // Slide 1: the title slide.
    add(
        "ppt/slides/slide1.xml",
        title_slide_xml(&deck.title, &deck.description).as_bytes(),
    )?;
    add(
        "ppt/slides/_rels/slide1.xml.rels",
        relationships_xml(&[("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml")])
            .as_bytes(),
    )?;

    // Slides 2..: one per picture, each with its own media part.
    for (i, picture) in deck.pictures.iter().enumerate() {
        let slide_number = i + 2;
        let media_name = format!("image{}.{}", i + 1, picture.format.extension());
        let (cx, cy) = (picture.cx, picture.cy);

        add(
            &format!("ppt/slides/slide{slide_number}.xml"),
            picture_slide_xml(&picture.title, "rId2", picture.left, picture.top, cx, cy)
                .as_bytes(),
        )?;
        add(
            &format!("ppt/slides/_rels/slide{slide_number}.xml.rels"),
            relationships_xml(&[
                ("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout2.xml"),
                ("rId2", REL_IMAGE, &format!("../media/{media_name}")),
            ])
            .as_bytes(),
        )?;
        add(&format!("ppt/media/{media_name}"), &picture.image)?;
    }

    let cursor = zip.finish().map_err(build_error)?;
    let bytes = cursor.into_inner();
    debug!(
        "Packaged deck: {} slides, {} bytes",
        deck.slide_count(),
        bytes.len()
    );
    Ok(bytes)
}

fn build_error(e: zip::result::ZipError) -> Reddit2PptxError {
    Reddit2PptxError::DeckBuildFailed {
        detail: e.to_string(),
    }
}

/// `ppt/slideLayouts/slideLayout1.xml` → `ppt/slideLayouts/_rels/slideLayout1.xml.rels`
fn rels_part_name(part_name: &str) -> String {
    match part_name.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{part_name}.rels"),
    }
}

fn content_types_xml(deck: &Deck) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
    xml.push_str(r#"<Default Extension="png" ContentType="image/png"/>"#);
    xml.push_str(r#"<Default Extension="jpg" ContentType="image/jpeg"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideLayouts/slideLayout2.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#);
    for n in 1..=deck.slide_count() {
        let _ = write!(
            xml,
            r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
        );
    }
    xml.push_str(r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#);
    xml.push_str(r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#);
    xml.push_str("</Types>");
    xml
}

fn core_props_xml(title: &str) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    let _ = write!(
        xml,
        concat!(
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/">"#,
            r#"<dc:title>{title}</dc:title>"#,
            r#"</cp:coreProperties>"#,
        ),
        title = escape_xml(title),
    );
    xml
}

/// `presentation.xml`: master reference, the slide id list in deck order,
/// and the 10″ × 7.5″ slide size.
fn presentation_xml(deck: &Deck) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#);
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
    xml.push_str("<p:sldIdLst>");
    for i in 0..deck.slide_count() {
        let _ = write!(
            xml,
            r#"<p:sldId id="{id}" r:id="rId{rid}"/>"#,
            id = 256 + i,
            rid = 2 + i,
        );
    }
    xml.push_str("</p:sldIdLst>");
    xml.push_str(r#"<p:sldSz cx="9144000" cy="6858000"/>"#);
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    xml
}

fn presentation_rels_xml(deck: &Deck) -> String {
    let mut rels: Vec<(String, &str, String)> = vec![(
        "rId1".to_string(),
        REL_SLIDE_MASTER,
        "slideMasters/slideMaster1.xml".to_string(),
    )];
    for i in 0..deck.slide_count() {
        rels.push((
            format!("rId{}", 2 + i),
            REL_SLIDE,
            format!("slides/slide{}.xml", i + 1),
        ));
    }
    rels.push((
        format!("rId{}", 2 + deck.slide_count()),
        REL_THEME,
        "theme/theme1.xml".to_string(),
    ));

    let borrowed: Vec<(&str, &str, &str)> = rels
        .iter()
        .map(|(id, ty, target)| (id.as_str(), *ty, target.as_str()))
        .collect();
    relationships_xml(&borrowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::layout::PictureFormat;
    use bytes::Bytes;
    use std::io::Read;

    fn deck_with_pictures(n: usize) -> Deck {
        let mut deck = Deck::new("Test Deck", "three newest posts");
        for i in 0..n {
            deck.push_picture(
                format!("Post {i}"),
                Bytes::from_static(&[0x89, 0x50, 0x4E, 0x47]),
                PictureFormat::Png,
                crate::pptx::units::Emu(0),
                crate::pptx::units::Emu(1_371_600),
                crate::pptx::units::Emu(9_144_000),
                crate::pptx::units::Emu(4_572_000),
            );
        }
        deck
    }

    fn archive_names(bytes: &[u8]) -> Vec<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    fn part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut contents = String::new();
        file.read_to_string(&mut contents).unwrap();
        contents
    }

    #[test]
    fn package_contains_all_required_parts() {
        let bytes = deck_to_bytes(&deck_with_pictures(2)).unwrap();
        let names = archive_names(&bytes);
        for required in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/slideLayouts/slideLayout2.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/slide3.xml",
            "ppt/media/image1.png",
            "ppt/media/image2.png",
        ] {
            assert!(names.iter().any(|n| n == required), "missing {required}");
        }
    }

    #[test]
    fn presentation_lists_slides_in_deck_order() {
        let bytes = deck_to_bytes(&deck_with_pictures(2)).unwrap();
        let presentation = part(&bytes, "ppt/presentation.xml");
        assert!(presentation.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
        assert!(presentation.contains(r#"<p:sldId id="257" r:id="rId3"/>"#));
        assert!(presentation.contains(r#"<p:sldId id="258" r:id="rId4"/>"#));
        assert!(presentation.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));
    }

    #[test]
    fn content_types_cover_every_slide() {
        let bytes = deck_to_bytes(&deck_with_pictures(3)).unwrap();
        let types = part(&bytes, "[Content_Types].xml");
        for n in 1..=4 {
            assert!(types.contains(&format!(r#"/ppt/slides/slide{n}.xml"#)));
        }
        assert!(types.contains(r#"Extension="png""#));
        assert!(types.contains(r#"Extension="jpg""#));
    }

    #[test]
    fn picture_slide_links_layout_and_media() {
        let bytes = deck_to_bytes(&deck_with_pictures(1)).unwrap();
        let rels = part(&bytes, "ppt/slides/_rels/slide2.xml.rels");
        assert!(rels.contains("../slideLayouts/slideLayout2.xml"));
        assert!(rels.contains("../media/image1.png"));
    }

    #[test]
    fn title_only_deck_packages() {
        let bytes = deck_to_bytes(&deck_with_pictures(0)).unwrap();
        let names = archive_names(&bytes);
        assert!(names.iter().any(|n| n == "ppt/slides/slide1.xml"));
        assert!(!names.iter().any(|n| n.starts_with("ppt/media/")));
    }

    #[test]
    fn core_props_escape_the_title() {
        let deck = Deck::new("Cats & Dogs", "");
        let bytes = deck_to_bytes(&deck).unwrap();
        let core = part(&bytes, "docProps/core.xml");
        assert!(core.contains("<dc:title>Cats &amp; Dogs</dc:title>"));
    }
}
