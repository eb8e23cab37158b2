//! Dynamic slide and relationship XML.
//!
//! Parts are built as plain strings with `write!`. The slide vocabulary
//! this deck needs is tiny (a title run, a subtitle run, one picture), so
//! a full XML writer would be more machinery than the output.

use crate::pptx::units::{centipoints, Emu};
use std::fmt::Write as _;

/// Escape the five XML-reserved characters for element/attribute content.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

const SLIDE_OPEN: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#,
    r#"<p:cSld><p:spTree>"#,
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr/>"#,
);

const SLIDE_CLOSE: &str =
    r#"</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#;

/// The opening slide: deck title in the centred title placeholder,
/// description in the subtitle. Both placeholders are emitted even when
/// the description is empty, so the slide always matches its layout.
pub(crate) fn title_slide_xml(title: &str, description: &str) -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(SLIDE_OPEN);
    let _ = write!(
        xml,
        concat!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="ctrTitle"/></p:nvPr></p:nvSpPr>"#,
            r#"<p:spPr/>"#,
            r#"<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:t>{title}</a:t></a:r></a:p></p:txBody></p:sp>"#,
            r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Subtitle 2"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="subTitle" idx="1"/></p:nvPr></p:nvSpPr>"#,
            r#"<p:spPr/>"#,
            r#"<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:r><a:t>{description}</a:t></a:r></a:p></p:txBody></p:sp>"#,
        ),
        title = escape_xml(title),
        description = escape_xml(description),
    );
    xml.push_str(SLIDE_CLOSE);
    xml
}

/// A picture slide: post title as the headline (20 pt, down from the
/// master's 44 pt so long Reddit titles fit on one line band) and the
/// image at its computed placement.
///
/// `image_rel_id` must match the media relationship in the slide's rels
/// part.
pub(crate) fn picture_slide_xml(
    title: &str,
    image_rel_id: &str,
    left: Emu,
    top: Emu,
    cx: Emu,
    cy: Emu,
) -> String {
    let title_size = centipoints(20);
    let mut xml = String::with_capacity(1536);
    xml.push_str(SLIDE_OPEN);
    let _ = write!(
        xml,
        concat!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>"#,
            r#"<p:spPr/>"#,
            r#"<p:txBody><a:bodyPr/><a:lstStyle/>"#,
            r#"<a:p><a:pPr><a:defRPr sz="{sz}"/></a:pPr><a:r><a:rPr lang="en-US" sz="{sz}" dirty="0"/><a:t>{title}</a:t></a:r></a:p>"#,
            r#"</p:txBody></p:sp>"#,
            r#"<p:pic>"#,
            r#"<p:nvPicPr><p:cNvPr id="4" name="Picture 3"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#,
            r#"<p:blipFill><a:blip r:embed="{rid}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#,
            r#"<p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#,
            r#"</p:pic>"#,
        ),
        sz = title_size,
        title = escape_xml(title),
        rid = image_rel_id,
        x = left.0,
        y = top.0,
        cx = cx.0,
        cy = cy.0,
    );
    xml.push_str(SLIDE_CLOSE);
    xml
}

/// A `.rels` part from `(id, type, target)` triples.
pub(crate) fn relationships_xml(relationships: &[(&str, &str, &str)]) -> String {
    let mut xml = String::with_capacity(256);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
    for (id, rel_type, target) in relationships {
        let _ = write!(
            xml,
            r#"<Relationship Id="{id}" Type="{rel_type}" Target="{target}"/>"#,
        );
    }
    xml.push_str("</Relationships>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_xml_handles_reserved_chars() {
        assert_eq!(escape_xml("a & b < c"), "a &amp; b &lt; c");
        assert_eq!(escape_xml(r#"say "hi""#), "say &quot;hi&quot;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn title_slide_carries_title_and_description() {
        let xml = title_slide_xml("Cats & Dogs", "newest 5 posts");
        assert!(xml.contains("<a:t>Cats &amp; Dogs</a:t>"));
        assert!(xml.contains("<a:t>newest 5 posts</a:t>"));
        assert!(xml.contains(r#"type="ctrTitle""#));
        assert!(xml.contains(r#"type="subTitle""#));
    }

    #[test]
    fn title_slide_keeps_empty_subtitle_placeholder() {
        let xml = title_slide_xml("Deck", "");
        assert!(xml.contains(r#"type="subTitle""#));
        assert!(xml.contains("<a:t></a:t>"));
    }

    #[test]
    fn picture_slide_places_image_and_shrinks_title() {
        let xml = picture_slide_xml(
            "A post",
            "rId2",
            Emu(0),
            Emu(1_371_600),
            Emu(9_144_000),
            Emu(4_572_000),
        );
        assert!(xml.contains(r#"sz="2000""#));
        assert!(xml.contains(r#"r:embed="rId2""#));
        assert!(xml.contains(r#"<a:off x="0" y="1371600"/>"#));
        assert!(xml.contains(r#"<a:ext cx="9144000" cy="4572000"/>"#));
    }

    #[test]
    fn relationships_render_each_triple() {
        let xml = relationships_xml(&[
            ("rId1", "http://x/slideLayout", "../slideLayouts/slideLayout2.xml"),
            ("rId2", "http://x/image", "../media/image1.png"),
        ]);
        assert!(xml.contains(r#"Id="rId1""#));
        assert!(xml.contains(r#"Target="../media/image1.png""#));
    }
}
