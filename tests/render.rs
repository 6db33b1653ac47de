use icon_render::{IconData, IconRecord, RenderParams, render};
use resvg::usvg::{Options, Tree};

const HEAD: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink""#;
const STYLE: &str =
    "-ms-transform: rotate(360deg); -webkit-transform: rotate(360deg); transform: rotate(360deg);";

fn expected(width: &str, height: &str, style: &str, align: &str, view_box: &str, body: &str) -> String {
    format!(
        r#"{HEAD} width="{width}" height="{height}" style="{style}{STYLE}" preserveAspectRatio="{align}" viewBox="{view_box}">{body}</svg>"#
    )
}

fn query(icon: &IconRecord, pairs: &[(&str, &str)]) -> String {
    render(icon, &RenderParams::from_query(pairs.iter().copied())).to_svg()
}

fn tall_icon(body: &str) -> IconRecord {
    let mut data = IconData::new(body).with_size(20.0, 24.0);
    data.inline_height = Some(28.0);
    data.inline_top = Some(-2.0);
    data.into_record()
}

#[test]
fn square_icon() {
    let icon = IconData::new("<body />").with_size(24.0, 24.0).into_record();

    assert_eq!(
        query(&icon, &[]),
        expected("1em", "1em", "", "xMidYMid meet", "0 0 24 24", "<body />")
    );
    assert_eq!(
        query(&icon, &[("width", "48")]),
        expected("48", "48", "", "xMidYMid meet", "0 0 24 24", "<body />")
    );
    assert_eq!(
        query(&icon, &[("height", "32")]),
        expected("32", "32", "", "xMidYMid meet", "0 0 24 24", "<body />")
    );
}

#[test]
fn colors_and_inline() {
    let icon = tall_icon(r#"<path d="whatever" fill="currentColor" />"#);

    assert_eq!(
        query(&icon, &[]),
        expected(
            "0.84em",
            "1em",
            "",
            "xMidYMid meet",
            "0 0 20 24",
            r#"<path d="whatever" fill="currentColor" />"#
        )
    );
    assert_eq!(
        query(&icon, &[("width", "48"), ("color", "red")]),
        expected(
            "48",
            "57.6",
            "",
            "xMidYMid meet",
            "0 0 20 24",
            r#"<path d="whatever" fill="red" />"#
        )
    );
    assert_eq!(
        query(&icon, &[("height", "100%"), ("inline", "true")]),
        expected(
            "71.43%",
            "100%",
            "vertical-align: -0.125em;",
            "xMidYMid meet",
            "0 -2 20 28",
            r#"<path d="whatever" fill="currentColor" />"#
        )
    );
}

#[test]
fn custom_alignment() {
    let icon = tall_icon(r#"<path d="whatever" fill="currentColor" />"#);
    let body = r#"<path d="whatever" fill="currentColor" />"#;

    for (align, expected_align) in [
        ("top", "xMidYMin meet"),
        ("left,bottom", "xMinYMax meet"),
        ("right,middle,crop", "xMaxYMid slice"),
    ] {
        assert_eq!(
            query(&icon, &[("align", align), ("width", "50"), ("height", "50")]),
            expected("50", "50", "", expected_align, "0 0 20 24", body),
            "align={align}"
        );
    }
}

#[test]
fn transformations() {
    let icon = IconData::new("<body />").with_size(20.0, 24.0).into_record();
    let turned = |transform: &str| format!(r#"<g transform="{transform}"><body /></g>"#);

    assert_eq!(
        query(&icon, &[("rotate", "1")]),
        expected("1.2em", "1em", "", "xMidYMid meet", "0 0 24 20", &turned("rotate(90 12 12)"))
    );
    assert_eq!(
        query(&icon, &[("rotate", "180deg")]),
        expected("0.84em", "1em", "", "xMidYMid meet", "0 0 20 24", &turned("rotate(180 10 12)"))
    );
    for rotate in ["3", "75%", "270deg"] {
        assert_eq!(
            query(&icon, &[("rotate", rotate)]),
            expected("1.2em", "1em", "", "xMidYMid meet", "0 0 24 20", &turned("rotate(-90 10 10)")),
            "rotate={rotate}"
        );
    }
    assert_eq!(
        query(&icon, &[("flip", "Horizontal")]),
        expected(
            "0.84em",
            "1em",
            "",
            "xMidYMid meet",
            "0 0 20 24",
            &turned("translate(20 0) scale(-1 1)")
        )
    );
    assert_eq!(
        query(&icon, &[("flip", "ignored, Vertical space-works-as-comma")]),
        expected(
            "0.84em",
            "1em",
            "",
            "xMidYMid meet",
            "0 0 20 24",
            &turned("translate(0 24) scale(1 -1)")
        )
    );
}

#[test]
fn fourteen_unit_icon_aligns_lower() {
    let icon = IconData::new("<body />").with_size(14.0, 14.0).into_record();
    let svg = query(&icon, &[("inline", "1")]);
    assert!(svg.contains(r#"style="vertical-align: -0.143em;"#), "{svg}");
}

#[test]
fn output_parses_as_svg() {
    let icon = tall_icon(r#"<path d="M0 0h20v24H0z" fill="currentColor" />"#);

    for pairs in [
        vec![],
        vec![("width", "48"), ("color", "red")],
        vec![("rotate", "1"), ("flip", "vertical"), ("box", "1")],
        vec![("height", "auto"), ("align", "left,top,slice")],
    ] {
        let svg = query(&icon, &pairs);
        let tree = Tree::from_str(&svg, &Options::default()).unwrap();
        assert!(tree.size().width() > 0.0, "{svg}");
    }
}

#[test]
fn auto_size_uses_view_box() {
    let icon = tall_icon("<body />");
    let svg = render(&icon, &RenderParams::new().with_width("auto"));
    assert_eq!(svg.attribute("width"), Some("20"));
    assert_eq!(svg.attribute("height"), Some("24"));

    let tree = Tree::from_str(&svg.to_svg(), &Options::default()).unwrap();
    assert_eq!(tree.size().width(), 20.0);
    assert_eq!(tree.size().height(), 24.0);
}
