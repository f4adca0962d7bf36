//! End-to-end placement scenarios

use keycap_sheet::{
    AlignmentRule, Assembler, ColorScheme, GenerateConfig, GridPosition, Key, KeyRenderer, Keymap,
    Legend, PositionQueue, SheetConfig, SheetError, StyleOptions, StyleRegistry, SvgBuilder,
    SvgConfig,
};
use pretty_assertions::assert_eq;

fn styles() -> StyleRegistry {
    let mut styles = StyleRegistry::new();
    styles
        .register("alphabet", 0.3, 0.5, StyleOptions::default())
        .expect("Should register");
    styles
        .register("digits", 0.22, 0.87, StyleOptions::default())
        .expect("Should register");
    styles
}

fn single_pass(keys: Vec<Key>) -> Keymap {
    Keymap::new(keys, vec![ColorScheme::new("dark", "black", 1, styles())])
}

fn assembler() -> Assembler {
    let sheet = SheetConfig::new().with_dpi(keycap_sheet::sheet::MM_PER_INCH);
    Assembler::new(KeyRenderer::from_sheet(&sheet), 0, AlignmentRule::none())
}

fn positions() -> Vec<GridPosition> {
    (1..=5).map(|i| GridPosition::new(i * 100, 50)).collect()
}

fn page() -> SvgBuilder {
    SvgBuilder::new(SvgConfig::new().with_standalone(false))
}

#[test]
fn test_two_keys_five_positions() {
    let keymap = single_pass(vec![
        Key::new(vec![Legend::text("A", "alphabet")]),
        Key::new(vec![Legend::text("1", "digits")]),
    ]);
    let mut queue = PositionQueue::new(positions());
    let mut page = page();

    let report = assembler().run(&keymap, &mut queue, &mut page).unwrap();
    assert_eq!(report.placements, 2);
    assert_eq!(report.remaining, 3);
    assert_eq!(
        queue.upcoming(),
        &[
            GridPosition::new(300, 50),
            GridPosition::new(400, 50),
            GridPosition::new(500, 50),
        ]
    );

    let svg = page.build(1000.0, 1000.0);
    assert_eq!(svg.matches("<rect").count(), 2);
    assert_eq!(svg.matches("<line").count(), 8);
    assert_eq!(svg.matches("<text").count(), 2);
    // positions 1 and 2 carry the vertical cut lines
    assert!(svg.contains(r#"x1="100" y1="48""#));
    assert!(svg.contains(r#"x1="200" y1="48""#));
    assert!(!svg.contains(r#"x1="300" y1="48""#));
}

#[test]
fn test_blank_key_consumes_a_position() {
    let keymap = single_pass(vec![
        Key::blank(),
        Key::new(vec![Legend::text("A", "alphabet")]),
    ]);
    let mut queue = PositionQueue::new(positions());
    let mut page = page();

    assembler().run(&keymap, &mut queue, &mut page).unwrap();
    assert_eq!(queue.consumed(), 2);

    let svg = page.build(1000.0, 1000.0);
    assert_eq!(svg.matches("<rect").count(), 2);
    assert_eq!(svg.matches("<text").count(), 1);
    assert_eq!(svg.matches("<image").count(), 0);
}

#[test]
fn test_image_legend_centered() {
    let keymap = single_pass(vec![Key::new(vec![Legend::image("icon.svg")])]);
    let mut queue = PositionQueue::new(positions());
    let mut page = page();

    assembler().run(&keymap, &mut queue, &mut page).unwrap();
    let svg = page.build(1000.0, 1000.0);
    assert_eq!(svg.matches("<image").count(), 1);
    assert_eq!(svg.matches("<text").count(), 0);

    // 20 % inset and 60 % size of an 11 unit cell at (100, 50)
    let image = svg.lines().find(|l| l.contains("<image")).unwrap();
    assert!(image.contains(r#"xlink:href="icon.svg""#));
    let attr = |name: &str| -> f64 {
        let start = image.find(&format!(r#" {}=""#, name)).unwrap() + name.len() + 3;
        let end = start + image[start..].find('"').unwrap();
        image[start..end].parse().unwrap()
    };
    assert!((attr("x") - 102.2).abs() < 1e-9);
    assert!((attr("y") - 52.2).abs() < 1e-9);
    assert!((attr("width") - 6.6).abs() < 1e-9);
    assert!((attr("height") - 6.6).abs() < 1e-9);
    // the image is centered in the cell
    assert!((attr("x") + attr("width") / 2.0 - 105.5).abs() < 1e-9);
}

#[test]
fn test_reverse_declaration_order() {
    let keymap = single_pass(vec![Key::new(vec![
        Legend::text("A", "alphabet"),
        Legend::text("B", "alphabet"),
        Legend::text("C", "digits"),
    ])]);
    let mut queue = PositionQueue::new(positions());
    let mut page = page();

    assembler().run(&keymap, &mut queue, &mut page).unwrap();
    let svg = page.build(1000.0, 1000.0);
    let order: Vec<&str> = svg
        .lines()
        .filter(|l| l.contains("<text"))
        .map(|l| &l[l.len() - 8..l.len() - 7])
        .collect();
    assert_eq!(order, vec!["C", "B", "A"]);
}

#[test]
fn test_positions_never_wrap_around() {
    let keys = (0..3)
        .map(|_| Key::new(vec![Legend::text("x", "alphabet")]))
        .collect();
    let keymap = Keymap::new(keys, vec![ColorScheme::new("dark", "black", 2, styles())]);
    let mut queue = PositionQueue::new(positions());
    let mut page = page();

    let err = assembler().run(&keymap, &mut queue, &mut page).unwrap_err();
    assert!(matches!(
        err,
        SheetError::InsufficientPositions { pass: Some(2), .. }
    ));
    assert_eq!(queue.remaining(), 0);
}

#[test]
fn test_custom_keymap_reuses_renderer() {
    let source = r##"
[styles.symbol]
dx = 0.5
dy = 0.7
font_size = "5.5em"

[[schemes]]
name = "light"
passes = 2
background = "white"
fill = "black"

[[keys]]
legends = [{ text = "→", category = "symbol" }]
"##;
    let keymap = Keymap::from_str(source).expect("Should parse");
    let sheet = keycap_sheet::generate_with_config(&keymap, &GenerateConfig::default()).unwrap();
    assert_eq!(sheet.report.placements, 2);
    assert_eq!(sheet.svg.matches(">→</text>").count(), 2);
    // 345 - 30 header = 315; pass 1 leaves 314 -> 310, pass 2 leaves 309 -> 305
    assert_eq!(sheet.report.remaining, 305);
}
