//! Contract tests: typesetting, fallback and the grow/shrink fitting pipeline.

use eqn_typeset::*;
use proptest::prelude::*;

fn fit(expr: &str, container: Container) -> (RenderedBlock, Container) {
    let block = typeset_or_fallback(&LatexTypesetter, expr);
    let grown = grow_to_fill(block, &container, DEFAULT_TARGET_FRACTION).unwrap();
    let trimmed = shrink_container_to_aspect(container, &grown).unwrap();
    (grown, trimmed)
}

#[test]
fn test_equation_fills_container() {
    let container = Container::new(560.0, 420.0);
    let (block, trimmed) = fit("y = x^2 + x", container);

    assert!(!block.is_fallback());
    let (w, h) = block.fraction_of(&container);
    assert!(w.max(h) >= DEFAULT_TARGET_FRACTION);
    assert!(block.font_size > 10.0);
    assert!(trimmed.width <= container.width);
    assert!(trimmed.height <= container.height);
}

#[test]
fn test_trimmed_container_matches_block_aspect() {
    let container = Container::new(560.0, 420.0);
    let (block, trimmed) = fit("E = m*c^2", container);

    let block_aspect = block.width_pt() / block.height_pt();
    assert!((trimmed.aspect() - block_aspect).abs() < 1e-9);
    assert_eq!((trimmed.x, trimmed.y), (container.x, container.y));
}

#[test]
fn test_unparseable_expression_falls_back_and_still_fits() {
    let container = Container::new(560.0, 420.0);
    let (block, _) = fit("hello world", container);

    assert!(block.is_fallback());
    assert_eq!(block.lines()[0], "hello world");
    assert_eq!(block.lines()[1], FALLBACK_MESSAGE);
}

#[test]
fn test_fraction_is_taller_than_flat_sum() {
    let frac = typeset("y = a/b").unwrap();
    let sum = typeset("y = a+b").unwrap();
    assert!(frac.extent.height() > sum.extent.height());
}

#[test]
fn test_relations_typeset() {
    for (input, op) in [
        ("a ~= b", "\\neq"),
        ("a <= b", "\\leq"),
        ("a >= b", "\\geq"),
        ("a == b", "="),
    ] {
        let block = typeset(input).unwrap();
        assert!(block.latex().unwrap().contains(op), "{} -> {:?}", input, block.latex());
    }
}

#[test]
fn test_empty_expression_is_invalid() {
    assert!(matches!(
        typeset("   "),
        Err(TypesetError::InvalidExpression { .. })
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_grown_block_lands_just_above_target(
        width in 0.1f64..40.0,
        ascent in 0.1f64..4.0,
        descent in 0.0f64..2.0,
        target in 0.2f64..=1.0,
        cw in 50.0f64..2000.0,
        ch in 50.0f64..2000.0,
    ) {
        let container = Container::new(cw, ch);
        let block = RenderedBlock::equation("x", "x", Extent::new(width, ascent, descent))
            .with_font_size(0.5);
        prop_assume!(block.fraction_of(&container).0.max(block.fraction_of(&container).1) < target);

        let grown = grow_to_fill(block, &container, target).unwrap();
        let (w, h) = grown.fraction_of(&container);
        let size = w.max(h);
        prop_assert!(size >= target);
        prop_assert!(size < target * (1.0 + 1e-9));
    }

    #[test]
    fn prop_shrink_never_grows_container(
        w in 0.01f64..1.0,
        h in 0.01f64..1.0,
        cw in 10.0f64..1000.0,
        ch in 10.0f64..1000.0,
    ) {
        let container = Container::new(cw, ch);
        let block = RenderedBlock::equation("x", "x", Extent::new(w * cw, h * ch, 0.0))
            .with_font_size(1.0);
        let trimmed = shrink_container_to_aspect(container, &block).unwrap();
        prop_assert!(trimmed.width <= cw * (1.0 + 1e-12));
        prop_assert!(trimmed.height <= ch * (1.0 + 1e-12));
    }
}
