//! End-to-end engine behavior: recomputation, transitions, and rendering.

use fviz_runtime::{CircleVisual, Engine, EngineConfig};
use proptest::prelude::*;

fn engine_with(iterations: u32) -> Engine {
    let mut engine = Engine::new(EngineConfig::default().with_anim_iterations(iterations));
    engine.on_resize(400.0, 400.0);
    engine
}

fn run_to_completion(engine: &mut Engine) {
    let mut guard = 0;
    while engine.tick() {
        guard += 1;
        assert!(guard <= 10_000, "transition never settled");
    }
}

fn assert_visuals_close(a: &CircleVisual, b: &CircleVisual) {
    assert!((a.rect.x - b.rect.x).abs() < 1e-9);
    assert!((a.rect.y - b.rect.y).abs() < 1e-9);
    assert!((a.rect.width - b.rect.width).abs() < 1e-9);
    assert!((a.rect.height - b.rect.height).abs() < 1e-9);
    assert_eq!(a.stroke, b.stroke);
    assert_eq!(a.fill, b.fill);
}

#[test]
fn shrinking_recompute_keeps_fading_circles_in_the_list() {
    let mut engine = engine_with(100);
    engine.set_factor(5).unwrap();
    run_to_completion(&mut engine);
    assert_eq!(engine.current_draw_circles().len(), 5);

    engine.set_factor(3).unwrap();

    // Three live circles plus two fade-outs.
    let circles = engine.current_draw_circles();
    assert_eq!(circles.len(), 5);

    run_to_completion(&mut engine);
    let settled = engine.current_draw_circles();
    assert_eq!(settled.len(), 5);
    for extra in &settled[3..] {
        assert_eq!(extra.fill.a(), 0);
        assert_eq!(extra.stroke.a(), 0);
        assert!(extra.rect.width < 1.0);
    }
}

#[test]
fn completion_clears_baselines_and_freezes_the_frame() {
    let mut engine = engine_with(50);
    engine.set_factor(7).unwrap();
    run_to_completion(&mut engine);

    let settled = engine.current_draw_circles();
    assert!(!engine.tick());
    assert_eq!(engine.current_draw_circles(), settled);
}

#[test]
fn four_to_seven_grows_with_immediate_new_circles() {
    let mut engine = engine_with(100);
    let before = engine.current_draw_circles();
    assert_eq!(before.len(), 4);

    engine.set_factor(7).unwrap();
    let at_start = engine.current_draw_circles();
    assert_eq!(at_start.len(), 7);

    // Paired circles still render the old state on step zero.
    for i in 0..4 {
        assert_visuals_close(&at_start[i], &before[i]);
    }

    // Unpaired circles render their target from the first frame.
    run_to_completion(&mut engine);
    let settled = engine.current_draw_circles();
    for i in 4..7 {
        assert_visuals_close(&at_start[i], &settled[i]);
    }
}

#[test]
fn reentrant_set_factor_resumes_from_the_rendered_frame() {
    let mut engine = engine_with(100);
    engine.set_factor(12).unwrap();
    for _ in 0..37 {
        engine.tick();
    }
    let mid = engine.current_draw_circles();

    engine.set_factor(5).unwrap();
    let resumed = engine.current_draw_circles();

    // Every circle, fade-outs included, starts from the mid-flight frame.
    assert_eq!(resumed.len(), mid.len());
    for (a, b) in resumed.iter().zip(&mid) {
        assert_visuals_close(a, b);
    }
}

#[test]
fn resize_settles_without_fade_through() {
    let mut engine = engine_with(100);
    engine.set_factor(9).unwrap();
    for _ in 0..10 {
        engine.tick();
    }
    assert!(engine.is_animating());

    engine.on_resize(800.0, 800.0);
    assert!(!engine.is_animating());
    assert_eq!(engine.current_draw_circles().len(), 9);
}

#[test]
fn resize_rescales_circle_geometry() {
    let mut engine = engine_with(0);
    engine.set_factor(6).unwrap();
    let small = engine.current_draw_circles();

    engine.on_resize(800.0, 800.0);
    let large = engine.current_draw_circles();

    for (a, b) in small.iter().zip(&large) {
        assert!((b.rect.width / a.rect.width - 2.0).abs() < 1e-9);
    }
}

#[test]
fn first_leaf_takes_the_zero_hue_fill() {
    let mut engine = engine_with(0);
    engine.set_factor(6).unwrap();

    let circles = engine.current_draw_circles();
    assert_eq!(circles[0].fill, fviz_draw::Rgba::rgb(153, 61, 61));
    assert_eq!(circles[0].stroke.a(), 0);
}

#[test]
fn factor_labels_join_or_mark_prime() {
    let mut engine = engine_with(0);
    assert_eq!(engine.factor_label(), ("4".to_string(), "2x2".to_string()));

    engine.set_factor(12).unwrap();
    assert_eq!(engine.factor_label(), ("12".to_string(), "2x2x3".to_string()));

    engine.set_factor(7).unwrap();
    assert_eq!(engine.factor_label(), ("7".to_string(), "Prime".to_string()));

    engine.set_factor(1).unwrap();
    assert_eq!(engine.factor_label(), ("1".to_string(), "Prime".to_string()));
}

proptest! {
    #[test]
    fn immediate_mode_renders_one_circle_per_leaf(n in 1u64..=200) {
        let mut engine = engine_with(0);
        engine.set_factor(n).unwrap();
        prop_assert_eq!(engine.current_draw_circles().len() as u64, n);
    }

    #[test]
    fn settled_transitions_keep_max_of_old_and_new(n in 1u64..=120) {
        let mut engine = engine_with(20);
        engine.set_factor(n).unwrap();
        let mut guard = 0;
        while engine.tick() {
            guard += 1;
            prop_assert!(guard <= 20);
        }

        let circles = engine.current_draw_circles();
        prop_assert_eq!(circles.len() as u64, n.max(4));
        for extra in circles.iter().skip(n as usize) {
            prop_assert_eq!(extra.fill.a(), 0);
        }
    }

    #[test]
    fn rendered_geometry_is_always_finite(n in 1u64..=150, ticks in 0u32..30) {
        let mut engine = engine_with(25);
        engine.set_factor(n).unwrap();
        for _ in 0..ticks {
            engine.tick();
        }
        for circle in engine.current_draw_circles() {
            prop_assert!(circle.rect.x.is_finite());
            prop_assert!(circle.rect.y.is_finite());
            prop_assert!(circle.rect.width.is_finite());
            prop_assert!(circle.rect.height.is_finite());
        }
    }
}
