use limpet::{
    Algorithm, Circle, GridBasedOptions, GridMode, LayoutAlignment, Rectangle, ResultData, Scene,
    Traversal, place,
};

const EPS: f64 = 1e-9;

fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Rectangle {
    Rectangle::from_coords(min_x, min_y, max_x, max_y).unwrap()
}

fn circle(id: i64, inner: f64, outer: f64) -> Circle {
    Circle::new(id, inner, outer).unwrap()
}

/// Deterministic scene generator (xorshift64*), so failures are reproducible by seed.
struct XorShift64Star(u64);

impl XorShift64Star {
    fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn below(&mut self, n: u64) -> u64 {
        (self.next_f64() * n as f64) as u64
    }
}

fn random_scene(seed: u64) -> Scene {
    let mut rng = XorShift64Star::new(seed);
    let (w, h) = (rng.range(20.0, 60.0), rng.range(20.0, 60.0));
    let (ox, oy) = (rng.range(-50.0, 50.0), rng.range(-50.0, 50.0));
    let zone = rect(ox, oy, ox + w, oy + h);

    // Exclusions are at least 3 wide so two leaning rings never reach across one.
    let exclusions = (0..rng.below(5))
        .map(|_| {
            let ew = rng.range(3.0, 12.0);
            let eh = rng.range(3.0, 12.0);
            let x = ox + rng.range(0.0, w - ew);
            let y = oy + rng.range(0.0, h - eh);
            // Clamp against rounding past the zone edge.
            rect(x, y, (x + ew).min(ox + w), (y + eh).min(oy + h))
        })
        .collect();

    let circles = (0..rng.below(13))
        .map(|id| {
            let inner = rng.range(0.5, 1.5);
            circle(id as i64, inner, inner + rng.range(0.0, 1.0))
        })
        .collect();

    Scene::new(zone, exclusions, circles).unwrap()
}

fn distance_to_rect(x: f64, y: f64, r: &Rectangle) -> f64 {
    let dx = (r.min_point().x - x).max(0.0).max(x - r.max_point().x);
    let dy = (r.min_point().y - y).max(0.0).max(y - r.max_point().y);
    (dx * dx + dy * dy).sqrt()
}

/// Checks the placement invariants that hold for every successful result.
///
/// Strips only lean sideways (rows in horizontal mode, columns in vertical mode), so an exclusion
/// outside the circle's band must stay clear of the whole outer disk.
fn assert_valid_placement(scene: &Scene, result: &ResultData, mode: GridMode) {
    let mut ids: Vec<i64> = result.circles.iter().map(|c| c.id()).collect();
    let mut expected: Vec<i64> = scene.circles().iter().map(|c| c.id()).collect();
    ids.sort();
    expected.sort();
    assert_eq!(ids, expected, "every circle is placed exactly once");

    let zone = scene.zone();
    for c in &result.circles {
        let (x, y) = (c.position.x, c.position.y);
        let (inner, outer) = (c.inner_radius(), c.outer_radius());
        // Clearance rings may only cross leanable boundaries, so the inner disk stays inside.
        assert!(x - inner >= zone.min_point().x - EPS, "{c:?} leaves zone");
        assert!(x + inner <= zone.max_point().x + EPS, "{c:?} leaves zone");
        assert!(y - inner >= zone.min_point().y - EPS, "{c:?} leaves zone");
        assert!(y + inner <= zone.max_point().y + EPS, "{c:?} leaves zone");
        for area in scene.exclusion_areas() {
            let d = distance_to_rect(x, y, area);
            assert!(d >= inner - EPS, "{c:?} overlaps exclusion {area:?}");

            let off_band = match mode {
                GridMode::Horizontal => {
                    y < area.min_point().y - EPS || y > area.max_point().y + EPS
                }
                GridMode::Vertical => x < area.min_point().x - EPS || x > area.max_point().x + EPS,
            };
            if off_band {
                assert!(
                    d >= outer - EPS,
                    "{c:?} clearance ring crosses exclusion {area:?} (distance {d})"
                );
            }
        }
    }

    for (i, a) in result.circles.iter().enumerate() {
        for b in &result.circles[i + 1..] {
            let d = (a.position - b.position).length();
            assert!(
                d >= a.outer_radius() + b.outer_radius() - EPS,
                "{a:?} overlaps {b:?} (distance {d})"
            );
        }
    }
}

#[test]
fn random_scenes_never_overlap_or_cross_exclusions() {
    let _ = env_logger::builder().is_test(true).try_init();

    let variants = [
        GridBasedOptions::default(),
        GridBasedOptions {
            relax: false,
            ..Default::default()
        },
        GridBasedOptions {
            traversal: Traversal::RoundRobin,
            ..Default::default()
        },
        GridBasedOptions {
            mode: GridMode::Vertical,
            alignment: LayoutAlignment::HeightLess,
            ..Default::default()
        },
        GridBasedOptions {
            alignment: LayoutAlignment::None,
            ..Default::default()
        },
    ];

    let mut successes = 0;
    for seed in 1..=200 {
        let scene = random_scene(seed);
        for opts in &variants {
            if let Some(result) = place(&scene, Algorithm::GridBased(*opts)) {
                assert_valid_placement(&scene, &result, opts.mode);
                successes += 1;
            }
        }
    }
    assert!(successes > 0);
}

#[test]
fn placement_is_deterministic() {
    for seed in [3, 17, 99] {
        let scene = random_scene(seed);
        let a = place(&scene, Algorithm::default());
        let b = place(&scene, Algorithm::default());
        assert_eq!(a, b);
    }
}

#[test]
fn zero_circles_yield_an_empty_result() {
    let scene = Scene::new(
        rect(0.0, 0.0, 10.0, 10.0),
        vec![rect(2.0, 2.0, 5.0, 5.0)],
        Vec::new(),
    )
    .unwrap();
    let result = place(&scene, Algorithm::default()).unwrap();
    assert!(result.circles.is_empty());
}

#[test]
fn zone_narrower_than_twice_the_smallest_inner_radius_fails() {
    let scene = Scene::new(
        rect(0.0, 0.0, 3.9, 50.0),
        Vec::new(),
        vec![circle(1, 2.0, 2.0), circle(2, 3.0, 4.0)],
    )
    .unwrap();
    assert_eq!(place(&scene, Algorithm::default()), None);
}

#[test]
fn single_circle_lands_in_the_middle_column_at_the_top() {
    let scene = Scene::new(
        rect(0.0, 0.0, 10.0, 10.0),
        Vec::new(),
        vec![circle(1, 1.0, 1.0)],
    )
    .unwrap();
    let result = place(&scene, Algorithm::default()).unwrap();
    let c = result.get(1).unwrap();
    assert_eq!((c.position.x, c.position.y), (5.0, 9.0));
}

#[test]
fn bisected_zone_fills_both_halves() {
    // Each half holds exactly two stacked rings of outer radius 2.
    let scene = Scene::new(
        rect(0.0, 0.0, 10.0, 8.0),
        vec![rect(4.0, 0.0, 6.0, 8.0)],
        (0..4).map(|id| circle(id, 2.0, 2.0)).collect(),
    )
    .unwrap();
    let result = place(&scene, Algorithm::default()).unwrap();
    assert_valid_placement(&scene, &result, GridMode::Horizontal);

    let left = result.circles.iter().filter(|c| c.position.x < 4.0).count();
    let right = result.circles.iter().filter(|c| c.position.x > 6.0).count();
    assert_eq!((left, right), (2, 2));
}

#[test]
fn too_many_circles_report_failure_without_partial_output() {
    let scene = Scene::new(
        rect(0.0, 0.0, 4.0, 4.0),
        Vec::new(),
        (0..3).map(|id| circle(id, 2.0, 2.0)).collect(),
    )
    .unwrap();
    assert_eq!(place(&scene, Algorithm::default()), None);
}

#[test]
fn small_circle_is_never_dropped_after_a_large_one() {
    // Layout 10 wide, 6 tall: the radius-3 ring fills the column height, so the radius-1 ring
    // goes to a split sub-layout on the right.
    let scene = Scene::new(
        rect(0.0, 0.0, 10.0, 6.0),
        Vec::new(),
        vec![circle(2, 1.0, 1.0), circle(1, 3.0, 3.0)],
    )
    .unwrap();
    let opts = GridBasedOptions {
        alignment: LayoutAlignment::None,
        ..Default::default()
    };
    let result = place(&scene, Algorithm::GridBased(opts)).unwrap();
    assert_valid_placement(&scene, &result, GridMode::Horizontal);
    assert_eq!(result.circles.len(), 2);
    assert_eq!(result.circles[0].id(), 1);
    assert!(result.get(2).unwrap().position.x > 8.0);
}

#[test]
fn rings_stacked_above_and_below_an_exclusion_keep_their_full_clearance() {
    // The exclusion splits the zone into a bottom row, two short side strips and a top row.
    let scene = Scene::new(
        rect(0.0, 0.0, 30.0, 20.0),
        vec![rect(5.0, 8.0, 25.0, 12.0)],
        (1..=16).map(|id| circle(id, 1.0, 2.0)).collect(),
    )
    .unwrap();
    let result = place(&scene, Algorithm::default()).unwrap();
    assert_valid_placement(&scene, &result, GridMode::Horizontal);

    let below = result
        .circles
        .iter()
        .filter(|c| c.position.y + c.outer_radius() <= 8.0 + EPS)
        .count();
    let above = result
        .circles
        .iter()
        .filter(|c| c.position.y - c.outer_radius() >= 12.0 - EPS)
        .count();
    assert!(below > 0 && above > 0, "below {below}, above {above}");
    assert_eq!(below + above, 16);
}
