//! The identity mirror: a reflection line that shatters and reforms, cracks
//! accumulating across the session.

use crate::api::config::RitualConfig;
use crate::api::types::OverlayId;
use crate::core::rng::Rng;
use crate::core::timeline::Timeline;

/// Region the crack paths are drawn in (matches the mirror surface).
const CRACK_WIDTH: f32 = 400.0;
const CRACK_HEIGHT: f32 = 300.0;

/// One crack in the mirror surface: an SVG quadratic path.
/// Cracks are never removed for the session.
#[derive(Debug, Clone)]
pub struct MirrorCrack {
    pub id: OverlayId,
    pub path: String,
}

/// What one mirror tick produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct MirrorUpdate {
    /// The reflection swapped to this pool index; one transformation unit.
    pub reflection_changed: Option<usize>,
}

/// Shatter-and-reform logic for the mirror screen.
///
/// A shatter cracks the glass immediately, then swaps the reflection after a
/// fixed delay and reports one transformation unit. Shatters while one is in
/// flight are ignored.
pub struct IdentityMirror {
    reflections: Vec<String>,
    current: usize,
    cracks: Vec<MirrorCrack>,
    swap: Timeline<()>,
    next_id: u32,
}

impl IdentityMirror {
    pub fn new(config: &RitualConfig, rng: &mut Rng) -> Self {
        let reflections = config.reflections.clone();
        let current = rng.pick_index(reflections.len());
        Self {
            reflections,
            current,
            cracks: Vec::new(),
            swap: Timeline::after(config.reflection_delay),
            next_id: 1,
        }
    }

    /// Begin a shatter. Returns false while one is already in flight.
    pub fn shatter(&mut self, rng: &mut Rng) -> bool {
        if self.swap.is_running() {
            return false;
        }
        self.cracks.push(MirrorCrack {
            id: OverlayId(self.next_id),
            path: random_crack_path(rng),
        });
        self.next_id += 1;
        self.swap.start();
        true
    }

    /// Advance the shatter delay.
    pub fn tick(&mut self, dt: f32, rng: &mut Rng) -> MirrorUpdate {
        if self.swap.tick(dt).completed {
            self.current = rng.pick_index(self.reflections.len());
            MirrorUpdate {
                reflection_changed: Some(self.current),
            }
        } else {
            MirrorUpdate::default()
        }
    }

    /// The reflection currently displayed (blurred out mid-shatter).
    pub fn reflection(&self) -> &str {
        &self.reflections[self.current]
    }

    /// Pool index of the current reflection.
    pub fn reflection_index(&self) -> usize {
        self.current
    }

    pub fn is_reflecting(&self) -> bool {
        self.swap.is_running()
    }

    pub fn cracks(&self) -> &[MirrorCrack] {
        &self.cracks
    }
}

/// A random quadratic curve across the mirror surface,
/// `M x0,y0 Q cx,cy x1,y1`.
fn random_crack_path(rng: &mut Rng) -> String {
    let x0 = rng.next_range(0.0, CRACK_WIDTH);
    let y0 = rng.next_range(0.0, CRACK_HEIGHT);
    let cx = rng.next_range(0.0, CRACK_WIDTH);
    let cy = rng.next_range(0.0, CRACK_HEIGHT);
    let x1 = rng.next_range(0.0, CRACK_WIDTH);
    let y1 = rng.next_range(0.0, CRACK_HEIGHT);
    format!("M{x0:.1},{y0:.1} Q{cx:.1},{cy:.1} {x1:.1},{y1:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mirror() -> (IdentityMirror, Rng) {
        let mut rng = Rng::new(5);
        let m = IdentityMirror::new(&RitualConfig::default(), &mut rng);
        (m, rng)
    }

    #[test]
    fn starts_with_a_reflection_from_the_pool() {
        let (m, _) = mirror();
        let cfg = RitualConfig::default();
        assert!(cfg.reflections.iter().any(|r| r == m.reflection()));
    }

    #[test]
    fn shatter_cracks_immediately_swaps_after_delay() {
        let (mut m, mut rng) = mirror();
        assert!(m.shatter(&mut rng));
        assert_eq!(m.cracks().len(), 1);
        assert!(m.is_reflecting());

        let up = m.tick(1.9, &mut rng);
        assert!(up.reflection_changed.is_none());

        let up = m.tick(0.2, &mut rng);
        let idx = up.reflection_changed.expect("swap at the 2s mark");
        assert_eq!(idx, m.reflection_index());
        assert!(!m.is_reflecting());
    }

    #[test]
    fn shatter_debounced_while_reflecting() {
        let (mut m, mut rng) = mirror();
        assert!(m.shatter(&mut rng));
        assert!(!m.shatter(&mut rng));
        assert_eq!(m.cracks().len(), 1);

        m.tick(2.0, &mut rng);
        assert!(m.shatter(&mut rng));
        assert_eq!(m.cracks().len(), 2);
    }

    #[test]
    fn cracks_accumulate_for_the_session() {
        let (mut m, mut rng) = mirror();
        for _ in 0..5 {
            m.shatter(&mut rng);
            m.tick(2.0, &mut rng);
        }
        assert_eq!(m.cracks().len(), 5);
        // Ids are distinct.
        let mut ids: Vec<u32> = m.cracks().iter().map(|c| c.id.0).collect();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn crack_paths_stay_on_the_surface() {
        let mut rng = Rng::new(17);
        for _ in 0..20 {
            let path = random_crack_path(&mut rng);
            assert!(path.starts_with('M'));
            assert!(path.contains(" Q"));
            // Every coordinate parses and lands in the surface region.
            for pair in path[1..].replace("Q", "").split_whitespace() {
                let (x, y) = pair.split_once(',').unwrap();
                let x: f32 = x.parse().unwrap();
                let y: f32 = y.parse().unwrap();
                assert!((0.0..=400.0).contains(&x));
                assert!((0.0..=300.0).contains(&y));
            }
        }
    }

    #[test]
    fn duplicate_picks_are_allowed() {
        // With a single-entry pool the "new" reflection is always the same
        // line; the swap must still complete and report a transformation.
        let mut cfg = RitualConfig::default();
        cfg.reflections = vec!["only line".to_string()];
        let mut rng = Rng::new(3);
        let mut m = IdentityMirror::new(&cfg, &mut rng);
        m.shatter(&mut rng);
        let up = m.tick(2.0, &mut rng);
        assert_eq!(up.reflection_changed, Some(0));
    }
}
