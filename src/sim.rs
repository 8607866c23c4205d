use crate::model::{Comet, InfoPanel, Planet, Vec2, World};
use rand::Rng;
use std::f32::consts::PI;

impl World {
    /// One simulation tick. Planets move first so moons can orbit their
    /// parent's current-frame position; comets move, expire and spawn last.
    pub(crate) fn advance(&mut self) {
        self.ticks += 1;

        let sun = self.sun;
        for p in &mut self.planets {
            p.angle += p.speed;
            p.pos = sun.add(Vec2::on_circle(p.radius, p.angle));
        }

        for m in &mut self.moons {
            let center = self.planets[m.parent].pos;
            m.angle += m.speed;
            m.pos = center.add(Vec2::on_circle(m.radius, m.angle));
        }

        for belt in &mut self.belts {
            for b in belt {
                b.angle += b.speed;
                b.pos = sun.add(Vec2::on_circle(b.radius, b.angle));
            }
        }

        for c in &mut self.comets {
            c.pos = c.pos.add(c.vel);
            c.life = c.life.saturating_sub(1);
        }
        self.comets.retain(|c| c.life > 0);

        // spawned comets take their first step on the next tick
        if self.rng.gen::<f32>() < self.comet_spawn_chance {
            let comet = self.spawn_comet();
            self.comets.push(comet);
        }
    }

    fn spawn_comet(&mut self) -> Comet {
        let edge = self.rng.gen_range(0.0..2.0 * PI);
        let pos = Vec2::on_circle(self.extent, edge);
        // aim at a point loosely around the sun so paths cross the field
        let target = Vec2::on_circle(
            self.rng.gen_range(0.0..self.extent * 0.4),
            self.rng.gen_range(0.0..2.0 * PI),
        );
        let dir = target.sub(pos);
        let len = dir.len().max(1e-6);
        let vel = Vec2::new(dir.x / len * self.comet_speed, dir.y / len * self.comet_speed);
        let life = self.rng.gen_range(self.comet_life.0..=self.comet_life.1);
        Comet { pos, vel, life }
    }

    /// Pointer moved in world coordinates: labels follow hover state.
    pub(crate) fn pointer_moved(&mut self, cursor: Vec2) {
        let threshold = self.hover_threshold;
        for p in &mut self.planets {
            p.label_visible = cursor.dist(p.pos) < threshold;
        }
    }

    /// Click in world coordinates. An open panel closes on any click;
    /// otherwise the first planet within the threshold opens one.
    pub(crate) fn clicked(&mut self, at: Vec2) {
        if self.panel.is_some() {
            self.panel = None;
            return;
        }
        if let Some(i) = hit_test(&self.planets, at, self.hover_threshold) {
            self.panel = Some(InfoPanel { planet: i });
        }
    }

    pub(crate) fn panel_lines(&self) -> Option<Vec<String>> {
        let panel = self.panel?;
        let p = &self.planets[panel.planet];
        Some(vec![
            format!("Name:   {}", p.name),
            format!("Radius: {:.0}", p.radius),
            format!("Speed:  {:.4}", p.speed),
            format!("Color:  {}", p.color_name),
        ])
    }
}

/// First planet within `threshold` of `at`, in iteration order.
pub(crate) fn hit_test(planets: &[Planet], at: Vec2, threshold: f32) -> Option<usize> {
    planets.iter().position(|p| at.dist(p.pos) < threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Settings, SystemConfig};
    use approx::assert_relative_eq;

    fn test_world() -> World {
        let cfg = SystemConfig::default_system();
        cfg.validate().unwrap();
        World::new(&cfg, &Settings::default())
    }

    /// Quiet world: no comet spawns interfering with counts.
    fn quiet_world() -> World {
        let mut w = test_world();
        w.comet_spawn_chance = 0.0;
        w
    }

    #[test]
    fn positions_follow_circular_orbits() {
        let mut w = quiet_world();
        for _ in 0..25 {
            w.advance();
            for p in &w.planets {
                let expect = w.sun.add(Vec2::on_circle(p.radius, p.angle));
                assert_relative_eq!(p.pos.x, expect.x, epsilon = 1e-4);
                assert_relative_eq!(p.pos.y, expect.y, epsilon = 1e-4);
            }
            for belt in &w.belts {
                for b in belt {
                    let expect = w.sun.add(Vec2::on_circle(b.radius, b.angle));
                    assert_relative_eq!(b.pos.x, expect.x, epsilon = 1e-4);
                    assert_relative_eq!(b.pos.y, expect.y, epsilon = 1e-4);
                }
            }
        }
    }

    #[test]
    fn angles_advance_by_exactly_speed() {
        let mut w = quiet_world();
        let before: Vec<f32> = w.planets.iter().map(|p| p.angle).collect();
        w.advance();
        for (p, prev) in w.planets.iter().zip(before) {
            assert_relative_eq!(p.angle, prev + p.speed, epsilon = 1e-6);
        }
    }

    #[test]
    fn moons_orbit_the_parents_current_position() {
        let mut w = quiet_world();
        for _ in 0..10 {
            w.advance();
            for m in &w.moons {
                let parent = &w.planets[m.parent];
                // parent.pos here is its post-update position for this tick
                let expect = parent.pos.add(Vec2::on_circle(m.radius, m.angle));
                assert_relative_eq!(m.pos.x, expect.x, epsilon = 1e-4);
                assert_relative_eq!(m.pos.y, expect.y, epsilon = 1e-4);
                assert_relative_eq!(m.pos.dist(parent.pos), m.radius, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn belt_speeds_are_fixed_at_creation() {
        let mut w = quiet_world();
        let cfg = SystemConfig::default_system();
        let before: Vec<Vec<f32>> = w.belts.iter().map(|b| b.iter().map(|o| o.speed).collect()).collect();
        for _ in 0..50 {
            w.advance();
        }
        for (bi, belt) in w.belts.iter().enumerate() {
            let (lo, hi) = cfg.belts[bi].speed;
            for (o, prev) in belt.iter().zip(&before[bi]) {
                assert_eq!(o.speed, *prev);
                assert!(o.speed >= lo && o.speed < hi);
            }
        }
    }

    #[test]
    fn earth_after_a_thousand_ticks() {
        let mut w = quiet_world();
        let earth = 2;
        assert_eq!(w.planets[earth].name, "Earth");
        w.planets[earth].angle = 0.0;
        for _ in 0..1000 {
            w.advance();
        }
        let p = &w.planets[earth];
        assert_relative_eq!(p.angle, 1.0, epsilon = 1e-4);
        assert_relative_eq!(p.pos.x, 130.0 * 1.0f32.cos(), epsilon = 0.01);
        assert_relative_eq!(p.pos.y, 130.0 * 1.0f32.sin(), epsilon = 0.01);
    }

    #[test]
    fn comet_expires_after_exactly_its_life_span() {
        let mut w = quiet_world();
        w.comets.push(Comet {
            pos: Vec2::new(-400.0, 0.0),
            vel: Vec2::new(5.0, 0.0),
            life: 50,
        });
        for tick in 1..=50 {
            w.advance();
            if tick < 50 {
                assert_eq!(w.comets.len(), 1, "gone early at tick {tick}");
            }
        }
        assert!(w.comets.is_empty(), "still alive after 50 ticks");
        // removal is idempotent: further ticks do nothing to it
        w.advance();
        assert!(w.comets.is_empty());
    }

    #[test]
    fn comet_moves_in_a_straight_line() {
        let mut w = quiet_world();
        w.comets.push(Comet {
            pos: Vec2::new(0.0, 0.0),
            vel: Vec2::new(3.0, -4.0),
            life: 10,
        });
        for i in 1..=3 {
            w.advance();
            let c = &w.comets[0];
            assert_relative_eq!(c.pos.x, 3.0 * i as f32, epsilon = 1e-5);
            assert_relative_eq!(c.pos.y, -4.0 * i as f32, epsilon = 1e-5);
        }
    }

    #[test]
    fn comet_spawn_probability_extremes() {
        let mut never = quiet_world();
        for _ in 0..200 {
            never.advance();
        }
        assert!(never.comets.is_empty());

        let mut always = test_world();
        always.comet_spawn_chance = 1.0;
        always.comet_life = (1000, 1000);
        for _ in 0..10 {
            always.advance();
        }
        assert_eq!(always.comets.len(), 10);
    }

    #[test]
    fn hover_toggles_labels_at_the_threshold() {
        let mut w = quiet_world();
        let pos = w.planets[0].pos;
        let threshold = w.hover_threshold;

        w.pointer_moved(pos.add(Vec2::new(threshold - 0.5, 0.0)));
        assert!(w.planets[0].label_visible);

        w.pointer_moved(pos.add(Vec2::new(threshold + 0.5, 0.0)));
        assert!(!w.planets[0].label_visible);

        // exactly on the boundary is outside (strict less-than)
        w.pointer_moved(pos.add(Vec2::new(threshold, 0.0)));
        assert!(!w.planets[0].label_visible);
    }

    #[test]
    fn click_opens_panel_with_stored_fields() {
        let mut w = quiet_world();
        let earth = 2;
        w.clicked(w.planets[earth].pos);
        assert_eq!(w.panel, Some(InfoPanel { planet: earth }));
        let lines = w.panel_lines().unwrap();
        assert_eq!(lines[0], "Name:   Earth");
        assert_eq!(lines[1], "Radius: 130");
        assert_eq!(lines[2], "Speed:  0.0010");
        assert_eq!(lines[3], "Color:  blue");
    }

    #[test]
    fn any_click_clears_an_open_panel() {
        let mut w = quiet_world();
        w.clicked(w.planets[0].pos);
        assert!(w.panel.is_some());
        // second click, even on a planet, just clears
        w.clicked(w.planets[3].pos);
        assert!(w.panel.is_none());
    }

    #[test]
    fn miss_click_is_a_no_op_when_no_panel_is_open() {
        let mut w = quiet_world();
        w.clicked(Vec2::new(9_000.0, 9_000.0));
        assert!(w.panel.is_none());
    }

    #[test]
    fn hit_test_first_match_wins() {
        let mut w = quiet_world();
        let spot = Vec2::new(55.0, 55.0);
        w.planets[4].pos = spot;
        w.planets[6].pos = spot;
        assert_eq!(hit_test(&w.planets, spot, w.hover_threshold), Some(4));
    }

    #[test]
    fn same_seed_same_world() {
        let a = test_world();
        let b = test_world();
        for (pa, pb) in a.planets.iter().zip(&b.planets) {
            assert_eq!(pa.angle, pb.angle);
        }
        for (ba, bb) in a.belts.iter().zip(&b.belts) {
            for (oa, ob) in ba.iter().zip(bb) {
                assert_eq!(oa.radius, ob.radius);
                assert_eq!(oa.speed, ob.speed);
            }
        }
    }
}
