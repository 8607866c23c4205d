use crate::model::Rgb;
use anyhow::{ensure, Result};

#[derive(Clone, Debug)]
pub(crate) struct Settings {
    pub(crate) fps_cap: u32,
    pub(crate) seed: u64,
    pub(crate) star_count: usize,
    pub(crate) hover_threshold: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps_cap: 30,
            seed: 0x50_1A12,
            star_count: 140,
            hover_threshold: 20.0,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct PlanetDef {
    pub(crate) name: &'static str,
    pub(crate) radius: f32,
    pub(crate) speed: f32,
    pub(crate) size: f32,
    pub(crate) color_name: &'static str,
    pub(crate) color: Rgb,
}

#[derive(Clone, Debug)]
pub(crate) struct MoonDef {
    pub(crate) parent: usize,
    pub(crate) radius: f32,
    pub(crate) speed: f32,
    pub(crate) color: Rgb,
}

#[derive(Clone, Debug)]
pub(crate) struct RingDef {
    pub(crate) parent: usize,
    pub(crate) radii: Vec<f32>,
    pub(crate) color: Rgb,
}

#[derive(Clone, Debug)]
pub(crate) struct BeltDef {
    pub(crate) count: usize,
    pub(crate) radius: (f32, f32),
    pub(crate) speed: (f32, f32),
    pub(crate) color: Rgb,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct CometRules {
    pub(crate) spawn_chance: f32,
    pub(crate) speed: f32,
    pub(crate) life: (u32, u32),
}

#[derive(Clone, Debug)]
pub(crate) struct SystemConfig {
    pub(crate) planets: Vec<PlanetDef>,
    pub(crate) moons: Vec<MoonDef>,
    pub(crate) rings: Vec<RingDef>,
    pub(crate) belts: Vec<BeltDef>,
    pub(crate) comets: CometRules,
}

impl SystemConfig {
    /// Rejects geometry the simulation cannot represent. Runs before the
    /// terminal is touched so a bad table aborts with a plain diagnostic.
    pub(crate) fn validate(&self) -> Result<()> {
        ensure!(!self.planets.is_empty(), "system has no planets");
        for p in &self.planets {
            ensure!(p.radius > 0.0, "planet {}: orbit radius must be positive", p.name);
            ensure!(p.size > 0.0, "planet {}: size must be positive", p.name);
        }
        for (i, m) in self.moons.iter().enumerate() {
            ensure!(m.parent < self.planets.len(), "moon {i}: parent index out of range");
            ensure!(m.radius > 0.0, "moon {i}: orbit radius must be positive");
        }
        for (i, r) in self.rings.iter().enumerate() {
            ensure!(r.parent < self.planets.len(), "ring {i}: parent index out of range");
            ensure!(!r.radii.is_empty(), "ring {i}: radii list is empty");
            for &radius in &r.radii {
                ensure!(radius > 0.0, "ring {i}: radius must be positive");
            }
        }
        for (i, b) in self.belts.iter().enumerate() {
            ensure!(b.radius.0 > 0.0 && b.radius.0 < b.radius.1, "belt {i}: bad radius band");
            ensure!(b.speed.0 > 0.0 && b.speed.0 < b.speed.1, "belt {i}: bad speed range");
        }
        ensure!(
            (0.0..=1.0).contains(&self.comets.spawn_chance),
            "comet spawn chance must be a probability"
        );
        ensure!(self.comets.speed > 0.0, "comet speed must be positive");
        ensure!(
            self.comets.life.0 > 0 && self.comets.life.0 <= self.comets.life.1,
            "bad comet life span range"
        );
        Ok(())
    }

    /// Farthest orbit anything reaches, with a little margin for comets.
    pub(crate) fn extent(&self) -> f32 {
        let mut e: f32 = 0.0;
        for p in &self.planets {
            e = e.max(p.radius);
        }
        for b in &self.belts {
            e = e.max(b.radius.1);
        }
        e * 1.08
    }

    pub(crate) fn default_system() -> Self {
        let grey = Rgb { r: 150, g: 150, b: 150 };
        let white = Rgb { r: 230, g: 235, b: 240 };
        Self {
            planets: vec![
                PlanetDef {
                    name: "Mercury",
                    radius: 40.0,
                    speed: 0.005,
                    size: 0.5,
                    color_name: "grey",
                    color: grey,
                },
                PlanetDef {
                    name: "Venus",
                    radius: 80.0,
                    speed: 0.003,
                    size: 0.8,
                    color_name: "orange",
                    color: Rgb { r: 235, g: 155, b: 50 },
                },
                PlanetDef {
                    name: "Earth",
                    radius: 130.0,
                    speed: 0.001,
                    size: 1.0,
                    color_name: "blue",
                    color: Rgb { r: 70, g: 130, b: 235 },
                },
                PlanetDef {
                    name: "Mars",
                    radius: 150.0,
                    speed: 0.0007,
                    size: 0.6,
                    color_name: "red",
                    color: Rgb { r: 220, g: 80, b: 60 },
                },
                PlanetDef {
                    name: "Jupiter",
                    radius: 180.0,
                    speed: 0.002,
                    size: 2.0,
                    color_name: "brown",
                    color: Rgb { r: 180, g: 130, b: 80 },
                },
                PlanetDef {
                    name: "Saturn",
                    radius: 230.0,
                    speed: 0.0018,
                    size: 1.5,
                    color_name: "pink",
                    color: Rgb { r: 235, g: 170, b: 170 },
                },
                PlanetDef {
                    name: "Uranus",
                    radius: 250.0,
                    speed: 0.0016,
                    size: 1.2,
                    color_name: "light blue",
                    color: Rgb { r: 140, g: 210, b: 235 },
                },
                PlanetDef {
                    name: "Neptune",
                    radius: 280.0,
                    speed: 0.0005,
                    size: 1.1,
                    color_name: "purple",
                    color: Rgb { r: 150, g: 110, b: 220 },
                },
            ],
            moons: vec![
                // Earth's moon
                MoonDef { parent: 2, radius: 12.0, speed: 0.03, color: white },
                // the four big Jovian moons, decorative radii
                MoonDef { parent: 4, radius: 14.0, speed: 0.05, color: Rgb { r: 240, g: 220, b: 150 } },
                MoonDef { parent: 4, radius: 18.0, speed: 0.035, color: white },
                MoonDef { parent: 4, radius: 22.0, speed: 0.025, color: Rgb { r: 190, g: 180, b: 160 } },
                MoonDef { parent: 4, radius: 26.0, speed: 0.018, color: grey },
            ],
            rings: vec![RingDef {
                parent: 5,
                radii: vec![10.0, 15.0, 20.0],
                color: white,
            }],
            belts: vec![
                // asteroid belt between Mars and Jupiter
                BeltDef {
                    count: 100,
                    radius: (160.0, 180.0),
                    speed: (0.002, 0.005),
                    color: grey,
                },
                // Kuiper belt beyond Neptune
                BeltDef {
                    count: 50,
                    radius: (300.0, 400.0),
                    speed: (0.001, 0.003),
                    color: Rgb { r: 120, g: 130, b: 145 },
                },
            ],
            comets: CometRules {
                spawn_chance: 0.004,
                speed: 5.0,
                life: (60, 160),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_system_is_valid() {
        SystemConfig::default_system().validate().unwrap();
    }

    #[test]
    fn rejects_negative_orbit_radius() {
        let mut cfg = SystemConfig::default_system();
        cfg.planets[0].radius = -40.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_empty_ring_radii() {
        let mut cfg = SystemConfig::default_system();
        cfg.rings[0].radii.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_moon_parent() {
        let mut cfg = SystemConfig::default_system();
        cfg.moons[0].parent = cfg.planets.len();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_inverted_belt_band() {
        let mut cfg = SystemConfig::default_system();
        cfg.belts[0].radius = (180.0, 160.0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_comet_life() {
        let mut cfg = SystemConfig::default_system();
        cfg.comets.life = (0, 10);
        assert!(cfg.validate().is_err());
    }
}
