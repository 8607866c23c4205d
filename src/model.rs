use crate::config::{Settings, SystemConfig};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Vec2 {
    pub(crate) x: f32,
    pub(crate) y: f32,
}

impl Vec2 {
    pub(crate) const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub(crate) fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
    pub(crate) fn add(self, o: Vec2) -> Vec2 {
        Vec2 { x: self.x + o.x, y: self.y + o.y }
    }
    pub(crate) fn sub(self, o: Vec2) -> Vec2 {
        Vec2 { x: self.x - o.x, y: self.y - o.y }
    }
    pub(crate) fn len(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
    pub(crate) fn dist(self, o: Vec2) -> f32 {
        self.sub(o).len()
    }
    /// Point on a circle of radius `r` at angle `a`, relative to origin.
    pub(crate) fn on_circle(r: f32, a: f32) -> Vec2 {
        Vec2 { x: r * a.cos(), y: r * a.sin() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

#[derive(Clone, Debug)]
pub(crate) struct Planet {
    pub(crate) name: &'static str,
    pub(crate) radius: f32,
    pub(crate) angle: f32,
    pub(crate) speed: f32,
    pub(crate) size: f32,
    pub(crate) color_name: &'static str,
    pub(crate) color: Rgb,
    pub(crate) pos: Vec2,
    pub(crate) label_visible: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct Moon {
    pub(crate) parent: usize,
    pub(crate) radius: f32,
    pub(crate) angle: f32,
    pub(crate) speed: f32,
    pub(crate) color: Rgb,
    pub(crate) pos: Vec2,
}

#[derive(Clone, Debug)]
pub(crate) struct BeltObject {
    pub(crate) radius: f32,
    pub(crate) angle: f32,
    pub(crate) speed: f32,
    pub(crate) pos: Vec2,
}

#[derive(Clone, Debug)]
pub(crate) struct Comet {
    pub(crate) pos: Vec2,
    pub(crate) vel: Vec2,
    pub(crate) life: u32,
}

#[derive(Clone, Debug)]
pub(crate) struct Ring {
    pub(crate) parent: usize,
    pub(crate) radii: Vec<f32>,
    pub(crate) color: Rgb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct InfoPanel {
    pub(crate) planet: usize,
}

pub(crate) struct World {
    pub(crate) sun: Vec2,
    pub(crate) planets: Vec<Planet>,
    pub(crate) moons: Vec<Moon>,
    pub(crate) rings: Vec<Ring>,
    pub(crate) belts: Vec<Vec<BeltObject>>,
    pub(crate) belt_colors: Vec<Rgb>,
    pub(crate) comets: Vec<Comet>,
    pub(crate) panel: Option<InfoPanel>,
    pub(crate) ticks: u64,
    pub(crate) extent: f32,
    pub(crate) hover_threshold: f32,
    pub(crate) comet_spawn_chance: f32,
    pub(crate) comet_speed: f32,
    pub(crate) comet_life: (u32, u32),
    pub(crate) rng: StdRng,
}

impl World {
    pub(crate) fn new(config: &SystemConfig, settings: &Settings) -> Self {
        let mut rng = StdRng::seed_from_u64(settings.seed);

        let planets: Vec<Planet> = config
            .planets
            .iter()
            .map(|def| {
                let angle = rng.gen_range(0.0..2.0 * PI);
                Planet {
                    name: def.name,
                    radius: def.radius,
                    angle,
                    speed: def.speed,
                    size: def.size,
                    color_name: def.color_name,
                    color: def.color,
                    pos: Vec2::on_circle(def.radius, angle),
                    label_visible: false,
                }
            })
            .collect();

        let moons: Vec<Moon> = config
            .moons
            .iter()
            .map(|def| {
                let angle = rng.gen_range(0.0..2.0 * PI);
                Moon {
                    parent: def.parent,
                    radius: def.radius,
                    angle,
                    speed: def.speed,
                    color: def.color,
                    pos: planets[def.parent].pos.add(Vec2::on_circle(def.radius, angle)),
                }
            })
            .collect();

        let rings: Vec<Ring> = config
            .rings
            .iter()
            .map(|def| Ring {
                parent: def.parent,
                radii: def.radii.clone(),
                color: def.color,
            })
            .collect();

        let mut belts = Vec::new();
        let mut belt_colors = Vec::new();
        for def in &config.belts {
            let mut objects = Vec::with_capacity(def.count);
            for _ in 0..def.count {
                let radius = rng.gen_range(def.radius.0..def.radius.1);
                let angle = rng.gen_range(0.0..2.0 * PI);
                // speed drawn once here and held for the object's lifetime
                let speed = rng.gen_range(def.speed.0..def.speed.1);
                objects.push(BeltObject {
                    radius,
                    angle,
                    speed,
                    pos: Vec2::on_circle(radius, angle),
                });
            }
            belts.push(objects);
            belt_colors.push(def.color);
        }

        let extent = config.extent();

        Self {
            sun: Vec2::ZERO,
            planets,
            moons,
            rings,
            belts,
            belt_colors,
            comets: Vec::new(),
            panel: None,
            ticks: 0,
            extent,
            hover_threshold: settings.hover_threshold,
            comet_spawn_chance: config.comets.spawn_chance,
            comet_speed: config.comets.speed,
            comet_life: config.comets.life,
            rng,
        }
    }
}
