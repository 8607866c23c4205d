use crate::config::{Settings, SystemConfig};
use crate::input::{collect_actions, Action};
use crate::model::World;
use crate::render::{build_stars, draw_info_panel, draw_status, draw_world, paint_stars, Camera, Star, Terminal};
use std::time::{Duration, Instant};

pub(crate) struct App {
    settings: Settings,
    world: World,
    term: Terminal,
    camera: Camera,
    stars: Vec<Star>,
    star_seed: u64,
    show_orbits: bool,
    force_labels: bool,
    paused: bool,
    should_quit: bool,
}

impl App {
    fn init() -> anyhow::Result<Self> {
        let settings = Settings::default();
        let config = SystemConfig::default_system();
        config.validate()?;
        let world = World::new(&config, &settings);

        let term = Terminal::begin()?;
        let camera = Camera::fit(term.cols, term.rows, world.extent);
        let star_seed = settings.seed ^ 0x5A17_5A17;
        let stars = build_stars(term.cols, term.rows, settings.star_count, star_seed);

        Ok(Self {
            settings,
            world,
            term,
            camera,
            stars,
            star_seed,
            show_orbits: true,
            force_labels: false,
            paused: false,
            should_quit: false,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let fps = self.settings.fps_cap.clamp(10, 120);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);
        let start = Instant::now();

        while !self.should_quit {
            if self.term.resize_if_needed()? {
                self.camera = Camera::fit(self.term.cols, self.term.rows, self.world.extent);
                self.stars = build_stars(
                    self.term.cols,
                    self.term.rows,
                    self.settings.star_count,
                    self.star_seed,
                );
            }

            let frame_start = Instant::now();
            for action in collect_actions(frame_dt)? {
                self.apply(action);
            }

            if !self.paused {
                self.world.advance();
            }

            self.term.cur.clear();
            paint_stars(&mut self.term.cur, &self.stars, start.elapsed().as_secs_f32());
            draw_world(
                &mut self.term.cur,
                &self.camera,
                &self.world,
                self.show_orbits,
                self.force_labels,
            );
            draw_info_panel(&mut self.term.cur, &self.world);
            draw_status(&mut self.term.cur, &self.world, self.paused);
            self.term.present()?;

            spin_sleep(frame_dt, frame_start);
        }

        self.term.end()?;
        Ok(())
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::TogglePause => self.paused = !self.paused,
            Action::ToggleOrbits => self.show_orbits = !self.show_orbits,
            Action::ToggleLabels => self.force_labels = !self.force_labels,
            Action::ReseedStars => {
                self.star_seed = self.star_seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                self.stars = build_stars(
                    self.term.cols,
                    self.term.rows,
                    self.settings.star_count,
                    self.star_seed,
                );
            }
            Action::PointerMoved { col, row } => {
                let p = self.camera.to_world(col, row);
                self.world.pointer_moved(p);
            }
            Action::Click { col, row } => {
                let p = self.camera.to_world(col, row);
                self.world.clicked(p);
            }
        }
    }
}

pub(crate) fn run() -> anyhow::Result<()> {
    let mut app = App::init()?;
    let res = app.run();
    if res.is_err() {
        // unwind path: run() only reaches term.end() on clean exit
        let _ = app.term.end();
    }
    res
}

/* -----------------------------
   Frame pacing helper
------------------------------ */

fn spin_sleep(target: Duration, frame_start: Instant) {
    let end = frame_start + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
