//! Session state: the pack, its cards, intents and the camera, advanced one
//! frame at a time.

use crate::camera::{Camera, OrbitControls};
use crate::constants::*;
use crate::drivers::{animate_card_flips, animate_pack};
use crate::entities::{create_card, create_pack, fan_angle, Card, Pack, Scatter};
use crate::error::{ConfigError, Result};
use crate::interaction::{resolve_click, ClickIntent};
use crate::material::TextureRegistry;
use crate::picking::pick_card;
use crate::viewport::{Layout, Viewport, ViewportClass};
use glam::Vec2;
use rand::prelude::*;

/// Asset paths and the seed for per-card scatter.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub card_fronts: Vec<String>,
    pub card_back: String,
    pub pack_front: String,
    pub pack_back: String,
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            card_fronts: vec![
                "./public/cards/MangaWembyAmazingBlock.png".into(),
                "./public/cards/PinkRiriCourtSide.png".into(),
                "./public/cards/MangaPrimeMJJumpGold.png".into(),
                "./public/cards/MangaReggieChokeGold.png".into(),
            ],
            card_back: "./public/cards/Back.png".into(),
            pack_front: "./public/Package/packagefronte.png".into(),
            pack_back: "./public/Package/packageretro.png".into(),
            seed: 42,
        }
    }
}

/// Result of a single frame step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameState {
    pub hovered: Option<usize>,
    pub reveal: f32,
}

pub struct Session {
    pub pack: Pack,
    pub cards: Vec<Card>,
    /// Where the pack is heading: 0 sealed, 1 open.
    pub target_open: f32,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub viewport: Viewport,
    pub textures: TextureRegistry,
    pointer: Option<Vec2>,
    hovered: Option<usize>,
}

impl Session {
    pub fn new(config: &SceneConfig, viewport: Viewport) -> Result<Self> {
        if config.card_fronts.is_empty() {
            return Err(ConfigError::EmptyDeck);
        }
        let mut textures = TextureRegistry::new();
        let back = textures.url(&config.card_back);
        let pack_front = textures.url(&config.pack_front);
        let pack_back = textures.url(&config.pack_back);
        let crimp = textures.crimp();

        let pack = create_pack(pack_front, pack_back, crimp)?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let n = config.card_fronts.len();
        let mut cards = Vec::with_capacity(n);
        for (i, path) in config.card_fronts.iter().enumerate() {
            let mut card = create_card(i, textures.url(path), back)?;
            card.base_angle = fan_angle(i, n);
            card.scatter = Scatter {
                x: (rng.gen::<f32>() - 0.5) * SCATTER_X_SPAN,
                z: SCATTER_Z_MIN + rng.gen::<f32>() * SCATTER_Z_SPAN,
                y: rng.gen::<f32>() * SCATTER_Y_SPAN,
            };
            cards.push(card);
        }

        let mut camera = Camera::default();
        camera.set_viewport(viewport.width, viewport.height);
        let controls = OrbitControls::new(&camera);
        let mut session = Self {
            pack,
            cards,
            target_open: 0.0,
            camera,
            controls,
            viewport,
            textures,
            pointer: None,
            hovered: None,
        };
        session.apply_layout(true);
        log::info!(
            "[pack] session ready: {} cards, {:?} layout",
            session.cards.len(),
            session.viewport.class
        );
        Ok(session)
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.viewport.class.layout()
    }

    #[inline]
    pub fn class(&self) -> ViewportClass {
        self.viewport.class
    }

    /// Fully open once progress is within tolerance of 1; damping never
    /// reaches it exactly.
    #[inline]
    pub fn pack_is_open(&self) -> bool {
        self.pack.open_progress >= 1.0 - PROGRESS_EPSILON
    }

    /// Pointer position in normalised device coordinates; `None` once the
    /// pointer leaves the canvas.
    pub fn set_pointer(&mut self, ndc: Option<Vec2>) {
        self.pointer = ndc;
    }

    #[inline]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Card under the pointer for the current transforms.
    pub fn card_under_pointer(&self) -> Option<usize> {
        self.card_at(self.pointer?)
    }

    /// Card under an arbitrary NDC position.
    pub fn card_at(&self, ndc: Vec2) -> Option<usize> {
        let ray = self.camera.ray_from_ndc(ndc);
        pick_card(&ray, &self.cards).map(|(i, _)| i)
    }

    /// Ask the pack to open; used by the click path and the UI button.
    pub fn open_pack(&mut self) {
        if self.target_open != 1.0 {
            log::info!("[pack] opening");
        }
        self.target_open = 1.0;
    }

    pub fn resolve_click(&self) -> ClickIntent {
        let hit = if self.pack_is_open() {
            self.card_under_pointer()
        } else {
            None
        };
        resolve_click(self.pack_is_open(), hit)
    }

    /// Resolve and apply a click at the tracked pointer. Only targets
    /// change here.
    pub fn click(&mut self) -> ClickIntent {
        let intent = self.resolve_click();
        self.apply_click(intent)
    }

    /// Resolve and apply a click at `ndc`, independent of the tracked
    /// pointer. A touch tap has already left the canvas by the time its
    /// click arrives.
    pub fn click_at(&mut self, ndc: Vec2) -> ClickIntent {
        let open = self.pack_is_open();
        let hit = if open { self.card_at(ndc) } else { None };
        self.apply_click(resolve_click(open, hit))
    }

    fn apply_click(&mut self, intent: ClickIntent) -> ClickIntent {
        match intent {
            ClickIntent::OpenPack => self.open_pack(),
            ClickIntent::ToggleFlip(i) => {
                if let Some(card) = self.cards.get_mut(i) {
                    card.toggle_flip();
                    log::info!("[click] card {} -> target {}", i, card.flip_target);
                }
            }
            ClickIntent::None => {}
        }
        intent
    }

    /// Track a viewport resize. Returns true when the viewport class changed.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let next = Viewport::new(width, height);
        let class_changed = next.class != self.viewport.class;
        self.viewport = next;
        self.camera.set_viewport(next.width, next.height);
        self.apply_layout(class_changed);
        if class_changed {
            log::info!("[viewport] switched to {:?} layout", next.class);
        }
        class_changed
    }

    /// Push layout parameters into the controls and pack. The camera is only
    /// moved to the layout pose when `reposition` is set, so user orbiting
    /// survives resizes within one class.
    fn apply_layout(&mut self, reposition: bool) {
        let layout = self.layout();
        self.controls.min_distance = layout.min_distance;
        self.controls.max_distance = layout.max_distance;
        self.controls.enable_pan = layout.enable_pan;
        self.pack.scale = layout.pack_scale;
        if reposition {
            self.camera.eye = layout.camera_position;
            self.camera.target = ORBIT_TARGET;
            self.controls.save_state(&self.camera);
        }
    }

    /// Return pack, cards and camera to their initial state.
    pub fn reset(&mut self) {
        self.target_open = 0.0;
        self.pack.open_progress = 0.0;
        for card in &mut self.cards {
            card.reset();
        }
        self.controls.reset(&mut self.camera);
        self.camera.target = ORBIT_TARGET;
        log::info!("[pack] reset");
    }

    /// One frame: controls, hover, pack driver, flip driver, in that order.
    pub fn step(&mut self, dt: f32) -> FrameState {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.controls.update(&mut self.camera);
        self.hovered = self.card_under_pointer();
        let reveal = animate_pack(&mut self.pack, &mut self.cards, self.target_open, dt);
        animate_card_flips(&mut self.cards, dt);
        FrameState {
            hovered: self.hovered,
            reveal,
        }
    }
}
