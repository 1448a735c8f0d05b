//! Browser backend: canvas 2d surfaces and DOM asset loading

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlAudioElement, HtmlCanvasElement, HtmlImageElement};

use crate::assets::{AssetManifest, AssetProvider, ImageKey, SoundKey};
use crate::consts::SCORE_FONT;
use crate::error::PlatformError;
use crate::sim::{Canvas, CollisionSurface, Rect, Rgb, SpriteDraw};

impl From<JsValue> for PlatformError {
    fn from(value: JsValue) -> Self {
        PlatformError::Js(format!("{value:?}"))
    }
}

type ReadyCallback = Box<dyn FnOnce()>;

/// Images and sounds loaded through DOM elements
///
/// Ready once every image has fired `load` and every sound has fired
/// `canplaythrough`. There is no timeout.
pub struct WebAssets {
    images: HashMap<ImageKey, HtmlImageElement>,
    sounds: HashMap<SoundKey, HtmlAudioElement>,
    remaining: Rc<Cell<usize>>,
    on_ready: Rc<RefCell<Option<ReadyCallback>>>,
}

impl WebAssets {
    /// Start fetching everything in the manifest
    pub fn load(manifest: &AssetManifest) -> Rc<Self> {
        let remaining = Rc::new(Cell::new(manifest.len()));
        let on_ready: Rc<RefCell<Option<ReadyCallback>>> = Rc::new(RefCell::new(None));

        let signal = {
            let remaining = remaining.clone();
            let on_ready = on_ready.clone();
            Rc::new(move || {
                let left = remaining.get().saturating_sub(1);
                remaining.set(left);
                if left == 0 {
                    log::info!("All assets loaded");
                    // Take first so the callback can register listeners freely
                    let callback = on_ready.borrow_mut().take();
                    if let Some(callback) = callback {
                        callback();
                    }
                }
            })
        };

        let mut images = HashMap::new();
        for (key, path) in &manifest.images {
            let Ok(image) = HtmlImageElement::new() else {
                log::warn!("Could not create image element for '{}'", key.as_str());
                continue;
            };
            let signal = signal.clone();
            let mut fired = false;
            let closure = Closure::<dyn FnMut()>::new(move || {
                if !fired {
                    fired = true;
                    signal();
                }
            });
            image.set_onload(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
            image.set_src(path);
            images.insert(*key, image);
        }

        let mut sounds = HashMap::new();
        for (key, path) in &manifest.sounds {
            let Ok(audio) = HtmlAudioElement::new_with_src(path) else {
                log::warn!("Could not create audio element for '{}'", key.as_str());
                continue;
            };
            audio.set_preload("auto");
            let signal = signal.clone();
            let mut fired = false;
            // canplaythrough can fire again after seeking; count it once
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if !fired {
                    fired = true;
                    signal();
                }
            });
            let _ = audio
                .add_event_listener_with_callback("canplaythrough", closure.as_ref().unchecked_ref());
            closure.forget();
            sounds.insert(*key, audio);
        }

        Rc::new(Self {
            images,
            sounds,
            remaining,
            on_ready,
        })
    }

    /// Run `callback` once everything has loaded (immediately if it already has)
    pub fn on_ready(&self, callback: impl FnOnce() + 'static) {
        if self.is_ready() {
            callback();
        } else {
            *self.on_ready.borrow_mut() = Some(Box::new(callback));
        }
    }
}

impl AssetProvider for WebAssets {
    type Image = HtmlImageElement;
    type Sound = HtmlAudioElement;

    fn image(&self, key: ImageKey) -> Option<&HtmlImageElement> {
        self.images.get(&key)
    }

    fn sound(&self, key: SoundKey) -> Option<&HtmlAudioElement> {
        self.sounds.get(&key)
    }

    fn is_ready(&self) -> bool {
        self.remaining.get() == 0
    }
}

/// A `<canvas>` with a 2d context
///
/// The same type backs both the visible canvas and the hidden collision
/// canvas; the latter is created with `willReadFrequently` for fast sampling.
pub struct WebCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    assets: Rc<WebAssets>,
}

impl WebCanvas {
    /// Visible canvas
    pub fn new(canvas: HtmlCanvasElement, assets: Rc<WebAssets>) -> Result<Self, PlatformError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| PlatformError::Js("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| PlatformError::Js("not a 2d context".to_string()))?;
        ctx.set_font(SCORE_FONT);
        Ok(Self { canvas, ctx, assets })
    }

    /// Hidden collision canvas, optimized for pixel readback
    pub fn collision(canvas: HtmlCanvasElement, assets: Rc<WebAssets>) -> Result<Self, PlatformError> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"willReadFrequently".into(), &JsValue::TRUE)?;
        let ctx = canvas
            .get_context_with_context_options("2d", &options)?
            .ok_or_else(|| PlatformError::Js("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| PlatformError::Js("not a 2d context".to_string()))?;
        ctx.set_image_smoothing_enabled(false);
        Ok(Self { canvas, ctx, assets })
    }

    /// Convert client (viewport) coordinates to canvas pixels
    pub fn client_to_canvas(&self, client_x: f64, client_y: f64) -> (f32, f32) {
        let rect = self.canvas.get_bounding_client_rect();
        let scale_x = if rect.width() > 0.0 {
            self.canvas.width() as f64 / rect.width()
        } else {
            1.0
        };
        let scale_y = if rect.height() > 0.0 {
            self.canvas.height() as f64 / rect.height()
        } else {
            1.0
        };
        (
            ((client_x - rect.left()) * scale_x) as f32,
            ((client_y - rect.top()) * scale_y) as f32,
        )
    }

    fn draw_image(&self, image: &HtmlImageElement, src: Rect, dst: Rect) {
        if let Err(e) = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                image,
                src.x as f64,
                src.y as f64,
                src.w as f64,
                src.h as f64,
                dst.x as f64,
                dst.y as f64,
                dst.w as f64,
                dst.h as f64,
            )
        {
            log::warn!("drawImage failed: {:?}", e);
        }
    }
}

impl Canvas for WebCanvas {
    fn width(&self) -> f32 {
        self.canvas.width() as f32
    }

    fn height(&self) -> f32 {
        self.canvas.height() as f32
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        // Whole-pixel edges: a fractional rect would be anti-aliased
        let r = rect.snapped();
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
    }

    fn draw_sprite(&mut self, sprite: &SpriteDraw) {
        let Some(image) = self.assets.image(sprite.image) else {
            return;
        };

        match sprite.rotation {
            Some(rotation) => {
                self.ctx.save();
                let placed = self
                    .ctx
                    .translate(rotation.origin.x as f64, rotation.origin.y as f64)
                    .and_then(|_| self.ctx.rotate(rotation.angle as f64));
                if placed.is_ok() {
                    self.draw_image(image, sprite.src, sprite.dst);
                }
                self.ctx.restore();
            }
            None => self.draw_image(image, sprite.src, sprite.dst),
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: Rgb) {
        self.ctx.set_fill_style_str(&color.to_css());
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }
}

impl CollisionSurface for WebCanvas {
    fn sample(&self, px: f32, py: f32) -> Rgb {
        match self
            .ctx
            .get_image_data(px.floor() as f64, py.floor() as f64, 1.0, 1.0)
        {
            Ok(image_data) => {
                let data = image_data.data();
                match data.0.as_slice() {
                    [r, g, b, ..] => Rgb(*r, *g, *b),
                    _ => Rgb::BACKGROUND,
                }
            }
            Err(e) => {
                log::warn!("getImageData failed: {:?}", e);
                Rgb::BACKGROUND
            }
        }
    }
}
