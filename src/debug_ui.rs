// Debug UI collector + viewer.
//
// This module intentionally prioritizes programmer ergonomics for debugging.
// Callers should be able to drop in one-liner `add_*()` calls anywhere,
// and a single `show()` at the end to inspect everything.
//
// When the `debug_ui` feature is disabled (or `cli_only` is enabled), all APIs
// in this module become no-ops.

#[cfg(all(feature = "debug_ui", not(feature = "cli_only")))]
mod imp {
    use crate::im::{Lum8Im, RGBAIm};
    use crate::march::Segment;
    use eframe::egui;
    use std::sync::{Mutex, OnceLock};

    #[derive(Clone, Debug)]
    struct DebugItem {
        title: String,
        w: usize,
        h: usize,
        // Pre-rendered RGBA8, packed (stride == w*4).
        rgba: Vec<u8>,
        // Segment overlay painted on top of the image at view scale.
        segments: Vec<Segment>,
    }

    #[derive(Default)]
    struct DebugUiState {
        title: String,
        items: Vec<DebugItem>,
    }

    fn global_state() -> &'static Mutex<DebugUiState> {
        static G: OnceLock<Mutex<DebugUiState>> = OnceLock::new();
        G.get_or_init(|| {
            Mutex::new(DebugUiState {
                title: "riso debug".to_owned(),
                items: Vec::new(),
            })
        })
    }

    fn lum8_to_rgba(im: &Lum8Im) -> Vec<u8> {
        let maxv = im
            .arr
            .iter()
            .copied()
            .max()
            .unwrap_or(0)
            .max(1) as f32;
        let mut out = vec![0u8; im.w * im.h * 4];
        for y in 0..im.h {
            for x in 0..im.w {
                let v = unsafe { *im.get_unchecked(x, y, 0) } as f32;
                let scaled = ((v / maxv) * 255.0).clamp(0.0, 255.0) as u8;
                let base = (y * im.w + x) * 4;
                out[base] = scaled;
                out[base + 1] = scaled;
                out[base + 2] = scaled;
                out[base + 3] = 255;
            }
        }
        out
    }

    fn pack_rgba(im: &RGBAIm) -> Vec<u8> {
        let mut out = vec![0u8; im.w * im.h * 4];
        for y in 0..im.h {
            let row0 = y * im.s;
            out[y * im.w * 4..(y + 1) * im.w * 4].copy_from_slice(&im.arr[row0..row0 + im.w * 4]);
        }
        out
    }

    // Public API (collector)
    // -------------------------------------------------------------------------

    pub fn init(title: &str) {
        let mut g = global_state().lock().unwrap();
        g.title = title.to_owned();
        g.items.clear();
    }

    pub fn add_lum8(title: &str, im: &Lum8Im) {
        let rgba = lum8_to_rgba(im);
        let mut g = global_state().lock().unwrap();
        g.items.push(DebugItem {
            title: title.to_owned(),
            w: im.w,
            h: im.h,
            rgba,
            segments: Vec::new(),
        });
    }

    pub fn add_rgba(title: &str, im: &RGBAIm) {
        let rgba = pack_rgba(im);
        let mut g = global_state().lock().unwrap();
        g.items.push(DebugItem {
            title: title.to_owned(),
            w: im.w,
            h: im.h,
            rgba,
            segments: Vec::new(),
        });
    }

    /// Grayscale base image with the extracted segments painted on top.
    pub fn add_segments(title: &str, base: &Lum8Im, segments: &[Segment]) {
        let rgba = lum8_to_rgba(base);
        let mut g = global_state().lock().unwrap();
        g.items.push(DebugItem {
            title: title.to_owned(),
            w: base.w,
            h: base.h,
            rgba,
            segments: segments.to_vec(),
        });
    }

    pub fn show() {
        let (title, items) = {
            let g = global_state().lock().unwrap();
            (g.title.clone(), g.items.clone())
        };
        if items.is_empty() {
            return;
        }

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size(egui::vec2(1200.0, 800.0)),
            ..Default::default()
        };
        let _ = eframe::run_native(
            &title,
            options,
            Box::new(move |_cc| Ok(Box::new(GalleryApp::new(items)))),
        );
    }

    // Viewer
    // -------------------------------------------------------------------------

    struct GalleryApp {
        items: Vec<DebugItem>,
        selected: usize,
        zoom: f32,
        texture: Option<egui::TextureHandle>,
        texture_of: usize,
        hover_text: String,
    }

    impl GalleryApp {
        fn new(items: Vec<DebugItem>) -> Self {
            Self {
                items,
                selected: 0,
                zoom: 4.0,
                texture: None,
                texture_of: usize::MAX,
                hover_text: String::new(),
            }
        }

        fn render_if_needed(&mut self, ctx: &egui::Context) {
            if self.texture_of == self.selected && self.texture.is_some() {
                return;
            }
            let item = &self.items[self.selected];
            let img = egui::ColorImage::from_rgba_unmultiplied([item.w, item.h], &item.rgba);
            match &mut self.texture {
                Some(tex) => tex.set(img, egui::TextureOptions::NEAREST),
                None => {
                    self.texture =
                        Some(ctx.load_texture("riso_debug", img, egui::TextureOptions::NEAREST))
                }
            }
            self.texture_of = self.selected;
        }

        fn tag_color(tag: u32) -> egui::Color32 {
            if tag == 0 {
                return egui::Color32::from_rgb(255, 40, 40);
            }
            egui::Color32::from_rgba_unmultiplied(
                (tag >> 24) as u8,
                (tag >> 16) as u8,
                (tag >> 8) as u8,
                tag as u8,
            )
        }
    }

    impl eframe::App for GalleryApp {
        fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
                self.selected = (self.selected + 1) % self.items.len();
            }
            if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
                self.selected = (self.selected + self.items.len() - 1) % self.items.len();
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Plus)) {
                self.zoom = (self.zoom * 2.0).min(32.0);
            }
            if ctx.input(|i| i.key_pressed(egui::Key::Minus)) {
                self.zoom = (self.zoom * 0.5).max(0.25);
            }

            self.render_if_needed(ctx);

            egui::SidePanel::left("items").show(ctx, |ui| {
                for (i, item) in self.items.iter().enumerate() {
                    if ui
                        .selectable_label(i == self.selected, &item.title)
                        .clicked()
                    {
                        self.selected = i;
                    }
                }
            });

            egui::TopBottomPanel::top("top").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let item = &self.items[self.selected];
                    ui.label(&item.title);
                    ui.separator();
                    ui.monospace(format!(
                        "{}x{} zoom={:.2} segs={}",
                        item.w,
                        item.h,
                        self.zoom,
                        item.segments.len()
                    ));
                    if !self.hover_text.is_empty() {
                        ui.separator();
                        ui.monospace(&self.hover_text);
                    }
                });
            });

            egui::CentralPanel::default().show(ctx, |ui| {
                let item = &self.items[self.selected];
                let Some(tex) = &self.texture else { return };

                let image_size = egui::vec2(
                    item.w as f32 * self.zoom,
                    item.h as f32 * self.zoom,
                );
                let response = ui.add(egui::Image::new((tex.id(), image_size)));
                let rect = response.rect;

                // Segment overlay, pixel coords -> screen coords.
                let painter = ui.painter_at(rect);
                for seg in &item.segments {
                    let to_screen = |x: f32, y: f32| {
                        egui::pos2(rect.left() + x * self.zoom, rect.top() + y * self.zoom)
                    };
                    painter.line_segment(
                        [to_screen(seg.a.x, seg.a.y), to_screen(seg.b.x, seg.b.y)],
                        egui::Stroke::new(1.5, Self::tag_color(seg.tag)),
                    );
                }

                if response.hovered() {
                    if let Some(pos) = response.hover_pos() {
                        let fx = ((pos.x - rect.left()) / rect.width()).clamp(0.0, 0.999_999);
                        let fy = ((pos.y - rect.top()) / rect.height()).clamp(0.0, 0.999_999);
                        let x = (fx * (item.w as f32)) as usize;
                        let y = (fy * (item.h as f32)) as usize;

                        let base = (y * item.w + x) * 4;
                        let r = item.rgba[base];
                        let g = item.rgba[base + 1];
                        let b = item.rgba[base + 2];
                        let a = item.rgba[base + 3];
                        self.hover_text = format!("x={x} y={y} rgba8({r},{g},{b},{a})");
                    }
                }
            });

            // Keep repainting so hover text updates smoothly.
            ctx.request_repaint();
        }
    }
}

/// No-op implementations when debug_ui feature is disabled or cli_only is enabled.
#[cfg(not(all(feature = "debug_ui", not(feature = "cli_only"))))]
mod imp {
    use crate::im::{Lum8Im, RGBAIm};
    use crate::march::Segment;

    pub fn init(_title: &str) {}

    pub fn add_lum8(_title: &str, _im: &Lum8Im) {}
    pub fn add_rgba(_title: &str, _im: &RGBAIm) {}
    pub fn add_segments(_title: &str, _base: &Lum8Im, _segments: &[Segment]) {}

    pub fn show() {}
}

pub use imp::*;
