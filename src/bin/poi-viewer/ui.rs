//! Input wiring and rendering of the viewer.

use crate::PoiViewerApp;
use crate::animator::SurfaceAnimator;
use crate::assets::AssetLoadState;
use crate::colors;
use crate::constants::{
    INFO_CARD_MARGIN, INFO_CARD_MIN_WIDTH, INFO_CARD_PADDING, INFO_CARD_WIDTH_FRACTION,
    MARKER_GLOW_RADIUS, MARKER_HIT_RADIUS, MARKER_RADIUS, MAX_FRAME_DT,
};
use eframe::egui;
use poi_viewer::controller::Marker;
use poi_viewer::{FadeLayer, InfoContent, Scene, ViewController};

/// Where a click landed, topmost layer first.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ClickTarget {
    TitleScreen,
    Overlay { inside_content: bool },
    Marker(usize),
    Nothing,
}

impl PoiViewerApp {
    /// Renders the full-window viewer and feeds input to the controller.
    pub fn show_viewer(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                if let Some(err) = &self.load_error {
                    ui.centered_and_justified(|ui| {
                        ui.colored_label(egui::Color32::LIGHT_RED, format!("Failed to load: {err}"));
                    });
                    return;
                }

                match &self.image {
                    Some(AssetLoadState::Ready(_)) => {}
                    Some(AssetLoadState::Error(msg)) => {
                        ui.centered_and_justified(|ui| {
                            ui.label(format!("Failed to load image: {msg}"));
                        });
                        return;
                    }
                    Some(AssetLoadState::Loading(_)) | None => {
                        ui.centered_and_justified(|ui| ui.spinner());
                        return;
                    }
                }

                let (Some(scene), Some(controller), Some(texture)) =
                    (&self.scene, &mut self.controller, &self.texture)
                else {
                    return;
                };

                let window_rect = ui.max_rect();
                let window_size = window_rect.size();

                // minimized windows report an empty panel
                if window_size.x <= 0.0 || window_size.y <= 0.0 {
                    return;
                }

                if !self.loaded {
                    let texture_size = texture.size_vec2();
                    controller.on_load(window_size, texture_size);
                    self.loaded = true;
                } else if controller.window_size() != window_size {
                    controller.on_resize(window_size);
                }

                let dt = ui.input(|i| i.stable_dt).min(MAX_FRAME_DT);
                controller.applier_mut().tick(dt);

                handle_pointer_moves(ui, controller, window_rect);

                let response = ui.interact(window_rect, egui::Id::new("viewer"), egui::Sense::click());
                if response.clicked()
                    && let Some(pos) = response.interact_pointer_pos()
                {
                    let pos = to_window(window_rect, pos);
                    match click_target(controller, self.info_card_rect, pos) {
                        ClickTarget::TitleScreen => controller.dismiss_title(),
                        ClickTarget::Overlay { inside_content } => {
                            controller.handle_overlay_click(inside_content);
                        }
                        ClickTarget::Marker(index) => {
                            let view_frame = scene.view_frame.rect(window_size);
                            controller.show_point_info(index, view_frame);
                        }
                        ClickTarget::Nothing => {}
                    }
                }

                ui.set_clip_rect(window_rect);
                let painter = ui.painter();

                let animator = controller.applier();
                let surface_rect = animator
                    .surface_rect(window_size, controller.surface_size())
                    .translate(window_rect.min.to_vec2());

                painter.image(
                    texture.id(),
                    surface_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );

                draw_markers(painter, surface_rect, scene, controller.markers());

                self.info_card_rect = draw_info_overlay(painter, window_rect, scene, controller);
                draw_title_screen(painter, window_rect, scene, animator);

                if animator.is_animating() {
                    ctx.request_repaint();
                }
            });
    }
}

/// Converts a screen position into window coordinates.
fn to_window(window_rect: egui::Rect, pos: egui::Pos2) -> egui::Pos2 {
    (pos - window_rect.min).to_pos2()
}

/// Feeds every pointer movement of this frame to the controller.
fn handle_pointer_moves(
    ui: &egui::Ui,
    controller: &mut ViewController<SurfaceAnimator>,
    window_rect: egui::Rect,
) {
    let moves: Vec<egui::Pos2> = ui.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::PointerMoved(pos) => Some(*pos),
                _ => None,
            })
            .collect()
    });

    for pos in moves {
        let surface_rect = controller
            .applier()
            .surface_rect(controller.window_size(), controller.surface_size());
        controller.on_pointer_moved(to_window(window_rect, pos), surface_rect);
    }
}

/// Resolves a click (window coordinates) against the stacked layers.
fn click_target(
    controller: &ViewController<SurfaceAnimator>,
    info_card_rect: Option<egui::Rect>,
    pos: egui::Pos2,
) -> ClickTarget {
    let animator = controller.applier();

    if animator.is_shown(FadeLayer::TitleScreen) {
        return ClickTarget::TitleScreen;
    }

    if animator.is_shown(FadeLayer::InfoOverlay) {
        let inside_content = info_card_rect.is_some_and(|rect| rect.contains(pos));
        return ClickTarget::Overlay { inside_content };
    }

    let surface_rect = animator.surface_rect(controller.window_size(), controller.surface_size());
    controller
        .markers()
        .iter()
        .enumerate()
        .map(|(index, marker)| (index, marker.screen_position(surface_rect).distance(pos)))
        .filter(|(_, distance)| *distance <= MARKER_HIT_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map_or(ClickTarget::Nothing, |(index, _)| ClickTarget::Marker(index))
}

fn draw_markers(painter: &egui::Painter, surface_rect: egui::Rect, scene: &Scene, markers: &[Marker]) {
    for (marker, point) in markers.iter().zip(&scene.points) {
        if marker.opacity <= 0.0 {
            continue;
        }

        let pos = marker.screen_position(surface_rect);
        let opacity = marker.opacity;

        painter.circle_filled(pos, MARKER_GLOW_RADIUS, colors::MARKER_GLOW.gamma_multiply(opacity));
        painter.circle(
            pos,
            MARKER_RADIUS,
            colors::MARKER_FILL.gamma_multiply(opacity),
            egui::Stroke::new(2.0, colors::MARKER_STROKE.gamma_multiply(opacity)),
        );

        let font_id = egui::FontId::proportional(14.0);
        let text_pos = pos + egui::vec2(0.0, MARKER_GLOW_RADIUS + 2.0);

        // Shadow
        painter.text(
            text_pos + egui::vec2(1.0, 1.0),
            egui::Align2::CENTER_TOP,
            &point.name,
            font_id.clone(),
            colors::MARKER_LABEL_SHADOW.gamma_multiply(opacity),
        );
        painter.text(
            text_pos,
            egui::Align2::CENTER_TOP,
            &point.name,
            font_id,
            colors::MARKER_LABEL.gamma_multiply(opacity),
        );
    }
}

/// Draws the backdrop and info card. Returns the card bounds in window
/// coordinates while the overlay is showing.
fn draw_info_overlay(
    painter: &egui::Painter,
    window_rect: egui::Rect,
    scene: &Scene,
    controller: &ViewController<SurfaceAnimator>,
) -> Option<egui::Rect> {
    let alpha = controller.applier().alpha(FadeLayer::InfoOverlay);
    if alpha <= 0.0 {
        return None;
    }

    painter.rect_filled(window_rect, 0.0, colors::OVERLAY_BACKDROP.gamma_multiply(alpha));

    let content = controller
        .info_slot()
        .and_then(|index| scene.points.get(index))
        .map(|point| &point.info)?;

    let card_rect = draw_info_card(painter, window_rect, content, alpha);
    Some(card_rect.translate(-window_rect.min.to_vec2()))
}

fn draw_info_card(
    painter: &egui::Painter,
    window_rect: egui::Rect,
    content: &InfoContent,
    alpha: f32,
) -> egui::Rect {
    let card_width = (window_rect.width() * INFO_CARD_WIDTH_FRACTION).max(INFO_CARD_MIN_WIDTH);
    let wrap_width = card_width - 2.0 * INFO_CARD_PADDING;

    let heading = painter.layout(
        content.heading.clone(),
        egui::FontId::proportional(26.0),
        colors::INFO_HEADING.gamma_multiply(alpha),
        wrap_width,
    );
    let paragraphs: Vec<_> = content
        .paragraphs
        .iter()
        .map(|text| {
            painter.layout(
                text.clone(),
                egui::FontId::proportional(15.0),
                colors::INFO_TEXT.gamma_multiply(alpha),
                wrap_width,
            )
        })
        .collect();

    let spacing = 12.0;
    let content_height = heading.size().y
        + paragraphs
            .iter()
            .map(|galley| galley.size().y + spacing)
            .sum::<f32>();
    let card_height = (content_height + 2.0 * INFO_CARD_PADDING)
        .min(window_rect.height() - 2.0 * INFO_CARD_MARGIN);

    let card_rect = egui::Rect::from_min_size(
        egui::pos2(
            window_rect.min.x + INFO_CARD_MARGIN,
            window_rect.center().y - card_height / 2.0,
        ),
        egui::vec2(card_width, card_height),
    );

    painter.rect_filled(card_rect, 8.0, colors::INFO_CARD_FILL.gamma_multiply(alpha));
    painter.rect_stroke(
        card_rect,
        8.0,
        egui::Stroke::new(1.0, colors::INFO_CARD_STROKE.gamma_multiply(alpha * 0.6)),
        egui::StrokeKind::Inside,
    );

    let painter = card_painter(painter, card_rect);
    let mut cursor = card_rect.min + egui::vec2(INFO_CARD_PADDING, INFO_CARD_PADDING);
    cursor.y += heading.size().y + spacing;
    painter.galley(
        card_rect.min + egui::vec2(INFO_CARD_PADDING, INFO_CARD_PADDING),
        heading,
        colors::INFO_HEADING,
    );
    for galley in paragraphs {
        let height = galley.size().y;
        painter.galley(cursor, galley, colors::INFO_TEXT);
        cursor.y += height + spacing;
    }

    card_rect
}

/// Painter for the card contents, clipped so long text stays inside the card.
fn card_painter(painter: &egui::Painter, card_rect: egui::Rect) -> egui::Painter {
    painter.with_clip_rect(card_rect.intersect(painter.clip_rect()))
}

fn draw_title_screen(
    painter: &egui::Painter,
    window_rect: egui::Rect,
    scene: &Scene,
    animator: &SurfaceAnimator,
) {
    let alpha = animator.alpha(FadeLayer::TitleScreen);
    if alpha <= 0.0 {
        return;
    }

    painter.rect_filled(window_rect, 0.0, colors::TITLE_FILL.gamma_multiply(alpha));

    let center = window_rect.center();
    painter.text(
        center - egui::vec2(0.0, 24.0),
        egui::Align2::CENTER_BOTTOM,
        &scene.title,
        egui::FontId::proportional(48.0),
        colors::TITLE_TEXT.gamma_multiply(alpha),
    );

    if let Some(subtitle) = &scene.subtitle {
        painter.text(
            center,
            egui::Align2::CENTER_TOP,
            subtitle,
            egui::FontId::proportional(20.0),
            colors::TITLE_SUBTITLE.gamma_multiply(alpha),
        );
    }

    painter.text(
        egui::pos2(center.x, window_rect.bottom() - 48.0),
        egui::Align2::CENTER_BOTTOM,
        &scene.hint,
        egui::FontId::proportional(16.0),
        colors::TITLE_HINT.gamma_multiply(alpha),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use poi_viewer::PointOfInterest;

    const WINDOW: egui::Vec2 = egui::vec2(1000.0, 800.0);
    const IMAGE: egui::Vec2 = egui::vec2(2000.0, 1000.0);

    fn point(left: &str, top: &str) -> PointOfInterest {
        PointOfInterest {
            name: format!("{left} {top}"),
            left: left.to_owned(),
            top: top.to_owned(),
            zoom: None,
            info: InfoContent::default(),
        }
    }

    fn frame() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(400.0, 0.0), egui::vec2(600.0, 800.0))
    }

    fn card() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(32.0, 200.0), egui::vec2(340.0, 400.0))
    }

    fn loaded() -> ViewController<SurfaceAnimator> {
        let points = [point("50%", "50%"), point("10%", "20%")];
        let mut controller = ViewController::new(SurfaceAnimator::default(), &points).unwrap();
        controller.on_load(WINDOW, IMAGE);
        controller
    }

    /// Past the title screen with every animation settled.
    fn settled() -> ViewController<SurfaceAnimator> {
        let mut controller = loaded();
        controller.dismiss_title();
        controller.applier_mut().tick(1.0);
        controller
    }

    #[test]
    fn test_title_screen_takes_clicks_until_faded() {
        let mut controller = loaded();
        assert_eq!(
            click_target(&controller, None, egui::pos2(500.0, 400.0)),
            ClickTarget::TitleScreen
        );

        // still on top while fading out
        controller.dismiss_title();
        controller.applier_mut().tick(0.25);
        assert_eq!(
            click_target(&controller, Some(card()), egui::pos2(500.0, 400.0)),
            ClickTarget::TitleScreen
        );

        controller.applier_mut().tick(1.0);
        assert_eq!(
            click_target(&controller, None, egui::pos2(900.0, 50.0)),
            ClickTarget::Nothing
        );
    }

    #[test]
    fn test_title_screen_sits_above_overlay() {
        let mut controller = loaded();
        controller.show_point_info(0, frame());
        controller.applier_mut().tick(0.1);

        assert!(controller.applier().is_shown(FadeLayer::InfoOverlay));
        assert_eq!(
            click_target(&controller, Some(card()), egui::pos2(100.0, 300.0)),
            ClickTarget::TitleScreen
        );
    }

    #[test]
    fn test_overlay_splits_card_and_backdrop() {
        let mut controller = settled();
        controller.show_point_info(0, frame());
        controller.applier_mut().tick(0.1);

        assert_eq!(
            click_target(&controller, Some(card()), egui::pos2(100.0, 300.0)),
            ClickTarget::Overlay {
                inside_content: true
            }
        );
        assert_eq!(
            click_target(&controller, Some(card()), egui::pos2(700.0, 400.0)),
            ClickTarget::Overlay {
                inside_content: false
            }
        );
    }

    #[test]
    fn test_invisible_marker_is_clickable() {
        let controller = settled();
        assert_eq!(controller.markers()[0].opacity, 0.0);

        // surface is centered at identity, so the first marker sits at (500, 400)
        assert_eq!(
            click_target(&controller, None, egui::pos2(510.0, 400.0)),
            ClickTarget::Marker(0)
        );
        assert_eq!(
            click_target(&controller, None, egui::pos2(520.0, 400.0)),
            ClickTarget::Nothing
        );
    }

    #[test]
    fn test_card_painter_clips_to_card() {
        let ctx = egui::Context::default();
        let window = egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 200.0));
        let painter = egui::Painter::new(ctx, egui::LayerId::background(), window);

        let clipped = card_painter(&painter, card());
        assert_eq!(
            clipped.clip_rect(),
            egui::Rect::from_min_max(egui::pos2(32.0, 200.0), egui::pos2(372.0, 200.0))
        );

        let roomy = egui::Painter::new(
            egui::Context::default(),
            egui::LayerId::background(),
            egui::Rect::from_min_size(egui::Pos2::ZERO, WINDOW),
        );
        assert_eq!(card_painter(&roomy, card()).clip_rect(), card());
    }
}
