use glam::DVec3;
use image::RgbaImage;
use orrery_lighting::{DEFAULT_AMBIENT, DirectionalLight, outward_normal};
use orrery_mesh::{Rgba, RotationStep};
use orrery_planet::Body;
use orrery_terrain::{BodySetting, NoiseField};

use crate::{Layer, RenderBody, Renderer};

const BACKGROUND: Rgba = [0, 0, 0, 255];

/// Flat terrain everywhere; full cloud cover when `cloudy`.
struct Sky {
    cloudy: bool,
}

impl NoiseField for Sky {
    fn sample(&self, _: DVec3, _: f64, amplitude: f64, _: u32) -> f64 {
        // Cloud cover is the only field sampled with unit amplitude.
        if self.cloudy && amplitude == 1.0 {
            0.9
        } else {
            0.0
        }
    }
}

fn flat(setting: BodySetting, cloudy: bool) -> Body {
    Body::generate_with("flat", setting, "render", 2, &Sky { cloudy }).unwrap()
}

fn background(size: u32) -> RgbaImage {
    RgbaImage::from_pixel(size, size, image::Rgba(BACKGROUND))
}

fn centered(body: &Body, size: u32) -> RenderBody<'_> {
    RenderBody {
        body,
        offset: DVec3::new(size as f64 / 2.0, size as f64 / 2.0, 0.0),
    }
}

#[test]
fn test_empty_scene_is_background() {
    let bg = background(32);
    let frame = Renderer::default().render(&bg, &[]);
    assert_eq!(frame, bg);
}

#[test]
fn test_faces_away_from_light_are_darker() {
    let mut body = flat(BodySetting::terrestrial_oceans(100.0), false);
    for _ in 0..7 {
        body.rotate(RotationStep::default());
    }
    let renderer = Renderer::new(DirectionalLight::new(DVec3::Z).unwrap());
    let faces = renderer.draw_list(&[centered(&body, 128)], Layer::Terrain);
    assert_eq!(faces.len(), 320);

    let mesh = body.mesh();
    let dot = |face: usize| {
        let [a, b, c] = mesh.face_corners(face);
        outward_normal(a, b, c).normalize().dot(DVec3::Z)
    };
    let brightness = |c: Rgba| c[0] as u32 + c[1] as u32 + c[2] as u32;

    let (lit, unlit): (Vec<&crate::DrawFace>, Vec<&crate::DrawFace>) = faces.iter().partition(|f| dot(f.face) > 0.0);
    assert!(!lit.is_empty() && !unlit.is_empty());
    for dark in &unlit {
        assert!((dark.intensity - DEFAULT_AMBIENT).abs() < 1e-12);
        for bright in &lit {
            assert!(dark.intensity < bright.intensity);
            assert!(
                brightness(dark.color) < brightness(bright.color),
                "face {} facing away must render darker than face {}",
                dark.face,
                bright.face
            );
        }
    }
}

#[test]
fn test_draw_list_sorted_back_to_front() {
    let body = flat(BodySetting::classic_moon(60.0), false);
    let faces = Renderer::default().draw_list(&[centered(&body, 64)], Layer::Terrain);
    assert!(faces.windows(2).all(|w| w[0].depth <= w[1].depth));
}

#[test]
fn test_front_body_wins_overlap() {
    let ocean = flat(BodySetting::terrestrial_oceans(60.0), false);
    let moon = flat(BodySetting::classic_moon(60.0), false);
    let bg = background(64);
    let renderer = Renderer::default();
    let at = |body, z| RenderBody {
        body,
        offset: DVec3::new(32.0, 32.0, z),
    };

    let frame = renderer.render(&bg, &[at(&ocean, 0.0), at(&moon, -100.0)]);
    assert!(frame.get_pixel(32, 32).0[0] < 70, "ocean in front should show blue");

    let frame = renderer.render(&bg, &[at(&ocean, 0.0), at(&moon, 100.0)]);
    assert!(frame.get_pixel(32, 32).0[0] > 150, "moon in front should show grey");
}

#[test]
fn test_back_clouds_excluded_and_composited() {
    let body = flat(BodySetting::terrestrial_oceans(100.0), true);
    assert_eq!(body.clouds().len(), body.mesh().faces().len());
    let renderer = Renderer::default();
    let target = centered(&body, 128);

    let clouds = renderer.draw_list(&[target], Layer::Cloud);
    assert!(!clouds.is_empty());
    assert!(clouds.len() < body.clouds().len(), "back half of the shell is culled");
    assert!(clouds.iter().all(|c| c.color[3] == 185), "cloud alpha is kept");

    let frame = renderer.render(&background(128), &[target]);
    let [r, _, _, a] = frame.get_pixel(64, 64).0;
    assert_eq!(a, 255);
    assert!(r > 150, "white cloud over ocean should lift red, got {r}");
}

#[test]
fn test_clear_body_matches_without_cloud_layer() {
    let body = flat(BodySetting::classic_moon(50.0), false);
    let renderer = Renderer::default();
    assert!(renderer.draw_list(&[centered(&body, 64)], Layer::Cloud).is_empty());
    let frame = renderer.render(&background(64), &[centered(&body, 64)]);
    assert_ne!(frame.get_pixel(32, 32).0, BACKGROUND);
    assert_eq!(frame.get_pixel(1, 1).0, BACKGROUND, "corner stays empty");
}

#[test]
fn test_wireframe_overlay() {
    let body = flat(BodySetting::classic_moon(50.0), false);
    let bg = background(64);
    let has_wire = |frame: &RgbaImage| frame.pixels().any(|p| p.0 == [0, 0, 200, 255]);

    let plain = Renderer::default().render(&bg, &[centered(&body, 64)]);
    assert!(!has_wire(&plain));
    let wired = Renderer::default()
        .with_wireframe(true)
        .render(&bg, &[centered(&body, 64)]);
    assert!(has_wire(&wired), "flat chords sit under the base radius and draw blue");
}
