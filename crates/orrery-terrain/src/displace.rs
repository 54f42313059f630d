//! Radial terrain displacement from three noise octaves, masked by islands.

use glam::DVec3;
use orrery_mesh::GeodesicMesh;
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::noise_field::NoiseField;
use crate::setting::BodySetting;

/// A spherical region of influence in which terrain noise survives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Island {
    pub center: DVec3,
    pub radius: f64,
}

/// Strongest island influence at `point`: the maximum over all islands of
/// `1 - distance / radius`, floored at zero. Zero with no islands.
pub fn island_influence(point: DVec3, islands: &[Island]) -> f64 {
    islands
        .iter()
        .map(|island| 1.0 - point.distance(island.center) / island.radius)
        .fold(0.0, f64::max)
}

/// Per-octave seeds drawn from the body's stream.
#[derive(Clone, Copy, Debug)]
struct OctaveSeeds {
    large: u32,
    medium: u32,
    small: u32,
}

/// Lifts each node of a mesh along its own direction by a noise height.
pub struct TerrainSynthesizer<'a, N: NoiseField + ?Sized> {
    setting: &'a BodySetting,
    noise: &'a N,
}

impl<'a, N: NoiseField + ?Sized> TerrainSynthesizer<'a, N> {
    pub fn new(setting: &'a BodySetting, noise: &'a N) -> Self {
        Self { setting, noise }
    }

    /// Displace every node of `mesh` and return the islands used.
    ///
    /// Random draws happen up front and in a fixed order: the large, medium
    /// and small octave seeds, the island count, then a radius and a center
    /// node for each island. Only the per-node work afterwards runs in
    /// parallel.
    pub fn displace<R: Rng + ?Sized>(&self, mesh: &mut GeodesicMesh, rng: &mut R) -> Vec<Island> {
        let seeds = OctaveSeeds {
            large: rng.random(),
            medium: rng.random(),
            small: rng.random(),
        };
        let islands = self.draw_islands(mesh.nodes(), rng);
        debug!(
            "{}: {} islands, octave seeds {:?}",
            self.setting.kind,
            islands.len(),
            seeds
        );

        let displaced: Vec<DVec3> = mesh
            .nodes()
            .par_iter()
            .map(|&node| node * (1.0 + self.height(node, seeds, &islands)))
            .collect();
        mesh.replace_nodes(displaced);

        info!(
            "Displaced {} nodes of {} body",
            mesh.nodes().len(),
            self.setting.kind
        );
        islands
    }

    fn draw_islands<R: Rng + ?Sized>(&self, nodes: &[DVec3], rng: &mut R) -> Vec<Island> {
        let count = self.setting.island_count;
        let size = self.setting.island_size;
        let total = rng.random_range(count.min..=count.max);
        (0..total)
            .map(|_| {
                let radius = rng.random_range(size.min..=size.max);
                let center = nodes[rng.random_range(0..nodes.len())];
                Island { center, radius }
            })
            .collect()
    }

    /// Radial multiplier minus one for a single node.
    fn height(&self, node: DVec3, seeds: OctaveSeeds, islands: &[Island]) -> f64 {
        let amplitude = self.setting.amplitude();
        let weights = self.setting.octave_weights;
        let periods = self.setting.octave_periods;

        let raw = weights.large * self.noise.sample(node, periods.large, amplitude, seeds.large)
            + weights.medium * self.noise.sample(node, periods.medium, amplitude, seeds.medium)
            + weights.small * self.noise.sample(node, periods.small, amplitude, seeds.small);

        let influence = island_influence(node, islands);
        (raw - amplitude * weights.sum() * (1.0 - influence)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise_field::PerlinField;
    use crate::seed::body_rng;

    /// Returns the full amplitude everywhere.
    struct Saturated;

    impl NoiseField for Saturated {
        fn sample(&self, _: DVec3, _: f64, amplitude: f64, _: u32) -> f64 {
            amplitude
        }
    }

    fn mesh(diameter: f64, levels: u32) -> GeodesicMesh {
        GeodesicMesh::build(diameter, levels).unwrap()
    }

    #[test]
    fn test_influence_outside_all_islands_is_zero() {
        let islands = [Island {
            center: DVec3::new(10.0, 0.0, 0.0),
            radius: 2.0,
        }];
        assert_eq!(island_influence(DVec3::new(-10.0, 0.0, 0.0), &islands), 0.0);
        assert_eq!(island_influence(DVec3::ZERO, &[]), 0.0);
    }

    #[test]
    fn test_influence_takes_strongest_island() {
        let islands = [
            Island {
                center: DVec3::ZERO,
                radius: 4.0,
            },
            Island {
                center: DVec3::new(1.0, 0.0, 0.0),
                radius: 2.0,
            },
        ];
        let v = island_influence(DVec3::new(1.0, 0.0, 0.0), &islands);
        assert!((v - 1.0).abs() < 1e-12, "center of an island is full influence, got {v}");
        let v = island_influence(DVec3::new(-2.0, 0.0, 0.0), &islands);
        assert!((v - 0.5).abs() < 1e-12, "half way out of the big island, got {v}");
    }

    #[test]
    fn test_displacement_is_radial() {
        let setting = BodySetting::terrestrial_oceans(100.0);
        let noise = PerlinField::new();
        let mut m = mesh(100.0, 1);
        let before = m.nodes().to_vec();
        TerrainSynthesizer::new(&setting, &noise).displace(&mut m, &mut body_rng(1, "a"));
        for (old, new) in before.iter().zip(m.nodes()) {
            let cross = old.normalize().cross(new.normalize()).length();
            assert!(cross < 1e-9, "node moved laterally: {old} -> {new}");
            assert!(new.length() >= old.length() - 1e-9, "terrain never sinks below base");
        }
    }

    #[test]
    fn test_heights_stay_within_bounds() {
        let setting = BodySetting::terrestrial_oceans(100.0);
        let mut m = mesh(100.0, 2);
        TerrainSynthesizer::new(&setting, &Saturated).displace(&mut m, &mut body_rng(3, "a"));
        for node in m.nodes() {
            let h = node.length();
            assert!(
                h <= setting.max_height + 1e-9,
                "height {h} above max {}",
                setting.max_height
            );
            assert!(h >= setting.min_height - 1e-9);
        }
    }

    #[test]
    fn test_island_centers_lift_to_max_height() {
        let setting = BodySetting::classic_moon(80.0);
        let mut m = mesh(80.0, 1);
        let islands =
            TerrainSynthesizer::new(&setting, &Saturated).displace(&mut m, &mut body_rng(5, "m"));
        assert!(islands.len() >= 30 && islands.len() <= 35);
        let peak = m
            .nodes()
            .iter()
            .map(|n| n.length())
            .fold(f64::MIN, f64::max);
        assert!(
            (peak - setting.max_height).abs() < 1e-9,
            "an island center with saturated noise must hit max height, got {peak}"
        );
    }

    #[test]
    fn test_island_size_range_is_inclusive() {
        let mut setting = BodySetting::classic_moon(80.0);
        setting.island_size = crate::SpanRange::new(12.0, 12.0);
        let mut m = mesh(80.0, 1);
        let islands =
            TerrainSynthesizer::new(&setting, &Saturated).displace(&mut m, &mut body_rng(6, "m"));
        assert!(!islands.is_empty());
        assert!(islands.iter().all(|i| i.radius == 12.0), "min == max pins every radius");
    }

    #[test]
    fn test_same_seed_bit_identical() {
        let setting = BodySetting::terrestrial_iron_oxide(120.0);
        let noise = PerlinField::new();
        let mut a = mesh(120.0, 2);
        let mut b = mesh(120.0, 2);
        let synth = TerrainSynthesizer::new(&setting, &noise);
        synth.displace(&mut a, &mut body_rng(77, "iron"));
        synth.displace(&mut b, &mut body_rng(77, "iron"));
        for (p, q) in a.nodes().iter().zip(b.nodes()) {
            assert_eq!(p.to_array().map(f64::to_bits), q.to_array().map(f64::to_bits));
        }
    }

    #[test]
    fn test_different_seed_changes_terrain() {
        let setting = BodySetting::terrestrial_oceans(120.0);
        let noise = PerlinField::new();
        let mut a = mesh(120.0, 2);
        let mut b = mesh(120.0, 2);
        let synth = TerrainSynthesizer::new(&setting, &noise);
        synth.displace(&mut a, &mut body_rng(1, "terra"));
        synth.displace(&mut b, &mut body_rng(2, "terra"));
        assert_ne!(a.nodes(), b.nodes(), "differing seeds should change the terrain");
    }

    #[test]
    fn test_topology_untouched() {
        let setting = BodySetting::classic_moon(60.0);
        let mut m = mesh(60.0, 1);
        let counts = m.counts();
        TerrainSynthesizer::new(&setting, &PerlinField::new()).displace(&mut m, &mut body_rng(9, "x"));
        assert_eq!(m.counts(), counts);
        assert!(m.validate().is_ok());
    }
}
