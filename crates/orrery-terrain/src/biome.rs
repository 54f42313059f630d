//! Biome table: maps quantized `(elevation, moisture)` levels to named colors.

use hashbrown::HashMap;
use orrery_mesh::Rgba;

/// A named surface classification with its base color.
#[derive(Clone, Debug, PartialEq)]
pub struct Biome {
    pub name: String,
    pub color: Rgba,
}

/// Index of a biome inside a [`BiomeTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BiomeId(pub u16);

/// Lookup from `(elevation level, moisture level)` to a biome, with a
/// designated fallback for pairs that have no entry.
///
/// A missing pair is not an error; it simply resolves to the fallback.
#[derive(Clone, Debug)]
pub struct BiomeTable {
    biomes: Vec<Biome>,
    name_to_id: HashMap<String, BiomeId>,
    assignments: HashMap<(i32, i32), BiomeId>,
    fallback: BiomeId,
}

impl BiomeTable {
    /// Create a table whose only biome is the fallback.
    pub fn new(fallback_name: &str, fallback_color: Rgba) -> Self {
        let mut table = Self {
            biomes: Vec::new(),
            name_to_id: HashMap::new(),
            assignments: HashMap::new(),
            fallback: BiomeId(0),
        };
        table.fallback = table.register(fallback_name, fallback_color);
        table
    }

    /// Register a biome by name. Re-registering a name updates its color and
    /// returns the existing id.
    pub fn register(&mut self, name: &str, color: Rgba) -> BiomeId {
        if let Some(&id) = self.name_to_id.get(name) {
            self.biomes[id.0 as usize].color = color;
            return id;
        }
        let id = BiomeId(self.biomes.len() as u16);
        self.biomes.push(Biome {
            name: name.to_string(),
            color,
        });
        self.name_to_id.insert(name.to_string(), id);
        id
    }

    /// Map a level pair to a registered biome, replacing any prior entry.
    pub fn assign(&mut self, elevation: i32, moisture: i32, biome: BiomeId) {
        self.assignments.insert((elevation, moisture), biome);
    }

    /// Resolve a level pair, falling back to the default biome on a miss.
    pub fn lookup(&self, elevation: i32, moisture: i32) -> &Biome {
        let id = self
            .assignments
            .get(&(elevation, moisture))
            .copied()
            .unwrap_or(self.fallback);
        &self.biomes[id.0 as usize]
    }

    /// Returns `true` if the pair has an explicit entry.
    pub fn contains(&self, elevation: i32, moisture: i32) -> bool {
        self.assignments.contains_key(&(elevation, moisture))
    }

    /// The fallback biome.
    pub fn fallback(&self) -> &Biome {
        &self.biomes[self.fallback.0 as usize]
    }

    /// Look up a biome by name.
    pub fn by_name(&self, name: &str) -> Option<&Biome> {
        self.name_to_id
            .get(name)
            .map(|id| &self.biomes[id.0 as usize])
    }

    /// All registered biomes, fallback first.
    pub fn biomes(&self) -> &[Biome] {
        &self.biomes
    }

    /// Number of explicit `(elevation, moisture)` entries.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> BiomeTable {
        let mut table = BiomeTable::new("OCEAN", [63, 156, 255, 255]);
        let snow = table.register("SNOW", [248, 248, 248, 255]);
        let desert = table.register("DESERT", [233, 221, 199, 255]);
        table.assign(2, 2, snow);
        table.assign(1, 1, desert);
        table
    }

    #[test]
    fn test_hit_returns_assigned_biome() {
        let table = small_table();
        assert_eq!(table.lookup(2, 2).name, "SNOW");
        assert_eq!(table.lookup(1, 1).name, "DESERT");
    }

    #[test]
    fn test_miss_returns_fallback() {
        let table = small_table();
        assert_eq!(table.lookup(0, 0).name, "OCEAN");
        assert_eq!(table.lookup(-3, 9).color, [63, 156, 255, 255]);
        assert!(!table.contains(0, 0));
    }

    #[test]
    fn test_reregister_updates_color() {
        let mut table = small_table();
        let id = table.register("SNOW", [255, 255, 255, 255]);
        assert_eq!(table.biomes().len(), 3);
        assert_eq!(table.lookup(2, 2).color, [255, 255, 255, 255]);
        assert_eq!(table.by_name("SNOW").map(|b| b.color), Some([255, 255, 255, 255]));
        assert_eq!(id, BiomeId(1));
    }

    #[test]
    fn test_fallback_first() {
        let table = small_table();
        assert_eq!(table.biomes()[0].name, "OCEAN");
        assert_eq!(table.fallback().name, "OCEAN");
        assert_eq!(table.assignment_count(), 2);
    }
}
