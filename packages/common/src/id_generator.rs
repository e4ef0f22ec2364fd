use crc32fast::Hasher;

/// Derive a short, stable seed from a template id using CRC32
pub fn get_seed(template_id: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(template_id.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for the elements of one template
///
/// Ids have the shape `{prefix}-{seed}-{n}`. The counter only moves forward,
/// so an id is never handed out twice within a session, even after the
/// element carrying it has been deleted.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u64,
}

impl IdGenerator {
    pub fn new(template_id: &str) -> Self {
        Self {
            seed: get_seed(template_id),
            count: 0,
        }
    }

    /// Generate the next id with the given prefix
    pub fn new_id(&mut self, prefix: &str) -> String {
        self.count += 1;
        format!("{}-{}-{}", prefix, self.seed, self.count)
    }

    /// Advance the counter past an existing id minted with this seed.
    ///
    /// Ids from other seeds (or hand-written ones) cannot collide with ours
    /// and are ignored.
    pub fn observe(&mut self, id: &str) {
        let Some((head, tail)) = id.rsplit_once('-') else {
            return;
        };
        if !head.ends_with(&format!("-{}", self.seed)) {
            return;
        }
        if let Ok(n) = tail.parse::<u64>() {
            self.count = self.count.max(n);
        }
    }

    /// Get the seed
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Number of the most recently issued (or observed) id
    pub fn count(&self) -> u64 {
        self.count
    }
}
